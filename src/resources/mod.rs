//! Asset access and deferred resources.
//!
//! Files are read from the assets root on native targets and fetched relative
//! to the page origin on the web. Everything that hangs off the frame loop
//! (textures, tweens) is handed out as a handle first and filled in later.

pub mod animation;
pub mod texture;

/// Environment variable that overrides the native assets root.
pub const ASSETS_ENV: &str = "SCENE_MARKERS_ASSETS";

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window available"))?;
    let origin = window
        .location()
        .origin()
        .map_err(|e| anyhow::anyhow!("could not read page origin: {:?}", e))?;
    let base = reqwest::Url::parse(&format!("{}/", origin))?;
    Ok(base.join(file_name)?)
}

/// The copy of `assets/` that the build script places in `OUT_DIR`.
#[cfg(not(target_arch = "wasm32"))]
pub fn bundled_assets_root() -> std::path::PathBuf {
    std::path::Path::new(env!("OUT_DIR")).join("assets")
}

/**
 * Resolves an asset on native targets.
 *
 * `SCENE_MARKERS_ASSETS` wins when set. Otherwise `./assets` is used if it
 * holds the file, and the bundled copy from the build otherwise, so binaries
 * started outside the package directory still find the shipped tables.
 */
#[cfg(not(target_arch = "wasm32"))]
pub fn asset_path(file_name: &str) -> std::path::PathBuf {
    if let Ok(root) = std::env::var(ASSETS_ENV) {
        return std::path::Path::new(&root).join(file_name);
    }
    let local = std::path::Path::new("./assets").join(file_name);
    if local.exists() {
        local
    } else {
        bundled_assets_root().join(file_name)
    }
}

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    #[cfg(target_arch = "wasm32")]
    let txt = {
        let url = format_url(file_name)?;
        reqwest::get(url).await?.text().await?
    };
    #[cfg(not(target_arch = "wasm32"))]
    let txt = tokio::fs::read_to_string(asset_path(file_name)).await?;

    Ok(txt)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name)?;
        reqwest::get(url).await?.bytes().await?.to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = tokio::fs::read(asset_path(file_name)).await?;

    Ok(data)
}
