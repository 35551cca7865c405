use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{data_structures::texture::Texture, resources::load_binary};

/// Where a requested texture currently stands.
#[derive(Clone, Debug)]
pub enum TextureState {
    Pending,
    Ready(Texture),
    /// The asset could not be loaded; the texture renders nothing.
    Blank(Texture),
}

/**
 * A placeholder for a texture that may still be loading.
 *
 * Handles are cheap to clone and all clones observe the same state, so an
 * icon can be built and inserted before its image has arrived.
 */
#[derive(Clone, Debug)]
pub struct TextureHandle {
    source: Rc<str>,
    state: Rc<RefCell<TextureState>>,
}

impl TextureHandle {
    pub fn pending(source: &str) -> Self {
        Self {
            source: Rc::from(source),
            state: Rc::new(RefCell::new(TextureState::Pending)),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_pending(&self) -> bool {
        matches!(*self.state.borrow(), TextureState::Pending)
    }

    pub fn resolve(&self, state: TextureState) {
        *self.state.borrow_mut() = state;
    }

    /// Runs `f` with the loaded (or blank) texture, or returns `None` while pending.
    pub fn with_texture<R>(&self, f: impl FnOnce(&Texture) -> R) -> Option<R> {
        match &*self.state.borrow() {
            TextureState::Pending => None,
            TextureState::Ready(texture) | TextureState::Blank(texture) => Some(f(texture)),
        }
    }

    pub fn shares_state_with(&self, other: &TextureHandle) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

/// Hands out texture handles for asset paths without blocking the caller.
pub trait TextureProvider {
    fn load(&self, source: &str) -> TextureHandle;
}

/**
 * Texture provider backed by a WGPU device.
 *
 * `load` only records the request. The host drives `resolve_pending` (or
 * `spawn_resolve` on the web) off the construction path; requests for the same
 * source share one handle.
 */
pub struct WgpuTextureLoader {
    device: wgpu::Device,
    queue: wgpu::Queue,
    cache: RefCell<HashMap<String, TextureHandle>>,
    pending: RefCell<Vec<TextureHandle>>,
}

impl WgpuTextureLoader {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self {
            device: device.clone(),
            queue: queue.clone(),
            cache: RefCell::new(HashMap::new()),
            pending: RefCell::new(Vec::new()),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Loads every texture requested so far. Failures are logged and degrade to a blank texture.
    pub async fn resolve_pending(&self) {
        let handles: Vec<TextureHandle> = self.pending.borrow_mut().drain(..).collect();
        if handles.is_empty() {
            return;
        }
        log::debug!("resolving {} icon textures", handles.len());
        let loads = handles.iter().map(|handle| load_binary(handle.source()));
        let results = futures::future::join_all(loads).await;
        for (handle, result) in handles.iter().zip(results) {
            let texture = result.and_then(|bytes| {
                let extension = handle.source().rsplit('.').next();
                Texture::from_bytes(&self.device, &self.queue, &bytes, handle.source(), extension)
            });
            match texture {
                Ok(texture) => handle.resolve(TextureState::Ready(texture)),
                Err(e) => {
                    log::warn!("Icon texture {} could not be loaded: {}", handle.source(), e);
                    handle.resolve(TextureState::Blank(Texture::create_blank(
                        &self.device,
                        &self.queue,
                    )));
                }
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn spawn_resolve(self: &Rc<Self>) {
        let loader = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            loader.resolve_pending().await;
        });
    }
}

impl TextureProvider for WgpuTextureLoader {
    fn load(&self, source: &str) -> TextureHandle {
        if let Some(handle) = self.cache.borrow().get(source) {
            return handle.clone();
        }
        let handle = TextureHandle::pending(source);
        self.cache
            .borrow_mut()
            .insert(source.to_string(), handle.clone());
        self.pending.borrow_mut().push(handle.clone());
        handle
    }
}
