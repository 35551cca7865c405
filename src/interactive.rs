//! Interactive (DOM) context for signs.
//!
//! Signs need a compositor that can host DOM content in 3D, plus a way to
//! navigate when one is clicked. Both are passed in explicitly through
//! [`InteractiveContext`]. A headless host passes
//! [`InteractiveContext::Headless`] and simply gets no signs.

use std::rc::Rc;

use cgmath::Matrix4;

pub const SIGN_CONTAINER_CLASS: &str = "map-sign-container";
pub const SIGN_TEXT_CLASS: &str = "map-sign standard-text";
pub const SIGN_DECORATION_CLASS: &str = "child-element";

/// Declarative description of a sign's DOM fragment.
///
/// The container holds a text element, which is the only part that receives
/// pointer events, followed by a decorative child.
#[derive(Clone)]
pub struct SignPanel {
    pub text: String,
    pub container_class: &'static str,
    pub text_class: &'static str,
    pub decoration_class: &'static str,
    pub on_click: Rc<dyn Fn()>,
}

impl SignPanel {
    pub fn new(text: &str, on_click: Rc<dyn Fn()>) -> Self {
        Self {
            text: text.to_string(),
            container_class: SIGN_CONTAINER_CLASS,
            text_class: SIGN_TEXT_CLASS,
            decoration_class: SIGN_DECORATION_CLASS,
            on_click,
        }
    }

    pub fn click(&self) {
        (self.on_click)();
    }
}

/// A DOM fragment placed in 3D space by the compositor.
pub trait DomFragment {
    fn set_world_matrix(&mut self, world: &Matrix4<f32>);
}

pub trait DomCompositor {
    fn create_panel(&self, panel: SignPanel) -> anyhow::Result<Box<dyn DomFragment>>;
}

pub trait Navigator {
    /// Performs a full page navigation.
    fn navigate(&self, url: &str);
}

#[derive(Clone)]
pub enum InteractiveContext {
    Headless,
    Interactive {
        compositor: Rc<dyn DomCompositor>,
        navigator: Rc<dyn Navigator>,
    },
}

impl InteractiveContext {
    pub fn interactive(compositor: Rc<dyn DomCompositor>, navigator: Rc<dyn Navigator>) -> Self {
        Self::Interactive {
            compositor,
            navigator,
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive { .. })
    }

    /**
     * Binds to the page's CSS3D layer with the given element id.
     *
     * Falls back to `Headless` when there is no window, no document or no such element.
     */
    #[cfg(target_arch = "wasm32")]
    pub fn from_document(layer_id: &str) -> Self {
        match web::WebCompositor::new(layer_id) {
            Ok(compositor) => Self::interactive(Rc::new(compositor), Rc::new(web::WebNavigator)),
            Err(e) => {
                log::info!("No interactive context for signs: {}", e);
                Self::Headless
            }
        }
    }
}

/**
 * CSS transform of an object in a DOM-in-3D layer.
 *
 * The world matrix is written column-major into `matrix3d`, with the Y basis
 * negated because CSS y grows downwards. The fragment is centred on its
 * anchor first.
 */
pub fn css_matrix3d(world: &Matrix4<f32>) -> String {
    let m: &[f32; 16] = world.as_ref();
    let clean = |v: f32| if v.abs() < 1e-7 { 0.0 } else { v };
    let values: Vec<String> = m
        .iter()
        .enumerate()
        .map(|(i, &v)| if (4..8).contains(&i) { -v } else { v })
        .map(|v| clean(v).to_string())
        .collect();
    format!("translate(-50%,-50%)matrix3d({})", values.join(","))
}

#[cfg(target_arch = "wasm32")]
mod web {
    use anyhow::anyhow;
    use cgmath::Matrix4;
    use wasm_bindgen::{JsCast, closure::Closure};

    use super::{DomCompositor, DomFragment, Navigator, SignPanel, css_matrix3d};

    pub struct WebCompositor {
        document: web_sys::Document,
        layer: web_sys::Element,
    }

    impl WebCompositor {
        pub fn new(layer_id: &str) -> anyhow::Result<Self> {
            let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
            let document = window.document().ok_or_else(|| anyhow!("no document"))?;
            let layer = document
                .get_element_by_id(layer_id)
                .ok_or_else(|| anyhow!("no element with id {}", layer_id))?;
            Ok(Self { document, layer })
        }

        fn div(&self, class: &str) -> anyhow::Result<web_sys::HtmlElement> {
            let element = self
                .document
                .create_element("div")
                .map_err(|e| anyhow!("could not create element: {:?}", e))?;
            element.set_class_name(class);
            element
                .dyn_into::<web_sys::HtmlElement>()
                .map_err(|_| anyhow!("created element is not an HtmlElement"))
        }
    }

    impl DomCompositor for WebCompositor {
        fn create_panel(&self, panel: SignPanel) -> anyhow::Result<Box<dyn DomFragment>> {
            let js_err = |e: wasm_bindgen::JsValue| anyhow!("{:?}", e);

            let container = self.div(panel.container_class)?;
            let text = self.div(panel.text_class)?;
            text.style()
                .set_property("pointer-events", "auto")
                .map_err(js_err)?;
            text.set_text_content(Some(&panel.text));
            let decoration = self.div(panel.decoration_class)?;
            container.append_child(&text).map_err(js_err)?;
            container.append_child(&decoration).map_err(js_err)?;

            let on_click = panel.on_click.clone();
            let closure = Closure::<dyn FnMut()>::new(move || on_click());
            container
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
            self.layer.append_child(&container).map_err(js_err)?;

            Ok(Box::new(WebFragment {
                element: container,
                _on_click: closure,
            }))
        }
    }

    struct WebFragment {
        element: web_sys::HtmlElement,
        // keeps the JS callback alive for as long as the element is mounted
        _on_click: Closure<dyn FnMut()>,
    }

    impl DomFragment for WebFragment {
        fn set_world_matrix(&mut self, world: &Matrix4<f32>) {
            if let Err(e) = self
                .element
                .style()
                .set_property("transform", &css_matrix3d(world))
            {
                log::warn!("could not update sign transform: {:?}", e);
            }
        }
    }

    impl Drop for WebFragment {
        fn drop(&mut self) {
            self.element.remove();
        }
    }

    pub struct WebNavigator;

    impl Navigator for WebNavigator {
        fn navigate(&self, url: &str) {
            let Some(window) = web_sys::window() else {
                log::warn!("cannot navigate to {} without a window", url);
                return;
            };
            if let Err(e) = window.location().set_href(url) {
                log::warn!("navigation to {} failed: {:?}", url, e);
            }
        }
    }
}
