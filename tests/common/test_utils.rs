#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use scene_markers::{
    InnerSpace, Matrix4, Vector3,
    interactive::{DomCompositor, DomFragment, InteractiveContext, Navigator, SignPanel},
    resources::texture::{TextureHandle, TextureProvider},
};

pub const EPS: f32 = 1e-5;

pub fn assert_vec_close(actual: Vector3<f32>, expected: Vector3<f32>) {
    let diff = (actual - expected).magnitude();
    assert!(
        diff < EPS,
        "expected {:?}, got {:?} (off by {})",
        expected,
        actual,
        diff
    );
}

/// Hands out pending handles and remembers every requested source.
#[derive(Default)]
pub struct RecordingTextures {
    requests: RefCell<Vec<String>>,
}

impl RecordingTextures {
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl TextureProvider for RecordingTextures {
    fn load(&self, source: &str) -> TextureHandle {
        self.requests.borrow_mut().push(source.to_string());
        TextureHandle::pending(source)
    }
}

pub struct MockFragment {
    matrices: Rc<RefCell<Vec<Matrix4<f32>>>>,
}

impl DomFragment for MockFragment {
    fn set_world_matrix(&mut self, world: &Matrix4<f32>) {
        self.matrices.borrow_mut().push(*world);
    }
}

/// Compositor that keeps every panel it was asked for and logs fragment updates.
#[derive(Default)]
pub struct MockCompositor {
    refuse: bool,
    panels: RefCell<Vec<SignPanel>>,
    matrices: Rc<RefCell<Vec<Matrix4<f32>>>>,
}

impl MockCompositor {
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Default::default()
        }
    }

    pub fn panels(&self) -> Vec<SignPanel> {
        self.panels.borrow().clone()
    }

    pub fn fragment_updates(&self) -> usize {
        self.matrices.borrow().len()
    }

    pub fn last_matrix(&self) -> Option<Matrix4<f32>> {
        self.matrices.borrow().last().copied()
    }
}

impl DomCompositor for MockCompositor {
    fn create_panel(&self, panel: SignPanel) -> anyhow::Result<Box<dyn DomFragment>> {
        if self.refuse {
            anyhow::bail!("compositor is detached");
        }
        self.panels.borrow_mut().push(panel);
        Ok(Box::new(MockFragment {
            matrices: Rc::clone(&self.matrices),
        }))
    }
}

#[derive(Default)]
pub struct MockNavigator {
    visited: RefCell<Vec<String>>,
}

impl MockNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for MockNavigator {
    fn navigate(&self, url: &str) {
        self.visited.borrow_mut().push(url.to_string());
    }
}

pub struct Interactive {
    pub context: InteractiveContext,
    pub compositor: Rc<MockCompositor>,
    pub navigator: Rc<MockNavigator>,
}

pub fn interactive() -> Interactive {
    with_compositor(MockCompositor::default())
}

pub fn with_compositor(compositor: MockCompositor) -> Interactive {
    let compositor = Rc::new(compositor);
    let navigator = Rc::new(MockNavigator::default());
    let context = InteractiveContext::interactive(compositor.clone(), navigator.clone());
    Interactive {
        context,
        compositor,
        navigator,
    }
}

/// A device without a surface, for tests that upload textures.
#[cfg(feature = "integration-tests")]
pub async fn headless_device() -> (wgpu::Device, wgpu::Queue) {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .expect("no graphics adapter available");
    adapter
        .request_device(&wgpu::DeviceDescriptor::default())
        .await
        .expect("could not create device")
}
