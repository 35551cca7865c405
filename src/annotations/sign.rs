//! Interactive signs: DOM panels that drop into place and navigate on click.

use std::{cell::RefCell, rc::Rc};

use cgmath::{Quaternion, Vector3};

use crate::{
    annotations::placement::SignPlacement,
    config::AnnotationConfig,
    data_structures::instance::Instance,
    interactive::{DomFragment, InteractiveContext, SignPanel},
    resources::animation::{TweenHandle, TweenOptions, TweenProperty, Tweener},
};

/**
 * A sign and the DOM fragment it drives.
 *
 * The transform is shared with the entrance tween through a weak reference
 * only, so dropping the sign also stops its animation.
 */
pub struct RenderedSign {
    placement: SignPlacement,
    transform: Rc<RefCell<Instance>>,
    fragment: Box<dyn DomFragment>,
    entrance: TweenHandle,
}

impl RenderedSign {
    pub fn placement(&self) -> &SignPlacement {
        &self.placement
    }

    pub fn transform(&self) -> Instance {
        *self.transform.borrow()
    }

    pub fn position(&self) -> Vector3<f32> {
        self.transform.borrow().position
    }

    pub fn rotation(&self) -> Quaternion<f32> {
        self.transform.borrow().rotation
    }

    pub fn set_rotation(&mut self, rotation: Quaternion<f32>) {
        self.transform.borrow_mut().rotation = rotation;
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.transform.borrow().forward()
    }

    pub fn entrance(&self) -> &TweenHandle {
        &self.entrance
    }

    /// Whether the entrance animation has finished (or was cancelled).
    pub fn is_settled(&self) -> bool {
        !self.entrance.is_active()
    }

    /// Turns the sign's +Z axis towards `target`.
    pub fn face(&mut self, target: Vector3<f32>) -> bool {
        self.transform.borrow_mut().look_at(target)
    }

    /// Pushes the current transform to the DOM fragment.
    pub fn sync_fragment(&mut self) {
        let world = self.transform.borrow().to_matrix();
        self.fragment.set_world_matrix(&world);
    }
}

impl Drop for RenderedSign {
    fn drop(&mut self) {
        self.entrance.cancel();
    }
}

pub struct SignFactory<'a> {
    interactive: &'a InteractiveContext,
    config: &'a AnnotationConfig,
}

impl<'a> SignFactory<'a> {
    pub fn new(interactive: &'a InteractiveContext, config: &'a AnnotationConfig) -> Self {
        Self {
            interactive,
            config,
        }
    }

    /**
     * Creates the sign above its declared position and schedules the drop-in.
     *
     * The sign is returned right away while its entrance tween is still
     * pending. Without an interactive context, or when the compositor refuses
     * the panel, there is no sign.
     */
    pub fn build(
        &self,
        placement: &SignPlacement,
        sequence_index: usize,
        tweens: &mut dyn Tweener,
    ) -> Option<RenderedSign> {
        let (compositor, navigator) = match self.interactive {
            InteractiveContext::Headless => {
                log::debug!("headless context, skipping sign \"{}\"", placement.text);
                return None;
            }
            InteractiveContext::Interactive {
                compositor,
                navigator,
            } => (compositor, navigator),
        };

        let url = placement.url.clone();
        let navigator = Rc::clone(navigator);
        let panel = SignPanel::new(&placement.text, Rc::new(move || navigator.navigate(&url)));
        let fragment = match compositor.create_panel(panel) {
            Ok(fragment) => fragment,
            Err(e) => {
                log::warn!("Could not create sign \"{}\": {}", placement.text, e);
                return None;
            }
        };

        let mut start = Instance::from(placement.position).with_uniform_scale(self.config.sign_scale);
        start.position.y += self.config.sign_drop_height;
        let transform = Rc::new(RefCell::new(start));

        let entrance = tweens.animate(
            Rc::downgrade(&transform),
            TweenProperty::PositionY,
            placement.position.y,
            TweenOptions {
                duration: self.config.entrance_duration,
                easing: self.config.entrance_easing,
                delay: self.config.entrance_delay(sequence_index),
            },
        );

        let mut sign = RenderedSign {
            placement: SignPlacement {
                sequence_index,
                ..placement.clone()
            },
            transform,
            fragment,
            entrance,
        };
        sign.sync_fragment();
        Some(sign)
    }
}
