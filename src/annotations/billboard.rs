use crate::{annotations::sign::RenderedSign, camera::WorldCamera};

/// Per-frame pass that turns every sign towards the camera.
///
/// Holds no state; the result only depends on the camera's current world
/// position, so repeated calls with a still camera change nothing.
pub struct CameraFacingUpdater;

impl CameraFacingUpdater {
    pub fn update(signs: &mut [RenderedSign], camera: &dyn WorldCamera) {
        if signs.is_empty() {
            return;
        }
        let eye = camera.world_position();
        for sign in signs.iter_mut() {
            if !sign.face(eye) {
                log::trace!("camera sits on sign \"{}\"", sign.placement().text);
            }
        }
    }
}
