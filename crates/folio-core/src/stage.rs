use crate::camera::{Bounds, Camera};
use crate::config::Viewport;
use crate::pointer::PointerRouter;

/// Shared collaborators lent to subjects for the duration of one call.
///
/// Subjects only add/remove/update their own hit-test targets through
/// `router`; they never reach into its internals. `camera` is the HUD camera
/// reframed on every transition; `world`, when present, is the camera that
/// renders and picks view content.
pub struct Stage<'a> {
    pub router: &'a mut PointerRouter,
    pub camera: &'a mut Camera,
    pub world: Option<&'a mut Camera>,
    pub viewport: Viewport,
    pub debug: bool,
}

impl<'a> Stage<'a> {
    pub fn new(router: &'a mut PointerRouter, camera: &'a mut Camera, viewport: Viewport) -> Self {
        Self {
            router,
            camera,
            world: None,
            viewport,
            debug: false,
        }
    }

    pub fn with_world(mut self, world: &'a mut Camera) -> Self {
        self.world = Some(world);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Points the world camera at `bounds`. No-op without a world camera.
    pub fn focus_world(&mut self, bounds: &Bounds) {
        if let Some(world) = self.world.as_deref_mut() {
            world.focus(bounds);
        }
    }
}
