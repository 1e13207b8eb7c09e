//! Application context: everything one running experience needs, built once
//! at startup and handed to the frame loop by the host.

use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::Camera;
use crate::clock::Clock;
use crate::config::{ExperienceConfig, Viewport};
use crate::draw::DrawList;
use crate::error::Result;
use crate::events;
use crate::hud::HudOverlay;
use crate::navigation::NavigationController;
use crate::pointer::{PointerInput, PointerRouter, TargetRect};
use crate::stage::Stage;
use crate::view::{ViewId, ViewRegistry};
use crate::views::default_views;

pub struct Experience {
    config: ExperienceConfig,
    viewport: Viewport,
    clock: Clock,
    camera: Camera,
    world_camera: Camera,
    router: PointerRouter,
    navigation: NavigationController,
    draw_list: DrawList,
}

impl Experience {
    /// Builds the default views and opens on Home. Pointer input stays
    /// disabled until [`Experience::enable_input`].
    pub fn new(config: ExperienceConfig, now: Instant) -> Result<Self> {
        let (sender, inbox) = events::channel();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let registry = default_views(&sender, &mut rng)?;
        Self::with_views(config, now, registry, sender, inbox)
    }

    pub fn with_views(
        config: ExperienceConfig,
        now: Instant,
        registry: ViewRegistry,
        sender: events::NavigationSender,
        inbox: std::sync::mpsc::Receiver<events::NavigationEvent>,
    ) -> Result<Self> {
        let viewport = config.viewport;
        let mut camera = Camera::new(viewport.aspect());
        let mut world_camera = Camera::new(viewport.aspect());
        let mut router = PointerRouter::new(TargetRect::new(
            0.0,
            0.0,
            viewport.width,
            viewport.height,
        ));
        let hud = HudOverlay::new(viewport, sender.clone());
        let navigation = {
            let mut stage = Stage::new(&mut router, &mut camera, viewport)
                .with_world(&mut world_camera)
                .with_debug(config.debug);
            let mut nav = NavigationController::new(registry, hud, sender, inbox, &mut stage);
            nav.request_view(ViewId::Home, &mut stage)?;
            nav
        };
        log::info!(
            "[experience] ready {}x{} @{}x debug={}",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio,
            config.debug
        );
        Ok(Self {
            clock: Clock::new(now),
            config,
            viewport,
            camera,
            world_camera,
            router,
            navigation,
            draw_list: DrawList::default(),
        })
    }

    pub fn config(&self) -> &ExperienceConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// HUD camera, framed on the HUD boundary after every transition.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Camera that renders and picks the active view's content.
    pub fn world_camera(&self) -> &Camera {
        &self.world_camera
    }

    pub fn router(&self) -> &PointerRouter {
        &self.router
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut NavigationController {
        &mut self.navigation
    }

    pub fn current_view(&self) -> Option<ViewId> {
        self.navigation.current_view()
    }

    /// Markers produced by the last [`Experience::frame`].
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Returns `true` when input was off and the host should attach listeners.
    pub fn enable_input(&mut self) -> bool {
        self.router.enable()
    }

    /// Returns `true` when input was on and the host should detach listeners.
    pub fn disable_input(&mut self) -> bool {
        self.router.disable()
    }

    pub fn request_view(&mut self, id: ViewId) -> Result<()> {
        let mut stage = Stage::new(&mut self.router, &mut self.camera, self.viewport)
            .with_world(&mut self.world_camera)
            .with_debug(self.config.debug);
        self.navigation.request_view(id, &mut stage)
    }

    pub fn request_view_key(&mut self, key: &str) -> Result<()> {
        let mut stage = Stage::new(&mut self.router, &mut self.camera, self.viewport)
            .with_world(&mut self.world_camera)
            .with_debug(self.config.debug);
        self.navigation.request_view_key(key, &mut stage)
    }

    /// Routes one raw input through hit-testing to the HUD and active view.
    pub fn pointer(&mut self, input: PointerInput) {
        let events = self.router.handle(input, &self.world_camera);
        let mut stage = Stage::new(&mut self.router, &mut self.camera, self.viewport)
            .with_world(&mut self.world_camera)
            .with_debug(self.config.debug);
        self.navigation.dispatch_pointer(&events, &mut stage);
    }

    /// New render area size. `rect` is the input surface in client coordinates.
    pub fn resize(&mut self, viewport: Viewport, rect: TargetRect) {
        self.viewport = viewport;
        self.config.viewport = viewport;
        self.camera.resize(viewport.aspect());
        self.world_camera.resize(viewport.aspect());
        self.router.resize(rect);
        let mut stage = Stage::new(&mut self.router, &mut self.camera, viewport)
            .with_world(&mut self.world_camera)
            .with_debug(self.config.debug);
        self.navigation.resize(&mut stage);
    }

    /// Advances one display frame and returns what to draw.
    pub fn frame(&mut self, now: Instant) -> &DrawList {
        if let Some(dt) = self.clock.tick(now) {
            {
                let mut stage = Stage::new(&mut self.router, &mut self.camera, self.viewport)
                    .with_world(&mut self.world_camera)
                    .with_debug(self.config.debug);
                self.navigation.tick(dt, &mut stage);
            }
            // targets moved under a resting pointer
            let events = self.router.refresh(&self.world_camera);
            let mut stage = Stage::new(&mut self.router, &mut self.camera, self.viewport)
                .with_world(&mut self.world_camera)
                .with_debug(self.config.debug);
            self.navigation.dispatch_pointer(&events, &mut stage);
        }
        self.draw_list.clear();
        self.navigation.draw(&mut self.draw_list);
        &self.draw_list
    }

    pub fn hint(&self) -> Option<&str> {
        self.navigation.hint()
    }

    pub fn shutdown(&mut self) {
        let mut stage = Stage::new(&mut self.router, &mut self.camera, self.viewport)
            .with_world(&mut self.world_camera)
            .with_debug(self.config.debug);
        self.navigation.shutdown(&mut stage);
        if self.router.disable() {
            log::debug!("[experience] input disabled");
        }
    }
}
