//! Built-in views: the home atom navigator and the content sections.
//!
//! Content sections are mostly HTML panels toggled by the host; on the 3D
//! side they only keep a container sized to the viewport.

use glam::Vec3;
use rand::Rng;

use crate::camera::Bounds;
use crate::constants::{
    ATOM_OFFSET, CONTAINER_ALPHA, DEBUG_BOUNDS_COLOR, HOME_FRAME_MARGIN, HOME_TEXT_CENTER,
    HOME_TEXT_HALF, NUCLEUS_RADIUS,
};
use crate::draw::{DrawList, Marker, Shape};
use crate::error::Result;
use crate::events::NavigationSender;
use crate::orbit::OrbitSelector;
use crate::pointer::PointerEvent;
use crate::stage::Stage;
use crate::view::{Updatable, View, ViewId, ViewRegistry};

pub struct HomeView {
    selector: OrbitSelector,
    debug: bool,
}

impl HomeView {
    pub fn new<R: Rng>(events: NavigationSender, rng: &mut R) -> Result<Self> {
        let destinations: Vec<ViewId> = ViewId::destinations().collect();
        let selector = OrbitSelector::new(
            &destinations,
            Vec3::from(ATOM_OFFSET),
            NUCLEUS_RADIUS,
            rng,
            events,
        )?;
        Ok(Self::with_selector(selector))
    }

    pub fn with_selector(selector: OrbitSelector) -> Self {
        Self {
            selector,
            debug: false,
        }
    }

    pub fn selector(&self) -> &OrbitSelector {
        &self.selector
    }

    /// Intro text area plus the atom.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_center_half(Vec3::from(HOME_TEXT_CENTER), Vec3::from(HOME_TEXT_HALF))
            .union(&self.selector.bounds())
    }

    /// Region the world camera is fitted to while Home is active.
    pub fn framing(&self) -> Bounds {
        let b = self.bounds();
        Bounds::from_center_half(b.center(), b.size() * 0.5 * HOME_FRAME_MARGIN)
    }
}

impl Updatable for HomeView {
    fn activate(&mut self, stage: &mut Stage<'_>) {
        self.debug = stage.debug;
        self.selector.attach(stage.router);
        stage.focus_world(&self.framing());
    }

    fn deactivate(&mut self, stage: &mut Stage<'_>) {
        self.selector.detach(stage.router);
    }

    fn resize(&mut self, _stage: &mut Stage<'_>) {}

    fn update(&mut self, dt: f32, stage: &mut Stage<'_>) {
        self.selector.update(dt, stage.router);
    }

    fn on_pointer(&mut self, event: &PointerEvent, _stage: &mut Stage<'_>) {
        self.selector.on_pointer(event);
    }

    fn draw(&self, out: &mut DrawList) {
        self.selector.draw(out, true);
        if self.debug {
            out.push(bounds_frame(&self.bounds()));
        }
    }

    fn hint(&self) -> Option<&str> {
        self.selector.hovered().map(ViewId::label)
    }
}

impl View for HomeView {
    fn id(&self) -> ViewId {
        ViewId::Home
    }
}

/// A content section whose body lives in an HTML panel.
pub struct ContentView {
    id: ViewId,
    container: Vec3,
    debug: bool,
}

impl ContentView {
    pub fn new(id: ViewId) -> Self {
        Self {
            id,
            container: Vec3::ONE,
            debug: false,
        }
    }

    /// Half extents of the area reserved for the section's panel.
    pub fn container(&self) -> Vec3 {
        self.container
    }
}

impl Updatable for ContentView {
    fn activate(&mut self, stage: &mut Stage<'_>) {
        self.debug = stage.debug;
        stage.focus_world(&Bounds::from_center_half(Vec3::ZERO, self.container));
    }

    fn deactivate(&mut self, _stage: &mut Stage<'_>) {}

    fn resize(&mut self, stage: &mut Stage<'_>) {
        let aspect = stage.viewport.aspect();
        self.container = Vec3::new(aspect, 1.0, aspect + 1.0);
    }

    fn update(&mut self, _dt: f32, _stage: &mut Stage<'_>) {}

    fn draw(&self, out: &mut DrawList) {
        let [r, g, b, _] = self.id.color();
        let alpha = if self.debug { 1.0 } else { CONTAINER_ALPHA };
        let mut m = Marker::world(Vec3::ZERO, 1.0, Shape::Frame, [r, g, b, alpha]);
        m.half = [self.container.x, self.container.y];
        out.push(m);
    }
}

impl View for ContentView {
    fn id(&self) -> ViewId {
        self.id
    }
}

/// Outline of `bounds` in its center plane.
fn bounds_frame(bounds: &Bounds) -> Marker {
    let half = bounds.size() * 0.5;
    let mut m = Marker::world(bounds.center(), 1.0, Shape::Frame, DEBUG_BOUNDS_COLOR);
    m.half = [half.x, half.y];
    m
}

/// Home plus one content view per destination.
pub fn default_views<R: Rng>(events: &NavigationSender, rng: &mut R) -> Result<ViewRegistry> {
    let mut registry = ViewRegistry::new();
    registry.insert(Box::new(HomeView::new(events.clone(), rng)?));
    for id in ViewId::destinations() {
        registry.insert(Box::new(ContentView::new(id)));
    }
    Ok(registry)
}
