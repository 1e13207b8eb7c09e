//! Heads-up display: screen-fixed widgets that stay put while the camera moves.

use glam::{Vec2, Vec3};

use crate::camera::Bounds;
use crate::config::Viewport;
use crate::constants::{
    BACK_HINT, BACK_INDICATOR_HALF, BACK_INDICATOR_X_LANDSCAPE, BACK_INDICATOR_X_PORTRAIT,
    BACK_INDICATOR_Y, FEEDBACK_HINT, FEEDBACK_ICON_HALF, FEEDBACK_ICON_MARGIN, FEEDBACK_ICON_Y,
    HUD_DEPTH, HUD_HIGHLIGHT, HUD_MUTED,
};
use crate::draw::{DrawList, Marker, Shape};
use crate::events::{NavigationEvent, NavigationSender};
use crate::pointer::{HitShape, HitToken, PointerEvent, PointerRouter};
use crate::stage::Stage;
use crate::view::Updatable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HudWidgetKind {
    Feedback,
    BackIndicator,
}

#[derive(Clone, Debug)]
pub struct HudWidget {
    pub kind: HudWidgetKind,
    hit: Option<HitToken>,
    center: Vec2,
    half: Vec2,
    color: [f32; 4],
}

impl HudWidget {
    fn new(kind: HudWidgetKind) -> Self {
        Self {
            kind,
            hit: None,
            center: Vec2::ZERO,
            half: Vec2::ZERO,
            color: HUD_MUTED,
        }
    }

    /// A widget is visible exactly while it is registered for hit-testing.
    pub fn visible(&self) -> bool {
        self.hit.is_some()
    }

    pub fn hit_token(&self) -> Option<HitToken> {
        self.hit
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn half(&self) -> Vec2 {
        self.half
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    fn shape(&self) -> HitShape {
        HitShape::ScreenRect {
            center: self.center,
            half: self.half,
        }
    }

    fn show(&mut self, router: &mut PointerRouter) {
        if self.hit.is_none() {
            self.hit = Some(router.add(self.shape()));
        }
    }

    fn hide(&mut self, router: &mut PointerRouter) {
        if let Some(token) = self.hit.take() {
            router.withdraw(token);
        }
    }
}

pub struct HudOverlay {
    feedback: HudWidget,
    back: HudWidget,
    hovered: Option<HudWidgetKind>,
    aspect: f32,
    events: NavigationSender,
}

impl HudOverlay {
    pub fn new(viewport: Viewport, events: NavigationSender) -> Self {
        let mut hud = Self {
            feedback: HudWidget::new(HudWidgetKind::Feedback),
            back: HudWidget::new(HudWidgetKind::BackIndicator),
            hovered: None,
            aspect: viewport.aspect(),
            events,
        };
        hud.layout(viewport);
        hud
    }

    pub fn widget(&self, kind: HudWidgetKind) -> &HudWidget {
        match kind {
            HudWidgetKind::Feedback => &self.feedback,
            HudWidgetKind::BackIndicator => &self.back,
        }
    }

    fn widget_mut(&mut self, kind: HudWidgetKind) -> &mut HudWidget {
        match kind {
            HudWidgetKind::Feedback => &mut self.feedback,
            HudWidgetKind::BackIndicator => &mut self.back,
        }
    }

    pub fn hovered(&self) -> Option<HudWidgetKind> {
        self.hovered
    }

    pub fn add_feedback_icon(&mut self, router: &mut PointerRouter) {
        self.feedback.show(router);
    }

    pub fn remove_feedback_icon(&mut self, router: &mut PointerRouter) {
        self.remove(HudWidgetKind::Feedback, router);
    }

    pub fn add_back_indicator(&mut self, router: &mut PointerRouter) {
        self.back.show(router);
    }

    pub fn remove_back_indicator(&mut self, router: &mut PointerRouter) {
        self.remove(HudWidgetKind::BackIndicator, router);
    }

    fn remove(&mut self, kind: HudWidgetKind, router: &mut PointerRouter) {
        self.widget_mut(kind).hide(router);
        if self.hovered == Some(kind) {
            self.hovered = None;
        }
    }

    /// Region the camera frames after each view change: the screen rectangle
    /// stretched to the current aspect, at HUD depth.
    pub fn boundary(&self) -> Bounds {
        Bounds::from_center_half(
            Vec3::new(0.0, 0.0, HUD_DEPTH),
            Vec3::new(self.aspect, 1.0, 0.0),
        )
    }

    /// Recomputes widget placement for a new aspect ratio.
    fn layout(&mut self, viewport: Viewport) {
        let aspect = viewport.aspect().max(f32::EPSILON);
        self.aspect = aspect;

        let half = Vec2::new(FEEDBACK_ICON_HALF[0] / aspect, FEEDBACK_ICON_HALF[1]);
        self.feedback.half = half;
        self.feedback.center = Vec2::new(1.0 - FEEDBACK_ICON_MARGIN - half.x, FEEDBACK_ICON_Y);

        let anchor_x = if viewport.is_landscape() {
            BACK_INDICATOR_X_LANDSCAPE
        } else {
            BACK_INDICATOR_X_PORTRAIT
        };
        self.back.half = Vec2::new(BACK_INDICATOR_HALF[0] / aspect, BACK_INDICATOR_HALF[1]);
        self.back.center = Vec2::new(anchor_x, BACK_INDICATOR_Y);
    }

    fn kind_of(&self, token: HitToken) -> Option<HudWidgetKind> {
        if self.feedback.hit == Some(token) {
            Some(HudWidgetKind::Feedback)
        } else if self.back.hit == Some(token) {
            Some(HudWidgetKind::BackIndicator)
        } else {
            None
        }
    }
}

impl Updatable for HudOverlay {
    fn activate(&mut self, stage: &mut Stage<'_>) {
        self.layout(stage.viewport);
        self.add_feedback_icon(stage.router);
    }

    fn deactivate(&mut self, stage: &mut Stage<'_>) {
        self.remove_feedback_icon(stage.router);
        self.remove_back_indicator(stage.router);
    }

    fn resize(&mut self, stage: &mut Stage<'_>) {
        self.layout(stage.viewport);
        for w in [&self.feedback, &self.back] {
            if let Some(token) = w.hit {
                if let Err(e) = stage.router.update_shape(token, w.shape()) {
                    log::debug!("[hud] {}", e);
                }
            }
        }
    }

    fn update(&mut self, _dt: f32, _stage: &mut Stage<'_>) {
        let hovered = self.hovered;
        for w in [&mut self.feedback, &mut self.back] {
            w.color = if hovered == Some(w.kind) {
                HUD_HIGHLIGHT
            } else {
                HUD_MUTED
            };
        }
    }

    fn on_pointer(&mut self, event: &PointerEvent, stage: &mut Stage<'_>) {
        match *event {
            PointerEvent::HoverEnter(token) | PointerEvent::HoverMove { target: token, .. } => {
                if self.hovered.is_none() {
                    self.hovered = self.kind_of(token);
                }
            }
            PointerEvent::HoverExit(token) => {
                if self.hovered.is_some() && self.hovered == self.kind_of(token) {
                    self.hovered = None;
                }
            }
            PointerEvent::Release { .. } => match self.hovered {
                Some(HudWidgetKind::Feedback) => {
                    log::info!("[hud] open-feedback");
                    self.events.emit(NavigationEvent::OpenFeedback);
                }
                Some(HudWidgetKind::BackIndicator) => {
                    log::info!("[hud] go-home");
                    self.remove_back_indicator(stage.router);
                    self.events.emit(NavigationEvent::GoHome);
                }
                None => {}
            },
            PointerEvent::Press { .. } => {}
        }
    }

    fn draw(&self, out: &mut DrawList) {
        let [r, g, b, _] = HUD_HIGHLIGHT;
        out.push(Marker::screen(
            Vec2::ZERO,
            Vec2::splat(0.985),
            Shape::Frame,
            [r, g, b, 0.6],
        ));
        for w in [&self.feedback, &self.back] {
            if w.visible() {
                out.push(Marker::screen(w.center, w.half, Shape::Frame, w.color));
            }
        }
    }

    fn hint(&self) -> Option<&str> {
        match self.hovered? {
            HudWidgetKind::Feedback => Some(FEEDBACK_HINT),
            HudWidgetKind::BackIndicator => Some(BACK_HINT),
        }
    }
}
