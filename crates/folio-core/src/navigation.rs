//! Navigation controller: owns the current view and drives view transitions.
//!
//! Exactly one view is active at a time. Every transition deactivates the
//! outgoing view before the incoming one is resized and activated (views
//! point the world camera at their own content), reframes the HUD camera on
//! the HUD boundary and then fixes up HUD widget visibility:
//!
//! | current view | back indicator | feedback icon |
//! |--------------|----------------|---------------|
//! | Home         | hidden         | shown         |
//! | Feedback     | shown          | hidden        |
//! | other        | shown          | shown         |

use std::sync::mpsc::Receiver;

use crate::camera::RegionFraming;
use crate::draw::DrawList;
use crate::error::{FolioError, Result};
use crate::events::{NavigationEvent, NavigationSender};
use crate::hud::HudOverlay;
use crate::pointer::PointerEvent;
use crate::stage::Stage;
use crate::view::{Updatable, ViewId, ViewRegistry};

/// Something that receives resize/update ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subject {
    Hud,
    View(ViewId),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationState {
    current: Option<ViewId>,
    active_subjects: Vec<Subject>,
}

impl NavigationState {
    pub fn current(&self) -> Option<ViewId> {
        self.current
    }

    pub fn active_subjects(&self) -> &[Subject] {
        &self.active_subjects
    }
}

pub type ViewObserver = Box<dyn FnMut(ViewId)>;

pub struct NavigationController {
    registry: ViewRegistry,
    hud: HudOverlay,
    state: NavigationState,
    sender: NavigationSender,
    inbox: Receiver<NavigationEvent>,
    observers: Vec<ViewObserver>,
}

impl NavigationController {
    /// Takes ownership of the views and the HUD and activates the HUD.
    /// `sender` must be the sending half of `inbox`; clones of it are what the
    /// HUD and the orbit selector were built with.
    pub fn new(
        registry: ViewRegistry,
        mut hud: HudOverlay,
        sender: NavigationSender,
        inbox: Receiver<NavigationEvent>,
        stage: &mut Stage<'_>,
    ) -> Self {
        hud.activate(stage);
        Self {
            registry,
            hud,
            state: NavigationState {
                current: None,
                active_subjects: vec![Subject::Hud],
            },
            sender,
            inbox,
            observers: Vec::new(),
        }
    }

    pub fn current_view(&self) -> Option<ViewId> {
        self.state.current
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn hud(&self) -> &HudOverlay {
        &self.hud
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn sender(&self) -> NavigationSender {
        self.sender.clone()
    }

    /// Registers a callback run after every completed transition.
    pub fn on_view_changed(&mut self, observer: impl FnMut(ViewId) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Switches to `id`. Requesting the current view runs a full
    /// deactivate/activate cycle. Unknown ids are logged and leave every piece
    /// of state untouched.
    pub fn request_view(&mut self, id: ViewId, stage: &mut Stage<'_>) -> Result<()> {
        if !self.registry.contains(id) {
            let err = FolioError::InvalidView(id.to_string());
            log::warn!("[nav] {}", err);
            return Err(err);
        }
        let previous = self.state.current.take();
        if let Some(prev) = previous {
            if let Some(view) = self.registry.get_mut(prev) {
                view.deactivate(stage);
            }
            self.state.active_subjects.retain(|s| *s != Subject::View(prev));
        }

        self.state.current = Some(id);
        if let Some(view) = self.registry.get_mut(id) {
            view.resize(stage);
            view.activate(stage);
        }
        self.state.active_subjects.push(Subject::View(id));

        stage.camera.frame_region(&self.hud.boundary());

        if id == ViewId::Home {
            self.hud.remove_back_indicator(stage.router);
        } else {
            self.hud.add_back_indicator(stage.router);
        }
        if id == ViewId::Feedback {
            self.hud.remove_feedback_icon(stage.router);
        } else {
            self.hud.add_feedback_icon(stage.router);
        }

        match previous {
            Some(prev) => log::info!("[nav] {} -> {}", prev, id),
            None => log::info!("[nav] start at {}", id),
        }
        for observer in &mut self.observers {
            observer(id);
        }
        Ok(())
    }

    /// String-keyed variant for hosts (URL hash, DOM data attributes).
    pub fn request_view_key(&mut self, key: &str, stage: &mut Stage<'_>) -> Result<()> {
        let id = key.parse::<ViewId>().map_err(|e| {
            log::warn!("[nav] {}", e);
            e
        })?;
        self.request_view(id, stage)
    }

    /// Applies every queued navigation request. Returns how many were handled.
    pub fn pump(&mut self, stage: &mut Stage<'_>) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.inbox.try_recv() {
            log::debug!("[nav] event {:?}", event);
            // failures are already logged by request_view
            let _ = self.request_view(event.destination(), stage);
            handled += 1;
        }
        handled
    }

    /// Per-frame update: HUD first, then the active view.
    pub fn tick(&mut self, dt: f32, stage: &mut Stage<'_>) {
        self.hud.update(dt, stage);
        if let Some(id) = self.state.current {
            if let Some(view) = self.registry.get_mut(id) {
                view.update(dt, stage);
            }
        }
    }

    /// Forwards a resize to every active subject, then reframes the HUD.
    pub fn resize(&mut self, stage: &mut Stage<'_>) {
        for subject in &self.state.active_subjects {
            match *subject {
                Subject::Hud => self.hud.resize(stage),
                Subject::View(id) => {
                    if let Some(view) = self.registry.get_mut(id) {
                        view.resize(stage);
                    }
                }
            }
        }
        stage.camera.frame_region(&self.hud.boundary());
    }

    /// Hands router events to the HUD and the active view, then applies any
    /// navigation they requested.
    pub fn dispatch_pointer(&mut self, events: &[PointerEvent], stage: &mut Stage<'_>) {
        if events.is_empty() {
            return;
        }
        for event in events {
            self.hud.on_pointer(event, stage);
            if let Some(id) = self.state.current {
                if let Some(view) = self.registry.get_mut(id) {
                    view.on_pointer(event, stage);
                }
            }
        }
        self.pump(stage);
    }

    pub fn draw(&self, out: &mut DrawList) {
        if let Some(view) = self.state.current.and_then(|id| self.registry.get(id)) {
            view.draw(out);
        }
        self.hud.draw(out);
    }

    /// Footer text for whatever the pointer rests on.
    pub fn hint(&self) -> Option<&str> {
        self.hud.hint().or_else(|| {
            self.state
                .current
                .and_then(|id| self.registry.get(id))
                .and_then(|view| view.hint())
        })
    }

    /// Deactivates the current view and the HUD; the controller returns to
    /// its uninitialized state.
    pub fn shutdown(&mut self, stage: &mut Stage<'_>) {
        if let Some(id) = self.state.current.take() {
            if let Some(view) = self.registry.get_mut(id) {
                view.deactivate(stage);
            }
        }
        self.hud.deactivate(stage);
        self.state.active_subjects.clear();
        log::info!("[nav] shut down");
    }
}
