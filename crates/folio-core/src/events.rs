use std::sync::mpsc::{self, Receiver, Sender};

use crate::view::ViewId;

/// Requests emitted by the orbit selector and the HUD, consumed by the
/// navigation controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationEvent {
    SelectView(ViewId),
    OpenFeedback,
    GoHome,
}

impl NavigationEvent {
    /// View this request resolves to.
    pub fn destination(self) -> ViewId {
        match self {
            NavigationEvent::SelectView(id) => id,
            NavigationEvent::OpenFeedback => ViewId::Feedback,
            NavigationEvent::GoHome => ViewId::Home,
        }
    }
}

/// Sending half handed to emitters at construction.
#[derive(Clone, Debug)]
pub struct NavigationSender(Sender<NavigationEvent>);

impl NavigationSender {
    pub fn emit(&self, event: NavigationEvent) {
        if self.0.send(event).is_err() {
            log::warn!("[nav] dropped {:?}: controller is gone", event);
        }
    }
}

pub fn channel() -> (NavigationSender, Receiver<NavigationEvent>) {
    let (tx, rx) = mpsc::channel();
    (NavigationSender(tx), rx)
}
