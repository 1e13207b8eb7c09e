//! View identifiers, the `Updatable`/`View` contract and the fixed registry of views.

use std::fmt;
use std::str::FromStr;

use fnv::FnvHashMap;

use crate::draw::DrawList;
use crate::error::FolioError;
use crate::pointer::PointerEvent;
use crate::stage::Stage;

/// One section of the experience. Closed set; new sections add a variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    Home,
    AboutMe,
    Work,
    Music,
    Fitness,
    Fun,
    Feedback,
}

impl ViewId {
    pub const ALL: [ViewId; 7] = [
        ViewId::Home,
        ViewId::AboutMe,
        ViewId::Work,
        ViewId::Music,
        ViewId::Fitness,
        ViewId::Fun,
        ViewId::Feedback,
    ];

    /// Every view reachable from the home navigator.
    pub fn destinations() -> impl Iterator<Item = ViewId> {
        Self::ALL.into_iter().filter(|v| *v != ViewId::Home)
    }

    pub fn key(self) -> &'static str {
        match self {
            ViewId::Home => "home",
            ViewId::AboutMe => "aboutMe",
            ViewId::Work => "work",
            ViewId::Music => "music",
            ViewId::Fitness => "fitness",
            ViewId::Fun => "fun",
            ViewId::Feedback => "feedback",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewId::Home => "Home",
            ViewId::AboutMe => "About Me",
            ViewId::Work => "Work",
            ViewId::Music => "Music",
            ViewId::Fitness => "Fitness",
            ViewId::Fun => "Fun",
            ViewId::Feedback => "Feedback",
        }
    }

    /// Id of the HTML panel shown while this view is active.
    pub fn panel_id(self) -> &'static str {
        match self {
            ViewId::Home => "home",
            ViewId::AboutMe => "about-me",
            ViewId::Work => "work",
            ViewId::Music => "music",
            ViewId::Fitness => "fitness",
            ViewId::Fun => "fun",
            ViewId::Feedback => "feedback",
        }
    }

    /// Neon accent used for the view's orbit target.
    pub fn color(self) -> [f32; 4] {
        match self {
            ViewId::Home => [0.408, 0.765, 0.753, 1.0],
            ViewId::AboutMe => [1.0, 1.0, 1.0, 1.0],
            ViewId::Work => [1.0, 0.0, 0.365, 1.0],
            ViewId::Music => [1.0, 0.6, 0.0, 1.0],
            ViewId::Fitness => [0.224, 1.0, 0.078, 1.0],
            ViewId::Fun => [0.737, 0.075, 0.996, 1.0],
            ViewId::Feedback => [0.404, 0.78, 0.922, 1.0],
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ViewId {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewId::ALL
            .into_iter()
            .find(|v| v.key() == s)
            .ok_or_else(|| FolioError::InvalidView(s.to_string()))
    }
}

/// Lifecycle shared by every subject driven by the frame loop.
///
/// `activate`/`deactivate` are only ever called in strict alternation by the
/// navigation controller. Anything registered with the pointer router in
/// `activate` must be withdrawn in `deactivate`.
pub trait Updatable {
    fn activate(&mut self, stage: &mut Stage<'_>);
    fn deactivate(&mut self, stage: &mut Stage<'_>);
    fn resize(&mut self, stage: &mut Stage<'_>);
    fn update(&mut self, dt: f32, stage: &mut Stage<'_>);

    fn on_pointer(&mut self, _event: &PointerEvent, _stage: &mut Stage<'_>) {}

    fn draw(&self, _out: &mut DrawList) {}

    /// Footer text to show while the pointer rests on something of this subject.
    fn hint(&self) -> Option<&str> {
        None
    }
}

pub trait View: Updatable {
    fn id(&self) -> ViewId;
}

/// Fixed mapping from id to view. Holds no navigation state.
#[derive(Default)]
pub struct ViewRegistry {
    views: FnvHashMap<ViewId, Box<dyn View>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a view under its own id, replacing any previous entry.
    pub fn insert(&mut self, view: Box<dyn View>) {
        let id = view.id();
        if self.views.insert(id, view).is_some() {
            log::warn!("[views] replaced existing view {}", id);
        }
    }

    pub fn with(mut self, view: Box<dyn View>) -> Self {
        self.insert(view);
        self
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.views.contains_key(&id)
    }

    pub fn get(&self, id: ViewId) -> Option<&dyn View> {
        self.views.get(&id).map(|v| v.as_ref())
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut (dyn View + 'static)> {
        self.views.get_mut(&id).map(|v| v.as_mut())
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.views.keys().copied()
    }
}
