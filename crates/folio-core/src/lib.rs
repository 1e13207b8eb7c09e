pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod draw;
pub mod error;
pub mod events;
pub mod experience;
pub mod hud;
pub mod navigation;
pub mod orbit;
pub mod pointer;
pub mod stage;
pub mod view;
pub mod views;
pub static MARKERS_WGSL: &str = include_str!("../shaders/markers.wgsl");

pub use camera::{Bounds, Camera, Ray, RegionFraming};
pub use clock::Clock;
pub use config::{ExperienceConfig, Viewport};
pub use draw::{DrawList, Marker, Shape, Space};
pub use error::{FolioError, Result};
pub use events::{NavigationEvent, NavigationSender};
pub use experience::Experience;
pub use hud::{HudOverlay, HudWidget, HudWidgetKind};
pub use navigation::{NavigationController, NavigationState, Subject};
pub use orbit::{OrbitParameters, OrbitSelector, SelectableTarget, TrailMarker};
pub use pointer::{
    HitShape, HitToken, Intersection, PointerEvent, PointerEvents, PointerInput, PointerRouter,
    TargetRect,
};
pub use stage::Stage;
pub use view::{Updatable, View, ViewId, ViewRegistry};
pub use views::{default_views, ContentView, HomeView};
