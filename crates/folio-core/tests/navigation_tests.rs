// Host-side tests for view transitions driven by the navigation controller.
// Views are replaced by a recording double so call order can be checked.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::*;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Call {
    Activate,
    Deactivate,
    Resize,
    Update,
}

type Journal = Rc<RefCell<Vec<(ViewId, Call)>>>;

/// Records every lifecycle call and contributes one hit sphere while active.
struct RecordingView {
    id: ViewId,
    journal: Journal,
    hit: Option<HitToken>,
}

impl Updatable for RecordingView {
    fn activate(&mut self, stage: &mut Stage<'_>) {
        self.journal.borrow_mut().push((self.id, Call::Activate));
        self.hit = Some(stage.router.add(HitShape::Sphere {
            center: Vec3::new(0.0, 0.0, -20.0),
            radius: 0.5,
        }));
    }

    fn deactivate(&mut self, stage: &mut Stage<'_>) {
        self.journal.borrow_mut().push((self.id, Call::Deactivate));
        if let Some(token) = self.hit.take() {
            stage.router.withdraw(token);
        }
    }

    fn resize(&mut self, _stage: &mut Stage<'_>) {
        self.journal.borrow_mut().push((self.id, Call::Resize));
    }

    fn update(&mut self, _dt: f32, _stage: &mut Stage<'_>) {
        self.journal.borrow_mut().push((self.id, Call::Update));
    }
}

impl View for RecordingView {
    fn id(&self) -> ViewId {
        self.id
    }
}

struct Fixture {
    router: PointerRouter,
    camera: Camera,
    viewport: Viewport,
    nav: NavigationController,
    journal: Journal,
}

impl Fixture {
    fn new() -> Self {
        Self::with_ids(&ViewId::ALL)
    }

    fn with_ids(ids: &[ViewId]) -> Self {
        let viewport = Viewport::default();
        let mut router =
            PointerRouter::new(TargetRect::new(0.0, 0.0, viewport.width, viewport.height));
        let mut camera = Camera::new(viewport.aspect());
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ViewRegistry::new();
        for &id in ids {
            registry.insert(Box::new(RecordingView {
                id,
                journal: journal.clone(),
                hit: None,
            }));
        }
        let (sender, inbox) = events::channel();
        let hud = HudOverlay::new(viewport, sender.clone());
        let nav = {
            let mut stage = Stage::new(&mut router, &mut camera, viewport);
            NavigationController::new(registry, hud, sender, inbox, &mut stage)
        };
        Self {
            router,
            camera,
            viewport,
            nav,
            journal,
        }
    }

    fn go(&mut self, id: ViewId) -> Result<()> {
        let mut stage = Stage::new(&mut self.router, &mut self.camera, self.viewport);
        self.nav.request_view(id, &mut stage)
    }

    fn go_key(&mut self, key: &str) -> Result<()> {
        let mut stage = Stage::new(&mut self.router, &mut self.camera, self.viewport);
        self.nav.request_view_key(key, &mut stage)
    }

    /// Emits `event` the way the HUD or orbit selector would and lets the
    /// controller drain it.
    fn emit(&mut self, event: NavigationEvent) -> usize {
        self.nav.sender().emit(event);
        let mut stage = Stage::new(&mut self.router, &mut self.camera, self.viewport);
        self.nav.pump(&mut stage)
    }

    fn count(&self, id: ViewId, call: Call) -> usize {
        self.journal
            .borrow()
            .iter()
            .filter(|&&(v, c)| v == id && c == call)
            .count()
    }

    fn clear_journal(&self) {
        self.journal.borrow_mut().clear();
    }

    fn back_visible(&self) -> bool {
        self.nav.hud().widget(HudWidgetKind::BackIndicator).visible()
    }

    fn feedback_visible(&self) -> bool {
        self.nav.hud().widget(HudWidgetKind::Feedback).visible()
    }
}

#[test]
fn starts_uninitialized_with_only_the_hud_active() {
    let f = Fixture::new();
    assert_eq!(f.nav.current_view(), None);
    assert_eq!(f.nav.state().active_subjects(), &[Subject::Hud]);
    assert!(f.feedback_visible());
    assert!(!f.back_visible());
    assert!(f.journal.borrow().is_empty());
}

#[test]
fn first_home_request_activates_home_once() {
    let mut f = Fixture::new();
    f.go(ViewId::Home).unwrap();

    assert_eq!(f.nav.current_view(), Some(ViewId::Home));
    assert!(!f.back_visible());
    assert!(f.feedback_visible());
    assert_eq!(f.count(ViewId::Home, Call::Activate), 1);
    assert_eq!(f.count(ViewId::Home, Call::Deactivate), 0);
    assert_eq!(
        f.nav.state().active_subjects(),
        &[Subject::Hud, Subject::View(ViewId::Home)]
    );
}

#[test]
fn selecting_work_from_home_swaps_views_in_order() {
    let mut f = Fixture::new();
    f.go(ViewId::Home).unwrap();
    f.clear_journal();

    assert_eq!(f.emit(NavigationEvent::SelectView(ViewId::Work)), 1);

    assert_eq!(
        *f.journal.borrow(),
        vec![
            (ViewId::Home, Call::Deactivate),
            (ViewId::Work, Call::Resize),
            (ViewId::Work, Call::Activate),
        ]
    );
    assert_eq!(f.nav.current_view(), Some(ViewId::Work));
    assert!(f.back_visible());
    assert!(f.feedback_visible());
}

#[test]
fn go_home_from_work_removes_back_indicator() {
    let mut f = Fixture::new();
    f.go(ViewId::Home).unwrap();
    f.go(ViewId::Work).unwrap();
    let back = f
        .nav
        .hud()
        .widget(HudWidgetKind::BackIndicator)
        .hit_token()
        .unwrap();
    assert!(f.router.contains(back));
    f.clear_journal();

    f.emit(NavigationEvent::GoHome);

    assert_eq!(f.count(ViewId::Work, Call::Deactivate), 1);
    assert_eq!(f.count(ViewId::Home, Call::Activate), 1);
    assert_eq!(f.nav.current_view(), Some(ViewId::Home));
    assert!(!f.back_visible());
    assert!(!f.router.contains(back));
}

#[test]
fn open_feedback_hides_and_unregisters_the_feedback_icon() {
    for from in [ViewId::Home, ViewId::AboutMe, ViewId::Music, ViewId::Fun] {
        let mut f = Fixture::new();
        f.go(ViewId::Home).unwrap();
        f.go(from).unwrap();
        let icon = f
            .nav
            .hud()
            .widget(HudWidgetKind::Feedback)
            .hit_token()
            .unwrap();

        f.emit(NavigationEvent::OpenFeedback);

        assert_eq!(f.nav.current_view(), Some(ViewId::Feedback));
        assert!(!f.feedback_visible());
        assert!(f.back_visible());
        assert!(!f.router.contains(icon), "icon still registered after {from}");
    }
}

#[test]
fn unknown_key_changes_nothing() {
    let mut f = Fixture::new();
    f.go(ViewId::Home).unwrap();
    let before = f.nav.state().clone();
    let targets = f.router.len();
    f.clear_journal();

    let err = f.go_key("bogus").unwrap_err();

    assert_eq!(err, FolioError::InvalidView("bogus".into()));
    assert_eq!(f.nav.current_view(), Some(ViewId::Home));
    assert_eq!(f.nav.state(), &before);
    assert_eq!(f.router.len(), targets);
    assert!(f.journal.borrow().is_empty());
}

#[test]
fn unregistered_view_is_rejected_without_side_effects() {
    let mut f = Fixture::with_ids(&[ViewId::Home, ViewId::Work]);
    f.go(ViewId::Home).unwrap();
    f.clear_journal();

    let err = f.go(ViewId::Feedback).unwrap_err();

    assert_eq!(err, FolioError::InvalidView("feedback".into()));
    assert_eq!(f.nav.current_view(), Some(ViewId::Home));
    assert!(f.feedback_visible());
    assert!(f.journal.borrow().is_empty());
}

#[test]
fn known_keys_resolve_to_views() {
    let mut f = Fixture::new();
    f.go_key("home").unwrap();
    f.go_key("aboutMe").unwrap();
    assert_eq!(f.nav.current_view(), Some(ViewId::AboutMe));
}

#[test]
fn at_most_one_view_is_active_across_any_sequence() {
    let mut f = Fixture::new();
    let sequence = [
        ViewId::Home,
        ViewId::Work,
        ViewId::Work,
        ViewId::Feedback,
        ViewId::Home,
        ViewId::Music,
        ViewId::Fitness,
        ViewId::Home,
        ViewId::Home,
        ViewId::Fun,
        ViewId::AboutMe,
        ViewId::Feedback,
    ];
    for id in sequence {
        f.go(id).unwrap();
        let outstanding: Vec<ViewId> = ViewId::ALL
            .into_iter()
            .filter(|&v| f.count(v, Call::Activate) > f.count(v, Call::Deactivate))
            .collect();
        assert_eq!(outstanding, vec![id]);
        let views: Vec<_> = f
            .nav
            .state()
            .active_subjects()
            .iter()
            .filter(|s| matches!(s, Subject::View(_)))
            .collect();
        assert_eq!(views, vec![&Subject::View(id)]);
    }
}

#[test]
fn hud_visibility_follows_current_view() {
    let mut f = Fixture::new();
    for id in ViewId::ALL {
        f.go(id).unwrap();
        assert_eq!(f.back_visible(), id != ViewId::Home, "back after {id}");
        assert_eq!(f.feedback_visible(), id != ViewId::Feedback, "icon after {id}");
    }
    for id in ViewId::ALL.into_iter().rev() {
        f.go(id).unwrap();
        assert_eq!(f.back_visible(), id != ViewId::Home, "back after {id}");
        assert_eq!(f.feedback_visible(), id != ViewId::Feedback, "icon after {id}");
    }
}

#[test]
fn requesting_the_current_view_cycles_it() {
    let mut f = Fixture::new();
    f.go(ViewId::Home).unwrap();
    f.go(ViewId::Work).unwrap();
    f.clear_journal();

    f.go(ViewId::Work).unwrap();

    assert_eq!(
        *f.journal.borrow(),
        vec![
            (ViewId::Work, Call::Deactivate),
            (ViewId::Work, Call::Resize),
            (ViewId::Work, Call::Activate),
        ]
    );
    assert_eq!(
        f.nav.state().active_subjects(),
        &[Subject::Hud, Subject::View(ViewId::Work)]
    );
}

#[test]
fn router_size_is_restored_after_a_round_trip_home() {
    let mut f = Fixture::new();
    f.go(ViewId::Home).unwrap();
    let at_home = f.router.len();

    f.go(ViewId::Work).unwrap();
    f.go(ViewId::Feedback).unwrap();
    f.go(ViewId::Home).unwrap();

    assert_eq!(f.router.len(), at_home);
}

#[test]
fn resize_before_first_view_only_touches_the_hud() {
    let mut f = Fixture::new();
    {
        let mut stage = Stage::new(&mut f.router, &mut f.camera, f.viewport);
        f.nav.resize(&mut stage);
        f.nav.tick(0.016, &mut stage);
    }
    assert!(f.journal.borrow().is_empty());
    assert_eq!(f.nav.current_view(), None);
}

#[test]
fn tick_and_resize_reach_only_the_active_view() {
    let mut f = Fixture::new();
    f.go(ViewId::Home).unwrap();
    f.go(ViewId::Music).unwrap();
    f.clear_journal();
    {
        let mut stage = Stage::new(&mut f.router, &mut f.camera, f.viewport);
        f.nav.tick(0.016, &mut stage);
        f.nav.resize(&mut stage);
    }
    assert_eq!(
        *f.journal.borrow(),
        vec![(ViewId::Music, Call::Update), (ViewId::Music, Call::Resize)]
    );
}

#[test]
fn every_transition_reframes_the_camera_on_the_hud() {
    let mut f = Fixture::new();
    let start = f.camera.eye;
    f.go(ViewId::Home).unwrap();
    let framed = f.nav.hud().boundary().center();
    assert_ne!(f.camera.eye, start);
    assert_eq!(f.camera.target, framed);
}

#[test]
fn observers_see_every_completed_transition() {
    let mut f = Fixture::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    f.nav.on_view_changed(move |id| sink.borrow_mut().push(id));

    f.go(ViewId::Home).unwrap();
    f.go(ViewId::Fitness).unwrap();
    let _ = f.go_key("nope");
    f.emit(NavigationEvent::GoHome);

    assert_eq!(
        *seen.borrow(),
        vec![ViewId::Home, ViewId::Fitness, ViewId::Home]
    );
}

#[test]
fn shutdown_withdraws_everything() {
    let mut f = Fixture::new();
    f.go(ViewId::Home).unwrap();
    f.go(ViewId::Work).unwrap();
    {
        let mut stage = Stage::new(&mut f.router, &mut f.camera, f.viewport);
        f.nav.shutdown(&mut stage);
    }
    assert_eq!(f.nav.current_view(), None);
    assert!(f.router.is_empty());
    assert!(f.nav.state().active_subjects().is_empty());
    assert_eq!(f.count(ViewId::Work, Call::Deactivate), 1);
}
