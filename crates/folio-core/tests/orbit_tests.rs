// Host-side tests for the atom navigator: orbit layout, hover freeze, trails
// and selection.

use std::f32::consts::TAU;
use std::sync::mpsc::Receiver;

use folio_core::constants::{TRAIL_DECAY, TRAIL_MIN_SCALE};
use folio_core::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

fn router() -> PointerRouter {
    PointerRouter::new(TargetRect::new(0.0, 0.0, 1280.0, 720.0))
}

fn orbit(a: f32, b: f32, phase: f32) -> OrbitParameters {
    OrbitParameters::new(ViewId::Work, a, b, Vec3::ZERO, phase).unwrap()
}

fn selector(ids: &[ViewId]) -> (OrbitSelector, Receiver<NavigationEvent>) {
    let (sender, inbox) = events::channel();
    let orbits = ids
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, orbit(2.0 + i as f32 * 0.1, 2.5, i as f32)))
        .collect();
    let s = OrbitSelector::with_orbits(orbits, Vec3::new(5.0, 0.0, 0.0), 1.0, sender).unwrap();
    (s, inbox)
}

fn hover(s: &mut OrbitSelector, id: ViewId) {
    let token = s.target(id).unwrap().hit_token().unwrap();
    s.on_pointer(&PointerEvent::HoverEnter(token));
}

fn unhover(s: &mut OrbitSelector, id: ViewId) {
    let token = s.target(id).unwrap().hit_token().unwrap();
    s.on_pointer(&PointerEvent::HoverExit(token));
}

fn phase(s: &OrbitSelector, id: ViewId) -> f32 {
    s.target(id).unwrap().orbit.phase
}

#[test]
fn random_orbits_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let o = OrbitParameters::random(ViewId::Music, 1.5, &mut rng).unwrap();
        assert!((3.0..=4.5).contains(&o.semi_major));
        assert!((3.0..=4.5).contains(&o.semi_minor));
        assert!((0.0..=TAU).contains(&o.phase));
        for angle in o.rotation.to_array() {
            assert!((0.0..=TAU).contains(&angle));
        }
    }
}

#[test]
fn one_target_per_destination() {
    let (sender, _inbox) = events::channel();
    let mut rng = StdRng::seed_from_u64(1);
    let destinations: Vec<ViewId> = ViewId::destinations().collect();
    let s = OrbitSelector::new(&destinations, Vec3::ZERO, 1.0, &mut rng, sender).unwrap();
    let ids: Vec<ViewId> = s.targets().iter().map(|t| t.id).collect();
    assert_eq!(ids, destinations);
    assert!(s.target(ViewId::Home).is_none());
}

#[test]
fn rotation_applies_x_then_y_then_z() {
    let o = OrbitParameters::new(
        ViewId::Fun,
        2.0,
        1.0,
        Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2),
        0.0,
    )
    .unwrap();
    // quarter turn about z carries the major axis onto +y
    let p = o.position(Vec3::new(1.0, 0.0, 0.0));
    assert!((p - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
}

#[test]
fn malformed_orbits_fail_fast() {
    let bad = [
        (0.0, 1.0, Vec3::ZERO, 0.0),
        (1.0, -2.0, Vec3::ZERO, 0.0),
        (f32::NAN, 1.0, Vec3::ZERO, 0.0),
        (1.0, f32::INFINITY, Vec3::ZERO, 0.0),
        (1.0, 1.0, Vec3::new(f32::NAN, 0.0, 0.0), 0.0),
        (1.0, 1.0, Vec3::ZERO, f32::NAN),
    ];
    for (a, b, rotation, phase) in bad {
        let err = OrbitParameters::new(ViewId::Work, a, b, rotation, phase).unwrap_err();
        assert!(matches!(
            err,
            FolioError::InvalidOrbitParameters { ref target, .. } if target == "work"
        ));
    }

    let (sender, _inbox) = events::channel();
    let err = OrbitSelector::with_orbits(vec![], Vec3::ZERO, 0.0, sender).unwrap_err();
    assert!(matches!(err, FolioError::InvalidOrbitParameters { .. }));
}

#[test]
fn attach_is_idempotent_and_detach_withdraws_all() {
    let (mut s, _inbox) = selector(&[ViewId::Work, ViewId::Music, ViewId::Fun]);
    let mut r = router();
    s.attach(&mut r);
    s.attach(&mut r);
    assert_eq!(r.len(), 3);
    assert!(s.is_attached());

    s.detach(&mut r);
    assert!(r.is_empty());
    assert!(!s.is_attached());
    s.detach(&mut r);
    assert!(r.is_empty());
}

#[test]
fn targets_revolve_at_the_angular_rate() {
    let (mut s, _inbox) = selector(&[ViewId::Work]);
    let mut r = router();
    s.attach(&mut r);
    let before = phase(&s, ViewId::Work);
    let pos_before = s.target(ViewId::Work).unwrap().position();
    for _ in 0..60 {
        s.update(DT, &mut r);
    }
    let advanced = phase(&s, ViewId::Work) - before;
    assert!((advanced - 0.3).abs() < 1e-4);
    assert_ne!(s.target(ViewId::Work).unwrap().position(), pos_before);
}

#[test]
fn hovered_target_freezes_until_hover_ends() {
    let (mut s, _inbox) = selector(&[ViewId::Work, ViewId::Music]);
    let mut r = router();
    s.attach(&mut r);
    s.update(DT, &mut r);

    hover(&mut s, ViewId::Work);
    let frozen = phase(&s, ViewId::Work);
    let frozen_at = s.target(ViewId::Work).unwrap().position();
    let other = phase(&s, ViewId::Music);
    for _ in 0..50 {
        s.update(DT, &mut r);
        assert_eq!(phase(&s, ViewId::Work), frozen);
        assert_eq!(s.target(ViewId::Work).unwrap().position(), frozen_at);
    }
    assert!(phase(&s, ViewId::Music) > other);

    unhover(&mut s, ViewId::Work);
    s.update(DT, &mut r);
    assert!(phase(&s, ViewId::Work) > frozen);
}

#[test]
fn hover_is_not_overwritten_by_a_second_target() {
    let (mut s, _inbox) = selector(&[ViewId::Work, ViewId::Music]);
    let mut r = router();
    s.attach(&mut r);
    hover(&mut s, ViewId::Work);
    hover(&mut s, ViewId::Music);
    assert_eq!(s.hovered(), Some(ViewId::Work));

    // exit for a target that is not hovered is ignored
    unhover(&mut s, ViewId::Music);
    assert_eq!(s.hovered(), Some(ViewId::Work));
    unhover(&mut s, ViewId::Work);
    assert_eq!(s.hovered(), None);
}

#[test]
fn trail_settles_at_the_decay_horizon() {
    let (mut s, _inbox) = selector(&[ViewId::Work]);
    let mut r = router();
    s.attach(&mut r);
    for _ in 0..40 {
        s.update(DT, &mut r);
    }
    let trail = s.target(ViewId::Work).unwrap().trail();
    let mut expected = 0;
    let mut scale = 1.0_f32;
    while scale >= TRAIL_MIN_SCALE {
        expected += 1;
        scale *= TRAIL_DECAY;
    }
    assert_eq!(trail.len(), expected);
    assert_eq!(trail.back().unwrap().scale, 1.0);
    assert!(trail.iter().all(|m| m.scale >= TRAIL_MIN_SCALE));
    assert!(s.ring().is_none());
}

#[test]
fn freezing_collapses_the_trail_and_shows_the_ring() {
    let (mut s, _inbox) = selector(&[ViewId::Work]);
    let mut r = router();
    s.attach(&mut r);
    for _ in 0..20 {
        s.update(DT, &mut r);
    }
    hover(&mut s, ViewId::Work);

    s.update(DT, &mut r);
    let ring = s.ring().expect("ring while frozen");
    let trail = s.target(ViewId::Work).unwrap().trail();
    assert_eq!(trail.len(), 2);
    assert_eq!(ring.position, trail.front().unwrap().position);
    assert!((ring.scale - TRAIL_DECAY).abs() < 1e-6);

    for _ in 0..10 {
        s.update(DT, &mut r);
        assert!(s.ring().is_some());
        assert_eq!(s.target(ViewId::Work).unwrap().trail().len(), 2);
    }

    unhover(&mut s, ViewId::Work);
    s.update(DT, &mut r);
    assert!(s.ring().is_none());
}

#[test]
fn ring_waits_for_exactly_one_surviving_marker() {
    let (mut s, _inbox) = selector(&[ViewId::Work]);
    let mut r = router();
    s.attach(&mut r);
    // frozen before any marker exists: nothing survives the first tick
    hover(&mut s, ViewId::Work);
    s.update(DT, &mut r);
    assert!(s.ring().is_none());
    assert_eq!(s.target(ViewId::Work).unwrap().trail().len(), 1);

    s.update(DT, &mut r);
    assert!(s.ring().is_some());
}

#[test]
fn release_over_a_target_selects_it_every_time() {
    let (mut s, inbox) = selector(&[ViewId::Work, ViewId::Music]);
    let mut r = router();
    s.attach(&mut r);

    s.on_pointer(&PointerEvent::Release { target: None });
    assert!(inbox.try_recv().is_err());

    hover(&mut s, ViewId::Music);
    for _ in 0..2 {
        s.on_pointer(&PointerEvent::Release { target: None });
    }
    let got: Vec<NavigationEvent> = inbox.try_iter().collect();
    assert_eq!(
        got,
        vec![
            NavigationEvent::SelectView(ViewId::Music),
            NavigationEvent::SelectView(ViewId::Music)
        ]
    );
}

#[test]
fn detach_forgets_hover_and_ring() {
    let (mut s, _inbox) = selector(&[ViewId::Work]);
    let mut r = router();
    s.attach(&mut r);
    hover(&mut s, ViewId::Work);
    s.update(DT, &mut r);
    s.update(DT, &mut r);
    s.detach(&mut r);
    assert_eq!(s.hovered(), None);
    assert!(s.ring().is_none());
}

#[test]
fn draw_emits_nucleus_trails_and_guides() {
    let (mut s, _inbox) = selector(&[ViewId::Work, ViewId::Fun]);
    let mut r = router();
    s.attach(&mut r);
    s.update(DT, &mut r);

    let mut plain = DrawList::default();
    s.draw(&mut plain, false);
    // nucleus plus one fresh marker per target
    assert_eq!(plain.len(), 3);
    assert_eq!(plain.markers[0].shape, Shape::Disc as u32);

    let mut guided = DrawList::default();
    s.draw(&mut guided, true);
    assert_eq!(
        guided.len(),
        3 + 2 * folio_core::constants::ORBIT_GUIDE_SAMPLES
    );
}

#[test]
fn bounds_hold_every_target_along_its_whole_orbit() {
    let mut rng = StdRng::seed_from_u64(9);
    let (sender, _inbox) = events::channel();
    let ids: Vec<ViewId> = ViewId::destinations().collect();
    let s = OrbitSelector::new(&ids, Vec3::new(5.0, 0.0, 0.0), 1.0, &mut rng, sender).unwrap();
    let b = s.bounds();
    assert!((b.center() - s.focal()).length() < 1e-5);
    for t in s.targets() {
        for step in 0..32 {
            let p = t.orbit.point_at(step as f32 / 32.0 * TAU) + s.focal();
            assert!(p.cmpge(b.min).all() && p.cmple(b.max).all(), "{} at {:?}", t.id, p);
        }
    }
}
