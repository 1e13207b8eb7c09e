//! Atom navigator: destination targets revolving on elliptical orbits around
//! a nucleus. Hovering a target freezes it; releasing over it selects it.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::{EulerRot, Quat, Vec3};
use rand::Rng;

use crate::camera::Bounds;
use crate::constants::{
    ELECTRON_NUCLEUS_RATIO, HIGHLIGHT_RING_SCALE, NUCLEUS_COLOR, ORBIT_ANGULAR_RATE,
    ORBIT_AXIS_MAX_FACTOR, ORBIT_AXIS_MIN_FACTOR, ORBIT_GUIDE_ALPHA, ORBIT_GUIDE_SAMPLES,
    ORBIT_GUIDE_SCALE, TRAIL_DECAY, TRAIL_DECAY_FROZEN, TRAIL_MIN_SCALE,
};
use crate::draw::{DrawList, Marker, Shape};
use crate::error::{FolioError, Result};
use crate::events::{NavigationEvent, NavigationSender};
use crate::pointer::{HitShape, HitToken, PointerEvent, PointerRouter};
use crate::view::ViewId;

/// Ellipse in the local x-y plane, rotated X then Y then Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitParameters {
    pub semi_major: f32,
    pub semi_minor: f32,
    /// Rotation angles about x, y and z, applied in that order.
    pub rotation: Vec3,
    pub phase: f32,
}

impl OrbitParameters {
    pub fn new(
        target: ViewId,
        semi_major: f32,
        semi_minor: f32,
        rotation: Vec3,
        phase: f32,
    ) -> Result<Self> {
        let invalid = |reason: &str| FolioError::InvalidOrbitParameters {
            target: target.to_string(),
            reason: reason.to_string(),
        };
        if !semi_major.is_finite() || !semi_minor.is_finite() {
            return Err(invalid("semi-axes must be finite"));
        }
        if semi_major <= 0.0 || semi_minor <= 0.0 {
            return Err(invalid("semi-axes must be positive"));
        }
        if !rotation.is_finite() || !phase.is_finite() {
            return Err(invalid("rotation and phase must be finite"));
        }
        Ok(Self {
            semi_major,
            semi_minor,
            rotation,
            phase,
        })
    }

    /// Semi-axes uniform in `[2r, 3r]`, phase and rotation angles uniform in `[0, 2π)`.
    pub fn random<R: Rng>(target: ViewId, focal_radius: f32, rng: &mut R) -> Result<Self> {
        let lo = focal_radius * ORBIT_AXIS_MIN_FACTOR;
        let span = focal_radius * (ORBIT_AXIS_MAX_FACTOR - ORBIT_AXIS_MIN_FACTOR);
        let a = lo + rng.gen::<f32>() * span;
        let b = lo + rng.gen::<f32>() * span;
        let phase = rng.gen::<f32>() * TAU;
        let rotation = Vec3::new(
            rng.gen::<f32>() * TAU,
            rng.gen::<f32>() * TAU,
            rng.gen::<f32>() * TAU,
        );
        Self::new(target, a, b, rotation, phase)
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Point at angle `theta` on the rotated ellipse, relative to its center.
    #[inline]
    pub fn point_at(&self, theta: f32) -> Vec3 {
        let flat = Vec3::new(
            self.semi_major * theta.cos(),
            self.semi_minor * theta.sin(),
            0.0,
        );
        self.orientation() * flat
    }

    #[inline]
    pub fn position(&self, offset: Vec3) -> Vec3 {
        self.point_at(self.phase) + offset
    }
}

/// One element of a target's decaying trail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailMarker {
    pub position: Vec3,
    /// Relative size; new markers start at 1.0.
    pub scale: f32,
}

#[derive(Clone, Debug)]
pub struct SelectableTarget {
    pub id: ViewId,
    pub orbit: OrbitParameters,
    hit: Option<HitToken>,
    position: Vec3,
    trail: VecDeque<TrailMarker>,
}

impl SelectableTarget {
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn trail(&self) -> &VecDeque<TrailMarker> {
        &self.trail
    }

    pub fn hit_token(&self) -> Option<HitToken> {
        self.hit
    }
}

#[derive(Debug)]
pub struct OrbitSelector {
    focal: Vec3,
    focal_radius: f32,
    marker_radius: f32,
    targets: Vec<SelectableTarget>,
    hovered: Option<usize>,
    ring: Option<TrailMarker>,
    events: NavigationSender,
}

impl OrbitSelector {
    /// Lays out one randomly oriented orbit per destination.
    pub fn new<R: Rng>(
        destinations: &[ViewId],
        focal: Vec3,
        focal_radius: f32,
        rng: &mut R,
        events: NavigationSender,
    ) -> Result<Self> {
        let orbits = destinations
            .iter()
            .map(|&id| OrbitParameters::random(id, focal_radius, rng).map(|o| (id, o)))
            .collect::<Result<Vec<_>>>()?;
        Self::with_orbits(orbits, focal, focal_radius, events)
    }

    pub fn with_orbits(
        orbits: Vec<(ViewId, OrbitParameters)>,
        focal: Vec3,
        focal_radius: f32,
        events: NavigationSender,
    ) -> Result<Self> {
        if !focal_radius.is_finite() || focal_radius <= 0.0 || !focal.is_finite() {
            return Err(FolioError::InvalidOrbitParameters {
                target: ViewId::Home.to_string(),
                reason: format!("focal radius {} at {:?}", focal_radius, focal),
            });
        }
        let targets = orbits
            .into_iter()
            .map(|(id, orbit)| SelectableTarget {
                id,
                orbit,
                hit: None,
                position: orbit.position(focal),
                trail: VecDeque::new(),
            })
            .collect();
        Ok(Self {
            focal,
            focal_radius,
            marker_radius: focal_radius * ELECTRON_NUCLEUS_RATIO,
            targets,
            hovered: None,
            ring: None,
            events,
        })
    }

    pub fn targets(&self) -> &[SelectableTarget] {
        &self.targets
    }

    pub fn target(&self, id: ViewId) -> Option<&SelectableTarget> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn hovered(&self) -> Option<ViewId> {
        self.hovered.map(|i| self.targets[i].id)
    }

    pub fn ring(&self) -> Option<TrailMarker> {
        self.ring
    }

    pub fn focal(&self) -> Vec3 {
        self.focal
    }

    /// Box around the nucleus that holds every orbit and its electron.
    pub fn bounds(&self) -> Bounds {
        let reach = self
            .targets
            .iter()
            .map(|t| t.orbit.semi_major.max(t.orbit.semi_minor))
            .fold(self.focal_radius, f32::max)
            + self.marker_radius;
        Bounds::from_center_half(self.focal, Vec3::splat(reach))
    }

    pub fn is_attached(&self) -> bool {
        self.targets.iter().any(|t| t.hit.is_some())
    }

    /// Registers one hit sphere per target. Repeated calls are no-ops.
    pub fn attach(&mut self, router: &mut PointerRouter) {
        for t in &mut self.targets {
            if t.hit.is_none() {
                t.hit = Some(router.add(HitShape::Sphere {
                    center: t.position,
                    radius: self.marker_radius,
                }));
            }
        }
    }

    /// Withdraws every hit sphere and forgets hover state.
    pub fn detach(&mut self, router: &mut PointerRouter) {
        for t in &mut self.targets {
            if let Some(token) = t.hit.take() {
                router.withdraw(token);
            }
        }
        self.hovered = None;
        self.ring = None;
    }

    fn index_of(&self, token: HitToken) -> Option<usize> {
        self.targets.iter().position(|t| t.hit == Some(token))
    }

    pub fn on_pointer(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::HoverEnter(token) | PointerEvent::HoverMove { target: token, .. } => {
                // an already hovered target is not overwritten
                if self.hovered.is_none() {
                    self.hovered = self.index_of(token);
                }
            }
            PointerEvent::HoverExit(token) => {
                if self.hovered.is_some() && self.hovered == self.index_of(token) {
                    self.hovered = None;
                }
            }
            PointerEvent::Release { .. } => {
                if let Some(i) = self.hovered {
                    let id = self.targets[i].id;
                    log::info!("[orbit] select {}", id);
                    self.events.emit(NavigationEvent::SelectView(id));
                }
            }
            PointerEvent::Press { .. } => {}
        }
    }

    /// Advances revolution and trails by `dt` seconds.
    pub fn update(&mut self, dt: f32, router: &mut PointerRouter) {
        self.ring = None;
        for (i, t) in self.targets.iter_mut().enumerate() {
            let frozen = self.hovered == Some(i);
            if !frozen {
                t.orbit.phase = (t.orbit.phase + dt * ORBIT_ANGULAR_RATE) % TAU;
                t.position = t.orbit.position(self.focal);
                if let Some(token) = t.hit {
                    let shape = HitShape::Sphere {
                        center: t.position,
                        radius: self.marker_radius,
                    };
                    if let Err(e) = router.update_shape(token, shape) {
                        log::debug!("[orbit] {}", e);
                    }
                }
            }

            let newest = t.trail.len().saturating_sub(1);
            for (j, m) in t.trail.iter_mut().enumerate() {
                m.scale *= if frozen && j != newest {
                    TRAIL_DECAY_FROZEN
                } else {
                    TRAIL_DECAY
                };
            }
            t.trail.retain(|m| m.scale >= TRAIL_MIN_SCALE);

            if frozen && t.trail.len() == 1 {
                self.ring = t.trail.front().copied();
            }

            t.trail.push_back(TrailMarker {
                position: t.position,
                scale: 1.0,
            });
        }
    }

    pub fn draw(&self, out: &mut DrawList, guides: bool) {
        out.push(Marker::world(
            self.focal,
            self.focal_radius,
            Shape::Disc,
            NUCLEUS_COLOR,
        ));
        for t in &self.targets {
            let [r, g, b, a] = t.id.color();
            if guides {
                for s in 0..ORBIT_GUIDE_SAMPLES {
                    let theta = s as f32 / ORBIT_GUIDE_SAMPLES as f32 * TAU;
                    out.push(Marker::world(
                        t.orbit.point_at(theta) + self.focal,
                        ORBIT_GUIDE_SCALE,
                        Shape::Disc,
                        [r, g, b, a * ORBIT_GUIDE_ALPHA],
                    ));
                }
            }
            for m in &t.trail {
                out.push(Marker::world(
                    m.position,
                    self.marker_radius * m.scale,
                    Shape::Disc,
                    [r, g, b, a * m.scale],
                ));
            }
        }
        if let Some(ring) = self.ring {
            out.push(Marker::world(
                ring.position,
                self.marker_radius * ring.scale * HIGHLIGHT_RING_SCALE,
                Shape::Ring,
                [1.0, 1.0, 1.0, 1.0],
            ));
        }
    }
}
