//! Pointer interaction router.
//!
//! Normalizes raw pointer/touch input against the target rect, casts a ray
//! through the camera and tests it against a registry of hit-test targets.
//! Components register targets and get an opaque [`HitToken`] back; removing a
//! token twice is tolerated.

use std::f32::consts::PI;

use fnv::FnvHashMap;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::camera::{Camera, Ray};
use crate::error::{FolioError, Result};

/// Opaque handle for one registered hit-test target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HitToken(u32);

/// Shape tested against the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitShape {
    /// World-space sphere.
    Sphere { center: Vec3, radius: f32 },
    /// Screen-fixed rectangle in normalized device coordinates.
    ScreenRect { center: Vec2, half: Vec2 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub target: HitToken,
    pub uv: Vec2,
    pub world_point: Vec3,
    pub distance: f32,
}

/// Raw input in client (CSS pixel) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Leave,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    HoverEnter(HitToken),
    HoverMove {
        target: HitToken,
        hit: Intersection,
    },
    HoverExit(HitToken),
    Press {
        target: Option<HitToken>,
        previous: Option<HitToken>,
    },
    Release {
        target: Option<HitToken>,
    },
}

impl PointerEvent {
    /// Target this event refers to, if any.
    pub fn target(&self) -> Option<HitToken> {
        match *self {
            PointerEvent::HoverEnter(t) | PointerEvent::HoverExit(t) => Some(t),
            PointerEvent::HoverMove { target, .. } => Some(target),
            PointerEvent::Press { target, .. } | PointerEvent::Release { target } => target,
        }
    }
}

pub type PointerEvents = SmallVec<[PointerEvent; 4]>;

/// Placement of the input surface in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TargetRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Client coordinates to normalized device coordinates (y up).
    #[inline]
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        let w = self.width.max(1.0);
        let h = self.height.max(1.0);
        Vec2::new(((x - self.x) / w) * 2.0 - 1.0, -((y - self.y) / h) * 2.0 + 1.0)
    }
}

pub struct PointerRouter {
    targets: FnvHashMap<HitToken, HitShape>,
    next_id: u32,
    enabled: bool,
    rect: TargetRect,
    ndc: Option<Vec2>,
    hovered: Option<HitToken>,
    selected: Option<HitToken>,
    is_down: bool,
}

impl PointerRouter {
    pub fn new(rect: TargetRect) -> Self {
        Self {
            targets: FnvHashMap::default(),
            next_id: 0,
            enabled: false,
            rect,
            ndc: None,
            hovered: None,
            selected: None,
            is_down: false,
        }
    }

    /// Starts routing input. Returns `true` only on the call that flipped the
    /// state, so the caller attaches its input listeners exactly once.
    pub fn enable(&mut self) -> bool {
        if self.enabled {
            return false;
        }
        self.enabled = true;
        true
    }

    /// Stops routing input. Returns `true` only on the call that flipped the state.
    pub fn disable(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.enabled = false;
        self.is_down = false;
        true
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn resize(&mut self, rect: TargetRect) {
        self.rect = rect;
    }

    pub fn rect(&self) -> TargetRect {
        self.rect
    }

    pub fn add(&mut self, shape: HitShape) -> HitToken {
        let token = HitToken(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.targets.insert(token, shape);
        token
    }

    pub fn remove(&mut self, token: HitToken) -> Result<HitShape> {
        let shape = self
            .targets
            .remove(&token)
            .ok_or(FolioError::RegistryInconsistency(token))?;
        if self.hovered == Some(token) {
            self.hovered = None;
        }
        if self.selected == Some(token) {
            self.selected = None;
        }
        Ok(shape)
    }

    /// Removes `token`, logging instead of failing when it is already gone.
    pub fn withdraw(&mut self, token: HitToken) {
        if let Err(e) = self.remove(token) {
            log::debug!("[pointer] {}", e);
        }
    }

    pub fn update_shape(&mut self, token: HitToken, shape: HitShape) -> Result<()> {
        let slot = self
            .targets
            .get_mut(&token)
            .ok_or(FolioError::RegistryInconsistency(token))?;
        *slot = shape;
        Ok(())
    }

    pub fn contains(&self, token: HitToken) -> bool {
        self.targets.contains_key(&token)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn hovered(&self) -> Option<HitToken> {
        self.hovered
    }

    pub fn is_down(&self) -> bool {
        self.is_down
    }

    pub fn handle(&mut self, input: PointerInput, camera: &Camera) -> PointerEvents {
        let mut out = PointerEvents::new();
        if !self.enabled {
            return out;
        }
        match input {
            PointerInput::Move { x, y } => {
                self.ndc = Some(self.rect.to_ndc(x, y));
                self.track_hover(camera, &mut out);
            }
            PointerInput::Down { x, y } => {
                self.is_down = true;
                self.ndc = Some(self.rect.to_ndc(x, y));
                self.track_hover(camera, &mut out);
                out.push(PointerEvent::Press {
                    target: self.hovered,
                    previous: self.selected,
                });
                self.selected = self.hovered;
            }
            PointerInput::Up => self.release(&mut out),
            PointerInput::Leave => {
                self.release(&mut out);
                if let Some(h) = self.hovered.take() {
                    out.push(PointerEvent::HoverExit(h));
                }
                self.ndc = None;
            }
        }
        out
    }

    /// Re-tests the last pointer position; targets move under a resting pointer.
    pub fn refresh(&mut self, camera: &Camera) -> PointerEvents {
        let mut out = PointerEvents::new();
        if self.enabled && self.ndc.is_some() {
            self.track_hover(camera, &mut out);
        }
        out
    }

    fn release(&mut self, out: &mut PointerEvents) {
        if !self.is_down {
            return;
        }
        self.is_down = false;
        out.push(PointerEvent::Release {
            target: self.hovered,
        });
    }

    fn track_hover(&mut self, camera: &Camera, out: &mut PointerEvents) {
        let Some(ndc) = self.ndc else {
            return;
        };
        match self.pick(camera.ray_from_ndc(ndc), ndc) {
            Some(hit) => {
                if self.hovered != Some(hit.target) {
                    if let Some(prev) = self.hovered {
                        out.push(PointerEvent::HoverExit(prev));
                    }
                    out.push(PointerEvent::HoverEnter(hit.target));
                    self.hovered = Some(hit.target);
                } else {
                    out.push(PointerEvent::HoverMove {
                        target: hit.target,
                        hit,
                    });
                }
            }
            None => {
                if let Some(prev) = self.hovered.take() {
                    out.push(PointerEvent::HoverExit(prev));
                }
            }
        }
    }

    /// Nearest intersection. Screen rectangles sit in front of everything.
    fn pick(&self, ray: Ray, ndc: Vec2) -> Option<Intersection> {
        let mut best: Option<Intersection> = None;
        for (&token, shape) in &self.targets {
            let hit = match *shape {
                HitShape::ScreenRect { center, half } => {
                    screen_rect_hit(ndc, center, half).map(|uv| Intersection {
                        target: token,
                        uv,
                        world_point: ray.origin,
                        distance: 0.0,
                    })
                }
                HitShape::Sphere { center, radius } => {
                    ray_sphere(ray.origin, ray.dir, center, radius).map(|t| {
                        let p = ray.origin + ray.dir * t;
                        Intersection {
                            target: token,
                            uv: sphere_uv((p - center).normalize_or_zero()),
                            world_point: p,
                            distance: t,
                        }
                    })
                }
            };
            if let Some(h) = hit {
                best = match best {
                    Some(b) if (b.distance, b.target) <= (h.distance, h.target) => Some(b),
                    _ => Some(h),
                };
            }
        }
        best
    }
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

#[inline]
fn screen_rect_hit(ndc: Vec2, center: Vec2, half: Vec2) -> Option<Vec2> {
    let d = ndc - center;
    if d.x.abs() <= half.x && d.y.abs() <= half.y {
        let hx = half.x.max(f32::EPSILON);
        let hy = half.y.max(f32::EPSILON);
        Some(Vec2::new(d.x / hx * 0.5 + 0.5, d.y / hy * 0.5 + 0.5))
    } else {
        None
    }
}

#[inline]
fn sphere_uv(n: Vec3) -> Vec2 {
    Vec2::new(
        0.5 + n.z.atan2(n.x) / (2.0 * PI),
        0.5 + n.y.clamp(-1.0, 1.0).asin() / PI,
    )
}
