use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Fill shape of a marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Shape {
    Disc = 0,
    Ring = 1,
    Rect = 2,
    Frame = 3,
}

/// Coordinate space of a marker's center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Space {
    /// Billboard centered on a world position.
    World = 0,
    /// Fixed to the screen; center is in normalized device coordinates.
    Screen = 1,
}

/// One instanced billboard as uploaded to the GPU.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Marker {
    pub center: [f32; 3],
    pub shape: u32,
    pub color: [f32; 4],
    pub half: [f32; 2],
    pub space: u32,
    pub _pad: u32,
}

impl Marker {
    pub fn world(center: Vec3, radius: f32, shape: Shape, color: [f32; 4]) -> Self {
        Self {
            center: center.to_array(),
            shape: shape as u32,
            color,
            half: [radius, radius],
            space: Space::World as u32,
            _pad: 0,
        }
    }

    pub fn screen(center: Vec2, half: Vec2, shape: Shape, color: [f32; 4]) -> Self {
        Self {
            center: [center.x, center.y, 0.0],
            shape: shape as u32,
            color,
            half: half.to_array(),
            space: Space::Screen as u32,
            _pad: 0,
        }
    }
}

/// Per-frame list of markers contributed by every active subject.
#[derive(Default, Debug)]
pub struct DrawList {
    pub markers: Vec<Marker>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.markers.clear();
    }

    #[inline]
    pub fn push(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
