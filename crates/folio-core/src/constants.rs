// Shared layout/animation tuning constants used by the core and the web frontend.

// Clock
pub const MAX_FRAME_DELTA_MS: f64 = 60.0; // longest frame step handed to subjects

// Camera
pub const CAMERA_FOV_DEG: f32 = 25.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 150.0;
pub const CAMERA_START_Z: f32 = 40.0;
pub const CAMERA_FAR_EDGE_FACTOR: f32 = 3.0; // far plane = distance to far edge * factor

// Pixel ratio clamp
pub const MIN_PIXEL_RATIO: f64 = 1.0;
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Atom navigator layout
pub const NUCLEUS_RADIUS: f32 = 1.0;
pub const ELECTRON_NUCLEUS_RATIO: f32 = 0.2; // electron radius / nucleus radius
pub const ATOM_OFFSET: [f32; 3] = [5.0, 0.0, 0.0]; // orbit group offset inside the home view
pub const HOME_TEXT_CENTER: [f32; 3] = [-5.0, 0.0, 0.0]; // intro text area left of the atom
pub const HOME_TEXT_HALF: [f32; 3] = [5.0, 5.0, 0.0];
pub const HOME_FRAME_MARGIN: f32 = 1.1; // world camera backs off past the home content
pub const ORBIT_AXIS_MIN_FACTOR: f32 = 2.0; // semi-axes drawn from [2r, 3r]
pub const ORBIT_AXIS_MAX_FACTOR: f32 = 3.0;
pub const ORBIT_ANGULAR_RATE: f32 = 0.3; // radians per second (0.005 per 60 Hz frame)
pub const ORBIT_GUIDE_SAMPLES: usize = 64;
pub const ORBIT_GUIDE_SCALE: f32 = 0.03;

// Trail
pub const TRAIL_DECAY: f32 = 0.95; // per tick while revolving
pub const TRAIL_DECAY_FROZEN: f32 = 0.5; // per tick for all but the newest marker while hovered
pub const TRAIL_MIN_SCALE: f32 = 0.5; // markers below this relative size are dropped
pub const HIGHLIGHT_RING_SCALE: f32 = 1.6; // ring size relative to the marker it surrounds

// HUD (normalized device coordinates unless noted)
pub const HUD_DEPTH: f32 = 2.5; // world z of the HUD boundary used for camera framing
pub const FEEDBACK_ICON_HALF: [f32; 2] = [0.15, 0.05]; // in HUD units (x is divided by aspect)
pub const FEEDBACK_ICON_Y: f32 = -0.8;
pub const FEEDBACK_ICON_MARGIN: f32 = 0.04;
pub const BACK_INDICATOR_HALF: [f32; 2] = [0.05, 0.05];
pub const BACK_INDICATOR_Y: f32 = 0.8;
pub const BACK_INDICATOR_X_LANDSCAPE: f32 = 0.85;
pub const BACK_INDICATOR_X_PORTRAIT: f32 = 0.65;

// Palette
pub const HUD_MUTED: [f32; 4] = [0.0, 0.192, 0.267, 1.0]; // #003144
pub const HUD_HIGHLIGHT: [f32; 4] = [0.404, 0.78, 0.922, 1.0]; // #67c7eb
pub const NUCLEUS_COLOR: [f32; 4] = [0.408, 0.765, 0.753, 0.8]; // #68c3c0
pub const ORBIT_GUIDE_ALPHA: f32 = 0.35;
pub const DEBUG_BOUNDS_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const CONTAINER_ALPHA: f32 = 0.15;

// Footer hints
pub const FEEDBACK_HINT: &str = "Click to provide feedback";
pub const BACK_HINT: &str = "Click to go back to Home screen";
