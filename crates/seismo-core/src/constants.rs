use glam::Vec3;

// Shared visual tuning constants used by both web and native frontends.

// Depth bands (km)
pub const DEPTH_SHALLOW_MAX_KM: f32 = 20.0; // depth < this is shallow
pub const DEPTH_MID_MAX_KM: f32 = 60.0; // depth < this is mid, otherwise deep

pub const SHALLOW_COLOR: [f32; 3] = [1.0, 0.78, 0.25]; // amber
pub const MID_COLOR: [f32; 3] = [1.0, 0.35, 0.2]; // orange-red
pub const DEEP_COLOR: [f32; 3] = [0.55, 0.3, 1.0]; // violet

// Marker sizing
pub const MARKER_SIZE_MIN: f32 = 0.25; // size at magnitude 0
pub const MARKER_SIZE_MAX: f32 = 1.4; // size at the dataset's max magnitude

// Projection
pub const FLAT_PLANE_SIZE: f32 = 40.0; // side length of the flat map square
pub const FLAT_DEPTH_SCALE: f32 = 0.08; // world units per km of depth (flat)
pub const SPHERE_RADIUS: f32 = 15.0; // planet radius
pub const SPHERE_DEPTH_SCALE: f32 = 0.02; // world units per km of depth (sphere)

// Scene dressing
pub const STAR_COUNT: usize = 1500;
pub const STAR_RADIUS_MIN: f32 = 120.0;
pub const STAR_RADIUS_MAX: f32 = 260.0;
pub const STAR_SIZE: f32 = 0.6;
pub const GRID_DIVISIONS: usize = 20; // flat ground grid cells per side
pub const SPHERE_RINGS: usize = 12; // latitude rings on the globe
pub const SPHERE_MERIDIANS: usize = 18;
pub const RING_SEGMENTS: usize = 64;
pub const GROUND_COLOR: [f32; 4] = [0.15, 0.3, 0.5, 0.35];

// History mode
pub const HISTORY_TICK_SEC: f32 = 0.15; // one marker revealed per tick
pub const HISTORY_DIM_OPACITY: f32 = 0.1;

// Chaos mode
pub const CHAOS_PERIOD_MIN: f32 = 1.0; // seconds per pulse cycle
pub const CHAOS_PERIOD_MAX: f32 = 3.0;
pub const CHAOS_PULSE_AMPLITUDE: f32 = 0.5;
pub const CHAOS_BURST_PROBABILITY: f32 = 0.1;
pub const CHAOS_BURST_WINDOW_SEC: f32 = 2.0;
pub const CHAOS_BURST_MAGNITUDE_SCALE: f32 = 0.5;

// Rain mode
pub const RAIN_START_HEIGHT: f32 = 30.0; // lift above rest
pub const RAIN_STAGGER_BANDS: usize = 10;
pub const RAIN_STAGGER_STEP: f32 = 2.0;
pub const RAIN_DELAY_PER_INDEX: f32 = 0.02; // seconds between consecutive drops
pub const RAIN_BASE_DURATION: f32 = 0.8;
pub const RAIN_DURATION_PER_MAGNITUDE: f32 = 0.25;

// Particle bursts
pub const PARTICLES_PER_MAGNITUDE: f32 = 10.0;
pub const MAX_PARTICLES_PER_BURST: usize = 400; // ceiling for out-of-range magnitudes
pub const BURST_SPEED_MIN: f32 = 1.0;
pub const BURST_SPEED_MAX: f32 = 4.0;
pub const BURST_VELOCITY_SCALE: f32 = 1.0;
pub const BURST_DECAY_PER_SEC: f32 = 0.8; // life lost per second
pub const MAX_ACTIVE_BURSTS: usize = 256;
pub const PARTICLE_SIZE: f32 = 0.18;
pub const CLICK_BURST_SCALE: f32 = 1.0;
pub const FLIGHT_BURST_SCALE: f32 = 4.0; // large burst after a camera flight

// Interaction
pub const PICK_RADIUS_MIN: f32 = 0.5; // ray-sphere radius floor for picking
pub const HOVER_SCALE_BOOST: f32 = 1.6;
pub const CLICK_ACHIEVEMENT_THRESHOLD: u32 = 10;
pub const ANNOTATION_LIFE_SEC: f32 = 1.2;
pub const ANNOTATION_SPEED_PX: f32 = 90.0;
pub const CAMERA_FLIGHT_SEC: f32 = 1.5;
pub const CAMERA_FLIGHT_STANDOFF: f32 = 6.0; // final distance from the marker
pub const ACHIEVEMENT_SHOW_SEC: f32 = 4.0;

// Camera and controls
pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_START_EYE: Vec3 = Vec3::new(0.0, 28.0, 42.0);
pub const CONTROLS_DAMPING: f32 = 0.1; // fraction of residual motion removed per frame
pub const CONTROLS_ROTATE_SPEED: f32 = 0.005; // radians per pixel
pub const CONTROLS_ZOOM_SPEED: f32 = 0.001; // relative distance per wheel unit
pub const CONTROLS_MIN_DISTANCE: f32 = 5.0;
pub const CONTROLS_MAX_DISTANCE: f32 = 150.0;
pub const CONTROLS_PITCH_LIMIT: f32 = 1.5; // radians, just short of straight up/down

// UI
pub const COUNTER_TWEEN_SEC: f32 = 2.0;
pub const FUN_FACT_INTERVAL_SEC: f32 = 8.0;

// Frame
pub const MAX_FRAME_DT: f32 = 0.1; // clamp after tab suspension

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.9;
pub const BLOOM_THRESHOLD: f32 = 0.6;
