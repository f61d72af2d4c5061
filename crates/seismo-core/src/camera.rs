//! Camera description, damped orbit controls and the double-click flight.
//!
//! These types avoid platform APIs; both front-ends build their matrices and
//! picking rays from here.

use crate::constants::*;
use crate::modes::ease_out_cubic;
use glam::{Mat4, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: CAMERA_START_EYE,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Keep the projection in step with the viewport. Zero sizes are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// World-space ray through pixel `(sx, sy)` of a `width` x `height`
    /// viewport. Returns `(ray_origin, ray_direction)`.
    pub fn screen_ray(&self, sx: f32, sy: f32, width: f32, height: f32) -> (Vec3, Vec3) {
        let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let ro = self.eye;
        let rd = (p1 - ro).normalize_or_zero();
        (ro, rd)
    }

    /// Project a world point to pixel coordinates; `None` when behind the eye.
    pub fn world_to_screen(&self, p: Vec3, width: f32, height: f32) -> Option<[f32; 2]> {
        let clip = self.view_proj() * p.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some([
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
        ])
    }
}

/// Nearest positive intersection of a ray with a sphere.
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

/// Orbit-style controls around a target with damped rotation and zoom.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    yaw_vel: f32,
    pitch_vel: f32,
    zoom_vel: f32,
    dragging: bool,
    last_px: [f32; 2],
}

impl OrbitControls {
    /// Controls positioned so that `eye` looks at `target`.
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(CONTROLS_MIN_DISTANCE);
        let pitch = (offset.y / distance)
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-CONTROLS_PITCH_LIMIT, CONTROLS_PITCH_LIMIT);
        let yaw = offset.x.atan2(offset.z);
        Self {
            target,
            yaw,
            pitch,
            distance,
            yaw_vel: 0.0,
            pitch_vel: 0.0,
            zoom_vel: 0.0,
            dragging: false,
            last_px: [0.0, 0.0],
        }
    }

    pub fn eye(&self) -> Vec3 {
        let cp = self.pitch.cos();
        self.target
            + Vec3::new(
                self.distance * cp * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                self.distance * cp * self.yaw.cos(),
            )
    }

    pub fn begin_drag(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.last_px = [x, y];
    }

    pub fn drag_to(&mut self, x: f32, y: f32) {
        if !self.dragging {
            return;
        }
        let dx = x - self.last_px[0];
        let dy = y - self.last_px[1];
        self.last_px = [x, y];
        self.yaw_vel -= dx * CONTROLS_ROTATE_SPEED;
        self.pitch_vel += dy * CONTROLS_ROTATE_SPEED;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Wheel delta in pixel-ish units; positive zooms out.
    pub fn zoom(&mut self, delta: f32) {
        self.zoom_vel += delta * CONTROLS_ZOOM_SPEED;
    }

    /// Apply accumulated motion, then bleed off a damping fraction of it.
    pub fn update(&mut self) {
        self.yaw += self.yaw_vel;
        self.pitch = (self.pitch + self.pitch_vel).clamp(-CONTROLS_PITCH_LIMIT, CONTROLS_PITCH_LIMIT);
        self.distance = (self.distance * (1.0 + self.zoom_vel))
            .clamp(CONTROLS_MIN_DISTANCE, CONTROLS_MAX_DISTANCE);
        let keep = 1.0 - CONTROLS_DAMPING;
        self.yaw_vel *= keep;
        self.pitch_vel *= keep;
        self.zoom_vel *= keep;
    }

    pub fn apply_to(&self, camera: &mut Camera) {
        camera.eye = self.eye();
        camera.target = self.target;
    }
}

/// Eased camera move toward a marker; completes exactly once.
#[derive(Clone, Debug)]
pub struct CameraFlight {
    pub marker: usize,
    from_eye: Vec3,
    from_target: Vec3,
    to_eye: Vec3,
    to_target: Vec3,
    duration: f32,
    elapsed: f32,
}

impl CameraFlight {
    /// Fly so the camera ends `CAMERA_FLIGHT_STANDOFF` from `marker_pos`,
    /// keeping the current viewing direction.
    pub fn toward(marker: usize, camera: &Camera, marker_pos: Vec3) -> Self {
        let dir = (camera.eye - marker_pos)
            .try_normalize()
            .unwrap_or(Vec3::Z);
        Self {
            marker,
            from_eye: camera.eye,
            from_target: camera.target,
            to_eye: marker_pos + dir * CAMERA_FLIGHT_STANDOFF,
            to_target: marker_pos,
            duration: CAMERA_FLIGHT_SEC,
            elapsed: 0.0,
        }
    }

    /// Advance and write the eased pose into `camera`. Returns true on the
    /// frame the flight finishes.
    pub fn step(&mut self, dt: f32, camera: &mut Camera) -> bool {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        let t = ease_out_cubic(self.elapsed / self.duration);
        camera.eye = self.from_eye.lerp(self.to_eye, t);
        camera.target = self.from_target.lerp(self.to_target, t);
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn center_ray_points_at_target() {
        let cam = Camera {
            eye: Vec3::new(0.0, 0.0, 10.0),
            aspect: 1.0,
            ..Default::default()
        };
        let (ro, rd) = cam.screen_ray(50.0, 50.0, 100.0, 100.0);
        assert_eq!(ro, cam.eye);
        assert_relative_eq!(rd.z, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn ray_sphere_hits_and_misses() {
        assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0).is_some());
        assert!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
    }

    #[test]
    fn controls_round_trip_eye() {
        let eye = Vec3::new(3.0, 4.0, 12.0);
        let c = OrbitControls::looking_from(eye, Vec3::ZERO);
        let e = c.eye();
        assert_relative_eq!(e.x, eye.x, epsilon = 1e-3);
        assert_relative_eq!(e.y, eye.y, epsilon = 1e-3);
        assert_relative_eq!(e.z, eye.z, epsilon = 1e-3);
    }

    #[test]
    fn damping_settles_motion() {
        let mut c = OrbitControls::looking_from(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO);
        c.begin_drag(0.0, 0.0);
        c.drag_to(100.0, 0.0);
        c.end_drag();
        c.update();
        let moved = c.yaw;
        assert!(moved < 0.0);
        for _ in 0..200 {
            c.update();
        }
        let before = c.yaw;
        c.update();
        assert_relative_eq!(c.yaw, before, epsilon = 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut c = OrbitControls::looking_from(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO);
        c.begin_drag(0.0, 0.0);
        c.drag_to(0.0, 10_000.0);
        c.update();
        assert!(c.pitch <= CONTROLS_PITCH_LIMIT);
    }

    #[test]
    fn overhead_start_is_within_pitch_limit() {
        let mut c = OrbitControls::looking_from(Vec3::new(0.0, 30.0, 0.0), Vec3::ZERO);
        assert!(c.pitch <= CONTROLS_PITCH_LIMIT);
        let before = c.pitch;
        c.update();
        assert_eq!(c.pitch, before);
    }

    #[test]
    fn flight_ends_at_standoff() {
        let mut cam = Camera::default();
        let target = Vec3::new(5.0, -1.0, 2.0);
        let mut f = CameraFlight::toward(0, &cam, target);
        let mut done = false;
        for _ in 0..200 {
            if f.step(0.016, &mut cam) {
                done = true;
                break;
            }
        }
        assert!(done);
        assert_relative_eq!(cam.target.x, target.x, epsilon = 1e-4);
        assert_relative_eq!((cam.eye - target).length(), CAMERA_FLIGHT_STANDOFF, epsilon = 1e-3);
    }
}
