//! Geographic -> world-space placement of markers.
//!
//! Two presentations exist: a flat map square on the XZ plane and a globe.
//! World space is right-handed with +Y up.

use crate::constants::*;
use crate::record::EventRecord;
use glam::Vec3;

/// Latitude/longitude bounding box used to normalize the flat map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    pub lat_min: f32,
    pub lat_max: f32,
    pub lon_min: f32,
    pub lon_max: f32,
}

impl GeoBounds {
    pub const WORLD: GeoBounds = GeoBounds {
        lat_min: -90.0,
        lat_max: 90.0,
        lon_min: -180.0,
        lon_max: 180.0,
    };

    /// Tight bounds around the finite coordinates in `records`.
    /// Falls back to the whole globe when nothing usable is present.
    pub fn from_records(records: &[EventRecord]) -> Self {
        let mut b = GeoBounds {
            lat_min: f32::INFINITY,
            lat_max: f32::NEG_INFINITY,
            lon_min: f32::INFINITY,
            lon_max: f32::NEG_INFINITY,
        };
        for r in records {
            if r.latitude.is_finite() && r.longitude.is_finite() {
                b.lat_min = b.lat_min.min(r.latitude);
                b.lat_max = b.lat_max.max(r.latitude);
                b.lon_min = b.lon_min.min(r.longitude);
                b.lon_max = b.lon_max.max(r.longitude);
            }
        }
        if !b.lat_min.is_finite() {
            return GeoBounds::WORLD;
        }
        b
    }

    #[inline]
    fn normalize(value: f32, min: f32, max: f32) -> f32 {
        let span = max - min;
        if span.abs() < f32::EPSILON {
            0.5
        } else {
            (value - min) / span
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProjectionKind {
    #[default]
    Flat,
    Sphere,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    FlatPlane {
        size: f32,
        depth_scale: f32,
        bounds: GeoBounds,
    },
    Sphere {
        radius: f32,
        depth_scale: f32,
    },
}

impl Projection {
    /// Build the configured projection, fitting the flat map to `records`.
    pub fn for_records(kind: ProjectionKind, records: &[EventRecord]) -> Self {
        match kind {
            ProjectionKind::Flat => Projection::FlatPlane {
                size: FLAT_PLANE_SIZE,
                depth_scale: FLAT_DEPTH_SCALE,
                bounds: GeoBounds::from_records(records),
            },
            ProjectionKind::Sphere => Projection::Sphere {
                radius: SPHERE_RADIUS,
                depth_scale: SPHERE_DEPTH_SCALE,
            },
        }
    }

    pub fn project(&self, latitude: f32, longitude: f32, depth_km: f32) -> Vec3 {
        match *self {
            Projection::FlatPlane {
                size,
                depth_scale,
                bounds,
            } => {
                let u = GeoBounds::normalize(longitude, bounds.lon_min, bounds.lon_max);
                let v = GeoBounds::normalize(latitude, bounds.lat_min, bounds.lat_max);
                // north is -Z so the map reads upright from the default camera
                Vec3::new((u - 0.5) * size, -depth_km * depth_scale, (0.5 - v) * size)
            }
            Projection::Sphere {
                radius,
                depth_scale,
            } => {
                let phi = (90.0 - latitude).to_radians();
                let theta = (longitude + 180.0).to_radians();
                let r = radius - depth_km * depth_scale;
                Vec3::new(
                    -r * phi.sin() * theta.cos(),
                    r * phi.cos(),
                    r * phi.sin() * theta.sin(),
                )
            }
        }
    }

    #[inline]
    pub fn project_record(&self, record: &EventRecord) -> Vec3 {
        self.project(record.latitude, record.longitude, record.depth_km)
    }

    /// Local "up" at a world position: +Y on the flat map, radial on the globe.
    pub fn up_at(&self, position: Vec3) -> Vec3 {
        match self {
            Projection::FlatPlane { .. } => Vec3::Y,
            Projection::Sphere { .. } => position.try_normalize().unwrap_or(Vec3::Y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn flat_maps_bounds_to_square_corners() {
        let p = Projection::FlatPlane {
            size: 10.0,
            depth_scale: 0.1,
            bounds: GeoBounds {
                lat_min: 60.0,
                lat_max: 70.0,
                lon_min: -30.0,
                lon_max: -10.0,
            },
        };
        let sw = p.project(60.0, -30.0, 0.0);
        let ne = p.project(70.0, -10.0, 0.0);
        assert_relative_eq!(sw.x, -5.0);
        assert_relative_eq!(sw.z, 5.0);
        assert_relative_eq!(ne.x, 5.0);
        assert_relative_eq!(ne.z, -5.0);
        assert_relative_eq!(p.project(65.0, -20.0, 10.0).y, -1.0);
    }

    #[test]
    fn sphere_places_surface_points_at_radius() {
        let p = Projection::Sphere {
            radius: 10.0,
            depth_scale: 0.01,
        };
        let v = p.project(64.0, -21.0, 0.0);
        assert_relative_eq!(v.length(), 10.0, epsilon = 1e-4);
        let deep = p.project(64.0, -21.0, 100.0);
        assert_relative_eq!(deep.length(), 9.0, epsilon = 1e-4);
        let north = p.project(90.0, 0.0, 0.0);
        assert_relative_eq!(north.y, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn degenerate_bounds_center_the_point() {
        let b = GeoBounds::from_records(&[EventRecord {
            latitude: 64.0,
            longitude: -20.0,
            ..Default::default()
        }]);
        let p = Projection::FlatPlane {
            size: 10.0,
            depth_scale: 1.0,
            bounds: b,
        };
        let v = p.project(64.0, -20.0, 0.0);
        assert_relative_eq!(v.x, 0.0);
        assert_relative_eq!(v.z, 0.0);
    }

    #[test]
    fn empty_records_use_world_bounds() {
        assert_eq!(GeoBounds::from_records(&[]), GeoBounds::WORLD);
    }
}
