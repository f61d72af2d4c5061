use crate::constants::HOVER_SCALE_BOOST;
use crate::mapping::{color_for_depth, size_for_magnitude, DepthBand};
use crate::projection::Projection;
use crate::record::EventRecord;
use glam::Vec3;

/// Visual proxy for one event record.
///
/// Appearance (`band`, `base_size`) is a pure function of the record and
/// fixed for the session. `position`, `scale` and `opacity` are the mode
/// transform; `resting_position` is the reference every reset returns to.
#[derive(Clone, Debug)]
pub struct Marker {
    pub record_index: usize,
    pub band: DepthBand,
    pub base_size: f32,
    pub magnitude: f32,
    pub depth_km: f32,
    pub position: Vec3,
    pub scale: f32,
    pub opacity: f32,
    pub hovered: bool,
    resting_position: Vec3,
}

impl Marker {
    pub fn from_record(
        record_index: usize,
        record: &EventRecord,
        projection: &Projection,
        max_magnitude: f32,
    ) -> Self {
        let resting_position = projection.project_record(record);
        Self {
            record_index,
            band: color_for_depth(record.depth_km),
            base_size: size_for_magnitude(record.magnitude, max_magnitude),
            magnitude: record.magnitude,
            depth_km: record.depth_km,
            position: resting_position,
            scale: 1.0,
            opacity: 1.0,
            hovered: false,
            resting_position,
        }
    }

    #[inline]
    pub fn resting_position(&self) -> Vec3 {
        self.resting_position
    }

    #[inline]
    pub fn base_color(&self) -> [f32; 3] {
        self.band.color()
    }

    /// Back to the identity transform. Hover emphasis is left alone.
    pub fn reset(&mut self) {
        self.position = self.resting_position;
        self.scale = 1.0;
        self.opacity = 1.0;
    }

    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.position == self.resting_position && self.scale == 1.0 && self.opacity == 1.0
    }

    /// World-space sprite size including hover emphasis.
    pub fn display_size(&self) -> f32 {
        let boost = if self.hovered { HOVER_SCALE_BOOST } else { 1.0 };
        self.base_size * self.scale * boost
    }

    pub fn display_opacity(&self) -> f32 {
        if self.hovered {
            1.0
        } else {
            self.opacity
        }
    }
}
