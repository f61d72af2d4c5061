//! Pure record -> appearance mappings, plus dataset-wide aggregates.

use crate::constants::*;
use crate::record::EventRecord;
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DepthBand {
    Shallow,
    Mid,
    Deep,
}

impl DepthBand {
    pub const ALL: [DepthBand; 3] = [DepthBand::Shallow, DepthBand::Mid, DepthBand::Deep];

    pub fn color(self) -> [f32; 3] {
        match self {
            DepthBand::Shallow => SHALLOW_COLOR,
            DepthBand::Mid => MID_COLOR,
            DepthBand::Deep => DEEP_COLOR,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DepthBand::Shallow => "shallow",
            DepthBand::Mid => "mid-depth",
            DepthBand::Deep => "deep",
        }
    }
}

/// Band a depth in km. Boundaries belong to the deeper band, so exactly
/// 20 km is `Mid` and exactly 60 km is `Deep`.
#[inline]
pub fn color_for_depth(depth_km: f32) -> DepthBand {
    if depth_km < DEPTH_SHALLOW_MAX_KM {
        DepthBand::Shallow
    } else if depth_km < DEPTH_MID_MAX_KM {
        DepthBand::Mid
    } else {
        DepthBand::Deep
    }
}

/// Linear size between `MARKER_SIZE_MIN` and `MARKER_SIZE_MAX`.
#[inline]
pub fn size_for_magnitude(magnitude: f32, max_magnitude: f32) -> f32 {
    let t = if max_magnitude > 0.0 {
        (magnitude / max_magnitude).clamp(0.0, 1.0)
    } else {
        0.0
    };
    MARKER_SIZE_MIN + (MARKER_SIZE_MAX - MARKER_SIZE_MIN) * t
}

/// Largest finite magnitude in the set, or 0 for an empty/degenerate set.
pub fn max_magnitude(records: &[EventRecord]) -> f32 {
    records
        .iter()
        .map(|r| r.magnitude)
        .filter(|m| m.is_finite())
        .fold(0.0_f32, f32::max)
}

/// Aggregates over the loaded table; NaN fields are skipped.
#[derive(Clone, Debug, Default)]
pub struct DatasetStats {
    pub count: usize,
    pub band_counts: FnvHashMap<DepthBand, usize>,
    pub max_magnitude: f32,
    pub mean_magnitude: f32,
    pub min_depth_km: f32,
    pub max_depth_km: f32,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub strongest: Option<usize>,
}

impl DatasetStats {
    pub fn from_records(records: &[EventRecord]) -> Self {
        let mut stats = DatasetStats {
            count: records.len(),
            min_depth_km: f32::INFINITY,
            max_depth_km: f32::NEG_INFINITY,
            ..Default::default()
        };
        let mut mag_sum = 0.0_f64;
        let mut mag_n = 0usize;
        for (i, r) in records.iter().enumerate() {
            if r.depth_km.is_finite() {
                *stats.band_counts.entry(color_for_depth(r.depth_km)).or_default() += 1;
                stats.min_depth_km = stats.min_depth_km.min(r.depth_km);
                stats.max_depth_km = stats.max_depth_km.max(r.depth_km);
            }
            if r.magnitude.is_finite() {
                mag_sum += r.magnitude as f64;
                mag_n += 1;
                if r.magnitude > stats.max_magnitude || stats.strongest.is_none() {
                    stats.max_magnitude = stats.max_magnitude.max(r.magnitude);
                    stats.strongest = Some(i);
                }
            }
        }
        if mag_n > 0 {
            stats.mean_magnitude = (mag_sum / mag_n as f64) as f32;
        }
        if !stats.min_depth_km.is_finite() {
            stats.min_depth_km = 0.0;
            stats.max_depth_km = 0.0;
        }
        stats.first_date = records.first().map(|r| r.date.clone());
        stats.last_date = records.last().map(|r| r.date.clone());
        stats
    }

    pub fn band_count(&self, band: DepthBand) -> usize {
        self.band_counts.get(&band).copied().unwrap_or(0)
    }

    /// Short facts rotated through the UI while the scene runs.
    pub fn fun_facts(&self, records: &[EventRecord]) -> Vec<String> {
        if self.count == 0 {
            return vec!["No events loaded.".to_string()];
        }
        let mut facts = vec![
            format!("{} earthquakes in this dataset.", self.count),
            format!("Average magnitude: {:.2}.", self.mean_magnitude),
            format!(
                "Depths range from {:.1} km to {:.1} km.",
                self.min_depth_km, self.max_depth_km
            ),
        ];
        for band in DepthBand::ALL {
            facts.push(format!(
                "{} events are {} quakes.",
                self.band_count(band),
                band.label()
            ));
        }
        if let Some(r) = self.strongest.and_then(|i| records.get(i)) {
            facts.push(format!(
                "Strongest: M{:.1} near {} on {}.",
                r.magnitude, r.locality, r.date
            ));
        }
        if let (Some(first), Some(last)) = (&self.first_date, &self.last_date) {
            facts.push(format!("Records span {} to {}.", first, last));
        }
        facts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_belong_to_deeper_band() {
        assert_eq!(color_for_depth(0.0), DepthBand::Shallow);
        assert_eq!(color_for_depth(19.99), DepthBand::Shallow);
        assert_eq!(color_for_depth(20.0), DepthBand::Mid);
        assert_eq!(color_for_depth(59.99), DepthBand::Mid);
        assert_eq!(color_for_depth(60.0), DepthBand::Deep);
        assert_eq!(color_for_depth(700.0), DepthBand::Deep);
    }

    #[test]
    fn nan_depth_does_not_panic() {
        assert_eq!(color_for_depth(f32::NAN), DepthBand::Deep);
    }

    #[test]
    fn size_is_clamped_to_floor_and_ceiling() {
        assert_eq!(size_for_magnitude(0.0, 4.0), MARKER_SIZE_MIN);
        assert_eq!(size_for_magnitude(4.0, 4.0), MARKER_SIZE_MAX);
        assert_eq!(size_for_magnitude(9.0, 4.0), MARKER_SIZE_MAX);
        assert_eq!(size_for_magnitude(2.0, 0.0), MARKER_SIZE_MIN);
    }

    #[test]
    fn size_never_shrinks_as_magnitude_grows() {
        let max = 5.2;
        let mut prev = size_for_magnitude(0.0, max);
        for step in 1..=600 {
            let m = step as f32 * 0.01;
            let s = size_for_magnitude(m, max);
            assert!(s >= prev, "size dropped at magnitude {m}: {s} < {prev}");
            prev = s;
        }
        assert_eq!(prev, MARKER_SIZE_MAX);
    }

    #[test]
    fn stats_skip_nan_fields() {
        let recs = vec![
            EventRecord {
                depth_km: 5.0,
                magnitude: 2.0,
                date: "2024-01-01".into(),
                ..Default::default()
            },
            EventRecord {
                depth_km: f32::NAN,
                magnitude: f32::NAN,
                date: "2024-01-02".into(),
                ..Default::default()
            },
        ];
        let s = DatasetStats::from_records(&recs);
        assert_eq!(s.count, 2);
        assert_eq!(s.band_count(DepthBand::Shallow), 1);
        assert_eq!(s.max_magnitude, 2.0);
        assert_eq!(s.strongest, Some(0));
        assert_eq!(s.last_date.as_deref(), Some("2024-01-02"));
    }
}
