use crate::constants::STAR_COUNT;
use crate::particles::BurstParams;
use crate::projection::ProjectionKind;

/// Default table location, relative to the page (web) or working dir (native).
pub const DEFAULT_DATA_PATH: &str = "assets/quakes.csv";

/// Environment override for the native front-end's table path.
pub const DATA_PATH_ENV: &str = "SEISMO_DATA";

/// Session-level knobs. Tuning values live in `constants`.
#[derive(Clone, Debug)]
pub struct VizParams {
    pub projection: ProjectionKind,
    pub seed: u64,
    pub star_count: usize,
    pub bursts: BurstParams,
    pub data_path: String,
}

impl Default for VizParams {
    fn default() -> Self {
        Self {
            projection: ProjectionKind::Flat,
            seed: 42,
            star_count: STAR_COUNT,
            bursts: BurstParams::default(),
            data_path: DEFAULT_DATA_PATH.to_string(),
        }
    }
}

impl VizParams {
    pub fn with_projection(mut self, projection: ProjectionKind) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_data_path(mut self, path: impl Into<String>) -> Self {
        self.data_path = path.into();
        self
    }
}
