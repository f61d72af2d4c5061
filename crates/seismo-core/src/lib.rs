pub mod app;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod interaction;
pub mod loader;
pub mod mapping;
pub mod marker;
pub mod modes;
pub mod particles;
pub mod projection;
pub mod record;
pub mod scene;
pub mod scheduler;
pub mod ui;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use app::App;
pub use config::VizParams;
pub use constants::*;
pub use error::LoadError;
pub use mapping::{color_for_depth, size_for_magnitude, DatasetStats, DepthBand};
pub use modes::Mode;
pub use projection::{Projection, ProjectionKind};
pub use record::EventRecord;
pub use scene::{LineVertex, SceneUniforms, SpriteInstance, QUAD_CORNERS};
pub use ui::UiSurface;
