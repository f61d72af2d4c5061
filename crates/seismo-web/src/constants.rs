// DOM wiring and web-only tuning

// Element ids the page is expected to provide
pub const CANVAS_ID: &str = "app-canvas";
pub const LOADING_OVERLAY_ID: &str = "loading";
pub const LOADING_BAR_ID: &str = "loading-bar";
pub const LOADING_STATUS_ID: &str = "loading-status";
pub const COUNTER_ID: &str = "event-counter";
pub const FUN_FACT_ID: &str = "fun-fact";
pub const CLICK_COUNT_ID: &str = "click-count";
pub const ACHIEVEMENT_ID: &str = "achievement";
pub const ACHIEVEMENT_TITLE_ID: &str = "achievement-title";
pub const ACHIEVEMENT_DESC_ID: &str = "achievement-desc";
pub const DETAILS_ID: &str = "details";
pub const ANNOTATION_LAYER_ID: &str = "annotations";

// Mode buttons are `mode-<slug>`
pub const MODE_BUTTON_PREFIX: &str = "mode-";
pub const ACTIVE_CLASS: &str = "active";
pub const VISIBLE_CLASS: &str = "visible";

// Canvas attribute overriding the table location
pub const DATA_SRC_ATTR: &str = "data-src";

// Wheel delta normalization: line mode (deltaMode=1) to pixels
pub const WHEEL_LINE_PX: f32 = 16.0;

// Background clear color
pub const CLEAR_RGB: [f64; 3] = [0.01, 0.012, 0.03];
