use std::path::PathBuf;

use clap::Parser;

use crate::data::model::PayloadRange;

/// Bounds of the payload range sliders, in kilograms.
pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
pub const PAYLOAD_SLIDER_STEP: f64 = 1_000.0;

/// Full slider span; also the initial range when the dataset is empty.
pub const PAYLOAD_SLIDER_SPAN: PayloadRange = PayloadRange {
    low: PAYLOAD_SLIDER_MIN,
    high: PAYLOAD_SLIDER_MAX,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "launch-dashboard")]
#[command(about = "Interactive launch records dashboard")]
pub struct DashboardConfig {
    /// Launch data file (.csv, .json or .parquet)
    #[arg(default_value = "spacex_launch_dash.csv")]
    pub data: PathBuf,

    /// Initial window width in points
    #[arg(long, default_value_t = 1200.0)]
    pub width: f32,

    /// Initial window height in points
    #[arg(long, default_value_t = 900.0)]
    pub height: f32,
}
