//! Output formats for an analysis run.
//!
//! - [`render_report`]: plain-text management report
//! - [`build_heatmap`]: per-day punch grid for an external renderer

mod heatmap;
mod text;

pub use heatmap::{
    build_heatmap, deviation_status, format_hours, CellStatus, HeatmapCell, HeatmapGrid,
    HeatmapRow, HoursBand, HoursCell, ABSENT_TEXT, MAJOR_MINUTES, MISSING_TEXT, ON_TIME_MINUTES,
    OVER_HOURS_MINUTES, UNDER_HOURS_MINUTES,
};
pub use text::{
    render_report, ATTENTION_AVERAGE_SCORE, ATTENTION_HIGH_SCORE_PERIODS, ATTENTION_LIMIT,
};
