//! Normalization, filtering and export of screening points.

pub mod export;
pub mod filter;
pub mod normalize;
pub mod view_state;

pub use export::{export_file_path, export_to_path, to_csv_string, write_csv, ExportError};
pub use filter::{
    is_highlighted, point_style, summarize, visible_points, PointColor, PointStyle,
    TissueSummary, VisiblePoint, DEFAULT_RADIUS, HIGHLIGHTED_RADIUS, PINNED_RADIUS,
};
pub use normalize::{normalize, DataPoint, NormalizedDataset};
pub use view_state::ViewState;
