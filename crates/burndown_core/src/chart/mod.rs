mod progress;
mod series;

pub use progress::{MemberProgress, ProgressSummary, completed_points_by_member, progress_summary};
pub use series::{PointSeries, SeriesPoint, personal_series, team_series};
