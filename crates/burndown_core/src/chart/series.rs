use crate::error::AppError;
use crate::model::Task;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

/// Padding added before the first and after the last real data point so a
/// young workspace still charts as a line instead of a glitchy single dot.
const SERIES_PAD: Duration = Duration::days(3);

/// One point of a burndown series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub timestamp: OffsetDateTime,
    pub cumulative_points: u64,
}

/// Cumulative completed-points-over-time series, ascending by timestamp and
/// non-decreasing in points. Produced fresh on every aggregation call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PointSeries {
    points: Vec<SeriesPoint>,
}

impl PointSeries {
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Final cumulative value, i.e. the sum of all counted task points.
    pub fn total_points(&self) -> u64 {
        self.points
            .last()
            .map(|point| point.cumulative_points)
            .unwrap_or(0)
    }

    /// Number of distinct cumulative values across the series. A series with
    /// fewer than 2 distinct values is flat; whether to render it is the
    /// caller's presentation decision.
    pub fn distinct_cumulative_values(&self) -> usize {
        let mut values: Vec<u64> = self
            .points
            .iter()
            .map(|point| point.cumulative_points)
            .collect();
        values.sort_unstable();
        values.dedup();
        values.len()
    }
}

/// Aggregate all Done tasks into a team-wide burndown series.
///
/// The series always starts with a synthetic zero point 3 days before the
/// workspace creation time. When at least one Done task exists a synthetic
/// trailing point 3 days after the last completion repeats the final sum, so
/// the output has `done_count + 1` or `done_count + 2` points.
pub fn team_series(
    tasks: &[Task],
    now: OffsetDateTime,
    workspace_created_at: OffsetDateTime,
) -> Result<PointSeries, AppError> {
    accumulate(tasks, now, workspace_created_at, |_| true)
}

/// Same contract as [`team_series`], restricted to tasks assigned to the
/// given member email. Unassigned tasks never match.
pub fn personal_series(
    tasks: &[Task],
    now: OffsetDateTime,
    workspace_created_at: OffsetDateTime,
    member_email: &str,
) -> Result<PointSeries, AppError> {
    let email = member_email.trim();
    if email.is_empty() {
        return Err(AppError::invalid_input("member email is required"));
    }

    accumulate(tasks, now, workspace_created_at, |task| {
        task.task_member_assigned
            .as_ref()
            .is_some_and(|member| member.email == email)
    })
}

fn accumulate(
    tasks: &[Task],
    now: OffsetDateTime,
    workspace_created_at: OffsetDateTime,
    keep: impl Fn(&Task) -> bool,
) -> Result<PointSeries, AppError> {
    if workspace_created_at > now {
        return Err(AppError::invalid_input(
            "workspace creation time is in the future",
        ));
    }

    let mut done = Vec::new();
    for task in tasks {
        if !task.status.is_done() || !keep(task) {
            continue;
        }
        done.push((completion_time(task)?, task.task_points));
    }

    // Stable sort: tasks completed at the same instant keep input order.
    done.sort_by_key(|(completed_at, _)| *completed_at);

    let mut points = Vec::with_capacity(done.len() + 2);
    points.push(SeriesPoint {
        timestamp: workspace_created_at - SERIES_PAD,
        cumulative_points: 0,
    });

    let mut running = 0u64;
    for (completed_at, task_points) in &done {
        running += task_points;
        points.push(SeriesPoint {
            timestamp: *completed_at,
            cumulative_points: running,
        });
    }

    if let Some((last_completed_at, _)) = done.last() {
        points.push(SeriesPoint {
            timestamp: *last_completed_at + SERIES_PAD,
            cumulative_points: running,
        });
    }

    Ok(PointSeries { points })
}

fn completion_time(task: &Task) -> Result<OffsetDateTime, AppError> {
    OffsetDateTime::parse(&task.expected_complete_time, &Rfc3339).map_err(|_| {
        AppError::invalid_data(format!(
            "task {}: expectedCompleteTime must be RFC3339",
            task.id
        ))
    })
}
