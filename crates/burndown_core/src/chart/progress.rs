use crate::model::Task;
use std::collections::HashMap;

/// Completed versus total points across the whole task list, the figure
/// behind the dashboard progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSummary {
    pub total_points: u64,
    pub completed_points: u64,
}

impl ProgressSummary {
    /// Whole-number completion percentage; 0 when there are no points at all.
    pub fn percent_complete(&self) -> u64 {
        if self.total_points == 0 {
            0
        } else {
            self.completed_points * 100 / self.total_points
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProgress {
    pub email: String,
    pub name: String,
    pub completed_points: u64,
}

pub fn progress_summary(tasks: &[Task]) -> ProgressSummary {
    let mut summary = ProgressSummary::default();
    for task in tasks {
        summary.total_points += task.task_points;
        if task.status.is_done() {
            summary.completed_points += task.task_points;
        }
    }
    summary
}

/// Completed points per assignee, highest contribution first (ties broken by
/// email so the order is deterministic). Unassigned Done tasks count toward
/// the team total but belong to nobody, so they are skipped here.
pub fn completed_points_by_member(tasks: &[Task]) -> Vec<MemberProgress> {
    let mut totals: HashMap<String, (String, u64)> = HashMap::new();

    for task in tasks {
        if !task.status.is_done() {
            continue;
        }
        let Some(member) = task.task_member_assigned.as_ref() else {
            continue;
        };
        let entry = totals
            .entry(member.email.clone())
            .or_insert_with(|| (member.name.clone(), 0));
        entry.1 += task.task_points;
    }

    let mut members: Vec<MemberProgress> = totals
        .into_iter()
        .map(|(email, (name, completed_points))| MemberProgress {
            email,
            name,
            completed_points,
        })
        .collect();

    members.sort_by(|a, b| {
        b.completed_points
            .cmp(&a.completed_points)
            .then_with(|| a.email.cmp(&b.email))
    });

    members
}

#[cfg(test)]
mod tests {
    use super::{completed_points_by_member, progress_summary};
    use crate::model::{Member, Task, TaskStatus};

    fn task(id: &str, points: u64, status: TaskStatus, email: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            status,
            task_points: points,
            expected_complete_time: "2023-12-02T00:00:00Z".to_string(),
            task_member_assigned: email.map(|email| Member {
                name: email.split('@').next().unwrap().to_string(),
                email: email.to_string(),
            }),
        }
    }

    #[test]
    fn progress_summary_counts_done_points() {
        let tasks = vec![
            task("task-1", 3, TaskStatus::Done, None),
            task("task-2", 5, TaskStatus::InProgress, None),
            task("task-3", 2, TaskStatus::Done, Some("ana@example.com")),
        ];

        let summary = progress_summary(&tasks);

        assert_eq!(summary.total_points, 10);
        assert_eq!(summary.completed_points, 5);
        assert_eq!(summary.percent_complete(), 50);
    }

    #[test]
    fn progress_summary_handles_empty_workspace() {
        let summary = progress_summary(&[]);

        assert_eq!(summary.total_points, 0);
        assert_eq!(summary.percent_complete(), 0);
    }

    #[test]
    fn completed_points_by_member_groups_and_orders() {
        let tasks = vec![
            task("task-1", 3, TaskStatus::Done, Some("ana@example.com")),
            task("task-2", 5, TaskStatus::Done, Some("bo@example.com")),
            task("task-3", 4, TaskStatus::Done, Some("ana@example.com")),
            task("task-4", 9, TaskStatus::InProgress, Some("bo@example.com")),
            task("task-5", 1, TaskStatus::Done, None),
        ];

        let members = completed_points_by_member(&tasks);

        assert_eq!(members.len(), 2);
        assert_eq!(members[0].email, "ana@example.com");
        assert_eq!(members[0].completed_points, 7);
        assert_eq!(members[1].email, "bo@example.com");
        assert_eq!(members[1].completed_points, 5);
    }

    #[test]
    fn completed_points_by_member_breaks_ties_by_email() {
        let tasks = vec![
            task("task-1", 5, TaskStatus::Done, Some("zoe@example.com")),
            task("task-2", 5, TaskStatus::Done, Some("ana@example.com")),
        ];

        let members = completed_points_by_member(&tasks);

        assert_eq!(members[0].email, "ana@example.com");
        assert_eq!(members[1].email, "zoe@example.com");
    }
}
