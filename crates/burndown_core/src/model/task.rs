use serde::{Deserialize, Serialize};

/// Workspace member a task can be assigned to. Members are identified by
/// email; display names are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub email: String,
}

/// Read-only view of a task as the remote workspace API reports it.
/// Field names follow the API's camelCase wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub task_points: u64,
    pub expected_complete_time: String,
    #[serde(default)]
    pub task_member_assigned: Option<Member>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}
