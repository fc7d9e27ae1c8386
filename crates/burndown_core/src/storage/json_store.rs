use crate::error::AppError;
use crate::model::Task;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
const SNAPSHOT_FILE_NAME: &str = "workspace.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredSnapshot {
    schema_version: u32,
    created_at: String,
    tasks: Vec<Task>,
}

/// Local copy of the remote workspace: creation time plus the task list as
/// last fetched. Read-only as far as the charts are concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceSnapshot {
    pub created_at: String,
    pub tasks: Vec<Task>,
}

pub fn snapshot_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var("BURNDOWN_SNAPSHOT_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("burndown")
            .join(SNAPSHOT_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("burndown")
            .join(SNAPSHOT_FILE_NAME))
    }
}

pub fn load_snapshot(path: &Path) -> Result<WorkspaceSnapshot, AppError> {
    // No snapshot means nothing to chart; there is no sensible default
    // because the workspace creation time cannot be invented.
    if !path.exists() {
        return Err(AppError::io(format!(
            "no workspace snapshot at {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|err| AppError::io(err.to_string()))?;
    let stored: StoredSnapshot =
        serde_json::from_str(&content).map_err(|err| AppError::invalid_data(err.to_string()))?;

    if !(1..=SCHEMA_VERSION).contains(&stored.schema_version) {
        return Err(AppError::invalid_data("schema_version mismatch"));
    }

    Ok(WorkspaceSnapshot {
        created_at: stored.created_at,
        tasks: stored.tasks,
    })
}

pub fn save_snapshot(path: &Path, snapshot: &WorkspaceSnapshot) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let stored = StoredSnapshot {
        schema_version: SCHEMA_VERSION,
        created_at: snapshot.created_at.clone(),
        tasks: snapshot.tasks.to_vec(),
    };
    let content = serde_json::to_string_pretty(&stored)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| AppError::io(err.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions).map_err(|err| AppError::io(err.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{SCHEMA_VERSION, WorkspaceSnapshot, load_snapshot, save_snapshot};
    use crate::model::{Task, TaskStatus};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("burndown-{nanos}-{file_name}"))
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = temp_path("workspace.json");
        let snapshot = WorkspaceSnapshot {
            created_at: "2023-12-01T00:00:00Z".to_string(),
            tasks: vec![Task {
                id: "task-1".to_string(),
                title: "demo".to_string(),
                status: TaskStatus::Done,
                task_points: 3,
                expected_complete_time: "2023-12-02T00:00:00Z".to_string(),
                task_member_assigned: None,
            }],
        };

        save_snapshot(&path, &snapshot).unwrap();
        let loaded = load_snapshot(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn missing_snapshot_is_an_error() {
        let path = temp_path("missing.json");

        let err = load_snapshot(&path).unwrap_err();

        assert_eq!(err.code(), "io_error");
    }

    #[test]
    fn accepts_tasks_without_assignee() {
        let path = temp_path("unassigned.json");
        let content = "{\n  \"schema_version\": 1,\n  \"created_at\": \"2023-12-01T00:00:00Z\",\n  \"tasks\": [\n    {\n      \"id\": \"task-1\",\n      \"title\": \"demo\",\n      \"status\": \"Done\",\n      \"taskPoints\": 3,\n      \"expectedCompleteTime\": \"2023-12-02T00:00:00Z\"\n    }\n  ]\n}";
        fs::write(&path, content).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.tasks[0].status, TaskStatus::Done);
        assert_eq!(loaded.tasks[0].task_points, 3);
        assert!(loaded.tasks[0].task_member_assigned.is_none());
    }

    #[test]
    fn reads_wire_format_status_names() {
        let path = temp_path("statuses.json");
        let content = "{\n  \"schema_version\": 1,\n  \"created_at\": \"2023-12-01T00:00:00Z\",\n  \"tasks\": [\n    {\n      \"id\": \"task-1\",\n      \"title\": \"a\",\n      \"status\": \"Not Started\",\n      \"taskPoints\": 1,\n      \"expectedCompleteTime\": \"2023-12-02T00:00:00Z\"\n    },\n    {\n      \"id\": \"task-2\",\n      \"title\": \"b\",\n      \"status\": \"In Progress\",\n      \"taskPoints\": 1,\n      \"expectedCompleteTime\": \"2023-12-02T00:00:00Z\"\n    }\n  ]\n}";
        fs::write(&path, content).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.tasks[0].status, TaskStatus::NotStarted);
        assert_eq!(loaded.tasks[1].status, TaskStatus::InProgress);
    }

    #[test]
    fn rejects_negative_task_points() {
        let path = temp_path("bad-points.json");
        let content = "{\n  \"schema_version\": 1,\n  \"created_at\": \"2023-12-01T00:00:00Z\",\n  \"tasks\": [\n    {\n      \"id\": \"task-1\",\n      \"title\": \"demo\",\n      \"status\": \"Done\",\n      \"taskPoints\": -2,\n      \"expectedCompleteTime\": \"2023-12-02T00:00:00Z\"\n    }\n  ]\n}";
        fs::write(&path, content).unwrap();

        let err = load_snapshot(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert_eq!(err.code(), "invalid_data");
    }

    #[test]
    fn schema_version_must_match() {
        let path = temp_path("bad-schema.json");
        let bad = format!(
            "{{\n  \"schema_version\": {},\n  \"created_at\": \"2023-12-01T00:00:00Z\",\n  \"tasks\": []\n}}",
            SCHEMA_VERSION + 1
        );
        fs::write(&path, bad).unwrap();

        let err = load_snapshot(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert_eq!(err.code(), "invalid_data");
    }
}
