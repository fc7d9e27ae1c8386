pub mod chart;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::{Task, TaskStatus};

    #[test]
    fn task_has_required_fields() {
        let task = Task {
            id: "task-1".to_string(),
            title: "demo".to_string(),
            status: TaskStatus::Done,
            task_points: 3,
            expected_complete_time: "2023-12-02T00:00:00Z".to_string(),
            task_member_assigned: None,
        };

        assert_eq!(task.id, "task-1");
        assert_eq!(task.title, "demo");
        assert!(task.status.is_done());
        assert_eq!(task.task_points, 3);
        assert!(task.task_member_assigned.is_none());
    }

    #[test]
    fn task_uses_api_wire_names() {
        let json = serde_json::json!({
            "id": "task-1",
            "title": "demo",
            "status": "In Progress",
            "taskPoints": 2,
            "expectedCompleteTime": "2023-12-02T00:00:00Z",
            "taskMemberAssigned": { "name": "Ana", "email": "ana@example.com" }
        });

        let task: Task = serde_json::from_value(json).unwrap();

        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.task_points, 2);
        assert_eq!(
            task.task_member_assigned.unwrap().email,
            "ana@example.com"
        );
    }

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::invalid_input("missing member email");
        assert_eq!(err.code(), "invalid_input");
    }
}
