mod task;

pub use task::{Member, Task, TaskStatus};
