pub mod task;
pub mod task_stats;

// Re-export core models for easy access
pub use task::{
    priority_weight, Category, NewTask, OwnerId, Priority, Task, TaskFields, TaskId, UnknownVariant,
};
pub use task_stats::TaskStats;
