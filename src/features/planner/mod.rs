//! Study planner and class schedule.

pub mod schedule;
pub mod tasks;

pub use schedule::{classes_on, sort_classes, ClassForm};
pub use tasks::{
    deadline_status, filter_tasks, is_overdue, DeadlineStatus, TaskCounts, TaskFilter, TaskForm,
};
