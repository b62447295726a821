pub mod ordering;
pub mod tag;
pub mod task;
pub mod task_list;
