pub mod fuzzy;
pub mod input;
pub mod model;
pub mod service;
pub mod time;

pub use fuzzy::levenshtein;
pub use input::{parse_add_line, AddLine};
pub use model::ordering::{sort_tasks, CompletedPlacement};
pub use model::tag::{Tag, TagColor, TagSet};
pub use model::task::{Task, TaskId};
pub use model::task_list::{TaskList, TaskListError};
pub use service::dto::TaskRow;
pub use service::session::{Mode, Session, SessionError};
pub use time::{parse_human_date, suggest_due};
