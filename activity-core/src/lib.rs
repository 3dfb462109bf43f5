//! activity-core: task model, due-date parsing and the ordered task store
//! behind the Activity logger console.

pub mod store;
pub mod task;
pub mod time;

pub use store::{StoreError, TaskStore};
pub use task::Task;
pub use time::{DueDateTime, ParsedFields, parse_due_datetime};
