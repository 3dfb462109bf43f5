//! Task model: a named activity with a due timestamp.

use crate::time::DueDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Core task type.
///
/// Names are not required to be unique. A task is never mutated after it is
/// created; the store only hands out shared references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub due: DueDateTime,
}

impl Task {
    pub fn new(name: impl Into<String>, due: DueDateTime) -> Self {
        Self {
            name: name.into(),
            due,
        }
    }
}

/// Renders as `Name (Due: YYYY-MM-DD HH:MM)`, the listing format.
impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Due: {})", self.name, self.due)
    }
}
