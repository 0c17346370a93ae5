use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ops::task_ops::TaskError;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Lowercase keyword used in task files and on the command line
    pub fn keyword(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    /// Parse `low`/`medium`/`high`, ignoring case and surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(TaskError::InvalidPriority(s.to_string())),
        }
    }
}

/// A single tracked to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Position-derived identifier, 1-based and dense within its list
    pub id: usize,
    /// Free-text description
    pub note: String,
    pub priority: Priority,
    /// Opaque tag text, stored verbatim
    pub tags: String,
}

impl Task {
    pub fn new(id: usize, note: String, priority: Priority, tags: String) -> Self {
        Task {
            id,
            note,
            priority,
            tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_str_ignores_case() {
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("Medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!(" HIGH ".parse::<Priority>().unwrap(), Priority::High);
    }

    #[test]
    fn test_priority_from_str_rejects_unknown() {
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert!(matches!(err, TaskError::InvalidPriority(ref p) if p == "urgent"));
    }

    #[test]
    fn test_priority_display_and_keyword() {
        assert_eq!(Priority::High.to_string(), "High");
        assert_eq!(Priority::High.keyword(), "high");
    }
}
