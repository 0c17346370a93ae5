use serde::Serialize;

use crate::model::task::{Priority, Task};
use crate::ops::search::{MatchField, PriorityBuckets};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: usize,
    pub note: String,
    pub priority: Priority,
    pub tags: String,
}

#[derive(Serialize)]
pub struct PriorityBucketsJson {
    pub high: Vec<TaskJson>,
    pub medium: Vec<TaskJson>,
    pub low: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    #[serde(flatten)]
    pub task: TaskJson,
    pub fields: Vec<&'static str>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        note: task.note.clone(),
        priority: task.priority,
        tags: task.tags.clone(),
    }
}

pub fn buckets_to_json(buckets: &PriorityBuckets<'_>) -> PriorityBucketsJson {
    let convert = |tasks: &[&Task]| -> Vec<TaskJson> { tasks.iter().map(|t| task_to_json(t)).collect() };
    PriorityBucketsJson {
        high: convert(buckets.high.as_slice()),
        medium: convert(buckets.medium.as_slice()),
        low: convert(buckets.low.as_slice()),
    }
}

pub fn search_hit_to_json(task: &Task, fields: &[MatchField]) -> SearchHitJson {
    SearchHitJson {
        task: task_to_json(task),
        fields: fields
            .iter()
            .map(|f| match f {
                MatchField::Note => "note",
                MatchField::Tags => "tags",
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format one task with its priority and tags
pub fn format_task(task: &Task) -> String {
    format!(
        "{}: {}\n\tPriority: {}\n\tTags: {}",
        task.id, task.note, task.priority, task.tags
    )
}

/// Format tasks in id order
pub fn format_task_list<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> String {
    let lines: Vec<String> = tasks.into_iter().map(format_task).collect();
    if lines.is_empty() {
        "There are no tasks to display!".to_string()
    } else {
        lines.join("\n")
    }
}

/// Format tasks grouped under High, Medium and Low headers
pub fn format_by_priority(buckets: &PriorityBuckets<'_>) -> String {
    let sections: Vec<String> = buckets
        .iter()
        .map(|(priority, tasks)| {
            let mut lines = vec![priority.to_string(), "-".repeat(20)];
            if tasks.is_empty() {
                lines.push(format!("There are no {} priority tasks", priority.keyword()));
            }
            for task in tasks {
                lines.push(format!("{}: {}\n\tTags: {}", task.id, task.note, task.tags));
            }
            lines.join("\n")
        })
        .collect();
    sections.join("\n\n")
}

/// Message shown when a search finds nothing
pub fn format_no_matches(query: &str) -> String {
    format!("There were no tasks containing \"{}\".", query)
}
