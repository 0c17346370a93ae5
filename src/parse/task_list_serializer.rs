use crate::model::task::Task;
use crate::model::task_list::TaskList;
use crate::parse::{HEADER, escape_value};

/// Serialize a task list to the `.tsk` text format.
///
/// ```text
/// # Task List
///
/// > count: 1
///
/// - `1`
///   - note: Fix bug
///   - priority: high
///   - tags: work,urgent
/// ```
pub fn serialize_task_list(list: &TaskList) -> String {
    let mut lines = vec![
        HEADER.to_string(),
        String::new(),
        format!("> count: {}", list.next_id()),
        String::new(),
    ];
    for task in list.tasks() {
        serialize_task(task, &mut lines);
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn serialize_task(task: &Task, lines: &mut Vec<String>) {
    lines.push(format!("- `{}`", task.id));
    lines.push(field_line("note", &task.note));
    lines.push(field_line("priority", task.priority.keyword()));
    lines.push(field_line("tags", &task.tags));
}

fn field_line(key: &str, value: &str) -> String {
    if value.is_empty() {
        format!("  - {}:", key)
    } else {
        format!("  - {}: {}", key, escape_value(value))
    }
}
