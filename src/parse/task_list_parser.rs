use crate::model::task::{Priority, Task};
use crate::model::task_list::TaskList;
use crate::parse::{HEADER, ParseError, unescape_value};

/// A task whose fields are still being collected
#[derive(Default)]
struct PendingTask {
    line: usize,
    id: usize,
    note: Option<String>,
    priority: Option<Priority>,
    tags: Option<String>,
}

impl PendingTask {
    fn finish(self) -> Result<Task, ParseError> {
        let missing = |key: &str| ParseError::new(self.line, format!("task `{}` has no {}", self.id, key));
        let note = self.note.clone().ok_or_else(|| missing("note"))?;
        let priority = self.priority.ok_or_else(|| missing("priority"))?;
        let tags = self.tags.clone().ok_or_else(|| missing("tags"))?;
        Ok(Task::new(self.id, note, priority, tags))
    }
}

/// Parse a `.tsk` file back into a task list.
///
/// Field lines under a task may appear in any order. Ids must run `1..=N`
/// in file order and agree with the `count` line.
pub fn parse_task_list(source: &str) -> Result<TaskList, ParseError> {
    let mut lines = source
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    match lines.next() {
        Some((_, l)) if l.trim() == HEADER => {}
        Some((n, _)) => return Err(ParseError::new(n, format!("expected `{}`", HEADER))),
        None => return Err(ParseError::new(0, "empty task file")),
    }

    let count = match lines.next() {
        Some((n, l)) => parse_count(n, l)?,
        None => return Err(ParseError::new(0, "missing count line")),
    };

    let mut tasks: Vec<Task> = Vec::new();
    let mut pending: Option<PendingTask> = None;

    for (n, line) in lines {
        if let Some(id_text) = line.strip_prefix("- `").and_then(|r| r.trim_end().strip_suffix('`')) {
            if let Some(done) = pending.take() {
                tasks.push(done.finish()?);
            }
            let id: usize = id_text
                .parse()
                .map_err(|_| ParseError::new(n, format!("bad task id `{}`", id_text)))?;
            let expected = tasks.len() + 1;
            if id != expected {
                return Err(ParseError::new(
                    n,
                    format!("expected task `{}`, found `{}`", expected, id),
                ));
            }
            pending = Some(PendingTask {
                line: n,
                id,
                ..Default::default()
            });
            continue;
        }

        let Some(field) = line.strip_prefix("  - ") else {
            return Err(ParseError::new(n, "unrecognized line"));
        };
        let Some(task) = pending.as_mut() else {
            return Err(ParseError::new(n, "field outside of a task"));
        };
        let (key, raw) = field
            .split_once(':')
            .ok_or_else(|| ParseError::new(n, "expected `key: value`"))?;
        let raw = raw.strip_prefix(' ').unwrap_or(raw);
        let value =
            unescape_value(raw).ok_or_else(|| ParseError::new(n, "invalid escape sequence"))?;

        let duplicate = match key {
            "note" => task.note.replace(value).is_some(),
            "tags" => task.tags.replace(value).is_some(),
            "priority" => {
                let priority = value
                    .parse::<Priority>()
                    .map_err(|e| ParseError::new(n, e.to_string()))?;
                task.priority.replace(priority).is_some()
            }
            other => return Err(ParseError::new(n, format!("unknown field `{}`", other))),
        };
        if duplicate {
            return Err(ParseError::new(n, format!("duplicate field `{}`", key)));
        }
    }

    if let Some(done) = pending.take() {
        tasks.push(done.finish()?);
    }

    if tasks.len() != count {
        return Err(ParseError::new(
            0,
            format!("count says {} tasks but file holds {}", count, tasks.len()),
        ));
    }

    Ok(TaskList::from_tasks(tasks))
}

fn parse_count(line_no: usize, line: &str) -> Result<usize, ParseError> {
    line.trim()
        .strip_prefix("> count:")
        .and_then(|rest| rest.trim().parse().ok())
        .ok_or_else(|| ParseError::new(line_no, "expected `> count: N`"))
}
