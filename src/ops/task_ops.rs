use tracing::debug;

use crate::model::task::{Priority, Task};
use crate::model::task_list::TaskList;

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(usize),
    #[error("{0:?} is not a task number")]
    InvalidId(String),
    #[error("invalid priority: {0:?} (expected low, medium or high)")]
    InvalidPriority(String),
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Append a new task to the end of the list.
/// Returns the stored task with its assigned id.
pub fn add_task(list: &mut TaskList, note: String, priority: Priority, tags: String) -> Task {
    let task = list.push(Task::new(0, note, priority, tags)).clone();
    debug!(id = task.id, priority = %task.priority, "added task");
    task
}

/// Look up a task by id.
pub fn find_task(list: &TaskList, id: usize) -> Result<&Task, TaskError> {
    list.tasks()
        .iter()
        .find(|t| t.id == id)
        .ok_or(TaskError::NotFound(id))
}

/// Remove a task and renumber everything after it.
/// Returns the removed task (carrying its pre-removal id).
pub fn delete_task(list: &mut TaskList, id: usize) -> Result<Task, TaskError> {
    let idx = list.position(id).ok_or(TaskError::NotFound(id))?;
    let removed = list.remove_at(idx);
    debug!(id, remaining = list.len(), "deleted task and renumbered");
    Ok(removed)
}

/// Overwrite a task's note, priority and tags. The id is left untouched.
pub fn modify_task(
    list: &mut TaskList,
    id: usize,
    note: String,
    priority: Priority,
    tags: String,
) -> Result<&Task, TaskError> {
    let idx = list.position(id).ok_or(TaskError::NotFound(id))?;
    let task = list.get_mut(idx).ok_or(TaskError::NotFound(id))?;
    task.note = note;
    task.priority = priority;
    task.tags = tags;
    debug!(id, priority = %task.priority, "modified task");
    Ok(&*task)
}

/// Validate a user-typed task number against the list.
///
/// Accepts only plain decimal digits naming an existing task.
pub fn parse_id(list: &TaskList, text: &str) -> Result<usize, TaskError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(TaskError::InvalidId(text.to_string()));
    }
    let id: usize = trimmed
        .parse()
        .map_err(|_| TaskError::InvalidId(text.to_string()))?;
    if id == 0 || id > list.len() {
        return Err(TaskError::NotFound(id));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> TaskList {
        let mut list = TaskList::new();
        add_task(&mut list, "Buy milk".into(), Priority::Low, "errand".into());
        add_task(&mut list, "Fix bug".into(), Priority::High, "work,urgent".into());
        list
    }

    fn ids(list: &TaskList) -> Vec<usize> {
        list.tasks().iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_add_task_assigns_sequential_ids() {
        let list = sample_list();
        assert_eq!(ids(&list), vec![1, 2]);
        assert_eq!(list.tasks()[0].note, "Buy milk");
        assert_eq!(list.tasks()[1].note, "Fix bug");
        assert_eq!(list.next_id(), 2);
    }

    #[test]
    fn test_add_task_stores_verbatim() {
        let mut list = TaskList::new();
        let task = add_task(&mut list, String::new(), Priority::Medium, "  a, b ".into());
        assert_eq!(task.id, 1);
        assert_eq!(task.note, "");
        assert_eq!(task.tags, "  a, b ");
    }

    #[test]
    fn test_find_task() {
        let list = sample_list();
        assert_eq!(find_task(&list, 2).unwrap().note, "Fix bug");
        assert!(matches!(find_task(&list, 3), Err(TaskError::NotFound(3))));
        assert!(matches!(find_task(&list, 0), Err(TaskError::NotFound(0))));
    }

    #[test]
    fn test_delete_first_task_renumbers() {
        let mut list = sample_list();
        let removed = delete_task(&mut list, 1).unwrap();
        assert_eq!(removed.note, "Buy milk");
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].id, 1);
        assert_eq!(list.tasks()[0].note, "Fix bug");
        assert_eq!(list.next_id(), 1);
    }

    #[test]
    fn test_delete_middle_task_shifts_later_ids() {
        let mut list = TaskList::new();
        for note in ["a", "b", "c", "d"] {
            add_task(&mut list, note.into(), Priority::Low, String::new());
        }
        delete_task(&mut list, 2).unwrap();
        let pairs: Vec<(usize, &str)> = list
            .tasks()
            .iter()
            .map(|t| (t.id, t.note.as_str()))
            .collect();
        assert_eq!(pairs, vec![(1, "a"), (2, "c"), (3, "d")]);
    }

    #[test]
    fn test_delete_missing_task_leaves_list_untouched() {
        let mut list = sample_list();
        let before = list.clone();
        assert!(matches!(
            delete_task(&mut list, 5),
            Err(TaskError::NotFound(5))
        ));
        assert_eq!(list, before);
    }

    #[test]
    fn test_ids_stay_dense_across_mixed_operations() {
        let mut list = TaskList::new();
        let ops: &[(bool, usize)] = &[
            (true, 0),
            (true, 0),
            (true, 0),
            (false, 2),
            (true, 0),
            (false, 1),
            (false, 2),
            (true, 0),
            (false, 1),
        ];
        for &(is_add, id) in ops {
            if is_add {
                add_task(&mut list, "x".into(), Priority::Low, String::new());
            } else {
                delete_task(&mut list, id).unwrap();
            }
            let expected: Vec<usize> = (1..=list.len()).collect();
            assert_eq!(ids(&list), expected);
            assert_eq!(list.next_id(), list.len());
        }
    }

    #[test]
    fn test_add_after_delete_uses_count_plus_one() {
        let mut list = sample_list();
        delete_task(&mut list, 1).unwrap();
        let task = add_task(&mut list, "Call mom".into(), Priority::Medium, String::new());
        assert_eq!(task.id, 2);
    }

    #[test]
    fn test_modify_task() {
        let mut list = sample_list();
        let task = modify_task(&mut list, 2, "Fix bug ASAP".into(), Priority::Medium, "work".into())
            .unwrap();
        assert_eq!(task.id, 2);
        assert_eq!(task.note, "Fix bug ASAP");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.tags, "work");
        assert_eq!(list.tasks()[0].note, "Buy milk");
    }

    #[test]
    fn test_modify_missing_task() {
        let mut list = sample_list();
        let err = modify_task(&mut list, 9, "x".into(), Priority::Low, String::new()).unwrap_err();
        assert!(matches!(err, TaskError::NotFound(9)));
    }

    #[test]
    fn test_parse_id() {
        let list = sample_list();
        assert_eq!(parse_id(&list, "1").unwrap(), 1);
        assert_eq!(parse_id(&list, " 2 ").unwrap(), 2);
        assert!(matches!(parse_id(&list, "3"), Err(TaskError::NotFound(3))));
        assert!(matches!(parse_id(&list, "0"), Err(TaskError::NotFound(0))));
        assert!(matches!(parse_id(&list, "-1"), Err(TaskError::InvalidId(_))));
        assert!(matches!(parse_id(&list, "one"), Err(TaskError::InvalidId(_))));
        assert!(matches!(parse_id(&list, ""), Err(TaskError::InvalidId(_))));
    }
}
