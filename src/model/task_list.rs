use super::task::Task;

/// An ordered, in-memory list of tasks.
///
/// Task ids always equal `1..=len` in sequence order. The list owns its own
/// id counter; all mutation goes through `ops::task_ops` so that the counter
/// and the ids stay in step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: usize,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from tasks read back from storage, renumbering them by
    /// position and resetting the counter to the loaded count.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut list = TaskList { tasks, next_id: 0 };
        list.renumber();
        list
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The number of tasks ever active in this list since it was created or
    /// loaded; equal to `len()` after every operation.
    pub fn next_id(&self) -> usize {
        self.next_id
    }

    pub(crate) fn push(&mut self, mut task: Task) -> &Task {
        self.next_id += 1;
        task.id = self.next_id;
        self.tasks.push(task);
        &self.tasks[self.tasks.len() - 1]
    }

    pub(crate) fn position(&self, id: usize) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut Task> {
        self.tasks.get_mut(idx)
    }

    /// Remove the task at `idx` and renumber the survivors in one step.
    pub(crate) fn remove_at(&mut self, idx: usize) -> Task {
        let task = self.tasks.remove(idx);
        self.renumber();
        task
    }

    /// Reassign ids `1..=N` by current position and sync the counter.
    fn renumber(&mut self) {
        for (i, task) in self.tasks.iter_mut().enumerate() {
            task.id = i + 1;
        }
        self.next_id = self.tasks.len();
    }
}
