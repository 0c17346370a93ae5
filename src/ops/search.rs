use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::model::task::{Priority, Task};
use crate::model::task_list::TaskList;

/// Which field of a task matched a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Note,
    Tags,
}

/// Case-insensitive literal matcher for a query.
///
/// Queries too large for the regex size limit fall back to comparing
/// lowercased text.
enum Matcher {
    Pattern(Regex),
    Folded(String),
}

impl Matcher {
    fn new(query: &str) -> Self {
        match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => Matcher::Pattern(re),
            Err(e) => {
                debug!(len = query.len(), error = %e, "query too large for regex, using folded compare");
                Matcher::Folded(query.to_lowercase())
            }
        }
    }

    fn is_match(&self, text: &str) -> bool {
        match self {
            Matcher::Pattern(re) => re.is_match(text),
            Matcher::Folded(query) => text.to_lowercase().contains(query.as_str()),
        }
    }
}

/// Fields of `task` that contain the query, note first.
fn matching_fields(matcher: &Matcher, task: &Task) -> Vec<MatchField> {
    let mut fields = Vec::new();
    if matcher.is_match(&task.note) {
        fields.push(MatchField::Note);
    }
    if matcher.is_match(&task.tags) {
        fields.push(MatchField::Tags);
    }
    fields
}

/// Tasks whose note or tags contain `query`, ignoring case, in list order.
///
/// No match is not an error: the result is simply empty.
pub fn search<'a>(list: &'a TaskList, query: &str) -> Vec<&'a Task> {
    search_with_fields(list, query)
        .into_iter()
        .map(|(task, _)| task)
        .collect()
}

/// Like [`search`], but also reports which fields matched for each task.
pub fn search_with_fields<'a>(list: &'a TaskList, query: &str) -> Vec<(&'a Task, Vec<MatchField>)> {
    let matcher = Matcher::new(query);
    list.tasks()
        .iter()
        .filter_map(|task| {
            let fields = matching_fields(&matcher, task);
            if fields.is_empty() {
                None
            } else {
                Some((task, fields))
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Priority grouping
// ---------------------------------------------------------------------------

/// Tasks partitioned by priority, each bucket in list order
#[derive(Debug, Default)]
pub struct PriorityBuckets<'a> {
    pub high: Vec<&'a Task>,
    pub medium: Vec<&'a Task>,
    pub low: Vec<&'a Task>,
}

impl<'a> PriorityBuckets<'a> {
    /// Buckets paired with their priority, highest first
    pub fn iter(&self) -> impl Iterator<Item = (Priority, &[&'a Task])> {
        [
            (Priority::High, self.high.as_slice()),
            (Priority::Medium, self.medium.as_slice()),
            (Priority::Low, self.low.as_slice()),
        ]
        .into_iter()
    }
}

/// Group all tasks into High, Medium and Low in a single pass.
pub fn list_by_priority(list: &TaskList) -> PriorityBuckets<'_> {
    let mut buckets = PriorityBuckets::default();
    for task in list.tasks() {
        match task.priority {
            Priority::High => buckets.high.push(task),
            Priority::Medium => buckets.medium.push(task),
            Priority::Low => buckets.low.push(task),
        }
    }
    buckets
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::task_ops::{add_task, modify_task};

    fn sample_list() -> TaskList {
        let mut list = TaskList::new();
        add_task(&mut list, "Buy milk".into(), Priority::Low, "errand".into());
        add_task(&mut list, "Fix bug".into(), Priority::High, "work,urgent".into());
        list
    }

    fn notes(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.note.clone()).collect()
    }

    #[test]
    fn test_search_note_match() {
        let list = sample_list();
        assert_eq!(notes(&search(&list, "bug")), vec!["Fix bug"]);
    }

    #[test]
    fn test_search_no_match_is_empty() {
        let list = sample_list();
        assert!(search(&list, "zzz").is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let list = sample_list();
        assert_eq!(notes(&search(&list, "MILK")), vec!["Buy milk"]);
        assert_eq!(notes(&search(&list, "Urgent")), vec!["Fix bug"]);
    }

    #[test]
    fn test_search_matches_tags_and_keeps_order() {
        let mut list = sample_list();
        add_task(&mut list, "Write report".into(), Priority::Medium, "work".into());
        add_task(&mut list, "Walk dog".into(), Priority::Low, String::new());
        assert_eq!(
            notes(&search(&list, "work")),
            vec!["Fix bug", "Write report"]
        );
    }

    #[test]
    fn test_search_treats_query_literally() {
        let mut list = TaskList::new();
        add_task(&mut list, "Pay bills (rent)".into(), Priority::High, String::new());
        add_task(&mut list, "Pay bills".into(), Priority::High, String::new());
        assert_eq!(notes(&search(&list, "(rent)")), vec!["Pay bills (rent)"]);
        assert!(search(&list, ".*").is_empty());
    }

    #[test]
    fn test_search_with_fields_reports_both() {
        let mut list = TaskList::new();
        add_task(&mut list, "Review work plan".into(), Priority::Low, "work".into());
        let hits = search_with_fields(&list, "work");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].1, vec![MatchField::Note, MatchField::Tags]);
    }

    #[test]
    fn test_search_very_long_query() {
        let mut list = sample_list();
        let long = "a".repeat(1_000_000);
        assert!(search(&list, &long).is_empty());

        add_task(&mut list, format!("x{}x", long.to_uppercase()), Priority::Low, String::new());
        let found = search(&list, &long);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 3);
    }

    #[test]
    fn test_list_by_priority_partitions() {
        let mut list = sample_list();
        add_task(&mut list, "Call mom".into(), Priority::High, String::new());
        add_task(&mut list, "Read book".into(), Priority::Medium, String::new());
        let buckets = list_by_priority(&list);
        assert_eq!(notes(&buckets.high), vec!["Fix bug", "Call mom"]);
        assert_eq!(notes(&buckets.medium), vec!["Read book"]);
        assert_eq!(notes(&buckets.low), vec!["Buy milk"]);

        let mut all: Vec<usize> = buckets
            .iter()
            .flat_map(|(_, tasks)| tasks.iter().map(|t| t.id))
            .collect();
        all.sort_unstable();
        assert_eq!(all, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_list_by_priority_after_modify() {
        let mut list = sample_list();
        modify_task(&mut list, 2, "Fix bug ASAP".into(), Priority::Medium, "work".into()).unwrap();
        let buckets = list_by_priority(&list);
        assert!(buckets.high.is_empty());
        assert_eq!(notes(&buckets.medium), vec!["Fix bug ASAP"]);
        assert_eq!(buckets.medium[0].id, 2);
    }

    #[test]
    fn test_list_by_priority_empty_list() {
        let list = TaskList::new();
        let buckets = list_by_priority(&list);
        assert!(buckets.high.is_empty() && buckets.medium.is_empty() && buckets.low.is_empty());
    }
}
