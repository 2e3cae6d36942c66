//! Фильтрация задач для таблицы и счётчиков

use std::collections::BTreeSet;

use crate::preprocessing::dates::parse_due_date;
use crate::types::{FilterSpec, Task};

/// Отдельные условия фильтра. Порядок применения на результат не влияет.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPredicate {
    Status,
    Priority,
    Tags,
    DateRange,
}

impl FilterPredicate {
    pub const ALL: [FilterPredicate; 4] = [
        FilterPredicate::Status,
        FilterPredicate::Priority,
        FilterPredicate::Tags,
        FilterPredicate::DateRange,
    ];

    pub fn matches(&self, task: &Task, filter: &FilterSpec) -> bool {
        match self {
            FilterPredicate::Status => filter.status.map_or(true, |status| task.status == Some(status)),
            FilterPredicate::Priority => filter.priority.map_or(true, |priority| task.priority == Some(priority)),
            FilterPredicate::Tags => filter.tags.is_empty() || filter.tags.iter().any(|tag| task.tags.contains(tag)),
            FilterPredicate::DateRange => matches_date_range(task, filter),
        }
    }
}

/// Без границ дат задача проходит всегда. С любой границей задача без
/// распознаваемого срока отбрасывается.
fn matches_date_range(task: &Task, filter: &FilterSpec) -> bool {
    if !filter.has_date_bound() {
        return true;
    }

    let Some(date) = task.due_date.as_deref().and_then(parse_due_date) else {
        return false;
    };

    filter.date_from.map_or(true, |from| date >= from) && filter.date_to.map_or(true, |to| date <= to)
}

pub fn matches_filter(task: &Task, filter: &FilterSpec) -> bool {
    FilterPredicate::ALL.iter().all(|predicate| predicate.matches(task, filter))
}

pub fn apply_filters(tasks: &[Task], filter: &FilterSpec) -> Vec<Task> {
    tasks.iter().filter(|task| matches_filter(task, filter)).cloned().collect()
}

/// Уникальные непустые теги по всем задачам, для выбора в фильтре
pub fn available_tags(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .flat_map(|task| task.tags.iter())
        .filter(|tag| !tag.trim().is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TaskPriority, TaskStatus};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new("1", "Informe", TaskStatus::Pending, TaskPriority::High)
                .with_due_date("2024-03-01")
                .with_tags(["work"]),
            Task::new("2", "Gym", TaskStatus::Completed, TaskPriority::Low)
                .with_due_date("05-03-2024")
                .with_tags(["health", "personal"]),
            Task::new("3", "Read", TaskStatus::Pending, TaskPriority::Medium).with_tags(["personal"]),
            Task::new("4", "Taxes", TaskStatus::InProgress, TaskPriority::High).with_due_date("someday"),
        ]
    }

    #[test]
    fn default_filter_keeps_everything() {
        let tasks = sample_tasks();
        assert_eq!(apply_filters(&tasks, &FilterSpec::default()), tasks);
    }

    #[test]
    fn status_and_priority_narrow() {
        let filter = FilterSpec {
            status: Some(TaskStatus::Pending),
            priority: Some(TaskPriority::High),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply_filters(&sample_tasks(), &filter)), vec!["1"]);
    }

    #[test]
    fn tags_match_any_requested() {
        let filter = FilterSpec {
            tags: ["personal", "work"].into_iter().map(String::from).collect(),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply_filters(&sample_tasks(), &filter)), vec!["1", "2", "3"]);
    }

    #[test]
    fn date_range_is_inclusive_and_drops_undated() {
        let filter = FilterSpec {
            date_from: Some(date(2024, 3, 1)),
            date_to: Some(date(2024, 3, 5)),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply_filters(&sample_tasks(), &filter)), vec!["1", "2"]);

        let filter = FilterSpec {
            date_from: Some(date(2024, 3, 2)),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply_filters(&sample_tasks(), &filter)), vec!["2"]);
    }

    #[test]
    fn available_tags_are_unique_and_sorted() {
        let mut tasks = sample_tasks();
        tasks.push(Task::new("5", "Blank", TaskStatus::Pending, TaskPriority::Low).with_tags(["", "work"]));

        assert_eq!(available_tags(&tasks), vec!["health", "personal", "work"]);
        assert!(available_tags(&[]).is_empty());
    }

    fn arb_status() -> impl Strategy<Value = TaskStatus> {
        prop::sample::select(TaskStatus::ALL.to_vec())
    }

    fn arb_priority() -> impl Strategy<Value = TaskPriority> {
        prop::sample::select(TaskPriority::ALL.to_vec())
    }

    fn arb_due_date() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("garbage".to_string())),
            (1u32..=28, 1u32..=12).prop_map(|(d, m)| Some(format!("2024-{m:02}-{d:02}"))),
            (1u32..=28, 1u32..=12).prop_map(|(d, m)| Some(format!("{d:02}-{m:02}-2024"))),
        ]
    }

    fn arb_tags() -> impl Strategy<Value = BTreeSet<String>> {
        prop::collection::btree_set(prop::sample::select(vec!["a", "b", "c"]).prop_map(String::from), 0..3)
    }

    fn arb_task() -> impl Strategy<Value = Task> {
        (0u32..1000, arb_status(), arb_priority(), arb_due_date(), arb_tags()).prop_map(
            |(id, status, priority, due_date, tags)| Task {
                id: id.to_string(),
                title: format!("task {id}"),
                status: Some(status),
                priority: Some(priority),
                due_date,
                tags,
                completed: status == TaskStatus::Completed,
            },
        )
    }

    fn arb_bound() -> impl Strategy<Value = Option<NaiveDate>> {
        prop::option::of((1u32..=28, 1u32..=12).prop_map(|(d, m)| date(2024, m, d)))
    }

    fn arb_filter() -> impl Strategy<Value = FilterSpec> {
        (
            prop::option::of(arb_status()),
            prop::option::of(arb_priority()),
            arb_tags(),
            arb_bound(),
            arb_bound(),
        )
            .prop_map(|(status, priority, tags, date_from, date_to)| FilterSpec {
                status,
                priority,
                tags,
                date_from,
                date_to,
            })
    }

    fn apply_in_order(tasks: &[Task], filter: &FilterSpec, order: &[FilterPredicate]) -> Vec<Task> {
        order.iter().fold(tasks.to_vec(), |remaining, predicate| {
            remaining.into_iter().filter(|t| predicate.matches(t, filter)).collect()
        })
    }

    proptest! {
        /// Любая перестановка условий даёт тот же набор
        #[test]
        fn predicates_commute(
            tasks in prop::collection::vec(arb_task(), 0..30),
            filter in arb_filter(),
            order in Just(FilterPredicate::ALL.to_vec()).prop_shuffle(),
        ) {
            let expected = apply_filters(&tasks, &filter);
            prop_assert_eq!(apply_in_order(&tasks, &filter, &order), expected);
        }

        /// Задача без срока проходит без границ дат и отсекается любой границей
        #[test]
        fn undated_tasks_follow_bound_asymmetry(
            raw in prop_oneof![Just(None), Just(Some(String::new())), Just(Some("n/a".to_string()))],
            from in arb_bound(),
            to in arb_bound(),
        ) {
            let mut task = Task::new("x", "undated", TaskStatus::Pending, TaskPriority::Low);
            task.due_date = raw;
            let filter = FilterSpec { date_from: from, date_to: to, ..FilterSpec::default() };

            prop_assert_eq!(matches_filter(&task, &filter), !filter.has_date_bound());
        }
    }
}
