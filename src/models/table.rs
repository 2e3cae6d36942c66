//! Таблица задач: фильтрация, время фокуса, сортировка и пагинация

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::preprocessing::{locale_cmp, matches_filter, parse_due_date};
use crate::types::{FilterSpec, FocusRecord, Page, SortColumn, TableRow, Task};

pub const DEFAULT_PAGE_SIZE: usize = 10;

pub fn build_table(
    tasks: &[Task],
    records: &[FocusRecord],
    filter: &FilterSpec,
    sort_column: SortColumn,
    ascending: bool,
) -> Vec<TableRow> {
    // При повторе task_id побеждает последняя запись
    let focus_by_task: HashMap<&str, u64> = records
        .iter()
        .map(|record| (record.task_id.as_str(), record.total_minutes))
        .collect();

    let mut rows: Vec<TableRow> = tasks
        .iter()
        .filter(|task| matches_filter(task, filter))
        .map(|task| TableRow {
            id: task.id.clone(),
            title: task.title.clone(),
            status: task.status,
            priority: task.priority,
            due_date: task.due_date.clone(),
            focus_minutes: focus_by_task.get(task.id.as_str()).copied().unwrap_or(0),
        })
        .collect();

    sort_rows(&mut rows, sort_column, ascending);
    rows
}

/// Стабильная сортировка, при убывании компаратор просто разворачивается
pub fn sort_rows(rows: &mut [TableRow], column: SortColumn, ascending: bool) {
    rows.sort_by(|a, b| {
        let ordering = compare_rows(a, b, column);
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

fn compare_rows(a: &TableRow, b: &TableRow, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Title => locale_cmp(&a.title, &b.title),
        SortColumn::Status => locale_cmp(status_label(a), status_label(b)),
        SortColumn::Priority => locale_cmp(priority_label(a), priority_label(b)),
        SortColumn::DueDate => compare_due_dates(a.due_date.as_deref(), b.due_date.as_deref()),
        SortColumn::FocusMinutes => a.focus_minutes.cmp(&b.focus_minutes),
    }
}

fn status_label(row: &TableRow) -> &'static str {
    row.status.map_or("", |status| status.label())
}

fn priority_label(row: &TableRow) -> &'static str {
    row.priority.map_or("", |priority| priority.label())
}

/// Даты сравниваются как даты, нераспознанные - как строки и идут после
/// распознанных, иначе порядок не был бы транзитивным.
fn compare_due_dates(a: Option<&str>, b: Option<&str>) -> Ordering {
    let raw_a = a.unwrap_or("");
    let raw_b = b.unwrap_or("");

    match (parse_due_date(raw_a), parse_due_date(raw_b)) {
        (Some(date_a), Some(date_b)) => date_a.cmp(&date_b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => locale_cmp(raw_a, raw_b),
    }
}

pub fn paginate(rows: &[TableRow], page: usize, page_size: usize) -> Page {
    let page_size = page_size.max(1);
    let total_rows = rows.len();
    let total_pages = total_rows.div_ceil(page_size).max(1);

    let from = page.saturating_mul(page_size).min(total_rows);
    let to = from.saturating_add(page_size).min(total_rows);

    Page {
        rows: rows[from..to].to_vec(),
        page,
        from,
        to,
        total_pages,
        total_rows,
    }
}
