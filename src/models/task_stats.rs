//! Счётчики задач по статусам, приоритетам и временным сегментам

use std::collections::BTreeMap;

use crate::preprocessing::parse_due_date;
use crate::types::{
    PrioritySlice, StatsResult, StatusSlice, Task, TaskPriority, TaskStatus, TimeSegment, SEGMENT_COUNT,
};

const COLOR_RED: &str = "#FF6B6B";
const COLOR_YELLOW: &str = "#FFD93D";
const COLOR_GREEN: &str = "#6BCB77";

pub fn compute_task_stats(tasks: &[Task], segments: &[TimeSegment; SEGMENT_COUNT]) -> StatsResult {
    let mut status_counts: BTreeMap<TaskStatus, usize> = TaskStatus::ALL.iter().map(|s| (*s, 0)).collect();
    let mut priority_counts: BTreeMap<TaskPriority, usize> = TaskPriority::ALL.iter().map(|p| (*p, 0)).collect();
    let mut pending_per_segment = [0usize; SEGMENT_COUNT];
    let mut completed_per_segment = [0usize; SEGMENT_COUNT];
    let mut completed_flag_count = 0;

    let current = &segments[SEGMENT_COUNT - 1];

    for task in tasks {
        if let Some(status) = task.status {
            *status_counts.entry(status).or_insert(0) += 1;
        }
        if task.completed {
            completed_flag_count += 1;
        }

        // Задачи без распознаваемого срока в сегменты не попадают
        let Some(date) = task.due_date.as_deref().and_then(parse_due_date) else {
            continue;
        };

        for (idx, segment) in segments.iter().enumerate() {
            if !segment.contains(date) {
                continue;
            }
            match task.status {
                Some(TaskStatus::Pending) => pending_per_segment[idx] += 1,
                Some(TaskStatus::Completed) => completed_per_segment[idx] += 1,
                Some(TaskStatus::InProgress) | None => {}
            }
        }

        // Приоритеты считаем только для текущего периода
        if let Some(priority) = task.priority.filter(|_| current.contains(date)) {
            *priority_counts.entry(priority).or_insert(0) += 1;
        }
    }

    let total_tasks = tasks.len();
    let completed = status_counts.get(&TaskStatus::Completed).copied().unwrap_or(0);

    StatsResult {
        status_counts,
        priority_counts,
        pending_per_segment,
        completed_per_segment,
        segments: segments.clone(),
        total_tasks,
        completion_rate: percent(completed, total_tasks),
        completed_flag_count,
    }
}

/// Доли статусов для круговой диаграммы, нулевые статусы пропускаются
pub fn status_slices(stats: &StatsResult) -> Vec<StatusSlice> {
    TaskStatus::ALL
        .iter()
        .map(|status| (*status, stats.status_counts.get(status).copied().unwrap_or(0)))
        .filter(|(_, count)| *count > 0)
        .map(|(status, count)| StatusSlice {
            status,
            label: status.label().to_string(),
            count,
            percent: percent(count, stats.total_tasks),
            color: status_color(status).to_string(),
        })
        .collect()
}

pub fn priority_slices(stats: &StatsResult) -> Vec<PrioritySlice> {
    [TaskPriority::High, TaskPriority::Medium, TaskPriority::Low]
        .into_iter()
        .map(|priority| PrioritySlice {
            priority,
            label: priority.label().to_string(),
            count: stats.priority_counts.get(&priority).copied().unwrap_or(0),
            color: priority_color(priority).to_string(),
        })
        .collect()
}

fn status_color(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => COLOR_RED,
        TaskStatus::InProgress => COLOR_YELLOW,
        TaskStatus::Completed => COLOR_GREEN,
    }
}

fn priority_color(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::High => COLOR_RED,
        TaskPriority::Medium => COLOR_YELLOW,
        TaskPriority::Low => COLOR_GREEN,
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
