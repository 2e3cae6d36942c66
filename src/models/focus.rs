//! Рейтинг задач по времени фокуса

use crate::types::{FocusRanking, FocusRecord, PieSlice};

pub const DEFAULT_TOP_N: usize = 5;
pub const BAR_LABEL_WIDTH: usize = 10;
pub const PIE_LABEL_WIDTH: usize = 12;
pub const FOCUS_PALETTE: [&str; 5] = ["#FFA500", "#00CED1", "#9370DB", "#FF69B4", "#20B2AA"];

const ELLIPSIS: char = '…';

pub fn prepare_focus_ranking(records: &[FocusRecord], top_n: usize) -> FocusRanking {
    // sort_by стабильна: при равенстве сохраняется порядок от бэкенда
    let mut sorted: Vec<&FocusRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.total_minutes.cmp(&a.total_minutes));

    let top: Vec<FocusRecord> = sorted.into_iter().take(top_n).cloned().collect();

    let labels = top
        .iter()
        .enumerate()
        .map(|(idx, record)| display_title(&record.task_title, idx, BAR_LABEL_WIDTH))
        .collect();

    let values: Vec<u64> = top.iter().map(|record| record.total_minutes).collect();

    let pie_slices = top
        .iter()
        .enumerate()
        .map(|(idx, record)| PieSlice {
            name: display_title(&record.task_title, idx, PIE_LABEL_WIDTH),
            minutes: record.total_minutes,
            color: FOCUS_PALETTE[idx % FOCUS_PALETTE.len()].to_string(),
        })
        .collect();

    // Сумма в f64: u64 переполняется на больших значениях
    let total: f64 = values.iter().map(|&minutes| minutes as f64).sum();
    let percentages = values
        .iter()
        .map(|&minutes| if total == 0.0 { 0.0 } else { minutes as f64 / total })
        .collect();

    FocusRanking {
        top,
        labels,
        values,
        pie_slices,
        percentages,
    }
}

fn display_title(title: &str, idx: usize, width: usize) -> String {
    if title.trim().is_empty() {
        return format!("Task {}", idx + 1);
    }
    truncate(title, width)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width).collect();
    short.push(ELLIPSIS);
    short
}
