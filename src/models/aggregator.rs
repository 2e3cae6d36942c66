//! Сборка статистики для экрана: фильтры, сегменты, рейтинг фокуса и таблица

use chrono::NaiveDate;

use crate::config::StatsConfig;
use crate::models::focus::prepare_focus_ranking;
use crate::models::segments::generate_segments;
use crate::models::table::{build_table, paginate};
use crate::models::task_stats::{compute_task_stats, priority_slices, status_slices};
use crate::preprocessing::{apply_filters, available_tags};
use crate::types::{
    Dashboard, FocusRanking, FocusRecord, Page, StatsResult, TableRow, Task, TaskStatus, TimeSegment, SEGMENT_COUNT,
};

/// Без состояния между вызовами: всё пересчитывается из входных данных.
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    config: StatsConfig,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StatsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    pub fn segments(&self, today: NaiveDate) -> [TimeSegment; SEGMENT_COUNT] {
        generate_segments(self.config.granularity, today)
    }

    /// Счётчики по отфильтрованным задачам
    pub fn task_stats(&self, tasks: &[Task], today: NaiveDate) -> StatsResult {
        let filtered = apply_filters(tasks, &self.config.filter);
        let stats = compute_task_stats(&filtered, &self.segments(today));

        let completed_by_status = stats.status_counts.get(&TaskStatus::Completed).copied().unwrap_or(0);
        if stats.completed_flag_count != completed_by_status {
            tracing::debug!(
                "completed flag set on {} tasks, status Completed on {}",
                stats.completed_flag_count,
                completed_by_status
            );
        }

        stats
    }

    pub fn focus_ranking(&self, records: &[FocusRecord]) -> FocusRanking {
        prepare_focus_ranking(records, self.config.top_n)
    }

    pub fn table(&self, tasks: &[Task], records: &[FocusRecord]) -> Vec<TableRow> {
        build_table(
            tasks,
            records,
            &self.config.filter,
            self.config.sort_column,
            self.config.sort_ascending,
        )
    }

    pub fn table_page(&self, tasks: &[Task], records: &[FocusRecord]) -> Page {
        let rows = self.table(tasks, records);
        paginate(&rows, self.config.page, self.config.page_size)
    }

    pub fn dashboard(&self, tasks: &[Task], records: &[FocusRecord], today: NaiveDate) -> Dashboard {
        let stats = self.task_stats(tasks, today);
        let table = self.table_page(tasks, records);

        tracing::debug!(
            "Dashboard: {} of {} tasks after filters, {} table rows, granularity {}",
            stats.total_tasks,
            tasks.len(),
            table.total_rows,
            self.config.granularity
        );

        Dashboard {
            status_slices: status_slices(&stats),
            priority_slices: priority_slices(&stats),
            focus: self.focus_ranking(records),
            available_tags: available_tags(tasks),
            table,
            stats,
        }
    }
}
