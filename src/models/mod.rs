/// Вычисления статистики

pub mod aggregator;
pub mod focus;
pub mod segments;
pub mod table;
pub mod task_stats;

pub use aggregator::StatsAggregator;
pub use focus::{prepare_focus_ranking, DEFAULT_TOP_N, FOCUS_PALETTE};
pub use segments::generate_segments;
pub use table::{build_table, paginate, sort_rows, DEFAULT_PAGE_SIZE};
pub use task_stats::{compute_task_stats, priority_slices, status_slices};
