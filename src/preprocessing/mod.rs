/// Модуль предобработки данных

pub mod collation;
pub mod dates;
pub mod filtering;

pub use collation::locale_cmp;
pub use dates::parse_due_date;
pub use filtering::{apply_filters, available_tags, matches_filter, FilterPredicate};
