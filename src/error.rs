//! Ошибки конфигурации. Сами вычисления статистики ошибок не возвращают.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("unknown granularity `{0}` (expected week, month or year)")]
    UnknownGranularity(String),

    #[error("`{field}` must be greater than zero")]
    ZeroValue { field: &'static str },

    #[error("invalid bind address `{addr}`: {reason}")]
    InvalidAddress { addr: String, reason: String },
}
