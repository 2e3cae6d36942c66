//! Настройки агрегации и сервера

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::models::{DEFAULT_PAGE_SIZE, DEFAULT_TOP_N};
use crate::types::{FilterSpec, Granularity, SortColumn};

pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default)]
    pub granularity: Granularity,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub page: usize, // с нуля
    #[serde(default)]
    pub filter: FilterSpec,
    #[serde(default)]
    pub sort_column: SortColumn,
    #[serde(default = "default_sort_ascending")]
    pub sort_ascending: bool,
}

fn default_top_n() -> usize { DEFAULT_TOP_N }
fn default_page_size() -> usize { DEFAULT_PAGE_SIZE }
fn default_sort_ascending() -> bool { true }

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            top_n: default_top_n(),
            page_size: default_page_size(),
            page: 0,
            filter: FilterSpec::default(),
            sort_column: SortColumn::default(),
            sort_ascending: default_sort_ascending(),
        }
    }
}

impl StatsConfig {
    /// Проверка значений, пришедших извне
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.top_n == 0 {
            return Err(StatsError::ZeroValue { field: "top_n" });
        }
        if self.page_size == 0 {
            return Err(StatsError::ZeroValue { field: "page_size" });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

impl ServerSettings {
    pub const ADDR_ENV: &'static str = "FOCUS_STATS_ADDR";

    pub fn from_env() -> Result<Self, StatsError> {
        Self::parse(std::env::var(Self::ADDR_ENV).ok().as_deref())
    }

    pub fn parse(addr: Option<&str>) -> Result<Self, StatsError> {
        let raw = addr.map(str::trim).filter(|a| !a.is_empty()).unwrap_or(DEFAULT_ADDR);
        let addr = raw.parse::<SocketAddr>().map_err(|e| StatsError::InvalidAddress {
            addr: raw.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { addr })
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
        }
    }
}
