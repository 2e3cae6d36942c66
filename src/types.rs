//! Типы данных для модуля статистики задач

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// Количество временных сегментов в одной агрегации (текущий период + 3 предыдущих)
pub const SEGMENT_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(alias = "Pendiente", alias = "pending")]
    Pending,
    #[serde(alias = "En progreso", alias = "In progress", alias = "in_progress")]
    InProgress,
    #[serde(alias = "Completada", alias = "completed")]
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed];

    /// Отображаемое название, по нему же сортируется таблица
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskPriority {
    #[serde(alias = "Baja", alias = "low")]
    Low,
    #[serde(alias = "Media", alias = "medium")]
    Medium,
    #[serde(alias = "Alta", alias = "high")]
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }
}

/// Задача в том виде, в котором её отдаёт репозиторий задач.
///
/// Необязательные поля (`title`, `tags`, `completed`) приводятся к значениям по
/// умолчанию при десериализации, дальше по коду их отсутствие не проверяется.
/// Нераспознанный или отсутствующий статус/приоритет становится `None`:
/// такая задача не попадает в соответствующий счётчик, но остальное про неё считается.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "known_or_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "known_or_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub due_date: Option<String>, // ISO-8601 или DD-MM-YYYY
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, status: TaskStatus, priority: TaskPriority) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: Some(status),
            priority: Some(priority),
            due_date: None,
            tags: BTreeSet::new(),
            completed: status == TaskStatus::Completed,
        }
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Суммарное время фокуса по одной задаче
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusRecord {
    #[serde(deserialize_with = "id_from_any")]
    pub task_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub task_title: String, // копия названия на момент записи, может устареть
    pub total_minutes: u64,
}

impl FocusRecord {
    pub fn new(task_id: impl Into<String>, task_title: impl Into<String>, total_minutes: u64) -> Self {
        Self {
            task_id: task_id.into(),
            task_title: task_title.into(),
            total_minutes,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Granularity {
    #[default]
    Week,
    Month,
    Year,
}

/// Временной сегмент `[start, end]`, обе границы включительно
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSegment {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeSegment {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Набор фильтров таблицы. `None` у статуса/приоритета означает «все».
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
}

impl FilterSpec {
    pub fn has_date_bound(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortColumn {
    #[default]
    Title,
    Status,
    Priority,
    #[serde(alias = "dueDate")]
    #[strum(to_string = "due_date", serialize = "dueDate")]
    DueDate,
    #[serde(alias = "focusMinutes")]
    #[strum(to_string = "focus_minutes", serialize = "focusMinutes")]
    FocusMinutes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResult {
    pub status_counts: BTreeMap<TaskStatus, usize>,
    pub priority_counts: BTreeMap<TaskPriority, usize>, // только последний сегмент
    pub pending_per_segment: [usize; SEGMENT_COUNT],
    pub completed_per_segment: [usize; SEGMENT_COUNT],
    pub segments: [TimeSegment; SEGMENT_COUNT],
    pub total_tasks: usize,
    pub completion_rate: f64, // проценты, 0-100
    pub completed_flag_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSlice {
    pub status: TaskStatus,
    pub label: String,
    pub count: usize,
    pub percent: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritySlice {
    pub priority: TaskPriority,
    pub label: String,
    pub count: usize,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieSlice {
    pub name: String,
    pub minutes: u64,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FocusRanking {
    pub top: Vec<FocusRecord>,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub pie_slices: Vec<PieSlice>,
    pub percentages: Vec<f64>, // доли 0-1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: String,
    pub title: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<String>,
    pub focus_minutes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub rows: Vec<TableRow>,
    pub page: usize,
    pub from: usize,
    pub to: usize,
    pub total_pages: usize,
    pub total_rows: usize,
}

/// Всё, что нужно экрану статистики за одно обновление
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub stats: StatsResult,
    pub status_slices: Vec<StatusSlice>,
    pub priority_slices: Vec<PrioritySlice>,
    pub focus: FocusRanking,
    pub available_tags: Vec<String>,
    pub table: Page,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

/// Идентификатор приходит то строкой, то числом
fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Signed(id) => id.to_string(),
        RawId::Unsigned(id) => id.to_string(),
    })
}

/// Значение, которое не удалось распознать, не валит весь запрос
fn known_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(raw) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match serde_json::from_value::<T>(raw.clone()) {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            tracing::warn!("Unrecognized value {} ignored", raw);
            Ok(None)
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn task_accepts_legacy_labels_and_numeric_id() {
        let task: Task = serde_json::from_str(
            r#"{"id": 42, "title": "Informe", "status": "En progreso", "priority": "Alta",
                "due_date": "01-03-2024", "tags": null}"#,
        )
        .unwrap();

        assert_eq!(task.id, "42");
        assert_eq!(task.status, Some(TaskStatus::InProgress));
        assert_eq!(task.priority, Some(TaskPriority::High));
        assert!(task.tags.is_empty());
        assert!(!task.completed);
    }

    #[test]
    fn task_missing_optional_fields_get_defaults() {
        let task: Task =
            serde_json::from_str(r#"{"id": "a1", "title": null, "status": "Completed", "priority": "Low"}"#).unwrap();

        assert_eq!(task.title, "");
        assert_eq!(task.due_date, None);
        assert!(task.tags.is_empty());
    }

    #[test]
    fn unknown_or_missing_status_and_priority_become_none() {
        let tasks: Vec<Task> = serde_json::from_str(
            r#"[{"id": 1, "status": "Archivada", "priority": "Alta"},
                {"id": 2, "status": "Pendiente"},
                {"id": 3, "status": null, "priority": 7}]"#,
        )
        .unwrap();

        assert_eq!(tasks[0].status, None);
        assert_eq!(tasks[0].priority, Some(TaskPriority::High));
        assert_eq!(tasks[1].status, Some(TaskStatus::Pending));
        assert_eq!(tasks[1].priority, None);
        assert_eq!(tasks[2].status, None);
        assert_eq!(tasks[2].priority, None);
    }

    #[test]
    fn focus_record_title_may_be_null() {
        let record: FocusRecord =
            serde_json::from_str(r#"{"task_id": 7, "task_title": null, "total_minutes": 25}"#).unwrap();

        assert_eq!(record, FocusRecord::new("7", "", 25));
    }

    #[test]
    fn granularity_parses_case_insensitively() {
        assert_eq!("Month".parse::<Granularity>().unwrap(), Granularity::Month);
        assert_eq!("YEAR".parse::<Granularity>().unwrap(), Granularity::Year);
        assert_eq!(
            "decade".parse::<Granularity>(),
            Err(strum::ParseError::VariantNotFound)
        );
        assert_eq!(Granularity::Month.to_string(), "month");
    }

    #[test]
    fn sort_column_accepts_camel_case() {
        assert_eq!("focusMinutes".parse::<SortColumn>().unwrap(), SortColumn::FocusMinutes);
        assert_eq!("due_date".parse::<SortColumn>().unwrap(), SortColumn::DueDate);
        assert_eq!("Title".parse::<SortColumn>().unwrap(), SortColumn::Title);
        assert_eq!(SortColumn::FocusMinutes.to_string(), "focus_minutes");
        let column: SortColumn = serde_json::from_str(r#""due_date""#).unwrap();
        assert_eq!(column, SortColumn::DueDate);
    }

    #[test]
    fn status_counts_serialize_with_variant_keys() {
        let counts: BTreeMap<TaskStatus, usize> = TaskStatus::ALL.iter().map(|s| (*s, 1)).collect();
        let json = serde_json::to_value(&counts).unwrap();
        assert_eq!(json["InProgress"], 1);
    }
}
