//! Разбор сроков задач.
//!
//! В данных встречаются два формата: ISO-8601 (записи напрямую через API) и
//! `DD-MM-YYYY` (форма в приложении). Всё остальное считается отсутствующей датой.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const ISO_DATE: &str = "%Y-%m-%d";
const FORM_DATE: &str = "%d-%m-%Y";
const ISO_NAIVE_DATETIMES: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];

pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    parse_iso(raw).or_else(|| NaiveDate::parse_from_str(raw, FORM_DATE).ok())
}

fn parse_iso(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, ISO_DATE) {
        return Some(date);
    }

    // Календарная дата берётся так, как записана, без перевода в локальную зону
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }

    ISO_NAIVE_DATETIMES
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|datetime| datetime.date())
}
