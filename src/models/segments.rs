//! Временные сегменты для графиков: текущий период и три предыдущих

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::types::{Granularity, TimeSegment, SEGMENT_COUNT};

/// Сегменты от самого старого к текущему. Недели начинаются с понедельника.
pub fn generate_segments(granularity: Granularity, today: NaiveDate) -> [TimeSegment; SEGMENT_COUNT] {
    std::array::from_fn(|idx| {
        let periods_back = (SEGMENT_COUNT - 1 - idx) as u32;
        let start = period_start(granularity, today, periods_back).unwrap_or(NaiveDate::MIN);
        let end = period_end(granularity, start).unwrap_or(NaiveDate::MAX);

        TimeSegment {
            label: format_label(granularity, start),
            start,
            end,
        }
    })
}

fn period_start(granularity: Granularity, today: NaiveDate, periods_back: u32) -> Option<NaiveDate> {
    match granularity {
        Granularity::Week => {
            let offset = u64::from(today.weekday().num_days_from_monday()) + 7 * u64::from(periods_back);
            today.checked_sub_days(Days::new(offset))
        }
        Granularity::Month => today
            .with_day(1)
            .and_then(|first| first.checked_sub_months(Months::new(periods_back))),
        Granularity::Year => NaiveDate::from_ymd_opt(today.year() - periods_back as i32, 1, 1),
    }
}

fn period_end(granularity: Granularity, start: NaiveDate) -> Option<NaiveDate> {
    match granularity {
        Granularity::Week => start.checked_add_days(Days::new(6)),
        Granularity::Month => start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt()),
        Granularity::Year => NaiveDate::from_ymd_opt(start.year(), 12, 31),
    }
}

fn format_label(granularity: Granularity, start: NaiveDate) -> String {
    let format = match granularity {
        Granularity::Week => "%d %b",
        Granularity::Month => "%b %Y",
        Granularity::Year => "%Y",
    };
    start.format(format).to_string()
}
