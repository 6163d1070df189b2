//! Read-only roll-ups of the prayer log for the journey dashboard.
//!
//! Summaries are derived on every read from the persisted day records;
//! nothing here is authoritative state. A date with no record counts as
//! five unperformed slots, not as an error.

use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use rusqlite::Connection;
use std::collections::HashMap;

use crate::db::repository::PrayerDayRepo;
use crate::models::{JourneyDaySummary, JourneyMonthSummary, JourneyWeekSummary, PrayerDay};
use crate::utils::hijri::last_n_week_starts;

/// Five prayer slots per day, Friday substitution included.
pub const SLOTS_PER_DAY: u32 = 5;

pub fn day_summary(date: NaiveDate, day: Option<&PrayerDay>) -> JourneyDaySummary {
    JourneyDaySummary {
        date: date.format("%Y-%m-%d").to_string(),
        completed_count: day.map_or(0, PrayerDay::performed_count),
        total_count: SLOTS_PER_DAY,
    }
}

/// Summaries for every date in `[start, end]`, in order. `days` may be any
/// subset of records overlapping the range.
pub fn summarize_range(start: NaiveDate, end: NaiveDate, days: &[PrayerDay]) -> Vec<JourneyDaySummary> {
    let by_date: HashMap<&str, &PrayerDay> =
        days.iter().map(|d| (d.date.as_str(), d)).collect();

    let mut summaries = Vec::new();
    let mut date = start;
    while date <= end {
        let key = date.format("%Y-%m-%d").to_string();
        summaries.push(day_summary(date, by_date.get(key.as_str()).copied()));
        date += Duration::days(1);
    }
    summaries
}

pub fn week_summary(week_start: NaiveDate, days: &[PrayerDay]) -> JourneyWeekSummary {
    let week_end = week_start + Duration::days(6);
    JourneyWeekSummary {
        week_start: week_start.format("%Y-%m-%d").to_string(),
        days: summarize_range(week_start, week_end, days),
    }
}

/// The dashboard grid: one summary per week, index 0 = the current week.
pub fn last_n_weeks(conn: &Connection, n: usize, today: NaiveDate) -> Result<Vec<JourneyWeekSummary>> {
    let starts = last_n_week_starts(n, today);
    let Some(&newest) = starts.first() else {
        return Ok(Vec::new());
    };
    let oldest = starts[starts.len() - 1];
    let records = PrayerDayRepo::get_range(
        conn,
        &oldest.format("%Y-%m-%d").to_string(),
        &(newest + Duration::days(6)).format("%Y-%m-%d").to_string(),
    )?;

    Ok(starts
        .into_iter()
        .map(|start| week_summary(start, &records))
        .collect())
}

pub fn month_summary(conn: &Connection, year: i32, month: u32) -> Result<JourneyMonthSummary> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow::anyhow!("invalid month {}-{}", year, month))?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("first of month is always valid");
    let last = next_month.pred_opt().expect("month start has a predecessor");

    let records = PrayerDayRepo::get_range(
        conn,
        &first.format("%Y-%m-%d").to_string(),
        &last.format("%Y-%m-%d").to_string(),
    )?;

    Ok(JourneyMonthSummary {
        year: first.year(),
        month: first.month(),
        days: summarize_range(first, last, &records),
    })
}
