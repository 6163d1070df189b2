use anyhow::Result;
use chrono::{Duration, NaiveDate};
use rusqlite::Connection;
use std::collections::BTreeMap;

use crate::db::repository::{PrayerDayRepo, ProfileRepo};
use crate::models::{PrayerDay, Streak};

/// How one recorded day affects the streak walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayKind {
    /// At least one performed prayer: extends the streak.
    Qualifying,
    /// Menstrual-exempt: carries the streak without extending it.
    Exempt,
    /// Recorded, but neither performed nor exempt: breaks the streak.
    Broken,
}

fn classify(day: &PrayerDay) -> DayKind {
    if day.performed_count() > 0 {
        DayKind::Qualifying
    } else if day.is_menstrual_day || day.has_menstrual_status() {
        DayKind::Exempt
    } else {
        DayKind::Broken
    }
}

pub struct StreakCalculator;

impl StreakCalculator {
    /// Recompute both streaks from the full prayer log and cache them on
    /// the profile. Always recomputed from scratch, never incremented in
    /// place, so repeated calls cannot drift.
    pub fn recalculate_and_update(conn: &Connection, today: NaiveDate) -> Result<Streak> {
        // Unreadable history means a broken streak, not an error: the
        // streak is a best-effort display value.
        let days = PrayerDayRepo::get_all_desc(conn).unwrap_or_else(|e| {
            log::warn!("could not read prayer history for streak: {}", e);
            Vec::new()
        });
        let streak = Self::compute(&days, today);
        ProfileRepo::update_streaks(conn, streak.current, streak.best)?;
        Ok(streak)
    }

    /// Pure streak computation over a set of day records.
    ///
    /// Only fully-elapsed days count: the walk starts at yesterday, so a
    /// partially-logged today never inflates the streak. The current
    /// streak walk steps backward one day at a time and ends at the first
    /// day that neither qualifies nor is exempt; a missing record is a
    /// break, not an error.
    pub fn compute(days: &[PrayerDay], today: NaiveDate) -> Streak {
        let mut by_date: BTreeMap<NaiveDate, DayKind> = BTreeMap::new();
        for day in days {
            match NaiveDate::parse_from_str(&day.date, "%Y-%m-%d") {
                Ok(date) if date < today => {
                    by_date.insert(date, classify(day));
                }
                Ok(_) => {}
                Err(_) => log::warn!("skipping prayer day with bad date '{}'", day.date),
            }
        }

        let mut current = 0u32;
        let mut check = today - Duration::days(1);
        while let Some(kind) = by_date.get(&check) {
            match kind {
                DayKind::Qualifying => current += 1,
                DayKind::Exempt => {}
                DayKind::Broken => break,
            }
            check -= Duration::days(1);
        }

        let mut best = current;
        let mut run = 0u32;
        let mut prev: Option<NaiveDate> = None;
        for (&date, &kind) in &by_date {
            if let Some(p) = prev {
                if date - p > Duration::days(1) {
                    run = 0;
                }
            }
            match kind {
                DayKind::Qualifying => {
                    run += 1;
                    best = best.max(run);
                }
                DayKind::Exempt => {}
                DayKind::Broken => run = 0,
            }
            prev = Some(date);
        }

        Streak { current, best }
    }
}
