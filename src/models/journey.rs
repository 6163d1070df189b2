use serde::{Deserialize, Serialize};

/// Completion summary for a single day: performed slots out of the five
/// active ones. Derived, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyDaySummary {
    pub date: String,
    pub completed_count: u32,
    pub total_count: u32,
}

impl JourneyDaySummary {
    pub fn completion_fraction(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            f64::from(self.completed_count) / f64::from(self.total_count)
        }
    }
}

/// One Sunday-aligned week of day summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyWeekSummary {
    pub week_start: String,
    pub days: Vec<JourneyDaySummary>,
}

impl JourneyWeekSummary {
    pub fn completed_count(&self) -> u32 {
        self.days.iter().map(|d| d.completed_count).sum()
    }

    pub fn total_count(&self) -> u32 {
        self.days.iter().map(|d| d.total_count).sum()
    }

    pub fn completion_fraction(&self) -> f64 {
        let total = self.total_count();
        if total == 0 {
            0.0
        } else {
            f64::from(self.completed_count()) / f64::from(total)
        }
    }

    pub fn days_fully_completed(&self) -> u32 {
        self.days
            .iter()
            .filter(|d| d.total_count > 0 && d.completed_count >= d.total_count)
            .count() as u32
    }
}

/// One calendar month of day summaries for the dashboard roll-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyMonthSummary {
    pub year: i32,
    pub month: u32,
    pub days: Vec<JourneyDaySummary>,
}

impl JourneyMonthSummary {
    pub fn completed_count(&self) -> u32 {
        self.days.iter().map(|d| d.completed_count).sum()
    }

    pub fn total_count(&self) -> u32 {
        self.days.iter().map(|d| d.total_count).sum()
    }

    pub fn completion_fraction(&self) -> f64 {
        let total = self.total_count();
        if total == 0 {
            0.0
        } else {
            f64::from(self.completed_count()) / f64::from(total)
        }
    }
}

/// Current and best consecutive-day prayer streaks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_fraction_guards_divide_by_zero() {
        let day = JourneyDaySummary {
            date: "2026-08-04".to_string(),
            completed_count: 0,
            total_count: 0,
        };
        assert_eq!(day.completion_fraction(), 0.0);
    }

    #[test]
    fn full_day_is_fraction_one() {
        let day = JourneyDaySummary {
            date: "2026-08-04".to_string(),
            completed_count: 5,
            total_count: 5,
        };
        assert!((day.completion_fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_week_fraction_is_zero() {
        let week = JourneyWeekSummary {
            week_start: "2026-08-02".to_string(),
            days: vec![],
        };
        assert_eq!(week.total_count(), 0);
        assert_eq!(week.completion_fraction(), 0.0);
    }

    #[test]
    fn week_counts_sum_days() {
        let days = (0..7)
            .map(|i| JourneyDaySummary {
                date: format!("2026-08-0{}", i + 1),
                completed_count: if i < 2 { 5 } else { 3 },
                total_count: 5,
            })
            .collect();
        let week = JourneyWeekSummary {
            week_start: "2026-08-01".to_string(),
            days,
        };
        assert_eq!(week.total_count(), 35);
        assert_eq!(week.completed_count(), 2 * 5 + 5 * 3);
        assert_eq!(week.days_fully_completed(), 2);
    }
}
