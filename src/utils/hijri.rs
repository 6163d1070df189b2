use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::daily_log::FastingReason;

/// Islamic month names in English (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

fn hijri_month_name(month: u32) -> &'static str {
    if (1..=12).contains(&month) {
        HIJRI_MONTH_NAMES[(month - 1) as usize]
    } else {
        "Unknown"
    }
}

/// How Gregorian dates are mapped to the Hijri calendar. Civil is the
/// tabular arithmetic calendar; UmmAlQura uses the Saudi lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HijriMethod {
    Civil,
    UmmAlQura,
}

impl HijriMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HijriMethod::Civil => "civil",
            HijriMethod::UmmAlQura => "ummAlQura",
        }
    }
}

impl FromStr for HijriMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "civil" => Ok(HijriMethod::Civil),
            "ummAlQura" | "ummalqura" => Ok(HijriMethod::UmmAlQura),
            _ => Err(anyhow::anyhow!("Unknown hijri method: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HijriComponents {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

impl HijriComponents {
    pub fn month_name(&self) -> &'static str {
        hijri_month_name(self.month)
    }

    pub fn formatted(&self) -> String {
        format!("{} {} {}", self.day, self.month_name(), self.year)
    }
}

/// Convert a Gregorian date to Hijri components.
///
/// `offset_days` lets users adjust for local moon sighting differences
/// (e.g., -1 if your region is one day behind Saudi Arabia). Always yields
/// a value: the Umm-al-Qura tables only cover 1356-1500 AH, and dates
/// outside that window fall back to the civil calculation.
pub fn hijri_components(date: NaiveDate, method: HijriMethod, offset_days: i32) -> HijriComponents {
    let adjusted = date + Duration::days(i64::from(offset_days));
    match method {
        HijriMethod::Civil => civil_components(adjusted),
        HijriMethod::UmmAlQura => umm_al_qura_components(adjusted),
    }
}

/// Tabular civil conversion (the Kuwaiti algorithm). Pure integer math,
/// valid for any proleptic-Gregorian date after the Hijri epoch.
fn civil_components(date: NaiveDate) -> HijriComponents {
    // Julian day number for the date at noon.
    let jdn = i64::from(date.num_days_from_ce()) + 1_721_425;

    let mut l = jdn - 1_948_440 + 10_632;
    let n = (l - 1) / 10_631;
    l = l - 10_631 * n + 354;
    let j = ((10_985 - l) / 5_316) * ((50 * l) / 17_719) + (l / 5_670) * ((43 * l) / 15_238);
    l = l - ((30 - j) / 15) * ((17_719 * j) / 50) - (j / 16) * ((15_238 * j) / 43) + 29;
    let month = (24 * l) / 709;
    let day = l - (709 * month) / 24;
    let year = 30 * n + j - 30;

    HijriComponents {
        year: year.max(0) as u32,
        month: month as u32,
        day: day as u32,
    }
}

fn umm_al_qura_components(date: NaiveDate) -> HijriComponents {
    // hijri_date's tables cover roughly 1938-2076 CE.
    if !(1938..=2076).contains(&date.year()) {
        log::debug!(
            "date {} outside Umm-al-Qura table range, using civil conversion",
            date
        );
        return civil_components(date);
    }

    match HijriDate::from_gr(date.year() as usize, date.month() as usize, date.day() as usize) {
        Ok(hd) => HijriComponents {
            year: hd.year() as u32,
            month: hd.month() as u32,
            day: hd.day() as u32,
        },
        Err(e) => {
            log::warn!("Umm-al-Qura conversion failed for {}: {}", date, e);
            civil_components(date)
        }
    }
}

/// White Days are the 13th through 15th of the Hijri month.
pub fn is_white_day(date: NaiveDate, method: HijriMethod, offset_days: i32) -> bool {
    let hijri = hijri_components(date, method, offset_days);
    (13..=15).contains(&hijri.day)
}

/// Weekday number with 1 = Sunday through 7 = Saturday.
pub fn weekday_number(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday() + 1
}

pub fn is_friday(date: NaiveDate) -> bool {
    date.weekday() == chrono::Weekday::Fri
}

/// The fasting prompt is shown on Mondays, Thursdays, and White Days.
pub fn should_show_fasting_prompt(date: NaiveDate, method: HijriMethod, offset_days: i32) -> bool {
    let weekday = weekday_number(date);
    weekday == 2 || weekday == 5 || is_white_day(date, method, offset_days)
}

/// Why this date is a recognized fasting day, if it is one. White Days
/// take precedence over the weekday reasons since they carry the larger
/// bonus.
pub fn fasting_reason_for(
    date: NaiveDate,
    method: HijriMethod,
    offset_days: i32,
) -> Option<FastingReason> {
    if is_white_day(date, method, offset_days) {
        return Some(FastingReason::WhiteDay);
    }
    match weekday_number(date) {
        2 => Some(FastingReason::Monday),
        5 => Some(FastingReason::Thursday),
        _ => None,
    }
}

/// Sunday-aligned start of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Week starts for the last `n` weeks. Index 0 is the current week's
/// Sunday-aligned start; each later entry is exactly one week earlier.
pub fn last_n_week_starts(n: usize, today: NaiveDate) -> Vec<NaiveDate> {
    let current = week_start(today);
    (0..n)
        .map(|i| current - Duration::days(7 * i as i64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn civil_conversion_known_dates() {
        // 1 January 2000 was 24 Ramadan 1420 in the civil calendar.
        let h = civil_components(date(2000, 1, 1));
        assert_eq!((h.year, h.month, h.day), (1420, 9, 24));

        // The epoch: 19 July 622 (proleptic Gregorian) is 1 Muharram 1.
        let epoch = civil_components(date(622, 7, 19));
        assert_eq!((epoch.year, epoch.month, epoch.day), (1, 1, 1));
    }

    #[test]
    fn components_stay_in_range() {
        for method in [HijriMethod::Civil, HijriMethod::UmmAlQura] {
            let mut d = date(2020, 1, 1);
            for _ in 0..1500 {
                let h = hijri_components(d, method, 0);
                assert!((1..=30).contains(&h.day), "{method:?} {d}: day {}", h.day);
                assert!(
                    (1..=12).contains(&h.month),
                    "{method:?} {d}: month {}",
                    h.month
                );
                d = d.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn white_day_boundaries() {
        // Civil 1420-09-24 is 2000-01-01, so the 13th/15th/16th of that
        // Ramadan land 11/9/8 days earlier.
        assert!(is_white_day(date(1999, 12, 21), HijriMethod::Civil, 0)); // day 13
        assert!(is_white_day(date(1999, 12, 22), HijriMethod::Civil, 0)); // day 14
        assert!(is_white_day(date(1999, 12, 23), HijriMethod::Civil, 0)); // day 15
        assert!(!is_white_day(date(1999, 12, 20), HijriMethod::Civil, 0)); // day 12
        assert!(!is_white_day(date(1999, 12, 24), HijriMethod::Civil, 0)); // day 16
    }

    #[test]
    fn offset_shifts_the_hijri_day() {
        let base = hijri_components(date(2000, 1, 1), HijriMethod::Civil, 0);
        let behind = hijri_components(date(2000, 1, 1), HijriMethod::Civil, -1);
        assert_eq!(base.day, 24);
        assert_eq!(behind.day, 23);
    }

    #[test]
    fn out_of_table_dates_fall_back_to_civil() {
        let far_future = date(2150, 6, 1);
        let umm = hijri_components(far_future, HijriMethod::UmmAlQura, 0);
        let civil = hijri_components(far_future, HijriMethod::Civil, 0);
        assert_eq!(umm, civil);
    }

    #[test]
    fn weekday_numbering_is_sunday_based() {
        assert_eq!(weekday_number(date(2026, 8, 2)), 1); // Sunday
        assert_eq!(weekday_number(date(2026, 8, 3)), 2); // Monday
        assert_eq!(weekday_number(date(2026, 8, 6)), 5); // Thursday
        assert_eq!(weekday_number(date(2026, 8, 8)), 7); // Saturday
    }

    #[test]
    fn fasting_prompt_on_monday_and_thursday() {
        assert!(should_show_fasting_prompt(
            date(2026, 8, 3),
            HijriMethod::Civil,
            0
        ));
        assert!(should_show_fasting_prompt(
            date(2026, 8, 6),
            HijriMethod::Civil,
            0
        ));
    }

    #[test]
    fn fasting_prompt_on_white_days() {
        // 1999-12-22 was a Wednesday and civil Hijri day 14.
        let d = date(1999, 12, 22);
        assert_eq!(weekday_number(d), 4);
        assert!(should_show_fasting_prompt(d, HijriMethod::Civil, 0));
    }

    #[test]
    fn white_day_reason_takes_precedence() {
        // 1999-12-23 was a Thursday and also civil Hijri day 15.
        let d = date(1999, 12, 23);
        assert_eq!(weekday_number(d), 5);
        assert_eq!(
            fasting_reason_for(d, HijriMethod::Civil, 0),
            Some(FastingReason::WhiteDay)
        );
    }

    #[test]
    fn plain_weekday_has_no_reason() {
        // 2026-08-04 is a Tuesday, civil Hijri day 20.
        assert_eq!(fasting_reason_for(date(2026, 8, 4), HijriMethod::Civil, 0), None);
    }

    #[test]
    fn week_starts_descend_by_exactly_one_week() {
        let today = date(2026, 8, 6); // Thursday
        let starts = last_n_week_starts(5, today);
        assert_eq!(starts.len(), 5);
        assert_eq!(starts[0], date(2026, 8, 2)); // this week's Sunday
        assert_eq!(starts[1], starts[0] - Duration::days(7));
        for pair in starts.windows(2) {
            assert_eq!(pair[0] - pair[1], Duration::days(7));
        }
    }

    #[test]
    fn week_start_of_a_sunday_is_itself() {
        let sunday = date(2026, 8, 2);
        assert_eq!(week_start(sunday), sunday);
    }

    #[test]
    fn month_names_cover_all_months() {
        let h = HijriComponents {
            year: 1447,
            month: 9,
            day: 1,
        };
        assert_eq!(h.month_name(), "Ramadan");
        assert_eq!(h.formatted(), "1 Ramadan 1447");
    }
}
