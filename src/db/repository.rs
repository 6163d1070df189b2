use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use std::str::FromStr;

use crate::models::{
    DailyLog, FastingAnswer, FastingReason, Gender, PrayerDay, PrayerStatus, UserProfile,
};

// ─── Prayer day repo ─────────────────────────────────────────────────────────

pub struct PrayerDayRepo;

impl PrayerDayRepo {
    fn day_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PrayerDay> {
        Ok(PrayerDay {
            date: row.get::<_, String>(0)?,
            fajr: PrayerStatus::parse_lossy(&row.get::<_, String>(1)?),
            dhuhr: PrayerStatus::parse_lossy(&row.get::<_, String>(2)?),
            asr: PrayerStatus::parse_lossy(&row.get::<_, String>(3)?),
            maghrib: PrayerStatus::parse_lossy(&row.get::<_, String>(4)?),
            isha: PrayerStatus::parse_lossy(&row.get::<_, String>(5)?),
            is_menstrual_day: row.get::<_, i32>(6)? != 0,
            total_credits_for_day: row.get::<_, i64>(7)?.max(0) as u32,
            last_updated_at: row.get::<_, String>(8)?,
        })
    }

    const DAY_COLUMNS: &'static str =
        "date, fajr, dhuhr, asr, maghrib, isha, is_menstrual_day, total_credits, last_updated_at";

    pub fn get(conn: &Connection, date: &str) -> Result<Option<PrayerDay>> {
        conn.query_row(
            &format!("SELECT {} FROM prayer_days WHERE date = ?1", Self::DAY_COLUMNS),
            params![date],
            Self::day_from_row,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    /// Lazily create the row for a date on first interaction.
    pub fn get_or_create(conn: &Connection, date: &str) -> Result<PrayerDay> {
        if let Some(day) = Self::get(conn, date)? {
            return Ok(day);
        }
        conn.execute(
            "INSERT OR IGNORE INTO prayer_days (date) VALUES (?1)",
            params![date],
        )?;
        Ok(PrayerDay::new(date))
    }

    /// Persist statuses and the derived total in one write, so the stored
    /// total can never disagree with the stored statuses.
    pub fn save(conn: &Connection, day: &PrayerDay) -> Result<()> {
        conn.execute(
            "INSERT INTO prayer_days
                (date, fajr, dhuhr, asr, maghrib, isha, is_menstrual_day, total_credits, last_updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(date) DO UPDATE SET
                fajr = ?2, dhuhr = ?3, asr = ?4, maghrib = ?5, isha = ?6,
                is_menstrual_day = ?7, total_credits = ?8, last_updated_at = ?9",
            params![
                day.date,
                day.fajr.as_str(),
                day.dhuhr.as_str(),
                day.asr.as_str(),
                day.maghrib.as_str(),
                day.isha.as_str(),
                day.is_menstrual_day as i32,
                i64::from(day.total_credits_for_day),
                day.last_updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_range(conn: &Connection, start: &str, end: &str) -> Result<Vec<PrayerDay>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM prayer_days WHERE date >= ?1 AND date <= ?2 ORDER BY date",
            Self::DAY_COLUMNS
        ))?;
        let rows = stmt.query_map(params![start, end], Self::day_from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    /// Full history, newest first, for the streak walk.
    pub fn get_all_desc(conn: &Connection) -> Result<Vec<PrayerDay>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM prayer_days ORDER BY date DESC",
            Self::DAY_COLUMNS
        ))?;
        let rows = stmt.query_map([], Self::day_from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }
}

// ─── Daily log repo ──────────────────────────────────────────────────────────

pub struct DailyLogRepo;

impl DailyLogRepo {
    pub fn get(conn: &Connection, date: &str) -> Result<Option<DailyLog>> {
        let row = conn
            .query_row(
                "SELECT date, fasting_answered, fasting_answer, fasting_reason,
                        hijri_day, hijri_month, hijri_year
                 FROM daily_logs WHERE date = ?1",
                params![date],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, i32>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, Option<i64>>(4)?,
                        row.get::<_, Option<i64>>(5)?,
                        row.get::<_, Option<i64>>(6)?,
                    ))
                },
            )
            .optional()?;

        let Some((date, answered, answer, reason, h_day, h_month, h_year)) = row else {
            return Ok(None);
        };
        Ok(Some(DailyLog {
            date,
            fasting_answered: answered != 0,
            fasting_answer: answer.and_then(|s| FastingAnswer::from_str(&s).ok()),
            fasting_reason: reason.and_then(|s| FastingReason::from_str(&s).ok()),
            hijri_day: h_day.map(|v| v as u32),
            hijri_month: h_month.map(|v| v as u32),
            hijri_year: h_year.map(|v| v as u32),
        }))
    }

    pub fn upsert(conn: &Connection, log: &DailyLog) -> Result<()> {
        conn.execute(
            "INSERT INTO daily_logs
                (date, fasting_answered, fasting_answer, fasting_reason,
                 hijri_day, hijri_month, hijri_year)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(date) DO UPDATE SET
                fasting_answered = ?2, fasting_answer = ?3, fasting_reason = ?4,
                hijri_day = ?5, hijri_month = ?6, hijri_year = ?7",
            params![
                log.date,
                log.fasting_answered as i32,
                log.fasting_answer.map(|a| a.as_str()),
                log.fasting_reason.map(|r| r.as_str()),
                log.hijri_day.map(i64::from),
                log.hijri_month.map(i64::from),
                log.hijri_year.map(i64::from),
            ],
        )?;
        Ok(())
    }
}

// ─── Profile repo ────────────────────────────────────────────────────────────

pub struct ProfileRepo;

impl ProfileRepo {
    pub fn get(conn: &Connection) -> Result<UserProfile> {
        conn.query_row(
            "SELECT credits, current_streak, best_streak, gender,
                    menstrual_mode_enabled, onboarding_completed, created_at, updated_at
             FROM profile WHERE id = 1",
            [],
            |row| {
                let gender_str = row.get::<_, String>(3)?;
                Ok(UserProfile {
                    credits: row.get::<_, i64>(0)?,
                    current_streak: row.get::<_, i64>(1)?.max(0) as u32,
                    best_streak: row.get::<_, i64>(2)?.max(0) as u32,
                    gender: Gender::from_str(&gender_str)
                        .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
                    menstrual_mode_enabled: row.get::<_, i32>(4)? != 0,
                    onboarding_completed: row.get::<_, i32>(5)? != 0,
                    created_at: row.get::<_, String>(6)?,
                    updated_at: row.get::<_, String>(7)?,
                })
            },
        )
        .map_err(anyhow::Error::from)
    }

    pub fn save_settings(
        conn: &Connection,
        gender: Gender,
        menstrual_mode_enabled: bool,
        onboarding_completed: bool,
    ) -> Result<()> {
        conn.execute(
            "UPDATE profile SET gender = ?1, menstrual_mode_enabled = ?2,
                    onboarding_completed = ?3, updated_at = datetime('now')
             WHERE id = 1",
            params![
                gender.as_str(),
                menstrual_mode_enabled as i32,
                onboarding_completed as i32
            ],
        )?;
        Ok(())
    }

    /// Accrue earned credits. The running total only ever grows; callers
    /// pass the positive delta of a day recompute, never the raw total.
    pub fn add_credits(conn: &Connection, delta: u32) -> Result<()> {
        conn.execute(
            "UPDATE profile SET credits = credits + ?1, updated_at = datetime('now')
             WHERE id = 1",
            params![i64::from(delta)],
        )?;
        Ok(())
    }

    pub fn update_streaks(conn: &Connection, current: u32, best: u32) -> Result<()> {
        conn.execute(
            "UPDATE profile SET current_streak = ?1, best_streak = ?2,
                    updated_at = datetime('now')
             WHERE id = 1",
            params![i64::from(current), i64::from(best)],
        )?;
        Ok(())
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::PrayerType;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn prayer_day_roundtrip() {
        let conn = test_conn();
        let mut day = PrayerDayRepo::get_or_create(&conn, "2026-08-04").unwrap();
        day.set_status(PrayerType::Fajr, PrayerStatus::OnTime);
        day.set_status(PrayerType::Asr, PrayerStatus::PrayedAtMasjid);
        day.total_credits_for_day = 35;
        PrayerDayRepo::save(&conn, &day).unwrap();

        let loaded = PrayerDayRepo::get(&conn, "2026-08-04").unwrap().unwrap();
        assert_eq!(loaded.fajr, PrayerStatus::OnTime);
        assert_eq!(loaded.asr, PrayerStatus::PrayedAtMasjid);
        assert_eq!(loaded.dhuhr, PrayerStatus::None);
        assert_eq!(loaded.total_credits_for_day, 35);
    }

    #[test]
    fn legacy_status_strings_read_lossy() {
        let conn = test_conn();
        conn.execute(
            "INSERT INTO prayer_days (date, fajr, dhuhr) VALUES ('2024-01-05', 'jumua', 'made up')",
            [],
        )
        .unwrap();
        let day = PrayerDayRepo::get(&conn, "2024-01-05").unwrap().unwrap();
        assert_eq!(day.fajr, PrayerStatus::Jummah);
        assert_eq!(day.dhuhr, PrayerStatus::Qada);
    }

    #[test]
    fn garbage_status_reads_as_none() {
        let conn = test_conn();
        conn.execute(
            "INSERT INTO prayer_days (date, fajr) VALUES ('2024-01-06', 'banana')",
            [],
        )
        .unwrap();
        let day = PrayerDayRepo::get(&conn, "2024-01-06").unwrap().unwrap();
        assert_eq!(day.fajr, PrayerStatus::None);
    }

    #[test]
    fn missing_day_is_none_not_error() {
        let conn = test_conn();
        assert!(PrayerDayRepo::get(&conn, "2030-01-01").unwrap().is_none());
    }

    #[test]
    fn range_query_is_date_ordered() {
        let conn = test_conn();
        for date in ["2026-08-03", "2026-08-01", "2026-08-02"] {
            let day = PrayerDayRepo::get_or_create(&conn, date).unwrap();
            PrayerDayRepo::save(&conn, &day).unwrap();
        }
        let range = PrayerDayRepo::get_range(&conn, "2026-08-01", "2026-08-03").unwrap();
        let dates: Vec<&str> = range.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, ["2026-08-01", "2026-08-02", "2026-08-03"]);
    }

    #[test]
    fn daily_log_roundtrip() {
        let conn = test_conn();
        let mut log = DailyLog::new("2026-08-06");
        log.fasting_answered = true;
        log.fasting_answer = Some(FastingAnswer::Yes);
        log.fasting_reason = Some(FastingReason::Thursday);
        log.hijri_day = Some(22);
        log.hijri_month = Some(2);
        log.hijri_year = Some(1448);
        DailyLogRepo::upsert(&conn, &log).unwrap();

        let loaded = DailyLogRepo::get(&conn, "2026-08-06").unwrap().unwrap();
        assert!(loaded.fasting_answered);
        assert_eq!(loaded.fasting_answer, Some(FastingAnswer::Yes));
        assert_eq!(loaded.fasting_reason, Some(FastingReason::Thursday));
        assert_eq!(loaded.hijri_day, Some(22));

        // Answer is editable; reason stays what it was.
        let mut edited = loaded;
        edited.fasting_answer = Some(FastingAnswer::No);
        DailyLogRepo::upsert(&conn, &edited).unwrap();
        let reloaded = DailyLogRepo::get(&conn, "2026-08-06").unwrap().unwrap();
        assert_eq!(reloaded.fasting_answer, Some(FastingAnswer::No));
        assert_eq!(reloaded.fasting_reason, Some(FastingReason::Thursday));
    }

    #[test]
    fn profile_seeded_and_credits_accrue() {
        let conn = test_conn();
        let profile = ProfileRepo::get(&conn).unwrap();
        assert_eq!(profile.credits, 0);
        assert_eq!(profile.current_streak, 0);

        ProfileRepo::add_credits(&conn, 15).unwrap();
        ProfileRepo::add_credits(&conn, 10).unwrap();
        assert_eq!(ProfileRepo::get(&conn).unwrap().credits, 25);
    }

    #[test]
    fn profile_settings_persist() {
        let conn = test_conn();
        ProfileRepo::save_settings(&conn, Gender::Sister, true, true).unwrap();
        let profile = ProfileRepo::get(&conn).unwrap();
        assert_eq!(profile.gender, Gender::Sister);
        assert!(profile.menstrual_mode_enabled);
        assert!(profile.onboarding_completed);
    }

    #[test]
    fn meta_roundtrip() {
        let conn = test_conn();
        assert!(MetaRepo::get(&conn, "setup_done").unwrap().is_none());
        MetaRepo::set(&conn, "setup_done", "1").unwrap();
        assert_eq!(MetaRepo::get(&conn, "setup_done").unwrap().as_deref(), Some("1"));
    }
}
