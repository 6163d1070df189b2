use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS prayer_days (
            date             TEXT PRIMARY KEY,
            fajr             TEXT NOT NULL DEFAULT 'none',
            dhuhr            TEXT NOT NULL DEFAULT 'none',
            asr              TEXT NOT NULL DEFAULT 'none',
            maghrib          TEXT NOT NULL DEFAULT 'none',
            isha             TEXT NOT NULL DEFAULT 'none',
            is_menstrual_day INTEGER NOT NULL DEFAULT 0,
            total_credits    INTEGER NOT NULL DEFAULT 0,
            last_updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS daily_logs (
            date             TEXT PRIMARY KEY,
            fasting_answered INTEGER NOT NULL DEFAULT 0,
            fasting_answer   TEXT CHECK(fasting_answer IN ('yes','no','preferNotToSay')),
            fasting_reason   TEXT CHECK(fasting_reason IN ('monday','thursday','whiteDay','other')),
            hijri_day        INTEGER,
            hijri_month      INTEGER,
            hijri_year       INTEGER,
            created_at       TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS profile (
            id                     INTEGER PRIMARY KEY CHECK(id = 1),
            credits                INTEGER NOT NULL DEFAULT 0,
            current_streak         INTEGER NOT NULL DEFAULT 0,
            best_streak            INTEGER NOT NULL DEFAULT 0,
            gender                 TEXT NOT NULL DEFAULT 'brother'
                                   CHECK(gender IN ('brother','sister')),
            menstrual_mode_enabled INTEGER NOT NULL DEFAULT 0,
            onboarding_completed   INTEGER NOT NULL DEFAULT 0,
            created_at             TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at             TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ",
    )?;

    seed_profile(conn)?;
    Ok(())
}

// Status columns carry no CHECK constraint: rows written by older versions
// may hold legacy status spellings, which the read path degrades to 'none'.

fn seed_profile(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO profile (id) VALUES (1)",
        [],
    )?;
    Ok(())
}
