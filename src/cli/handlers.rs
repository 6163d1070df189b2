use anyhow::{Result, anyhow, bail};
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::config::AppConfig;
use crate::credits::CreditRules;
use crate::db::repository::{DailyLogRepo, MetaRepo, PrayerDayRepo, ProfileRepo};
use crate::journey::aggregator;
use crate::models::{DailyLog, FastingAnswer, FastingReason, Gender, PrayerStatus, PrayerType};
use crate::streak::StreakCalculator;
use crate::utils::format::{format_percent, progress_bar};
use crate::utils::hijri::{
    self, HijriMethod, fasting_reason_for, hijri_components, is_white_day,
    should_show_fasting_prompt,
};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

fn today_pair() -> (NaiveDate, String) {
    let today = Local::now().date_naive();
    let today_str = today.format("%Y-%m-%d").to_string();
    (today, today_str)
}

// ─── Setup wizard ────────────────────────────────────────────────────────────

pub fn handle_setup(conn: &Connection, config: &mut AppConfig, reset: bool) -> Result<()> {
    if !reset {
        if let Some(done) = MetaRepo::get(conn, "setup_done")? {
            if done == "1" {
                println!("Ibtida is already configured. Use --reset to reconfigure.");
                return Ok(());
            }
        }
    }

    println!();
    println_colored!(GOLD, "  Ibtida setup");
    println!();

    let gender = loop {
        let answer = prompt("  Are you a brother or a sister? [brother/sister]: ")?;
        match Gender::from_str(&answer) {
            Ok(g) => break g,
            Err(_) => println_colored!(AMBER, "  Please answer brother or sister."),
        }
    };

    let menstrual_mode = if gender == Gender::Sister {
        let answer = prompt("  Enable menstrual mode (streak-exempt days)? [Y/n]: ")?;
        !matches!(answer.to_lowercase().as_str(), "n" | "no")
    } else {
        false
    };

    let method = loop {
        let answer = prompt("  Hijri method [ummAlQura/civil] (default ummAlQura): ")?;
        if answer.is_empty() {
            break HijriMethod::UmmAlQura;
        }
        match HijriMethod::from_str(&answer) {
            Ok(m) => break m,
            Err(_) => println_colored!(AMBER, "  Please answer ummAlQura or civil."),
        }
    };

    let offset = loop {
        let answer = prompt("  Hijri day offset for local moon sighting [-2..2] (default 0): ")?;
        if answer.is_empty() {
            break 0;
        }
        match answer.parse::<i32>() {
            Ok(v) if (-2..=2).contains(&v) => break v,
            _ => println_colored!(AMBER, "  Please enter a small whole number, e.g. -1."),
        }
    };

    ProfileRepo::save_settings(conn, gender, menstrual_mode, true)?;
    config.hijri.method = method;
    config.hijri.offset_days = offset;
    config.save()?;
    MetaRepo::set(conn, "setup_done", "1")?;

    println!();
    println_colored!(GREEN, "  ✓ Setup complete. Mark your first prayer with: ibtida mark fajr onTime");
    println!();
    Ok(())
}

// ─── Mark prayer ─────────────────────────────────────────────────────────────

pub fn handle_mark(conn: &Connection, prayer_str: &str, status_str: &str) -> Result<()> {
    let (today, today_str) = today_pair();
    let profile = ProfileRepo::get(conn)?;

    let slot = PrayerType::from_str(prayer_str).map_err(|_| {
        anyhow!(
            "Unknown prayer '{}'. Use: fajr, dhuhr, asr, maghrib, isha, jumuah",
            prayer_str
        )
    })?;

    let friday = hijri::is_friday(today);
    if slot == PrayerType::Jumuah && !(friday && profile.gender == Gender::Brother) {
        bail!("Jumu'ah stands in for Dhuhr on Fridays for brothers only");
    }
    let jumuah_slot =
        friday && profile.gender == Gender::Brother && slot.storage_slot() == PrayerType::Dhuhr;

    let status = PrayerStatus::from_str(status_str)
        .map_err(|e| anyhow!("{}. Run 'ibtida mark --help' for the status list", e))?;
    let allowed =
        PrayerStatus::options_for(profile.gender, profile.menstrual_mode_enabled, jumuah_slot);
    if !allowed.contains(&status) {
        bail!("Status '{}' is not available for this slot", status);
    }

    let mut day = PrayerDayRepo::get_or_create(conn, &today_str)?;
    let old_total = day.total_credits_for_day;
    day.set_status(slot, status);
    if day.has_menstrual_status() {
        day.is_menstrual_day = true;
    }

    let fasting = DailyLogRepo::get(conn, &today_str)?.and_then(|l| l.earned_fasting_reason());
    let new_total = day.recalculate_credits(
        profile.account_age_days(today),
        profile.current_streak,
        profile.gender,
        fasting,
    );
    PrayerDayRepo::save(conn, &day)?;

    // Credits only accrue; lowering a status never refunds them.
    if new_total > old_total {
        ProfileRepo::add_credits(conn, new_total - old_total)?;
    }
    let streak = StreakCalculator::recalculate_and_update(conn, today)?;

    match status {
        PrayerStatus::Missed => {
            println_colored!(RED, "  ✗ {} marked as missed", slot.display_name());
        }
        PrayerStatus::None => {
            println_colored!(DIM, "  ○ {} cleared", slot.display_name());
        }
        _ => {
            println_colored!(GREEN, "  ✓ {} marked as {}", slot.display_name(), status);
        }
    }
    println_colored!(
        DIM,
        "  Today: {} credits  |  Streak: {} days",
        new_total,
        streak.current
    );
    Ok(())
}

// ─── Menstrual flag ──────────────────────────────────────────────────────────

pub fn handle_menstrual(conn: &Connection, off: bool) -> Result<()> {
    let (today, today_str) = today_pair();
    let profile = ProfileRepo::get(conn)?;
    if profile.gender != Gender::Sister || !profile.menstrual_mode_enabled {
        bail!("Menstrual mode is not enabled on this profile (run 'ibtida setup --reset')");
    }

    let mut day = PrayerDayRepo::get_or_create(conn, &today_str)?;
    if off && day.has_menstrual_status() {
        bail!("Clear the menstrual prayer statuses first, then remove the flag");
    }
    day.is_menstrual_day = !off;
    PrayerDayRepo::save(conn, &day)?;
    StreakCalculator::recalculate_and_update(conn, today)?;

    if off {
        println_colored!(DIM, "  ○ Exempt flag removed for today");
    } else {
        println_colored!(GREEN, "  ✓ Today flagged as exempt; your streak carries through");
    }
    Ok(())
}

// ─── Fasting ─────────────────────────────────────────────────────────────────

pub fn handle_fast(conn: &Connection, config: &AppConfig, answer_str: &str) -> Result<()> {
    let answer = FastingAnswer::from_str(answer_str)
        .map_err(|_| anyhow!("Unknown answer '{}'. Use: yes, no, skip", answer_str))?;
    let (today, today_str) = today_pair();
    let method = config.hijri.method;
    let offset = config.hijri.offset_days;
    let profile = ProfileRepo::get(conn)?;

    let mut log = DailyLogRepo::get(conn, &today_str)?.unwrap_or_else(|| DailyLog::new(&today_str));
    let already_earned = log.earned_fasting_reason().is_some();

    // The reason is derived from the calendar once and kept; only the
    // answer is editable afterwards.
    if log.fasting_reason.is_none() {
        log.fasting_reason =
            Some(fasting_reason_for(today, method, offset).unwrap_or(FastingReason::Other));
    }
    if log.hijri_day.is_none() {
        let h = hijri_components(today, method, offset);
        log.hijri_day = Some(h.day);
        log.hijri_month = Some(h.month);
        log.hijri_year = Some(h.year);
    }
    log.fasting_answered = true;
    log.fasting_answer = Some(answer);
    DailyLogRepo::upsert(conn, &log)?;

    let mut day = PrayerDayRepo::get_or_create(conn, &today_str)?;
    let old_total = day.total_credits_for_day;
    let new_total = day.recalculate_credits(
        profile.account_age_days(today),
        profile.current_streak,
        profile.gender,
        log.earned_fasting_reason(),
    );
    PrayerDayRepo::save(conn, &day)?;
    if new_total > old_total {
        ProfileRepo::add_credits(conn, new_total - old_total)?;
    }

    match answer {
        FastingAnswer::Yes => {
            let reason = log.fasting_reason.unwrap_or(FastingReason::Other);
            if already_earned {
                println_colored!(GREEN, "  ✓ Fast already recorded for today ({})", reason.display_name());
            } else {
                println_colored!(
                    GREEN,
                    "  ✓ {} recorded (+{} credits)",
                    reason.display_name(),
                    CreditRules::fasting_bonus(reason)
                );
            }
        }
        FastingAnswer::No => {
            println_colored!(DIM, "  Noted. No fast recorded for today.");
        }
        FastingAnswer::PreferNotToSay => {
            println_colored!(DIM, "  Noted.");
        }
    }
    Ok(())
}

// ─── Streak ──────────────────────────────────────────────────────────────────

pub fn handle_streak(conn: &Connection) -> Result<()> {
    let (today, _) = today_pair();
    let streak = StreakCalculator::recalculate_and_update(conn, today)?;
    println!();
    println_colored!(
        BOLD,
        "  Streak: {} days current  |  {} days best",
        streak.current,
        streak.best
    );
    println_colored!(DIM, "  Days count once they are over; keep going today.");
    println!();
    Ok(())
}

// ─── Journey ─────────────────────────────────────────────────────────────────

pub fn handle_journey(
    conn: &Connection,
    config: &AppConfig,
    weeks: Option<usize>,
    month: bool,
) -> Result<()> {
    let (today, _) = today_pair();

    if month {
        use chrono::Datelike;
        let summary = aggregator::month_summary(conn, today.year(), today.month())?;
        println!();
        println_colored!(GOLD, "  Journey — {}", today.format("%B %Y"));
        println!();
        print!("  ");
        for day in &summary.days {
            print!("{}", day_icon(day));
        }
        println!();
        println!();
        println_colored!(
            BOLD,
            "  {} of {} prayers  ({})",
            summary.completed_count(),
            summary.total_count(),
            format_percent(summary.completion_fraction())
        );
        println!();
        return Ok(());
    }

    let n = weeks.unwrap_or(config.journey.weeks).max(1);
    let summaries = aggregator::last_n_weeks(conn, n, today)?;

    println!();
    println_colored!(GOLD, "  Journey — last {} weeks", n);
    println!();
    for (i, week) in summaries.iter().enumerate() {
        let label = if i == 0 { "this week" } else { "" };
        print!("  {}  ", week.week_start);
        for day in &week.days {
            print!("{} ", day_icon(day));
        }
        println!(
            " {}  {}  {} full  {}",
            progress_bar(week.completed_count(), week.total_count(), 10),
            format_percent(week.completion_fraction()),
            week.days_fully_completed(),
            label
        );
    }
    println!();
    println_colored!(DIM, "  ● = 5/5   ◕ = 3-4   ◑ = 1-2   ○ = 0");
    println!();
    Ok(())
}

fn day_icon(day: &crate::models::JourneyDaySummary) -> String {
    let fraction = day.completion_fraction();
    if fraction >= 1.0 {
        format!("{}●\x1b[0m", GREEN)
    } else if fraction >= 0.6 {
        format!("{}◕\x1b[0m", AMBER)
    } else if fraction > 0.0 {
        format!("{}◑\x1b[0m", AMBER)
    } else {
        format!("{}○\x1b[0m", DIM)
    }
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(conn: &Connection, config: &AppConfig) -> Result<()> {
    let (today, today_str) = today_pair();
    let method = config.hijri.method;
    let offset = config.hijri.offset_days;
    let profile = ProfileRepo::get(conn)?;
    let streak = StreakCalculator::recalculate_and_update(conn, today)?;
    let day = PrayerDayRepo::get(conn, &today_str)?;
    let log = DailyLogRepo::get(conn, &today_str)?;

    let hijri = hijri_components(today, method, offset);
    println!();
    println_colored!(GOLD, "  {} — {}", today_str, hijri.formatted());
    println!();

    let friday = hijri::is_friday(today);
    for slot in PrayerType::active_slots(friday, profile.gender) {
        let status = day.as_ref().map_or(PrayerStatus::None, |d| d.status(slot));
        let line = format!("  {:<10}  {}", slot.display_name(), status);
        if status.is_performed() {
            println_colored!(GREEN, "{}", line);
        } else if status == PrayerStatus::Missed {
            println_colored!(RED, "{}", line);
        } else {
            println_colored!(DIM, "{}", line);
        }
    }

    println!();
    println_colored!(
        BOLD,
        "  Today: {} credits  |  Total: {}  |  Streak: {} (best {})",
        day.as_ref().map_or(0, |d| d.total_credits_for_day),
        profile.credits,
        streak.current,
        streak.best
    );

    let answered = log.as_ref().is_some_and(|l| l.fasting_answered);
    if should_show_fasting_prompt(today, method, offset) && !answered {
        let reason = fasting_reason_for(today, method, offset).unwrap_or(FastingReason::Other);
        println_colored!(
            AMBER,
            "  Today is a {} day — are you fasting? (ibtida fast yes/no)",
            reason.display_name()
        );
    }
    println!();
    Ok(())
}

// ─── Hijri ───────────────────────────────────────────────────────────────────

pub fn handle_hijri(config: &AppConfig, date_str: Option<&str>) -> Result<()> {
    let date = match date_str {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| anyhow!("Bad date '{}', expected yyyy-MM-dd", s))?,
        None => Local::now().date_naive(),
    };
    let method = config.hijri.method;
    let offset = config.hijri.offset_days;
    let hijri = hijri_components(date, method, offset);

    println!();
    println_colored!(GOLD, "  {}  →  {}", date.format("%Y-%m-%d"), hijri.formatted());
    println_colored!(DIM, "  Method: {}", method.as_str());
    if is_white_day(date, method, offset) {
        println_colored!(BOLD, "  A White Day — fasting is recommended");
    } else if should_show_fasting_prompt(date, method, offset) {
        println_colored!(BOLD, "  A sunnah fasting day");
    }
    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(conn: &Connection, config: &AppConfig, json: bool) -> Result<()> {
    let (today, today_str) = today_pair();
    let profile = ProfileRepo::get(conn)?;
    let streak = StreakCalculator::recalculate_and_update(conn, today)?;
    let week_start = today - chrono::Duration::days(6);
    let records = PrayerDayRepo::get_range(
        conn,
        &week_start.format("%Y-%m-%d").to_string(),
        &today_str,
    )?;
    let days = aggregator::summarize_range(week_start, today, &records);
    let hijri = hijri_components(today, config.hijri.method, config.hijri.offset_days);

    if json {
        let summary = serde_json::json!({
            "date": today_str,
            "hijriDate": hijri.formatted(),
            "credits": profile.credits,
            "currentStreak": streak.current,
            "bestStreak": streak.best,
            "days": days,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("# ibtida — Weekly Summary");
    println!("# {} ({})", today_str, hijri.formatted());
    println!();
    println!("## Prayer Completion (last 7 days)");
    for day in &days {
        println!(
            "  {}  {}/5  {}",
            day.date,
            day.completed_count,
            progress_bar(day.completed_count, day.total_count, 5)
        );
    }
    println!();
    println!("## Summary");
    println!("  Streak:   {} days (best: {})", streak.current, streak.best);
    println!("  Credits:  {}", profile.credits);
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}
