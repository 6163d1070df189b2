use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ibtida",
    version,
    about = "A terminal companion for tracking prayers, fasting, streaks, and journey credits"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// First-run setup (gender, menstrual mode, Hijri method)
    Setup {
        /// Reset existing configuration
        #[arg(long)]
        reset: bool,
    },
    /// Set today's status for a prayer slot
    Mark {
        /// Prayer name (fajr, dhuhr, asr, maghrib, isha, jumuah)
        prayer: String,
        /// Status (none, onTime, late, qada, missed, prayedAtMasjid, prayedAtHome, menstrual, jummah)
        status: String,
    },
    /// Flag today as a menstrual-exempt day
    Menstrual {
        /// Remove the flag instead
        #[arg(long)]
        off: bool,
    },
    /// Answer today's fasting prompt
    Fast {
        /// yes, no, or skip
        answer: String,
    },
    /// Recompute and show the prayer streak
    Streak,
    /// Show the journey grid for recent weeks
    Journey {
        /// Number of weeks to show (defaults to the configured value)
        #[arg(long)]
        weeks: Option<usize>,
        /// Show the current calendar month instead
        #[arg(long, conflicts_with = "weeks")]
        month: bool,
    },
    /// Show today's overview
    Stats,
    /// Show the Hijri date for today or a given date
    Hijri {
        /// Gregorian date as yyyy-MM-dd (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Export a weekly summary to stdout
    Export {
        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}
