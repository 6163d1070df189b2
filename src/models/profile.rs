use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Brother,
    Sister,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Brother => "brother",
            Gender::Sister => "sister",
        }
    }
}

impl FromStr for Gender {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "brother" => Ok(Gender::Brother),
            "sister" => Ok(Gender::Sister),
            _ => Err(anyhow::anyhow!("Unknown gender: {} (use brother/sister)", s)),
        }
    }
}

/// The single local profile. Credits is a running total that only grows
/// from day-level accruals; streaks are cached values recomputed from the
/// prayer log, never incremented in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub credits: i64,
    pub current_streak: u32,
    pub best_streak: u32,
    pub gender: Gender,
    pub menstrual_mode_enabled: bool,
    pub onboarding_completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl UserProfile {
    /// Whole days since the profile was created, saturating at zero.
    /// `created_at` is stored as a sqlite datetime string; only the date
    /// part matters here.
    pub fn account_age_days(&self, today: NaiveDate) -> u32 {
        let date_part = self.created_at.split(' ').next().unwrap_or("");
        match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            Ok(created) => (today - created).num_days().max(0) as u32,
            Err(_) => 0,
        }
    }
}
