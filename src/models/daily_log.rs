use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Answer to the once-a-day fasting prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FastingAnswer {
    Yes,
    No,
    PreferNotToSay,
}

impl FastingAnswer {
    pub fn as_str(&self) -> &'static str {
        match self {
            FastingAnswer::Yes => "yes",
            FastingAnswer::No => "no",
            FastingAnswer::PreferNotToSay => "preferNotToSay",
        }
    }
}

impl FromStr for FastingAnswer {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(FastingAnswer::Yes),
            "no" => Ok(FastingAnswer::No),
            "preferNotToSay" | "skip" => Ok(FastingAnswer::PreferNotToSay),
            _ => Err(anyhow::anyhow!("Unknown fasting answer: {}", s)),
        }
    }
}

/// Why a given day was a fasting day. Computed once from the date when the
/// prompt is first answered and never rewritten, even if the answer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FastingReason {
    Monday,
    Thursday,
    WhiteDay,
    Other,
}

impl FastingReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FastingReason::Monday => "monday",
            FastingReason::Thursday => "thursday",
            FastingReason::WhiteDay => "whiteDay",
            FastingReason::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FastingReason::Monday => "Monday sunnah fast",
            FastingReason::Thursday => "Thursday sunnah fast",
            FastingReason::WhiteDay => "White Day fast",
            FastingReason::Other => "voluntary fast",
        }
    }
}

impl FromStr for FastingReason {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monday" => Ok(FastingReason::Monday),
            "thursday" => Ok(FastingReason::Thursday),
            "whiteDay" => Ok(FastingReason::WhiteDay),
            "other" => Ok(FastingReason::Other),
            _ => Err(anyhow::anyhow!("Unknown fasting reason: {}", s)),
        }
    }
}

/// One row per calendar day, created lazily the first time the fasting
/// prompt is answered. Lives independently of the prayer day record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: String,
    pub fasting_answered: bool,
    pub fasting_answer: Option<FastingAnswer>,
    pub fasting_reason: Option<FastingReason>,
    pub hijri_day: Option<u32>,
    pub hijri_month: Option<u32>,
    pub hijri_year: Option<u32>,
}

impl DailyLog {
    pub fn new(date: &str) -> Self {
        Self {
            date: date.to_string(),
            fasting_answered: false,
            fasting_answer: None,
            fasting_reason: None,
            hijri_day: None,
            hijri_month: None,
            hijri_year: None,
        }
    }

    /// The reason only earns its bonus when the user actually fasted.
    pub fn earned_fasting_reason(&self) -> Option<FastingReason> {
        if self.fasting_answer == Some(FastingAnswer::Yes) {
            self.fasting_reason
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_strings_roundtrip() {
        for answer in [
            FastingAnswer::Yes,
            FastingAnswer::No,
            FastingAnswer::PreferNotToSay,
        ] {
            assert_eq!(answer.as_str().parse::<FastingAnswer>().unwrap(), answer);
        }
    }

    #[test]
    fn reason_strings_roundtrip() {
        for reason in [
            FastingReason::Monday,
            FastingReason::Thursday,
            FastingReason::WhiteDay,
            FastingReason::Other,
        ] {
            assert_eq!(reason.as_str().parse::<FastingReason>().unwrap(), reason);
        }
    }

    #[test]
    fn reason_only_earned_on_yes() {
        let mut log = DailyLog::new("2026-08-06");
        log.fasting_reason = Some(FastingReason::Thursday);

        log.fasting_answer = Some(FastingAnswer::No);
        assert_eq!(log.earned_fasting_reason(), None);

        log.fasting_answer = Some(FastingAnswer::Yes);
        assert_eq!(log.earned_fasting_reason(), Some(FastingReason::Thursday));
    }
}
