#![allow(dead_code)]
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::models::profile::Gender;

/// The five daily prayer slots, plus the Friday congregational prayer
/// that stands in for Dhuhr for the brother cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerType {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    Jumuah,
}

impl PrayerType {
    /// The five obligatory slots in time order. Jumuah is never a sixth
    /// slot; it substitutes for Dhuhr on Fridays.
    pub fn obligatory() -> [PrayerType; 5] {
        [
            PrayerType::Fajr,
            PrayerType::Dhuhr,
            PrayerType::Asr,
            PrayerType::Maghrib,
            PrayerType::Isha,
        ]
    }

    /// The slots shown for a given day. Exactly five, always.
    pub fn active_slots(is_friday: bool, gender: Gender) -> [PrayerType; 5] {
        let mut slots = Self::obligatory();
        if is_friday && gender == Gender::Brother {
            slots[1] = PrayerType::Jumuah;
        }
        slots
    }

    /// The storage slot backing this prayer. Jumuah lives in the Dhuhr
    /// column so a day always has the same five columns.
    pub fn storage_slot(&self) -> PrayerType {
        match self {
            PrayerType::Jumuah => PrayerType::Dhuhr,
            other => *other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "fajr",
            PrayerType::Dhuhr => "dhuhr",
            PrayerType::Asr => "asr",
            PrayerType::Maghrib => "maghrib",
            PrayerType::Isha => "isha",
            PrayerType::Jumuah => "jumuah",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "Fajr",
            PrayerType::Dhuhr => "Dhuhr",
            PrayerType::Asr => "Asr",
            PrayerType::Maghrib => "Maghrib",
            PrayerType::Isha => "Isha",
            PrayerType::Jumuah => "Jumu'ah",
        }
    }
}

impl std::fmt::Display for PrayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PrayerType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fajr" => Ok(PrayerType::Fajr),
            "dhuhr" | "zuhr" | "dhuhur" => Ok(PrayerType::Dhuhr),
            "asr" => Ok(PrayerType::Asr),
            "maghrib" => Ok(PrayerType::Maghrib),
            "isha" => Ok(PrayerType::Isha),
            "jumuah" | "jummah" | "jumu'ah" | "jumua" => Ok(PrayerType::Jumuah),
            _ => Err(anyhow::anyhow!("Unknown prayer type: {}", s)),
        }
    }
}

/// How a single prayer slot was (or wasn't) performed.
///
/// Wire strings are camelCase and must round-trip exactly; a handful of
/// legacy spellings from older exports are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrayerStatus {
    None,
    OnTime,
    Late,
    Qada,
    Missed,
    PrayedAtMasjid,
    PrayedAtHome,
    Menstrual,
    Jummah,
}

#[derive(Debug, Clone, Error)]
#[error("unknown prayer status: {0}")]
pub struct UnknownStatus(pub String);

impl PrayerStatus {
    pub fn all() -> [PrayerStatus; 9] {
        [
            PrayerStatus::None,
            PrayerStatus::OnTime,
            PrayerStatus::Late,
            PrayerStatus::Qada,
            PrayerStatus::Missed,
            PrayerStatus::PrayedAtMasjid,
            PrayerStatus::PrayedAtHome,
            PrayerStatus::Menstrual,
            PrayerStatus::Jummah,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerStatus::None => "none",
            PrayerStatus::OnTime => "onTime",
            PrayerStatus::Late => "late",
            PrayerStatus::Qada => "qada",
            PrayerStatus::Missed => "missed",
            PrayerStatus::PrayedAtMasjid => "prayedAtMasjid",
            PrayerStatus::PrayedAtHome => "prayedAtHome",
            PrayerStatus::Menstrual => "menstrual",
            PrayerStatus::Jummah => "jummah",
        }
    }

    /// Whether this status counts as a performed prayer. Drives both the
    /// Sunnah-bonus eligibility and journey completion counts.
    pub fn is_performed(&self) -> bool {
        matches!(
            self,
            PrayerStatus::OnTime
                | PrayerStatus::Late
                | PrayerStatus::Qada
                | PrayerStatus::PrayedAtMasjid
                | PrayerStatus::PrayedAtHome
                | PrayerStatus::Jummah
        )
    }

    /// Parse a stored status string, degrading to `None` rather than
    /// failing. Historical data may carry strings this version no longer
    /// writes; a bad status is worth 0 credits, not a crash.
    pub fn parse_lossy(s: &str) -> PrayerStatus {
        match s.parse() {
            Ok(status) => status,
            Err(_) => {
                log::warn!("unknown prayer status '{}', treating as none", s);
                PrayerStatus::None
            }
        }
    }

    /// Statuses a user may pick for one slot. Jummah is only offered on
    /// the Friday Jumu'ah slot for brothers; menstrual only for sisters
    /// with menstrual mode enabled.
    pub fn options_for(gender: Gender, menstrual_mode: bool, jumuah_slot: bool) -> Vec<PrayerStatus> {
        let mut options = vec![
            PrayerStatus::None,
            PrayerStatus::OnTime,
            PrayerStatus::Late,
            PrayerStatus::Qada,
            PrayerStatus::Missed,
            PrayerStatus::PrayedAtMasjid,
            PrayerStatus::PrayedAtHome,
        ];
        if gender == Gender::Brother && jumuah_slot {
            options.push(PrayerStatus::Jummah);
        }
        if gender == Gender::Sister && menstrual_mode {
            options.push(PrayerStatus::Menstrual);
        }
        options
    }
}

impl std::fmt::Display for PrayerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrayerStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(PrayerStatus::None),
            "onTime" => Ok(PrayerStatus::OnTime),
            "late" | "later" => Ok(PrayerStatus::Late),
            "qada" | "made up" | "madeup" => Ok(PrayerStatus::Qada),
            "missed" => Ok(PrayerStatus::Missed),
            "prayedAtMasjid" => Ok(PrayerStatus::PrayedAtMasjid),
            "prayedAtHome" => Ok(PrayerStatus::PrayedAtHome),
            "menstrual" => Ok(PrayerStatus::Menstrual),
            "jummah" | "jumu'ah" | "jumua" | "jumah" => Ok(PrayerStatus::Jummah),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl Serialize for PrayerStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PrayerStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(PrayerStatus::parse_lossy(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_roundtrip() {
        for status in PrayerStatus::all() {
            let parsed: PrayerStatus = status.as_str().parse().expect("should parse");
            assert_eq!(parsed, status, "roundtrip failed for {status:?}");
        }
    }

    #[test]
    fn legacy_aliases_parse() {
        assert_eq!("later".parse::<PrayerStatus>().unwrap(), PrayerStatus::Late);
        assert_eq!("madeup".parse::<PrayerStatus>().unwrap(), PrayerStatus::Qada);
        assert_eq!("made up".parse::<PrayerStatus>().unwrap(), PrayerStatus::Qada);
        assert_eq!("jumua".parse::<PrayerStatus>().unwrap(), PrayerStatus::Jummah);
        assert_eq!("jumu'ah".parse::<PrayerStatus>().unwrap(), PrayerStatus::Jummah);
        assert_eq!("jumah".parse::<PrayerStatus>().unwrap(), PrayerStatus::Jummah);
    }

    #[test]
    fn unknown_status_degrades_to_none() {
        assert!("pending".parse::<PrayerStatus>().is_err());
        assert_eq!(PrayerStatus::parse_lossy("pending"), PrayerStatus::None);
        assert_eq!(PrayerStatus::parse_lossy(""), PrayerStatus::None);
    }

    #[test]
    fn performed_set() {
        assert!(PrayerStatus::OnTime.is_performed());
        assert!(PrayerStatus::Late.is_performed());
        assert!(PrayerStatus::Qada.is_performed());
        assert!(PrayerStatus::PrayedAtMasjid.is_performed());
        assert!(PrayerStatus::PrayedAtHome.is_performed());
        assert!(PrayerStatus::Jummah.is_performed());
        assert!(!PrayerStatus::None.is_performed());
        assert!(!PrayerStatus::Missed.is_performed());
        assert!(!PrayerStatus::Menstrual.is_performed());
    }

    #[test]
    fn friday_substitutes_jumuah_for_brothers_only() {
        let brother = PrayerType::active_slots(true, Gender::Brother);
        assert_eq!(brother[1], PrayerType::Jumuah);
        assert_eq!(brother.len(), 5);

        let sister = PrayerType::active_slots(true, Gender::Sister);
        assert_eq!(sister[1], PrayerType::Dhuhr);

        let weekday = PrayerType::active_slots(false, Gender::Brother);
        assert_eq!(weekday[1], PrayerType::Dhuhr);
    }

    #[test]
    fn jumuah_stored_in_dhuhr_slot() {
        assert_eq!(PrayerType::Jumuah.storage_slot(), PrayerType::Dhuhr);
        assert_eq!(PrayerType::Fajr.storage_slot(), PrayerType::Fajr);
    }

    #[test]
    fn status_options_respect_cohort() {
        let brother = PrayerStatus::options_for(Gender::Brother, false, true);
        assert!(brother.contains(&PrayerStatus::Jummah));
        assert!(!brother.contains(&PrayerStatus::Menstrual));

        let sister = PrayerStatus::options_for(Gender::Sister, true, false);
        assert!(sister.contains(&PrayerStatus::Menstrual));
        assert!(!sister.contains(&PrayerStatus::Jummah));
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&PrayerStatus::PrayedAtMasjid).unwrap();
        assert_eq!(json, "\"prayedAtMasjid\"");
        let parsed: PrayerStatus = serde_json::from_str("\"jumua\"").unwrap();
        assert_eq!(parsed, PrayerStatus::Jummah);
        let unknown: PrayerStatus = serde_json::from_str("\"banana\"").unwrap();
        assert_eq!(unknown, PrayerStatus::None);
    }
}
