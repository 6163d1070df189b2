use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::credits::rules::CreditRules;
use crate::models::daily_log::FastingReason;
use crate::models::prayer::{PrayerStatus, PrayerType};
use crate::models::profile::Gender;

/// The five prayer statuses for one calendar day, plus the derived credit
/// total. Mirrors the one-row-per-day shape of the store.
///
/// Mutation is two-phase: `set_status` is a plain write that needs no
/// external context, and `recalculate_credits` resolves the total once the
/// caller has streak and account-age context in hand. The repository
/// persists statuses and total in a single write, so the stored total is
/// never inconsistent with its source statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrayerDay {
    pub date: String,
    pub fajr: PrayerStatus,
    pub dhuhr: PrayerStatus,
    pub asr: PrayerStatus,
    pub maghrib: PrayerStatus,
    pub isha: PrayerStatus,
    pub is_menstrual_day: bool,
    pub total_credits_for_day: u32,
    pub last_updated_at: String,
}

impl PrayerDay {
    pub fn new(date: &str) -> Self {
        Self {
            date: date.to_string(),
            fajr: PrayerStatus::None,
            dhuhr: PrayerStatus::None,
            asr: PrayerStatus::None,
            maghrib: PrayerStatus::None,
            isha: PrayerStatus::None,
            is_menstrual_day: false,
            total_credits_for_day: 0,
            last_updated_at: String::new(),
        }
    }

    pub fn status(&self, slot: PrayerType) -> PrayerStatus {
        match slot.storage_slot() {
            PrayerType::Fajr => self.fajr,
            PrayerType::Dhuhr => self.dhuhr,
            PrayerType::Asr => self.asr,
            PrayerType::Maghrib => self.maghrib,
            PrayerType::Isha => self.isha,
            PrayerType::Jumuah => unreachable!("jumuah maps to the dhuhr slot"),
        }
    }

    /// Plain status write. Touches the update timestamp; credits are left
    /// stale until the caller recomputes them with context.
    pub fn set_status(&mut self, slot: PrayerType, status: PrayerStatus) {
        match slot.storage_slot() {
            PrayerType::Fajr => self.fajr = status,
            PrayerType::Dhuhr => self.dhuhr = status,
            PrayerType::Asr => self.asr = status,
            PrayerType::Maghrib => self.maghrib = status,
            PrayerType::Isha => self.isha = status,
            PrayerType::Jumuah => unreachable!("jumuah maps to the dhuhr slot"),
        }
        self.last_updated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    }

    pub fn slot_statuses(&self) -> [PrayerStatus; 5] {
        [self.fajr, self.dhuhr, self.asr, self.maghrib, self.isha]
    }

    pub fn performed_count(&self) -> u32 {
        self.slot_statuses()
            .iter()
            .filter(|s| s.is_performed())
            .count() as u32
    }

    pub fn has_menstrual_status(&self) -> bool {
        self.slot_statuses()
            .iter()
            .any(|s| *s == PrayerStatus::Menstrual)
    }

    /// Resolve the day's credit total from its statuses and the supplied
    /// context. The jummah premium is brother-only; a jummah status on a
    /// sister profile is counted at the onTime value instead.
    pub fn recalculate_credits(
        &mut self,
        account_age_days: u32,
        current_streak: u32,
        gender: Gender,
        fasting: Option<FastingReason>,
    ) -> u32 {
        let base: u32 = self
            .slot_statuses()
            .iter()
            .map(|s| match (s, gender) {
                (PrayerStatus::Jummah, Gender::Sister) => {
                    CreditRules::base_credit_value(PrayerStatus::OnTime)
                }
                (status, _) => CreditRules::base_credit_value(*status),
            })
            .sum();

        let mut total =
            CreditRules::calculate_final_credits(base, account_age_days, current_streak);
        if let Some(reason) = fasting {
            total += CreditRules::fasting_bonus(reason);
        }
        self.total_credits_for_day = total;
        total
    }
}
