//! The credit table and bonus formula behind the journey point system.
//!
//! Everything here is a pure lookup or arithmetic over small integers; no
//! I/O, no clock access. Callers supply the streak and account-age context.

use crate::models::daily_log::FastingReason;
use crate::models::prayer::PrayerStatus;

/// Bonus for the sunnah prayers accompanying a day with at least one
/// performed obligatory prayer. At most once per day.
pub const SUNNAH_PRAYER_BONUS: u32 = 5;

/// Account age (in days) at which the sunnah bonus unlocks.
pub const SUNNAH_UNLOCK_DAYS: u32 = 7;

/// Bonus for a logged Monday or Thursday sunnah fast.
pub const MONDAY_THURSDAY_FAST_BONUS: u32 = 10;

/// Bonus for a logged fast on a White Day (13th-15th of the Hijri month).
pub const WHITE_DAY_FAST_BONUS: u32 = 15;

/// Bonus for a voluntary fast on any other day.
pub const VOLUNTARY_FAST_BONUS: u32 = 3;

/// Streak length at which the consistency bonus starts applying.
pub const STREAK_MILESTONE_DAYS: u32 = 7;

/// Daily consistency bonus once the streak milestone is reached.
pub const STREAK_MILESTONE_BONUS: u32 = 5;

pub struct CreditRules;

impl CreditRules {
    /// Base credit for a single slot. Total over every status; statuses
    /// that are not performed prayers are worth nothing.
    pub fn base_credit_value(status: PrayerStatus) -> u32 {
        match status {
            PrayerStatus::Jummah => 20,
            PrayerStatus::PrayedAtMasjid => 15,
            PrayerStatus::OnTime => 10,
            PrayerStatus::PrayedAtHome => 10,
            PrayerStatus::Late => 5,
            PrayerStatus::Qada => 3,
            PrayerStatus::None | PrayerStatus::Missed | PrayerStatus::Menstrual => 0,
        }
    }

    /// Combine a day's summed base credits with the per-day bonuses.
    ///
    /// A day with no performed prayers (base 0) earns nothing. The sunnah
    /// bonus applies once per qualifying day, unlocking after the first
    /// week of account age; a consistency bonus applies once the streak
    /// has reached a week. The cached streak is clamped to the account
    /// age, which bounds it when the cache lags a recompute.
    pub fn calculate_final_credits(
        base_credits: u32,
        account_age_days: u32,
        current_streak: u32,
    ) -> u32 {
        if base_credits == 0 {
            return 0;
        }
        let mut total = base_credits;
        if account_age_days >= SUNNAH_UNLOCK_DAYS {
            total += SUNNAH_PRAYER_BONUS;
        }
        let streak = current_streak.min(account_age_days);
        if streak >= STREAK_MILESTONE_DAYS {
            total += STREAK_MILESTONE_BONUS;
        }
        total
    }

    /// Bonus for a fast logged with the given reason. One bonus category
    /// per day; the reason already encodes which category the day fell in.
    pub fn fasting_bonus(reason: FastingReason) -> u32 {
        match reason {
            FastingReason::Monday | FastingReason::Thursday => MONDAY_THURSDAY_FAST_BONUS,
            FastingReason::WhiteDay => WHITE_DAY_FAST_BONUS,
            FastingReason::Other => VOLUNTARY_FAST_BONUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn performed_statuses_earn_credit() {
        for status in PrayerStatus::all() {
            if status.is_performed() {
                assert!(
                    CreditRules::base_credit_value(status) > 0,
                    "{status:?} should earn credit"
                );
            }
        }
    }

    #[test]
    fn non_performed_statuses_earn_nothing() {
        assert_eq!(CreditRules::base_credit_value(PrayerStatus::None), 0);
        assert_eq!(CreditRules::base_credit_value(PrayerStatus::Missed), 0);
        assert_eq!(CreditRules::base_credit_value(PrayerStatus::Menstrual), 0);
    }

    #[test]
    fn credit_ordering() {
        let jummah = CreditRules::base_credit_value(PrayerStatus::Jummah);
        let masjid = CreditRules::base_credit_value(PrayerStatus::PrayedAtMasjid);
        let on_time = CreditRules::base_credit_value(PrayerStatus::OnTime);
        assert!(jummah >= masjid);
        assert!(masjid >= on_time);
        assert!(on_time > 0);
    }

    #[test]
    fn empty_day_earns_no_bonus() {
        assert_eq!(CreditRules::calculate_final_credits(0, 100, 100), 0);
    }

    #[test]
    fn single_prayer_on_new_account_is_base_only() {
        let base = CreditRules::base_credit_value(PrayerStatus::OnTime);
        assert_eq!(CreditRules::calculate_final_credits(base, 0, 0), base);
        assert_eq!(CreditRules::calculate_final_credits(base, 6, 0), base);
    }

    #[test]
    fn performed_day_earns_sunnah_bonus_after_first_week() {
        let base = CreditRules::base_credit_value(PrayerStatus::OnTime);
        assert_eq!(
            CreditRules::calculate_final_credits(base, SUNNAH_UNLOCK_DAYS, 0),
            base + SUNNAH_PRAYER_BONUS
        );
    }

    #[test]
    fn week_streak_earns_consistency_bonus() {
        let base = 10;
        assert_eq!(
            CreditRules::calculate_final_credits(base, 30, 7),
            base + SUNNAH_PRAYER_BONUS + STREAK_MILESTONE_BONUS
        );
        assert_eq!(
            CreditRules::calculate_final_credits(base, 30, 6),
            base + SUNNAH_PRAYER_BONUS
        );
    }

    #[test]
    fn streak_clamped_to_account_age() {
        // A cached streak larger than the account age cannot trigger the
        // milestone on a younger account.
        assert_eq!(CreditRules::calculate_final_credits(10, 3, 30), 10);
        assert_eq!(
            CreditRules::calculate_final_credits(10, 8, 30),
            10 + SUNNAH_PRAYER_BONUS + STREAK_MILESTONE_BONUS
        );
    }

    #[test]
    fn fasting_bonuses_by_reason() {
        assert_eq!(
            CreditRules::fasting_bonus(FastingReason::Monday),
            MONDAY_THURSDAY_FAST_BONUS
        );
        assert_eq!(
            CreditRules::fasting_bonus(FastingReason::Thursday),
            MONDAY_THURSDAY_FAST_BONUS
        );
        assert_eq!(
            CreditRules::fasting_bonus(FastingReason::WhiteDay),
            WHITE_DAY_FAST_BONUS
        );
        assert_eq!(
            CreditRules::fasting_bonus(FastingReason::Other),
            VOLUNTARY_FAST_BONUS
        );
    }
}
