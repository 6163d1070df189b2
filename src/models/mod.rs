pub mod daily_log;
pub mod journey;
pub mod prayer;
pub mod prayer_day;
pub mod profile;

pub use daily_log::{DailyLog, FastingAnswer, FastingReason};
pub use journey::{JourneyDaySummary, JourneyMonthSummary, JourneyWeekSummary, Streak};
pub use prayer::{PrayerStatus, PrayerType};
pub use prayer_day::PrayerDay;
pub use profile::{Gender, UserProfile};
