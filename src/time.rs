//! Epoch clock
use crate::{constants::VERNAL_EQUINOX_DAY, prelude::Epoch};

/// Cumulated number of days at the start of each month (non leap year)
const CUMULATED_DAYS: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

const DAYS_PER_YEAR: i64 = 365;

const MINUTES_PER_DAY: i64 = 1440;

/// Returns number of whole minutes elapsed since the vernal equinox,
/// the time base of orbit propagation.
///
/// [Epoch] is interpreted in UTC: build it in your own timezone and let
/// [Epoch] carry the offset. Seconds are discarded.
///
/// Leap years are not taken into account: every year is 365 days long
/// and the equinox always occurs on the 81st day (March 22nd).
pub fn minutes_since_equinox(t: Epoch) -> i64 {
    let (_, month, day, hour, minute, _, _) = t.to_gregorian_utc();

    let day_of_year = CUMULATED_DAYS[(month as usize - 1) % 12] + day as i64;
    let days = (day_of_year - VERNAL_EQUINOX_DAY).rem_euclid(DAYS_PER_YEAR);

    days * MINUTES_PER_DAY + hour as i64 * 60 + minute as i64
}
