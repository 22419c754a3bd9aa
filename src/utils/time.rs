// src/utils/time.rs
//
// All verification / reset tokens are stamped and compared in WIB
// (Asia/Jakarta, fixed UTC+7) so expiry checks match what was stored,
// regardless of where the process runs. The database session zone is pinned
// to the same offset at connect time.

use chrono::{FixedOffset, NaiveDateTime, Utc};

const WIB_SECS: i32 = 7 * 3600;

fn wib() -> FixedOffset {
    // UTC+7 is always a valid offset.
    FixedOffset::east_opt(WIB_SECS).unwrap()
}

/// Current wall-clock time in Asia/Jakarta.
pub fn now_wib() -> NaiveDateTime {
    Utc::now().with_timezone(&wib()).naive_local()
}

/// Expiry stamp `minutes` from now, in WIB wall-clock time.
pub fn expiry_in_minutes(minutes: i64) -> NaiveDateTime {
    now_wib() + chrono::Duration::minutes(minutes)
}

/// Whether `expiration` lies in the past relative to `now`.
pub fn is_expired_at(expiration: NaiveDateTime, now: NaiveDateTime) -> bool {
    expiration < now
}

/// Whether `expiration` has already passed in WIB.
pub fn is_expired(expiration: NaiveDateTime) -> bool {
    is_expired_at(expiration, now_wib())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 5)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn expired_when_now_is_past_expiration() {
        assert!(is_expired_at(at(10, 0), at(10, 3)));
    }

    #[test]
    fn not_expired_at_or_before_expiration() {
        assert!(!is_expired_at(at(10, 3), at(10, 0)));
        assert!(!is_expired_at(at(10, 0), at(10, 0)));
    }

    #[test]
    fn expiry_in_minutes_is_in_the_future() {
        let exp = expiry_in_minutes(3);
        assert!(!is_expired(exp));
    }
}
