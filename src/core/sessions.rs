use chrono::{DateTime, Timelike, Utc};
use chrono_tz::US::Eastern;

use crate::models::Session;

/// Session windows as (start, end) minute offsets from midnight US/Eastern.
/// A window whose start is after its end wraps midnight.
const SESSION_WINDOWS: &[(Session, u32, u32)] = &[
    (Session::Asia, 19 * 60, 3 * 60),
    (Session::London, 3 * 60, 8 * 60),
    (Session::Ny, 8 * 60, 17 * 60),
];

/// Classifies a timestamp into the trading session it falls in, if any.
pub fn session_for(utc: DateTime<Utc>) -> Option<Session> {
    let et = utc.with_timezone(&Eastern);
    let minute = et.hour() * 60 + et.minute();

    SESSION_WINDOWS
        .iter()
        .find(|(_, start, end)| {
            if start < end {
                minute >= *start && minute < *end
            } else {
                minute >= *start || minute < *end
            }
        })
        .map(|(session, _, _)| *session)
}
