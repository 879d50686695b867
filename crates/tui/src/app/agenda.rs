//! Splits events into today, upcoming and past relative to "now".

use chrono::{DateTime, Duration, NaiveTime, TimeZone};
use chrono_tz::Tz;
use engine::Event;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Agenda {
    /// Soonest first.
    pub today: Vec<Event>,
    /// Soonest first.
    pub upcoming: Vec<Event>,
    /// Most recent first.
    pub past: Vec<Event>,
}

/// Midnight of the calendar day containing `now`, in `now`'s zone.
///
/// When midnight does not exist (a DST jump at 00:00) the earliest valid
/// instant of that day is used.
pub fn day_start(now: DateTime<Tz>) -> DateTime<Tz> {
    let zone = now.timezone();
    let date = now.date_naive();
    let midnight = date.and_time(NaiveTime::MIN);
    zone.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            (1..=24 * 60).find_map(|minutes| {
                zone.from_local_datetime(&(midnight + Duration::minutes(minutes)))
                    .earliest()
            })
        })
        .unwrap_or(now)
}

/// Partition `events` around `now`.
///
/// Today spans `[day_start, day_start + 24h)`. Later events are upcoming and
/// the rest are past. Sorts are stable, so events sharing a timestamp keep
/// their input order.
pub fn classify(events: &[Event], now: DateTime<Tz>) -> Agenda {
    let start = day_start(now);
    let end = start + Duration::hours(24);
    let now_utc = now.to_utc();
    let (start, end) = (start.to_utc(), end.to_utc());

    let mut agenda = Agenda::default();
    for event in events {
        let at = event.event_time;
        if start <= at && at < end {
            agenda.today.push(event.clone());
        } else if at > now_utc {
            agenda.upcoming.push(event.clone());
        } else {
            agenda.past.push(event.clone());
        }
    }

    agenda.today.sort_by_key(|e| e.event_time);
    agenda.upcoming.sort_by_key(|e| e.event_time);
    agenda.past.sort_by(|a, b| b.event_time.cmp(&a.event_time));
    agenda
}
