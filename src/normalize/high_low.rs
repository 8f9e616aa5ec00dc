//! Daily high/low extrema.
//!
//! The raw `high_low` series interleaves four event categories. Each category
//! is reduced to its maximum per calendar day and the four per-day tables are
//! outer-joined on the date.

use crate::normalize::raw::{numeric, text, with_times, RawPoint};
use crate::types::dates::IntoUtcDateTime;
use crate::types::observations::HighLowDay;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extremum {
    HigherHigh,
    High,
    Low,
    LowerLow,
}

impl Extremum {
    const ALL: [Extremum; 4] = [
        Extremum::HigherHigh,
        Extremum::High,
        Extremum::Low,
        Extremum::LowerLow,
    ];

    fn matches(self, code: &str) -> bool {
        match self {
            Extremum::HigherHigh => code == "HH",
            Extremum::High => code == "H ",
            // Matched by containment, which lets LL events into this category too.
            Extremum::Low => code.contains("L ") || code.contains("LL"),
            Extremum::LowerLow => code.contains("LL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Event {
    at: DateTime<Utc>,
    value: Option<f64>,
}

type DailyEvents = BTreeMap<NaiveDate, Vec<Event>>;

pub(crate) fn daily_extrema(station: &str, points: Vec<RawPoint>) -> Vec<HighLowDay> {
    let coded: Vec<(String, Event)> = with_times(points, station)
        .into_iter()
        .filter_map(|(at, p)| {
            let code = text(&p.ty)?;
            Some((
                code,
                Event {
                    at,
                    value: numeric(&p.v),
                },
            ))
        })
        .collect();

    let [hh, h, l, ll] = Extremum::ALL.map(|category| {
        keep_daily_max(
            coded
                .iter()
                .filter(|(code, _)| category.matches(code))
                .map(|(_, event)| *event),
        )
    });

    let dates: BTreeSet<NaiveDate> = [&hh, &h, &l, &ll]
        .into_iter()
        .flat_map(|table| table.keys().copied())
        .collect();

    let mut days = Vec::with_capacity(dates.len());
    for date in dates {
        // Tied maxima multiply out, like joining on a non-unique index.
        for e_hh in slots(&hh, date) {
            for e_h in slots(&h, date) {
                for e_l in slots(&l, date) {
                    for e_ll in slots(&ll, date) {
                        days.push(HighLowDay {
                            station_id: station.to_string(),
                            date_time: date.into_utc(),
                            hh_water_level: e_hh.and_then(|e| e.value),
                            hh_date_time: e_hh.map(|e| e.at),
                            h_water_level: e_h.and_then(|e| e.value),
                            h_date_time: e_h.map(|e| e.at),
                            l_water_level: e_l.and_then(|e| e.value),
                            l_date_time: e_l.map(|e| e.at),
                            ll_water_level: e_ll.and_then(|e| e.value),
                            ll_date_time: e_ll.map(|e| e.at),
                        });
                    }
                }
            }
        }
    }
    days
}

/// Groups events by calendar day and keeps only the events whose value equals
/// that day's maximum. Days without any numeric value are dropped.
fn keep_daily_max(events: impl Iterator<Item = Event>) -> DailyEvents {
    let mut by_date = DailyEvents::new();
    for event in events {
        by_date.entry(event.at.date_naive()).or_default().push(event);
    }
    by_date
        .into_iter()
        .filter_map(|(date, events)| {
            let max = events
                .iter()
                .filter_map(|e| e.value)
                .reduce(f64::max)?;
            let kept = events
                .into_iter()
                .filter(|e| e.value == Some(max))
                .collect();
            Some((date, kept))
        })
        .collect()
}

/// The events of one category on `date`, or a single empty slot when the
/// category has none that day.
fn slots(table: &DailyEvents, date: NaiveDate) -> Vec<Option<Event>> {
    match table.get(&date) {
        Some(events) => events.iter().copied().map(Some).collect(),
        None => vec![None],
    }
}
