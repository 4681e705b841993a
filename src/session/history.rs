//! Session history grouped by calendar day.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::api::SessionLog;

/// Sessions started on one local calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryDay {
    pub date: NaiveDate,
    pub sessions: Vec<SessionLog>,
}

impl HistoryDay {
    /// Date key in `YYYY-MM-DD` form
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn total_calories(&self) -> u32 {
        self.sessions.iter().map(|s| s.total_calories).sum()
    }
}

/// Group sessions by the local date they started on, newest day first.
///
/// Within a day, sessions are ordered by start time.
pub fn group_by_day(sessions: &[SessionLog]) -> Vec<HistoryDay> {
    let mut grouped: BTreeMap<NaiveDate, Vec<SessionLog>> = BTreeMap::new();
    for session in sessions {
        grouped
            .entry(session.local_date())
            .or_default()
            .push(session.clone());
    }

    grouped
        .into_iter()
        .rev()
        .map(|(date, mut sessions)| {
            sessions.sort_by_key(|s| s.start_time);
            HistoryDay { date, sessions }
        })
        .collect()
}

/// Format a duration as `H:MM:SS` or `M:SS`
pub fn format_duration(duration: chrono::Duration) -> String {
    let total = duration.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
