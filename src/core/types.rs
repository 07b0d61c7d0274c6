//! Core data types shared by the normalizer, aggregator and emitters
//!
//! Every export layout is converted into `Play` before anything else runs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::consts::{MS_PER_MINUTE, PERIOD_FORMAT, SUBJECT_SEPARATOR};

/// One normalized listening event
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Play {
    /// When the play ended (UTC)
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) duration_minutes: f64,
    /// Artist or show name
    pub(crate) artist_key: String,
    /// "<artist> | <title>"
    pub(crate) subject_key: String,
}

impl Play {
    /// Play of a titled item: subject key is "<artist> | <title>"
    pub(crate) fn titled(
        timestamp: DateTime<Utc>,
        ms_played: u64,
        artist: String,
        title: &str,
    ) -> Self {
        let subject_key = format!("{artist}{SUBJECT_SEPARATOR}{title}");
        Play {
            timestamp,
            duration_minutes: ms_played as f64 / MS_PER_MINUTE,
            artist_key: artist,
            subject_key,
        }
    }

    /// Play with a single name serving as both artist and subject
    pub(crate) fn untitled(timestamp: DateTime<Utc>, ms_played: u64, name: String) -> Self {
        Play {
            timestamp,
            duration_minutes: ms_played as f64 / MS_PER_MINUTE,
            subject_key: name.clone(),
            artist_key: name,
        }
    }
}

/// Weekly bucket identifier, e.g. "Week 07 of 2021"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub(crate) struct PeriodLabel(String);

impl PeriodLabel {
    pub(crate) fn from_date(date: NaiveDate) -> Self {
        PeriodLabel(date.format(PERIOD_FORMAT).to_string())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Running totals of one subject, one cell per period it was active in
#[derive(Debug, Clone, Default)]
pub(crate) struct SubjectSeries {
    pub(crate) key: String,
    /// Cells in first-write order; values never decrease
    pub(crate) cells: Vec<(PeriodLabel, f64)>,
}

impl SubjectSeries {
    /// Final cumulative total (last written cell)
    pub(crate) fn total(&self) -> f64 {
        self.cells.last().map_or(0.0, |(_, v)| *v)
    }

    #[cfg(test)]
    pub(crate) fn value_at(&self, label: &PeriodLabel) -> Option<f64> {
        self.cells
            .iter()
            .rev()
            .find(|(l, _)| l == label)
            .map(|(_, v)| *v)
    }
}

/// Subject key -> cumulative minutes per period, subjects in first-insertion order
#[derive(Debug, Clone, Default)]
pub(crate) struct CumulativeSeries {
    subjects: Vec<SubjectSeries>,
    index: HashMap<String, usize>,
}

impl CumulativeSeries {
    /// Record `total` for `key` at `label`. Input must be chronological, so a
    /// repeated label can only be the subject's latest cell.
    pub(crate) fn record(&mut self, key: &str, label: &PeriodLabel, total: f64) {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.subjects.push(SubjectSeries {
                    key: key.to_string(),
                    cells: Vec::new(),
                });
                self.index.insert(key.to_string(), self.subjects.len() - 1);
                self.subjects.len() - 1
            }
        };
        let cells = &mut self.subjects[idx].cells;
        match cells.last_mut() {
            Some((last, value)) if last == label => *value = total,
            _ => cells.push((label.clone(), total)),
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&SubjectSeries> {
        self.index.get(key).map(|&idx| &self.subjects[idx])
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &SubjectSeries> {
        self.subjects.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.subjects.len()
    }
}

/// Inclusive calendar-day bounds for `--since` / `--until`
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DateFilter {
    pub(crate) since: Option<NaiveDate>,
    pub(crate) until: Option<NaiveDate>,
}

impl DateFilter {
    pub(crate) fn new(since: Option<NaiveDate>, until: Option<NaiveDate>) -> Self {
        Self { since, until }
    }

    pub(crate) fn is_unbounded(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }

    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        if let Some(s) = self.since
            && date < s
        {
            return false;
        }
        if let Some(u) = self.until
            && date > u
        {
            return false;
        }
        true
    }
}
