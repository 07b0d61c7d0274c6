//! Ranking of subjects by total listening time

use serde::Serialize;

use crate::core::types::{CumulativeSeries, PeriodLabel};

/// Final standing of one subject
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SubjectSummary {
    pub(crate) key: String,
    pub(crate) minutes: f64,
    /// Number of periods with at least one play
    pub(crate) active_weeks: usize,
    pub(crate) first_week: Option<PeriodLabel>,
    pub(crate) last_week: Option<PeriodLabel>,
}

/// Subjects with the most total minutes first; ties keep first-play order
pub(crate) fn top_subjects(series: &CumulativeSeries, limit: usize) -> Vec<SubjectSummary> {
    let mut ranked: Vec<SubjectSummary> = series
        .iter()
        .map(|s| SubjectSummary {
            key: s.key.clone(),
            minutes: s.total(),
            active_weeks: s.cells.len(),
            first_week: s.cells.first().map(|(l, _)| l.clone()),
            last_week: s.cells.last().map(|(l, _)| l.clone()),
        })
        .collect();
    ranked.sort_by(|a, b| b.minutes.total_cmp(&a.minutes));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn week(d: u32) -> PeriodLabel {
        PeriodLabel::from_date(NaiveDate::from_ymd_opt(2021, 1, d).unwrap())
    }

    fn sample() -> CumulativeSeries {
        let mut series = CumulativeSeries::default();
        series.record("low", &week(5), 1.0);
        series.record("high", &week(5), 3.0);
        series.record("tie", &week(5), 1.0);
        series.record("high", &week(19), 10.0);
        series
    }

    #[test]
    fn ranks_by_final_total() {
        let top = top_subjects(&sample(), 10);
        let keys: Vec<&str> = top.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, ["high", "low", "tie"]);
        assert_eq!(top[0].minutes, 10.0);
        assert_eq!(top[0].active_weeks, 2);
        assert_eq!(top[0].first_week, Some(week(5)));
        assert_eq!(top[0].last_week, Some(week(19)));
    }

    #[test]
    fn limit_truncates() {
        assert_eq!(top_subjects(&sample(), 1).len(), 1);
        assert!(top_subjects(&sample(), 0).is_empty());
    }
}
