//! Continuous weekly time axis shared by both output matrices

use chrono::{Days, NaiveDate};
use std::collections::HashSet;

use crate::core::types::{PeriodLabel, Play};
use crate::error::AppError;
use crate::utils::Timezone;

/// Every period label from the first to the last play's day, without gaps.
///
/// Each calendar day in the range is visited, so weeks without any play still
/// get a column. Labels keep first-occurrence order.
pub(crate) fn build_axis(plays: &[Play], timezone: Timezone) -> Result<Vec<PeriodLabel>, AppError> {
    let mut days = plays.iter().map(|p| timezone.day_of(p.timestamp));
    let first = days.next().ok_or(AppError::EmptyTimeline)?;
    let (min, max) = days.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Ok(axis_between(min, max))
}

/// Labels for the inclusive day range `start..=end`
pub(crate) fn axis_between(start: NaiveDate, end: NaiveDate) -> Vec<PeriodLabel> {
    let mut seen = HashSet::new();
    let mut axis = Vec::new();
    let mut day = start;
    while day <= end {
        let label = PeriodLabel::from_date(day);
        if seen.insert(label.clone()) {
            axis.push(label);
        }
        match day.checked_add_days(Days::new(1)) {
            Some(next) => day = next,
            None => break,
        }
    }
    axis
}
