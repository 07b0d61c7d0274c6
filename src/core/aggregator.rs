//! Cumulative aggregation of plays into per-track and per-artist series
//!
//! Plays must arrive in chronological order: totals are running sums and a
//! period's cell keeps whatever the total was after its last play.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::core::types::{CumulativeSeries, DateFilter, PeriodLabel, Play};
use crate::utils::Timezone;

/// Stable sort by timestamp; plays with equal timestamps keep input order
pub(crate) fn sort_plays(plays: &mut [Play]) {
    plays.sort_by_key(|p| p.timestamp);
}

/// Keep plays whose local calendar day falls inside `filter`
pub(crate) fn filter_plays(plays: Vec<Play>, filter: &DateFilter, timezone: Timezone) -> Vec<Play> {
    if filter.is_unbounded() {
        return plays;
    }
    plays
        .into_iter()
        .filter(|p| filter.contains(timezone.day_of(p.timestamp)))
        .collect()
}

/// Both matrices' worth of cumulative series
#[derive(Debug, Default)]
pub(crate) struct Aggregation {
    pub(crate) tracks: CumulativeSeries,
    pub(crate) artists: CumulativeSeries,
}

/// Running totals per key, owned by one aggregation pass
#[derive(Debug, Default)]
struct RunningTotals {
    tracks: HashMap<String, f64>,
    artists: HashMap<String, f64>,
}

impl RunningTotals {
    fn add(map: &mut HashMap<String, f64>, key: &str, minutes: f64) -> f64 {
        match map.get_mut(key) {
            Some(total) => {
                *total += minutes;
                *total
            }
            None => {
                map.insert(key.to_string(), minutes);
                minutes
            }
        }
    }

    fn add_play(&mut self, play: &Play) -> (f64, f64) {
        let track = Self::add(&mut self.tracks, &play.subject_key, play.duration_minutes);
        let artist = Self::add(&mut self.artists, &play.artist_key, play.duration_minutes);
        (track, artist)
    }
}

/// Fold chronologically sorted plays into cumulative series by track and by artist
pub(crate) fn aggregate(sorted_plays: &[Play], timezone: Timezone) -> Aggregation {
    let mut totals = RunningTotals::default();
    let mut result = Aggregation::default();

    // Consecutive plays usually share a day; reuse the label instead of reformatting
    let mut current: Option<(NaiveDate, PeriodLabel)> = None;

    for play in sorted_plays {
        let day = timezone.day_of(play.timestamp);
        let label = match current.take() {
            Some((d, label)) if d == day => label,
            _ => PeriodLabel::from_date(day),
        };

        let (track_total, artist_total) = totals.add_play(play);
        result.tracks.record(&play.subject_key, &label, track_total);
        result.artists.record(&play.artist_key, &label, artist_total);
        current = Some((day, label));
    }

    result
}
