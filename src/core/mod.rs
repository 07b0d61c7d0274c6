//! Core module - canonical play model, normalization and aggregation

mod aggregator;
mod axis;
mod normalize;
mod summary;
mod types;

pub(crate) use aggregator::{Aggregation, aggregate, filter_plays, sort_plays};
pub(crate) use axis::build_axis;
pub(crate) use normalize::{Variant, normalize};
pub(crate) use summary::{SubjectSummary, top_subjects};
pub(crate) use types::{CumulativeSeries, DateFilter, PeriodLabel, Play};
