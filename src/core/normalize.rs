//! Streaming history record classification
//!
//! Exports were produced in several layouts over the years. Each raw record is
//! matched against the known layouts in a fixed order and the first one that
//! fits decides how it becomes a `Play`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::core::types::Play;
use crate::error::SchemaMismatch;

// ============================================================================
// Raw layouts
// ============================================================================

/// Account-data export: `StreamingHistory*.json`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LegacyRecord {
    #[serde(deserialize_with = "legacy_end_time")]
    end_time: DateTime<Utc>,
    ms_played: u64,
    artist_name: String,
    track_name: String,
}

/// Extended history, music track
#[derive(Debug, Deserialize)]
pub(crate) struct TrackRecord {
    ts: DateTime<Utc>,
    ms_played: u64,
    master_metadata_album_artist_name: String,
    master_metadata_track_name: String,
}

/// Extended history, podcast episode
#[derive(Debug, Deserialize)]
pub(crate) struct EpisodeRecord {
    ts: DateTime<Utc>,
    ms_played: u64,
    episode_show_name: String,
    episode_name: String,
}

/// Extended history with incomplete episode metadata
#[derive(Debug, Deserialize)]
pub(crate) struct EpisodeOnlyRecord {
    ts: DateTime<Utc>,
    ms_played: u64,
    episode_name: String,
}

/// Legacy `endTime` is "YYYY-MM-DD HH:MM" without a zone; exports write it in UTC.
fn legacy_end_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

/// A raw record classified into exactly one layout.
///
/// Variants are tried top to bottom. A null, missing or mistyped field (or an
/// unparseable timestamp) rejects a layout and moves on to the next one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawRecord {
    Legacy(LegacyRecord),
    Track(TrackRecord),
    Episode(EpisodeRecord),
    EpisodeOnly(EpisodeOnlyRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Variant {
    Legacy,
    Track,
    Episode,
    EpisodeOnly,
}

impl Variant {
    pub(crate) const ALL: [Variant; 4] = [
        Variant::Legacy,
        Variant::Track,
        Variant::Episode,
        Variant::EpisodeOnly,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Variant::Legacy => "legacy",
            Variant::Track => "track",
            Variant::Episode => "episode",
            Variant::EpisodeOnly => "episode (no show)",
        }
    }
}

impl RawRecord {
    pub(crate) fn variant(&self) -> Variant {
        match self {
            RawRecord::Legacy(_) => Variant::Legacy,
            RawRecord::Track(_) => Variant::Track,
            RawRecord::Episode(_) => Variant::Episode,
            RawRecord::EpisodeOnly(_) => Variant::EpisodeOnly,
        }
    }

    pub(crate) fn into_play(self) -> Play {
        match self {
            RawRecord::Legacy(r) => {
                Play::titled(r.end_time, r.ms_played, r.artist_name, &r.track_name)
            }
            RawRecord::Track(r) => Play::titled(
                r.ts,
                r.ms_played,
                r.master_metadata_album_artist_name,
                &r.master_metadata_track_name,
            ),
            RawRecord::Episode(r) => {
                Play::titled(r.ts, r.ms_played, r.episode_show_name, &r.episode_name)
            }
            RawRecord::EpisodeOnly(r) => Play::untitled(r.ts, r.ms_played, r.episode_name),
        }
    }
}

// ============================================================================
// Classification
// ============================================================================

fn classify(raw: &Value) -> Result<RawRecord, SchemaMismatch> {
    RawRecord::deserialize(raw).map_err(|_| SchemaMismatch {
        fields: present_fields(raw),
    })
}

/// Map one raw record to a `Play`, reporting which layout it matched
pub(crate) fn normalize(raw: &Value) -> Result<(Variant, Play), SchemaMismatch> {
    let record = classify(raw)?;
    Ok((record.variant(), record.into_play()))
}

/// Non-null keys of an object, or the JSON type for anything else
fn present_fields(raw: &Value) -> Vec<String> {
    match raw {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, _)| k.clone())
            .collect(),
        Value::Null => vec!["<null>".to_string()],
        Value::Array(_) => vec!["<array>".to_string()],
        Value::String(_) => vec!["<string>".to_string()],
        Value::Number(_) => vec!["<number>".to_string()],
        Value::Bool(_) => vec!["<bool>".to_string()],
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn legacy_record() {
        let raw = json!({
            "endTime": "2021-01-05 13:07",
            "artistName": "Daft Punk",
            "trackName": "Veridis Quo",
            "msPlayed": 120000
        });
        let record = classify(&raw).unwrap();
        assert_eq!(record.variant(), Variant::Legacy);

        let play = record.into_play();
        assert_eq!(play.timestamp, ts("2021-01-05T13:07:00Z"));
        assert_eq!(play.duration_minutes, 2.0);
        assert_eq!(play.artist_key, "Daft Punk");
        assert_eq!(play.subject_key, "Daft Punk | Veridis Quo");
    }

    #[test]
    fn extended_track_record() {
        let raw = json!({
            "ts": "2021-03-01T08:15:30Z",
            "ms_played": 30000,
            "master_metadata_track_name": "Intro",
            "master_metadata_album_artist_name": "The xx",
            "master_metadata_album_album_name": "xx",
            "episode_name": null,
            "episode_show_name": null,
            "shuffle": false
        });
        let record = classify(&raw).unwrap();
        assert_eq!(record.variant(), Variant::Track);

        let play = record.into_play();
        assert_eq!(play.timestamp, ts("2021-03-01T08:15:30Z"));
        assert_eq!(play.duration_minutes, 0.5);
        assert_eq!(play.artist_key, "The xx");
        assert_eq!(play.subject_key, "The xx | Intro");
    }

    #[test]
    fn podcast_episode_record() {
        let raw = json!({
            "ts": "2021-03-01T08:15:30Z",
            "ms_played": 60000,
            "master_metadata_track_name": null,
            "master_metadata_album_artist_name": null,
            "episode_name": "Episode 12",
            "episode_show_name": "Some Show"
        });
        let (variant, play) = normalize(&raw).unwrap();
        assert_eq!(variant, Variant::Episode);
        assert_eq!(play.artist_key, "Some Show");
        assert_eq!(play.subject_key, "Some Show | Episode 12");
    }

    #[test]
    fn episode_without_show_falls_back_to_episode_name() {
        let raw = json!({
            "ts": "2021-03-01T08:15:30Z",
            "ms_played": 1000,
            "episode_name": "Lonely Episode",
            "episode_show_name": null
        });
        let record = classify(&raw).unwrap();
        assert_eq!(record.variant(), Variant::EpisodeOnly);

        let play = record.into_play();
        assert_eq!(play.artist_key, "Lonely Episode");
        assert_eq!(play.subject_key, "Lonely Episode");
    }

    #[test]
    fn legacy_takes_precedence_over_extended() {
        let raw = json!({
            "endTime": "2021-01-05 13:07",
            "msPlayed": 1000,
            "artistName": "Legacy Artist",
            "trackName": "Legacy Track",
            "ts": "2022-01-01T00:00:00Z",
            "ms_played": 5000,
            "master_metadata_album_artist_name": "Extended Artist",
            "master_metadata_track_name": "Extended Track"
        });
        let record = classify(&raw).unwrap();
        assert_eq!(record.variant(), Variant::Legacy);
        assert_eq!(record.into_play().artist_key, "Legacy Artist");
    }

    #[test]
    fn track_missing_title_falls_through_to_episode() {
        let raw = json!({
            "ts": "2021-03-01T08:15:30Z",
            "ms_played": 1000,
            "master_metadata_album_artist_name": "Half Tagged",
            "episode_name": "Ep",
            "episode_show_name": "Show"
        });
        assert_eq!(classify(&raw).unwrap().variant(), Variant::Episode);
    }

    #[test]
    fn malformed_legacy_time_falls_through() {
        let raw = json!({
            "endTime": "05/01/2021",
            "msPlayed": 1000,
            "artistName": "A",
            "trackName": "B",
            "ts": "2021-03-01T08:15:30Z",
            "ms_played": 1000,
            "episode_name": "Ep"
        });
        assert_eq!(classify(&raw).unwrap().variant(), Variant::EpisodeOnly);
    }

    #[test]
    fn zero_duration_is_accepted() {
        let raw = json!({
            "endTime": "2021-01-05 13:07",
            "msPlayed": 0,
            "artistName": "A",
            "trackName": "Skipped"
        });
        assert_eq!(normalize(&raw).unwrap().1.duration_minutes, 0.0);
    }

    #[test]
    fn unknown_layout_is_a_mismatch() {
        let raw = json!({
            "ts": "2021-03-01T08:15:30Z",
            "ms_played": 1000,
            "master_metadata_track_name": null,
            "platform": "android"
        });
        let err = normalize(&raw).unwrap_err();
        assert_eq!(err.fields, ["ms_played", "platform", "ts"]);
    }

    #[test]
    fn negative_duration_is_a_mismatch() {
        let raw = json!({
            "endTime": "2021-01-05 13:07",
            "msPlayed": -5,
            "artistName": "A",
            "trackName": "B"
        });
        assert!(normalize(&raw).is_err());
    }

    #[test]
    fn non_object_is_a_mismatch() {
        let err = normalize(&json!(42)).unwrap_err();
        assert_eq!(err.fields, ["<number>"]);
    }
}
