use crate::core::SubjectSummary;
use crate::error::AppError;

/// Ranking as a JSON array, rank 1 first
pub(crate) fn output_top_json(top: &[SubjectSummary]) -> Result<String, AppError> {
    let output: Vec<serde_json::Value> = top
        .iter()
        .enumerate()
        .map(|(i, s)| {
            serde_json::json!({
                "rank": i + 1,
                "key": s.key,
                "minutes": s.minutes,
                "active_weeks": s.active_weeks,
                "first_week": s.first_week,
                "last_week": s.last_week,
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PeriodLabel;
    use chrono::NaiveDate;
    use serde_json::Value;

    #[test]
    fn json_has_rank_and_labels() {
        let week = PeriodLabel::from_date(NaiveDate::from_ymd_opt(2021, 1, 19).unwrap());
        let top = vec![SubjectSummary {
            key: "A | x".to_string(),
            minutes: 5.5,
            active_weeks: 1,
            first_week: Some(week.clone()),
            last_week: Some(week),
        }];

        let json: Value = serde_json::from_str(&output_top_json(&top).unwrap()).unwrap();
        let arr = json.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["rank"].as_u64(), Some(1));
        assert_eq!(arr[0]["key"].as_str(), Some("A | x"));
        assert_eq!(arr[0]["minutes"].as_f64(), Some(5.5));
        assert_eq!(arr[0]["first_week"].as_str(), Some("Week 03 of 2021"));
    }

    #[test]
    fn empty_ranking_is_empty_array() {
        assert_eq!(output_top_json(&[]).unwrap(), "[]");
    }
}
