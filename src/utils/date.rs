use chrono::NaiveDate;

use crate::error::AppError;

/// Parse a `--since`/`--until` bound, accepting YYYYMMDD or YYYY-MM-DD
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    let trimmed = s.trim();
    if trimmed.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y%m%d")
    {
        return Ok(d);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| AppError::InvalidDate {
        input: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compact_and_dashed() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 9).unwrap();
        assert_eq!(parse_date("20210309").unwrap(), expected);
        assert_eq!(parse_date("2021-03-09").unwrap(), expected);
        assert_eq!(parse_date(" 2021-03-09 ").unwrap(), expected);
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_date("March 9").unwrap_err();
        assert!(err.to_string().contains("March 9"));
        assert!(parse_date("20211350").is_err());
    }
}
