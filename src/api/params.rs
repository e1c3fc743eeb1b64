//! Query string parsing for the search endpoints.

use url::form_urlencoded;

use crate::food::DEFAULT_LIMIT;

/// Query parameters of the food endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodParams {
    pub q: Option<String>,
    pub limit: Option<String>,
    pub data_type: Option<String>,
}

/// Query parameters of the video endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoParams {
    pub q: Option<String>,
    pub limit: Option<String>,
    pub order: Option<String>,
}

/// Iterate decoded query pairs. The first occurrence of a key wins.
fn first_values<'a>(
    raw: Option<&'a str>,
    keys: &'a [&'a str],
) -> impl Iterator<Item = (usize, String)> + 'a {
    let mut seen = vec![false; keys.len()];
    form_urlencoded::parse(raw.unwrap_or_default().as_bytes()).filter_map(move |(k, v)| {
        let index = keys.iter().position(|key| *key == k)?;
        if std::mem::replace(&mut seen[index], true) {
            return None;
        }
        Some((index, v.into_owned()))
    })
}

impl FoodParams {
    /// Parse the raw query string.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut params = Self::default();
        for (index, value) in first_values(raw, &["q", "limit", "dataType"]) {
            match index {
                0 => params.q = Some(value),
                1 => params.limit = Some(value),
                _ => params.data_type = Some(value),
            }
        }
        params
    }
}

impl VideoParams {
    /// Parse the raw query string.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut params = Self::default();
        for (index, value) in first_values(raw, &["q", "limit", "order"]) {
            match index {
                0 => params.q = Some(value),
                1 => params.limit = Some(value),
                _ => params.order = Some(value),
            }
        }
        params
    }
}

/// The query value, treating an empty string as missing.
pub fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse a result limit the way `parseInt(s, 10)` reads it.
///
/// Leading whitespace and an optional sign are skipped, then the leading run
/// of digits is used. A missing, negative, zero, or non-numeric value gives
/// the default of 5; a digit run too long for `u64` saturates.
pub fn parse_limit(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return DEFAULT_LIMIT;
    };

    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];

    if negative || digits.is_empty() {
        return DEFAULT_LIMIT;
    }

    match digits.parse::<u64>() {
        Ok(0) => DEFAULT_LIMIT,
        Ok(n) => n,
        // Only overflow is left once the run is all digits.
        Err(_) => u64::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn limit_defaults_for_missing_or_invalid() {
        assert_eq!(parse_limit(None), 5);
        assert_eq!(parse_limit(Some("")), 5);
        assert_eq!(parse_limit(Some("abc")), 5);
        assert_eq!(parse_limit(Some("0")), 5);
        assert_eq!(parse_limit(Some("-3")), 5);
        assert_eq!(parse_limit(Some("000")), 5);
    }

    #[test]
    fn large_limits_are_forwarded() {
        assert_eq!(parse_limit(Some("99999999999")), 99_999_999_999);
        assert_eq!(parse_limit(Some("99999999999999999999999")), u64::MAX);
    }

    #[test]
    fn limit_passes_positive_integers_through() {
        assert_eq!(parse_limit(Some("1")), 1);
        assert_eq!(parse_limit(Some("12")), 12);
        assert_eq!(parse_limit(Some("+7")), 7);
        assert_eq!(parse_limit(Some("  3")), 3);
    }

    #[test]
    fn limit_reads_leading_digits_like_parse_int() {
        assert_eq!(parse_limit(Some("3abc")), 3);
        assert_eq!(parse_limit(Some("2.9")), 2);
    }

    #[test]
    fn food_params_decode_and_keep_first_value() {
        let params = FoodParams::from_query(Some(
            "q=peanut+butter&limit=3&dataType=Branded%2CSR%20Legacy&q=ignored",
        ));

        assert_eq!(
            params,
            FoodParams {
                q: Some("peanut butter".to_string()),
                limit: Some("3".to_string()),
                data_type: Some("Branded,SR Legacy".to_string()),
            }
        );
    }

    #[test]
    fn video_params_from_empty_query() {
        assert_eq!(VideoParams::from_query(None), VideoParams::default());

        let params = VideoParams::from_query(Some("q=lofi&order=date&extra=1"));
        assert_eq!(params.q.as_deref(), Some("lofi"));
        assert_eq!(params.order.as_deref(), Some("date"));
        assert_eq!(params.limit, None);
    }

    #[test]
    fn empty_query_counts_as_missing() {
        assert_eq!(required(Some(String::new())), None);
        assert_eq!(required(Some("x".to_string())), Some("x".to_string()));
        assert_eq!(required(None), None);
    }
}
