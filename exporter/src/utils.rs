use crate::error::ExportError;
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use serde_json::Value;
use url::Url;

lazy_static! {
    // Prefix match only: trailing text after the last component is ignored.
    static ref DURATION_RE: Regex =
        Regex::new(r"^PT(?:(?P<hours>\d+)H)?(?:(?P<minutes>\d+)M)?(?:(?P<seconds>\d+)S)?")
            .expect("duration pattern is valid");
}

const FALLBACK_DURATION: &str = "0:00";

/// Format an ISO8601 duration (PT1H2M3S) as "H:MM:SS", or "M:SS" when there are no hours.
///
/// Anything that does not start with `PT` yields "0:00".
pub fn convert_duration(duration: &str) -> String {
    let Some(captures) = DURATION_RE.captures(duration) else {
        warn!("Unrecognized duration '{duration}', using {FALLBACK_DURATION}");
        return FALLBACK_DURATION.to_string();
    };

    let component = |name: &str| -> Option<u64> {
        match captures.name(name) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    let (Some(hours), Some(minutes), Some(seconds)) =
        (component("hours"), component("minutes"), component("seconds"))
    else {
        warn!("Duration '{duration}' is out of range, using {FALLBACK_DURATION}");
        return FALLBACK_DURATION.to_string();
    };

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

pub fn required_str<'a>(
    value: &'a Value,
    field: &str,
    context: &str,
) -> Result<&'a str, ExportError> {
    value[field]
        .as_str()
        .ok_or_else(|| ExportError::MissingField {
            field: field.to_string(),
            context: context.to_string(),
        })
}

/// Statistics counters arrive as decimal strings and are omitted when disabled.
pub fn parse_count(statistics: &Value, field: &str, context: &str) -> Result<u64, ExportError> {
    let malformed = |value: &Value| ExportError::MalformedField {
        field: field.to_string(),
        context: context.to_string(),
        value: value.to_string(),
    };

    match &statistics[field] {
        Value::Null => Ok(0),
        Value::String(s) => s.trim().parse().map_err(|_| malformed(&statistics[field])),
        Value::Number(n) => n.as_u64().ok_or_else(|| malformed(&statistics[field])),
        other => Err(malformed(other)),
    }
}

/// Returns the URL of a thumbnail variant, if present, after checking it is absolute.
pub fn thumbnail_url(
    thumbnails: &Value,
    variant: &str,
    context: &str,
) -> Result<Option<String>, ExportError> {
    let Some(url) = thumbnails[variant]["url"].as_str() else {
        return Ok(None);
    };

    match Url::parse(url) {
        Ok(_) => Ok(Some(url.to_string())),
        Err(e) => Err(ExportError::MalformedField {
            field: format!("thumbnails.{variant}.url"),
            context: context.to_string(),
            value: format!("{url} ({e})"),
        }),
    }
}

pub fn required_thumbnail(
    thumbnails: &Value,
    variant: &str,
    context: &str,
) -> Result<String, ExportError> {
    thumbnail_url(thumbnails, variant, context)?.ok_or_else(|| ExportError::MissingField {
        field: format!("thumbnails.{variant}"),
        context: context.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn clock_to_seconds(clock: &str) -> u64 {
        clock
            .split(':')
            .map(|part| part.parse::<u64>().unwrap())
            .fold(0, |acc, part| acc * 60 + part)
    }

    #[test]
    fn test_convert_duration_examples() {
        assert_eq!(convert_duration("PT1H2M3S"), "1:02:03");
        assert_eq!(convert_duration("PT45S"), "0:45");
        assert_eq!(convert_duration("PT2M"), "2:00");
        assert_eq!(convert_duration("PT0S"), "0:00");
        assert_eq!(convert_duration("PT3H"), "3:00:00");
        assert_eq!(convert_duration("PT12M5S"), "12:05");
    }

    #[test]
    fn test_convert_duration_fallbacks() {
        assert_eq!(convert_duration("garbage"), "0:00");
        assert_eq!(convert_duration(""), "0:00");
        assert_eq!(convert_duration("P1DT2H"), "0:00");
        assert_eq!(convert_duration("PT"), "0:00");
        assert_eq!(convert_duration("PT99999999999999999999999S"), "0:00");
    }

    #[test]
    fn test_convert_duration_ignores_trailing_text() {
        assert_eq!(convert_duration("PT4M13Sjunk"), "4:13");
    }

    #[test]
    fn test_convert_duration_shape_and_total() {
        let pattern = Regex::new(r"^(\d+:)?\d{1,2}:\d{2}$").unwrap();

        for hours in [0u64, 1, 10] {
            for minutes in [0u64, 1, 9, 59] {
                for seconds in [0u64, 5, 59] {
                    let mut input = String::from("PT");
                    if hours > 0 {
                        input.push_str(&format!("{hours}H"));
                    }
                    if minutes > 0 {
                        input.push_str(&format!("{minutes}M"));
                    }
                    if seconds > 0 || input == "PT" {
                        input.push_str(&format!("{seconds}S"));
                    }

                    let clock = convert_duration(&input);
                    assert!(pattern.is_match(&clock), "{input} -> {clock}");
                    assert_eq!(
                        clock_to_seconds(&clock),
                        hours * 3600 + minutes * 60 + seconds,
                        "{input} -> {clock}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_parse_count() {
        let stats = json!({ "likeCount": "42", "viewCount": 7, "commentCount": null });

        assert_eq!(parse_count(&stats, "likeCount", "video v").unwrap(), 42);
        assert_eq!(parse_count(&stats, "viewCount", "video v").unwrap(), 7);
        assert_eq!(parse_count(&stats, "commentCount", "video v").unwrap(), 0);
        assert_eq!(parse_count(&stats, "favoriteCount", "video v").unwrap(), 0);
    }

    #[test]
    fn test_parse_count_rejects_garbage() {
        let stats = json!({ "likeCount": "lots", "viewCount": -3 });

        assert!(matches!(
            parse_count(&stats, "likeCount", "video v"),
            Err(ExportError::MalformedField { .. })
        ));
        assert!(matches!(
            parse_count(&stats, "viewCount", "video v"),
            Err(ExportError::MalformedField { .. })
        ));
    }

    #[test]
    fn test_thumbnails() {
        let thumbnails = json!({
            "default": { "url": "https://i.ytimg.com/vi/x/default.jpg" },
            "high": { "url": "not-a-url" }
        });

        assert_eq!(
            thumbnail_url(&thumbnails, "default", "video x").unwrap().as_deref(),
            Some("https://i.ytimg.com/vi/x/default.jpg")
        );
        assert_eq!(thumbnail_url(&thumbnails, "standard", "video x").unwrap(), None);
        assert!(matches!(
            thumbnail_url(&thumbnails, "high", "video x"),
            Err(ExportError::MalformedField { .. })
        ));
        assert!(matches!(
            required_thumbnail(&thumbnails, "medium", "video x"),
            Err(ExportError::MissingField { .. })
        ));
    }

    #[test]
    fn test_required_str() {
        let snippet = json!({ "title": "Hello" });

        assert_eq!(required_str(&snippet, "title", "item").unwrap(), "Hello");
        assert!(matches!(
            required_str(&snippet, "publishedAt", "item"),
            Err(ExportError::MissingField { .. })
        ));
    }
}
