use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use scraper::{Html, Selector};
use serde_json::Value;

/// Meta tags carrying a publish timestamp, most specific first.
const DATE_META_SELECTORS: [&str; 8] = [
    "meta[property='article:published_time']",
    "meta[property='og:published_time']",
    "meta[itemprop='datePublished']",
    "meta[name='pubdate']",
    "meta[name='publishdate']",
    "meta[name='publish-date']",
    "meta[name='content_PublishedDate']",
    "meta[name='date']",
];

pub fn publish_date(document: &Html) -> Option<DateTime<Utc>> {
    for selector_str in DATE_META_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        let found = document
            .select(&selector)
            .filter_map(|element| element.value().attr("content"))
            .find_map(parse_date);
        if found.is_some() {
            return found;
        }
    }

    json_ld_date(document).or_else(|| time_element_date(document))
}

fn time_element_date(document: &Html) -> Option<DateTime<Utc>> {
    let selector = Selector::parse("time[datetime]").ok()?;
    document
        .select(&selector)
        .filter_map(|element| element.value().attr("datetime"))
        .find_map(parse_date)
}

fn json_ld_date(document: &Html) -> Option<DateTime<Utc>> {
    let selector = Selector::parse("script[type='application/ld+json']").ok()?;
    document.select(&selector).find_map(|script| {
        let raw = script.text().collect::<String>();
        let value: Value = serde_json::from_str(raw.trim()).ok()?;
        find_date_published(&value)
    })
}

fn find_date_published(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Array(items) => items.iter().find_map(find_date_published),
        Value::Object(map) => map
            .get("datePublished")
            .and_then(Value::as_str)
            .and_then(parse_date)
            .or_else(|| map.get("@graph").and_then(find_date_published)),
        _ => None,
    }
}

/// Parse the date formats news sites commonly emit. Zone-less values are
/// taken as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_meta_published_time() {
        let html = r#"<html><head><meta property="article:published_time" content="2024-01-01T08:00:00+07:00"></head></html>"#;
        let document = Html::parse_document(html);
        assert_eq!(
            publish_date(&document),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_json_ld_graph() {
        let html = r#"<html><head><script type="application/ld+json">
            {"@context":"https://schema.org","@graph":[{"@type":"WebPage"},{"@type":"NewsArticle","datePublished":"2024-01-02 10:30:00"}]}
            </script></head></html>"#;
        let document = Html::parse_document(html);
        assert_eq!(
            publish_date(&document),
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 10, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_time_element() {
        let html = r#"<html><body><time datetime="2024-01-03">3 Januari</time></body></html>"#;
        let document = Html::parse_document(html);
        assert_eq!(
            publish_date(&document),
            Some(Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_date_is_none() {
        let document = Html::parse_document("<html><head><title>x</title></head></html>");
        assert_eq!(publish_date(&document), None);
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("Mon, 01 Jan 2024 08:00:00 GMT").is_some());
        assert!(parse_date("2024-01-01T08:00:00+0700").is_some());
        assert!(parse_date("2024/01/01").is_some());
        assert!(parse_date("kemarin").is_none());
        assert!(parse_date("").is_none());
    }
}
