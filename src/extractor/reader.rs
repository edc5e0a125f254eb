use readability::extractor;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::extractor::model::ReadabilityResult;

/// Below this many characters the readability output is treated as a miss.
const MIN_READABLE_CHARS: usize = 200;

const CONTENT_SELECTORS: [&str; 10] = [
    "article",
    "[itemprop='articleBody']",
    "main",
    "[role='main']",
    ".detail__body-text",
    ".read__content",
    ".entry-content",
    ".article",
    ".content",
    "#content",
];

pub fn extract(html: &str, url: &Url) -> Option<ReadabilityResult> {
    let document = Html::parse_document(html);
    let meta_title = extract_title(&document);

    if let Ok(article) = extractor::extract(&mut html.as_bytes(), url)
        && article.text.trim().chars().count() >= MIN_READABLE_CHARS
    {
        let title = if article.title.trim().is_empty() {
            meta_title.unwrap_or_default()
        } else {
            article.title.trim().to_string()
        };
        return Some(ReadabilityResult {
            title,
            text: article.text,
        });
    }

    fallback_extract(&document, meta_title)
}

fn fallback_extract(document: &Html, title: Option<String>) -> Option<ReadabilityResult> {
    let text = extract_main_content(document);
    if text.trim().is_empty() {
        return None;
    }

    Some(ReadabilityResult {
        title: title.unwrap_or_default(),
        text,
    })
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty())
}

fn first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn extract_title(document: &Html) -> Option<String> {
    first_attr(document, "meta[property='og:title']", "content")
        .or_else(|| first_text(document, "title"))
        .or_else(|| first_text(document, "h1"))
}

/// Paragraph text of an element, one paragraph per line.
fn element_text(element: ElementRef<'_>) -> String {
    let paragraphs: Vec<String> = Selector::parse("p")
        .map(|p| {
            element
                .select(&p)
                .map(|node| node.text().collect::<String>().trim().to_string())
                .filter(|text| !text.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if paragraphs.is_empty() {
        element.text().collect::<Vec<_>>().join(" ")
    } else {
        paragraphs.join("\n\n")
    }
}

fn extract_main_content(document: &Html) -> String {
    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = element_text(element);
            if text.trim().chars().count() > 100 {
                return text;
            }
        }
    }

    // Last resort: the whole body
    if let Ok(body_selector) = Selector::parse("body")
        && let Some(body) = document.select(&body_selector).next()
    {
        return element_text(body);
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_joins_paragraphs() {
        let html = r#"<html><head><title>Judul</title></head><body>
            <nav>Beranda</nav>
            <div class="read__content"><p>Paragraf pertama yang cukup panjang untuk dibaca oleh pembaca berita.</p>
            <p>Paragraf kedua yang juga cukup panjang agar melewati batas minimal karakter.</p></div>
            </body></html>"#;
        let document = Html::parse_document(html);
        let result = fallback_extract(&document, extract_title(&document)).unwrap();

        assert_eq!(result.title, "Judul");
        assert!(result.text.contains("Paragraf pertama"));
        assert!(result.text.contains("\n\nParagraf kedua"));
        assert!(!result.text.contains("Beranda"));
    }

    #[test]
    fn test_og_title_preferred() {
        let html = r#"<html><head><meta property="og:title" content="Judul OG"><title>Judul - Situs</title></head><body></body></html>"#;
        let document = Html::parse_document(html);
        assert_eq!(extract_title(&document), Some("Judul OG".to_string()));
    }

    #[test]
    fn test_empty_body_is_none() {
        let document = Html::parse_document("<html><head></head><body></body></html>");
        assert!(fallback_extract(&document, None).is_none());
    }
}
