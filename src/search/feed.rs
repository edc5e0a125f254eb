//! RSS parsing for news search feeds.

use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::entities::Publisher;
use crate::search::{NewsCandidate, SearchError};

#[derive(Default)]
struct ItemBuilder {
    title: String,
    link: String,
    pub_date: String,
    description: String,
    source_name: String,
    source_url: Option<String>,
}

impl ItemBuilder {
    fn set(&mut self, tag: &[u8], text: String) {
        match tag {
            b"title" => self.title.push_str(&text),
            b"link" => self.link.push_str(&text),
            b"pubDate" => self.pub_date.push_str(&text),
            b"description" => self.description.push_str(&text),
            b"source" => self.source_name.push_str(&text),
            _ => {}
        }
    }

    fn build(self) -> Option<NewsCandidate> {
        let url = self.link.trim().to_string();
        if url.is_empty() {
            return None;
        }

        let publisher = match (self.source_name.trim(), self.source_url) {
            ("", None) => None,
            (name, href) => Some(Publisher {
                title: name.to_string(),
                href,
            }),
        };
        let description = strip_html(&self.description);

        Some(NewsCandidate {
            title: self.title.trim().to_string(),
            url,
            publisher,
            published_date: DateTime::parse_from_rfc2822(self.pub_date.trim())
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            description: (!description.is_empty()).then_some(description),
        })
    }
}

fn source_url(element: &BytesStart<'_>) -> Option<String> {
    let attribute = element.try_get_attribute("url").ok().flatten()?;
    let value = attribute.unescape_value().ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parse an RSS document into candidates, keeping at most `limit` items
/// that carry a link.
pub fn parse_feed(xml: &str, limit: usize) -> Result<Vec<NewsCandidate>, SearchError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut candidates = Vec::new();
    let mut item: Option<ItemBuilder> = None;
    let mut current_tag: Vec<u8> = Vec::new();

    while candidates.len() < limit {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                if name == b"item" {
                    item = Some(ItemBuilder::default());
                } else if name == b"source"
                    && let Some(builder) = item.as_mut()
                {
                    builder.source_url = source_url(&e);
                }
                current_tag = name;
            }
            Event::End(e) => {
                if e.name().as_ref() == b"item"
                    && let Some(candidate) = item.take().and_then(ItemBuilder::build)
                {
                    candidates.push(candidate);
                }
                current_tag.clear();
            }
            Event::Text(e) => {
                if let Some(builder) = item.as_mut() {
                    builder.set(&current_tag, e.unescape()?.into_owned());
                }
            }
            Event::CData(e) => {
                if let Some(builder) = item.as_mut() {
                    builder.set(&current_tag, String::from_utf8_lossy(e.as_ref()).into_owned());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(candidates)
}

/// Plain text of an HTML fragment, whitespace collapsed.
pub fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                result.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }
    result
        .replace("&nbsp;", " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
