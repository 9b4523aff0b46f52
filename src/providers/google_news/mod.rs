//! Google News RSS feed adapter

use crate::error::{AppError, Result};
use crate::providers::types::NewsItem;
use crate::providers::NewsFeed;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesText, Event};
use quick_xml::Reader;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// RSS headline feed (Google News search by default)
pub struct GoogleNewsFeed {
    client: Client,
    feed_url: String,
}

impl GoogleNewsFeed {
    pub fn new(feed_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: super::http_client(timeout)?,
            feed_url: feed_url.to_string(),
        })
    }
}

#[async_trait]
impl NewsFeed for GoogleNewsFeed {
    fn id(&self) -> &'static str {
        "google_news"
    }

    async fn fetch_items(&self) -> Result<Vec<NewsItem>> {
        debug!("Fetching feed: {}", self.feed_url);

        let response = self.client.get(&self.feed_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Feed(format!(
                "Feed request failed with {}",
                status
            )));
        }

        let body = response.text().await?;
        let items = parse_rss(&body)?;
        info!("Fetched {} feed items", items.len());
        Ok(items)
    }
}

// ============================================================================
// RSS decoding
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemField {
    Title,
    Link,
    PubDate,
    Source,
}

#[derive(Debug, Default)]
struct ItemBuilder {
    title: String,
    link: String,
    pub_date: String,
    source: String,
}

impl ItemBuilder {
    fn push(&mut self, field: ItemField, text: &str) {
        let target = match field {
            ItemField::Title => &mut self.title,
            ItemField::Link => &mut self.link,
            ItemField::PubDate => &mut self.pub_date,
            ItemField::Source => &mut self.source,
        };
        target.push_str(text);
    }

    fn build(self) -> Option<NewsItem> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        let non_empty = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        Some(NewsItem {
            title: title.to_string(),
            link: non_empty(&self.link),
            published: DateTime::parse_from_rfc2822(self.pub_date.trim())
                .ok()
                .map(|d| d.with_timezone(&Utc)),
            source: non_empty(&self.source),
        })
    }
}

/// Unescape XML and HTML5 entities. Text with an unknown entity is kept raw
/// so one bad title cannot sink the whole feed.
fn decode_text(text: &BytesText) -> String {
    match text.unescape_with(resolve_html5_entity) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            let raw = String::from_utf8_lossy(text).into_owned();
            warn!("Keeping raw feed text {:?}: {}", raw, e);
            raw
        }
    }
}

/// Parse an RSS 2.0 document into news items, preserving document order.
///
/// Items without a title are skipped.
pub(crate) fn parse_rss(xml: &str) -> Result<Vec<NewsItem>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut saw_channel = false;
    let mut current: Option<ItemBuilder> = None;
    let mut field: Option<ItemField> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            AppError::Feed(format!(
                "Malformed RSS at byte {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"channel" => saw_channel = true,
                b"item" => current = Some(ItemBuilder::default()),
                name if current.is_some() => {
                    field = match name {
                        b"title" => Some(ItemField::Title),
                        b"link" => Some(ItemField::Link),
                        b"pubDate" => Some(ItemField::PubDate),
                        b"source" => Some(ItemField::Source),
                        _ => None,
                    };
                }
                _ => {}
            },
            Event::Text(t) => {
                if let (Some(item), Some(f)) = (current.as_mut(), field) {
                    item.push(f, &decode_text(&t));
                }
            }
            Event::CData(c) => {
                if let (Some(item), Some(f)) = (current.as_mut(), field) {
                    item.push(f, &String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"item" => {
                    if let Some(item) = current.take().and_then(ItemBuilder::build) {
                        items.push(item);
                    }
                    field = None;
                }
                _ => field = None,
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_channel {
        return Err(AppError::Feed("Response is not an RSS document".to_string()));
    }

    Ok(items)
}
