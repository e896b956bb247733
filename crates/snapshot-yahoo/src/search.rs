//! Search API (news) and Business Insider ISIN lookup.

use serde::Deserialize;
use snapshot_core::{Fetched, Map, Result, Symbol, Value};

use crate::chart::date_value;
use crate::{ISIN_SEARCH_URL, NEWS_COUNT, SEARCH_URL, YahooProvider};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Vec<NewsItem>,
}

#[derive(Debug, Deserialize)]
struct NewsItem {
    uuid: Option<String>,
    title: Option<String>,
    publisher: Option<String>,
    link: Option<String>,
    #[serde(rename = "providerPublishTime")]
    provider_publish_time: Option<i64>,
    #[serde(rename = "type")]
    content_type: Option<String>,
    summary: Option<String>,
}

fn news_payload(items: Vec<NewsItem>) -> Fetched {
    let items: Vec<Value> = items
        .into_iter()
        .map(|item| {
            let mut content = Map::new();
            content.insert("title".to_string(), Value::from(item.title));
            content.insert("summary".to_string(), Value::from(item.summary));
            content.insert(
                "pubDate".to_string(),
                item.provider_publish_time
                    .map_or(Value::Null, date_value),
            );
            let mut url = Map::new();
            url.insert("url".to_string(), Value::from(item.link));
            content.insert("canonicalUrl".to_string(), Value::Map(url));
            content.insert("publisher".to_string(), Value::from(item.publisher));
            content.insert("contentType".to_string(), Value::from(item.content_type));

            let mut out = Map::new();
            out.insert("id".to_string(), Value::from(item.uuid));
            out.insert("content".to_string(), Value::Map(content));
            Value::Map(out)
        })
        .collect();
    Fetched::from_value(Value::List(items))
}

/// Picks the ISIN for a symbol out of the suggest response body.
///
/// The body is a JavaScript fragment listing `"SYMBOL|ISIN|..."` records;
/// a valid ISIN is exactly twelve characters.
fn extract_isin(body: &str, symbol: &Symbol) -> Option<String> {
    let marker = format!("\"{}|", symbol.as_str());
    let start = body.find(&marker)? + 1;
    let record = &body[start..start + body[start..].find('"')?];
    let isin = record.split('|').nth(1)?;
    (isin.len() == 12).then(|| isin.to_string())
}

impl YahooProvider {
    pub(crate) async fn news(&self, symbol: &Symbol) -> Result<Fetched> {
        let url = format!(
            "{SEARCH_URL}?q={}&newsCount={NEWS_COUNT}",
            symbol.as_str()
        );
        let response: SearchResponse = self.get_json(&url, symbol).await?;
        Ok(news_payload(response.news))
    }

    pub(crate) async fn isin(&self, symbol: &Symbol) -> Result<Fetched> {
        let url = format!(
            "{ISIN_SEARCH_URL}?max_results=25&query={}",
            symbol.as_str()
        );
        let body = self.get_text(&url).await?;
        Ok(match extract_isin(&body, symbol) {
            Some(isin) => Fetched::Data(Value::Text(isin)),
            None => Fetched::Empty,
        })
    }
}
