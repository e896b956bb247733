//! Filter stage: reduce a raw document to the cleaned document.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use snapshot_core::{CategoryRecord, Document, Map, Value};
use tracing::warn;

use crate::rules::{Rule, RuleKind};

/// Date key formats accepted in dated payloads.
const DATE_KEY_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Filters a raw document through the rule table.
///
/// Ruled categories are reduced to their field allow-lists; categories
/// without a rule pass through untouched. The input document is never
/// modified.
#[must_use]
pub fn filter_document(document: &Document, rules: &[Rule], today: NaiveDate) -> Document {
    let cutoff = prior_year_end(today);
    let mut cleaned = Document::new();

    for (key, record) in document.iter() {
        let data = match rules.iter().find(|rule| rule.category.key() == key) {
            Some(rule) => apply_rule(key, &record.data, rule, cutoff),
            None => record.data.clone(),
        };
        cleaned.insert(
            key.clone(),
            CategoryRecord::new(record.request.clone(), data),
        );
    }

    cleaned
}

/// December 31 of the year before `today`, the cutoff for dated entries.
fn prior_year_end(today: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year() - 1, 12, 31).unwrap_or(today)
}

fn apply_rule(key: &str, data: &Value, rule: &Rule, cutoff: NaiveDate) -> Value {
    match (rule.kind, data) {
        (RuleKind::Flat, Value::Map(entries)) => Value::Map(keep_fields(entries, rule.fields)),
        (RuleKind::Dated { cutoff: dated }, Value::Map(dates)) => {
            let mut out = Map::new();
            for (date_key, entry) in dates {
                if dated {
                    match parse_date_key(date_key) {
                        Some(date) if date < cutoff => continue,
                        Some(_) => {}
                        None => {
                            warn!(category = key, %date_key, "unparseable date key, keeping entry");
                        }
                    }
                }
                let filtered = match entry {
                    Value::Map(fields) => Value::Map(keep_fields(fields, rule.fields)),
                    other => {
                        warn!(category = key, %date_key, "date entry is not a mapping");
                        other.clone()
                    }
                };
                out.insert(date_key.clone(), filtered);
            }
            Value::Map(out)
        }
        (RuleKind::NewsItems, Value::List(items)) => Value::List(
            items
                .iter()
                .map(|item| filter_news_item(item, rule.fields))
                .collect(),
        ),
        (_, other) => {
            warn!(category = key, "unexpected payload shape, keeping as-is");
            other.clone()
        }
    }
}

/// Copies the allow-listed fields that are present, in payload order.
fn keep_fields(entries: &Map, fields: &[&str]) -> Map {
    entries
        .iter()
        .filter(|(key, _)| fields.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn filter_news_item(item: &Value, fields: &[&str]) -> Value {
    let Value::Map(entries) = item else {
        warn!("news item is not a mapping, keeping as-is");
        return item.clone();
    };

    let mut out = Map::new();
    if let Some(id) = entries.get("id") {
        out.insert("id".to_string(), id.clone());
    }
    if let Some(Value::Map(content)) = entries.get("content") {
        out.insert(
            "content".to_string(),
            Value::Map(keep_fields(content, fields)),
        );
    }
    Value::Map(out)
}

fn parse_date_key(key: &str) -> Option<NaiveDate> {
    for format in DATE_KEY_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(key, format) {
            return Some(parsed.date());
        }
    }
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}
