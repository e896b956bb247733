//! Chart API: price history, chart metadata, and distribution events.

use std::collections::HashMap;

use chrono::DateTime;
use serde::Deserialize;
use snapshot_core::{Fetched, Frame, Map, Result, SnapshotError, Symbol, Value};

use crate::{CHART_API_URL, YahooProvider};

/// Chart metadata keys surfaced as quick facts, with their published names.
const FAST_INFO_KEYS: &[(&str, &str)] = &[
    ("currency", "currency"),
    ("exchangeName", "exchange"),
    ("fullExchangeName", "fullExchangeName"),
    ("instrumentType", "quoteType"),
    ("timezone", "timezone"),
    ("regularMarketPrice", "lastPrice"),
    ("chartPreviousClose", "previousClose"),
    ("regularMarketDayHigh", "dayHigh"),
    ("regularMarketDayLow", "dayLow"),
    ("regularMarketVolume", "lastVolume"),
    ("fiftyTwoWeekHigh", "yearHigh"),
    ("fiftyTwoWeekLow", "yearLow"),
];

/// Which distribution event series to extract from the chart response.
#[derive(Clone, Copy, Debug)]
pub(crate) enum EventKind {
    Dividends,
    Splits,
    CapitalGains,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChartData {
    meta: Option<serde_json::Value>,
    timestamp: Option<Vec<i64>>,
    indicators: Option<Indicators>,
    events: Option<Events>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct Events {
    dividends: Option<HashMap<String, DividendEvent>>,
    splits: Option<HashMap<String, SplitEvent>>,
    #[serde(rename = "capitalGains")]
    capital_gains: Option<HashMap<String, CapitalGainEvent>>,
}

#[derive(Debug, Deserialize)]
struct DividendEvent {
    amount: f64,
    date: i64,
}

#[derive(Debug, Deserialize)]
struct SplitEvent {
    date: i64,
    numerator: f64,
    denominator: f64,
}

#[derive(Debug, Deserialize)]
struct CapitalGainEvent {
    amount: f64,
    date: i64,
}

/// Formats an epoch second as the date key used in dated mappings.
pub(crate) fn date_key(epoch: i64) -> String {
    DateTime::from_timestamp(epoch, 0)
        .map(|dt| dt.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| epoch.to_string())
}

/// Converts an epoch second into a date/time payload value.
pub(crate) fn date_value(epoch: i64) -> Value {
    DateTime::from_timestamp(epoch, 0)
        .map(|dt| Value::DateTime(dt.naive_utc()))
        .unwrap_or(Value::Null)
}

fn float_column(values: Vec<Option<f64>>) -> Vec<Value> {
    values.into_iter().map(Value::from).collect()
}

fn history_payload(data: ChartData) -> Fetched {
    let timestamps = data.timestamp.unwrap_or_default();
    if timestamps.is_empty() {
        return Fetched::Empty;
    }
    let quote = data
        .indicators
        .and_then(|i| i.quote.into_iter().next())
        .unwrap_or_default();

    let mut frame = Frame::new();
    frame.push_column("Date", timestamps.iter().map(|&ts| date_value(ts)).collect());
    frame.push_column("Open", float_column(quote.open));
    frame.push_column("High", float_column(quote.high));
    frame.push_column("Low", float_column(quote.low));
    frame.push_column("Close", float_column(quote.close));
    frame.push_column(
        "Volume",
        quote
            .volume
            .into_iter()
            .map(|v| v.map_or(Value::Null, |u| Value::Int(u as i64)))
            .collect(),
    );
    Fetched::from_value(frame.into_columnar())
}

fn events_payload(data: ChartData, kind: EventKind) -> Fetched {
    let Some(events) = data.events else {
        return Fetched::Empty;
    };

    let mut rows: Vec<(i64, Value)> = match kind {
        EventKind::Dividends => events
            .dividends
            .unwrap_or_default()
            .into_values()
            .map(|d| (d.date, Value::Float(d.amount)))
            .collect(),
        EventKind::Splits => events
            .splits
            .unwrap_or_default()
            .into_values()
            .map(|s| {
                let ratio = if s.denominator == 0.0 {
                    Value::Null
                } else {
                    Value::Float(s.numerator / s.denominator)
                };
                (s.date, ratio)
            })
            .collect(),
        EventKind::CapitalGains => events
            .capital_gains
            .unwrap_or_default()
            .into_values()
            .map(|g| (g.date, Value::Float(g.amount)))
            .collect(),
    };
    rows.sort_by_key(|(date, _)| *date);

    let mut out = Map::with_capacity(rows.len());
    for (date, value) in rows {
        out.insert(date_key(date), value);
    }
    Fetched::from_value(Value::Map(out))
}

fn fast_info_payload(meta: &serde_json::Value) -> Fetched {
    let mut out = Map::new();
    for (source, published) in FAST_INFO_KEYS {
        if let Some(value) = meta.get(source) {
            out.insert((*published).to_string(), Value::from_json(value.clone()));
        }
    }
    if let Some(epoch) = meta.get("firstTradeDate").and_then(|v| v.as_i64()) {
        out.insert("firstTradeDate".to_string(), date_value(epoch));
    }
    Fetched::from_value(Value::Map(out))
}

impl YahooProvider {
    /// Fetches and unwraps the chart response for a symbol.
    async fn chart(&self, symbol: &Symbol) -> Result<ChartData> {
        let url = format!(
            "{CHART_API_URL}/{}?range=5y&interval=1d&events=div%7Csplit%7CcapitalGain",
            symbol.as_str()
        );
        let response: ChartResponse = self.get_json(&url, symbol).await?;

        if let Some(error) = response.chart.error {
            if error.code == "Not Found" {
                return Err(SnapshotError::SymbolNotFound(symbol.to_string()));
            }
            return Err(SnapshotError::Other(format!(
                "{}: {}",
                error.code, error.description
            )));
        }

        response
            .chart
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| SnapshotError::SymbolNotFound(symbol.to_string()))
    }

    pub(crate) async fn history(&self, symbol: &Symbol) -> Result<Fetched> {
        Ok(history_payload(self.chart(symbol).await?))
    }

    pub(crate) async fn chart_events(&self, symbol: &Symbol, kind: EventKind) -> Result<Fetched> {
        Ok(events_payload(self.chart(symbol).await?, kind))
    }

    pub(crate) async fn history_metadata(&self, symbol: &Symbol) -> Result<Fetched> {
        match self.chart(symbol).await?.meta {
            Some(meta) => Ok(Fetched::from_value(Value::from_json(meta))),
            None => Ok(Fetched::Empty),
        }
    }

    pub(crate) async fn fast_info(&self, symbol: &Symbol) -> Result<Fetched> {
        match self.chart(symbol).await?.meta {
            Some(meta) => Ok(fast_info_payload(&meta)),
            None => Ok(Fetched::Empty),
        }
    }
}
