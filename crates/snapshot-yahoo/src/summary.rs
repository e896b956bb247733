//! Quote summary API: company info, analyst data, holders, filings, ESG.
//!
//! Quote summary modules wrap every figure as `{"raw": ..., "fmt": ...}`;
//! [`simplify`] unwraps those to the raw value and drops the `maxAge`
//! bookkeeping field every module carries.

use serde::Deserialize;
use snapshot_core::{Fetched, Frame, Map, Result, Symbol, Value};

use crate::chart::date_value;
use crate::{QUOTE_SUMMARY_URL, YahooProvider};

/// Modules merged into the `info` payload, in merge order.
const INFO_MODULES: &str = "assetProfile,summaryDetail,defaultKeyStatistics,financialData,quoteType";

/// Which slice of the earnings trend module to extract.
#[derive(Clone, Copy, Debug)]
pub(crate) enum TrendSlice {
    RevenueEstimate,
    EarningsEstimate,
    EpsTrend,
    EpsRevisions,
    Growth,
}

impl TrendSlice {
    fn section(self) -> Option<&'static str> {
        match self {
            Self::RevenueEstimate => Some("revenueEstimate"),
            Self::EarningsEstimate => Some("earningsEstimate"),
            Self::EpsTrend => Some("epsTrend"),
            Self::EpsRevisions => Some("epsRevisions"),
            Self::Growth => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryResult,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    result: Option<Vec<serde_json::Value>>,
}

/// Reduces a quote summary fragment to plain payload values.
///
/// Wrapped figures collapse to their raw value; objects and arrays recurse.
pub(crate) fn simplify(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Object(mut entries) => {
            if is_wrapped_figure(&entries) {
                return entries
                    .remove("raw")
                    .map_or(Value::Null, Value::from_json);
            }
            Value::Map(
                entries
                    .into_iter()
                    .filter(|(key, _)| key != "maxAge")
                    .map(|(key, value)| (key, simplify(value)))
                    .collect(),
            )
        }
        serde_json::Value::Array(items) => {
            Value::List(items.into_iter().map(simplify).collect())
        }
        other => Value::from_json(other),
    }
}

fn is_wrapped_figure(obj: &serde_json::Map<String, serde_json::Value>) -> bool {
    obj.contains_key("raw")
        && obj
            .keys()
            .all(|k| matches!(k.as_str(), "raw" | "fmt" | "longFmt"))
}

/// Builds a columnar frame from a list of item objects.
///
/// Columns are the union of item keys in first-seen order; fields named in
/// `date_fields` convert from epoch seconds to date/time values.
fn columnar_from_items(items: &[serde_json::Value], date_fields: &[&str]) -> Frame {
    let mut columns: Vec<String> = Vec::new();
    for item in items {
        if let Some(obj) = item.as_object() {
            for key in obj.keys() {
                if key != "maxAge" && !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    let mut frame = Frame::new();
    for column in columns {
        let values = items
            .iter()
            .map(|item| {
                let field = item.get(&column).cloned().map_or(Value::Null, simplify);
                if date_fields.contains(&column.as_str()) {
                    if let Value::Int(epoch) = field {
                        return date_value(epoch);
                    }
                }
                field
            })
            .collect();
        frame.push_column(column, values);
    }
    frame
}

fn list_field(module: &serde_json::Value, field: &str) -> Vec<serde_json::Value> {
    module
        .get(field)
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default()
}

fn recommendation_frame(module: &serde_json::Value) -> Frame {
    let trend = list_field(module, "trend");
    let mut frame = Frame::new();
    if trend.is_empty() {
        return frame;
    }
    for field in ["period", "strongBuy", "buy", "hold", "sell", "strongSell"] {
        frame.push_column(
            field,
            trend
                .iter()
                .map(|row| row.get(field).cloned().map_or(Value::Null, Value::from_json))
                .collect(),
        );
    }
    frame
}

fn trend_payload(module: &serde_json::Value, slice: TrendSlice) -> Fetched {
    let trend = list_field(module, "trend");
    let periods: Vec<String> = trend
        .iter()
        .map(|row| {
            row.get("period")
                .and_then(|p| p.as_str())
                .unwrap_or_default()
                .to_string()
        })
        .collect();
    let mut frame = Frame::with_index(periods);

    match slice.section() {
        None => {
            frame.push_column(
                "stockTrend",
                trend
                    .iter()
                    .map(|row| row.get("growth").cloned().map_or(Value::Null, simplify))
                    .collect(),
            );
        }
        Some(section) => {
            let mut columns: Vec<String> = Vec::new();
            for row in &trend {
                if let Some(obj) = row.get(section).and_then(|s| s.as_object()) {
                    for key in obj.keys() {
                        if !columns.iter().any(|c| c == key) {
                            columns.push(key.clone());
                        }
                    }
                }
            }
            for column in columns {
                frame.push_column(
                    column.clone(),
                    trend
                        .iter()
                        .map(|row| {
                            row.get(section)
                                .and_then(|s| s.get(&column))
                                .cloned()
                                .map_or(Value::Null, simplify)
                        })
                        .collect(),
                );
            }
        }
    }

    if frame.is_empty() {
        Fetched::Empty
    } else {
        Fetched::Data(frame.into_nested())
    }
}

fn calendar_payload(module: serde_json::Value) -> Fetched {
    let Value::Map(entries) = simplify(module) else {
        return Fetched::Empty;
    };

    let as_date = |value: &Value| match value {
        Value::Int(epoch) => date_value(*epoch),
        other => other.clone(),
    };

    let mut out = Map::new();
    if let Some(value) = entries.get("dividendDate") {
        out.insert("Dividend Date".to_string(), as_date(value));
    }
    if let Some(value) = entries.get("exDividendDate") {
        out.insert("Ex-Dividend Date".to_string(), as_date(value));
    }
    if let Some(Value::Map(earnings)) = entries.get("earnings") {
        if let Some(Value::List(dates)) = earnings.get("earningsDate") {
            out.insert(
                "Earnings Date".to_string(),
                Value::List(dates.iter().map(&as_date).collect()),
            );
        }
        for (source, published) in [
            ("earningsHigh", "Earnings High"),
            ("earningsLow", "Earnings Low"),
            ("earningsAverage", "Earnings Average"),
            ("revenueHigh", "Revenue High"),
            ("revenueLow", "Revenue Low"),
            ("revenueAverage", "Revenue Average"),
        ] {
            if let Some(value) = earnings.get(source) {
                out.insert(published.to_string(), value.clone());
            }
        }
    }
    Fetched::from_value(Value::Map(out))
}

fn earnings_dates_payload(module: &serde_json::Value) -> Fetched {
    let quarterly = module
        .pointer("/earningsChart/quarterly")
        .and_then(|q| q.as_array())
        .cloned()
        .unwrap_or_default();
    if quarterly.is_empty() {
        return Fetched::Empty;
    }

    let mut frame = Frame::new();
    for (source, published) in [
        ("date", "Quarter"),
        ("actual", "Reported EPS"),
        ("estimate", "EPS Estimate"),
    ] {
        frame.push_column(
            published,
            quarterly
                .iter()
                .map(|row| row.get(source).cloned().map_or(Value::Null, simplify))
                .collect(),
        );
    }
    Fetched::from_value(frame.into_columnar())
}

fn insider_roster_payload(module: &serde_json::Value) -> Fetched {
    let holders = list_field(module, "holders");
    if holders.is_empty() {
        return Fetched::Empty;
    }

    let mut frame = Frame::new();
    for (source, published, is_date) in [
        ("name", "Name", false),
        ("relation", "Position", false),
        ("transactionDescription", "Most Recent Transaction", false),
        ("latestTransDate", "Latest Transaction Date", true),
        ("positionDirect", "Shares Owned Directly", false),
        ("positionIndirect", "Shares Owned Indirectly", false),
    ] {
        frame.push_column(
            published,
            holders
                .iter()
                .map(|row| {
                    let field = row.get(source).cloned().map_or(Value::Null, simplify);
                    match (is_date, field) {
                        (true, Value::Int(epoch)) => date_value(epoch),
                        (_, field) => field,
                    }
                })
                .collect(),
        );
    }
    Fetched::from_value(frame.into_columnar())
}

fn major_holders_payload(module: serde_json::Value) -> Fetched {
    let Value::Map(entries) = simplify(module) else {
        return Fetched::Empty;
    };
    if entries.is_empty() {
        return Fetched::Empty;
    }

    let mut frame = Frame::new();
    frame.push_column(
        "Breakdown",
        entries.keys().map(|k| Value::from(k.as_str())).collect(),
    );
    frame.push_column("Value", entries.values().cloned().collect());
    Fetched::from_value(frame.into_columnar())
}

impl YahooProvider {
    /// Fetches the first quote summary result for the given modules.
    async fn quote_summary(
        &self,
        symbol: &Symbol,
        modules: &str,
    ) -> Result<Option<serde_json::Value>> {
        let url = format!("{QUOTE_SUMMARY_URL}/{}?modules={modules}", symbol.as_str());
        let response: QuoteSummaryResponse = self.get_json(&url, symbol).await?;
        Ok(response
            .quote_summary
            .result
            .unwrap_or_default()
            .into_iter()
            .next())
    }

    /// Fetches a single module object from the quote summary API.
    async fn module(&self, symbol: &Symbol, module: &str) -> Result<Option<serde_json::Value>> {
        Ok(self
            .quote_summary(symbol, module)
            .await?
            .and_then(|mut result| result.get_mut(module).map(serde_json::Value::take)))
    }

    pub(crate) async fn info(&self, symbol: &Symbol) -> Result<Fetched> {
        let Some(result) = self.quote_summary(symbol, INFO_MODULES).await? else {
            return Ok(Fetched::Empty);
        };
        let mut merged = Map::new();
        for module in INFO_MODULES.split(',') {
            if let Some(Value::Map(entries)) = result.get(module).map(|m| simplify(m.clone())) {
                merged.extend(entries);
            }
        }
        Ok(Fetched::from_value(Value::Map(merged)))
    }

    pub(crate) async fn calendar(&self, symbol: &Symbol) -> Result<Fetched> {
        match self.module(symbol, "calendarEvents").await? {
            Some(module) => Ok(calendar_payload(module)),
            None => Ok(Fetched::Empty),
        }
    }

    pub(crate) async fn analyst_price_targets(&self, symbol: &Symbol) -> Result<Fetched> {
        let Some(module) = self.module(symbol, "financialData").await? else {
            return Ok(Fetched::Empty);
        };
        let Value::Map(entries) = simplify(module) else {
            return Ok(Fetched::Empty);
        };
        let mut out = Map::new();
        for (source, published) in [
            ("currentPrice", "current"),
            ("targetHighPrice", "high"),
            ("targetLowPrice", "low"),
            ("targetMeanPrice", "mean"),
            ("targetMedianPrice", "median"),
        ] {
            if let Some(value) = entries.get(source) {
                out.insert(published.to_string(), value.clone());
            }
        }
        Ok(Fetched::from_value(Value::Map(out)))
    }

    pub(crate) async fn recommendations(&self, symbol: &Symbol) -> Result<Fetched> {
        match self.module(symbol, "recommendationTrend").await? {
            Some(module) => Ok(Fetched::from_value(
                recommendation_frame(&module).into_columnar(),
            )),
            None => Ok(Fetched::Empty),
        }
    }

    pub(crate) async fn recommendations_summary(&self, symbol: &Symbol) -> Result<Fetched> {
        match self.module(symbol, "recommendationTrend").await? {
            Some(module) => Ok(Fetched::from_value(
                recommendation_frame(&module).into_nested(),
            )),
            None => Ok(Fetched::Empty),
        }
    }

    pub(crate) async fn earnings_trend(
        &self,
        symbol: &Symbol,
        slice: TrendSlice,
    ) -> Result<Fetched> {
        match self.module(symbol, "earningsTrend").await? {
            Some(module) => Ok(trend_payload(&module, slice)),
            None => Ok(Fetched::Empty),
        }
    }

    pub(crate) async fn earnings_history(&self, symbol: &Symbol) -> Result<Fetched> {
        match self.module(symbol, "earningsHistory").await? {
            Some(module) => Ok(Fetched::from_value(
                columnar_from_items(&list_field(&module, "history"), &["quarter"])
                    .into_columnar(),
            )),
            None => Ok(Fetched::Empty),
        }
    }

    pub(crate) async fn earnings_dates(&self, symbol: &Symbol) -> Result<Fetched> {
        match self.module(symbol, "earnings").await? {
            Some(module) => Ok(earnings_dates_payload(&module)),
            None => Ok(Fetched::Empty),
        }
    }

    pub(crate) async fn sec_filings(&self, symbol: &Symbol) -> Result<Fetched> {
        match self.module(symbol, "secFilings").await? {
            Some(module) => {
                let filings: Vec<Value> = list_field(&module, "filings")
                    .into_iter()
                    .map(simplify)
                    .collect();
                Ok(Fetched::from_value(Value::List(filings)))
            }
            None => Ok(Fetched::Empty),
        }
    }

    pub(crate) async fn insider_purchases(&self, symbol: &Symbol) -> Result<Fetched> {
        match self.module(symbol, "netSharePurchaseActivity").await? {
            Some(module) => Ok(Fetched::from_value(simplify(module))),
            None => Ok(Fetched::Empty),
        }
    }

    pub(crate) async fn insider_transactions(&self, symbol: &Symbol) -> Result<Fetched> {
        match self.module(symbol, "insiderTransactions").await? {
            Some(module) => Ok(Fetched::from_value(
                columnar_from_items(&list_field(&module, "transactions"), &["startDate"])
                    .into_columnar(),
            )),
            None => Ok(Fetched::Empty),
        }
    }

    pub(crate) async fn insider_roster_holders(&self, symbol: &Symbol) -> Result<Fetched> {
        match self.module(symbol, "insiderHolders").await? {
            Some(module) => Ok(insider_roster_payload(&module)),
            None => Ok(Fetched::Empty),
        }
    }

    pub(crate) async fn major_holders(&self, symbol: &Symbol) -> Result<Fetched> {
        match self.module(symbol, "majorHoldersBreakdown").await? {
            Some(module) => Ok(major_holders_payload(module)),
            None => Ok(Fetched::Empty),
        }
    }

    pub(crate) async fn ownership_holders(
        &self,
        symbol: &Symbol,
        module_name: &str,
    ) -> Result<Fetched> {
        match self.module(symbol, module_name).await? {
            Some(module) => Ok(Fetched::from_value(
                columnar_from_items(&list_field(&module, "ownershipList"), &["reportDate"])
                    .into_columnar(),
            )),
            None => Ok(Fetched::Empty),
        }
    }

    pub(crate) async fn sustainability(&self, symbol: &Symbol) -> Result<Fetched> {
        match self.module(symbol, "esgScores").await? {
            Some(module) => {
                let scores = simplify(module);
                if scores.is_empty() {
                    return Ok(Fetched::Empty);
                }
                let mut out = Map::new();
                out.insert("esgScores".to_string(), scores);
                Ok(Fetched::Data(Value::Map(out)))
            }
            None => Ok(Fetched::Empty),
        }
    }

    pub(crate) async fn upgrades_downgrades(&self, symbol: &Symbol) -> Result<Fetched> {
        match self.module(symbol, "upgradeDowngradeHistory").await? {
            Some(module) => Ok(Fetched::from_value(
                columnar_from_items(&list_field(&module, "history"), &["epochGradeDate"])
                    .into_columnar(),
            )),
            None => Ok(Fetched::Empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplify_unwraps_wrapped_figures() {
        let json = serde_json::json!({
            "marketCap": {"raw": 2147483648000_i64, "fmt": "2.15T", "longFmt": "2,147,483,648,000"},
            "beta": {"raw": 1.05, "fmt": "1.05"},
            "maxAge": 86400,
            "sector": "Technology"
        });
        let Value::Map(entries) = simplify(json) else {
            panic!("expected map");
        };
        assert_eq!(entries["marketCap"], Value::Int(2_147_483_648_000));
        assert_eq!(entries["beta"], Value::Float(1.05));
        assert_eq!(entries["sector"], Value::from("Technology"));
        assert!(!entries.contains_key("maxAge"));
    }

    #[test]
    fn test_simplify_recurses_into_lists() {
        let json = serde_json::json!({"rows": [{"value": {"raw": 7}}]});
        let Value::Map(entries) = simplify(json) else {
            panic!("expected map");
        };
        let expected = {
            let mut row = Map::new();
            row.insert("value".to_string(), Value::Int(7));
            Value::List(vec![Value::Map(row)])
        };
        assert_eq!(entries["rows"], expected);
    }

    fn trend_module() -> serde_json::Value {
        serde_json::json!({
            "trend": [
                {
                    "period": "0q",
                    "growth": {"raw": 0.12},
                    "revenueEstimate": {"avg": {"raw": 85000000000_i64}, "numberOfAnalysts": {"raw": 24}},
                    "epsTrend": {"current": {"raw": 1.6}}
                },
                {
                    "period": "+1q",
                    "growth": {"raw": 0.1},
                    "revenueEstimate": {"avg": {"raw": 88000000000_i64}, "numberOfAnalysts": {"raw": 21}},
                    "epsTrend": {"current": {"raw": 1.7}}
                }
            ]
        })
    }

    #[test]
    fn test_trend_payload_nested_by_period() {
        let Fetched::Data(Value::Map(out)) =
            trend_payload(&trend_module(), TrendSlice::RevenueEstimate)
        else {
            panic!("expected data");
        };
        let Value::Map(avg) = &out["avg"] else {
            panic!("expected map");
        };
        assert_eq!(avg["0q"], Value::Int(85_000_000_000));
        assert_eq!(avg["+1q"], Value::Int(88_000_000_000));
    }

    #[test]
    fn test_growth_slice_uses_growth_field() {
        let Fetched::Data(Value::Map(out)) = trend_payload(&trend_module(), TrendSlice::Growth)
        else {
            panic!("expected data");
        };
        let Value::Map(growth) = &out["stockTrend"] else {
            panic!("expected map");
        };
        assert_eq!(growth["0q"], Value::Float(0.12));
    }

    #[test]
    fn test_empty_trend_is_empty() {
        let module = serde_json::json!({"trend": []});
        assert_eq!(trend_payload(&module, TrendSlice::EpsTrend), Fetched::Empty);
    }

    #[test]
    fn test_recommendation_frame_orientations() {
        let module = serde_json::json!({
            "trend": [
                {"period": "0m", "strongBuy": 10, "buy": 20, "hold": 8, "sell": 1, "strongSell": 0},
                {"period": "-1m", "strongBuy": 11, "buy": 19, "hold": 9, "sell": 1, "strongSell": 0}
            ]
        });
        let Value::Map(columnar) = recommendation_frame(&module).into_columnar() else {
            panic!("expected map");
        };
        assert_eq!(
            columnar["period"],
            Value::List(vec![Value::from("0m"), Value::from("-1m")])
        );

        let Value::Map(nested) = recommendation_frame(&module).into_nested() else {
            panic!("expected map");
        };
        let Value::Map(strong_buy) = &nested["strongBuy"] else {
            panic!("expected map");
        };
        assert_eq!(strong_buy["0"], Value::Int(10));
        assert_eq!(strong_buy["1"], Value::Int(11));
    }

    #[test]
    fn test_columnar_from_items_converts_date_fields() {
        let items = vec![
            serde_json::json!({"quarter": {"raw": 1696339800, "fmt": "2023-10-03"}, "epsActual": {"raw": 1.5}}),
            serde_json::json!({"quarter": {"raw": 1704067200, "fmt": "2024-01-01"}, "epsActual": {"raw": 1.7}}),
        ];
        let Value::Map(out) = columnar_from_items(&items, &["quarter"]).into_columnar() else {
            panic!("expected map");
        };
        let Value::List(quarters) = &out["quarter"] else {
            panic!("expected list");
        };
        assert!(matches!(quarters[0], Value::DateTime(_)));
        assert_eq!(out["epsActual"], Value::List(vec![Value::Float(1.5), Value::Float(1.7)]));
    }

    #[test]
    fn test_calendar_payload_publishes_titled_keys() {
        let module = serde_json::json!({
            "exDividendDate": {"raw": 1723420800, "fmt": "2024-08-12"},
            "dividendDate": {"raw": 1726185600, "fmt": "2024-09-13"},
            "earnings": {
                "earningsDate": [{"raw": 1730334600, "fmt": "2024-10-31"}],
                "earningsAverage": {"raw": 1.55},
                "revenueAverage": {"raw": 86000000000_i64}
            }
        });
        let Fetched::Data(Value::Map(out)) = calendar_payload(module) else {
            panic!("expected data");
        };
        assert!(matches!(out["Ex-Dividend Date"], Value::DateTime(_)));
        assert_eq!(out["Earnings Average"], Value::Float(1.55));
        let Value::List(dates) = &out["Earnings Date"] else {
            panic!("expected list");
        };
        assert!(matches!(dates[0], Value::DateTime(_)));
    }

    #[test]
    fn test_insider_roster_publishes_roster_columns() {
        let module = serde_json::json!({
            "holders": [{
                "name": "DOE JANE",
                "relation": "Chief Executive Officer",
                "transactionDescription": "Sale",
                "latestTransDate": {"raw": 1723420800, "fmt": "2024-08-12"},
                "positionDirect": {"raw": 120000, "longFmt": "120,000"}
            }]
        });
        let Fetched::Data(Value::Map(out)) = insider_roster_payload(&module) else {
            panic!("expected data");
        };
        assert_eq!(
            out.keys().collect::<Vec<_>>(),
            [
                "Name",
                "Position",
                "Most Recent Transaction",
                "Latest Transaction Date",
                "Shares Owned Directly",
                "Shares Owned Indirectly"
            ]
        );
        let Value::List(names) = &out["Name"] else {
            panic!("expected list");
        };
        assert_eq!(names[0], Value::from("DOE JANE"));
        let Value::List(dates) = &out["Latest Transaction Date"] else {
            panic!("expected list");
        };
        assert!(matches!(dates[0], Value::DateTime(_)));
    }

    #[test]
    fn test_major_holders_breakdown_columns() {
        let module = serde_json::json!({
            "insidersPercentHeld": {"raw": 0.001},
            "institutionsPercentHeld": {"raw": 0.61},
            "maxAge": 1
        });
        let Fetched::Data(Value::Map(out)) = major_holders_payload(module) else {
            panic!("expected data");
        };
        assert_eq!(
            out["Breakdown"],
            Value::List(vec![
                Value::from("insidersPercentHeld"),
                Value::from("institutionsPercentHeld"),
            ])
        );
        assert_eq!(
            out["Value"],
            Value::List(vec![Value::Float(0.001), Value::Float(0.61)])
        );
    }
}
