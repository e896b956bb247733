//! Fundamentals timeseries API: financial statements and share counts.
//!
//! Each requested figure comes back as its own result entry keyed by a
//! prefixed type name (`annualTotalAssets`, `quarterlyNetIncome`). Entries
//! are regrouped into a statement frame with spaced row labels and date
//! columns in reverse chronological order.

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use serde::Deserialize;
use snapshot_core::{Fetched, Frame, Result, Symbol, Value};

use crate::{TIMESERIES_URL, YahooProvider};

/// Lookback window for statement requests, in seconds.
const LOOKBACK: i64 = 5 * 365 * 86_400;

/// Camel-case field names whose labels are not a plain word split.
const LABEL_OVERRIDES: &[(&str, &str)] = &[(
    "DilutedNIAvailtoComStockholders",
    "Diluted NI Available to Common Stockholders",
)];

const BALANCE_KEYS: &[&str] = &[
    "TotalAssets",
    "CurrentAssets",
    "CashCashEquivalentsAndShortTermInvestments",
    "CashAndCashEquivalents",
    "OtherShortTermInvestments",
    "Receivables",
    "Inventory",
    "NetPPE",
    "GrossPPE",
    "AccumulatedDepreciation",
    "GoodwillAndOtherIntangibleAssets",
    "InvestmentsAndAdvances",
    "TotalLiabilitiesNetMinorityInterest",
    "CurrentLiabilities",
    "PayablesAndAccruedExpenses",
    "TotalTaxPayable",
    "CurrentDebtAndCapitalLeaseObligation",
    "LongTermDebt",
    "TotalDebt",
    "StockholdersEquity",
    "CommonStockEquity",
    "RetainedEarnings",
    "TotalCapitalization",
    "InvestedCapital",
    "WorkingCapital",
    "TangibleBookValue",
    "OrdinarySharesNumber",
    "ShareIssued",
    "TreasurySharesNumber",
];

const INCOME_KEYS: &[&str] = &[
    "TotalRevenue",
    "CostOfRevenue",
    "GrossProfit",
    "OperatingExpense",
    "SellingGeneralAndAdministration",
    "SellingAndMarketingExpense",
    "ResearchAndDevelopment",
    "OperatingIncome",
    "NetInterestIncome",
    "InterestIncome",
    "InterestExpense",
    "OtherIncomeExpense",
    "GainOnSaleOfSecurity",
    "EarningsFromEquityInterest",
    "PretaxIncome",
    "TaxProvision",
    "TaxRateForCalcs",
    "NetIncome",
    "NormalizedIncome",
    "DilutedNIAvailtoComStockholders",
    "NetIncomeCommonStockholders",
    "TotalExpenses",
    "TotalUnusualItems",
    "TaxEffectOfUnusualItems",
    "EBIT",
    "EBITDA",
    "BasicEPS",
    "DilutedEPS",
];

const CASH_FLOW_KEYS: &[&str] = &[
    "OperatingCashFlow",
    "CashFlowFromContinuingOperatingActivities",
    "NetIncomeFromContinuingOperations",
    "DepreciationAndAmortization",
    "StockBasedCompensation",
    "DeferredTax",
    "ChangeInWorkingCapital",
    "InvestingCashFlow",
    "CapitalExpenditure",
    "NetPPEPurchaseAndSale",
    "NetInvestmentPurchaseAndSale",
    "FinancingCashFlow",
    "RepurchaseOfCapitalStock",
    "CashDividendsPaid",
    "LongTermDebtIssuance",
    "LongTermDebtPayments",
    "NetIssuancePaymentsOfDebt",
    "BeginningCashPosition",
    "EndCashPosition",
    "ChangesInCash",
    "FreeCashFlow",
];

const SHARES_KEYS: &[&str] = &["BasicAverageShares", "DilutedAverageShares"];

/// Which fundamentals statement to request.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Statement {
    BalanceSheet,
    QuarterlyIncomeStmt,
    CashFlow,
    Shares,
}

impl Statement {
    fn prefix(self) -> &'static str {
        match self {
            Self::QuarterlyIncomeStmt => "quarterly",
            Self::BalanceSheet | Self::CashFlow | Self::Shares => "annual",
        }
    }

    fn keys(self) -> &'static [&'static str] {
        match self {
            Self::BalanceSheet => BALANCE_KEYS,
            Self::QuarterlyIncomeStmt => INCOME_KEYS,
            Self::CashFlow => CASH_FLOW_KEYS,
            Self::Shares => SHARES_KEYS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    timeseries: TimeseriesResult,
}

#[derive(Debug, Deserialize)]
struct TimeseriesResult {
    result: Option<Vec<serde_json::Value>>,
}

/// Inserts spaces into a camel-case field name, keeping acronyms intact.
fn field_label(field: &str) -> String {
    for (raw, label) in LABEL_OVERRIDES {
        if *raw == field {
            return (*label).to_string();
        }
    }

    let chars: Vec<char> = field.chars().collect();
    let mut out = String::with_capacity(field.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push(' ');
            }
        }
        out.push(c);
    }
    out
}

fn statement_payload(results: &[serde_json::Value], statement: Statement) -> Fetched {
    let prefix = statement.prefix();
    let mut by_type: HashMap<String, Vec<(String, Value)>> = HashMap::new();
    let mut dates: BTreeSet<String> = BTreeSet::new();

    for result in results {
        let Some(kind) = result.pointer("/meta/type/0").and_then(|t| t.as_str()) else {
            continue;
        };
        let Some(rows) = result.get(kind).and_then(|r| r.as_array()) else {
            continue;
        };
        let entries = by_type.entry(kind.to_string()).or_default();
        for row in rows {
            let Some(as_of) = row.get("asOfDate").and_then(|d| d.as_str()) else {
                continue;
            };
            let date = format!("{as_of} 00:00:00");
            let value = row
                .pointer("/reportedValue/raw")
                .cloned()
                .map_or(Value::Null, Value::from_json);
            dates.insert(date.clone());
            entries.push((date, value));
        }
    }

    if dates.is_empty() {
        return Fetched::Empty;
    }
    // Newest period first, matching statement column order.
    let dates: Vec<String> = dates.into_iter().rev().collect();

    let mut labels: Vec<String> = Vec::new();
    let mut rows: Vec<HashMap<String, Value>> = Vec::new();
    for field in statement.keys() {
        if let Some(entries) = by_type.remove(&format!("{prefix}{field}")) {
            labels.push(field_label(field));
            rows.push(entries.into_iter().collect());
        }
    }

    let mut frame = Frame::with_index(labels);
    for date in dates {
        let column: Vec<Value> = rows
            .iter()
            .map(|row| row.get(&date).cloned().unwrap_or(Value::Null))
            .collect();
        frame.push_column(date, column);
    }
    Fetched::from_value(frame.into_nested())
}

impl YahooProvider {
    pub(crate) async fn statement(
        &self,
        symbol: &Symbol,
        statement: Statement,
    ) -> Result<Fetched> {
        let prefix = statement.prefix();
        let types = statement
            .keys()
            .iter()
            .map(|field| format!("{prefix}{field}"))
            .collect::<Vec<_>>()
            .join(",");
        let now = Utc::now().timestamp();
        let url = format!(
            "{TIMESERIES_URL}/{sym}?symbol={sym}&type={types}&period1={}&period2={now}",
            now - LOOKBACK,
            sym = symbol.as_str(),
        );

        let response: TimeseriesResponse = self.get_json(&url, symbol).await?;
        Ok(statement_payload(
            &response.timeseries.result.unwrap_or_default(),
            statement,
        ))
    }
}
