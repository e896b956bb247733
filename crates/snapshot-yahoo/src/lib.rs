#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tickersnap/snapshot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Yahoo Finance data provider.
//!
//! This crate provides a Yahoo Finance provider that implements the
//! [`CategoryProvider`] trait from `snapshot-core`, covering every category
//! in the fetch registry:
//!
//! - price history, dividends, splits, and capital gains from the chart API
//! - company info, analyst data, holders, filings, ESG, and news metadata
//!   from the quote summary API
//! - balance sheet, income statement, cash flow, and share counts from the
//!   fundamentals timeseries API
//! - news items from the search API
//! - ISIN lookup via Business Insider
//!
//! # Example
//!
//! ```no_run
//! use snapshot_yahoo::YahooProvider;
//! use snapshot_core::{Category, CategoryProvider, Symbol};
//!
//! # async fn example() -> snapshot_core::Result<()> {
//! let provider = YahooProvider::new();
//! let symbol = Symbol::new("GOOG");
//!
//! let fetched = provider.fetch(&symbol, Category::Info).await?;
//! println!("{fetched:?}");
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use snapshot_core::{Category, CategoryProvider, Fetched, Result, SnapshotError, Symbol};
use tracing::debug;

mod chart;
mod search;
mod summary;
mod timeseries;

use chart::EventKind;
use summary::TrendSlice;
use timeseries::Statement;

/// Yahoo Finance chart API base URL.
const CHART_API_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance quote summary API base URL.
const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

/// Yahoo Finance fundamentals timeseries API base URL.
const TIMESERIES_URL: &str =
    "https://query1.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries";

/// Yahoo Finance search API base URL (news).
const SEARCH_URL: &str = "https://query2.finance.yahoo.com/v1/finance/search";

/// Business Insider symbol suggest endpoint (ISIN lookup).
const ISIN_SEARCH_URL: &str = "https://markets.businessinsider.com/ajax/SearchController_Suggest";

/// User agent for HTTP requests.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Number of news items requested per fetch.
const NEWS_COUNT: usize = 10;

/// Yahoo Finance category provider.
///
/// Implements [`CategoryProvider`] for the full fetch registry.
#[derive(Debug)]
pub struct YahooProvider {
    client: reqwest::Client,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider with default settings.
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Create a new Yahoo Finance provider with a custom HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET a URL and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, symbol: &Symbol) -> Result<T> {
        debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SnapshotError::Network(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SnapshotError::SymbolNotFound(symbol.to_string()));
        }

        if !response.status().is_success() {
            return Err(SnapshotError::Network(format!(
                "HTTP {} for {}",
                response.status(),
                symbol
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SnapshotError::Parse(e.to_string()))
    }

    /// GET a URL and return the plain text body.
    async fn get_text(&self, url: &str) -> Result<String> {
        debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SnapshotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SnapshotError::Network(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SnapshotError::Network(e.to_string()))
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryProvider for YahooProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    async fn fetch(&self, symbol: &Symbol, category: Category) -> Result<Fetched> {
        debug!(symbol = %symbol, category = %category, "fetching category");

        match category {
            Category::History => self.history(symbol).await,
            Category::HistoryMetadata => self.history_metadata(symbol).await,
            Category::FastInfo => self.fast_info(symbol).await,
            Category::Dividends => self.chart_events(symbol, EventKind::Dividends).await,
            Category::Splits => self.chart_events(symbol, EventKind::Splits).await,
            Category::CapitalGains => self.chart_events(symbol, EventKind::CapitalGains).await,
            Category::BalanceSheet => self.statement(symbol, Statement::BalanceSheet).await,
            Category::QuarterlyIncomeStmt => {
                self.statement(symbol, Statement::QuarterlyIncomeStmt).await
            }
            Category::CashFlow => self.statement(symbol, Statement::CashFlow).await,
            Category::SharesOutstanding => self.statement(symbol, Statement::Shares).await,
            Category::Info => self.info(symbol).await,
            Category::Calendar => self.calendar(symbol).await,
            Category::AnalystPriceTargets => self.analyst_price_targets(symbol).await,
            Category::Recommendations => self.recommendations(symbol).await,
            Category::RecommendationsSummary => self.recommendations_summary(symbol).await,
            Category::RevenueEstimate => {
                self.earnings_trend(symbol, TrendSlice::RevenueEstimate).await
            }
            Category::EarningsEstimate => {
                self.earnings_trend(symbol, TrendSlice::EarningsEstimate).await
            }
            Category::GrowthEstimates => self.earnings_trend(symbol, TrendSlice::Growth).await,
            Category::EpsTrend => self.earnings_trend(symbol, TrendSlice::EpsTrend).await,
            Category::EpsRevisions => self.earnings_trend(symbol, TrendSlice::EpsRevisions).await,
            Category::EarningsHistory => self.earnings_history(symbol).await,
            Category::EarningsDates => self.earnings_dates(symbol).await,
            Category::SecFilings => self.sec_filings(symbol).await,
            Category::InsiderPurchases => self.insider_purchases(symbol).await,
            Category::InsiderTransactions => self.insider_transactions(symbol).await,
            Category::InsiderRosterHolders => self.insider_roster_holders(symbol).await,
            Category::MajorHolders => self.major_holders(symbol).await,
            Category::InstitutionalHolders => {
                self.ownership_holders(symbol, "institutionOwnership").await
            }
            Category::MutualfundHolders => self.ownership_holders(symbol, "fundOwnership").await,
            Category::News => self.news(symbol).await,
            Category::Sustainability => self.sustainability(symbol).await,
            Category::UpgradesDowngrades => self.upgrades_downgrades(symbol).await,
            Category::Isin => self.isin(symbol).await,
        }
    }
}
