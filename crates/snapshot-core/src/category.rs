//! Category registry.
//!
//! A category is one named kind of financial data fetched independently for
//! a ticker. The registry is a fixed, ordered enumeration: the fetch loop
//! walks [`Category::ALL`] and never special-cases individual entries, so
//! adding or removing a category is a table change, not a control-flow
//! change.

use std::fmt;

/// One named kind of financial data fetched independently per ticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Five years of daily price history.
    History,
    /// International Securities Identification Number.
    Isin,
    /// Annual balance sheet.
    BalanceSheet,
    /// Quarterly income statement.
    QuarterlyIncomeStmt,
    /// Upcoming earnings/dividend calendar.
    Calendar,
    /// General company and valuation information.
    Info,
    /// Analyst price targets.
    AnalystPriceTargets,
    /// Dividend payment history.
    Dividends,
    /// Stock split history.
    Splits,
    /// Capital gain distributions.
    CapitalGains,
    /// Annual cash flow statement.
    CashFlow,
    /// Revenue estimates per period.
    RevenueEstimate,
    /// Growth estimates per period.
    GrowthEstimates,
    /// Analyst recommendation history.
    Recommendations,
    /// Analyst recommendation summary per period.
    RecommendationsSummary,
    /// Earnings estimates per period.
    EarningsEstimate,
    /// Past earnings results.
    EarningsHistory,
    /// EPS trend per period.
    EpsTrend,
    /// EPS revisions per period.
    EpsRevisions,
    /// Past and upcoming earnings dates.
    EarningsDates,
    /// SEC filings.
    SecFilings,
    /// Net insider purchase activity.
    InsiderPurchases,
    /// Insider transactions.
    InsiderTransactions,
    /// Insider holder roster.
    InsiderRosterHolders,
    /// Major holder breakdown.
    MajorHolders,
    /// Institutional holders.
    InstitutionalHolders,
    /// Mutual fund holders.
    MutualfundHolders,
    /// Recent news items.
    News,
    /// ESG/sustainability scores.
    Sustainability,
    /// Analyst upgrade/downgrade history.
    UpgradesDowngrades,
    /// Quick-access quote facts.
    FastInfo,
    /// Share count history.
    SharesOutstanding,
    /// Metadata describing the price history series.
    HistoryMetadata,
}

impl Category {
    /// The fixed fetch registry, in traversal order.
    ///
    /// Document ordering follows this list; it is cosmetic only and no
    /// consumer may depend on it.
    pub const ALL: &'static [Self] = &[
        Self::History,
        Self::Isin,
        Self::BalanceSheet,
        Self::QuarterlyIncomeStmt,
        Self::Calendar,
        Self::Info,
        Self::AnalystPriceTargets,
        Self::Dividends,
        Self::Splits,
        Self::CapitalGains,
        Self::CashFlow,
        Self::RevenueEstimate,
        Self::GrowthEstimates,
        Self::Recommendations,
        Self::RecommendationsSummary,
        Self::EarningsEstimate,
        Self::EarningsHistory,
        Self::EpsTrend,
        Self::EpsRevisions,
        Self::EarningsDates,
        Self::SecFilings,
        Self::InsiderPurchases,
        Self::InsiderTransactions,
        Self::InsiderRosterHolders,
        Self::MajorHolders,
        Self::InstitutionalHolders,
        Self::MutualfundHolders,
        Self::News,
        Self::Sustainability,
        Self::UpgradesDowngrades,
        Self::FastInfo,
        Self::SharesOutstanding,
        Self::HistoryMetadata,
    ];

    /// Unique document key for this category.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::History => "history",
            Self::Isin => "isin",
            Self::BalanceSheet => "balance_sheet",
            Self::QuarterlyIncomeStmt => "quarterly_income_stmt",
            Self::Calendar => "calendar",
            Self::Info => "info",
            Self::AnalystPriceTargets => "analyst_price_targets",
            Self::Dividends => "dividends",
            Self::Splits => "splits",
            Self::CapitalGains => "capital_gains",
            Self::CashFlow => "cash_flow",
            Self::RevenueEstimate => "revenue_estimate",
            Self::GrowthEstimates => "growth_estimates",
            Self::Recommendations => "recommendations",
            Self::RecommendationsSummary => "recommendations_summary",
            Self::EarningsEstimate => "earnings_estimate",
            Self::EarningsHistory => "earnings_history",
            Self::EpsTrend => "eps_trend",
            Self::EpsRevisions => "eps_revisions",
            Self::EarningsDates => "earnings_dates",
            Self::SecFilings => "sec_filings",
            Self::InsiderPurchases => "insider_purchases",
            Self::InsiderTransactions => "insider_transactions",
            Self::InsiderRosterHolders => "insider_roster_holders",
            Self::MajorHolders => "major_holders",
            Self::InstitutionalHolders => "institutional_holders",
            Self::MutualfundHolders => "mutualfund_holders",
            Self::News => "news",
            Self::Sustainability => "sustainability",
            Self::UpgradesDowngrades => "upgrades_downgrades",
            Self::FastInfo => "fast_info",
            Self::SharesOutstanding => "shares_outstanding",
            Self::HistoryMetadata => "history_metadata",
        }
    }

    /// Human-readable description of the provider query performed.
    ///
    /// Recorded alongside each payload for diagnostics only.
    #[must_use]
    pub const fn request(self) -> &'static str {
        match self {
            Self::History => "chart range=5y interval=1d",
            Self::Isin => "businessinsider search-suggest",
            Self::BalanceSheet => "fundamentals-timeseries annual balance-sheet",
            Self::QuarterlyIncomeStmt => "fundamentals-timeseries quarterly income-statement",
            Self::Calendar => "quoteSummary modules=calendarEvents",
            Self::Info => {
                "quoteSummary modules=assetProfile,summaryDetail,defaultKeyStatistics,financialData,quoteType"
            }
            Self::AnalystPriceTargets => "quoteSummary modules=financialData",
            Self::Dividends => "chart range=5y events=div",
            Self::Splits => "chart range=5y events=split",
            Self::CapitalGains => "chart range=5y events=capitalGain",
            Self::CashFlow => "fundamentals-timeseries annual cash-flow",
            Self::RevenueEstimate => "quoteSummary modules=earningsTrend (revenueEstimate)",
            Self::GrowthEstimates => "quoteSummary modules=earningsTrend (growth)",
            Self::Recommendations => "quoteSummary modules=recommendationTrend",
            Self::RecommendationsSummary => "quoteSummary modules=recommendationTrend",
            Self::EarningsEstimate => "quoteSummary modules=earningsTrend (earningsEstimate)",
            Self::EarningsHistory => "quoteSummary modules=earningsHistory",
            Self::EpsTrend => "quoteSummary modules=earningsTrend (epsTrend)",
            Self::EpsRevisions => "quoteSummary modules=earningsTrend (epsRevisions)",
            Self::EarningsDates => "quoteSummary modules=earnings",
            Self::SecFilings => "quoteSummary modules=secFilings",
            Self::InsiderPurchases => "quoteSummary modules=netSharePurchaseActivity",
            Self::InsiderTransactions => "quoteSummary modules=insiderTransactions",
            Self::InsiderRosterHolders => "quoteSummary modules=insiderHolders",
            Self::MajorHolders => "quoteSummary modules=majorHoldersBreakdown",
            Self::InstitutionalHolders => "quoteSummary modules=institutionOwnership",
            Self::MutualfundHolders => "quoteSummary modules=fundOwnership",
            Self::News => "search newsCount=10",
            Self::Sustainability => "quoteSummary modules=esgScores",
            Self::UpgradesDowngrades => "quoteSummary modules=upgradeDowngradeHistory",
            Self::FastInfo => "chart meta (quick facts)",
            Self::SharesOutstanding => "fundamentals-timeseries annual share counts",
            Self::HistoryMetadata => "chart meta",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_size() {
        assert_eq!(Category::ALL.len(), 33);
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<&str> = Category::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys.len(), Category::ALL.len());
    }

    #[test]
    fn test_requests_are_non_empty() {
        for category in Category::ALL {
            assert!(!category.request().is_empty(), "{category}");
        }
    }
}
