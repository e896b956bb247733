//! Filtering rule table.
//!
//! One rule per category whose payload gets reduced in the cleaned document;
//! categories without a rule pass through untouched. Tightening the cleaned
//! output is a table change here, not a code change in the filter.

use snapshot_core::Category;

/// How a rule's field list applies to the category payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleKind {
    /// Payload is a flat mapping; keep the listed keys.
    Flat,
    /// Payload is a date-keyed mapping of flat mappings; keep the listed
    /// keys within each date entry.
    Dated {
        /// Drop date entries older than December 31 of the previous year.
        cutoff: bool,
    },
    /// Payload is a list of news items; keep each item's id and the listed
    /// keys within its content mapping.
    NewsItems,
}

/// Filtering rule for one category.
#[derive(Clone, Copy, Debug)]
pub struct Rule {
    /// Category the rule applies to.
    pub category: Category,
    /// Payload shape and cutoff behavior.
    pub kind: RuleKind,
    /// Field allow-list; filtered payloads keep their own field order.
    pub fields: &'static [&'static str],
}

/// The default rule table.
pub const DEFAULT_RULES: &[Rule] = &[
    Rule {
        category: Category::BalanceSheet,
        kind: RuleKind::Dated { cutoff: true },
        fields: &[
            "Ordinary Shares Number",
            "Total Debt",
            "Common Stock Equity",
            "Stockholders Equity",
            "Retained Earnings",
            "Total Capitalization",
            "Invested Capital",
            "Total Liabilities Net Minority Interest",
            "Current Liabilities",
            "Long Term Debt",
            "Payables And Accrued Expenses",
            "Total Tax Payable",
            "Current Debt And Capital Lease Obligation",
            "Total Assets",
            "Current Assets",
            "Cash Cash Equivalents And Short Term Investments",
            "Receivables",
            "Net PPE",
            "Goodwill And Other Intangible Assets",
            "Investments And Advances",
            "Working Capital",
            "Tangible Book Value",
            "Accumulated Depreciation",
        ],
    },
    Rule {
        category: Category::QuarterlyIncomeStmt,
        kind: RuleKind::Dated { cutoff: false },
        fields: &[
            "Total Revenue",
            "Gross Profit",
            "EBITDA",
            "EBIT",
            "Operating Income",
            "Net Income",
            "Normalized Income",
            "Pretax Income",
            "Diluted NI Available to Common Stockholders",
            "Total Expenses",
            "Operating Expense",
            "Cost Of Revenue",
            "Selling General And Administration",
            "Selling And Marketing Expense",
            "Research And Development",
            "Tax Provision",
            "Tax Rate For Calcs",
            "Net Interest Income",
            "Interest Expense",
            "Interest Income",
            "Total Unusual Items",
            "Tax Effect Of Unusual Items",
            "Gain On Sale Of Security",
            "Other Income Expense",
            "Earnings From Equity Interest",
        ],
    },
    Rule {
        category: Category::Info,
        kind: RuleKind::Flat,
        fields: &[
            "shortName",
            "symbol",
            "sector",
            "industry",
            "totalRevenue",
            "grossProfits",
            "ebitda",
            "netIncomeToCommon",
            "revenueGrowth",
            "earningsGrowth",
            "grossMargins",
            "operatingMargins",
            "returnOnAssets",
            "returnOnEquity",
            "currentPrice",
            "marketCap",
            "trailingPE",
            "forwardPE",
            "priceToBook",
            "priceToSalesTrailing12Months",
            "enterpriseToRevenue",
            "enterpriseToEbitda",
            "dividendRate",
            "dividendYield",
            "payoutRatio",
            "exDividendDate",
            "totalCash",
            "totalDebt",
            "debtToEquity",
            "quickRatio",
            "currentRatio",
            "freeCashflow",
            "operatingCashflow",
            "targetHighPrice",
            "targetLowPrice",
            "targetMeanPrice",
            "recommendationMean",
            "numberOfAnalystOpinions",
            "beta",
            "52WeekChange",
            "SandP52WeekChange",
            "fiftyTwoWeekHigh",
            "fiftyTwoWeekLow",
            "fiftyDayAverage",
            "twoHundredDayAverage",
            "lastDividendValue",
            "lastDividendDate",
            "trailingPegRatio",
            "sharesOutstanding",
            "floatShares",
            "heldPercentInstitutions",
            "heldPercentInsiders",
        ],
    },
    Rule {
        category: Category::CashFlow,
        kind: RuleKind::Dated { cutoff: false },
        fields: &[
            "Operating Cash Flow",
            "Cash Flow From Continuing Operating Activities",
            "Net Income From Continuing Operations",
            "Depreciation And Amortization",
            "Stock Based Compensation",
            "Deferred Tax",
            "Investing Cash Flow",
            "Capital Expenditure",
            "Net PPE Purchase And Sale",
            "Net Investment Purchase And Sale",
            "Financing Cash Flow",
            "Repurchase Of Capital Stock",
            "Cash Dividends Paid",
            "Long Term Debt Issuance",
            "Long Term Debt Payments",
            "Net Issuance Payments Of Debt",
            "End Cash Position",
            "Beginning Cash Position",
            "Changes In Cash",
        ],
    },
    Rule {
        category: Category::News,
        kind: RuleKind::NewsItems,
        fields: &["id", "title", "summary", "pubDate", "canonicalUrl"],
    },
    Rule {
        category: Category::InsiderRosterHolders,
        kind: RuleKind::Flat,
        fields: &[
            "Name",
            "Position",
            "Most Recent Transaction",
            "Latest Transaction Date",
            "Shares Owned Directly",
            "Shares Owned Indirectly",
        ],
    },
];
