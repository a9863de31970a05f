//! Line identifiers read by the checks.
//!
//! Candidate lists are tried in order; the first line with a present amount wins.

/// Balance sheet: total assets.
pub const ASSETS_TOTAL: &str = "AssetsTotal";
/// Balance sheet: total liabilities and equity.
pub const LIABILITIES_AND_EQUITY_TOTAL: &str = "LiabilitiesAndEquityTotal";
/// Balance sheet: receivables, read from the movement column.
pub const RECEIVABLES_MOVEMENT: &str = "ReceivablesMovement";

/// Equity: opening equity.
pub const EQUITY_OPENING: &str = "EquityOpening";
/// Equity: closing equity.
pub const EQUITY_CLOSING: &str = "EquityClosing";
/// Equity: profit for the period.
pub const PROFIT: &[&str] = &["ProfitForTheYear", "ProfitAfterTax"];
/// Equity: dividends declared or paid.
pub const DIVIDENDS: &[&str] = &["Dividends", "DividendsPaid"];
/// Equity: other movements.
pub const OTHER_EQUITY_MOVEMENTS: &str = "OtherEquityMovements";

/// Income statement: extraordinary income.
pub const EXTRAORDINARY_INCOME: &str = "ExtraordinaryIncome";
/// Income statement: impairment of investments.
pub const IMPAIRMENT: &[&str] = &["Impairment_Investments", "WriteDownsInvestments"];
