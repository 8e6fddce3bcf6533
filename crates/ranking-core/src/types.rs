use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RankingError;

/// Scoring direction for a metric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// The fundamental metrics the engine understands.
///
/// Ratios and margins are percentages, cash figures are in crores,
/// valuation multiples are plain ratios.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Roe,
    Roce,
    PeRatio,
    Peg,
    DebtEquity,
    Opm,
    Fcf,
    Fcf3Yr,
    Fcf5Yr,
    MarketCap,
    Pat,
    ProfitGrowth3Yr,
    ProfitGrowth5Yr,
    SalesGrowth5Yr,
    EpsGrowth3Yr,
    DividendYield,
    Return1Yr,
    PbRatio,
    EvEbitda,
    CmpSales,
    AssetTurnover,
}

impl Metric {
    /// Every metric, in the order columns are normalized.
    pub const ALL: [Metric; 21] = [
        Metric::Roe,
        Metric::Roce,
        Metric::PeRatio,
        Metric::Peg,
        Metric::DebtEquity,
        Metric::Opm,
        Metric::Fcf,
        Metric::Fcf3Yr,
        Metric::Fcf5Yr,
        Metric::MarketCap,
        Metric::Pat,
        Metric::ProfitGrowth3Yr,
        Metric::ProfitGrowth5Yr,
        Metric::SalesGrowth5Yr,
        Metric::EpsGrowth3Yr,
        Metric::DividendYield,
        Metric::Return1Yr,
        Metric::PbRatio,
        Metric::EvEbitda,
        Metric::CmpSales,
        Metric::AssetTurnover,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Roe => "roe",
            Metric::Roce => "roce",
            Metric::PeRatio => "pe_ratio",
            Metric::Peg => "peg",
            Metric::DebtEquity => "debt_equity",
            Metric::Opm => "opm",
            Metric::Fcf => "fcf",
            Metric::Fcf3Yr => "fcf_3yr",
            Metric::Fcf5Yr => "fcf_5yr",
            Metric::MarketCap => "market_cap",
            Metric::Pat => "pat",
            Metric::ProfitGrowth3Yr => "profit_growth_3yr",
            Metric::ProfitGrowth5Yr => "profit_growth_5yr",
            Metric::SalesGrowth5Yr => "sales_growth_5yr",
            Metric::EpsGrowth3Yr => "eps_growth_3yr",
            Metric::DividendYield => "dividend_yield",
            Metric::Return1Yr => "return_1yr",
            Metric::PbRatio => "pb_ratio",
            Metric::EvEbitda => "ev_ebitda",
            Metric::CmpSales => "cmp_sales",
            Metric::AssetTurnover => "asset_turnover",
        }
    }

    /// Valuation multiples and leverage score inversely; everything else
    /// scores higher-is-better.
    pub fn direction(&self) -> Direction {
        match self {
            Metric::DebtEquity
            | Metric::PeRatio
            | Metric::Peg
            | Metric::CmpSales
            | Metric::PbRatio
            | Metric::EvEbitda => Direction::LowerIsBetter,
            _ => Direction::HigherIsBetter,
        }
    }
}

/// One company row of the input table.
///
/// Every metric is optional: absence means the uploaded sheet had no value
/// for that column, and consumers must handle it explicitly. Nothing here
/// is defaulted at the data layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricRow {
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub roe: Option<f64>,
    pub roce: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub peg: Option<f64>,
    pub debt_equity: Option<f64>,
    pub opm: Option<f64>,
    pub fcf: Option<f64>,
    pub fcf_3yr: Option<f64>,
    pub fcf_5yr: Option<f64>,
    pub market_cap: Option<f64>,
    pub pat: Option<f64>,
    pub profit_growth_3yr: Option<f64>,
    pub profit_growth_5yr: Option<f64>,
    pub sales_growth_5yr: Option<f64>,
    pub eps_growth_3yr: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub return_1yr: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub ev_ebitda: Option<f64>,
    pub cmp_sales: Option<f64>,
    pub asset_turnover: Option<f64>,
}

impl MetricRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Roe => self.roe,
            Metric::Roce => self.roce,
            Metric::PeRatio => self.pe_ratio,
            Metric::Peg => self.peg,
            Metric::DebtEquity => self.debt_equity,
            Metric::Opm => self.opm,
            Metric::Fcf => self.fcf,
            Metric::Fcf3Yr => self.fcf_3yr,
            Metric::Fcf5Yr => self.fcf_5yr,
            Metric::MarketCap => self.market_cap,
            Metric::Pat => self.pat,
            Metric::ProfitGrowth3Yr => self.profit_growth_3yr,
            Metric::ProfitGrowth5Yr => self.profit_growth_5yr,
            Metric::SalesGrowth5Yr => self.sales_growth_5yr,
            Metric::EpsGrowth3Yr => self.eps_growth_3yr,
            Metric::DividendYield => self.dividend_yield,
            Metric::Return1Yr => self.return_1yr,
            Metric::PbRatio => self.pb_ratio,
            Metric::EvEbitda => self.ev_ebitda,
            Metric::CmpSales => self.cmp_sales,
            Metric::AssetTurnover => self.asset_turnover,
        }
    }

    /// The label used in audit lists and log lines.
    pub fn display_symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or(&self.name)
    }
}

/// Policy controlling which rows the FCF-based disqualification rules
/// apply to. Non-FCF rules (extreme P/E, negative ROE, volatility) apply
/// in every mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DqMode {
    /// FCF disqualifications skipped for financial-sector rows only.
    #[default]
    FinancialsOnlyOff,
    /// FCF disqualifications skipped for every row.
    GlobalOff,
    /// FCF disqualifications applied to every row.
    GlobalOn,
}

impl DqMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DqMode::FinancialsOnlyOff => "financials_only_off",
            DqMode::GlobalOff => "global_off",
            DqMode::GlobalOn => "global_on",
        }
    }

    /// Whether FCF-based disqualification rules apply to a row.
    pub fn applies_fcf_rules(&self, is_financial: bool) -> bool {
        if is_financial {
            *self == DqMode::GlobalOn
        } else {
            matches!(self, DqMode::FinancialsOnlyOff | DqMode::GlobalOn)
        }
    }
}

impl FromStr for DqMode {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "financials_only_off" => Ok(DqMode::FinancialsOnlyOff),
            "global_off" => Ok(DqMode::GlobalOff),
            "global_on" => Ok(DqMode::GlobalOn),
            other => Err(RankingError::InvalidDqMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_accessor_matches_fields() {
        let row = MetricRow {
            roe: Some(18.0),
            debt_equity: Some(0.4),
            ..MetricRow::new("Test Co")
        };
        assert_eq!(row.get(Metric::Roe), Some(18.0));
        assert_eq!(row.get(Metric::DebtEquity), Some(0.4));
        assert_eq!(row.get(Metric::Fcf), None);
    }

    #[test]
    fn dq_mode_parsing() {
        assert_eq!(
            "financials_only_off".parse::<DqMode>().unwrap(),
            DqMode::FinancialsOnlyOff
        );
        assert_eq!("global_on".parse::<DqMode>().unwrap(), DqMode::GlobalOn);
        assert!("fcf_off".parse::<DqMode>().is_err());
    }

    #[test]
    fn fcf_rule_gating() {
        assert!(DqMode::FinancialsOnlyOff.applies_fcf_rules(false));
        assert!(!DqMode::FinancialsOnlyOff.applies_fcf_rules(true));
        assert!(!DqMode::GlobalOff.applies_fcf_rules(false));
        assert!(!DqMode::GlobalOff.applies_fcf_rules(true));
        assert!(DqMode::GlobalOn.applies_fcf_rules(false));
        assert!(DqMode::GlobalOn.applies_fcf_rules(true));
    }
}
