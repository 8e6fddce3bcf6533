use std::collections::BTreeMap;

use ranking_core::MetricRow;
use serde::{Deserialize, Serialize};

/// Named reasons a row's score gets discounted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyReason {
    NegativeFcf,
    ExtremePe,
    HighPe,
    ModeratePe,
    HighDebt,
    ModerateDebt,
    VeryLowRoe,
    LowRoe,
    ModerateRoe,
    LowRoce,
    ModerateRoce,
    HighPeg,
    LowRoeNegativeGrowth,
    LowRoeHighFcf,
    LowFcfRelative,
    MultipleRedFlags,
    ExtremeVolatility,
    HighVolatility,
}

impl PenaltyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PenaltyReason::NegativeFcf => "negative_fcf",
            PenaltyReason::ExtremePe => "extreme_pe",
            PenaltyReason::HighPe => "high_pe",
            PenaltyReason::ModeratePe => "moderate_pe",
            PenaltyReason::HighDebt => "high_debt",
            PenaltyReason::ModerateDebt => "moderate_debt",
            PenaltyReason::VeryLowRoe => "very_low_roe",
            PenaltyReason::LowRoe => "low_roe",
            PenaltyReason::ModerateRoe => "moderate_roe",
            PenaltyReason::LowRoce => "low_roce",
            PenaltyReason::ModerateRoce => "moderate_roce",
            PenaltyReason::HighPeg => "high_peg",
            PenaltyReason::LowRoeNegativeGrowth => "low_roe_negative_growth",
            PenaltyReason::LowRoeHighFcf => "low_roe_high_fcf",
            PenaltyReason::LowFcfRelative => "low_fcf_relative",
            PenaltyReason::MultipleRedFlags => "multiple_red_flags",
            PenaltyReason::ExtremeVolatility => "extreme_volatility",
            PenaltyReason::HighVolatility => "high_volatility",
        }
    }

    /// Human-readable warning label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            PenaltyReason::NegativeFcf => "Negative Free Cash Flow",
            PenaltyReason::ExtremePe => "Extreme P/E Ratio (>100)",
            PenaltyReason::HighPe => "High P/E Ratio (>50)",
            PenaltyReason::ModeratePe => "Moderate P/E (25-50x)",
            PenaltyReason::HighDebt => "High Debt/Equity",
            PenaltyReason::ModerateDebt => "Moderate Debt",
            PenaltyReason::VeryLowRoe => "Very Low ROE (<8%)",
            PenaltyReason::LowRoe => "Low ROE (<10%)",
            PenaltyReason::ModerateRoe => "Moderate ROE (<12%)",
            PenaltyReason::LowRoce => "Low ROCE (<12%)",
            PenaltyReason::ModerateRoce => "Moderate ROCE (<15%)",
            PenaltyReason::HighPeg => "High PEG Ratio (>2)",
            PenaltyReason::LowRoeNegativeGrowth => "Low ROE + Negative Growth",
            PenaltyReason::LowRoeHighFcf => "Low ROE despite High FCF",
            PenaltyReason::LowFcfRelative => "Low FCF Relative to Size",
            PenaltyReason::MultipleRedFlags => "Multiple Quality Concerns",
            PenaltyReason::ExtremeVolatility => "Extreme Volatility",
            PenaltyReason::HighVolatility => "High Volatility",
        }
    }
}

/// Mapping of penalty reason to score discount fraction.
pub type PenaltySet = BTreeMap<PenaltyReason, f64>;

/// Fraction of the total penalty sum the scoring layer will honor.
pub const PENALTY_CAP: f64 = 0.6;

/// Compute the named risk penalties for one row.
///
/// Financial-sector rows get softer treatment where leverage and negative
/// accounting FCF are structural: the negative-FCF penalty drops from 40%
/// to 10% and debt thresholds move from 1.5/1.0 to 5.0/3.0.
pub fn penalties_for(row: &MetricRow, is_financial: bool) -> PenaltySet {
    let mut penalties = PenaltySet::new();

    if let Some(fcf) = row.fcf {
        if fcf < 0.0 {
            let amount = if is_financial { 0.10 } else { 0.40 };
            penalties.insert(PenaltyReason::NegativeFcf, amount);
        }
    }

    if let Some(pe) = row.pe_ratio {
        if pe > 100.0 {
            penalties.insert(PenaltyReason::ExtremePe, 0.25);
        } else if pe > 50.0 {
            penalties.insert(PenaltyReason::HighPe, 0.15);
        } else if pe > 25.0 {
            penalties.insert(PenaltyReason::ModeratePe, 0.05);
        }
    }

    if let Some(de) = row.debt_equity {
        if is_financial {
            // Leverage is part of the business model; lenient thresholds
            if de > 5.0 {
                penalties.insert(PenaltyReason::HighDebt, 0.15);
            } else if de > 3.0 {
                penalties.insert(PenaltyReason::ModerateDebt, 0.05);
            }
        } else if de > 1.5 {
            penalties.insert(PenaltyReason::HighDebt, 0.20);
        } else if de > 1.0 {
            penalties.insert(PenaltyReason::ModerateDebt, 0.10);
        }
    }

    if let Some(roe) = row.roe {
        if roe < 8.0 {
            penalties.insert(PenaltyReason::VeryLowRoe, 0.30);
        } else if roe < 10.0 {
            penalties.insert(PenaltyReason::LowRoe, 0.20);
        } else if roe < 12.0 {
            penalties.insert(PenaltyReason::ModerateRoe, 0.10);
        }
    }

    if let Some(roce) = row.roce {
        if roce < 12.0 {
            penalties.insert(PenaltyReason::LowRoce, 0.10);
        } else if roce < 15.0 {
            penalties.insert(PenaltyReason::ModerateRoce, 0.05);
        }
    }

    if let Some(peg) = row.peg {
        if peg > 2.0 {
            penalties.insert(PenaltyReason::HighPeg, 0.10);
        }
    }

    // Don't let massive FCF mask structurally poor profitability. A
    // fortress balance sheet (FCF > 1000 Cr and D/E < 0.3) softens the
    // penalty rather than removing it.
    if let (Some(roe), Some(fcf), Some(growth)) = (row.roe, row.fcf, row.profit_growth_3yr) {
        if roe < 8.0 && growth < 0.0 {
            let fortress = fcf > 1000.0 && row.debt_equity.unwrap_or(1.0) < 0.3;
            if fortress {
                penalties.insert(PenaltyReason::LowRoeHighFcf, 0.20);
            } else {
                penalties.insert(PenaltyReason::LowRoeNegativeGrowth, 0.50);
            }
        }
    }

    if let (Some(fcf), Some(mcap)) = (row.fcf, row.market_cap) {
        if !is_financial && fcf > 0.0 && fcf < 100.0 && mcap > 1000.0 {
            penalties.insert(PenaltyReason::LowFcfRelative, 0.10);
        }
    }

    // Compound penalty: two or more independent red flags co-occurring
    // should outweigh any single strong metric.
    let mut red_flags = 0u32;
    if row.roe.is_some_and(|roe| roe < 10.0) {
        red_flags += 1;
    }
    if row.profit_growth_3yr.is_some_and(|g| g < 0.0) {
        red_flags += 1;
    }
    if !is_financial
        && row.fcf.is_some_and(|fcf| fcf < 100.0)
        && row.market_cap.is_some_and(|mcap| mcap > 1000.0)
    {
        red_flags += 1;
    }
    if row.debt_equity.is_some_and(|de| de > 1.0) {
        red_flags += 1;
    }
    if red_flags >= 2 {
        penalties.insert(PenaltyReason::MultipleRedFlags, 0.10 * red_flags as f64);
    }

    if let Some(ret) = row.return_1yr {
        if ret.abs() > 1000.0 {
            penalties.insert(PenaltyReason::ExtremeVolatility, 0.20);
        } else if ret.abs() > 500.0 {
            penalties.insert(PenaltyReason::HighVolatility, 0.10);
        }
    }

    penalties
}

/// Sum of penalties as used by the scoring layer, clamped to [`PENALTY_CAP`].
pub fn capped_penalty_total(penalties: &PenaltySet) -> f64 {
    penalties.values().sum::<f64>().min(PENALTY_CAP)
}
