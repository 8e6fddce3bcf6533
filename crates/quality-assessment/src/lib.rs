//! Quality multiplier assessors.
//!
//! Three independent functions, each reading the raw (not normalized) row
//! and returning a bounded multiplicative factor applied to the weighted
//! composite score. They stack multiplicatively with each other and with
//! the risk-penalty discount.

use ranking_core::MetricRow;
use serde::{Deserialize, Serialize};

/// Overall business quality multiplier, bounded to [0.5, 1.5].
///
/// Starts at 1.0, loses 0.15 per red flag and 0.05 per yellow flag, then
/// gets a multiplicative ROE bonus of up to +60% for ROE above 10%.
pub fn business_quality(row: &MetricRow) -> f64 {
    let mut red_flags = 0u32;
    let mut yellow_flags = 0u32;

    if let Some(roe) = row.roe {
        if roe < 5.0 {
            red_flags += 1;
        } else if roe < 12.0 {
            yellow_flags += 1;
        }
    }

    if let Some(de) = row.debt_equity {
        if de > 2.0 {
            red_flags += 1;
        } else if de > 1.0 && de <= 1.5 {
            yellow_flags += 1;
        }
    }

    if let Some(fcf) = row.fcf {
        if fcf < -100.0 {
            red_flags += 1;
        }
    }

    if let Some(peg) = row.peg {
        if peg > 2.0 {
            yellow_flags += 1;
        }
    }

    let mut quality = 1.0 - (red_flags as f64 * 0.15) - (yellow_flags as f64 * 0.05);

    // Exceptional ROE earns a multiplicative bonus, capped at +60%
    if let Some(roe) = row.roe {
        if roe > 10.0 {
            let roe_bonus = ((roe - 10.0) / 40.0).min(0.6);
            quality *= 1.0 + roe_bonus;
        }
    }

    quality.clamp(0.5, 1.5)
}

/// Cash flow quality and sustainability multiplier, bounded to [0.7, 1.2].
pub fn cash_flow_quality(row: &MetricRow) -> f64 {
    let mut quality: f64 = 1.0;

    match row.fcf {
        Some(fcf) if fcf > 0.0 => {
            quality += 0.05;

            // Strong cash conversion: FCF relative to reported profit
            if let Some(pat) = row.pat {
                if pat > 0.0 {
                    let fcf_to_profit = fcf / pat;
                    if fcf_to_profit > 0.8 {
                        quality += 0.10;
                    } else if fcf_to_profit > 0.5 {
                        quality += 0.05;
                    }
                }
            }

            if let (Some(fcf3), Some(fcf5)) = (row.fcf_3yr, row.fcf_5yr) {
                if fcf3 > 0.0 && fcf5 > 0.0 {
                    quality += 0.05;
                }
            }
        }
        Some(_) => {
            // Negative FCF also draws a risk penalty; this is the quality view
            quality -= 0.10;
        }
        None => {}
    }

    if let Some(turnover) = row.asset_turnover {
        if turnover > 1.0 {
            quality += 0.05;
        }
    }

    quality.clamp(0.7, 1.2)
}

/// Valuation reasonableness: a multiplier bounded to [0.6, 1.3] plus the
/// warnings that explain any discount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationAssessment {
    pub score: f64,
    pub warnings: Vec<String>,
}

/// Checks whether the valuation is justified by the fundamentals: PEG
/// implied from P/E and profit growth, the ROE/P-E cross-check, FCF yield,
/// and price/sales against margins.
pub fn valuation_reasonableness(row: &MetricRow) -> ValuationAssessment {
    let mut score: f64 = 1.0;
    let mut warnings = Vec::new();

    if let (Some(pe), Some(growth)) = (row.pe_ratio, row.profit_growth_3yr) {
        if growth > 0.0 {
            let implied_peg = pe / growth;
            if implied_peg < 0.5 {
                score += 0.15;
            } else if implied_peg < 1.0 {
                score += 0.10;
            } else if implied_peg > 3.0 {
                score -= 0.20;
                warnings.push("High valuation vs growth (PEG > 3)".to_string());
            } else if implied_peg > 2.0 {
                score -= 0.10;
                warnings.push("Elevated valuation vs growth (PEG > 2)".to_string());
            }
        }
    }

    if let (Some(pe), Some(roe)) = (row.pe_ratio, row.roe) {
        if roe > 25.0 && pe < 30.0 {
            score += 0.10;
        } else if roe < 15.0 && pe > 25.0 {
            score -= 0.15;
            warnings.push("High P/E without strong ROE".to_string());
        }
    }

    if let (Some(fcf), Some(mcap)) = (row.fcf, row.market_cap) {
        if mcap > 0.0 {
            let fcf_yield = (fcf / mcap) * 100.0;
            if fcf_yield > 8.0 {
                score += 0.10;
            } else if fcf_yield > 5.0 {
                score += 0.05;
            } else if fcf_yield < 0.0 {
                score -= 0.15;
                warnings.push("Negative FCF yield".to_string());
            }
        }
    }

    if let (Some(ps), Some(opm)) = (row.cmp_sales, row.opm) {
        if ps > 10.0 && opm < 15.0 {
            score -= 0.10;
            warnings.push("High Price/Sales without strong margins".to_string());
        }
    }

    ValuationAssessment {
        score: score.clamp(0.6, 1.3),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clean_row_is_neutral() {
        let row = MetricRow {
            roe: Some(9.0),
            debt_equity: Some(0.5),
            fcf: Some(50.0),
            ..MetricRow::new("Plain Co")
        };
        // One yellow flag (ROE between 5 and 12), no ROE bonus
        assert_relative_eq!(business_quality(&row), 0.95, epsilon = 1e-9);
    }

    #[test]
    fn red_flags_stack_and_clamp() {
        let row = MetricRow {
            roe: Some(2.0),
            debt_equity: Some(3.0),
            fcf: Some(-500.0),
            ..MetricRow::new("Troubled Co")
        };
        // Three red flags would give 0.55; still above the floor
        assert_relative_eq!(business_quality(&row), 0.55, epsilon = 1e-9);
    }

    #[test]
    fn roe_bonus_is_capped() {
        let row = MetricRow {
            roe: Some(80.0),
            ..MetricRow::new("Compounder")
        };
        // Bonus capped at +60%, result capped at 1.5
        assert_relative_eq!(business_quality(&row), 1.5, epsilon = 1e-9);
    }

    #[test]
    fn cash_conversion_rewarded() {
        let row = MetricRow {
            fcf: Some(900.0),
            pat: Some(1000.0),
            fcf_3yr: Some(800.0),
            fcf_5yr: Some(700.0),
            asset_turnover: Some(1.4),
            ..MetricRow::new("Cash Machine")
        };
        // 1.0 + 0.05 + 0.10 + 0.05 + 0.05 = 1.25, clamped to 1.2
        assert_relative_eq!(cash_flow_quality(&row), 1.2, epsilon = 1e-9);
    }

    #[test]
    fn negative_fcf_discounted() {
        let row = MetricRow {
            fcf: Some(-50.0),
            ..MetricRow::new("Burner")
        };
        assert_relative_eq!(cash_flow_quality(&row), 0.9, epsilon = 1e-9);
    }

    #[test]
    fn missing_fcf_is_neutral() {
        let row = MetricRow::new("Sparse Co");
        assert_relative_eq!(cash_flow_quality(&row), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn expensive_growth_warned() {
        let row = MetricRow {
            pe_ratio: Some(90.0),
            profit_growth_3yr: Some(25.0),
            ..MetricRow::new("Hype Co")
        };
        let assessment = valuation_reasonableness(&row);
        assert!(assessment.score < 1.0);
        assert!(assessment
            .warnings
            .iter()
            .any(|w| w.contains("PEG > 3")));
    }

    #[test]
    fn quality_at_fair_price_boosted() {
        let row = MetricRow {
            pe_ratio: Some(20.0),
            roe: Some(30.0),
            profit_growth_3yr: Some(25.0),
            fcf: Some(900.0),
            market_cap: Some(10_000.0),
            ..MetricRow::new("Steady Co")
        };
        let assessment = valuation_reasonableness(&row);
        // PEG 0.8 (+0.10), ROE/PE (+0.10), FCF yield 9% (+0.10)
        assert_relative_eq!(assessment.score, 1.3, epsilon = 1e-9);
        assert!(assessment.warnings.is_empty());
    }
}
