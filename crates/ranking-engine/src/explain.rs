//! Explanation text for ranked rows: headline strengths and the
//! philosophy-specific reason a company landed where it did.

use philosophy_profiles::PhilosophyProfile;
use ranking_core::{Metric, MetricRow};

/// Up to five headline strengths for one company.
pub fn key_drivers(row: &MetricRow) -> Vec<String> {
    let mut drivers = Vec::new();

    if let Some(roe) = row.roe {
        if roe > 20.0 {
            drivers.push(format!("ROE {:.1}%", roe));
        }
    }
    if let Some(roce) = row.roce {
        if roce > 20.0 {
            drivers.push(format!("ROCE {:.1}%", roce));
        }
    }
    if let Some(opm) = row.opm {
        if opm > 15.0 {
            drivers.push(format!("OPM {:.1}%", opm));
        }
    }
    if let Some(growth) = row.profit_growth_3yr {
        if growth > 20.0 {
            drivers.push(format!("Profit Growth {:.0}%", growth));
        }
    }
    if let Some(growth) = row.sales_growth_5yr {
        if growth > 15.0 {
            drivers.push(format!("Sales Growth {:.0}%", growth));
        }
    }
    if let Some(growth) = row.eps_growth_3yr {
        if growth > 20.0 {
            drivers.push(format!("EPS Growth {:.0}%", growth));
        }
    }
    if let Some(de) = row.debt_equity {
        if de < 0.5 {
            drivers.push(format!("Low D/E {:.2}", de));
        }
    }
    if let Some(fcf) = row.fcf {
        if fcf > 0.0 {
            drivers.push("Positive FCF".to_string());
        }
    }
    if let Some(pe) = row.pe_ratio {
        if pe > 0.0 && pe < 15.0 {
            drivers.push(format!("Attractive P/E {:.1}", pe));
        }
    }
    if let Some(peg) = row.peg {
        if peg > 0.0 && peg < 1.0 {
            drivers.push(format!("Low PEG {:.2}", peg));
        }
    }
    if let Some(yield_pct) = row.dividend_yield {
        if yield_pct > 2.0 {
            drivers.push(format!("Div Yield {:.1}%", yield_pct));
        }
    }

    drivers.truncate(5);
    drivers
}

/// Explain a rank in terms of the philosophy's three heaviest metrics.
pub fn ranking_reason(row: &MetricRow, profile: &PhilosophyProfile, rank: usize) -> String {
    let mut top_metrics: Vec<(Metric, f64)> = profile.weights.clone();
    top_metrics.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    top_metrics.truncate(3);

    let mut reasons = Vec::new();
    for (metric, _) in top_metrics {
        let Some(value) = row.get(metric) else {
            continue;
        };
        match metric {
            Metric::Roe if value > 20.0 => {
                reasons.push(format!("Excellent ROE of {:.1}%", value))
            }
            Metric::Roe if value > 15.0 => {
                reasons.push(format!("Strong ROE of {:.1}%", value))
            }
            Metric::Roce if value > 20.0 => {
                reasons.push(format!("High ROCE of {:.1}%", value))
            }
            Metric::DebtEquity if value < 0.5 => {
                reasons.push(format!("Low debt-to-equity ratio of {:.2}", value))
            }
            Metric::ProfitGrowth3Yr
            | Metric::ProfitGrowth5Yr
            | Metric::SalesGrowth5Yr
            | Metric::EpsGrowth3Yr
                if value > 20.0 =>
            {
                reasons.push(format!("Strong growth of {:.0}%", value))
            }
            Metric::Fcf if value > 500.0 => {
                reasons.push(format!("Strong free cash flow of {:.0} Cr", value))
            }
            Metric::PeRatio if value > 0.0 && value < 15.0 => {
                reasons.push(format!("Attractive P/E ratio of {:.1}", value))
            }
            Metric::Peg if value > 0.0 && value < 1.0 => {
                reasons.push(format!("Excellent PEG ratio of {:.2}", value))
            }
            Metric::DividendYield if value > 2.0 => {
                reasons.push(format!("Good dividend yield of {:.1}%", value))
            }
            _ => {}
        }
    }

    if reasons.is_empty() {
        format!(
            "Ranked #{} based on {} investment philosophy.",
            rank, profile.display_name
        )
    } else {
        format!(
            "Ranked #{}: {}. Aligns well with {} investment criteria.",
            rank,
            reasons.join(". "),
            profile.display_name
        )
    }
}
