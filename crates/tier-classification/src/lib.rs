//! Investment tier classification.
//!
//! Tiers are absolute-threshold buckets, independent of philosophy weights
//! and of relative ranking: a row can sit in Tier 1 yet rank low on a given
//! philosophy, and the two outcomes are deliberately not reconciled.

use std::collections::BTreeMap;

use ranking_core::MetricRow;
use serde::{Deserialize, Serialize};

/// The four portfolio-suitability tiers, evaluated top-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InvestmentTier {
    Core,
    Quality,
    Specialized,
    Avoid,
}

impl InvestmentTier {
    pub fn number(&self) -> u8 {
        match self {
            InvestmentTier::Core => 1,
            InvestmentTier::Quality => 2,
            InvestmentTier::Specialized => 3,
            InvestmentTier::Avoid => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InvestmentTier::Core => "CORE PORTFOLIO",
            InvestmentTier::Quality => "QUALITY ADDITIONS",
            InvestmentTier::Specialized => "SPECIALIZED PLAYS",
            InvestmentTier::Avoid => "AVOID",
        }
    }

    pub fn recommended_action(&self) -> &'static str {
        match self {
            InvestmentTier::Core => "BUY / HOLD 5+ years",
            InvestmentTier::Quality => "HOLD / BUY on dips",
            InvestmentTier::Specialized => "HOLD / RESEARCH",
            InvestmentTier::Avoid => "EXCLUDE from portfolio",
        }
    }
}

/// Tier plus the insight text explaining the placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierAssignment {
    pub tier: InvestmentTier,
    pub insights: String,
}

/// Classify one row from absolute thresholds, first matching tier wins.
///
/// Missing metrics default pessimistically (ROE/ROCE/FCF/growth to 0,
/// P/E and D/E to 999) so sparse rows fall through to lower tiers.
pub fn classify_tier(row: &MetricRow) -> TierAssignment {
    let roe = row.roe.unwrap_or(0.0);
    let roce = row.roce.unwrap_or(0.0);
    let pe_ratio = row.pe_ratio.unwrap_or(999.0);
    let fcf = row.fcf.unwrap_or(0.0);
    let debt_equity = row.debt_equity.unwrap_or(999.0);
    let profit_growth = row.profit_growth_3yr.unwrap_or(0.0);

    let tier = if roe > 20.0 && roce > 20.0 && pe_ratio < 25.0 && fcf > 500.0 && debt_equity < 0.5
    {
        InvestmentTier::Core
    } else if roe > 15.0 && roce > 15.0 && pe_ratio < 35.0 && fcf > 100.0 && debt_equity < 1.0 {
        InvestmentTier::Quality
    } else if (roe > 12.0 || (fcf > 1000.0 && profit_growth > 0.0)) && debt_equity < 1.5 {
        InvestmentTier::Specialized
    } else {
        InvestmentTier::Avoid
    };

    TierAssignment {
        insights: tier_insights(tier, roe, roce, pe_ratio, fcf, debt_equity),
        tier,
    }
}

fn tier_insights(
    tier: InvestmentTier,
    roe: f64,
    roce: f64,
    pe_ratio: f64,
    fcf: f64,
    debt_equity: f64,
) -> String {
    let mut parts: Vec<String> = Vec::new();
    match tier {
        InvestmentTier::Core => {
            parts.push(format!(
                "Exceptional quality: ROE {:.1}%, ROCE {:.1}%",
                roe, roce
            ));
            parts.push(format!("Strong cash generation: FCF {:.0} Cr", fcf));
            parts.push(format!("Reasonable valuation: P/E {:.1}x", pe_ratio));
            parts.push(format!("Low debt: D/E {:.2}", debt_equity));
        }
        InvestmentTier::Quality => {
            parts.push(format!("Good quality: ROE {:.1}%, ROCE {:.1}%", roe, roce));
            if pe_ratio > 30.0 {
                parts.push(format!(
                    "High valuation: P/E {:.1}x (wait for dip)",
                    pe_ratio
                ));
            } else {
                parts.push(format!("Fair valuation: P/E {:.1}x", pe_ratio));
            }
            if fcf > 500.0 {
                parts.push(format!("Strong FCF: {:.0} Cr", fcf));
            } else {
                parts.push(format!("Moderate FCF: {:.0} Cr", fcf));
            }
        }
        InvestmentTier::Specialized => {
            if roe < 12.0 {
                parts.push(format!("Low ROE: {:.1}% (below quality threshold)", roe));
            } else {
                parts.push(format!("Decent ROE: {:.1}%", roe));
            }
            if fcf > 1000.0 {
                parts.push(format!("Massive FCF: {:.0} Cr (fortress balance sheet)", fcf));
            }
            if debt_equity > 1.0 {
                parts.push(format!("High debt: D/E {:.2}", debt_equity));
            }
            parts.push("Requires further research".to_string());
        }
        InvestmentTier::Avoid => {
            if roe < 8.0 {
                parts.push(format!("Very low ROE: {:.1}%", roe));
            }
            if pe_ratio > 40.0 {
                parts.push(format!("Expensive: P/E {:.1}x", pe_ratio));
            }
            if fcf < 0.0 {
                parts.push(format!("Negative FCF: {:.0} Cr", fcf));
            }
            if debt_equity > 1.5 {
                parts.push(format!("High debt: D/E {:.2}", debt_equity));
            }
            if parts.is_empty() {
                parts.push("Does not meet quality criteria".to_string());
            }
        }
    }
    parts.join(" | ")
}

/// Per-tier aggregate statistics for the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TierStats {
    pub count: usize,
    pub avg_roe: Option<f64>,
    pub avg_roce: Option<f64>,
    pub avg_pe: Option<f64>,
    pub avg_fcf: Option<f64>,
    pub avg_debt_equity: Option<f64>,
    pub avg_score: Option<f64>,
    /// Up to ten company names per tier.
    pub companies: Vec<String>,
}

/// Summarize classified rows per tier (keyed by tier number 1-4).
pub fn tier_summary(
    rows: &[(&MetricRow, InvestmentTier, f64)],
) -> BTreeMap<u8, TierStats> {
    let mut stats: BTreeMap<u8, TierStats> = BTreeMap::new();
    for tier in [
        InvestmentTier::Core,
        InvestmentTier::Quality,
        InvestmentTier::Specialized,
        InvestmentTier::Avoid,
    ] {
        let members: Vec<_> = rows.iter().filter(|(_, t, _)| *t == tier).collect();
        let mut entry = TierStats {
            count: members.len(),
            ..TierStats::default()
        };
        if !members.is_empty() {
            entry.avg_roe = mean(members.iter().filter_map(|(r, _, _)| r.roe));
            entry.avg_roce = mean(members.iter().filter_map(|(r, _, _)| r.roce));
            entry.avg_pe = mean(members.iter().filter_map(|(r, _, _)| r.pe_ratio));
            entry.avg_fcf = mean(members.iter().filter_map(|(r, _, _)| r.fcf));
            entry.avg_debt_equity =
                mean(members.iter().filter_map(|(r, _, _)| r.debt_equity));
            entry.avg_score = mean(members.iter().map(|(_, _, s)| *s));
            entry.companies = members
                .iter()
                .take(10)
                .map(|(r, _, _)| r.name.clone())
                .collect();
        }
        stats.insert(tier.number(), entry);
    }
    stats
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let collected: Vec<f64> = values.collect();
    if collected.is_empty() {
        None
    } else {
        Some(collected.iter().sum::<f64>() / collected.len() as f64)
    }
}

/// Portfolio-construction guidance derived from the four tier counts.
pub fn portfolio_recommendation(stats: &BTreeMap<u8, TierStats>) -> String {
    let count = |tier: u8| stats.get(&tier).map(|s| s.count).unwrap_or(0);
    let tier1 = count(1);
    let tier2 = count(2);
    let tier3 = count(3);
    let tier4 = count(4);
    let total = tier1 + tier2 + tier3 + tier4;

    let mut lines: Vec<String> = Vec::new();

    if tier1 >= 5 {
        lines.push(format!("Excellent: {} CORE stocks available", tier1));
        lines.push(format!(
            "  Allocate 60-70% of portfolio to these {} stocks",
            tier1
        ));
    } else if tier1 > 0 {
        lines.push(format!("Limited: only {} CORE stocks found", tier1));
        lines.push("  Allocate 40-50% to these, supplement with Tier 2".to_string());
    } else {
        lines.push("No CORE stocks meet criteria".to_string());
        lines.push("  Focus on Tier 2 stocks or wait for better opportunities".to_string());
    }

    if tier2 >= 10 {
        lines.push(format!("Good: {} QUALITY stocks available", tier2));
        lines.push(format!(
            "  Allocate 20-30% to top {} from this tier",
            tier2.min(10)
        ));
    } else if tier2 > 0 {
        lines.push(format!("Limited: {} QUALITY stocks found", tier2));
        lines.push("  Allocate 15-20% to these stocks".to_string());
    }

    if tier3 > 0 {
        lines.push(format!("Caution: {} SPECIALIZED stocks", tier3));
        lines.push("  Maximum 10% allocation, only after deep research".to_string());
    }

    if tier4 > 0 {
        lines.push(format!(
            "Avoid: {} stocks do not meet quality standards",
            tier4
        ));
        lines.push("  EXCLUDE from portfolio".to_string());
    }

    let investable = tier1 + tier2;
    lines.push("Portfolio construction:".to_string());
    lines.push(format!("  Total analyzed: {} stocks", total));
    if total > 0 {
        lines.push(format!(
            "  Investable (Tier 1+2): {} stocks ({:.1}%)",
            investable,
            investable as f64 / total as f64 * 100.0
        ));
    }
    lines.push(format!(
        "  Recommended portfolio size: {} stocks",
        investable.min(20)
    ));

    if investable < 10 {
        lines.push(format!(
            "WARNING: only {} quality stocks found; consider expanding the universe \
             or waiting for better valuations",
            investable
        ));
    }

    lines.join("\n")
}
