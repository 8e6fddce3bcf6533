use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ranking_core::DqMode;
use risk_screening::PenaltySet;
use sector_analysis::Sector;
use serde::{Deserialize, Serialize};
use tier_classification::TierStats;

/// One surviving company in the ranked output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCompany {
    pub rank: usize,
    pub name: String,
    pub symbol: Option<String>,
    /// Final sector-adjusted composite score, one decimal.
    pub composite_score: f64,
    pub quality_multiplier: f64,
    pub cash_flow_multiplier: f64,
    pub valuation_multiplier: f64,
    pub penalties: PenaltySet,
    /// Human-readable labels for the fired penalties.
    pub risk_warnings: Vec<String>,
    pub valuation_warnings: Vec<String>,
    pub sector: Sector,
    pub sector_adjustment_pct: f64,
    pub sector_insights: Vec<String>,
    pub is_financial: bool,
    pub tier: u8,
    pub tier_name: String,
    pub tier_action: String,
    pub tier_insights: String,
    pub key_drivers: Vec<String>,
    pub ranking_reason: String,
}

/// Audit entry for a row removed by the disqualification gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisqualifiedCompany {
    pub name: String,
    pub reason: String,
}

/// The full annotated result of one ranking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub philosophy: String,
    pub philosophy_description: String,
    pub dq_mode: DqMode,
    pub generated_at: DateTime<Utc>,
    pub rankings: Vec<RankedCompany>,
    pub disqualified: Vec<DisqualifiedCompany>,
    pub total_ranked: usize,
    pub disqualified_count: usize,
    /// Keyed by tier number 1-4.
    pub tier_statistics: BTreeMap<u8, TierStats>,
    pub portfolio_recommendation: String,
}
