use ranking_core::MetricRow;
use risk_screening::{PenaltyReason, PenaltySet};
use serde::{Deserialize, Serialize};

use crate::benchmarks::SectorBenchmarkTable;
use crate::classify::Sector;

/// Result of rescaling a composite score against sector norms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorAdjustment {
    pub adjusted_score: f64,
    /// Delta applied, as a percentage of the base score.
    pub adjustment_pct: f64,
    pub insights: Vec<String>,
}

impl SectorAdjustment {
    fn unchanged(base_score: f64) -> Self {
        Self {
            adjusted_score: base_score,
            adjustment_pct: 0.0,
            insights: Vec::new(),
        }
    }
}

/// Rescale a composite score using sector-specific norms.
///
/// Three effects, all bounded: a partial refund of the high-debt penalty
/// when D/E sits inside the sector tolerance band, a small bonus for
/// positive FCF in FCF-heavy sectors, a capped premium for ROE above the
/// sector threshold, and a margin bonus well above the sector OPM norm.
/// Out-of-norm debt or margins are flagged in the insights, never excluded.
pub fn adjust_score_for_sector(
    base_score: f64,
    row: &MetricRow,
    sector: Sector,
    penalties: &PenaltySet,
    table: &SectorBenchmarkTable,
) -> SectorAdjustment {
    let Some(bench) = table.get(sector) else {
        return SectorAdjustment::unchanged(base_score);
    };

    let mut multiplier = 1.0;
    let mut insights = Vec::new();
    let sector_name = sector.display_name();

    if let Some(de) = row.debt_equity {
        if de <= bench.debt_equity_norm {
            // Within the tolerance band: refund the portion of a fired
            // high-debt penalty beyond the sector's own multiplier.
            if let (Some(scale), Some(penalty)) = (
                bench.debt_penalty_multiplier,
                penalties.get(&PenaltyReason::HighDebt),
            ) {
                let refund = penalty * (1.0 - scale.min(1.0)).max(0.0);
                if refund > 0.0 {
                    multiplier += refund;
                    insights.push(format!(
                        "Debt within {} norms ({:.2} vs {:.2})",
                        sector_name, de, bench.debt_equity_norm
                    ));
                }
            }
        } else {
            let excess = ((de - bench.debt_equity_norm) / bench.debt_equity_norm) * 100.0;
            insights.push(format!(
                "Debt {:.0}% above {} norm",
                excess, sector_name
            ));
        }
    }

    if let (Some(fcf), Some(fcf_mult)) = (row.fcf, bench.fcf_weight_multiplier) {
        if fcf > 0.0 {
            multiplier += (fcf_mult - 1.0) * 0.05;
            insights.push(format!("Strong FCF valued highly in {}", sector_name));
        }
    }

    if let Some(roe) = row.roe {
        if roe > bench.roe_threshold {
            let premium =
                ((roe - bench.roe_threshold) / bench.roe_threshold * 0.1).min(0.15);
            multiplier += premium;
            insights.push(format!(
                "ROE exceeds {} threshold ({:.1}% > {:.0}%)",
                sector_name, roe, bench.roe_threshold
            ));
        } else if roe < bench.roe_threshold * 0.7 {
            insights.push(format!("ROE below {} expectations", sector_name));
        }
    }

    if let (Some(roce), Some(threshold)) = (row.roce, bench.roce_threshold) {
        if roce > threshold {
            insights.push(format!("ROCE exceeds {} threshold", sector_name));
        }
    }

    if let Some(opm) = row.opm {
        if opm > bench.opm_norm * 1.2 {
            multiplier += 0.05;
            insights.push(format!("Exceptional margins for {} sector", sector_name));
        } else if opm < bench.opm_norm * 0.6 {
            insights.push(format!("Margins below {} average", sector_name));
        }
    }

    if sector == Sector::Banking {
        insights.push("ROCE not applicable for banking sector".to_string());
    }

    let adjusted_score = (base_score * multiplier * 10.0).round() / 10.0;
    let adjustment_pct = ((multiplier - 1.0) * 1000.0).round() / 10.0;

    SectorAdjustment {
        adjusted_score,
        adjustment_pct,
        insights,
    }
}
