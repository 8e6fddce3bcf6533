//! Ranking orchestrator: composes normalization, philosophy weighting,
//! quality assessment, risk screening, sector adjustment and tier
//! classification over a metric table.
//!
//! The engine is a pure function of (table, philosophy, dq_mode, injected
//! configuration): no I/O, no shared state, safe to call from concurrent
//! workers without locking.

pub mod explain;
pub mod normalize;
pub mod report;

pub use normalize::{normalize_column, NormalizedTable};
pub use report::{DisqualifiedCompany, RankedCompany, RankingReport};

use philosophy_profiles::PhilosophyRegistry;
use quality_assessment::{business_quality, cash_flow_quality, valuation_reasonableness};
use ranking_core::{DqMode, MetricRow, RankingError};
use risk_screening::{capped_penalty_total, penalties_for, should_disqualify};
use sector_analysis::{
    adjust_score_for_sector, classify, is_financials, FinancialsMap, SectorBenchmarkTable,
};
use tier_classification::{classify_tier, portfolio_recommendation, tier_summary};

pub struct RankingEngine {
    philosophies: PhilosophyRegistry,
    benchmarks: SectorBenchmarkTable,
    financials: FinancialsMap,
}

impl RankingEngine {
    /// Engine with the built-in philosophy registry and sector benchmarks
    /// and no explicit financial-institution mapping.
    pub fn new() -> Self {
        Self {
            philosophies: PhilosophyRegistry::builtin(),
            benchmarks: SectorBenchmarkTable::builtin(),
            financials: FinancialsMap::default(),
        }
    }

    /// Engine with fully injected configuration. Multiple engines with
    /// different policies can run concurrently without interference.
    pub fn with_config(
        philosophies: PhilosophyRegistry,
        benchmarks: SectorBenchmarkTable,
        financials: FinancialsMap,
    ) -> Self {
        Self {
            philosophies,
            benchmarks,
            financials,
        }
    }

    pub fn philosophies(&self) -> &PhilosophyRegistry {
        &self.philosophies
    }

    /// Rank a metric table under one philosophy, stamping the report with
    /// the current wall-clock time.
    ///
    /// Configuration errors (unknown philosophy) abort the request;
    /// per-row data gaps never do. Rows without a name are skipped before
    /// normalization with a logged warning.
    pub fn rank(
        &self,
        rows: &[MetricRow],
        philosophy_id: &str,
        dq_mode: DqMode,
    ) -> Result<RankingReport, RankingError> {
        self.rank_at(rows, philosophy_id, dq_mode, chrono::Utc::now())
    }

    /// [`rank`](Self::rank) with an explicit report timestamp. The output
    /// is a pure function of the arguments: identical inputs produce a
    /// byte-identical serialized report.
    pub fn rank_at(
        &self,
        rows: &[MetricRow],
        philosophy_id: &str,
        dq_mode: DqMode,
        generated_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<RankingReport, RankingError> {
        let profile = self.philosophies.get(philosophy_id)?;

        // Loaded: drop rows missing the one critical field
        let table: Vec<MetricRow> = rows
            .iter()
            .filter(|row| {
                let keep = !row.name.trim().is_empty();
                if !keep {
                    tracing::warn!("skipping row without a company name");
                }
                keep
            })
            .cloned()
            .collect();

        tracing::info!(
            philosophy = philosophy_id,
            dq_mode = dq_mode.as_str(),
            rows = table.len(),
            "ranking request"
        );

        // Normalized: table-wide ranking pass, including rows that may be
        // disqualified later (ranks are population-relative)
        let normalized = NormalizedTable::from_rows(&table);

        let mut disqualified = Vec::new();
        let mut survivors: Vec<RankedCompany> = Vec::new();
        let mut survivor_rows: Vec<MetricRow> = Vec::new();

        for (idx, row) in table.iter().enumerate() {
            let is_fin = is_financials(row, &self.financials);

            let verdict = should_disqualify(row, is_fin, dq_mode);
            if verdict.excluded {
                tracing::debug!(company = %row.name, reason = %verdict.reason, "disqualified");
                disqualified.push(DisqualifiedCompany {
                    name: row.name.clone(),
                    reason: verdict.reason,
                });
                continue;
            }

            // Scored: weighted sum of normalized metrics, then the three
            // quality multipliers and the capped penalty discount
            let weighted: f64 = profile
                .weights
                .iter()
                .map(|(metric, weight)| normalized.score(idx, *metric) * weight)
                .sum();

            let quality = business_quality(row);
            let cash_flow = cash_flow_quality(row);
            let valuation = valuation_reasonableness(row);
            let penalties = penalties_for(row, is_fin);
            let discount = 1.0 - capped_penalty_total(&penalties);

            let base_score = weighted * quality * cash_flow * valuation.score * discount;
            let base_score = (base_score * 10.0).round() / 10.0;

            // SectorAdjusted
            let sector = classify(row, &self.financials);
            let adjustment =
                adjust_score_for_sector(base_score, row, sector, &penalties, &self.benchmarks);

            let risk_warnings = penalties.keys().map(|p| p.label().to_string()).collect();

            survivors.push(RankedCompany {
                rank: 0, // assigned after the sort
                name: row.name.clone(),
                symbol: row.symbol.clone(),
                composite_score: adjustment.adjusted_score,
                quality_multiplier: quality,
                cash_flow_multiplier: cash_flow,
                valuation_multiplier: valuation.score,
                penalties,
                risk_warnings,
                valuation_warnings: valuation.warnings,
                sector,
                sector_adjustment_pct: adjustment.adjustment_pct,
                sector_insights: adjustment.insights,
                is_financial: is_fin,
                tier: 0,
                tier_name: String::new(),
                tier_action: String::new(),
                tier_insights: String::new(),
                key_drivers: Vec::new(),
                ranking_reason: String::new(),
            });
            survivor_rows.push(row.clone());
        }

        // Sorted/Ranked: stable descending sort, ties keep input order
        let mut order: Vec<usize> = (0..survivors.len()).collect();
        order.sort_by(|&a, &b| {
            survivors[b]
                .composite_score
                .partial_cmp(&survivors[a].composite_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut rankings = Vec::with_capacity(survivors.len());
        let mut ordered_rows = Vec::with_capacity(survivors.len());
        for (rank_pos, &i) in order.iter().enumerate() {
            let mut entry = survivors[i].clone();
            let row = &survivor_rows[i];
            entry.rank = rank_pos + 1;

            // TierClassified: absolute thresholds, independent of rank
            let assignment = classify_tier(row);
            entry.tier = assignment.tier.number();
            entry.tier_name = assignment.tier.name().to_string();
            entry.tier_action = assignment.tier.recommended_action().to_string();
            entry.tier_insights = assignment.insights;

            entry.key_drivers = explain::key_drivers(row);
            entry.ranking_reason = explain::ranking_reason(row, profile, entry.rank);

            ordered_rows.push((row.clone(), assignment.tier, entry.composite_score));
            rankings.push(entry);
        }

        let tier_rows: Vec<_> = ordered_rows
            .iter()
            .map(|(row, tier, score)| (row, *tier, *score))
            .collect();
        let tier_statistics = tier_summary(&tier_rows);
        let recommendation = portfolio_recommendation(&tier_statistics);

        tracing::info!(
            ranked = rankings.len(),
            disqualified = disqualified.len(),
            "ranking complete"
        );

        Ok(RankingReport {
            philosophy: profile.id.to_string(),
            philosophy_description: profile.description.to_string(),
            dq_mode,
            generated_at,
            total_ranked: rankings.len(),
            disqualified_count: disqualified.len(),
            rankings,
            disqualified,
            tier_statistics,
            portfolio_recommendation: recommendation,
        })
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new()
    }
}
