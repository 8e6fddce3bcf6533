//! Built-in investment philosophy weight profiles.
//!
//! Each philosophy is a pure-data weight vector over metrics. The composite
//! score is a weighted sum of normalized metric scores, so weights only need
//! to express relative emphasis; they are not required to sum to 1.

use ranking_core::{Metric, RankingError};
use serde::Serialize;

/// An immutable named weighting scheme over metrics.
#[derive(Debug, Clone, Serialize)]
pub struct PhilosophyProfile {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub weights: Vec<(Metric, f64)>,
}

/// Registry of the shipped philosophy profiles.
///
/// Injected into the orchestrator as configuration; adding a profile is a
/// pure-data change here.
#[derive(Debug, Clone)]
pub struct PhilosophyRegistry {
    profiles: Vec<PhilosophyProfile>,
}

impl PhilosophyRegistry {
    pub fn builtin() -> Self {
        Self {
            profiles: vec![
                PhilosophyProfile {
                    id: "buffett",
                    display_name: "Warren Buffett",
                    description: "Quality companies with strong ROE, low debt, \
                                  excellent cash flow, and reasonable valuations",
                    weights: vec![
                        (Metric::Fcf, 0.28),
                        (Metric::Roe, 0.20),
                        (Metric::Roce, 0.16),
                        (Metric::DebtEquity, 0.14),
                        (Metric::Opm, 0.10),
                        (Metric::PeRatio, 0.08),
                        (Metric::ProfitGrowth3Yr, 0.03),
                        (Metric::SalesGrowth5Yr, 0.01),
                    ],
                },
                PhilosophyProfile {
                    id: "lynch",
                    display_name: "Peter Lynch",
                    description: "Growth at reasonable price (PEG < 1) with strong \
                                  earnings momentum and cash generation",
                    weights: vec![
                        (Metric::Peg, 0.25),
                        (Metric::ProfitGrowth3Yr, 0.18),
                        (Metric::EpsGrowth3Yr, 0.15),
                        (Metric::Roe, 0.12),
                        (Metric::Fcf, 0.12),
                        (Metric::Roce, 0.08),
                        (Metric::DebtEquity, 0.08),
                        (Metric::PeRatio, 0.02),
                    ],
                },
                PhilosophyProfile {
                    id: "growth",
                    display_name: "Growth Investing",
                    description: "High growth companies with strong revenue expansion \
                                  and sustainable cash generation",
                    weights: vec![
                        (Metric::ProfitGrowth5Yr, 0.22),
                        (Metric::SalesGrowth5Yr, 0.18),
                        (Metric::EpsGrowth3Yr, 0.15),
                        (Metric::Roce, 0.15),
                        (Metric::Fcf, 0.12),
                        (Metric::Roe, 0.10),
                        (Metric::Opm, 0.08),
                    ],
                },
                PhilosophyProfile {
                    id: "value",
                    display_name: "Value Investing",
                    description: "Undervalued companies (low P/E) with strong \
                                  fundamentals, low debt, and positive cash flow",
                    weights: vec![
                        (Metric::PeRatio, 0.28),
                        (Metric::DebtEquity, 0.20),
                        (Metric::Fcf, 0.18),
                        (Metric::Roe, 0.14),
                        (Metric::Roce, 0.12),
                        (Metric::DividendYield, 0.05),
                        (Metric::ProfitGrowth3Yr, 0.03),
                    ],
                },
                PhilosophyProfile {
                    id: "dividend",
                    display_name: "Dividend Focus",
                    description: "High dividend yield backed by strong cash \
                                  generation and low debt",
                    weights: vec![
                        (Metric::DividendYield, 0.28),
                        (Metric::Fcf, 0.25),
                        (Metric::Roe, 0.15),
                        (Metric::DebtEquity, 0.15),
                        (Metric::Roce, 0.10),
                        (Metric::Opm, 0.07),
                    ],
                },
                PhilosophyProfile {
                    id: "quality",
                    display_name: "Quality at Fair Price",
                    description: "High-quality businesses (strong FCF, ROE, ROCE) at \
                                  reasonable valuations with low debt",
                    weights: vec![
                        (Metric::Fcf, 0.30),
                        (Metric::Roe, 0.18),
                        (Metric::Roce, 0.15),
                        (Metric::PeRatio, 0.15),
                        (Metric::DebtEquity, 0.12),
                        (Metric::Opm, 0.08),
                        (Metric::ProfitGrowth3Yr, 0.02),
                    ],
                },
            ],
        }
    }

    pub fn get(&self, id: &str) -> Result<&PhilosophyProfile, RankingError> {
        self.profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| RankingError::UnknownPhilosophy(id.to_string()))
    }

    pub fn weights_for(&self, id: &str) -> Result<&[(Metric, f64)], RankingError> {
        Ok(&self.get(id)?.weights)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.profiles.iter().map(|p| p.id)
    }

    pub fn profiles(&self) -> &[PhilosophyProfile] {
        &self.profiles
    }
}

impl Default for PhilosophyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
