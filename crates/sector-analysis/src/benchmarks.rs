use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::classify::Sector;

/// Financial norms for one sector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorBenchmarks {
    /// ROE above this earns a premium; well below it gets flagged.
    pub roe_threshold: f64,
    /// None for banking, where ROCE is not meaningful.
    pub roce_threshold: Option<f64>,
    /// D/E tolerated as normal for the sector.
    pub debt_equity_norm: f64,
    /// Typical operating margin for the sector.
    pub opm_norm: f64,
    /// Scales a fired high-debt penalty when D/E sits inside the norm.
    pub debt_penalty_multiplier: Option<f64>,
    /// Sectors where positive FCF is worth a score bonus.
    pub fcf_weight_multiplier: Option<f64>,
}

/// Immutable sector benchmark table, injected into the orchestrator.
#[derive(Debug, Clone)]
pub struct SectorBenchmarkTable {
    benchmarks: HashMap<Sector, SectorBenchmarks>,
}

impl SectorBenchmarkTable {
    pub fn builtin() -> Self {
        let mut benchmarks = HashMap::new();
        benchmarks.insert(
            Sector::It,
            SectorBenchmarks {
                roe_threshold: 20.0,
                roce_threshold: Some(25.0),
                debt_equity_norm: 0.5,
                opm_norm: 20.0,
                debt_penalty_multiplier: Some(1.5),
                fcf_weight_multiplier: Some(1.3),
            },
        );
        benchmarks.insert(
            Sector::Banking,
            SectorBenchmarks {
                roe_threshold: 12.0,
                roce_threshold: None,
                // Leverage is the business model
                debt_equity_norm: 5.0,
                opm_norm: 40.0,
                debt_penalty_multiplier: Some(0.1),
                fcf_weight_multiplier: None,
            },
        );
        benchmarks.insert(
            Sector::Pharma,
            SectorBenchmarks {
                roe_threshold: 15.0,
                roce_threshold: Some(18.0),
                debt_equity_norm: 0.8,
                opm_norm: 20.0,
                debt_penalty_multiplier: None,
                fcf_weight_multiplier: None,
            },
        );
        benchmarks.insert(
            Sector::Manufacturing,
            SectorBenchmarks {
                roe_threshold: 12.0,
                roce_threshold: Some(15.0),
                debt_equity_norm: 1.5,
                opm_norm: 10.0,
                debt_penalty_multiplier: None,
                fcf_weight_multiplier: None,
            },
        );
        benchmarks.insert(
            Sector::Telecom,
            SectorBenchmarks {
                roe_threshold: 8.0,
                roce_threshold: Some(10.0),
                debt_equity_norm: 2.5,
                opm_norm: 30.0,
                debt_penalty_multiplier: None,
                fcf_weight_multiplier: None,
            },
        );
        benchmarks.insert(
            Sector::RealEstate,
            SectorBenchmarks {
                roe_threshold: 8.0,
                roce_threshold: Some(10.0),
                debt_equity_norm: 2.0,
                opm_norm: 25.0,
                debt_penalty_multiplier: None,
                fcf_weight_multiplier: None,
            },
        );
        benchmarks.insert(
            Sector::Fmcg,
            SectorBenchmarks {
                roe_threshold: 18.0,
                roce_threshold: Some(25.0),
                debt_equity_norm: 0.5,
                opm_norm: 15.0,
                debt_penalty_multiplier: None,
                fcf_weight_multiplier: None,
            },
        );
        benchmarks.insert(
            Sector::Auto,
            SectorBenchmarks {
                roe_threshold: 12.0,
                roce_threshold: Some(15.0),
                debt_equity_norm: 1.2,
                opm_norm: 8.0,
                debt_penalty_multiplier: None,
                fcf_weight_multiplier: None,
            },
        );
        benchmarks.insert(
            Sector::Energy,
            SectorBenchmarks {
                roe_threshold: 10.0,
                roce_threshold: Some(12.0),
                debt_equity_norm: 2.0,
                opm_norm: 12.0,
                debt_penalty_multiplier: None,
                fcf_weight_multiplier: None,
            },
        );
        benchmarks.insert(
            Sector::Healthcare,
            SectorBenchmarks {
                roe_threshold: 15.0,
                roce_threshold: Some(18.0),
                debt_equity_norm: 1.0,
                opm_norm: 18.0,
                debt_penalty_multiplier: None,
                fcf_weight_multiplier: None,
            },
        );
        Self { benchmarks }
    }

    /// Benchmarks for a sector; `General` has none and gets no adjustment.
    pub fn get(&self, sector: Sector) -> Option<&SectorBenchmarks> {
        self.benchmarks.get(&sector)
    }
}

impl Default for SectorBenchmarkTable {
    fn default() -> Self {
        Self::builtin()
    }
}
