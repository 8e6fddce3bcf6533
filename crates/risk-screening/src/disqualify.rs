use ranking_core::{DqMode, MetricRow};
use serde::{Deserialize, Serialize};

/// Outcome of the hard-exclusion check for one row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisqualificationVerdict {
    pub excluded: bool,
    pub reason: String,
}

impl DisqualificationVerdict {
    fn excluded(reason: String) -> Self {
        Self {
            excluded: true,
            reason,
        }
    }

    fn passed() -> Self {
        Self {
            excluded: false,
            reason: String::new(),
        }
    }
}

/// Evaluate the hard disqualification rules in order; first match wins.
///
/// FCF-based rules are gated by `dq_mode`; valuation, profitability and
/// volatility rules apply in every mode and every sector. Disqualified
/// rows never receive a composite score or tier.
pub fn should_disqualify(
    row: &MetricRow,
    is_financial: bool,
    dq_mode: DqMode,
) -> DisqualificationVerdict {
    let fcf_rules_apply = dq_mode.applies_fcf_rules(is_financial);

    // Massive cash burn
    if let Some(fcf) = row.fcf {
        if fcf < -500.0 && fcf_rules_apply {
            return DisqualificationVerdict::excluded(format!(
                "Massive cash burn: FCF {:.0} Cr (unsustainable)",
                fcf
            ));
        }
    }

    if let Some(pe) = row.pe_ratio {
        if pe > 100.0 {
            return DisqualificationVerdict::excluded(format!(
                "Extreme P/E ratio: {:.1} (speculative valuation)",
                pe
            ));
        }
        // Shadowed by the rule above; kept to document the data-error band
        if pe > 500.0 {
            return DisqualificationVerdict::excluded(format!(
                "Absurd P/E ratio: {:.1} (likely data error)",
                pe
            ));
        }
    }

    // Negative FCF combined with very high leverage
    if let (Some(fcf), Some(de)) = (row.fcf, row.debt_equity) {
        if fcf < -100.0 && de > 2.0 && fcf_rules_apply {
            return DisqualificationVerdict::excluded(
                "Negative FCF with very high debt (bankruptcy risk)".to_string(),
            );
        }
    }

    if let Some(roe) = row.roe {
        if roe < 0.0 {
            return DisqualificationVerdict::excluded(format!(
                "Negative ROE: {:.1}% (unprofitable)",
                roe
            ));
        }
    }

    // Token FCF on a large market cap
    if let (Some(fcf), Some(mcap)) = (row.fcf, row.market_cap) {
        if fcf > 0.0 && fcf < 10.0 && mcap > 1000.0 {
            let fcf_yield = (fcf / mcap) * 100.0;
            if fcf_yield < 0.5 && fcf_rules_apply {
                return DisqualificationVerdict::excluded(format!(
                    "Minimal FCF ({:.1} Cr) for {:.0} Cr market cap (speculative)",
                    fcf, mcap
                ));
            }
        }
    }

    if let (Some(ret), Some(fcf), Some(roe)) = (row.return_1yr, row.fcf, row.roe) {
        if ret.abs() > 2000.0 && fcf < 0.0 && roe < 15.0 {
            return DisqualificationVerdict::excluded(
                "Extreme volatility with poor fundamentals (speculative)".to_string(),
            );
        }
    }

    DisqualificationVerdict::passed()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burner() -> MetricRow {
        MetricRow {
            fcf: Some(-600.0),
            ..MetricRow::new("Burner Co")
        }
    }

    #[test]
    fn massive_cash_burn_disqualifies_industrials() {
        let verdict = should_disqualify(&burner(), false, DqMode::FinancialsOnlyOff);
        assert!(verdict.excluded);
        assert!(verdict.reason.contains("cash burn"));
    }

    #[test]
    fn financials_skip_fcf_rules_by_default() {
        let verdict = should_disqualify(&burner(), true, DqMode::FinancialsOnlyOff);
        assert!(!verdict.excluded);

        // global_on re-enables the rule for financials
        let verdict = should_disqualify(&burner(), true, DqMode::GlobalOn);
        assert!(verdict.excluded);
    }

    #[test]
    fn global_off_skips_fcf_rules_everywhere() {
        let verdict = should_disqualify(&burner(), false, DqMode::GlobalOff);
        assert!(!verdict.excluded);
    }

    #[test]
    fn extreme_pe_applies_in_every_mode() {
        let row = MetricRow {
            pe_ratio: Some(150.0),
            ..MetricRow::new("Speculative Co")
        };
        for mode in [DqMode::FinancialsOnlyOff, DqMode::GlobalOff, DqMode::GlobalOn] {
            let verdict = should_disqualify(&row, true, mode);
            assert!(verdict.excluded, "mode {:?}", mode);
            assert!(verdict.reason.contains("Extreme P/E"));
        }
    }

    #[test]
    fn extreme_pe_rule_fires_first() {
        // First match wins: even a P/E of 700 reports as extreme
        let row = MetricRow {
            pe_ratio: Some(700.0),
            ..MetricRow::new("Data Error Co")
        };
        let verdict = should_disqualify(&row, false, DqMode::FinancialsOnlyOff);
        assert!(verdict.excluded);
        assert!(verdict.reason.contains("Extreme P/E"));
    }

    #[test]
    fn negative_roe_always_disqualifies() {
        let row = MetricRow {
            roe: Some(-4.0),
            ..MetricRow::new("Loss Maker")
        };
        let verdict = should_disqualify(&row, true, DqMode::GlobalOff);
        assert!(verdict.excluded);
        assert!(verdict.reason.contains("Negative ROE"));
    }

    #[test]
    fn minimal_fcf_yield_on_large_cap() {
        let row = MetricRow {
            fcf: Some(4.0),
            market_cap: Some(5000.0),
            ..MetricRow::new("Token FCF Co")
        };
        let verdict = should_disqualify(&row, false, DqMode::FinancialsOnlyOff);
        assert!(verdict.excluded);
        assert!(verdict.reason.contains("Minimal FCF"));
    }

    #[test]
    fn clean_row_passes() {
        let row = MetricRow {
            roe: Some(18.0),
            fcf: Some(300.0),
            pe_ratio: Some(22.0),
            ..MetricRow::new("Healthy Co")
        };
        assert!(!should_disqualify(&row, false, DqMode::FinancialsOnlyOff).excluded);
    }
}
