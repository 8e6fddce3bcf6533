//! End-to-end pipeline tests: table in, annotated ranking report out.

use approx::assert_relative_eq;
use ranking_core::{DqMode, MetricRow, RankingError};
use ranking_engine::RankingEngine;
use risk_screening::PenaltyReason;

fn scenario_rows() -> Vec<MetricRow> {
    vec![
        MetricRow {
            roe: Some(25.0),
            roce: Some(22.0),
            pe_ratio: Some(18.0),
            fcf: Some(800.0),
            debt_equity: Some(0.3),
            ..MetricRow::new("Alpha Co")
        },
        MetricRow {
            roe: Some(9.0),
            roce: Some(8.0),
            pe_ratio: Some(40.0),
            fcf: Some(-600.0),
            debt_equity: Some(2.2),
            ..MetricRow::new("Beta Co")
        },
        MetricRow {
            roe: Some(16.0),
            roce: Some(17.0),
            pe_ratio: Some(30.0),
            fcf: Some(150.0),
            debt_equity: Some(0.8),
            ..MetricRow::new("Gamma Co")
        },
    ]
}

#[test]
fn buffett_ranking_of_three_companies() {
    let engine = RankingEngine::new();
    let report = engine
        .rank(&scenario_rows(), "buffett", DqMode::FinancialsOnlyOff)
        .unwrap();

    assert_eq!(report.total_ranked, 2);
    assert_eq!(report.disqualified_count, 1);

    // Beta burns 600 Cr of cash per year and is excluded before scoring
    assert_eq!(report.disqualified[0].name, "Beta Co");
    assert!(report.disqualified[0].reason.contains("cash burn"));
    assert!(report.rankings.iter().all(|r| r.name != "Beta Co"));

    let first = &report.rankings[0];
    assert_eq!(first.rank, 1);
    assert_eq!(first.name, "Alpha Co");
    // 86.0 weighted x 1.375 quality x 1.05 cash flow, no penalties
    assert_relative_eq!(first.composite_score, 124.2);
    assert_eq!(first.tier, 1);
    assert!(first.penalties.is_empty());
    assert!(!first.key_drivers.is_empty());
    assert!(first.ranking_reason.starts_with("Ranked #1"));

    let second = &report.rankings[1];
    assert_eq!(second.rank, 2);
    assert_eq!(second.name, "Gamma Co");
    // Moderate P/E of 30 costs a 5% discount on the way through
    assert_relative_eq!(second.composite_score, 65.8);
    assert_eq!(second.tier, 2);
    assert_eq!(
        second.penalties.get(&PenaltyReason::ModeratePe),
        Some(&0.05)
    );

    assert_eq!(report.tier_statistics.get(&1).map(|s| s.count), Some(1));
    assert_eq!(report.tier_statistics.get(&2).map(|s| s.count), Some(1));
    assert!(!report.portfolio_recommendation.is_empty());
}

#[test]
fn global_off_keeps_the_cash_burner() {
    let engine = RankingEngine::new();
    let report = engine
        .rank(&scenario_rows(), "buffett", DqMode::GlobalOff)
        .unwrap();

    // All FCF gates off: Beta survives (its other metrics pass)
    assert_eq!(report.total_ranked, 3);
    assert_eq!(report.disqualified_count, 0);
    assert!(report.rankings.iter().any(|r| r.name == "Beta Co"));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let engine = RankingEngine::new();
    let stamp = chrono::DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let a = engine
        .rank_at(&scenario_rows(), "quality", DqMode::FinancialsOnlyOff, stamp)
        .unwrap();
    let b = engine
        .rank_at(&scenario_rows(), "quality", DqMode::FinancialsOnlyOff, stamp)
        .unwrap();

    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn unknown_philosophy_is_rejected() {
    let engine = RankingEngine::new();
    let err = engine
        .rank(&scenario_rows(), "momentum", DqMode::FinancialsOnlyOff)
        .unwrap_err();
    assert!(matches!(err, RankingError::UnknownPhilosophy(_)));
}

#[test]
fn scores_are_batch_relative() {
    let engine = RankingEngine::new();
    let solo = MetricRow {
        roe: Some(18.0),
        pe_ratio: Some(20.0),
        fcf: Some(300.0),
        debt_equity: Some(0.5),
        ..MetricRow::new("Solo Co")
    };
    let weaker = MetricRow {
        roe: Some(5.0),
        pe_ratio: Some(60.0),
        fcf: Some(10.0),
        debt_equity: Some(2.5),
        ..MetricRow::new("Weak Co")
    };

    let alone = engine
        .rank(std::slice::from_ref(&solo), "buffett", DqMode::FinancialsOnlyOff)
        .unwrap();
    let paired = engine
        .rank(&[solo, weaker], "buffett", DqMode::FinancialsOnlyOff)
        .unwrap();

    // Alone every column is zero-variance (score 50); next to a weaker
    // peer the same row tops every column
    assert_relative_eq!(alone.rankings[0].composite_score, 44.1);
    assert_relative_eq!(paired.rankings[0].composite_score, 88.2);
}

#[test]
fn financial_rows_get_softer_penalties() {
    let engine = RankingEngine::new();
    let rows = vec![
        MetricRow {
            roe: Some(12.0),
            fcf: Some(-200.0),
            debt_equity: Some(1.8),
            ..MetricRow::new("Apex Bank")
        },
        MetricRow {
            roe: Some(12.0),
            fcf: Some(-200.0),
            debt_equity: Some(1.8),
            ..MetricRow::new("Apex Widgets")
        },
    ];
    let report = engine
        .rank(&rows, "buffett", DqMode::FinancialsOnlyOff)
        .unwrap();

    let bank = report
        .rankings
        .iter()
        .find(|r| r.name == "Apex Bank")
        .unwrap();
    let widgets = report
        .rankings
        .iter()
        .find(|r| r.name == "Apex Widgets")
        .unwrap();

    assert!(bank.is_financial);
    assert!(!widgets.is_financial);

    // Negative accounting FCF is structural for lenders: 10% vs 40%
    assert_eq!(bank.penalties.get(&PenaltyReason::NegativeFcf), Some(&0.10));
    assert_eq!(
        widgets.penalties.get(&PenaltyReason::NegativeFcf),
        Some(&0.40)
    );

    // D/E 1.8 is high for an industrial, unremarkable for a bank
    assert!(bank.penalties.get(&PenaltyReason::HighDebt).is_none());
    assert!(widgets.penalties.contains_key(&PenaltyReason::HighDebt));
}

#[test]
fn nameless_rows_are_dropped() {
    let engine = RankingEngine::new();
    let rows = vec![
        MetricRow {
            roe: Some(15.0),
            ..MetricRow::new("Named Co")
        },
        MetricRow {
            roe: Some(30.0),
            ..MetricRow::new("   ")
        },
    ];
    let report = engine
        .rank(&rows, "buffett", DqMode::FinancialsOnlyOff)
        .unwrap();
    assert_eq!(report.total_ranked, 1);
    assert_eq!(report.rankings[0].name, "Named Co");
}

#[test]
fn empty_table_yields_empty_report() {
    let engine = RankingEngine::new();
    let report = engine
        .rank(&[], "buffett", DqMode::FinancialsOnlyOff)
        .unwrap();
    assert!(report.rankings.is_empty());
    assert!(report.disqualified.is_empty());
    assert!(report.tier_statistics.values().all(|s| s.count == 0));
}

#[test]
fn tier_is_independent_of_rank_order() {
    let engine = RankingEngine::new();
    // Under the PEG-heavy lynch profile a fast grower carrying too much
    // debt for any tier still outscores a safe-but-slow Tier 2 business.
    let rows = vec![
        MetricRow {
            roe: Some(18.0),
            roce: Some(18.0),
            pe_ratio: Some(20.0),
            peg: Some(0.5),
            fcf: Some(150.0),
            debt_equity: Some(1.6),
            profit_growth_3yr: Some(40.0),
            eps_growth_3yr: Some(35.0),
            ..MetricRow::new("Rocket Co")
        },
        MetricRow {
            roe: Some(16.0),
            roce: Some(16.0),
            pe_ratio: Some(20.0),
            peg: Some(2.5),
            fcf: Some(200.0),
            debt_equity: Some(0.8),
            profit_growth_3yr: Some(5.0),
            eps_growth_3yr: Some(5.0),
            ..MetricRow::new("Steady Co")
        },
    ];
    let report = engine
        .rank(&rows, "lynch", DqMode::FinancialsOnlyOff)
        .unwrap();

    let rocket = &report.rankings[0];
    assert_eq!(rocket.name, "Rocket Co");
    assert_eq!(rocket.rank, 1);
    assert_eq!(rocket.tier, 4);

    let steady = &report.rankings[1];
    assert_eq!(steady.name, "Steady Co");
    assert_eq!(steady.tier, 2);
}
