//! Property tests for ensemble statistics.

use proptest::prelude::*;
use quant_analytics::statistics::{nearest_rank_index, percentile};
use quant_analytics::{Ensemble, StatisticsEngine};

fn ensemble_strategy() -> impl Strategy<Value = Ensemble> {
    (
        10.0..1_000.0_f64,
        1usize..500,
        prop::collection::vec(1.0..2_000.0_f64, 1..200),
    )
        .prop_map(|(initial, horizon, values)| Ensemble::new(initial, horizon, values))
}

proptest! {
    #[test]
    fn prop_summary_is_ordered(ensemble in ensemble_strategy()) {
        let stats = StatisticsEngine::default().summarize(&ensemble).unwrap();
        prop_assert!(stats.min_value <= stats.percentile5);
        prop_assert!(stats.percentile5 <= stats.percentile95);
        prop_assert!(stats.percentile95 <= stats.max_value);
        prop_assert!(stats.min_value <= stats.average_ending_value + 1e-9);
        prop_assert!(stats.average_ending_value <= stats.max_value + 1e-9);
        prop_assert!((0.0..=1.0).contains(&stats.probability_of_gain));
        prop_assert!(stats.annualized_volatility >= 0.0);
        prop_assert!(stats.sharpe_ratio.is_finite());
    }

    #[test]
    fn prop_risk_metrics_are_finite(ensemble in ensemble_strategy(), confidence in 0.01..0.5_f64) {
        let risk = StatisticsEngine::default().risk_metrics(&ensemble, confidence).unwrap();
        prop_assert!(risk.var.is_finite());
        prop_assert!(risk.cvar.is_finite());
        prop_assert!(risk.sharpe.is_finite());
        prop_assert!(risk.sortino.is_finite());
        prop_assert!((0.0..1.0).contains(&risk.max_drawdown));
        // Tail mean never exceeds the cutoff value
        prop_assert!(risk.cvar * ensemble.initial_value >= risk.var - 1e-6);
    }

    #[test]
    fn prop_nearest_rank_in_bounds(n in 1usize..10_000, p in 0.0..1.0_f64) {
        let idx = nearest_rank_index(n, p);
        prop_assert!(idx < n);
        let sorted: Vec<f64> = (0..n).map(|i| i as f64).collect();
        prop_assert_eq!(percentile(&sorted, p), Some(idx as f64));
    }
}
