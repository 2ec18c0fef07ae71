use approx::assert_abs_diff_eq;
use gdp_scenario::projection::{aggregate, estimate_growth_rate, project};
use gdp_scenario::scenario::InvalidRatePolicy;
use gdp_scenario::{default_dataset, ScenarioConfig, ScenarioEngine, ScenarioError, ScenarioParams};
use std::collections::BTreeMap;

#[test]
fn worked_example_through_public_api() {
    let history = [100.0, 110.0, 121.0];
    let rate = estimate_growth_rate(&history).unwrap();
    assert_abs_diff_eq!(rate, 0.1, epsilon = 1e-12);

    let p = project(&history, rate, 100.0);
    assert_abs_diff_eq!(p.projected[1], 120.0, epsilon = 1e-9);
    assert_abs_diff_eq!(p.projected[2], 142.0, epsilon = 1e-9);
    assert_abs_diff_eq!(p.lower[1], 116.7, epsilon = 1e-9);
    assert_abs_diff_eq!(p.upper[2], 149.26, epsilon = 1e-9);
}

#[test]
fn error_scenarios() {
    assert!(matches!(
        estimate_growth_rate(&[0.0, 100.0]),
        Err(ScenarioError::InvalidSeries { .. })
    ));
    assert!(matches!(
        estimate_growth_rate(&[-5.0, 10.0]),
        Err(ScenarioError::InvalidSeries { .. })
    ));

    let mut components = BTreeMap::new();
    components.insert("a".to_string(), vec![1.0, 2.0, 3.0]);
    components.insert("b".to_string(), vec![1.0, 2.0]);
    assert!(matches!(
        aggregate(&components, 1.0),
        Err(ScenarioError::MisalignedSeries { .. })
    ));
}

#[test]
fn neutral_run_on_bundled_data_sums_history() {
    let ds = default_dataset().unwrap();
    let result = ScenarioEngine::default().run(&ds, &ScenarioParams::new()).unwrap();

    for (t, &value) in result.reconstructed().iter().enumerate() {
        let expected: f64 = ds.components().iter().map(|c| c.values[t]).sum::<f64>() / 1000.0;
        assert_abs_diff_eq!(value, expected, epsilon = 1e-9);
    }

    // 2019: (2958119 + 746939 + 700617 + 1639866 - 108398) / 1000
    assert_abs_diff_eq!(result.reconstructed()[0], 5937.143, epsilon = 1e-9);
    assert_eq!(result.comparison.rows[0].period, 2019);
    assert_abs_diff_eq!(result.comparison.rows[0].ground_truth, 5937.143);
}

#[test]
fn inventory_change_has_no_real_growth_rate() {
    let ds = default_dataset().unwrap();

    let result = ScenarioEngine::default().run(&ds, &ScenarioParams::new()).unwrap();
    let invent = result.component("invent").unwrap();
    assert!(invent.baseline_rate.is_none());
    assert!(result.component("priv_cons_uah_mln").unwrap().baseline_rate.is_some());

    let strict = ScenarioEngine::new(ScenarioConfig {
        invalid_rate: InvalidRatePolicy::Reject,
        ..Default::default()
    });
    let err = strict.run(&ds, &ScenarioParams::new()).unwrap_err();
    assert!(err.is_invalid_series());
}

#[test]
fn raising_investment_raises_reconstructed_gdp() {
    let ds = default_dataset().unwrap();
    let engine = ScenarioEngine::default();

    let base = engine.run(&ds, &ScenarioParams::new()).unwrap();
    let boosted = engine
        .run(&ds, &ScenarioParams::new().with("inv", 50.0))
        .unwrap();

    let base_gdp = base.reconstructed();
    let boosted_gdp = boosted.reconstructed();
    assert_eq!(base_gdp[0], boosted_gdp[0]);

    let inv = ds.component("inv").unwrap();
    for t in 1..ds.n_periods() {
        let expected_shift = (inv.values[t] - inv.values[0]) * 0.5 / 1000.0;
        assert_abs_diff_eq!(boosted_gdp[t] - base_gdp[t], expected_shift, epsilon = 1e-6);
    }
}
