mod test_utils;

use impvol_lib::{
    default_configs, evaluate_quote, years_from_days, EstimationConfig, NonPositiveSigmaPolicy,
    OptionQuote, OptionType, SolverMethod,
};
use test_utils::{load_closes, CLOSES_PATH};

fn quote(option_type: OptionType, strike: f64, days: f64, market_price: f64) -> OptionQuote {
    OptionQuote {
        option_type,
        underlying_price: 469.72,
        strike_price: strike,
        years_to_exp: years_from_days(days),
        market_price,
        risk_free_rate: None,
    }
}

/// Full flow for one call: implied vol, both intrinsic values, time value, historical vol.
#[test]
fn test_call_report() {
    let closes = load_closes(CLOSES_PATH).expect("Failed to load closes");
    let config = default_configs::reference();

    let report = evaluate_quote(&quote(OptionType::Call, 470.0, 30.0, 12.0), &closes, &config)
        .expect("report should build");

    assert_eq!(report.risk_free_rate, 0.05);
    let iv = report.implied_volatility.expect("iv should converge");
    assert!((iv - 0.2081).abs() < 1e-3, "iv={}", iv);
    assert_eq!(report.call_intrinsic_value, 0.0);
    assert!((report.put_intrinsic_value - 0.28).abs() < 1e-9);
    assert_eq!(report.time_value, 12.0);
    let hv = report.historical_volatility.expect("history is long enough");
    assert!((hv - 0.1882).abs() < 1e-3);
}

#[test]
fn test_put_report_uses_quote_rate() {
    let closes = load_closes(CLOSES_PATH).expect("Failed to load closes");
    let mut q = quote(OptionType::Put, 480.0, 60.0, 16.0);
    q.risk_free_rate = Some(0.03);

    let report = evaluate_quote(&q, &closes, &EstimationConfig::default()).unwrap();
    assert_eq!(report.risk_free_rate, 0.03);
    assert!(report.implied_volatility.is_some());
    assert!((report.put_intrinsic_value - 10.28).abs() < 1e-9);
    assert!((report.time_value - 5.72).abs() < 1e-9);
}

/// A quote below intrinsic still yields valuation metrics, with no implied volatility.
#[test]
fn test_unattainable_price_records_missing_iv() {
    let report = evaluate_quote(
        &quote(OptionType::Call, 440.0, 30.0, 5.0),
        &[100.0],
        &default_configs::reference(),
    )
    .unwrap();

    assert_eq!(report.implied_volatility, None);
    assert_eq!(report.historical_volatility, None);
    assert!((report.call_intrinsic_value - 29.72).abs() < 1e-9);
    assert_eq!(report.time_value, 0.0);
}

#[test]
fn test_invalid_quote_is_error() {
    let mut q = quote(OptionType::Call, 470.0, 30.0, 12.0);
    q.years_to_exp = 0.0;
    let err = evaluate_quote(&q, &[100.0, 101.0, 102.0], &EstimationConfig::default()).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_config_from_toml() {
    let src = r#"
        [solver]
        tolerance = 1e-6
        max_iterations = 50
        method = "brent"
        max_sigma = 4.0
        bracket_fallback = false

        [solver.non_positive_sigma]
        policy = "clamp"
        floor = 0.001

        [historical]
        trading_days_per_year = 260.0

        [fixed_params]
        r = 0.04
    "#;

    let config = EstimationConfig::from_toml_str(src).expect("valid config");
    assert_eq!(config.solver.tolerance, 1e-6);
    assert_eq!(config.solver.max_iterations, 50);
    assert_eq!(config.solver.method, SolverMethod::Brent);
    assert_eq!(config.solver.max_sigma, 4.0);
    assert!(!config.solver.bracket_fallback);
    assert_eq!(
        config.solver.non_positive_sigma,
        NonPositiveSigmaPolicy::Clamp { floor: 0.001 }
    );
    // untouched fields keep their defaults
    assert_eq!(config.solver.initial_sigma, 0.5);
    assert_eq!(config.historical.trading_days_per_year, 260.0);
    assert_eq!(config.fixed_params.r, 0.04);
}

#[test]
fn test_empty_toml_is_reference() {
    let config = EstimationConfig::from_toml_str("").unwrap();
    assert_eq!(config, default_configs::reference());
}

#[test]
fn test_invalid_toml_config_rejected() {
    assert!(EstimationConfig::from_toml_str("[solver]\ntolerance = 0.0\n").is_err());
    assert!(
        EstimationConfig::from_toml_str("[historical]\ntrading_days_per_year = -1.0\n").is_err()
    );
    assert!(EstimationConfig::from_toml_str("[solver]\nmax_sigma = 0.1\n").is_err());
    assert!(EstimationConfig::from_toml_str("[solver]\nmethod = \"secant\"\n").is_err());
    assert!(EstimationConfig::from_file("tests/data/does_not_exist.toml").is_err());
}

#[test]
fn test_robust_preset_agrees_with_reference() {
    let closes = load_closes(CLOSES_PATH).expect("Failed to load closes");
    let q = quote(OptionType::Call, 470.0, 30.0, 12.0);

    let newton = evaluate_quote(&q, &closes, &default_configs::reference()).unwrap();
    let brent = evaluate_quote(&q, &closes, &default_configs::robust()).unwrap();
    let (a, b) = (
        newton.implied_volatility.unwrap(),
        brent.implied_volatility.unwrap(),
    );
    assert!((a - b).abs() < 1e-4, "newton={} brent={}", a, b);
}
