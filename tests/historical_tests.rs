mod test_utils;

use impvol_lib::{
    historical_volatility, historical_volatility_with_config, log_returns, HistoricalConfig,
    VolError,
};
use test_utils::{load_closes, CLOSES_PATH};

#[test]
fn test_short_series_positive_and_finite() {
    let vol = historical_volatility(&[100.0, 101.0, 99.0, 100.0]).unwrap();
    assert!(vol.is_finite() && vol > 0.0);
    // sample stdev of the three log-returns times sqrt(252)
    assert!((vol - 0.274_964_853).abs() < 1e-6, "vol={}", vol);
}

#[test]
fn test_too_few_prices_is_insufficient_data() {
    for prices in [&[][..], &[100.0][..], &[100.0, 101.0][..]] {
        let err = historical_volatility(prices).unwrap_err();
        assert_eq!(
            err,
            VolError::InsufficientData {
                required: 3,
                got: prices.len()
            }
        );
    }
}

#[test]
fn test_non_positive_price_rejected() {
    let err = historical_volatility(&[100.0, 0.0, 101.0]).unwrap_err();
    assert!(err.is_invalid_input());
    let err = historical_volatility(&[100.0, f64::NAN, 101.0, 102.0]).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_constant_series_has_zero_volatility() {
    let vol = historical_volatility(&[50.0; 10]).unwrap();
    assert_eq!(vol, 0.0);
}

#[test]
fn test_log_returns_length_and_values() {
    let returns = log_returns(&[100.0, 110.0, 99.0]).unwrap();
    assert_eq!(returns.len(), 2);
    assert!((returns[0] - (1.1_f64).ln()).abs() < 1e-15);
    assert!((returns[1] - (0.9_f64).ln()).abs() < 1e-15);
}

#[test]
fn test_annualization_factor_is_configurable() {
    let prices = [100.0, 102.0, 101.0, 103.0, 100.5];
    let daily = historical_volatility_with_config(
        &prices,
        &HistoricalConfig {
            trading_days_per_year: 1.0,
        },
    )
    .unwrap();
    let annual = historical_volatility(&prices).unwrap();
    assert!((annual - daily * 252.0_f64.sqrt()).abs() < 1e-12);

    let err = historical_volatility_with_config(
        &prices,
        &HistoricalConfig {
            trading_days_per_year: 0.0,
        },
    )
    .unwrap_err();
    assert!(err.is_invalid_input());
}

/// One year of daily closes simulated at roughly 20% volatility.
#[test]
fn test_one_year_of_closes() {
    let closes = load_closes(CLOSES_PATH).expect("Failed to load closes");
    assert_eq!(closes.len(), 252);

    let vol = historical_volatility(&closes).unwrap();
    println!("Historical volatility over {} closes: {:.4}", closes.len(), vol);
    assert!((vol - 0.1882).abs() < 1e-3, "vol={}", vol);
}
