//! Property-based checks of the Black-Scholes pricer.

use proptest::prelude::*;
use quant_models::analytical::{implied_volatility, BlackScholes};
use quant_models::instruments::{OptionParameters, OptionType};

fn params_strategy() -> impl Strategy<Value = OptionParameters> {
    (
        50.0..150.0f64,
        50.0..150.0f64,
        0.05..3.0f64,
        -0.02..0.1f64,
        0.05..1.0f64,
        0.0..0.05f64,
    )
        .prop_map(|(spot, strike, t, r, sigma, q)| {
            OptionParameters::new(spot, strike, t, r, sigma).with_dividend_yield(q)
        })
}

proptest! {
    #[test]
    fn prop_put_call_parity(params in params_strategy()) {
        let prices = BlackScholes::new(params).unwrap().price();
        let t = params.time_to_expiry;
        let forward = params.spot * (-params.dividend_yield * t).exp()
            - params.strike * (-params.risk_free_rate * t).exp();
        prop_assert!((prices.call - prices.put - forward).abs() < 1e-6);
    }

    #[test]
    fn prop_delta_gap_is_dividend_discount(params in params_strategy()) {
        let bs = BlackScholes::new(params).unwrap();
        let gap = bs.delta(OptionType::Call) - bs.delta(OptionType::Put);
        let expected = (-params.dividend_yield * params.time_to_expiry).exp();
        prop_assert!((gap - expected).abs() < 1e-12);
    }

    #[test]
    fn prop_prices_within_no_arbitrage_bounds(params in params_strategy()) {
        let prices = BlackScholes::new(params).unwrap().price();
        prop_assert!(prices.call >= 0.0 && prices.put >= 0.0);
        let t = params.time_to_expiry;
        prop_assert!(prices.call <= params.spot + 1e-9);
        prop_assert!(prices.put <= params.strike * (-params.risk_free_rate * t).exp() + 1e-9);
    }

    #[test]
    fn prop_implied_vol_round_trip(
        sigma in 0.05..1.0f64,
        strike in 50.0..200.0f64,
        t in 0.05..3.0f64,
        r in 0.0..0.08f64,
        q in 0.0..0.05f64,
        is_call in any::<bool>(),
    ) {
        let ty = if is_call { OptionType::Call } else { OptionType::Put };
        let params = OptionParameters::new(100.0, strike, t, r, sigma).with_dividend_yield(q);
        let bs = BlackScholes::new(params).unwrap();
        // Where vega is negligible every volatility nearby reproduces the price
        prop_assume!(bs.vol_sensitivity() > 1.0);

        let iv = implied_volatility(bs.price_of(ty), &params, ty).unwrap();
        prop_assert!(iv.converged, "{:?} {:?} -> {:?}", ty, params, iv);
        prop_assert!((iv.volatility - sigma).abs() < 1e-3, "{:?} {:?} -> {:?}", ty, params, iv);
    }
}

#[test]
fn test_vega_matches_finite_difference() {
    let params = OptionParameters::new(100.0, 110.0, 0.75, 0.02, 0.3);
    let h = 1e-4;
    let up = BlackScholes::new(params.with_volatility(0.3 + h)).unwrap();
    let down = BlackScholes::new(params.with_volatility(0.3 - h)).unwrap();
    let fd = (up.price_call() - down.price_call()) / (2.0 * h) / 100.0;
    let vega = BlackScholes::new(params).unwrap().vega();
    assert!((vega - fd).abs() < 1e-4);
}
