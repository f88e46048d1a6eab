// === MARSHALLIAN DEMAND ===
//
// Cobb-Douglas preferences give constant expenditure shares: an agent with
// exponent e spends e of its wealth on good 1 and 1-e on good 2.

use crate::error::DomainError;
use crate::types::{
    Bundle, Endowment, Exponent, Good, Price, Prices, Quantity, check_endowment, check_exponent,
    check_price,
};

/// Share of a good held by the other agent: `1 - omega`.
pub fn endowment_complement(omega: Quantity) -> Result<Quantity, DomainError> {
    check_endowment(Good::Good1, omega)?;
    Ok(1.0 - omega)
}

/// Market value of an endowment.
pub fn wealth(prices: Prices, endowment: Endowment) -> Result<f64, DomainError> {
    prices.validate()?;
    endowment.validate()?;
    Ok(prices.p1 * endowment.omega1 + prices.p2 * endowment.omega2)
}

fn checked_wealth(
    p1: Price,
    p2: Price,
    omega1: Quantity,
    omega2: Quantity,
    exponent: Exponent,
) -> Result<f64, DomainError> {
    check_price(Good::Good1, p1)?;
    check_price(Good::Good2, p2)?;
    check_endowment(Good::Good1, omega1)?;
    check_endowment(Good::Good2, omega2)?;
    check_exponent(exponent)?;
    Ok(p1 * omega1 + p2 * omega2)
}

/// `exponent * (p1*omega1 + p2*omega2) / p1`
pub fn demand_good1(
    p1: Price,
    p2: Price,
    omega1: Quantity,
    omega2: Quantity,
    exponent: Exponent,
) -> Result<Quantity, DomainError> {
    let wealth = checked_wealth(p1, p2, omega1, omega2, exponent)?;
    Ok(exponent * wealth / p1)
}

/// `(1 - exponent) * (p1*omega1 + p2*omega2) / p2`
pub fn demand_good2(
    p1: Price,
    p2: Price,
    omega1: Quantity,
    omega2: Quantity,
    exponent: Exponent,
) -> Result<Quantity, DomainError> {
    let wealth = checked_wealth(p1, p2, omega1, omega2, exponent)?;
    Ok((1.0 - exponent) * wealth / p2)
}

/// Optimal bundle on the budget line for one agent.
pub fn demand(
    prices: Prices,
    endowment: Endowment,
    exponent: Exponent,
) -> Result<Bundle, DomainError> {
    let Prices { p1, p2 } = prices;
    let Endowment { omega1, omega2 } = endowment;
    Ok(Bundle::new(
        demand_good1(p1, p2, omega1, omega2, exponent)?,
        demand_good2(p1, p2, omega1, omega2, exponent)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHA: f64 = 1.0 / 3.0;

    #[test]
    fn zero_price_is_an_error_not_infinity() {
        assert_eq!(
            demand_good1(0.0, 1.0, 0.8, 0.3, ALPHA),
            Err(DomainError::NonPositivePrice {
                good: Good::Good1,
                price: 0.0
            })
        );
        assert!(matches!(
            demand_good2(1.0, 0.0, 0.8, 0.3, ALPHA),
            Err(DomainError::NonPositivePrice { good: Good::Good2, .. })
        ));
    }

    #[test]
    fn demand_exhausts_wealth() {
        let prices = Prices::new(1.7, 0.4);
        let endowment = Endowment::new(0.25, 0.9);
        let bundle = demand(prices, endowment, 0.6).unwrap();
        let w = wealth(prices, endowment).unwrap();
        assert!((bundle.value(prices) - w).abs() < 1e-9);
    }

    #[test]
    fn expenditure_share_equals_exponent() {
        let prices = Prices::new(2.0, 1.0);
        let endowment = Endowment::new(0.5, 0.5);
        let bundle = demand(prices, endowment, 0.25).unwrap();
        let w = wealth(prices, endowment).unwrap();
        assert!((prices.p1 * bundle.x1 / w - 0.25).abs() < 1e-12);
    }

    #[test]
    fn scaling_prices_leaves_demand_unchanged() {
        let endowment = Endowment::new(0.8, 0.3);
        let a = demand(Prices::new(1.5, 1.0), endowment, ALPHA).unwrap();
        let b = demand(Prices::new(3.0, 2.0), endowment, ALPHA).unwrap();
        assert!((a.x1 - b.x1).abs() < 1e-12);
        assert!((a.x2 - b.x2).abs() < 1e-12);
    }

    #[test]
    fn exponent_outside_unit_interval_rejected() {
        assert_eq!(
            demand_good1(1.0, 1.0, 0.8, 0.3, 0.0),
            Err(DomainError::ExponentOutOfRange { exponent: 0.0 })
        );
        assert_eq!(
            demand_good2(1.0, 1.0, 0.8, 0.3, 1.0),
            Err(DomainError::ExponentOutOfRange { exponent: 1.0 })
        );
        assert!(matches!(
            demand_good1(1.0, 1.0, 0.8, 0.3, f64::NAN),
            Err(DomainError::ExponentOutOfRange { .. })
        ));
        assert!(matches!(
            demand(Prices::new(1.0, 1.0), Endowment::new(0.8, 0.3), 1.5),
            Err(DomainError::ExponentOutOfRange { .. })
        ));
    }

    #[test]
    fn endowment_outside_unit_interval_rejected() {
        assert_eq!(
            demand_good1(1.0, 1.0, -0.1, 0.3, 0.5),
            Err(DomainError::EndowmentOutOfRange {
                good: Good::Good1,
                omega: -0.1
            })
        );
        assert_eq!(
            demand_good1(1.0, 1.0, 0.8, 1.2, 0.5),
            Err(DomainError::EndowmentOutOfRange {
                good: Good::Good2,
                omega: 1.2
            })
        );
        assert!(matches!(
            wealth(Prices::new(1.0, 1.0), Endowment::new(0.5, 1.5)),
            Err(DomainError::EndowmentOutOfRange { good: Good::Good2, .. })
        ));
        assert!(matches!(
            wealth(Prices::new(-1.0, 1.0), Endowment::new(0.5, 0.5)),
            Err(DomainError::NonPositivePrice { good: Good::Good1, .. })
        ));
    }

    #[test]
    fn complement_rejects_out_of_range() {
        assert!(endowment_complement(1.5).is_err());
        assert_eq!(endowment_complement(1.0), Ok(0.0));
    }
}
