use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::error::DomainError;

// ============================================================================
// Scalars
// ============================================================================

pub type Price = f64;
pub type Quantity = f64;
pub type Exponent = f64;

// ============================================================================
// Agents & Goods - Two of each, by construction
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Agent {
    A,
    B,
}

impl Agent {
    pub fn all() -> impl Iterator<Item = Agent> {
        [Agent::A, Agent::B].into_iter()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Agent::A => "A",
            Agent::B => "B",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Good {
    Good1,
    Good2,
}

impl Good {
    pub fn all() -> impl Iterator<Item = Good> {
        [Good::Good1, Good::Good2].into_iter()
    }
}

impl std::fmt::Display for Good {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Good::Good1 => write!(f, "good 1"),
            Good::Good2 => write!(f, "good 2"),
        }
    }
}

// ============================================================================
// Bundle - A consumption pair (x1, x2)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Bundle {
    pub x1: Quantity,
    pub x2: Quantity,
}

impl Bundle {
    pub fn new(x1: Quantity, x2: Quantity) -> Self {
        Self { x1, x2 }
    }

    pub fn get(&self, good: Good) -> Quantity {
        match good {
            Good::Good1 => self.x1,
            Good::Good2 => self.x2,
        }
    }

    /// Rejects negative, NaN and infinite quantities.
    pub fn validate(&self) -> Result<(), DomainError> {
        for good in Good::all() {
            let quantity = self.get(good);
            if !quantity.is_finite() || quantity < 0.0 {
                return Err(DomainError::NegativeQuantity { good, quantity });
            }
        }
        Ok(())
    }

    /// Market value of the bundle at `prices`.
    pub fn value(&self, prices: Prices) -> f64 {
        prices.p1 * self.x1 + prices.p2 * self.x2
    }
}

// ============================================================================
// Prices - Only the ratio p1/p2 is economically meaningful
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Prices {
    pub p1: Price,
    pub p2: Price,
}

impl Prices {
    pub fn new(p1: Price, p2: Price) -> Self {
        Self { p1, p2 }
    }

    /// Good 2 as numeraire.
    pub fn with_numeraire(p1: Price) -> Self {
        Self { p1, p2: 1.0 }
    }

    pub fn get(&self, good: Good) -> Price {
        match good {
            Good::Good1 => self.p1,
            Good::Good2 => self.p2,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for good in Good::all() {
            check_price(good, self.get(good))?;
        }
        Ok(())
    }
}

pub(crate) fn check_price(good: Good, price: Price) -> Result<(), DomainError> {
    if price > 0.0 && price.is_finite() {
        Ok(())
    } else {
        Err(DomainError::NonPositivePrice { good, price })
    }
}

// ============================================================================
// Endowment - Initial holdings, each component in [0,1]
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Endowment {
    pub omega1: Quantity,
    pub omega2: Quantity,
}

impl Endowment {
    pub fn new(omega1: Quantity, omega2: Quantity) -> Self {
        Self { omega1, omega2 }
    }

    pub fn get(&self, good: Good) -> Quantity {
        match good {
            Good::Good1 => self.omega1,
            Good::Good2 => self.omega2,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for good in Good::all() {
            check_endowment(good, self.get(good))?;
        }
        Ok(())
    }

    pub fn as_bundle(&self) -> Bundle {
        Bundle::new(self.omega1, self.omega2)
    }
}

pub(crate) fn check_endowment(good: Good, omega: Quantity) -> Result<(), DomainError> {
    if (0.0..=1.0).contains(&omega) {
        Ok(())
    } else {
        Err(DomainError::EndowmentOutOfRange { good, omega })
    }
}

pub(crate) fn check_exponent(exponent: Exponent) -> Result<(), DomainError> {
    if exponent > 0.0 && exponent < 1.0 {
        Ok(())
    } else {
        Err(DomainError::ExponentOutOfRange { exponent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_price_rejected() {
        let prices = Prices::new(f64::NAN, 1.0);
        assert!(matches!(
            prices.validate(),
            Err(DomainError::NonPositivePrice { good: Good::Good1, .. })
        ));
    }

    #[test]
    fn endowment_bounds_are_inclusive() {
        assert!(Endowment::new(0.0, 1.0).validate().is_ok());
        assert!(Endowment::new(1.01, 0.5).validate().is_err());
        assert!(Endowment::new(0.5, -0.01).validate().is_err());
    }

    #[test]
    fn bundle_value_uses_both_prices() {
        let b = Bundle::new(2.0, 3.0);
        assert_eq!(b.value(Prices::new(0.5, 2.0)), 7.0);
    }
}
