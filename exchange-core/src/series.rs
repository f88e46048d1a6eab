//! Data series handed to plotting front-ends.
//!
//! The core never draws anything; it produces `(price, quantity)` pairs and
//! endowment samples and the consumer renders them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::config::EconomyConfig;
use crate::error::DomainError;
use crate::market::PriceGrid;
use crate::types::{Agent, Endowment, Good, Price, Quantity};

/// Number of endowments drawn in the coursework's random set.
pub const RANDOM_ENDOWMENT_COUNT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct PricePoint {
    pub price: Price,
    pub quantity: Quantity,
}

/// Demand of `agent` for `good` as `p1` moves across `grid` (`p2 = 1`).
pub fn demand_curve(
    config: &EconomyConfig,
    agent: Agent,
    good: Good,
    grid: &PriceGrid,
) -> Result<Vec<PricePoint>, DomainError> {
    grid.validate()?;
    grid.prices()
        .map(|prices| {
            let bundle = config.agent_demand(agent, prices)?;
            Ok(PricePoint {
                price: prices.p1,
                quantity: bundle.get(good),
            })
        })
        .collect()
}

/// `n` endowments for agent A drawn uniformly from `[0,1)²`.
///
/// Deterministic for a given seed.
pub fn random_endowments(n: usize, seed: u64) -> Vec<Endowment> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Endowment::new(rng.random::<f64>(), rng.random::<f64>()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_draws() {
        let a = random_endowments(RANDOM_ENDOWMENT_COUNT, 7);
        let b = random_endowments(RANDOM_ENDOWMENT_COUNT, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), RANDOM_ENDOWMENT_COUNT);
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(random_endowments(10, 1), random_endowments(10, 2));
    }

    #[test]
    fn draws_are_valid_endowments() {
        for e in random_endowments(500, 42) {
            assert!(e.validate().is_ok(), "{e:?}");
            assert!(e.omega1 < 1.0 && e.omega2 < 1.0);
        }
    }

    #[test]
    fn good2_demand_rises_with_p1() {
        // Higher p1 raises A's wealth (measured in good 2) since A holds good 1.
        let curve = demand_curve(
            &EconomyConfig::default(),
            Agent::A,
            Good::Good2,
            &PriceGrid::default(),
        )
        .unwrap();
        assert_eq!(curve.len(), 76);
        for pair in curve.windows(2) {
            assert!(pair[1].quantity > pair[0].quantity);
        }
    }
}
