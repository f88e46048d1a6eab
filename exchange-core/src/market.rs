use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::config::EconomyConfig;
use crate::error::DomainError;
use crate::types::{Agent, Good, Price, Prices, check_price};

// === PRICE GRID ===

/// Evenly spaced good-1 prices `start + span * t / steps` for `t = 0..=steps`,
/// with good 2 as numeraire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct PriceGrid {
    start: Price,
    span: Price,
    steps: u32,
}

impl Default for PriceGrid {
    /// `p1 ∈ {0.5, 0.5 + 2/75, ..., 2.5}`
    fn default() -> Self {
        Self {
            start: 0.5,
            span: 2.0,
            steps: 75,
        }
    }
}

impl PriceGrid {
    pub fn new(start: Price, span: Price, steps: u32) -> Result<Self, DomainError> {
        let grid = Self { start, span, steps };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        check_price(Good::Good1, self.start)?;
        // Last price must be positive too; a negative span could cross zero.
        check_price(Good::Good1, self.start + self.span)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.steps as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// A grid with zero steps holds just `start`.
    pub fn prices(&self) -> impl Iterator<Item = Prices> + '_ {
        let steps = self.steps.max(1) as f64;
        (0..=self.steps)
            .map(move |t| self.start + self.span * t as f64 / steps)
            .map(Prices::with_numeraire)
    }
}

// === EXCESS DEMAND ===

/// Aggregate demand minus total endowment, per good.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct ExcessDemand {
    pub eps1: f64,
    pub eps2: f64,
}

impl ExcessDemand {
    /// Value of excess demand; zero at every price by Walras' law.
    pub fn value(&self, prices: Prices) -> f64 {
        prices.p1 * self.eps1 + prices.p2 * self.eps2
    }
}

/// One row of the market-clearing error table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct ClearingError {
    pub p1: Price,
    pub eps1: f64,
    pub eps2: f64,
}

/// `eps_j = x_jA* + x_jB* - 1`. Total endowment of each good is 1.
pub fn excess_demand(config: &EconomyConfig, prices: Prices) -> Result<ExcessDemand, DomainError> {
    let mut eps1 = -1.0;
    let mut eps2 = -1.0;
    for agent in Agent::all() {
        let bundle = config.agent_demand(agent, prices)?;
        eps1 += bundle.x1;
        eps2 += bundle.x2;
    }

    #[cfg(feature = "instrument")]
    tracing::info!(
        target: "excess_demand",
        p1 = prices.p1,
        p2 = prices.p2,
        eps1 = eps1,
        eps2 = eps2,
    );

    Ok(ExcessDemand { eps1, eps2 })
}

/// Errors in the market-clearing condition at every price in `grid`.
pub fn market_clearing_errors(
    config: &EconomyConfig,
    grid: &PriceGrid,
) -> Result<Vec<ClearingError>, DomainError> {
    grid.validate()?;
    grid.prices()
        .map(|prices| {
            let ExcessDemand { eps1, eps2 } = excess_demand(config, prices)?;
            Ok(ClearingError {
                p1: prices.p1,
                eps1,
                eps2,
            })
        })
        .collect()
}
