use wasm_bindgen::prelude::*;

pub mod config;
pub mod demand;
pub mod edgeworth;
pub mod error;
pub mod market;
pub mod series;
pub mod types;
pub mod utility;

pub use config::EconomyConfig;
pub use demand::{demand, demand_good1, demand_good2, endowment_complement, wealth};
pub use edgeworth::{AllocationGrid, counterpart, pareto_improvements};
pub use error::{ConfigError, DomainError};
pub use market::{ClearingError, ExcessDemand, PriceGrid, excess_demand, market_clearing_errors};
pub use series::{PricePoint, RANDOM_ENDOWMENT_COUNT, demand_curve, random_endowments};
pub use types::*;
pub use utility::{indifference_curve, utility};

// ============================================================================
// WASM API - Economy
// ============================================================================

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(js_err)
}

/// Browser handle on one parameterization of the exchange economy.
#[wasm_bindgen]
pub struct Economy {
    config: EconomyConfig,
}

impl Default for Economy {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Economy {
    /// Economy with the default preferences and endowments
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        // Better panic messages in browser console
        console_error_panic_hook::set_once();

        Self {
            config: EconomyConfig::default(),
        }
    }

    /// Build from a plain JS object `{ alpha, beta, omega1a, omega2a }`
    #[wasm_bindgen]
    pub fn from_config(config: JsValue) -> Result<Economy, JsError> {
        console_error_panic_hook::set_once();
        let config: EconomyConfig = serde_wasm_bindgen::from_value(config).map_err(js_err)?;
        config.validate().map_err(js_err)?;
        Ok(Self { config })
    }

    #[wasm_bindgen]
    pub fn from_json(json: &str) -> Result<Economy, JsError> {
        console_error_panic_hook::set_once();
        let config = EconomyConfig::from_json(json).map_err(js_err)?;
        Ok(Self { config })
    }

    #[wasm_bindgen]
    pub fn config(&self) -> EconomyConfig {
        self.config
    }

    #[wasm_bindgen]
    pub fn utility(&self, agent: Agent, x1: f64, x2: f64) -> Result<f64, JsError> {
        self.config
            .agent_utility(agent, Bundle::new(x1, x2))
            .map_err(js_err)
    }

    #[wasm_bindgen]
    pub fn demand(&self, agent: Agent, p1: f64, p2: f64) -> Result<Bundle, JsError> {
        self.config
            .agent_demand(agent, Prices::new(p1, p2))
            .map_err(js_err)
    }

    #[wasm_bindgen]
    pub fn excess_demand(&self, p1: f64, p2: f64) -> Result<ExcessDemand, JsError> {
        excess_demand(&self.config, Prices::new(p1, p2)).map_err(js_err)
    }

    /// Array of `{ p1, eps1, eps2 }` rows
    #[wasm_bindgen]
    pub fn market_clearing_errors(&self, grid: PriceGrid) -> Result<JsValue, JsError> {
        to_js(&market_clearing_errors(&self.config, &grid).map_err(js_err)?)
    }

    /// Same rows flattened as `[p1, eps1, eps2, p1, eps1, eps2, ...]` for charting libs
    #[wasm_bindgen]
    pub fn market_clearing_error_array(
        &self,
        grid: PriceGrid,
    ) -> Result<js_sys::Float64Array, JsError> {
        let flat: Vec<f64> = market_clearing_errors(&self.config, &grid)
            .map_err(js_err)?
            .iter()
            .flat_map(|row| [row.p1, row.eps1, row.eps2])
            .collect();
        Ok(js_sys::Float64Array::from(flat.as_slice()))
    }

    /// A's bundles in the Pareto-improvement set on an `n`-step grid
    #[wasm_bindgen]
    pub fn pareto_improvements(&self, n: u32) -> Result<JsValue, JsError> {
        to_js(&pareto_improvements(&self.config, &AllocationGrid::new(n)).map_err(js_err)?)
    }

    /// Indifference curve through the agent's endowment
    #[wasm_bindgen]
    pub fn endowment_indifference_curve(
        &self,
        agent: Agent,
        x1_points: Vec<f64>,
    ) -> Result<JsValue, JsError> {
        let level = self.config.endowment_utility(agent).map_err(js_err)?;
        to_js(&indifference_curve(self.config.exponent(agent), level, &x1_points).map_err(js_err)?)
    }

    #[wasm_bindgen]
    pub fn demand_curve(&self, agent: Agent, good: Good, grid: PriceGrid) -> Result<JsValue, JsError> {
        to_js(&demand_curve(&self.config, agent, good, &grid).map_err(js_err)?)
    }

    #[wasm_bindgen]
    pub fn random_endowments(n: usize, seed: u64) -> Result<JsValue, JsError> {
        to_js(&random_endowments(n, seed))
    }
}
