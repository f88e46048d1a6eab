use serde::{Deserialize, Deserializer, Serialize};
use tsify_next::Tsify;

use crate::demand::{demand, endowment_complement};
use crate::error::{ConfigError, DomainError};
use crate::types::{
    Agent, Bundle, Endowment, Exponent, Good, Prices, Quantity, check_endowment, check_exponent,
};
use crate::utility::utility;

// ============================================================================
// EconomyConfig - Preferences and endowments, fixed for a run
// ============================================================================

const DEFAULT_ALPHA: Exponent = 1.0 / 3.0;
const DEFAULT_BETA: Exponent = 2.0 / 3.0;
const DEFAULT_OMEGA1A: Quantity = 0.8;
const DEFAULT_OMEGA2A: Quantity = 0.3;

/// Parameters of the two-agent economy.
///
/// Only agent A's endowment is stored; B holds the rest of each good, so the
/// total endowment of each good is always 1.
///
/// Deserialization validates, so an out-of-range config cannot be built from
/// JSON or a JS object either.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(default)]
pub struct EconomyConfig {
    alpha: Exponent,
    beta: Exponent,
    omega1a: Quantity,
    omega2a: Quantity,
}

/// Unchecked wire form of [`EconomyConfig`].
#[derive(Deserialize)]
#[serde(default)]
struct RawEconomyConfig {
    alpha: Exponent,
    beta: Exponent,
    omega1a: Quantity,
    omega2a: Quantity,
}

impl Default for RawEconomyConfig {
    fn default() -> Self {
        let EconomyConfig {
            alpha,
            beta,
            omega1a,
            omega2a,
        } = EconomyConfig::default();
        Self {
            alpha,
            beta,
            omega1a,
            omega2a,
        }
    }
}

impl TryFrom<RawEconomyConfig> for EconomyConfig {
    type Error = DomainError;

    fn try_from(raw: RawEconomyConfig) -> Result<Self, Self::Error> {
        Self::new(raw.alpha, raw.beta, raw.omega1a, raw.omega2a)
    }
}

impl<'de> Deserialize<'de> for EconomyConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEconomyConfig::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            omega1a: DEFAULT_OMEGA1A,
            omega2a: DEFAULT_OMEGA2A,
        }
    }
}

impl EconomyConfig {
    pub fn new(
        alpha: Exponent,
        beta: Exponent,
        omega1a: Quantity,
        omega2a: Quantity,
    ) -> Result<Self, DomainError> {
        let config = Self {
            alpha,
            beta,
            omega1a,
            omega2a,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse from JSON. Missing fields take the default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawEconomyConfig = serde_json::from_str(json)?;
        Ok(Self::try_from(raw)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), DomainError> {
        check_exponent(self.alpha)?;
        check_exponent(self.beta)?;
        check_endowment(Good::Good1, self.omega1a)?;
        check_endowment(Good::Good2, self.omega2a)?;
        Ok(())
    }

    /// Same preferences, different split of the goods.
    pub fn with_endowment(&self, omega1a: Quantity, omega2a: Quantity) -> Result<Self, DomainError> {
        Self::new(self.alpha, self.beta, omega1a, omega2a)
    }

    pub fn alpha(&self) -> Exponent {
        self.alpha
    }

    pub fn beta(&self) -> Exponent {
        self.beta
    }

    pub fn exponent(&self, agent: Agent) -> Exponent {
        match agent {
            Agent::A => self.alpha,
            Agent::B => self.beta,
        }
    }

    pub fn endowment(&self, agent: Agent) -> Result<Endowment, DomainError> {
        match agent {
            Agent::A => Ok(Endowment::new(self.omega1a, self.omega2a)),
            Agent::B => {
                // Checked per good here so an error names the right one.
                Endowment::new(self.omega1a, self.omega2a).validate()?;
                Ok(Endowment::new(
                    endowment_complement(self.omega1a)?,
                    endowment_complement(self.omega2a)?,
                ))
            }
        }
    }

    // === Agent-level evaluation ===

    pub fn agent_utility(&self, agent: Agent, bundle: Bundle) -> Result<f64, DomainError> {
        utility(bundle, self.exponent(agent))
    }

    /// Utility the agent gets from consuming its own endowment (no trade).
    pub fn endowment_utility(&self, agent: Agent) -> Result<f64, DomainError> {
        self.agent_utility(agent, self.endowment(agent)?.as_bundle())
    }

    pub fn agent_demand(&self, agent: Agent, prices: Prices) -> Result<Bundle, DomainError> {
        let bundle = demand(prices, self.endowment(agent)?, self.exponent(agent))?;

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "demand",
            agent = agent.label(),
            p1 = prices.p1,
            p2 = prices.p2,
            x1 = bundle.x1,
            x2 = bundle.x2,
        );

        Ok(bundle)
    }
}
