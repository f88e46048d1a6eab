// === EDGEWORTH BOX ===
//
// Allocations are described from agent A's corner; B consumes whatever is
// left of the unit endowment of each good.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::config::EconomyConfig;
use crate::error::DomainError;
use crate::types::{Agent, Bundle};

/// `x1A, x2A ∈ {0, 1/n, ..., 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct AllocationGrid {
    pub n: u32,
}

impl Default for AllocationGrid {
    fn default() -> Self {
        Self { n: 75 }
    }
}

impl AllocationGrid {
    pub fn new(n: u32) -> Self {
        Self { n: n.max(1) }
    }

    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        let n = self.n.max(1);
        (0..=n).map(move |i| i as f64 / n as f64)
    }

    pub fn allocations(&self) -> impl Iterator<Item = Bundle> + '_ {
        self.points()
            .flat_map(move |x1| self.points().map(move |x2| Bundle::new(x1, x2)))
    }
}

/// What agent B consumes when A consumes `allocation`.
pub fn counterpart(allocation: Bundle) -> Bundle {
    Bundle::new(1.0 - allocation.x1, 1.0 - allocation.x2)
}

/// Grid allocations that leave both agents at least as well off as their
/// endowments. Returned as A's bundles.
pub fn pareto_improvements(
    config: &EconomyConfig,
    grid: &AllocationGrid,
) -> Result<Vec<Bundle>, DomainError> {
    config.validate()?;
    let reservation_a = config.endowment_utility(Agent::A)?;
    let reservation_b = config.endowment_utility(Agent::B)?;

    let mut improvements = Vec::new();
    for allocation in grid.allocations() {
        let u_a = config.agent_utility(Agent::A, allocation)?;
        if u_a < reservation_a {
            continue;
        }
        // Clamp float noise from `1 - x` at the box edge.
        let b_bundle = counterpart(allocation);
        let b_bundle = Bundle::new(b_bundle.x1.max(0.0), b_bundle.x2.max(0.0));
        let u_b = config.agent_utility(Agent::B, b_bundle)?;
        if u_b >= reservation_b {
            improvements.push(allocation);
        }
    }

    #[cfg(feature = "instrument")]
    {
        let side = grid.n.max(1) as u64 + 1;
        let found = improvements.len() as u64;
        tracing::info!(
            target: "pareto",
            candidates = side * side,
            improvements = found,
        );
    }

    Ok(improvements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_includes_both_corners() {
        let grid = AllocationGrid::new(4);
        let points: Vec<_> = grid.points().collect();
        assert_eq!(points, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(grid.allocations().count(), 25);
    }

    #[test]
    fn zero_n_is_bumped_to_one() {
        assert_eq!(AllocationGrid::new(0).allocations().count(), 4);
    }

    #[test]
    fn endowment_on_grid_is_an_improvement() {
        // (0.8, 0.3) lies on the 1/10 grid; no trade is weakly better for both.
        let config = EconomyConfig::default();
        let set = pareto_improvements(&config, &AllocationGrid::new(10)).unwrap();
        assert!(
            set.iter()
                .any(|b| (b.x1 - 0.8).abs() < 1e-12 && (b.x2 - 0.3).abs() < 1e-12),
            "endowment should be in the improvement set"
        );
    }

    #[test]
    fn corners_are_not_improvements() {
        // Giving everything to one agent leaves the other with zero utility.
        let config = EconomyConfig::default();
        let set = pareto_improvements(&config, &AllocationGrid::new(10)).unwrap();
        assert!(!set.contains(&Bundle::new(0.0, 0.0)));
        assert!(!set.contains(&Bundle::new(1.0, 1.0)));
    }
}
