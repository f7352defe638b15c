//! Network selection algorithms.

use rand::Rng;

use crate::core::network_model::NetworkState;

/// Trait for implementation of network selection algorithms.
///
/// The algorithm is defined as a function of the record's bandwidth
/// requirement and the current state of all networks, which returns the
/// index of the network selected for placement or `None` if no network has
/// enough free bandwidth. Implementations must be deterministic; the random
/// fallback on saturation belongs to [`NetworkSelector`].
pub trait NetworkSelectionAlgorithm {
    fn select(&self, bw_req: u32, networks: &[NetworkState]) -> Option<usize>;
}

/// Greedy algorithm, which returns the eligible network with the lowest
/// weighted load/latency score. Ties resolve to the lowest index.
pub struct LowestScore {
    load_weight: f64,
    latency_weight: f64,
}

impl LowestScore {
    pub fn new(load_weight: f64, latency_weight: f64) -> Self {
        Self {
            load_weight,
            latency_weight,
        }
    }
}

impl NetworkSelectionAlgorithm for LowestScore {
    fn select(&self, bw_req: u32, networks: &[NetworkState]) -> Option<usize> {
        let mut result: Option<usize> = None;
        let mut best_score = f64::MAX;

        for (i, net) in networks.iter().enumerate() {
            if net.bw_available() >= bw_req {
                let score = net.load * self.load_weight + net.latency * self.latency_weight;
                if score < best_score {
                    best_score = score;
                    result = Some(i);
                }
            }
        }
        result
    }
}

/// Outcome of a selection.
#[derive(Clone, Copy, Debug)]
pub struct Selection {
    /// Index of the selected network.
    pub network: usize,
    /// Whether the selection fell back to a uniform random pick.
    pub fallback: bool,
}

/// Picks the destination network for each record.
///
/// Delegates to the configured algorithm and, when every network is
/// saturated, falls back to a uniformly random index. The fallback
/// intentionally injects label noise under saturation and is part of the
/// dataset semantics.
pub struct NetworkSelector {
    algorithm: Box<dyn NetworkSelectionAlgorithm>,
}

impl NetworkSelector {
    pub fn new(algorithm: Box<dyn NetworkSelectionAlgorithm>) -> Self {
        Self { algorithm }
    }

    /// Selects a network for a record with the given bandwidth requirement.
    ///
    /// Draws from `rng` only on the fallback path, so the per-record draw
    /// count stays reproducible with a seeded generator.
    pub fn select<R: Rng>(&self, bw_req: u32, networks: &[NetworkState], rng: &mut R) -> Selection {
        match self.algorithm.select(bw_req, networks) {
            Some(network) => Selection {
                network,
                fallback: false,
            },
            None => Selection {
                network: rng.gen_range(0..networks.len()),
                fallback: true,
            },
        }
    }
}
