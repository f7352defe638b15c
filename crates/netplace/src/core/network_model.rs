//! Synthetic per-network dynamic state.

use std::rc::Rc;

use rand::Rng;

use crate::core::config::GenerationConfig;
use crate::core::record::NetworkSnapshot;

/// Divisor converting the active VM count into a load fraction.
const ACTIVE_VMS_NORM: f64 = 10.;
/// Latency added per unit of load, on top of the tier base latency.
const LOAD_LATENCY_FACTOR: f64 = 15.;

/// Topology tier of a network, fixing its baseline latency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopologyTier {
    Edge,
    Regional,
    Core,
}

impl TopologyTier {
    /// Returns the tier of the network with the given index.
    /// The first five networks are edge, the next ten are regional,
    /// the rest are core.
    pub fn for_index(index: usize) -> Self {
        if index < 5 {
            TopologyTier::Edge
        } else if index < 15 {
            TopologyTier::Regional
        } else {
            TopologyTier::Core
        }
    }

    /// Returns the baseline latency of this tier in milliseconds.
    pub fn base_latency(&self) -> f64 {
        match self {
            TopologyTier::Edge => 5.,
            TopologyTier::Regional => 10.,
            TopologyTier::Core => 20.,
        }
    }
}

/// Stores the dynamic state of a single network.
#[derive(Clone, Debug)]
pub struct NetworkState {
    /// Number of VMs currently placed on this network.
    pub active_vms: u32,
    /// Congestion estimate in [0, 1], recomputed on every advance.
    pub load: f64,
    /// Current latency, derived from the base latency and load.
    pub latency: f64,
    /// Bandwidth capacity, re-randomized on every advance.
    pub bw_capacity: u32,
    /// Bandwidth reserved by the in-flight record, if any.
    pub bw_used: u32,
    /// Topology tier, fixed for the whole run.
    pub tier: TopologyTier,
}

impl NetworkState {
    /// Creates an idle network of the given tier.
    pub fn new(tier: TopologyTier) -> Self {
        Self {
            active_vms: 0,
            load: 0.,
            latency: tier.base_latency(),
            bw_capacity: 1000,
            bw_used: 0,
            tier,
        }
    }

    /// Returns the bandwidth still available for reservation.
    pub fn bw_available(&self) -> u32 {
        self.bw_capacity.saturating_sub(self.bw_used)
    }
}

/// Holds the mutable state of all candidate networks.
///
/// The state persists across records: the active VM count and the
/// re-randomized capacities accumulate drift over the whole run, which makes
/// consecutive records temporally correlated. Nothing here ever resets to
/// initial conditions.
pub struct NetworkStateModel {
    networks: Vec<NetworkState>,
    config: Rc<GenerationConfig>,
}

impl NetworkStateModel {
    /// Creates the model with idle networks, tiers assigned by index.
    pub fn new(config: Rc<GenerationConfig>) -> Self {
        let networks = (0..config.networks)
            .map(|i| NetworkState::new(TopologyTier::for_index(i)))
            .collect();
        Self { networks, config }
    }

    /// Recomputes load, latency and bandwidth capacity of every network.
    ///
    /// Two uniform draws are taken per network, interleaved in index order:
    /// the load noise first, then the capacity. The draw order is part of
    /// the seeded-reproducibility contract.
    pub fn advance<R: Rng>(&mut self, peak_hour: bool, rng: &mut R) {
        let noise = if peak_hour {
            self.config.peak_noise
        } else {
            self.config.offpeak_noise
        };
        for net in self.networks.iter_mut() {
            net.load = (net.active_vms as f64 / ACTIVE_VMS_NORM + rng.gen_range(0.0..1.0) * noise).min(1.0);
            net.latency = net.tier.base_latency() + net.load * LOAD_LATENCY_FACTOR;
            net.bw_capacity = rng.gen_range(self.config.bw_capacity_min..self.config.bw_capacity_max);
        }
    }

    /// Reserves resources for an in-flight record on the selected network.
    pub fn reserve(&mut self, index: usize, bw_req: u32) {
        let net = &mut self.networks[index];
        net.active_vms += 1;
        net.bw_used += bw_req;
    }

    /// Releases the resources reserved by [`reserve`](Self::reserve).
    pub fn release(&mut self, index: usize, bw_req: u32) {
        let net = &mut self.networks[index];
        net.active_vms -= 1;
        net.bw_used -= bw_req;
    }

    /// Returns the states of all networks.
    pub fn networks(&self) -> &[NetworkState] {
        &self.networks
    }

    /// Returns the state of the network with the given index.
    pub fn network(&self, index: usize) -> &NetworkState {
        &self.networks[index]
    }

    /// Returns a per-network snapshot for record emission.
    pub fn snapshot(&self) -> Vec<NetworkSnapshot> {
        self.networks
            .iter()
            .map(|net| NetworkSnapshot {
                load: net.load,
                latency: net.latency,
                bw_available: net.bw_available(),
            })
            .collect()
    }
}
