//! Generation configuration.

use serde::{Deserialize, Serialize};

/// Holds raw generation config parsed from YAML file.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
struct RawGenerationConfig {
    pub networks: Option<usize>,
    pub records: Option<u32>,
    pub vm_mips: Option<u32>,
    pub peak_period: Option<u32>,
    pub bw_req_min: Option<u32>,
    pub bw_req_max: Option<u32>,
    pub bw_capacity_min: Option<u32>,
    pub bw_capacity_max: Option<u32>,
    pub peak_noise: Option<f64>,
    pub offpeak_noise: Option<f64>,
    pub load_weight: Option<f64>,
    pub latency_weight: Option<f64>,
    pub throughput_noise: Option<f64>,
    pub random_seed: Option<u64>,
}

/// Represents generation configuration.
///
/// The defaults reproduce the canonical 20-network, 20000-record dataset;
/// overriding them changes the statistical properties of the output.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Number of candidate networks (datacenters).
    pub networks: usize,
    /// Number of placement requests to process.
    pub records: u32,
    /// MIPS capacity of a single VM core.
    pub vm_mips: u32,
    /// Length in records of one peak/off-peak cycle.
    /// The first half of each cycle is peak.
    pub peak_period: u32,
    /// Minimum requested bandwidth (inclusive).
    pub bw_req_min: u32,
    /// Maximum requested bandwidth (exclusive).
    pub bw_req_max: u32,
    /// Minimum network bandwidth capacity (inclusive).
    pub bw_capacity_min: u32,
    /// Maximum network bandwidth capacity (exclusive).
    pub bw_capacity_max: u32,
    /// Background load noise amplitude during peak records.
    pub peak_noise: f64,
    /// Background load noise amplitude during off-peak records.
    pub offpeak_noise: f64,
    /// Weight of network load in the selection score.
    pub load_weight: f64,
    /// Weight of network latency in the selection score.
    pub latency_weight: f64,
    /// Relative amplitude of the multiplicative throughput noise.
    pub throughput_noise: f64,
    /// Seed for the random generator.
    pub random_seed: u64,
}

impl GenerationConfig {
    /// Creates generation config by reading parameter values from YAML file
    /// (uses default values if some parameters are absent).
    pub fn from_file(file_name: &str) -> Self {
        let raw: RawGenerationConfig = serde_yaml::from_str(
            &std::fs::read_to_string(file_name).unwrap_or_else(|_| panic!("Can't read file {}", file_name)),
        )
        .unwrap_or_else(|_| panic!("Can't parse YAML from file {}", file_name));
        let default = GenerationConfig::default();

        Self {
            networks: raw.networks.unwrap_or(default.networks),
            records: raw.records.unwrap_or(default.records),
            vm_mips: raw.vm_mips.unwrap_or(default.vm_mips),
            peak_period: raw.peak_period.unwrap_or(default.peak_period),
            bw_req_min: raw.bw_req_min.unwrap_or(default.bw_req_min),
            bw_req_max: raw.bw_req_max.unwrap_or(default.bw_req_max),
            bw_capacity_min: raw.bw_capacity_min.unwrap_or(default.bw_capacity_min),
            bw_capacity_max: raw.bw_capacity_max.unwrap_or(default.bw_capacity_max),
            peak_noise: raw.peak_noise.unwrap_or(default.peak_noise),
            offpeak_noise: raw.offpeak_noise.unwrap_or(default.offpeak_noise),
            load_weight: raw.load_weight.unwrap_or(default.load_weight),
            latency_weight: raw.latency_weight.unwrap_or(default.latency_weight),
            throughput_noise: raw.throughput_noise.unwrap_or(default.throughput_noise),
            random_seed: raw.random_seed.unwrap_or(default.random_seed),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            networks: 20,
            records: 20000,
            vm_mips: 1000,
            peak_period: 400,
            bw_req_min: 50,
            bw_req_max: 300,
            bw_capacity_min: 800,
            bw_capacity_max: 1200,
            peak_noise: 0.6,
            offpeak_noise: 0.3,
            load_weight: 2.5,
            latency_weight: 0.01,
            throughput_noise: 0.1,
            random_seed: 123,
        }
    }
}
