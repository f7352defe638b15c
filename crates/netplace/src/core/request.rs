//! Placement request sampling.

use rand::Rng;

use crate::core::config::GenerationConfig;

/// CPU core counts a request can ask for.
const CPU_CORE_OPTIONS: [u32; 3] = [1, 2, 4];
/// RAM sizes a request can ask for, in MB.
const RAM_OPTIONS: [u64; 4] = [512, 1024, 2048, 4096];

/// Class of the computational task submitted with a VM, pairing the declared
/// type with its length in instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskClass {
    CpuBound,
    IoBound,
    Mixed,
}

impl TaskClass {
    /// Samples a task class uniformly.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        match rng.gen_range(0..3) {
            0 => TaskClass::CpuBound,
            1 => TaskClass::IoBound,
            _ => TaskClass::Mixed,
        }
    }

    /// Returns the task length in instructions.
    pub fn length(&self) -> u64 {
        match self {
            TaskClass::CpuBound => 10000,
            TaskClass::IoBound => 50000,
            TaskClass::Mixed => 150000,
        }
    }

    /// Returns the type token written to the dataset.
    pub fn name(&self) -> &'static str {
        match self {
            TaskClass::CpuBound => "cpu_bound",
            TaskClass::IoBound => "io_bound",
            TaskClass::Mixed => "mixed",
        }
    }
}

/// Resource requirements of a single VM placement request.
#[derive(Clone, Copy, Debug)]
pub struct PlacementRequest {
    pub vm_id: u32,
    pub cpu_cores: u32,
    pub ram: u64,
    pub bw_req: u32,
    pub task_class: TaskClass,
}

impl PlacementRequest {
    /// Samples the requirements of one request.
    ///
    /// Exactly four uniform draws, in order: task class, cpu cores, ram,
    /// bandwidth. The order is part of the seeded-reproducibility contract.
    pub fn sample<R: Rng>(vm_id: u32, config: &GenerationConfig, rng: &mut R) -> Self {
        let task_class = TaskClass::sample(rng);
        let cpu_cores = CPU_CORE_OPTIONS[rng.gen_range(0..CPU_CORE_OPTIONS.len())];
        let ram = RAM_OPTIONS[rng.gen_range(0..RAM_OPTIONS.len())];
        let bw_req = rng.gen_range(config.bw_req_min..config.bw_req_max);
        Self {
            vm_id,
            cpu_cores,
            ram,
            bw_req,
            task_class,
        }
    }
}
