//! Delegated execution of placement requests on a simulated compute
//! cluster.
//!
//! The generator treats task execution as an opaque collaborator behind the
//! [`SimulationEngine`] trait: it submits one VM and one task per record and
//! only consumes the reported start/finish times. [`ComputeCluster`] is the
//! built-in engine over the fixed datacenter topology.

/// Number of hosts in each datacenter.
pub const HOSTS_PER_DATACENTER: usize = 10;
/// Number of cores per host.
const HOST_CORES: u32 = 4;
/// Host memory capacity.
const HOST_RAM: u64 = 8192;
/// Host bandwidth capacity.
const HOST_BANDWIDTH: u64 = 100000;
/// Host storage capacity.
const HOST_STORAGE: u64 = 1000000;

/// Specification of the VM submitted for one record.
#[derive(Clone, Copy, Debug)]
pub struct VmSpec {
    pub id: u32,
    /// Total MIPS across all cores.
    pub mips: u32,
    pub cores: u32,
    pub ram: u64,
    pub bandwidth: u32,
    pub storage: u64,
}

/// Specification of the task submitted with the VM.
#[derive(Clone, Copy, Debug)]
pub struct TaskSpec {
    /// Length in instructions.
    pub length: u64,
    pub cores: u32,
    pub file_size: u64,
    pub output_size: u64,
}

/// Reported execution window of a completed task.
#[derive(Clone, Copy, Debug)]
pub struct TaskRun {
    pub start_time: f64,
    pub finish_time: f64,
}

impl TaskRun {
    pub fn execution_time(&self) -> f64 {
        self.finish_time - self.start_time
    }
}

/// Trait for the delegated task execution environment.
///
/// Returns `None` when the environment produced no completed task for the
/// submitted pair; callers must tolerate that without crashing.
pub trait SimulationEngine {
    fn run_task(&mut self, vm: &VmSpec, task: &TaskSpec) -> Option<TaskRun>;
}

/// Specification of a single physical host.
#[derive(Clone, Copy, Debug)]
pub struct HostSpec {
    pub cores: u32,
    pub mips_per_core: u32,
    pub ram: u64,
    pub bandwidth: u64,
    pub storage: u64,
}

impl HostSpec {
    /// Checks whether the host can accommodate the VM.
    pub fn fits(&self, vm: &VmSpec) -> bool {
        vm.cores <= self.cores
            && vm.ram <= self.ram
            && vm.bandwidth as u64 <= self.bandwidth
            && vm.storage <= self.storage
    }
}

/// Built-in execution engine over an ephemeral fixed topology: identical
/// datacenters of 10 hosts with 4 cores each. A fresh environment is assumed
/// per submission, so the engine keeps no state between records.
pub struct ComputeCluster {
    datacenters: usize,
    host: HostSpec,
}

impl ComputeCluster {
    /// Creates the cluster with one datacenter per candidate network and the
    /// given per-core host capacity.
    pub fn new(datacenters: usize, mips_per_core: u32) -> Self {
        Self {
            datacenters,
            host: HostSpec {
                cores: HOST_CORES,
                mips_per_core,
                ram: HOST_RAM,
                bandwidth: HOST_BANDWIDTH,
                storage: HOST_STORAGE,
            },
        }
    }

    /// Returns the first host able to accommodate the VM as a
    /// (datacenter, host) pair. Hosts are identical, so first fit reduces
    /// to a single capacity check.
    fn find_host(&self, vm: &VmSpec) -> Option<(usize, usize)> {
        if self.datacenters > 0 && self.host.fits(vm) {
            return Some((0, 0));
        }
        None
    }
}

impl SimulationEngine for ComputeCluster {
    fn run_task(&mut self, vm: &VmSpec, task: &TaskSpec) -> Option<TaskRun> {
        self.find_host(vm)?;
        // Linear core speedup: running on all VM cores at once divides the
        // length by the total MIPS.
        let duration = task.length as f64 / vm.mips as f64;
        Some(TaskRun {
            start_time: 0.,
            finish_time: duration,
        })
    }
}
