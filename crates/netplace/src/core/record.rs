//! Representation of one output dataset row.

/// State of a single network as observed at record emission time.
#[derive(Clone, Copy, Debug)]
pub struct NetworkSnapshot {
    pub load: f64,
    pub latency: f64,
    /// Available bandwidth with the in-flight reservation still applied.
    pub bw_available: u32,
}

/// One labeled dataset row. Constructed within a single generation
/// iteration, written once, never mutated afterwards.
#[derive(Clone, Debug)]
pub struct Record {
    pub vm_id: u32,
    pub cpu_cores: u32,
    pub ram: u64,
    pub bandwidth_req: u32,
    /// Snapshot of every network at selection time.
    pub networks: Vec<NetworkSnapshot>,
    /// Zero-based index of the selected network (serialized 1-based).
    pub label_network: usize,
    pub completion_time: f64,
    pub throughput: f64,
    pub task_type: &'static str,
}
