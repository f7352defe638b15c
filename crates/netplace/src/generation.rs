//! Record generation and the overall driver loop.

use std::io::Write;
use std::rc::Rc;

use log::{info, warn};
use rand::prelude::*;
use rand_pcg::Pcg64;

use crate::core::config::GenerationConfig;
use crate::core::dataset_writer::DatasetWriter;
use crate::core::network_model::NetworkStateModel;
use crate::core::network_selection::{LowestScore, NetworkSelector};
use crate::core::record::Record;
use crate::core::request::PlacementRequest;
use crate::simulation::{SimulationEngine, TaskSpec, VmSpec};

/// Emit a progress notice every this many record indices.
const PROGRESS_PERIOD: u32 = 100;
/// Storage requested by every VM.
const VM_STORAGE: u64 = 10000;
/// Input file size declared for every task.
const TASK_FILE_SIZE: u64 = 300;
/// Output file size declared for every task.
const TASK_OUTPUT_SIZE: u64 = 300;

/// Returns whether the record with the given 1-based index falls into the
/// peak half of its period.
pub fn peak_hour(record_index: u32, period: u32) -> bool {
    record_index % period < period / 2
}

/// Counters of the generation outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Number of rows written to the dataset.
    pub written: u32,
    /// Number of record indices consumed by failed simulation runs.
    pub skipped: u32,
}

/// Generates labeled placement records one at a time.
///
/// Owns the network state model, the selector, the delegated execution
/// engine and the seeded random generator; it is the only component with
/// mutation rights over the network state. Records are processed strictly
/// sequentially.
pub struct DatasetGenerator {
    config: Rc<GenerationConfig>,
    model: NetworkStateModel,
    selector: NetworkSelector,
    engine: Box<dyn SimulationEngine>,
    rng: Pcg64,
    stats: GenerationStats,
}

impl DatasetGenerator {
    /// Creates a generator with the greedy lowest-score selector and the
    /// given execution engine. The random generator is seeded from the
    /// config, so equal seeds produce equal datasets.
    pub fn new(config: Rc<GenerationConfig>, engine: Box<dyn SimulationEngine>) -> Self {
        let model = NetworkStateModel::new(config.clone());
        let selector = NetworkSelector::new(Box::new(LowestScore::new(
            config.load_weight,
            config.latency_weight,
        )));
        let rng = Pcg64::seed_from_u64(config.random_seed);
        Self {
            config,
            model,
            selector,
            engine,
            rng,
            stats: GenerationStats::default(),
        }
    }

    /// Returns the current network state model.
    pub fn model(&self) -> &NetworkStateModel {
        &self.model
    }

    /// Returns the counters accumulated so far.
    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    /// Processes one record index: samples a request, advances the network
    /// state, selects the label network, reserves its resources around the
    /// delegated execution and builds the output row.
    ///
    /// Returns `None` when the delegated simulation reports no completed
    /// task; the reservation is rolled back and the index is consumed
    /// without producing a row.
    pub fn generate_record(&mut self, vm_id: u32, peak_hour: bool) -> Option<Record> {
        let request = PlacementRequest::sample(vm_id, &self.config, &mut self.rng);
        self.model.advance(peak_hour, &mut self.rng);
        let selection = self
            .selector
            .select(request.bw_req, self.model.networks(), &mut self.rng);
        self.model.reserve(selection.network, request.bw_req);

        let vm = VmSpec {
            id: vm_id,
            mips: self.config.vm_mips * request.cpu_cores,
            cores: request.cpu_cores,
            ram: request.ram,
            bandwidth: request.bw_req,
            storage: VM_STORAGE,
        };
        let task = TaskSpec {
            length: request.task_class.length(),
            cores: request.cpu_cores,
            file_size: TASK_FILE_SIZE,
            output_size: TASK_OUTPUT_SIZE,
        };

        let run = match self.engine.run_task(&vm, &task) {
            Some(run) => run,
            None => {
                self.model.release(selection.network, request.bw_req);
                warn!("VM {} failed", vm_id);
                self.stats.skipped += 1;
                return None;
            }
        };

        let load_sel = self.model.network(selection.network).load;
        let throughput =
            request.bw_req as f64 * (1. - load_sel) * (1. - self.rng.gen_range(0.0..1.0) * self.config.throughput_noise);

        // Snapshot before release, so the row still carries the in-flight
        // reservation of the selected network.
        let record = Record {
            vm_id,
            cpu_cores: request.cpu_cores,
            ram: request.ram,
            bandwidth_req: request.bw_req,
            networks: self.model.snapshot(),
            label_network: selection.network,
            completion_time: run.execution_time(),
            throughput,
            task_type: request.task_class.name(),
        };

        self.model.release(selection.network, request.bw_req);
        self.stats.written += 1;
        Some(record)
    }

    /// Runs the whole generation loop: writes the header, processes every
    /// record index and streams each produced row to the writer.
    ///
    /// Output errors are fatal and abort the run; failed simulation runs are
    /// counted and skipped.
    pub fn run<W: Write>(&mut self, writer: &mut DatasetWriter<W>) -> Result<GenerationStats, csv::Error> {
        writer.write_header(self.config.networks)?;
        for vm_id in 1..=self.config.records {
            let peak = peak_hour(vm_id, self.config.peak_period);
            if let Some(record) = self.generate_record(vm_id, peak) {
                writer.write_record(&record)?;
                if vm_id % PROGRESS_PERIOD == 0 {
                    info!("Generated: {} records", vm_id);
                }
            }
        }
        writer.flush()?;
        info!(
            "Dataset generation complete: {} rows written, {} skipped",
            self.stats.written, self.stats.skipped
        );
        Ok(self.stats)
    }
}
