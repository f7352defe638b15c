//! Streaming CSV emission of dataset rows.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::record::Record;

/// Writes the dataset header and rows to the underlying writer, one row at
/// a time. The inner csv writer flushes on drop, so a partially generated
/// file is left in a consistent state even on abnormal exit paths; callers
/// on the normal path should still [`flush`](Self::flush) to observe write
/// errors.
pub struct DatasetWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl DatasetWriter<File> {
    /// Creates a dataset writer over a new file at the given path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, csv::Error> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
        })
    }
}

impl<W: Write> DatasetWriter<W> {
    /// Creates a dataset writer over an arbitrary writer.
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    /// Writes the header line for the given number of networks.
    pub fn write_header(&mut self, networks: usize) -> Result<(), csv::Error> {
        let mut fields = vec![
            "vm_id".to_string(),
            "cpu_cores".to_string(),
            "ram".to_string(),
            "bandwidth_req".to_string(),
        ];
        for i in 1..=networks {
            fields.push(format!("net_{}_load", i));
            fields.push(format!("net_{}_latency", i));
            fields.push(format!("net_{}_bandwidth_avail", i));
        }
        fields.push("label_network_id".to_string());
        fields.push("task_completion_time".to_string());
        fields.push("throughput_achieved".to_string());
        fields.push("task_type".to_string());
        self.writer.write_record(&fields)
    }

    /// Writes one dataset row.
    ///
    /// Loads, latencies, completion time and throughput are formatted with
    /// two decimals; bandwidths and ids as integers; the label is the
    /// 1-based network id.
    pub fn write_record(&mut self, record: &Record) -> Result<(), csv::Error> {
        let mut fields = vec![
            record.vm_id.to_string(),
            record.cpu_cores.to_string(),
            record.ram.to_string(),
            record.bandwidth_req.to_string(),
        ];
        for net in &record.networks {
            fields.push(format!("{:.2}", net.load));
            fields.push(format!("{:.2}", net.latency));
            fields.push(net.bw_available.to_string());
        }
        fields.push((record.label_network + 1).to_string());
        fields.push(format!("{:.2}", record.completion_time));
        fields.push(format!("{:.2}", record.throughput));
        fields.push(record.task_type.to_string());
        self.writer.write_record(&fields)
    }

    /// Flushes buffered rows to the underlying writer.
    pub fn flush(&mut self) -> Result<(), csv::Error> {
        self.writer.flush().map_err(csv::Error::from)
    }
}
