use std::process;
use std::time::Instant;

use clap::Parser;
use log::error;
use sugars::rc;

use netplace::core::config::GenerationConfig;
use netplace::core::dataset_writer::DatasetWriter;
use netplace::generation::DatasetGenerator;
use netplace::simulation::ComputeCluster;

fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the output dataset file
    #[clap(short, long, default_value = "vm_network_dynamic_realistic_20k.csv")]
    output: String,

    /// Path to generation config (YAML)
    #[clap(short, long)]
    config: Option<String>,

    /// Number of records to generate (overrides config)
    #[clap(short, long)]
    records: Option<u32>,

    /// Random seed (overrides config)
    #[clap(short, long)]
    seed: Option<u64>,
}

fn main() {
    init_logger();

    let args = Args::parse();
    let generation_start = Instant::now();

    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_file(path),
        None => GenerationConfig::default(),
    };
    if let Some(records) = args.records {
        config.records = records;
    }
    if let Some(seed) = args.seed {
        config.random_seed = seed;
    }
    let config = rc!(config);

    let engine = ComputeCluster::new(config.networks, config.vm_mips);
    let mut generator = DatasetGenerator::new(config.clone(), Box::new(engine));

    let mut writer = match DatasetWriter::from_path(&args.output) {
        Ok(writer) => writer,
        Err(e) => {
            error!("Can't create output file {}: {}", args.output, e);
            process::exit(1);
        }
    };

    match generator.run(&mut writer) {
        Ok(stats) => {
            println!(
                "Wrote {} records to {} ({} skipped) in {:.2?}",
                stats.written,
                args.output,
                stats.skipped,
                generation_start.elapsed()
            );
        }
        Err(e) => {
            error!("Dataset generation aborted: {}", e);
            process::exit(1);
        }
    }
}
