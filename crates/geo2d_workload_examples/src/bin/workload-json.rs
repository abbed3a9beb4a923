use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use geo2d_workload::prelude::*;
use geo2d_workload_examples::init_tracing;
use tracing::info;

/// Writes a benchmark workload as JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Which suite to emit.
    #[arg(long, value_enum, default_value_t = Suite::All)]
    suite: Suite,

    /// JSON file with generator settings; missing fields use the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Gives up on a shape after this many placement attempts.
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Output file; stdout when omitted.
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// Also run every `pre` phase against a recording collection and report
    /// how many collection calls each test makes.
    #[arg(long)]
    dry_run_threads: Option<u32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Suite {
    Geo2d,
    Mms,
    All,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader::<_, GeoConfig>(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => GeoConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.max_attempts.is_some() {
        config = config.with_max_attempts(args.max_attempts);
    }
    config.validate()?;

    let mut rng = config.rng();
    let mut workload = Workload::new();
    if matches!(args.suite, Suite::Geo2d | Suite::All) {
        workload.extend(geo2d_index_workload(&config, &mut rng)?);
    }
    if matches!(args.suite, Suite::Mms | Suite::All) {
        workload.extend(mms_update_workload());
    }
    info!(
        tests = workload.len(),
        ops = workload.op_count(),
        "workload generated"
    );

    match &args.out {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &workload)?;
            writer.flush()?;
            info!(path = %path.display(), "workload written");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            serde_json::to_writer_pretty(&mut writer, &workload)?;
            writeln!(writer)?;
        }
    }

    if let Some(threads) = args.dry_run_threads {
        let env = Env { threads };
        for test in &workload.tests {
            let mut collection = RecordingCollection::new();
            test.run_pre(&mut collection, &env, &config, &mut rng)?;
            info!(test = %test.name, calls = collection.len(), "pre phase recorded");
        }
    }

    Ok(())
}
