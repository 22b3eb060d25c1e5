//! Evaluate a [`GApPredictor`] against a text trace.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gapsim::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Benchmark name; the trace is read from `<benchmark>.trace`
    benchmark: String,

    /// Width of the global history register in bits (m)
    m: u32,

    /// Number of PC bits used to select a pattern history table (p)
    p: u32,

    /// Width of each saturating counter in bits (n)
    n: u32,

    /// Stop at the first malformed trace line instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Print the N most frequent branches with a low hit rate
    #[arg(long, value_name = "N", default_value_t = 0)]
    top: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn trace_path(benchmark: &str) -> PathBuf {
    if benchmark.ends_with(".trace") {
        PathBuf::from(benchmark)
    } else {
        PathBuf::from(format!("{}.trace", benchmark))
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
    } else {
        env_logger::init();
    }

    let cfg = GApConfig::new(args.m, args.p, args.n);
    let mut sim = Simulator::new(cfg).context("invalid predictor configuration")?;

    let path = trace_path(&args.benchmark);
    let reader = TraceReader::from_file(&path)
        .with_context(|| format!("invalid trace file {}", path.display()))?;
    println!("Opened file {} for reading", path.display());
    println!("m={} p={} n={}", args.m, args.p, args.n);

    let policy = if args.strict { ErrorPolicy::Abort } else { ErrorPolicy::Skip };
    sim.run(reader, policy)
        .with_context(|| format!("failed to replay {}", path.display()))?;

    let summary = sim.summary();
    for op in BranchOp::ALL {
        log::info!("{}: {} events", op.mnemonic(), summary.count(op));
    }
    if summary.skipped > 0 {
        log::warn!("skipped {} malformed lines", summary.skipped);
    }

    let stats = sim.stats();
    println!("Read {} entries", stats.reads());
    println!("Misprediction rate: {:.2}%", stats.misprediction_rate());

    if args.top > 0 {
        println!("Unique branches: {}", stats.num_unique_branches());
        println!("Low hit-rate branches:");
        for (pc, data) in stats.get_low_rate_branches(args.top) {
            println!("  {:08x} {:8}/{:8} {:.4} {}",
                pc, data.hits, data.occ, data.hit_rate(), data.bias()
            );
        }
    }
    Ok(())
}
