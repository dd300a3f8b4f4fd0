use clap::{Parser, ValueEnum};
use lpa_common::config::Configuration;
use lpa_runtime::job::run_job;
use lpa_runtime::observability::{init_prometheus, init_tracing};
use lpa_runtime::plan::job_spec::{AlgorithmSpec, FileSource, GraphSpec, JobMode, JobSpec};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Mode {
    InMemory,
    Partitioned,
}

#[derive(Debug, Parser)]
#[command(about = "Detect communities with label propagation")]
struct Args {
    /// JSON job spec; flags below are ignored except --conf overrides.
    #[arg(long)]
    job: Option<PathBuf>,

    /// CSV of `id[,label]` rows. Defaults to every edge endpoint labelled by id.
    #[arg(long)]
    vertices: Option<String>,

    /// CSV of `src,target` rows.
    #[arg(long, required_unless_present = "job")]
    edges: Option<String>,

    #[arg(long, default_value_t = 20)]
    max_iterations: u64,

    #[arg(long, value_enum, default_value_t = Mode::InMemory)]
    mode: Mode,

    #[arg(long, default_value_t = 4)]
    parallelism: usize,

    /// Write `id,label` rows here instead of stdout.
    #[arg(long)]
    output: Option<String>,

    /// Configuration overrides, e.g. `lpa.max-iterations=50`.
    #[arg(long = "conf", value_name = "KEY=VALUE")]
    conf: Vec<String>,

    #[arg(long)]
    dry_run: bool,

    #[arg(long)]
    metrics_listen: Option<SocketAddr>,
}

fn new_job_id() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    format!("lpa_{nanos}")
}

fn build_job_spec(args: &Args) -> anyhow::Result<JobSpec> {
    if let Some(path) = &args.job {
        return Ok(JobSpec::read_json(path)?);
    }
    let edges = args
        .edges
        .clone()
        .ok_or_else(|| anyhow::anyhow!("--edges is required without --job"))?;
    Ok(JobSpec {
        job_id: new_job_id(),
        name: "label_propagation".to_string(),
        mode: match args.mode {
            Mode::InMemory => JobMode::InMemory,
            Mode::Partitioned => JobMode::Partitioned,
        },
        graph: GraphSpec {
            vertices: args
                .vertices
                .clone()
                .map(|path| FileSource::Csv { path }),
            edges: FileSource::Csv { path: edges },
        },
        algorithm: AlgorithmSpec::LabelPropagation {
            max_iterations: args.max_iterations,
        },
        parallelism: args.parallelism,
        output: args.output.clone().map(|path| FileSource::Csv { path }),
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();
    if let Some(addr) = args.metrics_listen {
        init_prometheus(addr)?;
    }

    let mut job = build_job_spec(&args)?;
    let mut config = Configuration::new();
    for pair in &args.conf {
        config.put_pair(pair)?;
    }
    job.apply_configuration(&config)?;
    job.validate()?;

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&job)?);
        return Ok(());
    }

    let report = run_job(&job)?;
    if job.output.is_none() {
        for v in &report.labels {
            println!("{},{}", v.id, v.value);
        }
    }
    eprintln!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
