use lpa_common::config::Configuration;
use lpa_common::error::{LpaError, LpaResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const KEY_MAX_ITERATIONS: &str = "lpa.max-iterations";
pub const KEY_PARALLELISM: &str = "lpa.parallelism";
pub const KEY_MODE: &str = "lpa.mode";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    pub job_id: String,
    pub name: String,
    pub mode: JobMode,
    pub graph: GraphSpec,
    pub algorithm: AlgorithmSpec,
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    #[serde(default)]
    pub output: Option<FileSource>,
}

fn default_parallelism() -> usize {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobMode {
    InMemory,
    Partitioned,
}

impl std::str::FromStr for JobMode {
    type Err = LpaError;

    fn from_str(s: &str) -> LpaResult<Self> {
        match s {
            "in_memory" | "in-memory" | "local" => Ok(JobMode::InMemory),
            "partitioned" => Ok(JobMode::Partitioned),
            other => Err(LpaError::InvalidArgument(format!("unknown mode {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSpec {
    /// Without a vertex file every edge endpoint becomes a vertex labelled
    /// with its own id.
    #[serde(default)]
    pub vertices: Option<FileSource>,
    pub edges: FileSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FileSource {
    Csv { path: String },
}

impl FileSource {
    pub fn path(&self) -> &str {
        match self {
            FileSource::Csv { path } => path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AlgorithmSpec {
    LabelPropagation { max_iterations: u64 },
}

impl AlgorithmSpec {
    pub fn max_iterations(&self) -> u64 {
        match self {
            AlgorithmSpec::LabelPropagation { max_iterations } => *max_iterations,
        }
    }
}

impl JobSpec {
    pub fn read_json(path: impl AsRef<Path>) -> LpaResult<Self> {
        let s = std::fs::read_to_string(path).map_err(LpaError::Io)?;
        serde_json::from_str(&s).map_err(|e| LpaError::InvalidArgument(format!("job spec: {e}")))
    }

    /// Overrides fields from `lpa.*` configuration keys.
    pub fn apply_configuration(&mut self, config: &Configuration) -> LpaResult<()> {
        if let Some(max_iterations) = config.get_u64(KEY_MAX_ITERATIONS)? {
            self.algorithm = AlgorithmSpec::LabelPropagation { max_iterations };
        }
        if let Some(parallelism) = config.get_usize(KEY_PARALLELISM)? {
            self.parallelism = parallelism;
        }
        if let Some(mode) = config.get(KEY_MODE) {
            self.mode = mode.parse()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> LpaResult<()> {
        if self.algorithm.max_iterations() == 0 {
            return Err(LpaError::InvalidArgument(
                "max_iterations must be positive".to_string(),
            ));
        }
        if self.parallelism == 0 {
            return Err(LpaError::InvalidArgument(
                "parallelism must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
