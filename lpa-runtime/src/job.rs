use lpa_api::graph::{IterationResult, VertexCentricGraph};
use lpa_common::error::LpaResult;
use lpa_common::types::{Edge, Label, Vertex};
use serde::Serialize;

use crate::algorithms::community::community_count;
use crate::algorithms::label_propagation::LabelPropagation;
use crate::graph::mem_graph::InMemoryGraph;
use crate::graph::partitioned_graph::PartitionedGraph;
use crate::io::file::{read_edges, read_labeled_vertices, vertices_from_edges, write_labels};
use crate::plan::job_spec::{JobMode, JobSpec};

#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub job_id: String,
    pub vertices: usize,
    pub edges: usize,
    pub supersteps: u64,
    pub converged: bool,
    pub communities: usize,
    #[serde(skip)]
    pub labels: Vec<Vertex<i64, Label>>,
}

/// Loads the graph described by `job`, runs label propagation on the
/// selected engine and writes the labels when an output is configured.
pub fn run_job(job: &JobSpec) -> LpaResult<JobReport> {
    job.validate()?;

    let edges: Vec<Edge<i64, ()>> = read_edges(job.graph.edges.path())?;
    let vertices = match &job.graph.vertices {
        Some(source) => read_labeled_vertices(source.path())?,
        None => vertices_from_edges(&edges),
    };
    let vertex_count = vertices.len();
    let edge_count = edges.len();
    tracing::info!(
        job_id = %job.job_id,
        vertices = vertex_count,
        edges = edge_count,
        mode = ?job.mode,
        "graph loaded"
    );

    let algorithm = LabelPropagation::new(job.algorithm.max_iterations());
    let (labels, supersteps, converged) = match job.mode {
        JobMode::InMemory => {
            let graph = InMemoryGraph::new(vertices, edges);
            unpack(algorithm.run_with_summary(graph)?)
        }
        JobMode::Partitioned => {
            let graph = PartitionedGraph::new(vertices, edges, job.parallelism);
            unpack(algorithm.run_with_summary(graph)?)
        }
    };

    if let Some(output) = &job.output {
        write_labels(output.path(), &labels)?;
        tracing::info!(path = output.path(), "labels written");
    }

    Ok(JobReport {
        job_id: job.job_id.clone(),
        vertices: vertex_count,
        edges: edge_count,
        supersteps,
        converged,
        communities: community_count(&labels),
        labels,
    })
}

fn unpack<G>(result: IterationResult<G>) -> (Vec<Vertex<i64, Label>>, u64, bool)
where
    G: VertexCentricGraph<i64, Label, ()>,
{
    (result.graph.vertices(), result.supersteps, result.converged)
}
