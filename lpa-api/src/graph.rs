use crate::function::{MessagingFunction, VertexCentricAlgorithm, VertexUpdateFunction};
use lpa_common::error::LpaResult;
pub use lpa_common::types::{Edge, Vertex};

/// Outcome of a vertex-centric iteration.
#[derive(Debug, Clone)]
pub struct IterationResult<G> {
    pub graph: G,
    /// Number of supersteps actually executed.
    pub supersteps: u64,
    /// `true` when the run stopped because no vertex value changed,
    /// `false` when the iteration budget ran out first.
    pub converged: bool,
}

/// A graph that can drive vertex-centric iterations over itself.
///
/// Each superstep runs the messaging function for every vertex on the values
/// committed at the start of the superstep, delivers the messages, then runs
/// the update function for every vertex with the messages addressed to it.
/// The run halts after a superstep in which no value changed or after
/// `max_iterations` supersteps.
pub trait VertexCentricGraph<K, VV, EV>: Sized {
    fn run_vertex_centric_iteration<M, U, S>(
        self,
        update_function: U,
        messaging_function: S,
        max_iterations: u64,
    ) -> LpaResult<IterationResult<Self>>
    where
        U: VertexUpdateFunction<K, VV, M>,
        S: MessagingFunction<K, VV, EV, M>,
        M: Clone + Send + Sync + 'static;

    fn run_algorithm<M, A>(self, algorithm: &A) -> LpaResult<IterationResult<Self>>
    where
        A: VertexCentricAlgorithm<K, VV, EV, M>,
        M: Clone + Send + Sync + 'static;

    fn vertices(&self) -> Vec<Vertex<K, VV>>;

    fn edges(&self) -> Vec<Edge<K, EV>>;
}
