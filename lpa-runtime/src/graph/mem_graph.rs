use lpa_api::function::{MessagingFunction, VertexCentricAlgorithm, VertexUpdateFunction};
use lpa_api::graph::{IterationResult, VertexCentricGraph};
use lpa_api::message::MessageIterator;
use lpa_common::error::LpaResult;
use lpa_common::types::{Edge, Vertex, VertexKey};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::graph::{ensure_edges_resolved, missing_vertex, OutboxContext, UpdateContext};
use crate::observability::record_superstep;

const ENGINE: &str = "in_memory";

/// Single-threaded engine. Vertices are visited in key order, which makes
/// runs reproducible.
pub struct InMemoryGraph<K, VV, EV> {
    vertices: BTreeMap<K, VV>,
    edges: Vec<Edge<K, EV>>,
    adjacency: BTreeMap<K, Vec<Edge<K, EV>>>,
}

impl<K, VV, EV> InMemoryGraph<K, VV, EV>
where
    K: VertexKey,
    VV: Clone + PartialEq + Send + Sync + 'static,
    EV: Clone + Send + Sync + 'static,
{
    pub fn new(vertices: Vec<Vertex<K, VV>>, edges: Vec<Edge<K, EV>>) -> Self {
        let mut v_map = BTreeMap::new();
        for v in vertices {
            v_map.insert(v.id, v.value);
        }
        let mut adjacency: BTreeMap<K, Vec<Edge<K, EV>>> = BTreeMap::new();
        for e in &edges {
            adjacency
                .entry(e.src_id.clone())
                .or_default()
                .push(e.clone());
        }
        Self {
            vertices: v_map,
            adjacency,
            edges,
        }
    }

    pub fn vertex_value(&self, id: &K) -> Option<&VV> {
        self.vertices.get(id)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn run_supersteps<M>(
        &mut self,
        update_function: &mut dyn VertexUpdateFunction<K, VV, M>,
        messaging_function: &mut dyn MessagingFunction<K, VV, EV, M>,
        max_iterations: u64,
    ) -> LpaResult<(u64, bool)>
    where
        M: Clone + Send + Sync + 'static,
    {
        ensure_edges_resolved(&self.edges, |k| self.vertices.contains_key(k))?;

        let mut superstep: u64 = 0;
        while superstep < max_iterations {
            superstep += 1;
            let started = Instant::now();

            let mut outbox: Vec<(K, M)> = Vec::new();
            messaging_function.pre_superstep(superstep);
            for (vertex_id, value) in &self.vertices {
                let edges = self
                    .adjacency
                    .get(vertex_id)
                    .map(|v| v.as_slice())
                    .unwrap_or(&[]);
                let mut ctx = OutboxContext::new(edges, &mut outbox, superstep);
                messaging_function.send_messages(vertex_id, value, &mut ctx);
            }
            messaging_function.post_superstep(superstep);

            let msg_count = outbox.len();
            let mut inbox: BTreeMap<K, Vec<M>> = BTreeMap::new();
            for (target, msg) in outbox {
                if !self.vertices.contains_key(&target) {
                    return Err(missing_vertex(&target, "message target"));
                }
                inbox.entry(target).or_default().push(msg);
            }

            let mut changed = 0usize;
            update_function.pre_superstep(superstep);
            for (vertex_id, value) in self.vertices.iter_mut() {
                let msgs = inbox.remove(vertex_id).unwrap_or_default();
                let mut ctx = UpdateContext::new(superstep);
                let messages = MessageIterator::new(msgs);
                update_function.update_vertex(vertex_id, value, messages, &mut ctx);
                if let Some(new_value) = ctx.into_new_value() {
                    if new_value != *value {
                        *value = new_value;
                        changed += 1;
                    }
                }
            }
            update_function.post_superstep(superstep);

            record_superstep(ENGINE, superstep, msg_count, changed, started.elapsed());
            if changed == 0 {
                return Ok((superstep, true));
            }
        }
        Ok((superstep, false))
    }
}

impl<K, VV, EV> VertexCentricGraph<K, VV, EV> for InMemoryGraph<K, VV, EV>
where
    K: VertexKey,
    VV: Clone + PartialEq + Send + Sync + 'static,
    EV: Clone + Send + Sync + 'static,
{
    fn run_vertex_centric_iteration<M, U, S>(
        mut self,
        mut update_function: U,
        mut messaging_function: S,
        max_iterations: u64,
    ) -> LpaResult<IterationResult<Self>>
    where
        U: VertexUpdateFunction<K, VV, M>,
        S: MessagingFunction<K, VV, EV, M>,
        M: Clone + Send + Sync + 'static,
    {
        let (supersteps, converged) =
            self.run_supersteps(&mut update_function, &mut messaging_function, max_iterations)?;
        tracing::info!(engine = ENGINE, supersteps, converged, "iteration finished");
        Ok(IterationResult {
            graph: self,
            supersteps,
            converged,
        })
    }

    fn run_algorithm<M, A>(mut self, algorithm: &A) -> LpaResult<IterationResult<Self>>
    where
        A: VertexCentricAlgorithm<K, VV, EV, M>,
        M: Clone + Send + Sync + 'static,
    {
        let mut update_function = algorithm.create_update_function();
        let mut messaging_function = algorithm.create_messaging_function();
        let (supersteps, converged) = self.run_supersteps(
            &mut *update_function,
            &mut *messaging_function,
            algorithm.max_iterations(),
        )?;
        tracing::info!(
            engine = ENGINE,
            algorithm = algorithm.name(),
            supersteps,
            converged,
            "iteration finished"
        );
        Ok(IterationResult {
            graph: self,
            supersteps,
            converged,
        })
    }

    fn vertices(&self) -> Vec<Vertex<K, VV>> {
        self.vertices
            .iter()
            .map(|(k, v)| Vertex::new(k.clone(), v.clone()))
            .collect()
    }

    fn edges(&self) -> Vec<Edge<K, EV>> {
        self.edges.clone()
    }
}
