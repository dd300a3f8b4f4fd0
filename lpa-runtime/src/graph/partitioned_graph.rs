use lpa_api::function::{MessagingFunction, VertexCentricAlgorithm, VertexUpdateFunction};
use lpa_api::graph::{IterationResult, VertexCentricGraph};
use lpa_api::message::MessageIterator;
use lpa_common::error::LpaResult;
use lpa_common::types::{Edge, Vertex, VertexKey};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;

use crate::graph::{ensure_edges_resolved, missing_vertex, OutboxContext, UpdateContext};
use crate::observability::record_superstep;

const ENGINE: &str = "partitioned";

/// Hash-partitioned engine. `run_algorithm` evaluates partitions in
/// parallel, each with its own pair of functions.
pub struct PartitionedGraph<K, VV, EV> {
    partitions: Vec<GraphPartition<K, VV, EV>>,
    all_edges: Vec<Edge<K, EV>>,
}

struct GraphPartition<K, VV, EV> {
    vertices: HashMap<K, VV>,
    adjacency: HashMap<K, Vec<Edge<K, EV>>>,
}

type Inbox<K, M> = HashMap<K, Vec<M>>;

struct PartitionFunctions<K, VV, EV, M> {
    update: Box<dyn VertexUpdateFunction<K, VV, M>>,
    messaging: Box<dyn MessagingFunction<K, VV, EV, M>>,
}

impl<K, VV, EV> PartitionedGraph<K, VV, EV>
where
    K: VertexKey,
    VV: Clone + PartialEq + Send + Sync + 'static,
    EV: Clone + Send + Sync + 'static,
{
    pub fn new(vertices: Vec<Vertex<K, VV>>, edges: Vec<Edge<K, EV>>, partitions: usize) -> Self {
        let partitions = partitions.max(1);
        let mut parts: Vec<GraphPartition<K, VV, EV>> = (0..partitions)
            .map(|_| GraphPartition {
                vertices: HashMap::new(),
                adjacency: HashMap::new(),
            })
            .collect();

        for v in vertices {
            let p = partition_of(&v.id, partitions);
            parts[p].vertices.insert(v.id, v.value);
        }

        for e in &edges {
            let p = partition_of(&e.src_id, partitions);
            parts[p]
                .adjacency
                .entry(e.src_id.clone())
                .or_default()
                .push(e.clone());
        }

        Self {
            partitions: parts,
            all_edges: edges,
        }
    }

    pub fn partitions(&self) -> usize {
        self.partitions.len()
    }

    pub fn vertex_value(&self, id: &K) -> Option<&VV> {
        self.partitions[partition_of(id, self.partitions.len())]
            .vertices
            .get(id)
    }

    fn ensure_resolved(&self) -> LpaResult<()> {
        ensure_edges_resolved(&self.all_edges, |k| self.vertex_value(k).is_some())
    }

    fn new_inboxes<M>(&self) -> Vec<Inbox<K, M>> {
        (0..self.partitions.len()).map(|_| HashMap::new()).collect()
    }

    /// Moves an outbox into the inbox of the partition owning each target.
    fn route<M>(&self, outbox: Vec<(K, M)>, inboxes: &mut [Inbox<K, M>]) -> LpaResult<usize> {
        let partitions = self.partitions.len();
        let mut routed = 0usize;
        for (target, msg) in outbox {
            let p = partition_of(&target, partitions);
            if !self.partitions[p].vertices.contains_key(&target) {
                return Err(missing_vertex(&target, "message target"));
            }
            inboxes[p].entry(target).or_default().push(msg);
            routed += 1;
        }
        Ok(routed)
    }

    /// Runs every partition with one shared function pair, one partition
    /// after the other.
    fn run_sequential<M>(
        &mut self,
        update_function: &mut dyn VertexUpdateFunction<K, VV, M>,
        messaging_function: &mut dyn MessagingFunction<K, VV, EV, M>,
        max_iterations: u64,
    ) -> LpaResult<(u64, bool)>
    where
        M: Clone + Send + Sync + 'static,
    {
        self.ensure_resolved()?;

        let mut superstep: u64 = 0;
        while superstep < max_iterations {
            superstep += 1;
            let started = Instant::now();

            let mut outbox: Vec<(K, M)> = Vec::new();
            messaging_function.pre_superstep(superstep);
            for part in &self.partitions {
                part.send_phase(&mut *messaging_function, superstep, &mut outbox);
            }
            messaging_function.post_superstep(superstep);

            let mut inboxes = self.new_inboxes();
            let msg_count = self.route(outbox, &mut inboxes)?;

            update_function.pre_superstep(superstep);
            let mut changed = 0usize;
            for (part, inbox) in self.partitions.iter_mut().zip(inboxes.iter_mut()) {
                changed += part.update_phase(&mut *update_function, superstep, inbox);
            }
            update_function.post_superstep(superstep);

            record_superstep(ENGINE, superstep, msg_count, changed, started.elapsed());
            if changed == 0 {
                return Ok((superstep, true));
            }
        }
        Ok((superstep, false))
    }

    fn run_parallel<M>(
        &mut self,
        functions: &mut [PartitionFunctions<K, VV, EV, M>],
        max_iterations: u64,
    ) -> LpaResult<(u64, bool)>
    where
        M: Clone + Send + Sync + 'static,
    {
        self.ensure_resolved()?;

        let mut superstep: u64 = 0;
        while superstep < max_iterations {
            superstep += 1;
            let started = Instant::now();

            let outboxes: Vec<Vec<(K, M)>> = self
                .partitions
                .par_iter()
                .zip(functions.par_iter_mut())
                .map(|(part, f)| {
                    let mut outbox = Vec::new();
                    f.messaging.pre_superstep(superstep);
                    part.send_phase(&mut *f.messaging, superstep, &mut outbox);
                    f.messaging.post_superstep(superstep);
                    outbox
                })
                .collect();

            let mut inboxes = self.new_inboxes();
            let mut msg_count = 0usize;
            for outbox in outboxes {
                msg_count += self.route(outbox, &mut inboxes)?;
            }

            let changed: usize = self
                .partitions
                .par_iter_mut()
                .zip(functions.par_iter_mut())
                .zip(inboxes.par_iter_mut())
                .map(|((part, f), inbox)| {
                    f.update.pre_superstep(superstep);
                    let changed = part.update_phase(&mut *f.update, superstep, inbox);
                    f.update.post_superstep(superstep);
                    changed
                })
                .sum();

            record_superstep(ENGINE, superstep, msg_count, changed, started.elapsed());
            if changed == 0 {
                return Ok((superstep, true));
            }
        }
        Ok((superstep, false))
    }
}

impl<K, VV, EV> GraphPartition<K, VV, EV>
where
    K: VertexKey,
    VV: Clone + PartialEq + Send + Sync + 'static,
    EV: Clone + Send + Sync + 'static,
{
    fn send_phase<M>(
        &self,
        messaging_function: &mut dyn MessagingFunction<K, VV, EV, M>,
        superstep: u64,
        outbox: &mut Vec<(K, M)>,
    ) where
        M: Clone + Send + Sync + 'static,
    {
        for (vertex_id, value) in &self.vertices {
            let edges = self
                .adjacency
                .get(vertex_id)
                .map(|v| v.as_slice())
                .unwrap_or(&[]);
            let mut ctx = OutboxContext::new(edges, outbox, superstep);
            messaging_function.send_messages(vertex_id, value, &mut ctx);
        }
    }

    /// Returns the number of vertices whose value changed.
    fn update_phase<M>(
        &mut self,
        update_function: &mut dyn VertexUpdateFunction<K, VV, M>,
        superstep: u64,
        inbox: &mut Inbox<K, M>,
    ) -> usize
    where
        M: Clone + Send + Sync + 'static,
    {
        let mut changed = 0usize;
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
        changed
    }
}

fn partition_of<K: std::hash::Hash>(k: &K, partitions: usize) -> usize {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::Hasher;
    let mut h = DefaultHasher::new();
    k.hash(&mut h);
    (h.finish() as usize) % partitions
}

impl<K, VV, EV> VertexCentricGraph<K, VV, EV> for PartitionedGraph<K, VV, EV>
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
            self.run_sequential(&mut update_function, &mut messaging_function, max_iterations)?;
        tracing::info!(
            engine = ENGINE,
            partitions = self.partitions.len(),
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

    fn run_algorithm<M, A>(mut self, algorithm: &A) -> LpaResult<IterationResult<Self>>
    where
        A: VertexCentricAlgorithm<K, VV, EV, M>,
        M: Clone + Send + Sync + 'static,
    {
        let mut functions: Vec<PartitionFunctions<K, VV, EV, M>> = (0..self.partitions.len())
            .map(|_| PartitionFunctions {
                update: algorithm.create_update_function(),
                messaging: algorithm.create_messaging_function(),
            })
            .collect();

        let (supersteps, converged) =
            self.run_parallel(&mut functions, algorithm.max_iterations())?;
        tracing::info!(
            engine = ENGINE,
            algorithm = algorithm.name(),
            partitions = self.partitions.len(),
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
        let mut out: Vec<Vertex<K, VV>> = self
            .partitions
            .iter()
            .flat_map(|p| {
                p.vertices.iter().map(|(k, v)| Vertex {
                    id: k.clone(),
                    value: v.clone(),
                })
            })
            .collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }

    fn edges(&self) -> Vec<Edge<K, EV>> {
        self.all_edges.clone()
    }
}
