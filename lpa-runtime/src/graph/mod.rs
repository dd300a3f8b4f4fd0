pub mod mem_graph;
pub mod partitioned_graph;

use lpa_api::function::{MessagingContext, VertexUpdateContext};
use lpa_common::error::{LpaError, LpaResult};
use lpa_common::types::{Edge, VertexKey};

/// Collects the value set by an update function for one vertex.
pub(crate) struct UpdateContext<VV> {
    new_value: Option<VV>,
    superstep: u64,
}

impl<VV> UpdateContext<VV> {
    pub(crate) fn new(superstep: u64) -> Self {
        Self {
            new_value: None,
            superstep,
        }
    }

    pub(crate) fn into_new_value(self) -> Option<VV> {
        self.new_value
    }
}

impl<VV> VertexUpdateContext<VV> for UpdateContext<VV> {
    fn set_new_vertex_value(&mut self, value: VV) {
        self.new_value = Some(value);
    }

    fn superstep(&self) -> u64 {
        self.superstep
    }
}

/// Buffers the messages one vertex sends during the messaging phase.
pub(crate) struct OutboxContext<'a, K, EV, M> {
    edges: &'a [Edge<K, EV>],
    outbox: &'a mut Vec<(K, M)>,
    superstep: u64,
}

impl<'a, K, EV, M> OutboxContext<'a, K, EV, M> {
    pub(crate) fn new(
        edges: &'a [Edge<K, EV>],
        outbox: &'a mut Vec<(K, M)>,
        superstep: u64,
    ) -> Self {
        Self {
            edges,
            outbox,
            superstep,
        }
    }
}

impl<'a, K, EV, M> MessagingContext<K, EV, M> for OutboxContext<'a, K, EV, M>
where
    K: Clone,
    M: Clone,
{
    fn send_message_to(&mut self, target_id: K, message: M) {
        self.outbox.push((target_id, message));
    }

    fn send_message_to_all_neighbors(&mut self, message: M) {
        for e in self.edges {
            self.outbox.push((e.target_id.clone(), message.clone()));
        }
    }

    fn out_edges(&self) -> Box<dyn Iterator<Item = &Edge<K, EV>> + '_> {
        Box::new(self.edges.iter())
    }

    fn superstep(&self) -> u64 {
        self.superstep
    }
}

/// Every edge endpoint must carry a vertex value before the first superstep.
pub(crate) fn ensure_edges_resolved<K, EV>(
    edges: &[Edge<K, EV>],
    has_vertex: impl Fn(&K) -> bool,
) -> LpaResult<()>
where
    K: VertexKey,
{
    for e in edges {
        if !has_vertex(&e.src_id) {
            return Err(missing_vertex(&e.src_id, "edge source"));
        }
        if !has_vertex(&e.target_id) {
            return Err(missing_vertex(&e.target_id, "edge target"));
        }
    }
    Ok(())
}

pub(crate) fn missing_vertex<K: VertexKey>(id: &K, role: &str) -> LpaError {
    LpaError::MissingVertexValue(format!("{role} {id:?} has no vertex value"))
}
