use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Community identifier propagated between vertices.
pub type Label = i64;

/// Bounds every vertex key must satisfy. The total order is used for
/// deterministic engine bookkeeping, the hash for partitioning.
pub trait VertexKey: Ord + Hash + Clone + Debug + Send + Sync + 'static {}
impl<T> VertexKey for T where T: Ord + Hash + Clone + Debug + Send + Sync + 'static {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Vertex<K, VV> {
    pub id: K,
    pub value: VV,
}

impl<K, VV> Vertex<K, VV> {
    pub fn new(id: K, value: VV) -> Self {
        Self { id, value }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge<K, EV> {
    pub src_id: K,
    pub target_id: K,
    pub value: EV,
}

impl<K, EV> Edge<K, EV> {
    pub fn new(src_id: K, target_id: K, value: EV) -> Self {
        Self {
            src_id,
            target_id,
            value,
        }
    }
}

impl<K> Edge<K, ()> {
    /// Edge without a payload, as used by unweighted algorithms.
    pub fn unweighted(src_id: K, target_id: K) -> Self {
        Self::new(src_id, target_id, ())
    }
}
