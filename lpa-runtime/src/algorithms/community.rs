use lpa_common::types::{Label, Vertex, VertexKey};
use std::collections::BTreeMap;

/// Groups vertex ids by label. Members of each community are sorted.
pub fn communities<K: VertexKey>(vertices: &[Vertex<K, Label>]) -> BTreeMap<Label, Vec<K>> {
    let mut out: BTreeMap<Label, Vec<K>> = BTreeMap::new();
    for v in vertices {
        out.entry(v.value).or_default().push(v.id.clone());
    }
    for members in out.values_mut() {
        members.sort();
    }
    out
}

pub fn community_count<K>(vertices: &[Vertex<K, Label>]) -> usize {
    let mut labels: Vec<Label> = vertices.iter().map(|v| v.value).collect();
    labels.sort_unstable();
    labels.dedup();
    labels.len()
}
