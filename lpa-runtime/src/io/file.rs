use lpa_common::error::{LpaError, LpaResult};
use lpa_common::types::{Edge, Label, Vertex};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

fn reader(path: impl AsRef<Path>) -> LpaResult<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(|e| LpaError::Io(e.into()))
}

fn parse_field<T>(rec: &csv::StringRecord, index: usize, what: &str) -> LpaResult<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    rec.get(index)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<T>())
        .transpose()
        .map_err(|e| LpaError::InvalidArgument(format!("{what} parse: {e}")))
}

fn required_field<T>(rec: &csv::StringRecord, index: usize, what: &str) -> LpaResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    parse_field(rec, index, what)?
        .ok_or_else(|| LpaError::InvalidArgument(format!("{what} missing")))
}

/// Reads `id[,label]` rows. A vertex without a label starts with its own id.
pub fn read_labeled_vertices(path: impl AsRef<Path>) -> LpaResult<Vec<Vertex<i64, Label>>> {
    let mut rdr = reader(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec.map_err(|e| LpaError::Internal(format!("csv read: {e}")))?;
        let id: i64 = required_field(&rec, 0, "vertex id")?;
        let label: Label = parse_field(&rec, 1, "vertex label")?.unwrap_or(id);
        out.push(Vertex::new(id, label));
    }
    Ok(out)
}

/// Reads `src,target` rows into unweighted directed edges. Extra columns are
/// ignored.
pub fn read_edges<K>(path: impl AsRef<Path>) -> LpaResult<Vec<Edge<K, ()>>>
where
    K: FromStr,
    K::Err: Display,
{
    let mut rdr = reader(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec.map_err(|e| LpaError::Internal(format!("csv read: {e}")))?;
        let src: K = required_field(&rec, 0, "edge src")?;
        let target: K = required_field(&rec, 1, "edge target")?;
        out.push(Edge::unweighted(src, target));
    }
    Ok(out)
}

/// Every edge endpoint as a vertex labelled with its own id.
pub fn vertices_from_edges<EV>(edges: &[Edge<i64, EV>]) -> Vec<Vertex<i64, Label>> {
    let ids: BTreeSet<i64> = edges
        .iter()
        .flat_map(|e| [e.src_id, e.target_id])
        .collect();
    ids.into_iter().map(|id| Vertex::new(id, id)).collect()
}

/// Writes `id,label` rows.
pub fn write_labels<K: Display>(
    path: impl AsRef<Path>,
    vertices: &[Vertex<K, Label>],
) -> LpaResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| LpaError::Io(e.into()))?;
    for v in vertices {
        wtr.write_record([v.id.to_string(), v.value.to_string()])
            .map_err(|e| LpaError::Internal(format!("csv write: {e}")))?;
    }
    wtr.flush()?;
    Ok(())
}
