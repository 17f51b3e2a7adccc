//! JSON edge-list loader.
//!
//! The document lists concepts with their parent ids in any order:
//!
//! ```json
//! { "concepts": [ { "id": 2, "parents": [1], "label": "animal" }, { "id": 1 } ] }
//! ```
//!
//! Records are reordered root-first with Kahn's algorithm before insertion, so
//! parents always precede children. The resulting taxonomy is indexed.

use std::collections::{HashMap, VecDeque};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::taxonomy::{ConceptId, Taxonomy};

/// A taxonomy as a flat list of concept records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeListDocument {
    /// Every concept of the taxonomy.
    pub concepts: Vec<ConceptRecord>,
}

/// One concept and its direct parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptRecord {
    /// Concept id, unique in the document.
    pub id: ConceptId,
    /// Direct parents; empty for a root.
    #[serde(default)]
    pub parents: Vec<ConceptId>,
    /// Optional label stored as the vertex tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Positions of `records` in root-first order.
fn root_first_order(records: &[ConceptRecord]) -> anyhow::Result<Vec<usize>> {
    let mut position = HashMap::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        if position.insert(record.id, i).is_some() {
            bail!("duplicate concept id {}", record.id);
        }
    }

    let mut indegree = vec![0usize; records.len()];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    for (i, record) in records.iter().enumerate() {
        let mut seen = Vec::with_capacity(record.parents.len());
        for parent in &record.parents {
            let Some(&p) = position.get(parent) else {
                bail!("concept {} references unknown parent {parent}", record.id);
            };
            if !seen.contains(&p) {
                seen.push(p);
                children[p].push(i);
                indegree[i] += 1;
            }
        }
    }

    // Roots in document order for determinism.
    let mut queue: VecDeque<usize> = (0..records.len()).filter(|&i| indegree[i] == 0).collect();
    let mut order = Vec::with_capacity(records.len());
    while let Some(i) = queue.pop_front() {
        order.push(i);
        for &child in &children[i] {
            indegree[child] -= 1;
            if indegree[child] == 0 {
                queue.push_back(child);
            }
        }
    }

    if order.len() != records.len() {
        let stuck = indegree.iter().position(|&d| d > 0).map_or(0, |i| records[i].id);
        bail!("the is-a graph contains a cycle through concept {stuck}");
    }
    Ok(order)
}

/// Builds and indexes a taxonomy from a parsed document.
///
/// # Errors
/// Fails on duplicate ids, unknown parents, cycles and empty documents.
pub fn build_taxonomy(document: &EdgeListDocument) -> anyhow::Result<Taxonomy> {
    let order = root_first_order(&document.concepts).context("invalid taxonomy document")?;
    let mut taxonomy = Taxonomy::with_capacity(order.len());
    for i in order {
        let record = &document.concepts[i];
        let vertex = taxonomy
            .add_vertex(record.id, &record.parents)
            .with_context(|| format!("cannot insert concept {}", record.id))?;
        if let Some(label) = &record.label {
            taxonomy.set_tag(vertex, label.clone());
        }
    }
    taxonomy
        .compute_cached_attributes()
        .context("cannot index the taxonomy")?;

    crate::trace_debug!(
        vertices = taxonomy.vertex_count(),
        edges = taxonomy.edge_count(),
        "loaded taxonomy"
    );
    Ok(taxonomy)
}

/// Reads a JSON document from `reader` and builds the taxonomy.
///
/// # Errors
/// Fails on malformed JSON or an invalid taxonomy.
pub fn load_taxonomy<R: Read>(reader: R) -> anyhow::Result<Taxonomy> {
    let document: EdgeListDocument =
        serde_json::from_reader(reader).context("cannot parse taxonomy JSON")?;
    build_taxonomy(&document)
}

/// Parses a JSON document held in memory.
///
/// # Errors
/// Fails on malformed JSON or an invalid taxonomy.
pub fn from_json_str(json: &str) -> anyhow::Result<Taxonomy> {
    load_taxonomy(json.as_bytes())
}

/// Loads a JSON document from disk.
///
/// # Errors
/// Fails if the file cannot be opened, or on malformed JSON or an invalid taxonomy.
pub fn load_taxonomy_file(path: impl AsRef<Path>) -> anyhow::Result<Taxonomy> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    load_taxonomy(BufReader::new(file)).with_context(|| format!("cannot load {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaxonomyError;

    #[test]
    fn records_in_any_order_are_inserted_root_first() {
        let json = r#"{ "concepts": [
            { "id": 3, "parents": [2], "label": "dog" },
            { "id": 2, "parents": [1], "label": "animal" },
            { "id": 1 }
        ] }"#;
        let t = from_json_str(json).unwrap();
        assert!(t.is_indexed());
        assert_eq!(t.vertex_list().concept_ids(&t), vec![1, 2, 3]);
        let dog = t.require_concept(3).unwrap();
        assert_eq!(t.vertex(dog).tag(), Some("dog"));
        assert_eq!(t.vertex(dog).depth_min(), 2);
        assert_eq!(t.require_concept(9), Err(TaxonomyError::UnknownVertex(9)));
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let err = from_json_str(r#"{ "concepts": [ { "id": 1, "parents": [7] } ] }"#).unwrap_err();
        assert!(format!("{err:#}").contains("unknown parent 7"));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let err = from_json_str(r#"{ "concepts": [ { "id": 1 }, { "id": 1 } ] }"#).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate concept id 1"));
    }

    #[test]
    fn cycles_are_rejected() {
        let json = r#"{ "concepts": [
            { "id": 1 },
            { "id": 2, "parents": [1, 3] },
            { "id": 3, "parents": [2] }
        ] }"#;
        let err = from_json_str(json).unwrap_err();
        assert!(format!("{err:#}").contains("cycle"));
    }

    #[test]
    fn empty_document_cannot_be_indexed() {
        let err = from_json_str(r#"{ "concepts": [] }"#).unwrap_err();
        assert!(format!("{err:#}").contains("no vertices"));
        assert!(from_json_str("not json").is_err());
    }

    #[test]
    fn document_round_trips_through_serde() {
        let doc = EdgeListDocument {
            concepts: vec![
                ConceptRecord { id: 1, parents: vec![], label: None },
                ConceptRecord { id: 2, parents: vec![1], label: Some("leaf".into()) },
            ],
        };
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(serde_json::from_str::<EdgeListDocument>(&json).unwrap(), doc);
        assert_eq!(build_taxonomy(&doc).unwrap().edge_count(), 1);
    }
}
