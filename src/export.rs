//! Node-link JSON export.
//!
//! The document shape is the common node-link interchange layout read by
//! graph tools such as networkx's `node_link_graph`:
//!
//! ```json
//! {
//!   "directed": true,
//!   "nodes": [{ "id": "control", "tokens": ["control"], "real_label": true,
//!               "weight": 1, "ancestor_support": 2 }],
//!   "links": [{ "source": "access control", "target": "control" }]
//! }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{HierarchyError, Result};
use crate::graph::hierarchy::HierarchyGraph;
use crate::types::{Ngram, NodeAttrs};

/// One node with its attributes; `id` is the space-joined n-gram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub tokens: Ngram,
    pub real_label: bool,
    pub weight: u64,
    pub ancestor_support: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub source: String,
    pub target: String,
}

/// Serializable node-link view of a [`HierarchyGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLinkGraph {
    pub directed: bool,
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
}

impl From<&HierarchyGraph> for NodeLinkGraph {
    fn from(graph: &HierarchyGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|(ngram, attrs)| NodeRecord::new(ngram, attrs))
            .collect();
        let links = graph
            .edges()
            .map(|(from, to)| LinkRecord {
                source: from.text(),
                target: to.text(),
            })
            .collect();

        Self {
            directed: true,
            nodes,
            links,
        }
    }
}

impl NodeRecord {
    fn new(ngram: &Ngram, attrs: &NodeAttrs) -> Self {
        Self {
            id: ngram.text(),
            tokens: ngram.clone(),
            real_label: attrs.real_label,
            weight: attrs.weight,
            ancestor_support: attrs.ancestor_support,
        }
    }
}

impl NodeLinkGraph {
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the document followed by a newline
    pub fn write_json<W: Write>(&self, mut writer: W, pretty: bool) -> Result<()> {
        if pretty {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_json::to_writer(&mut writer, self)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_to_path(&self, path: impl AsRef<Path>, pretty: bool) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| HierarchyError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_json(BufWriter::new(file), pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(words: &str) -> Ngram {
        Ngram::from_phrase(words)
    }

    fn sample() -> HierarchyGraph {
        let mut graph = HierarchyGraph::new();
        graph.add_node(g("quality control"), NodeAttrs::real(1));
        graph.add_node(g("access control"), NodeAttrs::real(1));
        graph.add_node(
            g("control"),
            NodeAttrs {
                real_label: true,
                weight: 1,
                ancestor_support: 2,
            },
        );
        graph.add_edge(g("quality control"), g("control"));
        graph.add_edge(g("access control"), g("control"));
        graph
    }

    #[test]
    fn test_node_link_shape() {
        let doc = NodeLinkGraph::from(&sample());
        assert!(doc.directed);

        let ids: Vec<&str> = doc.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["access control", "control", "quality control"]);
        assert_eq!(doc.nodes[1].ancestor_support, 2);
        assert_eq!(
            doc.links,
            vec![
                LinkRecord {
                    source: "access control".into(),
                    target: "control".into(),
                },
                LinkRecord {
                    source: "quality control".into(),
                    target: "control".into(),
                },
            ]
        );
    }

    #[test]
    fn test_json_fields() {
        let json = NodeLinkGraph::from(&sample()).to_json_string(false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["directed"], true);
        assert_eq!(value["nodes"][0]["tokens"], serde_json::json!(["access", "control"]));
        assert_eq!(value["nodes"][0]["real_label"], true);
        assert_eq!(value["links"][0]["target"], "control");
    }

    #[test]
    fn test_write_json_appends_newline() {
        let mut buf = Vec::new();
        NodeLinkGraph::from(&HierarchyGraph::new())
            .write_json(&mut buf, false)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "{\"directed\":true,\"nodes\":[],\"links\":[]}\n");
    }
}
