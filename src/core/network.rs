use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::projection::{SkippedPoint, report_skipped};
use crate::core::{DataValue, ProjectedPoint, ResolvedScale};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_NODE_RADIUS: f64 = 6.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub x: DataValue,
    pub y: DataValue,
    /// Radius in pixels; falls back to the projection default.
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, String>,
}

impl Node {
    #[must_use]
    pub fn new(id: impl Into<String>, x: impl Into<DataValue>, y: impl Into<DataValue>) -> Self {
        Self {
            id: id.into(),
            x: x.into(),
            y: y.into(),
            size: None,
            label: None,
            metadata: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl Link {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: None,
        }
    }
}

/// Node-link diagram data with positions already laid out in data space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeGeometry {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkGeometry {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NetworkGeometry {
    pub nodes: Vec<NodeGeometry>,
    pub links: Vec<LinkGeometry>,
    pub skipped_nodes: Vec<SkippedPoint>,
    pub skipped_links: Vec<SkippedPoint>,
}

impl NetworkGeometry {
    /// Node centres, for hit-testing with the tooltip coordinator.
    #[must_use]
    pub fn hit_points(&self) -> Vec<ProjectedPoint> {
        self.nodes
            .iter()
            .map(|node| ProjectedPoint::new(node.x, node.y, node.index))
            .collect()
    }
}

/// Projects nodes and links. Links whose endpoints are unknown or could not
/// be placed are skipped; duplicate node ids are a configuration error.
pub fn project_network(
    graph: &Graph,
    x_scale: &ResolvedScale,
    y_scale: &ResolvedScale,
    default_radius: f64,
) -> ChartResult<NetworkGeometry> {
    if !default_radius.is_finite() || default_radius <= 0.0 {
        return Err(ChartError::config(format!(
            "node radius must be finite and > 0, got {default_radius}"
        )));
    }

    let mut by_id: IndexMap<&str, Option<usize>> = IndexMap::with_capacity(graph.nodes.len());
    let mut geometry = NetworkGeometry::default();

    for (index, node) in graph.nodes.iter().enumerate() {
        if by_id.contains_key(node.id.as_str()) {
            return Err(ChartError::config(format!(
                "duplicate node id `{}`",
                node.id
            )));
        }
        let placed = x_scale
            .map_center(&node.x)
            .zip(y_scale.map_center(&node.y));
        match placed {
            Some((x, y)) => {
                by_id.insert(node.id.as_str(), Some(geometry.nodes.len()));
                geometry.nodes.push(NodeGeometry {
                    x,
                    y,
                    radius: node
                        .size
                        .filter(|size| size.is_finite() && *size > 0.0)
                        .unwrap_or(default_radius),
                    index,
                });
            }
            None => {
                by_id.insert(node.id.as_str(), None);
                geometry.skipped_nodes.push(SkippedPoint {
                    index,
                    error: ChartError::skipped(
                        index,
                        format!("node `{}` is outside the scale domains", node.id),
                    ),
                });
            }
        }
    }

    for (index, link) in graph.links.iter().enumerate() {
        let endpoint = |id: &str| by_id.get(id).copied().flatten();
        match (endpoint(&link.source), endpoint(&link.target)) {
            (Some(source), Some(target)) => {
                let (x1, y1) = (geometry.nodes[source].x, geometry.nodes[source].y);
                let (x2, y2) = (geometry.nodes[target].x, geometry.nodes[target].y);
                geometry.links.push(LinkGeometry {
                    x1,
                    y1,
                    x2,
                    y2,
                    index,
                });
            }
            _ => geometry.skipped_links.push(SkippedPoint {
                index,
                error: ChartError::skipped(
                    index,
                    format!(
                        "link `{}` -> `{}` references a missing node",
                        link.source, link.target
                    ),
                ),
            }),
        }
    }

    report_skipped(&geometry.skipped_nodes);
    report_skipped(&geometry.skipped_links);
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_NODE_RADIUS, Graph, Link, Node, project_network};
    use crate::core::{ScaleConfig, resolve};

    fn scales() -> (crate::core::ResolvedScale, crate::core::ResolvedScale) {
        (
            resolve(&ScaleConfig::linear(0.0, 10.0).with_range(0.0, 100.0)).expect("x"),
            resolve(&ScaleConfig::linear(0.0, 10.0).with_range(100.0, 0.0)).expect("y"),
        )
    }

    #[test]
    fn links_to_unknown_nodes_are_skipped() {
        let (x, y) = scales();
        let graph = Graph {
            nodes: vec![Node::new("a", 0.0, 0.0), Node::new("b", 10.0, 10.0).with_size(3.0)],
            links: vec![Link::new("a", "b"), Link::new("a", "ghost")],
        };

        let geometry = project_network(&graph, &x, &y, DEFAULT_NODE_RADIUS).expect("network");
        assert_eq!(geometry.nodes.len(), 2);
        assert_eq!(geometry.nodes[1].radius, 3.0);
        assert_eq!(geometry.links.len(), 1);
        assert_eq!(
            (geometry.links[0].x1, geometry.links[0].y1, geometry.links[0].x2, geometry.links[0].y2),
            (0.0, 100.0, 100.0, 0.0)
        );
        assert_eq!(geometry.skipped_links.len(), 1);
        assert_eq!(geometry.skipped_links[0].index, 1);
    }

    #[test]
    fn duplicate_node_ids_are_rejected() {
        let (x, y) = scales();
        let graph = Graph {
            nodes: vec![Node::new("a", 0.0, 0.0), Node::new("a", 1.0, 1.0)],
            links: Vec::new(),
        };
        assert!(project_network(&graph, &x, &y, DEFAULT_NODE_RADIUS).is_err());
    }
}
