use crate::Id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// A learning roadmap. `nodes` is only populated by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub creator_id: Id,
    #[serde(default)]
    pub nodes: Vec<RoadmapNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadmapUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =========================================================
// Nodes and connections
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapNode {
    pub id: Id,
    pub roadmap_id: Id,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    pub level: NodeLevel,
    pub position_x: i32,
    pub position_y: i32,
    pub order_index: i32,
    pub is_completed: bool,
}

/// Unset fields fall back to the server defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<NodeLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<NodeLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl NodeUpdate {
    pub fn completed(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Default::default()
        }
    }
}

/// Directed prerequisite edge `from_node_id -> to_node_id`.
///
/// Self-loops and duplicates are rejected (or not) by the server only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConnection {
    pub id: Id,
    pub from_node_id: Id,
    pub to_node_id: Id,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConnectionCreate {
    pub from_node_id: Id,
    pub to_node_id: Id,
}

// =========================================================
// Text-driven import
// =========================================================

/// Roadmap described as plain data, e.g. pasted JSON from an external tool.
///
/// `order` identifies a node inside the import; `prerequisites` refer to
/// other nodes by that `order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapImport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub nodes: Vec<ImportedNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedNode {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub level: NodeLevel,
    pub order: i32,
    #[serde(default)]
    pub prerequisites: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_roadmap_has_no_nodes() {
        let roadmap: Roadmap = serde_json::from_value(json!({
            "id": 1,
            "title": "Rust",
            "description": null,
            "creator_id": 7
        }))
        .unwrap();
        assert!(roadmap.nodes.is_empty());
        assert_eq!(roadmap.description, None);
    }

    #[test]
    fn completion_patch_carries_only_the_flag() {
        assert_eq!(
            serde_json::to_value(NodeUpdate::completed(true)).unwrap(),
            json!({ "is_completed": true })
        );
    }

    #[test]
    fn node_level_uses_lowercase_names() {
        let node: RoadmapNode = serde_json::from_value(json!({
            "id": 3,
            "roadmap_id": 1,
            "title": "Ownership",
            "description": null,
            "content": null,
            "level": "intermediate",
            "position_x": 250,
            "position_y": 200,
            "order_index": 2,
            "is_completed": false
        }))
        .unwrap();
        assert_eq!(node.level, NodeLevel::Intermediate);
    }
}
