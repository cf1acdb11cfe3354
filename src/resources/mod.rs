//! Resource descriptors fetched from the cluster API
//!
//! These are immutable snapshots for the duration of one render or one
//! lifecycle step. Field names follow the API's camelCase JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Health value written when a node leaves the cluster.
pub const HEALTH_LEFT: &str = "left";

/// A storage pool aggregating capacity across a set of nodes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    /// Unique pool ID assigned by the cluster
    #[serde(default)]
    pub id: String,

    /// Pool name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: String,

    /// Storage drivers backing this pool
    #[serde(default)]
    pub driver_names: Vec<String>,

    /// Names of the nodes contributing capacity
    #[serde(default)]
    pub node_names: Vec<String>,

    /// Whether the pool accepts new provisioning
    #[serde(default)]
    pub active: bool,

    /// Aggregate capacity across members
    #[serde(default)]
    pub capacity_stats: CapacityStats,

    /// Free-form labels
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// Aggregate capacity counters for a pool
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityStats {
    pub total_capacity_bytes: u64,
    pub available_capacity_bytes: u64,
}

/// A node in the storage cluster
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique node ID assigned by the cluster
    #[serde(default)]
    pub id: String,

    /// Node name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: String,

    /// Free-form labels
    #[serde(default)]
    pub labels: HashMap<String, String>,

    /// No new volumes are placed on a cordoned node
    #[serde(default)]
    pub cordon: bool,

    /// A draining node is evacuating its existing volumes
    #[serde(default)]
    pub drain: bool,

    /// Health as reported by the cluster (e.g. "healthy", "left")
    #[serde(default)]
    pub health: String,
}

/// Write-back payload for node updates.
///
/// Carries the full mutable snapshot; callers copy the fetched node and
/// override only the fields their command changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUpdate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub cordon: bool,
    #[serde(default)]
    pub drain: bool,
    /// Only set when a command transitions health (leave)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
}

impl NodeUpdate {
    /// Start an update from a fetched snapshot, changing nothing yet.
    pub fn from_node(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            description: node.description.clone(),
            labels: node.labels.clone(),
            cordon: node.cordon,
            drain: node.drain,
            health: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_deserialize_defaults() {
        let pool: Pool = serde_json::from_str(r#"{"name": "default"}"#).unwrap();
        assert_eq!(pool.name, "default");
        assert!(pool.driver_names.is_empty());
        assert!(!pool.active);
        assert_eq!(pool.capacity_stats.total_capacity_bytes, 0);
    }

    #[test]
    fn test_node_wire_names() {
        let node: Node = serde_json::from_str(
            r#"{"id": "n-1", "name": "node-1", "cordon": true, "health": "healthy"}"#,
        )
        .unwrap();
        assert!(node.cordon);
        assert!(!node.drain);
        assert_eq!(node.health, "healthy");
    }

    #[test]
    fn test_update_copies_snapshot() {
        let mut node = Node {
            id: "n-1".to_string(),
            name: "node-1".to_string(),
            description: "rack 4".to_string(),
            cordon: true,
            drain: true,
            health: "healthy".to_string(),
            ..Default::default()
        };
        node.labels.insert("env".to_string(), "prod".to_string());

        let update = NodeUpdate::from_node(&node);
        assert_eq!(update.id, "n-1");
        assert_eq!(update.description, "rack 4");
        assert!(update.cordon);
        assert!(update.drain);
        assert_eq!(update.labels.get("env").map(String::as_str), Some("prod"));
        assert!(update.health.is_none());
    }

    #[test]
    fn test_update_omits_unset_health() {
        let update = NodeUpdate::from_node(&Node::default());
        let json = serde_json::to_string(&update).unwrap();
        assert!(!json.contains("health"));
    }
}
