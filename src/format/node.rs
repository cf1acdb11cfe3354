//! Column registry and format resolution for cluster nodes

use crate::resources::Node;

use super::{
    join_labels, Column, Format, Renderable, JSON_FORMAT_KEY, LABELS_HEADER, RAW_FORMAT_KEY,
    TABLE_FORMAT_KEY,
};

const NODE_TABLE_FORMAT: &str =
    "table {{.Name}}\t{{.Health}}\t{{.Cordon}}\t{{.Drain}}\t{{.Labels}}";
const NODE_QUIET_FORMAT: &str = "{{.Name}}";
const NODE_RAW_FORMAT: &str = "name: {{.Name}}\ndescription: {{.Description}}\nhealth: {{.Health}}\ncordon: {{.Cordon}}\ndrain: {{.Drain}}\nlabels: {{.Labels}}\n";
const NODE_RAW_QUIET_FORMAT: &str = "name: {{.Name}}\n";

/// Resolve the node output format from a mode selector and the quiet flag.
pub fn node_format(source: &str, quiet: bool) -> Format {
    match source {
        TABLE_FORMAT_KEY => {
            if quiet {
                Format::from_template(NODE_QUIET_FORMAT)
            } else {
                Format::from_template(NODE_TABLE_FORMAT)
            }
        }
        RAW_FORMAT_KEY => {
            if quiet {
                Format::from_template(NODE_RAW_QUIET_FORMAT)
            } else {
                Format::from_template(NODE_RAW_FORMAT)
            }
        }
        JSON_FORMAT_KEY => Format::Json,
        custom => Format::from_template(custom),
    }
}

fn name(node: &Node) -> String {
    node.name.clone()
}

fn description(node: &Node) -> String {
    node.description.clone()
}

fn health(node: &Node) -> String {
    node.health.clone()
}

fn cordon(node: &Node) -> String {
    node.cordon.to_string()
}

fn drain(node: &Node) -> String {
    node.drain.to_string()
}

fn labels(node: &Node) -> String {
    join_labels(&node.labels)
}

impl Renderable for Node {
    fn columns() -> &'static [Column<Self>] {
        &[
            Column {
                tag: "Name",
                header: "NAME",
                value: name,
            },
            Column {
                tag: "Description",
                header: "DESCRIPTION",
                value: description,
            },
            Column {
                tag: "Health",
                header: "HEALTH",
                value: health,
            },
            Column {
                tag: "Cordon",
                header: "CORDON",
                value: cordon,
            },
            Column {
                tag: "Drain",
                header: "DRAIN",
                value: drain,
            },
            Column {
                tag: "Labels",
                header: LABELS_HEADER,
                value: labels,
            },
        ]
    }

    fn label(&self, key: &str) -> String {
        self.labels.get(key).cloned().unwrap_or_default()
    }
}
