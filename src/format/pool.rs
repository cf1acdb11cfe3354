//! Column registry and format resolution for storage pools

use crate::resources::Pool;

use super::humanize::human_size;
use super::{
    join_labels, Column, Format, Renderable, JSON_FORMAT_KEY, LABELS_HEADER, RAW_FORMAT_KEY,
    TABLE_FORMAT_KEY,
};

const POOL_TABLE_FORMAT: &str =
    "table {{.Name}}\t{{.Drivers}}\t{{.Nodes}}\t{{.Total}}\t{{.CapacityUsed}}\t{{.Active}}";
const POOL_QUIET_FORMAT: &str = "{{.Name}}";
const POOL_RAW_FORMAT: &str = "name: {{.Name}}\ndrivers: {{.Drivers}}\nnodes: {{.Nodes}}\ntotal: {{.Total}}\nused: {{.CapacityUsed}}\nstatus: {{.Active}}\nlabels: {{.Labels}}\n";
const POOL_RAW_QUIET_FORMAT: &str = "name: {{.Name}}\n";

/// Resolve the pool output format from a mode selector and the quiet flag.
/// Unrecognized selectors pass through as user templates.
pub fn pool_format(source: &str, quiet: bool) -> Format {
    match source {
        TABLE_FORMAT_KEY => {
            if quiet {
                Format::from_template(POOL_QUIET_FORMAT)
            } else {
                Format::from_template(POOL_TABLE_FORMAT)
            }
        }
        RAW_FORMAT_KEY => {
            if quiet {
                Format::from_template(POOL_RAW_QUIET_FORMAT)
            } else {
                Format::from_template(POOL_RAW_FORMAT)
            }
        }
        JSON_FORMAT_KEY => Format::Json,
        custom => Format::from_template(custom),
    }
}

fn name(pool: &Pool) -> String {
    pool.name.clone()
}

fn drivers(pool: &Pool) -> String {
    pool.driver_names.join(", ")
}

// Member count, not the member names.
fn nodes(pool: &Pool) -> String {
    pool.node_names.len().to_string()
}

fn capacity_used(pool: &Pool) -> String {
    let stats = pool.capacity_stats;
    if stats.total_capacity_bytes == 0 {
        return "-".to_string();
    }
    let used = stats.total_capacity_bytes - stats.available_capacity_bytes;
    format!(
        "{:.2}%",
        used as f64 * 100.0 / stats.total_capacity_bytes as f64
    )
}

fn total(pool: &Pool) -> String {
    human_size(pool.capacity_stats.total_capacity_bytes)
}

fn active(pool: &Pool) -> String {
    if pool.active {
        "active".to_string()
    } else {
        "disabled".to_string()
    }
}

fn labels(pool: &Pool) -> String {
    join_labels(&pool.labels)
}

impl Renderable for Pool {
    fn columns() -> &'static [Column<Self>] {
        &[
            Column {
                tag: "Name",
                header: "NAME",
                value: name,
            },
            Column {
                tag: "Drivers",
                header: "DRIVERS",
                value: drivers,
            },
            Column {
                tag: "Nodes",
                header: "NODES",
                value: nodes,
            },
            Column {
                tag: "Total",
                header: "TOTAL",
                value: total,
            },
            Column {
                tag: "CapacityUsed",
                header: "USED",
                value: capacity_used,
            },
            Column {
                tag: "Active",
                header: "STATUS",
                value: active,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::CapacityStats;

    fn pool_with_capacity(total: u64, available: u64) -> Pool {
        Pool {
            name: "default".to_string(),
            capacity_stats: CapacityStats {
                total_capacity_bytes: total,
                available_capacity_bytes: available,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_capacity_used_zero_total() {
        assert_eq!(capacity_used(&pool_with_capacity(0, 0)), "-");
    }

    #[test]
    fn test_capacity_used_fraction() {
        assert_eq!(capacity_used(&pool_with_capacity(1000, 250)), "75.00%");
    }

    #[test]
    fn test_capacity_used_nothing_used() {
        assert_eq!(capacity_used(&pool_with_capacity(1000, 1000)), "0.00%");
    }

    #[test]
    fn test_active_flag() {
        let mut pool = pool_with_capacity(0, 0);
        assert_eq!(active(&pool), "disabled");
        pool.active = true;
        assert_eq!(active(&pool), "active");
    }

    #[test]
    fn test_node_count() {
        let mut pool = pool_with_capacity(0, 0);
        pool.node_names = vec!["n1".to_string(), "n2".to_string(), "n3".to_string()];
        assert_eq!(nodes(&pool), "3");
    }

    #[test]
    fn test_drivers_joined() {
        let mut pool = pool_with_capacity(0, 0);
        pool.driver_names = vec!["lvm".to_string(), "zfs".to_string()];
        assert_eq!(drivers(&pool), "lvm, zfs");
    }

    #[test]
    fn test_single_label_lookup() {
        let mut pool = pool_with_capacity(0, 0);
        pool.labels
            .insert("com.example.tier".to_string(), "gold".to_string());
        assert_eq!(pool.label("com.example.tier"), "gold");
        assert_eq!(pool.label("missing"), "");
    }

    #[test]
    fn test_format_table_default() {
        assert_eq!(
            pool_format("table", false),
            Format::Table(POOL_TABLE_FORMAT.trim_start_matches("table ").to_string())
        );
    }

    #[test]
    fn test_format_table_quiet() {
        assert_eq!(
            pool_format("table", true),
            Format::Plain(POOL_QUIET_FORMAT.to_string())
        );
    }

    #[test]
    fn test_format_raw() {
        match pool_format("raw", false) {
            Format::Plain(template) => assert!(template.starts_with("name: ")),
            other => panic!("expected plain format, got {:?}", other),
        }
    }

    #[test]
    fn test_format_json() {
        assert_eq!(pool_format("json", false), Format::Json);
        assert_eq!(pool_format("json", true), Format::Json);
    }

    #[test]
    fn test_format_custom_passthrough() {
        assert_eq!(
            pool_format("{{.Name}}: {{.Total}}", false),
            Format::Plain("{{.Name}}: {{.Total}}".to_string())
        );
        assert_eq!(
            pool_format("table {{.Name}}", false),
            Format::Table("{{.Name}}".to_string())
        );
    }
}
