//! End-to-end rendering through the public API

use std::collections::HashMap;

use storctl::format::{self, node_format, pool_format, Format, FormatError};
use storctl::resources::{CapacityStats, Node, Pool};

fn pool(name: &str, total: u64, available: u64) -> Pool {
    Pool {
        name: name.to_string(),
        driver_names: vec!["lvm".to_string()],
        node_names: vec!["n1".to_string(), "n2".to_string()],
        active: true,
        capacity_stats: CapacityStats {
            total_capacity_bytes: total,
            available_capacity_bytes: available,
        },
        ..Default::default()
    }
}

fn render_pools(pools: &[Pool], format: &Format) -> Result<String, FormatError> {
    let mut buf = Vec::new();
    format::render(pools, format, &mut buf)?;
    Ok(String::from_utf8(buf).unwrap())
}

#[test]
fn table_output_has_one_header_row_before_bodies() {
    let pools = vec![
        pool("fast", 1000, 250),
        pool("slow", 0, 0),
        pool("cold", 2_000_000, 500_000),
    ];
    let output = render_pools(&pools, &pool_format("table", false)).unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("NAME"));
    assert!(lines[0].contains("DRIVERS"));
    assert!(lines[0].contains("USED"));
    assert_eq!(output.matches("NAME").count(), 1);

    // Input order preserved
    assert!(lines[1].starts_with("fast"));
    assert!(lines[2].starts_with("slow"));
    assert!(lines[3].starts_with("cold"));
}

#[test]
fn table_body_column_semantics() {
    let pools = vec![pool("fast", 1000, 250), pool("empty", 0, 0)];
    let output = render_pools(&pools, &pool_format("table", false)).unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[1].contains("75.00%"));
    assert!(lines[1].contains("active"));
    assert!(lines[1].contains("2")); // member count
    assert!(lines[2].contains("-")); // zero-capacity pool
}

#[test]
fn quiet_mode_lists_names_only() {
    let pools = vec![pool("fast", 0, 0), pool("slow", 0, 0)];
    let output = render_pools(&pools, &pool_format("table", true)).unwrap();
    assert_eq!(output, "fast\nslow\n");
}

#[test]
fn raw_mode_emits_per_resource_blocks() {
    let pools = vec![pool("fast", 1000, 250)];
    let output = render_pools(&pools, &pool_format("raw", false)).unwrap();

    assert!(output.contains("name: fast"));
    assert!(output.contains("drivers: lvm"));
    assert!(output.contains("used: 75.00%"));
    assert!(!output.contains("NAME"));
}

#[test]
fn json_mode_emits_full_registry_per_line() {
    let pools = vec![pool("fast", 1000, 250), pool("slow", 0, 0)];
    let output = render_pools(&pools, &pool_format("json", false)).unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);

    let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["NAME"], "fast");
    assert_eq!(record["USED"], "75.00%");
    assert_eq!(record["STATUS"], "active");
    assert_eq!(record["NODES"], "2");
}

#[test]
fn custom_template_with_label_lookup() {
    let mut p = pool("fast", 0, 0);
    p.labels
        .insert("com.example/disk-type".to_string(), "ssd".to_string());

    let format = pool_format(r#"table {{.Name}}\t{{.Label "com.example/disk-type"}}"#, false);
    let output = render_pools(&[p], &format).unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[0].contains("disk type"));
    assert!(lines[1].contains("ssd"));
}

#[test]
fn unknown_column_aborts_with_no_partial_output() {
    let pools = vec![pool("fast", 0, 0), pool("slow", 0, 0)];
    let mut buf = Vec::new();
    let err = format::render(&pools, &pool_format("table {{.Bogus}}", false), &mut buf);

    assert!(matches!(err, Err(FormatError::UnknownColumn(_))));
    assert!(buf.is_empty());
}

#[test]
fn node_table_shows_lifecycle_flags() {
    let mut labels = HashMap::new();
    labels.insert("rack".to_string(), "r4".to_string());
    let nodes = vec![Node {
        name: "node-1".to_string(),
        health: "healthy".to_string(),
        cordon: true,
        drain: false,
        labels,
        ..Default::default()
    }];

    let mut buf = Vec::new();
    format::render(&nodes, &node_format("table", false), &mut buf).unwrap();
    let output = String::from_utf8(buf).unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[0].contains("HEALTH"));
    assert!(lines[0].contains("CORDON"));
    assert!(lines[1].contains("healthy"));
    assert!(lines[1].contains("true"));
    assert!(lines[1].contains("rack=r4"));
}
