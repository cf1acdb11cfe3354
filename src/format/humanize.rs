//! Human-readable byte sizes for capacity columns

const UNITS: [(&str, f64); 6] = [
    ("EB", 1e18),
    ("PB", 1e15),
    ("TB", 1e12),
    ("GB", 1e9),
    ("MB", 1e6),
    ("kB", 1e3),
];

/// Format a byte count with decimal units, one fractional digit.
pub fn human_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0B".to_string();
    }

    let value = bytes as f64;
    for (suffix, unit) in UNITS {
        if value >= unit {
            return format!("{:.1}{}", value / unit, suffix);
        }
    }
    format!("{}B", bytes)
}
