//! Plain-text summary of a performance run, for `campus bench`.

use std::fmt::Write;

use campus_core::{group_by_operation, BenchmarkMeasurement};

/// One block per operation, in the order the server reported them.
pub fn summary(results: &[BenchmarkMeasurement]) -> String {
    let mut out = String::new();
    if results.is_empty() {
        out.push_str("The run returned no measurements.\n");
        return out;
    }

    for group in group_by_operation(results) {
        let fastest = group.fastest().map(|m| m.duration_ms);
        let _ = writeln!(out, "{}", group.operation);
        for m in &group.measurements {
            let marker = if Some(m.duration_ms) == fastest { "  *" } else { "" };
            let _ = writeln!(
                out,
                "  {:<12} {:>8} records {:>8} ms{}",
                m.database, m.record_count, m.duration_ms, marker
            );
        }
        let _ = writeln!(out, "  {:<12} {:>25} ms", "total", group.total_duration_ms());
    }
    out
}
