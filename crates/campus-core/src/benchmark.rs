use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One timing result reported by a server-side performance run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkMeasurement {
    /// What was measured, e.g. "WRITE", "FIND_ALL", "UPDATE".
    pub operation: String,

    /// Which database the operation ran against, e.g. "MySQL" or "MongoDB".
    pub database: String,

    /// Number of records involved.
    pub record_count: u64,

    pub duration_ms: u64,

    pub timestamp: NaiveDateTime,

    /// Free-text description of the run.
    #[serde(default, deserialize_with = "crate::record::null_as_empty")]
    pub details: String,
}

impl std::fmt::Display for BenchmarkMeasurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} on {}: {} records in {} ms ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.database,
            self.record_count,
            self.duration_ms,
            self.details
        )
    }
}

/// All measurements of a single operation, in the order they were reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationGroup<'a> {
    pub operation: &'a str,
    pub measurements: Vec<&'a BenchmarkMeasurement>,
}

impl<'a> OperationGroup<'a> {
    /// The measurement with the lowest duration. Ties go to the one reported first.
    pub fn fastest(&self) -> Option<&'a BenchmarkMeasurement> {
        self.measurements
            .iter()
            .copied()
            .reduce(|best, m| if m.duration_ms < best.duration_ms { m } else { best })
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.measurements.iter().map(|m| m.duration_ms).sum()
    }
}

/// Group measurements by operation name.
///
/// Groups appear in order of the first measurement of each operation, and
/// each group keeps its measurements in input order. Nothing is sorted.
pub fn group_by_operation(results: &[BenchmarkMeasurement]) -> Vec<OperationGroup<'_>> {
    let mut groups: Vec<OperationGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for m in results {
        let slot = *index.entry(m.operation.as_str()).or_insert_with(|| {
            groups.push(OperationGroup {
                operation: m.operation.as_str(),
                measurements: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].measurements.push(m);
    }

    groups
}

/// Concatenate groups back into a flat, group-ordered sequence.
pub fn flatten(groups: &[OperationGroup<'_>]) -> Vec<BenchmarkMeasurement> {
    groups
        .iter()
        .flat_map(|g| g.measurements.iter().map(|m| (*m).clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn measurement(operation: &str, database: &str, duration_ms: u64) -> BenchmarkMeasurement {
        BenchmarkMeasurement {
            operation: operation.to_string(),
            database: database.to_string(),
            record_count: 100,
            duration_ms,
            timestamp: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            details: String::new(),
        }
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let results = vec![
            measurement("insert", "Mongo", 5),
            measurement("query", "Mongo", 3),
            measurement("insert", "SQL", 7),
        ];

        let groups = group_by_operation(&results);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].operation, "insert");
        assert_eq!(groups[0].measurements, vec![&results[0], &results[2]]);
        assert_eq!(groups[1].operation, "query");
        assert_eq!(groups[1].measurements, vec![&results[1]]);
    }

    #[test]
    fn not_sorted_alphabetically() {
        let results = vec![
            measurement("WRITE", "MySQL", 1),
            measurement("COUNT", "MySQL", 1),
            measurement("FIND_ALL", "MySQL", 1),
        ];
        let names: Vec<&str> = group_by_operation(&results)
            .iter()
            .map(|g| g.operation)
            .collect();
        assert_eq!(names, ["WRITE", "COUNT", "FIND_ALL"]);
    }

    #[test]
    fn k_distinct_operations_give_k_groups_covering_every_measurement() {
        let ops = ["WRITE", "FIND_ALL", "COUNT", "UPDATE", "DELETE"];
        let results: Vec<_> = (0..40)
            .map(|i| measurement(ops[(i * 7) % ops.len()], "MySQL", i as u64))
            .collect();

        let groups = group_by_operation(&results);

        assert_eq!(groups.len(), ops.len());
        let total: usize = groups.iter().map(|g| g.measurements.len()).sum();
        assert_eq!(total, results.len());
        for group in &groups {
            assert!(group.measurements.iter().all(|m| m.operation == group.operation));
            let durations: Vec<u64> = group.measurements.iter().map(|m| m.duration_ms).collect();
            let mut sorted = durations.clone();
            sorted.sort_unstable();
            // durations grow with input position, so relative order is preserved
            assert_eq!(durations, sorted);
        }
    }

    #[test]
    fn regrouping_flattened_groups_is_stable() {
        let results = vec![
            measurement("WRITE", "MySQL", 10),
            measurement("COUNT", "MongoDB", 2),
            measurement("WRITE", "MongoDB", 8),
            measurement("COUNT", "MySQL", 3),
        ];
        let groups = group_by_operation(&results);
        let flat = flatten(&groups);
        let regrouped = group_by_operation(&flat);

        assert_eq!(regrouped.len(), groups.len());
        for (a, b) in groups.iter().zip(&regrouped) {
            assert_eq!(a.operation, b.operation);
            assert_eq!(a.measurements, b.measurements);
        }
    }

    #[test]
    fn empty_input_gives_no_groups() {
        assert!(group_by_operation(&[]).is_empty());
    }

    #[test]
    fn fastest_prefers_first_on_ties() {
        let results = vec![
            measurement("WRITE", "MySQL", 12),
            measurement("WRITE", "MongoDB", 4),
            measurement("WRITE", "H2", 4),
        ];
        let groups = group_by_operation(&results);
        assert_eq!(groups[0].fastest().map(|m| m.database.as_str()), Some("MongoDB"));
        assert_eq!(groups[0].total_duration_ms(), 20);
    }

    #[test]
    fn decodes_backend_payload() {
        let json = r#"[{
            "operation": "WRITE",
            "database": "MongoDB",
            "recordCount": 1000,
            "durationMs": 184,
            "timestamp": "2024-06-01T10:15:30.123456",
            "details": "Batch insert students"
        }]"#;
        let results: Vec<BenchmarkMeasurement> = serde_json::from_str(json).unwrap();
        assert_eq!(results[0].record_count, 1000);
        assert_eq!(
            results[0].to_string(),
            "[2024-06-01 10:15:30] WRITE on MongoDB: 1000 records in 184 ms (Batch insert students)"
        );
    }

    #[test]
    fn null_details_decode_as_empty() {
        let json = r#"[{
            "operation": "COUNT",
            "database": "MySQL",
            "recordCount": 10,
            "durationMs": 3,
            "timestamp": "2024-06-01T10:15:30",
            "details": null
        }]"#;
        let results: Vec<BenchmarkMeasurement> = serde_json::from_str(json).unwrap();
        assert_eq!(results[0].details, "");
    }
}
