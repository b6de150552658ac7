//! Benchmark result rows and their grouping by environment
//!
//! Columns are matched by header name, so their order is free and extra
//! columns are ignored.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{PlotError, Result};

/// One row of the results table
///
/// `env_name` and `install_type` are drawn with an ASCII bitmap font. Other
/// characters appear in the legend as `\u{..}` escapes, so `café` reads
/// `caf\u{e9}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultRecord {
    /// Environment the benchmark ran in
    pub env_name: String,
    /// How the numerical library was installed
    pub install_type: String,
    /// Matrix dimension
    pub matrix_size: f64,
    /// Execution time in seconds
    pub time: f64,
}

impl ResultRecord {
    /// Convenience constructor
    pub fn new(
        env_name: impl Into<String>,
        install_type: impl Into<String>,
        matrix_size: f64,
        time: f64,
    ) -> Self {
        Self {
            env_name: env_name.into(),
            install_type: install_type.into(),
            matrix_size,
            time,
        }
    }
}

/// Loads every row of a CSV results file into memory
///
/// # Errors
///
/// `Io` if the file cannot be opened; `Csv` if a row is malformed, a required
/// column is missing or a numeric field does not parse.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<ResultRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(file)?;
    debug!(path = %path.display(), rows = records.len(), "loaded benchmark results");
    Ok(records)
}

/// Parses CSV results from any reader
///
/// # Errors
///
/// See [`load_records`].
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ResultRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<ResultRecord>, csv::Error>>()?;
    Ok(records)
}

/// Rows sharing one `(env_name, install_type)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Environment name of every row in the group
    pub env_name: String,
    /// Install type of every row in the group
    pub install_type: String,
    /// `(matrix_size, time)` pairs in input order
    pub points: Vec<(f64, f64)>,
}

impl Group {
    /// Legend label: `env (install_type)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.env_name, self.install_type)
    }

    /// Matrix sizes in input order
    pub fn matrix_sizes(&self) -> Vec<f64> {
        self.points.iter().map(|&(x, _)| x).collect()
    }

    /// Times in input order
    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, y)| y).collect()
    }
}

/// Partitions rows by `(env_name, install_type)`
///
/// Groups come back in lexicographic key order; rows keep their input order
/// inside a group and values are copied untouched.
pub fn group_records(records: &[ResultRecord]) -> Vec<Group> {
    let mut groups: BTreeMap<(&str, &str), Vec<(f64, f64)>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.env_name.as_str(), record.install_type.as_str()))
            .or_default()
            .push((record.matrix_size, record.time));
    }

    debug!(groups = groups.len(), rows = records.len(), "grouped results");

    groups
        .into_iter()
        .map(|((env_name, install_type), points)| Group {
            env_name: env_name.to_string(),
            install_type: install_type.to_string(),
            points,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_records_by_header_name() {
        let csv = "time,matrix_size,extra,install_type,env_name\n\
                   0.5,1000,x,pip,venv\n\
                   0.01,100,y,conda,base\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                ResultRecord::new("venv", "pip", 1000.0, 0.5),
                ResultRecord::new("base", "conda", 100.0, 0.01),
            ]
        );
    }

    #[test]
    fn test_read_records_header_only() {
        let records = read_records("env_name,install_type,matrix_size,time\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_read_records_missing_column() {
        let csv = "env_name,install_type,matrix_size\nvenv,pip,100\n";
        assert!(matches!(read_records(csv.as_bytes()), Err(PlotError::Csv(_))));
    }

    #[test]
    fn test_read_records_non_numeric_time() {
        let csv = "env_name,install_type,matrix_size,time\nvenv,pip,100,fast\n";
        assert!(matches!(read_records(csv.as_bytes()), Err(PlotError::Csv(_))));
    }

    #[test]
    fn test_load_records_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "env_name,install_type,matrix_size,time").expect("write header");
        writeln!(file, "py311,wheel,500,0.02").expect("write row");
        writeln!(file, "py311,wheel,1000,0.12").expect("write row");

        let records = load_records(file.path()).expect("load CSV");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].matrix_size, 1000.0);
    }

    #[test]
    fn test_load_records_missing_file() {
        let err = load_records("/nonexistent/results.csv").unwrap_err();
        assert!(matches!(err, PlotError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/results.csv"));
    }

    #[test]
    fn test_group_order_and_labels() {
        let records = vec![
            ResultRecord::new("venv", "pip", 100.0, 0.1),
            ResultRecord::new("base", "conda", 100.0, 0.2),
            ResultRecord::new("venv", "pip", 200.0, 0.4),
            ResultRecord::new("base", "pip", 100.0, 0.3),
        ];
        let groups = group_records(&records);
        let labels: Vec<String> = groups.iter().map(Group::label).collect();
        assert_eq!(labels, vec!["base (conda)", "base (pip)", "venv (pip)"]);
        assert_eq!(groups[2].matrix_sizes(), vec![100.0, 200.0]);
        assert_eq!(groups[2].times(), vec![0.1, 0.4]);
    }

    #[test]
    fn test_group_keeps_input_order_within_group() {
        let records = vec![
            ResultRecord::new("a", "b", 1000.0, 1.0),
            ResultRecord::new("a", "b", 10.0, 0.001),
            ResultRecord::new("a", "b", 100.0, 0.01),
        ];
        let groups = group_records(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].matrix_sizes(), vec![1000.0, 10.0, 100.0]);
    }

    #[test]
    fn test_group_empty() {
        assert!(group_records(&[]).is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_one_group_per_distinct_pair(
            rows in prop::collection::vec(
                (0u8..4, 0u8..3, 1.0f64..5000.0, 0.0001f64..100.0),
                0..40,
            )
        ) {
            let records: Vec<ResultRecord> = rows
                .iter()
                .map(|&(e, i, x, y)| ResultRecord::new(format!("env{e}"), format!("inst{i}"), x, y))
                .collect();
            let distinct: HashSet<(String, String)> = records
                .iter()
                .map(|r| (r.env_name.clone(), r.install_type.clone()))
                .collect();

            let groups = group_records(&records);
            prop_assert_eq!(groups.len(), distinct.len());
            prop_assert_eq!(groups.iter().map(|g| g.points.len()).sum::<usize>(), records.len());

            for group in &groups {
                let expected: Vec<f64> = records
                    .iter()
                    .filter(|r| {
                        r.env_name == group.env_name && r.install_type == group.install_type
                    })
                    .map(|r| r.matrix_size)
                    .collect();
                prop_assert_eq!(group.matrix_sizes(), expected);
            }
        }
    }
}
