//! The condition merger.
//!
//! Enumerates every condition of the configured sweep, resolves each one to
//! at most one source file on disk, projects the file onto the allow-listed
//! columns, tags its rows with the condition's display values, and
//! concatenates everything into one [`MergedTable`].

use crate::condition::{self, Condition};
use crate::config::Config;
use crate::table::{self, MergedTable, TableError};
use glob::glob;
use std::path::PathBuf;

#[derive(Debug)]
pub enum MergeError {
    /// A condition's pattern matched more than one file, which breaks the
    /// one-directory-per-condition naming assumption
    AmbiguousCondition {
        pattern: String,
        matches: Vec<PathBuf>,
    },
    Table(TableError),
    Pattern(glob::PatternError),
    Glob(glob::GlobError),
}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AmbiguousCondition { pattern, matches } => write!(
                f,
                "ambiguous condition: pattern {} matched {} files: {:?}",
                pattern,
                matches.len(),
                matches
            ),
            Self::Table(e) => write!(f, "{}", e),
            Self::Pattern(e) => write!(f, "bad glob pattern: {}", e),
            Self::Glob(e) => write!(f, "glob error: {}", e),
        }
    }
}

impl std::error::Error for MergeError {}

impl From<TableError> for MergeError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

impl From<glob::PatternError> for MergeError {
    fn from(e: glob::PatternError) -> Self {
        Self::Pattern(e)
    }
}

impl From<glob::GlobError> for MergeError {
    fn from(e: glob::GlobError) -> Self {
        Self::Glob(e)
    }
}

/// Build the merged table for one source filename.
///
/// Conditions with no matching file are logged and skipped; only that one
/// condition is dropped, enumeration always continues with its siblings.
/// A condition matching more than one file is fatal. The table is returned,
/// not persisted; writing the output file is the caller's job.
pub fn produce_merged_table(config: &Config, filename: &str) -> Result<MergedTable, MergeError> {
    let sub_columns = condition::axis_columns(&config.axes.brains);

    let mut axis_columns = vec!["world".to_string(), "brain".to_string()];
    axis_columns.extend(sub_columns.iter().cloned());
    axis_columns.push("rep".to_string());

    let reps = config.replicates.labels();
    let conditions = condition::enumerate(&config.axes.worlds, &config.axes.brains, &reps);

    let mut table = MergedTable::new(axis_columns);
    for cond in &conditions {
        let pattern = cond.file_pattern(&config.paths.source_root, filename);
        let path = match resolve_single(&pattern)? {
            Some(path) => path,
            None => {
                log::warn!("no files matched, skipping condition: {}", pattern);
                continue;
            }
        };
        log::info!("merging {}", path.display());

        let rows = table::read_data_rows(&path)?;
        table.append_batch(tag_rows(rows, cond, &sub_columns));
    }
    Ok(table)
}

/// Resolve a glob pattern to at most one path.
fn resolve_single(pattern: &str) -> Result<Option<PathBuf>, MergeError> {
    let mut matches = Vec::new();
    for entry in glob(pattern)? {
        matches.push(entry?);
    }
    match matches.len() {
        0 => Ok(None),
        1 => Ok(Some(matches.remove(0))),
        _ => Err(MergeError::AmbiguousCondition {
            pattern: pattern.to_string(),
            matches,
        }),
    }
}

/// Extend each projected data row with the condition's axis display values
/// and replicate id, in the table's column order.
fn tag_rows(
    rows: Vec<Vec<String>>,
    cond: &Condition,
    sub_columns: &[String],
) -> Vec<Vec<String>> {
    rows.into_iter()
        .map(|mut row| {
            row.push(cond.world.clone());
            row.push(cond.brain.clone());
            for axis in sub_columns {
                row.push(cond.tag(axis).to_string());
            }
            row.push(cond.rep.clone());
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::AxisValue;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_single_prefers_unique_match() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("C01WLD_X")).unwrap();
        fs::write(dir.path().join("C01WLD_X/data.csv"), "a\n1\n").unwrap();

        let pattern = format!("{}/C*WLD_X/data.csv", dir.path().display());
        let resolved = resolve_single(&pattern).unwrap();
        assert_eq!(
            resolved,
            Some(dir.path().join("C01WLD_X").join("data.csv"))
        );
    }

    #[test]
    fn test_resolve_single_none_on_no_match() {
        let dir = tempdir().unwrap();
        let pattern = format!("{}/C*WLD_X/data.csv", dir.path().display());
        assert_eq!(resolve_single(&pattern).unwrap(), None);
    }

    #[test]
    fn test_resolve_single_rejects_two_matches() {
        let dir = tempdir().unwrap();
        for prefix in ["C01WLD_X", "C02WLD_X"] {
            fs::create_dir(dir.path().join(prefix)).unwrap();
            fs::write(dir.path().join(prefix).join("data.csv"), "a\n1\n").unwrap();
        }

        let pattern = format!("{}/C*WLD_X/data.csv", dir.path().display());
        match resolve_single(&pattern) {
            Err(MergeError::AmbiguousCondition { matches, .. }) => {
                assert_eq!(matches.len(), 2);
            }
            other => panic!("expected AmbiguousCondition, got {:?}", other),
        }
    }

    #[test]
    fn test_tag_rows_order_and_na_fill() {
        let cond = Condition {
            world: "NBack".to_string(),
            brain: "Markov".to_string(),
            sub_values: vec![(
                "density".to_string(),
                AxisValue::new("MDA_0__MAA_1", "dense"),
            )],
            rep: "101".to_string(),
        };
        let sub_columns = vec!["density".to_string(), "discretize".to_string()];

        let tagged = tag_rows(
            vec![vec!["0".to_string(), "1".to_string(), "0.5".to_string()]],
            &cond,
            &sub_columns,
        );
        assert_eq!(
            tagged[0],
            vec!["0", "1", "0.5", "NBack", "Markov", "dense", "NA", "101"]
        );
    }
}
