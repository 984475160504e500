//! Experimental condition model.
//!
//! An experiment run is identified by a world, a brain architecture, one
//! value for each of that architecture's sub-axes (connection density,
//! discretization, ...), and a replicate id. Each condition maps to exactly
//! one expected directory under the source root, named by the framework's
//! double-underscore token convention.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tag used for axis columns that do not apply to a condition's brain.
pub const NOT_APPLICABLE: &str = "NA";

/// One value of a sub-axis: the raw directory token and its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisValue {
    /// Raw token as it appears in directory names (e.g. `MDA_0__MAA_1`)
    pub code: String,
    /// Display value carried into the merged table (e.g. `dense`)
    pub label: String,
}

impl AxisValue {
    pub fn new(code: &str, label: &str) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
        }
    }
}

/// A named sub-dimension of a brain architecture with its enumerable values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubAxis {
    pub name: String,
    pub values: Vec<AxisValue>,
}

/// A brain architecture and the sub-axes that apply to it.
///
/// Different architectures use different token grammars for the same logical
/// dimension (Markov encodes density as `MDA_*__MAA_*`, RNN as `RWR_*`), so
/// each architecture carries its own value list per sub-axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrainAxes {
    pub name: String,
    pub sub_axes: Vec<SubAxis>,
}

/// One full assignment of values to all applicable axes plus a replicate id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub world: String,
    pub brain: String,
    /// (sub-axis name, chosen value) in the brain's declaration order
    pub sub_values: Vec<(String, AxisValue)>,
    pub rep: String,
}

impl Condition {
    /// Glob pattern for the directory this condition maps to.
    ///
    /// The leading `C*` tolerates the unpredictable prefix token the
    /// framework prepends to condition directories.
    pub fn dir_pattern(&self, source_root: &Path) -> String {
        let mut dir = format!("C*WLD_{}__BRN_{}", self.world, self.brain);
        for (_, value) in &self.sub_values {
            dir.push_str("__");
            dir.push_str(&value.code);
        }
        source_root
            .join(dir)
            .join(&self.rep)
            .to_string_lossy()
            .into_owned()
    }

    /// Glob pattern for a named file inside this condition's directory.
    pub fn file_pattern(&self, source_root: &Path, filename: &str) -> String {
        format!(
            "{}{}{}",
            self.dir_pattern(source_root),
            std::path::MAIN_SEPARATOR,
            filename
        )
    }

    /// Display label for a sub-axis column, or [`NOT_APPLICABLE`] when this
    /// condition's brain has no such sub-axis.
    pub fn tag(&self, axis: &str) -> &str {
        self.sub_values
            .iter()
            .find(|(name, _)| name == axis)
            .map(|(_, value)| value.label.as_str())
            .unwrap_or(NOT_APPLICABLE)
    }
}

/// Union of sub-axis names across all brains, in first-seen order.
///
/// These become the merged table's sub-axis columns; every condition fills
/// every column, using [`NOT_APPLICABLE`] where its brain lacks the axis.
pub fn axis_columns(brains: &[BrainAxes]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for brain in brains {
        for sub in &brain.sub_axes {
            if !columns.contains(&sub.name) {
                columns.push(sub.name.clone());
            }
        }
    }
    columns
}

/// Enumerate every condition in deterministic order: worlds, then brains,
/// then each brain's sub-axis values (nested, declaration order), then
/// replicates.
pub fn enumerate(worlds: &[String], brains: &[BrainAxes], reps: &[String]) -> Vec<Condition> {
    let mut conditions = Vec::new();
    for world in worlds {
        for brain in brains {
            for combo in sub_axis_combos(brain) {
                for rep in reps {
                    conditions.push(Condition {
                        world: world.clone(),
                        brain: brain.name.clone(),
                        sub_values: combo.clone(),
                        rep: rep.clone(),
                    });
                }
            }
        }
    }
    conditions
}

/// Cross-product of one brain's sub-axis values, in declaration order.
fn sub_axis_combos(brain: &BrainAxes) -> Vec<Vec<(String, AxisValue)>> {
    let mut combos: Vec<Vec<(String, AxisValue)>> = vec![Vec::new()];
    for sub in &brain.sub_axes {
        let mut next = Vec::with_capacity(combos.len() * sub.values.len());
        for combo in &combos {
            for value in &sub.values {
                let mut extended = combo.clone();
                extended.push((sub.name.clone(), value.clone()));
                next.push(extended);
            }
        }
        combos = next;
    }
    combos
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn markov() -> BrainAxes {
        BrainAxes {
            name: "Markov".to_string(),
            sub_axes: vec![
                SubAxis {
                    name: "density".to_string(),
                    values: vec![
                        AxisValue::new("MDA_0__MAA_1", "dense"),
                        AxisValue::new("MDA_1__MAA_0", "sparse"),
                    ],
                },
                SubAxis {
                    name: "discretize".to_string(),
                    values: vec![
                        AxisValue::new("MHT_0", "continuous"),
                        AxisValue::new("MHT_1", "discrete"),
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_dir_pattern_tokens() {
        let cond = Condition {
            world: "NBack".to_string(),
            brain: "Markov".to_string(),
            sub_values: vec![
                ("density".to_string(), AxisValue::new("MDA_0__MAA_1", "dense")),
                ("discretize".to_string(), AxisValue::new("MHT_0", "continuous")),
            ],
            rep: "101".to_string(),
        };
        let pattern = cond.dir_pattern(&PathBuf::from("work"));
        assert_eq!(
            pattern,
            format!(
                "work{s}C*WLD_NBack__BRN_Markov__MDA_0__MAA_1__MHT_0{s}101",
                s = std::path::MAIN_SEPARATOR
            )
        );
    }

    #[test]
    fn test_enumerate_count_and_order() {
        let worlds = vec!["A".to_string(), "B".to_string()];
        let brains = vec![markov()];
        let reps = vec!["1".to_string(), "2".to_string()];

        let conditions = enumerate(&worlds, &brains, &reps);
        // 2 worlds * (2 density * 2 discretize) * 2 reps
        assert_eq!(conditions.len(), 16);

        // Replicate varies fastest, world slowest
        assert_eq!(conditions[0].world, "A");
        assert_eq!(conditions[0].rep, "1");
        assert_eq!(conditions[1].rep, "2");
        assert_eq!(conditions[1].sub_values, conditions[0].sub_values);
        assert_eq!(conditions[8].world, "B");

        // Deterministic: a second enumeration is identical
        assert_eq!(conditions, enumerate(&worlds, &brains, &reps));
    }

    #[test]
    fn test_axis_columns_union_preserves_order() {
        let mut rnn = markov();
        rnn.name = "RNN".to_string();
        rnn.sub_axes.push(SubAxis {
            name: "gate".to_string(),
            values: vec![AxisValue::new("GAT_1", "gated")],
        });
        let columns = axis_columns(&[markov(), rnn]);
        assert_eq!(columns, vec!["density", "discretize", "gate"]);
    }

    #[test]
    fn test_missing_axis_tagged_not_applicable() {
        let cond = Condition {
            world: "A".to_string(),
            brain: "Markov".to_string(),
            sub_values: vec![(
                "density".to_string(),
                AxisValue::new("MDA_0__MAA_1", "dense"),
            )],
            rep: "1".to_string(),
        };
        assert_eq!(cond.tag("density"), "dense");
        assert_eq!(cond.tag("gate"), NOT_APPLICABLE);
    }

    #[test]
    fn test_brain_without_sub_axes_yields_one_combo() {
        let bare = BrainAxes {
            name: "Bare".to_string(),
            sub_axes: Vec::new(),
        };
        let conditions = enumerate(
            &["W".to_string()],
            &[bare],
            &["1".to_string()],
        );
        assert_eq!(conditions.len(), 1);
        assert!(conditions[0].sub_values.is_empty());
    }
}
