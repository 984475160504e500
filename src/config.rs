//! Configuration for the replicate merger.
//!
//! Supports YAML configuration files with defaults matching the published
//! experiment sweep (BlockCatch/PathFollow/NBack worlds, Markov and RNN
//! brains, replicates 101-109). The axis enumeration lives here as data, so
//! the framework's directory token grammars are declared once and never
//! rebuilt at call sites.

use crate::condition::{AxisValue, BrainAxes, SubAxis};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub axes: AxesConfig,
    pub replicates: ReplicateConfig,
    /// Source filenames merged when none are given on the command line
    #[serde(default = "default_files")]
    pub files: Vec<String>,
}

/// Filesystem layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root directory holding the framework's condition directories
    pub source_root: PathBuf,
    /// Directory the merged tables are written to
    pub output_dir: PathBuf,
    /// Prefix prepended to each source filename to name its merged table
    #[serde(default = "default_prefix")]
    pub output_prefix: String,
}

/// The experimental axes to sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxesConfig {
    pub worlds: Vec<String>,
    pub brains: Vec<BrainAxes>,
}

/// Contiguous inclusive replicate id range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicateConfig {
    pub first: u32,
    pub last: u32,
}

impl ReplicateConfig {
    /// Replicate ids as directory-name strings, in ascending order.
    pub fn labels(&self) -> Vec<String> {
        (self.first..=self.last).map(|r| r.to_string()).collect()
    }
}

fn default_prefix() -> String {
    "merged_".to_string()
}

fn default_files() -> Vec<String> {
    vec!["LOD_data.csv".to_string(), "max.csv".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                source_root: PathBuf::from("../source/work"),
                output_dir: PathBuf::from("../data"),
                output_prefix: default_prefix(),
            },
            axes: AxesConfig {
                worlds: vec![
                    "BlockCatch".to_string(),
                    "PathFollow".to_string(),
                    "NBack".to_string(),
                ],
                brains: vec![
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
                    },
                    BrainAxes {
                        name: "RNN".to_string(),
                        sub_axes: vec![
                            SubAxis {
                                name: "density".to_string(),
                                values: vec![
                                    AxisValue::new("RWR_01010", "dense"),
                                    AxisValue::new("RWR_11111", "semisparse"),
                                    AxisValue::new("RWR_10201", "sparse"),
                                ],
                            },
                            SubAxis {
                                name: "discretize".to_string(),
                                values: vec![
                                    AxisValue::new("RDR_-1", "continuous"),
                                    AxisValue::new("RDR_1", "discrete"),
                                    AxisValue::new("RDR_5", "binned"),
                                ],
                            },
                        ],
                    },
                ],
            },
            replicates: ReplicateConfig {
                first: 101,
                last: 109,
            },
            files: default_files(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.axes.worlds.is_empty() {
            return Err("at least one world is required".to_string());
        }
        if self.axes.brains.is_empty() {
            return Err("at least one brain is required".to_string());
        }
        for brain in &self.axes.brains {
            for sub in &brain.sub_axes {
                if sub.values.is_empty() {
                    return Err(format!(
                        "brain {} sub-axis {} has no values",
                        brain.name, sub.name
                    ));
                }
            }
        }
        if self.replicates.first > self.replicates.last {
            return Err("replicates.first cannot exceed replicates.last".to_string());
        }
        if self.files.is_empty() {
            return Err("at least one source filename is required".to_string());
        }
        Ok(())
    }
}
