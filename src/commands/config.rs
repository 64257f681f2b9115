use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Project configuration read from lineageflow_project.yaml
#[derive(Debug, Serialize, Deserialize)]
pub struct LineageFlowConfig {
    /// Name of the project
    pub name: String,

    /// Project version
    pub version: String,

    /// Configuration profile (default, dev, prod, etc.)
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Path to the warehouse database holding the lineage log tables
    #[serde(default)]
    pub warehouse: Option<String>,

    /// Optional DB.SCHEMA qualifier applied to both log tables
    #[serde(default)]
    pub schema: Option<String>,

    /// Object-level lineage log table
    #[serde(default = "default_object_table")]
    pub object_table: String,

    /// Column-level lineage log table
    #[serde(default = "default_column_table")]
    pub column_table: String,

    /// Recursion depth cap for warehouses whose lineage logs may contain cycles
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Additional project configurations
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_object_table() -> String {
    "LINEAGE_OBJECT".to_string()
}

fn default_column_table() -> String {
    "LINEAGE_COLUMN".to_string()
}

impl Default for LineageFlowConfig {
    fn default() -> Self {
        Self {
            name: "lineageflow_project".to_string(),
            version: "1.0.0".to_string(),
            profile: default_profile(),
            warehouse: None,
            schema: None,
            object_table: default_object_table(),
            column_table: default_column_table(),
            max_depth: None,
            extra: HashMap::new(),
        }
    }
}

/// Reads the configuration file from the specified path or looks for
/// lineageflow_project.yaml in the current directory
pub fn read_config(config_path: Option<PathBuf>) -> Result<LineageFlowConfig> {
    let config_path = if let Some(path) = config_path {
        path
    } else {
        // Look for config in the current directory
        let current_dir = std::env::current_dir()?;
        current_dir.join("lineageflow_project.yaml")
    };

    if !config_path.exists() {
        bail!("Configuration file not found at: {}", config_path.display());
    }

    let config_str = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let config: LineageFlowConfig = serde_yaml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    Ok(config)
}

/// Like [`read_config`], but a missing default config file falls back to the
/// built-in defaults. An explicitly supplied path must still exist.
pub fn load_or_default(config_path: Option<PathBuf>) -> Result<LineageFlowConfig> {
    match config_path {
        Some(path) => read_config(Some(path)),
        None => {
            let default_path = std::env::current_dir()?.join("lineageflow_project.yaml");
            if default_path.exists() {
                read_config(Some(default_path))
            } else {
                Ok(LineageFlowConfig::default())
            }
        }
    }
}
