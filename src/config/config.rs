use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Feature-type sets and placeholder text used when building tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_protein_feature_types")]
    pub protein_feature_types: Vec<String>,
    // RNA feature kinds, see https://www.ncbi.nlm.nih.gov/books/NBK293913/
    #[serde(default = "default_rna_feature_types")]
    pub rna_feature_types: Vec<String>,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_missing_description")]
    pub missing_description: String,
}

fn default_protein_feature_types() -> Vec<String> {
    vec!["CDS".to_string()]
}

fn default_rna_feature_types() -> Vec<String> {
    ["rna", "mRNA", "tRNA", "rRNA", "ncRNA", "tmRNA", "misc_RNA"]
        .iter()
        .map(|kind| kind.to_string())
        .collect()
}

fn default_placeholder() -> String {
    "-".to_string()
}

fn default_missing_description() -> String {
    "Description not available".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protein_feature_types: default_protein_feature_types(),
            rna_feature_types: default_rna_feature_types(),
            placeholder: default_placeholder(),
            missing_description: default_missing_description(),
        }
    }
}

impl Config {
    /// Built-in defaults unless an explicit file is given.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Config::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn is_protein_type(&self, kind: &str) -> bool {
        self.protein_feature_types.iter().any(|t| t == kind)
    }

    pub fn is_rna_type(&self, kind: &str) -> bool {
        self.rna_feature_types.iter().any(|t| t == kind)
    }
}
