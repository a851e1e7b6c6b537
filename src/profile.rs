//! YAML persistence for reviewed field mappings.
//!
//! A profile stores the complete mapping list produced by `map` (including
//! manual overrides and the auto-mapped flags) so that `submit` can reuse the
//! same decisions without re-running detection.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{error::MappingError, mapping::FieldMapping, parser::ParsedTable};

const CURRENT_PROFILE_VERSION: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingProfile {
    #[serde(default = "default_version")]
    pub version: String,
    pub mappings: Vec<FieldMapping>,
}

fn default_version() -> String {
    CURRENT_PROFILE_VERSION.to_string()
}

impl MappingProfile {
    pub fn new(mappings: Vec<FieldMapping>) -> Self {
        Self {
            version: default_version(),
            mappings,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening mapping profile {path:?}"))?;
        let profile = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing mapping profile {path:?}"))?;
        Ok(profile)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Creating mapping profile {path:?}"))?;
        let mut writer = BufWriter::new(file);
        serde_yaml::to_writer(&mut writer, self).context("Writing mapping profile YAML")?;
        writer.flush()?;
        Ok(())
    }

    /// Checks that every profiled column exists in `table` and returns the
    /// stored mappings.
    pub fn into_mappings_for(self, table: &ParsedTable) -> Result<Vec<FieldMapping>, MappingError> {
        if let Some(missing) = self
            .mappings
            .iter()
            .find(|mapping| !table.columns.contains(&mapping.csv_column))
        {
            return Err(MappingError::ColumnNotFound(missing.csv_column.clone()));
        }
        Ok(self.mappings)
    }
}
