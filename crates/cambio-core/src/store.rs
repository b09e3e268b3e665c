//! Scenario persistence
//!
//! Scenarios are stored with their metadata in the loose map form, so files
//! written by hand or by older tooling can be read back. The metadata record is
//! validated on load: a missing key fails here rather than partway through a
//! run.

use crate::errors::{CambioError, CambioResult};
use crate::scenario::{EmissionScenario, MetadataMap, ScenarioMetadata};
use crate::timeseries::{FloatValue, Time};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads and saves emission scenarios by identifier.
pub trait ScenarioStore {
    fn load(&self, identifier: &str) -> CambioResult<EmissionScenario>;
    fn save(&self, scenario: &EmissionScenario, identifier: &str) -> CambioResult<()>;
}

/// On-disk layout of a stored scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScenarioRecord {
    time: Vec<Time>,
    emissions: Vec<FloatValue>,
    metadata: MetadataMap,
}

impl ScenarioRecord {
    fn from_scenario(scenario: &EmissionScenario) -> Self {
        Self {
            time: scenario.time().to_vec(),
            emissions: scenario.emission_rate().to_vec(),
            metadata: scenario.metadata().to_map(),
        }
    }

    fn into_scenario(self) -> CambioResult<EmissionScenario> {
        let metadata = ScenarioMetadata::from_map(&self.metadata)?;
        EmissionScenario::from_parts(
            Array1::from(self.time),
            Array1::from(self.emissions),
            metadata,
        )
    }
}

/// Stores each scenario as `<root>/<identifier>.toml`.
#[derive(Debug, Clone)]
pub struct TomlScenarioStore {
    root: PathBuf,
}

impl TomlScenarioStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, identifier: &str) -> CambioResult<PathBuf> {
        let valid = !identifier.is_empty()
            && identifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !identifier.starts_with('.');
        if !valid {
            return Err(CambioError::InvalidParameter {
                name: "identifier".to_string(),
                reason: format!("{identifier:?} is not a plain file name"),
            });
        }
        let file_name = if identifier.ends_with(".toml") {
            identifier.to_string()
        } else {
            format!("{identifier}.toml")
        };
        Ok(self.root.join(file_name))
    }
}

impl ScenarioStore for TomlScenarioStore {
    fn load(&self, identifier: &str) -> CambioResult<EmissionScenario> {
        let path = self.path_for(identifier)?;
        debug!(path = %path.display(), "Loading scenario");
        let source = fs::read_to_string(&path)?;
        let record: ScenarioRecord =
            toml::from_str(&source).map_err(|e| CambioError::Serialization(e.to_string()))?;
        record.into_scenario()
    }

    fn save(&self, scenario: &EmissionScenario, identifier: &str) -> CambioResult<()> {
        let path = self.path_for(identifier)?;
        debug!(path = %path.display(), "Saving scenario");
        let source = toml::to_string(&ScenarioRecord::from_scenario(scenario))
            .map_err(|e| CambioError::Serialization(e.to_string()))?;
        fs::create_dir_all(&self.root)?;
        fs::write(&path, source)?;
        Ok(())
    }
}
