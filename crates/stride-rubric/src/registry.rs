use std::collections::BTreeMap;
use std::path::Path;

use crate::assessments;
use crate::config::AssessmentConfig;
use crate::error::RubricError;

/// Read-only set of assessment configurations keyed by assessment-type id.
///
/// Built once at startup and shared; nothing mutates it afterwards.
#[derive(Debug, Clone, Default)]
pub struct ConfigRegistry {
    configs: BTreeMap<String, AssessmentConfig>,
}

impl ConfigRegistry {
    /// The configurations shipped with Stride.
    pub fn builtin() -> Self {
        let configs = assessments::all_assessments()
            .into_iter()
            .map(|(id, config)| (id.to_string(), config))
            .collect();
        Self { configs }
    }

    pub fn from_configs(
        configs: impl IntoIterator<Item = (String, AssessmentConfig)>,
    ) -> Result<Self, RubricError> {
        let configs: BTreeMap<_, _> = configs.into_iter().collect();
        for (id, config) in &configs {
            config.validate(id)?;
        }
        Ok(Self { configs })
    }

    /// Parse a JSON object of `{ "<assessment id>": { name, template, sections } }`.
    pub fn from_json_str(json: &str) -> Result<Self, RubricError> {
        let configs: BTreeMap<String, AssessmentConfig> = serde_json::from_str(json)?;
        Self::from_configs(configs)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, RubricError> {
        let contents = std::fs::read_to_string(path).map_err(|source| RubricError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let registry = Self::from_json_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            assessments = registry.len(),
            "loaded assessment configurations"
        );
        Ok(registry)
    }

    pub fn get(&self, assessment_id: &str) -> Option<&AssessmentConfig> {
        self.configs.get(assessment_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssessmentConfig)> {
        self.configs.iter().map(|(id, config)| (id.as_str(), config))
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
