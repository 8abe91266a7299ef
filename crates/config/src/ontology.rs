//! Ontology: the authoritative slot vocabulary of the movie domain
//!
//! Loaded from `ontology.yaml`:
//!
//! ```yaml
//! agent_requestable: [genres, keywords, directors, actors, year]
//! user_requestable: [title, genres, plot, directors, duration, actors, year, rating, more_info]
//! agent_inform_slots: [title, genres, plot, directors, duration, actors, year, rating]
//! slots_annotation: [title, genres, plot, keywords, directors, duration, actors, year, rating]
//! multiple_values_CIN: [genres, keywords, directors, actors]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ontology {
    /// Slots the agent may ask the user to constrain, in preference order
    pub agent_requestable: Vec<String>,
    /// Slots the user may ask about
    #[serde(default)]
    pub user_requestable: Vec<String>,
    /// Slots the agent may report on
    #[serde(default)]
    pub agent_inform_slots: Vec<String>,
    /// Slots recognised in user annotations (the CIN vocabulary)
    #[serde(default)]
    pub slots_annotation: Vec<String>,
    /// CIN slots that can hold several values at once
    #[serde(default, rename = "multiple_values_CIN", alias = "multiple_values_cin")]
    pub multiple_values_cin: Vec<String>,
}

fn to_strings(slots: &[&str]) -> Vec<String> {
    slots.iter().map(|s| s.to_string()).collect()
}

impl Default for Ontology {
    fn default() -> Self {
        Self {
            agent_requestable: to_strings(&["genres", "keywords", "directors", "actors", "year"]),
            user_requestable: to_strings(&[
                "title",
                "genres",
                "plot",
                "directors",
                "duration",
                "actors",
                "year",
                "rating",
                "more_info",
            ]),
            agent_inform_slots: to_strings(&[
                "title",
                "genres",
                "plot",
                "directors",
                "duration",
                "actors",
                "year",
                "rating",
            ]),
            slots_annotation: to_strings(&[
                "title",
                "genres",
                "plot",
                "keywords",
                "directors",
                "duration",
                "actors",
                "year",
                "rating",
            ]),
            multiple_values_cin: to_strings(&["genres", "keywords", "directors", "actors"]),
        }
    }
}

impl Ontology {
    /// Load from a YAML file and validate
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        let ontology = Self::from_yaml(&content)?;
        tracing::debug!(
            path = %path.display(),
            requestable = ontology.agent_requestable.len(),
            annotated = ontology.slots_annotation.len(),
            "Loaded ontology"
        );
        Ok(ontology)
    }

    /// Parse from a YAML string and validate
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let ontology: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        ontology.validate()?;
        Ok(ontology)
    }

    /// Check that the agent has something to elicit and only elicits known slots
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent_requestable.is_empty() {
            return Err(ConfigError::MissingField("agent_requestable".to_string()));
        }
        if !self.slots_annotation.is_empty() {
            if let Some(unknown) = self
                .agent_requestable
                .iter()
                .find(|slot| !self.slots_annotation.contains(slot))
            {
                return Err(ConfigError::InvalidValue {
                    field: "agent_requestable".to_string(),
                    message: format!("slot '{}' is not in slots_annotation", unknown),
                });
            }
        }
        Ok(())
    }

    /// Whether the ontology knows `slot` under any role
    pub fn is_known_slot(&self, slot: &str) -> bool {
        [
            &self.agent_requestable,
            &self.user_requestable,
            &self.agent_inform_slots,
            &self.slots_annotation,
        ]
        .iter()
        .any(|slots| slots.iter().any(|s| s == slot))
    }

    pub fn is_multi_valued(&self, slot: &str) -> bool {
        self.multiple_values_cin.iter().any(|s| s == slot)
    }
}
