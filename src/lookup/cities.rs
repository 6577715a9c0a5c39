use anyhow::{Context, Result};
use std::collections::HashMap;

/// Maps city names to the integer codes the model was trained with.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "Delhi": 10,
///   "Mumbai": 17
/// }
/// ```
///
/// Names are case-sensitive and unique.
#[derive(Debug, Clone, Default)]
pub struct CityMapping {
    entries: HashMap<String, i64>,
}

impl CityMapping {
    /// Loads the mapping from a JSON file at `path`.
    #[tracing::instrument]
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read city mapping {}", path))?;
        let entries: HashMap<String, i64> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse city mapping {}", path))?;
        tracing::info!(cities = entries.len(), "City mapping loaded");
        Ok(Self { entries })
    }

    /// Returns the model encoding for `city`, if the city is known.
    pub fn code(&self, city: &str) -> Option<i64> {
        self.entries.get(city).copied()
    }

    pub fn contains(&self, city: &str) -> bool {
        self.entries.contains_key(city)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All known city names in lexical order.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<(String, i64)> for CityMapping {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
