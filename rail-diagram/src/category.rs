//! Named trees of railways.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::json::{CategoryRecord, JsonError};
use crate::railway::{DiagnosticSink, Railway, TracingSink};

/// A named group of railways with nested subcategories.
///
/// Railway names are not required to be unique; lookups return the first
/// match, depth first with a category's own railways before its
/// subcategories.
#[derive(Debug, Clone, Default)]
pub struct RailCategory {
    pub name: String,
    pub railways: Vec<Railway>,
    pub subcategories: Vec<RailCategory>,
}

impl RailCategory {
    /// Create an empty category.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Number of railways in this category and all subcategories.
    pub fn railway_count(&self) -> usize {
        self.railways.len()
            + self
                .subcategories
                .iter()
                .map(RailCategory::railway_count)
                .sum::<usize>()
    }

    /// First railway in the tree called `name`.
    pub fn railway_by_name(&self, name: &str) -> Option<&Railway> {
        self.all_railways().find(|r| r.name() == name)
    }

    /// Mutable access to the first railway in the tree called `name`.
    pub fn railway_by_name_mut(&mut self, name: &str) -> Option<&mut Railway> {
        if let Some(rail) = self.railways.iter_mut().find(|r| r.name() == name) {
            return Some(rail);
        }
        self.subcategories
            .iter_mut()
            .find_map(|cat| cat.railway_by_name_mut(name))
    }

    /// Whether any railway in the tree is called `name`.
    pub fn railway_name_existed(&self, name: &str) -> bool {
        self.railway_by_name(name).is_some()
    }

    /// Every railway in the tree, depth first.
    pub fn all_railways(&self) -> Box<dyn Iterator<Item = &Railway> + '_> {
        Box::new(
            self.railways
                .iter()
                .chain(self.subcategories.iter().flat_map(|c| c.all_railways())),
        )
    }

    /// Build a category tree from its document record.
    pub fn from_record_with(record: &CategoryRecord, sink: &mut dyn DiagnosticSink) -> Self {
        let railways = record
            .rails
            .iter()
            .map(|r| Railway::from_record_with(r, sink))
            .collect();
        let subcategories = record
            .subcats
            .iter()
            .map(|c| Self::from_record_with(c, sink))
            .collect();
        Self {
            name: record.name.clone(),
            railways,
            subcategories,
        }
    }

    /// The document record of this category tree.
    pub fn to_record(&self) -> CategoryRecord {
        CategoryRecord {
            name: self.name.clone(),
            rails: self.railways.iter().map(Railway::to_record).collect(),
            subcats: self.subcategories.iter().map(Self::to_record).collect(),
        }
    }

    /// Build a category tree from a JSON document value.
    pub fn from_json(value: &Value) -> Result<Self, JsonError> {
        Self::from_json_with(value, &mut TracingSink)
    }

    /// [`from_json`](Self::from_json), reporting skipped entries to `sink`.
    pub fn from_json_with(value: &Value, sink: &mut dyn DiagnosticSink) -> Result<Self, JsonError> {
        let record = CategoryRecord::deserialize(value)?;
        let category = Self::from_record_with(&record, sink);
        debug!(
            name = %category.name,
            railways = category.railway_count(),
            "category loaded"
        );
        Ok(category)
    }

    /// Serialize to a JSON document value.
    pub fn to_json(&self) -> Result<Value, JsonError> {
        Ok(serde_json::to_value(self.to_record())?)
    }
}
