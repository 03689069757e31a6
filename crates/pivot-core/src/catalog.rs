//! Career taxonomy reference data.
//!
//! The backend serves a category → roles mapping that is fetched once at
//! startup and treated as read-only for the rest of the session. Category
//! order follows the server response.

use anyhow::Result;
use serde_json::Value;

/// Two-level career taxonomy: ordered categories, each with ordered roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CareerCatalog {
    categories: Vec<(String, Vec<String>)>,
}

impl CareerCatalog {
    /// Builds a catalog from the `/api/careers` response body.
    ///
    /// Expects an object mapping category names to arrays of role names.
    /// Anything else is malformed reference data and rejected.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(map) = value.as_object() else {
            anyhow::bail!("careers response is not an object of categories");
        };

        let mut categories = Vec::with_capacity(map.len());
        for (category, roles_value) in map {
            let Some(entries) = roles_value.as_array() else {
                anyhow::bail!("category '{category}' does not map to an array of roles");
            };
            let mut roles = Vec::with_capacity(entries.len());
            for entry in entries {
                let Some(role) = entry.as_str() else {
                    anyhow::bail!("category '{category}' contains a non-string role");
                };
                roles.push(role.to_string());
            }
            categories.push((category.clone(), roles));
        }

        Ok(Self { categories })
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Category names in server order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    /// Roles for a category; empty when the category is unknown.
    pub fn roles(&self, category: &str) -> &[String] {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map_or(&[], |(_, roles)| roles.as_slice())
    }

    /// Default selection: the first category in server order.
    pub fn first_category(&self) -> Option<&str> {
        self.categories.first().map(|(name, _)| name.as_str())
    }

    /// All (category, roles) pairs in server order.
    pub fn entries(&self) -> &[(String, Vec<String>)] {
        &self.categories
    }
}
