//! Header-label catalog.
//!
//! Labels resolve by fixed key through the `zigbee` namespace, falling
//! back to `common`, then to the key itself -- so an unknown key
//! renders as itself instead of failing. The English catalog is
//! embedded; alternate catalogs can be loaded from a JSON document of
//! the same two-namespace shape.

use std::collections::HashMap;

use serde::Deserialize;

static ENGLISH: &str = include_str!("../locales/en.json");

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Namespaces {
    zigbee: HashMap<String, String>,
    common: HashMap<String, String>,
}

/// Translation lookup scoped to the `zigbee`/`common` namespace pair.
#[derive(Debug)]
pub struct Catalog {
    namespaces: Namespaces,
}

impl Catalog {
    /// The embedded English catalog.
    pub fn english() -> Self {
        Self {
            // Embedded asset, validated by the catalog tests.
            namespaces: serde_json::from_str(ENGLISH).expect("embedded locale is valid JSON"),
        }
    }

    /// Load a catalog from a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            namespaces: serde_json::from_str(raw)?,
        })
    }

    /// Resolve a label: `zigbee` → `common` → the key itself.
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.namespaces
            .zigbee
            .get(key)
            .or_else(|| self.namespaces.common.get(key))
            .map_or(key, String::as_str)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::english()
    }
}
