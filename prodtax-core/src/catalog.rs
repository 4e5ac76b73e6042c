use crate::error::TranslationError;
use crate::info::{CategoryData, CategoryInfo};
use crate::parser::{CategoryId, CategoryRecord};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Localized names for one language, keyed by category id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    names: HashMap<CategoryId, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog straight from parsed records
    /// The first name seen for an id is kept
    pub fn from_records(records: &[CategoryRecord]) -> Self {
        let mut catalog = Self {
            names: HashMap::with_capacity(records.len()),
        };
        for record in records {
            catalog.insert(record.id, record.name.clone());
        }
        catalog
    }

    /// Insert a name unless the id already has one
    /// Returns true if the name was stored
    pub fn insert(&mut self, id: CategoryId, name: String) -> bool {
        match self.names.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(name);
                true
            }
        }
    }

    pub fn name(&self, id: CategoryId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.names.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.names.keys().copied()
    }
}

/// Resolves category names for one language, falling back to the key language
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    language: &'a str,
    requested: &'a Catalog,
    fallback: &'a Catalog,
}

impl<'a> Translator<'a> {
    pub fn new(language: &'a str, requested: &'a Catalog, fallback: &'a Catalog) -> Self {
        Self {
            language,
            requested,
            fallback,
        }
    }

    pub fn language(&self) -> &str {
        self.language
    }

    /// Look up a name in the requested catalog, then in the key-language catalog
    pub fn name(&self, id: CategoryId) -> Result<&'a str, TranslationError> {
        if let Some(name) = self.requested.name(id) {
            return Ok(name);
        }

        if let Some(name) = self.fallback.name(id) {
            tracing::debug!(
                id,
                language = self.language,
                "category name missing, using key language"
            );
            return Ok(name);
        }

        Err(TranslationError::TranslationNotFound {
            id,
            language: self.language.to_string(),
        })
    }

    /// Produce a fully translated copy of `info`
    /// Either every entry resolves or nothing is returned
    pub fn translate(&self, info: &CategoryInfo) -> Result<CategoryInfo, TranslationError> {
        Ok(CategoryInfo {
            language: self.language.to_string(),
            id: info.id,
            name: self.name(info.id)?.to_string(),
            fullpath: self.translate_all(&info.fullpath)?,
            children: self.translate_all(&info.children)?,
        })
    }

    fn translate_all(&self, entries: &[CategoryData]) -> Result<Vec<CategoryData>, TranslationError> {
        entries
            .iter()
            .map(|entry| {
                Ok(CategoryData {
                    id: entry.id,
                    name: self.name(entry.id)?.to_string(),
                })
            })
            .collect()
    }
}
