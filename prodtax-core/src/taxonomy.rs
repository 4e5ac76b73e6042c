use crate::catalog::{Catalog, Translator};
use crate::config::TaxonomyConfig;
use crate::error::{TaxonomyError, TranslationError};
use crate::info::CategoryInfo;
use crate::loader::{dataset_filename, DirLoader, EmbeddedLoader, RecordLoader};
use crate::parser::{parse_records, CategoryId, CategoryRecord};
use crate::tree::{build_tree, CategoryTree};
use std::collections::HashMap;
use std::io;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

/// A product-category taxonomy: one structural tree shared by every loaded language
///
/// The tree is built once from the key language and never changes. Catalogs for
/// further languages can be added at any time through [`Taxonomy::load_language`];
/// queries only take a read lock on the catalog map.
pub struct Taxonomy {
    key_language: String,
    tree: CategoryTree,
    key_catalog: Catalog,
    /// Catalogs for languages other than the key language
    catalogs: RwLock<HashMap<String, Catalog>>,
    loader: Box<dyn RecordLoader>,
}

impl Taxonomy {
    /// Build a taxonomy from the bundled datasets
    pub fn new<S: AsRef<str>>(key_language: &str, languages: &[S]) -> Result<Self, TaxonomyError> {
        Self::with_loader(EmbeddedLoader, key_language, languages)
    }

    /// Build a taxonomy from the datasets described by `config`
    pub fn from_config(config: &TaxonomyConfig) -> Result<Self, TaxonomyError> {
        match &config.data_dir {
            Some(dir) => Self::with_loader(
                DirLoader::new(dir),
                &config.key_language,
                &config.languages,
            ),
            None => Self::with_loader(EmbeddedLoader, &config.key_language, &config.languages),
        }
    }

    /// Build a taxonomy with a custom loader
    ///
    /// Every dataset is read and parsed before the taxonomy is returned, so any
    /// failure leaves nothing behind.
    pub fn with_loader<L, S>(
        loader: L,
        key_language: &str,
        languages: &[S],
    ) -> Result<Self, TaxonomyError>
    where
        L: RecordLoader + 'static,
        S: AsRef<str>,
    {
        let records = read_records(&loader, key_language)?;
        let (tree, key_catalog) = build_tree(&records)?;
        drop(records);

        let mut catalogs = HashMap::new();
        for language in languages.iter().map(AsRef::as_ref) {
            if language == key_language || catalogs.contains_key(language) {
                continue;
            }
            let records = read_records(&loader, language)?;
            catalogs.insert(language.to_string(), Catalog::from_records(&records));
        }

        tracing::info!(
            key_language,
            categories = tree.len(),
            roots = tree.roots().len(),
            languages = catalogs.len() + 1,
            "taxonomy ready"
        );

        Ok(Self {
            key_language: key_language.to_string(),
            tree,
            key_catalog,
            catalogs: RwLock::new(catalogs),
            loader: Box::new(loader),
        })
    }

    pub fn key_language(&self) -> &str {
        &self.key_language
    }

    /// Structural tree shared by all languages
    pub fn tree(&self) -> &CategoryTree {
        &self.tree
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.tree.contains(id)
    }

    /// Ids of categories without a parent
    /// Order is not meaningful
    pub fn root_ids(&self) -> &[CategoryId] {
        self.tree.roots()
    }

    pub fn has_language(&self, language: &str) -> bool {
        language == self.key_language || self.read_catalogs().contains_key(language)
    }

    /// All loaded languages, sorted
    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self.read_catalogs().keys().cloned().collect();
        languages.push(self.key_language.clone());
        languages.sort();
        languages
    }

    /// Load the catalog for `language` unless it is already present
    ///
    /// The dataset is parsed before the write lock is taken; if two callers race
    /// on the same language the first insert wins and the other is dropped.
    pub fn load_language(&self, language: &str) -> Result<(), TaxonomyError> {
        if self.has_language(language) {
            tracing::debug!(language, "language already loaded");
            return Ok(());
        }

        let records = read_records(self.loader.as_ref(), language)?;
        let catalog = Catalog::from_records(&records);

        self.catalogs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(language.to_string())
            .or_insert(catalog);
        Ok(())
    }

    /// Info for every root category, translated into `language`
    pub fn get_roots_category_info(
        &self,
        language: &str,
    ) -> Result<Vec<CategoryInfo>, TranslationError> {
        self.with_translator(language, |translator| {
            self.tree
                .roots()
                .iter()
                .filter_map(|&id| self.tree.describe(id))
                .map(|info| translator.translate(&info))
                .collect()
        })
    }

    /// Info for one category translated into `language`
    /// Returns Ok(None) when the id is unknown
    pub fn get_category_info(
        &self,
        id: CategoryId,
        language: &str,
    ) -> Result<Option<CategoryInfo>, TranslationError> {
        let Some(info) = self.tree.describe(id) else {
            return Ok(None);
        };
        self.with_translator(language, |translator| translator.translate(&info))
            .map(Some)
    }

    /// Translate an existing info into another loaded language
    pub fn translate(
        &self,
        info: &CategoryInfo,
        language: &str,
    ) -> Result<CategoryInfo, TranslationError> {
        self.with_translator(language, |translator| translator.translate(info))
    }

    /// Run `f` with a translator for `language`, holding the catalog read lock once
    fn with_translator<T>(
        &self,
        language: &str,
        f: impl FnOnce(&Translator<'_>) -> Result<T, TranslationError>,
    ) -> Result<T, TranslationError> {
        let catalogs = self.read_catalogs();
        let requested = if language == self.key_language {
            &self.key_catalog
        } else {
            catalogs
                .get(language)
                .ok_or_else(|| TranslationError::LanguageNotLoaded(language.to_string()))?
        };

        let translator = Translator::new(language, requested, &self.key_catalog);
        f(&translator)
    }

    fn read_catalogs(&self) -> RwLockReadGuard<'_, HashMap<String, Catalog>> {
        self.catalogs.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Taxonomy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Taxonomy")
            .field("key_language", &self.key_language)
            .field("categories", &self.tree.len())
            .field("roots", &self.tree.roots().len())
            .field("languages", &self.languages())
            .finish()
    }
}

/// Load and parse the dataset for one language
fn read_records<L>(loader: &L, language: &str) -> Result<Vec<CategoryRecord>, TaxonomyError>
where
    L: RecordLoader + ?Sized,
{
    let filename = dataset_filename(language);
    let bytes = loader.load(&filename).map_err(|source| TaxonomyError::Io {
        filename: filename.clone(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|err| TaxonomyError::Io {
        filename: filename.clone(),
        source: io::Error::new(io::ErrorKind::InvalidData, err),
    })?;

    let records = parse_records(&text).map_err(|source| TaxonomyError::Parse {
        language: language.to_string(),
        source,
    })?;

    tracing::info!(language, records = records.len(), "loaded {}", filename);
    Ok(records)
}
