// Public modules
pub mod catalog;
pub mod config;
pub mod error;
pub mod info;
pub mod loader;
pub mod parser;
pub mod taxonomy;
pub mod tree;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, Translator};
pub use config::{load_config, save_config, TaxonomyConfig, DEFAULT_KEY_LANGUAGE};
pub use error::{BuildError, ConfigError, ParseError, TaxonomyError, TranslationError};
pub use info::{CategoryData, CategoryInfo};
pub use loader::{
    dataset_filename, DirLoader, EmbeddedLoader, MemoryLoader, RecordLoader, SUPPORTED_LANGUAGES,
};
pub use parser::{parse_line, parse_records, CategoryId, CategoryRecord};
pub use taxonomy::Taxonomy;
pub use tree::{build_tree, CategoryNode, CategoryTree};
