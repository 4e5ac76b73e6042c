use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Locales shipped by the upstream product taxonomy
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "cs-CZ", "da-DK", "de-CH", "de-DE", "en-US", "es-ES", "fr-FR", "it-IT", "ja-JP", "pl-PL",
    "pt-BR", "sv-SE", "zh-CN",
];

/// Sample datasets compiled into the library
const EMBEDDED_DATASETS: &[(&str, &str)] = &[
    (
        "taxonomy-with-ids.de-DE.txt",
        include_str!("../data/taxonomy-with-ids.de-DE.txt"),
    ),
    (
        "taxonomy-with-ids.en-US.txt",
        include_str!("../data/taxonomy-with-ids.en-US.txt"),
    ),
    (
        "taxonomy-with-ids.fr-FR.txt",
        include_str!("../data/taxonomy-with-ids.fr-FR.txt"),
    ),
    (
        "taxonomy-with-ids.zh-CN.txt",
        include_str!("../data/taxonomy-with-ids.zh-CN.txt"),
    ),
];

/// Dataset file name for a language code, e.g. "taxonomy-with-ids.en-US.txt"
pub fn dataset_filename(language: &str) -> String {
    format!("taxonomy-with-ids.{}.txt", language)
}

/// Supplies raw dataset bytes by file name
pub trait RecordLoader: Send + Sync {
    fn load(&self, filename: &str) -> io::Result<Vec<u8>>;
}

/// Plain functions and closures can act as loaders
impl<F> RecordLoader for F
where
    F: Fn(&str) -> io::Result<Vec<u8>> + Send + Sync,
{
    fn load(&self, filename: &str) -> io::Result<Vec<u8>> {
        self(filename)
    }
}

/// Reads dataset files from a directory
#[derive(Debug, Clone)]
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl RecordLoader for DirLoader {
    fn load(&self, filename: &str) -> io::Result<Vec<u8>> {
        fs::read(self.root.join(filename))
    }
}

/// Holds dataset files in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, filename: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(filename.into(), contents.into());
    }

    /// Add the dataset for `language` under its conventional file name
    pub fn with_language(mut self, language: &str, text: &str) -> Self {
        self.insert(dataset_filename(language), text);
        self
    }
}

impl RecordLoader for MemoryLoader {
    fn load(&self, filename: &str) -> io::Result<Vec<u8>> {
        self.files.get(filename).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not in the in-memory dataset", filename),
            )
        })
    }
}

/// Serves the sample datasets bundled with the library
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedLoader;

impl EmbeddedLoader {
    /// Languages with a bundled dataset
    pub fn languages() -> Vec<&'static str> {
        EMBEDDED_DATASETS
            .iter()
            .filter_map(|(filename, _)| {
                filename
                    .strip_prefix("taxonomy-with-ids.")
                    .and_then(|rest| rest.strip_suffix(".txt"))
            })
            .collect()
    }
}

impl RecordLoader for EmbeddedLoader {
    fn load(&self, filename: &str) -> io::Result<Vec<u8>> {
        EMBEDDED_DATASETS
            .iter()
            .find(|(name, _)| *name == filename)
            .map(|(_, contents)| contents.as_bytes().to_vec())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!(
                        "{} is not bundled (bundled languages: {})",
                        filename,
                        Self::languages().join(", ")
                    ),
                )
            })
    }
}
