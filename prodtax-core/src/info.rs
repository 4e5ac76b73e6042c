use crate::parser::CategoryId;
use serde::Serialize;
use std::fmt;

/// A category id paired with its localized name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryData {
    pub id: CategoryId,
    pub name: String,
}

impl CategoryData {
    /// An entry whose name has not been resolved yet
    pub fn untranslated(id: CategoryId) -> Self {
        Self {
            id,
            name: String::new(),
        }
    }
}

impl fmt::Display for CategoryData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "ID({})", self.id)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Describes a category path and its children in one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub language: String,
    pub id: CategoryId,
    pub name: String,
    /// Root first, this category last
    pub fullpath: Vec<CategoryData>,
    /// Immediate children, ordered by id
    pub children: Vec<CategoryData>,
}

impl CategoryInfo {
    /// Distance from the root (0 for roots)
    pub fn depth(&self) -> usize {
        self.fullpath.len().saturating_sub(1)
    }

    pub fn is_root(&self) -> bool {
        self.fullpath.len() <= 1
    }

    pub fn root(&self) -> Option<&CategoryData> {
        self.fullpath.first()
    }

    pub fn child_ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.children.iter().map(|child| child.id)
    }
}

/// Renders "root > ... > leaf", followed by " > {a | b}" when there are children
/// Children are sorted by their display name
impl fmt::Display for CategoryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path: Vec<String> = self.fullpath.iter().map(ToString::to_string).collect();
        f.write_str(&path.join(" > "))?;

        if self.children.is_empty() {
            return Ok(());
        }

        let mut children: Vec<String> = self.children.iter().map(ToString::to_string).collect();
        children.sort();
        write!(f, " > {{{}}}", children.join(" | "))
    }
}
