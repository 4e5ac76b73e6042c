use crate::catalog::Catalog;
use crate::error::BuildError;
use crate::info::{CategoryData, CategoryInfo};
use crate::parser::{CategoryId, CategoryRecord};
use std::collections::{BTreeSet, HashMap};

/// A category in the structural tree
/// Names are not stored here; they live in the per-language catalogs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    id: CategoryId,
    parent: Option<CategoryId>,
    children: BTreeSet<CategoryId>,
}

impl CategoryNode {
    fn new(id: CategoryId) -> Self {
        Self {
            id,
            parent: None,
            children: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn parent(&self) -> Option<CategoryId> {
        self.parent
    }

    pub fn children(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.children.iter().copied()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// A parent, once set, never changes
    fn set_parent(&mut self, parent: CategoryId) -> Result<(), BuildError> {
        match self.parent {
            Some(existing) if existing != parent => Err(BuildError::ConflictingParent {
                child: self.id,
                existing,
                attempted: parent,
            }),
            _ => {
                self.parent = Some(parent);
                Ok(())
            }
        }
    }
}

/// Immutable forest of categories, indexed by id
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    nodes: HashMap<CategoryId, CategoryNode>,
    roots: Vec<CategoryId>,
}

impl CategoryTree {
    pub fn get(&self, id: CategoryId) -> Option<&CategoryNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Root ids in first-appearance order
    pub fn roots(&self) -> &[CategoryId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.nodes.keys().copied()
    }

    /// Ids from the root down to `id`, inclusive
    pub fn ancestry(&self, id: CategoryId) -> Option<Vec<CategoryId>> {
        let mut chain = vec![id];
        let mut current = self.nodes.get(&id)?;
        while let Some(parent) = current.parent {
            chain.push(parent);
            current = self.nodes.get(&parent)?;
        }
        chain.reverse();
        Some(chain)
    }

    /// Untranslated info for a node: ids only, names left empty
    pub fn describe(&self, id: CategoryId) -> Option<CategoryInfo> {
        let node = self.nodes.get(&id)?;
        let fullpath = self
            .ancestry(id)?
            .into_iter()
            .map(CategoryData::untranslated)
            .collect();
        let children = node.children().map(CategoryData::untranslated).collect();

        Some(CategoryInfo {
            language: String::new(),
            id,
            name: String::new(),
            fullpath,
            children,
        })
    }

    /// True if `ancestor` appears on the parent chain of `id`, or is `id` itself
    fn is_ancestor_or_self(&self, ancestor: CategoryId, id: CategoryId) -> bool {
        let mut current = Some(id);
        while let Some(step) = current {
            if step == ancestor {
                return true;
            }
            current = self.nodes.get(&step).and_then(|node| node.parent);
        }
        false
    }

    fn node_mut(&mut self, id: CategoryId) -> &mut CategoryNode {
        self.nodes.entry(id).or_insert_with(|| CategoryNode::new(id))
    }
}

/// Build the structural tree and the key-language catalog from key-language records
///
/// Every record names its whole ancestor chain; adjacent names in that chain
/// become parent/child edges. Names are resolved through an index that only
/// lives for the duration of the build.
pub fn build_tree(records: &[CategoryRecord]) -> Result<(CategoryTree, Catalog), BuildError> {
    let mut tree = CategoryTree {
        nodes: HashMap::with_capacity(records.len()),
        roots: Vec::new(),
    };
    let mut catalog = Catalog::new();
    let mut name_index: HashMap<&str, CategoryId> = HashMap::with_capacity(records.len());

    // Node creation pass: first occurrence of an id wins
    for record in records {
        if let Some(existing) = catalog.name(record.id) {
            if existing != record.name {
                tracing::warn!(
                    id = record.id,
                    kept = existing,
                    ignored = %record.name,
                    "duplicate category id with a different name"
                );
            }
            continue;
        }

        if let Some(&first) = name_index.get(record.name.as_str()) {
            return Err(BuildError::DuplicateCategoryName {
                name: record.name.clone(),
                first,
                second: record.id,
            });
        }

        name_index.insert(record.name.as_str(), record.id);
        tree.nodes.insert(record.id, CategoryNode::new(record.id));
        tree.roots.push(record.id);
        catalog.insert(record.id, record.name.clone());
    }

    // Linking pass: ancestors resolve by name, the record itself by id so that
    // a repeated id under another name still lands on the first node
    for record in records {
        let mut chain = Vec::with_capacity(record.depth() + 1);
        for name in &record.ancestors {
            chain.push(resolve(&name_index, name, record.id)?);
        }
        chain.push(record.id);

        for pair in chain.windows(2) {
            let (parent, child) = (pair[0], pair[1]);

            if tree.get(child).and_then(CategoryNode::parent) != Some(parent)
                && tree.is_ancestor_or_self(child, parent)
            {
                return Err(BuildError::CyclicAncestry { id: child });
            }

            tree.node_mut(child).set_parent(parent)?;
            tree.node_mut(parent).children.insert(child);
        }
    }

    let CategoryTree { nodes, roots } = &mut tree;
    roots.retain(|id| nodes.get(id).is_some_and(CategoryNode::is_root));

    tracing::debug!(
        nodes = tree.len(),
        roots = tree.roots.len(),
        "built category tree"
    );

    Ok((tree, catalog))
}

fn resolve(
    name_index: &HashMap<&str, CategoryId>,
    name: &str,
    record: CategoryId,
) -> Result<CategoryId, BuildError> {
    name_index
        .get(name)
        .copied()
        .ok_or_else(|| BuildError::UnresolvedAncestor {
            name: name.to_string(),
            record,
        })
}
