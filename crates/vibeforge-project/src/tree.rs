//! Display tree derivation
//!
//! The file map stores flat paths only; the tree shown by file explorers is
//! derived on demand by splitting paths. Folders appear in the order their
//! first member was inserted.

use crate::filemap::FileMap;
use crate::path::ProjectPath;

/// One node of the derived display tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// Leaf file, carrying its full project path
    File {
        /// Display name (final path segment)
        name: String,
        /// Full path into the file map
        path: ProjectPath,
    },
    /// Derived folder
    Folder {
        /// Display name (single path segment)
        name: String,
        /// Children in first-seen order
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    /// Display name of this node
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            TreeNode::File { name, .. } | TreeNode::Folder { name, .. } => name,
        }
    }
}

/// Derive the display tree for a file map
#[must_use]
pub fn derive_tree(files: &FileMap) -> Vec<TreeNode> {
    let mut roots: Vec<TreeNode> = Vec::new();
    for (path, _) in files.iter() {
        let segments: Vec<&str> = path.segments().collect();
        if segments.is_empty() {
            continue;
        }
        insert_path(&mut roots, &segments, path);
    }
    roots
}

fn insert_path(nodes: &mut Vec<TreeNode>, segments: &[&str], full: &ProjectPath) {
    let (head, rest) = match segments.split_first() {
        Some(split) => split,
        None => return,
    };

    if rest.is_empty() {
        nodes.push(TreeNode::File {
            name: (*head).to_string(),
            path: full.clone(),
        });
        return;
    }

    let folder = nodes.iter_mut().find_map(|node| match node {
        TreeNode::Folder { name, children } if name == head => Some(children),
        _ => None,
    });
    match folder {
        Some(children) => insert_path(children, rest, full),
        None => {
            let mut children = Vec::new();
            insert_path(&mut children, rest, full);
            nodes.push(TreeNode::Folder {
                name: (*head).to_string(),
                children,
            });
        }
    }
}
