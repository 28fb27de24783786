use indextree::{Arena, NodeId};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::TreeLimits;

/// Token that moves the cursor to the parent directory.
pub const PARENT_DIR: &str = "..";
pub const SEPARATOR: char = '/';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VfsNodeType {
    Directory,
    File,
}

#[derive(Debug, Clone)]
pub struct VfsNode {
    pub name: String,
    pub node_type: VfsNodeType,
}

impl VfsNode {
    pub fn is_directory(&self) -> bool {
        matches!(self.node_type, VfsNodeType::Directory)
    }

    pub fn is_file(&self) -> bool {
        matches!(self.node_type, VfsNodeType::File)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VfsError {
    #[error("no such file or directory")]
    NotFound,
    #[error("not a directory")]
    NotADirectory,
    #[error("already exists")]
    AlreadyExists,
    #[error("name too long ({len} bytes, max {max})")]
    NameTooLong { len: usize, max: usize },
    #[error("invalid name: {0:?}")]
    InvalidName(String),
    #[error("node capacity exhausted ({capacity} nodes)")]
    AllocationFailure { capacity: usize },
    #[error("node is already attached to the tree")]
    AlreadyAttached,
    #[error("permission denied")]
    PermissionDenied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub node_id: NodeId,
    pub is_directory: bool,
}

impl std::fmt::Display for DirEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_directory {
            write!(f, "{}{SEPARATOR}", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Result of listing a directory. An empty directory has its own variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirListing {
    Empty,
    Entries(Vec<DirEntry>),
}

/// A file removed by [`NamespaceTree::purge_by_suffix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgedFile {
    pub name: String,
    /// Rendered path of the file just before it was removed.
    pub path: String,
}

/// Arena backed directory tree with a single root directory.
///
/// Node ids stay valid handles after removal; every accessor checks
/// liveness and reports [`VfsError::NotFound`] for removed nodes.
pub struct NamespaceTree {
    arena: Arena<VfsNode>,
    root: NodeId,
    limits: TreeLimits,
    live_nodes: usize,
}

impl Default for NamespaceTree {
    fn default() -> Self {
        Self::new(TreeLimits::default())
    }
}

impl NamespaceTree {
    pub fn new(limits: TreeLimits) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(VfsNode {
            name: String::new(),
            node_type: VfsNodeType::Directory,
        });

        Self {
            arena,
            root,
            limits,
            live_nodes: 1,
        }
    }

    pub fn get_root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes currently allocated, root and detached nodes included.
    pub fn live_nodes(&self) -> usize {
        self.live_nodes
    }

    pub fn get_node(&self, node: NodeId) -> Option<&VfsNode> {
        self.arena
            .get(node)
            .filter(|node_ref| !node_ref.is_removed())
            .map(|node_ref| node_ref.get())
    }

    pub fn is_live(&self, node: NodeId) -> bool {
        self.get_node(node).is_some()
    }

    pub fn get_parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena
            .get(node)
            .filter(|node_ref| !node_ref.is_removed())
            .and_then(|node_ref| node_ref.parent())
    }

    fn node(&self, node: NodeId) -> Result<&VfsNode, VfsError> {
        self.get_node(node).ok_or(VfsError::NotFound)
    }

    fn require_directory(&self, node: NodeId) -> Result<&VfsNode, VfsError> {
        let data = self.node(node)?;
        if !data.is_directory() {
            return Err(VfsError::NotADirectory);
        }
        Ok(data)
    }

    fn validate_name(&self, name: &str) -> Result<(), VfsError> {
        if name.is_empty() || name == "." || name == PARENT_DIR || name.contains(SEPARATOR) {
            return Err(VfsError::InvalidName(name.to_string()));
        }
        if name.len() > self.limits.max_name_len {
            return Err(VfsError::NameTooLong {
                len: name.len(),
                max: self.limits.max_name_len,
            });
        }
        Ok(())
    }

    fn ensure_capacity(&self) -> Result<(), VfsError> {
        if self.live_nodes >= self.limits.max_nodes {
            return Err(VfsError::AllocationFailure {
                capacity: self.limits.max_nodes,
            });
        }
        Ok(())
    }

    // Node construction

    /// Allocates a detached, childless node. Attach it with
    /// [`add_child`](Self::add_child) or release it with
    /// [`delete_subtree`](Self::delete_subtree).
    pub fn create_node(&mut self, name: &str, node_type: VfsNodeType) -> Result<NodeId, VfsError> {
        self.validate_name(name)?;
        self.ensure_capacity()?;

        let node = self.arena.new_node(VfsNode {
            name: name.to_string(),
            node_type,
        });
        self.live_nodes += 1;
        Ok(node)
    }

    /// Appends `child` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), VfsError> {
        self.require_directory(parent)?;
        let child_name = self.node(child)?.name.clone();

        if child == self.root || self.arena[child].parent().is_some() {
            return Err(VfsError::AlreadyAttached);
        }
        // Only leaves may be attached, so no subtree can be re-parented.
        if self.arena[child].first_child().is_some() {
            return Err(VfsError::AlreadyAttached);
        }
        if self.find_child(parent, &child_name).is_some() {
            return Err(VfsError::AlreadyExists);
        }

        parent
            .checked_append(child, &mut self.arena)
            .map_err(|_| VfsError::AlreadyAttached)?;
        debug!(name = %child_name, parent = %self.node_path(parent), "attached node");
        Ok(())
    }

    fn create_entry(
        &mut self,
        parent: NodeId,
        name: &str,
        node_type: VfsNodeType,
    ) -> Result<NodeId, VfsError> {
        self.require_directory(parent)?;
        if self.find_child(parent, name).is_some() {
            return Err(VfsError::AlreadyExists);
        }

        let node = self.create_node(name, node_type)?;
        if let Err(err) = self.add_child(parent, node) {
            // Release the node if attaching fails.
            node.remove(&mut self.arena);
            self.live_nodes -= 1;
            return Err(err);
        }
        Ok(node)
    }

    pub fn create_directory(&mut self, parent: NodeId, name: &str) -> Result<NodeId, VfsError> {
        self.create_entry(parent, name, VfsNodeType::Directory)
    }

    pub fn create_file(&mut self, parent: NodeId, name: &str) -> Result<NodeId, VfsError> {
        self.create_entry(parent, name, VfsNodeType::File)
    }

    // Lookup and listing

    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.get_node(parent)?;
        parent
            .children(&self.arena)
            .find(|child| self.arena[*child].get().name == name)
    }

    pub fn list_directory(&self, node: NodeId) -> Result<DirListing, VfsError> {
        self.require_directory(node)?;

        let entries: Vec<DirEntry> = node
            .children(&self.arena)
            .map(|child_id| {
                let child = self.arena[child_id].get();
                DirEntry {
                    name: child.name.clone(),
                    node_id: child_id,
                    is_directory: child.is_directory(),
                }
            })
            .collect();

        if entries.is_empty() {
            Ok(DirListing::Empty)
        } else {
            Ok(DirListing::Entries(entries))
        }
    }

    /// Absolute path of `node`, every segment followed by a separator.
    /// The root renders as `/`.
    pub fn node_path(&self, node: NodeId) -> String {
        let mut segments: Vec<&str> = node
            .ancestors(&self.arena)
            .filter(|id| *id != self.root)
            .map(|id| self.arena[id].get().name.as_str())
            .collect();
        segments.reverse();

        let mut path = String::from(SEPARATOR);
        for segment in segments {
            path.push_str(segment);
            path.push(SEPARATOR);
        }
        path
    }

    // Navigation

    /// Single step from `cursor`: `..` or the name of a child directory.
    pub fn change_dir(&self, cursor: NodeId, name: &str) -> Result<NodeId, VfsError> {
        self.require_directory(cursor)?;

        if name == PARENT_DIR {
            return Ok(self.get_parent(cursor).unwrap_or(cursor));
        }

        let next = self.find_child(cursor, name).ok_or(VfsError::NotFound)?;
        self.require_directory(next)?;
        Ok(next)
    }

    pub fn resolve_path(&self, base: NodeId, path: &str) -> Result<NodeId, VfsError> {
        self.node(base)?;
        match path.strip_prefix(SEPARATOR) {
            Some(stripped) => self.resolve_path_from(self.root, stripped),
            None => self.resolve_path_from(base, path),
        }
    }

    fn resolve_path_from(&self, mut current: NodeId, path: &str) -> Result<NodeId, VfsError> {
        for part in path.split(SEPARATOR).filter(|s| !s.is_empty()) {
            match part {
                "." => continue,
                PARENT_DIR => {
                    // Stays put at the root.
                    if let Some(parent) = self.get_parent(current) {
                        current = parent;
                    }
                }
                name => {
                    current = self.find_child(current, name).ok_or(VfsError::NotFound)?;
                }
            }
        }
        Ok(current)
    }

    // Removal

    /// Releases `node` and every descendant, children before parents.
    /// Returns the number of nodes released.
    pub fn delete_subtree(&mut self, node: NodeId) -> Result<usize, VfsError> {
        if node == self.root {
            return Err(VfsError::PermissionDenied);
        }
        self.node(node)?;

        // Pre-order snapshot walked backwards visits every node after all of
        // its descendants, so each one is a leaf when it is removed.
        let doomed: Vec<NodeId> = node.descendants(&self.arena).collect();
        for id in doomed.iter().rev() {
            id.remove(&mut self.arena);
        }

        self.live_nodes -= doomed.len();
        debug!(released = doomed.len(), "deleted subtree");
        Ok(doomed.len())
    }

    pub fn remove(&mut self, parent: NodeId, name: &str) -> Result<(), VfsError> {
        self.require_directory(parent)?;
        let target = self.find_child(parent, name).ok_or(VfsError::NotFound)?;

        target.detach(&mut self.arena);
        self.delete_subtree(target)?;
        Ok(())
    }

    // Derived operations

    /// Paths of every node named `name` in the subtree rooted at `start`,
    /// `start` included, in pre-order.
    pub fn search(&self, start: NodeId, name: &str) -> Result<Vec<String>, VfsError> {
        self.node(start)?;
        Ok(start
            .descendants(&self.arena)
            .filter(|id| self.arena[*id].get().name == name)
            .map(|id| self.node_path(id))
            .collect())
    }

    /// Removes every file below `dir` whose name ends with `suffix`.
    /// Directories are always kept and always descended into.
    pub fn purge_by_suffix(
        &mut self,
        dir: NodeId,
        suffix: &str,
    ) -> Result<Vec<PurgedFile>, VfsError> {
        self.require_directory(dir)?;

        let mut purged = Vec::new();
        // One slot per open directory, holding the next child to visit there.
        let mut pending: Vec<Option<NodeId>> = vec![self.arena[dir].first_child()];

        while let Some(slot) = pending.last_mut() {
            let Some(current) = *slot else {
                pending.pop();
                continue;
            };
            // Advance before `current` can be unlinked.
            *slot = self.arena[current].next_sibling();

            let (is_directory, matches) = {
                let data = self.arena[current].get();
                (data.is_directory(), data.is_file() && data.name.ends_with(suffix))
            };

            if is_directory {
                pending.push(self.arena[current].first_child());
            } else if matches {
                let name = self.arena[current].get().name.clone();
                let path = self.node_path(current);
                current.detach(&mut self.arena);
                self.delete_subtree(current)?;
                purged.push(PurgedFile { name, path });
            }
        }

        info!(suffix, removed = purged.len(), "purged files by suffix");
        Ok(purged)
    }

    /// Releases the whole tree and reports how many nodes were live.
    pub fn teardown(self) -> usize {
        let released = self.live_nodes;
        drop(self.arena);
        released
    }
}
