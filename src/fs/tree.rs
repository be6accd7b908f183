use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::backend::FsBackend;

/// Kind of filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Identity of one filesystem object: the directory containing it plus its
/// name. The full path is always derived, never stored alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub dir: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}

impl Entry {
    /// Full path of the entry.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }
}

/// Index of a node in the [`DirTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Upward link of a node.
///
/// `Unresolved` means the parent directory has not been discovered yet; it is
/// resolved exactly once, on the first ascend past the known root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentLink {
    Unresolved,
    Known(NodeId),
}

/// Directory-only state: lazily loaded children and the persisted selection.
#[derive(Debug, Default)]
struct DirState {
    /// `None` until the first traversal; a point-in-time snapshot afterwards.
    children: Option<Vec<NodeId>>,
    selected: usize,
}

#[derive(Debug)]
enum NodeKind {
    File,
    Directory(DirState),
}

#[derive(Debug)]
struct Node {
    dir: PathBuf,
    name: String,
    parent: ParentLink,
    kind: NodeKind,
}

/// Arena holding every discovered filesystem node.
///
/// The arena is the single owner of all nodes; everything else refers to them
/// by [`NodeId`]. Nodes are created on demand during traversal and retained
/// for the process lifetime, so ids never dangle.
#[derive(Debug)]
pub struct DirTree {
    nodes: Vec<Node>,
}

/// Split a path into its containing directory and name.
///
/// The filesystem root has no file name; it keeps its own rendering as the
/// name with an empty containing path, so the join round-trips.
fn split_path(path: &Path) -> (PathBuf, String) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    (dir, name)
}

impl DirTree {
    /// Create a tree whose root is the directory at `path`, children not yet
    /// loaded and parent not yet discovered.
    pub fn with_root(path: &Path) -> (Self, NodeId) {
        let mut tree = Self { nodes: Vec::new() };
        let root = tree.synthesize_dir(path);
        (tree, root)
    }

    /// Allocate a directory node for `path` with an unresolved parent link.
    ///
    /// Used for the initial root and for ancestors discovered on ascend.
    pub fn synthesize_dir(&mut self, path: &Path) -> NodeId {
        let (dir, name) = split_path(path);
        self.alloc(Node {
            dir,
            name,
            parent: ParentLink::Unresolved,
            kind: NodeKind::Directory(DirState::default()),
        })
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn dir_state(&self, id: NodeId) -> Option<&DirState> {
        match &self.node(id).kind {
            NodeKind::Directory(state) => Some(state),
            NodeKind::File => None,
        }
    }

    fn dir_state_mut(&mut self, id: NodeId) -> Option<&mut DirState> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Directory(state) => Some(state),
            NodeKind::File => None,
        }
    }

    pub fn kind(&self, id: NodeId) -> EntryKind {
        match self.node(id).kind {
            NodeKind::File => EntryKind::File,
            NodeKind::Directory(_) => EntryKind::Directory,
        }
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.node(id).name
    }

    /// Full path of the node, derived from containing dir + name.
    pub fn path(&self, id: NodeId) -> PathBuf {
        let node = self.node(id);
        node.dir.join(&node.name)
    }

    /// Identity record of the node.
    pub fn entry(&self, id: NodeId) -> Entry {
        let node = self.node(id);
        Entry {
            dir: node.dir.clone(),
            name: node.name.clone(),
            kind: self.kind(id),
        }
    }

    pub fn parent(&self, id: NodeId) -> ParentLink {
        self.node(id).parent
    }

    /// Whether a directory's children snapshot has been taken.
    pub fn is_loaded(&self, id: NodeId) -> bool {
        self.dir_state(id)
            .map(|state| state.children.is_some())
            .unwrap_or(false)
    }

    /// Loaded children of a directory, `None` for files and unloaded dirs.
    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.dir_state(id)?.children.as_deref()
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).map(<[NodeId]>::len).unwrap_or(0)
    }

    /// Bounds-checked child lookup.
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id)?.get(index).copied()
    }

    /// Persisted selected-child index (0 for empty or unloaded directories).
    pub fn selected(&self, id: NodeId) -> usize {
        self.dir_state(id).map(|state| state.selected).unwrap_or(0)
    }

    /// The currently selected child, if the directory has any children.
    pub fn selected_child(&self, id: NodeId) -> Option<NodeId> {
        self.child(id, self.selected(id))
    }

    /// Set the selected child. Out-of-range indices are a logic error in the
    /// caller, not a recoverable condition.
    pub fn select_child(&mut self, id: NodeId, index: usize) {
        let count = self.child_count(id);
        debug_assert!(
            index == 0 || index < count,
            "select_child index {index} out of range for {count} children"
        );
        if let Some(state) = self.dir_state_mut(id) {
            state.selected = index;
        }
    }

    /// Position of `child` among `parent`'s children.
    pub fn position_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent)?.iter().position(|&c| c == child)
    }

    /// Take the children snapshot of a directory. No-op if already loaded.
    ///
    /// Children are sorted by case-insensitive name. If `existing` names an
    /// already-discovered node whose full path matches one of the listed
    /// subdirectories, that node is spliced in as the child instead of a
    /// fresh one, preserving its cached selection and grandchildren; this is
    /// how a descended-into subtree survives rediscovery from above.
    pub fn load_children<B: FsBackend>(
        &mut self,
        id: NodeId,
        fs: &mut B,
        existing: Option<NodeId>,
    ) -> Result<()> {
        if self.is_loaded(id) {
            return Ok(());
        }
        let dir_path = self.path(id);
        let mut listed = fs.list_dir(&dir_path)?;
        listed.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        let existing_path = existing.map(|e| self.path(e));
        let mut children = Vec::with_capacity(listed.len());
        for item in listed {
            let spliced = existing.zip(existing_path.as_ref()).and_then(|(prior, path)| {
                (item.is_dir && *path == dir_path.join(&item.name)).then_some(prior)
            });
            let child = if let Some(prior) = spliced {
                self.nodes[prior.0].parent = ParentLink::Known(id);
                prior
            } else {
                self.alloc(Node {
                    dir: dir_path.clone(),
                    name: item.name,
                    parent: ParentLink::Known(id),
                    kind: if item.is_dir {
                        NodeKind::Directory(DirState::default())
                    } else {
                        NodeKind::File
                    },
                })
            };
            children.push(child);
        }

        if let Some(state) = self.dir_state_mut(id) {
            state.selected = if children.is_empty() {
                0
            } else {
                state.selected.min(children.len() - 1)
            };
            state.children = Some(children);
        }
        Ok(())
    }
}
