use std::path::Path;

use log::debug;

use crate::error::{AppError, Result};
use crate::fs::backend::FsBackend;
use crate::fs::tree::{DirTree, Entry, EntryKind, NodeId, ParentLink};

/// How `move_out` reached the parent directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ascent {
    /// The parent was already in the tree.
    Reused,
    /// The parent was synthesized and becomes the new root.
    NewRoot,
}

/// The navigation state machine: a focused directory node plus the tree it
/// lives in.
///
/// The navigator exclusively owns and mutates the tree; views refer to nodes
/// by id and only read, or write through the node's own selection setter.
/// Every operation runs to completion before the next command, so the
/// working-directory side effects of descend/ascend never race.
pub struct Navigator<B: FsBackend> {
    tree: DirTree,
    fs: B,
    focus: NodeId,
}

impl<B: FsBackend> Navigator<B> {
    /// Start browsing at `start`, loading its children immediately.
    pub fn new(mut fs: B, start: &Path) -> Result<Self> {
        let (mut tree, root) = DirTree::with_root(start);
        tree.load_children(root, &mut fs, None)?;
        Ok(Self {
            tree,
            fs,
            focus: root,
        })
    }

    pub fn tree(&self) -> &DirTree {
        &self.tree
    }

    pub fn focus(&self) -> NodeId {
        self.focus
    }

    /// Selected index within the focused directory.
    pub fn selected_index(&self) -> usize {
        self.tree.selected(self.focus)
    }

    /// The entry presently selected, for the outer loop to act on.
    pub fn current_selection(&self) -> Option<Entry> {
        self.tree
            .selected_child(self.focus)
            .map(|child| self.tree.entry(child))
    }

    /// Move the selection down one entry, wrapping from last to first.
    /// No-op in an empty directory.
    pub fn move_down(&mut self) {
        let count = self.tree.child_count(self.focus);
        if count == 0 {
            return;
        }
        let next = (self.tree.selected(self.focus) + 1) % count;
        self.tree.select_child(self.focus, next);
    }

    /// Move the selection up one entry, wrapping from first to last.
    /// No-op in an empty directory.
    pub fn move_up(&mut self) {
        let count = self.tree.child_count(self.focus);
        if count == 0 {
            return;
        }
        let next = (self.tree.selected(self.focus) + count - 1) % count;
        self.tree.select_child(self.focus, next);
    }

    /// Descend into the selected directory.
    ///
    /// Loads the target's children on first visit, changes the working
    /// directory, and resumes the selection the target last had. Fails with
    /// `NoSelection` in an empty directory and `NotADirectory` on a file;
    /// both leave all state unchanged.
    pub fn move_into(&mut self) -> Result<()> {
        let child = self
            .tree
            .selected_child(self.focus)
            .ok_or(AppError::NoSelection)?;
        let path = self.tree.path(child);
        if self.tree.kind(child) != EntryKind::Directory {
            return Err(AppError::NotADirectory(path));
        }
        self.tree.load_children(child, &mut self.fs, None)?;
        self.fs.change_dir(&path)?;
        self.focus = child;
        debug!("descended into {}", path.display());
        Ok(())
    }

    /// Ascend to the parent directory.
    ///
    /// If the parent is not yet in the tree it is synthesized, loaded with
    /// the current node spliced back in, and becomes the new root. The
    /// parent's selection lands on the directory just left, located among its
    /// siblings. Fails with `RootBoundary` at the filesystem root.
    pub fn move_out(&mut self) -> Result<Ascent> {
        let prev = self.focus;
        let (parent, ascent) = match self.tree.parent(prev) {
            ParentLink::Known(parent) => {
                self.fs.change_dir(&self.tree.path(parent))?;
                (parent, Ascent::Reused)
            }
            ParentLink::Unresolved => {
                let here = self.tree.path(prev);
                let parent_path = self.fs.parent_of(&here).ok_or(AppError::RootBoundary)?;
                let parent = self.tree.synthesize_dir(&parent_path);
                self.tree.load_children(parent, &mut self.fs, Some(prev))?;
                self.fs.change_dir(&parent_path)?;
                debug!("discovered new root {}", parent_path.display());
                (parent, Ascent::NewRoot)
            }
        };
        // The directory just left may have vanished from its parent's
        // snapshot (deleted on disk between visits); keep the parent's own
        // persisted selection in that case.
        if let Some(position) = self.tree.position_of(parent, prev) {
            self.tree.select_child(parent, position);
        }
        self.focus = parent;
        Ok(ascent)
    }

    /// Eagerly load the selected directory's children so a preview pane can
    /// be built. Neither focus nor working directory change. Returns whether
    /// a directory was loaded; `false` for files and empty directories.
    pub fn peek(&mut self) -> Result<bool> {
        let Some(child) = self.tree.selected_child(self.focus) else {
            return Ok(false);
        };
        if self.tree.kind(child) != EntryKind::Directory {
            return Ok(false);
        }
        self.tree.load_children(child, &mut self.fs, None)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::backend::{ListedEntry, RealFs};
    use std::collections::HashMap;
    use std::fs::{self, File};
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// In-memory backend: observable chdir, no process-global state.
    struct FakeFs {
        dirs: HashMap<PathBuf, Vec<ListedEntry>>,
        cwd: PathBuf,
    }

    impl FakeFs {
        fn new(dirs: &[(&str, Vec<ListedEntry>)]) -> Self {
            Self {
                dirs: dirs
                    .iter()
                    .map(|(path, entries)| (PathBuf::from(path), entries.clone()))
                    .collect(),
                cwd: PathBuf::new(),
            }
        }
    }

    impl FsBackend for FakeFs {
        fn list_dir(&mut self, path: &Path) -> Result<Vec<ListedEntry>> {
            self.dirs.get(path).cloned().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory").into()
            })
        }

        fn change_dir(&mut self, path: &Path) -> Result<()> {
            self.cwd = path.to_path_buf();
            Ok(())
        }

        fn parent_of(&self, path: &Path) -> Option<PathBuf> {
            path.parent().map(Path::to_path_buf)
        }
    }

    /// Scenario fixture: /top/bdir is a directory between two files.
    fn scenario_fs() -> FakeFs {
        FakeFs::new(&[
            (
                "/top",
                vec![
                    ListedEntry::file("a.txt"),
                    ListedEntry::dir("bdir"),
                    ListedEntry::file("c.txt"),
                ],
            ),
            (
                "/top/bdir",
                vec![
                    ListedEntry::file("one"),
                    ListedEntry::file("two"),
                    ListedEntry::file("three"),
                ],
            ),
            ("/", vec![ListedEntry::dir("top")]),
        ])
    }

    fn scenario_nav() -> Navigator<FakeFs> {
        Navigator::new(scenario_fs(), Path::new("/top")).unwrap()
    }

    #[test]
    fn down_cycles_through_all_children() {
        let mut nav = scenario_nav();
        let count = nav.tree().child_count(nav.focus());
        let start = nav.selected_index();
        for _ in 0..count {
            nav.move_down();
        }
        assert_eq!(nav.selected_index(), start);
    }

    #[test]
    fn up_cycles_through_all_children() {
        let mut nav = scenario_nav();
        nav.move_down();
        let count = nav.tree().child_count(nav.focus());
        let start = nav.selected_index();
        for _ in 0..count {
            nav.move_up();
        }
        assert_eq!(nav.selected_index(), start);
    }

    #[test]
    fn up_wraps_from_first_to_last() {
        let mut nav = scenario_nav();
        nav.move_up();
        assert_eq!(nav.selected_index(), 2);
    }

    #[test]
    fn moves_in_empty_directory_are_noops() {
        let fs = FakeFs::new(&[("/empty", vec![])]);
        let mut nav = Navigator::new(fs, Path::new("/empty")).unwrap();
        nav.move_down();
        nav.move_up();
        assert_eq!(nav.selected_index(), 0);
        assert!(nav.current_selection().is_none());
    }

    #[test]
    fn scenario_a_selection_walk() {
        let mut nav = scenario_nav();
        assert_eq!(nav.selected_index(), 0); // a.txt
        nav.move_down();
        nav.move_down();
        assert_eq!(nav.selected_index(), 2); // c.txt
        nav.move_up();
        assert_eq!(nav.selected_index(), 1); // bdir
        nav.move_into().unwrap();
        assert_eq!(nav.tree().path(nav.focus()), PathBuf::from("/top/bdir"));
        assert_eq!(nav.tree().child_count(nav.focus()), 3);
    }

    #[test]
    fn move_into_file_is_rejected_and_state_unchanged() {
        let mut nav = scenario_nav();
        let focus = nav.focus();
        let err = nav.move_into().unwrap_err(); // a.txt selected
        assert!(matches!(err, AppError::NotADirectory(_)));
        assert_eq!(nav.focus(), focus);
        assert_eq!(nav.selected_index(), 0);
    }

    #[test]
    fn move_into_empty_directory_is_no_selection() {
        let fs = FakeFs::new(&[("/empty", vec![])]);
        let mut nav = Navigator::new(fs, Path::new("/empty")).unwrap();
        assert!(matches!(nav.move_into(), Err(AppError::NoSelection)));
    }

    #[test]
    fn move_into_changes_working_directory() {
        let mut nav = scenario_nav();
        nav.move_down(); // bdir
        nav.move_into().unwrap();
        assert_eq!(nav.fs.cwd, PathBuf::from("/top/bdir"));
    }

    #[test]
    fn selection_persists_across_descent() {
        let mut nav = scenario_nav();
        nav.move_down(); // bdir at index 1
        nav.move_into().unwrap();
        nav.move_down();
        nav.move_down();
        nav.move_out().unwrap();
        assert_eq!(nav.tree().path(nav.focus()), PathBuf::from("/top"));
        assert_eq!(nav.selected_index(), 1); // back on bdir
    }

    #[test]
    fn reentry_resumes_previous_cursor() {
        let mut nav = scenario_nav();
        nav.move_down();
        nav.move_into().unwrap();
        nav.move_down();
        nav.move_down();
        assert_eq!(nav.selected_index(), 2);
        nav.move_out().unwrap();
        nav.move_into().unwrap();
        assert_eq!(nav.selected_index(), 2); // cache reused, not reset
    }

    #[test]
    fn move_out_synthesizes_and_splices_new_root() {
        let mut nav = scenario_nav();
        let old_focus = nav.focus();
        let ascent = nav.move_out().unwrap();
        assert_eq!(ascent, Ascent::NewRoot);
        assert_eq!(nav.tree().path(nav.focus()), PathBuf::from("/"));
        assert_eq!(nav.fs.cwd, PathBuf::from("/"));
        // The old root was spliced in, not duplicated, and is now selected.
        let pos = nav.tree().position_of(nav.focus(), old_focus).unwrap();
        assert_eq!(nav.selected_index(), pos);
        assert_eq!(
            nav.tree().parent(old_focus),
            ParentLink::Known(nav.focus())
        );
    }

    #[test]
    fn move_out_reuses_known_parent() {
        let mut nav = scenario_nav();
        nav.move_down();
        nav.move_into().unwrap();
        assert_eq!(nav.move_out().unwrap(), Ascent::Reused);
    }

    #[test]
    fn move_out_at_filesystem_root_is_root_boundary() {
        let fs = FakeFs::new(&[("/", vec![ListedEntry::dir("top")])]);
        let mut nav = Navigator::new(fs, Path::new("/")).unwrap();
        let focus = nav.focus();
        assert!(matches!(nav.move_out(), Err(AppError::RootBoundary)));
        assert_eq!(nav.focus(), focus);
    }

    #[test]
    fn peek_loads_selection_without_moving() {
        let mut nav = scenario_nav();
        nav.move_down(); // bdir
        let bdir = nav.tree().selected_child(nav.focus()).unwrap();
        assert!(!nav.tree().is_loaded(bdir));

        assert!(nav.peek().unwrap());
        assert!(nav.tree().is_loaded(bdir));
        assert_ne!(nav.focus(), bdir);
        assert_eq!(nav.fs.cwd, PathBuf::new()); // no chdir happened
    }

    #[test]
    fn peek_on_file_is_false() {
        let mut nav = scenario_nav();
        assert!(!nav.peek().unwrap()); // a.txt
    }

    #[test]
    fn peek_in_empty_directory_is_false() {
        let fs = FakeFs::new(&[("/empty", vec![])]);
        let mut nav = Navigator::new(fs, Path::new("/empty")).unwrap();
        assert!(!nav.peek().unwrap());
    }

    #[test]
    fn current_selection_reports_kind_and_path() {
        let mut nav = scenario_nav();
        let entry = nav.current_selection().unwrap();
        assert_eq!(entry.kind, EntryKind::File);
        assert_eq!(entry.path(), PathBuf::from("/top/a.txt"));
        nav.move_down();
        let entry = nav.current_selection().unwrap();
        assert_eq!(entry.kind, EntryKind::Directory);
        assert_eq!(entry.path(), PathBuf::from("/top/bdir"));
    }

    #[test]
    fn failed_descent_leaves_state_unchanged() {
        // bdir's listing is missing, so loading it fails.
        let fs = FakeFs::new(&[("/top", vec![ListedEntry::dir("bdir")])]);
        let mut nav = Navigator::new(fs, Path::new("/top")).unwrap();
        let focus = nav.focus();
        assert!(matches!(nav.move_into(), Err(AppError::Io(_))));
        assert_eq!(nav.focus(), focus);
        assert_eq!(nav.fs.cwd, PathBuf::new());
    }

    #[test]
    fn navigates_a_real_filesystem() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub").join("inner.txt")).unwrap();
        File::create(dir.path().join("zz.txt")).unwrap();

        let mut nav = Navigator::new(RealFs, dir.path()).unwrap();
        assert_eq!(nav.tree().child_count(nav.focus()), 2);
        nav.move_into().unwrap(); // "sub" sorts first
        assert_eq!(nav.tree().path(nav.focus()), dir.path().join("sub"));
        nav.move_out().unwrap();
        assert_eq!(nav.tree().path(nav.focus()), dir.path().to_path_buf());
        assert_eq!(nav.selected_index(), 0);
    }
}
