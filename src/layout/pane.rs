use crate::fs::tree::{DirTree, NodeId};

/// Default blank columns between a pane's longest name and its neighbor.
pub const DEFAULT_PANE_MARGIN: u16 = 2;

/// A scrollable, horizontally placeable view of one directory node.
///
/// The pane does not own the node; it reads children and selection through
/// the tree. Vertical state is the scroll window (`start_row`); horizontal
/// state is assigned by the column coordinator on every layout pass.
#[derive(Debug)]
pub struct Pane {
    node: NodeId,
    /// First child row currently in the viewport.
    pub start_row: usize,
    natural_width: u16,
    /// Screen column of the pane's left edge.
    pub col_offset: u16,
    /// Columns granted by the coordinator; 0 means hidden this pass.
    pub visible_cols: u16,
    /// When false, the pane's trailing columns render at `col_offset`
    /// (the head is off the left screen edge).
    pub anchor_left: bool,
}

impl Pane {
    /// Create a pane for `node`, sized to its longest child name plus
    /// `margin`. Children must already be loaded; an empty directory gets a
    /// minimal one-column body.
    pub fn new(tree: &DirTree, node: NodeId, margin: u16) -> Self {
        let longest = tree
            .children(node)
            .unwrap_or(&[])
            .iter()
            .map(|&child| tree.name(child).chars().count())
            .max()
            .unwrap_or(0)
            .min((u16::MAX as usize).saturating_sub(usize::from(margin) + 1));
        Self {
            node,
            start_row: 0,
            natural_width: (longest.max(1) as u16).saturating_add(margin),
            col_offset: 0,
            visible_cols: 0,
            anchor_left: true,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Width the pane wants when nothing clips it.
    pub fn natural_width(&self) -> u16 {
        self.natural_width
    }

    pub fn is_visible(&self) -> bool {
        self.visible_cols > 0
    }

    pub(crate) fn hide(&mut self) {
        self.visible_cols = 0;
    }

    pub(crate) fn place(&mut self, col_offset: u16, visible_cols: u16, anchor_left: bool) {
        self.col_offset = col_offset;
        self.visible_cols = visible_cols;
        self.anchor_left = anchor_left;
    }

    /// Scroll just enough to keep `row` inside a viewport of `height` rows.
    pub fn follow_selection(&mut self, row: usize, height: usize) {
        if height == 0 {
            return;
        }
        if row < self.start_row {
            self.start_row = row;
        } else if row >= self.start_row + height {
            self.start_row = row - height + 1;
        }
    }
}
