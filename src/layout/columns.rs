use crate::fs::tree::{DirTree, NodeId};
use crate::layout::pane::Pane;

/// Composes the ancestor → focused → peek pane chain into a Miller-column
/// layout.
///
/// The chain holds at most one pane beyond the focused one (the peek pane,
/// previewing the selected directory). On every layout pass the coordinator
/// decides which panes are visible, at what column offsets, and with which
/// anchoring, so that the focused pane is never clipped, at most one pane is
/// clipped at the screen edge furthest from focus, and no two panes overlap.
#[derive(Debug)]
pub struct ColumnChain {
    panes: Vec<Pane>,
    focused: usize,
    leftmost: usize,
    rightmost: usize,
    margin: u16,
}

impl ColumnChain {
    /// Build the initial chain: one pane for the focused directory plus a
    /// peek pane when the current selection is an (already peeked) directory.
    pub fn new(tree: &DirTree, focus: NodeId, peeked: bool, margin: u16) -> Self {
        let mut chain = Self {
            panes: vec![Pane::new(tree, focus, margin)],
            focused: 0,
            leftmost: 0,
            rightmost: 0,
            margin,
        };
        chain.sync_peek(tree, peeked);
        chain
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn focused_index(&self) -> usize {
        self.focused
    }

    #[allow(dead_code)]
    pub fn leftmost_visible(&self) -> usize {
        self.leftmost
    }

    #[allow(dead_code)]
    pub fn rightmost_visible(&self) -> usize {
        self.rightmost
    }

    /// The selection moved inside the focused directory: drop the stale peek
    /// chain and rebuild the peek pane for the new selection.
    pub fn selection_changed(&mut self, tree: &DirTree, peeked: bool) {
        self.sync_peek(tree, peeked);
    }

    /// Focus descended into `focus`. The prior peek pane is reused as the
    /// focused pane when it matches; anything beyond the new focus is
    /// discarded before the peek pane for the restored selection is built.
    pub fn descended(&mut self, tree: &DirTree, focus: NodeId, peeked: bool) {
        let next = self.focused + 1;
        if self.panes.get(next).map(|pane| pane.node()) != Some(focus) {
            self.panes.truncate(next);
            self.panes.push(Pane::new(tree, focus, self.margin));
        }
        self.focused = next;
        self.sync_peek(tree, peeked);
    }

    /// Focus ascended to `focus`. A missing parent pane (new root) is
    /// inserted at index 0, shifting the chain right; otherwise the existing
    /// pane is reused. The old focused pane stays on as the peek pane.
    pub fn ascended(&mut self, tree: &DirTree, focus: NodeId, peeked: bool) {
        if self.focused == 0 {
            self.panes.insert(0, Pane::new(tree, focus, self.margin));
        } else {
            self.focused -= 1;
        }
        self.sync_peek(tree, peeked);
    }

    /// Make the pane slot after focus agree with the current selection:
    /// reuse the pane when it already previews the selected directory,
    /// rebuild it when the selection changed, drop it when the selection is
    /// a file or the directory is empty. Panes further right are always
    /// pruned; they are unreachable without re-navigating.
    fn sync_peek(&mut self, tree: &DirTree, peeked: bool) {
        let slot = self.focused + 1;
        let want = if peeked {
            tree.selected_child(self.panes[self.focused].node())
        } else {
            None
        };
        match want {
            Some(node) if self.panes.get(slot).map(|pane| pane.node()) == Some(node) => {
                self.panes.truncate(slot + 1);
            }
            Some(node) => {
                self.panes.truncate(slot);
                self.panes.push(Pane::new(tree, node, self.margin));
            }
            None => self.panes.truncate(slot),
        }
        if self.rightmost >= self.panes.len() {
            self.rightmost = self.panes.len() - 1;
        }
        if self.leftmost >= self.panes.len() {
            self.leftmost = self.focused;
        }
    }

    /// Scroll every pane so its directory's selected row stays visible.
    pub fn follow_selection(&mut self, tree: &DirTree, height: usize) {
        for pane in &mut self.panes {
            let row = tree.selected(pane.node());
            pane.follow_selection(row, height);
        }
    }

    /// Recompute visibility, offsets and anchoring for a terminal of `cols`
    /// columns.
    ///
    /// Tries left-to-right first, accumulating widths from the previous
    /// leftmost visible pane; if the pane that must be fully shown (the peek
    /// pane when present, else the focused pane) would not fit, falls back
    /// to right-to-left anchoring against the right screen edge.
    pub fn relayout(&mut self, cols: u16) {
        for pane in &mut self.panes {
            pane.hide();
        }
        if self.panes.is_empty() || cols == 0 {
            return;
        }
        if self.focused < self.leftmost {
            self.leftmost = self.focused;
        }
        let must_show = (self.focused + 1).min(self.panes.len() - 1);
        let mut ahead: u32 = 0;
        for pane in &self.panes[self.leftmost..must_show] {
            ahead += u32::from(pane.natural_width());
        }
        if ahead + u32::from(self.panes[must_show].natural_width()) > u32::from(cols) {
            self.layout_rtl(must_show, cols);
        } else {
            self.layout_ltr(cols);
        }
    }

    fn layout_ltr(&mut self, cols: u16) {
        let mut offset: u32 = 0;
        let mut last = self.leftmost;
        for i in self.leftmost..self.panes.len() {
            if offset >= u32::from(cols) {
                break;
            }
            let start = offset as u16;
            let pane = &mut self.panes[i];
            let budget = pane.natural_width().min(cols - start);
            pane.place(start, budget, true);
            last = i;
            offset += u32::from(pane.natural_width());
        }
        self.rightmost = last;
    }

    fn layout_rtl(&mut self, anchor: usize, cols: u16) {
        // When the focused and peek panes together cannot fit, the focused
        // pane wins: pin it fully visible at the left edge and clip the peek
        // at the right edge instead.
        if anchor > self.focused {
            let focus_width = self.panes[self.focused].natural_width();
            let peek_width = self.panes[anchor].natural_width();
            if u32::from(focus_width) + u32::from(peek_width) > u32::from(cols) {
                self.panes[self.focused].place(0, focus_width.min(cols), true);
                self.leftmost = self.focused;
                self.rightmost = if cols > focus_width {
                    self.panes[anchor].place(focus_width, cols - focus_width, true);
                    anchor
                } else {
                    self.focused
                };
                return;
            }
        }

        let mut edge = i32::from(cols);
        let mut first = anchor;
        for i in (0..=anchor).rev() {
            if edge <= 0 {
                break;
            }
            let pane = &mut self.panes[i];
            let width = i32::from(pane.natural_width());
            edge -= width;
            if edge < 0 {
                // Straddles the left screen edge: show the tail only.
                pane.place(0, (width + edge) as u16, false);
            } else {
                pane.place(edge as u16, pane.natural_width(), true);
            }
            first = i;
        }
        self.leftmost = first;
        self.rightmost = anchor;
    }
}
