use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::fs::tree::{DirTree, EntryKind};
use crate::layout::pane::Pane;
use crate::theme::ThemeColors;

/// Renders one pane's children as a vertical list.
///
/// Styling per row: directories, files, the selected row of the focused pane,
/// and the remembered selection (trail) in ancestor and preview panes. When
/// the pane is anchored from the right, each row shows the trailing columns
/// of its name (the head is off the left screen edge).
pub struct PaneWidget<'a> {
    tree: &'a DirTree,
    pane: &'a Pane,
    is_focused: bool,
    theme: &'a ThemeColors,
}

impl<'a> PaneWidget<'a> {
    pub fn new(tree: &'a DirTree, pane: &'a Pane, is_focused: bool, theme: &'a ThemeColors) -> Self {
        Self {
            tree,
            pane,
            is_focused,
            theme,
        }
    }

    fn row_style(&self, row: usize, selected: usize, kind: EntryKind) -> Style {
        if row == selected && self.is_focused {
            Style::default()
                .bg(self.theme.selected_bg)
                .fg(self.theme.selected_fg)
                .add_modifier(Modifier::BOLD)
        } else if row == selected {
            Style::default().fg(self.theme.trail_fg)
        } else {
            match kind {
                EntryKind::Directory => Style::default()
                    .fg(self.theme.pane_dir_fg)
                    .add_modifier(Modifier::BOLD),
                EntryKind::File => Style::default().fg(self.theme.pane_file_fg),
            }
        }
    }
}

impl Widget for PaneWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let Some(children) = self.tree.children(self.pane.node()) else {
            return;
        };
        let selected = self.tree.selected(self.pane.node());
        let skip = if self.pane.anchor_left {
            0
        } else {
            usize::from(self.pane.natural_width().saturating_sub(self.pane.visible_cols))
        };
        let width = usize::from(area.width);

        for (row, &child) in children
            .iter()
            .enumerate()
            .skip(self.pane.start_row)
            .take(usize::from(area.height))
        {
            let y = area.y + (row - self.pane.start_row) as u16;
            let shown: String = self.tree.name(child).chars().skip(skip).take(width).collect();
            let style = self.row_style(row, selected, self.tree.kind(child));
            // Pad to the pane budget so the selection bar spans the column.
            buf.set_stringn(area.x, y, format!("{shown:<width$}"), width, style);
        }
    }
}
