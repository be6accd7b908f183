use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::app::App;
use crate::components::pane::PaneWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::fs::tree::EntryKind;

/// Render the application UI: the pane chain over a one-line status bar.
pub fn render(app: &mut App, frame: &mut Frame) {
    let [columns_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let selection = app.current_selection();
    let App {
        nav,
        columns,
        theme,
        status_message,
        ..
    } = app;

    columns.relayout(columns_area.width);
    columns.follow_selection(nav.tree(), usize::from(columns_area.height));

    let focused = columns.focused_index();
    for (index, pane) in columns.panes().iter().enumerate() {
        if !pane.is_visible() || columns_area.height == 0 {
            continue;
        }
        let area = Rect::new(
            columns_area.x + pane.col_offset,
            columns_area.y,
            pane.visible_cols,
            columns_area.height,
        );
        frame.render_widget(
            PaneWidget::new(nav.tree(), pane, index == focused, theme),
            area,
        );
    }

    let (path_str, kind_label) = match selection {
        Some(entry) => {
            let label = match entry.kind {
                EntryKind::Directory => "Dir",
                EntryKind::File => "File",
            };
            (entry.path().display().to_string(), label)
        }
        None => (nav.tree().path(nav.focus()).display().to_string(), "Empty"),
    };

    let mut status = StatusBarWidget::new(&path_str, kind_label, theme);
    if let Some(msg) = status_message {
        status = status.status_message(&msg.text, msg.is_error);
    }
    frame.render_widget(status, status_area);
}
