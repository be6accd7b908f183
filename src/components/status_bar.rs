use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Status bar widget: selected entry path and kind, key hints, or a
/// transient status message.
pub struct StatusBarWidget<'a> {
    path_str: &'a str,
    kind_label: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(path_str: &'a str, kind_label: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            path_str,
            kind_label,
            theme,
            status_message: None,
            is_error: false,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_fg)
            } else {
                Style::default()
                    .bg(self.theme.status_bg)
                    .fg(self.theme.success_fg)
            };
            let display = format!("{msg:<width$}");
            let line = Line::from(Span::styled(display, style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        // Normal bar: [path] [kind] ... [key hints]
        let key_hints = " \u{2191}\u{2193}:move  \u{2190}:out  \u{2192}:in  q:quit ";
        let hints_len = key_hints.chars().count();
        let kind_len = self.kind_label.chars().count();

        let path_budget = width
            .saturating_sub(hints_len)
            .saturating_sub(kind_len)
            .saturating_sub(2);
        let path_chars = self.path_str.chars().count();
        let path_display = if path_chars > path_budget {
            let keep = path_budget.saturating_sub(3);
            let tail: String = self
                .path_str
                .chars()
                .skip(path_chars - keep)
                .collect();
            format!("...{tail}")
        } else {
            self.path_str.to_string()
        };

        let used = path_display.chars().count() + 1 + kind_len + hints_len;
        let gap = width.saturating_sub(used);

        let bar_style = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);
        let kind_style = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.dim_fg);
        let hints_style = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.dim_fg)
            .add_modifier(Modifier::DIM);

        let line = Line::from(vec![
            Span::styled(path_display, bar_style),
            Span::styled(" ", bar_style),
            Span::styled(self.kind_label.to_string(), kind_style),
            Span::styled(" ".repeat(gap), bar_style),
            Span::styled(key_hints, hints_style),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
