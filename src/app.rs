use std::path::Path;
use std::time::Instant;

use log::warn;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::fs::backend::RealFs;
use crate::fs::tree::Entry;
use crate::layout::columns::ColumnChain;
use crate::nav::Navigator;
use crate::theme::{self, ThemeColors};

/// A transient message shown in the status bar.
#[derive(Debug)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub created: Instant,
}

/// Main application state: the navigator, the pane chain over it, and the
/// bits of UI state that outlive a single frame.
pub struct App {
    pub nav: Navigator<RealFs>,
    pub columns: ColumnChain,
    pub theme: ThemeColors,
    pub should_quit: bool,
    pub status_message: Option<StatusMessage>,
}

impl App {
    /// Create a new App browsing `path`.
    pub fn new(path: &Path, config: &AppConfig) -> Result<Self> {
        let mut nav = Navigator::new(RealFs, path)?;
        let peeked = nav.peek()?;
        let columns = ColumnChain::new(nav.tree(), nav.focus(), peeked, config.pane_margin());
        Ok(Self {
            nav,
            columns,
            theme: theme::resolve_theme(&config.theme),
            should_quit: false,
            status_message: None,
        })
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// The entry presently selected (kind + path), for outer-loop actions.
    pub fn current_selection(&self) -> Option<Entry> {
        self.nav.current_selection()
    }

    /// Move the selection up one entry, wrapping.
    pub fn navigate_up(&mut self) {
        self.nav.move_up();
        self.sync_peek();
    }

    /// Move the selection down one entry, wrapping.
    pub fn navigate_down(&mut self) {
        self.nav.move_down();
        self.sync_peek();
    }

    /// Descend into the selected directory. A non-directory selection is a
    /// silent no-op; filesystem failures abort the command with a message.
    pub fn navigate_into(&mut self) {
        match self.nav.move_into() {
            Ok(()) => {
                let peeked = self.refresh_peek();
                self.columns
                    .descended(self.nav.tree(), self.nav.focus(), peeked);
            }
            Err(AppError::NotADirectory(_)) | Err(AppError::NoSelection) => {}
            Err(err) => self.report_error(err),
        }
    }

    /// Ascend to the parent directory. At the filesystem root this is a
    /// defined no-op.
    pub fn navigate_out(&mut self) {
        match self.nav.move_out() {
            Ok(_) => {
                let peeked = self.refresh_peek();
                self.columns
                    .ascended(self.nav.tree(), self.nav.focus(), peeked);
            }
            Err(AppError::RootBoundary) => {}
            Err(err) => self.report_error(err),
        }
    }

    fn sync_peek(&mut self) {
        let peeked = self.refresh_peek();
        self.columns.selection_changed(self.nav.tree(), peeked);
    }

    /// Preload the selected directory for the preview pane. A failed preload
    /// (e.g. permission denied) downgrades to "no peek" with a message.
    fn refresh_peek(&mut self) -> bool {
        match self.nav.peek() {
            Ok(peeked) => peeked,
            Err(err) => {
                warn!("peek failed: {err}");
                self.report_error(err);
                false
            }
        }
    }

    fn report_error(&mut self, err: AppError) {
        self.status_message = Some(StatusMessage {
            text: err.to_string(),
            is_error: true,
            created: Instant::now(),
        });
    }

    /// Set a status message with current timestamp.
    #[allow(dead_code)]
    pub fn set_status_message(&mut self, text: String) {
        self.status_message = Some(StatusMessage {
            text,
            is_error: false,
            created: Instant::now(),
        });
    }

    /// Clear the status message once it has been shown for a few seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some(ref msg) = self.status_message {
            if msg.created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }
}
