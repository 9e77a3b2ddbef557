/// NFS server configuration screen

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::core::ProvisionManager;
use crate::screens::{Screen, ScreenAction};
use crate::widgets::{button_line, input_line, FocusRing, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    ExportPath,
    ClientSpec,
    AccessMode,
    SyncMode,
    SubtreeOption,
    Setup,
    Back,
}

pub struct ServerScreen {
    provision: ProvisionManager,
    export_path: TextField,
    client_spec: TextField,
    access_mode: TextField,
    sync_mode: TextField,
    subtree_option: TextField,
    focus: FocusRing<Control>,
    output: String,
}

impl ServerScreen {
    pub fn new(provision: ProvisionManager) -> Self {
        Self {
            provision,
            export_path: TextField::default(),
            client_spec: TextField::default(),
            access_mode: TextField::default(),
            sync_mode: TextField::default(),
            subtree_option: TextField::default(),
            focus: FocusRing::new(vec![
                Control::ExportPath,
                Control::ClientSpec,
                Control::AccessMode,
                Control::SyncMode,
                Control::SubtreeOption,
                Control::Setup,
                Control::Back,
            ]),
            output: String::new(),
        }
    }

    fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus.current() {
            Control::ExportPath => Some(&mut self.export_path),
            Control::ClientSpec => Some(&mut self.client_spec),
            Control::AccessMode => Some(&mut self.access_mode),
            Control::SyncMode => Some(&mut self.sync_mode),
            Control::SubtreeOption => Some(&mut self.subtree_option),
            Control::Setup | Control::Back => None,
        }
    }

    fn submit(&mut self) {
        let result = self.provision.setup_server(
            self.export_path.value(),
            self.client_spec.value(),
            self.access_mode.value(),
            self.sync_mode.value(),
            self.subtree_option.value(),
        );
        self.output = match result {
            Ok(output) => output,
            Err(e) => format!("Error: {e}"),
        };
    }
}

impl Screen for ServerScreen {
    fn title(&self) -> &'static str {
        "Configure NFS Server"
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Up => self.focus.prev(),
            KeyCode::Down => self.focus.next(),
            KeyCode::Enter => match self.focus.current() {
                Control::Setup => self.submit(),
                Control::Back => return ScreenAction::Pop,
                _ => {}
            },
            KeyCode::Esc => return ScreenAction::Pop,
            KeyCode::Backspace => {
                if let Some(field) = self.focused_field_mut() {
                    field.backspace();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.focused_field_mut() {
                    field.push(c);
                }
            }
            _ => {}
        }
        ScreenAction::None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(12), Constraint::Min(3)])
            .split(area);

        let focus = &self.focus;
        let form = vec![
            input_line(
                "Directory to export",
                &self.export_path,
                "/srv/nfs",
                focus.is_focused(Control::ExportPath),
            ),
            input_line(
                "Client spec (default *)",
                &self.client_spec,
                "192.168.1.0/24 or *",
                focus.is_focused(Control::ClientSpec),
            ),
            input_line(
                "Access mode (default rw)",
                &self.access_mode,
                "rw or ro",
                focus.is_focused(Control::AccessMode),
            ),
            input_line(
                "Sync mode (default sync)",
                &self.sync_mode,
                "sync or async",
                focus.is_focused(Control::SyncMode),
            ),
            input_line(
                "Subtree option (default no_subtree_check)",
                &self.subtree_option,
                "no_subtree_check or subtree_check",
                focus.is_focused(Control::SubtreeOption),
            ),
            Line::from(""),
            button_line("Setup Server", focus.is_focused(Control::Setup)),
            button_line("Back", focus.is_focused(Control::Back)),
        ];

        let form_widget = Paragraph::new(form).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    " Configure NFS Server ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
        );
        frame.render_widget(form_widget, chunks[0]);

        let output_widget = Paragraph::new(self.output.as_str())
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Output "));
        frame.render_widget(output_widget, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::runner::MockCommandRunner;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen(runner: MockCommandRunner) -> ServerScreen {
        let provision =
            ProvisionManager::new(Arc::new(runner), "./bash/nfs_server.sh", "./bash/nfs_client.sh");
        ServerScreen::new(provision)
    }

    #[test]
    fn blank_export_path_short_circuits_without_running_script() {
        // Mock has no expectations: any command invocation panics.
        let mut screen = screen(MockCommandRunner::new());
        for _ in 0..5 {
            screen.handle_key(press(KeyCode::Down));
        }
        assert_eq!(screen.handle_key(press(KeyCode::Enter)), ScreenAction::None);
        assert!(
            screen.output.contains("Export path cannot be empty"),
            "unexpected output: {}",
            screen.output
        );
    }

    #[test]
    fn typed_export_path_with_blank_options_invokes_script_with_defaults() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|req| {
                req.program == "./bash/nfs_server.sh"
                    && req.args == ["/srv/nfs", "*", "rw", "sync", "no_subtree_check"]
            })
            .times(1)
            .returning(|_| Ok("Export configured.".to_string()));

        let mut screen = screen(runner);
        for c in "/srv/nfs".chars() {
            screen.handle_key(press(KeyCode::Char(c)));
        }
        for _ in 0..5 {
            screen.handle_key(press(KeyCode::Down));
        }
        screen.handle_key(press(KeyCode::Enter));
        assert_eq!(screen.output, "Export configured.");
    }

    #[test]
    fn back_button_pops_the_screen() {
        let mut screen = screen(MockCommandRunner::new());
        for _ in 0..6 {
            screen.handle_key(press(KeyCode::Down));
        }
        assert_eq!(screen.handle_key(press(KeyCode::Enter)), ScreenAction::Pop);
    }

    #[test]
    fn script_failure_is_shown_with_exit_code_and_stderr() {
        use crate::core::runner::RunnerError;

        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|_| {
            Err(RunnerError::ExitStatus {
                code: 2,
                stderr: "X".to_string(),
            })
        });

        let mut screen = screen(runner);
        screen.export_path = TextField::from("/srv/nfs");
        for _ in 0..5 {
            screen.handle_key(press(KeyCode::Down));
        }
        screen.handle_key(press(KeyCode::Enter));
        assert!(screen.output.contains('2'), "missing code: {}", screen.output);
        assert!(screen.output.contains('X'), "missing stderr: {}", screen.output);
    }
}
