/// NFS client configuration screen

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
    ServerAddr,
    ExportPath,
    MountPoint,
    Mount,
    Back,
}

pub struct ClientScreen {
    provision: ProvisionManager,
    server_addr: TextField,
    export_path: TextField,
    mount_point: TextField,
    focus: FocusRing<Control>,
    output: String,
}

impl ClientScreen {
    pub fn new(provision: ProvisionManager) -> Self {
        Self {
            provision,
            server_addr: TextField::default(),
            export_path: TextField::default(),
            mount_point: TextField::default(),
            focus: FocusRing::new(vec![
                Control::ServerAddr,
                Control::ExportPath,
                Control::MountPoint,
                Control::Mount,
                Control::Back,
            ]),
            output: String::new(),
        }
    }

    fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus.current() {
            Control::ServerAddr => Some(&mut self.server_addr),
            Control::ExportPath => Some(&mut self.export_path),
            Control::MountPoint => Some(&mut self.mount_point),
            Control::Mount | Control::Back => None,
        }
    }

    fn submit(&mut self) {
        let result = self.provision.mount_share(
            self.server_addr.value(),
            self.export_path.value(),
            self.mount_point.value(),
        );
        self.output = match result {
            Ok(output) => output,
            Err(e) => format!("Error: {e}"),
        };
    }
}

impl Screen for ClientScreen {
    fn title(&self) -> &'static str {
        "Configure NFS Client"
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Up => self.focus.prev(),
            KeyCode::Down => self.focus.next(),
            KeyCode::Enter => match self.focus.current() {
                Control::Mount => self.submit(),
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
            .constraints([Constraint::Length(8), Constraint::Min(3)])
            .split(area);

        let focus = &self.focus;
        let form = vec![
            input_line(
                "NFS server address",
                &self.server_addr,
                "192.168.1.100",
                focus.is_focused(Control::ServerAddr),
            ),
            input_line(
                "Server export path",
                &self.export_path,
                "/srv/nfs",
                focus.is_focused(Control::ExportPath),
            ),
            input_line(
                "Local mount point",
                &self.mount_point,
                "/mnt/nfs",
                focus.is_focused(Control::MountPoint),
            ),
            Line::from(""),
            button_line("Mount Share", focus.is_focused(Control::Mount)),
            button_line("Back", focus.is_focused(Control::Back)),
        ];

        let form_widget = Paragraph::new(form).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    " Configure NFS Client ",
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
