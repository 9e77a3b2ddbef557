/// Main menu screen

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::screens::{Screen, ScreenAction, ScreenKind};
use crate::widgets::{button_line, FocusRing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Server,
    Client,
    Logs,
    Quit,
}

impl MenuItem {
    fn label(&self) -> &'static str {
        match self {
            MenuItem::Server => "Configure NFS Server",
            MenuItem::Client => "Configure NFS Client",
            MenuItem::Logs => "Exports & Mounts",
            MenuItem::Quit => "Quit",
        }
    }
}

pub struct MainMenuScreen {
    focus: FocusRing<MenuItem>,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        Self {
            focus: FocusRing::new(vec![
                MenuItem::Server,
                MenuItem::Client,
                MenuItem::Logs,
                MenuItem::Quit,
            ]),
        }
    }
}

impl Screen for MainMenuScreen {
    fn title(&self) -> &'static str {
        "Main Menu"
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Up => {
                self.focus.prev();
                ScreenAction::None
            }
            KeyCode::Down => {
                self.focus.next();
                ScreenAction::None
            }
            KeyCode::Enter => match self.focus.current() {
                MenuItem::Server => ScreenAction::Push(ScreenKind::Server),
                MenuItem::Client => ScreenAction::Push(ScreenKind::Client),
                MenuItem::Logs => ScreenAction::Push(ScreenKind::Logs),
                MenuItem::Quit => ScreenAction::Quit,
            },
            KeyCode::Esc => ScreenAction::Quit,
            _ => ScreenAction::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Length(10),
                Constraint::Min(0),
            ])
            .split(area);
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(50),
                Constraint::Percentage(25),
            ])
            .split(vertical[1]);

        let mut lines = vec![
            Line::from(Span::styled(
                "NFS Configuration TUI",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for item in [MenuItem::Server, MenuItem::Client, MenuItem::Logs, MenuItem::Quit] {
            lines.push(button_line(item.label(), self.focus.is_focused(item)));
        }

        let menu = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(menu, horizontal[1]);
    }
}
