/// Main TUI application

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::core::{CommandRunner, ExportManager, MountManager, ProvisionManager, SystemRunner};
use crate::screens::{
    ClientScreen, LogsScreen, MainMenuScreen, Screen, ScreenAction, ScreenKind, ServerScreen,
};
use crate::utils::AppConfig;

pub struct App {
    exports: ExportManager,
    mounts: MountManager,
    provision: ProvisionManager,
    // Main menu at the bottom; Back/Esc pops down to it.
    stack: Vec<Box<dyn Screen>>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let AppConfig {
            exports_file,
            server_script,
            client_script,
            elevation,
        } = config;

        let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner::new(&elevation));
        let exports = ExportManager::new(runner.clone(), exports_file);
        let mounts = MountManager::new(runner.clone());
        let provision = ProvisionManager::new(runner, server_script, client_script);

        Self {
            exports,
            mounts,
            provision,
            stack: vec![Box::new(MainMenuScreen::new())],
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn run_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            // The poll timeout keeps the header clock ticking; key handling
            // itself blocks until the triggered command completes.
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key_event) = event::read()? {
                    self.handle_key(key_event);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key_event: event::KeyEvent) {
        let action = match self.stack.last_mut() {
            Some(screen) => screen.handle_key(key_event),
            None => ScreenAction::Quit,
        };

        match action {
            ScreenAction::None => {}
            ScreenAction::Push(kind) => {
                let mut screen = self.make_screen(kind);
                screen.on_enter();
                self.stack.push(screen);
            }
            ScreenAction::Pop => {
                if self.stack.len() > 1 {
                    self.stack.pop();
                }
            }
            ScreenAction::Quit => self.should_quit = true,
        }
    }

    /// Screens are created fresh on every push: field state does not persist
    /// across visits.
    fn make_screen(&self, kind: ScreenKind) -> Box<dyn Screen> {
        match kind {
            ScreenKind::Server => Box::new(ServerScreen::new(self.provision.clone())),
            ScreenKind::Client => Box::new(ClientScreen::new(self.provision.clone())),
            ScreenKind::Logs => {
                Box::new(LogsScreen::new(self.exports.clone(), self.mounts.clone()))
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.size());

        let title = self.stack.last().map(|s| s.title()).unwrap_or_default();
        let header = Line::from(vec![
            Span::styled(
                " NFS Configuration TUI ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("| {title}"), Style::default().fg(Color::White)),
        ]);
        frame.render_widget(Paragraph::new(header), chunks[0]);
        let clock = Paragraph::new(Local::now().format("%H:%M:%S ").to_string())
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(clock, chunks[0]);

        if let Some(screen) = self.stack.last() {
            screen.render(frame, chunks[1]);
        }

        let footer = Paragraph::new(Span::styled(
            " Up/Down: move focus | Enter: activate | Esc: back",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(footer, chunks[2]);
    }
}
