pub mod client;
pub mod logs;
pub mod main_menu;
pub mod server;

pub use client::ClientScreen;
pub use logs::LogsScreen;
pub use main_menu::MainMenuScreen;
pub use server::ServerScreen;

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Navigation target produced by the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Server,
    Client,
    Logs,
}

/// Outcome of a key press, interpreted by the app event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    Push(ScreenKind),
    Pop,
    Quit,
}

pub trait Screen {
    fn title(&self) -> &'static str;

    /// Called when the screen is pushed onto the stack.
    fn on_enter(&mut self) {}

    fn handle_key(&mut self, key: KeyEvent) -> ScreenAction;

    fn render(&self, frame: &mut Frame, area: Rect);
}
