/// Shared TUI primitives: focus ring, text fields and their rendering
///
/// Focus is an explicit per-screen ordered list of control identifiers with
/// a cursor; up/down wrap at both ends via modulo arithmetic.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct FocusRing<T: Copy + PartialEq> {
    items: Vec<T>,
    cursor: usize,
}

impl<T: Copy + PartialEq> FocusRing<T> {
    /// `items` must be non-empty and follow visual top-to-bottom order.
    pub fn new(items: Vec<T>) -> Self {
        debug_assert!(!items.is_empty());
        Self { items, cursor: 0 }
    }

    pub fn current(&self) -> T {
        self.items[self.cursor]
    }

    pub fn is_focused(&self, item: T) -> bool {
        self.current() == item
    }

    pub fn next(&mut self) {
        self.cursor = (self.cursor + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        self.cursor = (self.cursor + self.items.len() - 1) % self.items.len();
    }
}

/// Single-line editable input.
#[derive(Debug, Default, Clone)]
pub struct TextField {
    value: String,
}

impl TextField {
    pub fn push(&mut self, c: char) {
        if !c.is_control() {
            self.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

impl From<&str> for TextField {
    fn from(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

/// Labelled input line; the placeholder is shown dimmed while the field is
/// empty, the label highlights when focused.
pub fn input_line(label: &str, field: &TextField, placeholder: &str, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let (text, value_style) = if field.value().is_empty() {
        (
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )
    } else if focused {
        (
            field.value().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::UNDERLINED),
        )
    } else {
        (field.value().to_string(), Style::default().fg(Color::Gray))
    };

    Line::from(vec![
        Span::styled(format!("{label}: "), label_style),
        Span::styled(text, value_style),
    ])
}

pub fn button_span(label: &str, focused: bool) -> Span<'static> {
    let marker = if focused { "►" } else { " " };
    let style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Span::styled(format!("{marker} [ {label} ] "), style)
}

pub fn button_line(label: &str, focused: bool) -> Line<'static> {
    Line::from(button_span(label, focused))
}
