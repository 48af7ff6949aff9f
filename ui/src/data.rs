use std::borrow::Cow;

use ratatui::prelude::{Color, Span, Style};

#[derive(Debug, PartialEq)]
pub enum ScreenChange {
    Quit,
    None,
}

pub fn highlight<'a>(text: impl Into<Cow<'a, str>>, needed: bool) -> Span<'a> {
    if needed {
        Span::styled(text, Style::default().bg(Color::White).fg(Color::Black))
    } else {
        Span::styled(text, Style::default())
    }
}

pub fn button(text: &str, focused: bool) -> Span<'static> {
    highlight(format!("[ {} ]", text), focused)
}
