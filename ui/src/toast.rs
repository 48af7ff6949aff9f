use std::time::Duration;

use chrono::{DateTime, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

pub const TOAST_DURATION: Duration = Duration::from_secs(5);
pub const SHORT_TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// Transient notification in the bottom right corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    expiry_time: DateTime<Utc>,
}

impl Toast {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
            expiry_time: Utc::now() + duration,
        }
    }

    pub fn destructive(
        title: impl Into<String>,
        description: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            variant: ToastVariant::Destructive,
            ..Self::new(title, description, duration)
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expiry_time
    }
}

pub struct ToastWidget<'a> {
    pub toast: &'a Toast,
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let color = match self.toast.variant {
            ToastVariant::Default => Color::Green,
            ToastVariant::Destructive => Color::Red,
        };
        Clear.render(area, buf);
        Paragraph::new(self.toast.description.as_str())
            .block(
                Block::bordered()
                    .title(self.toast.title.as_str())
                    .style(Style::default().fg(color)),
            )
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
