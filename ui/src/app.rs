use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::{DefaultTerminal, Frame};

use crate::data::ScreenChange;
use crate::page::{LandingPage, LandingWidget};
use crate::submitter::Submitter;

const TICK_RATE: Duration = Duration::from_millis(100);

pub struct App {
    /// Is the application running?
    running: bool,
    page: LandingPage,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(submitter: Submitter) -> Self {
        Self {
            running: true,
            page: LandingPage::new(submitter),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_crossterm_events()?;
            self.page.on_tick();
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        frame.render_stateful_widget(LandingWidget, frame.area(), &mut self.page);
        if let Some(position) = self.page.cursor_position {
            frame.set_cursor_position(position);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    ///
    /// Polling times out after [`TICK_RATE`] so finished submissions and
    /// expired toasts are picked up without a key press.
    fn handle_crossterm_events(&mut self) -> Result<()> {
        if event::poll(TICK_RATE)? {
            if let Event::Key(key_event) = event::read()? {
                if self.page.on_key_event(key_event) == ScreenChange::Quit {
                    self.quit();
                }
            }
        }
        Ok(())
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
