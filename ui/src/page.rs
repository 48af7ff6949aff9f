use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, StatefulWidget, Widget, Wrap};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use types::domain::{SignedInUser, SubmissionResult};

use crate::data::{self, ScreenChange};
use crate::dialog::{Dialog, DialogKind, DialogWidget};
use crate::extension::AreaExt;
use crate::submitter::Submitter;
use crate::toast::{Toast, ToastWidget, SHORT_TOAST_DURATION, TOAST_DURATION};

const BRAND: &str = "ModernApp";
const TAGLINE: &str = "Create, collaborate, and scale your ideas with our modern platform. \
Join thousands of developers who trust us to bring their vision to life.";
const FEATURES: [(&str, &str); 3] = [
    (
        "Easy to Use",
        "Intuitive interface designed for developers of all skill levels.",
    ),
    (
        "Secure & Reliable",
        "Enterprise-grade security with 99.9% uptime guarantee.",
    ),
    (
        "Scale Globally",
        "Deploy worldwide with our global CDN and edge computing.",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageAction {
    SignIn,
    SignUp,
    SignOut,
    GetStarted,
    LearnMore,
}

impl PageAction {
    fn label(&self) -> &'static str {
        match self {
            PageAction::SignIn => "Sign In",
            PageAction::SignUp => "Sign Up",
            PageAction::SignOut => "Sign Out",
            PageAction::GetStarted => "Get Started Free",
            PageAction::LearnMore => "Learn More",
        }
    }
}

/// Result of a spawned submission, handed back to the UI task.
#[derive(Debug)]
pub enum Outcome {
    AccountCreated(SubmissionResult),
    SignedIn {
        email: String,
        result: SubmissionResult,
    },
}

pub struct LandingPage {
    submitter: Arc<Submitter>,
    user: Option<SignedInUser>,
    dialog: Option<Dialog>,
    focus: usize,
    busy: bool,
    toast: Option<Toast>,
    outcome_tx: UnboundedSender<Outcome>,
    outcome_rx: UnboundedReceiver<Outcome>,
    pub(crate) cursor_position: Option<Position>,
}

impl LandingPage {
    pub fn new(submitter: Submitter) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            submitter: Arc::new(submitter),
            user: None,
            dialog: None,
            focus: 0,
            busy: false,
            toast: None,
            outcome_tx,
            outcome_rx,
            cursor_position: None,
        }
    }

    pub fn user(&self) -> Option<&SignedInUser> {
        self.user.as_ref()
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn actions(&self) -> Vec<PageAction> {
        if self.user.is_some() {
            vec![PageAction::SignOut, PageAction::LearnMore]
        } else {
            vec![
                PageAction::SignIn,
                PageAction::SignUp,
                PageAction::GetStarted,
                PageAction::LearnMore,
            ]
        }
    }

    pub fn focused_action(&self) -> Option<PageAction> {
        self.actions().get(self.focus).copied()
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.actions().len();
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
    }

    pub fn activate(&mut self, action: PageAction) {
        match action {
            PageAction::SignIn => self.open_dialog(Dialog::sign_in()),
            PageAction::SignUp | PageAction::GetStarted => self.open_dialog(Dialog::sign_up()),
            PageAction::SignOut => self.sign_out(),
            PageAction::LearnMore => {}
        }
    }

    fn open_dialog(&mut self, dialog: Dialog) {
        debug!("opening {:?} dialog", dialog.kind());
        self.dialog = Some(dialog);
    }

    /// Closing discards the form. A request already sent keeps running and its
    /// outcome still shows up as a toast.
    pub fn close_dialog(&mut self) {
        self.dialog = None;
        self.cursor_position = None;
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!("{} signed out", user.email);
        }
        self.focus = 0;
        self.toast = Some(Toast::new(
            "Signed out",
            "You have been successfully signed out.",
            SHORT_TOAST_DURATION,
        ));
    }

    /// Validates the open dialog and, when it is clean, sends it in the background.
    pub fn submit(&mut self) {
        if self.busy {
            return;
        }
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        let submitter = self.submitter.clone();
        let outcome_tx = self.outcome_tx.clone();
        match dialog.kind() {
            DialogKind::SignIn => {
                let form = dialog.sign_in_form();
                dialog.errors = form.validate_form();
                if !dialog.errors.is_valid() {
                    return;
                }
                let request = form.to_request();
                tokio::spawn(async move {
                    let email = request.email.clone();
                    let result = submitter.login(request).await;
                    let _ = outcome_tx.send(Outcome::SignedIn { email, result });
                });
            }
            DialogKind::SignUp => {
                let form = dialog.sign_up_form();
                dialog.errors = form.validate_form();
                if !dialog.errors.is_valid() {
                    return;
                }
                let request = form.to_request();
                tokio::spawn(async move {
                    let result = submitter.create_account(request).await;
                    let _ = outcome_tx.send(Outcome::AccountCreated(result));
                });
            }
        }
        self.busy = true;
    }

    pub fn apply_outcome(&mut self, outcome: Outcome) {
        self.busy = false;
        match outcome {
            Outcome::AccountCreated(SubmissionResult::Success { .. }) => {
                info!("account created");
                self.close_dialog_of(DialogKind::SignUp);
                self.toast = Some(Toast::new(
                    "Success!",
                    "Account created successfully. You can now sign in.",
                    TOAST_DURATION,
                ));
            }
            Outcome::AccountCreated(SubmissionResult::Failure { error }) => {
                self.toast = Some(failure_toast(
                    error,
                    "Failed to create account. Please try again.",
                ));
            }
            Outcome::SignedIn {
                email,
                result: SubmissionResult::Success { .. },
            } => {
                let user = SignedInUser::from_email(&email);
                info!("{} signed in", user.email);
                self.close_dialog_of(DialogKind::SignIn);
                self.toast = Some(Toast::new(
                    "Welcome back!",
                    format!("Successfully signed in as {}", user.name),
                    TOAST_DURATION,
                ));
                self.user = Some(user);
                self.focus = 0;
            }
            Outcome::SignedIn {
                result: SubmissionResult::Failure { error },
                ..
            } => {
                self.toast = Some(failure_toast(
                    error,
                    "Failed to sign in. Please try again.",
                ));
            }
        }
    }

    fn close_dialog_of(&mut self, kind: DialogKind) {
        if self.dialog.as_ref().is_some_and(|dialog| dialog.kind() == kind) {
            self.close_dialog();
        }
    }

    pub fn on_tick(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn on_key_event(&mut self, key: KeyEvent) -> ScreenChange {
        if let (KeyEventKind::Press, KeyModifiers::CONTROL, KeyCode::Char('c')) =
            (key.kind, key.modifiers, key.code)
        {
            return ScreenChange::Quit;
        }
        if self.dialog.is_some() {
            self.on_dialog_key_event(key);
            return ScreenChange::None;
        }
        match (key.kind, key.modifiers, key.code) {
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Esc) => ScreenChange::Quit,
            (
                KeyEventKind::Press,
                KeyModifiers::NONE,
                KeyCode::Tab | KeyCode::Right | KeyCode::Down,
            ) => {
                self.move_focus(true);
                ScreenChange::None
            }
            (KeyEventKind::Press, _, KeyCode::BackTab)
            | (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Left | KeyCode::Up) => {
                self.move_focus(false);
                ScreenChange::None
            }
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Enter) => {
                if let Some(action) = self.focused_action() {
                    self.activate(action);
                }
                ScreenChange::None
            }
            _ => ScreenChange::None,
        }
    }

    fn on_dialog_key_event(&mut self, key: KeyEvent) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        match (key.kind, key.modifiers, key.code) {
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Esc) => self.close_dialog(),
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Tab | KeyCode::Down) => {
                dialog.next_focus()
            }
            (KeyEventKind::Press, _, KeyCode::BackTab)
            | (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Up) => dialog.previous_focus(),
            (KeyEventKind::Press, KeyModifiers::CONTROL, KeyCode::Char('r')) => {
                dialog.toggle_reveal()
            }
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Enter) => self.submit(),
            _ => dialog.handle_input_event(key),
        }
    }
}

fn failure_toast(error: String, fallback: &str) -> Toast {
    let description = if error.trim().is_empty() {
        fallback.to_string()
    } else {
        error
    };
    Toast::destructive("Error", description, TOAST_DURATION)
}

pub struct LandingWidget;

impl LandingWidget {
    fn render_header(area: Rect, buf: &mut Buffer, state: &LandingPage) {
        let block = Block::default().borders(Borders::BOTTOM);
        let inner = block.inner(area);
        block.render(area, buf);
        let [brand, nav, actions] = Layout::horizontal([
            Constraint::Length(16),
            Constraint::Fill(1),
            Constraint::Length(34),
        ])
        .areas(inner);

        Line::from(vec!["■ ".light_blue(), BRAND.bold()]).render(brand, buf);
        Line::from("Features    About    Contact")
            .style(Style::default().fg(Color::Gray))
            .centered()
            .render(nav, buf);

        let focused = state.focused_action();
        let mut spans = Vec::new();
        if let Some(user) = &state.user {
            spans.push(Span::styled(
                format!("● {} ", user.name),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            spans.push(data::button(
                PageAction::SignOut.label(),
                focused == Some(PageAction::SignOut),
            ));
        } else {
            for action in [PageAction::SignIn, PageAction::SignUp] {
                spans.push(data::button(action.label(), focused == Some(action)));
                spans.push(Span::raw(" "));
            }
        }
        Line::from(spans).right_aligned().render(actions, buf);
    }

    fn render_hero(area: Rect, buf: &mut Buffer, state: &LandingPage) {
        let focused = state.focused_action();
        let mut buttons = Vec::new();
        for action in state.actions() {
            if matches!(action, PageAction::GetStarted | PageAction::LearnMore) {
                buttons.push(data::button(action.label(), focused == Some(action)));
                buttons.push(Span::raw("  "));
            }
        }
        let lines = vec![
            Line::default(),
            Line::from(vec![
                "Build Something ".bold(),
                "Amazing".bold().light_blue(),
            ]),
            Line::default(),
            Line::from(TAGLINE).style(Style::default().fg(Color::Gray)),
            Line::default(),
            Line::from(buttons),
        ];
        Paragraph::new(lines)
            .centered()
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_features(area: Rect, buf: &mut Buffer) {
        let [heading, cards] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
        Paragraph::new(vec![
            Line::from("Why Choose ModernApp?").bold(),
            Line::from(
                "Everything you need to build, deploy, and scale your applications with confidence.",
            )
            .style(Style::default().fg(Color::Gray)),
        ])
        .centered()
        .wrap(Wrap { trim: true })
        .render(heading, buf);

        let [cards] = Layout::vertical([Constraint::Max(6)])
            .flex(Flex::Start)
            .areas(cards);
        let areas: [Rect; 3] = cards.split_equal(Direction::Horizontal);
        for ((title, description), card) in FEATURES.iter().zip(areas) {
            Paragraph::new(*description)
                .wrap(Wrap { trim: true })
                .block(Block::bordered().title(Line::from(vec![
                    " ✔ ".green(),
                    Span::styled(*title, Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" "),
                ])))
                .render(card, buf);
        }
    }
}

impl StatefulWidget for LandingWidget {
    type State = LandingPage;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [header, hero, features, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(8),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        Self::render_header(header, buf, state);
        Self::render_hero(hero, buf, state);
        Self::render_features(features, buf);
        Paragraph::new("Tab to move · Enter to select · Esc to quit")
            .style(Style::default().add_modifier(Modifier::ITALIC))
            .centered()
            .render(footer, buf);

        let busy = state.busy;
        state.cursor_position = None;
        if let Some(dialog) = state.dialog.as_mut() {
            DialogWidget { busy }.render(area, buf, dialog);
            state.cursor_position = dialog.cursor_position;
        }

        if let Some(toast) = &state.toast {
            let [_, popup_area] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(5)]).areas(area);
            let [_, popup_area] =
                Layout::horizontal([Constraint::Fill(2), Constraint::Fill(1)]).areas(popup_area);
            ToastWidget { toast }.render(popup_area, buf);
        }
    }
}
