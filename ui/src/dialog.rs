use crossterm::event::{Event, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Masked, Span};
use ratatui::widgets::{Block, Clear, Paragraph, StatefulWidget, Widget, Wrap};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;
use types::form::{Field, FieldErrors, SignInForm, SignUpForm};

use crate::data;
use crate::extension::AreaExt;

const DIALOG_WIDTH: u16 = 60;
const FIELD_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialogKind {
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialogFocus {
    Field(Field),
    Submit,
}

#[derive(Debug)]
struct FormInput {
    field: Field,
    input: Input,
    revealed: bool,
}

/// State of an open sign-in or sign-up dialog. Dropped when the dialog closes.
#[derive(Debug)]
pub struct Dialog {
    kind: DialogKind,
    inputs: Vec<FormInput>,
    focus: usize,
    pub errors: FieldErrors,
    pub(crate) cursor_position: Option<Position>,
}

impl Dialog {
    pub fn sign_in() -> Self {
        Self::with_fields(DialogKind::SignIn, &[Field::Email, Field::Password])
    }

    pub fn sign_up() -> Self {
        Self::with_fields(
            DialogKind::SignUp,
            &[
                Field::Name,
                Field::Email,
                Field::Password,
                Field::ConfirmPassword,
            ],
        )
    }

    fn with_fields(kind: DialogKind, fields: &[Field]) -> Self {
        Self {
            kind,
            inputs: fields
                .iter()
                .map(|field| FormInput {
                    field: *field,
                    input: Input::default(),
                    revealed: false,
                })
                .collect(),
            focus: 0,
            errors: FieldErrors::default(),
            cursor_position: None,
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn value(&self, field: Field) -> &str {
        self.input(field).map_or("", |input| input.input.value())
    }

    pub fn is_revealed(&self, field: Field) -> bool {
        self.input(field).is_some_and(|input| input.revealed)
    }

    fn input(&self, field: Field) -> Option<&FormInput> {
        self.inputs.iter().find(|input| input.field == field)
    }

    fn input_mut(&mut self, field: Field) -> Option<&mut FormInput> {
        self.inputs.iter_mut().find(|input| input.field == field)
    }

    pub fn sign_in_form(&self) -> SignInForm {
        SignInForm {
            email: self.value(Field::Email).to_string(),
            password: self.value(Field::Password).to_string(),
        }
    }

    pub fn sign_up_form(&self) -> SignUpForm {
        SignUpForm {
            name: self.value(Field::Name).to_string(),
            email: self.value(Field::Email).to_string(),
            password: self.value(Field::Password).to_string(),
            confirm_password: self.value(Field::ConfirmPassword).to_string(),
        }
    }

    pub fn focus(&self) -> DialogFocus {
        self.inputs
            .get(self.focus)
            .map_or(DialogFocus::Submit, |input| DialogFocus::Field(input.field))
    }

    // The submit button sits after the last field.
    pub fn next_focus(&mut self) {
        self.focus = (self.focus + 1) % (self.inputs.len() + 1);
    }

    pub fn previous_focus(&mut self) {
        let stops = self.inputs.len() + 1;
        self.focus = (self.focus + stops - 1) % stops;
    }

    /// Shows or hides the focused secret field, or the password when focus is elsewhere.
    pub fn toggle_reveal(&mut self) {
        let field = match self.focus() {
            DialogFocus::Field(field) if is_secret(field) => field,
            _ => Field::Password,
        };
        if let Some(input) = self.input_mut(field) {
            input.revealed = !input.revealed;
        }
    }

    pub fn handle_input_event(&mut self, key: KeyEvent) {
        if let Some(input) = self.inputs.get_mut(self.focus) {
            input.input.handle_event(&Event::Key(key));
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            DialogKind::SignIn => "Sign In",
            DialogKind::SignUp => "Create Account",
        }
    }

    pub fn description(&self) -> &'static str {
        match self.kind {
            DialogKind::SignIn => "Enter your credentials to access your account",
            DialogKind::SignUp => "Sign up to get started with ModernApp",
        }
    }

    pub fn submit_label(&self, busy: bool) -> &'static str {
        match (self.kind, busy) {
            (DialogKind::SignIn, false) => "Sign In",
            (DialogKind::SignIn, true) => "Signing In...",
            (DialogKind::SignUp, false) => "Create Account",
            (DialogKind::SignUp, true) => "Creating Account...",
        }
    }

    fn placeholder(&self, field: Field) -> &'static str {
        match (self.kind, field) {
            (_, Field::Name) => "Enter your full name",
            (_, Field::Email) => "Enter your email",
            (DialogKind::SignIn, Field::Password) => "Enter your password",
            (DialogKind::SignUp, Field::Password) => "Create a password",
            (_, Field::ConfirmPassword) => "Confirm your password",
        }
    }

    fn height(&self) -> u16 {
        // borders, description, fields, submit button
        2 + 2 + FIELD_HEIGHT * self.inputs.len() as u16 + 3
    }
}

fn is_secret(field: Field) -> bool {
    matches!(field, Field::Password | Field::ConfirmPassword)
}

fn label(field: Field) -> &'static str {
    match field {
        Field::Name => "Full Name",
        Field::Email => "Email",
        Field::Password => "Password",
        Field::ConfirmPassword => "Confirm Password",
    }
}

pub struct DialogWidget {
    pub busy: bool,
}

impl StatefulWidget for DialogWidget {
    type State = Dialog;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let area = area.centered(DIALOG_WIDTH, state.height());
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(Line::from(state.title()).bold().centered())
            .title_bottom(
                Line::from("Tab next · Ctrl+R show password · Esc close")
                    .italic()
                    .centered(),
            );
        let inner = block.inner(area);
        block.render(area, buf);

        let mut constraints = vec![Constraint::Length(2)];
        constraints.extend(state.inputs.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
        constraints.push(Constraint::Length(3));
        let rows = Layout::vertical(constraints).split(inner);

        Paragraph::new(state.description())
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true })
            .render(rows[0], buf);

        let focus = state.focus();
        state.cursor_position = None;
        for (index, form_input) in state.inputs.iter().enumerate() {
            let field = form_input.field;
            let focused = focus == DialogFocus::Field(field);
            let [input_area, error_area] =
                Layout::vertical([Constraint::Length(3), Constraint::Length(1)])
                    .areas(rows[index + 1]);

            let value = form_input.input.value();
            let text = if value.is_empty() {
                Span::styled(state.placeholder(field), Style::default().fg(Color::DarkGray))
            } else if is_secret(field) && !form_input.revealed {
                Span::styled(Masked::new(value, '*'), Color::White)
            } else {
                Span::raw(value)
            };

            let error = state.errors.get(field);
            let border = match (error, focused) {
                (Some(_), _) => Style::default().fg(Color::Red),
                (None, true) => Style::default().fg(Color::Cyan),
                (None, false) => Style::default(),
            };
            let mut block = Block::bordered().title(label(field)).border_style(border);
            if is_secret(field) {
                let toggle = if form_input.revealed { "hide" } else { "show" };
                block = block.title_bottom(Line::from(toggle).right_aligned());
            }
            Paragraph::new(text).block(block).render(input_area, buf);

            if let Some(message) = error {
                Line::from(vec!["✗ ".red(), message.red()]).render(error_area, buf);
            }

            if focused {
                let max_x = input_area.right().saturating_sub(2);
                let x = input_area.x + 1 + form_input.input.visual_cursor() as u16;
                state.cursor_position = Some(Position::new(x.min(max_x), input_area.y + 1));
            }
        }

        let [submit] = Layout::horizontal([Constraint::Max(30)])
            .flex(Flex::Center)
            .areas(rows[rows.len() - 1]);
        let label = data::button(state.submit_label(self.busy), focus == DialogFocus::Submit);
        let style = if self.busy {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };
        Paragraph::new(label)
            .centered()
            .style(style)
            .block(Block::bordered())
            .render(submit, buf);
    }
}
