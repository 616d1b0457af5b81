//! Create-student screen. Dates are typed as YYYY-MM-DD.

use chrono::NaiveDate;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use campus_core::Student;

use crate::action::{Action, Screen};
use crate::components::form::{Form, TextInput};
use crate::components::Component;
use crate::tasks::Request;
use crate::theme::Theme;

const FIRST_NAME: usize = 0;
const LAST_NAME: usize = 1;
const EMAIL: usize = 2;
const DATE_OF_BIRTH: usize = 3;
const REGISTRATION_DATE: usize = 4;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct StudentCreateComponent {
    form: Form,
    submitting: bool,
    /// The record the backend stored. Blocks a second submit; the list
    /// screen refetches rather than reading it.
    created: Option<Student>,
}

impl StudentCreateComponent {
    /// A fresh draft registered today.
    pub fn new() -> Self {
        Self::from_draft(Student::draft_today())
    }

    pub fn from_draft(draft: Student) -> Self {
        let date_of_birth = draft
            .date_of_birth
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        Self {
            form: Form::new(vec![
                ("First name", TextInput::new(draft.first_name)),
                ("Last name", TextInput::new(draft.last_name)),
                ("Email", TextInput::new(draft.email)),
                ("Date of birth (YYYY-MM-DD)", TextInput::new(date_of_birth)),
                (
                    "Registration date (YYYY-MM-DD)",
                    TextInput::new(draft.registration_date.format(DATE_FORMAT).to_string()),
                ),
            ]),
            submitting: false,
            created: None,
        }
    }

    /// Build the draft from the form, or say which date does not parse.
    pub fn draft(&self) -> Result<Student, String> {
        let date_of_birth = match self.form.value(DATE_OF_BIRTH).trim() {
            "" => None,
            text => Some(parse_date(text, "date of birth")?),
        };
        let registration_date =
            parse_date(self.form.value(REGISTRATION_DATE).trim(), "registration date")?;

        Ok(Student {
            id: None,
            first_name: self.form.value(FIRST_NAME).to_string(),
            last_name: self.form.value(LAST_NAME).to_string(),
            email: self.form.value(EMAIL).to_string(),
            date_of_birth,
            registration_date,
        })
    }

    pub fn created(&self) -> Option<&Student> {
        self.created.as_ref()
    }

    /// Issue the create call. A malformed date is reported without calling
    /// the backend; a second submit while one is in flight does nothing.
    pub fn submit(&mut self) -> Result<Option<Request>, String> {
        if self.submitting || self.created.is_some() {
            return Ok(None);
        }
        let draft = self.draft()?;
        self.submitting = true;
        Ok(Some(Request::CreateStudent(draft)))
    }
}

fn parse_date(text: &str, field: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| format!("Invalid {field} \"{text}\", expected YYYY-MM-DD"))
}

impl Component for StudentCreateComponent {
    fn wants_input(&self) -> bool {
        !self.submitting && self.created.is_none()
    }

    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::StudentCreated(student) => {
                self.submitting = false;
                self.created = Some(student.as_ref().clone());
                Some(Action::GoTo(Screen::Students))
            }
            Action::StudentCreateFailed(_) => {
                self.submitting = false;
                Some(Action::Alert("Failed to create student".to_string()))
            }
            Action::SubmitForm => match self.submit() {
                Ok(Some(request)) => Some(Action::Dispatch(request)),
                Ok(None) => Some(Action::SetStatus("Already saving...".to_string())),
                Err(message) => Some(Action::Alert(message)),
            },
            Action::Cancel => Some(Action::GoTo(Screen::Students)),
            _ if self.submitting => None,
            _ => {
                self.form.handle(action);
                None
            }
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Create Student ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::dim());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(15), // Fields
            Constraint::Length(1),
            Constraint::Length(1), // Hints
        ])
        .split(inner);

        self.form.render(frame, chunks[0], self.wants_input());

        let hints = if self.submitting {
            Line::from(Span::styled("Creating student...", Theme::warning_text()))
        } else {
            Line::from(vec![
                Span::styled("[Tab]", Theme::selected()),
                Span::styled(" next field  ", Theme::dim()),
                Span::styled("[Ctrl+S]", Theme::selected()),
                Span::styled(" create  ", Theme::dim()),
                Span::styled("[Esc]", Theme::selected()),
                Span::styled(" back", Theme::dim()),
            ])
        };
        frame.render_widget(Paragraph::new(hints), chunks[2]);
    }
}
