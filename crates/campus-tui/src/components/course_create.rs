//! Create-course screen: one draft, submitted with Ctrl+S.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use campus_core::Course;

use crate::action::{Action, Screen};
use crate::components::form::{Form, TextInput};
use crate::components::Component;
use crate::tasks::Request;
use crate::theme::Theme;

const NAME: usize = 0;
const DESCRIPTION: usize = 1;

pub struct CourseCreateComponent {
    form: Form,
    /// A create call is in flight.
    submitting: bool,
    /// The record the backend stored, once it answered. Blocks a second
    /// submit; the list screen refetches rather than reading it.
    created: Option<Course>,
}

impl CourseCreateComponent {
    pub fn new() -> Self {
        Self::from_draft(Course::draft())
    }

    pub fn from_draft(draft: Course) -> Self {
        Self {
            form: Form::new(vec![
                ("Name", TextInput::new(draft.name)),
                ("Description", TextInput::new(draft.description)),
            ]),
            submitting: false,
            created: None,
        }
    }

    /// The draft as currently typed.
    pub fn draft(&self) -> Course {
        Course {
            id: None,
            name: self.form.value(NAME).to_string(),
            description: self.form.value(DESCRIPTION).to_string(),
        }
    }

    pub fn created(&self) -> Option<&Course> {
        self.created.as_ref()
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    /// Issue the create call, unless one is already in flight.
    pub fn submit(&mut self) -> Option<Request> {
        if self.submitting || self.created.is_some() {
            return None;
        }
        self.submitting = true;
        Some(Request::CreateCourse(self.draft()))
    }
}

impl Component for CourseCreateComponent {
    fn wants_input(&self) -> bool {
        !self.submitting && self.created.is_none()
    }

    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::CourseCreated(course) => {
                self.submitting = false;
                self.created = Some(course.as_ref().clone());
                Some(Action::GoTo(Screen::Courses))
            }
            Action::CourseCreateFailed(_) => {
                self.submitting = false;
                Some(Action::Alert("Failed to create course".to_string()))
            }
            Action::SubmitForm => match self.submit() {
                Some(request) => Some(Action::Dispatch(request)),
                None => Some(Action::SetStatus("Already saving...".to_string())),
            },
            Action::Cancel => Some(Action::GoTo(Screen::Courses)),
            _ if self.submitting => None,
            _ => {
                self.form.handle(action);
                None
            }
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Create Course ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::dim());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(6), // Fields
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Hints
        ])
        .split(inner);

        self.form.render(frame, chunks[0], self.wants_input());

        let hints = if self.submitting {
            Line::from(Span::styled("Creating course...", Theme::warning_text()))
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
