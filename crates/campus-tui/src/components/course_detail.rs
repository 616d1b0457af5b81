//! Course detail screen with an inline editor.
//!
//! The screen is always in exactly one [`DetailState`]. Toggling out of
//! editing discards the draft; only a successful save replaces the displayed
//! course, and then with the value the backend returned.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tracing::debug;

use campus_core::Course;

use crate::action::{Action, Screen};
use crate::components::dialog::render_confirm;
use crate::components::form::{Form, TextInput};
use crate::components::Component;
use crate::tasks::Request;
use crate::theme::Theme;

#[derive(Debug, Clone)]
pub enum DetailState {
    Loading,
    Viewing(Course),
    Editing { original: Course, form: Form },
    LoadFailed(String),
}

/// The mutating call currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Save,
    Delete,
}

pub struct CourseDetailComponent {
    id: String,
    state: DetailState,
    in_flight: Option<Mutation>,
    confirming_delete: bool,
}

fn edit_form(course: &Course) -> Form {
    Form::new(vec![
        ("Name", TextInput::new(course.name.clone())),
        ("Description", TextInput::new(course.description.clone())),
    ])
}

impl CourseDetailComponent {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: DetailState::Loading,
            in_flight: None,
            confirming_delete: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn in_flight(&self) -> Option<Mutation> {
        self.in_flight
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, DetailState::Editing { .. })
    }

    /// The course as last confirmed by the backend.
    pub fn course(&self) -> Option<&Course> {
        match &self.state {
            DetailState::Viewing(course) => Some(course),
            DetailState::Editing { original, .. } => Some(original),
            DetailState::Loading | DetailState::LoadFailed(_) => None,
        }
    }

    /// The in-progress edit, if editing.
    pub fn draft(&self) -> Option<Course> {
        match &self.state {
            DetailState::Editing { original, form } => Some(Course {
                id: original.id.clone(),
                name: form.value(0).to_string(),
                description: form.value(1).to_string(),
            }),
            _ => None,
        }
    }

    pub fn on_loaded(&mut self, course: Course) {
        if matches!(self.state, DetailState::Loading) {
            self.state = DetailState::Viewing(course);
        }
    }

    pub fn on_load_failed(&mut self, error: &str) {
        if matches!(self.state, DetailState::Loading) {
            self.state = DetailState::LoadFailed(error.to_string());
        }
    }

    /// Switch between viewing and editing. Leaving the editor drops the draft.
    ///
    /// Returns false when there is nothing to toggle or a save or delete is
    /// in flight.
    pub fn toggle_edit(&mut self) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        let state = std::mem::replace(&mut self.state, DetailState::Loading);
        let (state, toggled) = match state {
            DetailState::Viewing(course) => {
                let form = edit_form(&course);
                (
                    DetailState::Editing {
                        original: course,
                        form,
                    },
                    true,
                )
            }
            DetailState::Editing { original, .. } => (DetailState::Viewing(original), true),
            other => (other, false),
        };
        self.state = state;
        toggled
    }

    /// Issue an update with the draft.
    pub fn save(&mut self) -> Option<Request> {
        if self.in_flight.is_some() {
            return None;
        }
        let course = self.draft()?;
        self.in_flight = Some(Mutation::Save);
        Some(Request::UpdateCourse {
            id: self.id.clone(),
            course,
        })
    }

    pub fn on_saved(&mut self, course: Course) {
        if self.in_flight != Some(Mutation::Save) {
            debug!("Ignoring update result for course {}", self.id);
            return;
        }
        self.in_flight = None;
        self.state = DetailState::Viewing(course);
    }

    /// The update failed: keep editing with the draft as typed.
    pub fn on_save_failed(&mut self) -> Option<Action> {
        if self.in_flight != Some(Mutation::Save) {
            return None;
        }
        self.in_flight = None;
        Some(Action::Alert("Failed to update course".to_string()))
    }

    pub fn request_delete(&mut self) -> bool {
        if self.in_flight.is_some() || self.course().is_none() {
            return false;
        }
        self.confirming_delete = true;
        true
    }

    pub fn confirm_delete(&mut self) -> Option<Request> {
        if !std::mem::take(&mut self.confirming_delete) || self.in_flight.is_some() {
            return None;
        }
        self.in_flight = Some(Mutation::Delete);
        Some(Request::DeleteCourse(self.id.clone()))
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    pub fn pending_confirmation(&self) -> bool {
        self.confirming_delete
    }

    fn on_deleted(&mut self) -> Option<Action> {
        if self.in_flight != Some(Mutation::Delete) {
            return None;
        }
        self.in_flight = None;
        Some(Action::GoTo(Screen::Courses))
    }

    fn on_delete_failed(&mut self) -> Option<Action> {
        if self.in_flight != Some(Mutation::Delete) {
            return None;
        }
        self.in_flight = None;
        Some(Action::Alert("Failed to delete course".to_string()))
    }

    fn busy(&self) -> Option<Action> {
        Some(Action::SetStatus("Please wait for the current request".to_string()))
    }

    fn render_course(&self, frame: &mut Frame, area: Rect, course: &Course) {
        let description = if course.description.is_empty() {
            Span::styled("No description", Theme::muted())
        } else {
            Span::styled(course.description.clone(), Theme::normal())
        };
        let lines = vec![
            Line::from(Span::styled(course.name.clone(), Theme::title())),
            Line::from(""),
            Line::from(description),
            Line::from(""),
            Line::from(vec![
                Span::styled("ID: ", Theme::dim()),
                Span::styled(course.id.clone().unwrap_or_default(), Theme::muted()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
    }
}

impl Component for CourseDetailComponent {
    fn init(&mut self) -> Option<Action> {
        self.state = DetailState::Loading;
        Some(Action::Dispatch(Request::GetCourse(self.id.clone())))
    }

    fn wants_input(&self) -> bool {
        self.is_editing() && !self.confirming_delete
    }

    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::CourseLoaded(course) => {
                self.on_loaded(course.as_ref().clone());
                return None;
            }
            Action::CourseLoadFailed(error) => {
                self.on_load_failed(error);
                return Some(Action::SetStatus("Error loading course".to_string()));
            }
            Action::CourseUpdated(course) => {
                self.on_saved(course.as_ref().clone());
                return None;
            }
            Action::CourseUpdateFailed(_) => return self.on_save_failed(),
            Action::CourseDeleted(id) if *id == self.id => return self.on_deleted(),
            Action::CourseDeleteFailed { id, .. } if *id == self.id => {
                return self.on_delete_failed()
            }
            _ => {}
        }

        if self.confirming_delete {
            return match action {
                Action::Accept => self.confirm_delete().map(Action::Dispatch),
                Action::Cancel => {
                    self.cancel_delete();
                    None
                }
                _ => None,
            };
        }

        match action {
            Action::Delete => {
                if self.request_delete() {
                    None
                } else {
                    self.busy()
                }
            }
            Action::SubmitForm if self.is_editing() => match self.save() {
                Some(request) => Some(Action::Dispatch(request)),
                None => self.busy(),
            },
            // Esc leaves the editor first, then the screen.
            Action::Cancel if self.is_editing() => {
                if self.toggle_edit() {
                    None
                } else {
                    self.busy()
                }
            }
            Action::Cancel => Some(Action::GoTo(Screen::Courses)),
            Action::Edit => {
                if self.toggle_edit() || self.course().is_none() {
                    None
                } else {
                    self.busy()
                }
            }
            Action::Refresh if !self.is_editing() && self.in_flight.is_none() => self.init(),
            _ => {
                if let DetailState::Editing { form, .. } = &mut self.state {
                    if self.in_flight != Some(Mutation::Save) {
                        form.handle(action);
                    }
                }
                None
            }
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = if self.is_editing() {
            " Edit Course "
        } else {
            " Course "
        };
        let block = Block::default()
            .title(title)
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::dim());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Min(6),    // Body
            Constraint::Length(1), // Hints
        ])
        .split(inner);

        match &self.state {
            DetailState::Loading => {
                frame.render_widget(
                    Paragraph::new(Span::styled("Loading course...", Theme::muted())),
                    chunks[0],
                );
            }
            DetailState::LoadFailed(error) => {
                frame.render_widget(
                    Paragraph::new(vec![
                        Line::from(Span::styled("Could not load course.", Theme::error_text())),
                        Line::from(Span::styled(error.clone(), Theme::dim())),
                    ]),
                    chunks[0],
                );
            }
            DetailState::Viewing(course) => self.render_course(frame, chunks[0], course),
            DetailState::Editing { form, .. } => {
                form.render(frame, chunks[0], self.wants_input());
            }
        }

        let hints = match (&self.state, self.in_flight) {
            (_, Some(Mutation::Save)) => {
                Line::from(Span::styled("Saving...", Theme::warning_text()))
            }
            (_, Some(Mutation::Delete)) => {
                Line::from(Span::styled("Deleting...", Theme::warning_text()))
            }
            (DetailState::Editing { .. }, None) => Line::from(vec![
                Span::styled("[Ctrl+S]", Theme::selected()),
                Span::styled(" save  ", Theme::dim()),
                Span::styled("[Ctrl+D]", Theme::selected()),
                Span::styled(" delete  ", Theme::dim()),
                Span::styled("[Esc]", Theme::selected()),
                Span::styled(" discard", Theme::dim()),
            ]),
            (DetailState::Viewing(_), None) => Line::from(vec![
                Span::styled("[e]", Theme::selected()),
                Span::styled("dit  ", Theme::dim()),
                Span::styled("[d]", Theme::selected()),
                Span::styled("elete  ", Theme::dim()),
                Span::styled("[Esc]", Theme::selected()),
                Span::styled(" back", Theme::dim()),
            ]),
            _ => Line::from(vec![
                Span::styled("[r]", Theme::selected()),
                Span::styled("etry  ", Theme::dim()),
                Span::styled("[Esc]", Theme::selected()),
                Span::styled(" back", Theme::dim()),
            ]),
        };
        frame.render_widget(Paragraph::new(hints), chunks[1]);

        if self.confirming_delete {
            render_confirm(frame, area, "Are you sure you want to delete this course?");
        }
    }
}
