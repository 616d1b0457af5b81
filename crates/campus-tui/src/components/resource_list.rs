//! List screens for courses and students.
//!
//! One generic controller drives both: it fetches on open, removes a record
//! locally only after the backend confirmed its deletion, and never re-fetches
//! on its own.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};
use ratatui::Frame;
use tracing::debug;

use campus_core::{Course, Record, Student};

use crate::action::{Action, Screen};
use crate::components::dialog::render_confirm;
use crate::components::form::TextInput;
use crate::components::Component;
use crate::tasks::Request;
use crate::theme::Theme;

/// A result the list screen reacts to, extracted from the action bus.
#[derive(Debug, PartialEq)]
pub enum ListEvent<'a, R> {
    Loaded(&'a [R]),
    LoadFailed(&'a str),
    Deleted(&'a str),
    DeleteFailed { id: &'a str, error: &'a str },
}

/// What a record type needs to appear in a [`ResourceList`].
pub trait ListResource: Record + Clone {
    /// Block title, e.g. "Courses".
    const TITLE: &'static str;

    /// Whether the backend supports name search for this resource.
    const SEARCHABLE: bool = false;

    fn columns() -> Vec<(&'static str, Constraint)>;

    fn cells(&self) -> Vec<String>;

    fn load_request() -> Request;

    fn search_request(query: &str) -> Request {
        let _ = query;
        Self::load_request()
    }

    fn delete_request(id: String) -> Request;

    fn create_screen() -> Screen;

    /// Screen opened with Enter on a row, if the resource has one.
    fn detail_screen(id: &str) -> Option<Screen> {
        let _ = id;
        None
    }

    fn list_event(action: &Action) -> Option<ListEvent<'_, Self>>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListState<R> {
    Loading,
    Loaded(Vec<R>),
    /// The fetch failed; nothing is shown.
    Failed(String),
}

pub struct ResourceList<R: ListResource> {
    state: ListState<R>,
    /// Highlighted row.
    pub selected: usize,
    /// Id awaiting a yes/no answer.
    confirming: Option<String>,
    /// Id whose delete call is in flight.
    deleting: Option<String>,
    /// Filter being typed, if the filter prompt is open.
    filter_input: Option<TextInput>,
    /// Filter used for the last fetch.
    filter: String,
}

impl<R: ListResource> ResourceList<R> {
    pub fn new() -> Self {
        Self {
            state: ListState::Loading,
            selected: 0,
            confirming: None,
            deleting: None,
            filter_input: None,
            filter: String::new(),
        }
    }

    pub fn state(&self) -> &ListState<R> {
        &self.state
    }

    /// The records currently held; empty unless loaded.
    pub fn items(&self) -> &[R] {
        match &self.state {
            ListState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn pending_confirmation(&self) -> Option<&str> {
        self.confirming.as_deref()
    }

    pub fn delete_in_flight(&self) -> Option<&str> {
        self.deleting.as_deref()
    }

    fn fetch_request(&self) -> Request {
        if R::SEARCHABLE && !self.filter.is_empty() {
            R::search_request(&self.filter)
        } else {
            R::load_request()
        }
    }

    /// Go back to `Loading` and ask for a fresh fetch.
    pub fn reload(&mut self) -> Action {
        self.state = ListState::Loading;
        Action::Dispatch(self.fetch_request())
    }

    pub fn on_loaded(&mut self, items: &[R]) {
        self.state = ListState::Loaded(items.to_vec());
        self.clamp_selection();
    }

    pub fn on_load_failed(&mut self, error: &str) {
        self.state = ListState::Failed(error.to_string());
        self.selected = 0;
    }

    /// First phase of a delete: remember `id` until the user answers.
    ///
    /// Rejected while another delete is in flight or when `id` is not in the
    /// loaded list.
    pub fn request_delete(&mut self, id: &str) -> bool {
        if self.deleting.is_some() {
            return false;
        }
        if !self.items().iter().any(|r| r.id() == Some(id)) {
            return false;
        }
        self.confirming = Some(id.to_string());
        true
    }

    /// Second phase: issue the delete for the pending id.
    pub fn confirm_delete(&mut self) -> Option<Request> {
        let id = self.confirming.take()?;
        if self.deleting.is_some() {
            return None;
        }
        self.deleting = Some(id.clone());
        Some(R::delete_request(id))
    }

    pub fn cancel_delete(&mut self) {
        self.confirming = None;
    }

    /// The backend confirmed the delete: drop the record locally.
    pub fn on_deleted(&mut self, id: &str) -> Option<Action> {
        if self.deleting.as_deref() != Some(id) {
            debug!("Ignoring delete confirmation for {} {}", R::KIND, id);
            return None;
        }
        self.deleting = None;
        let mut removed = None;
        if let ListState::Loaded(items) = &mut self.state {
            if let Some(pos) = items.iter().position(|r| r.id() == Some(id)) {
                removed = Some(items.remove(pos));
            }
        }
        self.clamp_selection();
        removed.map(|r| Action::SetStatus(format!("Deleted {} {}", R::KIND, r.label())))
    }

    /// The delete failed: keep the list as it was and tell the user.
    pub fn on_delete_failed(&mut self, id: &str) -> Option<Action> {
        if self.deleting.as_deref() != Some(id) {
            return None;
        }
        self.deleting = None;
        Some(Action::Alert(format!("Failed to delete {}", R::KIND)))
    }

    fn clamp_selection(&mut self) {
        let len = self.items().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn selected_id(&self) -> Option<String> {
        self.items()
            .get(self.selected)
            .and_then(|r| r.id())
            .map(str::to_string)
    }

    fn handle_filter_input(&mut self, action: &Action) -> Option<Action> {
        let input = self.filter_input.as_mut()?;
        match action {
            Action::Confirm | Action::SubmitForm => {
                self.filter = input.as_str().trim().to_string();
                self.filter_input = None;
                Some(self.reload())
            }
            Action::Cancel => {
                self.filter_input = None;
                None
            }
            _ => {
                input.apply(action);
                None
            }
        }
    }
}

impl<R: ListResource> Component for ResourceList<R> {
    fn init(&mut self) -> Option<Action> {
        Some(self.reload())
    }

    fn wants_input(&self) -> bool {
        self.filter_input.is_some()
    }

    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        if let Some(event) = R::list_event(action) {
            return match event {
                ListEvent::Loaded(items) => {
                    self.on_loaded(items);
                    None
                }
                ListEvent::LoadFailed(error) => {
                    self.on_load_failed(error);
                    Some(Action::SetStatus(format!("Error fetching {}s", R::KIND)))
                }
                ListEvent::Deleted(id) => self.on_deleted(id),
                ListEvent::DeleteFailed { id, .. } => self.on_delete_failed(id),
            };
        }

        if self.filter_input.is_some() {
            return self.handle_filter_input(action);
        }

        if self.confirming.is_some() {
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
            Action::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            Action::ScrollDown => {
                if self.selected + 1 < self.items().len() {
                    self.selected += 1;
                }
                None
            }
            Action::Confirm => self
                .selected_id()
                .and_then(|id| R::detail_screen(&id))
                .map(Action::GoTo),
            Action::Create => Some(Action::GoTo(R::create_screen())),
            Action::Delete => {
                let id = self.selected_id()?;
                if self.request_delete(&id) {
                    None
                } else {
                    Some(Action::SetStatus(
                        "A delete is already in progress".to_string(),
                    ))
                }
            }
            Action::Refresh => Some(self.reload()),
            Action::Filter if R::SEARCHABLE => {
                self.filter_input = Some(TextInput::new(self.filter.clone()));
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", R::TITLE))
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::dim());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(2), // Hints
            Constraint::Min(3),    // Table
            Constraint::Length(1), // Filter
        ])
        .split(inner);

        let mut hints = vec![
            Span::styled("[c]", Theme::selected()),
            Span::styled("reate  ", Theme::dim()),
            Span::styled("[d]", Theme::selected()),
            Span::styled("elete  ", Theme::dim()),
            Span::styled("[r]", Theme::selected()),
            Span::styled("eload", Theme::dim()),
        ];
        if R::detail_screen("").is_some() {
            hints.push(Span::styled("  [Enter]", Theme::selected()));
            hints.push(Span::styled(" open", Theme::dim()));
        }
        if R::SEARCHABLE {
            hints.push(Span::styled("  [/]", Theme::selected()));
            hints.push(Span::styled(" filter", Theme::dim()));
        }
        frame.render_widget(Paragraph::new(Line::from(hints)), chunks[0]);

        match &self.state {
            ListState::Loading => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        format!("Loading {}s...", R::KIND),
                        Theme::muted(),
                    )),
                    chunks[1],
                );
            }
            ListState::Failed(error) => {
                frame.render_widget(
                    Paragraph::new(vec![
                        Line::from(Span::styled(
                            format!("Could not load {}s.", R::KIND),
                            Theme::error_text(),
                        )),
                        Line::from(Span::styled(error.clone(), Theme::dim())),
                    ]),
                    chunks[1],
                );
            }
            ListState::Loaded(items) if items.is_empty() => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        format!("No {}s found. Press [c] to create one.", R::KIND),
                        Theme::dim(),
                    )),
                    chunks[1],
                );
            }
            ListState::Loaded(items) => {
                let columns = R::columns();
                let header = Row::new(columns.iter().map(|(name, _)| *name)).style(Theme::header());
                let rows: Vec<Row> = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let style = if self.deleting.as_deref() == item.id() && item.id().is_some() {
                            Theme::muted()
                        } else if i == self.selected {
                            Theme::selected()
                        } else {
                            Theme::normal()
                        };
                        Row::new(item.cells()).style(style)
                    })
                    .collect();
                let table = Table::new(rows, columns.iter().map(|(_, width)| *width))
                    .header(header)
                    .block(Block::default().borders(Borders::TOP));
                frame.render_widget(table, chunks[1]);
            }
        }

        if let Some(input) = &self.filter_input {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("Filter: ", Theme::header()),
                    Span::styled(input.as_str().to_string(), Theme::normal()),
                    Span::styled("\u{2588}", Theme::key_hint()),
                ])),
                chunks[2],
            );
        } else if !self.filter.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("Filtered by \"{}\"", self.filter),
                    Theme::muted(),
                )),
                chunks[2],
            );
        }

        if self.confirming.is_some() {
            render_confirm(
                frame,
                area,
                &format!("Are you sure you want to delete this {}?", R::KIND),
            );
        }
    }
}

impl ListResource for Course {
    const TITLE: &'static str = "Courses";
    const SEARCHABLE: bool = true;

    fn columns() -> Vec<(&'static str, Constraint)> {
        vec![("Name", Constraint::Min(20)), ("Description", Constraint::Min(30))]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.description.clone()]
    }

    fn load_request() -> Request {
        Request::ListCourses
    }

    fn search_request(query: &str) -> Request {
        Request::SearchCourses(query.to_string())
    }

    fn delete_request(id: String) -> Request {
        Request::DeleteCourse(id)
    }

    fn create_screen() -> Screen {
        Screen::CourseCreate
    }

    fn detail_screen(id: &str) -> Option<Screen> {
        Some(Screen::CourseDetail(id.to_string()))
    }

    fn list_event(action: &Action) -> Option<ListEvent<'_, Self>> {
        match action {
            Action::CoursesLoaded(courses) => Some(ListEvent::Loaded(courses)),
            Action::CoursesLoadFailed(error) => Some(ListEvent::LoadFailed(error)),
            Action::CourseDeleted(id) => Some(ListEvent::Deleted(id)),
            Action::CourseDeleteFailed { id, error } => Some(ListEvent::DeleteFailed { id, error }),
            _ => None,
        }
    }
}

impl ListResource for Student {
    const TITLE: &'static str = "Students";

    fn columns() -> Vec<(&'static str, Constraint)> {
        vec![
            ("Name", Constraint::Min(20)),
            ("Email", Constraint::Min(24)),
            ("Born", Constraint::Length(12)),
            ("Registered", Constraint::Length(12)),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.full_name(),
            self.email.clone(),
            self.date_of_birth
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.registration_date.to_string(),
        ]
    }

    fn load_request() -> Request {
        Request::ListStudents
    }

    fn delete_request(id: String) -> Request {
        Request::DeleteStudent(id)
    }

    fn create_screen() -> Screen {
        Screen::StudentCreate
    }

    fn list_event(action: &Action) -> Option<ListEvent<'_, Self>> {
        match action {
            Action::StudentsLoaded(students) => Some(ListEvent::Loaded(students)),
            Action::StudentsLoadFailed(error) => Some(ListEvent::LoadFailed(error)),
            Action::StudentDeleted(id) => Some(ListEvent::Deleted(id)),
            Action::StudentDeleteFailed { id, error } => {
                Some(ListEvent::DeleteFailed { id, error })
            }
            _ => None,
        }
    }
}
