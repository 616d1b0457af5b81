//! Main application state and render loop.

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

use campus_client::CampusApi;
use campus_core::{Course, Student};

use crate::action::{Action, InputMode, Screen, Section};
use crate::components::benchmark_dashboard::BenchmarkDashboardComponent;
use crate::components::course_create::CourseCreateComponent;
use crate::components::course_detail::CourseDetailComponent;
use crate::components::dialog::AlertComponent;
use crate::components::help::HelpComponent;
use crate::components::resource_list::ResourceList;
use crate::components::status_bar::StatusBarComponent;
use crate::components::student_create::StudentCreateComponent;
use crate::components::Component;
use crate::event::{self, EventHandler, InputModeFlag};
use crate::tasks::{self, Request};
use crate::theme::Theme;

/// The component backing the screen currently shown. Replaced wholesale on
/// every navigation, so no state survives leaving a screen.
enum ActiveScreen {
    Courses(ResourceList<Course>),
    CourseCreate(CourseCreateComponent),
    CourseDetail(CourseDetailComponent),
    Students(ResourceList<Student>),
    StudentCreate(StudentCreateComponent),
    Benchmark(BenchmarkDashboardComponent),
}

impl ActiveScreen {
    fn open(screen: &Screen) -> Self {
        match screen {
            Screen::Courses => ActiveScreen::Courses(ResourceList::new()),
            Screen::CourseCreate => ActiveScreen::CourseCreate(CourseCreateComponent::new()),
            Screen::CourseDetail(id) => {
                ActiveScreen::CourseDetail(CourseDetailComponent::new(id.clone()))
            }
            Screen::Students => ActiveScreen::Students(ResourceList::new()),
            Screen::StudentCreate => ActiveScreen::StudentCreate(StudentCreateComponent::new()),
            Screen::Benchmark => ActiveScreen::Benchmark(BenchmarkDashboardComponent::new()),
        }
    }

    fn component(&self) -> &dyn Component {
        match self {
            ActiveScreen::Courses(c) => c,
            ActiveScreen::CourseCreate(c) => c,
            ActiveScreen::CourseDetail(c) => c,
            ActiveScreen::Students(c) => c,
            ActiveScreen::StudentCreate(c) => c,
            ActiveScreen::Benchmark(c) => c,
        }
    }

    fn component_mut(&mut self) -> &mut dyn Component {
        match self {
            ActiveScreen::Courses(c) => c,
            ActiveScreen::CourseCreate(c) => c,
            ActiveScreen::CourseDetail(c) => c,
            ActiveScreen::Students(c) => c,
            ActiveScreen::StudentCreate(c) => c,
            ActiveScreen::Benchmark(c) => c,
        }
    }
}

/// Main application state.
pub struct App<A: CampusApi> {
    /// The one backend client, shared with spawned request tasks.
    api: Arc<A>,
    /// Screen currently shown.
    screen: Screen,
    active: ActiveScreen,
    /// Bumped on every navigation; responses tagged with an older value
    /// belong to a screen that is gone.
    generation: u64,
    /// Whether the app should exit.
    should_quit: bool,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,
    tick_rate: Duration,

    // Overlays and chrome
    status_bar: StatusBarComponent,
    help: HelpComponent,
    alert: AlertComponent,
}

impl<A: CampusApi> App<A> {
    pub fn new(api: Arc<A>, start: Screen) -> Self {
        Self {
            api,
            status_bar: StatusBarComponent::new("", start.section()),
            active: ActiveScreen::open(&start),
            screen: start,
            generation: 0,
            should_quit: false,
            input_mode_flag: event::new_input_mode_flag(),
            tick_rate: Duration::from_millis(100),
            help: HelpComponent::new(),
            alert: AlertComponent::new(),
        }
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Show which backend is in use in the status bar.
    pub fn with_backend_label(mut self, label: impl Into<String>) -> Self {
        self.status_bar = StatusBarComponent::new(label, self.screen.section());
        self
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Set up terminal.
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Create the action channel.
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        // Start the event handler with the shared input mode flag.
        let event_handler =
            EventHandler::new(tx.clone(), self.tick_rate, self.input_mode_flag.clone());
        tokio::spawn(async move {
            event_handler.run().await;
        });

        self.start(&tx);

        // Main loop.
        loop {
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            if let Some(action) = rx.recv().await {
                self.handle_action(&action, &tx);

                if self.should_quit {
                    break;
                }
            }
        }

        // Restore terminal.
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        info!("Exited cleanly");
        Ok(())
    }

    /// Open the start screen.
    fn start(&mut self, tx: &mpsc::UnboundedSender<Action>) {
        let start = self.screen.clone();
        self.navigate(start, tx);
    }

    /// Replace the active screen with fresh state and run its initial fetch.
    fn navigate(&mut self, screen: Screen, tx: &mpsc::UnboundedSender<Action>) {
        self.generation += 1;
        debug!(?screen, generation = self.generation, "Opening screen");
        self.active = ActiveScreen::open(&screen);
        self.screen = screen;
        if let Some(action) = self.active.component_mut().init() {
            self.handle_action(&action, tx);
        }
    }

    /// Run a backend call on its own task and report the result tagged with
    /// the current generation.
    fn spawn_request(&self, request: Request, tx: &mpsc::UnboundedSender<Action>) {
        let api = Arc::clone(&self.api);
        let generation = self.generation;
        let tx = tx.clone();
        debug!(?request, generation, "Dispatching request");

        tokio::spawn(async move {
            let action = tasks::execute(api.as_ref(), request).await;
            let _ = tx.send(Action::Response {
                generation,
                action: Box::new(action),
            });
        });
    }

    /// Determine and set the correct input mode. Called after every action.
    fn sync_input_mode(&self) {
        event::set_input_mode(&self.input_mode_flag, self.current_input_mode());
    }

    fn current_input_mode(&self) -> InputMode {
        // Overlays take plain keys.
        if self.help.visible || self.alert.visible() {
            return InputMode::Normal;
        }
        if self.active.component().wants_input() {
            InputMode::Editing
        } else {
            InputMode::Normal
        }
    }

    /// Process one action to completion, including any actions it chains.
    fn handle_action(&mut self, action: &Action, tx: &mpsc::UnboundedSender<Action>) {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::Response { generation, action } => {
                if *generation != self.generation {
                    debug!(
                        generation,
                        current = self.generation,
                        "Dropping response for a closed screen"
                    );
                    return;
                }
                self.handle_action(action, tx);
                return;
            }
            Action::Dispatch(request) => {
                self.spawn_request(request.clone(), tx);
                return;
            }
            Action::Alert(_) => {
                self.alert.handle_action(action);
                self.sync_input_mode();
                return;
            }
            _ => {}
        }

        // An open overlay swallows the key that closes it.
        if action.is_input() && (self.alert.visible() || self.help.visible) {
            self.alert.handle_action(action);
            self.help.handle_action(action);
            self.sync_input_mode();
            return;
        }

        let editing = self.current_input_mode() == InputMode::Editing;
        let result = match action {
            Action::GoTo(screen) => {
                self.navigate(screen.clone(), tx);
                None
            }
            Action::NextSection if !editing => {
                Some(Action::GoTo(self.screen.section().next().home()))
            }
            Action::PrevSection if !editing => {
                Some(Action::GoTo(self.screen.section().prev().home()))
            }
            Action::ToggleHelp => {
                self.help.handle_action(action);
                None
            }
            _ => self.active.component_mut().handle_action(action),
        };

        self.status_bar.handle_action(action);
        self.sync_input_mode();

        // Handle chained actions from components.
        if let Some(chained) = result {
            self.handle_action(&chained, tx);
        }
    }

    /// Render the full UI.
    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(2), // Tab bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.render_tabs(frame, chunks[0]);
        self.active.component().render(frame, chunks[1]);
        self.status_bar.render(frame, chunks[2]);

        // Overlays (rendered on top)
        self.help.render(frame, area);
        self.alert.render(frame, area);
    }

    /// Render the section tab bar.
    fn render_tabs(&self, frame: &mut ratatui::Frame, area: Rect) {
        let current = self.screen.section();
        let titles: Vec<Line> = Section::all()
            .iter()
            .map(|section| {
                let style = if *section == current {
                    Theme::tab_active()
                } else {
                    Theme::tab_inactive()
                };
                Line::from(Span::styled(section.label(), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(current.index())
            .divider(Span::styled(" | ", Theme::dim()))
            .highlight_style(Theme::tab_active());

        frame.render_widget(tabs, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::resource_list::ListState;
    use crate::testing::{course, student, FakeApi};

    type Rx = mpsc::UnboundedReceiver<Action>;

    fn started(api: FakeApi, start: Screen) -> (App<FakeApi>, Arc<FakeApi>, mpsc::UnboundedSender<Action>, Rx) {
        let api = Arc::new(api);
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(Arc::clone(&api), start);
        app.start(&tx);
        (app, api, tx, rx)
    }

    /// Feed the next backend response back into the app.
    async fn settle(app: &mut App<FakeApi>, tx: &mpsc::UnboundedSender<Action>, rx: &mut Rx) {
        let action = rx.recv().await.unwrap();
        app.handle_action(&action, tx);
    }

    fn course_items(app: &App<FakeApi>) -> Vec<Course> {
        match &app.active {
            ActiveScreen::Courses(list) => list.items().to_vec(),
            _ => panic!("not on the course list"),
        }
    }

    #[tokio::test]
    async fn start_screen_fetches_on_open() {
        let (mut app, api, tx, mut rx) = started(
            FakeApi::with_courses(vec![course("1", "Algebra"), course("2", "Geometry")]),
            Screen::Courses,
        );
        settle(&mut app, &tx, &mut rx).await;

        assert_eq!(course_items(&app).len(), 2);
        assert_eq!(api.calls(), ["list_courses"]);
    }

    #[tokio::test]
    async fn responses_for_a_left_screen_are_dropped() {
        let (mut app, _api, tx, _rx) = started(FakeApi::new(), Screen::Courses);
        let first = app.generation;
        // Reopening the list makes the first fetch stale.
        app.handle_action(&Action::GoTo(Screen::Courses), &tx);

        let late = |generation| Action::Response {
            generation,
            action: Box::new(Action::CoursesLoaded(vec![course("1", "Algebra")])),
        };
        app.handle_action(&late(first), &tx);
        match &app.active {
            ActiveScreen::Courses(list) => assert_eq!(list.state(), &ListState::Loading),
            _ => panic!("expected the course list"),
        }

        let current = app.generation;
        app.handle_action(&late(current), &tx);
        assert_eq!(course_items(&app), [course("1", "Algebra")]);
    }

    #[tokio::test]
    async fn navigation_builds_fresh_state() {
        let (mut app, api, tx, mut rx) = started(
            FakeApi::with_courses(vec![course("1", "Algebra")]),
            Screen::Courses,
        );
        settle(&mut app, &tx, &mut rx).await;

        app.handle_action(&Action::NextSection, &tx);
        assert_eq!(app.screen(), &Screen::Students);
        settle(&mut app, &tx, &mut rx).await;

        app.handle_action(&Action::PrevSection, &tx);
        match &app.active {
            ActiveScreen::Courses(list) => assert_eq!(list.state(), &ListState::Loading),
            _ => panic!("expected the course list"),
        }
        settle(&mut app, &tx, &mut rx).await;
        assert_eq!(api.calls(), ["list_courses", "list_students", "list_courses"]);
    }

    #[tokio::test]
    async fn section_keys_move_the_status_bar_badge() {
        let (mut app, _api, tx, _rx) = started(FakeApi::new(), Screen::Courses);
        app.handle_action(&Action::SetStatus("Deleted course".into()), &tx);

        app.handle_action(&Action::NextSection, &tx);
        assert_eq!(app.screen(), &Screen::Students);
        assert_eq!(app.status_bar.section, Section::Students);
        assert!(app.status_bar.message.is_empty());

        app.handle_action(&Action::PrevSection, &tx);
        app.handle_action(&Action::PrevSection, &tx);
        assert_eq!(app.screen(), &Screen::Benchmark);
        assert_eq!(app.status_bar.section, Section::Benchmark);
    }

    #[tokio::test]
    async fn failed_delete_raises_an_alert_that_swallows_the_next_key() {
        let (mut app, api, tx, mut rx) = started(
            FakeApi::with_courses(vec![course("1", "Algebra"), course("2", "Geometry")]),
            Screen::Courses,
        );
        settle(&mut app, &tx, &mut rx).await;

        api.fail_all();
        app.handle_action(&Action::Delete, &tx);
        app.handle_action(&Action::Accept, &tx);
        settle(&mut app, &tx, &mut rx).await;

        assert!(app.alert.visible());
        assert_eq!(app.current_input_mode(), InputMode::Normal);
        assert_eq!(course_items(&app).len(), 2);

        // The acknowledging key does not reach the list.
        app.handle_action(&Action::Delete, &tx);
        assert!(!app.alert.visible());
        match &app.active {
            ActiveScreen::Courses(list) => assert_eq!(list.pending_confirmation(), None),
            _ => panic!("expected the course list"),
        }
    }

    #[tokio::test]
    async fn create_student_returns_to_the_list() {
        let (mut app, api, tx, mut rx) = started(
            FakeApi::with_students(vec![student("1", "Ana", "Lee")]),
            Screen::Students,
        );
        settle(&mut app, &tx, &mut rx).await;

        app.handle_action(&Action::Create, &tx);
        assert_eq!(app.screen(), &Screen::StudentCreate);
        assert_eq!(app.current_input_mode(), InputMode::Editing);
        for c in "Bo".chars() {
            app.handle_action(&Action::CharInput(c), &tx);
        }
        app.handle_action(&Action::SubmitForm, &tx);
        settle(&mut app, &tx, &mut rx).await;

        assert_eq!(app.screen(), &Screen::Students);
        settle(&mut app, &tx, &mut rx).await;
        match &app.active {
            ActiveScreen::Students(list) => assert_eq!(list.items().len(), 2),
            _ => panic!("expected the student list"),
        }
        assert_eq!(
            api.calls(),
            ["list_students", "create_student", "list_students"]
        );
    }

    #[tokio::test]
    async fn editing_mode_follows_the_detail_screen() {
        let (mut app, _api, tx, mut rx) = started(
            FakeApi::with_courses(vec![course("7", "Algebra")]),
            Screen::CourseDetail("7".into()),
        );
        settle(&mut app, &tx, &mut rx).await;
        assert_eq!(app.current_input_mode(), InputMode::Normal);

        app.handle_action(&Action::Edit, &tx);
        assert_eq!(app.current_input_mode(), InputMode::Editing);

        app.handle_action(&Action::Cancel, &tx);
        assert_eq!(app.current_input_mode(), InputMode::Normal);
        assert_eq!(app.screen(), &Screen::CourseDetail("7".into()));
    }

    #[tokio::test]
    async fn help_ignores_ticks_and_quit_stops_the_loop() {
        let (mut app, _api, tx, _rx) = started(FakeApi::new(), Screen::Benchmark);
        app.handle_action(&Action::ToggleHelp, &tx);
        app.handle_action(&Action::Tick, &tx);
        assert!(app.help.visible);
        app.handle_action(&Action::Cancel, &tx);
        assert!(!app.help.visible);
        assert_eq!(app.screen(), &Screen::Benchmark);

        app.handle_action(&Action::Quit, &tx);
        assert!(app.should_quit);
    }
}
