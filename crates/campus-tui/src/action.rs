//! Action enum: the central message bus for the TUI.
//! All user interactions and backend results flow through here.

use campus_core::{BenchmarkMeasurement, Course, Student};

use crate::tasks::Request;

/// Every possible action that can occur in the application.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Navigation ──────────────────────────────────────────
    /// Open a screen with fresh state.
    GoTo(Screen),
    /// Move to the next top-level section.
    NextSection,
    /// Move to the previous top-level section.
    PrevSection,

    // ── Global ──────────────────────────────────────────────
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Display a status message in the status bar.
    SetStatus(String),
    /// Show a blocking alert the user has to acknowledge.
    Alert(String),
    /// A tick event for redraws.
    Tick,

    // ── Backend ─────────────────────────────────────────────
    /// Issue a backend call on behalf of the active screen.
    Dispatch(Request),
    /// A backend call finished. `generation` identifies the screen instance
    /// that issued it; responses for a screen that was left are dropped.
    Response {
        generation: u64,
        action: Box<Action>,
    },

    CoursesLoaded(Vec<Course>),
    CoursesLoadFailed(String),
    CourseLoaded(Box<Course>),
    CourseLoadFailed(String),
    CourseCreated(Box<Course>),
    CourseCreateFailed(String),
    CourseUpdated(Box<Course>),
    CourseUpdateFailed(String),
    CourseDeleted(String),
    CourseDeleteFailed {
        id: String,
        error: String,
    },

    StudentsLoaded(Vec<Student>),
    StudentsLoadFailed(String),
    StudentCreated(Box<Student>),
    StudentCreateFailed(String),
    StudentDeleted(String),
    StudentDeleteFailed {
        id: String,
        error: String,
    },

    BenchmarkCompleted(Vec<BenchmarkMeasurement>),
    BenchmarkFailed(String),
    BenchmarkStatus(String),
    BenchmarkStatusUnavailable(String),

    // ── Screen commands ─────────────────────────────────────
    /// Open the create screen of the current section.
    Create,
    /// Toggle edit mode on a detail screen.
    Edit,
    /// Ask to delete the selected or displayed record.
    Delete,
    /// Answer "yes" to a pending confirmation.
    Accept,
    /// Dismiss, cancel or go back (Esc).
    Cancel,
    /// Reload the list, or start a benchmark run.
    Refresh,
    /// Start typing a list filter.
    Filter,

    // ── Text Input ───────────────────────────────────────────
    /// A character was typed (only sent when in input mode).
    CharInput(char),
    /// Backspace pressed (only sent when in input mode).
    BackspaceInput,
    /// Delete word (Ctrl+W).
    DeleteWord,
    /// Switch focus between input fields (Tab in input mode).
    SwitchInputField,
    /// Submit the form (Ctrl+S / Ctrl+Enter in editing mode).
    SubmitForm,
    /// Bulk paste from bracketed paste mode.
    PasteBulk(String),

    // ── Scrolling / Selection ───────────────────────────────
    ScrollUp,
    ScrollDown,
    Confirm,
}

impl Action {
    /// Whether this action came from a key press (as opposed to a timer or
    /// a backend completion). Overlays close on input only.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Action::NextSection
                | Action::PrevSection
                | Action::ToggleHelp
                | Action::Create
                | Action::Edit
                | Action::Delete
                | Action::Accept
                | Action::Cancel
                | Action::Refresh
                | Action::Filter
                | Action::CharInput(_)
                | Action::BackspaceInput
                | Action::DeleteWord
                | Action::SwitchInputField
                | Action::SubmitForm
                | Action::PasteBulk(_)
                | Action::ScrollUp
                | Action::ScrollDown
                | Action::Confirm
        )
    }
}

/// Whether the app is in a text-input mode where raw keys should
/// be forwarded to the active component instead of interpreted as
/// global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode: keys are global shortcuts.
    Normal,
    /// Text input mode: keys go to the focused text field.
    Editing,
}

/// Every screen the client can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Courses,
    CourseCreate,
    CourseDetail(String),
    Students,
    StudentCreate,
    Benchmark,
}

impl Screen {
    /// The top-level section this screen belongs to.
    pub fn section(&self) -> Section {
        match self {
            Screen::Courses | Screen::CourseCreate | Screen::CourseDetail(_) => Section::Courses,
            Screen::Students | Screen::StudentCreate => Section::Students,
            Screen::Benchmark => Section::Benchmark,
        }
    }

    /// Parse a start screen name as used in the config file and on the command line.
    pub fn from_name(name: &str) -> Option<Screen> {
        match name.trim().to_ascii_lowercase().as_str() {
            "courses" => Some(Screen::Courses),
            "students" => Some(Screen::Students),
            "benchmark" | "performance" => Some(Screen::Benchmark),
            _ => None,
        }
    }
}

/// The three tabs along the top of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Courses,
    Students,
    Benchmark,
}

impl Section {
    /// Get all sections in order.
    pub fn all() -> &'static [Section] {
        &[Section::Courses, Section::Students, Section::Benchmark]
    }

    /// Get the display label for the section tab.
    pub fn label(&self) -> &'static str {
        match self {
            Section::Courses => "1.Courses",
            Section::Students => "2.Students",
            Section::Benchmark => "3.Performance",
        }
    }

    /// The screen a section opens on.
    pub fn home(&self) -> Screen {
        match self {
            Section::Courses => Screen::Courses,
            Section::Students => Screen::Students,
            Section::Benchmark => Screen::Benchmark,
        }
    }

    pub fn next(&self) -> Section {
        match self {
            Section::Courses => Section::Students,
            Section::Students => Section::Benchmark,
            Section::Benchmark => Section::Courses,
        }
    }

    pub fn prev(&self) -> Section {
        match self {
            Section::Courses => Section::Benchmark,
            Section::Students => Section::Courses,
            Section::Benchmark => Section::Students,
        }
    }

    /// Numeric index (0-based).
    pub fn index(&self) -> usize {
        match self {
            Section::Courses => 0,
            Section::Students => 1,
            Section::Benchmark => 2,
        }
    }
}
