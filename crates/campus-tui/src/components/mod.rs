//! Component trait and all TUI components.
//!
//! Each screen component owns that screen's view state exclusively and asks
//! the app to run backend calls by returning [`Action::Dispatch`].

pub mod benchmark_dashboard;
pub mod course_create;
pub mod course_detail;
pub mod dialog;
pub mod form;
pub mod help;
pub mod resource_list;
pub mod status_bar;
pub mod student_create;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::action::Action;

/// Trait implemented by all TUI components.
pub trait Component {
    /// Called once when the screen is opened; typically dispatches the initial fetch.
    fn init(&mut self) -> Option<Action> {
        None
    }

    /// Whether raw keys should go to this component's text fields.
    fn wants_input(&self) -> bool {
        false
    }

    /// Handle an action and optionally return a new action to dispatch.
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        let _ = action;
        None
    }

    /// Render the component into the given area.
    fn render(&self, frame: &mut Frame, area: Rect);
}
