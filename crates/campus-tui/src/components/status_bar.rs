//! Status bar at the bottom of the TUI.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::{Action, Section};
use crate::components::Component;
use crate::theme::Theme;

pub struct StatusBarComponent {
    /// Current status message.
    pub message: String,
    /// Section of the active screen.
    pub section: Section,
    /// Backend the client talks to.
    base_url: String,
}

impl StatusBarComponent {
    pub fn new(base_url: impl Into<String>, section: Section) -> Self {
        Self {
            message: "Press ? for help.".to_string(),
            section,
            base_url: base_url.into(),
        }
    }

    fn section_badge(&self) -> &'static str {
        match self.section {
            Section::Courses => "Courses",
            Section::Students => "Students",
            Section::Benchmark => "Performance",
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars > 3 {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{head}...")
    } else {
        String::new()
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::SetStatus(msg) => {
                self.message = msg.clone();
                None
            }
            Action::GoTo(screen) => {
                if screen.section() != self.section {
                    self.message.clear();
                }
                self.section = screen.section();
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;

        let hints = format!("{} ·q·?·1-3", self.base_url);
        let hints_len = hints.chars().count() + 1;

        let badge = self.section_badge();
        let badge_len = badge.len() + 2;

        let msg_budget = width
            .saturating_sub(badge_len)
            .saturating_sub(hints_len)
            .saturating_sub(4);
        let msg = truncate(&self.message, msg_budget);

        let used = badge_len + 2 + msg.chars().count();
        let pad = width.saturating_sub(used + hints_len);

        let line = Line::from(vec![
            Span::styled(format!(" {} ", badge), Theme::muted()),
            Span::styled("  ", Theme::dim()),
            Span::styled(msg, Theme::dim()),
            Span::raw(" ".repeat(pad)),
            Span::styled(hints, Theme::key_hint()),
            Span::raw(" "),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
