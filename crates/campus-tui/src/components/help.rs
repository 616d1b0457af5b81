//! Help overlay: keybinding reference.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::action::Action;
use crate::components::dialog::centered_rect;
use crate::components::Component;
use crate::theme::Theme;

pub struct HelpComponent {
    pub visible: bool,
}

impl HelpComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }
}

impl Component for HelpComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ToggleHelp => {
                self.visible = !self.visible;
                None
            }
            _ if self.visible && action.is_input() => {
                self.visible = false;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog = centered_rect(area, 60, 24);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Help: Keybindings ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        let help_text = vec![
            Line::from(""),
            key_line("q / Ctrl+C", "Quit"),
            key_line("?", "Toggle this help"),
            key_line("1-3", "Jump to section"),
            key_line("Left / Right / Tab", "Previous / next section"),
            key_line("Up / Down / j / k", "Select"),
            key_line("Esc", "Back / cancel"),
            Line::from(""),
            Line::from(Span::styled("── Lists ──", Theme::header())),
            key_line("c", "Create"),
            key_line("d / Del", "Delete (asks y/n)"),
            key_line("Enter", "Open course"),
            key_line("/", "Filter courses by name"),
            key_line("r", "Reload"),
            Line::from(""),
            Line::from(Span::styled("── Forms and details ──", Theme::header())),
            key_line("e", "Edit course"),
            key_line("Tab / Enter", "Next field"),
            key_line("Ctrl+S", "Save / create"),
            key_line("Ctrl+D", "Delete while editing"),
            Line::from(""),
            Line::from(Span::styled("── Performance ──", Theme::header())),
            key_line("r / Enter", "Run performance tests"),
        ];

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, dialog);
    }
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<22}", key), Theme::selected()),
        Span::styled(desc, Theme::normal()),
    ])
}
