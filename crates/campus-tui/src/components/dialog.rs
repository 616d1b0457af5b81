//! Modal overlays: blocking alerts and delete confirmations.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

/// Center a rectangle inside another.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .flex(Flex::Center)
    .split(area);

    let horizontal = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .flex(Flex::Center)
    .split(vertical[1]);

    horizontal[1]
}

/// Draw a yes/no prompt over `area`.
pub fn render_confirm(frame: &mut Frame, area: Rect, question: &str) {
    let dialog = centered_rect(area, 56, 7);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::warning()));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(question.to_string(), Theme::normal())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", Theme::selected()),
            Span::styled("es  ", Theme::dim()),
            Span::styled("[n]", Theme::selected()),
            Span::styled("o", Theme::dim()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
        dialog,
    );
}

/// A failure message the user must acknowledge before doing anything else.
pub struct AlertComponent {
    message: Option<String>,
}

impl AlertComponent {
    pub fn new() -> Self {
        Self { message: None }
    }

    pub fn visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Component for AlertComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::Alert(message) => {
                self.message = Some(message.clone());
                None
            }
            _ if self.visible() && action.is_input() => {
                // Any key acknowledges.
                self.message = None;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(message) = &self.message else {
            return;
        };

        let dialog = centered_rect(area, 56, 7);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Error ")
            .title_style(Theme::error_text())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::error()));

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(message.clone(), Theme::normal())),
            Line::from(""),
            Line::from(Span::styled("Press any key to continue", Theme::dim())),
        ];
        frame.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
            dialog,
        );
    }
}
