//! Performance screen: trigger a server-side run and compare the timings
//! per operation.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use campus_core::{group_by_operation, BenchmarkMeasurement, OperationGroup};

use crate::action::Action;
use crate::components::Component;
use crate::tasks::Request;
use crate::theme::Theme;

/// Shown instead of the underlying cause when a run fails.
pub const FAILURE_MESSAGE: &str = "Failed to run performance tests. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BenchmarkState {
    Idle,
    Running,
    Completed(Vec<BenchmarkMeasurement>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    Unknown,
    Ready(String),
    Unavailable(String),
}

pub struct BenchmarkDashboardComponent {
    state: BenchmarkState,
    service: ServiceStatus,
    /// Selected operation group.
    pub selected: usize,
}

impl BenchmarkDashboardComponent {
    pub fn new() -> Self {
        Self {
            state: BenchmarkState::Idle,
            service: ServiceStatus::Unknown,
            selected: 0,
        }
    }

    pub fn state(&self) -> &BenchmarkState {
        &self.state
    }

    pub fn service(&self) -> &ServiceStatus {
        &self.service
    }

    /// Start a run. Rejected while one is running; otherwise previous
    /// results and errors are cleared.
    pub fn run(&mut self) -> Option<Request> {
        if self.state == BenchmarkState::Running {
            return None;
        }
        self.state = BenchmarkState::Running;
        self.selected = 0;
        Some(Request::RunBenchmark)
    }

    pub fn on_completed(&mut self, results: Vec<BenchmarkMeasurement>) {
        self.state = BenchmarkState::Completed(results);
        self.selected = 0;
    }

    pub fn on_failed(&mut self) {
        self.state = BenchmarkState::Failed(FAILURE_MESSAGE.to_string());
    }

    pub fn results(&self) -> &[BenchmarkMeasurement] {
        match &self.state {
            BenchmarkState::Completed(results) => results,
            _ => &[],
        }
    }

    /// Results of the last run, grouped by operation.
    pub fn grouped(&self) -> Vec<OperationGroup<'_>> {
        group_by_operation(self.results())
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let service = match &self.service {
            ServiceStatus::Unknown => Span::styled("Checking service...", Theme::muted()),
            ServiceStatus::Ready(text) => Span::styled(text.clone(), Theme::normal()),
            ServiceStatus::Unavailable(_) => {
                Span::styled("Performance service unavailable", Theme::warning_text())
            }
        };
        let run = match &self.state {
            BenchmarkState::Running => Span::styled("Running...", Theme::warning_text()),
            BenchmarkState::Completed(results) => Span::styled(
                format!(
                    "{} measurements in {} operations",
                    results.len(),
                    self.grouped().len()
                ),
                Theme::header(),
            ),
            _ => Span::styled("", Theme::dim()),
        };
        let lines = vec![
            Line::from(vec![
                service,
                Span::styled("  |  ", Theme::dim()),
                Span::styled("[r]", Theme::selected()),
                Span::styled("un tests", Theme::dim()),
            ]),
            Line::from(run),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        let groups = self.grouped();
        if groups.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("The run returned no measurements.", Theme::dim())),
                area,
            );
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Min(6),     // Operation table
            Constraint::Length(10), // Bar chart
            Constraint::Length(8),  // Detail panel
        ])
        .split(area);

        let header = Row::new(vec!["Operation", "Runs", "Fastest", "Database", "Total"])
            .style(Theme::header());

        let rows: Vec<Row> = groups
            .iter()
            .enumerate()
            .map(|(i, group)| {
                let style = if i == self.selected {
                    Theme::selected()
                } else {
                    Theme::normal()
                };
                let (fastest, database) = group
                    .fastest()
                    .map(|m| (format!("{} ms", m.duration_ms), m.database.clone()))
                    .unwrap_or_default();
                Row::new(vec![
                    group.operation.to_string(),
                    group.measurements.len().to_string(),
                    fastest,
                    database,
                    format!("{} ms", group.total_duration_ms()),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(14),
                Constraint::Length(6),
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::TOP));
        frame.render_widget(table, chunks[0]);

        if let Some(group) = groups.get(self.selected) {
            self.render_chart(frame, chunks[1], group);
            self.render_detail(frame, chunks[2], group);
        }
    }

    /// One bar per measurement of the selected operation.
    fn render_chart(&self, frame: &mut Frame, area: Rect, group: &OperationGroup<'_>) {
        let fastest = group.fastest().map(|m| m.duration_ms).unwrap_or(0);
        let bars: Vec<Bar> = group
            .measurements
            .iter()
            .map(|m| {
                Bar::default()
                    .value(m.duration_ms)
                    .label(m.database.clone().into())
                    .style(Style::default().fg(Theme::duration_color(m.duration_ms, fastest)))
            })
            .collect();

        let chart = BarChart::default()
            .block(
                Block::default()
                    .title(format!(" {} (ms) ", group.operation))
                    .borders(Borders::ALL)
                    .border_style(Theme::dim()),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(9)
            .bar_gap(2);
        frame.render_widget(chart, area);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, group: &OperationGroup<'_>) {
        let lines: Vec<Line> = group
            .measurements
            .iter()
            .map(|m| Line::from(Span::styled(m.to_string(), Theme::normal())))
            .collect();
        let detail = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" Measurements ")
                .borders(Borders::ALL)
                .border_style(Theme::dim()),
        );
        frame.render_widget(detail, area);
    }
}

impl Component for BenchmarkDashboardComponent {
    fn init(&mut self) -> Option<Action> {
        Some(Action::Dispatch(Request::BenchmarkStatus))
    }

    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::BenchmarkCompleted(results) => {
                self.on_completed(results.clone());
                Some(Action::SetStatus("Performance tests complete".to_string()))
            }
            Action::BenchmarkFailed(_) => {
                self.on_failed();
                None
            }
            Action::BenchmarkStatus(text) => {
                self.service = ServiceStatus::Ready(text.clone());
                None
            }
            Action::BenchmarkStatusUnavailable(error) => {
                self.service = ServiceStatus::Unavailable(error.clone());
                None
            }
            Action::Refresh | Action::Confirm => match self.run() {
                Some(request) => Some(Action::Dispatch(request)),
                None => Some(Action::SetStatus("Tests are already running".to_string())),
            },
            Action::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            Action::ScrollDown => {
                if self.selected + 1 < self.grouped().len() {
                    self.selected += 1;
                }
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Performance Tests ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::dim());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(3), // Status
            Constraint::Min(8),    // Body
        ])
        .split(inner);

        self.render_status(frame, chunks[0]);

        match &self.state {
            BenchmarkState::Idle => {
                frame.render_widget(
                    Paragraph::new(vec![
                        Line::from(Span::styled(
                            "Compare MySQL and MongoDB on the same workload.",
                            Theme::dim(),
                        )),
                        Line::from(Span::styled("Press [r] to run the tests.", Theme::dim())),
                    ]),
                    chunks[1],
                );
            }
            BenchmarkState::Running => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        "Running performance tests, this can take a while...",
                        Theme::muted(),
                    )),
                    chunks[1],
                );
            }
            BenchmarkState::Failed(message) => {
                frame.render_widget(
                    Paragraph::new(Span::styled(message.clone(), Theme::error_text())),
                    chunks[1],
                );
            }
            BenchmarkState::Completed(_) => self.render_results(frame, chunks[1]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::execute;
    use crate::testing::{measurement, FakeApi};

    #[test]
    fn init_asks_for_service_status() {
        let mut dashboard = BenchmarkDashboardComponent::new();
        assert!(matches!(
            dashboard.init(),
            Some(Action::Dispatch(Request::BenchmarkStatus))
        ));
        dashboard.handle_action(&Action::BenchmarkStatusUnavailable("refused".into()));
        assert!(matches!(dashboard.service(), ServiceStatus::Unavailable(_)));
    }

    #[test]
    fn run_is_rejected_while_running() {
        let mut dashboard = BenchmarkDashboardComponent::new();
        assert_eq!(dashboard.run(), Some(Request::RunBenchmark));
        assert_eq!(dashboard.run(), None);
        assert!(matches!(
            dashboard.handle_action(&Action::Refresh),
            Some(Action::SetStatus(_))
        ));
    }

    #[test]
    fn new_run_clears_previous_results() {
        let mut dashboard = BenchmarkDashboardComponent::new();
        dashboard.run();
        dashboard.on_completed(vec![measurement("WRITE", "MySQL", 10)]);
        assert_eq!(dashboard.results().len(), 1);

        dashboard.run();
        assert_eq!(dashboard.state(), &BenchmarkState::Running);
        assert!(dashboard.results().is_empty());
    }

    #[test]
    fn failure_shows_the_fixed_message() {
        let mut dashboard = BenchmarkDashboardComponent::new();
        dashboard.run();
        dashboard.on_completed(vec![measurement("WRITE", "MySQL", 10)]);
        dashboard.run();
        dashboard.handle_action(&Action::BenchmarkFailed("Request failed: 502".into()));

        assert_eq!(
            dashboard.state(),
            &BenchmarkState::Failed(FAILURE_MESSAGE.to_string())
        );
        assert!(dashboard.results().is_empty());
        // a failed run can be retried
        assert_eq!(dashboard.run(), Some(Request::RunBenchmark));
    }

    #[test]
    fn selection_moves_over_groups() {
        let mut dashboard = BenchmarkDashboardComponent::new();
        dashboard.on_completed(vec![
            measurement("WRITE", "MySQL", 10),
            measurement("READ", "MySQL", 4),
            measurement("WRITE", "MongoDB", 7),
        ]);
        dashboard.handle_action(&Action::ScrollDown);
        dashboard.handle_action(&Action::ScrollDown);
        assert_eq!(dashboard.selected, 1);
    }

    #[tokio::test]
    async fn insert_and_query_runs_group_in_order() {
        let api = FakeApi::with_benchmark(vec![
            measurement("insert", "A", 10),
            measurement("query", "A", 3),
            measurement("insert", "B", 12),
        ]);
        let mut dashboard = BenchmarkDashboardComponent::new();

        let Some(Action::Dispatch(request)) = dashboard.handle_action(&Action::Refresh) else {
            panic!("expected a run");
        };
        dashboard.handle_action(&execute(&api, request).await);

        let groups = dashboard.grouped();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].operation, "insert");
        let insert_dbs: Vec<&str> = groups[0]
            .measurements
            .iter()
            .map(|m| m.database.as_str())
            .collect();
        assert_eq!(insert_dbs, ["A", "B"]);
        assert_eq!(groups[1].operation, "query");
        assert_eq!(groups[1].measurements.len(), 1);
        assert_eq!(groups[0].fastest().map(|m| m.duration_ms), Some(10));
    }

    #[tokio::test]
    async fn backend_failure_hides_the_cause() {
        let api = FakeApi::new();
        api.fail_all();
        let mut dashboard = BenchmarkDashboardComponent::new();
        let request = dashboard.run().unwrap();
        dashboard.handle_action(&execute(&api, request).await);
        assert_eq!(
            dashboard.state(),
            &BenchmarkState::Failed(FAILURE_MESSAGE.to_string())
        );
    }
}
