use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::api::{PlanId, PlanProvider, SessionStore};
use crate::audio::CuePlayer;
use crate::config::Config;
use crate::session::{Clock, Effect, SessionError, SessionRunner};
use crate::ui::components::{
    phase_hints, ErrorDialog, ErrorDialogState, Footer, HistoryState, HistoryView, RunnerView,
};
use crate::ui::events::AppEvent;
use crate::ui::terminal_guard::TerminalGuard;

/// Frame interval; also the resolution of the rest timer
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Collaborators the app talks to
#[derive(Clone)]
pub struct AppServices {
    pub plans: Arc<dyn PlanProvider>,
    pub sessions: Arc<dyn SessionStore>,
    pub player: Arc<dyn CuePlayer>,
    pub clock: Arc<dyn Clock>,
}

/// Which screen is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Waiting for the plan fetch
    Loading,
    /// The plan could not be run; nothing to do but quit
    LoadFailed(String),
    Runner,
    History,
}

/// Main application state
pub struct App {
    config: Config,
    plan_id: PlanId,
    services: AppServices,
    screen: Screen,
    runner: Option<SessionRunner>,
    history: HistoryState,
    error_dialog: ErrorDialogState,
    should_quit: bool,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(config: Config, plan_id: PlanId, services: AppServices) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            config,
            plan_id,
            services,
            screen: Screen::Loading,
            runner: None,
            history: HistoryState::default(),
            error_dialog: ErrorDialogState::new(),
            should_quit: false,
            event_tx,
            event_rx,
        }
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;

        self.load_plan();
        let result = self.event_loop(&mut terminal).await;

        guard.cleanup()?;
        terminal.show_cursor()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut input = EventStream::new();
        let mut frames = tokio::time::interval(FRAME_INTERVAL);
        frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                _ = frames.tick() => {
                    self.tick();
                }

                Some(event) = input.next() => {
                    if let Event::Key(key) = event? {
                        if key.kind == KeyEventKind::Press {
                            self.handle_key(key);
                        }
                    }
                }

                Some(event) = self.event_rx.recv() => {
                    self.handle_app_event(event);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Fetch the plan in the background and show the loading screen
    pub fn load_plan(&mut self) {
        self.screen = Screen::Loading;
        self.runner = None;

        let plans = Arc::clone(&self.services.plans);
        let tx = self.event_tx.clone();
        let plan_id = self.plan_id;
        tokio::spawn(async move {
            let result = plans.get_plan(plan_id).await;
            let _ = tx.send(AppEvent::PlanLoaded { plan_id, result });
        });
    }

    fn open_history(&mut self) {
        self.screen = Screen::History;
        self.history = HistoryState::loading();

        let sessions = Arc::clone(&self.services.sessions);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = sessions.list_sessions().await;
            let _ = tx.send(AppEvent::HistoryLoaded(result));
        });
    }

    /// Advance runner timers; called once per frame
    pub fn tick(&mut self) {
        let effects = match self.runner.as_mut() {
            Some(runner) => runner.tick(),
            None => return,
        };
        self.apply_effects(effects);
    }

    /// Wait for the next background result. Used by tests that drive the app
    /// without a terminal.
    pub async fn recv_event(&mut self) -> Option<AppEvent> {
        self.event_rx.recv().await
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::PlanLoaded { plan_id, result } => {
                if plan_id != self.plan_id {
                    return;
                }
                let runner = result
                    .map_err(|e| SessionError::from_plan_fetch(plan_id, e))
                    .and_then(|plan| {
                        SessionRunner::new(
                            plan_id,
                            plan,
                            self.config.runner_settings(),
                            Arc::clone(&self.services.clock),
                        )
                    });
                match runner {
                    Ok(runner) => {
                        self.runner = Some(runner);
                        self.screen = Screen::Runner;
                    }
                    Err(e) => {
                        tracing::warn!(plan_id, error = %e, "Plan cannot be run");
                        self.screen = Screen::LoadFailed(e.to_string());
                    }
                }
            }
            AppEvent::SessionSaved(result) => {
                let effects = match self.runner.as_mut() {
                    Some(runner) => runner.submission_finished(result),
                    None => return,
                };
                self.apply_effects(effects);
            }
            AppEvent::HistoryLoaded(result) => match result {
                Ok(sessions) => self.history.set_sessions(&sessions),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load history");
                    self.history.set_error(format!("Failed to load history: {}", e));
                }
            },
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.error_dialog.is_visible() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.error_dialog.hide();
            }
            return;
        }

        if key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Loading | Screen::LoadFailed(_) => {}
            Screen::History => match key.code {
                KeyCode::Esc | KeyCode::Char('b') => self.screen = Screen::Runner,
                KeyCode::Down | KeyCode::Char('j') => self.history.scroll_down(),
                KeyCode::Up | KeyCode::Char('k') => self.history.scroll_up(),
                _ => {}
            },
            Screen::Runner => self.handle_runner_key(key),
        }
    }

    fn handle_runner_key(&mut self, key: KeyEvent) {
        use crate::session::Phase;

        let Some(runner) = self.runner.as_mut() else {
            return;
        };

        let effects = match (runner.phase(), key.code) {
            (Phase::Detail, KeyCode::Enter | KeyCode::Char(' ')) => runner.start(),
            (Phase::InProgress, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('f')) => {
                runner.finish_current()
            }
            (Phase::Break, KeyCode::Enter | KeyCode::Char('n')) => runner.advance(),
            (Phase::Break, KeyCode::Char('+') | KeyCode::Char('=')) => runner.extend_break(),
            (Phase::Finished, KeyCode::Char('r')) => {
                self.load_plan();
                return;
            }
            (Phase::Finished, KeyCode::Char('h')) => {
                self.open_history();
                return;
            }
            _ => return,
        };
        self.apply_effects(effects);
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PlayCue(cue) => self.services.player.play(cue),
                Effect::SubmitSession(record) => {
                    let sessions = Arc::clone(&self.services.sessions);
                    let tx = self.event_tx.clone();
                    tokio::spawn(async move {
                        let result = sessions.save_session(&record).await;
                        let _ = tx.send(AppEvent::SessionSaved(result));
                    });
                }
                Effect::ShowError { title, message } => self.error_dialog.show(title, message),
            }
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.draw_header(f, chunks[0]);

        match &self.screen {
            Screen::Loading => draw_centered(f, chunks[1], "Loading plan...", Color::Gray),
            Screen::LoadFailed(message) => draw_centered(f, chunks[1], message, Color::Red),
            Screen::Runner => {
                if let Some(runner) = &self.runner {
                    f.render_widget(RunnerView::new(runner), chunks[1]);
                }
            }
            Screen::History => f.render_widget(HistoryView::new(&self.history), chunks[1]),
        }

        f.render_widget(Footer::new(self.hints()), chunks[2]);

        if self.error_dialog.is_visible() {
            f.render_widget(ErrorDialog::new(&self.error_dialog), f.area());
        }
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            " fitrun ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(runner) = &self.runner {
            spans.push(Span::raw(format!(" {} ", runner.plan().name)));
            spans.push(Span::styled(
                format!("· {}", runner.phase()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        match &self.screen {
            Screen::Runner => self
                .runner
                .as_ref()
                .map(|r| phase_hints(r.phase()))
                .unwrap_or_default(),
            Screen::History => vec![("↑/↓", "Scroll"), ("Esc", "Back"), ("q", "Quit")],
            Screen::Loading | Screen::LoadFailed(_) => vec![("q", "Quit")],
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn runner(&self) -> Option<&SessionRunner> {
        self.runner.as_ref()
    }

    pub fn history(&self) -> &HistoryState {
        &self.history
    }

    pub fn error_dialog(&self) -> &ErrorDialogState {
        &self.error_dialog
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

fn draw_centered(f: &mut Frame, area: Rect, text: &str, color: Color) {
    let y = area.y + area.height / 2;
    let line_area = Rect {
        x: area.x,
        y,
        width: area.width,
        height: 1.min(area.height),
    };
    f.render_widget(
        Paragraph::new(text.to_string())
            .style(Style::default().fg(color))
            .alignment(Alignment::Center),
        line_area,
    );
}
