//! Application core — event loop, action dispatch, window chrome.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use zigly_core::{DataStore, DeviceCommand};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::config::Config;
use crate::event::{Event, EventReader};
use crate::screens::devices::DevicesScreen;
use crate::theme;
use crate::tui::Tui;

const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Top-level application state and event loop.
pub struct App {
    /// Whether the app should keep running.
    running: bool,
    /// Shared state container; commands dispatch through it.
    store: DataStore,
    config: Config,
    /// The device table, the app's primary screen.
    screen: Box<dyn Component>,
    /// Help overlay visibility.
    help_visible: bool,
    /// Bridge version for the header line.
    bridge_version: Option<String>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    /// Action sender — components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
}

impl App {
    pub fn new(store: DataStore, config: Config) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screen: Box<dyn Component> =
            Box::new(DevicesScreen::new(config.frontend_url.clone()));

        Self {
            running: true,
            store,
            config,
            screen,
            help_visible: false,
            bridge_version: None,
            notification: None,
            action_tx,
            action_rx,
            data_cancel: CancellationToken::new(),
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.screen.init(self.action_tx.clone())?;
        self.screen.set_focused(true);

        // Spawn the data bridge if a snapshot file is configured
        if let Some(snapshot) = self.config.snapshot.clone() {
            let store = self.store.clone();
            let tx = self.action_tx.clone();
            let cancel = self.data_cancel.clone();
            let poll = self.config.poll_interval();
            tokio::spawn(async move {
                crate::data_bridge::spawn_data_bridge(store, snapshot, poll, tx, cancel).await;
            });
        } else {
            let _ = self.action_tx.send(Action::Notify(Notification::warning(
                "no snapshot file configured — pass one with --snapshot",
            )));
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        // Cancel the data bridge and clean up
        self.data_cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// everything else is delegated to the screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?' | 'q') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::Quit)),
            KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
            _ => self.screen.handle_key_event(key),
        }
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }
            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }
            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }
            Action::DismissNotification => {
                self.notification = None;
            }
            Action::Tick => {
                if let Some((_, shown_at)) = &self.notification {
                    if shown_at.elapsed() > NOTIFICATION_TTL {
                        self.notification = None;
                    }
                }
            }
            Action::BridgeInfoUpdated(info) => {
                self.bridge_version = info.version.clone();
            }

            // Device commands pass through to the store's channel; the
            // app only acknowledges the dispatch.
            Action::RequestRemove {
                friendly_name,
                force,
            } => {
                self.store.dispatch(DeviceCommand::Remove {
                    friendly_name: friendly_name.clone(),
                    force: *force,
                });
                self.acknowledge("remove", friendly_name);
            }
            Action::RequestConfigure(name) => {
                self.store.dispatch(DeviceCommand::Configure {
                    friendly_name: name.clone(),
                });
                self.acknowledge("configure", name);
            }
            Action::RequestInterview(name) => {
                self.store.dispatch(DeviceCommand::Interview {
                    friendly_name: name.clone(),
                });
                self.acknowledge("interview", name);
            }
            _ => {}
        }

        // The screen sees every action; a follow-up goes back on the queue.
        if let Some(follow_up) = self.screen.update(action)? {
            self.action_tx.send(follow_up)?;
        }
        Ok(())
    }

    fn acknowledge(&mut self, verb: &str, name: &str) {
        self.notification = Some((
            Notification::info(format!("{verb} '{name}' dispatched")),
            Instant::now(),
        ));
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Length(1), // header
            Constraint::Min(1),    // screen
            Constraint::Length(1), // status line
        ])
        .split(frame.area());

        self.render_header(frame, layout[0]);
        self.screen.render(frame, layout[1]);
        self.render_status(frame, layout[2]);

        if self.help_visible {
            self.render_help(frame);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            " zigly ",
            Style::default()
                .fg(theme::HONEY_AMBER)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(version) = &self.bridge_version {
            spans.push(Span::styled("· bridge ", theme::status_bar()));
            spans.push(Span::styled(
                version.clone(),
                Style::default().fg(theme::MESH_TEAL),
            ));
        }
        if let Some(snapshot) = &self.config.snapshot {
            spans.push(Span::styled(
                format!("  ·  {}", snapshot.display()),
                theme::key_hint(),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some((notification, _)) = &self.notification {
            let color = match notification.level {
                NotificationLevel::Info => theme::MESH_TEAL,
                NotificationLevel::Warning => theme::WARNING_YELLOW,
                NotificationLevel::Error => theme::ERROR_RED,
            };
            Line::from(Span::styled(
                format!(" {}", notification.message),
                Style::default().fg(color),
            ))
        } else {
            Line::from(vec![
                Span::styled(" q ", theme::key_hint_key()),
                Span::styled("quit  ", theme::key_hint()),
                Span::styled("? ", theme::key_hint_key()),
                Span::styled("help", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help(&self, frame: &mut Frame) {
        let area = frame.area();
        let width = 46.min(area.width);
        let height = 14.min(area.height);
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        let block = Block::default()
            .title(" Help ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let entry = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::status_bar()),
            ])
        };
        let lines = vec![
            Line::from(""),
            entry("j/k", "move selection"),
            entry("g/G", "jump to top / bottom"),
            entry("s / S", "cycle sort column / reverse"),
            entry("Enter", "open device detail"),
            entry("Esc", "close detail"),
            entry("x / X", "remove / force-remove device"),
            entry("c", "configure device"),
            entry("i", "interview device"),
            entry("?", "toggle this help"),
            entry("q", "quit"),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}
