//! Event Loop - TUI entry point, timers and input handling

use crate::app::App;
use crate::config::SentinelConfig;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sentinel_shared::seed;
use sentinel_shared::services::ResponseServices;
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::input::{decode_key, decode_mouse};
use super::render::draw_ui;

/// Timer messages delivered to the event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiMessage {
    FeedTick,
    IndicatorTick,
}

/// Background interval tasks. Aborted on shutdown or drop, so no tick
/// arrives after the console is gone.
pub struct Timers {
    handles: Vec<JoinHandle<()>>,
}

impl Timers {
    pub fn start(tx: mpsc::Sender<TuiMessage>, feed: Duration, indicator: Duration) -> Self {
        let handles = vec![
            spawn_ticker(tx.clone(), feed, TuiMessage::FeedTick),
            spawn_ticker(tx, indicator, TuiMessage::IndicatorTick),
        ];
        Self { handles }
    }

    pub fn shutdown(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// First tick fires immediately, so the feed is populated at startup
fn spawn_ticker(tx: mpsc::Sender<TuiMessage>, period: Duration, msg: TuiMessage) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if tx.send(msg).await.is_err() {
                break;
            }
        }
    })
}

/// Run the TUI
pub async fn run<S: ResponseServices>(config: SentinelConfig, services: S) -> Result<()> {
    enable_raw_mode().map_err(|e| {
        anyhow::anyhow!(
            "Failed to enable raw mode: {}. Ensure you're running in a real terminal (TTY).",
            e
        )
    })?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|e| {
        let _ = disable_raw_mode();
        anyhow::anyhow!("Failed to initialize terminal: {}", e)
    })?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, seed::sample_data(), services);

    let (tx, mut rx) = mpsc::channel(32);
    let mut timers = Timers::start(tx, config.feed.interval(), config.feed.indicator_interval());
    info!("console started");

    let poll = Duration::from_millis(config.ui.poll_ms.max(10));
    let result = run_event_loop(&mut terminal, &mut app, &mut rx, poll).await;
    if let Err(e) = &result {
        error!("event loop failed: {}", e);
    }

    timers.shutdown();
    app.shutdown();

    // Always attempt cleanup
    let cleanup_result = restore_terminal(&mut terminal);

    result.and(cleanup_result)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Apply pending timer messages
pub fn drain_messages<S: ResponseServices>(app: &mut App<S>, rx: &mut mpsc::Receiver<TuiMessage>) {
    while let Ok(msg) = rx.try_recv() {
        match msg {
            TuiMessage::FeedTick => app.on_feed_tick(),
            TuiMessage::IndicatorTick => app.on_indicator_tick(),
        }
    }
}

async fn run_event_loop<S: ResponseServices>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
    rx: &mut mpsc::Receiver<TuiMessage>,
    poll: Duration,
) -> Result<()> {
    loop {
        drain_messages(app, rx);
        app.sync();

        terminal.draw(|f| draw_ui(f, app))?;

        if event::poll(poll)? {
            let modal_open = app.selection().is_open();
            let intent = match event::read()? {
                Event::Key(key) => decode_key(key, modal_open),
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    decode_mouse(mouse, size, modal_open)
                }
                _ => None,
            };
            if let Some(intent) = intent {
                app.handle(intent);
            }
        }

        if app.should_quit() {
            break;
        }

        // Let timer tasks run between polls
        tokio::task::yield_now().await;
    }

    Ok(())
}
