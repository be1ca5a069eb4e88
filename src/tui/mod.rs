//! Interactive model explorer (default mode).

mod app;
mod constants;
mod draw;
mod handlers;

use app::App;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tokio::runtime::Runtime;

use crate::core::models::{FetchOutcome, ModelSource, Recommender, Session, fetch_outcome};

use constants::EVENT_POLL_TIMEOUT_MS;
use draw::draw;
use handlers::{HandleResult, handle_key};

/// Run one listing on a background thread. Returns the receiver for its outcome.
fn spawn_fetch<S>(
    source: Arc<S>,
    recommender: Recommender,
    rt: &Arc<Runtime>,
) -> mpsc::Receiver<FetchOutcome>
where
    S: ModelSource + Send + Sync + 'static,
{
    let (tx, rx) = mpsc::channel();
    let rt_clone = Arc::clone(rt);
    thread::spawn(move || {
        let outcome = rt_clone.block_on(fetch_outcome(source.as_ref(), &recommender));
        let _ = tx.send(outcome);
    });
    rx
}

/// Guard that restores terminal state on drop (including on panic).
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Self {
        Self
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the explorer loop. Uses a dedicated Tokio runtime for the listing call.
pub fn run<S>(mut session: Session<S>) -> io::Result<()>
where
    S: ModelSource + Send + Sync + 'static,
{
    use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, enable_raw_mode};
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    let _guard = TerminalGuard::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    execute!(stdout, Clear(ClearType::All))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let rt = Arc::new(
        Runtime::new().map_err(|e| io::Error::other(format!("Failed to create runtime: {}", e)))?,
    );

    let mut app = App::new();
    let mut pending_fetch: Option<mpsc::Receiver<FetchOutcome>> = None;
    if session.cached().is_none() {
        pending_fetch = Some(spawn_fetch(
            session.source(),
            session.recommender().clone(),
            &rt,
        ));
        app.fetch_started_at = Some(Instant::now());
    }

    loop {
        if let Some(ref fetch_rx) = pending_fetch
            && let Ok(outcome) = fetch_rx.try_recv()
        {
            if let Some(started) = app.fetch_started_at.take() {
                log::debug!("Listing finished in {:?}", started.elapsed());
            }
            session.install(outcome);
            app.reset_selection();
            pending_fetch = None;
        }

        terminal.draw(|f| draw(f, &mut app, session.cached()))?;

        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let visible_len = session
            .cached()
            .map(|l| app.visible(l.records()).len())
            .unwrap_or(0);
        match handle_key(&mut app, key, visible_len) {
            HandleResult::Quit => break,
            HandleResult::Refresh if pending_fetch.is_none() => {
                log::info!("Manual refresh requested");
                session.invalidate();
                pending_fetch = Some(spawn_fetch(
                    session.source(),
                    session.recommender().clone(),
                    &rt,
                ));
                app.fetch_started_at = Some(Instant::now());
            }
            HandleResult::Refresh | HandleResult::Continue => {}
        }
    }

    Ok(())
}
