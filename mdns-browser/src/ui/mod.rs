pub mod app;
pub mod detail;
pub mod keys;
pub mod layout;
pub mod render;
pub mod text;
pub mod theme;

use std::io;
use std::time::Duration;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use futures::{Stream, StreamExt};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use anyhow::{Context, Result};
use shared::types::ServiceRecord;
use crate::config::UiConfig;
use self::app::{App, AppEvent};
use self::theme::Theme;

/// Take over the terminal and run the display until the user quits or
/// `cancel` fires. The terminal is restored on every exit path.
pub async fn run(
    config: &UiConfig,
    records: mpsc::Receiver<ServiceRecord>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, config, records, cancel).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &UiConfig,
    records: mpsc::Receiver<ServiceRecord>,
    cancel: CancellationToken,
) -> Result<()> {
    let theme = Theme::default();
    let mut app = App::new(config.title.clone(), config.show_full_help);

    let size = terminal.size().context("Failed to read terminal size")?;
    app.handle(AppEvent::Resize { width: size.width, height: size.height });

    drive(&mut app, EventStream::new(), records, cancel, config.tick(), |app| {
        terminal.draw(|frame| render::draw(frame, app, &theme))?;
        Ok(())
    })
    .await
}

/// The display event loop.
///
/// Waits on input, ticks, record arrivals and cancellation at once, feeds
/// whichever is ready into `app`, and redraws after each event. There is always
/// a pending receive on `records` until the stream closes, so ingestion never
/// stalls behind the UI.
pub async fn drive<S, D>(
    app: &mut App,
    mut input: S,
    mut records: mpsc::Receiver<ServiceRecord>,
    cancel: CancellationToken,
    tick_every: Duration,
    mut draw: D,
) -> Result<()>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
    D: FnMut(&App) -> Result<()>,
{
    let mut tick = interval(tick_every);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut ingesting = true;
    let mut input_open = true;

    draw(app)?;

    while !app.is_quitting() {
        let event = tokio::select! {
            _ = cancel.cancelled() => AppEvent::Cancelled,
            record = records.recv(), if ingesting => match record {
                Some(record) => AppEvent::Arrival(record),
                None => {
                    ingesting = false;
                    AppEvent::IngestionClosed
                }
            },
            maybe_event = input.next(), if input_open => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => AppEvent::Key(key),
                Some(Ok(Event::Resize(width, height))) => AppEvent::Resize { width, height },
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e).context("Failed to read terminal input"),
                None => {
                    input_open = false;
                    continue;
                }
            },
            _ = tick.tick(), if app.is_searching() => AppEvent::Tick,
        };

        app.handle(event);
        draw(app)?;
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    // Leave the shell usable if anything after raw mode fails
    on_error(enter_screen(), || {
        let _ = disable_raw_mode();
    })
}

fn enter_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// Run `cleanup` only when `result` is an error, then pass it through.
fn on_error<T>(result: Result<T>, cleanup: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        cleanup();
    }
    result
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
