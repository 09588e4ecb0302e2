use std::io;
use std::sync::mpsc::{RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::shutdown::ShutdownHandle;
use crate::sync::{spawn_publish, Reconciler, RemoteSource, SyncScheduler};
use crate::ui::app::{App, UiCommand};
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

/// Run the interactive UI until the user quits.
///
/// Must be called from within a tokio runtime context: the sync scheduler
/// and background POSTs are spawned onto it, while this thread owns the
/// session and does every merge.
pub fn run<R: RemoteSource + 'static>(
    mut app: App,
    reconciler: Reconciler<R>,
    period: Duration,
) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let tick_rate = Duration::from_millis(250);
    let shutdown = ShutdownHandle::new();
    let events = EventHandler::new(tick_rate, shutdown.clone());

    let sync_tx = events.sender();
    let scheduler = SyncScheduler::new(reconciler.clone(), period).spawn(
        shutdown.clone(),
        move |result| {
            let _ = sync_tx.send(AppEvent::SyncFetched(result));
        },
    );
    info!("Terminal UI started");

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Tick) | Ok(AppEvent::Resize(..)) => {}
            Ok(AppEvent::SyncFetched(result)) => app.on_sync_result(result),
            Ok(AppEvent::Published(result)) => app.on_publish_result(result),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        for command in app.take_commands() {
            execute(command, &reconciler, &events.sender());
        }
    }

    shutdown.signal();
    scheduler.abort();
    drop(guard);
    info!("Terminal UI stopped");
    Ok(())
}

fn execute<R: RemoteSource + 'static>(
    command: UiCommand,
    reconciler: &Reconciler<R>,
    tx: &Sender<AppEvent>,
) {
    let tx = tx.clone();
    match command {
        UiCommand::SyncNow => {
            let reconciler = reconciler.clone();
            tokio::spawn(async move {
                let result = reconciler.fetch().await;
                let _ = tx.send(AppEvent::SyncFetched(result));
            });
        }
        UiCommand::Publish(quote) => {
            let handle = spawn_publish(Arc::clone(reconciler.remote()), quote);
            tokio::spawn(async move {
                match handle.await {
                    Ok(result) => {
                        let _ = tx.send(AppEvent::Published(result));
                    }
                    Err(err) => warn!(error = %err, "Publish task did not complete"),
                }
            });
        }
    }
}
