use crate::config;
use crate::events::AppEvent;
use crate::sys::server;
use async_channel::Sender;
use std::thread;
use std::time::Duration;
use tokio::runtime::Builder;
use tokio::time::{MissedTickBehavior, interval};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub fn start_background_services(tx: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name("pomodoro-services".into())
        .spawn(move || {
            let rt = match Builder::new_current_thread().enable_all().build() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create Tokio runtime: {}", e);
                    return;
                }
            };

            rt.block_on(async move {
                tokio::join!(
                    server::run_server(tx.clone()),
                    config::run_async_watcher(tx.clone()),
                    run_ticker(tx),
                );
            });
            log::debug!("Background services stopped");
        });

    if let Err(e) = spawned {
        log::error!("Failed to start background services: {}", e);
    }
}

/// Drives the countdown; the session itself works out elapsed time, so a late tick only
/// delays the redraw.
async fn run_ticker(tx: Sender<AppEvent>) {
    let mut ticks = interval(TICK_INTERVAL);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticks.tick().await;
        if tx.send(AppEvent::Tick).await.is_err() {
            break;
        }
    }
}
