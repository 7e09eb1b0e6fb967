//! Background jobs.
//!
//! A job runs one pass per tick on a fixed tokio interval. A failed pass is
//! logged and the loop keeps going; shutdown arrives over a broadcast
//! channel.

pub mod reaper;

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::interval;
use tracing::{error, info};

use crate::jobs::reaper::UnverifiedAccountReaper;

/// Drive the reaper on a fixed cadence until shutdown is signalled.
pub async fn run_reaper_loop(
    reaper: UnverifiedAccountReaper,
    every: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = interval(every);

    info!(interval_secs = every.as_secs(), "starting unverified-account reaper");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match reaper.run_pass().await {
                    Ok(0) => {}
                    Ok(removed) => {
                        info!(removed, "reaper pass removed unverified accounts");
                    }
                    Err(err) => {
                        error!(error = %err, "reaper pass failed, will retry on next interval");
                    }
                }
            }
            _ = shutdown.recv() => {
                info!("reaper received shutdown signal, stopping");
                break;
            }
        }
    }
}
