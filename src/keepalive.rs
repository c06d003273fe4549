// src/keepalive.rs

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};
use url::Url;

/// Starts the self-ping loop that keeps the hosting platform from idling the
/// process out.
///
/// The first ping goes out one full `period` after start. Failures are logged
/// and the loop simply waits for the next tick.
///
/// # Arguments
/// * `client` - HTTP client used for the pings.
/// * `target` - Public address of this service.
/// * `period` - Time between two pings (14 minutes in production).
///
/// # Returns
/// The `JoinHandle` of the spawned task. The loop never ends on its own.
pub fn spawn(client: reqwest::Client, target: Url, period: Duration) -> JoinHandle<()> {
    let first = Instant::now() + period;
    tokio::spawn(async move {
        let mut ticker = interval_at(first, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            ping(&client, &target).await;
        }
    })
}

async fn ping(client: &reqwest::Client, target: &Url) {
    match client.get(target.clone()).send().await {
        Ok(response) if response.status().is_success() => {
            info!(status = %response.status(), "Keep-alive ping sent successfully.");
        }
        Ok(response) => {
            warn!(status = %response.status(), "Keep-alive ping got a non-success answer.");
        }
        Err(e) => {
            warn!(error = %e, "Keep-alive ping failed.");
        }
    }
}
