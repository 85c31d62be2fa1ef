/// Example watching the connection status until Ctrl-C.
use std::time::Duration;
use wifistat::{FetchConfig, PollUpdate, WifiStatus};

#[tokio::main]
async fn main() -> wifistat::Result<()> {
    let config = FetchConfig::new()
        .with_location_enabled(false)
        .with_poll_interval(Duration::from_secs(3));

    let status = WifiStatus::with_config(config).await?;
    let poller = status.watch();
    let mut updates = poller.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                match &*updates.borrow_and_update() {
                    PollUpdate::Pending => {}
                    PollUpdate::Snapshot(s) => println!(
                        "{} {:?} via {} ({:?} dBm)",
                        if s.is_connected { "up" } else { "down" },
                        s.ssid,
                        s.connection_type,
                        s.signal_strength_dbm,
                    ),
                    PollUpdate::Unavailable(reason) => println!("unavailable: {reason}"),
                }
            }
        }
    }

    poller.stop().await;
    Ok(())
}
