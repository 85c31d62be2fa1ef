/// Example printing a single connection status snapshot.
///
/// Location is disabled here so the example does not wait on a GeoClue2 fix.
use wifistat::{FetchConfig, NetworkCard, WifiStatus, classify};

#[tokio::main]
async fn main() -> wifistat::Result<()> {
    let config = FetchConfig::new().with_location_enabled(false);
    let status = WifiStatus::with_config(config).await?;

    if !status.request_permissions().await {
        println!("Wi-Fi details are not available to this user");
    }

    let snapshot = status.fetch_snapshot().await?;
    let card = NetworkCard::from_snapshot(&snapshot);

    println!("{}", card.title);
    for row in &card.rows {
        println!("  {:<16} {}", row.label, row.value);
    }

    if let Some(dbm) = snapshot.signal_strength_dbm.filter(|d| *d != 0) {
        let quality = classify(dbm);
        println!("\n{dbm} dBm is {} ({}%)", quality.tier, quality.percentage);
    }

    Ok(())
}
