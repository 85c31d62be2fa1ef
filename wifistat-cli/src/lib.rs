pub mod config;
pub mod render;

use anyhow::Context;
use clap::{ArgAction, Parser};
use log::debug;
use std::path::PathBuf;
use std::process::ExitCode;
use wifistat::{ConnectivitySnapshot, NetworkCard, PollUpdate, WifiStatus};

use crate::config::Settings;

#[derive(Parser, Debug)]
#[command(name = "wifistat")]
#[command(about = "Show the current Wi-Fi connection status")]
#[command(disable_version_flag = true)]
#[command(version)]
struct Args {
    #[arg(short = 'V', long = "version", action = ArgAction::SetTrue)]
    version: bool,

    /// Keep running and print every update
    #[arg(short, long)]
    watch: bool,

    /// Seconds between updates in watch mode
    #[arg(short, long, value_name = "SECS")]
    interval: Option<u64>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Don't read the current position
    #[arg(long)]
    no_location: bool,

    /// Read Wi-Fi details without checking permissions first
    #[arg(long)]
    skip_permissions: bool,

    /// Settings file to use instead of the default
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Args {
    /// Flags given on the command line win over the settings file.
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(interval) = self.interval {
            settings.interval_secs = interval;
        }
        if self.no_location {
            settings.location = false;
        }
        if self.skip_permissions {
            settings.permissions_required = false;
        }
        settings
    }
}

pub fn run() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    if args.version {
        println!("wifistat {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = match &args.config {
        Some(path) => config::load_from(path)?,
        None => config::load()?,
    };
    let fetch_config = args.apply(settings).fetch_config();
    debug!("Using {fetch_config:?}");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    runtime.block_on(async {
        let status = WifiStatus::with_config(fetch_config)
            .await
            .context("failed to connect to the system D-Bus")?;

        if args.watch {
            watch(&status, args.json).await
        } else {
            once(&status, args.json).await
        }
    })
}

async fn once(status: &WifiStatus, json: bool) -> anyhow::Result<ExitCode> {
    match status.fetch_snapshot().await {
        Ok(snapshot) => {
            print_snapshot(&snapshot, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            print_unavailable(&e.to_string(), json);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn watch(status: &WifiStatus, json: bool) -> anyhow::Result<ExitCode> {
    let poller = status.watch();
    let mut updates = poller.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let update = updates.borrow_and_update().clone();
                match update {
                    PollUpdate::Pending => {}
                    PollUpdate::Snapshot(snapshot) => print_snapshot(&snapshot, json)?,
                    PollUpdate::Unavailable(message) => print_unavailable(&message, json),
                }
                if !json {
                    println!();
                }
            }
        }
    }

    poller.stop().await;
    Ok(ExitCode::SUCCESS)
}

fn print_snapshot(snapshot: &ConnectivitySnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", render::snapshot_json(snapshot)?);
    } else {
        print!("{}", render::card_text(&NetworkCard::from_snapshot(snapshot)));
    }
    Ok(())
}

fn print_unavailable(message: &str, json: bool) {
    if json {
        println!("{}", render::error_json(message));
    } else {
        print!("{}", render::card_text(&NetworkCard::unavailable()));
        debug!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_override_settings() {
        let args = Args::try_parse_from([
            "wifistat",
            "--watch",
            "--interval",
            "2",
            "--no-location",
            "--skip-permissions",
        ])
        .unwrap();

        let settings = args.apply(Settings::default());

        assert!(args.watch);
        assert_eq!(settings.interval_secs, 2);
        assert!(!settings.location);
        assert!(!settings.permissions_required);
    }

    #[test]
    fn no_flags_keep_settings() {
        let args = Args::try_parse_from(["wifistat"]).unwrap();
        let settings = Settings {
            interval_secs: 30,
            ..Settings::default()
        };

        assert_eq!(args.apply(settings.clone()), settings);
    }

    #[test]
    fn short_version_flag() {
        let args = Args::try_parse_from(["wifistat", "-V"]).unwrap();
        assert!(args.version);
    }
}
