// Copyright (C) 2026 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use clap_derive::Parser;
use figment::{
    Figment,
    providers::{Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};
use tokio::select;
use tokio::signal::unix::{SignalKind, signal};
use tracing::{error, info, warn};

use wold_common::tasks::{TracingTranscript, Transcript};
use wold_db::MemWorldState;
use wold_kernel::config::Config;
use wold_kernel::scheduler::Scheduler;
use wold_kernel::verbs::VerbRegistry;

mod telnet;

use crate::telnet::ChannelSender;

#[derive(Parser, Debug, Serialize, Deserialize)]
struct Args {
    #[arg(
        long,
        value_name = "listen-address",
        help = "Telnet listen address",
        default_value = "0.0.0.0:8888"
    )]
    listen_address: String,

    #[arg(long, help = "Enable debug logging and a line transcript", default_value = "false")]
    debug: bool,

    #[arg(long, help = "Yaml config file to use, overrides values in CLI args")]
    config_file: Option<String>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), eyre::Error> {
    color_eyre::install()?;
    let cli_args = Args::parse();
    let config_file = cli_args.config_file.clone();
    let mut args_figment = Figment::new().merge(Serialized::defaults(cli_args));
    if let Some(config_file) = &config_file {
        args_figment = args_figment.merge(Yaml::file(config_file));
    }
    let args: Args = args_figment.extract()?;

    let main_subscriber = tracing_subscriber::fmt()
        .compact()
        .with_ansi(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(main_subscriber)
        .unwrap_or_else(|e| {
            eprintln!("Unable to configure logging: {e}");
            std::process::exit(1);
        });

    // World settings come from the same yaml file, with built-in defaults
    // for anything it leaves out.
    let mut world_figment = Figment::new().merge(Serialized::defaults(Config::default()));
    if let Some(config_file) = &config_file {
        world_figment = world_figment.merge(Yaml::file(config_file));
    }
    let config: Config = world_figment.extract()?;

    let listen_address = match args.listen_address.parse::<SocketAddr>() {
        Ok(addr) => addr,
        Err(e) => {
            error!(
                "Unable to parse listen address {}: {}",
                args.listen_address, e
            );
            std::process::exit(1);
        }
    };

    let mut hup_signal = match signal(SignalKind::hangup()) {
        Ok(signal) => signal,
        Err(e) => {
            error!("Unable to register HUP signal handler: {}", e);
            std::process::exit(1);
        }
    };
    let mut stop_signal = match signal(SignalKind::interrupt()) {
        Ok(signal) => signal,
        Err(e) => {
            error!("Unable to register STOP signal handler: {}", e);
            std::process::exit(1);
        }
    };

    let world = MemWorldState::bootstrap(
        &config.world_name,
        &config.entry_room_name,
        &config.entry_room_description,
        &config.automation_user_name,
    );
    info!(world = %config.world_name, "World bootstrapped, fresh and empty");

    let sender = Arc::new(ChannelSender::new());
    let transcript: Option<Arc<dyn Transcript>> = if args.debug {
        Some(Arc::new(TracingTranscript::new()))
    } else {
        None
    };
    let scheduler = Scheduler::new(
        Box::new(world),
        VerbRegistry::standard(),
        sender.clone(),
        transcript,
        config,
    );
    let scheduler_client = scheduler.client();
    let scheduler_thread = std::thread::Builder::new()
        .name("scheduler".to_string())
        .spawn(move || scheduler.run())?;

    let listen_loop =
        telnet::telnet_listen_loop(listen_address, scheduler_client.clone(), sender.clone());

    info!("Host started, listening @ {}...", args.listen_address);
    select! {
        result = listen_loop => {
            if let Err(e) = result {
                error!("Listen loop exited with error: {e}");
            } else {
                info!("Listen loop exited, stopping...");
            }
        }
        _ = hup_signal.recv() => {
            info!("HUP received, stopping...");
        },
        _ = stop_signal.recv() => {
            info!("STOP received, stopping...");
        }
    }

    let shutdown_client = scheduler_client.clone();
    if let Err(e) = tokio::task::spawn_blocking(move || shutdown_client.shutdown()).await? {
        warn!("Scheduler did not acknowledge shutdown: {e}");
    }
    if scheduler_thread.join().is_err() {
        error!("Scheduler thread panicked on the way out");
    }
    info!("Done.");

    Ok(())
}
