use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::info;
use wsflood::cli::Args;
use wsflood::connector::WebSocketConnector;
use wsflood::engine::Engine;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    wsflood::logging::init(args.verbose);

    let targets = match args.validate().and_then(|()| args.targets()) {
        Ok(targets) => targets,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    info!(
        targets = targets.len(),
        connections = args.connections,
        throttle = %humantime::format_duration(args.throttle),
        "wsflood starting"
    );

    let engine = Engine::new(Arc::new(WebSocketConnector));
    tokio::select! {
        // Workers retry forever; this arm completes only if there is
        // nothing to run.
        () = engine.run(targets, args.connections, args.throttle) => {}
        _ = signal::ctrl_c() => {
            info!("interrupted");
        }
    }
}
