//! The "Loan Plan Web Service's" entry point.

use clap::Parser;
use loan_plan_web_service::routes;
use std::env;
use std::net::SocketAddr;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8000")]
    addr: SocketAddr,
}

/// The "Loan Plan Web Service's" entry point.
#[tokio::main]
async fn main() {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "loan_plan=info");
    }
    pretty_env_logger::init();

    let cli = Cli::parse();

    let (addr, server) = warp::serve(routes::api()).bind_with_graceful_shutdown(cli.addr, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
    });

    log::info!("listening on http://{}", addr);

    // Start up the server
    server.await;

    log::info!("shut down");
}
