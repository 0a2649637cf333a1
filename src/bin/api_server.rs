//! REST API server for the process dashboard
//!
//! Loads the five source tables once at startup and serves every view from
//! the same read-only snapshot.
//!
//! Usage:
//!   ./target/release/api_server [--port PORT] [--data-dir DIR]
//!
//! REST endpoints:
//!   GET /api/v1/health            - Health check
//!   GET /api/v1/summary           - Executive KPIs
//!   GET /api/v1/leakage/by-status - Leakage by delivery outcome
//!   GET /api/v1/carriers          - Carrier cost vs leakage
//!   GET /api/v1/actions           - Top recommended actions
//!   GET /api/v1/flow              - Priority -> carrier -> outcome flow
//!   GET /api/v1/root-causes       - Orders and leakage per root cause
//!   GET /api/v1/risk?limit=N      - Highest risk orders
//!   GET /api/v1/simulate?...      - What-if simulation
//!   GET /api/v1/orders?limit=N    - Raw process table

use anyhow::Result;
use clap::Parser;
use nexgen_intel::api::{self, DashboardService};
use nexgen_intel::config::{init_tracing, ServerArgs};
use nexgen_intel::ProcessTable;
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(name = "api_server")]
#[command(about = "Serve the process dashboard views over REST")]
struct Cli {
    #[command(flatten)]
    server: ServerArgs,
}

fn print_banner(port: u16, orders: usize) {
    println!("============================================================");
    println!("         NEXGEN PROCESS DASHBOARD API SERVER");
    println!("============================================================");
    println!();
    println!("  Port:     {}", port);
    println!("  REST:     http://localhost:{}/api/v1/", port);
    println!("  Orders:   {}", orders);
    println!();
    println!("REST Endpoints:");
    println!("  GET /api/v1/health             Health check");
    println!("  GET /api/v1/summary            Executive KPIs");
    println!("  GET /api/v1/leakage/by-status  Leakage by outcome");
    println!("  GET /api/v1/carriers           Carrier efficiency");
    println!("  GET /api/v1/actions            Recommended actions");
    println!("  GET /api/v1/flow               Process flow");
    println!("  GET /api/v1/root-causes        Root cause mix");
    println!("  GET /api/v1/risk               Highest risk orders");
    println!("  GET /api/v1/simulate           What-if simulator");
    println!("  GET /api/v1/orders             Raw data");
    println!();
    println!("============================================================");
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let table = ProcessTable::load(&cli.server.data.source())?;
    print_banner(cli.server.port, table.len());

    let app = api::router(DashboardService::new(table));
    let addr: SocketAddr = format!("0.0.0.0:{}", cli.server.port).parse()?;

    tracing::info!("Starting REST server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
