//! HTTP + WebSocket server exposing the routing core, modelled on the
//! teacher's own `main.rs`: parse args, load the static graph once,
//! hand an `Arc` of it to every worker thread, serve.

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use clap::Parser;

use transit_router::graph::load_graph_store;
use transit_router::server::{cors_middleware, http, ws};
use transit_router::worker::RoutingWorker;

#[derive(Parser, Debug)]
#[command(name = "transit-router", about = "Multi-modal transit routing core")]
struct Args {
    #[arg(long, default_value = "data/transit_graph.json")]
    graph: PathBuf,
    #[arg(long, default_value = "data/stops_metadata.json")]
    metadata: PathBuf,
    /// Directory for the bincode snapshot cache; omit to always reparse JSON.
    #[arg(long)]
    cache_dir: Option<PathBuf>,
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let store = match load_graph_store(&args.graph, &args.metadata, args.cache_dir.as_deref()) {
        Ok(store) => store,
        Err(e) => {
            log::error!("failed to load transit graph: {e}");
            std::process::exit(1);
        }
    };
    store.print_stats();
    let worker = Arc::new(RoutingWorker::new(store));

    log::info!("listening on {}:{}", args.host, args.port);
    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .app_data(web::Data::new(worker.clone()))
            .service(http::route)
            .route("/ws", web::get().to(ws::route_ws))
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await
}
