//! Command-line entry point that runs one `CALCULATE` request against a
//! loaded graph and prints the ranked itineraries as JSON, without
//! standing up a server — the same role the teacher's own `ctl`
//! binary plays against `City`/`RoadNetwork`.

use std::path::PathBuf;

use clap::Parser;

use transit_router::graph::{load_graph_store, Kind};
use transit_router::rank::SortBy;
use transit_router::worker::{CalculatePayload, EndpointInput, Request, RoutingWorker};

#[derive(Parser, Debug)]
#[command(name = "ctl", about = "Run one routing query from the command line")]
struct Args {
    #[arg(long, default_value = "data/transit_graph.json")]
    graph: PathBuf,
    #[arg(long, default_value = "data/stops_metadata.json")]
    metadata: PathBuf,
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// A NodeId, or "lat,lng".
    #[arg(long)]
    start: String,
    /// A NodeId, or "lat,lng".
    #[arg(long)]
    end: String,
    #[arg(long, value_delimiter = ',')]
    excluded_modes: Vec<String>,
    #[arg(long, value_enum, default_value = "fastest")]
    sort_by: SortByArg,
}

#[derive(Clone, Debug, clap::ValueEnum)]
enum SortByArg {
    Fastest,
    LessTransfers,
    LessWalking,
}

impl From<SortByArg> for SortBy {
    fn from(value: SortByArg) -> Self {
        match value {
            SortByArg::Fastest => SortBy::Fastest,
            SortByArg::LessTransfers => SortBy::LessTransfers,
            SortByArg::LessWalking => SortBy::LessWalking,
        }
    }
}

fn parse_endpoint(raw: &str) -> EndpointInput {
    if let Some((lat, lng)) = raw.split_once(',') {
        if let (Ok(lat), Ok(lng)) = (lat.trim().parse::<f64>(), lng.trim().parse::<f64>()) {
            return EndpointInput::Coordinate { lat, lng };
        }
    }
    EndpointInput::Node(raw.to_string())
}

fn parse_mode(raw: &str) -> Kind {
    match raw.trim().to_uppercase().as_str() {
        "BUS" => Kind::Bus,
        "MRT" => Kind::Mrt,
        "LRT" => Kind::Lrt,
        other => {
            eprintln!("unknown excluded mode {other:?} (expected BUS, MRT, or LRT)");
            std::process::exit(2);
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let store = match load_graph_store(&args.graph, &args.metadata, args.cache_dir.as_deref()) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("failed to load transit graph: {e}");
            std::process::exit(1);
        }
    };
    let worker = RoutingWorker::new(store);

    let excluded_modes = args.excluded_modes.iter().map(|m| parse_mode(m)).collect();
    let request = Request::Calculate {
        payload: CalculatePayload {
            start: parse_endpoint(&args.start),
            end: parse_endpoint(&args.end),
            excluded_modes,
            sort_by: args.sort_by.into(),
        },
    };

    let response = worker.handle(request);
    println!("{}", serde_json::to_string_pretty(&response).unwrap());
}
