use axum::extract::Extension;
use axum::routing::{get, post};
use axum::Router;
use search_federation::collector::handlers::handle_receive_log;
use search_federation::collector::sink::CsvLogSink;
use search_federation::collector::{client::CollectorClient, COLLECTOR_SERVICE_NAME};
use search_federation::registry::client::RegistryClient;
use search_federation::registry::handlers::{handle_lookup, handle_register};
use search_federation::registry::RegistryTable;
use search_federation::router::client::{HttpSearchNode, NodeSet, SearchNode};
use search_federation::router::handlers::{handle_title_query, handle_type_query};
use search_federation::shipper::retry::RetryPolicy;
use search_federation::shipper::service::{discover_collector, LogShipper};
use search_federation::shipper::store::{AuditStore, HttpAuditStore};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <role> [options]", program);
    eprintln!();
    eprintln!("Roles:");
    eprintln!("  router    --bind <addr:port> --node <kind=url> [--node <kind=url> ...]");
    eprintln!("  collector --bind <addr:port> --registry <url> --sink <path> [--advertise <url>]");
    eprintln!("  shipper   --store <url> --registry <url>");
    eprintln!("  registry  --bind <addr:port>");
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage(&args[0]);
    }

    let mut bind_addr: Option<SocketAddr> = None;
    let mut registry_url: Option<String> = None;
    let mut store_url: Option<String> = None;
    let mut sink_path: Option<PathBuf> = None;
    let mut advertise: Option<String> = None;
    let mut node_specs: Vec<(String, String)> = Vec::new();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--registry" => {
                registry_url = Some(args[i + 1].clone());
                i += 2;
            }
            "--store" => {
                store_url = Some(args[i + 1].clone());
                i += 2;
            }
            "--sink" => {
                sink_path = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--advertise" => {
                advertise = Some(args[i + 1].clone());
                i += 2;
            }
            "--node" => {
                match args[i + 1].split_once('=') {
                    Some((kind, url)) => {
                        node_specs.push((kind.to_string(), url.to_string()));
                    }
                    None => {
                        eprintln!("--node expects <kind=url>, got '{}'", args[i + 1]);
                        std::process::exit(1);
                    }
                }
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    match args[1].as_str() {
        "router" => {
            let bind_addr = match bind_addr {
                Some(addr) => addr,
                None => usage(&args[0]),
            };
            if node_specs.is_empty() {
                eprintln!("router needs at least one --node <kind=url>");
                std::process::exit(1);
            }

            let nodes: Vec<(String, Arc<dyn SearchNode>)> = node_specs
                .into_iter()
                .map(|(kind, url)| {
                    tracing::info!("configured node '{}' at {}", kind, url);
                    let node: Arc<dyn SearchNode> = Arc::new(HttpSearchNode::new(&url));
                    (kind, node)
                })
                .collect();
            let node_set = Arc::new(NodeSet::new(nodes));

            let app = Router::new()
                .route("/query/title", get(handle_title_query))
                .route("/query/tipo", get(handle_type_query))
                .layer(Extension(node_set));

            tracing::info!("query router listening on {}", bind_addr);
            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, app).await?;
        }

        "collector" => {
            let bind_addr = match bind_addr {
                Some(addr) => addr,
                None => usage(&args[0]),
            };
            let registry_url = registry_url.unwrap_or_else(|| usage(&args[0]));
            let sink_path = sink_path.unwrap_or_else(|| usage(&args[0]));

            let sink = Arc::new(CsvLogSink::open(&sink_path).await?);
            tracing::info!("sink open at {}", sink_path.display());

            // The registry may still be coming up alongside us.
            let registry = RegistryClient::new(&registry_url);
            let advertised = advertise.unwrap_or_else(|| format!("http://{}", bind_addr));
            let registration = RetryPolicy::new(10, Duration::from_secs(2))
                .run("registry registration", || {
                    let registry = registry.clone();
                    let advertised = advertised.clone();
                    async move {
                        registry
                            .register(COLLECTOR_SERVICE_NAME, &advertised)
                            .await
                    }
                })
                .await;
            if registration.ready().is_none() {
                tracing::error!("could not register in the service registry, giving up");
                std::process::exit(1);
            }
            tracing::info!(
                "registered as '{}' at {}",
                COLLECTOR_SERVICE_NAME,
                advertised
            );

            let app = Router::new()
                .route("/log", post(handle_receive_log))
                .layer(Extension(sink));

            tracing::info!("log collector listening on {}", bind_addr);
            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, app).await?;
        }

        "shipper" => {
            let store_url = store_url.unwrap_or_else(|| usage(&args[0]));
            let registry_url = registry_url.unwrap_or_else(|| usage(&args[0]));

            let store: Arc<dyn AuditStore> = Arc::new(HttpAuditStore::new(&store_url));
            let registry = RegistryClient::new(&registry_url);

            let collector_url =
                match discover_collector(&store, &registry, COLLECTOR_SERVICE_NAME).await {
                    Ok(url) => url,
                    Err(e) => {
                        tracing::error!("shipper startup failed: {}", e);
                        std::process::exit(1);
                    }
                };
            tracing::info!("collector resolved at {}", collector_url);

            let delivery = Arc::new(CollectorClient::new(&collector_url));
            LogShipper::new(store, delivery).run().await;
        }

        "registry" => {
            let bind_addr = match bind_addr {
                Some(addr) => addr,
                None => usage(&args[0]),
            };

            let table = Arc::new(RegistryTable::new());
            let app = Router::new()
                .route("/register", post(handle_register))
                .route("/lookup/:name", get(handle_lookup))
                .layer(Extension(table));

            tracing::info!("service registry listening on {}", bind_addr);
            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, app).await?;
        }

        other => {
            eprintln!("Unknown role '{}'", other);
            usage(&args[0]);
        }
    }

    Ok(())
}
