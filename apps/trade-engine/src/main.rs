//! Trade Engine Binary
//!
//! Starts the PokeBox trade engine.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin trade-engine
//! ```
//!
//! # Environment Variables
//!
//! ## Optional
//! - `HTTP_PORT`: HTTP server port (default: 8000)
//! - `LOCK_WAIT_MS`: bounded lock wait before returning Conflict (default: 2000)
//! - `BOX_DELETION_POLICY`: reject | cascade (default: reject)
//! - `SEED_DEMO_DATA`: seed demo trainers and boxes (default: false)
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::signal;

use trade_engine::application::ports::OldestBoxPolicy;
use trade_engine::application::use_cases::{
    ManageBoxesUseCase, ManagePokemonsUseCase, ProposeTradeUseCase, RespondTradeUseCase,
    SearchUseCase, TradeLocks, TradeQueriesUseCase,
};
use trade_engine::infrastructure::http::{AppState, create_router};
use trade_engine::infrastructure::persistence::{
    BoxDeletionPolicy, InMemoryIdentityDirectory, InMemoryInventoryStore, InMemoryTradeRepository,
};
use trade_engine::{InventoryStore, Trainer, TrainerId};

/// Default HTTP server port.
const DEFAULT_HTTP_PORT: u16 = 8000;

/// Default bounded lock wait in milliseconds.
const DEFAULT_LOCK_WAIT_MS: u64 = 2000;

/// Stripe count for the per-trade response locks.
const TRADE_LOCK_STRIPES: usize = 64;

/// Parsed configuration from environment variables.
struct EngineConfig {
    http_port: u16,
    lock_wait: Duration,
    deletion_policy: BoxDeletionPolicy,
    seed_demo_data: bool,
}

type Policy = OldestBoxPolicy<InMemoryInventoryStore>;

/// Concrete type alias for the trade proposal use case.
type ConcreteProposeTradeUseCase =
    ProposeTradeUseCase<InMemoryInventoryStore, InMemoryIdentityDirectory, InMemoryTradeRepository>;

/// Concrete type alias for the trade executor use case.
type ConcreteRespondTradeUseCase =
    RespondTradeUseCase<InMemoryInventoryStore, InMemoryTradeRepository, Policy>;

/// Concrete type alias for the HTTP application state.
type ConcreteAppState = AppState<
    InMemoryInventoryStore,
    InMemoryIdentityDirectory,
    InMemoryTradeRepository,
    InMemoryInventoryStore,
    Policy,
>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting PokeBox Trade Engine");

    let config = parse_config();
    log_config(&config);

    let store = Arc::new(InMemoryInventoryStore::new(
        config.deletion_policy,
        config.lock_wait,
    ));
    let identity = Arc::new(InMemoryIdentityDirectory::new());
    let trades = Arc::new(InMemoryTradeRepository::new());
    let destinations = Arc::new(OldestBoxPolicy::new(Arc::clone(&store)));
    let locks = Arc::new(TradeLocks::new(TRADE_LOCK_STRIPES, config.lock_wait));

    if config.seed_demo_data {
        seed_demo_data(&store, &identity).await?;
    }

    let propose_trade: Arc<ConcreteProposeTradeUseCase> = Arc::new(ProposeTradeUseCase::new(
        Arc::clone(&store),
        Arc::clone(&identity),
        Arc::clone(&trades),
    ));
    let respond_trade: Arc<ConcreteRespondTradeUseCase> = Arc::new(RespondTradeUseCase::new(
        Arc::clone(&store),
        Arc::clone(&trades),
        destinations,
        locks,
    ));

    let state: ConcreteAppState = AppState {
        boxes: Arc::new(ManageBoxesUseCase::new(Arc::clone(&store))),
        pokemons: Arc::new(ManagePokemonsUseCase::new(Arc::clone(&store))),
        propose_trade,
        respond_trade,
        trade_queries: Arc::new(TradeQueriesUseCase::new(Arc::clone(&trades))),
        search: Arc::new(SearchUseCase::new(Arc::clone(&store), Arc::clone(&identity))),
        identity,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let router = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Trade engine ready");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Trade engine stopped");
    Ok(())
}

/// Initialize the tracing subscriber with environment filter.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "trade_engine=info"
                    .parse()
                    .expect("static directive 'trade_engine=info' is valid"),
            ),
        )
        .init();
}

/// Parse configuration from environment variables.
fn parse_config() -> EngineConfig {
    let http_port: u16 = std::env::var("HTTP_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_HTTP_PORT);

    let lock_wait_ms: u64 = std::env::var("LOCK_WAIT_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_LOCK_WAIT_MS);

    let deletion_policy = match std::env::var("BOX_DELETION_POLICY")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "cascade" => BoxDeletionPolicy::CascadeDelete,
        _ => BoxDeletionPolicy::RejectIfNotEmpty,
    };

    // Demo accounts carry well-known tokens; seeding is opt-in.
    let seed_demo_data = std::env::var("SEED_DEMO_DATA")
        .map(|v| v.to_lowercase() == "true" || v == "1")
        .unwrap_or(false);

    EngineConfig {
        http_port,
        lock_wait: Duration::from_millis(lock_wait_ms),
        deletion_policy,
        seed_demo_data,
    }
}

/// Log the parsed configuration.
fn log_config(config: &EngineConfig) {
    tracing::info!(
        http_port = config.http_port,
        lock_wait_ms = config.lock_wait.as_millis() as u64,
        deletion_policy = ?config.deletion_policy,
        seed_demo_data = config.seed_demo_data,
        "Configuration loaded"
    );
}

/// Register demo trainers with bearer tokens and a starter box each.
async fn seed_demo_data(
    store: &Arc<InMemoryInventoryStore>,
    identity: &Arc<InMemoryIdentityDirectory>,
) -> anyhow::Result<()> {
    for (id, first, last, login, token) in [
        ("trainer-ash", "Ash", "Ketchum", "ash", "ash-token"),
        ("trainer-misty", "Misty", "Williams", "misty", "misty-token"),
    ] {
        let trainer_id = TrainerId::new(id);
        identity.register(
            Trainer {
                id: trainer_id.clone(),
                first_name: first.to_string(),
                last_name: last.to_string(),
                login: login.to_string(),
                birth_date: None,
            },
            token,
        );
        store.create_box(&trainer_id, "Home").await?;
    }
    tracing::info!("Demo data seeded");
    Ok(())
}

/// Wait for a shutdown signal (ctrl-c or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
