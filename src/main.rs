use std::sync::Arc;
use tokio::net::TcpListener;

use formlet::config::{AppState, Config};
use formlet::logger;
use formlet::middleware::{Chain, RequestTrace, UsersPage};
use formlet::server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load_from("config")?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, sized by the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    let chain = build_chain(&cfg);
    let state = Arc::new(AppState::new(cfg, chain));

    logger::log_server_start(&addr, &state.config);

    server::run(listener, state).await
}

/// Wire the middleware chain: the trace entry runs on every request and
/// always passes control onward; the user list finalizes its prefix.
fn build_chain(cfg: &Config) -> Chain {
    let mut chain = Chain::new();
    chain.mount("/", RequestTrace);
    chain.mount("/users", UsersPage::new(cfg.app.users.clone()));
    chain
}
