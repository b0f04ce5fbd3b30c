use pos_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv before config so .env values are visible)
    dotenv::dotenv().ok();

    // 2. Load config
    let config = Config::from_env();

    // 3. Logging (file output in the work dir once it exists)
    config.ensure_work_dir_structure()?;
    let log_dir = config.logs_dir();
    init_logger_with_file(
        std::env::var("LOG_LEVEL").ok().as_deref(),
        log_dir.to_str(),
    );

    print_banner();
    tracing::info!("Lotus POS server starting...");

    // 4. Initialize server state (database, migrations)
    let state = ServerState::initialize(&config).await?;

    // 5. Run the HTTP server until shutdown
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
