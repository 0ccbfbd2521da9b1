use booking_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env is optional)
    let _ = dotenv::dotenv();

    // 2. Load configuration and set up logging
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), None);

    tracing::info!("Booking server starting...");

    // 3. Initialize server state (database, sync bus, JWT)
    let state = ServerState::initialize(&config).await;

    // 4. Run the HTTP server until shutdown
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        anyhow::bail!("server exited with error: {e}");
    }

    Ok(())
}
