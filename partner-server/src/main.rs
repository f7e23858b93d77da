use partner_server::utils::logger::init_logger;
use partner_server::{Config, Server, ServerState};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    if let Err(e) = config.ensure_work_dir_structure() {
        eprintln!("Failed to create work directory {}: {e}", config.work_dir);
        std::process::exit(1);
    }

    // guard 必须存活到进程结束，否则文件日志丢失
    let log_dir = config.log_dir();
    let _log_guard = init_logger(Some(&log_dir), config.is_production());

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        port = config.http_port,
        "Starting PassPrive partner server"
    );

    let state = match ServerState::initialize(config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize server state: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = Server::with_state(state).run().await {
        tracing::error!("Server exited with error: {e}");
        std::process::exit(1);
    }
}
