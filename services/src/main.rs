use dropzone_services::{
    config::Config,
    routes,
    storage::{DiskStorage, UploadStorage},
    telemetry,
};
use dropzone_utils::version_info::{build_commit, build_date, build_version};
use std::net::{IpAddr, SocketAddr};
use tracing::info;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config: Config = Config::init()?;

    // Initialize tracing
    telemetry::init_tracing(&config)?;

    // Print build information
    print_build_info();

    info!(
        environment = %config.environment(),
        server_addr = %config.server_addr(),
        port = %config.port(),
        upload_dir = %config.upload_dir().display(),
        "Configuration loaded"
    );

    // Prepare the upload directory before accepting requests
    let storage = DiskStorage::new(config.upload_dir())?;
    storage.ensure_root().await?;
    info!(root = %storage.root().display(), "Upload storage ready");

    // Build the application router
    let route = routes(storage, config.clone()).await;

    // Create socket address
    let addr = SocketAddr::from((config.server_addr().parse::<IpAddr>()?, config.port()));

    info!("Starting server on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, route).await?;

    Ok(())
}

/// Print build information
fn print_build_info() {
    info!("===========================================");
    info!("  Dropzone Services");
    info!("===========================================");
    info!("Version:      {}", build_version());
    info!("Build Date:   {}", build_date());
    info!("Build Commit: {}", build_commit());
    info!("===========================================");
}
