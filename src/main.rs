//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use stock_tracker::{
    app,
    config::{AppState, Settings},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logger: RUST_LOG manda; sem ele, info para o nosso crate.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stock_tracker=info")),
        )
        .with_target(false)
        .compact()
        .init();

    let settings = Settings::from_env()?;
    let app_state = AppState::new(&settings);
    let app = app::router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(settings.addr()).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
