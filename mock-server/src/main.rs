use mock_server::Catalog;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_server=info".into()),
        )
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let catalog = Catalog::sample()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, inquiries = catalog.inquiries.len(), "listening");
    mock_server::run(listener, catalog).await?;
    Ok(())
}
