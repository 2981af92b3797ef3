#[tokio::main]
async fn main() -> anyhow::Result<()> {
    farmstand_observability::init();

    let admin_password = std::env::var("FARMSTAND_ADMIN_PASSWORD").unwrap_or_else(|_| {
        tracing::warn!("FARMSTAND_ADMIN_PASSWORD not set; using insecure dev default");
        "dev-password".to_string()
    });
    let database_url = std::env::var("DATABASE_URL").ok();
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = farmstand_api::app::build_app(admin_password, database_url).await?;

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
