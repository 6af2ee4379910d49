mod error;
mod handler;

use std::{error::Error, net::SocketAddr, sync::Arc, time::Duration};

use axum::{routing::get, Router};
use axum_server::{tls_rustls::RustlsConfig, Handle};
use customers::{
    infrastructure::{self, PostgresCustomerRepository},
    AppConfig,
};
use tracing::{error, info, warn, Level};

#[tokio::main]
async fn main() {
    match AppConfig::load() {
        Ok(config) => {
            tracing_subscriber::fmt()
                .with_max_level(Level::from(&config.logger.level))
                .init();
            if let Err(error) = serve(&config).await {
                error!("アプリケーションエラー: {}", error);
            }
        }
        Err(error) => {
            tracing_subscriber::fmt::init();
            error!("アプリケーションエラー: {}", error)
        }
    }
}

pub fn router(repository: handler::Repository) -> Router {
    Router::new()
        .route(
            "/customers",
            get(handler::find_all)
                .post(handler::create)
                .put(handler::update),
        )
        .route(
            "/customers/:id",
            get(handler::find_by_id).delete(handler::delete),
        )
        .with_state(repository)
}

async fn serve(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let pool = infrastructure::connect(&config.database).await?;
    let app = router(Arc::new(PostgresCustomerRepository::new(pool.clone())));
    let addr: SocketAddr = config.web.address.parse()?;

    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    info!("リクエストの受付を開始します: {}", addr);
    match &config.web.tls {
        Some(tls) => {
            let rustls = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;
            axum_server::bind_rustls(addr, rustls)
                .handle(handle)
                .serve(app.into_make_service())
                .await?
        }
        None => {
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?
        }
    }

    pool.close().await;
    info!("データベース接続を閉じました");
    Ok(())
}

async fn shutdown_signal(handle: Handle) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("終了シグナルを待機できません: {}", e);
        return;
    }
    info!("終了シグナルを受信しました");
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
