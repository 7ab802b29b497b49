use std::{error::Error, process::ExitCode};

use axum_server::tls_rustls::RustlsConfig;
use hotelier::{application::BackOffice, infrastructure, HotelierConfig};
use tracing::{error, info, Level};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match HotelierConfig::load() {
        Ok(config) => config,
        Err(error) => {
            tracing_subscriber::fmt::init();
            error!("configuration error: {}", error);
            return ExitCode::FAILURE;
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(Level::from(&config.logger.level))
        .init();
    match serve(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("application error: {}", error);
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: &HotelierConfig) -> Result<(), Box<dyn Error>> {
    let pool = infrastructure::connect(&config.database).await?;
    if config.database.migrate {
        infrastructure::migrate(&pool).await?;
        info!("database schema is up to date");
    }
    let app = hotelier_web::router(BackOffice::mysql(pool)).into_make_service();
    let address = config.server.address;
    match (&config.server.tls_cert, &config.server.tls_key) {
        (Some(cert), Some(key)) => {
            let tls = RustlsConfig::from_pem_file(cert, key).await?;
            info!("listening on https://{}", address);
            axum_server::bind_rustls(address, tls).serve(app).await?;
        }
        _ => {
            info!("listening on http://{}", address);
            axum_server::bind(address).serve(app).await?;
        }
    }
    Ok(())
}
