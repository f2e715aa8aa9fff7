//Third-party-dependencies
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::info;

use checkin_service::routes;
use checkin_service::utils::config::AppConfig;
use checkin_service::utils::storage::Storage;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // schema is created on open if it does not exist yet
    let storage = Storage::open(&config.database_path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let storage = web::Data::new(storage);

    let address = config.address();
    info!("🚀 Server started at {}", address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(storage.clone())
            .configure(routes::init_routes)
    })
        .bind(address)?
        .run()
        .await
}
