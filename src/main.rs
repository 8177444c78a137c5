use std::io;
use std::sync::Arc;

use checkout_service::application::checkout_service::CheckoutService;
use checkout_service::build_server;
use checkout_service::config::Config;
use checkout_service::infrastructure::catalog::InMemoryCatalog;
use checkout_service::infrastructure::clock::SystemClock;
use checkout_service::infrastructure::discount::GrpcDiscountResolver;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let catalog = InMemoryCatalog::from_json_file(&config.products_path)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    log::info!(
        "Loaded {} products from {}",
        catalog.len(),
        config.products_path
    );

    let discounts =
        GrpcDiscountResolver::connect_lazy(&config.discount_address, config.discount_deadline)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let service = CheckoutService::new(catalog, discounts, config.promotional_date);

    log::info!(
        "Starting checkout server at http://{}",
        config.listen_address
    );
    log::info!(
        "Promotional date: month={} day={}",
        config.promotional_date.month(),
        config.promotional_date.day()
    );

    build_server(service, Arc::new(SystemClock), &config.listen_address)?.await
}
