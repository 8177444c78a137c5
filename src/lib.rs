pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod proto;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::checkout_service::CheckoutService;
use domain::ports::{Catalog, Clock, DiscountResolver};
use errors::AppError;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::checkout::checkout),
    components(schemas(
        handlers::checkout::CheckoutRequest,
        handlers::checkout::CheckoutProductRequest,
        handlers::checkout::CheckoutResponse,
        handlers::checkout::CheckoutProductResponse,
    )),
    tags((name = "checkout", description = "Order pricing"))
)]
pub struct ApiDoc;

/// Registers the checkout routes. The caller provides
/// `web::Data<CheckoutService<C, D>>` and `web::Data<dyn Clock>` as app data.
pub fn configure<C: Catalog, D: DiscountResolver>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _req| AppError::from(err).into()),
    )
    .service(
        web::resource("/checkout")
            .route(web::post().to(handlers::checkout::checkout::<C, D>))
            .default_service(web::to(handlers::checkout::method_not_allowed)),
    );
}

/// Build and return an actix-web `Server` bound to `address`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server<C: Catalog, D: DiscountResolver>(
    service: CheckoutService<C, D>,
    clock: Arc<dyn Clock>,
    address: &str,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(service);
    let clock: web::Data<dyn Clock> = web::Data::from(clock);

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(clock.clone())
            .wrap(Logger::default())
            .configure(configure::<C, D>)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(address)?
    .run())
}
