use crate::helpers;
use crate::routes;
use crate::services::ProductService;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub async fn run(listener: TcpListener, service: ProductService) -> Result<Server, std::io::Error> {
    let service = web::Data::new(service);

    // Extractor failures are reported as 422 field lists, like body validation
    let json_config = web::JsonConfig::default().error_handler(helpers::json_error_handler);
    let path_config = web::PathConfig::default().error_handler(helpers::path_error_handler);
    let query_config = web::QueryConfig::default().error_handler(helpers::query_error_handler);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/products")
                    .service(routes::product::add::add)
                    .service(routes::product::get::list)
                    .service(routes::product::get::item)
                    .service(routes::product::update::item)
                    .service(routes::product::delete::item),
            )
            .app_data(json_config.clone())
            .app_data(path_config.clone())
            .app_data(query_config.clone())
            .app_data(service.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
