use crate::helpers::ErrorResponse;
use crate::models::{PriceRange, ProductId};
use crate::services::ProductService;
use actix_web::{get, web, HttpResponse, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

impl From<PriceQuery> for PriceRange {
    fn from(query: PriceQuery) -> Self {
        PriceRange {
            min: query.min_price,
            max: query.max_price,
        }
    }
}

#[tracing::instrument(name = "Get product.", skip(service))]
#[get("/{id}")]
pub async fn item(
    path: web::Path<(ProductId,)>,
    service: web::Data<ProductService>,
) -> Result<HttpResponse, ErrorResponse> {
    let (ProductId(id),) = path.into_inner();
    let product = service.get(id).await?;

    Ok(HttpResponse::Ok().json(product))
}

#[tracing::instrument(name = "List products.", skip(service))]
#[get("")]
pub async fn list(
    query: web::Query<PriceQuery>,
    service: web::Data<ProductService>,
) -> Result<HttpResponse, ErrorResponse> {
    let products = service.query(query.into_inner().into()).await?;

    Ok(HttpResponse::Ok().json(products))
}
