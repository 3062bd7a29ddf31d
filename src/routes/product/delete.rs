use crate::helpers::ErrorResponse;
use crate::models::ProductId;
use crate::services::ProductService;
use actix_web::{delete, web, HttpResponse, Result};

#[tracing::instrument(name = "Delete product.", skip(service))]
#[delete("/{id}")]
pub async fn item(
    path: web::Path<(ProductId,)>,
    service: web::Data<ProductService>,
) -> Result<HttpResponse, ErrorResponse> {
    let (ProductId(id),) = path.into_inner();

    match service.delete(id).await? {
        true => Ok(HttpResponse::NoContent().finish()),
        // Removed by a concurrent request between the lookup and the delete
        false => Err(ErrorResponse::not_found(format!(
            "Product not found with filter: {}",
            id
        ))),
    }
}
