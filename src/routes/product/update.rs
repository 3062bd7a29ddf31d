use crate::forms;
use crate::helpers::ErrorResponse;
use crate::models::ProductId;
use crate::services::ProductService;
use actix_web::{patch, web, HttpResponse, Result};
use serde_json::Value;

#[tracing::instrument(name = "Update product.", skip(body, service))]
#[patch("/{id}")]
pub async fn item(
    path: web::Path<(ProductId,)>,
    body: web::Json<Value>,
    service: web::Data<ProductService>,
) -> Result<HttpResponse, ErrorResponse> {
    let (ProductId(id),) = path.into_inner();
    let form = forms::ProductUpdateForm::from_body(&body).map_err(ErrorResponse::form_error)?;

    let product = service.update(id, form).await?;

    Ok(HttpResponse::Ok().json(product))
}
