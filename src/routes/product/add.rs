use crate::forms;
use crate::helpers::ErrorResponse;
use crate::services::ProductService;
use actix_web::{post, web, HttpResponse, Result};
use serde_json::Value;

#[tracing::instrument(name = "Add product.", skip(body, service))]
#[post("")]
pub async fn add(
    body: web::Json<Value>,
    service: web::Data<ProductService>,
) -> Result<HttpResponse, ErrorResponse> {
    let form = forms::ProductForm::from_body(&body).map_err(|errors| {
        tracing::debug!("Invalid product received: {:?}", errors);
        ErrorResponse::form_error(errors)
    })?;

    let product = service.create(form).await?;

    Ok(HttpResponse::Created().json(product))
}
