use crate::models;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_valid::validation::{self, Errors, ObjectErrors};
use serde_valid::Validate;

const REQUIRED_FIELDS: [&str; 4] = ["name", "quantity", "price", "status"];

/// One field-level complaint about a request, rendered inside a 422 `detail` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
    pub input: Value,
}

impl FieldError {
    pub fn new(kind: &str, loc: &[&str], msg: impl Into<String>, input: Value) -> Self {
        FieldError {
            kind: kind.to_string(),
            loc: loc.iter().map(|part| part.to_string()).collect(),
            msg: msg.into(),
            input,
        }
    }

    fn missing(field: &str, body: &Value) -> Self {
        FieldError::new("missing", &["body", field], "Field required", body.clone())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(min_length = 1)]
    pub name: String,
    #[validate(minimum = 0)]
    pub quantity: i32,
    pub price: models::Price,
    pub status: bool,
}

impl ProductForm {
    /// Structural check of a create body: presence, types, then value rules.
    pub fn from_body(body: &Value) -> Result<Self, Vec<FieldError>> {
        let fields = require_object(body)?;

        let missing: Vec<FieldError> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !fields.contains_key(**field))
            .map(|field| FieldError::missing(field, body))
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let form: ProductForm = decode(body)?;
        form.validate()
            .map_err(|errors| constraint_errors(errors, body))?;

        Ok(form)
    }
}

/// Partial update body. Absent and `null` fields are both treated as "leave as is".
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductUpdateForm {
    #[validate(min_length = 1)]
    pub name: Option<String>,
    #[validate(minimum = 0)]
    pub quantity: Option<i32>,
    pub price: Option<models::Price>,
    pub status: Option<bool>,
}

impl ProductUpdateForm {
    pub fn from_body(body: &Value) -> Result<Self, Vec<FieldError>> {
        require_object(body)?;

        let form: ProductUpdateForm = decode(body)?;
        form.validate()
            .map_err(|errors| constraint_errors(errors, body))?;

        Ok(form)
    }
}

impl From<ProductUpdateForm> for models::ProductChanges {
    fn from(form: ProductUpdateForm) -> Self {
        models::ProductChanges {
            name: form.name,
            quantity: form.quantity,
            price: form.price,
            status: form.status,
            updated_at: None,
        }
    }
}

fn require_object(body: &Value) -> Result<&serde_json::Map<String, Value>, Vec<FieldError>> {
    body.as_object().ok_or_else(|| {
        vec![FieldError::new(
            "model_attributes_type",
            &["body"],
            "Input should be a valid dictionary or object to extract fields from",
            body.clone(),
        )]
    })
}

fn decode<T: DeserializeOwned>(body: &Value) -> Result<T, Vec<FieldError>> {
    serde_path_to_error::deserialize(body).map_err(|err| {
        let field = err.path().to_string();
        tracing::debug!("Rejected body field {}: {}", field, err.inner());

        let (kind, msg) = match field.as_str() {
            "name" => ("string_type", "Input should be a valid string"),
            "quantity" => ("int_parsing", "Input should be a valid integer"),
            "price" => ("decimal_parsing", "Input should be a valid decimal"),
            "status" => ("bool_parsing", "Input should be a valid boolean"),
            _ => {
                return vec![FieldError::new(
                    "value_error",
                    &["body"],
                    err.inner().to_string(),
                    body.clone(),
                )]
            }
        };
        let input = body.get(&field).cloned().unwrap_or(Value::Null);
        vec![FieldError::new(kind, &["body", field.as_str()], msg, input)]
    })
}

fn constraint_errors(errors: Errors, body: &Value) -> Vec<FieldError> {
    let properties = match errors {
        Errors::Object(ObjectErrors { properties, .. }) if !properties.is_empty() => properties,
        other => {
            return vec![FieldError::new(
                "value_error",
                &["body"],
                other.to_string(),
                body.clone(),
            )]
        }
    };

    let mut result = Vec::new();
    for (field, field_errors) in properties {
        let input = body.get(&field).cloned().unwrap_or(Value::Null);
        let field_errors = match field_errors {
            Errors::NewType(field_errors) => field_errors,
            nested => vec![validation::Error::Custom(nested.to_string())],
        };
        for error in field_errors {
            let kind = match &error {
                validation::Error::MinLength(_) => "string_too_short",
                validation::Error::Minimum(_) => "greater_than_equal",
                _ => "value_error",
            };
            result.push(FieldError::new(
                kind,
                &["body", field.as_str()],
                error.to_string(),
                input.clone(),
            ));
        }
    }
    result
}
