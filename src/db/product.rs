use crate::models;
use crate::repository::StoreError;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

fn classify(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::DuplicateKey(db_err.message().to_string())
        }
        e => StoreError::Storage(e.to_string()),
    }
}

pub async fn insert(pool: &PgPool, product: &models::Product) -> Result<(), StoreError> {
    let query_span = tracing::info_span!("Saving product document into the database");
    sqlx::query::<sqlx::Postgres>(
        r#"
        INSERT INTO products (id, document)
        VALUES ($1, $2)
        "#,
    )
    .bind(product.id)
    .bind(Json(product))
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Failed to insert product {}: {:?}", product.id, err);
        classify(err)
    })
}

pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Option<models::Product>, StoreError> {
    let query_span = tracing::info_span!("Fetch product document by id.");
    sqlx::query_scalar::<sqlx::Postgres, Json<models::Product>>(
        r#"SELECT document FROM products WHERE id = $1 LIMIT 1"#,
    )
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map(|document| document.map(|Json(product)| product))
    .map_err(|err| {
        tracing::error!("Failed to fetch product {}: {:?}", id, err);
        classify(err)
    })
}

pub async fn fetch_by_price(
    pool: &PgPool,
    range: models::PriceRange,
) -> Result<Vec<models::Product>, StoreError> {
    let mut query = String::from("SELECT document FROM products");
    match (range.min, range.max) {
        (None, None) => {}
        (Some(_), None) => query.push_str(" WHERE (document->>'price')::numeric > $1"),
        (None, Some(_)) => query.push_str(" WHERE (document->>'price')::numeric < $1"),
        (Some(_), Some(_)) => query.push_str(
            " WHERE (document->>'price')::numeric > $1 AND (document->>'price')::numeric < $2",
        ),
    }
    query.push_str(" ORDER BY pk");

    let query_span = tracing::info_span!("Fetch product documents by price range.", ?range);
    let mut statement = sqlx::query_scalar::<sqlx::Postgres, Json<models::Product>>(&query);
    for bound in [range.min, range.max].into_iter().flatten() {
        statement = statement.bind(bound);
    }

    statement
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map(|documents| documents.into_iter().map(|Json(product)| product).collect())
        .map_err(|err| {
            tracing::error!("Failed to fetch products: {:?}", err);
            classify(err)
        })
}

/// Merges `changes` into the stored document and returns the document as it is afterwards.
/// A supplied `updated_at` not later than the stored one is bumped past it.
pub async fn update_fields(
    pool: &PgPool,
    id: Uuid,
    changes: &models::ProductChanges,
) -> Result<Option<models::Product>, StoreError> {
    let query_span = tracing::info_span!("Updating product document fields");
    sqlx::query_scalar::<sqlx::Postgres, Json<models::Product>>(
        r#"
        UPDATE products
        SET document = document || $2 || CASE
            WHEN NOT ($2 ? 'updated_at')
                OR ($2->>'updated_at')::timestamptz > (document->>'updated_at')::timestamptz
                THEN '{}'::jsonb
            ELSE jsonb_build_object(
                'updated_at',
                (document->>'updated_at')::timestamptz + interval '1 microsecond'
            )
        END
        WHERE id = $1
        RETURNING document
        "#,
    )
    .bind(id)
    .bind(Json(changes))
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map(|document| document.map(|Json(product)| product))
    .map_err(|err| {
        tracing::error!("Failed to update product {}: {:?}", id, err);
        classify(err)
    })
}

#[tracing::instrument(name = "Delete product document.", skip(pool))]
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, StoreError> {
    sqlx::query::<sqlx::Postgres>("DELETE FROM products WHERE id = $1;")
        .bind(id)
        .execute(pool)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete product {}: {:?}", id, err);
            classify(err)
        })
}
