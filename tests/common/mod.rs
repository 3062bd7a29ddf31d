#![allow(dead_code)]

use catalog::configuration::{get_configuration, DatabaseSettings};
use catalog::repository::{InMemoryProductRepository, PgProductRepository, ProductRepository};
use catalog::services::ProductService;
use serde_json::{json, Value};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub db_pool: Option<PgPool>,
}

impl TestApp {
    pub fn products_url(&self) -> String {
        format!("{}/products", self.address)
    }

    pub fn product_url(&self, id: &str) -> String {
        format!("{}/products/{}", self.address, id)
    }

    pub async fn post_product(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.products_url())
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Creates a product and returns the stored record.
    pub async fn product_inserted(&self, body: &Value) -> Value {
        let response = self.post_product(body).await;
        assert_eq!(response.status().as_u16(), 201);
        response.json().await.expect("Failed to read product")
    }
}

pub fn product_data() -> Value {
    json!({
        "name": "Iphone 14 pro Max",
        "quantity": 10,
        "price": "8.500",
        "status": true
    })
}

pub fn products_data() -> Vec<Value> {
    vec![
        json!({"name": "Iphone 11 Pro Max", "quantity": 20, "price": "4.500", "status": true}),
        json!({"name": "Iphone 12 Pro Max", "quantity": 15, "price": "5999.900", "status": true}),
        json!({"name": "Iphone 13 Pro Max", "quantity": 5, "price": "7500", "status": true}),
        json!({"name": "Iphone 15 Pro Max", "quantity": 3, "price": "10500.000", "status": false}),
    ]
}

async fn spawn_with(repository: Arc<dyn ProductRepository>, db_pool: Option<PgPool>) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = catalog::startup::run(listener, ProductService::new(repository))
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        client: reqwest::Client::new(),
        db_pool,
    }
}

/// Server backed by the in-memory repository; needs no external services.
pub async fn spawn_app() -> TestApp {
    spawn_with(Arc::new(InMemoryProductRepository::new()), None).await
}

/// Server backed by a throw-away Postgres database. `None` when Postgres is unreachable.
pub async fn spawn_pg_app() -> Option<TestApp> {
    let mut configuration = match get_configuration() {
        Ok(configuration) => configuration,
        Err(err) => {
            eprintln!("Skipping tests: failed to read configuration: {}", err);
            return None;
        }
    };
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let repository = Arc::new(PgProductRepository::new(pool.clone()));
    Some(spawn_with(repository, Some(pool)).await)
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect_with(&config.without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect_with(config.with_db()).await?;

    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    Ok(connection_pool)
}
