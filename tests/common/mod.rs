#![allow(dead_code)]

use serde_json::{json, Value};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use stackshare::configuration::{get_configuration, DatabaseSettings, Settings};
use std::net::TcpListener;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ALICE: &str = "alice-token";
pub const BOB: &str = "bob-token";
pub const ADMIN: &str = "admin-token";

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub client: reqwest::Client,
    // keeps the auth double alive for the duration of the test
    pub auth_server: MockServer,
}

pub async fn spawn_app_with_configuration(
    mut configuration: Settings,
    auth_server: MockServer,
) -> Option<TestApp> {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let connection_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let server = stackshare::startup::run(listener, connection_pool.clone(), configuration)
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    Some(TestApp {
        address,
        db_pool: connection_pool,
        client: reqwest::Client::new(),
        auth_server,
    })
}

pub async fn spawn_app() -> Option<TestApp> {
    let mut configuration = get_configuration().expect("Failed to get configuration");

    let auth_server = MockServer::start().await;
    mount_user(&auth_server, ALICE, "alice", "group_user").await;
    mount_user(&auth_server, BOB, "bob", "group_user").await;
    mount_user(&auth_server, ADMIN, "admin", &configuration.admin_role.clone()).await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&auth_server)
        .await;

    configuration.auth_url = format!("{}/me", auth_server.uri());
    spawn_app_with_configuration(configuration, auth_server).await
}

async fn mount_user(server: &MockServer, token: &str, id: &str, role: &str) {
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "_id": id,
                "first_name": id,
                "last_name": "Tester",
                "email": format!("{id}@example.com"),
                "role": role,
                "email_confirmed": true
            }
        })))
        .mount(server)
        .await;
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .map_err(|err| sqlx::Error::Migrate(Box::new(err)))?;

    Ok(connection_pool)
}

impl TestApp {
    fn url(&self, route: &str) -> String {
        format!("{}{}", self.address, route)
    }

    fn authorize(&self, request: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get(&self, route: &str, token: Option<&str>) -> reqwest::Response {
        self.authorize(self.client.get(self.url(route)), token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post(&self, route: &str, token: Option<&str>, body: &Value) -> reqwest::Response {
        self.authorize(self.client.post(self.url(route)), token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put(&self, route: &str, token: Option<&str>, body: &Value) -> reqwest::Response {
        self.authorize(self.client.put(self.url(route)), token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete(&self, route: &str, token: Option<&str>) -> reqwest::Response {
        self.authorize(self.client.delete(self.url(route)), token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Id of a seeded or previously created technology, by exact name.
    pub async fn technology_id(&self, name: &str) -> uuid::Uuid {
        sqlx::query_scalar::<_, uuid::Uuid>("SELECT id FROM technology WHERE name = $1")
            .bind(name)
            .fetch_one(&self.db_pool)
            .await
            .expect("technology exists")
    }

    pub async fn create_stack(&self, token: &str, body: &Value) -> Value {
        let response = self.post("/api/stacks", Some(token), body).await;
        assert_eq!(response.status().as_u16(), 201);
        let body: Value = response.json().await.unwrap();
        body["item"].clone()
    }
}
