use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use estate_api::auth::password::hash_password;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/estate-api");
        cmd.env("ESTATE_API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server sees DATABASE_URL from .env
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Ready on either healthy or degraded; degraded still serves
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let _ = dotenvy::dotenv();
    let server =
        SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Database-backed tests bail out early when no DATABASE_URL is configured.
pub fn database_configured() -> bool {
    let _ = dotenvy::dotenv();
    std::env::var("DATABASE_URL").is_ok()
}

pub async fn test_pool() -> Result<PgPool> {
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await?;
    Ok(pool)
}

/// Insert a user directly and return (id, email). Emails are made unique per
/// call so test runs never collide.
#[allow(dead_code)]
pub async fn seed_user(pool: &PgPool, role: &str, password: &str) -> Result<(Uuid, String)> {
    let id = Uuid::new_v4();
    let email = format!("user-{}@example.test", id.simple());
    let password_hash =
        hash_password(password).map_err(|e| anyhow::anyhow!("failed to hash password: {}", e))?;
    let now = chrono::Utc::now();

    sqlx::query(
        "INSERT INTO users (id, email, password_hash, name, role, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(id)
    .bind(&email)
    .bind(&password_hash)
    .bind("Test User")
    .bind(role)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok((id, email))
}

/// Login through the API and return the bearer token.
#[allow(dead_code)]
pub async fn login(base_url: &str, email: &str, password: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/auth/login", base_url))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "login failed with {}",
        res.status()
    );
    let body = res.json::<serde_json::Value>().await?;
    let token = body["token"]
        .as_str()
        .context("login response missing token")?
        .to_string();
    Ok(token)
}

/// Minimal valid property payload for create tests.
#[allow(dead_code)]
pub fn property_payload(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "description": "Two-bedroom apartment near the river",
        "street": "12 Quay Street",
        "city": "Portsmouth",
        "state": "Hampshire",
        "zip_code": "PO1 3AX",
        "country": "United Kingdom",
        "price": 245000.0,
        "status": "for_sale",
        "property_type": "residential",
        "bedrooms": 2,
        "bathrooms": 1,
        "square_footage": 860
    })
}
