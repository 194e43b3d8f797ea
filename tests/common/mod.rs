#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();
static COUNTER: AtomicU32 = AtomicU32::new(0);

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_wayfare-api"));
        cmd.env("WAYFARE_API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server sees DATABASE_URL / JWT_SECRET
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
                if resp.status() == StatusCode::OK {
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

/// Spawn (once) and return the shared test server, or None when no database
/// is configured; suites skip themselves in that case.
pub async fn server() -> Result<Option<&'static TestServer>> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("skipping: DATABASE_URL is not set");
        return Ok(None);
    }
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(15)).await?;
    Ok(Some(server))
}

/// Unique suffix per call so suites never collide on unique columns.
pub fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", std::process::id(), nanos, n)
}

pub struct TestUser {
    pub id: i64,
    pub user_name: String,
    pub token: String,
}

/// Register a fresh user and log in, returning its id and bearer token.
pub async fn register_user(base_url: &str, label: &str) -> Result<TestUser> {
    let client = reqwest::Client::new();
    let user_name = format!("{}-{}", label, unique_suffix());
    let email = format!("{}@test.example", user_name);

    let res = client
        .post(format!("{}/register", base_url))
        .json(&json!({
            "userName": user_name,
            "email": email,
            "password": "trustno1-testing",
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "register failed: {}",
        res.text().await?
    );
    let body: Value = res.json().await?;
    let id = body["data"]["id"].as_i64().context("user id missing")?;

    let res = client
        .post(format!("{}/login", base_url))
        .json(&json!({ "identity": user_name, "password": "trustno1-testing" }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "login failed: {}",
        res.text().await?
    );
    let body: Value = res.json().await?;
    let token = body["data"]["token"]
        .as_str()
        .context("token missing")?
        .to_string();

    Ok(TestUser {
        id,
        user_name,
        token,
    })
}

/// Create a destination as the given user and return its id.
pub async fn create_destination(base_url: &str, token: &str, name: &str) -> Result<i64> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/account/destinations", base_url))
        .bearer_auth(token)
        .json(&json!({ "destinationName": name }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "create destination failed: {}",
        res.text().await?
    );
    let body: Value = res.json().await?;
    body["data"]["id"].as_i64().context("destination id missing")
}
