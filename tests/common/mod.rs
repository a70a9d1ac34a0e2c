use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();

/// Spawns the server binary once for the whole test run. Requires a
/// reachable Postgres via DATABASE_URL (and JWT_SECRET); tests that go
/// through here are `#[ignore]`d so the default `cargo test` run stays
/// green without infrastructure.
pub struct TestServer {
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
        let mut cmd = Command::new("target/debug/order-system-api");
        cmd.env("PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server sees DATABASE_URL and JWT_SECRET
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { base_url, child })
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

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Register a fresh account and log it in, returning (user id, token).
#[allow(dead_code)]
pub async fn register_and_log_in(
    base_url: &str,
    username: &str,
) -> Result<(String, String)> {
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/users/register-user", base_url))
        .json(&serde_json::json!({
            "firstName": "Test",
            "lastName": "Account",
            "username": username,
            "password": "Password1"
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "registration failed: {}",
        res.status()
    );

    let res = client
        .post(format!("{}/api/users/log-in", base_url))
        .json(&serde_json::json!({
            "username": username,
            "password": "Password1"
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

    let body = res.json::<serde_json::Value>().await?;
    let id = body["id"].as_str().context("missing id")?.to_string();
    let token = body["token"].as_str().context("missing token")?.to_string();
    Ok((id, token))
}
