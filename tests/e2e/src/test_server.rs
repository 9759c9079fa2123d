use anyhow::Result;
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use uuid::Uuid;

pub struct TestServer {
    url: String,
    process: Option<Child>,
    uploads_dir: PathBuf,
    outputs_dir: PathBuf,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let port = get_random_port()?;
        let test_id = Uuid::new_v4();
        let uploads_dir = PathBuf::from(format!(".e2e-uploads-{test_id}"));
        let outputs_dir = PathBuf::from(format!(".e2e-outputs-{test_id}"));

        // Start server process with environment variables. The synthesis
        // endpoint points at an unroutable port; these tests never exercise
        // a live upstream.
        let process = Command::new("cargo")
            .args(["run", "--package", "web", "--features", "server"])
            .env("APP_MODE", "local")
            .env("PORT", port.to_string())
            .env("IP", "127.0.0.1")
            .env("APP_BASE_URL", format!("http://localhost:{port}"))
            .env("UPLOADS_DIR", &uploads_dir)
            .env("OUTPUTS_DIR", &outputs_dir)
            .env("SYNTHESIS_URL", "http://127.0.0.1:1/process")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to start server");

        let url = format!("http://localhost:{port}");

        // Wait for server to be ready
        wait_for_server(&url).await?;

        Ok(Self {
            url,
            process: Some(process),
            uploads_dir,
            outputs_dir,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn uploads_on_disk(&self) -> usize {
        std::fs::read_dir(&self.uploads_dir)
            .map(|rd| rd.count())
            .unwrap_or(0)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(mut process) = self.process.take() {
            let _ = process.kill();
        }
        let _ = std::fs::remove_dir_all(&self.uploads_dir);
        let _ = std::fs::remove_dir_all(&self.outputs_dir);
    }
}

fn get_random_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    Ok(port)
}

async fn wait_for_server(url: &str) -> Result<()> {
    // Wait up to 60 seconds for server to start (compilation + startup)
    for i in 0..600 {
        if let Ok(response) = reqwest::get(url).await {
            if response.status().is_success() {
                return Ok(());
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Log progress every 5 seconds
        if i > 0 && i % 50 == 0 {
            eprintln!("Still waiting for server... ({}s)", i / 10);
        }
    }
    anyhow::bail!("Server did not start in time (waited 60s)")
}
