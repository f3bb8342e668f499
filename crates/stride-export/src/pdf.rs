use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::ExportError;

/// Turns a rendered HTML document into PDF bytes.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Vec<u8>, ExportError>;
}

/// Renders through a headless Chromium (or Chrome) binary.
///
/// The HTML is written to a scratch directory and printed with
/// `--print-to-pdf`. Page size and margins come from the document's CSS
/// `@page` rule. The child is killed if it outlives the timeout.
#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    binary: PathBuf,
    timeout: Duration,
}

impl ChromiumRenderer {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn command(&self, html_path: &Path, pdf_path: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(format!("file://{}", html_path.display()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl PdfRenderer for ChromiumRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, ExportError> {
        let workdir = tempfile::tempdir()
            .map_err(|e| ExportError::Pdf(format!("failed to create scratch directory: {e}")))?;
        let html_path = workdir.path().join("report.html");
        let pdf_path = workdir.path().join("report.pdf");

        tokio::fs::write(&html_path, html)
            .await
            .map_err(|e| ExportError::Pdf(format!("failed to write HTML: {e}")))?;

        let output = tokio::time::timeout(self.timeout, self.command(&html_path, &pdf_path).output())
            .await
            .map_err(|_| {
                ExportError::Pdf(format!(
                    "renderer timed out after {}s",
                    self.timeout.as_secs_f64()
                ))
            })?
            .map_err(|e| {
                ExportError::Pdf(format!(
                    "failed to launch {}: {e}",
                    self.binary.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExportError::Pdf(format!(
                "renderer exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let bytes = tokio::fs::read(&pdf_path)
            .await
            .map_err(|e| ExportError::Pdf(format!("renderer produced no PDF: {e}")))?;

        if !bytes.starts_with(b"%PDF") {
            return Err(ExportError::Pdf("renderer output is not a PDF".to_string()));
        }

        tracing::debug!(
            binary = %self.binary.display(),
            html_len = html.len(),
            pdf_len = bytes.len(),
            "PDF rendered"
        );

        Ok(bytes)
    }
}
