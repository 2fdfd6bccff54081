//! Subprocess decoder - stages the image to a temporary file and runs an external
//! command-line barcode reader against it.

use crate::parse::parse_output;
use crate::traits::{BarcodeDecoder, DecodeFailure, DecodeResult};
use async_trait::async_trait;
use codescan_core::{Barcode, Config};
use image::{DynamicImage, ImageFormat};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tokio::process::Command;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
const TEMP_FILE_PREFIX: &str = "codescan-";

pub struct CommandDecoder {
    command: String,
    args: Vec<String>,
    timeout: Duration,
    temp_dir: Option<PathBuf>,
}

impl CommandDecoder {
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
            temp_dir: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.decoder_command(),
            config.decoder_command_args().to_vec(),
            config.decoder_timeout(),
        )
    }

    /// Stage images in `dir` instead of the system temp directory
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check that the decoder command can be started by running `<command> [args] --help`.
    pub async fn probe(&self) -> DecodeResult<()> {
        let child = Command::new(&self.command)
            .args(&self.args)
            .arg("--help")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| self.spawn_failure(source))?;

        let output = self.wait(child, PROBE_TIMEOUT).await?;
        if !output.status.success() {
            return Err(DecodeFailure::ExitStatus {
                status: output.status.to_string(),
                stderr: String::new(),
            });
        }
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(
        process.executable.name = %self.command,
        timeout_ms = self.timeout.as_millis() as u64
    ))]
    async fn invoke(&self, image_path: &Path) -> DecodeResult<Vec<Barcode>> {
        let start = Instant::now();

        let child = Command::new(&self.command)
            .args(&self.args)
            .arg(image_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| self.spawn_failure(source))?;

        let output = self.wait(child, self.timeout).await?;

        if !output.status.success() {
            return Err(DecodeFailure::ExitStatus {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let barcodes = parse_output(&stdout);

        tracing::debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            count = barcodes.len(),
            "Decoder command finished"
        );

        Ok(barcodes)
    }

    /// Collect the child's output, killing it if `limit` elapses first.
    async fn wait(&self, child: tokio::process::Child, limit: Duration) -> DecodeResult<Output> {
        match tokio::time::timeout(limit, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| self.spawn_failure(source)),
            // Dropping the future drops the child, and kill_on_drop reaps it.
            Err(_) => Err(DecodeFailure::Timeout(limit)),
        }
    }

    fn spawn_failure(&self, source: std::io::Error) -> DecodeFailure {
        DecodeFailure::Spawn {
            command: self.command.clone(),
            source,
        }
    }
}

#[async_trait]
impl BarcodeDecoder for CommandDecoder {
    fn name(&self) -> &'static str {
        "command"
    }

    async fn decode(&self, image: &DynamicImage) -> DecodeResult<Vec<Barcode>> {
        let image = image.clone();
        let temp_dir = self.temp_dir.clone();
        let staged = tokio::task::spawn_blocking(move || stage(&image, temp_dir.as_deref()))
            .await
            .map_err(|e| DecodeFailure::Join(e.to_string()))??;
        let result = self.invoke(staged.path()).await;

        // Remove the staged file whatever the command did.
        let path = staged.path().to_path_buf();
        if let Err(e) = staged.close() {
            tracing::warn!(error = %e, path = %path.display(), "Failed to remove staged image");
        }

        result
    }
}

/// Write the image as PNG to a uniquely named temporary file in `dir`, or the
/// system temp directory.
///
/// The returned handle deletes the file when closed or dropped.
fn stage(image: &DynamicImage, dir: Option<&Path>) -> DecodeResult<NamedTempFile> {
    let mut encoded = Cursor::new(Vec::new());
    image.write_to(&mut encoded, ImageFormat::Png)?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(TEMP_FILE_PREFIX).suffix(".png");
    let mut staged = match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(DecodeFailure::TempFile)?;

    staged
        .write_all(encoded.get_ref())
        .map_err(DecodeFailure::TempFile)?;
    staged.flush().map_err(DecodeFailure::TempFile)?;

    Ok(staged)
}
