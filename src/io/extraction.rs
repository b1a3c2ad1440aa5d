// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Text extraction through an external command.
//!
//! The command receives `{"photoDataUri": "<data uri>"}` on stdin and must
//! print `{"extractedText": "<text>"}` on stdout. Requests run on a
//! background thread and report back through a channel.

use crate::config::ExtractionConfig;
use crate::error::ExtractionError;
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Reads the text out of an image.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, image_data_uri: &str) -> Result<String, ExtractionError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractionRequest<'a> {
    photo_data_uri: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractionResponse {
    extracted_text: String,
}

pub fn parse_response(stdout: &[u8]) -> Result<String, ExtractionError> {
    let response: ExtractionResponse = serde_json::from_slice(stdout)?;
    Ok(response.extracted_text)
}

/// Runs a configured program for every request.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// The program is killed when it has not exited by then
    pub timeout: Duration,
}

/// Drain a pipe on its own thread so a chatty program cannot block on it.
fn read_pipe<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn join_pipe(handle: Option<JoinHandle<io::Result<Vec<u8>>>>) -> io::Result<Vec<u8>> {
    match handle {
        Some(handle) => handle
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("pipe reader panicked"))),
        None => Ok(Vec::new()),
    }
}

impl TextExtractor for CommandExtractor {
    fn extract(&self, image_data_uri: &str) -> Result<String, ExtractionError> {
        let request = serde_json::to_vec(&ExtractionRequest {
            photo_data_uri: image_data_uri,
        })?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Large images do not fit the pipe buffer, so the request is written
        // while the program runs
        let writer = child
            .stdin
            .take()
            .map(move |mut stdin| thread::spawn(move || stdin.write_all(&request)));
        let stdout = child.stdout.take().map(read_pipe);
        let stderr = child.stderr.take().map(read_pipe);

        let Some(status) = child.wait_timeout(self.timeout)? else {
            log::error!("{} did not finish in {:?}, killing it", self.program.display(), self.timeout);
            let _ = child.kill();
            let _ = child.wait();
            return Err(ExtractionError::TimedOut(self.timeout));
        };

        let stdout = join_pipe(stdout)?;
        let stderr = join_pipe(stderr)?;
        if !status.success() {
            return Err(ExtractionError::CommandFailed {
                status: status.to_string(),
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            });
        }

        // A program may answer without reading all of its input
        if let Some(writer) = writer {
            match writer.join() {
                Ok(Err(e)) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e.into()),
                _ => {}
            }
        }
        parse_response(&stdout)
    }
}

/// Used when no command is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl TextExtractor for Unconfigured {
    fn extract(&self, _image_data_uri: &str) -> Result<String, ExtractionError> {
        Err(ExtractionError::NotConfigured)
    }
}

pub fn from_config(config: &ExtractionConfig) -> Arc<dyn TextExtractor> {
    match &config.program {
        Some(program) => {
            log::info!("Text extraction via {}", program.display());
            Arc::new(CommandExtractor {
                program: program.clone(),
                args: config.args.clone(),
                timeout: config.timeout(),
            })
        }
        None => {
            log::warn!("No extraction command configured; text extraction is unavailable");
            Arc::new(Unconfigured)
        }
    }
}

/// Run one extraction on a background thread.
pub fn spawn(extractor: Arc<dyn TextExtractor>, image_data_uri: String) -> Receiver<Result<String, ExtractionError>> {
    let (sender, receiver) = channel();
    std::thread::spawn(move || {
        let result = extractor.extract(&image_data_uri);
        // The receiver is gone when the request was abandoned
        let _ = sender.send(result);
    });
    receiver
}
