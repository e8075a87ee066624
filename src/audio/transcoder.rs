//! External transcoder invocation with testable command execution.
//!
//! The `CommandExecutor` trait is the seam between the driver and the
//! operating system; tests substitute a recording mock.

use crate::defaults;
use crate::error::{LibrittsError, Result};
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Command, Stdio};

/// Trait for executing system commands.
///
/// Object-safe, Send + Sync for use from worker threads.
pub trait CommandExecutor: Send + Sync {
    /// Execute a command with arguments.
    ///
    /// Returns the stdout of the command on success, an error if the command
    /// is missing or exits non-zero.
    fn execute(&self, command: &str, args: &[&OsStr]) -> Result<String>;
}

/// Production command executor using std::process::Command.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandExecutor;

impl SystemCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for SystemCommandExecutor {
    fn execute(&self, command: &str, args: &[&OsStr]) -> Result<String> {
        let output = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    LibrittsError::TranscoderNotFound {
                        tool: command.to_string(),
                    }
                } else {
                    LibrittsError::TranscodeFailed {
                        message: format!("Failed to execute {}: {}", command, e),
                    }
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LibrittsError::TranscodeFailed {
                message: format!("{} exited with {}: {}", command, output.status, stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Converts one audio file into another format.
pub trait Transcoder: Send + Sync {
    /// Transcode `input` into `output`, overwriting an existing file.
    fn transcode(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Program, codec and quality handed to the transcoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscoderSettings {
    pub program: String,
    pub codec: String,
    pub quality: u8,
}

impl Default for TranscoderSettings {
    fn default() -> Self {
        Self {
            program: defaults::TRANSCODER.to_string(),
            codec: defaults::CODEC.to_string(),
            quality: defaults::QUALITY,
        }
    }
}

/// ffmpeg-compatible transcoder driven through a `CommandExecutor`.
pub struct FfmpegTranscoder<E: CommandExecutor> {
    executor: E,
    settings: TranscoderSettings,
}

impl<E: CommandExecutor> FfmpegTranscoder<E> {
    pub fn new(executor: E, settings: TranscoderSettings) -> Self {
        Self { executor, settings }
    }

    /// Arguments for one conversion: errors-only logging, overwrite output.
    pub fn arguments(&self, input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-i".into(),
            input.as_os_str().to_os_string(),
            "-loglevel".into(),
            "error".into(),
            "-codec:a".into(),
            self.settings.codec.clone().into(),
            "-q:a".into(),
            self.settings.quality.to_string().into(),
            "-y".into(),
            output.as_os_str().to_os_string(),
        ]
    }
}

impl FfmpegTranscoder<SystemCommandExecutor> {
    /// Create a transcoder that runs the real program.
    pub fn system(settings: TranscoderSettings) -> Self {
        Self::new(SystemCommandExecutor::new(), settings)
    }
}

impl<E: CommandExecutor> Transcoder for FfmpegTranscoder<E> {
    fn transcode(&self, input: &Path, output: &Path) -> Result<()> {
        let args = self.arguments(input, output);
        let args: Vec<&OsStr> = args.iter().map(OsString::as_os_str).collect();
        self.executor.execute(&self.settings.program, &args)?;
        Ok(())
    }
}
