//! Clipboard access through an external program.
//!
//! The prompt text is piped into the stdin of a shell command such as
//! `wl-copy`, `xclip -selection clipboard` or `pbcopy`.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;
use zettel_rs::export::Clipboard;

/// A [`Clipboard`] backed by a shell command that reads from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    command: String,
}

impl CommandClipboard {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Pick the usual clipboard program for this platform.
    ///
    /// Returns `None` where no default is known.
    pub fn detect() -> Option<Self> {
        let command = if cfg!(target_os = "macos") {
            "pbcopy"
        } else if cfg!(target_os = "windows") {
            "clip"
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            "wl-copy"
        } else if std::env::var_os("DISPLAY").is_some() {
            "xclip -selection clipboard"
        } else {
            return None;
        };
        Some(Self::new(command))
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Clipboard for CommandClipboard {
    fn copy(&self, text: &str) -> Result<(), String> {
        debug!(command = %self.command, "copying prompt to clipboard");
        // stderr is inherited: wl-copy and xclip leave a process behind that
        // holds any captured pipe open until the selection changes.
        let mut child = shell(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| format!("Failed to start clipboard command '{}': {e}", self.command))?;

        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        let status = child
            .wait()
            .map_err(|e| format!("Clipboard command failed: {e}"))?;
        written.map_err(|e| format!("Failed to write to clipboard command: {e}"))?;
        if status.success() {
            Ok(())
        } else {
            Err(format!(
                "Clipboard command '{}' exited with {status}",
                self.command
            ))
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(target_os = "windows")]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn pipes_text_into_command() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("clip.txt");
        let clipboard = CommandClipboard::new(format!("cat > '{}'", target.display()));
        clipboard.copy("Zettel über Resonanz").unwrap();
        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "Zettel über Resonanz"
        );
    }

    #[test]
    fn failing_command_is_an_error() {
        let clipboard = CommandClipboard::new("cat > /dev/null; exit 3");
        let err = clipboard.copy("x").unwrap_err();
        assert!(err.contains("exit"), "{err}");
        assert!(err.contains('3'), "{err}");
    }

    #[test]
    fn background_helper_does_not_block_copy() {
        // Mimics wl-copy / xclip, which leave a process behind that owns the selection.
        let clipboard = CommandClipboard::new("cat > /dev/null; sleep 4 &");
        let started = Instant::now();
        clipboard.copy("x").unwrap();
        assert!(
            started.elapsed() < Duration::from_secs(2),
            "copy took {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn unread_stdin_is_reaped_and_reported() {
        let clipboard = CommandClipboard::new("exit 0");
        let big = "x".repeat(1 << 20);
        let err = clipboard.copy(&big).unwrap_err();
        assert!(err.contains("Failed to write"), "{err}");
    }

    #[test]
    fn missing_program_is_an_error() {
        let clipboard = CommandClipboard::new("definitely-not-a-clipboard-program-xyz");
        assert!(clipboard.copy("x").is_err());
    }
}
