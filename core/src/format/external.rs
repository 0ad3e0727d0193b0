//! # External Formatter
//!
//! Runs the buffer through the `gofmt` binary.

use crate::error::{AppError, AppResult};
use crate::format::SourceFormatter;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// `gofmt` found on `PATH`, or at an explicit location.
#[derive(Debug, Clone)]
pub struct Gofmt {
    program: PathBuf,
}

impl Default for Gofmt {
    fn default() -> Self {
        Self {
            program: PathBuf::from("gofmt"),
        }
    }
}

impl Gofmt {
    /// Uses the binary at `program`.
    pub fn at(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SourceFormatter for Gofmt {
    fn format(&self, source: &str) -> AppResult<String> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                AppError::Format(format!("Failed to run {:?}: {}", self.program, e))
            })?;

        let Some(mut stdin) = child.stdin.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(AppError::Format("gofmt stdin unavailable".into()));
        };

        // Feed stdin from another thread so a full stdout pipe cannot stall
        // the write; the child is always waited on, even if the write fails.
        let (written, output) = std::thread::scope(|s| {
            let writer = s.spawn(move || stdin.write_all(source.as_bytes()));
            let output = child.wait_with_output();
            (writer.join(), output)
        });
        let output = output?;
        if !output.status.success() {
            return Err(AppError::Format(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(AppError::Format(format!("Failed to feed gofmt: {}", e)));
            }
            Err(_) => return Err(AppError::Format("gofmt input writer panicked".into())),
        }

        String::from_utf8(output.stdout)
            .map_err(|e| AppError::Format(format!("gofmt produced invalid UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_a_format_error() {
        let gofmt = Gofmt::at("/nonexistent/gofmt-binary");
        let err = gofmt.format("package p\n").unwrap_err();
        assert!(matches!(err, AppError::Format(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_program_ignoring_input_is_reaped() {
        let source = format!("package p\n{}", "// padding\n".repeat(100_000));
        let err = Gofmt::at("true").format(&source).unwrap_err();
        assert!(matches!(err, AppError::Format(ref m) if m.starts_with("Failed to feed gofmt")));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_a_format_error() {
        let err = Gofmt::at("false").format("package p\n").unwrap_err();
        assert!(matches!(err, AppError::Format(_)));
    }
}
