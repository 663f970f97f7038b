//! Blocking invocation of an external helper program.
//!
//! Both the external analyzer and the external stage mapper are plain
//! programs configured as `[program, args...]`. They run to completion
//! before the check-in continues; there are no timeouts.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExternalError {
    #[error("External command is empty")]
    EmptyCommand,

    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// A configured external program.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    /// Build from a `[program, args...]` list as found in the config file.
    pub fn from_argv(argv: &[String]) -> Result<Self, ExternalError> {
        let (program, args) = argv.split_first().ok_or(ExternalError::EmptyCommand)?;
        if program.trim().is_empty() {
            return Err(ExternalError::EmptyCommand);
        }
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run with `extra_args` appended and optional bytes on stdin.
    /// Returns stdout when the program exits successfully.
    pub fn run(&self, extra_args: &[String], stdin: Option<&[u8]>) -> Result<Vec<u8>, ExternalError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .args(extra_args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("Running external command: {} {:?}", self.program, extra_args);

        let spawn_err = |source| ExternalError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = cmd.spawn().map_err(spawn_err)?;

        if let Some(bytes) = stdin {
            if let Some(mut pipe) = child.stdin.take() {
                // A child may answer without reading its input and exit
                // first. Only exit status and stdout decide the outcome.
                match pipe.write_all(bytes) {
                    Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                        debug!("'{}' closed stdin before reading it", self.program);
                    }
                    other => other.map_err(spawn_err)?,
                }
                // Dropping the pipe closes stdin so the child sees EOF.
            }
        }

        let output = child.wait_with_output().map_err(spawn_err)?;

        if !output.status.success() {
            return Err(ExternalError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_command_rejected() {
        assert!(matches!(
            ExternalCommand::from_argv(&[]),
            Err(ExternalError::EmptyCommand)
        ));
        assert!(matches!(
            ExternalCommand::from_argv(&argv(&["  "])),
            Err(ExternalError::EmptyCommand)
        ));
    }

    #[test]
    fn test_run_passes_args_and_stdin() {
        let cmd = ExternalCommand::from_argv(&argv(&["sh", "-c", "cat; echo \" $1\"", "sh"])).unwrap();
        let out = cmd.run(&argv(&["extra"]), Some(b"piped")).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "piped extra\n");
    }

    #[test]
    fn test_closed_stdin_still_judged_by_exit_status() {
        // Larger than a pipe buffer, so the write outlives the child.
        let input = vec![b'x'; 1 << 20];

        let ok = ExternalCommand::from_argv(&argv(&["sh", "-c", "echo done"])).unwrap();
        let out = ok.run(&[], Some(&input)).unwrap();
        assert_eq!(out, b"done\n");

        let failing = ExternalCommand::from_argv(&argv(&["sh", "-c", "exit 2"])).unwrap();
        assert!(matches!(
            failing.run(&[], Some(&input)),
            Err(ExternalError::Failed { .. })
        ));
    }

    #[test]
    fn test_nonzero_exit_is_error() {
        let cmd = ExternalCommand::from_argv(&argv(&["sh", "-c", "echo boom >&2; exit 3"])).unwrap();
        match cmd.run(&[], None) {
            Err(ExternalError::Failed { stderr, .. }) => assert_eq!(stderr, "boom"),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let cmd = ExternalCommand::from_argv(&argv(&["coachlite-no-such-helper"])).unwrap();
        assert!(matches!(cmd.run(&[], None), Err(ExternalError::Spawn { .. })));
    }
}
