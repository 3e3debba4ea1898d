use std::io::Write;
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::io::backend::{Backend, BackendError};
use crate::model::Item;

/// Backend driven through a Taskwarrior-compatible command line:
/// `<program> <filter...> export` and `<program> import -`.
pub struct TaskwarriorBackend {
    program: String,
}

impl TaskwarriorBackend {
    pub fn new(program: impl Into<String>) -> Self {
        TaskwarriorBackend {
            program: program.into(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        // Never let the backend stop and ask questions on our terminal
        cmd.arg("rc.confirmation=off").arg("rc.verbose=nothing");
        cmd
    }

    fn check(
        &self,
        what: &str,
        output: &std::process::Output,
    ) -> Result<(), BackendError> {
        if output.status.success() {
            return Ok(());
        }
        Err(BackendError::Exit {
            command: format!("{} {}", self.program, what),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

impl Backend for TaskwarriorBackend {
    fn export(&mut self, filter: &[String]) -> Result<Vec<Item>, BackendError> {
        debug!("export {:?}", filter);
        let output = self
            .command()
            .args(filter)
            .arg("export")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| BackendError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;
        self.check("export", &output)?;
        let items: Vec<Item> = serde_json::from_slice(&output.stdout)?;
        Ok(items)
    }

    fn import(&mut self, item: &Item) -> Result<(), BackendError> {
        let body = serde_json::to_vec(item)?;
        let mut child = self
            .command()
            .arg("import")
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BackendError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&body)?;
        }
        let output = child.wait_with_output()?;
        self.check("import", &output)?;
        info!(
            "imported {}",
            item.uuid.as_deref().unwrap_or("new item")
        );
        Ok(())
    }
}
