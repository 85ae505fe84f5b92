//! Filters that pipe source text through an external compressor binary.

use crate::core::interfaces::Filter;
use crate::utils::{CompressError, Result};
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Program and arguments for one external filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Google Closure Compiler reading stdin, writing stdout.
    pub fn closure() -> Self {
        Self::new(
            "java",
            &[
                "-jar",
                "compiler.jar",
                "--compilation_level",
                "SIMPLE_OPTIMIZATIONS",
                "--warning_level",
                "QUIET",
            ],
        )
    }

    /// YUI Compressor in CSS mode.
    pub fn yui() -> Self {
        Self::new("java", &["-jar", "yuicompressor.jar", "--type", "css"])
    }
}

pub struct CommandFilter {
    name: String,
    spec: CommandSpec,
}

impl CommandFilter {
    pub fn new(name: &str, spec: CommandSpec) -> Self {
        Self {
            name: name.to_string(),
            spec,
        }
    }

    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }
}

#[async_trait::async_trait]
impl Filter for CommandFilter {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, source), fields(filter = %self.name, program = %self.spec.program))]
    async fn apply(&self, source: &str) -> Result<String> {
        let mut cmd = Command::new(&self.spec.program);
        cmd.args(&self.spec.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // a timed-out chain drops this future; take the process with it
            .kill_on_drop(true);

        debug!("spawning external filter");

        let mut child = cmd
            .spawn()
            .map_err(|e| CompressError::filter(&self.name, format!("failed to spawn {}: {}", self.spec.program, e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| CompressError::filter(&self.name, "failed to capture stdin"))?;
        let input = source.to_string();
        let writer = tokio::spawn(async move {
            let result = stdin.write_all(input.as_bytes()).await;
            // Drop stdin to signal EOF.
            drop(stdin);
            result
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| CompressError::filter(&self.name, format!("failed to wait on {}: {}", self.spec.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CompressError::filter(
                &self.name,
                format!("{} exited with {}: {}", self.spec.program, output.status, stderr.trim()),
            ));
        }

        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(CompressError::filter(&self.name, format!("failed to write stdin: {}", e)))
            }
            Err(e) => {
                return Err(CompressError::filter(&self.name, format!("stdin task failed: {}", e)))
            }
        }

        String::from_utf8(output.stdout)
            .map_err(|_| CompressError::filter(&self.name, "output is not valid UTF-8"))
    }
}
