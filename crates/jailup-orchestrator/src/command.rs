use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};

use anyhow::{anyhow, Context, Result};

#[derive(Debug, Clone, Copy)]
pub(crate) struct TemplateVars<'a> {
    pub uuid: &'a str,
    pub tag: &'a str,
    pub dataset: &'a Path,
    pub root: &'a Path,
}

pub(crate) fn expand_template(template: &[String], vars: TemplateVars<'_>) -> Result<Command> {
    let Some((program, args)) = template.split_first() else {
        return Err(anyhow!("command template must name a program"));
    };

    let mut command = Command::new(expand_token(program, vars));
    command.args(args.iter().map(|arg| expand_token(arg, vars)));
    Ok(command)
}

fn expand_token(token: &str, vars: TemplateVars<'_>) -> String {
    token
        .replace("{uuid}", vars.uuid)
        .replace("{tag}", vars.tag)
        .replace("{dataset}", &vars.dataset.display().to_string())
        .replace("{root}", &vars.root.display().to_string())
}

pub(crate) fn run_command(command: &mut Command, context_message: &str) -> Result<()> {
    let output = capture_command(command, None, context_message)?;
    ensure_success(&output, context_message)
}

/// Runs `command` with stdout/stderr captured, optionally feeding `input`
/// on stdin. A non-zero exit is returned as `Ok`.
pub(crate) fn capture_command(
    command: &mut Command,
    input: Option<&str>,
    context_message: &str,
) -> Result<Output> {
    tracing::debug!(command = ?command, "running host command");
    command
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command
        .spawn()
        .with_context(|| format!("{context_message}: command failed to start"))?;
    if let Some(input) = input {
        if let Some(mut stdin) = child.stdin.take() {
            // An early exit closes the pipe; the exit status reports why.
            if let Err(err) = stdin.write_all(input.as_bytes()) {
                if err.kind() != io::ErrorKind::BrokenPipe {
                    return Err(err)
                        .with_context(|| format!("{context_message}: failed writing stdin"));
                }
            }
        }
    }
    child
        .wait_with_output()
        .with_context(|| format!("{context_message}: failed waiting for command"))
}

pub(crate) fn ensure_success(output: &Output, context_message: &str) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    Err(anyhow!(
        "{context_message}: status={} stdout='{}' stderr='{}'",
        output.status,
        stdout.trim(),
        stderr.trim()
    ))
}
