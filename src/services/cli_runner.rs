use anyhow::{anyhow, Context, Result};
use regex::Regex;
use serde_json::Value as JsonValue;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::{collections::HashMap, env};

pub(crate) fn expand_cmdline_env(cmdline: &str, env_map: &HashMap<String, String>) -> String {
    // Expand ${VAR}; unset variables expand to nothing
    let re = Regex::new(r"\$\{([A-Z0-9_]+)\}").unwrap();
    re.replace_all(cmdline, |caps: &regex::Captures| {
        let v = env_map.get(&caps[1]).cloned().unwrap_or_default();
        // Quote if contains whitespace to keep it a single arg in shlex::split
        if v.chars().any(|c| c.is_whitespace()) {
            format!("\"{}\"", v.replace('"', "\\\""))
        } else {
            v
        }
    })
    .to_string()
}

/// Reads the optional `{"ok": bool, "error": str}` envelope a create command prints.
pub(crate) fn parse_create_output(stdout: &str) -> Result<Option<JsonValue>> {
    let text = stdout.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let v: JsonValue = serde_json::from_str(text).with_context(|| "parsing command JSON")?;
    if v.get("ok").and_then(|b| b.as_bool()) == Some(false) {
        let msg = v
            .get("error")
            .and_then(|s| s.as_str())
            .unwrap_or("create rejected");
        return Err(anyhow!("{msg}"));
    }
    Ok(Some(v))
}

pub fn run_cmdline_with_input(cmdline: &str, input: &JsonValue) -> Result<Option<JsonValue>> {
    let env_map: HashMap<String, String> = env::vars().collect();
    let expanded = expand_cmdline_env(cmdline, &env_map);
    let parts = shlex::split(&expanded).ok_or_else(|| anyhow!("Failed to parse command line"))?;
    let (program, args) = parts
        .split_first()
        .ok_or_else(|| anyhow!("Empty command line"))?;
    let mut child = Command::new(program)
        .args(args)
        .env("CLIENT_FORM_JSON", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawning {expanded}"))?;
    if let Some(mut stdin) = child.stdin.take() {
        let body = serde_json::to_vec(input).with_context(|| "encoding command input")?;
        match stdin.write_all(&body) {
            Ok(()) => {}
            // Command exited without reading stdin; its exit status decides
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
            Err(e) => return Err(e).with_context(|| "writing command input"),
        }
    }
    let output = child
        .wait_with_output()
        .with_context(|| format!("waiting for {expanded}"))?;
    if !output.status.success() {
        let err = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(anyhow!("Command failed: {}\n{}", cmdline, err));
    }
    parse_create_output(&String::from_utf8_lossy(&output.stdout))
}
