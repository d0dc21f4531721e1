// End-to-end checks against the compiled pennylane-mcp binary

use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

fn spawn_server(api_key: Option<&str>) -> Child {
    let mut command = Command::new(env!("CARGO_BIN_EXE_pennylane-mcp"));
    command
        .env_remove("PENNYLANE_API_KEY")
        .env("PENNYLANE_BASE_URL", "http://127.0.0.1:9/api/external/v2")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());
    if let Some(key) = api_key {
        command.env("PENNYLANE_API_KEY", key);
    }
    command.spawn().unwrap()
}

fn wait_with_deadline(child: &mut Child, deadline: Duration) -> Option<std::process::ExitStatus> {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if let Some(status) = child.try_wait().unwrap() {
            return Some(status);
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    None
}

#[test]
fn test_missing_api_key_fails_at_startup() {
    let mut child = spawn_server(None);
    let status = wait_with_deadline(&mut child, Duration::from_secs(10));
    assert_eq!(status.map(|s| s.success()), Some(false));
}

#[cfg(unix)]
#[test]
fn test_interrupt_exits_while_stdin_stays_open() {
    let mut child = spawn_server(Some("test-key"));
    let mut stdin = child.stdin.take().unwrap();
    let mut stdout = BufReader::new(child.stdout.take().unwrap());

    // A reply proves the session loop, and with it the signal listener, is running
    let request = json!({"jsonrpc": "2.0", "id": 1, "method": "ping"});
    writeln!(stdin, "{}", request).unwrap();
    stdin.flush().unwrap();
    let mut line = String::new();
    stdout.read_line(&mut line).unwrap();
    let response: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(response["result"], json!({}));
    std::thread::sleep(Duration::from_millis(200));

    let killed = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(killed.success());

    let status = wait_with_deadline(&mut child, Duration::from_secs(10));
    if status.is_none() {
        child.kill().ok();
    }
    assert_eq!(status.map(|s| s.success()), Some(true));
    drop(stdin);
}
