//! Binary-level tests for the transit server.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{json, Value};

#[test]
fn test_missing_rapidapi_key_fails_before_serving() {
    cargo_bin_cmd!("geo-mcp-transit")
        .env_remove("RAPIDAPI_KEY")
        .write_stdin("")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("RAPIDAPI_KEY environment variable is required"));
}

#[test]
fn test_parse_error_then_tools_list() {
    let input = format!(
        "{{not json\n{}\n",
        json!({"jsonrpc": "2.0", "id": 7, "method": "tools/list"})
    );

    let output = cargo_bin_cmd!("geo-mcp-transit")
        .env("RAPIDAPI_KEY", "test-key")
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let responses: Vec<Value> = String::from_utf8_lossy(&output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], 7);
    assert_eq!(responses[1]["result"]["tools"][0]["name"], "search_transit_route");
    assert!(responses[1]["result"]["tools"][0]["inputSchema"]["required"]
        .as_array()
        .unwrap()
        .contains(&json!("goal")));
}

#[cfg(unix)]
#[test]
fn test_sigint_exits_while_stdin_is_open() {
    use std::io::{BufRead, BufReader, Write};
    use std::process::{Command, Stdio};
    use std::time::{Duration, Instant};

    let mut child = Command::new(env!("CARGO_BIN_EXE_geo-mcp-transit"))
        .env("RAPIDAPI_KEY", "test-key")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("server starts");

    // Held until the end of the test so the server never sees EOF
    let mut stdin = child.stdin.take().unwrap();
    writeln!(stdin, "{}", json!({"jsonrpc": "2.0", "id": 1, "method": "ping"})).unwrap();
    stdin.flush().unwrap();

    // A response means the loop is running and the signal handler is installed
    let mut line = String::new();
    BufReader::new(child.stdout.take().unwrap())
        .read_line(&mut line)
        .unwrap();
    let pong: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(pong["id"], 1);

    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .expect("kill runs");
    assert!(status.success());

    let deadline = Instant::now() + Duration::from_secs(5);
    let exit = loop {
        if let Some(exit) = child.try_wait().unwrap() {
            break exit;
        }
        if Instant::now() > deadline {
            child.kill().ok();
            panic!("server still running after SIGINT");
        }
        std::thread::sleep(Duration::from_millis(50));
    };
    assert_eq!(exit.code(), Some(0));
    drop(stdin);
}
