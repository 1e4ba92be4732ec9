//! E2E tests for `assetpipe watch`
//!
//! These run the real binary and are timing-sensitive; every wait has a
//! generous deadline.

mod common;

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::Child;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use common::*;

const DEADLINE: Duration = Duration::from_secs(20);

/// Stream NDJSON events from a child's stdout
fn event_stream(child: &mut Child) -> Receiver<serde_json::Value> {
    let stdout = child.stdout.take().expect("stdout not piped");
    let (tx, rx) = channel();
    thread::spawn(move || {
        for line in BufReader::new(stdout).lines().map_while(Result::ok) {
            if let Ok(event) = serde_json::from_str(&line) {
                if tx.send(event).is_err() {
                    break;
                }
            }
        }
    });
    rx
}

/// Wait for an event matching `pred`, collecting everything seen
fn wait_for(
    rx: &Receiver<serde_json::Value>,
    seen: &mut Vec<serde_json::Value>,
    pred: impl Fn(&serde_json::Value) -> bool,
) -> Option<serde_json::Value> {
    let deadline = Instant::now() + DEADLINE;
    while let Some(left) = deadline.checked_duration_since(Instant::now()) {
        match rx.recv_timeout(left) {
            Ok(event) => {
                seen.push(event.clone());
                if pred(&event) {
                    return Some(event);
                }
            }
            Err(_) => return None,
        }
    }
    None
}

fn is_event(event: &serde_json::Value, name: &str) -> bool {
    event["event"] == name
}

fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn http_get(port: u16, path: &str) -> String {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(10))).unwrap();
    write!(
        stream,
        "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        path
    )
    .unwrap();
    let mut response = String::new();
    let _ = stream.read_to_string(&mut response);
    response
}

#[test]
fn watch_runs_initial_build_then_starts_watching() {
    let env = TestEnv::site();
    let mut child = env.spawn(&["watch", "--json"], &[]);
    let rx = event_stream(&mut child);
    let mut seen = Vec::new();

    let started = wait_for(&rx, &mut seen, |e| is_event(e, "watch_started"));
    let _ = child.kill();
    let _ = child.wait();

    assert!(started.is_some(), "no watch_started: {seen:?}");

    // Six tasks ran before watching; clean is not part of watch
    let completed = seen.iter().filter(|e| is_event(e, "task_complete")).count();
    assert_eq!(completed, 6, "{seen:?}");
    assert!(!seen.iter().any(|e| e["task"] == "clean"));
    assert!(!seen.iter().any(|e| is_event(e, "server_started")));

    assert_built!(env, "css/main.min.css");
    assert_built!(env, "js/libs.min.js");
}

#[test]
fn watch_rebuilds_only_the_owning_task() {
    let env = TestEnv::site();
    let mut child = env.spawn(&["watch", "--json", "--dev"], &[]);
    let rx = event_stream(&mut child);
    let mut seen = Vec::new();

    assert!(
        wait_for(&rx, &mut seen, |e| is_event(e, "watch_started")).is_some(),
        "{seen:?}"
    );
    let before = seen.len();

    // Keep editing a partial until the watcher reports it
    let mut changed = None;
    for round in 0..20 {
        env.write_file(
            "src/css/_base.scss",
            format!("body {{ margin: {}px; }}\n", round + 1),
        );
        if let Ok(event) = rx.recv_timeout(Duration::from_millis(500)) {
            seen.push(event.clone());
            if is_event(&event, "file_changed") {
                changed = Some(event);
                break;
            }
        }
    }
    let rebuilt = wait_for(&rx, &mut seen, |e| {
        is_event(e, "task_complete") && e["task"] == "styles"
    });

    let _ = child.kill();
    let _ = child.wait();

    let changed = changed.expect("no file_changed event");
    assert_eq!(changed["task"], "styles");
    assert!(rebuilt.is_some(), "styles never re-ran: {seen:?}");
    assert!(
        !seen[before..]
            .iter()
            .any(|e| is_event(e, "task_started") && e["task"] != "styles"),
        "unrelated task re-ran: {seen:?}"
    );

    let css = env.read_built("css/main.min.css");
    assert!(css.contains("margin:"), "{css}");
}

#[test]
fn watch_sync_serves_build_with_live_reload() {
    let env = TestEnv::site();
    let port = free_port();
    let port_str = port.to_string();
    let mut child = env.spawn(&["watch", "--json", "--sync"], &[("ASSETPIPE_PORT", &port_str)]);
    let rx = event_stream(&mut child);
    let mut seen = Vec::new();

    let server = wait_for(&rx, &mut seen, |e| is_event(e, "server_started"));
    let (index, reload, missing, escape) = if server.is_some() {
        (
            http_get(port, "/"),
            http_get(port, "/__assetpipe/reload?since=0"),
            http_get(port, "/nope.html"),
            http_get(port, "/../assetpipe.toml"),
        )
    } else {
        Default::default()
    };

    let _ = child.kill();
    let _ = child.wait();

    let server = server.unwrap_or_else(|| panic!("no server_started: {seen:?}"));
    assert_eq!(server["url"], format!("http://127.0.0.1:{port}/"));

    assert!(index.starts_with("HTTP/1.1 200"), "{index}");
    assert!(index.contains("<h1>Home</h1>"));
    assert!(index.contains("/__assetpipe/reload"), "client not injected: {index}");

    // The initial build already notified, so the poll answers at once
    assert!(reload.starts_with("HTTP/1.1 200"), "{reload}");
    assert!(reload.contains("\"version\":"), "{reload}");

    assert!(missing.starts_with("HTTP/1.1 404"), "{missing}");
    assert!(
        ["403", "400", "404"]
            .iter()
            .any(|code| escape.starts_with(&format!("HTTP/1.1 {code}"))),
        "{escape}"
    );
}
