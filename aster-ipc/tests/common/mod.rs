#![allow(dead_code)]
//! Test harness utilities for aster-ipc integration tests.

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use aster_ipc::{send_request, IpcServer};
use aster_types::RequestHandler;

pub const TIMEOUT: Duration = Duration::from_secs(2);

pub fn socket_in(dir: &Path) -> PathBuf {
    dir.join("aster.sock")
}

/// Echoes the request back, prefixed so responses are distinguishable.
pub fn echo(request: &str) -> String {
    format!("echo:{}", request)
}

/// Send `line` from a background thread; join to get the response.
pub fn spawn_request(path: &Path, line: &str) -> JoinHandle<std::io::Result<String>> {
    let path = path.to_path_buf();
    let line = line.to_string();
    thread::spawn(move || send_request(&path, &line, Some(TIMEOUT)))
}

/// Serve until `expected` requests have been answered, or timeout.
pub fn drive_until_answered(
    server: &mut IpcServer,
    handler: &mut dyn RequestHandler,
    expected: usize,
) -> usize {
    let start = Instant::now();
    let mut answered = 0;
    while start.elapsed() < TIMEOUT {
        answered += server.serve(handler);
        if answered >= expected {
            return answered;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!(
        "Timed out waiting for {} requests (answered {})",
        expected, answered
    );
}

/// Drive the server until the expected client count is reached, or timeout.
pub fn drive_until_clients(server: &mut IpcServer, expected: usize) {
    let start = Instant::now();
    while start.elapsed() < TIMEOUT {
        server.accept_connections();
        server.poll_requests();
        if server.client_count() == expected {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!(
        "Timed out waiting for {} clients (have {})",
        expected,
        server.client_count()
    );
}
