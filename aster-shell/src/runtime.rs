//! Headless event-loop runtime.
//!
//! Holds the loaded stylesheet and the command channel, and answers requests
//! one at a time on the calling thread.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use log::{info, warn};

use aster_core::bootstrap::{Runtime, RuntimeError, RuntimeOptions};
use aster_core::RequestHandler;
use aster_ipc::IpcServer;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(20);

pub struct EventLoopRuntime {
    socket_path: PathBuf,
    poll_interval: Duration,
}

impl EventLoopRuntime {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Runtime for EventLoopRuntime {
    type Handle = ShellHandle;

    fn start(
        self,
        options: RuntimeOptions,
        handler: Box<dyn RequestHandler>,
    ) -> Result<ShellHandle, RuntimeError> {
        let stylesheet = std::fs::read_to_string(&options.stylesheet).map_err(|source| {
            RuntimeError::Stylesheet {
                path: options.stylesheet.clone(),
                source,
            }
        })?;

        if !options.icons_dir.is_dir() {
            warn!("icon directory {} does not exist", options.icons_dir.display());
        }

        let server = IpcServer::bind(&self.socket_path).map_err(|source| RuntimeError::Channel {
            path: self.socket_path.clone(),
            source,
        })?;

        Ok(ShellHandle {
            stylesheet,
            icons_dir: options.icons_dir,
            server,
            handler,
            poll_interval: self.poll_interval,
        })
    }
}

/// The running shell.
pub struct ShellHandle {
    stylesheet: String,
    icons_dir: PathBuf,
    server: IpcServer,
    handler: Box<dyn RequestHandler>,
    poll_interval: Duration,
}

impl ShellHandle {
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    pub fn icons_dir(&self) -> &Path {
        &self.icons_dir
    }

    pub fn socket_path(&self) -> &Path {
        self.server.path()
    }

    /// Answer everything currently pending. Returns how many requests were handled.
    pub fn poll(&mut self) -> usize {
        self.server.serve(self.handler.as_mut())
    }

    /// Serve the command channel until the process is terminated.
    pub fn run(mut self) -> ! {
        info!(
            "serving commands on {} ({} bytes of css, icons from {})",
            self.socket_path().display(),
            self.stylesheet().len(),
            self.icons_dir().display()
        );
        loop {
            if self.poll() == 0 {
                thread::sleep(self.poll_interval);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn options(dir: &Path) -> RuntimeOptions {
        let stylesheet = dir.join("style.css");
        std::fs::write(&stylesheet, "* { color: red; }").unwrap();
        RuntimeOptions {
            icons_dir: dir.to_path_buf(),
            stylesheet,
        }
    }

    #[test]
    fn start_loads_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = EventLoopRuntime::new(dir.path().join("aster.sock"));
        let handle = runtime
            .start(options(dir.path()), Box::new(|_: &str| String::new()))
            .unwrap();

        assert_eq!(handle.stylesheet(), "* { color: red; }");
        assert_eq!(handle.icons_dir(), dir.path());
        assert!(handle.socket_path().exists());
    }

    #[test]
    fn missing_stylesheet_fails_start() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = EventLoopRuntime::new(dir.path().join("aster.sock"));
        let options = RuntimeOptions {
            icons_dir: dir.path().to_path_buf(),
            stylesheet: dir.path().join("missing.css"),
        };

        let err = runtime
            .start(options, Box::new(|_: &str| String::new()))
            .err()
            .unwrap();
        assert!(matches!(err, RuntimeError::Stylesheet { .. }));
        assert!(!dir.path().join("aster.sock").exists());
    }

    #[test]
    fn poll_answers_requests() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("aster.sock");
        let mut handle = EventLoopRuntime::new(&socket)
            .start(
                options(dir.path()),
                Box::new(|req: &str| format!("got {}", req)),
            )
            .unwrap();

        let client = thread::spawn(move || {
            aster_ipc::send_request(&socket, "hello", Some(Duration::from_secs(2)))
        });

        let start = Instant::now();
        let mut answered = 0;
        while answered == 0 && start.elapsed() < Duration::from_secs(2) {
            answered += handle.poll();
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(answered, 1);
        assert_eq!(client.join().unwrap().unwrap(), "got hello");
    }
}
