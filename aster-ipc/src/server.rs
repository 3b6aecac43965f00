//! Command channel server.
//!
//! Listens on a Unix socket, reads request lines on one thread per client,
//! and hands them to the shell's main loop, which answers each in turn.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, BufReader, BufWriter};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::{debug, error, info, warn};

use aster_types::RequestHandler;

use crate::framing::{read_line, write_line};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(u64);

impl ClientId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client-{}", self.0)
    }
}

/// What a reader thread reports back to the main loop.
#[derive(Debug)]
enum ClientEvent {
    Request(String),
    Closed,
}

struct ClientConnection {
    writer: BufWriter<UnixStream>,
}

/// Unix socket server for the command channel.
///
/// Non-blocking from the caller's side: `accept_connections` and
/// `poll_requests` return immediately, so they can be driven from the
/// shell's event loop.
pub struct IpcServer {
    listener: UnixListener,
    path: PathBuf,
    clients: HashMap<ClientId, ClientConnection>,
    event_rx: Receiver<(ClientId, ClientEvent)>,
    event_tx: Sender<(ClientId, ClientEvent)>,
    next_client_id: u64,
    /// Clients whose read side closed. Dropped on the next poll so that
    /// requests already received can still be answered.
    pending_close: Vec<ClientId>,
}

impl IpcServer {
    /// Bind the socket at `path`.
    ///
    /// A socket file left behind by a previous run is removed. Fails with
    /// `AddrInUse` if another server is still answering on it.
    pub fn bind(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        if path.exists() {
            if UnixStream::connect(&path).is_ok() {
                return Err(io::Error::new(
                    io::ErrorKind::AddrInUse,
                    format!("another shell is listening on {}", path.display()),
                ));
            }
            info!("removing stale socket {}", path.display());
            std::fs::remove_file(&path)?;
        }

        let listener = UnixListener::bind(&path)?;
        listener.set_nonblocking(true)?;

        let (event_tx, event_rx) = mpsc::channel();

        info!("IpcServer listening on {}", path.display());

        Ok(Self {
            listener,
            path,
            clients: HashMap::new(),
            event_rx,
            event_tx,
            next_client_id: 0,
            pending_close: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Accept any waiting connections.
    pub fn accept_connections(&mut self) {
        loop {
            match self.listener.accept() {
                Ok((stream, _)) => {
                    let client_id = ClientId::new(self.next_client_id);
                    self.next_client_id += 1;

                    if let Err(e) = stream.set_nonblocking(false) {
                        error!("Failed to configure {}: {}", client_id, e);
                        continue;
                    }

                    let read_stream = match stream.try_clone() {
                        Ok(s) => s,
                        Err(e) => {
                            error!("Failed to clone stream: {}", e);
                            continue;
                        }
                    };

                    let event_tx = self.event_tx.clone();
                    thread::spawn(move || {
                        client_reader_thread(client_id, read_stream, event_tx);
                    });

                    self.clients.insert(
                        client_id,
                        ClientConnection {
                            writer: BufWriter::new(stream),
                        },
                    );
                    debug!("{} connected", client_id);
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => {
                    error!("Accept error: {}", e);
                    break;
                }
            }
        }
    }

    /// Drain request lines received since the last call, in arrival order.
    pub fn poll_requests(&mut self) -> Vec<(ClientId, String)> {
        for client_id in self.pending_close.drain(..) {
            if self.clients.remove(&client_id).is_some() {
                debug!("{} disconnected", client_id);
            }
        }

        let mut requests = Vec::new();
        while let Ok((client_id, event)) = self.event_rx.try_recv() {
            match event {
                ClientEvent::Request(line) => requests.push((client_id, line)),
                ClientEvent::Closed => self.pending_close.push(client_id),
            }
        }
        requests
    }

    /// Send the response to one request. A client that cannot be written to
    /// is dropped.
    pub fn respond(&mut self, client_id: ClientId, response: &str) -> io::Result<()> {
        let conn = self.clients.get_mut(&client_id).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotConnected, format!("{} is gone", client_id))
        })?;

        let result = write_line(&mut conn.writer, response);
        if result.is_err() {
            self.clients.remove(&client_id);
        }
        result
    }

    /// Accept, read, and answer everything pending with `handler`.
    /// Requests are handled one at a time. Returns how many were answered.
    pub fn serve(&mut self, handler: &mut dyn RequestHandler) -> usize {
        self.accept_connections();

        let requests = self.poll_requests();
        let count = requests.len();
        for (client_id, line) in requests {
            debug!("{} -> {:?}", client_id, line);
            let response = handler.handle(&line);
            if let Err(e) = self.respond(client_id, &response) {
                warn!("Failed to answer {}: {}", client_id, e);
            }
        }
        count
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Failed to remove socket {}: {}", self.path.display(), e);
            }
        }
    }
}

fn client_reader_thread(
    client_id: ClientId,
    stream: UnixStream,
    event_tx: Sender<(ClientId, ClientEvent)>,
) {
    let mut reader = BufReader::new(stream);

    loop {
        match read_line(&mut reader) {
            Ok(Some(line)) => {
                if event_tx.send((client_id, ClientEvent::Request(line))).is_err() {
                    // Server dropped
                    return;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("{} read error: {}", client_id, e);
                break;
            }
        }
    }

    let _ = event_tx.send((client_id, ClientEvent::Closed));
}
