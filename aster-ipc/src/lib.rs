//! Command channel for the aster shell.
//!
//! The running shell listens on a Unix socket; other processes send it one
//! line per request and read back one line per response.

pub mod client;
pub mod framing;
pub mod server;

pub use client::{send_request, IpcClient};
pub use server::{ClientId, IpcServer};
