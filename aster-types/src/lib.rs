//! # aster-types
//!
//! Shared type definitions for the aster shell.
//! This crate contains the vocabulary used by aster-core, aster-ipc and the
//! `aster` binary: surface identifiers, the command channel grammar, and the
//! request handler seam.

pub mod command;
mod dispatch;

pub use command::Command;
pub use dispatch::RequestHandler;

/// Identifier of a popup window, as named on the command channel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(String);

impl SurfaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SurfaceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The fixed set of top-level UI surfaces brought up at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Bar,
    Launcher,
    NotificationPopups,
    Panel,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 4] = [
        SurfaceKind::Bar,
        SurfaceKind::Launcher,
        SurfaceKind::NotificationPopups,
        SurfaceKind::Panel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SurfaceKind::Bar => "bar",
            SurfaceKind::Launcher => "launcher",
            SurfaceKind::NotificationPopups => "notification-popups",
            SurfaceKind::Panel => "panel",
        }
    }
}

impl std::fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
