//! # aster-core
//!
//! Startup and command handling for the aster shell, independent of any UI
//! toolkit. Assembles and compiles the stylesheet, routes command channel
//! requests, and sequences the shell bootstrap.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use aster_core::bootstrap::{bootstrap, Surfaces};
//! use aster_core::config::Config;
//! use aster_core::popup::{PopupWindows, SharedPopups};
//! use aster_core::style::SassCompiler;
//!
//! // 1. Resolve configuration (embedded defaults + user override)
//! let config = Config::load().shell_config();
//!
//! // 2. Pick the compiler and the runtime that will host the shell
//! let compiler = SassCompiler::from_settings(&config.compiler);
//! let popups = SharedPopups::default();
//!
//! // 3. Assemble, compile, start the runtime, construct surfaces
//! let handle = bootstrap(&config, &compiler, runtime, popups.clone(), surfaces)?;
//! ```
//!
//! ## Module Overview
//!
//! - [`style`] : stylesheet assembly from fragments and the external compiler call
//! - [`dispatch`] : `dispatch_command()` and the `CommandDispatcher` request handler
//! - [`popup`] : popup-window registry the toggle command acts on
//! - [`bootstrap`] : the ordered startup sequence and its error type
//! - [`config`] : TOML configuration loading (embedded + user override)
//! - [`paths`] : icon directory and command socket resolution

pub mod bootstrap;
pub mod config;
pub mod dispatch;
pub mod paths;
pub mod popup;
pub mod style;

pub use aster_types::{Command, RequestHandler, SurfaceId, SurfaceKind};
