//! The startup sequence.
//!
//! Runs once per process: assemble the stylesheet, compile it, start the
//! runtime with the command dispatcher installed, then construct every UI
//! surface. Each step only runs if the previous one succeeded.

use std::fmt;
use std::io;
use std::path::PathBuf;

use log::info;
use thiserror::Error;

use aster_types::{RequestHandler, SurfaceKind};

use crate::config::ShellConfig;
use crate::dispatch::CommandDispatcher;
use crate::popup::PopupRegistry;
use crate::style::{self, CompileError, StyleCompiler};

/// What the runtime is started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub icons_dir: PathBuf,
    /// Compiled stylesheet; guaranteed to exist when `start` is called.
    pub stylesheet: PathBuf,
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("could not open command channel at {}: {source}", path.display())]
    Channel {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not load stylesheet {}: {source}", path.display())]
    Stylesheet {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Other(String),
}

/// The application runtime hosting the shell.
pub trait Runtime {
    /// Handle to the running shell, returned to the caller of [`bootstrap`].
    type Handle;

    /// Start the runtime with `handler` answering command channel requests.
    fn start(
        self,
        options: RuntimeOptions,
        handler: Box<dyn RequestHandler>,
    ) -> Result<Self::Handle, RuntimeError>;
}

pub type SurfaceFn = Box<dyn FnOnce()>;

/// Construction entry points for the fixed set of UI surfaces.
pub struct Surfaces {
    pub bar: SurfaceFn,
    pub launcher: SurfaceFn,
    pub notification_popups: SurfaceFn,
    pub panel: SurfaceFn,
}

impl Surfaces {
    /// Invoke every entry point once. Returns how many were built.
    pub fn build_all(self) -> usize {
        let Surfaces {
            bar,
            launcher,
            notification_popups,
            panel,
        } = self;

        let builders: [(SurfaceKind, SurfaceFn); 4] = [
            (SurfaceKind::Bar, bar),
            (SurfaceKind::Launcher, launcher),
            (SurfaceKind::NotificationPopups, notification_popups),
            (SurfaceKind::Panel, panel),
        ];

        let mut built = 0;
        for (kind, build) in builders {
            info!("constructing {}", kind);
            build();
            built += 1;
        }
        built
    }
}

impl fmt::Debug for Surfaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surfaces").finish_non_exhaustive()
    }
}

/// Fatal startup failures. Any of these means no surface was constructed.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("could not write stylesheet source {}: {source}", path.display())]
    Scratch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error("could not start shell runtime: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Bring the shell up.
///
/// `popups` is the registry the installed command dispatcher toggles; the
/// surfaces are expected to register their popup windows in it when built.
pub fn bootstrap<R, P>(
    config: &ShellConfig,
    compiler: &dyn StyleCompiler,
    runtime: R,
    popups: P,
    surfaces: Surfaces,
) -> Result<R::Handle, StartupError>
where
    R: Runtime,
    P: PopupRegistry + 'static,
{
    let settings = &config.style;

    let source = style::assemble(&settings.colors, &settings.font, &config.fragments);
    style::write_scratch(&settings.scratch, &source).map_err(|source| StartupError::Scratch {
        path: settings.scratch.clone(),
        source,
    })?;
    info!("wrote {} bytes to {}", source.len(), settings.scratch.display());

    style::compile_stylesheet(compiler, &settings.scratch, &settings.target)?;

    let options = RuntimeOptions {
        icons_dir: config.icons_dir.clone(),
        stylesheet: settings.target.clone(),
    };
    let handle = runtime.start(options, Box::new(CommandDispatcher::new(popups)))?;
    info!("runtime started");

    let built = surfaces.build_all();
    info!("constructed {} surfaces", built);

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn build_all_calls_each_surface_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = |calls: &Rc<Cell<i32>>| -> SurfaceFn {
            let calls = Rc::clone(calls);
            Box::new(move || calls.set(calls.get() + 1))
        };
        let surfaces = Surfaces {
            bar: counter(&calls),
            launcher: counter(&calls),
            notification_popups: counter(&calls),
            panel: counter(&calls),
        };
        assert_eq!(surfaces.build_all(), 4);
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn startup_error_messages_name_the_step() {
        let err = StartupError::from(CompileError::NotFound {
            program: "sass".into(),
        });
        assert_eq!(err.to_string(), "style compiler `sass` not found");

        let err = StartupError::from(RuntimeError::Other("no display".into()));
        assert_eq!(err.to_string(), "could not start shell runtime: no display");
    }
}
