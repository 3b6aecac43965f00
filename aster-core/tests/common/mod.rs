#![allow(dead_code)]
//! Fakes for driving the bootstrap without a real compiler or display.

use std::cell::{Cell, RefCell};
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

use aster_core::bootstrap::{Runtime, RuntimeError, RuntimeOptions, SurfaceFn, Surfaces};
use aster_core::config::{CompilerSettings, FontSettings, ShellConfig, StyleSettings};
use aster_core::style::{CompileError, CompileOutput, FragmentSet, StyleCompiler};
use aster_core::RequestHandler;

/// Ordered record of what the startup sequence did.
pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// ShellConfig whose scratch and target live under `dir`.
pub fn shell_config(dir: &Path, fragments: FragmentSet) -> ShellConfig {
    ShellConfig {
        style: StyleSettings {
            colors: PathBuf::from("/c.scss"),
            scratch: dir.join("style.scss"),
            target: dir.join("style.css"),
            font: FontSettings::default(),
        },
        compiler: CompilerSettings {
            program: "sass".into(),
            args: Vec::new(),
            timeout: None,
        },
        fragments,
        icons_dir: dir.join("icons"),
        socket_path: dir.join("aster.sock"),
    }
}

/// Compiler that copies the source to the target, or fails with exit code 1.
pub struct FakeCompiler {
    pub fail: bool,
    pub journal: Journal,
    /// Source text seen on each call.
    pub seen: RefCell<Vec<String>>,
}

impl FakeCompiler {
    pub fn succeeding(journal: &Journal) -> Self {
        Self {
            fail: false,
            journal: Rc::clone(journal),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(journal: &Journal) -> Self {
        Self {
            fail: true,
            ..Self::succeeding(journal)
        }
    }
}

impl StyleCompiler for FakeCompiler {
    fn compile(&self, source: &Path, target: &Path) -> Result<CompileOutput, CompileError> {
        self.journal.borrow_mut().push("compile".into());
        let text = std::fs::read_to_string(source).unwrap_or_default();
        self.seen.borrow_mut().push(text.clone());

        if self.fail {
            return Err(CompileError::Failed {
                program: "fake-sass".into(),
                status: ExitStatus::from_raw(1 << 8),
                stderr: "Error: Undefined variable.".into(),
            });
        }

        std::fs::write(target, text).map_err(|source| CompileError::Spawn {
            program: "fake-sass".into(),
            source,
        })?;
        Ok(CompileOutput {
            status: ExitStatus::from_raw(0),
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

/// What the fake runtime was started with.
pub struct FakeHandle {
    pub options: RuntimeOptions,
    pub handler: Box<dyn RequestHandler>,
    /// Whether the stylesheet existed at start time.
    pub stylesheet_present: bool,
}

pub struct FakeRuntime {
    pub journal: Journal,
    pub fail: bool,
}

impl FakeRuntime {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: Rc::clone(journal),
            fail: false,
        }
    }
}

impl Runtime for FakeRuntime {
    type Handle = FakeHandle;

    fn start(
        self,
        options: RuntimeOptions,
        handler: Box<dyn RequestHandler>,
    ) -> Result<FakeHandle, RuntimeError> {
        self.journal.borrow_mut().push("runtime".into());
        if self.fail {
            return Err(RuntimeError::Other("no display".into()));
        }
        Ok(FakeHandle {
            stylesheet_present: options.stylesheet.is_file(),
            options,
            handler,
        })
    }
}

/// Surfaces that journal their construction and bump `count`.
pub fn counting_surfaces(journal: &Journal, count: &Rc<Cell<usize>>) -> Surfaces {
    let make = |name: &'static str| -> SurfaceFn {
        let journal = Rc::clone(journal);
        let count = Rc::clone(count);
        Box::new(move || {
            journal.borrow_mut().push(name.into());
            count.set(count.get() + 1);
        })
    };
    Surfaces {
        bar: make("bar"),
        launcher: make("launcher"),
        notification_popups: make("notification-popups"),
        panel: make("panel"),
    }
}
