use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error, info, warn};
use thiserror::Error;
use wait_timeout::ChildExt;

use crate::config::CompilerSettings;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("style compiler `{program}` not found")]
    NotFound { program: String },
    #[error("could not run style compiler `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("style compiler `{program}` failed with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("style compiler `{program}` timed out after {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
    #[error("style compiler did not produce {}", .0.display())]
    MissingArtifact(PathBuf),
    #[error("stylesheet source and target are both {}", .0.display())]
    SourceIsTarget(PathBuf),
}

/// What a successful compiler run reported.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Turns an intermediate stylesheet source into the compiled stylesheet.
///
/// Implementations block until the target is written or compilation fails.
pub trait StyleCompiler {
    fn compile(&self, source: &Path, target: &Path) -> Result<CompileOutput, CompileError>;
}

/// Runs an external Sass-compatible compiler as `program [args..] <source> <target>`.
#[derive(Debug, Clone)]
pub struct SassCompiler {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl SassCompiler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    pub fn from_settings(settings: &CompilerSettings) -> Self {
        Self {
            program: settings.program.clone(),
            args: settings.args.clone(),
            timeout: settings.timeout,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Kill the compiler if it has not exited after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl StyleCompiler for SassCompiler {
    fn compile(&self, source: &Path, target: &Path) -> Result<CompileOutput, CompileError> {
        info!(
            "compiling {} -> {} with {} {:?}",
            source.display(),
            target.display(),
            self.program,
            self.args
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(source)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => CompileError::NotFound {
                    program: self.program.clone(),
                },
                _ => CompileError::Spawn {
                    program: self.program.clone(),
                    source: e,
                },
            })?;

        // Drain both pipes while waiting so a chatty compiler cannot block on a full pipe.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = self.wait(&mut child)?;
        let stdout = join_output(stdout);
        let stderr = join_output(stderr);

        if !status.success() {
            return Err(CompileError::Failed {
                program: self.program.clone(),
                status,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(CompileOutput {
            status,
            stdout,
            stderr,
        })
    }
}

impl SassCompiler {
    fn wait(&self, child: &mut Child) -> Result<ExitStatus, CompileError> {
        let spawn_err = |source: io::Error| CompileError::Spawn {
            program: self.program.clone(),
            source,
        };

        match self.timeout {
            Some(timeout) => match child.wait_timeout(timeout).map_err(spawn_err)? {
                Some(status) => Ok(status),
                None => {
                    let _ = child.kill();
                    let _ = child.wait();
                    Err(CompileError::TimedOut {
                        program: self.program.clone(),
                        timeout,
                    })
                }
            },
            None => child.wait().map_err(spawn_err),
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_output(handle: JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}

/// Compile `source` into `target` and check the artifact exists.
///
/// Any previous artifact is removed first, so a compiler that exits cleanly
/// without writing cannot leave a stale stylesheet behind. `source` and
/// `target` must differ.
pub fn compile_stylesheet(
    compiler: &dyn StyleCompiler,
    source: &Path,
    target: &Path,
) -> Result<CompileOutput, CompileError> {
    if source == target {
        return Err(CompileError::SourceIsTarget(target.to_path_buf()));
    }

    match std::fs::remove_file(target) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("could not remove old stylesheet {}: {}", target.display(), e),
    }

    let output = compiler.compile(source, target).map_err(|e| {
        if let CompileError::Failed { stderr, .. } = &e {
            for line in stderr.lines() {
                error!(target: "sass", "{}", line);
            }
        }
        e
    })?;

    for line in output.stdout.lines().filter(|l| !l.trim().is_empty()) {
        debug!(target: "sass", "{}", line);
    }
    for line in output.stderr.lines().filter(|l| !l.trim().is_empty()) {
        warn!(target: "sass", "{}", line);
    }

    if !target.is_file() {
        return Err(CompileError::MissingArtifact(target.to_path_buf()));
    }

    info!("compiled stylesheet written to {}", target.display());
    Ok(output)
}
