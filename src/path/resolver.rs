use crate::core::env::EnvStore;
use crate::process::{STATUS_NOT_EXECUTABLE, STATUS_NOT_FOUND};
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    NotFound,
    PermissionDenied,
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::NotFound => write!(f, "not found"),
            ResolveError::PermissionDenied => write!(f, "Permission denied"),
        }
    }
}

impl std::error::Error for ResolveError {}

impl ResolveError {
    pub fn status(&self) -> i32 {
        match self {
            ResolveError::NotFound => STATUS_NOT_FOUND,
            ResolveError::PermissionDenied => STATUS_NOT_EXECUTABLE,
        }
    }
}

/// Maps a command name to the executable that would run it.
///
/// Names containing `/` are checked as given. Bare names are looked up in
/// each `PATH` entry in order; an empty entry means the current directory.
pub fn resolve(name: &str, env: &EnvStore) -> Result<PathBuf, ResolveError> {
    if name.is_empty() {
        return Err(ResolveError::NotFound);
    }

    if name.contains('/') {
        let path = Path::new(name);
        if !path.exists() {
            return Err(ResolveError::NotFound);
        }
        return if is_executable(path) {
            Ok(path.to_path_buf())
        } else {
            Err(ResolveError::PermissionDenied)
        };
    }

    let search_path = env.get("PATH").ok_or(ResolveError::NotFound)?;
    for dir in search_path.split(':') {
        let dir = if dir.is_empty() { "." } else { dir };
        let candidate = Path::new(dir).join(name);
        if is_executable(&candidate) {
            tracing::debug!(command = name, path = %candidate.display(), "resolved");
            return Ok(candidate);
        }
    }

    Err(ResolveError::NotFound)
}

/// Regular file that the current user may execute.
pub fn is_executable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}
