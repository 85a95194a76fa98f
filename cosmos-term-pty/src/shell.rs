//! Shell path validation and default-shell selection.
//!
//! A shell is accepted when it is either an absolute path to an existing
//! regular file, or a bare name on the allowlist that resolves through `PATH`.

use crate::error::PtyError;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

const KNOWN_SHELLS: &[&str] = &[
    "bash", "bash.exe", "cmd.exe", "dash", "elvish", "fish", "nu", "powershell",
    "powershell.exe", "pwsh", "pwsh.exe", "sh", "zsh",
];

/// Validate a user-supplied shell and return its resolved path.
///
/// `None` passes through as `Ok(None)` so callers can fall back to
/// [`default_shell`].
pub fn normalize_shell_path(shell: Option<String>) -> Result<Option<String>, PtyError> {
    let Some(raw) = shell else {
        return Ok(None);
    };

    let shell = raw.trim();
    if shell.is_empty() {
        return Err(PtyError::ShellPath("shell path cannot be empty".to_string()));
    }

    let path = Path::new(shell);
    if path.is_absolute() {
        let canonical = std::fs::canonicalize(path)
            .map_err(|e| PtyError::ShellPath(format!("shell not found: {shell} ({e})")))?;
        let meta = std::fs::metadata(&canonical)
            .map_err(|e| PtyError::ShellPath(format!("unreadable shell path {shell}: {e}")))?;
        if !meta.is_file() {
            return Err(PtyError::ShellPath(format!("not a file: {shell}")));
        }
        return Ok(Some(canonical.to_string_lossy().into_owned()));
    }

    if !is_known_shell(shell) {
        return Err(PtyError::ShellPath(format!(
            "expected an absolute path or a known shell name, got: {shell}"
        )));
    }

    let path_var = std::env::var_os("PATH")
        .ok_or_else(|| PtyError::ShellPath("PATH is not set".to_string()))?;
    let resolved = resolve_in_path(shell, &path_var)
        .ok_or_else(|| PtyError::ShellPath(format!("shell not found in PATH: {shell}")))?;
    Ok(Some(resolved.to_string_lossy().into_owned()))
}

/// The shell used when a pane does not name one.
///
/// `$SHELL` is only trusted after passing [`normalize_shell_path`].
pub fn default_shell() -> String {
    #[cfg(target_os = "windows")]
    {
        "powershell.exe".to_string()
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("SHELL")
            .ok()
            .and_then(|s| normalize_shell_path(Some(s)).ok().flatten())
            .unwrap_or_else(|| "/bin/zsh".to_string())
    }
}

fn is_known_shell(name: &str) -> bool {
    KNOWN_SHELLS.iter().any(|s| name.eq_ignore_ascii_case(s))
}

fn resolve_in_path(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    let candidates = candidate_names(name);
    for dir in std::env::split_paths(path_var) {
        for candidate in &candidates {
            let full = dir.join(candidate);
            if is_executable_file(&full) {
                return Some(std::fs::canonicalize(&full).unwrap_or(full));
            }
        }
    }
    None
}

#[cfg(target_os = "windows")]
fn candidate_names(name: &str) -> Vec<String> {
    if Path::new(name).extension().is_some() {
        return vec![name.to_string()];
    }
    let pathext = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    pathext
        .split(';')
        .filter(|ext| !ext.is_empty())
        .map(|ext| {
            if ext.starts_with('.') {
                format!("{name}{ext}")
            } else {
                format!("{name}.{ext}")
            }
        })
        .collect()
}

#[cfg(not(target_os = "windows"))]
fn candidate_names(name: &str) -> Vec<String> {
    vec![name.to_string()]
}

fn is_executable_file(path: &Path) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}
