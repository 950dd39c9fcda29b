// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

fn refuse(path: &Path, reason: &str) -> AppError {
    AppError::from(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("{} exists, {reason} (use --force to replace it)", path.display()),
    ))
}

/// Decide whether an export may replace `path`.
///
/// New files and `--force` always pass. An existing file is only replaced
/// after an explicit yes on an interactive terminal; piped or redirected
/// input never answers the prompt.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if force || !path.exists() {
        return Ok(());
    }

    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Err(refuse(path, "not replacing it without a terminal to confirm"));
    }

    warning(format!("Export target {} already exists.", path.display()));
    eprint!("Replace it? [y/N]: ");
    io::stderr().flush()?;

    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;

    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => {
            info(format!("Replacing {}", path.display()));
            Ok(())
        }
        _ => Err(refuse(path, "kept as is")),
    }
}
