use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Returns the resolved path of the `git` executable, if one is on `PATH`.
pub fn locate() -> Option<PathBuf> {
    which::which("git").ok()
}

/// Runs a command and returns its trimmed standard output on success,
/// or its trimmed standard error as an `Err` on failure.
///
/// If the process fails to spawn, the I/O error message is returned as `Err`.
fn run_output(mut cmd: Command) -> Result<String, String> {
    let out_res = cmd.output();
    match out_res {
        Ok(out) => {
            if out.status.success() {
                Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
            } else {
                Err(String::from_utf8_lossy(&out.stderr).trim().to_string())
            }
        }
        Err(e) => Err(format!("{}", e)),
    }
}

fn git_in(dir: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd
}

/// Runs `git rev-parse --show-toplevel` in `dir` and returns the work tree root.
///
/// # Errors
///
/// Returns git's standard error when `dir` is not inside a work tree.
///
/// # Examples
///
/// ```ignore
/// // Ignored because it depends on being inside a Git repository.
/// let root = show_toplevel(Path::new("."))?;
/// println!("Repository root: {}", root.display());
/// ```
pub fn show_toplevel(dir: &Path) -> Result<PathBuf, String> {
    let mut cmd = git_in(dir);
    cmd.arg("rev-parse").arg("--show-toplevel");
    run_output(cmd).map(PathBuf::from)
}

/// Runs `git config --get <key>` in `dir`.
///
/// A missing key or a failing command both yield an empty string; the value
/// is only ever used as a prompt default.
pub fn config_get(dir: &Path, key: &str) -> String {
    let mut cmd = git_in(dir);
    cmd.arg("config").arg("--get").arg(key);
    run_output(cmd).unwrap_or_default()
}
