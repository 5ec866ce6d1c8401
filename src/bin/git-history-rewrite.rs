/// Entry point for the `git-history-rewrite` binary.
///
/// Delegates to the CLI entry function and exits the process with the
/// returned exit code. If an error occurs, reports it and exits with status
/// code 1.
fn main() {
    match git_history_rewrite::cli::entry() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            git_history_rewrite::cli::report_error(&e);
            std::process::exit(1)
        }
    }
}
