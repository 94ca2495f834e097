// Copyright 2025 Oxide Computer Company

//! Reading contract documents out of git history

use anyhow::{bail, Context};
use camino::{Utf8Path, Utf8PathBuf};
use std::process::Command;

/// Newtype String wrapper identifying a Git revision
///
/// This could be a commit, branch name, tag name, etc.  This type does not
/// validate the contents.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct GitRevision(String);
NewtypeDebug! { () pub struct GitRevision(String); }
NewtypeDeref! { () pub struct GitRevision(String); }
NewtypeDisplay! { () pub struct GitRevision(String); }
NewtypeFrom! { () pub struct GitRevision(String); }

/// Given a revision, return its merge base with HEAD
pub fn git_merge_base_head(
    revision: &GitRevision,
) -> anyhow::Result<GitRevision> {
    let mut cmd = git_start();
    cmd.arg("merge-base").arg("--all").arg("HEAD").arg(revision.as_str());
    let label = cmd_label(&cmd);
    let stdout = do_run(&mut cmd)?;
    let stdout = stdout.trim();
    if stdout.is_empty() {
        bail!("unexpected empty output from {}", label);
    }
    if stdout.contains(' ') || stdout.contains('\n') {
        bail!(
            "unexpected output from {} (contains whitespace -- \
             multiple merge bases?)",
            label
        );
    }
    Ok(GitRevision::from(stdout.to_owned()))
}

/// Returns the absolute path of the top of the working tree containing the
/// current directory.
pub fn git_toplevel() -> anyhow::Result<Utf8PathBuf> {
    let mut cmd = git_start();
    cmd.arg("rev-parse").arg("--show-toplevel");
    let stdout = do_run(&mut cmd)?;
    Ok(Utf8PathBuf::from(stdout.trim_end_matches('\n')))
}

/// Returns the contents of the file at the given path `path` in Git revision
/// `revision`.
///
/// `path` is relative to the top of the repository.
pub fn git_show_file(
    revision: &GitRevision,
    path: &Utf8Path,
) -> anyhow::Result<Vec<u8>> {
    let mut cmd = git_start();
    cmd.arg("cat-file").arg("blob").arg(format!("{}:{}", revision, path));
    let stdout = do_run(&mut cmd)?;
    Ok(stdout.into_bytes())
}

/// Begin assembling an invocation of git(1)
fn git_start() -> Command {
    let git = std::env::var("GIT").ok().unwrap_or_else(|| String::from("git"));
    Command::new(&git)
}

/// Runs an assembled git(1) command, returning stdout on success and an error
/// including the exit status and stderr contents on failure.
fn do_run(cmd: &mut Command) -> anyhow::Result<String> {
    let label = cmd_label(cmd);
    let output = cmd.output().with_context(|| format!("invoking {}", label))?;
    let status = output.status;
    if status.success() {
        return String::from_utf8(output.stdout).with_context(|| {
            format!("command succeeded, but output was not UTF-8: {}", label)
        });
    }

    bail!(
        "command failed: {}: {}\n\
        stderr:\n\
        -----\n\
        {}\n\
        -----\n",
        label,
        status,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Returns a string describing an assembled command (for debugging and error
/// reporting)
fn cmd_label(cmd: &Command) -> String {
    format!(
        "{:?} {}",
        cmd.get_program(),
        cmd.get_args()
            .map(|a| format!("{:?}", a))
            .collect::<Vec<_>>()
            .join(" ")
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_revision() {
        let revision = GitRevision::from(String::from("origin/main"));
        assert_eq!(revision.to_string(), "origin/main");
        assert_eq!(revision.as_str(), "origin/main");
        assert_eq!(format!("{:?}", revision), "\"origin/main\"");
    }

    #[test]
    fn test_cmd_label() {
        let mut cmd = Command::new("git");
        cmd.arg("cat-file").arg("blob").arg("HEAD:openapi/api.json");
        assert_eq!(
            cmd_label(&cmd),
            r#""git" "cat-file" "blob" "HEAD:openapi/api.json""#
        );
    }

    #[test]
    fn test_do_run_missing_program() {
        let mut cmd = Command::new("/nonexistent/oas-contract-test-git");
        cmd.arg("status");
        let error = do_run(&mut cmd).unwrap_err();
        assert!(
            error.to_string().starts_with(
                "invoking \"/nonexistent/oas-contract-test-git\" \"status\""
            ),
            "{:#}",
            error
        );
    }
}
