// Copyright 2025 Oxide Computer Company

//! Where the contract document comes from

use crate::git::{
    git_merge_base_head, git_show_file, git_toplevel, GitRevision,
};
use anyhow::{bail, Context};
use camino::{Utf8Path, Utf8PathBuf};
use oas_contract::{
    document_from_slice, load_document, Document, DocumentFormat,
};
use slog::Logger;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContractSource {
    /// Contract document loaded from a local file
    File { path: Utf8PathBuf },

    /// Contract document loaded from the merge base of HEAD and `revision`
    ///
    /// `path` is relative to the top of the repository.  If it's not
    /// specified, the candidate's own path is used.
    GitRevisionMergeBase { revision: GitRevision, path: Option<Utf8PathBuf> },
}

impl fmt::Display for ContractSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractSource::File { path } => write!(f, "{}", path),
            ContractSource::GitRevisionMergeBase { revision, path } => {
                write!(f, "{}", revision)?;
                if let Some(path) = path {
                    write!(f, ":{}", path)?;
                }
                write!(f, " (merge base with HEAD)")
            }
        }
    }
}

impl ContractSource {
    /// Parses a `REVISION[:PATH]` argument.
    pub fn from_git_arg(arg: &str) -> ContractSource {
        let (revision, path) = match arg.split_once(':') {
            Some((r, p)) if !p.is_empty() => (r, Some(Utf8PathBuf::from(p))),
            Some((r, _)) => (r, None),
            None => (arg, None),
        };
        ContractSource::GitRevisionMergeBase {
            revision: GitRevision::from(String::from(revision)),
            path,
        }
    }

    /// Loads the contract.  `candidate_path` supplies the default path within
    /// the repository for contracts read from git.
    pub fn load(
        &self,
        log: &Logger,
        candidate_path: &Utf8Path,
    ) -> anyhow::Result<Document> {
        match self {
            ContractSource::File { path } => load_document(path)
                .with_context(|| format!("loading contract {}", path)),

            ContractSource::GitRevisionMergeBase { revision, path } => {
                let path = match path {
                    Some(path) => path.clone(),
                    None => repo_relative_path(candidate_path)?,
                };
                let merge_base = git_merge_base_head(revision)?;
                debug!(log, "loading contract from git";
                    "revision" => %revision,
                    "merge_base" => %merge_base,
                    "path" => %path,
                );
                let contents = git_show_file(&merge_base, &path)?;
                document_from_slice(&contents, DocumentFormat::from_path(&path))
                    .with_context(|| {
                        format!("loading contract {}:{}", merge_base, path)
                    })
            }
        }
    }
}

/// Returns the path of `path` relative to the top of the enclosing git
/// repository.
fn repo_relative_path(path: &Utf8Path) -> anyhow::Result<Utf8PathBuf> {
    let toplevel = canonicalize(&git_toplevel()?)?;
    let absolute = canonicalize(path)?;
    match absolute.strip_prefix(&toplevel) {
        Ok(relative) => Ok(relative.to_owned()),
        Err(_) => bail!(
            "candidate {} is not inside the git repository at {} \
             (specify the contract path as REVISION:PATH)",
            absolute,
            toplevel
        ),
    }
}

fn canonicalize(path: &Utf8Path) -> anyhow::Result<Utf8PathBuf> {
    let canonical = fs_err::canonicalize(path)?;
    Utf8PathBuf::try_from(canonical)
        .with_context(|| format!("path {} is not valid UTF-8", path))
}
