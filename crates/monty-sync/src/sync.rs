//! Fork synchronisation workflow.
//!
//! Every step is fail-closed: the first failing command aborts the run with a
//! [`SyncError`] naming the step, the command line, and the command's own
//! diagnostics.

use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::runner::{CommandInvocation, CommandOutcome, CommandRunner};

/// Prefix for every progress line.
pub const PROGRESS_PREFIX: &str = "monty-sync";

/// Scope label for the superproject checkout.
const SUPERPROJECT_SCOPE: &str = "superproject";

/// Scope label for the submodule checkout.
const SUBMODULE_SCOPE: &str = "full-monty submodule";

/// Placeholder used when a failed command printed nothing.
const NO_DETAIL: &str = "no error detail";

/// Runs the whole sync workflow, writing progress lines to `out`.
///
/// # Errors
///
/// Returns the first failure: a dirty worktree, a missing fork remote, a
/// command that could not start, or a command that exited unsuccessfully.
pub fn run_monty_sync(
    runner: &mut dyn CommandRunner,
    config: &SyncConfig,
    out: &mut dyn Write,
) -> Result<(), SyncError> {
    let mut workflow = Workflow {
        runner,
        config,
        out,
    };
    workflow.run()
}

struct Workflow<'a> {
    runner: &'a mut dyn CommandRunner,
    config: &'a SyncConfig,
    out: &'a mut dyn Write,
}

impl Workflow<'_> {
    fn run(&mut self) -> Result<(), SyncError> {
        let repo_root = self.config.repo_root.clone();
        let submodule_root = self.config.submodule_root();
        let submodule = self.config.submodule_arg();

        self.progress("checking superproject worktree cleanliness")?;
        self.ensure_clean(&repo_root, SUPERPROJECT_SCOPE)?;

        self.progress(&format!("initializing {submodule}"))?;
        self.git(
            &repo_root,
            &["submodule", "update", "--init", "--recursive", &submodule],
            "unable to initialize full-monty submodule",
        )?;

        self.progress("checking full-monty worktree cleanliness")?;
        self.ensure_clean(&submodule_root, SUBMODULE_SCOPE)?;

        self.progress("ensuring remote configuration")?;
        self.ensure_remotes(&submodule_root, &submodule)?;

        let before = self.head_revision(&submodule_root)?;

        self.progress("fetching remotes and refreshing fork branch")?;
        self.refresh_fork(&submodule_root)?;

        let after = self.head_revision(&submodule_root)?;
        if before == after {
            info!("Submodule already at {after}");
            self.progress("submodule revision already current")?;
        } else {
            info!("Submodule moved from {before} to {after}");
            self.progress(&format!("submodule revision updated {before} -> {after}"))?;
        }

        self.git(
            &repo_root,
            &["add", &submodule],
            "unable to stage submodule pointer update",
        )?;
        self.progress("staged submodule pointer update")?;

        self.progress("running verification gates")?;
        let config = self.config;
        for target in &config.verification_targets {
            self.checked(
                "make",
                &repo_root,
                &[target.as_str()],
                &format!("verification gate `{target}` failed"),
            )?;
        }

        self.progress("completed successfully")
    }

    fn ensure_clean(&mut self, cwd: &Path, scope: &str) -> Result<(), SyncError> {
        let outcome = self.git(
            cwd,
            &["status", "--porcelain"],
            &format!("unable to inspect {scope} worktree status"),
        )?;
        if outcome.stdout.trim().is_empty() {
            return Ok(());
        }
        debug!("Dirty {scope}:\n{}", outcome.stdout.trim_end());
        Err(SyncError::DirtyWorktree {
            scope: scope.to_string(),
        })
    }

    fn ensure_remotes(&mut self, cwd: &Path, submodule: &str) -> Result<(), SyncError> {
        let outcome = self.git(cwd, &["remote"], "unable to list full-monty remotes")?;
        let remotes: Vec<&str> = outcome.stdout.lines().map(str::trim).collect();

        let config = self.config;
        let fork = config.fork_remote.as_str();
        if !remotes.contains(&fork) {
            return Err(SyncError::MissingForkRemote {
                remote: fork.to_string(),
                submodule: submodule.to_string(),
            });
        }

        let upstream = config.upstream_remote.as_str();
        let url = config.upstream_url.as_str();
        if remotes.contains(&upstream) {
            self.git(
                cwd,
                &["remote", "set-url", upstream, url],
                "unable to update upstream remote URL",
            )?;
        } else {
            debug!("Adding remote {upstream} -> {url}");
            self.git(
                cwd,
                &["remote", "add", upstream, url],
                "unable to add upstream remote",
            )?;
        }
        Ok(())
    }

    fn refresh_fork(&mut self, cwd: &Path) -> Result<(), SyncError> {
        let config = self.config;
        let fork_ref = format!("{}/{}", config.fork_remote, config.fork_branch);
        let upstream_ref = format!("{}/{}", config.upstream_remote, config.upstream_branch);

        self.git(
            cwd,
            &["fetch", "--prune", &config.fork_remote],
            "unable to fetch fork remote",
        )?;
        self.git(
            cwd,
            &["fetch", "--prune", &config.upstream_remote],
            "unable to fetch upstream remote",
        )?;
        self.git(
            cwd,
            &["checkout", "-B", &config.fork_branch, &fork_ref],
            "unable to refresh local fork branch",
        )?;
        self.git(
            cwd,
            &["merge", "--ff-only", &upstream_ref],
            "unable to fast-forward fork branch with upstream; resolve divergence manually",
        )?;
        Ok(())
    }

    fn head_revision(&mut self, cwd: &Path) -> Result<String, SyncError> {
        let outcome = self.git(cwd, &["rev-parse", "HEAD"], "unable to read HEAD revision")?;
        Ok(outcome.stdout.trim().to_string())
    }

    fn git(&mut self, cwd: &Path, args: &[&str], summary: &str) -> Result<CommandOutcome, SyncError> {
        self.checked("git", cwd, args, summary)
    }

    fn checked(
        &mut self,
        program: &str,
        cwd: &Path,
        args: &[&str],
        summary: &str,
    ) -> Result<CommandOutcome, SyncError> {
        let invocation = CommandInvocation::new(program, args.iter().copied(), cwd);
        let outcome = self.runner.run(&invocation)?;
        if outcome.ok {
            return Ok(outcome);
        }
        Err(SyncError::CommandFailed {
            summary: summary.to_string(),
            command: invocation.command_line(),
            exit_code: outcome.exit_code,
            details: failure_details(&outcome),
        })
    }

    fn progress(&mut self, message: &str) -> Result<(), SyncError> {
        writeln!(self.out, "{PROGRESS_PREFIX}: {message}")?;
        Ok(())
    }
}

/// Diagnostic text for a failed command: stderr, else stdout, else a
/// placeholder.
fn failure_details(outcome: &CommandOutcome) -> String {
    [outcome.stderr.trim(), outcome.stdout.trim()]
        .into_iter()
        .find(|text| !text.is_empty())
        .unwrap_or(NO_DETAIL)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_prefer_stderr() {
        let outcome = CommandOutcome {
            ok: false,
            stdout: "out".into(),
            stderr: "  err \n".into(),
            exit_code: 1,
        };
        assert_eq!(failure_details(&outcome), "err");
    }

    #[test]
    fn details_fall_back_to_stdout_then_placeholder() {
        let mut outcome = CommandOutcome::failure(2, "   ");
        outcome.stdout = "conflict\n".into();
        assert_eq!(failure_details(&outcome), "conflict");
        assert_eq!(failure_details(&CommandOutcome::failure(2, "")), NO_DETAIL);
    }
}
