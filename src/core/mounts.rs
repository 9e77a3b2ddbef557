/// Mount table inspection and client unmounting

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::core::runner::{CommandRequest, CommandRunner, RunnerError};

pub const NO_NFS_MOUNTS: &str = "No NFS mounts found.";

#[derive(Debug, Error)]
pub enum MountError {
    #[error("{0}")]
    Validation(String),

    #[error("failed to list mounts: {0}")]
    List(RunnerError),

    #[error("failed to unmount {path}: {source}")]
    Unmount { path: String, source: RunnerError },

    #[error("failed to remove mount directory {path}: {source}")]
    Cleanup { path: String, source: RunnerError },
}

#[derive(Clone)]
pub struct MountManager {
    runner: Arc<dyn CommandRunner>,
}

impl MountManager {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Lists active NFSv4 mounts, one per line, with the trailing mount
    /// option parenthetical stripped.
    pub fn list_nfs4(&self) -> Result<String, MountError> {
        let output = self
            .runner
            .run_elevated(&CommandRequest::new("mount"))
            .map_err(MountError::List)?;

        let lines: Vec<&str> = output
            .lines()
            .filter(|line| line.contains("nfs4"))
            .map(|line| line.split(" (").next().unwrap_or(line))
            .collect();

        if lines.is_empty() {
            Ok(NO_NFS_MOUNTS.to_string())
        } else {
            Ok(lines.join("\n"))
        }
    }

    /// Lazy-unmounts `path` and removes the now-detached mount directory.
    /// The first failing step aborts the sequence.
    pub fn unmount_client(&self, path: &str) -> Result<(), MountError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(MountError::Validation("No client path provided.".to_string()));
        }

        debug!(%path, "unmounting client mount point");

        let unmount = CommandRequest::new("umount").arg("-l").arg(path);
        self.runner
            .run_elevated(&unmount)
            .map_err(|source| MountError::Unmount {
                path: path.to_string(),
                source,
            })?;

        let cleanup = CommandRequest::new("rm").arg("-rf").arg(path);
        self.runner
            .run_elevated(&cleanup)
            .map_err(|source| MountError::Cleanup {
                path: path.to_string(),
                source,
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::runner::{MockCommandRunner, NO_OUTPUT};
    use mockall::Sequence;

    const MOUNT_OUTPUT: &str = "\
proc on /proc type proc (rw,nosuid,nodev,noexec)\n\
192.168.1.10:/srv/nfs on /mnt/nfs_share type nfs4 (rw,relatime,vers=4.2)\n\
/dev/sda1 on / type ext4 (rw,relatime)\n\
192.168.1.10:/srv/media on /mnt/media type nfs4 (ro,relatime)";

    fn manager_with_mount_output(output: &'static str) -> MountManager {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run_elevated()
            .withf(|req| req.program == "mount" && req.args.is_empty())
            .times(1)
            .returning(move |_| Ok(output.to_string()));
        MountManager::new(Arc::new(runner))
    }

    #[test]
    fn list_keeps_only_nfs4_lines_truncated_at_options() {
        let manager = manager_with_mount_output(MOUNT_OUTPUT);
        let listing = manager.list_nfs4().unwrap();
        assert_eq!(
            listing,
            "192.168.1.10:/srv/nfs on /mnt/nfs_share type nfs4\n\
             192.168.1.10:/srv/media on /mnt/media type nfs4"
        );
    }

    #[test]
    fn list_without_nfs4_lines_reports_no_mounts() {
        let manager = manager_with_mount_output("/dev/sda1 on / type ext4 (rw)");
        assert_eq!(manager.list_nfs4().unwrap(), NO_NFS_MOUNTS);
    }

    #[test]
    fn list_with_placeholder_output_reports_no_mounts() {
        // The runner substitutes a placeholder for empty output; it contains
        // no nfs4 line and must not leak through.
        let manager = manager_with_mount_output(NO_OUTPUT);
        assert_eq!(manager.list_nfs4().unwrap(), NO_NFS_MOUNTS);
    }

    #[test]
    fn list_propagates_runner_errors() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run_elevated().times(1).returning(|_| {
            Err(RunnerError::ExitStatus {
                code: 1,
                stderr: "mount: permission denied".to_string(),
            })
        });
        let manager = MountManager::new(Arc::new(runner));
        match manager.list_nfs4() {
            Err(MountError::List(RunnerError::ExitStatus { code, .. })) => assert_eq!(code, 1),
            other => panic!("expected list error, got {other:?}"),
        }
    }

    #[test]
    fn unmount_rejects_empty_path_without_running_anything() {
        let manager = MountManager::new(Arc::new(MockCommandRunner::new()));
        match manager.unmount_client("  ") {
            Err(MountError::Validation(msg)) => assert!(msg.contains("No client path")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn unmount_runs_umount_then_rm() {
        let mut runner = MockCommandRunner::new();
        let mut seq = Sequence::new();
        runner
            .expect_run_elevated()
            .withf(|req| req.program == "umount" && req.args == ["-l", "/mnt/nfs_share"])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(String::new()));
        runner
            .expect_run_elevated()
            .withf(|req| req.program == "rm" && req.args == ["-rf", "/mnt/nfs_share"])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(String::new()));

        let manager = MountManager::new(Arc::new(runner));
        manager.unmount_client("/mnt/nfs_share").unwrap();
    }

    #[test]
    fn unmount_failure_skips_directory_removal() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run_elevated()
            .withf(|req| req.program == "umount")
            .times(1)
            .returning(|_| {
                Err(RunnerError::ExitStatus {
                    code: 32,
                    stderr: "umount: not mounted".to_string(),
                })
            });
        // No rm expectation: a cleanup attempt would panic the mock.

        let manager = MountManager::new(Arc::new(runner));
        match manager.unmount_client("/mnt/nfs_share") {
            Err(MountError::Unmount { path, .. }) => assert_eq!(path, "/mnt/nfs_share"),
            other => panic!("expected unmount failure, got {other:?}"),
        }
    }

    #[test]
    fn cleanup_failure_is_reported_as_cleanup() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run_elevated()
            .times(2)
            .returning(|req| match req.program.as_str() {
                "umount" => Ok(String::new()),
                "rm" => Err(RunnerError::ExitStatus {
                    code: 1,
                    stderr: "rm: device busy".to_string(),
                }),
                other => panic!("unexpected command: {other}"),
            });

        let manager = MountManager::new(Arc::new(runner));
        match manager.unmount_client("/mnt/nfs_share") {
            Err(MountError::Cleanup { source, .. }) => {
                assert!(source.to_string().contains("device busy"));
            }
            other => panic!("expected cleanup failure, got {other:?}"),
        }
    }
}
