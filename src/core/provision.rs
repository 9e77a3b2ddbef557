/// Server and client provisioning via the external shell scripts
///
/// The scripts own the actual NFS setup (package checks, exports entry,
/// mount invocation) and elevate internally; this module only validates
/// input, applies defaults and passes the values positionally.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::core::runner::{CommandRequest, CommandRunner, RunnerError};
use crate::utils::constants::{
    DEFAULT_ACCESS_MODE, DEFAULT_CLIENT_SPEC, DEFAULT_SUBTREE_OPTION, DEFAULT_SYNC_MODE,
};

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Script(RunnerError),
}

#[derive(Clone)]
pub struct ProvisionManager {
    runner: Arc<dyn CommandRunner>,
    server_script: String,
    client_script: String,
}

impl ProvisionManager {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        server_script: impl Into<String>,
        client_script: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            server_script: server_script.into(),
            client_script: client_script.into(),
        }
    }

    /// Appends or updates an export entry via the server provisioning
    /// script. Blank optional fields fall back to the documented defaults.
    pub fn setup_server(
        &self,
        export_path: &str,
        client_spec: &str,
        access_mode: &str,
        sync_mode: &str,
        subtree_option: &str,
    ) -> Result<String, ProvisionError> {
        let export_path = export_path.trim();
        if export_path.is_empty() {
            return Err(ProvisionError::Validation(
                "Export path cannot be empty.".to_string(),
            ));
        }

        let request = CommandRequest::new(&self.server_script)
            .arg(export_path)
            .arg(or_default(client_spec, DEFAULT_CLIENT_SPEC))
            .arg(or_default(access_mode, DEFAULT_ACCESS_MODE))
            .arg(or_default(sync_mode, DEFAULT_SYNC_MODE))
            .arg(or_default(subtree_option, DEFAULT_SUBTREE_OPTION));

        info!(%export_path, "provisioning NFS server export");
        self.runner.run(&request).map_err(ProvisionError::Script)
    }

    /// Mounts a remote share via the client script.
    pub fn mount_share(
        &self,
        server_addr: &str,
        export_path: &str,
        mount_point: &str,
    ) -> Result<String, ProvisionError> {
        let server_addr = server_addr.trim();
        let export_path = export_path.trim();
        let mount_point = mount_point.trim();
        if server_addr.is_empty() || export_path.is_empty() || mount_point.is_empty() {
            return Err(ProvisionError::Validation(
                "All fields are required.".to_string(),
            ));
        }

        let request = CommandRequest::new(&self.client_script)
            .arg(server_addr)
            .arg(export_path)
            .arg(mount_point);

        info!(%server_addr, %export_path, %mount_point, "mounting NFS share");
        self.runner.run(&request).map_err(ProvisionError::Script)
    }
}

fn or_default(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::runner::MockCommandRunner;
    use crate::utils::constants::{CLIENT_SCRIPT, SERVER_SCRIPT};

    fn manager(runner: MockCommandRunner) -> ProvisionManager {
        ProvisionManager::new(Arc::new(runner), SERVER_SCRIPT, CLIENT_SCRIPT)
    }

    #[test]
    fn setup_server_applies_defaults_for_blank_fields() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|req| {
                req.program == SERVER_SCRIPT
                    && req.args == ["/srv/nfs", "*", "rw", "sync", "no_subtree_check"]
            })
            .times(1)
            .returning(|_| Ok("export configured".to_string()));

        let output = manager(runner)
            .setup_server("/srv/nfs", "", "  ", "", "")
            .unwrap();
        assert_eq!(output, "export configured");
    }

    #[test]
    fn setup_server_passes_explicit_values_through() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|req| {
                req.args == ["/data", "10.0.0.0/24", "ro", "async", "subtree_check"]
            })
            .times(1)
            .returning(|_| Ok(String::new()));

        manager(runner)
            .setup_server("/data", "10.0.0.0/24", "ro", "async", "subtree_check")
            .unwrap();
    }

    #[test]
    fn setup_server_rejects_blank_export_path_without_running_anything() {
        match manager(MockCommandRunner::new()).setup_server("   ", "*", "rw", "sync", "") {
            Err(ProvisionError::Validation(msg)) => {
                assert!(msg.contains("Export path cannot be empty"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn mount_share_passes_values_positionally() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|req| {
                req.program == CLIENT_SCRIPT
                    && req.args == ["192.168.1.100", "/srv/nfs", "/mnt/nfs"]
            })
            .times(1)
            .returning(|_| Ok("mounted".to_string()));

        let output = manager(runner)
            .mount_share("192.168.1.100", "/srv/nfs", "/mnt/nfs")
            .unwrap();
        assert_eq!(output, "mounted");
    }

    #[test]
    fn mount_share_rejects_any_blank_field_without_running_anything() {
        match manager(MockCommandRunner::new()).mount_share("192.168.1.100", " ", "/mnt/nfs") {
            Err(ProvisionError::Validation(msg)) => {
                assert!(msg.contains("All fields are required"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn script_failure_surfaces_exit_code_and_stderr() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|_| {
            Err(RunnerError::ExitStatus {
                code: 2,
                stderr: "exportfs: /srv/nfs does not exist".to_string(),
            })
        });

        match manager(runner).setup_server("/srv/nfs", "", "", "", "") {
            Err(ProvisionError::Script(err)) => {
                let message = err.to_string();
                assert!(message.contains('2'));
                assert!(message.contains("does not exist"));
            }
            other => panic!("expected script error, got {other:?}"),
        }
    }
}
