/// OS integration points and export option defaults
///
/// All of these can be overridden in ~/.config/nfs-tui/config.toml.

pub const EXPORTS_FILE: &str = "/etc/exports";
pub const SERVER_SCRIPT: &str = "./bash/nfs_server.sh";
pub const CLIENT_SCRIPT: &str = "./bash/nfs_client.sh";
pub const ELEVATION_CMD: &str = "sudo";

/// Defaults applied to blank server-config fields.
pub const DEFAULT_CLIENT_SPEC: &str = "*";
pub const DEFAULT_ACCESS_MODE: &str = "rw";
pub const DEFAULT_SYNC_MODE: &str = "sync";
pub const DEFAULT_SUBTREE_OPTION: &str = "no_subtree_check";
