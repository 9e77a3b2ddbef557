pub mod exports;
pub mod mounts;
pub mod provision;
pub mod runner;

pub use exports::ExportManager;
pub use mounts::MountManager;
pub use provision::ProvisionManager;
pub use runner::{CommandRequest, CommandRunner, SystemRunner};
