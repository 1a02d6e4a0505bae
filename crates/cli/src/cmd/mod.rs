mod filter;
mod update;
mod verify;

pub use filter::cmd_filter;
pub use update::cmd_update;
pub use verify::cmd_verify;
