pub const APP_NAME: &str = "arkhash";

/// Advisory lock file kept next to the hash lists of a target directory.
pub const LOCK_FILENAME: &str = ".arkhash.lock";

pub const READ_BUFFER_SIZE: usize = 8192;
