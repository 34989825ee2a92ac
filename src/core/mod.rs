pub mod error;
pub mod fs;
pub mod path;
pub mod process;
pub mod progress;

pub use error::{GhostEnvError, Result};
pub use fs::{ensure_dir_exists, require_file, write_file};
pub use path::{expand_home, resolve_path};
pub use process::{interruptible, ProcessExecutor};
pub use progress::spinner;
