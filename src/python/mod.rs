pub mod env;
pub mod executor;
pub mod installer;
pub mod requirement;

pub use env::{venv_command, GhostEnv, Teardown, VenvLayout};
pub use executor::VenvExecutor;
pub use installer::{parse_package_list, resolve_requested, InstallTarget, InstalledPackage, Installer};
pub use requirement::{normalize_name, requirement_name};
