pub mod global;
pub mod schema;
pub mod validation;

pub use global::GlobalConfigManager;
pub use schema::{
    GlobalConfig, InstallConfig, InstallerKind, PythonConfig, SessionConfig, VenvBackend,
    DEFAULT_SCRIPT_NAME, TEMP_DIR_PREFIX,
};
pub use validation::{validate_global_config, validate_packages, validate_script_name};
