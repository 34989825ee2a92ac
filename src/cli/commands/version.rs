use crate::core::error::Result;

pub fn version_line() -> String {
    format!("👻 ghostenv version {}", env!("CARGO_PKG_VERSION"))
}

pub fn execute() -> Result<()> {
    println!("{}", version_line());
    Ok(())
}
