//! ghostenv: throwaway Python virtual environments.
//!
//! `ghostenv run` creates a temp directory, builds a virtual environment in
//! it, installs the requested packages, then hands the terminal to a REPL, a
//! script or an editor. The directory is deleted afterwards unless kept.

pub mod cli;
pub mod config;
pub mod core;
pub mod ide;
pub mod python;
pub mod template;
