//! Configuration system for the Warden authenticating proxy.
//!
//! Turns loosely-typed deployment settings into a validated, immutable
//! runtime configuration:
//! - [`RawConfiguration`] holds every setting as loaded (TOML file, env, flags)
//! - [`validate`] converts it into a [`ValidatedConfiguration`] with pre-parsed
//!   URLs and compiled skip-auth patterns, collecting every [`ConfigError`]
//! - [`load_config`] discovers the config file (explicit, project-local, XDG)

pub mod discovery;
pub mod error;
pub mod types;
pub mod validate;

pub use discovery::{LoadedConfig, load_config, load_config_file, xdg_config_dir, xdg_config_path};
pub use error::{ConfigError, InvalidConfiguration, LoadError, Result};
pub use types::{DEFAULT_COOKIE_EXPIRE_SECS, DEFAULT_HTTP_ADDRESS, ProviderKind, RawConfiguration};
pub use validate::{ValidatedConfiguration, validate};
