//! Typed settings resolved from a JSON file and environment variables.

mod builder;
mod deserialize;
mod diagnostics;
mod env;
mod error;
mod file;
mod member;
mod naming;
mod normalize;
mod path;

pub use builder::Settings;
pub use deserialize::{from_flat, from_paths, JsonMapping};
pub use diagnostics::{Diagnostics, NoopDiagnostics, TracingDiagnostics};
pub use env::{apply_environment, Environment, DEFAULT_ENV_PREFIX};
pub use error::ConfigError;
pub use file::{load_json, DEFAULT_JSON_FILE};
pub use member::{snapshot, Kind, Member, MemberTable, Schema, Shape, Shaped};
pub use naming::{screaming_snake_to_upper_camel, NamingConvention};
pub use normalize::normalize;
pub use path::{resolve, PathExpression};
