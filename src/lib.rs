pub mod config;

pub use config::{
    ConfigError, Diagnostics, Environment, NamingConvention, Schema, Settings, TracingDiagnostics,
};
