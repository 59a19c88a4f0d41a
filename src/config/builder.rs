use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::deserialize::JsonMapping;
use super::diagnostics::{Diagnostics, NoopDiagnostics, TracingDiagnostics};
use super::env::{apply_environment, Environment, DEFAULT_ENV_PREFIX};
use super::file::{load_json, DEFAULT_JSON_FILE};
use super::member::Schema;
use super::naming::NamingConvention;
use super::ConfigError;

/// Describes where settings come from and resolves them into a typed value.
///
/// Settings are loaded from an optional JSON file, then overridden by
/// environment variables carrying a prefix. Environment variable names are
/// converted from `SCREAMING_SNAKE_CASE` to `UpperCamelCase` after the prefix
/// is stripped, and matched against the member names of the target
/// [`Schema`].
///
/// - A JSON file that cannot be read is logged at debug level and the
///   settings start from `T::default()`.
/// - A JSON file that cannot be parsed is an error.
/// - Environment values win over JSON values.
///
/// ## Example
///
/// ```no_run
/// use dragon_settings::{schema, Settings};
///
/// #[derive(Debug, Default)]
/// struct MySettings {
///     some_api_key: String,
///     some_other_api_key: String,
///     max_retry_count: u32,
/// }
///
/// schema!(MySettings {
///     "SomeApiKey" => some_api_key,
///     "SomeOtherApiKey" => some_other_api_key,
///     "MaxRetryCount" => max_retry_count,
/// });
///
/// // With FOO_SOME_API_KEY=api-key-from-env and FOO_MAX_RETRY_COUNT=10
/// let settings: MySettings = Settings::builder()
///     .with_json("settings.json")
///     .with_env_prefix("FOO_")
///     .resolve()?;
/// # Ok::<(), dragon_settings::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use = "settings do nothing until .resolve() is called"]
pub struct Settings {
    json: Option<PathBuf>,
    mapping: JsonMapping,
    env_prefix: Option<String>,
    environment: Option<Environment>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            json: None,
            mapping: JsonMapping::default(),
            env_prefix: None,
            environment: None,
            diagnostics: Arc::new(NoopDiagnostics),
        }
    }
}

impl Settings {
    /// Creates a settings description with no sources.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Loads base values from the JSON file at `path`.
    pub fn with_json(mut self, path: impl AsRef<Path>) -> Self {
        self.json = Some(path.as_ref().to_path_buf());
        self
    }

    /// Loads base values from [`DEFAULT_JSON_FILE`] in the working directory.
    pub fn with_default_json(self) -> Self {
        self.with_json(DEFAULT_JSON_FILE)
    }

    /// Reads the JSON file through dotted member paths instead of flat keys.
    ///
    /// Member names and path annotations are cased by `naming` before lookup.
    pub fn with_path_mapping(mut self, naming: NamingConvention) -> Self {
        self.mapping = JsonMapping::Paths(naming);
        self
    }

    /// Overrides values from environment variables starting with `prefix`.
    ///
    /// With the prefix `FOO_`, the variable `FOO_HELLO_WORLD` sets the member
    /// named `HelloWorld`.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Overrides values from environment variables starting with
    /// [`DEFAULT_ENV_PREFIX`].
    pub fn with_default_env_prefix(self) -> Self {
        self.with_env_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Uses `environment` instead of capturing the process environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sends diagnostic messages to `diagnostics`.
    pub fn with_diagnostics(mut self, diagnostics: impl Diagnostics + 'static) -> Self {
        self.diagnostics = Arc::new(diagnostics);
        self
    }

    /// Sends diagnostic messages to `tracing`.
    pub fn with_tracing(self) -> Self {
        self.with_diagnostics(TracingDiagnostics)
    }

    /// Loads, merges and returns a fresh `T`.
    ///
    /// Nothing is cached: every call reads the file and environment again.
    pub fn resolve<T: Schema>(&self) -> Result<T, ConfigError> {
        let diagnostics = self.diagnostics.as_ref();

        if self.json.is_none() && self.env_prefix.is_none() {
            diagnostics.warn(&format!(
                "no JSON file or environment prefix configured; using default {}",
                std::any::type_name::<T>()
            ));
        }

        let mut settings = self.load_base::<T>()?;

        if let Some(prefix) = &self.env_prefix {
            let captured;
            let environment = match &self.environment {
                Some(environment) => environment,
                None => {
                    captured = Environment::capture();
                    &captured
                }
            };
            apply_environment(&mut settings, prefix, environment, diagnostics)?;
        }

        Ok(settings)
    }

    fn load_base<T: Schema>(&self) -> Result<T, ConfigError> {
        let Some(path) = &self.json else {
            return Ok(T::default());
        };
        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidArgument(
                "JSON settings path must not be empty".into(),
            ));
        }

        match load_json(path) {
            Ok(tree) => self.mapping.deserialize(&tree),
            Err(e @ ConfigError::SourceUnavailable { .. }) => {
                self.diagnostics.debug(&e.to_string());
                Ok(T::default())
            }
            Err(e) => Err(e),
        }
    }
}
