use dragon_settings::{schema, NamingConvention, Settings};

#[derive(Debug, Default)]
struct ServiceSettings {
    name: String,
    endpoints: Vec<String>,
    some_api_key: String,
    max_retry_count: u32,
    verbose: bool,
}

schema!(ServiceSettings {
    "Name" at "service.name" => name,
    "Endpoints" at "service.endpoints" => endpoints,
    "SomeApiKey" => some_api_key,
    "MaxRetryCount" => max_retry_count,
    "Verbose" => verbose,
});

fn main() -> Result<(), dragon_settings::ConfigError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Try: DEMO_MAX_RETRY_COUNT=10 DEMO_VERBOSE=true cargo run --example settings
    let settings: ServiceSettings = Settings::builder()
        .with_json("demos/settings.json")
        .with_path_mapping(NamingConvention::CamelCase)
        .with_env_prefix("DEMO_")
        .with_tracing()
        .resolve()?;

    println!("Service: {} -> {:?}", settings.name, settings.endpoints);
    println!(
        "Retries: {} (verbose={}, api key set: {})",
        settings.max_retry_count,
        settings.verbose,
        !settings.some_api_key.is_empty()
    );

    Ok(())
}
