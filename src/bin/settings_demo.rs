use eventboard::settings::*;

fn main() {
    // Load settings from the default location
    let project_settings = parse_settings(None).unwrap();
    println!("Loaded settings: {:?}", project_settings);
    println!(
        "Request timeout: {:?}, refresh timeout: {:?}",
        project_settings.api.request_timeout(),
        project_settings.api.refresh_timeout()
    );

    // Attempt to load from an invalid path (expected to fail)
    let is_err = parse_settings(Some("")).is_err();
    println!("Error on invalid path: {:?}", is_err);

    // Environment overrides win over the file:
    // $ EVENTBOARD_API__BASE_URL=http://localhost:9000/api/v1 cargo run --bin settings_demo
    // Attempt to load from a custom path
    // $ cargo run --bin settings_demo -- --settings=settings/release.toml
    let cli = Cli::parse();
    let project_settings = parse_settings(cli.settings.as_deref()).unwrap();
    println!("Loaded settings: {:?}", project_settings);
}
