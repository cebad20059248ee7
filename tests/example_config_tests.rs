use fuelwatch::infrastructure::config::Config;

#[test]
fn shipped_example_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.toml");
    let config = Config::load(path).unwrap();

    assert_eq!(config.poll.interval_secs, 60);
    assert_eq!(config.directory.database_url, "fuelwatch.db");
}
