use ddash_core::error::Error;
use ddash_core::Settings;

use std::path::PathBuf;

// Environment variables are process-wide, so every case lives in this
// single test.
#[test]
fn settings_are_read_from_the_environment() {
    std::env::remove_var("DATABASE_URL");
    assert!(matches!(
        Settings::from_env(),
        Err(Error::MissingSetting("DATABASE_URL"))
    ));

    std::env::set_var("DATABASE_URL", "/var/lib/ddash/ddash.sqlite3");
    std::env::remove_var("DDASH_MEDIA_ROOT");
    std::env::remove_var("DDASH_POOL_SIZE");
    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.database_url, "/var/lib/ddash/ddash.sqlite3");
    assert_eq!(settings.media_root, PathBuf::from("media"));
    assert_eq!(settings.pool_size, 8);

    std::env::set_var("DDASH_MEDIA_ROOT", "/var/lib/ddash/media");
    std::env::set_var("DDASH_POOL_SIZE", "16");
    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.media_root, PathBuf::from("/var/lib/ddash/media"));
    assert_eq!(settings.pool_size, 16);

    std::env::set_var("DDASH_POOL_SIZE", "sixteen");
    match Settings::from_env() {
        Err(Error::InvalidSetting { name, value }) => {
            assert_eq!(name, "DDASH_POOL_SIZE");
            assert_eq!(value, "sixteen");
        }
        other => panic!("unexpected {:?}", other.map(|settings| settings.pool_size)),
    }
}
