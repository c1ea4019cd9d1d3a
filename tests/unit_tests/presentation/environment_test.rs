use truthbot::presentation::Environment;

#[test]
fn given_known_names_when_parsing_then_maps_to_environment() {
    assert_eq!("local".parse::<Environment>(), Ok(Environment::Local));
    assert_eq!("Development".parse::<Environment>(), Ok(Environment::Local));
    assert_eq!("TEST".parse::<Environment>(), Ok(Environment::Test));
    assert_eq!(" production ".parse::<Environment>(), Ok(Environment::Prod));
    assert_eq!("prod".parse::<Environment>(), Ok(Environment::Prod));
}

#[test]
fn given_unknown_name_when_parsing_then_returns_error() {
    let result = "staging".parse::<Environment>();
    assert!(result.unwrap_err().contains("staging"));
}

#[test]
fn given_environment_when_reading_suffix_then_matches_settings_file_name() {
    assert_eq!(Environment::Local.config_suffix(), "local");
    assert_eq!(Environment::Test.config_suffix(), "test");
    assert_eq!(Environment::Prod.config_suffix(), "prod");
}

#[test]
fn given_default_when_created_then_is_local() {
    assert_eq!(Environment::default(), Environment::Local);
    assert_eq!(Environment::default().to_string(), "Local");
}
