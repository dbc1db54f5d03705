use file_organizer::config::types::LogLevel;
use file_organizer::OrganizerError;
use std::str::FromStr;

#[test]
fn parse_levels_case_insensitive() {
    assert_eq!(LogLevel::parse("debug"), Some(LogLevel::Debug));
    assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
    assert_eq!(LogLevel::parse("Info"), Some(LogLevel::Info));
    assert_eq!(LogLevel::parse("WARNING"), Some(LogLevel::Warning));
    assert_eq!(LogLevel::parse("warn"), Some(LogLevel::Warning));
    assert_eq!(LogLevel::parse(" error "), Some(LogLevel::Error));
}

#[test]
fn display_roundtrips_with_fromstr() {
    for lvl in [LogLevel::Debug, LogLevel::Info, LogLevel::Warning, LogLevel::Error] {
        let s = lvl.to_string();
        assert_eq!(LogLevel::from_str(&s).unwrap(), lvl, "roundtrip failed for {s}");
    }
}

#[test]
fn unknown_levels_are_config_errors() {
    for bad in ["trace", "quiet", "", "verbose"] {
        let err = LogLevel::from_str(bad).unwrap_err();
        assert!(matches!(err, OrganizerError::InvalidLogLevel(_)));
        assert!(err.is_config_error());
    }
}
