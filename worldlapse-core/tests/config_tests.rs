//! Integration tests for the configuration system

use tempfile::TempDir;
use worldlapse_core::config::{
    sample_config, CaptureConfig, ConfigFile, FeedbackMode, ImageFormat, NamingPolicy, SizingMode,
};

#[test]
fn test_image_format_from_string() {
    assert_eq!("jpeg".parse::<ImageFormat>().ok(), Some(ImageFormat::Jpeg));
    assert_eq!("jpg".parse::<ImageFormat>().ok(), Some(ImageFormat::Jpeg));
    assert_eq!("png".parse::<ImageFormat>().ok(), Some(ImageFormat::Png));
    assert!("webp".parse::<ImageFormat>().is_err());
}

#[test]
fn test_image_format_extension() {
    assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
    assert_eq!(ImageFormat::Png.extension(), "png");
}

#[test]
fn test_feedback_mode_from_string() {
    assert_eq!(
        "none".parse::<FeedbackMode>().ok(),
        Some(FeedbackMode::None)
    );
    assert_eq!(
        "toast".parse::<FeedbackMode>().ok(),
        Some(FeedbackMode::Toast)
    );
    assert_eq!(
        "modal".parse::<FeedbackMode>().ok(),
        Some(FeedbackMode::Modal)
    );
    assert!("banner".parse::<FeedbackMode>().is_err());
}

#[test]
fn test_naming_policy_from_string() {
    assert_eq!(
        "datetime".parse::<NamingPolicy>().ok(),
        Some(NamingPolicy::DateTime)
    );
    assert_eq!(
        "numbered".parse::<NamingPolicy>().ok(),
        Some(NamingPolicy::Numbered)
    );
    assert_eq!(
        "datetime_with_numbered_copy".parse::<NamingPolicy>().ok(),
        Some(NamingPolicy::DateTimeWithNumberedCopy)
    );
    assert!("random".parse::<NamingPolicy>().is_err());
}

#[test]
fn test_capture_config_builder() {
    let config = CaptureConfig::with_export_root("/tmp/captures")
        .with_interval(12)
        .with_time_of_day(6)
        .with_format(ImageFormat::Png)
        .with_naming(NamingPolicy::Numbered)
        .with_smoothing_steps(5);

    assert_eq!(config.interval, 12);
    assert_eq!(config.time_of_day, 6);
    assert_eq!(config.format, ImageFormat::Png);
    assert_eq!(config.naming, NamingPolicy::Numbered);
    assert_eq!(config.smoothing_steps, 5);
    assert_eq!(config.export_path.to_str(), Some("/tmp/captures"));
}

#[test]
fn test_default_config_validates() {
    let config = CaptureConfig::default();
    assert!(config.validate_strict().is_ok());
    assert!(config.validate().is_empty());
}

#[test]
fn test_validate_strict_rejects_broken_configs() {
    assert!(CaptureConfig::default()
        .with_interval(0)
        .validate_strict()
        .is_err());
    assert!(CaptureConfig::default()
        .with_time_of_day(24)
        .validate_strict()
        .is_err());
    assert!(CaptureConfig::default()
        .with_quality(0)
        .validate_strict()
        .is_err());
    assert!(CaptureConfig::default()
        .with_sizing(SizingMode::FixedHeight { height: 0 })
        .validate_strict()
        .is_err());
}

#[test]
fn test_validate_warns_on_questionable_settings() {
    let warnings = CaptureConfig::default().with_quality(20).validate();
    assert!(warnings.iter().any(|w| w.contains("quality")));

    let warnings = CaptureConfig::default().with_interval(500).validate();
    assert!(!warnings.is_empty());
}

#[test]
fn test_config_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut file = ConfigFile::default();
    file.schedule.interval = 6;
    file.render.smoothing_steps = 10;
    file.image.format = "png".to_string();
    file.save_to(path.clone()).unwrap();

    let loaded = ConfigFile::load_from(path).unwrap();
    assert_eq!(loaded.schedule.interval, 6);
    assert_eq!(loaded.render.smoothing_steps, 10);
    assert_eq!(loaded.image.format, "png");
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = ConfigFile::load_from(dir.path().join("absent.toml")).unwrap();
    assert_eq!(loaded.schedule.interval, 24);
}

#[test]
fn test_sample_config_resolves_to_defaults() {
    let file: ConfigFile = toml::from_str(&sample_config()).unwrap();
    let config = file.to_capture_config();

    let defaults = CaptureConfig::default();
    assert_eq!(config.interval, defaults.interval);
    assert_eq!(config.time_of_day, defaults.time_of_day);
    assert_eq!(config.format, defaults.format);
    assert_eq!(config.naming, defaults.naming);
    assert_eq!(config.sizing, defaults.sizing);
}

#[test]
fn test_partial_config_file_fills_defaults() {
    let file: ConfigFile = toml::from_str(
        r#"
        [schedule]
        interval = 48
        "#,
    )
    .unwrap();

    assert_eq!(file.schedule.interval, 48);
    assert_eq!(file.schedule.time_of_day, 8);
    assert_eq!(file.image.quality, 93);
    assert_eq!(file.export.naming, "datetime");
}
