/*!
 * Tests for configuration loading and validation
 */

use std::path::PathBuf;

use captionflow::transcript::TranscriptFormat;
use captionflow::{Config, LogLevel, MediaSettings, RequestedFormat, TranscriptSettings};

use crate::common::{create_temp_dir, create_test_file};

fn base_config() -> Config {
    Config {
        media: MediaSettings::new("talk.mp4", "talk_captioned.mp4"),
        ..Default::default()
    }
}

#[test]
fn test_fromFile_withFullConfig_shouldLoadAllSections() {
    let dir = create_temp_dir().unwrap();
    let content = r#"{
        "media": {"input_path": "talk.mp4", "output_path": "out/talk.mp4"},
        "transcript": {"path": "talk.srt", "format": "srt"},
        "log_level": "warn"
    }"#;
    let path = create_test_file(dir.path(), "config.json", content).unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.media.output_path, PathBuf::from("out/talk.mp4"));
    assert_eq!(config.transcript.path, Some(PathBuf::from("talk.srt")));
    assert_eq!(config.transcript.format, RequestedFormat::Explicit(TranscriptFormat::Srt));
    assert_eq!(config.log_level, LogLevel::Warn);
    assert!(config.validate().is_ok());
}

#[test]
fn test_fromFile_withMalformedJson_shouldNameTheFile() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(dir.path(), "broken_config.json", "{ media: ").unwrap();

    let err = Config::from_file(&path).unwrap_err();

    assert!(err.to_string().contains("broken_config.json"));
}

#[test]
fn test_validate_withFormatButNoTranscript_shouldFail() {
    let config = Config {
        transcript: TranscriptSettings {
            path: None,
            format: TranscriptFormat::Vtt.into(),
        },
        ..base_config()
    };

    let err = config.validate().unwrap_err();

    assert!(err.to_string().contains("vtt"));
}

#[test]
fn test_validate_withTranscriptAndSubtitleData_shouldFail() {
    let config = Config {
        transcript: TranscriptSettings {
            path: Some(PathBuf::from("talk.srt")),
            format: RequestedFormat::Auto,
        },
        subtitle_data_path: Some(PathBuf::from("talk.json")),
        ..base_config()
    };

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withSubtitleDataOnly_shouldPass() {
    let config = Config {
        subtitle_data_path: Some(PathBuf::from("talk.json")),
        ..base_config()
    };

    assert!(config.validate().is_ok());
}

#[test]
fn test_logLevel_shouldMapToFilter() {
    assert_eq!(LogLevel::Error.as_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::default().as_level_filter(), log::LevelFilter::Info);
    assert_eq!(LogLevel::Trace.as_level_filter(), log::LevelFilter::Trace);
}
