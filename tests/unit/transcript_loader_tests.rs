/*!
 * Tests for loading transcripts from files, payloads and documents
 */

use serde_json::json;

use captionflow::transcript::TranscriptSource;
use captionflow::{load_transcription, RequestedFormat, TranscriptError, TranscriptFormat, TranscriptLoader};

use crate::common::{assert_well_formed, create_temp_dir, create_test_file, create_test_srt, sample_document, word_texts};

#[test]
fn test_load_recognizerPayload_shouldKeepWordTiming() {
    let payload = json!({"segments": [{"start": 0, "end": 1, "words": [
        {"word": "Hello", "start": 0, "end": 0.5},
        {"word": "world", "start": 0.5, "end": 1.0}
    ]}]});

    let document = load_transcription(payload, RequestedFormat::Auto).unwrap();

    assert_eq!(word_texts(&document), ["Hello", "world"]);
    assert_eq!(document.words().next().unwrap().time().start(), 0.0);
    assert_eq!(document.words().last().unwrap().time().end(), 1.0);
}

#[test]
fn test_load_srtFile_withSingleWordCue_shouldSpanCue() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(dir.path(), "single.srt", "1\n00:00:01,000 --> 00:00:02,000\nHello\n").unwrap();

    let document = TranscriptLoader::load(path, RequestedFormat::Auto).unwrap();

    let word = document.words().next().unwrap();
    assert_eq!(document.word_count(), 1);
    assert_eq!(word.text(), "Hello");
    assert_eq!(word.time().start(), 1.0);
    assert_eq!(word.time().end(), 2.0);
}

#[test]
fn test_load_srtFile_withThreeWords_shouldIncreaseEndTimes() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(dir.path(), "three.srt", "1\n00:00:00,000 --> 00:00:02,000\nHi there friend\n").unwrap();

    let document = TranscriptLoader::load(path.as_path(), RequestedFormat::Auto).unwrap();
    let words: Vec<_> = document.words().collect();

    assert_eq!(words.len(), 3);
    assert_eq!(words[0].time().start(), 0.0);
    assert_eq!(words[2].time().end(), 2.0);
    assert!(words[0].time().end() < words[1].time().end());
    assert!(words[1].time().end() < words[2].time().end());
}

#[test]
fn test_load_vttFile_withInlineTags_shouldAnchorWords() {
    let dir = create_temp_dir().unwrap();
    let content = "WEBVTT\n\n00:00:00.000 --> 00:00:02.000\n<00:00:00.200>Hello <00:00:01.200>world\n";
    let path = create_test_file(dir.path(), "karaoke.vtt", content).unwrap();

    let document = TranscriptLoader::load(path, RequestedFormat::Auto).unwrap();
    let words: Vec<_> = document.words().collect();

    assert!((words[0].time().start() - 0.2).abs() < 1e-9);
    assert!((words[1].time().start() - 1.2).abs() < 1e-9);
    assert_eq!(words[1].time().end(), 2.0);
}

#[test]
fn test_load_withUppercaseExtension_shouldDetectSubtitleFormat() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_srt(dir.path(), "episode.SRT").unwrap();

    let document = TranscriptLoader::load(path, RequestedFormat::Auto).unwrap();

    assert_eq!(document.segments().len(), 3);
    assert_eq!(document.words().next().unwrap().text(), "This");
    assert_well_formed(&document);
}

#[test]
fn test_load_jsonFileWithoutExtension_shouldSniffContent() {
    let dir = create_temp_dir().unwrap();
    let content = r#"{"segments": [{"lines": [{"words": [{"text": "sniffed", "time": {"start": 0, "end": 1}}]}]}]}"#;
    let path = create_test_file(dir.path(), "transcript", content).unwrap();

    let document = TranscriptLoader::load(path, RequestedFormat::Auto).unwrap();

    assert_eq!(word_texts(&document), ["sniffed"]);
}

#[test]
fn test_load_explicitSrtOnTxtFile_shouldParseCues() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_srt(dir.path(), "subtitles.txt").unwrap();

    let document = TranscriptLoader::load(path, TranscriptFormat::Srt.into()).unwrap();

    assert_eq!(document.segments().len(), 3);
}

#[test]
fn test_loadNamed_explicitNativeOnRecognizerShape_shouldUseNativeParser() {
    let dir = create_temp_dir().unwrap();
    let content = r#"{"segments": [{"words": [{"word": "forced", "start": 0.0, "end": 0.5}]}]}"#;
    let path = create_test_file(dir.path(), "words.json", content).unwrap();

    let document = TranscriptLoader::load_named(path, "native_json").unwrap();

    assert_eq!(word_texts(&document), ["forced"]);
}

#[test]
fn test_load_withInvalidJson_shouldFailWithParseError() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(dir.path(), "broken.json", "{\"segments\": [").unwrap();

    let err = TranscriptLoader::load(path, RequestedFormat::Auto).unwrap_err();

    assert!(matches!(err, TranscriptError::ParseError(_)));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_load_withMalformedTimingLine_shouldFailWithParseError() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(dir.path(), "bad.srt", "1\n00:00:01,000 -> 00:00:02,000\n\n2\n00:0a:01,000 --> 00:00:02,000\nHi\n").unwrap();

    let err = TranscriptLoader::load(path, RequestedFormat::Auto).unwrap_err();

    assert!(matches!(err, TranscriptError::ParseError(_)));
    assert!(err.to_string().contains("00:0a:01,000"));
}

#[test]
fn test_load_withInvalidFormatName_shouldListValidFormats() {
    let err = TranscriptLoader::load_named(sample_document(&["x"]), "invalid").unwrap_err();

    match err {
        TranscriptError::UnsupportedFormat { value, expected } => {
            assert_eq!(value, "invalid");
            for name in ["auto", "recognizer_json", "native_json", "srt", "vtt"] {
                assert!(expected.contains(name), "missing {}", name);
            }
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_load_payloadWithoutSegments_shouldFailWithInvalidShape() {
    let err = TranscriptLoader::load(json!({"text": "no segments"}), RequestedFormat::Auto).unwrap_err();

    assert!(matches!(err, TranscriptError::InvalidShape(_)));
}

#[test]
fn test_load_explicitVttPayload_shouldRejectInput() {
    let err = TranscriptLoader::load(TranscriptSource::Payload(json!({"segments": []})), TranscriptFormat::Vtt.into()).unwrap_err();

    assert!(matches!(err, TranscriptError::InvalidInput(_)));
}

#[test]
fn test_load_document_shouldReturnNormalizedCopy() {
    let document = sample_document(&["kept", "as", "is"]);

    let loaded = TranscriptLoader::load(document.clone(), RequestedFormat::Auto).unwrap();

    assert_eq!(loaded, document);
}
