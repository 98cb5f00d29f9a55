//! Response envelope extraction.

use serde_json::json;

use discord_formatter::envelope::{EnvelopeFormat, GeminiEnvelope, GEMINI_TEXT_POINTER};
use discord_formatter::FailureKind;

fn gemini_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"parts": [{"text": text}], "role": "model"},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 120}
    })
    .to_string()
}

#[test]
fn gemini_extracts_first_candidate_text() {
    let text = EnvelopeFormat::Gemini
        .extract_text(&gemini_body("> quoted"))
        .expect("should extract");
    assert_eq!(text, "> quoted");
}

#[test]
fn gemini_ignores_later_candidates_and_parts() {
    let body = json!({
        "candidates": [
            {"content": {"parts": [{"text": "first"}, {"text": "second"}]}},
            {"content": {"parts": [{"text": "other"}]}}
        ]
    })
    .to_string();
    let text = EnvelopeFormat::Gemini.extract_text(&body).expect("should extract");
    assert_eq!(text, "first");
}

#[test]
fn gemini_reports_each_missing_segment() {
    let cases = [
        (json!({}), "no candidates"),
        (json!({"candidates": []}), "no candidates"),
        (json!({"candidates": [{}]}), "candidate has no content"),
        (json!({"candidates": [{"content": {"parts": []}}]}), "candidate has no parts"),
        (json!({"candidates": [{"content": {"parts": [{}]}}]}), "first part has no text"),
        (
            json!({"candidates": [{"content": {"parts": [{"text": ""}]}}]}),
            "first part text is empty",
        ),
    ];

    for (body, reason) in cases {
        let err = EnvelopeFormat::Gemini
            .extract_text(&body.to_string())
            .expect_err("should be malformed");
        assert_eq!(err.kind(), FailureKind::MalformedResponse);
        assert!(err.to_string().contains(reason), "{err} should mention {reason}");
    }
}

#[test]
fn first_text_on_typed_envelope() {
    let envelope: GeminiEnvelope =
        serde_json::from_str(&gemini_body("ok")).expect("should deserialize");
    assert_eq!(envelope.first_text(), Ok("ok".to_owned()));
    assert_eq!(GeminiEnvelope::default().first_text(), Err("no candidates"));
}

#[test]
fn pointer_rejects_missing_and_non_string_targets() {
    let envelope = EnvelopeFormat::Pointer("/result".to_owned());

    let missing = envelope.extract_text("{}").expect_err("missing");
    assert!(missing.to_string().contains("/result not found"));

    let number = envelope.extract_text(r#"{"result": 3}"#).expect_err("number");
    assert!(number.to_string().contains("not a string"));

    let empty = envelope.extract_text(r#"{"result": ""}"#).expect_err("empty");
    assert!(empty.to_string().contains("is empty"));
}

#[test]
fn default_envelope_is_gemini() {
    assert_eq!(EnvelopeFormat::default(), EnvelopeFormat::Gemini);
    let text = EnvelopeFormat::Pointer(GEMINI_TEXT_POINTER.to_owned())
        .extract_text(&gemini_body("same"))
        .expect("should extract");
    assert_eq!(text, "same");
}

#[test]
fn wrongly_typed_segment_is_a_shape_error_not_invalid_json() {
    for body in [
        json!({"candidates": null}),
        json!({"candidates": [{"content": {"parts": [{"text": 5}]}}]}),
        json!({"candidates": [{"content": {"parts": "text"}}]}),
    ] {
        let err = EnvelopeFormat::Gemini
            .extract_text(&body.to_string())
            .expect_err("wrong types should be malformed");
        assert_eq!(err.kind(), FailureKind::MalformedResponse);
        let message = err.to_string();
        assert!(message.contains("unexpected envelope shape"), "{message}");
        assert!(!message.contains("invalid JSON"), "{message}");
    }
}
