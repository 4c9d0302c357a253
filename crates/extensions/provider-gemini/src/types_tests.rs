use super::*;

#[test]
fn test_request_wire_shape() {
    let request = GenerateContentRequest::from_prompt("Hello")
        .with_system_instruction("Be concise.");
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["contents"][0]["parts"][0]["text"], "Hello");
    assert!(json["contents"][0].get("role").is_none());
    assert_eq!(
        json["config"]["systemInstruction"]["parts"][0]["text"],
        "Be concise."
    );
}

#[test]
fn test_request_without_instruction_omits_config() {
    let json = serde_json::to_value(GenerateContentRequest::from_prompt("x")).unwrap();
    assert!(json.get("config").is_none());
}

#[test]
fn test_first_text() {
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"Hello"}]}}]}"#;
    let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
    assert_eq!(response.first_text(), Some("Hello"));
}

#[test]
fn test_first_text_keeps_whitespace() {
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"  * a\n* b\n"}]}}]}"#;
    let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
    assert_eq!(response.first_text(), Some("  * a\n* b\n"));
}

#[test]
fn test_first_text_missing_candidates() {
    let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
    assert_eq!(response.first_text(), None);
}

#[test]
fn test_first_text_missing_content() {
    let body = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
    let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
    assert_eq!(response.candidates[0].finish_reason.as_deref(), Some("SAFETY"));
    assert_eq!(response.first_text(), None);
}

#[test]
fn test_first_text_empty_parts() {
    let body = r#"{"candidates":[{"content":{"role":"model","parts":[]}}]}"#;
    let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
    assert_eq!(response.first_text(), None);
}

#[test]
fn test_error_body() {
    let body = r#"{"error":{"code":429,"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
    let error: GeminiError = serde_json::from_str(body).unwrap();
    assert_eq!(error.error.code, Some(429));
    assert_eq!(error.error.message_or_default(), "quota exceeded");
}

#[test]
fn test_error_without_message() {
    let error: GeminiError = serde_json::from_str(r#"{"error":{}}"#).unwrap();
    assert_eq!(error.error.message_or_default(), "Gemini API Error");
}

#[test]
fn test_usage_metadata() {
    let body = r#"{"candidates":[],"usageMetadata":{"promptTokenCount":5,"totalTokenCount":9}}"#;
    let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
    let usage = response.usage_metadata.unwrap();
    assert_eq!(usage.prompt_token_count, 5);
    assert_eq!(usage.candidates_token_count, 0);
    assert_eq!(usage.total_token_count, 9);
}
