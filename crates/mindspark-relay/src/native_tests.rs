use super::*;
use crate::testing::{Behavior, StubClient};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::duplex;

fn frame(json: &str) -> Vec<u8> {
    let mut bytes = (json.len() as u32).to_le_bytes().to_vec();
    bytes.extend_from_slice(json.as_bytes());
    bytes
}

async fn run_host(behavior: Behavior, input: Vec<u8>) -> (Result<(), RelayError>, Vec<RelayResponse>) {
    let host = NativeHost::new(RelayService::new(Arc::new(StubClient::new(behavior))));
    let (mut input_tx, input_rx) = duplex(1 << 16);
    let (output_tx, mut output_rx) = duplex(1 << 16);

    input_tx.write_all(&input).await.unwrap();
    drop(input_tx);

    let result = host.run(input_rx, output_tx).await;

    let mut responses = Vec::new();
    while let Some(bytes) = read_frame(&mut output_rx).await.unwrap() {
        responses.push(serde_json::from_slice(&bytes).unwrap());
    }
    (result, responses)
}

#[tokio::test]
async fn test_read_frame_round_trip() {
    let (mut a, mut b) = duplex(1024);
    write_frame(&mut a, &serde_json::json!({"action": "CALL_MODEL"}))
        .await
        .unwrap();
    drop(a);

    let bytes = read_frame(&mut b).await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["action"], "CALL_MODEL");
    assert!(read_frame(&mut b).await.unwrap().is_none());
}

#[tokio::test]
async fn test_length_prefix_is_little_endian() {
    let (mut a, mut b) = duplex(1024);
    write_frame(&mut a, &"hi").await.unwrap();
    drop(a);

    let mut raw = Vec::new();
    b.read_to_end(&mut raw).await.unwrap();
    assert_eq!(&raw[..4], &[4, 0, 0, 0]);
    assert_eq!(&raw[4..], b"\"hi\"");
}

#[tokio::test]
async fn test_oversized_incoming_frame_rejected() {
    let (mut a, mut b) = duplex(1024);
    a.write_all(&((MAX_INCOMING_FRAME as u32) + 1).to_le_bytes())
        .await
        .unwrap();
    drop(a);

    let err = read_frame(&mut b).await.unwrap_err();
    assert!(matches!(err, RelayError::FrameTooLarge { .. }));
}

#[tokio::test]
async fn test_oversized_outgoing_frame_rejected() {
    let (mut a, _b) = duplex(1024);
    let big = "x".repeat(MAX_OUTGOING_FRAME + 1);
    let err = write_frame(&mut a, &big).await.unwrap_err();
    assert!(matches!(err, RelayError::FrameTooLarge { max, .. } if max == MAX_OUTGOING_FRAME));
}

#[tokio::test]
async fn test_truncated_payload() {
    let (mut a, mut b) = duplex(1024);
    a.write_all(&10u32.to_le_bytes()).await.unwrap();
    a.write_all(b"abc").await.unwrap();
    drop(a);

    let err = read_frame(&mut b).await.unwrap_err();
    assert!(matches!(err, RelayError::Truncated { expected: 10 }));
}

#[tokio::test]
async fn test_partial_length_prefix_is_truncated() {
    let (mut a, mut b) = duplex(1024);
    a.write_all(&[5, 0]).await.unwrap();
    drop(a);

    let err = read_frame(&mut b).await.unwrap_err();
    assert!(matches!(err, RelayError::Truncated { expected: 4 }));
}

#[tokio::test]
async fn test_host_serves_requests_in_order() {
    let mut input = frame(r#"{"action":"CALL_MODEL","apiKey":"k","prompt":"one"}"#);
    input.extend(frame(r#"{"action":"CALL_MODEL","apiKey":"","prompt":"two"}"#));
    input.extend(frame(r#"{"action":"PING"}"#));

    let (result, responses) = run_host(Behavior::Echo, input).await;
    assert!(result.is_ok());
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0].data.as_deref(), Some("echo: one"));
    assert_eq!(responses[1].error.as_deref(), Some("API Key missing"));
    assert_eq!(responses[2].error.as_deref(), Some("Unknown action: PING"));
}

#[tokio::test(start_paused = true)]
async fn test_host_keeps_order_with_slow_upstream() {
    let mut input = frame(r#"{"action":"CALL_MODEL","apiKey":"k","prompt":"slow"}"#);
    input.extend(frame(r#"{"action":"CALL_MODEL","apiKey":"","prompt":"fast"}"#));

    let (_, responses) = run_host(Behavior::Delay(Duration::from_secs(2)), input).await;
    assert_eq!(responses[0].data.as_deref(), Some("echo: slow"));
    assert_eq!(responses[1].error.as_deref(), Some("API Key missing"));
}

#[tokio::test]
async fn test_host_replies_to_invalid_json() {
    let (result, responses) = run_host(Behavior::Echo, frame("{not json")).await;
    assert!(result.is_ok());
    assert_eq!(responses.len(), 1);
    assert!(!responses[0].success);
    assert!(responses[0].error.as_deref().unwrap().starts_with("Invalid message:"));
}

#[tokio::test]
async fn test_host_empty_input_ends_cleanly() {
    let (result, responses) = run_host(Behavior::Echo, Vec::new()).await;
    assert!(result.is_ok());
    assert!(responses.is_empty());
}

#[tokio::test]
async fn test_host_framing_error_flushes_pending() {
    let mut input = frame(r#"{"action":"CALL_MODEL","apiKey":"k","prompt":"ok"}"#);
    input.extend(((MAX_INCOMING_FRAME as u32) + 1).to_le_bytes());

    let (result, responses) = run_host(Behavior::Echo, input).await;
    assert!(matches!(result, Err(RelayError::FrameTooLarge { .. })));
    assert_eq!(responses.len(), 1);
    assert!(responses[0].success);
}
