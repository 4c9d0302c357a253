use super::*;

fn long_text() -> String {
    vec!["line"; 20].join("\n")
}

fn resolved(result: Result<String, ModelError>) -> ResultPanel {
    let mut panel = ResultPanel::new(ActionId::Summarize);
    panel.set_open(true);
    panel.begin(Ticket(1));
    assert!(panel.resolve(Ticket(1), result, &PanelMetrics::default()));
    panel
}

#[test]
fn test_estimate_height_wraps_long_lines() {
    let metrics = PanelMetrics::default();
    assert_eq!(metrics.estimate_height("short"), 21);
    assert_eq!(metrics.estimate_height(&"x".repeat(48)), 21);
    assert_eq!(metrics.estimate_height(&"x".repeat(49)), 42);
    assert_eq!(metrics.estimate_height("a\n\nb"), 63);
}

#[test]
fn test_truncation_threshold_includes_slack() {
    let metrics = PanelMetrics::default();
    // 7 lines = 147px, within 140 + 20.
    assert!(!metrics.needs_truncation(&vec!["l"; 7].join("\n")));
    // 8 lines = 168px.
    assert!(metrics.needs_truncation(&vec!["l"; 8].join("\n")));
}

#[test]
fn test_huge_collapsed_height_does_not_overflow() {
    let config = mindspark_config::ConfigLoader::load_str(
        "[overlay]\ncollapsed_height_px = 4294967295\ntruncation_slack_px = 20\n",
    )
    .unwrap();
    assert!(mindspark_config::ConfigValidator::validate(&config).is_valid());

    let metrics = PanelMetrics::from(&config.overlay);
    assert!(!metrics.needs_truncation("hello"));
    assert!(!metrics.needs_truncation(&long_text()));
}

#[test]
fn test_new_panel_needs_run() {
    let panel = ResultPanel::new(ActionId::Explain);
    assert!(panel.needs_run());
    assert!(!panel.is_open());
    assert!(panel.in_flight().is_none());
}

#[test]
fn test_pending_panel_does_not_rerun() {
    let mut panel = ResultPanel::new(ActionId::Explain);
    panel.begin(Ticket(7));
    assert!(!panel.needs_run());
    assert_eq!(panel.in_flight(), Some(Ticket(7)));
    assert!(panel.outcome().unwrap().is_pending());
}

#[test]
fn test_failed_panel_reruns() {
    let panel = resolved(Err(ModelError::TransportFailure("down".to_string())));
    assert!(panel.needs_run());
}

#[test]
fn test_success_text_exact() {
    let panel = resolved(Ok("Hello".to_string()));
    assert_eq!(panel.outcome().unwrap().text(), Some("Hello"));
    assert!(!panel.needs_run());

    let view = panel.view(&PanelMetrics::default());
    assert_eq!(view.find("ms-text-block").unwrap().text.as_deref(), Some("Hello"));
}

#[test]
fn test_stale_ticket_ignored() {
    let mut panel = ResultPanel::new(ActionId::Summarize);
    panel.begin(Ticket(2));
    assert!(!panel.resolve(Ticket(1), Ok("late".to_string()), &PanelMetrics::default()));
    assert!(panel.outcome().unwrap().is_pending());
}

#[test]
fn test_pending_view_shows_indicator() {
    let mut panel = ResultPanel::new(ActionId::Summarize);
    panel.set_open(true);
    panel.begin(Ticket(1));

    let view = panel.view(&PanelMetrics::default());
    assert_eq!(view.find("ms-status-text").unwrap().text.as_deref(), Some(PROCESSING_LABEL));
}

#[test]
fn test_closed_view_has_zero_height() {
    let panel = ResultPanel::new(ActionId::Summarize);
    let view = panel.view(&PanelMetrics::default());
    assert_eq!(view.style_value("height"), Some("0px"));
    assert!(view.children.is_empty());
}

#[test]
fn test_long_text_truncated_then_expanded() {
    let mut panel = resolved(Ok(long_text()));
    assert_eq!(panel.truncation(), Truncation::Truncated);

    let view = panel.view(&PanelMetrics::default());
    assert_eq!(view.style_value("height"), Some("140px"));
    assert!(view.find("ms-truncated").is_some());
    let expand = view.find("ms-expand-btn").unwrap();
    assert_eq!(
        expand.handler(Trigger::Click),
        Some(&Event::ShowMoreClicked(ActionId::Summarize))
    );

    assert!(panel.expand());
    let view = panel.view(&PanelMetrics::default());
    assert!(view.find("ms-expand-btn").is_none());
    assert!(view.find("ms-truncated").is_none());
    assert_eq!(view.style_value("height"), Some("auto"));
    assert_eq!(view.find("ms-text-block").unwrap().text.as_deref(), Some(long_text().as_str()));

    // One-way.
    assert!(!panel.expand());
    assert_eq!(panel.truncation(), Truncation::Expanded);
}

#[test]
fn test_short_text_not_truncated() {
    let mut panel = resolved(Ok("brief".to_string()));
    assert_eq!(panel.truncation(), Truncation::Full);
    assert!(!panel.expand());
}

#[test]
fn test_copy_confirm_and_revert() {
    let mut panel = resolved(Ok("copy me".to_string()));

    let (text, generation) = panel.confirm_copy().unwrap();
    assert_eq!(text, "copy me");
    let view = panel.view(&PanelMetrics::default());
    assert_eq!(view.find("ms-copy").unwrap().attr_value("title"), Some(COPIED_LABEL));

    assert!(panel.revert_copy(generation));
    assert_eq!(panel.copy_state(), CopyState::Idle);
    let view = panel.view(&PanelMetrics::default());
    assert_eq!(view.find("ms-copy").unwrap().attr_value("title"), Some(COPY_LABEL));
    assert_eq!(panel.outcome().unwrap().text(), Some("copy me"));
}

#[test]
fn test_repeated_copy_only_latest_timer_reverts() {
    let mut panel = resolved(Ok("x".to_string()));
    let (_, first) = panel.confirm_copy().unwrap();
    let (_, second) = panel.confirm_copy().unwrap();

    assert!(!panel.revert_copy(first));
    assert!(matches!(panel.copy_state(), CopyState::Confirmed { .. }));
    assert!(panel.revert_copy(second));
}

#[test]
fn test_copy_without_success_is_noop() {
    let mut panel = resolved(Err(ModelError::no_response()));
    assert!(panel.confirm_copy().is_none());
}

#[test]
fn test_failure_view() {
    let panel = resolved(Err(ModelError::UpstreamRejection("quota exceeded".to_string())));
    let view = panel.view(&PanelMetrics::default());
    assert_eq!(view.find("ms-error").unwrap().text.as_deref(), Some("quota exceeded"));
    assert!(view.find("ms-link").is_none());
}

#[test]
fn test_missing_credential_links_to_settings() {
    let panel = resolved(Err(ModelError::missing_credential()));
    let view = panel.view(&PanelMetrics::default());
    assert_eq!(view.find("ms-error").unwrap().text.as_deref(), Some("API Key missing"));
    let link = view.find("ms-link").unwrap();
    assert_eq!(link.handler(Trigger::Click), Some(&Event::SettingsClicked));
}
