//! Popup quick actions.

/// Shown when the active page yields no text.
pub const PAGE_UNREADABLE: &str = "Could not read page content. Ensure you are on a valid webpage.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickAction {
    SummarizePage,
    ExplainPage,
    FixGrammar,
    Translate,
}

impl QuickAction {
    pub const ALL: [QuickAction; 4] = [
        QuickAction::SummarizePage,
        QuickAction::ExplainPage,
        QuickAction::FixGrammar,
        QuickAction::Translate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::SummarizePage => "Summarize",
            QuickAction::ExplainPage => "Explain This",
            QuickAction::FixGrammar => "Fix Grammar",
            QuickAction::Translate => "Translate",
        }
    }

    /// Request sent alongside the page text, for page actions.
    pub fn page_instruction(&self) -> Option<&'static str> {
        match self {
            QuickAction::SummarizePage => {
                Some("Summarize the main points of this webpage content.")
            }
            QuickAction::ExplainPage => Some("Explain the core concept of this webpage content."),
            _ => None,
        }
    }

    /// Input prefill, for actions that wait for the user's text.
    pub fn prefill(&self) -> Option<&'static str> {
        match self {
            QuickAction::FixGrammar => Some("Fix the grammar in this text: "),
            QuickAction::Translate => Some("Translate this to English: "),
            _ => None,
        }
    }
}

/// Prompt carrying page context ahead of the user's request.
pub fn context_prompt(context: &str, request: &str) -> String {
    format!("Context:\n{}\n\nUser Request: {}", context, request)
}

/// The first `limit` characters of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
