//! Fixed action definitions offered on a selection.

use serde::{Deserialize, Serialize};

/// Identifier of one of the fixed actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    Summarize,
    Explain,
    FixGrammar,
    Translate,
}

impl ActionId {
    /// All actions in menu order.
    pub const ALL: [ActionId; 4] = [
        ActionId::Summarize,
        ActionId::Explain,
        ActionId::FixGrammar,
        ActionId::Translate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionId::Summarize => "summarize",
            ActionId::Explain => "explain",
            ActionId::FixGrammar => "fix_grammar",
            ActionId::Translate => "translate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "summarize" | "sum" => Some(ActionId::Summarize),
            "explain" | "exp" => Some(ActionId::Explain),
            "fix_grammar" | "fix-grammar" | "fix" => Some(ActionId::FixGrammar),
            "translate" | "trans" => Some(ActionId::Translate),
            _ => None,
        }
    }

    pub fn definition(&self) -> &'static ActionDefinition {
        match self {
            ActionId::Summarize => &ACTIONS[0],
            ActionId::Explain => &ACTIONS[1],
            ActionId::FixGrammar => &ACTIONS[2],
            ActionId::Translate => &ACTIONS[3],
        }
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed prompt template offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDefinition {
    pub id: ActionId,
    pub label: &'static str,
    /// Display-only keyboard hint.
    pub shortcut: Option<&'static str>,
    pub prompt_prefix: &'static str,
}

impl ActionDefinition {
    /// Build the prompt sent upstream for a selection.
    pub fn build_prompt(&self, selection: &str) -> String {
        format!("{}\n\n\"{}\"", self.prompt_prefix, selection)
    }
}

/// The action table, in menu order.
pub static ACTIONS: [ActionDefinition; 4] = [
    ActionDefinition {
        id: ActionId::Summarize,
        label: "Summarize Selection",
        shortcut: Some("Cmd+S"),
        prompt_prefix: "Summarize this text in concise bullet points:",
    },
    ActionDefinition {
        id: ActionId::Explain,
        label: "Explain Selection",
        shortcut: Some("Cmd+E"),
        prompt_prefix: "Explain this text simply like I am 5 years old:",
    },
    ActionDefinition {
        id: ActionId::FixGrammar,
        label: "Fix Grammar",
        shortcut: Some("Cmd+G"),
        prompt_prefix: "Fix grammar and improve flow:",
    },
    ActionDefinition {
        id: ActionId::Translate,
        label: "Translate Selection",
        shortcut: None,
        prompt_prefix: "Translate this text to English:",
    },
];

/// A browser context-menu entry registered for selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenuEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub action: ActionId,
}

pub static CONTEXT_MENU: [ContextMenuEntry; 2] = [
    ContextMenuEntry {
        id: "mindspark-summarize",
        title: "Summarize with MindSpark",
        action: ActionId::Summarize,
    },
    ContextMenuEntry {
        id: "mindspark-explain",
        title: "Explain selection",
        action: ActionId::Explain,
    },
];

/// A context-menu click routed to the page overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenuInvocation {
    pub action: ActionId,
    pub selection_text: String,
}

impl ContextMenuInvocation {
    /// Resolve a clicked menu item id into an invocation.
    pub fn from_menu_click(menu_id: &str, selection_text: impl Into<String>) -> Option<Self> {
        CONTEXT_MENU
            .iter()
            .find(|entry| entry.id == menu_id)
            .map(|entry| Self {
                action: entry.action,
                selection_text: selection_text.into(),
            })
    }
}
