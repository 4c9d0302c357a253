//! Interactive popup chat in the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use mindspark_config::Config;
use mindspark_popup::{FilePage, PopupController, PopupError, QuickAction};
use mindspark_protocols::{ChatRole, Persona};

use crate::register::{relay_service, settings_store};

const HELP: &str =
    "Commands: /summarize /explain /fix /translate /persona <name> /key <key> /quit";

#[derive(Debug, PartialEq, Eq)]
enum ChatCommand {
    Quit,
    Quick(QuickAction),
    Persona(String),
    Key(String),
    Help,
    Message(String),
}

fn parse_command(line: &str) -> ChatCommand {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match head {
        "/quit" | "/exit" => ChatCommand::Quit,
        "/summarize" => ChatCommand::Quick(QuickAction::SummarizePage),
        "/explain" => ChatCommand::Quick(QuickAction::ExplainPage),
        "/fix" => ChatCommand::Quick(QuickAction::FixGrammar),
        "/translate" => ChatCommand::Quick(QuickAction::Translate),
        "/persona" => ChatCommand::Persona(rest.to_string()),
        "/key" => ChatCommand::Key(rest.to_string()),
        "/help" => ChatCommand::Help,
        _ => ChatCommand::Message(line.to_string()),
    }
}

/// Print transcript entries from `from` on. Returns the new count.
fn print_new(popup: &PopupController, from: usize) -> usize {
    let entries = popup.transcript().entries();
    for entry in entries.iter().skip(from) {
        let who = match entry.role() {
            ChatRole::User => "you",
            ChatRole::Model => "mindspark",
        };
        println!("{}> {}", who, entry.text());
    }
    entries.len()
}

pub(crate) async fn run_chat(
    config: &Config,
    page: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (handle, task) = relay_service(config).spawn(8);
    let page = page.map(FilePage::new).unwrap_or_else(FilePage::none);
    let mut popup = PopupController::open(
        Arc::new(handle),
        Arc::new(settings_store(config)),
        Arc::new(page),
        config.popup.clone(),
    )
    .await?;

    println!("MindSpark AI ({})", popup.persona().display_name());
    println!("{}", HELP);
    if popup.is_settings_open() {
        println!("No API key on record. Set one with /key <KEY>.");
    }

    let shutdown = popup.shutdown_token();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.cancel();
            }
        }
    });

    let mut printed = 0;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            break;
        };
        match parse_command(&line) {
            ChatCommand::Quit => break,
            ChatCommand::Help => println!("{}", HELP),
            ChatCommand::Key(key) => {
                popup.open_settings();
                popup.set_key_input(key);
                match popup.save_settings().await {
                    Err(PopupError::InvalidKey) => println!("{}", PopupError::InvalidKey),
                    Err(e) => return Err(e.into()),
                    Ok(()) => {}
                }
            }
            ChatCommand::Persona(name) => match Persona::parse(&name) {
                Some(persona) => {
                    popup.select_persona(persona).await?;
                    println!("Persona: {}", persona.display_name());
                }
                None => println!("Unknown persona: {}", name),
            },
            ChatCommand::Quick(action) => {
                popup.quick_action(action).await;
                if !popup.input().is_empty() {
                    println!("(next line is appended to: \"{}\")", popup.input());
                }
                if popup.is_settings_open() {
                    println!("Set an API key first with /key <KEY>.");
                }
            }
            ChatCommand::Message(text) => {
                let input = format!("{}{}", popup.input(), text);
                popup.set_input(input);
                popup.send().await;
            }
        }
        printed = print_new(&popup, printed);
        if popup.is_closed() {
            break;
        }
    }

    popup.close();
    drop(popup);
    let _ = task.await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("/quit"), ChatCommand::Quit);
        assert_eq!(
            parse_command("/summarize"),
            ChatCommand::Quick(QuickAction::SummarizePage)
        );
        assert_eq!(
            parse_command("/persona  Coder "),
            ChatCommand::Persona("Coder".to_string())
        );
        assert_eq!(parse_command("/key abc"), ChatCommand::Key("abc".to_string()));
    }

    #[test]
    fn test_plain_text_is_message() {
        assert_eq!(
            parse_command("  what is a lifetime? "),
            ChatCommand::Message("what is a lifetime?".to_string())
        );
    }
}
