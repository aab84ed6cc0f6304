//! Line-oriented stand-in for the page: each stdin line is a user action.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{bail, Result};
use log::warn;
use tokio::io::{AsyncBufRead, Lines};

use crate::ui::{Tab, UiEvent};

pub const HELP: &str = "\
commands:
  tab <simple|memory|document|agent>   switch tab
  type <field> <text>                  fill simple-prompt, memory-prompt, document-query or agent-prompt
  pick [path]                          choose the document file (no path clears it)
  click <button>                       simple-send, memory-send, clear-memory, upload-btn, document-ask, agent-send
  send <text>                          type into the active tab's prompt and press its send button
  show                                 redraw the page
  help                                 this text
  quit                                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Events(Vec<UiEvent>),
    Show,
    Help,
    Quit,
}

/// Next line of input, or `None` once input ends. Lines that are not valid
/// UTF-8 are reported and skipped.
pub async fn next_line<R: AsyncBufRead + Unpin>(lines: &mut Lines<R>) -> Option<String> {
    loop {
        match lines.next_line().await {
            Ok(line) => return line,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                eprintln!("unreadable input: {}", e);
            }
            Err(e) => {
                warn!("Input closed: {}", e);
                return None;
            }
        }
    }
}

/// Parses one line. Blank lines yield `None`.
pub fn parse(line: &str, active: Tab) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (line, ""),
    };

    let command = match verb {
        "tab" => Command::Events(vec![UiEvent::TabClicked(rest.parse()?)]),
        "type" => {
            let (field, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if field.is_empty() {
                bail!("usage: type <field> <text>");
            }
            Command::Events(vec![UiEvent::Input(field.parse()?, text.to_string())])
        }
        "pick" => {
            let path = Some(rest).filter(|p| !p.is_empty()).map(PathBuf::from);
            Command::Events(vec![UiEvent::FileSelected(path)])
        }
        "click" => Command::Events(vec![UiEvent::Clicked(rest.parse()?)]),
        "send" => Command::Events(vec![
            UiEvent::Input(active.prompt_field(), rest.to_string()),
            UiEvent::Clicked(active.send_button()),
        ]),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command `{}` (try `help`)", other),
    };
    Ok(Some(command))
}
