use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Error};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Simple,
    Memory,
    Document,
    Agent,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Simple, Tab::Memory, Tab::Document, Tab::Agent];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Simple => "simple",
            Tab::Memory => "memory",
            Tab::Document => "document",
            Tab::Agent => "agent",
        }
    }

    /// The text field a `send` on this tab types into.
    pub fn prompt_field(self) -> InputField {
        match self {
            Tab::Simple => InputField::SimplePrompt,
            Tab::Memory => InputField::MemoryPrompt,
            Tab::Document => InputField::DocumentQuery,
            Tab::Agent => InputField::AgentPrompt,
        }
    }

    pub fn send_button(self) -> Button {
        match self {
            Tab::Simple => Button::SimpleSend,
            Tab::Memory => Button::MemorySend,
            Tab::Document => Button::DocumentAsk,
            Tab::Agent => Button::AgentSend,
        }
    }
}

impl FromStr for Tab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id() == s)
            .ok_or_else(|| anyhow!("unknown tab `{}`", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    SimplePrompt,
    MemoryPrompt,
    DocumentQuery,
    AgentPrompt,
}

impl InputField {
    const ALL: [InputField; 4] = [
        InputField::SimplePrompt,
        InputField::MemoryPrompt,
        InputField::DocumentQuery,
        InputField::AgentPrompt,
    ];

    pub fn id(self) -> &'static str {
        match self {
            InputField::SimplePrompt => "simple-prompt",
            InputField::MemoryPrompt => "memory-prompt",
            InputField::DocumentQuery => "document-query",
            InputField::AgentPrompt => "agent-prompt",
        }
    }
}

impl FromStr for InputField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputField::ALL
            .into_iter()
            .find(|field| field.id() == s)
            .ok_or_else(|| anyhow!("unknown input `{}`", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    SimpleSend,
    MemorySend,
    ClearMemory,
    Upload,
    DocumentAsk,
    AgentSend,
}

impl Button {
    const ALL: [Button; 6] = [
        Button::SimpleSend,
        Button::MemorySend,
        Button::ClearMemory,
        Button::Upload,
        Button::DocumentAsk,
        Button::AgentSend,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Button::SimpleSend => "simple-send",
            Button::MemorySend => "memory-send",
            Button::ClearMemory => "clear-memory",
            Button::Upload => "upload-btn",
            Button::DocumentAsk => "document-ask",
            Button::AgentSend => "agent-send",
        }
    }
}

impl FromStr for Button {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Button::ALL
            .into_iter()
            .find(|button| button.id() == s)
            .ok_or_else(|| anyhow!("unknown button `{}`", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabPane {
    pub tab: Tab,
    pub trigger_active: bool,
    pub pane_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabStrip {
    pub panes: Vec<TabPane>,
}

impl Default for TabStrip {
    // The first tab starts active, as in the page's markup.
    fn default() -> Self {
        let panes = Tab::ALL
            .into_iter()
            .enumerate()
            .map(|(i, tab)| TabPane {
                tab,
                trigger_active: i == 0,
                pane_active: i == 0,
            })
            .collect();
        Self { panes }
    }
}

impl TabStrip {
    pub fn activate(&mut self, tab: Tab) {
        for pane in &mut self.panes {
            pane.trigger_active = false;
            pane.pane_active = false;
        }
        for pane in self.panes.iter_mut().filter(|pane| pane.tab == tab) {
            pane.trigger_active = true;
            pane.pane_active = true;
        }
    }

    pub fn active(&self) -> Option<Tab> {
        self.panes
            .iter()
            .find(|pane| pane.pane_active)
            .map(|pane| pane.tab)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EntryId(u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub id: EntryId,
    pub role: Role,
    pub text: String,
}

/// The memory tab's message list. Entries are only ever appended, removed
/// one by one (placeholders), or replaced wholesale on clear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    next_id: u64,
    /// Number of entries scrolled into view, counted from the top.
    scroll: usize,
}

impl Transcript {
    pub fn push(&mut self, role: Role, text: impl Into<String>) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(TranscriptEntry {
            id,
            role,
            text: text.into(),
        });
        id
    }

    /// Removes the entry if it is still present.
    pub fn remove(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.scroll = self.scroll.min(self.entries.len());
        self.entries.len() != before
    }

    /// Drops every entry and leaves a single notice behind.
    pub fn reset_with(&mut self, role: Role, text: impl Into<String>) {
        self.entries.clear();
        self.push(role, text);
        self.scroll_to_bottom();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.entries.len();
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Up to `window` entries ending at the scroll position.
    pub fn visible(&self, window: usize) -> &[TranscriptEntry] {
        let end = self.scroll.min(self.entries.len());
        &self.entries[end.saturating_sub(window)..end]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusStyle {
    #[default]
    Plain,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub text: String,
    pub style: StatusStyle,
}

impl StatusLine {
    pub fn set(&mut self, text: impl Into<String>, style: StatusStyle) {
        self.text = text.into();
        self.style = style;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryPanel {
    pub prompt: String,
    pub output: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemoryPanel {
    pub prompt: String,
    pub transcript: Transcript,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentPanel {
    pub selected_file: Option<PathBuf>,
    pub query: String,
    pub status: StatusLine,
    pub ask_enabled: bool,
    pub output: String,
}

/// Everything the page shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct View {
    pub tabs: TabStrip,
    pub simple: QueryPanel,
    pub memory: MemoryPanel,
    pub document: DocumentPanel,
    pub agent: QueryPanel,
}

impl View {
    pub fn input_mut(&mut self, field: InputField) -> &mut String {
        match field {
            InputField::SimplePrompt => &mut self.simple.prompt,
            InputField::MemoryPrompt => &mut self.memory.prompt,
            InputField::DocumentQuery => &mut self.document.query,
            InputField::AgentPrompt => &mut self.agent.prompt,
        }
    }
}
