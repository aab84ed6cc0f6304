use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::backend::{Backend, DocumentFile, UploadOutcome};
use crate::error::{error_text, ClientError};
use crate::session::new_session_id;
use crate::ui::models::{InputField, QueryPanel, Role, StatusStyle, Tab, View};

pub const THINKING: &str = "Thinking...";
pub const AGENT_WORKING: &str = "Agent is working on your task...";
pub const MEMORY_CLEARED: &str = "Memory cleared. Start a new conversation!";
pub const NO_FILE_SELECTED: &str = "Please select a file first.";
pub const UPLOADING: &str = "Uploading and processing document...";
pub const UPLOAD_SUCCEEDED: &str = "Document uploaded and processed successfully.";
pub const UPLOAD_FAILED: &str = "Error uploading document.";
pub const UPLOAD_FIRST: &str = "Please upload a document first.";

/// Page-lifetime state: what is shown plus the two cells the handlers share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub view: View,
    pub session_id: String,
    /// Set by the first successful upload, never cleared.
    pub document_uploaded: bool,
}

/// Owns the page and turns clicks into backend requests.
///
/// A click does its synchronous work (reading inputs, writing placeholders)
/// immediately and hands the request to its own task. Requests are not
/// ordered against each other: whichever finishes last owns the output.
pub struct UiController {
    backend: Arc<dyn Backend>,
    state: Mutex<PageState>,
    revision: watch::Sender<u64>,
}

fn simple_panel(view: &mut View) -> &mut QueryPanel {
    &mut view.simple
}

fn agent_panel(view: &mut View) -> &mut QueryPanel {
    &mut view.agent
}

async fn read_selected(path: Option<PathBuf>) -> Result<Option<DocumentFile>, ClientError> {
    match path {
        Some(path) => Ok(Some(DocumentFile::read(&path).await?)),
        None => Ok(None),
    }
}

impl UiController {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (revision, _) = watch::channel(0);
        let session_id = new_session_id();
        info!("Page ready with session {}", session_id);
        Self {
            backend,
            state: Mutex::new(PageState {
                view: View::default(),
                session_id,
                document_uploaded: false,
            }),
            revision,
        }
    }

    /// Ticks once per view change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn snapshot(&self) -> PageState {
        self.peek(|state| state.clone())
    }

    pub fn session_id(&self) -> String {
        self.peek(|state| state.session_id.clone())
    }

    pub fn document_uploaded(&self) -> bool {
        self.peek(|state| state.document_uploaded)
    }

    fn peek<R>(&self, f: impl FnOnce(&mut PageState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    fn update<R>(&self, f: impl FnOnce(&mut PageState) -> R) -> R {
        let result = self.peek(f);
        self.revision.send_modify(|rev| *rev += 1);
        result
    }

    pub fn switch_tab(&self, tab: Tab) {
        debug!("Switching to tab {}", tab.id());
        self.update(|state| state.view.tabs.activate(tab));
    }

    pub fn set_input(&self, field: InputField, value: impl Into<String>) {
        let value = value.into();
        self.update(|state| *state.view.input_mut(field) = value);
    }

    pub fn select_file(&self, path: Option<PathBuf>) {
        self.update(|state| state.view.document.selected_file = path);
    }

    /// Reads and trims a panel's prompt; a non-empty one gets the placeholder.
    fn begin_query(
        &self,
        panel: fn(&mut View) -> &mut QueryPanel,
        placeholder: &str,
    ) -> Option<String> {
        let prompt = self.peek(|state| panel(&mut state.view).prompt.trim().to_string());
        if prompt.is_empty() {
            return None;
        }
        self.update(|state| panel(&mut state.view).output = placeholder.to_string());
        Some(prompt)
    }

    pub fn send_simple(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let prompt = self.begin_query(simple_panel, THINKING)?;
        info!("Chat request: {}", prompt);

        let this = Arc::clone(self);
        Some(tokio::spawn(async move {
            let text = match this.backend.chat(&prompt).await {
                Ok(response) => response,
                Err(e) => error_text(&e),
            };
            this.update(|state| state.view.simple.output = text);
        }))
    }

    pub fn send_memory(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let prompt = self.peek(|state| state.view.memory.prompt.trim().to_string());
        if prompt.is_empty() {
            return None;
        }

        let (session_id, placeholder) = self.update(|state| {
            let memory = &mut state.view.memory;
            memory.transcript.push(Role::User, prompt.clone());
            let placeholder = memory.transcript.push(Role::System, THINKING);
            memory.prompt.clear();
            memory.transcript.scroll_to_bottom();
            (state.session_id.clone(), placeholder)
        });
        info!("Chat request from session {}: {}", session_id, prompt);

        let this = Arc::clone(self);
        Some(tokio::spawn(async move {
            let reply = this.backend.chat_with_memory(&prompt, &session_id).await;
            this.update(|state| {
                let transcript = &mut state.view.memory.transcript;
                // Gone already if the memory was cleared meanwhile.
                transcript.remove(placeholder);
                match reply {
                    Ok(response) => transcript.push(Role::Assistant, response),
                    Err(e) => transcript.push(Role::System, error_text(&e)),
                };
                transcript.scroll_to_bottom();
            });
        }))
    }

    /// Local only: the backend simply never hears from the old session again.
    pub fn clear_memory(&self) {
        let session_id = new_session_id();
        info!("Memory cleared, new session {}", session_id);
        self.update(|state| {
            state
                .view
                .memory
                .transcript
                .reset_with(Role::System, MEMORY_CLEARED);
            state.session_id = session_id;
        });
    }

    pub fn upload_document(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let selected = self.peek(|state| state.view.document.selected_file.clone());
        let Some(path) = selected else {
            self.update(|state| {
                state
                    .view
                    .document
                    .status
                    .set(NO_FILE_SELECTED, StatusStyle::Error)
            });
            return None;
        };

        self.update(|state| state.view.document.status.set(UPLOADING, StatusStyle::Plain));
        info!("Uploading document {}", path.display());

        let this = Arc::clone(self);
        Some(tokio::spawn(async move {
            let outcome = match DocumentFile::read(&path).await {
                Ok(file) => this.backend.upload_document(file).await,
                Err(e) => Err(e),
            };
            this.update(|state| {
                let document = &mut state.view.document;
                match outcome {
                    Ok(UploadOutcome::Accepted { message }) => {
                        let text = message
                            .filter(|m| !m.is_empty())
                            .unwrap_or_else(|| UPLOAD_SUCCEEDED.to_string());
                        document.status.set(text, StatusStyle::Success);
                        document.ask_enabled = true;
                        state.document_uploaded = true;
                    }
                    Ok(UploadOutcome::Rejected { detail }) => {
                        let text = detail
                            .filter(|d| !d.is_empty())
                            .unwrap_or_else(|| UPLOAD_FAILED.to_string());
                        document.status.set(text, StatusStyle::Error);
                    }
                    Err(e) => document.status.set(error_text(&e), StatusStyle::Error),
                }
            });
        }))
    }

    /// Sends whatever file is picked right now, which need not be the one
    /// that was uploaded.
    pub fn ask_document(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let (query, uploaded, selected) = self.peek(|state| {
            (
                state.view.document.query.trim().to_string(),
                state.document_uploaded,
                state.view.document.selected_file.clone(),
            )
        });
        if query.is_empty() {
            return None;
        }
        if !uploaded {
            self.update(|state| state.view.document.output = UPLOAD_FIRST.to_string());
            return None;
        }

        self.update(|state| state.view.document.output = THINKING.to_string());
        info!("Document question: {}", query);

        let this = Arc::clone(self);
        Some(tokio::spawn(async move {
            let reply = match read_selected(selected).await {
                Ok(file) => this.backend.ask_document(file, &query).await,
                Err(e) => Err(e),
            };
            let text = match reply {
                Ok(response) => response,
                Err(e) => error_text(&e),
            };
            this.update(|state| state.view.document.output = text);
        }))
    }

    pub fn run_agent(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let prompt = self.begin_query(agent_panel, AGENT_WORKING)?;
        info!("Agent task: {}", prompt);

        let this = Arc::clone(self);
        Some(tokio::spawn(async move {
            let text = match this.backend.run_agent(&prompt).await {
                Ok(response) => response,
                Err(e) => error_text(&e),
            };
            this.update(|state| state.view.agent.output = text);
        }))
    }
}
