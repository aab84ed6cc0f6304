use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::ui::controller::UiController;
use crate::ui::models::{Button, InputField, Tab};

/// Something the user did to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    TabClicked(Tab),
    Input(InputField, String),
    FileSelected(Option<PathBuf>),
    Clicked(Button),
}

/// Routes an event to its handler. Clicks that reach the backend return the
/// handle of the task carrying the request.
pub fn dispatch(controller: &Arc<UiController>, event: UiEvent) -> Option<JoinHandle<()>> {
    match event {
        UiEvent::TabClicked(tab) => {
            controller.switch_tab(tab);
            None
        }
        UiEvent::Input(field, value) => {
            controller.set_input(field, value);
            None
        }
        UiEvent::FileSelected(path) => {
            controller.select_file(path);
            None
        }
        UiEvent::Clicked(button) => match button {
            Button::SimpleSend => controller.send_simple(),
            Button::MemorySend => controller.send_memory(),
            Button::ClearMemory => {
                controller.clear_memory();
                None
            }
            Button::Upload => controller.upload_document(),
            Button::DocumentAsk => controller.ask_document(),
            Button::AgentSend => controller.run_agent(),
        },
    }
}
