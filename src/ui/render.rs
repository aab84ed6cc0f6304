use tera::{Context, Tera};

use crate::ui::controller::PageState;

const PAGE_TEMPLATE: &str = "page.txt";

/// Draws a page snapshot as plain text.
pub struct Renderer {
    tera: Tera,
    transcript_window: usize,
}

impl Renderer {
    pub fn new(transcript_window: usize) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(PAGE_TEMPLATE, include_str!("../../templates/page.txt"))?;
        Ok(Self {
            tera,
            transcript_window,
        })
    }

    pub fn render(&self, state: &PageState) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("view", &state.view);
        context.insert("session_id", &state.session_id);
        context.insert("active_tab", &state.view.tabs.active());
        context.insert(
            "messages",
            state.view.memory.transcript.visible(self.transcript_window),
        );
        self.tera.render(PAGE_TEMPLATE, &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::models::{Role, StatusStyle, Tab, View};
    use std::path::PathBuf;

    fn state() -> PageState {
        PageState {
            view: View::default(),
            session_id: "user_abc1234".to_string(),
            document_uploaded: false,
        }
    }

    #[test]
    fn brackets_the_active_tab_and_shows_its_pane() {
        let renderer = Renderer::new(20).unwrap();
        let mut state = state();
        state.view.simple.output = "hello".to_string();

        let page = renderer.render(&state).unwrap();
        assert!(page.starts_with("[SIMPLE] memory  document  agent "), "{}", page);
        assert!(page.contains("hello"));
        assert!(!page.contains("session:"));
    }

    #[test]
    fn memory_pane_lists_recent_entries() {
        let renderer = Renderer::new(2).unwrap();
        let mut state = state();
        state.view.tabs.activate(Tab::Memory);
        let transcript = &mut state.view.memory.transcript;
        transcript.push(Role::User, "oldest");
        transcript.push(Role::User, "question");
        transcript.push(Role::Assistant, "answer");
        transcript.scroll_to_bottom();

        let page = renderer.render(&state).unwrap();
        assert!(page.contains("session: user_abc1234"));
        assert!(page.contains("user: question\nassistant: answer\n"), "{}", page);
        assert!(!page.contains("oldest"));
    }

    #[test]
    fn cleared_transcript_shows_its_notice() {
        let renderer = Renderer::new(20).unwrap();
        let mut state = state();
        state.view.tabs.activate(Tab::Memory);
        state
            .view
            .memory
            .transcript
            .reset_with(Role::System, "Memory cleared. Start a new conversation!");

        let page = renderer.render(&state).unwrap();
        assert!(
            page.contains("system: Memory cleared. Start a new conversation!\n"),
            "{}",
            page
        );
    }

    #[test]
    fn document_pane_marks_style_and_disabled_ask() {
        let renderer = Renderer::new(20).unwrap();
        let mut state = state();
        state.view.tabs.activate(Tab::Document);
        state.view.document.selected_file = Some(PathBuf::from("report.pdf"));
        state
            .view
            .document
            .status
            .set("too large", StatusStyle::Error);

        let page = renderer.render(&state).unwrap();
        assert!(page.contains("file   : report.pdf"));
        assert!(page.contains("status : too large (error)"));
        assert!(page.contains("[ask disabled]"));

        state.view.document.ask_enabled = true;
        let page = renderer.render(&state).unwrap();
        assert!(!page.contains("[ask disabled]"));
    }
}
