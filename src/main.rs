use std::sync::Arc;

use anyhow::Result;
use dotenv::dotenv;
use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use chat_console::backend::{Backend, HttpBackend};
use chat_console::config::Config;
use chat_console::console::{self, Command, HELP};
use chat_console::ui::render::Renderer;
use chat_console::ui::{dispatch, Tab, UiController};

fn draw(renderer: &Renderer, controller: &UiController) {
    match renderer.render(&controller.snapshot()) {
        Ok(page) => println!("{}", page),
        Err(e) => error!("Template error: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let config = Config::from_env();
    info!("Starting chat console against {}", config.backend_url);

    let backend = Arc::new(HttpBackend::new(config.backend_url.clone()));
    match backend.welcome().await {
        Ok(message) => info!("Backend says: {}", message),
        Err(e) => warn!("Backend at {} did not answer: {}", backend.base_url(), e),
    }

    let controller = Arc::new(UiController::new(backend));
    let renderer = Renderer::new(config.transcript_window)?;
    let mut changes = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    draw(&renderer, &controller);

    loop {
        tokio::select! {
            line = console::next_line(&mut lines) => {
                let Some(line) = line else { break };
                let active = controller
                    .snapshot()
                    .view
                    .tabs
                    .active()
                    .unwrap_or(Tab::Simple);
                match console::parse(&line, active) {
                    Ok(Some(Command::Events(events))) => {
                        for event in events {
                            // Requests run on their own; nothing waits for them.
                            let _ = dispatch(&controller, event);
                        }
                    }
                    Ok(Some(Command::Show)) => draw(&renderer, &controller),
                    Ok(Some(Command::Help)) => println!("{}", HELP),
                    Ok(Some(Command::Quit)) => break,
                    Ok(None) => {}
                    Err(e) => eprintln!("{}", e),
                }
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                draw(&renderer, &controller);
            }
        }
    }

    info!("Leaving chat console");
    Ok(())
}
