pub mod controller;
pub mod models;
pub mod render;
pub mod routes;

pub use controller::{PageState, UiController};
pub use models::{Button, InputField, Role, StatusStyle, Tab, View};
pub use routes::{dispatch, UiEvent};
