/// Command handlers and greeting logic.
pub mod handlers;
