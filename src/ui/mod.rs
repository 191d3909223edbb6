pub mod app;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod layout;
pub mod mvi;
pub mod render;
pub mod runtime;
pub mod session;
pub mod terminal;
pub mod terminal_guard;
pub mod theme;
