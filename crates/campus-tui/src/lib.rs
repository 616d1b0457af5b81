pub mod action;
pub mod app;
pub mod components;
pub mod event;
pub mod tasks;
pub mod theme;

#[cfg(test)]
pub(crate) mod testing;

pub use app::App;
pub use action::Screen;
