//! Terminal viewer for a finished compilation, built on
//! [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus
//! - **[`panes`]**: stateless render functions for the listing, token table,
//!   scope tree and status bar
//! - **[`theme`]**: colour palette shared by all panes
//!
//! Construct an [`App`] from a [`Compilation`] and call [`App::run`].
//!
//! [`Compilation`]: crate::parser::Compilation
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
