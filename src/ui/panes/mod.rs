//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`listing`]: numbered source with token colouring and inline diagnostics
//! - [`tokens`]: the token table, diagnostics included
//! - [`scopes`]: programs and procedures with their symbols and offsets
//! - [`status`]: status bar with diagnostic counts and keybindings
//! - `utils`: shared block styling and scroll clamping
//!
//! Each pane module exports a `render_*` function that draws into a given
//! area and clamps the caller's scroll offset.

mod utils;

pub mod listing;
pub mod scopes;
pub mod status;
pub mod tokens;

pub use listing::{listing_lines, render_listing_pane};
pub use scopes::{render_scopes_pane, scope_lines};
pub use status::{render_status_bar, DiagnosticCounts};
pub use tokens::render_tokens_pane;
