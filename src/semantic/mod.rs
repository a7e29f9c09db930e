//! Scope and type checking model
//!
//! - [`scope`]: the scope tree and the live scope stack
//! - [`types`]: value types, storage widths and the typing rules
//!
//! Both are driven by the parser; nothing here reads tokens.

pub mod scope;
pub mod types;

pub use scope::{Scope, ScopeId, ScopeTree, Symbol, SymbolNode, ROOT_SCOPE};
pub use types::ValueType;
