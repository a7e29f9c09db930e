//! Nested scopes and the symbols they own
//!
//! Programs and procedures open named scopes; variables and parameters are
//! leaf symbols inside them. Scopes live in an arena ([`ScopeTree`]) and are
//! addressed by [`ScopeId`], so the tree can be walked after the parse for
//! the memory-layout report while the parser manipulates the live stack of
//! open scopes during the pass.
//!
//! The stack always holds the implicit unnamed root. Every check that fails
//! returns `Err(message)`; the parser stamps the message with a position and
//! records it as a semantic error.

use super::types::ValueType;

/// Index of a scope in its [`ScopeTree`].
pub type ScopeId = usize;

/// The implicit unnamed root scope.
pub const ROOT_SCOPE: ScopeId = 0;

/// A declared variable, formal parameter or program parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub value_type: ValueType,
    /// Activation-record offset within the owning scope.
    pub offset: usize,
}

/// A child of a named scope.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolNode {
    Scope(ScopeId),
    Leaf(Symbol),
}

/// A program or procedure scope.
#[derive(Debug, Clone)]
pub struct Scope {
    pub name: String,
    pub parent: Option<ScopeId>,
    /// Next free activation-record offset.
    pub offset_counter: usize,
    pub children: Vec<SymbolNode>,
}

impl Scope {
    fn new(name: impl Into<String>, parent: Option<ScopeId>) -> Self {
        Self {
            name: name.into(),
            parent,
            offset_counter: 0,
            children: Vec::new(),
        }
    }

    /// Leaf symbols in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.children.iter().filter_map(|child| match child {
            SymbolNode::Leaf(symbol) => Some(symbol),
            SymbolNode::Scope(_) => None,
        })
    }

    /// Nested scopes in declaration order.
    pub fn scopes(&self) -> impl Iterator<Item = ScopeId> + '_ {
        self.children.iter().filter_map(|child| match child {
            SymbolNode::Scope(id) => Some(*id),
            SymbolNode::Leaf(_) => None,
        })
    }

    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols().find(|symbol| symbol.name == name)
    }
}

/// Scope arena plus the stack of scopes currently open.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    stack: Vec<ScopeId>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new("", None)],
            stack: vec![ROOT_SCOPE],
        }
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id)
    }

    pub fn root(&self) -> &Scope {
        &self.scopes[ROOT_SCOPE]
    }

    /// The innermost open scope.
    pub fn current(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(ROOT_SCOPE)
    }

    /// Number of open scopes, root included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The first named scope under the root (the program).
    pub fn program(&self) -> Option<&Scope> {
        self.root().scopes().next().and_then(|id| self.get(id))
    }

    /// Nesting depth of `id` below the root (the program is at depth 0).
    pub fn nesting(&self, id: ScopeId) -> usize {
        let mut depth = 0;
        let mut cursor = self.get(id).and_then(|scope| scope.parent);
        while let Some(parent) = cursor {
            if parent == ROOT_SCOPE {
                break;
            }
            depth += 1;
            cursor = self.get(parent).and_then(|scope| scope.parent);
        }
        depth
    }

    /// Open a named scope under the current one.
    ///
    /// On a collision with a sibling scope the new scope is still opened,
    /// under a `#`-suffixed name, so its body can be checked; the collision
    /// is returned as the error.
    pub fn push_scope(&mut self, name: &str) -> Result<ScopeId, String> {
        let parent = self.current();
        let taken = |tree: &Self, candidate: &str| {
            tree.scopes[parent]
                .scopes()
                .any(|id| tree.scopes[id].name == candidate)
        };

        let collision = taken(self, name);
        let mut registered = name.to_string();
        while taken(self, &registered) {
            registered.push('#');
        }

        let id = self.scopes.len();
        self.scopes.push(Scope::new(registered, Some(parent)));
        self.scopes[parent].children.push(SymbolNode::Scope(id));
        self.stack.push(id);
        tracing::debug!(scope = name, depth = self.stack.len(), "push scope");

        if collision {
            Err(format!(
                "a program or procedure named {name} is already defined in this scope"
            ))
        } else {
            Ok(id)
        }
    }

    /// Close the innermost scope. The root is never popped.
    pub fn pop_scope(&mut self) {
        if self.stack.len() > 1 {
            let id = self.stack.pop().unwrap_or(ROOT_SCOPE);
            tracing::debug!(scope = %self.scopes[id].name, "pop scope");
        }
    }

    /// Declare a leaf in the innermost scope, reserving `width` bytes of its
    /// activation record. A duplicate name is dropped.
    pub fn declare_symbol(
        &mut self,
        name: &str,
        value_type: ValueType,
        width: usize,
    ) -> Result<usize, String> {
        let current = self.current();
        let scope = &mut self.scopes[current];
        if scope.symbol(name).is_some() {
            return Err(format!(
                "a variable or parameter named {name} is already defined in this scope"
            ));
        }

        let offset = scope.offset_counter;
        scope.children.push(SymbolNode::Leaf(Symbol {
            name: name.to_string(),
            value_type,
            offset,
        }));
        scope.offset_counter += width;
        Ok(offset)
    }

    /// Find a named scope visible from the innermost scope.
    pub fn resolve_scope_name(&self, name: &str) -> Result<ScopeId, String> {
        self.stack
            .iter()
            .rev()
            .find_map(|&open| {
                self.scopes[open]
                    .scopes()
                    .find(|&id| self.scopes[id].name == name)
            })
            .ok_or_else(|| format!("no program or procedure named {name} is visible in this scope"))
    }

    /// Type of the nearest visible leaf named `name`.
    pub fn resolve_symbol_type(&self, name: &str) -> Result<ValueType, String> {
        self.stack
            .iter()
            .rev()
            .find_map(|&open| self.scopes[open].symbol(name))
            .map(|symbol| symbol.value_type)
            .ok_or_else(|| format!("no variable named {name} is declared in this scope"))
    }

    /// Formal parameters of the procedure `name`, in declaration order.
    /// Empty when no such procedure is visible.
    pub fn formal_parameters_of(&self, name: &str) -> Vec<&Symbol> {
        match self.resolve_scope_name(name) {
            Ok(id) => self.scopes[id]
                .symbols()
                .filter(|symbol| symbol.value_type.is_param())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_root() {
        let tree = ScopeTree::new();
        assert_eq!(tree.current(), ROOT_SCOPE);
        assert_eq!(tree.depth(), 1);
        assert!(tree.program().is_none());
    }

    #[test]
    fn test_offsets_advance_per_scope() {
        let mut tree = ScopeTree::new();
        tree.push_scope("p").unwrap();
        assert_eq!(tree.declare_symbol("x", ValueType::Int, 4), Ok(0));
        assert_eq!(tree.declare_symbol("y", ValueType::Real, 8), Ok(4));
        tree.push_scope("q").unwrap();
        assert_eq!(tree.declare_symbol("a", ValueType::ParamInt, 0), Ok(0));
        assert_eq!(tree.declare_symbol("z", ValueType::ArrayOfInt, 40), Ok(0));
        assert_eq!(tree.declare_symbol("w", ValueType::Int, 4), Ok(40));
        tree.pop_scope();
        assert_eq!(tree.declare_symbol("v", ValueType::Int, 4), Ok(12));
    }

    #[test]
    fn test_duplicate_leaf_is_dropped() {
        let mut tree = ScopeTree::new();
        tree.push_scope("p").unwrap();
        tree.declare_symbol("x", ValueType::Int, 4).unwrap();
        assert!(tree.declare_symbol("x", ValueType::Real, 8).is_err());
        assert_eq!(tree.resolve_symbol_type("x"), Ok(ValueType::Int));
        assert_eq!(tree.program().unwrap().symbols().count(), 1);
    }

    #[test]
    fn test_colliding_scope_is_renamed_and_pushed() {
        let mut tree = ScopeTree::new();
        tree.push_scope("p").unwrap();
        tree.push_scope("f").unwrap();
        tree.pop_scope();
        let err = tree.push_scope("f").unwrap_err();
        assert!(err.contains("f"));
        let current = tree.get(tree.current()).unwrap();
        assert_eq!(current.name, "f#");
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_lookup_walks_outward() {
        let mut tree = ScopeTree::new();
        tree.push_scope("p").unwrap();
        tree.declare_symbol("x", ValueType::Real, 8).unwrap();
        tree.push_scope("inner").unwrap();
        tree.declare_symbol("x", ValueType::ParamInt, 0).unwrap();
        assert_eq!(tree.resolve_symbol_type("x"), Ok(ValueType::ParamInt));
        tree.pop_scope();
        assert_eq!(tree.resolve_symbol_type("x"), Ok(ValueType::Real));
        assert!(tree.resolve_symbol_type("missing").is_err());
        assert!(tree.resolve_scope_name("inner").is_ok());
        assert!(tree.resolve_scope_name("nope").is_err());
    }

    #[test]
    fn test_formal_parameters_in_order() {
        let mut tree = ScopeTree::new();
        tree.push_scope("p").unwrap();
        tree.push_scope("f").unwrap();
        tree.declare_symbol("a", ValueType::ParamInt, 0).unwrap();
        tree.declare_symbol("b", ValueType::ParamArrayReal, 0).unwrap();
        tree.declare_symbol("local", ValueType::Int, 4).unwrap();
        tree.pop_scope();

        let formals: Vec<_> = tree
            .formal_parameters_of("f")
            .into_iter()
            .map(|s| (s.name.as_str(), s.value_type))
            .collect();
        assert_eq!(
            formals,
            vec![("a", ValueType::ParamInt), ("b", ValueType::ParamArrayReal)]
        );
        assert!(tree.formal_parameters_of("g").is_empty());
    }

    #[test]
    fn test_root_is_never_popped() {
        let mut tree = ScopeTree::new();
        tree.pop_scope();
        tree.pop_scope();
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_nesting_depth() {
        let mut tree = ScopeTree::new();
        let p = tree.push_scope("p").unwrap();
        let q = tree.push_scope("q").unwrap();
        assert_eq!(tree.nesting(p), 0);
        assert_eq!(tree.nesting(q), 1);
    }
}
