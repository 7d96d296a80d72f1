//! Parse options

use smol_str::SmolStr;

use super::terminals::PREDEFINED_STRUCTS;

/// Options for a single parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Emit a `trace` event for every shift and reduce
    pub trace: bool,
    /// Struct type names known before the first token, in addition to the
    /// predefined ones
    pub type_names: Vec<SmolStr>,
    /// Know the built-in `gl_*` struct names from the start
    pub predefined_structs: bool,
    /// Object-like macros defined before the first line, as if by a header
    /// of `#define NAME VALUE` lines
    pub defines: Vec<(SmolStr, SmolStr)>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trace: false,
            type_names: Vec::new(),
            predefined_structs: true,
            defines: Vec::new(),
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_type_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.type_names.push(name.into());
        self
    }

    pub fn with_predefined_structs(mut self, enabled: bool) -> Self {
        self.predefined_structs = enabled;
        self
    }

    pub fn with_define(mut self, name: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        self.defines.push((name.into(), value.into()));
        self
    }

    /// Every type name the lexer starts out with
    pub fn initial_type_names(&self) -> impl Iterator<Item = SmolStr> + '_ {
        let predefined: &[&str] = if self.predefined_structs {
            PREDEFINED_STRUCTS
        } else {
            &[]
        };
        predefined
            .iter()
            .map(|name| SmolStr::new(name))
            .chain(self.type_names.iter().cloned())
    }
}
