//! Identifier interning.
//!
//! Variable and function names are interned to a compact `Symbol` so that
//! the parser's name lookups (locals, parameters, globals, function table)
//! compare `u32`s instead of `String`s. The table is a single process-wide
//! table, which matches this compiler's single-compilation-per-process
//! lifetime: nothing is ever evicted.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, OnceLock};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(text: &str) -> Self {
        table().lock().unwrap().intern(text)
    }

    pub fn as_str(&self) -> &'static str {
        table().lock().unwrap().get(*self)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

struct Interner {
    strings: Vec<&'static str>,
    indices: HashMap<&'static str, u32>,
}

impl Interner {
    fn new() -> Self {
        Self {
            strings: Vec::new(),
            indices: HashMap::new(),
        }
    }

    fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&index) = self.indices.get(text) {
            return Symbol(index);
        }
        let leaked: &'static str = Box::leak(text.to_string().into_boxed_str());
        let index = self.strings.len() as u32;
        self.strings.push(leaked);
        self.indices.insert(leaked, index);
        Symbol(index)
    }

    fn get(&self, symbol: Symbol) -> &'static str {
        self.strings[symbol.0 as usize]
    }
}

fn table() -> &'static Mutex<Interner> {
    static TABLE: OnceLock<Mutex<Interner>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(Interner::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_string_yields_same_symbol() {
        let a = Symbol::intern("count");
        let b = Symbol::intern("count");
        assert_eq!(a, b);
    }

    #[test]
    fn interning_distinct_strings_yields_distinct_symbols() {
        let a = Symbol::intern("alpha_unique_marker");
        let b = Symbol::intern("beta_unique_marker");
        assert_ne!(a, b);
    }

    #[test]
    fn as_str_recovers_original_text() {
        let sym = Symbol::intern("recovered_marker");
        assert_eq!(sym.as_str(), "recovered_marker");
    }
}
