//! Short/long alias pairs.
//!
//! Every declared parameter or flag owns exactly one `-x` token and one
//! `--name` token. The registry maps each token to its counterpart so the
//! matcher can store a resolved value under both keys.

use indexmap::IndexMap;

/// Build the short token for `chr` (`'p'` => `-p`).
pub fn prefixed_short(chr: char) -> String {
    format!("-{chr}")
}

/// Build the long token for `name` (`"port"` => `--port`).
pub fn prefixed_long(name: &str) -> String {
    format!("--{name}")
}

/// Normalize a lookup name used by the match accessors.
///
/// Bare names are treated as long names; anything already starting with `-`
/// is taken verbatim so short tokens can be queried too.
pub(crate) fn lookup_token(name: &str) -> String {
    if name.starts_with('-') {
        name.to_string()
    } else {
        prefixed_long(name)
    }
}

/// Bidirectional mapping between short and long alias tokens.
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry {
    names: IndexMap<String, String>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `-chr` and `--name` to each other, returning the pair of tokens.
    ///
    /// Re-binding an existing token silently replaces its counterpart.
    pub fn bind(&mut self, chr: char, name: &str) -> (String, String) {
        let short = prefixed_short(chr);
        let long = prefixed_long(name);
        self.names.insert(short.clone(), long.clone());
        self.names.insert(long.clone(), short.clone());
        (short, long)
    }

    /// The other token of the pair `token` belongs to.
    pub fn counterpart(&self, token: &str) -> Option<&str> {
        self.names.get(token).map(String::as_str)
    }

    /// Both tokens of the pair, shorter token first.
    ///
    /// Falls back to `(token, token)` for an unbound token.
    pub fn ordered_pair<'a>(&'a self, token: &'a str) -> (&'a str, &'a str) {
        let other = self.counterpart(token).unwrap_or(token);
        if token.len() > other.len() {
            (other, token)
        } else {
            (token, other)
        }
    }
}
