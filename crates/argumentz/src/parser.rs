//! The built parser and the matching algorithm.

use crate::alias::AliasRegistry;
use crate::builder::Builder;
use crate::error::{Error, Result};
use crate::matches::Match;
use crate::usage;
use crate::value::Value;
use indexmap::{IndexMap, IndexSet};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Maps an optional raw string to a value.
///
/// `Ok(None)` means "absent and required".
pub(crate) type Resolver = Arc<dyn Fn(Option<&str>) -> Result<Option<Value>> + Send + Sync>;

pub(crate) type ErrorHandler = Arc<dyn Fn(Error, &Parser) -> Result<()> + Send + Sync>;

pub(crate) fn resolver<F>(f: F) -> Resolver
where
    F: Fn(Option<&str>) -> Result<Option<Value>> + Send + Sync + 'static,
{
    Arc::new(f)
}

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static ACTIVE: RefCell<HashSet<u64>> = RefCell::new(HashSet::new());
}

/// Marks a parser as matching on the current thread for as long as it lives.
struct CallGuard {
    id: u64,
}

impl CallGuard {
    fn enter(id: u64) -> Result<Self> {
        let fresh = ACTIVE.with(|active| active.borrow_mut().insert(id));
        if fresh {
            Ok(Self { id })
        } else {
            Err(Error::InfiniteRecursion)
        }
    }
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        ACTIVE.with(|active| {
            active.borrow_mut().remove(&self.id);
        });
    }
}

/// An immutable set of parameter and flag declarations.
///
/// Built once through [`Parser::builder`] and reusable for any number of
/// [`Parser::match_args`] calls, including concurrent ones from different
/// threads. Clones share the same identity.
#[derive(Clone)]
pub struct Parser {
    id: u64,
    names: AliasRegistry,
    resolvers: IndexMap<String, Resolver>,
    flags: IndexSet<String>,
    transcript: String,
    program: String,
    error_handler: ErrorHandler,
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("id", &self.id)
            .field("names", &self.names)
            .field("params", &self.resolvers.keys().collect::<Vec<_>>())
            .field("flags", &self.flags)
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}

impl Parser {
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub(crate) fn new(
        names: AliasRegistry,
        resolvers: IndexMap<String, Resolver>,
        flags: IndexSet<String>,
        transcript: String,
        program: String,
        error_handler: ErrorHandler,
    ) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            names,
            resolvers,
            flags,
            transcript,
            program,
            error_handler,
        }
    }

    /// Match `args` (without the program name) against the declarations.
    ///
    /// Tokens are scanned left to right:
    /// - a flag alias enables the flag under both of its aliases
    /// - a parameter alias followed by another token resolves that token
    /// - anything else is ignored, including a trailing parameter alias
    ///
    /// Parameters still unresolved afterwards are resolved as absent, which
    /// either yields their default or fails as missing.
    pub fn match_args<S: AsRef<str>>(&self, args: &[S]) -> Result<Match<'_>> {
        let _guard = CallGuard::enter(self.id)?;
        tracing::debug!(parser = self.id, tokens = args.len(), "matching arguments");

        let mut values: IndexMap<String, Value> = IndexMap::new();
        let mut enabled: HashSet<String> = HashSet::new();

        let mut i = 0usize;
        while i < args.len() {
            let token = args[i].as_ref();

            if self.flags.contains(token) {
                enabled.insert(token.to_string());
                if let Some(other) = self.names.counterpart(token) {
                    enabled.insert(other.to_string());
                }
                i += 1;
                continue;
            }

            if let Some(resolve) = self.resolvers.get(token) {
                if let Some(raw) = args.get(i + 1) {
                    match resolve(Some(raw.as_ref())) {
                        Ok(Some(value)) => self.store(&mut values, token, value),
                        Ok(None) => {}
                        Err(err) => return Err(self.route(err, "match")),
                    }
                    i += 2;
                    continue;
                }
                tracing::trace!(token, "parameter without a value dropped");
            } else {
                tracing::trace!(token, "ignoring unrecognized token");
            }
            i += 1;
        }

        for (token, resolve) in &self.resolvers {
            if values.contains_key(token) {
                continue;
            }
            match resolve(None) {
                Ok(Some(value)) => self.store_default(&mut values, token, value),
                Ok(None) => {
                    let (first, second) = self.names.ordered_pair(token);
                    let err = Error::MissingRequiredParameter {
                        first: first.to_string(),
                        second: second.to_string(),
                    };
                    return Err(self.route(err, "match"));
                }
                Err(err) => return Err(self.route(err, "match")),
            }
        }

        tracing::debug!(
            parser = self.id,
            values = values.len(),
            flags = enabled.len(),
            "arguments matched"
        );
        Ok(Match::new(self, values, enabled))
    }

    /// Usage header followed by the declaration transcript.
    pub fn usage(&self) -> String {
        usage::render(&self.program, &self.transcript)
    }

    /// Write [`Parser::usage`] and a trailing newline to `out`.
    pub fn print_usage<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.usage())
    }

    /// The declaration lines without the usage header.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub(crate) fn flags(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    /// Hand `err` to the error handler and turn its outcome into the error the
    /// failing `operation` returns.
    ///
    /// Contract violations are returned as they are, without the handler.
    pub(crate) fn route(&self, err: Error, operation: &'static str) -> Error {
        if !err.is_user_facing() {
            return err;
        }
        tracing::debug!(parser = self.id, error = %err, operation, "routing error to handler");
        match (self.error_handler)(err, self) {
            Err(err) => err,
            Ok(()) => Error::HandlerDidNotTerminate { operation },
        }
    }

    /// Store a value read from the input under `token` and its counterpart.
    fn store(&self, values: &mut IndexMap<String, Value>, token: &str, value: Value) {
        if let Some(other) = self.names.counterpart(token) {
            values.insert(other.to_string(), value.clone());
        }
        values.insert(token.to_string(), value);
    }

    /// Store a fallback value under `token`, and under its counterpart unless
    /// that one was already resolved.
    fn store_default(&self, values: &mut IndexMap<String, Value>, token: &str, value: Value) {
        if let Some(other) = self.names.counterpart(token) {
            values
                .entry(other.to_string())
                .or_insert_with(|| value.clone());
        }
        values.insert(token.to_string(), value);
    }
}
