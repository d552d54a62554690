//! Fluent declaration of parameters and flags.

use crate::alias::{AliasRegistry, prefixed_long, prefixed_short};
use crate::error::{BoxError, Error, Result};
use crate::parser::{ErrorHandler, Parser, Resolver, resolver};
use crate::usage;
use crate::value::{IntoValue, Value};
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;

/// Accumulates parameter and flag declarations into a [`Parser`].
///
/// Every declaration appends one line to the usage transcript. Declaring an
/// alias twice is not an error: the later declaration wins.
pub struct Builder {
    names: AliasRegistry,
    resolvers: IndexMap<String, Resolver>,
    flags: IndexSet<String>,
    transcript: String,
    program: String,
    error_handler: ErrorHandler,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            names: AliasRegistry::new(),
            resolvers: IndexMap::new(),
            flags: IndexSet::new(),
            transcript: String::new(),
            program: usage::DEFAULT_PROGRAM.to_string(),
            error_handler: Arc::new(rethrow),
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required string parameter.
    pub fn with_param(self, chr: char, name: &str, desc: &str) -> Self {
        self.bind_resolver(chr, name, desc, resolver(|raw| Ok(raw.map(Value::from))))
    }

    /// String parameter falling back to `default` when absent.
    pub fn with_param_or_else<D>(self, chr: char, name: &str, desc: &str, default: D) -> Self
    where
        D: Fn() -> String + Send + Sync + 'static,
    {
        self.bind_resolver(
            chr,
            name,
            desc,
            resolver(move |raw| {
                let value = raw.map(str::to_string).unwrap_or_else(&default);
                Ok(Some(Value::Str(value)))
            }),
        )
    }

    /// Required parameter converted by `mapper`.
    ///
    /// A mapper error is reported as [`Error::ParameterResolution`] naming
    /// both aliases.
    pub fn with_mapped_param<T, E, M>(self, chr: char, name: &str, desc: &str, mapper: M) -> Self
    where
        T: IntoValue,
        E: Into<BoxError>,
        M: Fn(&str) -> std::result::Result<T, E> + Send + Sync + 'static,
    {
        let (short, long) = (prefixed_short(chr), prefixed_long(name));
        self.bind_resolver(
            chr,
            name,
            desc,
            resolver(move |raw| match raw {
                Some(raw) => apply_mapper(&mapper, raw, &short, &long).map(Some),
                None => Ok(None),
            }),
        )
    }

    /// Parameter converted by `mapper`, falling back to `default` when absent.
    pub fn with_mapped_param_or_else<T, E, M, D>(
        self,
        chr: char,
        name: &str,
        desc: &str,
        mapper: M,
        default: D,
    ) -> Self
    where
        T: IntoValue,
        E: Into<BoxError>,
        M: Fn(&str) -> std::result::Result<T, E> + Send + Sync + 'static,
        D: Fn() -> T + Send + Sync + 'static,
    {
        let (short, long) = (prefixed_short(chr), prefixed_long(name));
        self.bind_resolver(
            chr,
            name,
            desc,
            resolver(move |raw| match raw {
                Some(raw) => apply_mapper(&mapper, raw, &short, &long).map(Some),
                None => Ok(Some(default().into_value())),
            }),
        )
    }

    /// String parameter whose fallback may fail.
    ///
    /// A failing `default` is reported as [`Error::ParameterResolution`] when
    /// the parameter is absent, and the usage line reads `(required)`.
    pub fn with_param_or_try_else<E, D>(self, chr: char, name: &str, desc: &str, default: D) -> Self
    where
        E: Into<BoxError>,
        D: Fn() -> std::result::Result<String, E> + Send + Sync + 'static,
    {
        let (short, long) = (prefixed_short(chr), prefixed_long(name));
        self.bind_resolver(
            chr,
            name,
            desc,
            resolver(move |raw| match raw {
                Some(raw) => Ok(Some(Value::from(raw))),
                None => apply_default(&default, &short, &long).map(Some),
            }),
        )
    }

    /// Parameter converted by `mapper` whose fallback may fail.
    pub fn with_mapped_param_or_try_else<T, E, F, M, D>(
        self,
        chr: char,
        name: &str,
        desc: &str,
        mapper: M,
        default: D,
    ) -> Self
    where
        T: IntoValue,
        E: Into<BoxError>,
        F: Into<BoxError>,
        M: Fn(&str) -> std::result::Result<T, E> + Send + Sync + 'static,
        D: Fn() -> std::result::Result<T, F> + Send + Sync + 'static,
    {
        let (short, long) = (prefixed_short(chr), prefixed_long(name));
        self.bind_resolver(
            chr,
            name,
            desc,
            resolver(move |raw| match raw {
                Some(raw) => apply_mapper(&mapper, raw, &short, &long).map(Some),
                None => apply_default(&default, &short, &long).map(Some),
            }),
        )
    }

    /// Boolean switch that takes no value.
    pub fn with_flag(mut self, chr: char, name: &str, desc: &str) -> Self {
        let (short, long) = self.names.bind(chr, name);
        self.transcript.push_str(&usage::flag_line(&short, &long, desc));
        tracing::trace!(%short, %long, "declared flag");
        self.flags.insert(short);
        self.flags.insert(long);
        self
    }

    /// Replace the handler that receives resolution, missing-parameter and
    /// cast errors.
    ///
    /// The handler must terminate the failing call, either by returning
    /// `Err` or by diverging. Returning `Ok(())` is reported as
    /// [`Error::HandlerDidNotTerminate`].
    pub fn with_error_handler<H>(mut self, handler: H) -> Self
    where
        H: Fn(Error, &Parser) -> Result<()> + Send + Sync + 'static,
    {
        self.error_handler = Arc::new(handler);
        self
    }

    /// Program name shown in the usage header.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn build(self) -> Parser {
        Parser::new(
            self.names,
            self.resolvers,
            self.flags,
            self.transcript,
            self.program,
            self.error_handler,
        )
    }

    fn bind_resolver(mut self, chr: char, name: &str, desc: &str, resolve: Resolver) -> Self {
        let (short, long) = self.names.bind(chr, name);
        // The default is probed eagerly; a failing probe reads as required.
        let probe = resolve(None).ok().flatten();
        self.transcript
            .push_str(&usage::param_line(&short, &long, desc, probe.as_ref()));
        tracing::trace!(%short, %long, required = probe.is_none(), "declared parameter");
        self.resolvers.insert(short, Arc::clone(&resolve));
        self.resolvers.insert(long, resolve);
        self
    }
}

fn rethrow(err: Error, _: &Parser) -> Result<()> {
    Err(err)
}

fn apply_mapper<T, E, M>(mapper: &M, raw: &str, short: &str, long: &str) -> Result<Value>
where
    T: IntoValue,
    E: Into<BoxError>,
    M: Fn(&str) -> std::result::Result<T, E>,
{
    mapper(raw)
        .map(IntoValue::into_value)
        .map_err(|err| Error::ParameterResolution {
            short: short.to_string(),
            long: long.to_string(),
            source: err.into(),
        })
}

fn apply_default<T, F, D>(default: &D, short: &str, long: &str) -> Result<Value>
where
    T: IntoValue,
    F: Into<BoxError>,
    D: Fn() -> std::result::Result<T, F>,
{
    default()
        .map(IntoValue::into_value)
        .map_err(|err| Error::ParameterResolution {
            short: short.to_string(),
            long: long.to_string(),
            source: err.into(),
        })
}
