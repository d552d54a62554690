//! Typed access to one match's resolved values.

use crate::alias::lookup_token;
use crate::error::{Error, Result};
use crate::parser::Parser;
use crate::value::Value;
use indexmap::IndexMap;
use std::any::{Any, type_name};
use std::collections::HashSet;

/// Result of one [`Parser::match_args`] call.
///
/// Names passed to the accessors are long names (`"port"`), or full alias
/// tokens (`"-p"`, `"--port"`). Accessors return `Ok(None)` for names that
/// were never declared.
#[derive(Debug, Clone)]
pub struct Match<'p> {
    parser: &'p Parser,
    values: IndexMap<String, Value>,
    enabled: HashSet<String>,
    all: IndexMap<String, Value>,
}

impl<'p> Match<'p> {
    pub(crate) fn new(
        parser: &'p Parser,
        values: IndexMap<String, Value>,
        enabled: HashSet<String>,
    ) -> Self {
        let mut all = values.clone();
        // Every declared flag reads as `true` here, enabled or not.
        for flag in parser.flags() {
            all.insert(flag.to_string(), Value::Bool(true));
        }
        Self {
            parser,
            values,
            enabled,
            all,
        }
    }

    /// Copy of every resolved value keyed by both alias tokens, plus every
    /// declared flag alias mapped to `true`.
    ///
    /// Unlike [`Match::get_flag`], this does not tell enabled and disabled
    /// flags apart.
    pub fn all(&self) -> IndexMap<String, Value> {
        self.all.clone()
    }

    pub fn get(&self, name: &str) -> Result<Option<&str>> {
        Ok(self.get_ref::<String>(name)?.map(String::as_str))
    }

    pub fn get_int(&self, name: &str) -> Result<Option<i64>> {
        Ok(self.get_ref::<i64>(name)?.copied())
    }

    /// Whether the flag appeared in the matched input.
    pub fn get_flag(&self, name: &str) -> bool {
        self.enabled.contains(&lookup_token(name))
    }

    /// Owned value of any type a resolver can produce.
    pub fn get_as<T: Any + Clone>(&self, name: &str) -> Result<Option<T>> {
        Ok(self.get_ref::<T>(name)?.cloned())
    }

    /// Borrowed value of any type a resolver can produce.
    ///
    /// A value of a different type is a cast failure, routed through the
    /// parser's error handler.
    pub fn get_ref<T: Any>(&self, name: &str) -> Result<Option<&T>> {
        let Some(value) = self.values.get(&lookup_token(name)) else {
            return Ok(None);
        };
        match value.downcast_ref::<T>() {
            Some(v) => Ok(Some(v)),
            None => {
                let err = Error::CastFailure {
                    value: value.to_string(),
                    target: simple_type_name(type_name::<T>()),
                };
                Err(self.parser.route(err, "get_as"))
            }
        }
    }

    pub fn parser(&self) -> &'p Parser {
        self.parser
    }
}

/// Strip module paths from a type name (`alloc::vec::Vec<alloc::string::String>`
/// => `Vec<String>`).
fn simple_type_name(full: &str) -> String {
    let mut out = String::new();
    let mut segment = String::new();
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            segment.clear();
        } else if c.is_alphanumeric() || c == '_' {
            segment.push(c);
        } else {
            out.push_str(&segment);
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(&segment);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> Parser {
        Parser::builder()
            .with_param_or_else('u', "user", "username", || "guest".to_string())
            .with_mapped_param_or_else('p', "port", "port", |s| s.parse::<i64>(), || 8080)
            .with_flag('v', "verbose", "enable extra logging")
            .build()
    }

    #[test]
    fn accessors_accept_short_and_long_tokens() {
        let parser = parser();
        let m = parser.match_args(&["-p", "9000", "--verbose"]).unwrap();
        assert_eq!(m.get_int("port").unwrap(), Some(9000));
        assert_eq!(m.get_int("-p").unwrap(), Some(9000));
        assert_eq!(m.get_int("--port").unwrap(), Some(9000));
        assert!(m.get_flag("verbose"));
        assert!(m.get_flag("-v"));
    }

    #[test]
    fn undeclared_names_are_none() {
        let parser = parser();
        let m = parser.match_args::<&str>(&[]).unwrap();
        assert_eq!(m.get("nope").unwrap(), None);
        assert_eq!(m.get_int("nope").unwrap(), None);
        assert!(!m.get_flag("nope"));
        // Flags have no resolved value of their own.
        assert_eq!(m.get_as::<bool>("verbose").unwrap(), None);
    }

    #[test]
    fn wrong_type_is_a_cast_failure() {
        let parser = parser();
        let m = parser.match_args::<&str>(&[]).unwrap();
        let err = m.get_int("user").unwrap_err();
        assert_eq!(err.to_string(), "Failed to cast value 'guest' to type 'i64'.");
        let err = m.get("port").unwrap_err();
        assert_eq!(err.to_string(), "Failed to cast value '8080' to type 'String'.");
    }

    #[test]
    fn all_is_a_copy() {
        let parser = parser();
        let m = parser.match_args(&["-u", "admin"]).unwrap();
        let mut all = m.all();
        all.clear();
        assert_eq!(m.all().len(), 6);
        assert_eq!(m.parser().program(), "<program>");
    }

    #[test]
    fn simple_type_name_strips_paths() {
        assert_eq!(simple_type_name("alloc::string::String"), "String");
        assert_eq!(
            simple_type_name("alloc::vec::Vec<alloc::string::String>"),
            "Vec<String>"
        );
        assert_eq!(simple_type_name("i64"), "i64");
        assert_eq!(
            simple_type_name("std::collections::hash::map::HashMap<i32, my_crate::Point>"),
            "HashMap<i32, Point>"
        );
    }
}
