use thiserror::Error;

/// Boxed cause returned by a caller-supplied mapper.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    /// A required parameter was absent and has no default.
    ///
    /// `first` is always the shorter of the two alias tokens.
    #[error("Missing required parameter: \"{first}\" / \"{second}\"")]
    MissingRequiredParameter { first: String, second: String },

    #[error("Failed to resolve parameter: \"{short}\" / \"{long}\": {source}")]
    ParameterResolution {
        short: String,
        long: String,
        #[source]
        source: BoxError,
    },

    #[error("Failed to cast value '{value}' to type '{target}'.")]
    CastFailure { value: String, target: String },

    /// `match_args` was re-entered on the same parser from its own error handler.
    #[error("Infinite recursive call to Parser::match_args detected.")]
    InfiniteRecursion,

    /// The error handler returned `Ok(())` instead of terminating the call.
    #[error("Error handler did not terminate execution flow of `{operation}`.")]
    HandlerDidNotTerminate { operation: &'static str },
}

impl Error {
    /// Errors that are routed through the parser's error handler.
    ///
    /// Contract violations bypass the handler.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredParameter { .. }
                | Self::ParameterResolution { .. }
                | Self::CastFailure { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
