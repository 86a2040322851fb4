use thiserror::Error;

/// Errors raised while turning the requested criteria into a filter plan
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Undefined regex name ({0})")]
    UndefinedPattern(String),

    #[error("Pattern '{name}' does not compile: {source}")]
    InvalidRegex {
        name: String,
        #[source]
        source: regex::Error,
    },
}
