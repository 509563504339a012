use thiserror::Error;

/// Errors raised by document operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomError {
    #[error("element '{0}' not found")]
    ElementNotFound(String),

    #[error("element id '{0}' is already in use")]
    DuplicateId(String),

    #[error("the document root cannot be removed")]
    RemoveRoot,

    #[error("attribute '{0}' cannot be changed")]
    ReadOnlyAttribute(String),

    #[error("unknown style property '{0}'")]
    UnknownStyleProperty(String),

    #[error("invalid value '{value}' for style property '{property}'")]
    InvalidStyleValue { property: String, value: String },

    #[error("malformed style declaration '{0}'")]
    InvalidDeclaration(String),

    #[error("custom element '{0}' is already defined")]
    AlreadyDefined(String),
}
