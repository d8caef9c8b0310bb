/// The reason a value was rejected as a domain name.
///
/// Every variant is an invalid domain; the more specific ones report
/// the first disallowed character class that was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error, derive_more::IsVariant)]
pub enum DomainError {
  /// The value is not a syntactically-valid domain name.
  #[error("invalid domain")]
  Invalid,
  /// The value contains `/` or `\`.
  #[error("invalid domain: contains a slash")]
  SlashInDomain,
  /// The value contains `@`.
  #[error("invalid domain: contains an at sign")]
  AtInDomain,
  /// The value contains `:`.
  #[error("invalid domain: contains a colon")]
  ColonInDomain,
  /// The value contains a whitespace character.
  #[error("invalid domain: contains whitespace")]
  WhitespaceInDomain,
}

impl DomainError {
  /// Returns the error message.
  #[inline]
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Invalid => "invalid domain",
      Self::SlashInDomain => "invalid domain: contains a slash",
      Self::AtInDomain => "invalid domain: contains an at sign",
      Self::ColonInDomain => "invalid domain: contains a colon",
      Self::WhitespaceInDomain => "invalid domain: contains whitespace",
    }
  }
}

/// An error which can be returned by any of the validators.
///
/// ## Example
///
/// ```rust
/// use netcheck::{domain, DomainError, Error, Options};
///
/// let err = domain("foo/bar", Options::new()).unwrap_err();
/// assert_eq!(err, Error::InvalidDomain(DomainError::SlashInDomain));
/// assert!(err.is_invalid_domain());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error, derive_more::IsVariant)]
pub enum Error {
  /// The value is empty and empty values are not allowed.
  #[error("value is empty")]
  EmptyValue,
  /// The value is not string-like.
  #[error("value cannot be coerced to a string")]
  CannotCoerce,
  /// The value is not a valid domain name.
  #[error(transparent)]
  InvalidDomain(#[from] DomainError),
  /// The value is not a valid URL.
  #[error("invalid url")]
  InvalidUrl,
  /// The value is not a valid email address.
  #[error("invalid email address")]
  InvalidEmail,
  /// The value is neither a valid IPv4 nor a valid IPv6 address.
  #[error("invalid ip address")]
  InvalidIpAddress,
  /// The value is not a valid MAC address.
  #[error("invalid mac address")]
  InvalidMacAddress,
}

impl Error {
  /// Returns the error message.
  #[inline]
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::EmptyValue => "value is empty",
      Self::CannotCoerce => "value cannot be coerced to a string",
      Self::InvalidDomain(e) => e.as_str(),
      Self::InvalidUrl => "invalid url",
      Self::InvalidEmail => "invalid email address",
      Self::InvalidIpAddress => "invalid ip address",
      Self::InvalidMacAddress => "invalid mac address",
    }
  }

  #[inline]
  pub(crate) const fn domain() -> Self {
    Self::InvalidDomain(DomainError::Invalid)
  }
}
