use core::str::FromStr;

use memchr::{memchr, memchr_iter};

use std::borrow::Cow;

use super::{
  candidate::prepare, domain::check_domain, ip::parse_ip_address, patterns, Candidate, Error,
  Options,
};

/// An email address, kept exactly as it was written.
///
/// ## Example
///
/// ```rust
/// use netcheck::Email;
///
/// let email: Email = r#""john@doe"@Example.com"#.parse().unwrap();
/// assert_eq!(email.local_part(), r#""john@doe""#);
/// assert_eq!(email.domain_part(), "Example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[repr(transparent)]
pub struct Email(pub(crate) String);

impl Email {
  /// Returns the address as a `str`.
  #[inline]
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Returns the inner `String`.
  #[inline]
  pub fn into_inner(self) -> String {
    self.0
  }

  /// Returns everything before the final `@`.
  #[inline]
  pub fn local_part(&self) -> &str {
    self.0.rsplit_once('@').map_or("", |(local, _)| local)
  }

  /// Returns everything after the final `@`, brackets included for
  /// address literals.
  #[inline]
  pub fn domain_part(&self) -> &str {
    self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
  }
}

impl AsRef<str> for Email {
  #[inline]
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl From<Email> for String {
  #[inline]
  fn from(value: Email) -> Self {
    value.0
  }
}

impl FromStr for Email {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.is_empty() {
      return Err(Error::EmptyValue);
    }
    check_email(s).map(|_| Email(s.to_string()))
  }
}

impl TryFrom<&str> for Email {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    value.parse()
  }
}

/// Validates an email address.
///
/// Beyond plain `local@domain.tld` addresses this accepts quoted local parts
/// (which may contain `@`), a single `(comment)`, and IP address literals
/// such as `user@[192.0.2.1]` or `user@[IPv6:2001:db8::1]`. A display name
/// wrapped around `<...>` must be quoted. The input is returned unchanged.
///
/// ## Example
///
/// ```rust
/// use netcheck::{email, Error, Options};
///
/// let opts = Options::new();
/// assert!(email("user@example.com", opts).is_ok());
/// assert!(email(r#""a@b"@example.com"#, opts).is_ok());
/// assert!(email("john.smith(comment)@example.com", opts).is_ok());
/// assert!(email("jsmith@[192.168.2.1]", opts).is_ok());
/// assert_eq!(email("@example.com", opts), Err(Error::InvalidEmail));
/// assert_eq!(email("plainaddress", opts), Err(Error::InvalidEmail));
/// ```
pub fn email<V>(value: &V, options: Options) -> Result<Option<Email>, Error>
where
  V: Candidate + ?Sized,
{
  let Some(value) = prepare(value, options.allow_empty(), Error::CannotCoerce)? else {
    return Ok(None);
  };
  check_email(value).map(|_| Some(Email(value.to_string())))
}

/// Runs the email checks on a non-empty string.
pub(crate) fn check_email(value: &str) -> Result<(), Error> {
  if memchr(b'@', value.as_bytes()).is_none() {
    return Err(Error::InvalidEmail);
  }

  let value = strip_comment(value)?;
  let value = value.as_ref();

  check_display_name_quotes(value)?;
  check_quoted_at_signs(value)?;

  let (local, domain) = value.rsplit_once('@').ok_or(Error::InvalidEmail)?;

  let domain = match domain.strip_prefix('[').and_then(|d| d.strip_suffix(']')) {
    Some(literal) => {
      let ip = strip_ipv6_tag(literal);
      if parse_ip_address(ip).is_ok() {
        // Only the local part is left to check; borrow the rules of a
        // hostname address for it.
        return check_email(&format!("{local}@test.com")).map_err(|_| Error::InvalidEmail);
      }
      literal
    }
    None => domain,
  };

  check_domain(domain, false, false).map_err(|_| Error::InvalidEmail)?;

  let matched = patterns::EMAIL.find(value).ok_or(Error::InvalidEmail)?;
  let prefix = &value[..matched.start()];
  if let Some(first) = prefix.chars().next() {
    if first.is_ascii_punctuation() || prefix.contains("..") {
      return Err(Error::InvalidEmail);
    }
  }

  if matched.end() != value.len() {
    return Err(Error::InvalidEmail);
  }

  Ok(())
}

/// Removes the first `(...)` comment. A lone parenthesis, or a `)` before
/// the first `(`, is an error.
fn strip_comment(value: &str) -> Result<Cow<'_, str>, Error> {
  match (value.find('('), value.find(')')) {
    (Some(open), Some(close)) if close > open => {
      let mut stripped = String::with_capacity(value.len());
      stripped.push_str(&value[..open]);
      stripped.push_str(&value[close + 1..]);
      Ok(Cow::Owned(stripped))
    }
    (None, None) => Ok(Cow::Borrowed(value)),
    _ => Err(Error::InvalidEmail),
  }
}

/// `"Display Name" <user@example.com>`-style wrapping needs a quote before
/// the `<` and another one at or after the `>`.
fn check_display_name_quotes(value: &str) -> Result<(), Error> {
  let lt = value.find('<');
  let gt = value.find('>');
  if lt.is_none() && gt.is_none() {
    return Ok(());
  }

  let opened = lt.and_then(|lt| value[..lt].find('"'));
  let closed = gt.and_then(|gt| value[gt..].find('"'));
  match (opened, closed) {
    (Some(_), Some(_)) => Ok(()),
    _ => Err(Error::InvalidEmail),
  }
}

/// Every `@` except the final one must sit between a quote opened before it
/// and one closed after it.
fn check_quoted_at_signs(value: &str) -> Result<(), Error> {
  let bytes = value.as_bytes();
  let Some(last) = memchr::memrchr(b'@', bytes) else {
    return Ok(());
  };

  let mut cursor = 0;
  for at in memchr_iter(b'@', &bytes[..last]) {
    if at < cursor {
      continue;
    }

    memchr(b'"', &bytes[cursor..at]).ok_or(Error::InvalidEmail)?;
    let close = memchr(b'"', &bytes[at + 1..]).ok_or(Error::InvalidEmail)?;
    cursor = at + 1 + close + 1;
  }

  Ok(())
}

fn strip_ipv6_tag(literal: &str) -> &str {
  match literal.get(..5) {
    Some(tag) if tag.eq_ignore_ascii_case("ipv6:") => &literal[5..],
    _ => literal,
  }
}
