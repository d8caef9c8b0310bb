use core::{borrow::Borrow, str::FromStr};

use memchr::{memchr, memchr2};

use super::{
  candidate::prepare,
  ip::parse_ip_address,
  patterns::{self, SPECIAL_USE_DOMAIN_NAMES},
  url::check_url,
  Candidate, DomainError, Error, Options,
};

/// A DNS domain name, as `.` dot-separated labels, lower-cased and trimmed.
///
/// Non-ASCII labels are accepted as written; no punycode transcoding takes
/// place. The RFC 6761 special-use names `localhost`, `invalid`, `test` and
/// `example` are valid on their own.
///
/// When produced by [`domain`] with [`Options::with_allow_ips`], the inner
/// string may be an IP address.
///
/// ## Example
///
/// ```rust
/// use netcheck::Domain;
///
/// let domain: Domain = "Example.COM".parse().unwrap();
/// assert_eq!(domain.as_str(), "example.com");
///
/// let domain: Domain = "xn--nxasmq6b.xn--j6w193g".parse().unwrap();
/// assert_eq!(domain.labels().count(), 2);
///
/// let domain: Domain = "测试.中国".parse().unwrap();
/// assert_eq!(domain.as_str(), "测试.中国");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[repr(transparent)]
pub struct Domain(pub(crate) String);

impl Domain {
  /// Returns the domain as a `str`.
  #[inline]
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Returns the inner `String`.
  #[inline]
  pub fn into_inner(self) -> String {
    self.0
  }

  /// Returns an iterator over the dot-separated labels, left to right.
  #[inline]
  pub fn labels(&self) -> impl Iterator<Item = &str> {
    self.0.split('.')
  }
}

impl Borrow<str> for Domain {
  #[inline]
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl AsRef<str> for Domain {
  #[inline]
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl From<Domain> for String {
  #[inline]
  fn from(value: Domain) -> Self {
    value.0
  }
}

impl FromStr for Domain {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.is_empty() {
      return Err(Error::EmptyValue);
    }
    check_domain(s, false, false).map(Domain)
  }
}

impl TryFrom<&str> for Domain {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    value.parse()
  }
}

/// Validates a domain name.
///
/// The checks run in a fixed order, so the most specific error wins:
///
/// 1. `/` or `\` fail with [`DomainError::SlashInDomain`], `@` with
///    [`DomainError::AtInDomain`], `:` with [`DomainError::ColonInDomain`].
/// 2. The value is lower-cased and trimmed; any remaining whitespace fails
///    with [`DomainError::WhitespaceInDomain`].
/// 3. A special-use name is accepted as is.
/// 4. A valid IP address is accepted with [`Options::with_allow_ips`] and
///    rejected otherwise. IPv6 addresses never get this far because of the
///    colon check.
/// 5. A URL-unsafe character (`[ ] { } | ^ % ~`), a label longer than 63
///    characters or an all-digit final label fails with
///    [`DomainError::Invalid`].
/// 6. The label/TLD structure is matched; if that fails, the host grammar of
///    the [`url`](crate::url()) validator gets one chance to accept it.
///
/// ## Example
///
/// ```rust
/// use netcheck::{domain, DomainError, Error, Options};
///
/// let opts = Options::new();
/// assert_eq!(domain("a.b-c.de", opts).unwrap().unwrap().as_str(), "a.b-c.de");
/// assert_eq!(domain("-a.b.co", opts), Err(Error::InvalidDomain(DomainError::Invalid)));
/// assert_eq!(domain("foo/bar", opts), Err(Error::InvalidDomain(DomainError::SlashInDomain)));
/// assert!(domain("10.0.0.1", opts.with_allow_ips(true)).is_ok());
/// ```
pub fn domain<V>(value: &V, options: Options) -> Result<Option<Domain>, Error>
where
  V: Candidate + ?Sized,
{
  let Some(value) = prepare(value, options.allow_empty(), Error::CannotCoerce)? else {
    return Ok(None);
  };
  check_domain(value, options.allow_ips(), false).map(|d| Some(Domain(d)))
}

/// Runs the domain checks on a non-empty string.
///
/// `recursing` is set when the call comes from [`check_url`], which in turn
/// was reached from here: the URL fallback is then skipped, so the two
/// validators recurse at most one level deep.
pub(crate) fn check_domain(value: &str, allow_ips: bool, recursing: bool) -> Result<String, Error> {
  let bytes = value.as_bytes();
  if memchr2(b'/', b'\\', bytes).is_some() {
    return Err(DomainError::SlashInDomain.into());
  }
  if memchr(b'@', bytes).is_some() {
    return Err(DomainError::AtInDomain.into());
  }
  if memchr(b':', bytes).is_some() {
    return Err(DomainError::ColonInDomain.into());
  }

  let value = patterns::normalize(value);
  if value.chars().any(char::is_whitespace) {
    return Err(DomainError::WhitespaceInDomain.into());
  }

  if SPECIAL_USE_DOMAIN_NAMES.contains(&value.as_str()) {
    return Ok(value);
  }

  let is_ip = parse_ip_address(&value).is_ok();
  if is_ip {
    return if allow_ips { Ok(value) } else { Err(Error::domain()) };
  }

  if value.is_empty()
    || patterns::has_unsafe_character(&value)
    || patterns::label_too_long(&value)
    || has_numeric_tld(&value)
  {
    return Err(Error::domain());
  }

  if patterns::DOMAIN.is_match(&value) {
    return Ok(value);
  }

  if recursing {
    return Err(Error::domain());
  }

  // The URL host grammar accepts no label shape that DOMAIN rejects, so
  // this only ever confirms the rejection; it must stay bounded by
  // `recursing` either way.
  match check_url(&format!("http://{value}"), false, true) {
    Ok(()) => Ok(value),
    Err(_) => Err(Error::domain()),
  }
}

/// A numeric-only final label would make the name indistinguishable from
/// an address.
fn has_numeric_tld(value: &str) -> bool {
  value
    .rsplit('.')
    .next()
    .is_some_and(|tld| !tld.is_empty() && tld.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_priority() {
    assert_eq!(
      check_domain("a@b/c:d", false, false),
      Err(Error::InvalidDomain(DomainError::SlashInDomain))
    );
    assert_eq!(
      check_domain("a@b:d e", false, false),
      Err(Error::InvalidDomain(DomainError::AtInDomain))
    );
    assert_eq!(
      check_domain("a:b e", false, false),
      Err(Error::InvalidDomain(DomainError::ColonInDomain))
    );
    assert_eq!(
      check_domain("exa mple.com", false, false),
      Err(Error::InvalidDomain(DomainError::WhitespaceInDomain))
    );
    assert_eq!(
      check_domain("back\\slash.com", false, false),
      Err(Error::InvalidDomain(DomainError::SlashInDomain))
    );
  }

  #[test]
  fn test_surrounding_whitespace_is_trimmed() {
    assert_eq!(check_domain("  Example.com\t", false, false).unwrap(), "example.com");
    assert_eq!(
      check_domain("   ", false, false),
      Err(Error::InvalidDomain(DomainError::Invalid))
    );
  }

  #[test]
  fn test_special_use_names() {
    for name in ["localhost", "INVALID", "test", "Example"] {
      assert_eq!(check_domain(name, false, false).unwrap(), name.to_lowercase());
    }
  }

  #[test]
  fn test_ips() {
    assert_eq!(
      check_domain("1.2.3.4", false, false),
      Err(Error::InvalidDomain(DomainError::Invalid))
    );
    assert_eq!(check_domain("1.2.3.4", true, false).unwrap(), "1.2.3.4");
    assert_eq!(
      check_domain("1.2.3.44", false, false),
      Err(Error::InvalidDomain(DomainError::Invalid))
    );
  }

  #[test]
  fn test_recursion_guard() {
    assert!(check_domain("foo.b", false, true).is_err());
    assert!(check_domain("foo.b", false, false).is_err());
    assert!(check_domain("example.com", false, true).is_ok());
  }

  #[test]
  fn test_url_fallback_matches_direct_check() {
    for input in [
      "example.com",
      "a-b.c-d.ef",
      "xn--bcher-kva.com",
      "foo.b",
      "foo.b1",
      "a--b.com",
      "-a.com",
      "a..com",
      "example.test",
      "测试.中国",
    ] {
      assert_eq!(
        check_domain(input, false, false),
        check_domain(input, false, true),
        "{input}"
      );
    }
  }

  #[test]
  fn test_labels() {
    let domain: Domain = "a.b-c.de".parse().unwrap();
    assert_eq!(domain.labels().collect::<std::vec::Vec<_>>(), ["a", "b-c", "de"]);
  }
}
