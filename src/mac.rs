use core::str::FromStr;

use super::{candidate::prepare, patterns, Candidate, Error, Options};

/// A MAC address in lower-case, colon-separated form.
///
/// ## Example
///
/// ```rust
/// use netcheck::MacAddress;
///
/// let mac: MacAddress = "01-23-45-67-AB-CD".parse().unwrap();
/// assert_eq!(mac.as_str(), "01:23:45:67:ab:cd");
/// assert_eq!(mac.octets(), [0x01, 0x23, 0x45, 0x67, 0xab, 0xcd]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("{repr}")]
pub struct MacAddress {
  repr: String,
  octets: [u8; 6],
}

impl MacAddress {
  /// Returns the normalized address.
  #[inline]
  pub fn as_str(&self) -> &str {
    &self.repr
  }

  /// Returns the inner string.
  #[inline]
  pub fn into_inner(self) -> String {
    self.repr
  }

  /// Returns the six octets of the address.
  #[inline]
  pub const fn octets(&self) -> [u8; 6] {
    self.octets
  }

  /// Wraps a value that skipped validation; unparsable values get zero
  /// octets.
  pub(crate) fn unchecked(value: &str) -> Self {
    parse_mac_address(value).unwrap_or_else(|_| Self {
      repr: value.into(),
      octets: [0; 6],
    })
  }
}

/// Validates a MAC address written as six two-digit hex groups separated by
/// `:` or `-`.
///
/// Hyphens are normalized to colons and the result is lower-cased and
/// trimmed.
///
/// ## Example
///
/// ```rust
/// use netcheck::{mac_address, Error, Options};
///
/// let a = mac_address("01:23:45:67:ab:CD", Options::new()).unwrap();
/// let b = mac_address("01-23-45-67-ab-CD", Options::new()).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(mac_address("01:23:45", Options::new()), Err(Error::InvalidMacAddress));
/// ```
pub fn mac_address<V>(value: &V, options: Options) -> Result<Option<MacAddress>, Error>
where
  V: Candidate + ?Sized,
{
  let Some(value) = prepare(value, options.allow_empty(), Error::CannotCoerce)? else {
    return Ok(None);
  };
  parse_mac_address(value).map(Some)
}

pub(crate) fn parse_mac_address(value: &str) -> Result<MacAddress, Error> {
  let repr = patterns::normalize(&value.replace('-', ":"));
  if !patterns::MAC_ADDRESS.is_match(&repr) {
    return Err(Error::InvalidMacAddress);
  }

  let mut octets = [0u8; 6];
  for (octet, group) in octets.iter_mut().zip(repr.split(':')) {
    *octet = u8::from_str_radix(group, 16).map_err(|_| Error::InvalidMacAddress)?;
  }
  Ok(MacAddress { repr, octets })
}

impl FromStr for MacAddress {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.is_empty() {
      return Err(Error::EmptyValue);
    }
    parse_mac_address(s)
  }
}

impl TryFrom<&str> for MacAddress {
  type Error = Error;

  fn try_from(s: &str) -> Result<Self, Self::Error> {
    s.parse()
  }
}

impl AsRef<str> for MacAddress {
  fn as_ref(&self) -> &str {
    self.as_str()
  }
}

impl From<MacAddress> for String {
  fn from(value: MacAddress) -> Self {
    value.into_inner()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_mixed_separators() {
    let mac = parse_mac_address("01-23:45-67:89-ab").unwrap();
    assert_eq!(mac.as_str(), "01:23:45:67:89:ab");
  }

  #[test]
  fn test_rejects_bad_groups() {
    for input in [
      "01:23:45:67:89",
      "01:23:45:67:89:ab:cd",
      "0123.4567.89ab",
      "01:23:45:67:89:ag",
      "1:23:45:67:89:ab",
      "01::23:45:67:89:ab",
    ] {
      assert_eq!(parse_mac_address(input), Err(Error::InvalidMacAddress), "{input}");
    }
  }

  #[test]
  fn test_trims_whitespace() {
    assert_eq!(parse_mac_address(" 01:23:45:67:89:AB\n").unwrap().as_str(), "01:23:45:67:89:ab");
  }
}
