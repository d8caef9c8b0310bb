use core::{
  net::{IpAddr, Ipv4Addr, Ipv6Addr},
  str::FromStr,
};

use super::{candidate::prepare, patterns, Candidate, Error, Options};

/// A dotted-quad IPv4 address, kept exactly as it was written.
///
/// ## Example
///
/// ```rust
/// use netcheck::Ipv4;
///
/// let ip: Ipv4 = "192.168.001.1".parse().unwrap();
/// assert_eq!(ip.as_str(), "192.168.001.1");
/// assert_eq!(ip.to_std(), std::net::Ipv4Addr::new(192, 168, 1, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("{repr}")]
pub struct Ipv4 {
  repr: String,
  octets: [u8; 4],
}

impl Ipv4 {
  /// Returns the address as it was validated.
  #[inline]
  pub fn as_str(&self) -> &str {
    &self.repr
  }

  /// Returns the inner string.
  #[inline]
  pub fn into_inner(self) -> String {
    self.repr
  }

  /// Returns the four octets of the address.
  #[inline]
  pub const fn octets(&self) -> [u8; 4] {
    self.octets
  }

  /// Converts to [`Ipv4Addr`].
  #[inline]
  pub const fn to_std(&self) -> Ipv4Addr {
    let [a, b, c, d] = self.octets;
    Ipv4Addr::new(a, b, c, d)
  }

  /// Wraps a value that skipped validation; unparsable values get
  /// `0.0.0.0` octets.
  pub(crate) fn unchecked(value: &str) -> Self {
    parse_ipv4(value).unwrap_or_else(|_| Self {
      repr: value.to_string(),
      octets: [0; 4],
    })
  }
}

/// A textual IPv6 address, lower-cased and trimmed.
///
/// The zone index, if any, is kept in the string form but dropped by
/// [`Ipv6::to_std`].
///
/// ## Example
///
/// ```rust
/// use netcheck::Ipv6;
///
/// let ip: Ipv6 = " FE80::1%eth0 ".parse().unwrap();
/// assert_eq!(ip.as_str(), "fe80::1%eth0");
/// assert_eq!(ip.zone(), Some("eth0"));
/// assert_eq!(ip.to_std(), "fe80::1".parse::<std::net::Ipv6Addr>().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("{repr}")]
pub struct Ipv6 {
  repr: String,
  addr: Ipv6Addr,
}

impl Ipv6 {
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

  /// Returns the zone index following `%`, if present.
  #[inline]
  pub fn zone(&self) -> Option<&str> {
    self.repr.split_once('%').map(|(_, zone)| zone)
  }

  /// Converts to [`Ipv6Addr`].
  #[inline]
  pub const fn to_std(&self) -> Ipv6Addr {
    self.addr
  }

  /// Wraps a value that skipped validation; unparsable values map to `::`.
  pub(crate) fn unchecked(value: &str) -> Self {
    parse_ipv6(value).unwrap_or_else(|_| Self {
      repr: value.to_string(),
      addr: Ipv6Addr::UNSPECIFIED,
    })
  }
}

/// An IP address accepted by [`ip_address`].
#[derive(
  Clone,
  Debug,
  Eq,
  PartialEq,
  PartialOrd,
  Ord,
  Hash,
  derive_more::Display,
  derive_more::From,
)]
pub enum IpAddress {
  /// An IPv4 address
  V4(Ipv4),
  /// An IPv6 address
  V6(Ipv6),
}

impl IpAddress {
  /// Returns `true` if this is an IPv4 address.
  #[inline]
  pub const fn is_v4(&self) -> bool {
    matches!(self, Self::V4(_))
  }

  /// Returns `true` if this is an IPv6 address.
  #[inline]
  pub const fn is_v6(&self) -> bool {
    matches!(self, Self::V6(_))
  }

  /// Returns the IPv4 address, if this is one.
  #[inline]
  pub const fn as_v4(&self) -> Option<&Ipv4> {
    match self {
      Self::V4(ip) => Some(ip),
      Self::V6(_) => None,
    }
  }

  /// Returns the IPv6 address, if this is one.
  #[inline]
  pub const fn as_v6(&self) -> Option<&Ipv6> {
    match self {
      Self::V6(ip) => Some(ip),
      Self::V4(_) => None,
    }
  }

  /// Returns a reference to the IPv4 address.
  ///
  /// ## Panics
  ///
  /// Panics if this is an IPv6 address.
  #[inline]
  #[track_caller]
  pub fn unwrap_v4_ref(&self) -> &Ipv4 {
    match self {
      Self::V4(ip) => ip,
      Self::V6(ip) => panic!("called `IpAddress::unwrap_v4_ref()` on an IPv6 address: {ip}"),
    }
  }

  /// Returns a reference to the IPv6 address.
  ///
  /// ## Panics
  ///
  /// Panics if this is an IPv4 address.
  #[inline]
  #[track_caller]
  pub fn unwrap_v6_ref(&self) -> &Ipv6 {
    match self {
      Self::V6(ip) => ip,
      Self::V4(ip) => panic!("called `IpAddress::unwrap_v6_ref()` on an IPv4 address: {ip}"),
    }
  }

  /// Returns the string form of the address.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use netcheck::IpAddress;
  ///
  /// let ip: IpAddress = "::1".parse().unwrap();
  /// assert_eq!(ip.as_str(), "::1");
  /// assert!(ip.is_v6());
  /// ```
  #[inline]
  pub fn as_str(&self) -> &str {
    match self {
      Self::V4(ip) => ip.as_str(),
      Self::V6(ip) => ip.as_str(),
    }
  }

  /// Returns the inner string.
  #[inline]
  pub fn into_inner(self) -> String {
    match self {
      Self::V4(ip) => ip.into_inner(),
      Self::V6(ip) => ip.into_inner(),
    }
  }

  /// Converts to [`IpAddr`].
  #[inline]
  pub const fn to_std(&self) -> IpAddr {
    match self {
      Self::V4(ip) => IpAddr::V4(ip.to_std()),
      Self::V6(ip) => IpAddr::V6(ip.to_std()),
    }
  }

  pub(crate) fn unchecked(value: &str) -> Self {
    parse_ip_address(value).unwrap_or_else(|_| {
      if value.contains(':') {
        Self::V6(Ipv6::unchecked(value))
      } else {
        Self::V4(Ipv4::unchecked(value))
      }
    })
  }
}

/// Validates a dotted-quad IPv4 address.
///
/// The value must consist of exactly four `.`-separated components made of
/// ASCII digits only, each in `0..=255`. The input is returned unchanged.
///
/// ## Example
///
/// ```rust
/// use netcheck::{ipv4, Error, Options};
///
/// assert_eq!(ipv4("10.0.0.1", Options::new()).unwrap().unwrap().as_str(), "10.0.0.1");
/// assert_eq!(ipv4("10.0.0.256", Options::new()), Err(Error::InvalidIpAddress));
/// assert_eq!(ipv4("", Options::new().with_allow_empty(true)), Ok(None));
/// ```
pub fn ipv4<V>(value: &V, options: Options) -> Result<Option<Ipv4>, Error>
where
  V: Candidate + ?Sized,
{
  let Some(value) = prepare(value, options.allow_empty(), Error::InvalidIpAddress)? else {
    return Ok(None);
  };
  parse_ipv4(value).map(Some)
}

pub(crate) fn parse_ipv4(value: &str) -> Result<Ipv4, Error> {
  let mut octets = [0u8; 4];
  let mut count = 0;
  for component in value.split('.') {
    if count == 4 || component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
      return Err(Error::InvalidIpAddress);
    }
    octets[count] = component.parse().map_err(|_| Error::InvalidIpAddress)?;
    count += 1;
  }

  if count != 4 {
    return Err(Error::InvalidIpAddress);
  }

  Ok(Ipv4 {
    repr: value.to_string(),
    octets,
  })
}

/// Validates a textual IPv6 address.
///
/// Accepts the full eight-group form, every `::` zero-compression position,
/// an embedded IPv4 tail, and an optional `%zone` suffix. The value is
/// lower-cased and trimmed.
///
/// ## Example
///
/// ```rust
/// use netcheck::{ipv6, Error, Options};
///
/// let ip = ipv6("2001:DB8::FF00:42:8329", Options::new()).unwrap().unwrap();
/// assert_eq!(ip.as_str(), "2001:db8::ff00:42:8329");
/// assert_eq!(ipv6("::ffff:192.0.2.128", Options::new()).unwrap().unwrap().as_str(), "::ffff:192.0.2.128");
/// assert_eq!(ipv6("1:2:3:4:5:6:7:8:9", Options::new()), Err(Error::InvalidIpAddress));
/// ```
pub fn ipv6<V>(value: &V, options: Options) -> Result<Option<Ipv6>, Error>
where
  V: Candidate + ?Sized,
{
  let Some(value) = prepare(value, options.allow_empty(), Error::InvalidIpAddress)? else {
    return Ok(None);
  };
  parse_ipv6(value).map(Some)
}

pub(crate) fn parse_ipv6(value: &str) -> Result<Ipv6, Error> {
  let repr = patterns::normalize(value);
  if !patterns::IPV6.is_match(&repr) {
    return Err(Error::InvalidIpAddress);
  }

  let addr = match repr.split_once('%') {
    Some((addr, _)) => addr,
    None => repr.as_str(),
  };
  let addr = Ipv6Addr::from_str(addr).map_err(|_| Error::InvalidIpAddress)?;
  Ok(Ipv6 { repr, addr })
}

/// Validates an IPv6 or IPv4 address.
///
/// IPv6 is attempted first. The error does not say which of the two forms
/// came closer.
///
/// ## Example
///
/// ```rust
/// use netcheck::{ip_address, Error, Options};
///
/// assert!(ip_address("127.0.0.1", Options::new()).unwrap().unwrap().is_v4());
/// assert!(ip_address("::1", Options::new()).unwrap().unwrap().is_v6());
/// assert_eq!(ip_address("example.com", Options::new()), Err(Error::InvalidIpAddress));
/// ```
pub fn ip_address<V>(value: &V, options: Options) -> Result<Option<IpAddress>, Error>
where
  V: Candidate + ?Sized,
{
  let Some(value) = prepare(value, options.allow_empty(), Error::InvalidIpAddress)? else {
    return Ok(None);
  };
  parse_ip_address(value).map(Some)
}

pub(crate) fn parse_ip_address(value: &str) -> Result<IpAddress, Error> {
  parse_ipv6(value)
    .map(IpAddress::V6)
    .or_else(|_| parse_ipv4(value).map(IpAddress::V4))
    .map_err(|_| Error::InvalidIpAddress)
}

macro_rules! impl_from_str {
  ($($ty:ident => $parse:ident), +$(,)?) => {
    $(
      impl FromStr for $ty {
        type Err = Error;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
          if s.is_empty() {
            return Err(Error::EmptyValue);
          }
          $parse(s)
        }
      }

      impl TryFrom<&str> for $ty {
        type Error = Error;

        fn try_from(s: &str) -> Result<Self, Self::Error> {
          s.parse()
        }
      }

      impl AsRef<str> for $ty {
        fn as_ref(&self) -> &str {
          self.as_str()
        }
      }

      impl From<$ty> for String {
        fn from(value: $ty) -> Self {
          value.into_inner()
        }
      }
    )*
  };
}

impl_from_str!(
  Ipv4 => parse_ipv4,
  Ipv6 => parse_ipv6,
  IpAddress => parse_ip_address,
);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ipv4_octets() {
    let ip = parse_ipv4("0.10.200.255").unwrap();
    assert_eq!(ip.octets(), [0, 10, 200, 255]);
    assert_eq!(ip.to_string(), "0.10.200.255");
  }

  #[test]
  fn test_ipv4_is_not_trimmed() {
    assert_eq!(parse_ipv4(" 1.2.3.4"), Err(Error::InvalidIpAddress));
    assert_eq!(parse_ipv4("1.2.3.4 "), Err(Error::InvalidIpAddress));
  }

  #[test]
  fn test_ipv6_zone() {
    let ip = parse_ipv6("fe80::1ff:fe23:4567:890a%eth2").unwrap();
    assert_eq!(ip.zone(), Some("eth2"));
    assert_eq!(ip.to_std(), "fe80::1ff:fe23:4567:890a".parse::<Ipv6Addr>().unwrap());
    assert_eq!(parse_ipv6("::1").unwrap().zone(), None);
  }

  #[test]
  fn test_ip_address_prefers_v6() {
    let ip = parse_ip_address("::ffff:10.0.0.1").unwrap();
    assert!(ip.is_v6());
    assert_eq!(ip.unwrap_v6_ref().to_std().to_ipv4_mapped(), Some(Ipv4Addr::new(10, 0, 0, 1)));

    let ip = parse_ip_address("10.0.0.1").unwrap();
    assert_eq!(ip.to_std(), IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
    assert_eq!(String::from(ip), "10.0.0.1");
  }

  #[test]
  fn test_variant_accessors() {
    let v4 = parse_ip_address("192.0.2.1").unwrap();
    assert!(v4.is_v4());
    assert!(!v4.is_v6());
    assert_eq!(v4.as_v4().map(Ipv4::octets), Some([192, 0, 2, 1]));
    assert!(v4.as_v6().is_none());
    assert_eq!(v4.unwrap_v4_ref().as_str(), "192.0.2.1");

    let v6 = parse_ip_address("2001:DB8::1").unwrap();
    assert!(v6.is_v6());
    assert!(!v6.is_v4());
    assert_eq!(v6.as_v6().map(Ipv6::as_str), Some("2001:db8::1"));
    assert!(v6.as_v4().is_none());
  }

  #[test]
  #[should_panic]
  fn test_unwrap_wrong_variant() {
    parse_ip_address("::1").unwrap().unwrap_v4_ref();
  }

  #[test]
  fn test_non_string_input() {
    let bytes = [0xffu8, 0x2e, 0x31];
    assert_eq!(ipv4(&bytes, Options::new()), Err(Error::InvalidIpAddress));
    assert_eq!(ipv6(&bytes, Options::new()), Err(Error::InvalidIpAddress));
    assert_eq!(ip_address(&bytes, Options::new()), Err(Error::InvalidIpAddress));
  }
}
