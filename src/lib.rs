#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]

pub use candidate::{Candidate, NotString};
pub use checkers::*;
pub use config::{Config, Kind, ParseKindError, Validators, CHECKERS_DISABLED, VALIDATORS_DISABLED};
pub use domain::{domain, Domain};
pub use email::{email, Email};
pub use error::{DomainError, Error};
pub use ip::{ip_address, ipv4, ipv6, IpAddress, Ipv4, Ipv6};
pub use mac::{mac_address, MacAddress};
pub use url::{url, Url};

mod candidate;
mod checkers;
mod config;
mod domain;
mod email;
mod error;
mod ip;
mod mac;
mod patterns;
mod url;

/// Flags shared by every validator.
///
/// Each validator reads only the flags that apply to it; the rest are
/// ignored.
///
/// ## Example
///
/// ```rust
/// use netcheck::{domain, Options};
///
/// let opts = Options::new().with_allow_empty(true).with_allow_ips(true);
/// assert_eq!(domain("", opts), Ok(None));
/// assert!(domain("127.0.0.1", opts).unwrap().is_some());
/// assert!(domain("127.0.0.1", Options::new()).is_err());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Options {
  allow_empty: bool,
  allow_ips: bool,
  allow_special_ips: bool,
}

impl Options {
  /// Returns options with every flag off.
  #[inline]
  pub const fn new() -> Self {
    Self {
      allow_empty: false,
      allow_ips: false,
      allow_special_ips: false,
    }
  }

  /// Whether an empty or missing value yields `Ok(None)` instead of
  /// [`Error::EmptyValue`].
  #[inline]
  pub const fn allow_empty(&self) -> bool {
    self.allow_empty
  }

  /// Whether [`domain`] accepts an IP address.
  #[inline]
  pub const fn allow_ips(&self) -> bool {
    self.allow_ips
  }

  /// Whether [`url`] accepts loopback, private and link-local IPv4 hosts.
  #[inline]
  pub const fn allow_special_ips(&self) -> bool {
    self.allow_special_ips
  }

  /// Sets [`Options::allow_empty`].
  #[inline]
  pub const fn with_allow_empty(mut self, allow: bool) -> Self {
    self.allow_empty = allow;
    self
  }

  /// Sets [`Options::allow_ips`].
  #[inline]
  pub const fn with_allow_ips(mut self, allow: bool) -> Self {
    self.allow_ips = allow;
    self
  }

  /// Sets [`Options::allow_special_ips`].
  #[inline]
  pub const fn with_allow_special_ips(mut self, allow: bool) -> Self {
    self.allow_special_ips = allow;
    self
  }

  /// Sets [`Options::allow_empty`] in place.
  #[inline]
  pub fn set_allow_empty(&mut self, allow: bool) -> &mut Self {
    self.allow_empty = allow;
    self
  }

  /// Sets [`Options::allow_ips`] in place.
  #[inline]
  pub fn set_allow_ips(&mut self, allow: bool) -> &mut Self {
    self.allow_ips = allow;
    self
  }

  /// Sets [`Options::allow_special_ips`] in place.
  #[inline]
  pub fn set_allow_special_ips(&mut self, allow: bool) -> &mut Self {
    self.allow_special_ips = allow;
    self
  }
}

#[cfg(feature = "serde")]
const _: () = {
  use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

  macro_rules! impl_serde {
    ($($ty:ty), +$(,)?) => {
      $(
        impl Serialize for $ty {
          fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
          where
            S: Serializer,
          {
            serializer.serialize_str(self.as_str())
          }
        }

        impl<'de> Deserialize<'de> for $ty {
          fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
          where
            D: Deserializer<'de>,
          {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(de::Error::custom)
          }
        }
      )*
    };
  }

  impl_serde!(Ipv4, Ipv6, IpAddress, MacAddress, Domain, Url, Email);
};

#[cfg(any(feature = "arbitrary", test))]
mod arbitrary_impl;
#[cfg(any(feature = "quickcheck", test))]
mod quickcheck_impl;
