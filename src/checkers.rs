//! Boolean predicates over the validators.
//!
//! Each checker returns `true` exactly when the matching validator returns
//! `Ok(_)`; every failure is swallowed. With [`Options::with_allow_empty`]
//! an empty value checks as `true`.

use super::{Candidate, Options};

macro_rules! checkers {
  ($($(#[$meta:meta])* $name:ident => $validator:ident), +$(,)?) => {
    $(
      $(#[$meta])*
      #[inline]
      pub fn $name<V>(value: &V, options: Options) -> bool
      where
        V: Candidate + ?Sized,
      {
        super::$validator(value, options).is_ok()
      }
    )*
  };
}

checkers!(
  /// Returns `true` if `value` is a valid IPv4 address.
  is_ipv4 => ipv4,
  /// Returns `true` if `value` is a valid IPv6 address.
  is_ipv6 => ipv6,
  /// Returns `true` if `value` is a valid IPv4 or IPv6 address.
  is_ip_address => ip_address,
  /// Returns `true` if `value` is a valid MAC address.
  is_mac_address => mac_address,
  /// Returns `true` if `value` is a valid domain name.
  ///
  /// ```rust
  /// use netcheck::{is_domain, Options};
  ///
  /// assert!(is_domain("example.com", Options::new()));
  /// assert!(!is_domain("example..com", Options::new()));
  /// assert!(!is_domain("", Options::new()));
  /// assert!(is_domain("", Options::new().with_allow_empty(true)));
  /// ```
  is_domain => domain,
  /// Returns `true` if `value` is a valid URL.
  is_url => url,
  /// Returns `true` if `value` is a valid email address.
  is_email => email,
);
