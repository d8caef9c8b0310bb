//! Per-validator switches.
//!
//! A [`Config`] records which validators and which checkers are disabled.
//! [`Validators`] consults it at every call: a disabled validator hands its
//! input back unvalidated and a disabled checker always answers `true`.
//! Validators calling each other internally never look at the config.

use core::str::FromStr;

use std::collections::HashSet;

use super::{
  candidate::prepare, Candidate, Domain, Email, Error, IpAddress, Ipv4, Ipv6, MacAddress, Options,
  Url,
};

/// The environment variable listing disabled validators.
pub const VALIDATORS_DISABLED: &str = "VALIDATORS_DISABLED";

/// The environment variable listing disabled checkers.
pub const CHECKERS_DISABLED: &str = "CHECKERS_DISABLED";

/// Names one of the validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum Kind {
  /// [`ipv4`](crate::ipv4())
  #[display("ipv4")]
  Ipv4,
  /// [`ipv6`](crate::ipv6())
  #[display("ipv6")]
  Ipv6,
  /// [`ip_address`](crate::ip_address())
  #[display("ip_address")]
  IpAddress,
  /// [`mac_address`](crate::mac_address())
  #[display("mac_address")]
  MacAddress,
  /// [`domain`](crate::domain())
  #[display("domain")]
  Domain,
  /// [`url`](crate::url())
  #[display("url")]
  Url,
  /// [`email`](crate::email())
  #[display("email")]
  Email,
}

impl Kind {
  /// All kinds, in dependency order.
  pub const ALL: [Self; 7] = [
    Self::Ipv4,
    Self::Ipv6,
    Self::IpAddress,
    Self::MacAddress,
    Self::Domain,
    Self::Url,
    Self::Email,
  ];

  /// Returns the name of the validator.
  #[inline]
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Ipv4 => "ipv4",
      Self::Ipv6 => "ipv6",
      Self::IpAddress => "ip_address",
      Self::MacAddress => "mac_address",
      Self::Domain => "domain",
      Self::Url => "url",
      Self::Email => "email",
    }
  }
}

/// An error which can be returned when parsing a [`Kind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown validator: {0}")]
pub struct ParseKindError(pub(crate) String);

impl FromStr for Kind {
  type Err = ParseKindError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
      .ok_or_else(|| ParseKindError(s.to_string()))
  }
}

/// Which validators and checkers are switched off.
///
/// ## Example
///
/// ```rust
/// use netcheck::{Config, Kind};
///
/// let config = Config::new()
///   .disable_validator(Kind::Email)
///   .disable_checker(Kind::Url);
/// assert!(config.is_validator_disabled(Kind::Email));
/// assert!(!config.is_checker_disabled(Kind::Email));
/// assert!(config.is_checker_disabled(Kind::Url));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
  validators: HashSet<Kind>,
  checkers: HashSet<Kind>,
}

impl Config {
  /// Returns a config with everything enabled.
  #[inline]
  pub fn new() -> Self {
    Self::default()
  }

  /// Reads [`VALIDATORS_DISABLED`] and [`CHECKERS_DISABLED`] from the
  /// process environment. Unset or non-unicode variables disable nothing.
  pub fn from_env() -> Self {
    let read = |key: &str| std::env::var(key).unwrap_or_default();
    Self::from_lists(&read(VALIDATORS_DISABLED), &read(CHECKERS_DISABLED))
  }

  /// Builds a config from two lists of validator names separated by commas
  /// and/or whitespace. Names are case-insensitive; unknown names are
  /// skipped.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use netcheck::{Config, Kind};
  ///
  /// let config = Config::from_lists("email, URL", "domain ip_address");
  /// assert!(config.is_validator_disabled(Kind::Url));
  /// assert!(config.is_checker_disabled(Kind::IpAddress));
  /// assert!(!config.is_checker_disabled(Kind::Email));
  /// ```
  pub fn from_lists(validators: &str, checkers: &str) -> Self {
    Self {
      validators: parse_list(validators, VALIDATORS_DISABLED),
      checkers: parse_list(checkers, CHECKERS_DISABLED),
    }
  }

  /// Disables a validator.
  #[inline]
  pub fn disable_validator(mut self, kind: Kind) -> Self {
    self.validators.insert(kind);
    self
  }

  /// Disables a checker.
  #[inline]
  pub fn disable_checker(mut self, kind: Kind) -> Self {
    self.checkers.insert(kind);
    self
  }

  /// Returns `true` if the validator is disabled.
  #[inline]
  pub fn is_validator_disabled(&self, kind: Kind) -> bool {
    self.validators.contains(&kind)
  }

  /// Returns `true` if the checker is disabled.
  #[inline]
  pub fn is_checker_disabled(&self, kind: Kind) -> bool {
    self.checkers.contains(&kind)
  }
}

fn parse_list(list: &str, source: &str) -> HashSet<Kind> {
  list
    .split(|c: char| c == ',' || c.is_whitespace())
    .filter(|name| !name.is_empty())
    .filter_map(|name| match name.parse::<Kind>() {
      Ok(kind) => Some(kind),
      Err(e) => {
        tracing::warn!(source, err = %e, "netcheck: ignoring unknown validator name");
        None
      }
    })
    .collect()
}

/// The validators and checkers, gated by a [`Config`].
///
/// ## Example
///
/// ```rust
/// use netcheck::{Config, Kind, Options, Validators};
///
/// let validators = Validators::new(Config::new().disable_validator(Kind::Email));
/// let email = validators.email("not an email", Options::new()).unwrap().unwrap();
/// assert_eq!(email.as_str(), "not an email");
/// assert!(validators.domain("not a domain", Options::new()).is_err());
/// ```
#[derive(Debug, Default, Clone)]
pub struct Validators {
  config: Config,
}

impl Validators {
  /// Creates a new set of validators.
  #[inline]
  pub const fn new(config: Config) -> Self {
    Self { config }
  }

  /// Creates a new set of validators configured from the environment.
  #[inline]
  pub fn from_env() -> Self {
    Self::new(Config::from_env())
  }

  /// Returns the config.
  #[inline]
  pub const fn config(&self) -> &Config {
    &self.config
  }

  fn bypass<'a, V>(&self, kind: Kind, value: &'a V, options: Options) -> Option<Result<Option<&'a str>, Error>>
  where
    V: Candidate + ?Sized,
  {
    if !self.config.is_validator_disabled(kind) {
      return None;
    }
    tracing::trace!(validator = %kind, "netcheck: validator disabled, skipping");
    Some(prepare(value, options.allow_empty(), Error::CannotCoerce))
  }

  fn skip_checker(&self, kind: Kind) -> bool {
    let disabled = self.config.is_checker_disabled(kind);
    if disabled {
      tracing::trace!(checker = %kind, "netcheck: checker disabled, skipping");
    }
    disabled
  }
}

macro_rules! gated {
  ($($kind:ident: $validator:ident / $checker:ident -> $ty:ty => $wrap:expr), +$(,)?) => {
    impl Validators {
      $(
        #[doc = concat!("Runs [`", stringify!($validator), "`](crate::", stringify!($validator), "()) unless it is disabled.")]
        pub fn $validator<V>(&self, value: &V, options: Options) -> Result<Option<$ty>, Error>
        where
          V: Candidate + ?Sized,
        {
          match self.bypass(Kind::$kind, value, options) {
            Some(res) => res.map(|v| v.map($wrap)),
            None => super::$validator(value, options),
          }
        }

        #[doc = concat!("Runs [`", stringify!($checker), "`](crate::", stringify!($checker), ") unless it is disabled.")]
        pub fn $checker<V>(&self, value: &V, options: Options) -> bool
        where
          V: Candidate + ?Sized,
        {
          self.skip_checker(Kind::$kind) || super::$checker(value, options)
        }
      )*
    }
  };
}

gated!(
  Ipv4: ipv4 / is_ipv4 -> Ipv4 => Ipv4::unchecked,
  Ipv6: ipv6 / is_ipv6 -> Ipv6 => Ipv6::unchecked,
  IpAddress: ip_address / is_ip_address -> IpAddress => IpAddress::unchecked,
  MacAddress: mac_address / is_mac_address -> MacAddress => MacAddress::unchecked,
  Domain: domain / is_domain -> Domain => |v: &str| Domain(v.to_string()),
  Url: url / is_url -> Url => |v: &str| Url(v.to_string()),
  Email: email / is_email -> Email => |v: &str| Email(v.to_string()),
);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_kind_round_trip() {
    for kind in Kind::ALL {
      assert_eq!(kind.to_string().parse::<Kind>().unwrap(), kind);
      assert_eq!(kind.as_str().to_uppercase().parse::<Kind>().unwrap(), kind);
    }
    assert_eq!(
      "uuid".parse::<Kind>(),
      Err(ParseKindError("uuid".to_string()))
    );
  }

  #[test]
  fn test_from_lists() {
    let config = Config::from_lists(" email,,url \n mac_address ", "bogus, ipv6");
    assert!(config.is_validator_disabled(Kind::Email));
    assert!(config.is_validator_disabled(Kind::Url));
    assert!(config.is_validator_disabled(Kind::MacAddress));
    assert!(!config.is_validator_disabled(Kind::Domain));
    assert!(config.is_checker_disabled(Kind::Ipv6));
    assert!(!config.is_checker_disabled(Kind::Ipv4));
    assert_eq!(Config::from_lists("", ""), Config::new());
  }

  #[test]
  fn test_disabled_validator_passes_input_through() {
    let all = Kind::ALL
      .into_iter()
      .fold(Config::new(), Config::disable_validator);
    let validators = Validators::new(all);
    let opts = Options::new();

    assert_eq!(validators.ipv4("x", opts).unwrap().unwrap().as_str(), "x");
    assert_eq!(validators.ipv6("x", opts).unwrap().unwrap().as_str(), "x");
    assert_eq!(validators.ip_address("x", opts).unwrap().unwrap().as_str(), "x");
    assert_eq!(validators.mac_address("x", opts).unwrap().unwrap().as_str(), "x");
    assert_eq!(validators.domain("x", opts).unwrap().unwrap().as_str(), "x");
    assert_eq!(validators.url("x", opts).unwrap().unwrap().as_str(), "x");
    assert_eq!(validators.email("x", opts).unwrap().unwrap().as_str(), "x");

    assert_eq!(validators.email("", opts), Err(Error::EmptyValue));
    assert_eq!(validators.email("", opts.with_allow_empty(true)), Ok(None));
    assert_eq!(validators.url(&[0xffu8], opts), Err(Error::CannotCoerce));
  }

  #[test]
  fn test_disabled_checker_is_true() {
    let validators = Validators::new(Config::new().disable_checker(Kind::Url));
    let opts = Options::new();
    assert!(validators.is_url("nope", opts));
    assert!(!validators.is_email("nope", opts));
    assert!(validators.is_email("a@b.co", opts));
  }

  #[test]
  fn test_enabled_by_default() {
    let validators = Validators::default();
    assert_eq!(validators.url("nope", Options::new()), Err(Error::InvalidUrl));
    assert!(!validators.is_domain("-bad.com", Options::new()));
  }
}
