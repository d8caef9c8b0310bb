use simdutf8::basic::from_utf8;

use std::borrow::Cow;

use super::Error;

/// The input was present but is not string-like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("value is not string-like")]
pub struct NotString(pub(crate) ());

/// A value that can be handed to a validator.
///
/// Strings are passed through, byte slices must be valid UTF-8 and
/// `None` is treated as an empty value.
///
/// ## Example
///
/// ```rust
/// use netcheck::Candidate;
///
/// assert_eq!("example.com".candidate().unwrap(), Some("example.com"));
/// assert_eq!(None::<&str>.candidate().unwrap(), None);
/// assert!([0xffu8, 0xfe].as_slice().candidate().is_err());
/// ```
pub trait Candidate {
  /// Returns `Ok(None)` for an empty value, the string view of the value
  /// otherwise, or [`NotString`] if the value cannot be read as a string.
  fn candidate(&self) -> Result<Option<&str>, NotString>;
}

#[inline]
fn non_empty(s: &str) -> Option<&str> {
  if s.is_empty() {
    None
  } else {
    Some(s)
  }
}

impl Candidate for str {
  #[inline]
  fn candidate(&self) -> Result<Option<&str>, NotString> {
    Ok(non_empty(self))
  }
}

impl Candidate for String {
  #[inline]
  fn candidate(&self) -> Result<Option<&str>, NotString> {
    Ok(non_empty(self))
  }
}

impl Candidate for Cow<'_, str> {
  #[inline]
  fn candidate(&self) -> Result<Option<&str>, NotString> {
    Ok(non_empty(self))
  }
}

impl Candidate for [u8] {
  #[inline]
  fn candidate(&self) -> Result<Option<&str>, NotString> {
    if self.is_empty() {
      return Ok(None);
    }
    from_utf8(self).map(Some).map_err(|_| NotString(()))
  }
}

impl<const N: usize> Candidate for [u8; N] {
  #[inline]
  fn candidate(&self) -> Result<Option<&str>, NotString> {
    self.as_slice().candidate()
  }
}

impl Candidate for Vec<u8> {
  #[inline]
  fn candidate(&self) -> Result<Option<&str>, NotString> {
    self.as_slice().candidate()
  }
}

impl<T: Candidate + ?Sized> Candidate for Option<&T> {
  #[inline]
  fn candidate(&self) -> Result<Option<&str>, NotString> {
    match self {
      Some(v) => v.candidate(),
      None => Ok(None),
    }
  }
}

impl Candidate for Option<String> {
  #[inline]
  fn candidate(&self) -> Result<Option<&str>, NotString> {
    match self {
      Some(v) => v.candidate(),
      None => Ok(None),
    }
  }
}

impl<T: Candidate + ?Sized> Candidate for &T {
  #[inline]
  fn candidate(&self) -> Result<Option<&str>, NotString> {
    (**self).candidate()
  }
}

/// Applies the empty-value and type checks shared by every validator.
///
/// `Ok(None)` means the value is empty and `allow_empty` is set.
pub(crate) fn prepare<V>(value: &V, allow_empty: bool, not_string: Error) -> Result<Option<&str>, Error>
where
  V: Candidate + ?Sized,
{
  match value.candidate() {
    Ok(Some(s)) => Ok(Some(s)),
    Ok(None) if allow_empty => Ok(None),
    Ok(None) => Err(Error::EmptyValue),
    Err(_) => Err(not_string),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_values() {
    assert_eq!(prepare("", true, Error::CannotCoerce), Ok(None));
    assert_eq!(prepare("", false, Error::CannotCoerce), Err(Error::EmptyValue));
    assert_eq!(prepare(&None::<&str>, false, Error::CannotCoerce), Err(Error::EmptyValue));
    assert_eq!(prepare(&None::<String>, true, Error::CannotCoerce), Ok(None));
    assert_eq!(prepare(b"".as_slice(), false, Error::CannotCoerce), Err(Error::EmptyValue));
  }

  #[test]
  fn test_not_string() {
    let bytes = [0xc3u8, 0x28];
    assert_eq!(prepare(&bytes, false, Error::CannotCoerce), Err(Error::CannotCoerce));
    assert_eq!(prepare(&bytes, true, Error::InvalidIpAddress), Err(Error::InvalidIpAddress));
  }

  #[test]
  fn test_string_like() {
    let owned = String::from("example.com");
    assert_eq!(prepare(&owned, false, Error::CannotCoerce), Ok(Some("example.com")));
    assert_eq!(prepare(b"a.io", false, Error::CannotCoerce), Ok(Some("a.io")));
    assert_eq!(prepare(&Cow::Borrowed(" "), false, Error::CannotCoerce), Ok(Some(" ")));
    assert_eq!(prepare(&Some("x"), false, Error::CannotCoerce), Ok(Some("x")));
  }
}
