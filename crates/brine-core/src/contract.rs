//! Size contract: the checks every entry point runs before the backend.
//!
//! Each operation declares its buffer constraints as a table of [`Expect`]
//! rows, in argument order, and hands it to one shared routine. The first
//! failing row is reported and nothing further happens; in particular the
//! backend is never reached with a malformed buffer.
//!
//! ```text
//! box_easy(ciphertext, plaintext, nonce, pk, sk)
//!   ciphertext.len() == plaintext.len() + BOX_MACBYTES
//!   nonce.len()      == BOX_NONCEBYTES
//!   pk.len()         == BOX_PUBLICKEYBYTES
//!   sk.len()         == BOX_SECRETKEYBYTES
//! ```

use crate::error::{ConstraintViolation, Error, Result};

/// Fail unless `actual == expected`.
pub fn check_size(
    actual: usize,
    expected: usize,
    label: &'static str,
) -> std::result::Result<(), ConstraintViolation> {
    if actual == expected {
        Ok(())
    } else {
        Err(ConstraintViolation::Size { label, expected, actual })
    }
}

/// Fail unless `offset..offset + length` lies inside a buffer of
/// `buffer_len` bytes.
///
/// Lengths are unsigned, so only the upper bound and the addition itself can
/// go wrong; an overflowing sum is rejected rather than wrapped.
pub fn check_offset_params(
    buffer_len: usize,
    offset: usize,
    length: usize,
) -> std::result::Result<(), ConstraintViolation> {
    match offset.checked_add(length) {
        Some(end) if end <= buffer_len => Ok(()),
        _ => Err(ConstraintViolation::OffsetRange { buffer_len, offset, length }),
    }
}

/// One row of an operation's size table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expect {
    label: &'static str,
    actual: usize,
    /// `None` when the required length overflowed
    expected: Option<usize>,
}

impl Expect {
    /// `actual` must equal a fixed size.
    pub const fn size(actual: usize, expected: usize, label: &'static str) -> Self {
        Self { label, actual, expected: Some(expected) }
    }

    /// `actual` must equal `base + overhead`, e.g. a ciphertext that carries
    /// a MAC on top of its plaintext.
    pub const fn sum(actual: usize, base: usize, overhead: usize, label: &'static str) -> Self {
        Self { label, actual, expected: base.checked_add(overhead) }
    }

    fn check(&self) -> std::result::Result<(), ConstraintViolation> {
        match self.expected {
            Some(expected) => check_size(self.actual, expected, self.label),
            None => Err(ConstraintViolation::LengthOverflow { label: self.label }),
        }
    }
}

/// Run a size table on behalf of `operation`, reporting the first failing
/// row.
pub fn validate(operation: &'static str, rows: &[Expect]) -> Result<()> {
    Call::new(operation).validate(rows)
}

/// A single facade operation in flight.
///
/// Wraps the operation name so that validation failures and backend statuses
/// are reported against it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Call {
    operation: &'static str,
}

impl Call {
    pub(crate) const fn new(operation: &'static str) -> Self {
        Self { operation }
    }

    pub(crate) const fn operation(self) -> &'static str {
        self.operation
    }

    /// Run every row of the table, stopping at the first violation.
    pub(crate) fn validate(self, rows: &[Expect]) -> Result<()> {
        rows.iter().try_for_each(|row| row.check()).map_err(|v| self.reject(v))
    }

    /// Range check for slicing a caller buffer.
    pub(crate) fn range(self, buffer_len: usize, offset: usize, length: usize) -> Result<()> {
        check_offset_params(buffer_len, offset, length).map_err(|v| self.reject(v))
    }

    /// Reject the call with `violation`.
    pub(crate) fn reject(self, violation: ConstraintViolation) -> Error {
        tracing::debug!(operation = self.operation, %violation, "constraint violation");
        Error::Constraint { operation: self.operation, violation }
    }

    /// View a validated slice as the backend's fixed-size array.
    pub(crate) fn fixed<const N: usize>(self, buf: &[u8]) -> Result<&[u8; N]> {
        buf.try_into().map_err(|_| self.array_mismatch::<N>(buf.len()))
    }

    /// Mutable counterpart of [`Call::fixed`].
    pub(crate) fn fixed_mut<const N: usize>(self, buf: &mut [u8]) -> Result<&mut [u8; N]> {
        let len = buf.len();
        buf.try_into().map_err(|_| self.array_mismatch::<N>(len))
    }

    fn array_mismatch<const N: usize>(self, actual: usize) -> Error {
        self.reject(ConstraintViolation::Size { label: "fixed-size argument", expected: N, actual })
    }

    /// Translate a backend status.
    pub(crate) fn status(self, status: i32) -> Result<()> {
        check_status(self.operation, status)
    }
}

/// Translate a backend status code: zero is success, anything else is a
/// [`Error::Backend`] attributed to `operation`.
pub fn check_status(operation: &'static str, status: i32) -> Result<()> {
    if status == brine_crypto::STATUS_OK {
        Ok(())
    } else {
        tracing::debug!(operation, status, "backend failure");
        Err(Error::Backend { operation, status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_size_accepts_exact_length() {
        assert!(check_size(32, 32, "KEY").is_ok());
    }

    #[test]
    fn check_size_rejects_short_and_long() {
        assert_eq!(
            check_size(31, 32, "KEY"),
            Err(ConstraintViolation::Size { label: "KEY", expected: 32, actual: 31 })
        );
        assert!(check_size(33, 32, "KEY").is_err());
    }

    #[test]
    fn offset_params_boundaries() {
        assert!(check_offset_params(10, 0, 10).is_ok());
        assert!(check_offset_params(10, 10, 0).is_ok());
        assert!(check_offset_params(10, 4, 6).is_ok());
        assert!(check_offset_params(0, 0, 0).is_ok());

        // offset + length == buffer_len + 1
        assert!(check_offset_params(10, 5, 6).is_err());
        assert!(check_offset_params(10, 11, 0).is_err());
    }

    #[test]
    fn offset_params_rejects_overflow() {
        assert_eq!(
            check_offset_params(usize::MAX, usize::MAX, 2),
            Err(ConstraintViolation::OffsetRange {
                buffer_len: usize::MAX,
                offset: usize::MAX,
                length: 2,
            })
        );
    }

    #[test]
    fn sum_row_detects_overflow() {
        let row = Expect::sum(0, usize::MAX, 16, "plaintext.len() + BOX_MACBYTES");
        assert_eq!(
            row.check(),
            Err(ConstraintViolation::LengthOverflow { label: "plaintext.len() + BOX_MACBYTES" })
        );
    }

    #[test]
    fn validate_reports_first_failing_row() {
        let call = Call::new("box_easy");
        let err = call
            .validate(&[
                Expect::sum(21, 5, 16, "plaintext.len() + BOX_MACBYTES"),
                Expect::size(12, 24, "BOX_NONCEBYTES"),
                Expect::size(0, 32, "BOX_PUBLICKEYBYTES"),
            ])
            .unwrap_err();

        assert_eq!(
            err,
            Error::Constraint {
                operation: "box_easy",
                violation: ConstraintViolation::Size {
                    label: "BOX_NONCEBYTES",
                    expected: 24,
                    actual: 12,
                },
            }
        );
    }

    #[test]
    fn validate_empty_table_passes() {
        assert!(Call::new("noop").validate(&[]).is_ok());
    }

    #[test]
    fn fixed_converts_exact_slice() {
        let buf = [7u8; 24];
        let array: &[u8; 24] = Call::new("test").fixed(&buf).unwrap();
        assert_eq!(array, &[7u8; 24]);
    }

    #[test]
    fn fixed_rejects_wrong_length() {
        let buf = [0u8; 23];
        let result: Result<&[u8; 24]> = Call::new("test").fixed(&buf);
        assert!(result.unwrap_err().is_constraint_violation());
    }

    #[test]
    fn status_translation() {
        assert!(check_status("auth", 0).is_ok());
        assert_eq!(check_status("auth", -1), Err(Error::Backend { operation: "auth", status: -1 }));
        assert!(check_status("auth", 1).unwrap_err().is_backend_failure());
    }
}
