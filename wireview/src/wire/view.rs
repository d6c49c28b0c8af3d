use super::{Error, Result};

/// A protocol header occupying the first `len()` octets of some buffer.
///
/// Implemented by all header wrappers in this module, regardless of whether they own their
/// buffer or borrow it from the caller.
#[allow(clippy::len_without_is_empty)]
pub trait HeaderView {
    /// The encoded length of the header in octets.
    ///
    /// For headers with a variable length this is the length resolved when the view was
    /// constructed, e.g. the IHL field times four for IPv4.
    fn len(&self) -> usize;

    /// The octets of the header, exactly `len()` of them.
    fn header_bytes(&self) -> &[u8];

    /// Copy the header into the start of `dst`.
    ///
    /// Returns the number of octets written, which is always `len()`. Fails with
    /// `Error::Truncated` and leaves `dst` untouched if it can not hold the header.
    fn write(&self, dst: &mut [u8]) -> Result<usize> {
        let len = self.len();
        let dst = dst.get_mut(..len).ok_or(Error::Truncated)?;
        dst.copy_from_slice(self.header_bytes());
        Ok(len)
    }
}

/// Ensure that `buffer` can hold a header of `len` octets.
pub(crate) fn check_len(buffer: &[u8], len: usize) -> Result<()> {
    if buffer.len() < len {
        Err(Error::Truncated)
    } else {
        Ok(())
    }
}

/// Generate the `HeaderView` and `AsRef` glue for a fixed-length header wrapper.
macro_rules! fixed_header_view {
    ($name:ident, $len:expr) => {
        impl<T: AsRef<[u8]>> $crate::wire::HeaderView for $name<T> {
            fn len(&self) -> usize {
                $len
            }

            fn header_bytes(&self) -> &[u8] {
                &self.buffer.as_ref()[..$len]
            }
        }

        impl<T: AsRef<[u8]>> AsRef<[u8]> for $name<T> {
            fn as_ref(&self) -> &[u8] {
                self.buffer.as_ref()
            }
        }
    };
}
