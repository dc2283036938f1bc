//! Helpers for `custom_debug` to keep large tables readable in `{:?}` output.

use std::fmt;

const FIRST_N_ELEMENTS: usize = 3;

/// Collections whose debug output can be cut after a few elements
pub(crate) trait Trimmable {
    type Item: fmt::Debug;

    fn as_items(&self) -> &[Self::Item];
}

impl<T: fmt::Debug> Trimmable for Vec<T> {
    type Item = T;

    fn as_items(&self) -> &[T] {
        self
    }
}

impl<T: fmt::Debug, const N: usize> Trimmable for [T; N] {
    type Item = T;

    fn as_items(&self) -> &[T] {
        self
    }
}

/// Print the first few elements of a collection and how many were omitted.
pub(crate) fn trimmed_collection_fmt<C>(collection: &C, f: &mut fmt::Formatter) -> fmt::Result
where
    C: Trimmable,
{
    let items = collection.as_items();
    let shown = &items[..items.len().min(FIRST_N_ELEMENTS)];
    let omitted = items.len() - shown.len();

    if omitted == 0 {
        write!(f, "{shown:?}")
    } else {
        write!(f, "{shown:?} + {omitted} elements")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Wrapper(Vec<u8>);

    impl fmt::Debug for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            trimmed_collection_fmt(&self.0, f)
        }
    }

    #[test]
    fn test_short_collection_printed_whole() {
        assert_eq!(format!("{:?}", Wrapper(vec![1, 2])), "[1, 2]");
    }

    #[test]
    fn test_long_collection_trimmed() {
        assert_eq!(
            format!("{:?}", Wrapper(vec![1, 2, 3, 4, 5])),
            "[1, 2, 3] + 2 elements"
        );
    }
}
