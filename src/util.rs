use core::num::TryFromIntError;

pub(crate) fn out_of_range_error() -> TryFromIntError {
    // TryFromIntError has a private constructor. Produce one from a
    // conversion that is known to overflow.
    u8::try_from(u32::MAX).unwrap_err()
}

macro_rules! from_enum_as_int_impl {
    ($from:ty, $($t:ty)+) => {
        $(impl From<$from> for $t {
            #[inline]
            fn from(value: $from) -> $t {
                value as $t
            }
        })+
    };
}

macro_rules! try_from_int_impl {
    ($type:ty, $lower:expr, $upper:expr, $($t:ty)+) => {
        $(impl core::convert::TryFrom<$t> for $type {
            type Error = core::num::TryFromIntError;

            #[inline]
            #[allow(unused_comparisons)]
            fn try_from(value: $t) -> Result<$type, Self::Error> {
                if ($lower..$upper).contains(&value) {
                    Ok(<$type>::ALL[value as usize])
                } else {
                    Err(crate::util::out_of_range_error())
                }
            }
        })+
    };
}
