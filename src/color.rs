use core::{fmt, ops, str::FromStr};

/// `White` or `Black`, numbered the way host engines number them.
///
/// This is the convention of the [`Host`](crate::Host) trait. Pyrrhic
/// numbers the colors the other way around, see [`TbColor`].
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// `White` and `Black`, in this order.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn from_white(white: bool) -> Color {
        if white {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub const fn from_black(black: bool) -> Color {
        Color::from_white(!black)
    }

    /// Gets the color with the given host engine index, where `White` is `0`
    /// and `Black` is `1`.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Color> {
        match index {
            0 => Some(Color::White),
            1 => Some(Color::Black),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn to_usize(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    #[inline]
    pub const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }

    #[inline]
    pub const fn other(self) -> Color {
        Color::from_white(self.is_black())
    }

    #[inline]
    pub fn fold_wb<T>(self, white: T, black: T) -> T {
        match self {
            Color::White => white,
            Color::Black => black,
        }
    }
}

impl ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.other()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fold_wb("white", "black"))
    }
}

/// Error when parsing an invalid color name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseColorError;

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid color")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Color, ParseColorError> {
        Ok(match s {
            "white" => Color::White,
            "black" => Color::Black,
            _ => return Err(ParseColorError),
        })
    }
}

/// `White` or `Black`, numbered the way Pyrrhic numbers them.
///
/// Pyrrhic defines `White` as `1` and `Black` as `0`, the opposite of
/// [`Color`]. Converting between the two keeps the meaning of the color and
/// inverts the number:
///
/// ```
/// use pyrrhic_host::{Color, TbColor};
///
/// assert_eq!(Color::from(TbColor::White), Color::White);
/// assert_eq!(TbColor::White.to_flag(), 1);
/// assert_eq!(Color::White.to_u8(), 0);
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum TbColor {
    Black = 0,
    White = 1,
}

impl TbColor {
    #[inline]
    pub const fn from_white(white: bool) -> TbColor {
        if white {
            TbColor::White
        } else {
            TbColor::Black
        }
    }

    /// Interprets a raw color flag the way Pyrrhic's C code does: any
    /// nonzero flag is `White`.
    #[inline]
    pub const fn from_flag(flag: u8) -> TbColor {
        TbColor::from_white(flag != 0)
    }

    #[inline]
    pub const fn to_flag(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, TbColor::White)
    }

    #[inline]
    pub const fn other(self) -> TbColor {
        TbColor::from_white(!self.is_white())
    }
}

impl Default for TbColor {
    fn default() -> TbColor {
        TbColor::White
    }
}

impl ops::Not for TbColor {
    type Output = TbColor;

    #[inline]
    fn not(self) -> TbColor {
        self.other()
    }
}

impl From<TbColor> for Color {
    #[inline]
    fn from(color: TbColor) -> Color {
        Color::from_white(color.is_white())
    }
}

impl From<Color> for TbColor {
    #[inline]
    fn from(color: Color) -> TbColor {
        TbColor::from_white(color.is_white())
    }
}

impl fmt::Display for TbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Color::from(*self), f)
    }
}

/// Container with values for each color.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct ByColor<T> {
    pub white: T,
    pub black: T,
}

impl<T> ByColor<T> {
    #[inline]
    pub const fn get(&self, color: Color) -> &T {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, color: Color) -> &mut T {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    #[inline]
    pub fn into_swapped(self) -> ByColor<T> {
        ByColor {
            white: self.black,
            black: self.white,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [&self.white, &self.black].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_numbering() {
        assert_eq!(Color::White.to_u8(), 0);
        assert_eq!(Color::Black.to_u8(), 1);
        for color in Color::ALL {
            assert_eq!(Color::from_index(color.to_u8()), Some(color));
        }
        assert_eq!(Color::from_index(2), None);
    }

    #[test]
    fn test_tb_numbering_is_inverted() {
        for flag in 0..2 {
            let tb = TbColor::from_flag(flag);
            assert_eq!(tb.to_flag(), flag);
            assert_eq!(Color::from(tb).to_u8(), 1 - flag);
        }
    }

    #[test]
    fn test_nonzero_flag_is_white() {
        assert_eq!(TbColor::from_flag(0), TbColor::Black);
        assert_eq!(TbColor::from_flag(1), TbColor::White);
        assert_eq!(TbColor::from_flag(0xff), TbColor::White);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!("white".parse(), Ok(Color::White));
        assert_eq!("black".parse(), Ok(Color::Black));
        assert_eq!("w".parse::<Color>(), Err(ParseColorError));
    }
}
