use core::{cmp::Ordering, fmt, str::FromStr};

use crate::{ByColor, ByRole, Role};

/// Error when parsing an invalid material key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseMaterialError;

impl fmt::Display for ParseMaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid material key")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseMaterialError {}

/// The material configuration of one side.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct MaterialSide {
    pub by_role: ByRole<u8>,
}

impl MaterialSide {
    pub fn count(&self) -> usize {
        Role::ALL
            .into_iter()
            .map(|role| usize::from(*self.by_role.get(role)))
            .sum()
    }

    pub fn has_pawns(&self) -> bool {
        self.by_role.pawn > 0
    }

    fn from_ascii_part(s: &[u8]) -> Result<MaterialSide, ParseMaterialError> {
        let mut side = MaterialSide::default();
        for &ch in s {
            let role = Role::from_char(char::from(ch)).ok_or(ParseMaterialError)?;
            let count = side.by_role.get_mut(role);
            *count = count.checked_add(1).ok_or(ParseMaterialError)?;
        }
        Ok(side)
    }
}

impl Ord for MaterialSide {
    fn cmp(&self, other: &MaterialSide) -> Ordering {
        self.count().cmp(&other.count()).then_with(|| {
            Role::ALL
                .into_iter()
                .rev()
                .map(|role| self.by_role.get(role).cmp(other.by_role.get(role)))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        })
    }
}

impl PartialOrd for MaterialSide {
    fn partial_cmp(&self, other: &MaterialSide) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MaterialSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for role in Role::ALL.into_iter().rev() {
            for _ in 0..*self.by_role.get(role) {
                fmt::Write::write_char(f, role.upper_char())?;
            }
        }
        Ok(())
    }
}

/// A material key, named like the Syzygy table files, e.g. `KQvKR`.
///
/// # Example
///
/// ```
/// use pyrrhic_host::Material;
///
/// let material: Material = "KRvKQ".parse()?;
/// assert_eq!(material.count(), 4);
/// assert_eq!(material.normalized().to_string(), "KQvKR");
/// # Ok::<_, pyrrhic_host::ParseMaterialError>(())
/// ```
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct Material {
    pub by_color: ByColor<MaterialSide>,
}

impl Material {
    pub fn count(&self) -> usize {
        self.by_color.iter().map(MaterialSide::count).sum()
    }

    pub fn is_symmetric(&self) -> bool {
        self.by_color.white == self.by_color.black
    }

    pub fn has_pawns(&self) -> bool {
        self.by_color.iter().any(MaterialSide::has_pawns)
    }

    #[must_use]
    pub fn into_swapped(self) -> Material {
        Material {
            by_color: self.by_color.into_swapped(),
        }
    }

    /// The same material with the stronger side first. This is the key under
    /// which table files are stored.
    #[must_use]
    pub fn normalized(self) -> Material {
        if self.by_color.white < self.by_color.black {
            self.into_swapped()
        } else {
            self
        }
    }

    pub fn from_ascii(s: &[u8]) -> Result<Material, ParseMaterialError> {
        if s.len() > 64 + 1 {
            return Err(ParseMaterialError);
        }

        let split = s
            .iter()
            .position(|&ch| ch == b'v')
            .ok_or(ParseMaterialError)?;

        Ok(Material {
            by_color: ByColor {
                white: MaterialSide::from_ascii_part(&s[..split])?,
                black: MaterialSide::from_ascii_part(&s[split + 1..])?,
            },
        })
    }
}

impl FromStr for Material {
    type Err = ParseMaterialError;

    fn from_str(s: &str) -> Result<Material, ParseMaterialError> {
        Material::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.by_color.white, self.by_color.black)
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString as _;

    use super::*;

    #[test]
    fn test_parse_and_display() {
        let material: Material = "KRPvKR".parse().expect("valid key");
        assert_eq!(material.by_color.white.by_role.pawn, 1);
        assert_eq!(material.by_color.black.by_role.rook, 1);
        assert_eq!(material.count(), 5);
        assert_eq!(material.to_string(), "KRPvKR");
        assert!(material.has_pawns());
        assert!(!material.is_symmetric());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("KQK".parse::<Material>(), Err(ParseMaterialError));
        assert_eq!("KXvK".parse::<Material>(), Err(ParseMaterialError));
    }

    #[test]
    fn test_normalized() {
        let material: Material = "KvKQ".parse().expect("valid key");
        assert_eq!(material.normalized().to_string(), "KQvK");

        let material: Material = "KNNvKB".parse().expect("valid key");
        assert_eq!(material.normalized().to_string(), "KNNvKB");

        // Same piece count: queen beats rook.
        let material: Material = "KRvKQ".parse().expect("valid key");
        assert_eq!(material.normalized().to_string(), "KQvKR");

        let material: Material = "KPvKP".parse().expect("valid key");
        assert!(material.is_symmetric());
        assert_eq!(material.normalized(), material);
    }
}
