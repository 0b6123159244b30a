//! Pick a benchmark set of positions, spread evenly over piece counts.
//!
//! Tablebase lookups get more expensive with more pieces, so a benchmark
//! drawn at random from a typical collection of endgames would be dominated
//! by whatever piece count happens to be most common. [`pick()`] instead
//! gives each piece count an equal share of the selection.

use alloc::{
    collections::BTreeMap,
    string::{String, ToString as _},
    vec::Vec,
};
use core::fmt;

use rand::{seq::SliceRandom as _, Rng};

use crate::TbPosition;

/// Number of positions picked when no other target is given.
pub const DEFAULT_TARGET: usize = 100;

/// Error when there is nothing to pick from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PickError {
    /// None of the input lines is a valid FEN.
    NoValidFens,
}

impl fmt::Display for PickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PickError::NoValidFens => "no valid fens parsed",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PickError {}

/// Picks up to `target` FENs from `fens`.
///
/// Lines are trimmed, blank lines are ignored, and lines that do not parse
/// as FEN are skipped. The remaining FENs are grouped by piece count. Each
/// group is assigned an equal quota (the smallest piece counts receive the
/// remainder), and groups that cannot fill their quota leave room for
/// leftovers drawn from the other groups.
///
/// The selection is returned in lexicographic order.
///
/// # Errors
///
/// Returns [`PickError::NoValidFens`] if no line parses.
///
/// # Example
///
/// ```
/// use pyrrhic_host::bench::pick;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let fens = [
///     "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
///     "4k3/8/8/8/8/8/8/4K2R w - - 0 1",
///     "4k3/8/8/8/8/8/8/3QK2R w - - 0 1",
///     "not a fen",
/// ];
///
/// let picked = pick(fens, 2, &mut StdRng::seed_from_u64(42))?;
/// assert_eq!(picked.len(), 2);
/// # Ok::<_, pyrrhic_host::bench::PickError>(())
/// ```
pub fn pick<I, S, R>(fens: I, target: usize, rng: &mut R) -> Result<Vec<String>, PickError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut groups: BTreeMap<u8, Vec<String>> = BTreeMap::new();

    for line in fens {
        let fen = line.as_ref().trim();
        if fen.is_empty() {
            continue;
        }
        match fen.parse::<TbPosition>() {
            Ok(pos) => groups
                .entry(pos.piece_count())
                .or_default()
                .push(fen.to_string()),
            Err(err) => tracing::debug!(fen, %err, "skipping fen"),
        }
    }

    if groups.is_empty() {
        return Err(PickError::NoValidFens);
    }

    let total: usize = groups.values().map(Vec::len).sum();
    let need = target.min(total);
    let base = need / groups.len();
    let extra = need % groups.len();

    let mut selected = Vec::with_capacity(need);
    let mut pool = Vec::new();

    for (i, (pieces, mut group)) in groups.into_iter().enumerate() {
        let quota = base + usize::from(i < extra);
        tracing::debug!(pieces, available = group.len(), quota, "piece count quota");

        group.shuffle(rng);
        let rest = group.split_off(quota.min(group.len()));
        selected.extend(group);
        pool.extend(rest);
    }

    if selected.len() < need {
        tracing::debug!(missing = need - selected.len(), "topping up from leftovers");
        pool.shuffle(rng);
        pool.truncate(need - selected.len());
        selected.extend(pool);
    }

    selected.sort_unstable();
    Ok(selected)
}
