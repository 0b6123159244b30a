//! Positions as Pyrrhic sees them.

use core::{fmt, hash, marker::PhantomData};

use arrayvec::ArrayVec;

use crate::{
    Bindings, Bitboard, ByColor, ByRole, Builtin, Host, Material, MaterialSide, Rank, Role,
    Square, TbColor,
};

/// Syzygy tables exist for up to 7 pieces.
pub const MAX_PIECES: usize = 7;

/// A capture of the side to move.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Capture {
    pub role: Role,
    pub from: Square,
    pub to: Square,
    /// The captured piece. A pawn for en passant captures.
    pub capture: Role,
    pub promotion: Option<Role>,
    pub en_passant: bool,
}

/// A container for captures that can be stored inline on the stack.
pub type CaptureList = ArrayVec<Capture, 256>;

/// Reasons for a [`TbPosition`] to be unsuitable for probing.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PositionError {
    /// A square is occupied by both colors.
    OverlappingColors,
    /// The role bitboards overlap or do not add up to the occupied squares.
    InconsistentRoles,
    /// A side does not have exactly one king.
    Kings,
    /// Pawns on the first or eighth rank.
    PawnsOnBackrank,
    /// More pieces than any table contains.
    TooManyPieces,
    /// Tables do not contain positions with castling rights.
    Castling,
    /// The en passant square does not follow a double pawn push.
    InvalidEpSquare,
    /// The side to move can capture the opponent king.
    OppositeCheck,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PositionError::OverlappingColors => "square occupied by both colors",
            PositionError::InconsistentRoles => "inconsistent piece bitboards",
            PositionError::Kings => "each side needs exactly one king",
            PositionError::PawnsOnBackrank => "pawns on backrank",
            PositionError::TooManyPieces => "too many pieces",
            PositionError::Castling => "tables do not contain positions with castling rights",
            PositionError::InvalidEpSquare => "invalid en passant square",
            PositionError::OppositeCheck => "opponent king in check",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PositionError {}

/// A position in the layout Pyrrhic works with: occupancy by color,
/// occupancy by role, and the side to move in Pyrrhic numbering.
///
/// Attack computations are dispatched statically to the host `H` through
/// [`Bindings`].
///
/// # Example
///
/// ```
/// use pyrrhic_host::TbPosition;
///
/// let pos: TbPosition = "4k3/8/8/8/8/8/8/4K2R w - - 0 1".parse()?;
/// assert_eq!(pos.piece_count(), 3);
/// assert_eq!(pos.material().to_string(), "KRvK");
/// assert!(!pos.is_check());
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub struct TbPosition<H = Builtin> {
    pub white: Bitboard,
    pub black: Bitboard,
    pub kings: Bitboard,
    pub queens: Bitboard,
    pub rooks: Bitboard,
    pub bishops: Bitboard,
    pub knights: Bitboard,
    pub pawns: Bitboard,
    /// Halfmoves since the last capture or pawn move, saturated.
    pub rule50: u8,
    pub ep: Option<Square>,
    pub castling: bool,
    pub turn: TbColor,
    host: PhantomData<fn() -> H>,
}

impl<H> Clone for TbPosition<H> {
    fn clone(&self) -> TbPosition<H> {
        *self
    }
}

impl<H> Copy for TbPosition<H> {}

impl<H> PartialEq for TbPosition<H> {
    fn eq(&self, other: &TbPosition<H>) -> bool {
        self.white == other.white
            && self.black == other.black
            && self.kings == other.kings
            && self.queens == other.queens
            && self.rooks == other.rooks
            && self.bishops == other.bishops
            && self.knights == other.knights
            && self.pawns == other.pawns
            && self.rule50 == other.rule50
            && self.ep == other.ep
            && self.castling == other.castling
            && self.turn == other.turn
    }
}

impl<H> Eq for TbPosition<H> {}

impl<H> hash::Hash for TbPosition<H> {
    fn hash<S: hash::Hasher>(&self, state: &mut S) {
        self.white.hash(state);
        self.black.hash(state);
        self.kings.hash(state);
        self.queens.hash(state);
        self.rooks.hash(state);
        self.bishops.hash(state);
        self.knights.hash(state);
        self.pawns.hash(state);
        self.rule50.hash(state);
        self.ep.hash(state);
        self.castling.hash(state);
        self.turn.hash(state);
    }
}

impl<H> fmt::Debug for TbPosition<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TbPosition")
            .field("white", &self.white.0)
            .field("black", &self.black.0)
            .field("kings", &self.kings.0)
            .field("queens", &self.queens.0)
            .field("rooks", &self.rooks.0)
            .field("bishops", &self.bishops.0)
            .field("knights", &self.knights.0)
            .field("pawns", &self.pawns.0)
            .field("rule50", &self.rule50)
            .field("ep", &self.ep)
            .field("castling", &self.castling)
            .field("turn", &self.turn)
            .finish()
    }
}

impl<H> Default for TbPosition<H> {
    fn default() -> TbPosition<H> {
        TbPosition::empty()
    }
}

impl<H> TbPosition<H> {
    /// An empty board with white to move.
    pub const fn empty() -> TbPosition<H> {
        TbPosition {
            white: Bitboard::EMPTY,
            black: Bitboard::EMPTY,
            kings: Bitboard::EMPTY,
            queens: Bitboard::EMPTY,
            rooks: Bitboard::EMPTY,
            bishops: Bitboard::EMPTY,
            knights: Bitboard::EMPTY,
            pawns: Bitboard::EMPTY,
            rule50: 0,
            ep: None,
            castling: false,
            turn: TbColor::White,
            host: PhantomData,
        }
    }

    /// The same position, viewed through a different host.
    pub const fn with_host<G>(self) -> TbPosition<G> {
        TbPosition {
            white: self.white,
            black: self.black,
            kings: self.kings,
            queens: self.queens,
            rooks: self.rooks,
            bishops: self.bishops,
            knights: self.knights,
            pawns: self.pawns,
            rule50: self.rule50,
            ep: self.ep,
            castling: self.castling,
            turn: self.turn,
            host: PhantomData,
        }
    }

    #[inline]
    pub const fn occupied(&self) -> Bitboard {
        Bitboard(self.white.0 | self.black.0)
    }

    #[inline]
    pub const fn by_color(&self, color: TbColor) -> Bitboard {
        match color {
            TbColor::White => self.white,
            TbColor::Black => self.black,
        }
    }

    #[inline]
    pub const fn by_role(&self, role: Role) -> Bitboard {
        match role {
            Role::Pawn => self.pawns,
            Role::Knight => self.knights,
            Role::Bishop => self.bishops,
            Role::Rook => self.rooks,
            Role::Queen => self.queens,
            Role::King => self.kings,
        }
    }

    fn by_role_mut(&mut self, role: Role) -> &mut Bitboard {
        match role {
            Role::Pawn => &mut self.pawns,
            Role::Knight => &mut self.knights,
            Role::Bishop => &mut self.bishops,
            Role::Rook => &mut self.rooks,
            Role::Queen => &mut self.queens,
            Role::King => &mut self.kings,
        }
    }

    pub fn role_at(&self, sq: Square) -> Option<Role> {
        if !self.occupied().contains(sq) {
            None
        } else {
            Role::ALL
                .into_iter()
                .find(|role| self.by_role(*role).contains(sq))
        }
    }

    pub fn color_at(&self, sq: Square) -> Option<TbColor> {
        if self.white.contains(sq) {
            Some(TbColor::White)
        } else if self.black.contains(sq) {
            Some(TbColor::Black)
        } else {
            None
        }
    }

    /// Puts a piece on `sq`, replacing whatever was there.
    pub fn set_piece_at(&mut self, sq: Square, color: TbColor, role: Role) {
        self.discard_piece_at(sq);
        match color {
            TbColor::White => self.white.add(sq),
            TbColor::Black => self.black.add(sq),
        }
        self.by_role_mut(role).add(sq);
    }

    pub fn discard_piece_at(&mut self, sq: Square) {
        self.white.remove(sq);
        self.black.remove(sq);
        for role in Role::ALL {
            self.by_role_mut(role).remove(sq);
        }
    }
}

impl<H: Host> TbPosition<H> {
    /// Number of pieces on the board, including kings.
    pub fn piece_count(&self) -> u8 {
        Bindings::<H>::popcount(self.occupied())
    }

    pub fn material(&self) -> Material {
        let side = |color: TbColor| {
            let ours = self.by_color(color);
            let mut by_role = ByRole::default();
            for role in Role::ALL {
                *by_role.get_mut(role) = Bindings::<H>::popcount(self.by_role(role) & ours);
            }
            MaterialSide { by_role }
        };

        Material {
            by_color: ByColor {
                white: side(TbColor::White),
                black: side(TbColor::Black),
            },
        }
    }

    pub fn king(&self, color: TbColor) -> Option<Square> {
        Bindings::<H>::lsb(self.kings & self.by_color(color))
    }

    /// Pieces of both colors attacking `sq`, given `occupied` squares.
    pub fn attackers_to(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        // A pawn of one color attacks sq iff a pawn of the other color on sq
        // would attack it back.
        (Bindings::<H>::pawn_attacks(sq, TbColor::Black) & self.pawns & self.white)
            | (Bindings::<H>::pawn_attacks(sq, TbColor::White) & self.pawns & self.black)
            | (Bindings::<H>::knight_attacks(sq) & self.knights)
            | (Bindings::<H>::bishop_attacks(sq, occupied) & (self.bishops | self.queens))
            | (Bindings::<H>::rook_attacks(sq, occupied) & (self.rooks | self.queens))
            | (Bindings::<H>::king_attacks(sq) & self.kings)
    }

    /// Tests if the king of `color` is attacked.
    fn is_attacked_king(&self, color: TbColor) -> bool {
        match self.king(color) {
            Some(king) => (self.attackers_to(king, self.occupied()) & self.by_color(!color)).any(),
            None => false,
        }
    }

    /// Tests if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.is_attacked_king(self.turn)
    }

    /// Tests that the side that just moved did not leave its king in check.
    pub fn is_legal(&self) -> bool {
        !self.is_attacked_king(!self.turn)
    }

    /// Squares attacked by a piece of `role` and `color` on `sq`.
    fn attacks_from(&self, sq: Square, color: TbColor, role: Role) -> Bitboard {
        let occupied = self.occupied();
        match role {
            Role::Pawn => Bindings::<H>::pawn_attacks(sq, color),
            Role::Knight => Bindings::<H>::knight_attacks(sq),
            Role::Bishop => Bindings::<H>::bishop_attacks(sq, occupied),
            Role::Rook => Bindings::<H>::rook_attacks(sq, occupied),
            Role::Queen => Bindings::<H>::queen_attacks(sq, occupied),
            Role::King => Bindings::<H>::king_attacks(sq),
        }
    }

    /// Generates the pseudo-legal captures of the side to move, including en
    /// passant and capturing promotions.
    pub fn captures(&self) -> CaptureList {
        let mut captures = CaptureList::new();

        let us = self.by_color(self.turn);
        let them = self.by_color(!self.turn);
        let promotion_rank = Bitboard::from(match self.turn {
            TbColor::White => Rank::Eighth,
            TbColor::Black => Rank::First,
        });

        for role in Role::ALL {
            let mut pieces = self.by_role(role) & us;
            while let Some(from) = Bindings::<H>::pop_lsb(&mut pieces) {
                let attacks = self.attacks_from(from, self.turn, role);

                let mut targets = attacks & them;
                while let Some(to) = Bindings::<H>::pop_lsb(&mut targets) {
                    let Some(capture) = self.role_at(to) else {
                        continue;
                    };
                    if role == Role::Pawn && promotion_rank.contains(to) {
                        for promotion in Role::PROMOTIONS {
                            captures.push(Capture {
                                role,
                                from,
                                to,
                                capture,
                                promotion: Some(promotion),
                                en_passant: false,
                            });
                        }
                    } else {
                        captures.push(Capture {
                            role,
                            from,
                            to,
                            capture,
                            promotion: None,
                            en_passant: false,
                        });
                    }
                }

                if role == Role::Pawn {
                    if let Some(ep) = self.ep {
                        if attacks.contains(ep) && !self.occupied().contains(ep) {
                            captures.push(Capture {
                                role,
                                from,
                                to: ep,
                                capture: Role::Pawn,
                                promotion: None,
                                en_passant: true,
                            });
                        }
                    }
                }
            }
        }

        captures
    }

    /// Checks that the position can be looked up in a table.
    ///
    /// # Errors
    ///
    /// Returns the first [`PositionError`] found.
    pub fn validate(&self) -> Result<(), PositionError> {
        if self.white.intersects(self.black) {
            return Err(PositionError::OverlappingColors);
        }

        let mut seen = Bitboard::EMPTY;
        for role in Role::ALL {
            let bb = self.by_role(role);
            if bb.intersects(seen) {
                return Err(PositionError::InconsistentRoles);
            }
            seen |= bb;
        }
        if seen != self.occupied() {
            return Err(PositionError::InconsistentRoles);
        }

        if Bindings::<H>::popcount(self.kings & self.white) != 1
            || Bindings::<H>::popcount(self.kings & self.black) != 1
        {
            return Err(PositionError::Kings);
        }

        if self.pawns.intersects(Bitboard::BACKRANKS) {
            return Err(PositionError::PawnsOnBackrank);
        }

        if usize::from(self.piece_count()) > MAX_PIECES {
            return Err(PositionError::TooManyPieces);
        }

        if self.castling {
            return Err(PositionError::Castling);
        }

        if let Some(ep) = self.ep {
            self.validate_ep(ep)?;
        }

        if !self.is_legal() {
            return Err(PositionError::OppositeCheck);
        }

        Ok(())
    }

    fn validate_ep(&self, ep: Square) -> Result<(), PositionError> {
        let (ep_rank, push) = match self.turn {
            TbColor::White => (Rank::Sixth, -8),
            TbColor::Black => (Rank::Third, 8),
        };

        if ep.rank() != ep_rank || self.occupied().contains(ep) {
            return Err(PositionError::InvalidEpSquare);
        }

        let pushed = ep.offset(push).ok_or(PositionError::InvalidEpSquare)?;
        let origin = ep.offset(-push).ok_or(PositionError::InvalidEpSquare)?;
        let them = self.by_color(!self.turn);

        if !(self.pawns & them).contains(pushed) || self.occupied().contains(origin) {
            return Err(PositionError::InvalidEpSquare);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(fen: &str) -> TbPosition {
        fen.parse().expect("valid fen")
    }

    #[test]
    fn test_set_and_discard() {
        let mut pos = TbPosition::<Builtin>::empty();
        pos.set_piece_at(Square::E4, TbColor::White, Role::Knight);
        assert_eq!(pos.role_at(Square::E4), Some(Role::Knight));
        assert_eq!(pos.color_at(Square::E4), Some(TbColor::White));
        pos.set_piece_at(Square::E4, TbColor::Black, Role::Queen);
        assert_eq!(pos.role_at(Square::E4), Some(Role::Queen));
        assert_eq!(pos.color_at(Square::E4), Some(TbColor::Black));
        assert!(pos.knights.is_empty());
        pos.discard_piece_at(Square::E4);
        assert_eq!(pos, TbPosition::empty());
    }

    #[test]
    fn test_check_by_pawn() {
        // Black pawn on d2 checks the white king on e1.
        let p = pos("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1");
        assert!(p.is_check());
        assert!(p.is_legal());

        // A white pawn on d2 does not check its own king, nor the black king.
        let p = pos("4k3/8/8/8/8/8/3P4/4K3 w - - 0 1");
        assert!(!p.is_check());
    }

    #[test]
    fn test_check_by_white_pawn() {
        let p = pos("8/8/3k4/4P3/8/8/8/4K3 b - - 0 1");
        assert!(p.is_check());
        let p = pos("8/8/4k3/4P3/8/8/8/4K3 b - - 0 1");
        assert!(!p.is_check());
    }

    #[test]
    fn test_sliding_check_is_blocked() {
        let p = pos("4k3/8/8/8/4n3/8/8/4R1K1 b - - 0 1");
        assert!(!p.is_check());
        let p = pos("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1");
        assert!(p.is_check());
    }

    #[test]
    fn test_illegal_opposite_check() {
        let p = pos("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1");
        assert!(!p.is_legal());
        assert_eq!(p.validate(), Err(PositionError::OppositeCheck));
    }

    #[test]
    fn test_material() {
        let p = pos("8/8/8/8/8/2k5/1p6/KR6 w - - 0 1");
        assert_eq!(p.piece_count(), 4);
        assert_eq!(p.material(), "KRvKP".parse::<Material>().expect("valid key"));
        assert_eq!(p.king(TbColor::White), Some(Square::A1));
        assert_eq!(p.king(TbColor::Black), Some(Square::C3));
    }

    #[test]
    fn test_captures_with_promotion() {
        // White pawn on b7 can capture the rook on a8 or c8.
        let p = pos("r1r1k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let captures = p.captures();
        assert_eq!(captures.len(), 8);
        assert!(captures
            .iter()
            .all(|c| c.role == Role::Pawn && c.capture == Role::Rook && c.promotion.is_some()));
    }

    #[test]
    fn test_captures_en_passant() {
        let p = pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert_eq!(p.validate(), Ok(()));
        let captures = p.captures();
        assert_eq!(captures.len(), 1);
        assert_eq!(
            captures[0],
            Capture {
                role: Role::Pawn,
                from: Square::E5,
                to: Square::D6,
                capture: Role::Pawn,
                promotion: None,
                en_passant: true,
            }
        );
    }

    #[test]
    fn test_black_captures() {
        let p = pos("4k3/8/8/8/8/2n5/PP6/R3K3 b - - 0 1");
        let captures = p.captures();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].role, Role::Knight);
        assert_eq!(captures[0].from, Square::C3);
        assert_eq!(captures[0].to, Square::A2);
        assert_eq!(captures[0].capture, Role::Pawn);
    }

    #[test]
    fn test_validate() {
        assert_eq!(pos("4k3/8/8/8/8/8/8/4K3 w - - 0 1").validate(), Ok(()));
        assert_eq!(
            pos("4k3/8/8/8/8/8/8/8 w - - 0 1").validate(),
            Err(PositionError::Kings)
        );
        assert_eq!(
            pos("4k3/8/8/8/8/8/8/P3K3 w - - 0 1").validate(),
            Err(PositionError::PawnsOnBackrank)
        );
        assert_eq!(
            pos("4k3/pppp4/8/8/8/8/PPPP4/4K3 w - - 0 1").validate(),
            Err(PositionError::TooManyPieces)
        );
        assert_eq!(
            pos("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").validate(),
            Err(PositionError::Castling)
        );
        assert_eq!(
            pos("4k3/8/8/3p4/8/8/8/4K3 w - e6 0 1").validate(),
            Err(PositionError::InvalidEpSquare)
        );

        let mut p = pos("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        p.black.add(Square::E1);
        assert_eq!(p.validate(), Err(PositionError::OverlappingColors));

        let mut p = pos("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        p.queens.add(Square::E1);
        assert_eq!(p.validate(), Err(PositionError::InconsistentRoles));
    }
}
