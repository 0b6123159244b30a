//! Host bindings for the Pyrrhic Syzygy tablebase library.
//!
//! Pyrrhic never generates attacks or counts bits itself. It calls a small
//! set of primitives supplied by the host engine. This crate defines that
//! contract as the [`Host`] trait, adapts it to the conventions of
//! Pyrrhic in [`Bindings`], and ships a complete host of its own,
//! [`Builtin`], backed by compile-time attack tables.
//!
//! The one convention that does not pass through unchanged is the color of
//! pawns: Pyrrhic numbers `White` as `1` ([`TbColor`]), while hosts
//! number it `0` ([`Color`]).
//!
//! # Examples
//!
//! Ask for pawn attacks the way Pyrrhic does:
//!
//! ```
//! use pyrrhic_host::{Bindings, Bitboard, Builtin, Square, TbColor};
//!
//! type Tb = Bindings<Builtin>;
//!
//! assert_eq!(
//!     Tb::pawn_attacks(Square::E4, TbColor::White),
//!     Bitboard::from(Square::D5) | Square::F5
//! );
//! assert_eq!(Tb::popcount(Bitboard::from(Square::E4) | Square::H8), 2);
//! ```
//!
//! Check a position before looking it up:
//!
//! ```
//! use pyrrhic_host::{PositionError, TbPosition};
//!
//! let pos: TbPosition = "8/8/8/8/8/2k5/1p6/KR6 w - - 0 1".parse()?;
//! assert_eq!(pos.validate(), Ok(()));
//! assert_eq!(pos.material().to_string(), "KRvKP");
//!
//! let pos: TbPosition = "r3k3/8/8/8/8/8/8/4K2R w Kq - 0 1".parse()?;
//! assert_eq!(pos.validate(), Err(PositionError::Castling));
//! # Ok::<_, pyrrhic_host::ParseFenError>(())
//! ```
//!
//! # Feature flags
//!
//! * `alloc`: Enables APIs which require the
//!   [`alloc`](https://doc.rust-lang.org/stable/alloc/index.html) crate
//!   (the [`bench`] position picker).
//! * `std`: Implies `alloc`. Enabled by default.
//!   For `no_std` environments, this must be disabled with `default-features = false`.
//! * `ffi`: Exports the primitives of [`Builtin`] as C symbols, under the
//!   names Pyrrhic links against.
//! * `cli`: Builds the `pick-bench` binary.

#![doc(html_root_url = "https://docs.rs/pyrrhic-host/0.1.0")]
#![no_std]
#![forbid(unsafe_op_in_unsafe_fn)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

#[macro_use]
mod util;
mod bindings;
mod color;
mod host;
mod material;
mod position;
mod role;
mod square;

pub mod attacks;
pub mod bitboard;
pub mod fen;

#[cfg(feature = "alloc")]
#[cfg_attr(docs_rs, doc(cfg(feature = "alloc")))]
pub mod bench;

#[cfg(feature = "ffi")]
#[cfg_attr(docs_rs, doc(cfg(feature = "ffi")))]
pub mod ffi;

pub use bindings::Bindings;
pub use bitboard::Bitboard;
pub use color::{ByColor, Color, ParseColorError, TbColor};
pub use fen::ParseFenError;
pub use host::{Builtin, Host};
pub use material::{Material, MaterialSide, ParseMaterialError};
pub use position::{Capture, CaptureList, PositionError, TbPosition, MAX_PIECES};
pub use role::{ByRole, Role};
pub use square::{File, ParseSquareError, Rank, Square};
