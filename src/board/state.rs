//! Board state and the move state machine.
//!
//! The board owns every piece in a dense arena, the color to move, and an
//! optional chaining piece. While a chain is active the chaining piece has
//! logically left its square: occupancy queries skip it, and only it may
//! be selected until the chain ends.

use super::coord::Coord;
use super::error::BoardError;
use super::piece::{Color, Piece, PieceId, PieceType, UnionRole};
use super::union::Union;
use crate::movegen::{legal_targets, MoveKind, MoveTarget};

/// Piece order of each back rank, from the a-file to the h-file.
pub const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// Number of pieces in the initial setup.
pub const PIECE_COUNT: usize = 32;

/// What stands on a square, ignoring the chaining piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Empty,
    Single(PieceId),
    Paired(Union),
}

/// A single piece whose position or role changed during a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceChange {
    pub id: PieceId,
    pub from: Coord,
    pub to: Coord,
    pub role_before: UnionRole,
    pub role_after: UnionRole,
}

/// The observable result of an executed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub start: Coord,
    pub target: Coord,
    pub kind: MoveKind,
    pub changes: Vec<PieceChange>,
    /// Whether the turn went to the opponent. False exactly when a chain continues.
    pub turn_passed: bool,
    pub current_player: Color,
    pub chaining: Option<PieceId>,
}

/// What happens at the target square of a single-piece move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Landing {
    Plain,
    Union { partner: PieceId },
    Chain { displaced: PieceId },
}

/// A fully validated move. Executing it cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MovePlan {
    Single {
        mover: PieceId,
        target: Coord,
        landing: Landing,
        /// Pieces that stay on the start square of a chain continuation.
        left_behind: Vec<PieceId>,
    },
    Pair {
        union: Union,
        target: Coord,
    },
}

/// A Paco Ŝako board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pieces: Vec<Piece>,
    current_player: Color,
    chaining: Option<PieceId>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board in the standard starting position with white to move.
    ///
    /// Arena order: white back rank, white pawns, black back rank, black pawns,
    /// each from the a-file to the h-file.
    pub fn new() -> Self {
        let mut pieces = Vec::with_capacity(PIECE_COUNT);
        for (color, back, pawns) in [(Color::White, 0u8, 1u8), (Color::Black, 7, 6)] {
            for (x, &piece_type) in BACK_RANK.iter().enumerate() {
                pieces.push(Piece::new(piece_type, color, Coord::from_raw(x as u8, back)));
            }
            for x in 0..8u8 {
                pieces.push(Piece::new(PieceType::Pawn, color, Coord::from_raw(x, pawns)));
            }
        }
        Board {
            pieces,
            current_player: Color::White,
            chaining: None,
        }
    }

    /// Builds a board from raw parts, validating occupancy and the chain
    /// state, then recomputing every piece's role. Roles carried by `pieces`
    /// are ignored.
    pub fn from_parts(
        pieces: Vec<Piece>,
        current_player: Color,
        chaining: Option<PieceId>,
    ) -> Result<Self, BoardError> {
        if let Some(id) = chaining {
            if id.0 >= pieces.len() {
                return Err(BoardError::UnknownPiece(id.0));
            }
        }
        let mut board = Board {
            pieces,
            current_player,
            chaining,
        };
        for c in Coord::all() {
            board.at(c)?;
        }
        board.check_chain()?;
        board.realign_roles()?;
        Ok(board)
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn chaining(&self) -> Option<PieceId> {
        self.chaining
    }

    /// The chaining piece's nominal square, if a chain is active.
    pub fn chaining_position(&self) -> Option<Coord> {
        self.chaining.map(|id| self.pieces[id.0].position())
    }

    /// Iterates over all pieces with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces.iter().enumerate().map(|(i, p)| (PieceId(i), p))
    }

    /// All pieces at `p` except the chaining piece, unstructured.
    fn pieces_at(&self, p: Coord) -> Vec<PieceId> {
        self.iter()
            .filter(|(id, piece)| piece.position() == p && Some(*id) != self.chaining)
            .map(|(id, _)| id)
            .collect()
    }

    /// Structured occupancy of `p`, skipping the chaining piece.
    pub fn at(&self, p: Coord) -> Result<Occupant, BoardError> {
        let ids = self.pieces_at(p);
        match ids.len() {
            0 => Ok(Occupant::Empty),
            1 => Ok(Occupant::Single(ids[0])),
            2 => Ok(Occupant::Paired(Union::new(&self.pieces, &ids)?)),
            n => Err(BoardError::BoardCorruption(format!(
                "{} pieces share {}, at most two are allowed",
                n, p
            ))),
        }
    }

    /// The piece of color `c` at `p`, skipping the chaining piece.
    pub fn at_with_color(&self, p: Coord, c: Color) -> Result<Option<PieceId>, BoardError> {
        let ids: Vec<PieceId> = self
            .pieces_at(p)
            .into_iter()
            .filter(|id| self.pieces[id.0].color() == c)
            .collect();
        match ids.len() {
            0 => Ok(None),
            1 => Ok(Some(ids[0])),
            n => Err(BoardError::BoardCorruption(format!(
                "{} {} pieces share {}",
                n,
                c.name(),
                p
            ))),
        }
    }

    /// Whether a piece of color `c` may enter `p` by moving, dancing, or chaining.
    pub fn can_move_with_color(&self, p: Coord, c: Color) -> Result<bool, BoardError> {
        Ok(match self.at(p)? {
            Occupant::Empty | Occupant::Paired(_) => true,
            Occupant::Single(id) => self.pieces[id.0].color() != c,
        })
    }

    /// Legal targets for a selection at `p`, or `None` if `p` can't be selected.
    ///
    /// A selectable square may still offer no targets, e.g. a blocked pawn.
    pub fn select(&self, p: Coord) -> Result<Option<Vec<MoveTarget>>, BoardError> {
        if let Some(chaining) = self.chaining {
            if self.pieces[chaining.0].position() == p {
                return Ok(Some(legal_targets(self, chaining)?));
            }
            return Ok(None);
        }
        match self.at(p)? {
            Occupant::Empty => Ok(None),
            Occupant::Single(id) => {
                if self.pieces[id.0].color() == self.current_player {
                    Ok(Some(legal_targets(self, id)?))
                } else {
                    Ok(None)
                }
            }
            Occupant::Paired(union) => {
                // Unions move together and only onto empty squares.
                let targets = legal_targets(self, union.of_color(self.current_player))?;
                Ok(Some(
                    targets
                        .into_iter()
                        .filter(|t| t.kind == MoveKind::Plain)
                        .collect(),
                ))
            }
        }
    }

    /// Moves the piece or union at `start` to `target`.
    ///
    /// Either the whole move happens or the board is left untouched.
    pub fn apply_move(&mut self, start: Coord, target: Coord) -> Result<MoveReport, BoardError> {
        let (plan, kind) = self.plan_move(start, target)?;
        Ok(self.execute(plan, start, target, kind))
    }

    /// Validates a move without touching the board.
    fn plan_move(&self, start: Coord, target: Coord) -> Result<(MovePlan, MoveKind), BoardError> {
        if self.chaining.is_none() && self.at(start)? == Occupant::Empty {
            return Err(BoardError::NoPieceAtStart(start));
        }
        let kind = self
            .select(start)?
            .and_then(|targets| targets.into_iter().find(|t| t.target == target))
            .map(|t| t.kind)
            .ok_or(BoardError::IllegalMove { start, target })?;

        if let Some(chaining) = self.chaining {
            let position = self.pieces[chaining.0].position();
            if position != start {
                return Err(BoardError::MustMoveChainingPiece { chaining: position });
            }
            let landing = self.plan_landing(chaining, target)?;
            let plan = MovePlan::Single {
                mover: chaining,
                target,
                landing,
                left_behind: self.pieces_at(start),
            };
            return Ok((plan, kind));
        }

        let plan = match self.at(start)? {
            Occupant::Single(mover) => MovePlan::Single {
                mover,
                target,
                landing: self.plan_landing(mover, target)?,
                left_behind: Vec::new(),
            },
            Occupant::Paired(union) => {
                if self.at(target)? != Occupant::Empty {
                    return Err(BoardError::PairTargetOccupied(target));
                }
                MovePlan::Pair { union, target }
            }
            Occupant::Empty => return Err(BoardError::NoPieceAtStart(start)),
        };
        Ok((plan, kind))
    }

    fn plan_landing(&self, mover: PieceId, target: Coord) -> Result<Landing, BoardError> {
        let color = self.pieces[mover.0].color();
        match self.at(target)? {
            Occupant::Empty => Ok(Landing::Plain),
            Occupant::Single(other) => {
                if self.pieces[other.0].color() == color {
                    Err(BoardError::SameColorUnion(target))
                } else {
                    Ok(Landing::Union { partner: other })
                }
            }
            Occupant::Paired(union) => Ok(Landing::Chain {
                displaced: union.of_color(color),
            }),
        }
    }

    fn execute(
        &mut self,
        plan: MovePlan,
        start: Coord,
        target: Coord,
        kind: MoveKind,
    ) -> MoveReport {
        let before: Vec<(Coord, UnionRole)> = self
            .pieces
            .iter()
            .map(|p| (p.position(), p.role()))
            .collect();

        let turn_passed = match plan {
            MovePlan::Pair { union, target } => {
                self.pieces[union.white().0].set_position(target);
                self.pieces[union.black().0].set_position(target);
                true
            }
            MovePlan::Single {
                mover,
                target,
                landing,
                left_behind,
            } => {
                self.pieces[mover.0].set_position(target);
                let passed = match landing {
                    Landing::Plain => {
                        self.pieces[mover.0].set_role(UnionRole::Alone);
                        self.chaining = None;
                        true
                    }
                    Landing::Union { partner } => {
                        self.pieces[mover.0].set_role(UnionRole::Dancing);
                        self.pieces[partner.0].set_role(UnionRole::Dancing);
                        self.chaining = None;
                        true
                    }
                    Landing::Chain { displaced } => {
                        self.pieces[mover.0].set_role(UnionRole::TakingOver);
                        self.pieces[displaced.0].set_role(UnionRole::LeavingUnion);
                        self.chaining = Some(displaced);
                        false
                    }
                };
                for id in left_behind {
                    self.pieces[id.0].set_role(UnionRole::Dancing);
                }
                passed
            }
        };
        if turn_passed {
            self.current_player = self.current_player.opposite();
        }

        let changes = self
            .iter()
            .zip(before)
            .filter(|((_, p), (pos, role))| p.position() != *pos || p.role() != *role)
            .map(|((id, p), (pos, role))| PieceChange {
                id,
                from: pos,
                to: p.position(),
                role_before: role,
                role_after: p.role(),
            })
            .collect();

        MoveReport {
            start,
            target,
            kind,
            changes,
            turn_passed,
            current_player: self.current_player,
            chaining: self.chaining,
        }
    }

    /// Promotes the eligible pawn standing on `p` to a queen.
    pub fn promote_at(&mut self, p: Coord) -> Result<PieceId, BoardError> {
        let ids = self.pieces_at(p);
        let mut first_err = None;
        for id in ids {
            match self.pieces[id.0].promote() {
                Ok(()) => return Ok(id),
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        Err(first_err.unwrap_or(BoardError::IllegalPromotion("there is no piece on that square")))
    }

    /// Pieces that may currently be promoted, in arena order.
    pub fn promotable(&self) -> Vec<PieceId> {
        self.iter()
            .filter(|(id, p)| Some(*id) != self.chaining && p.check_promotion().is_ok())
            .map(|(id, _)| id)
            .collect()
    }

    /// Derives a piece's role from the layout and the chaining pointer.
    pub fn recompute_role(&self, id: PieceId) -> Result<UnionRole, BoardError> {
        if Some(id) == self.chaining {
            return Ok(UnionRole::LeavingUnion);
        }
        let piece = self.piece(id).ok_or(BoardError::UnknownPiece(id.0))?;
        match self.at(piece.position())? {
            Occupant::Single(_) => Ok(UnionRole::Alone),
            Occupant::Empty => Err(BoardError::BoardCorruption(format!(
                "piece {} is not found at its own square {}",
                id.0,
                piece.position()
            ))),
            Occupant::Paired(union) => {
                let taking_over = match self.chaining {
                    Some(c) => {
                        let chaining = &self.pieces[c.0];
                        union.position(&self.pieces)? == chaining.position()
                            && piece.color() == chaining.color()
                    }
                    None => false,
                };
                Ok(if taking_over {
                    UnionRole::TakingOver
                } else {
                    UnionRole::Dancing
                })
            }
        }
    }

    /// Overwrites every role with its recomputed value.
    fn realign_roles(&mut self) -> Result<(), BoardError> {
        let roles = (0..self.pieces.len())
            .map(|i| self.recompute_role(PieceId(i)))
            .collect::<Result<Vec<_>, _>>()?;
        for (piece, role) in self.pieces.iter_mut().zip(roles) {
            piece.set_role(role);
        }
        Ok(())
    }

    /// A chain belongs to the side to move and always has a same-colored
    /// piece taking over the square the chaining piece left.
    fn check_chain(&self) -> Result<(), BoardError> {
        let Some(id) = self.chaining else {
            return Ok(());
        };
        let chaining = self.piece(id).ok_or(BoardError::UnknownPiece(id.0))?;
        let (position, color) = (chaining.position(), chaining.color());
        if color != self.current_player {
            return Err(BoardError::BoardCorruption(format!(
                "{} piece is chaining on {} while {} is to move",
                color.name(),
                position,
                self.current_player.name()
            )));
        }
        if self.at_with_color(position, color)?.is_none() {
            return Err(BoardError::BoardCorruption(format!(
                "chaining piece left {} without a piece taking over",
                position
            )));
        }
        Ok(())
    }

    /// Checks occupancy limits, union structure, the chain, and role consistency.
    pub fn check_invariants(&self) -> Result<(), BoardError> {
        for c in Coord::all() {
            self.at(c)?;
        }
        self.check_chain()?;
        for (id, piece) in self.iter() {
            let expected = self.recompute_role(id)?;
            if piece.role() != expected {
                return Err(BoardError::BoardCorruption(format!(
                    "piece {} on {} has role {:?}, expected {:?}",
                    id.0,
                    piece.position(),
                    piece.role(),
                    expected
                )));
            }
        }
        Ok(())
    }
}
