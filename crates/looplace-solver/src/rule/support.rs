//! Helpers shared by the deduction rules.
//!
//! All coordinates follow the board convention: cell `(row, column)` has its
//! north-west corner at junction `(row, column)` and its south-east corner
//! at junction `(row + 1, column + 1)`.

use looplace_core::{Board, Direction, EdgeState, XorPair};
use looplace_game::MoveError;

use crate::Pass;

/// The junction at the corner of cell `(row, column)` where edges `dir1`
/// and `dir2` meet.
///
/// The directions must name two perpendicular cell edges.
pub(crate) fn corner_junction(
    row: usize,
    column: usize,
    dir1: Direction,
    dir2: Direction,
) -> (usize, usize) {
    let row = if dir1 == Direction::South || dir2 == Direction::South {
        row + 1
    } else {
        row
    };
    let column = if dir1 == Direction::East || dir2 == Direction::East {
        column + 1
    } else {
        column
    };
    (row, column)
}

/// Whether exactly one of the junction's `dir1`/`dir2` edges carries a line
/// while the other cannot.
///
/// "Cannot" means missing or crossed, or, with `allow_unknown`, still
/// undetermined. A recorded exclusive-or constraint over the same pair also
/// counts: it guarantees one line will leave through `dir1` or `dir2`.
pub(crate) fn junction_has_one_outward_line(
    board: &Board,
    row: usize,
    column: usize,
    dir1: Direction,
    dir2: Direction,
    allow_unknown: bool,
) -> bool {
    let edge1 = board.junction_edge_state(row, column, dir1);
    let edge2 = board.junction_edge_state(row, column, dir2);
    let blocked = |edge: Option<EdgeState>| match edge {
        None | Some(EdgeState::Cross) => true,
        Some(EdgeState::Undetermined) => allow_unknown,
        Some(EdgeState::Line) => false,
    };
    if edge1 == Some(EdgeState::Line) && blocked(edge2) {
        return true;
    }
    if edge2 == Some(EdgeState::Line) && blocked(edge1) {
        return true;
    }
    board.junction(row, column).has_inference(dir1, dir2)
}

/// Whether cell `(row, column)` sits in a corner formed at the junction
/// where its `dir1` and `dir2` edges meet.
///
/// The junction's outward edges must be missing or crossed and the cell's
/// own two edges at that junction must not be crossed.
pub(crate) fn is_corner(
    board: &Board,
    row: usize,
    column: usize,
    dir1: Direction,
    dir2: Direction,
) -> bool {
    let (jr, jc) = corner_junction(row, column, dir1, dir2);
    let outward1 = board.junction_edge_state(jr, jc, dir1);
    let outward2 = board.junction_edge_state(jr, jc, dir2);
    if !matches!(outward1, None | Some(EdgeState::Cross))
        || !matches!(outward2, None | Some(EdgeState::Cross))
    {
        return false;
    }
    let inward1 = board.junction_edge_state(jr, jc, dir1.opposite());
    let inward2 = board.junction_edge_state(jr, jc, dir2.opposite());
    inward1 != Some(EdgeState::Cross) && inward2 != Some(EdgeState::Cross)
}

/// Records that exactly one of the junction's `dir1`/`dir2` edges carries a
/// line.
///
/// When one of the pair is already dead the other is marked as a line right
/// away; otherwise the exclusive-or constraint is stored for
/// [`ResolveInferences`](crate::rule::ResolveInferences) to discharge.
pub(crate) fn infer_junction_xor(
    pass: &mut Pass<'_>,
    row: usize,
    column: usize,
    dir1: Direction,
    dir2: Direction,
) -> Result<bool, MoveError> {
    let edge1 = pass.board().junction_edge_state(row, column, dir1);
    let edge2 = pass.board().junction_edge_state(row, column, dir2);
    if matches!(edge1, None | Some(EdgeState::Cross)) && edge2.is_some() {
        return pass.mark_junction_edge(row, column, dir2, EdgeState::Line);
    }
    if matches!(edge2, None | Some(EdgeState::Cross)) && edge1.is_some() {
        return pass.mark_junction_edge(row, column, dir1, EdgeState::Line);
    }
    Ok(pass.add_inference(row, column, XorPair::new(dir1, dir2)))
}

/// The hint of the cell offset `(dr, dc)` from `(row, column)`, or `None`
/// when that lands off the board or the cell is unhinted.
pub(crate) fn hint_offset(
    board: &Board,
    row: usize,
    column: usize,
    dr: isize,
    dc: isize,
) -> Option<u8> {
    let row = row.checked_add_signed(dr).filter(|&r| r < board.rows())?;
    let column = column
        .checked_add_signed(dc)
        .filter(|&c| c < board.columns())?;
    board.hint(row, column)
}

/// Marks the junction's single live edge out of `dir1`/`dir2`, if there is
/// exactly one, with `state`.
pub(crate) fn mark_outgoing_single_line(
    pass: &mut Pass<'_>,
    row: usize,
    column: usize,
    dir1: Direction,
    dir2: Direction,
    state: EdgeState,
) -> Result<bool, MoveError> {
    let edge1 = pass.board().junction_edge_state(row, column, dir1);
    let edge2 = pass.board().junction_edge_state(row, column, dir2);
    if matches!(edge1, None | Some(EdgeState::Cross)) && edge2.is_some() {
        pass.mark_junction_edge(row, column, dir2, state)
    } else if matches!(edge2, None | Some(EdgeState::Cross)) && edge1.is_some() {
        pass.mark_junction_edge(row, column, dir1, state)
    } else {
        Ok(false)
    }
}
