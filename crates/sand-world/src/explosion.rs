//! Bomb trigger detection and blast clearing.

use crate::grid::Grid;
use sand_core::{Direction, Position, Substance};
use tracing::debug;

/// Whether any of the four cardinal neighbors holds acid. Neighbors outside
/// the grid don't count.
pub fn next_to_acid(grid: &Grid, pos: Position) -> bool {
    [Direction::Up, Direction::Right, Direction::Down, Direction::Left]
        .into_iter()
        .any(|direction| grid.cell(pos.step(direction)) == Some(Substance::Acid))
}

/// Top-left corner of the blast square: `radius` unit steps up and left,
/// each axis stopping at 0.
pub fn blast_anchor(pos: Position, radius: i32) -> Position {
    let step = |coord: i32| coord - radius.min(coord.max(0));
    Position::new(step(pos.x), step(pos.y))
}

/// Clear the `2 * radius` square anchored at [`blast_anchor`]. Cells past the
/// right or bottom edge are skipped, so the region shrinks there instead of
/// shifting. Returns how many occupied cells were emptied.
pub fn detonate(grid: &mut Grid, pos: Position, radius: i32) -> usize {
    let anchor = blast_anchor(pos, radius);
    let side = radius.saturating_mul(2);
    let rows = anchor.y.max(0)..anchor.y.saturating_add(side).min(grid.height());
    let cols = anchor.x.max(0)..anchor.x.saturating_add(side).min(grid.width());
    let mut cleared = 0;

    for y in rows {
        for x in cols.clone() {
            let target = Position::new(x, y);
            match grid.cell(target) {
                Some(Substance::Empty) | None => {}
                Some(_) => {
                    grid.put(target, Substance::Empty);
                    cleared += 1;
                }
            }
        }
    }

    debug!(
        x = pos.x,
        y = pos.y,
        radius,
        anchor_x = anchor.x,
        anchor_y = anchor.y,
        cleared,
        "Bomb detonated"
    );

    cleared
}
