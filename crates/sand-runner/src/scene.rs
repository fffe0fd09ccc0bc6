//! Starting layout for headless runs.

use anyhow::Result;
use sand_core::{Position, Substance};
use sand_world::Session;

/// Paint a small demo: a metal basin with a sand pile and a water pool,
/// an acid drip above the basin wall, gas under the pool and a bomb resting
/// beside the acid. Positions that don't fit the grid are skipped.
/// Returns the number of cells painted.
pub fn paint_demo(session: &mut Session) -> Result<usize> {
    let width = session.grid().width();
    let height = session.grid().height();
    let floor = height * 3 / 4;
    let mut layout: Vec<(Position, Substance)> = Vec::new();

    for x in width / 8..width - width / 8 {
        layout.push((Position::new(x, floor), Substance::Metal));
    }
    for y in floor / 2..floor {
        layout.push((Position::new(width / 8, y), Substance::Metal));
        layout.push((Position::new(width - width / 8 - 1, y), Substance::Metal));
    }

    for y in 1..floor / 3 {
        for x in width / 4 - y / 2..width / 4 + y / 2 {
            layout.push((Position::new(x, y), Substance::Sand));
        }
    }
    for y in floor / 2..floor - 1 {
        for x in width / 2..width - width / 4 {
            layout.push((Position::new(x, y), Substance::Water));
        }
    }
    for y in 0..floor / 4 {
        layout.push((Position::new(width - width / 8 - 1, y), Substance::Acid));
    }
    layout.push((Position::new(width / 2 + 1, floor - 1), Substance::Gas));
    layout.push((Position::new(width / 3, floor - 1), Substance::Bomb));
    layout.push((Position::new(width / 3 + 1, floor - 1), Substance::Acid));

    let mut painted = 0;
    for (pos, kind) in layout {
        if session.grid().contains(pos) {
            session.paint_with(pos, kind)?;
            painted += 1;
        }
    }
    Ok(painted)
}
