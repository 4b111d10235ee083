//! Renderer-facing snapshot of the visible playfield

use crate::board::Cell;
use crate::game::GameEngine;
use crate::tetromino::{BlockKind, Position};

/// What a renderer should draw in one visible cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    Empty,
    Locked(BlockKind),
    Active(BlockKind),
    /// Where the active block would land
    Ghost(BlockKind),
}

/// Visible rows top to bottom, buffer rows excluded.
///
/// The active block wins over its ghost, and both win over locked cells.
pub fn visible_cells(engine: &GameEngine, show_ghost: bool) -> Vec<Vec<CellView>> {
    let current = engine.current();
    let kind = current.kind();
    let active = current.tile_positions();
    let ghost = show_ghost.then(|| engine.landing_projection().tile_positions());

    engine
        .grid()
        .visible_rows()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let here = |tiles: &[Position]| {
                        tiles
                            .iter()
                            .any(|p| p.row == row as i32 && p.col == col as i32)
                    };
                    if !engine.is_game_over() && here(&active) {
                        CellView::Active(kind)
                    } else if !engine.is_game_over()
                        && ghost.as_ref().is_some_and(|g| here(g))
                    {
                        CellView::Ghost(kind)
                    } else {
                        match cell {
                            Cell::Filled(locked) => CellView::Locked(*locked),
                            Cell::Empty => CellView::Empty,
                        }
                    }
                })
                .collect()
        })
        .collect()
}

/// Plain-text rendering: a box-drawn frame, two characters per cell.
pub fn render_text(engine: &GameEngine, show_ghost: bool) -> String {
    let rows = visible_cells(engine, show_ghost);
    let width = engine.grid().cols() * 2;
    let mut out = String::new();

    out.push('╔');
    out.push_str(&"═".repeat(width));
    out.push_str("╗\n");
    for row in rows {
        out.push('║');
        for cell in row {
            out.push_str(match cell {
                CellView::Empty => "  ",
                CellView::Ghost(_) => "░░",
                CellView::Locked(kind) | CellView::Active(kind) => kind.label(),
            });
        }
        out.push_str("║\n");
    }
    out.push('╚');
    out.push_str(&"═".repeat(width));
    out.push('╝');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Grid, BUFFER_ROWS, GRID_COLS, VISIBLE_ROWS};

    fn count(rows: &[Vec<CellView>], pred: impl Fn(&CellView) -> bool) -> usize {
        rows.iter().flatten().filter(|c| pred(c)).count()
    }

    #[test]
    fn test_dimensions_exclude_buffer() {
        let game = GameEngine::with_seed(1);
        let rows = visible_cells(&game, true);
        assert_eq!(rows.len(), VISIBLE_ROWS);
        assert!(rows.iter().all(|r| r.len() == GRID_COLS));
    }

    #[test]
    fn test_ghost_sits_on_floor() {
        let game = GameEngine::with_seed(1);
        let rows = visible_cells(&game, true);
        assert_eq!(count(&rows, |c| matches!(c, CellView::Ghost(_))), 4);
        assert!(rows[VISIBLE_ROWS - 1]
            .iter()
            .any(|c| matches!(c, CellView::Ghost(_))));

        let hidden = visible_cells(&game, false);
        assert_eq!(count(&hidden, |c| matches!(c, CellView::Ghost(_))), 0);
    }

    #[test]
    fn test_active_tiles_in_buffer_are_hidden() {
        // A freshly spawned block sits entirely in the two buffer rows
        let game = GameEngine::with_seed(1);
        assert!(game
            .current()
            .tile_positions()
            .iter()
            .all(|p| (p.row as usize) < BUFFER_ROWS));
        let rows = visible_cells(&game, false);
        assert_eq!(count(&rows, |c| matches!(c, CellView::Active(_))), 0);
    }

    #[test]
    fn test_locked_cells_show_their_kind() {
        let mut game = GameEngine::with_seed(6);
        let kind = game.current().kind();
        game.hard_drop();
        let rows = visible_cells(&game, false);
        assert_eq!(count(&rows, |c| *c == CellView::Locked(kind)), 4);
    }

    #[test]
    fn test_active_hides_ghost_when_landed() {
        let mut game = GameEngine::with_seed(2);
        while game.landing_projection() != *game.current() {
            game.move_down();
        }
        let rows = visible_cells(&game, true);
        assert_eq!(count(&rows, |c| matches!(c, CellView::Active(_))), 4);
        assert_eq!(count(&rows, |c| matches!(c, CellView::Ghost(_))), 0);
    }

    #[test]
    fn test_render_text_frame() {
        let game = GameEngine::with_grid(Grid::default(), 0);
        let text = render_text(&game, true);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), VISIBLE_ROWS + 2);
        assert!(lines[0].starts_with('╔'));
        assert!(lines[VISIBLE_ROWS + 1].ends_with('╝'));
        assert!(text.contains("░░"));
    }
}
