//! ArcadeView: paints a game snapshot into a canvas.
//!
//! This module is pure (no I/O) and unit-tested. A frame is the board inside
//! a border, the title above it, a HUD panel to the right (score, the game's
//! summary line, key hints) and a WON/LOST banner across the board once the
//! round is over.

use crate::canvas::{Canvas, Rgb, Style};
use crate::core::GridModel;
use crate::types::{Cell, Coord, GameKind, GameStatus, PieceKind};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything one frame shows.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub kind: GameKind,
    pub board: &'a GridModel<Cell>,
    pub score: u32,
    pub status: GameStatus,
    pub summary: &'a str,
    pub cursor: Option<Coord>,
}

const BOARD_BG: Rgb = Rgb::new(24, 24, 34);

pub struct ArcadeView {
    /// Terminal columns per board cell.
    cell_w: u16,
}

impl ArcadeView {
    /// View sized for `kind`: 2048 needs room for four digits.
    pub fn for_kind(kind: GameKind) -> Self {
        let cell_w = match kind {
            GameKind::TwoZeroFourEight => 6,
            _ => 2,
        };
        Self { cell_w }
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_w
    }

    /// Paint `frame` into `canvas`, resizing it to the viewport.
    pub fn render_into(&self, frame: &Frame<'_>, viewport: Viewport, canvas: &mut Canvas) {
        canvas.resize(viewport.width, viewport.height);

        // Boards wider or taller than the viewport are clipped to it.
        let cols = u16::try_from(frame.board.width()).unwrap_or(u16::MAX);
        let rows = u16::try_from(frame.board.height()).unwrap_or(u16::MAX);
        let board_w = cols.saturating_mul(self.cell_w).min(viewport.width);
        let board_h = rows.min(viewport.height);
        let frame_w = board_w.saturating_add(2);
        let frame_h = board_h.saturating_add(2);
        let x0 = viewport.width.saturating_sub(frame_w.saturating_add(HUD_WIDTH)) / 2;
        let y0 = viewport.height.saturating_sub(frame_h.saturating_add(1)) / 2 + 1;

        canvas.text(x0, y0.saturating_sub(1), frame.kind.title(), Style::PLAIN.bold());
        canvas.fill(x0 + 1, y0 + 1, board_w, board_h, ' ', Style::PLAIN.on(BOARD_BG));
        draw_border(canvas, x0, y0, frame_w, frame_h);

        for at in frame.board.coords() {
            let Some(cell) = frame.board.at(at) else {
                continue;
            };
            let dx = u16::try_from(at.x).ok().and_then(|x| x.checked_mul(self.cell_w));
            let dy = u16::try_from(at.y).ok();
            let (Some(dx), Some(dy)) = (dx, dy) else {
                continue;
            };
            if dx >= board_w || dy >= board_h {
                continue;
            }
            let (text, mut style) = glyph(cell, self.cell_w);
            if frame.cursor == Some(at) {
                style = style.inverted();
            }
            canvas.text((x0 + 1).saturating_add(dx), (y0 + 1).saturating_add(dy), &text, style);
        }

        self.draw_hud(canvas, frame, x0.saturating_add(frame_w).saturating_add(2), y0);

        match frame.status {
            GameStatus::Won => banner(canvas, x0, y0, frame_w, frame_h, " WON ", Rgb::new(80, 220, 120)),
            GameStatus::Lost => banner(canvas, x0, y0, frame_w, frame_h, " LOST ", Rgb::new(230, 80, 80)),
            GameStatus::InProgress => {}
        }
    }

    /// Convenience helper that allocates a new canvas.
    pub fn render(&self, frame: &Frame<'_>, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut canvas);
        canvas
    }

    fn draw_hud(&self, canvas: &mut Canvas, frame: &Frame<'_>, x: u16, y: u16) {
        let label = Style::PLAIN.bold();
        let value = Style::fg(Rgb::new(200, 200, 200));
        let hint = value.dim();

        canvas.text(x, y, "SCORE", label);
        canvas.text(x, y + 1, &frame.score.to_string(), value);
        canvas.text(x, y + 3, frame.summary, value);

        let mut hy = y + 5;
        for line in key_hints(frame.kind) {
            canvas.text(x, hy, line, hint);
            hy += 1;
        }
        if frame.status.is_terminal() {
            canvas.text(x, hy + 1, "press any key", label);
        }
    }
}

const HUD_WIDTH: u16 = 28;

fn key_hints(kind: GameKind) -> &'static [&'static str] {
    match kind {
        GameKind::Snake | GameKind::TwoZeroFourEight => &["arrows/WASD move", "q/esc quit"],
        GameKind::Tetris => &["left/right/down move", "up rotate", "q/esc quit"],
        GameKind::Minesweeper => &["arrows move cursor", "enter reveal", "f flag", "q/esc quit"],
        GameKind::Battleship => &["arrows move cursor", "enter fire", "q/esc quit"],
        GameKind::Hangman => &["type a letter", "esc quit"],
    }
}

fn draw_border(canvas: &mut Canvas, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let style = Style::fg(Rgb::new(200, 200, 200));
    let right = x.saturating_add(w - 1);
    let bottom = y.saturating_add(h - 1);
    canvas.put(x, y, '┌', style);
    canvas.put(right, y, '┐', style);
    canvas.put(x, bottom, '└', style);
    canvas.put(right, bottom, '┘', style);
    for dx in 1..w - 1 {
        canvas.put(x.saturating_add(dx), y, '─', style);
        canvas.put(x.saturating_add(dx), bottom, '─', style);
    }
    for dy in 1..h - 1 {
        canvas.put(x, y.saturating_add(dy), '│', style);
        canvas.put(right, y.saturating_add(dy), '│', style);
    }
}

fn banner(canvas: &mut Canvas, x: u16, y: u16, w: u16, h: u16, text: &str, bg: Rgb) {
    let tw = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
    let bx = x.saturating_add(w.saturating_sub(tw) / 2);
    canvas.text(bx, y.saturating_add(h / 2), text, Style::fg(Rgb::new(0, 0, 0)).on(bg).bold());
}

fn piece_colour(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn tile_colour(value: u32) -> Rgb {
    match value.trailing_zeros() {
        1 => Rgb::new(238, 228, 218),
        2 => Rgb::new(237, 224, 200),
        3 => Rgb::new(242, 177, 121),
        4 => Rgb::new(245, 149, 99),
        5 => Rgb::new(246, 124, 95),
        6 => Rgb::new(246, 94, 59),
        7..=10 => Rgb::new(237, 204, 97),
        _ => Rgb::new(60, 58, 50),
    }
}

fn count_colour(n: u8) -> Rgb {
    match n {
        1 => Rgb::new(90, 140, 255),
        2 => Rgb::new(90, 200, 90),
        3 => Rgb::new(240, 90, 90),
        4 => Rgb::new(150, 90, 230),
        _ => Rgb::new(230, 160, 60),
    }
}

/// Text (exactly `width` columns) and style for one board cell.
fn glyph(cell: Cell, width: u16) -> (String, Style) {
    let w = width as usize;
    let base = Style::PLAIN.on(BOARD_BG);
    let fill = |ch: char| ch.to_string().repeat(w);
    let left = |s: &str| format!("{:<w$}", s, w = w);

    match cell {
        Cell::Empty => (left("·"), Style::fg(Rgb::new(90, 90, 100)).on(BOARD_BG).dim()),
        Cell::SnakeHead => (fill('█'), Style::fg(Rgb::new(120, 240, 120)).on(BOARD_BG).bold()),
        Cell::SnakeBody => (fill('█'), Style::fg(Rgb::new(60, 180, 60)).on(BOARD_BG)),
        Cell::Food => (left("●"), Style::fg(Rgb::new(230, 60, 60)).on(BOARD_BG)),
        Cell::Block(k) => (fill('█'), Style::fg(piece_colour(k)).on(BOARD_BG)),
        Cell::ActiveBlock(k) => (fill('█'), Style::fg(piece_colour(k)).on(BOARD_BG).bold()),
        Cell::Tile(v) => (
            format!("{:>w$}", v, w = w.saturating_sub(1)) + " ",
            Style::fg(Rgb::new(20, 20, 20)).on(tile_colour(v)).bold(),
        ),
        Cell::Hidden => (left("■"), Style::fg(Rgb::new(150, 150, 160)).on(BOARD_BG).dim()),
        Cell::Flagged => (left("⚑"), Style::fg(Rgb::new(240, 80, 80)).on(BOARD_BG).bold()),
        Cell::Revealed(0) => (left(" "), base),
        Cell::Revealed(n) => (left(&n.to_string()), Style::fg(count_colour(n)).on(BOARD_BG).bold()),
        Cell::Mine => (left("✱"), Style::fg(Rgb::new(255, 60, 60)).on(BOARD_BG).bold()),
        Cell::Ship => (fill('▒'), Style::fg(Rgb::new(170, 170, 180)).on(BOARD_BG)),
        Cell::Hit => (left("✕"), Style::fg(Rgb::new(255, 80, 60)).on(BOARD_BG).bold()),
        Cell::Miss => (left("○"), Style::fg(Rgb::new(90, 140, 220)).on(BOARD_BG)),
        Cell::Letter(c) => (left(&c.to_ascii_uppercase().to_string()), base.bold()),
        Cell::Blank => (left("_"), base),
        Cell::Divider => (left("│"), Style::fg(Rgb::new(200, 200, 200)).on(BOARD_BG)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: Vec<Vec<Cell>>) -> GridModel<Cell> {
        GridModel::from_rows(rows).unwrap()
    }

    fn frame<'a>(kind: GameKind, board: &'a GridModel<Cell>, status: GameStatus) -> Frame<'a> {
        Frame {
            kind,
            board,
            score: 42,
            status,
            summary: "Lines: 0",
            cursor: None,
        }
    }

    fn find(canvas: &Canvas, needle: &str) -> Option<(u16, u16)> {
        (0..canvas.height()).find_map(|y| {
            canvas
                .row_text(y)
                .find(needle)
                .map(|byte| (canvas.row_text(y)[..byte].chars().count() as u16, y))
        })
    }

    #[test]
    fn test_board_title_and_hud_are_drawn() {
        let b = board(vec![vec![Cell::SnakeHead, Cell::Food]]);
        let view = ArcadeView::for_kind(GameKind::Snake);
        let canvas = view.render(&frame(GameKind::Snake, &b, GameStatus::InProgress), Viewport::new(60, 10));

        assert!(find(&canvas, "Snake").is_some());
        assert!(find(&canvas, "SCORE").is_some());
        assert!(find(&canvas, "42").is_some());
        assert!(find(&canvas, "Lines: 0").is_some());
        let (x, y) = find(&canvas, "██●").unwrap();
        assert_eq!(canvas.get(x - 1, y).map(|g| g.ch), Some('│'));
        assert!(find(&canvas, "WON").is_none());
    }

    #[test]
    fn test_terminal_status_shows_banner() {
        let b = board(vec![vec![Cell::Empty; 6]; 3]);
        let view = ArcadeView::for_kind(GameKind::Tetris);
        let canvas = view.render(&frame(GameKind::Tetris, &b, GameStatus::Lost), Viewport::new(60, 16));
        assert!(find(&canvas, "LOST").is_some());
        assert!(find(&canvas, "press any key").is_some());
    }

    #[test]
    fn test_tiles_fit_cell_width() {
        let b = board(vec![vec![Cell::Tile(2048), Cell::Tile(2)]]);
        let view = ArcadeView::for_kind(GameKind::TwoZeroFourEight);
        let canvas = view.render(
            &frame(GameKind::TwoZeroFourEight, &b, GameStatus::InProgress),
            Viewport::new(60, 8),
        );
        assert!(find(&canvas, " 2048     2 ").is_some());
    }

    #[test]
    fn test_cursor_is_highlighted() {
        let b = board(vec![vec![Cell::Hidden, Cell::Hidden]]);
        let view = ArcadeView::for_kind(GameKind::Minesweeper);
        let mut f = frame(GameKind::Minesweeper, &b, GameStatus::InProgress);
        f.cursor = Some(Coord::new(1, 0));
        let canvas = view.render(&f, Viewport::new(60, 8));
        let (x, y) = find(&canvas, "■ ■").unwrap();
        let plain = canvas.get(x, y).unwrap().style;
        let marked = canvas.get(x + 2, y).unwrap().style;
        assert_eq!(marked, plain.inverted());
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let b = board(vec![vec![Cell::Empty; 10]; 20]);
        let view = ArcadeView::for_kind(GameKind::Tetris);
        let canvas = view.render(&frame(GameKind::Tetris, &b, GameStatus::Won), Viewport::new(5, 3));
        assert_eq!(canvas.width(), 5);
    }

    #[test]
    fn test_board_wider_than_u16_is_clipped() {
        // 12_000 tiles at six columns each is past u16::MAX.
        let b = GridModel::new(12_000, 2, Cell::Tile(2)).unwrap();
        let view = ArcadeView::for_kind(GameKind::TwoZeroFourEight);
        let canvas = view.render(
            &frame(GameKind::TwoZeroFourEight, &b, GameStatus::Won),
            Viewport::new(80, 12),
        );
        assert_eq!(canvas.width(), 80);
        let (x, y) = find(&canvas, "    2 ").unwrap();
        assert_eq!(canvas.get(x - 1, y).map(|g| g.ch), Some('│'));
        assert!(find(&canvas, "WON").is_some());
    }

    #[test]
    fn test_tall_board_is_clipped_to_viewport() {
        let b = GridModel::new(3, 40_000, Cell::Empty).unwrap();
        let view = ArcadeView::for_kind(GameKind::Snake);
        let canvas = view.render(&frame(GameKind::Snake, &b, GameStatus::InProgress), Viewport::new(60, 10));
        assert_eq!(canvas.height(), 10);
        assert!(find(&canvas, "┌──────┐").is_some());
    }
}
