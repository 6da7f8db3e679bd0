#![forbid(unsafe_code)]

//! Cell-grid rasterizer for [`OverlayScene`]s.
//!
//! Hosts without a vector backend (terminals, snapshot tests, the demo) can
//! paint a scene into a [`Canvas`]: each cell samples the scene at its centre,
//! so the rounded cutout shows up as a hole in the dim shading. Popover text
//! is laid out by grapheme cluster and terminal column width.

use limelight_core::geometry::{Point, Rect, Size};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::overlay::OverlayScene;

/// One painted cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    /// Nothing drawn; the host content shows through.
    #[default]
    Clear,
    /// Dim shading with alpha in `0..=255`.
    Dim(u8),
    /// Popover frame.
    Border(char),
    /// Popover background.
    Fill,
    /// Leading cell of a grapheme.
    Glyph(String),
    /// Trailing cell covered by a wide grapheme.
    Continuation,
}

/// A grid of cells covering the screen.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    cell_size: Size,
    cells: Vec<Cell>,
}

impl Canvas {
    /// A `width`×`height` grid where each cell spans `cell_size` points.
    #[must_use]
    pub fn new(width: u16, height: u16, cell_size: Size) -> Self {
        Self {
            width,
            height,
            cell_size,
            cells: vec![Cell::Clear; usize::from(width) * usize::from(height)],
        }
    }

    /// A grid sized so that `screen` fits `width` columns.
    #[must_use]
    pub fn fit(screen: Size, width: u16, height: u16) -> Self {
        let cell_size = Size::new(
            screen.width / f32::from(width.max(1)),
            screen.height / f32::from(height.max(1)),
        );
        Self::new(width, height, cell_size)
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        (x < self.width && y < self.height)
            .then(|| &self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)])
    }

    fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = usize::from(y) * usize::from(self.width) + usize::from(x);
            self.cells[idx] = cell;
        }
    }

    /// Reset every cell to [`Cell::Clear`].
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Clear);
    }

    /// Number of dimmed cells.
    #[must_use]
    pub fn dimmed_cells(&self) -> usize {
        self.cells.iter().filter(|c| matches!(c, Cell::Dim(_))).count()
    }

    /// Whether anything at all is drawn.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::Clear)
    }

    fn cell_center(&self, x: u16, y: u16) -> Point {
        Point::new(
            (f32::from(x) + 0.5) * self.cell_size.width,
            (f32::from(y) + 0.5) * self.cell_size.height,
        )
    }

    /// Cell range covered by `rect`, clipped to the grid.
    fn cell_span(&self, rect: Rect) -> Option<(u16, u16, u16, u16)> {
        if self.cell_size.width <= 0.0 || self.cell_size.height <= 0.0 || rect.is_empty() {
            return None;
        }
        let to_col = |v: f32| (v / self.cell_size.width).round().clamp(0.0, f32::from(self.width));
        let to_row = |v: f32| (v / self.cell_size.height).round().clamp(0.0, f32::from(self.height));
        let (x0, x1) = (to_col(rect.min_x()) as u16, to_col(rect.max_x()) as u16);
        let (y0, y1) = (to_row(rect.min_y()) as u16, to_row(rect.max_y()) as u16);
        (x1 > x0 && y1 > y0).then_some((x0, y0, x1, y1))
    }

    /// Paint `scene` over a cleared grid.
    pub fn paint(&mut self, scene: &OverlayScene) {
        self.clear();
        let alpha = (scene.dim.opacity * scene.opacity).clamp(0.0, 1.0);
        let shade = (alpha * 255.0).round() as u8;
        if shade == 0 {
            return;
        }

        for y in 0..self.height {
            for x in 0..self.width {
                let p = self.cell_center(x, y);
                if !scene.dim.bounds.contains(p) {
                    continue;
                }
                let revealed = scene.cutout.as_ref().is_some_and(|c| c.shape.contains(p));
                if !revealed {
                    self.set(x, y, Cell::Dim(shade));
                }
            }
        }

        if let Some(popover) = &scene.popover {
            self.paint_label(popover.frame, &popover.title);
        }
    }

    fn paint_label(&mut self, frame: Rect, title: &str) {
        let Some((x0, y0, x1, y1)) = self.cell_span(frame) else {
            return;
        };
        // Grow to fit the frame plus text when cells are coarse.
        let text_cols = UnicodeWidthStr::width(title).min(usize::from(u16::MAX)) as u16;
        let x1 = x1.max(x0.saturating_add(text_cols).saturating_add(2)).min(self.width);
        let y1 = y1.max(y0.saturating_add(3)).min(self.height);
        if x1 < x0 + 2 || y1 < y0 + 2 {
            return;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                let edge_x = x == x0 || x == x1 - 1;
                let edge_y = y == y0 || y == y1 - 1;
                let cell = match (edge_x, edge_y) {
                    (true, true) => Cell::Border('+'),
                    (false, true) => Cell::Border('-'),
                    (true, false) => Cell::Border('|'),
                    (false, false) => Cell::Fill,
                };
                self.set(x, y, cell);
            }
        }

        let row = y0 + (y1 - y0) / 2;
        let inner = x1 - x0 - 2;
        let start = x0 + 1 + inner.saturating_sub(text_cols) / 2;
        let mut col = start;
        for grapheme in title.graphemes(true) {
            let w = UnicodeWidthStr::width(grapheme) as u16;
            if w == 0 {
                continue;
            }
            if col + w > x1 - 1 {
                break;
            }
            self.set(col, row, Cell::Glyph(grapheme.to_owned()));
            for extra in 1..w {
                self.set(col + extra, row, Cell::Continuation);
            }
            col += w;
        }
    }

    /// Render the grid as text, one line per row.
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + usize::from(self.height));
        for y in 0..self.height {
            for x in 0..self.width {
                match self.cell(x, y) {
                    Some(Cell::Clear) | None => out.push(' '),
                    Some(Cell::Dim(a)) if *a >= 100 => out.push('#'),
                    Some(Cell::Dim(a)) if *a >= 40 => out.push(':'),
                    Some(Cell::Dim(_)) => out.push('.'),
                    Some(Cell::Border(c)) => out.push(*c),
                    Some(Cell::Fill) => out.push(' '),
                    Some(Cell::Glyph(g)) => out.push_str(g),
                    Some(Cell::Continuation) => {}
                }
            }
            out.push('\n');
        }
        out
    }
}
