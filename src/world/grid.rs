//! World lookup grid
//!
//! A dense canvas of cells, each holding the id of the level that owns it or
//! a sentinel. The game uses it to find which level a world position is in.

use crate::config::CanvasSize;
use crate::error::{PipelineError, Result};

/// Where a level sits on the world canvas, in grid cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Level id written into owned cells
    pub id: i32,
    /// Level name, for error reporting
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Placement {
    pub fn new(id: i32, name: impl Into<String>, x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            id,
            name: name.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Whole footprint inside the canvas (empty footprints always fit)
    fn fits(&self, canvas: CanvasSize) -> bool {
        if self.width < 0 || self.height < 0 {
            return false;
        }
        if self.width == 0 || self.height == 0 {
            return true;
        }
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        self.x >= 0
            && self.y >= 0
            && right.map_or(false, |r| r <= canvas.width as i64)
            && bottom.map_or(false, |b| b <= canvas.height as i64)
    }
}

/// Row-major world canvas of level ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldGrid {
    canvas: CanvasSize,
    sentinel: i32,
    cells: Vec<i32>,
}

impl WorldGrid {
    /// Stamp every placement's id over its footprint, in order.
    ///
    /// Cells no placement covers keep `sentinel`. Where footprints overlap
    /// the later placement wins. A footprint reaching outside the canvas is
    /// rejected before any of its cells are written, as is a placement whose
    /// id equals `sentinel`.
    pub fn build(canvas: CanvasSize, sentinel: i32, placements: &[Placement]) -> Result<Self> {
        let mut cells = vec![sentinel; canvas.cell_count()];

        for p in placements {
            if p.id == sentinel {
                return Err(PipelineError::schema(
                    format!("level {}", p.name),
                    format!("id {} is the unowned sentinel", p.id),
                ));
            }
            if !p.fits(canvas) {
                return Err(PipelineError::OutOfBounds {
                    level: p.name.clone(),
                    x: p.x,
                    y: p.y,
                    width: p.width,
                    height: p.height,
                    canvas_width: canvas.width,
                    canvas_height: canvas.height,
                });
            }
            if p.width == 0 || p.height == 0 {
                continue;
            }

            for row in 0..p.height as usize {
                let start = (p.y as usize + row) * canvas.width + p.x as usize;
                cells[start..start + p.width as usize].fill(p.id);
            }
        }

        Ok(Self {
            canvas,
            sentinel,
            cells,
        })
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn sentinel(&self) -> i32 {
        self.sentinel
    }

    /// Flattened row-major cells
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// Owner of cell (x, y), `None` outside the canvas
    pub fn get(&self, x: usize, y: usize) -> Option<i32> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        Some(self.cells[y * self.canvas.width + x])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i32]> {
        self.cells.chunks(self.canvas.width)
    }

    /// Number of cells owned by some level
    pub fn owned_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != self.sentinel).count()
    }
}
