//! TemperatureGrid - coarse scalar heat field over the domain
//!
//! Each cell holds the mean temperature of a `2^coarseness` square block.
//! Row-major storage plus a scratch buffer of the same size: diffusion reads
//! `cells`, writes `scratch`, then swaps, so no pass ever sees a half-written
//! field.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const WEIGHT_CENTER: f64 = 4.0 / 9.0;
const WEIGHT_EDGE: f64 = 1.0 / 9.0;
const WEIGHT_CORNER: f64 = 1.0 / 36.0;

/// Applied once per axis on which a cell sits on the outer row/column
pub const BOUNDARY_RESCALE: f64 = 6.0 / 5.0;

pub struct TemperatureGrid {
    width: u32,
    height: u32,
    coarseness: u32,
    cells: Vec<f64>,
    scratch: Vec<f64>,
}

impl TemperatureGrid {
    /// Grid covering a `domain_width x domain_height` domain, filled with `initial`.
    /// Each axis keeps at least one cell.
    pub fn new(domain_width: u32, domain_height: u32, coarseness: u32, initial: f64) -> Self {
        let width = (domain_width.checked_shr(coarseness).unwrap_or(0)).max(1);
        let height = (domain_height.checked_shr(coarseness).unwrap_or(0)).max(1);
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            coarseness,
            cells: vec![initial; size],
            scratch: vec![initial; size],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn coarseness(&self) -> u32 {
        self.coarseness
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Row-major cell values
    #[inline]
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    #[inline]
    fn index(&self, cx: u32, cy: u32) -> usize {
        (cy as usize) * (self.width as usize) + (cx as usize)
    }

    pub fn cell_temperature(&self, cx: u32, cy: u32) -> Option<f64> {
        if cx < self.width && cy < self.height {
            Some(self.cells[self.index(cx, cy)])
        } else {
            None
        }
    }

    pub fn set_cell_temperature(&mut self, cx: u32, cy: u32, temp: f64) -> bool {
        if cx < self.width && cy < self.height {
            let idx = self.index(cx, cy);
            self.cells[idx] = temp;
            true
        } else {
            false
        }
    }

    /// Map domain coordinates to a cell. Strays outside the domain clamp to the
    /// nearest edge cell; NaN lands on column/row 0.
    #[inline]
    pub fn cell_for(&self, x: f64, y: f64) -> (u32, u32) {
        (
            axis_cell(x, self.coarseness, self.width),
            axis_cell(y, self.coarseness, self.height),
        )
    }

    #[inline]
    pub fn read(&self, x: f64, y: f64) -> f64 {
        let (cx, cy) = self.cell_for(x, y);
        self.cells[self.index(cx, cy)]
    }

    /// Blend a particle's temperature towards the cell under it and take the
    /// gained heat out of that cell. Returns the particle's new temperature.
    ///
    /// `new = (1 - rate) * particle + rate * cell`, then `cell -= new - particle`.
    #[inline]
    pub fn exchange_heat(&mut self, x: f64, y: f64, particle_temp: f64, rate: f64) -> f64 {
        let (cx, cy) = self.cell_for(x, y);
        let idx = self.index(cx, cy);
        let cell = self.cells[idx];
        let new_temp = (1.0 - rate) * particle_temp + rate * cell;
        self.cells[idx] -= new_temp - particle_temp;
        new_temp
    }

    pub fn fill(&mut self, temp: f64) {
        self.cells.fill(temp);
    }

    /// Multiply every cell by `factor`, capping at `ceiling`
    pub fn scale_all(&mut self, factor: f64, ceiling: f64) {
        #[cfg(feature = "parallel")]
        {
            self.cells
                .par_iter_mut()
                .for_each(|t| *t = (*t * factor).min(ceiling));
        }
        #[cfg(not(feature = "parallel"))]
        {
            for t in self.cells.iter_mut() {
                *t = (*t * factor).min(ceiling);
            }
        }
    }

    pub fn total_heat(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// One diffusion step over the whole field.
    ///
    /// 9-point stencil (centre 4/9, edges 1/9, corners 1/36). Neighbours
    /// outside the grid are dropped; outer rows/columns are scaled by 6/5 per
    /// violated axis to make up most of the missing weight.
    pub fn diffuse(&mut self) {
        let width = self.width;
        let height = self.height;
        let cells = &self.cells;

        #[cfg(feature = "parallel")]
        {
            self.scratch
                .par_chunks_mut(width as usize)
                .enumerate()
                .for_each(|(cy, row)| {
                    for (cx, out) in row.iter_mut().enumerate() {
                        *out = diffuse_cell(cells, width, height, cx as u32, cy as u32);
                    }
                });
        }
        #[cfg(not(feature = "parallel"))]
        {
            for (cy, row) in self.scratch.chunks_mut(width as usize).enumerate() {
                for (cx, out) in row.iter_mut().enumerate() {
                    *out = diffuse_cell(cells, width, height, cx as u32, cy as u32);
                }
            }
        }

        std::mem::swap(&mut self.cells, &mut self.scratch);
    }
}

#[inline]
fn axis_cell(coord: f64, coarseness: u32, cells: u32) -> u32 {
    // `as` saturates and maps NaN to 0
    let shifted = (coord as i64) >> coarseness.min(63);
    shifted.clamp(0, (cells as i64) - 1) as u32
}

/// Stencil weight for neighbour offset `(dx, dy)`
#[inline]
pub(crate) fn stencil_weight(dx: i32, dy: i32) -> f64 {
    match (dx != 0, dy != 0) {
        (false, false) => WEIGHT_CENTER,
        (true, true) => WEIGHT_CORNER,
        _ => WEIGHT_EDGE,
    }
}

/// Rescale factor for a cell at `(cx, cy)`
#[inline]
pub(crate) fn boundary_factor(width: u32, height: u32, cx: u32, cy: u32) -> f64 {
    let mut factor = 1.0;
    if cx == 0 || cx == width - 1 {
        factor *= BOUNDARY_RESCALE;
    }
    if cy == 0 || cy == height - 1 {
        factor *= BOUNDARY_RESCALE;
    }
    factor
}

#[inline]
fn diffuse_cell(cells: &[f64], width: u32, height: u32, cx: u32, cy: u32) -> f64 {
    let mut sum = 0.0;
    for dy in -1i32..=1 {
        let ny = cy as i32 + dy;
        if ny < 0 || ny >= height as i32 {
            continue;
        }
        for dx in -1i32..=1 {
            let nx = cx as i32 + dx;
            if nx < 0 || nx >= width as i32 {
                continue;
            }
            let idx = (ny as usize) * (width as usize) + (nx as usize);
            sum += cells[idx] * stencil_weight(dx, dy);
        }
    }
    sum * boundary_factor(width, height, cx, cy)
}
