//! Dense matrices of ring elements.

use super::ctx::GrCtx;
use super::elem::Elem;
use crate::core::Status;

/// Row-major matrix whose entries belong to one context.
#[derive(Debug)]
pub struct GrMat {
    rows: usize,
    cols: usize,
    entries: Vec<Elem>,
}

impl GrMat {
    /// Zero matrix of the given shape.
    #[must_use]
    pub fn new(rows: usize, cols: usize, ctx: &GrCtx) -> Self {
        Self {
            rows,
            cols,
            entries: ctx.vec_init(rows * cols),
        }
    }

    /// Entry-wise copy of `self`, which must belong to `ctx`.
    #[must_use]
    pub fn duplicate(&self, ctx: &GrCtx) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            entries: self.entries.iter().map(|e| ctx.elem_clone(e)).collect(),
        }
    }

    /// Fills entry `(i, j)` with `f(entry, i, j)`, OR-ing the statuses.
    pub fn fill<F>(&mut self, mut f: F) -> Status
    where
        F: FnMut(&mut Elem, usize, usize) -> Status,
    {
        let cols = self.cols;
        let mut status = Status::SUCCESS;
        for (idx, e) in self.entries.iter_mut().enumerate() {
            status |= f(e, idx / cols, idx % cols);
        }
        status
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    #[must_use]
    pub fn entry(&self, i: usize, j: usize) -> &Elem {
        &self.entries[i * self.cols + j]
    }

    #[inline]
    pub fn entry_mut(&mut self, i: usize, j: usize) -> &mut Elem {
        &mut self.entries[i * self.cols + j]
    }

    #[must_use]
    pub fn row(&self, i: usize) -> &[Elem] {
        &self.entries[i * self.cols..(i + 1) * self.cols]
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            self.entries.swap(a * self.cols + j, b * self.cols + j);
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[Elem] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Elem] {
        &mut self.entries
    }
}
