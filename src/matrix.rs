use crate::score::ScoreValue;

/// Simulate a 1-D vector as 2-D matrix
///
/// The same storage serves both scoring modes: plain scoring only keeps two
/// rows and rotates between them, position recovery keeps one row per needle
/// char so the history can be walked backwards.
pub(crate) struct ScoreMatrix<'a, S> {
    matrix: &'a mut Vec<S>,
    pub rows: usize,
    pub cols: usize,
    compressed: bool,
}

impl<'a, S: ScoreValue> ScoreMatrix<'a, S> {
    /// Reuse `matrix` as `needle_len` rows (2 when compressed) of `cols`
    /// cells, all set to `init`.
    pub fn new(
        matrix: &'a mut Vec<S>,
        needle_len: usize,
        cols: usize,
        compressed: bool,
        init: S,
    ) -> Self {
        let rows = if compressed {
            needle_len.min(2)
        } else {
            needle_len
        };
        matrix.clear();
        matrix.resize(rows * cols, init);
        ScoreMatrix {
            matrix,
            rows,
            cols,
            compressed,
        }
    }

    /// Physical row holding needle row `row_idx`.
    #[inline]
    fn adjust_row_idx(&self, row_idx: usize) -> usize {
        if self.compressed {
            row_idx & 1
        } else {
            row_idx
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> S {
        self.matrix[self.adjust_row_idx(row) * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, score: S) {
        let idx = self.adjust_row_idx(row) * self.cols + col;
        self.matrix[idx] = score;
    }
}
