//! The row-stochastic evaluation matrix and its contribution transform.
//!
//! [`EvaluationMatrix`] owns the N×N matrix E. Row i is participant i's
//! outbound evaluation: the diagonal cell `E[i][i]` is the self-retained
//! budget, off-diagonal `E[i][j]` the weight i has transferred to j. Every
//! row sums to 1.0 within [`ROW_SUM_TOLERANCE`] after construction and after
//! every mutation; both mutation primitives validate all preconditions
//! before the first write.
//!
//! [`ComputationMatrix`] is the derived matrix E′ consumed by the solver:
//! zero diagonal, unit row sums, each participant's budget redistributed
//! uniformly across all other participants.

use crate::constants::ROW_SUM_TOLERANCE;
use crate::error::MatrixError;

/// N×N row-stochastic evaluation matrix, row-major storage.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationMatrix {
    n: usize,
    cells: Vec<f64>,
}

impl EvaluationMatrix {
    /// The N×N identity: every participant's full weight self-retained.
    /// `n = 0` yields an empty 0×0 matrix.
    pub fn identity(n: usize) -> Self {
        let mut cells = vec![0.0; n * n];
        for i in 0..n {
            cells[i * n + i] = 1.0;
        }
        Self { n, cells }
    }

    /// Matrix dimension (participant count).
    pub fn n(&self) -> usize {
        self.n
    }

    /// Cell value. Panics if an index is out of range; callers resolve
    /// participant ids to valid indices before touching the matrix.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "matrix index out of range");
        self.cells[i * self.n + j]
    }

    /// Participant i's self-retained budget (the diagonal cell).
    pub fn budget_of(&self, i: usize) -> f64 {
        self.get(i, i)
    }

    /// Row i as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }

    /// Sum of row i. Observable invariant: 1.0 within [`ROW_SUM_TOLERANCE`].
    pub fn row_sum(&self, i: usize) -> f64 {
        self.row(i).iter().sum()
    }

    fn check_index(&self, index: usize) -> Result<(), MatrixError> {
        if index >= self.n {
            return Err(MatrixError::IndexOutOfRange { index, len: self.n });
        }
        Ok(())
    }

    /// Move `amount` of evaluation weight from `from`'s budget to the
    /// `from → to` cell.
    ///
    /// Exactly two cells change: `E[from][from] -= amount` and
    /// `E[from][to] += amount`, so the row sum is preserved. Fails without
    /// touching the matrix when indices are out of range or equal, the
    /// amount is non-positive, or the budget is insufficient.
    pub fn transfer(&mut self, from: usize, to: usize, amount: f64) -> Result<(), MatrixError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Err(MatrixError::SelfTransfer(from));
        }
        if !(amount > 0.0) {
            return Err(MatrixError::NonPositiveAmount(amount));
        }
        let budget = self.get(from, from);
        if budget < amount {
            return Err(MatrixError::InsufficientBudget { have: budget, need: amount });
        }
        self.cells[from * self.n + from] -= amount;
        self.cells[from * self.n + to] += amount;
        Ok(())
    }

    /// Natural recovery: scale every off-diagonal cell by `(1 - rate)` and
    /// absorb the released weight into the row's diagonal.
    ///
    /// The new diagonal is recomputed as `1 − Σ new off-diagonals` rather
    /// than scaled from the old diagonal, which restores the row sum
    /// exactly. Each row is rewritten from its prior values in one pass.
    /// `rate = 0` is a no-op; `rate` must be in `[0, 1)`.
    pub fn decay(&mut self, rate: f64) -> Result<(), MatrixError> {
        if !(0.0..1.0).contains(&rate) {
            return Err(MatrixError::InvalidRate(rate));
        }
        let keep = 1.0 - rate;
        for i in 0..self.n {
            let row = &mut self.cells[i * self.n..(i + 1) * self.n];
            let mut off_diagonal_sum = 0.0;
            for (j, cell) in row.iter_mut().enumerate() {
                if j != i {
                    *cell *= keep;
                    off_diagonal_sum += *cell;
                }
            }
            row[i] = 1.0 - off_diagonal_sum;
        }
        Ok(())
    }

    /// Derive the contribution-computation matrix E′.
    ///
    /// `E′ = E − B + (B·D)/(n−1)` where B is the diagonal (budget) part of
    /// E and D the all-ones-minus-identity matrix: each budget is spread
    /// uniformly over the other `n − 1` participants, zeroing the diagonal
    /// while keeping every row sum at 1. Returns `None` for `n ≤ 1`, where
    /// the `(n − 1)` divisor is undefined.
    pub fn computation_matrix(&self) -> Option<ComputationMatrix> {
        if self.n <= 1 {
            return None;
        }
        let n = self.n;
        let share = 1.0 / (n as f64 - 1.0);
        let mut cells = vec![0.0; n * n];
        for i in 0..n {
            let budget = self.cells[i * n + i];
            for j in 0..n {
                if j != i {
                    cells[i * n + j] = self.cells[i * n + j] + budget * share;
                }
            }
        }
        Some(ComputationMatrix { n, cells })
    }

    /// Whether every row currently sums to 1.0 within [`ROW_SUM_TOLERANCE`].
    pub fn is_row_stochastic(&self) -> bool {
        (0..self.n).all(|i| (self.row_sum(i) - 1.0).abs() <= ROW_SUM_TOLERANCE)
    }
}

/// The derived matrix E′: zero diagonal, unit row sums. Only exists for
/// n > 1 and is recomputed from the evaluation matrix on demand, never
/// stored across mutations.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputationMatrix {
    n: usize,
    cells: Vec<f64>,
}

impl ComputationMatrix {
    /// Assemble a computation matrix directly from row-major cells.
    ///
    /// For hosts and tests that drive a [`crate::traits::ContributionSolver`]
    /// without an evaluation matrix. The caller is responsible for the
    /// zero-diagonal and unit-row-sum properties; [`EvaluationMatrix::computation_matrix`]
    /// is the validated path.
    ///
    /// Panics when `cells.len() != n * n`.
    pub fn from_rows(n: usize, cells: Vec<f64>) -> Self {
        assert_eq!(cells.len(), n * n, "cell count must be n^2");
        Self { n, cells }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "matrix index out of range");
        self.cells[i * self.n + j]
    }

    pub fn row_sum(&self, i: usize) -> f64 {
        self.cells[i * self.n..(i + 1) * self.n].iter().sum()
    }

    /// Left multiplication `c · E′`: the single step of the fixed-point
    /// iteration. `c.len()` must equal `n`.
    pub fn propagate(&self, c: &[f64]) -> Vec<f64> {
        assert_eq!(c.len(), self.n, "vector length must match matrix dimension");
        let mut out = vec![0.0; self.n];
        for (i, &weight) in c.iter().enumerate() {
            let row = &self.cells[i * self.n..(i + 1) * self.n];
            for (j, &cell) in row.iter().enumerate() {
                out[j] += weight * cell;
            }
        }
        out
    }
}
