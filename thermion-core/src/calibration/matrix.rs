//! Small dense least-squares solver for coefficient fitting.
//!
//! The Steinhart-Hart fit is an overdetermined linear system with three
//! unknowns. At that size a general linear-algebra crate is dead weight:
//! the normal equations `AᵀA x = AᵀB` are accumulated directly and the
//! symmetric positive-definite 3x3 system is solved by Cholesky
//! factorization with forward/back substitution. Everything is `f64`:
//! the design matrix spans `ln R` to `ln³R` and the solution coefficients
//! differ by ten orders of magnitude, which single precision cannot carry.

/// Square matrix type using const generics
pub(crate) type SquareMatrix<const N: usize> = [[f64; N]; N];

/// Vector type
pub(crate) type Vector<const N: usize> = [f64; N];

/// Cholesky decomposition: A = L * Lᵀ
///
/// Returns `false` when the matrix is not positive definite (or contains
/// non-finite values), which callers surface as a degenerate fit.
pub(crate) fn cholesky<const N: usize>(a: &SquareMatrix<N>, l: &mut SquareMatrix<N>) -> bool {
    for row in l.iter_mut() {
        for value in row.iter_mut() {
            *value = 0.0;
        }
    }

    for j in 0..N {
        let mut sum = 0.0;
        for k in 0..j {
            sum += l[j][k] * l[j][k];
        }
        let diag = a[j][j] - sum;
        if !(diag > 0.0) {
            // Not positive definite; also catches NaN
            return false;
        }
        l[j][j] = libm::sqrt(diag);

        for i in (j + 1)..N {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[i][k] * l[j][k];
            }
            l[i][j] = (a[i][j] - sum) / l[j][j];
        }
    }
    true
}

/// Solve `L * Lᵀ * x = b` given the Cholesky factor `L`.
fn solve_cholesky<const N: usize>(l: &SquareMatrix<N>, b: &Vector<N>) -> Vector<N> {
    // Forward substitution: L * y = b
    let mut y = [0.0; N];
    for i in 0..N {
        let mut sum = b[i];
        for k in 0..i {
            sum -= l[i][k] * y[k];
        }
        y[i] = sum / l[i][i];
    }

    // Back substitution: Lᵀ * x = y
    let mut x = [0.0; N];
    for i in (0..N).rev() {
        let mut sum = y[i];
        for k in (i + 1)..N {
            sum -= l[k][i] * x[k];
        }
        x[i] = sum / l[i][i];
    }
    x
}

/// Least-squares solution of the overdetermined system `rows * x = rhs`.
///
/// Accumulates the normal equations and solves them by Cholesky. Returns
/// `None` when the system is singular or non-finite.
pub(crate) fn least_squares<const N: usize>(rows: &[[f64; N]], rhs: &[f64]) -> Option<Vector<N>> {
    let mut ata: SquareMatrix<N> = [[0.0; N]; N];
    let mut atb: Vector<N> = [0.0; N];

    for (row, &b) in rows.iter().zip(rhs.iter()) {
        for i in 0..N {
            for j in 0..N {
                ata[i][j] += row[i] * row[j];
            }
            atb[i] += row[i] * b;
        }
    }

    let mut l: SquareMatrix<N> = [[0.0; N]; N];
    if !cholesky(&ata, &mut l) {
        return None;
    }
    let x = solve_cholesky(&l, &atb);
    if x.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(x)
}
