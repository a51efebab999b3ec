// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Exponential curve fitting for off-grid message sizes.
//!
//! Sample tables only hold costs at powers of two. For any other size the
//! series is fitted with
//!
//! ```text
//! f(x) = A · e^(B·x) + C,    x = log2(message size)
//! ```
//!
//! using Levenberg–Marquardt with an analytic Jacobian. Because the model
//! is linear in `A` and `C` once `B` is fixed, each start point solves
//! `A, C` exactly for a candidate `B`; the best of a few starts wins.

/// Candidate growth rates used to seed the solver. `ln 2` corresponds to
/// cost proportional to message size.
const SEED_RATES: [f64; 4] = [0.05, 0.25, std::f64::consts::LN_2, 1.0];

/// Parameters for the Levenberg–Marquardt iteration.
#[derive(Debug, Clone, Copy)]
pub struct FitParams {
    pub max_iterations: usize,
    /// Relative step tolerance.
    pub xtol: f64,
    /// Scaled gradient tolerance.
    pub gtol: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            xtol: 1e-10,
            gtol: 1e-10,
        }
    }
}

/// A fitted `A · e^(B·x) + C` curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpCurve {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl ExpCurve {
    /// Evaluates the curve at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        self.a * (self.b * x).exp() + self.c
    }

    /// Sum of squared residuals over the sample points.
    pub fn sse(&self, xs: &[f64], ys: &[f64]) -> f64 {
        xs.iter()
            .zip(ys)
            .map(|(&x, &y)| (y - self.eval(x)).powi(2))
            .sum()
    }
}

/// Why a fit failed.
#[derive(Debug, Clone, PartialEq)]
pub enum FitFailure {
    /// Fewer than three points cannot determine three parameters.
    TooFewPoints(usize),
    /// Input or intermediate values are not finite.
    NonFinite,
    /// No start point met the tolerances within the iteration budget.
    NotConverged { iterations: usize },
}

impl std::fmt::Display for FitFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewPoints(n) => write!(f, "need at least 3 samples, got {n}"),
            Self::NonFinite => f.write_str("non-finite value encountered"),
            Self::NotConverged { iterations } => {
                write!(f, "no convergence within {iterations} iterations")
            }
        }
    }
}

/// Fits `A · e^(B·x) + C` to `(xs, ys)`.
pub fn fit_exponential(xs: &[f64], ys: &[f64], params: &FitParams) -> Result<ExpCurve, FitFailure> {
    let n = xs.len().min(ys.len());
    if n < 3 {
        return Err(FitFailure::TooFewPoints(n));
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return Err(FitFailure::NonFinite);
    }

    let mut best: Option<(ExpCurve, f64)> = None;
    for &rate in &SEED_RATES {
        let Some(seed) = linear_seed(xs, ys, rate) else {
            continue;
        };
        let Ok(curve) = levenberg_marquardt(xs, ys, seed, params) else {
            continue;
        };
        let sse = curve.sse(xs, ys);
        if !sse.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, s)| sse < s) {
            best = Some((curve, sse));
        }
    }

    best.map(|(curve, _)| curve).ok_or(FitFailure::NotConverged {
        iterations: params.max_iterations,
    })
}

/// Least-squares `A, C` for a fixed `B`: ordinary regression of `y` on `e^(B·x)`.
fn linear_seed(xs: &[f64], ys: &[f64], b: f64) -> Option<ExpCurve> {
    let n = xs.len() as f64;
    let us: Vec<f64> = xs.iter().map(|&x| (b * x).exp()).collect();
    let mean_u = us.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let (mut suu, mut suy) = (0.0, 0.0);
    for (&u, &y) in us.iter().zip(ys) {
        suu += (u - mean_u) * (u - mean_u);
        suy += (u - mean_u) * (y - mean_y);
    }
    let a = if suu > 0.0 { suy / suu } else { 0.0 };
    let curve = ExpCurve {
        a,
        b,
        c: mean_y - a * mean_u,
    };
    (curve.a.is_finite() && curve.c.is_finite()).then_some(curve)
}

// ── Levenberg–Marquardt ────────────────────────────────────────────

fn levenberg_marquardt(
    xs: &[f64],
    ys: &[f64],
    start: ExpCurve,
    params: &FitParams,
) -> Result<ExpCurve, FitFailure> {
    let mut p = [start.a, start.b, start.c];
    let mut lambda = 1e-3;
    let mut cost = half_sse(xs, ys, &p);

    for iter in 0..params.max_iterations {
        let (jtj, grad) = normal_equations(xs, ys, &p);

        let scale = cost.max(1.0);
        let gnorm = (0..3)
            .map(|i| grad[i].abs() * p[i].abs().max(1.0))
            .fold(0.0, f64::max);
        if gnorm / scale <= params.gtol {
            tracing::trace!("exp fit converged on gradient after {} iterations", iter);
            return Ok(curve_of(&p));
        }

        // Inner loop: raise damping until a step reduces the cost.
        loop {
            let mut damped = jtj;
            for (i, row) in damped.iter_mut().enumerate() {
                row[i] += lambda * jtj[i][i].max(1e-12);
            }
            let Some(delta) = solve3(damped, grad) else {
                lambda *= 10.0;
                if lambda > 1e16 {
                    return Err(FitFailure::NotConverged { iterations: iter });
                }
                continue;
            };

            let trial = [p[0] + delta[0], p[1] + delta[1], p[2] + delta[2]];
            let trial_cost = half_sse(xs, ys, &trial);
            if trial_cost.is_finite() && trial_cost <= cost {
                let small = (0..3).all(|i| delta[i].abs() <= params.xtol * (p[i].abs() + params.xtol));
                p = trial;
                cost = trial_cost;
                lambda = (lambda / 10.0).max(1e-12);
                if small {
                    tracing::trace!("exp fit converged on step after {} iterations", iter + 1);
                    return Ok(curve_of(&p));
                }
                break;
            }

            lambda *= 10.0;
            if lambda > 1e16 {
                // No descent direction left: the current point is a minimum
                // to working precision.
                return Ok(curve_of(&p));
            }
        }
    }

    Err(FitFailure::NotConverged {
        iterations: params.max_iterations,
    })
}

fn curve_of(p: &[f64; 3]) -> ExpCurve {
    ExpCurve {
        a: p[0],
        b: p[1],
        c: p[2],
    }
}

fn half_sse(xs: &[f64], ys: &[f64], p: &[f64; 3]) -> f64 {
    0.5 * curve_of(p).sse(xs, ys)
}

/// Builds `JᵀJ` and `Jᵀr` for residuals `r = y − f(x)`.
fn normal_equations(xs: &[f64], ys: &[f64], p: &[f64; 3]) -> ([[f64; 3]; 3], [f64; 3]) {
    let mut jtj = [[0.0; 3]; 3];
    let mut jtr = [0.0; 3];
    for (&x, &y) in xs.iter().zip(ys) {
        let e = (p[1] * x).exp();
        let r = y - (p[0] * e + p[2]);
        let j = [e, p[0] * x * e, 1.0];
        for i in 0..3 {
            jtr[i] += j[i] * r;
            for k in 0..3 {
                jtj[i][k] += j[i] * j[k];
            }
        }
    }
    (jtj, jtr)
}

/// Solves a 3×3 system by Gaussian elimination with partial pivoting.
fn solve3(mut m: [[f64; 3]; 3], mut rhs: [f64; 3]) -> Option<[f64; 3]> {
    for col in 0..3 {
        let pivot = (col..3).max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))?;
        if m[pivot][col].abs() < 1e-300 {
            return None;
        }
        m.swap(col, pivot);
        rhs.swap(col, pivot);
        for row in col + 1..3 {
            let f = m[row][col] / m[col][col];
            for k in col..3 {
                m[row][k] -= f * m[col][k];
            }
            rhs[row] -= f * rhs[col];
        }
    }
    let mut out = [0.0; 3];
    for row in (0..3).rev() {
        let tail: f64 = (row + 1..3).map(|k| m[row][k] * out[k]).sum();
        out[row] = (rhs[row] - tail) / m[row][row];
    }
    out.iter().all(|v| v.is_finite()).then_some(out)
}
