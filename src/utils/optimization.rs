//! Derivative-free simplex minimization for coefficient estimation.

/// Iteration cap for one search.
const MAX_ITERATIONS: usize = 1000;

/// Convergence tolerance on the objective spread across the simplex.
const TOLERANCE: f64 = 1e-8;

/// Relative step used to seed the initial simplex.
const INITIAL_STEP: f64 = 0.05;

// Standard Nelder-Mead coefficients.
const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Outcome of a simplex search.
#[derive(Debug, Clone)]
pub struct SimplexOutcome {
    /// Best point found.
    pub point: Vec<f64>,
    /// Objective value at the best point.
    pub value: f64,
    /// Whether the simplex collapsed below tolerance before the
    /// iteration cap.
    pub converged: bool,
}

/// Minimize `objective` with the Nelder-Mead simplex method.
///
/// `bounds` supplies one (min, max) pair per dimension; every candidate
/// point is clamped into its box before evaluation, so the objective never
/// sees an out-of-bounds coefficient.
///
/// ```
/// use ili_forecast::utils::simplex_minimize;
///
/// let outcome = simplex_minimize(
///     |x| (x[0] - 2.0).powi(2),
///     &[0.0],
///     &[(f64::NEG_INFINITY, f64::INFINITY)],
/// );
/// assert!(outcome.converged);
/// assert!((outcome.point[0] - 2.0).abs() < 1e-3);
/// ```
pub fn simplex_minimize<F>(objective: F, initial: &[f64], bounds: &[(f64, f64)]) -> SimplexOutcome
where
    F: Fn(&[f64]) -> f64,
{
    let dims = initial.len();
    if dims == 0 {
        return SimplexOutcome {
            point: vec![],
            value: f64::NAN,
            converged: false,
        };
    }

    // Seed the simplex: the initial point plus one vertex per dimension,
    // each perturbed along its axis.
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(dims + 1);
    simplex.push(clamp(initial.to_vec(), bounds));
    for i in 0..dims {
        let mut vertex = initial.to_vec();
        let step = if initial[i].abs() > 1e-10 {
            INITIAL_STEP * initial[i].abs()
        } else {
            INITIAL_STEP
        };
        vertex[i] += step;
        simplex.push(clamp(vertex, bounds));
    }
    let mut values: Vec<f64> = simplex.iter().map(|v| objective(v)).collect();

    let mut converged = false;
    for _ in 0..MAX_ITERATIONS {
        let (best, second_worst, worst) = rank(&values);

        if values[worst] - values[best] < TOLERANCE {
            converged = true;
            break;
        }

        let centroid = centroid_excluding(&simplex, worst);

        let reflected = clamp(step_from(&centroid, &simplex[worst], -REFLECT), bounds);
        let reflected_value = objective(&reflected);

        if reflected_value < values[best] {
            // The reflected point leads; try going further.
            let expanded = clamp(step_from(&centroid, &reflected, EXPAND), bounds);
            let expanded_value = objective(&expanded);
            if expanded_value < reflected_value {
                simplex[worst] = expanded;
                values[worst] = expanded_value;
            } else {
                simplex[worst] = reflected;
                values[worst] = reflected_value;
            }
            continue;
        }

        if reflected_value < values[second_worst] {
            simplex[worst] = reflected;
            values[worst] = reflected_value;
            continue;
        }

        // Contract toward the better of the worst vertex and its reflection.
        let anchor = if reflected_value < values[worst] {
            &reflected
        } else {
            &simplex[worst]
        };
        let contracted = clamp(step_from(&centroid, anchor, CONTRACT), bounds);
        let contracted_value = objective(&contracted);

        if contracted_value < values[worst].min(reflected_value) {
            simplex[worst] = contracted;
            values[worst] = contracted_value;
            continue;
        }

        // Nothing improved; shrink everything toward the best vertex.
        let anchor = simplex[best].clone();
        for (i, vertex) in simplex.iter_mut().enumerate() {
            if i == best {
                continue;
            }
            for (x, a) in vertex.iter_mut().zip(&anchor) {
                *x = a + SHRINK * (*x - *a);
            }
            *vertex = clamp(std::mem::take(vertex), bounds);
            values[i] = objective(vertex);
        }
    }

    let (best, _, _) = rank(&values);
    SimplexOutcome {
        point: simplex[best].clone(),
        value: values[best],
        converged,
    }
}

/// Indices of the best, second-worst, and worst vertices.
fn rank(values: &[f64]) -> (usize, usize, usize) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    (
        order[0],
        order[values.len() - 2],
        order[values.len() - 1],
    )
}

/// Centroid of every vertex except the excluded one.
fn centroid_excluding(simplex: &[Vec<f64>], exclude: usize) -> Vec<f64> {
    let dims = simplex[0].len();
    let count = (simplex.len() - 1) as f64;
    let mut centroid = vec![0.0; dims];
    for (i, vertex) in simplex.iter().enumerate() {
        if i == exclude {
            continue;
        }
        for (c, x) in centroid.iter_mut().zip(vertex) {
            *c += x;
        }
    }
    for c in &mut centroid {
        *c /= count;
    }
    centroid
}

/// Point at `centroid + factor * (target - centroid)`.
///
/// A negative factor reflects `target` through the centroid.
fn step_from(centroid: &[f64], target: &[f64], factor: f64) -> Vec<f64> {
    centroid
        .iter()
        .zip(target)
        .map(|(c, t)| c + factor * (t - c))
        .collect()
}

/// Clamp every coordinate into its bound box.
fn clamp(mut point: Vec<f64>, bounds: &[(f64, f64)]) -> Vec<f64> {
    for (x, (lo, hi)) in point.iter_mut().zip(bounds) {
        *x = x.clamp(*lo, *hi);
    }
    point
}
