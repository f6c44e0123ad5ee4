//! Adaptive precision predicates for orientation and in-circle queries,
//! based on the floating point expansion techniques of Jonathan Richard
//! Shewchuk (<https://www.cs.cmu.edu/~quake/robust.html>).
//!
//! Both predicates first evaluate the determinant in plain double precision
//! and compare it against an a priori error bound. Only if the sign cannot
//! be guaranteed is the determinant recomputed exactly with expansion
//! arithmetic. The returned value is then the dominant component of the
//! exact expansion, so its sign always equals the sign of the exact result.
//!
//! Exactness requires IEEE-754 double precision with round-to-nearest-even
//! and no flush-to-zero, which Rust's `f64` guarantees on all supported
//! targets.

use crate::point::Point2;

/// 2^27 + 1, used to split a double into two half-length factors.
const SPLITTER: f64 = 134_217_729f64;

/// Half an ulp of 1.0, the largest relative rounding error of a single
/// IEEE-754 operation.
const EPSILON: f64 = f64::EPSILON * 0.5;

const ORIENT_ERR_BOUND: f64 = (3.0 + 16.0 * EPSILON) * EPSILON;
const IN_CIRCLE_ERR_BOUND: f64 = (10.0 + 96.0 * EPSILON) * EPSILON;

/// Returns twice the signed area of the triangle `abc`.
///
/// The result is positive if `a`, `b` and `c` are in counter-clockwise
/// order, negative if they are in clockwise order and exactly zero if they
/// are collinear.
pub fn orient2d(a: Point2, b: Point2, c: Point2) -> f64 {
    let det_left = (a.x - c.x) * (b.y - c.y);
    let det_right = (a.y - c.y) * (b.x - c.x);
    let det = det_left - det_right;

    let det_sum = if det_left > 0.0 {
        if det_right <= 0.0 {
            return det;
        }
        det_left + det_right
    } else if det_left < 0.0 {
        if det_right >= 0.0 {
            return det;
        }
        -det_left - det_right
    } else {
        return det;
    };

    let err_bound = ORIENT_ERR_BOUND * det_sum;
    if det >= err_bound || -det >= err_bound {
        det
    } else {
        orient2d_exact(a, b, c)
    }
}

/// Exact evaluation of the orientation determinant, expanded over the
/// original coordinates:
/// `ax by - ax cy + ay cx - ay bx + bx cy - by cx`.
fn orient2d_exact(a: Point2, b: Point2, c: Point2) -> f64 {
    let positive = expansion_sum(
        &expansion_sum(
            &product_expansion(a.x, b.y),
            &product_expansion(a.y, c.x),
        ),
        &product_expansion(b.x, c.y),
    );
    let negative = expansion_sum(
        &expansion_sum(
            &product_expansion(a.x, c.y),
            &product_expansion(a.y, b.x),
        ),
        &product_expansion(b.y, c.x),
    );
    dominant_component(&expansion_diff(&positive, &negative))
}

/// Relates `d` to the circle through `a`, `b` and `c`.
///
/// Assuming `a`, `b` and `c` are in counter-clockwise order, the result is
/// positive if `d` lies strictly inside their circumscribed circle,
/// negative if it lies strictly outside and exactly zero if all four points
/// are concyclic. For clockwise `abc` the sign is reversed.
pub fn in_circle(a: Point2, b: Point2, c: Point2, d: Point2) -> f64 {
    let adx = a.x - d.x;
    let bdx = b.x - d.x;
    let cdx = c.x - d.x;
    let ady = a.y - d.y;
    let bdy = b.y - d.y;
    let cdy = c.y - d.y;

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let alift = adx * adx + ady * ady;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let blift = bdx * bdx + bdy * bdy;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdxcdy - cdxbdy)
        + blift * (cdxady - adxcdy)
        + clift * (adxbdy - bdxady);

    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * alift
        + (cdxady.abs() + adxcdy.abs()) * blift
        + (adxbdy.abs() + bdxady.abs()) * clift;

    let err_bound = IN_CIRCLE_ERR_BOUND * permanent;
    if det > err_bound || -det > err_bound {
        det
    } else {
        in_circle_exact(a, b, c, d)
    }
}

/// Exact evaluation of the in-circle determinant. The coordinate
/// differences are themselves exact two-component expansions, so the
/// cofactor expansion below introduces no rounding at any step.
fn in_circle_exact(a: Point2, b: Point2, c: Point2, d: Point2) -> f64 {
    let adx = difference_expansion(a.x, d.x);
    let ady = difference_expansion(a.y, d.y);
    let bdx = difference_expansion(b.x, d.x);
    let bdy = difference_expansion(b.y, d.y);
    let cdx = difference_expansion(c.x, d.x);
    let cdy = difference_expansion(c.y, d.y);

    let lift = |dx: &[f64], dy: &[f64]| {
        expansion_sum(&expansion_product(dx, dx), &expansion_product(dy, dy))
    };

    let bc = expansion_diff(
        &expansion_product(&bdx, &cdy),
        &expansion_product(&cdx, &bdy),
    );
    let a_det = expansion_product(&lift(&adx, &ady), &bc);

    let ca = expansion_diff(
        &expansion_product(&cdx, &ady),
        &expansion_product(&adx, &cdy),
    );
    let b_det = expansion_product(&lift(&bdx, &bdy), &ca);

    let ab = expansion_diff(
        &expansion_product(&adx, &bdy),
        &expansion_product(&bdx, &ady),
    );
    let c_det = expansion_product(&lift(&cdx, &cdy), &ab);

    dominant_component(&expansion_sum(&expansion_sum(&a_det, &b_det), &c_det))
}

// Expansion arithmetic.
//
// An expansion is a non-empty sequence of floating point components sorted
// by increasing magnitude whose exact sum is the represented value. The
// components are non-overlapping, so the final component determines the
// sign of the whole expansion.

fn dominant_component(e: &[f64]) -> f64 {
    e.last().copied().unwrap_or(0.0)
}

/// Exact sum of `a` and `b` as a (sum, roundoff) pair.
#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    let b_virtual = x - a;
    let a_virtual = x - b_virtual;
    let b_roundoff = b - b_virtual;
    let a_roundoff = a - a_virtual;
    (x, a_roundoff + b_roundoff)
}

/// Like [two_sum], but requires `|a| >= |b|` or `a == 0`.
#[inline]
fn fast_two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    let b_virtual = x - a;
    (x, b - b_virtual)
}

/// Exact difference of `a` and `b` as a (difference, roundoff) pair.
#[inline]
fn two_diff(a: f64, b: f64) -> (f64, f64) {
    let x = a - b;
    let b_virtual = a - x;
    let a_virtual = x + b_virtual;
    let b_roundoff = b_virtual - b;
    let a_roundoff = a - a_virtual;
    (x, a_roundoff + b_roundoff)
}

/// Splits `a` into two non-overlapping halves suitable for exact
/// multiplication.
#[inline]
fn split(a: f64) -> (f64, f64) {
    let c = SPLITTER * a;
    let a_big = c - a;
    let hi = c - a_big;
    (hi, a - hi)
}

/// Exact product of `a` and `b` as a (product, roundoff) pair.
#[inline]
fn two_product(a: f64, b: f64) -> (f64, f64) {
    let (b_hi, b_lo) = split(b);
    two_product_presplit(a, b, b_hi, b_lo)
}

#[inline]
fn two_product_presplit(a: f64, b: f64, b_hi: f64, b_lo: f64) -> (f64, f64) {
    let x = a * b;
    let (a_hi, a_lo) = split(a);
    let err1 = x - a_hi * b_hi;
    let err2 = err1 - a_lo * b_hi;
    let err3 = err2 - a_hi * b_lo;
    (x, a_lo * b_lo - err3)
}

/// The two-component expansion of the exact difference `a - b`.
fn difference_expansion(a: f64, b: f64) -> Vec<f64> {
    let (head, tail) = two_diff(a, b);
    vec![tail, head]
}

/// The two-component expansion of the exact product `a * b`.
fn product_expansion(a: f64, b: f64) -> Vec<f64> {
    let (head, tail) = two_product(a, b);
    vec![tail, head]
}

/// Merges two expansions into one, eliminating zero components
/// (Shewchuk's FAST-EXPANSION-SUM-ZEROELIM).
fn expansion_sum(e: &[f64], f: &[f64]) -> Vec<f64> {
    let mut h = Vec::with_capacity(e.len() + f.len());

    let mut e_index = 0;
    let mut f_index = 0;
    // Pick the component with the smaller magnitude first. The comparison
    // below is Shewchuk's branch-free magnitude test.
    let mut q = if (f[0] > e[0]) == (f[0] > -e[0]) {
        e_index += 1;
        e[0]
    } else {
        f_index += 1;
        f[0]
    };

    if e_index < e.len() && f_index < f.len() {
        let (q_new, hh) = if (f[f_index] > e[e_index]) == (f[f_index] > -e[e_index]) {
            e_index += 1;
            fast_two_sum(e[e_index - 1], q)
        } else {
            f_index += 1;
            fast_two_sum(f[f_index - 1], q)
        };
        q = q_new;
        if hh != 0.0 {
            h.push(hh);
        }

        while e_index < e.len() && f_index < f.len() {
            let (q_new, hh) = if (f[f_index] > e[e_index]) == (f[f_index] > -e[e_index]) {
                e_index += 1;
                two_sum(q, e[e_index - 1])
            } else {
                f_index += 1;
                two_sum(q, f[f_index - 1])
            };
            q = q_new;
            if hh != 0.0 {
                h.push(hh);
            }
        }
    }

    for &component in &e[e_index..] {
        let (q_new, hh) = two_sum(q, component);
        q = q_new;
        if hh != 0.0 {
            h.push(hh);
        }
    }
    for &component in &f[f_index..] {
        let (q_new, hh) = two_sum(q, component);
        q = q_new;
        if hh != 0.0 {
            h.push(hh);
        }
    }

    if q != 0.0 || h.is_empty() {
        h.push(q);
    }
    h
}

/// The exact difference of two expansions.
fn expansion_diff(e: &[f64], f: &[f64]) -> Vec<f64> {
    let negated: Vec<f64> = f.iter().map(|&component| -component).collect();
    expansion_sum(e, &negated)
}

/// Multiplies an expansion by a single double
/// (Shewchuk's SCALE-EXPANSION-ZEROELIM).
fn scale_expansion(e: &[f64], scale: f64) -> Vec<f64> {
    let mut h = Vec::with_capacity(2 * e.len());
    let (scale_hi, scale_lo) = split(scale);

    let (mut q, hh) = two_product_presplit(e[0], scale, scale_hi, scale_lo);
    if hh != 0.0 {
        h.push(hh);
    }
    for &component in &e[1..] {
        let (product1, product0) = two_product_presplit(component, scale, scale_hi, scale_lo);
        let (sum, hh) = two_sum(q, product0);
        if hh != 0.0 {
            h.push(hh);
        }
        let (q_new, hh) = fast_two_sum(product1, sum);
        q = q_new;
        if hh != 0.0 {
            h.push(hh);
        }
    }
    if q != 0.0 || h.is_empty() {
        h.push(q);
    }
    h
}

/// The exact product of two expansions, distributed over the components of
/// the shorter factor.
fn expansion_product(e: &[f64], f: &[f64]) -> Vec<f64> {
    let (short, long) = if e.len() <= f.len() { (e, f) } else { (f, e) };
    let mut result = scale_expansion(long, short[0]);
    for &component in &short[1..] {
        result = expansion_sum(&result, &scale_expansion(long, component));
    }
    result
}
