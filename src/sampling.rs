use crate::{
    float::{next_float_down, Float, INV_4PI, INV_PI, PI_F},
    math::safe_sqrt,
    vecmath::{Point2f, Vector3f},
};

/// Density of the one-sample mixture that picks strategy `a` with probability
/// `w` and strategy `b` otherwise. Both densities must be evaluated for the
/// chosen direction whichever strategy produced it.
pub fn one_sample_mis_pdf(w: Float, pdf_a: Float, pdf_b: Float) -> Float {
    debug_assert!((0.0..=1.0).contains(&w));
    w * pdf_a + (1.0 - w) * pdf_b
}

/// Returns true with probability p.
pub fn sample_bernoulli(u: Float, p: Float) -> bool {
    u < p
}

// Takes a not-necessarily normalized set of nonnegative weights, a uniform random sample u,
// and returns the index of one of the weights with probability propotional to its weight.
// If weights is empty or sums to zero, None is returned.
// If pmf is provided, it will be populated with the value of the pmf for the sample.
// If u_remapped is provided, it will be populated with a new uniform random sample derived from u.
pub fn sample_discrete(
    weights: &[Float],
    u: Float,
    pmf: Option<&mut Float>,
    u_remapped: Option<&mut Float>,
) -> Option<usize> {
    let sum_weights: Float = weights.iter().sum();
    if weights.is_empty() || !(sum_weights > 0.0) {
        if let Some(pmf) = pmf {
            *pmf = 0.0;
        }
        return None;
    }

    // Compute rescaled u' sample.
    let up = u * sum_weights;
    let up = if up == sum_weights {
        next_float_down(up)
    } else {
        up
    };

    // Find offset in weights corresponding to u'
    let mut offset = 0;
    let mut sum: Float = 0.0;
    while offset + 1 < weights.len() && sum + weights[offset] <= up {
        sum += weights[offset];
        offset += 1;
    }

    if let Some(pmf) = pmf {
        *pmf = weights[offset] / sum_weights;
    }
    if let Some(u_remapped) = u_remapped {
        // The difference between the sum (the start of the bracket for the offset)
        // and u is itself a new uniform random value that can be remapped to between 0 and 1 here.
        *u_remapped = Float::min((up - sum) / weights[offset], 1.0 - Float::EPSILON);
    }

    Some(offset)
}

pub fn sample_uniform_sphere(u: Point2f) -> Vector3f {
    let z = 1.0 - 2.0 * u[0];
    let r = safe_sqrt(1.0 - z * z);
    let phi = 2.0 * PI_F * u[1];
    Vector3f {
        x: r * Float::cos(phi),
        y: r * Float::sin(phi),
        z,
    }
}

pub fn uniform_sphere_pdf() -> Float {
    INV_4PI
}

/// Maps the unit square to the unit disk, preserving relative areas.
/// See PBRT v4 A.5.1.
pub fn sample_uniform_disk_concentric(u: Point2f) -> Point2f {
    let u_offset = Point2f::new(2.0 * u.x - 1.0, 2.0 * u.y - 1.0);
    if u_offset.x == 0.0 && u_offset.y == 0.0 {
        return Point2f::ZERO;
    }

    let (r, theta) = if u_offset.x.abs() > u_offset.y.abs() {
        (u_offset.x, (PI_F / 4.0) * (u_offset.y / u_offset.x))
    } else {
        (
            u_offset.y,
            PI_F / 2.0 - (PI_F / 4.0) * (u_offset.x / u_offset.y),
        )
    };
    Point2f::new(r * theta.cos(), r * theta.sin())
}

/// Cosine-weighted direction in the +z hemisphere (Malley's method).
pub fn sample_cosine_hemisphere(u: Point2f) -> Vector3f {
    let d = sample_uniform_disk_concentric(u);
    let z = safe_sqrt(1.0 - d.x * d.x - d.y * d.y);
    Vector3f::new(d.x, d.y, z)
}

pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta * INV_PI
}

/// Uniform direction within a cone about +z with the given half-angle cosine.
pub fn sample_uniform_cone(u: Point2f, cos_theta_max: Float) -> Vector3f {
    let cos_theta = (1.0 - u.x) + u.x * cos_theta_max;
    let sin_theta = safe_sqrt(1.0 - cos_theta * cos_theta);
    let phi = u.y * 2.0 * PI_F;
    Vector3f::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta)
}

pub fn uniform_cone_pdf(cos_theta_max: Float) -> Float {
    1.0 / (2.0 * PI_F * (1.0 - cos_theta_max))
}
