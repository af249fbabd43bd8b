//! roughness.rs — pairwise Vassilakis roughness of two partials.
//!
//! Closed-form fit of sensory roughness for a pair of sinusoids
//! (Vassilakis 2001/2007).  Pure function of the two partials; the model
//! caches one value per unordered pair and calls back in here on mutation.

use crate::sinusoid::Sinusoid;

// Roughness-curve fit constants.
const B1: f64 = 3.5;
const B2: f64 = 5.75;
const S1: f64 = 0.0207;
const S2: f64 = 18.96;

/// Roughness contributed by one unordered pair of partials.
///
/// Symmetric in its arguments and always >= 0.  Partials at the same
/// frequency beat at zero rate and contribute nothing.
pub fn pair_roughness(a: &Sinusoid, b: &Sinusoid) -> f64 {
    let f_min = a.frequency().min(b.frequency());
    let f_max = a.frequency().max(b.frequency());
    let a_min = a.amplitude().min(b.amplitude());
    let a_max = a.amplitude().max(b.amplitude());

    let s = 0.24 / (S1 * f_min + S2);
    let x = a_min * a_max;
    let y = 2.0 * a_min / (a_min + a_max);
    let z = (-B1 * s * (f_max - f_min)).exp() - (-B2 * s * (f_max - f_min)).exp();

    x.powf(0.1) * 0.5 * y.powf(3.11) * z
}
