//! End-to-end mutation scenarios: add, merge, partial and full removal, and
//! the equality contract between models.

use vassilakis_sra::{RoughnessModel, Sinusoid};

fn model(parts: &[(f64, f64)]) -> RoughnessModel {
    RoughnessModel::new(parts.iter().copied()).unwrap()
}

#[test]
fn removal_restores_the_smaller_model() {
    let mut sra = model(&[(440.0, 1.0), (466.1638, 1.0)]);
    sra.remove_sinusoid((466.1638, 1.0)).unwrap();
    assert_eq!(sra, model(&[(440.0, 1.0)]));
    assert!(sra.roughness_pairs().is_empty());
}

#[test]
fn addition_matches_a_freshly_built_model() {
    let mut sra = model(&[(440.0, 1.0)]);
    sra.add_sinusoid((466.1638, 1.0)).unwrap();
    assert_eq!(sra, model(&[(440.0, 1.0), (466.1638, 1.0)]));
    assert_eq!(sra.roughness_pairs().len(), 1);
}

#[test]
fn adding_an_existing_frequency_merges_amplitudes() {
    let mut sra = model(&[(440.0, 1.0), (466.1638, 1.0)]);
    sra.add_sinusoid((440.0, 1.0)).unwrap();
    assert_eq!(sra, model(&[(440.0, 2.0), (466.1638, 1.0)]));

    // The merged pair value reflects the post-merge amplitude, not the
    // stale pre-merge one.
    assert_eq!(
        sra.roughness(),
        model(&[(440.0, 2.0), (466.1638, 1.0)]).roughness()
    );
}

#[test]
fn partial_removal_leaves_the_remainder() {
    let mut sra = model(&[(440.0, 1.0), (466.1638, 2.0)]);
    sra.remove_sinusoid((466.1638, 1.0)).unwrap();
    assert_eq!(sra, model(&[(440.0, 1.0), (466.1638, 1.0)]));
    assert_eq!(
        sra.roughness(),
        model(&[(440.0, 1.0), (466.1638, 1.0)]).roughness()
    );
}

#[test]
fn removing_an_absent_frequency_is_a_no_op() {
    let mut sra = model(&[(440.0, 1.0), (466.1638, 1.0)]);
    let before = sra.clone();
    sra.remove_sinusoid((523.2511, 1.0)).unwrap();
    assert_eq!(sra, before);
    assert_eq!(sra.roughness(), before.roughness());
}

#[test]
fn add_then_remove_restores_the_prior_model() {
    let mut sra = model(&[(440.0, 1.0), (466.1638, 1.0)]);
    let before = sra.clone();
    sra.add_sinusoid((493.8833, 0.5)).unwrap();
    assert_ne!(sra, before);
    sra.remove_sinusoid((493.8833, 0.5)).unwrap();
    assert_eq!(sra, before);
}

#[test]
fn batch_addition_applies_in_input_order() {
    let mut sra = model(&[(440.0, 2.0)]);
    sra.add_sinusoids([(466.1638, 1.0), (493.8833, 1.0)]).unwrap();
    assert_eq!(
        sra,
        model(&[(440.0, 2.0), (466.1638, 1.0), (493.8833, 1.0)])
    );
    assert_eq!(sra.roughness_pairs().len(), 3);
}

#[test]
fn batch_removal_applies_in_input_order() {
    let mut sra = model(&[(440.0, 1.0), (466.1638, 1.0), (493.8833, 1.0)]);
    sra.remove_sinusoids([(466.1638, 1.0), (493.8833, 1.0)])
        .unwrap();
    assert_eq!(sra, model(&[(440.0, 1.0)]));
}

#[test]
fn batch_error_keeps_the_already_applied_prefix() {
    let mut sra = model(&[(440.0, 1.0)]);
    let result = sra.add_sinusoids([(466.1638, 1.0), (0.0, 1.0), (493.8833, 1.0)]);
    assert!(result.is_err());
    // First item landed, the invalid one errored, the last never ran.
    assert_eq!(sra, model(&[(440.0, 1.0), (466.1638, 1.0)]));
}

#[test]
fn removal_by_frequency_drops_the_whole_partial() {
    let mut sra = model(&[(440.0, 1.0), (466.1638, 2.0)]);
    sra.remove_sinusoid_by_frequency(466.1638).unwrap();
    assert_eq!(sra, model(&[(440.0, 1.0)]));

    // Absent frequency: no-op.
    let before = sra.clone();
    sra.remove_sinusoid_by_frequency(880.0).unwrap();
    assert_eq!(sra, before);

    // Invalid frequency still validates.
    assert!(sra.remove_sinusoid_by_frequency(-1.0).is_err());
}

#[test]
fn mutation_accepts_sinusoid_values_too() {
    let mut sra = model(&[(440.0, 1.0)]);
    let partial = Sinusoid::new(466.1638, 1.0).unwrap();
    sra.add_sinusoid(partial).unwrap();
    sra.remove_sinusoid(&partial).unwrap();
    assert_eq!(sra, model(&[(440.0, 1.0)]));
}
