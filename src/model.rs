//! model.rs — stateful SRA model over a set of partials.
//!
//! Owns the frequency-sorted, unique-frequency partial list and one cached
//! roughness value per unordered pair (|pairs| = C(n,2)).  Add/remove keep
//! the cache exact by touching only the pairs incident to the mutated
//! frequency, so an update costs one formula evaluation per surviving
//! partial rather than a full rebuild.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::roughness::pair_roughness;
use crate::sinusoid::{IntoSinusoid, Sinusoid, SinusoidError};

/// Canonical unordered pair of partial frequencies.
///
/// Frequencies are unique within a model, so the ordered (low, high) pair
/// identifies a sinusoid pair exactly without hashing floats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairKey {
    low: f64,
    high: f64,
}

impl PairKey {
    fn new(a: &Sinusoid, b: &Sinusoid) -> Self {
        if a.frequency() <= b.frequency() {
            Self {
                low: a.frequency(),
                high: b.frequency(),
            }
        } else {
            Self {
                low: b.frequency(),
                high: a.frequency(),
            }
        }
    }

    /// Lower of the two paired frequencies.
    #[inline]
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Higher of the two paired frequencies.
    #[inline]
    pub fn high(&self) -> f64 {
        self.high
    }

    #[inline]
    fn touches(&self, frequency: f64) -> bool {
        self.low == frequency || self.high == frequency
    }
}

// Frequencies are finite by the Sinusoid invariant, so total_cmp is a true
// total order and Eq is sound.
impl Eq for PairKey {}

impl Ord for PairKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.low
            .total_cmp(&other.low)
            .then(self.high.total_cmp(&other.high))
    }
}

impl PartialOrd for PairKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One partial's summed share of the model's total roughness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contribution {
    /// Sum of the pair values this partial appears in.
    pub roughness: f64,
    /// Fraction of the model total; 0.0 when the total is zero.
    pub share: f64,
}

/// Stateful Vassilakis SRA model of a sum-of-sinusoids spectrum.
///
/// Equality compares the partial sequence only; the pair cache is derived.
/// Ordering between models compares total roughness.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Sinusoid>", from = "Vec<Sinusoid>")]
pub struct RoughnessModel {
    sinusoids: Vec<Sinusoid>,
    pairs: BTreeMap<PairKey, f64>,
}

impl RoughnessModel {
    /// Build a model from sinusoids or `(frequency, amplitude)` tuples.
    ///
    /// Parts sharing a frequency merge by amplitude sum, silently.  The one
    /// O(n²) pass over all pairs happens here; mutation afterwards is
    /// incremental.
    pub fn new<I, P>(parts: I) -> Result<Self, SinusoidError>
    where
        I: IntoIterator<Item = P>,
        P: IntoSinusoid,
    {
        let mut converted = Vec::new();
        for part in parts {
            converted.push(part.into_sinusoid()?);
        }
        Ok(Self::from(converted))
    }

    /// Ordered snapshot of the current partials.
    pub fn sinusoids(&self) -> &[Sinusoid] {
        &self.sinusoids
    }

    /// Cached roughness value per unordered pair of current partials.
    pub fn roughness_pairs(&self) -> &BTreeMap<PairKey, f64> {
        &self.pairs
    }

    /// Number of partials.
    pub fn len(&self) -> usize {
        self.sinusoids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinusoids.is_empty()
    }

    /// Total roughness: sum over all cached pair values.
    pub fn roughness(&self) -> f64 {
        self.pairs.values().sum()
    }

    /// Per-partial roughness and its share of the total, in frequency order.
    ///
    /// With fewer than two partials the total is zero and every share is
    /// reported as 0.0.
    pub fn roughness_contributions(&self) -> Vec<(Sinusoid, Contribution)> {
        let total = self.roughness();
        let mut sums = vec![0.0f64; self.sinusoids.len()];
        for (key, value) in &self.pairs {
            if let Some(i) = self.position_of(key.low) {
                sums[i] += value;
            }
            if let Some(i) = self.position_of(key.high) {
                sums[i] += value;
            }
        }
        self.sinusoids
            .iter()
            .zip(sums)
            .map(|(s, roughness)| {
                let share = if total > 0.0 { roughness / total } else { 0.0 };
                (*s, Contribution { roughness, share })
            })
            .collect()
    }

    /// Add one partial, merging amplitudes if its frequency is already
    /// present, and refresh every pair value the new partial participates in.
    pub fn add_sinusoid<P: IntoSinusoid>(&mut self, part: P) -> Result<(), SinusoidError> {
        let mut part = part.into_sinusoid()?;
        let slot = match self
            .sinusoids
            .binary_search_by(|s| s.cmp_frequency(&part))
        {
            Ok(i) => {
                // Merge with the occupant, then retire it together with
                // every pair value derived from its pre-merge amplitude.
                part = self.sinusoids[i].merged_with(&part);
                trace!(
                    frequency = part.frequency(),
                    amplitude = part.amplitude(),
                    "merging partial into existing frequency"
                );
                self.remove_at(i);
                i
            }
            Err(i) => i,
        };
        for existing in &self.sinusoids {
            self.pairs
                .insert(PairKey::new(&part, existing), pair_roughness(&part, existing));
        }
        self.sinusoids.insert(slot, part);
        debug_assert!(self.pairs_consistent());
        Ok(())
    }

    /// Add partials one by one, in input order.
    ///
    /// No bulk shortcut: each item sees the model state left by the previous
    /// one, exactly as repeated [`add_sinusoid`](Self::add_sinusoid) calls
    /// would.  On a conversion error the items already applied stay applied.
    pub fn add_sinusoids<I, P>(&mut self, parts: I) -> Result<(), SinusoidError>
    where
        I: IntoIterator<Item = P>,
        P: IntoSinusoid,
    {
        for part in parts {
            self.add_sinusoid(part)?;
        }
        Ok(())
    }

    /// Remove amplitude from the partial at the input's frequency.
    ///
    /// An absent frequency is a silent no-op.  If the stored amplitude
    /// exceeds the requested one the remainder stays and its incident pair
    /// values are recomputed in place; otherwise the partial is fully
    /// cancelled and every pair referencing it is dropped.
    pub fn remove_sinusoid<P: IntoSinusoid>(&mut self, part: P) -> Result<(), SinusoidError> {
        let part = part.into_sinusoid()?;
        let Ok(i) = self
            .sinusoids
            .binary_search_by(|s| s.cmp_frequency(&part))
        else {
            trace!(
                frequency = part.frequency(),
                "remove of absent frequency ignored"
            );
            return Ok(());
        };
        match self.sinusoids[i].reduced_by(&part) {
            Some(remainder) => {
                // The frequency survives, so the pair keys are unchanged;
                // only the values incident to it need refreshing.
                self.sinusoids[i] = remainder;
                for existing in &self.sinusoids {
                    if existing.frequency() == remainder.frequency() {
                        continue;
                    }
                    self.pairs.insert(
                        PairKey::new(&remainder, existing),
                        pair_roughness(&remainder, existing),
                    );
                }
            }
            None => {
                debug!(frequency = part.frequency(), "partial fully cancelled");
                self.remove_at(i);
            }
        }
        debug_assert!(self.pairs_consistent());
        Ok(())
    }

    /// Remove partials one by one, in input order; same sequencing contract
    /// as [`add_sinusoids`](Self::add_sinusoids).
    pub fn remove_sinusoids<I, P>(&mut self, parts: I) -> Result<(), SinusoidError>
    where
        I: IntoIterator<Item = P>,
        P: IntoSinusoid,
    {
        for part in parts {
            self.remove_sinusoid(part)?;
        }
        Ok(())
    }

    /// Fully remove whatever is stored at `frequency`, regardless of its
    /// amplitude.  An absent frequency is a silent no-op.
    pub fn remove_sinusoid_by_frequency(&mut self, frequency: f64) -> Result<(), SinusoidError> {
        // Probe amplitude is a placeholder; only the frequency is compared.
        let probe = Sinusoid::new(frequency, 1.0)?;
        match self
            .sinusoids
            .binary_search_by(|s| s.cmp_frequency(&probe))
        {
            Ok(i) => {
                debug!(frequency, "removing partial by frequency");
                self.remove_at(i);
            }
            Err(_) => {
                trace!(frequency, "remove of absent frequency ignored");
            }
        }
        debug_assert!(self.pairs_consistent());
        Ok(())
    }

    fn position_of(&self, frequency: f64) -> Option<usize> {
        self.sinusoids
            .binary_search_by(|s| s.frequency().total_cmp(&frequency))
            .ok()
    }

    // Drop the partial at `i` and every cached pair referencing its
    // frequency.
    fn remove_at(&mut self, i: usize) {
        let gone = self.sinusoids.remove(i);
        let frequency = gone.frequency();
        self.pairs.retain(|key, _| !key.touches(frequency));
    }

    // Debug-only invariant: |pairs| = C(n,2), every key references two
    // distinct live frequencies.
    fn pairs_consistent(&self) -> bool {
        let n = self.sinusoids.len();
        self.pairs.len() == n * n.saturating_sub(1) / 2
            && self.pairs.keys().all(|key| {
                key.low < key.high
                    && self.position_of(key.low).is_some()
                    && self.position_of(key.high).is_some()
            })
    }
}

impl From<Vec<Sinusoid>> for RoughnessModel {
    /// Infallible construction from already-validated partials; duplicates
    /// merge by amplitude sum.
    fn from(parts: Vec<Sinusoid>) -> Self {
        let mut sinusoids: Vec<Sinusoid> = Vec::with_capacity(parts.len());
        for part in parts {
            match sinusoids.binary_search_by(|s| s.cmp_frequency(&part)) {
                Ok(i) => sinusoids[i] = sinusoids[i].merged_with(&part),
                Err(i) => sinusoids.insert(i, part),
            }
        }
        let mut pairs = BTreeMap::new();
        for (i, a) in sinusoids.iter().enumerate() {
            for b in &sinusoids[i + 1..] {
                pairs.insert(PairKey::new(a, b), pair_roughness(a, b));
            }
        }
        Self { sinusoids, pairs }
    }
}

impl From<RoughnessModel> for Vec<Sinusoid> {
    fn from(model: RoughnessModel) -> Self {
        model.sinusoids
    }
}

impl PartialEq for RoughnessModel {
    /// Models are equal when their partial sequences are; the pair cache is
    /// derived state.
    fn eq(&self, other: &Self) -> bool {
        self.sinusoids == other.sinusoids
    }
}

impl PartialOrd for RoughnessModel {
    /// Orders by total roughness while equality stays sequence-based, the
    /// same order/equality split the partials themselves have.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.roughness().partial_cmp(&other.roughness())
    }
}

impl fmt::Display for RoughnessModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SRA model of {} partials with roughness {:.2}",
            self.sinusoids.len(),
            self.roughness()
        )
    }
}
