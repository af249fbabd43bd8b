//! sinusoid.rs — one sinusoidal partial (frequency, amplitude).
//!
//! Both fields are always finite and strictly positive; construction is the
//! only place that invariant is checked.  Ordering compares frequency alone
//! while equality compares the full value pair: search and insertion key on
//! frequency, deduplication needs the exact partial.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Which argument failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Frequency,
    Amplitude,
    Factor,
}

impl Field {
    fn name(self) -> &'static str {
        match self {
            Field::Frequency => "frequency",
            Field::Amplitude => "amplitude",
            Field::Factor => "scale factor",
        }
    }
}

/// Errors returned by partial construction and arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SinusoidError {
    /// Argument is NaN or infinite.
    NotFinite { field: Field, value: f64 },
    /// Argument is zero or negative.
    NotPositive { field: Field, value: f64 },
    /// Merge/reduce across two different frequencies.
    FrequencyMismatch { left: f64, right: f64 },
}

impl fmt::Display for SinusoidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinusoidError::NotFinite { field, value } => {
                write!(f, "{} must be a finite number, got {value}", field.name())
            }
            SinusoidError::NotPositive { field, value } => {
                write!(f, "{} must be greater than 0, got {value}", field.name())
            }
            SinusoidError::FrequencyMismatch { left, right } => {
                write!(
                    f,
                    "partials must share a frequency to combine, got {left} Hz and {right} Hz"
                )
            }
        }
    }
}

impl std::error::Error for SinusoidError {}

// Finiteness before range, so NaN reports as the type-shaped error even
// though it also fails the comparison.
fn checked(field: Field, value: f64) -> Result<f64, SinusoidError> {
    if !value.is_finite() {
        return Err(SinusoidError::NotFinite { field, value });
    }
    if value <= 0.0 {
        return Err(SinusoidError::NotPositive { field, value });
    }
    Ok(value)
}

#[derive(Serialize, Deserialize)]
#[serde(rename = "Sinusoid")]
struct RawSinusoid {
    frequency: f64,
    amplitude: f64,
}

/// One sinusoidal partial of a modeled sound.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawSinusoid", try_from = "RawSinusoid")]
pub struct Sinusoid {
    frequency: f64,
    amplitude: f64,
}

impl Sinusoid {
    /// Validate and construct a partial.
    pub fn new(frequency: f64, amplitude: f64) -> Result<Self, SinusoidError> {
        Ok(Self {
            frequency: checked(Field::Frequency, frequency)?,
            amplitude: checked(Field::Amplitude, amplitude)?,
        })
    }

    /// Frequency in Hz.
    #[inline]
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Linear amplitude.
    #[inline]
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Frequency-only ordering used for search and sorted insertion.
    ///
    /// `total_cmp` is a true total order here because frequencies are
    /// guaranteed finite.
    #[inline]
    pub fn cmp_frequency(&self, other: &Sinusoid) -> Ordering {
        self.frequency.total_cmp(&other.frequency)
    }

    /// Sum this partial with another at the same frequency.
    pub fn merge(&self, other: &Sinusoid) -> Result<Sinusoid, SinusoidError> {
        if self.frequency != other.frequency {
            return Err(SinusoidError::FrequencyMismatch {
                left: self.frequency,
                right: other.frequency,
            });
        }
        Ok(self.merged_with(other))
    }

    /// Subtract `other`'s amplitude at the same frequency.
    ///
    /// `Ok(None)` means the partial is fully cancelled; a zero-amplitude
    /// sinusoid is not representable, absence is the result.
    pub fn reduce(&self, other: &Sinusoid) -> Result<Option<Sinusoid>, SinusoidError> {
        if self.frequency != other.frequency {
            return Err(SinusoidError::FrequencyMismatch {
                left: self.frequency,
                right: other.frequency,
            });
        }
        Ok(self.reduced_by(other))
    }

    /// Scale the amplitude by a positive factor.
    pub fn scaled(&self, factor: f64) -> Result<Sinusoid, SinusoidError> {
        let factor = checked(Field::Factor, factor)?;
        Ok(Sinusoid {
            frequency: self.frequency,
            amplitude: self.amplitude * factor,
        })
    }

    // Same-frequency amplitude sum, for callers that already matched the
    // frequencies (model merge paths).
    pub(crate) fn merged_with(&self, other: &Sinusoid) -> Sinusoid {
        debug_assert_eq!(self.frequency, other.frequency);
        Sinusoid {
            frequency: self.frequency,
            amplitude: self.amplitude + other.amplitude,
        }
    }

    // Same-frequency amplitude difference; None when nothing remains.
    pub(crate) fn reduced_by(&self, other: &Sinusoid) -> Option<Sinusoid> {
        debug_assert_eq!(self.frequency, other.frequency);
        if self.amplitude > other.amplitude {
            Some(Sinusoid {
                frequency: self.frequency,
                amplitude: self.amplitude - other.amplitude,
            })
        } else {
            None
        }
    }
}

impl PartialOrd for Sinusoid {
    /// Compares frequency alone.  Two partials at the same frequency with
    /// different amplitudes compare `Equal` here yet are not `==`.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp_frequency(other))
    }
}

impl fmt::Display for Sinusoid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sinusoid at {} Hz with amplitude {}",
            self.frequency, self.amplitude
        )
    }
}

impl TryFrom<(f64, f64)> for Sinusoid {
    type Error = SinusoidError;

    fn try_from((frequency, amplitude): (f64, f64)) -> Result<Self, Self::Error> {
        Sinusoid::new(frequency, amplitude)
    }
}

impl From<Sinusoid> for (f64, f64) {
    fn from(s: Sinusoid) -> Self {
        (s.frequency, s.amplitude)
    }
}

impl TryFrom<RawSinusoid> for Sinusoid {
    type Error = SinusoidError;

    fn try_from(raw: RawSinusoid) -> Result<Self, Self::Error> {
        Sinusoid::new(raw.frequency, raw.amplitude)
    }
}

impl From<Sinusoid> for RawSinusoid {
    fn from(s: Sinusoid) -> Self {
        RawSinusoid {
            frequency: s.frequency,
            amplitude: s.amplitude,
        }
    }
}

/// Anything the model accepts where a partial is expected: an existing
/// [`Sinusoid`] or a raw `(frequency, amplitude)` tuple.
pub trait IntoSinusoid {
    fn into_sinusoid(self) -> Result<Sinusoid, SinusoidError>;
}

impl IntoSinusoid for Sinusoid {
    fn into_sinusoid(self) -> Result<Sinusoid, SinusoidError> {
        Ok(self)
    }
}

impl IntoSinusoid for &Sinusoid {
    fn into_sinusoid(self) -> Result<Sinusoid, SinusoidError> {
        Ok(*self)
    }
}

impl IntoSinusoid for (f64, f64) {
    fn into_sinusoid(self) -> Result<Sinusoid, SinusoidError> {
        Sinusoid::new(self.0, self.1)
    }
}
