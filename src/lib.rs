//! Incremental Vassilakis SRA (spectral roughness analysis).
//!
//! Models a sound as a set of sinusoidal partials and scores its sensory
//! roughness with the Vassilakis pairwise formula.  A [`RoughnessModel`]
//! keeps the partial list sorted and unique by frequency and caches one
//! roughness value per unordered pair, so adding or removing a partial costs
//! one formula evaluation per surviving partial instead of a full O(n²)
//! rebuild.
//!
//! ```
//! use vassilakis_sra::RoughnessModel;
//!
//! let mut model = RoughnessModel::new([(440.0, 1.0), (466.1638, 1.0)])?;
//! assert!(model.roughness() > 0.0);
//!
//! model.remove_sinusoid((466.1638, 1.0))?;
//! assert_eq!(model.roughness(), 0.0);
//! # Ok::<(), vassilakis_sra::SinusoidError>(())
//! ```

pub mod model;
pub mod roughness;
pub mod sinusoid;

pub use model::{Contribution, PairKey, RoughnessModel};
pub use roughness::pair_roughness;
pub use sinusoid::{Field, IntoSinusoid, Sinusoid, SinusoidError};
