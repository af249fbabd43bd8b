//! Sweep a second tone from unison to one octave above a 220 Hz base and
//! print the Vassilakis roughness curve.  The dissonance peak sits a few
//! dozen Hz above unison and the curve relaxes toward the octave.
//!
//! Run:
//! - cargo run --example roughness_curve

use std::error::Error;

use vassilakis_sra::RoughnessModel;

fn main() -> Result<(), Box<dyn Error>> {
    let base_hz = 220.0;
    let mut model = RoughnessModel::new([(base_hz, 1.0)])?;

    println!("# cents  second_hz  roughness");
    for step in 0..=120 {
        let cents = f64::from(step) * 10.0;
        let second_hz = base_hz * (cents / 1200.0).exp2();

        model.add_sinusoid((second_hz, 1.0))?;
        println!("{cents:6.0}  {second_hz:9.3}  {:.6}", model.roughness());
        model.remove_sinusoid((second_hz, 1.0))?;
    }

    Ok(())
}
