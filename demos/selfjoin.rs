//! Self-join demo: find the motif pair and the discord in a noisy periodic
//! signal with one implanted anomaly.

use matprof::backend;

fn main() -> Result<(), matprof::Error> {
    let n = 600;
    let m = 40;

    // A sine wave with deterministic jitter and a flattened stretch in the
    // middle acting as the anomaly.
    let mut ts: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            (t * 0.12).sin() + 0.05 * (t * 1.7).cos()
        })
        .collect();
    for v in ts[300..340].iter_mut() {
        *v *= 0.1;
    }

    backend::initialize(0, 0)?;

    let mut profile = vec![0.0; n - m + 1];
    backend::selfjoin(&ts, &mut profile, m, 0, true)?;

    let (motif_idx, motif_d) = profile
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(i, &d)| (i, d))
        .unwrap();
    let (discord_idx, discord_d) = profile
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(i, &d)| (i, d))
        .unwrap();

    println!("series length {n}, window {m}");
    println!("motif   at {motif_idx:4} (distance {motif_d:.4})");
    println!("discord at {discord_idx:4} (distance {discord_d:.4})");

    backend::finalize()?;
    Ok(())
}
