//! AB-join demo: locate where a short recording best matches a longer one.

use matprof::backend;

fn main() -> Result<(), matprof::Error> {
    let m = 25;

    let long: Vec<f64> = (0..500)
        .map(|i| (i as f64 * 0.09).sin() * (1.0 + 0.002 * i as f64))
        .collect();
    // The query is a slice of the long series with a small offset applied,
    // which z-normalization discounts.
    let query: Vec<f64> = long[200..280].iter().map(|x| x + 3.0).collect();

    backend::initialize(0, 0)?;

    let mut profile = vec![0.0; query.len() - m + 1];
    backend::abjoin(&query, &long, &mut profile, m, 0, true)?;

    for (i, d) in profile.iter().enumerate() {
        if *d < 1e-4 {
            println!("query window {i:3} matches the long series (d = {d:.2e})");
        }
    }
    let worst = profile.iter().cloned().fold(0.0_f64, f64::max);
    println!("worst query window distance: {worst:.4}");

    backend::finalize()?;
    Ok(())
}
