//! Seeded sampling helpers shared by the data simulator and the sampler.
//!
//! All draws come from an explicitly seeded RNG passed in by the caller;
//! nothing here touches ambient process state.

use rand::Rng;

/// Standard normal draw via the Box-Muller transform.
pub(crate) fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Poisson draw: Knuth's product method for small rates, normal
/// approximation for large ones.
pub(crate) fn sample_poisson<R: Rng + ?Sized>(rng: &mut R, lambda: f64) -> u64 {
    if lambda >= 30.0 {
        let draw = lambda + lambda.sqrt() * standard_normal(rng);
        return draw.round().max(0.0) as u64;
    }
    let limit = (-lambda).exp();
    let mut k = 0u64;
    let mut p = 1.0f64;
    loop {
        p *= rng.gen::<f64>();
        if p <= limit {
            return k;
        }
        k += 1;
    }
}

/// Gamma(shape, scale) draw using the Marsaglia-Tsang squeeze, with the
/// standard boost for shape < 1.
pub(crate) fn sample_gamma<R: Rng + ?Sized>(rng: &mut R, shape: f64, scale: f64) -> f64 {
    if shape < 1.0 {
        let u = rng.gen::<f64>().max(f64::MIN_POSITIVE);
        return sample_gamma(rng, shape + 1.0, scale) * u.powf(1.0 / shape);
    }
    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();
    loop {
        let x = standard_normal(rng);
        let v = (1.0 + c * x).powi(3);
        if v <= 0.0 {
            continue;
        }
        let u = rng.gen::<f64>().max(f64::MIN_POSITIVE);
        if u.ln() < 0.5 * x * x + d - d * v + d * v.ln() {
            return d * v * scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_standard_normal_moments() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 50_000;
        let draws: Vec<f64> = (0..n).map(|_| standard_normal(&mut rng)).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.02);
        assert!((var - 1.0).abs() < 0.03);
    }

    #[test]
    fn test_poisson_mean() {
        let mut rng = StdRng::seed_from_u64(11);
        let n = 20_000;
        let total: u64 = (0..n).map(|_| sample_poisson(&mut rng, 4.0)).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 4.0).abs() < 0.1);
    }

    #[test]
    fn test_poisson_large_rate_branch() {
        let mut rng = StdRng::seed_from_u64(13);
        let n = 20_000;
        let total: u64 = (0..n).map(|_| sample_poisson(&mut rng, 100.0)).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 100.0).abs() < 0.5);
    }

    #[test]
    fn test_gamma_mean_and_positivity() {
        let mut rng = StdRng::seed_from_u64(17);
        let n = 20_000;
        let draws: Vec<f64> = (0..n).map(|_| sample_gamma(&mut rng, 2.0, 0.5)).collect();
        assert!(draws.iter().all(|&g| g > 0.0));
        let mean = draws.iter().sum::<f64>() / n as f64;
        // E[Gamma(2, 0.5)] = 1.0
        assert!((mean - 1.0).abs() < 0.03);
    }

    #[test]
    fn test_gamma_small_shape() {
        let mut rng = StdRng::seed_from_u64(19);
        let n = 20_000;
        let draws: Vec<f64> = (0..n).map(|_| sample_gamma(&mut rng, 0.5, 2.0)).collect();
        assert!(draws.iter().all(|&g| g > 0.0));
        let mean = draws.iter().sum::<f64>() / n as f64;
        // E[Gamma(0.5, 2)] = 1.0
        assert!((mean - 1.0).abs() < 0.05);
    }
}
