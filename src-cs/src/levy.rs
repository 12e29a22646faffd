//! Lévy-flight step generation (Mantegna's algorithm)

use std::f64::consts::PI;

use rand::Rng;
use rand_distr::StandardNormal;

/// Stability exponent used by the global perturbation operator
pub const BETA: f64 = 1.5;

const LANCZOS: [f64; 6] = [
    76.180_091_729_471_46,
    -86.505_320_329_416_77,
    24.014_098_240_830_91,
    -1.231_739_572_450_155,
    0.120_865_097_386_617_9e-2,
    -0.539_523_938_495_3e-5,
];

/// ln Γ(x) for x > 0
pub fn ln_gamma(x: f64) -> f64 {
    let mut y = x;
    let tmp = x + 5.5;
    let tmp = tmp - (x + 0.5) * tmp.ln();
    let mut ser = 1.000_000_000_190_015;
    for c in LANCZOS {
        y += 1.0;
        ser += c / y;
    }
    -tmp + (2.506_628_274_631_000_5 * ser / x).ln()
}

pub fn gamma(x: f64) -> f64 {
    if x < 0.5 {
        // reflection
        PI / ((PI * x).sin() * gamma(1.0 - x))
    } else {
        ln_gamma(x).exp()
    }
}

/// Scale of the numerator normal in Mantegna's algorithm
pub fn levy_sigma(beta: f64) -> f64 {
    let num = gamma(1.0 + beta) * (PI * beta / 2.0).sin();
    let den = gamma((1.0 + beta) / 2.0) * beta * 2f64.powf((beta - 1.0) / 2.0);
    (num / den).powf(1.0 / beta)
}

/// One heavy-tailed step: u / |v|^(1/beta) with u ~ N(0, sigma^2), v ~ N(0, 1)
pub fn levy_step<R: Rng + ?Sized>(rng: &mut R, sigma: f64, beta: f64) -> f64 {
    let u: f64 = rng.sample::<f64, _>(StandardNormal) * sigma;
    let v: f64 = rng.sample(StandardNormal);
    u / v.abs().powf(1.0 / beta)
}
