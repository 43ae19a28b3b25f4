#[inline]
/// `1 / (1 + e^-x)`
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[inline]
/// `y * (1 - y)`
///
/// Expects `y` to be an already computed `logistic` output,
/// not the raw argument.
pub fn logistic_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}

#[inline]
/// `x * logistic(x)`
///
/// The only activation function used by the network.
pub fn swish(x: f64) -> f64 {
    x * logistic(x)
}

#[inline]
/// Derivative of `swish`, evaluated on a previously computed
/// `swish` output `y` standing in for the raw argument.
///
/// The substitution is kept as-is: trained networks depend on it.
pub fn swish_derivative(y: f64) -> f64 {
    let s = logistic(y);

    s + y * s * (1.0 - s)
}

/// Single weight scale drawn uniformly from `[-1, 1]` and
/// scaled by `sqrt(2 / fan_in)`.
///
/// The random source is supplied by the caller so that network
/// construction stays reproducible under a fixed seed.
pub fn he_scale(rng: &mut fastrand::Rng, fan_in: usize) -> f64 {
    (rng.f64() * 2.0 - 1.0) * (2.0 / fan_in as f64).sqrt()
}

#[test]
fn test_activation_identities() {
    assert_eq!(logistic(0.0), 0.5);
    assert_eq!(swish(0.0), 0.0);

    assert!((logistic(2.0) - 0.880797).abs() < 1e-6);
    assert!((swish(2.0) - 1.761594).abs() < 1e-6);

    // logistic_derivative takes the activated value.
    assert_eq!(logistic_derivative(0.5), 0.25);
}

#[test]
/// Swish is monotonically non-decreasing above roughly -1.
fn test_swish_shape() {
    let mut previous = swish(-1.0);

    for i in 1..=400 {
        let current = swish(-1.0 + i as f64 * 0.025);

        assert!(current >= previous);

        previous = current;
    }
}

#[test]
fn test_he_scale_bound() {
    let mut rng = fastrand::Rng::with_seed(42);

    for fan_in in [1, 2, 3, 8, 15, 256] {
        let bound = (2.0 / fan_in as f64).sqrt();

        for _ in 0..1000 {
            assert!(he_scale(&mut rng, fan_in).abs() <= bound);
        }
    }
}

#[test]
/// Same seed, same draws.
fn test_he_scale_reproducible() {
    let mut a = fastrand::Rng::with_seed(123);
    let mut b = fastrand::Rng::with_seed(123);

    for _ in 0..100 {
        assert_eq!(he_scale(&mut a, 7), he_scale(&mut b, 7));
    }
}
