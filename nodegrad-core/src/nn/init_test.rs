use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_xavier_shape_and_scale() {
    let mut rng = StdRng::seed_from_u64(0);
    let param = xavier(&[400, 50], 1.0, &mut rng);
    assert_eq!(param.shape(), vec![400, 50]);
    assert!(param.requires_grad());
    let value = param.value();
    let n = value.len() as f64;
    let mean = value.sum() / n;
    let variance = value.mapv(|v| (v - mean) * (v - mean)).sum() / n;
    // Expected variance 1/400.
    assert!((variance - 0.0025).abs() < 0.0005, "variance {}", variance);
}

#[test]
fn test_normal_scaled_is_seeded() {
    let a = normal_scaled(&[3, 3], DEFAULT_NORMAL_SCALE, &mut StdRng::seed_from_u64(1));
    let b = normal_scaled(&[3, 3], DEFAULT_NORMAL_SCALE, &mut StdRng::seed_from_u64(1));
    assert_eq!(*a.value(), *b.value());
    assert!(a.value().iter().all(|v| v.abs() < 0.1));
}

#[test]
fn test_uniform_bounded_respects_limit() {
    let mut rng = StdRng::seed_from_u64(2);
    let param = uniform_bounded(&[10, 20], &mut rng);
    let limit = (3.0f64 / 15.0).sqrt();
    assert!(param.value().iter().all(|&v| v >= -limit && v < limit));
}

#[test]
fn test_constant_initializers() {
    assert!(zeros(&[2, 3]).value().iter().all(|&v| v == 0.0));
    assert!(ones(&[4]).value().iter().all(|&v| v == 1.0));
}
