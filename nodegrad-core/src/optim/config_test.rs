use super::*;

#[test]
fn test_defaults_are_valid() {
    assert!(SgdConfig::default().validate().is_ok());
    assert!(AdamConfig::default().validate().is_ok());
    assert!(RmsPropConfig::default().validate().is_ok());
    assert_eq!(SgdConfig::default().state_policy, StatePolicy::Lazy);
}

#[test]
fn test_invalid_values_are_rejected() {
    let invalid = [
        SgdConfig::default().with_learning_rate(0.0).validate(),
        SgdConfig::default().with_momentum(1.0).validate(),
        SgdConfig::default().with_dampening(-0.1).validate(),
        AdamConfig::default().with_epsilon(0.0).validate(),
        AdamConfig::default().with_betas(0.9, -0.1).validate(),
        RmsPropConfig::default().with_decay(1.5).validate(),
        RmsPropConfig::default().with_learning_rate(f64::NAN).validate(),
    ];
    for result in invalid {
        assert!(matches!(result, Err(NodeGradError::Configuration(_))));
    }
}
