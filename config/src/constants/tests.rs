//! Tests for the runtime configuration.

use super::*;

/// Ensures the default configuration matches the legacy constants.
#[test]
fn default_config_is_valid() {
    let cfg = MesherConfig::default();
    assert_eq!(cfg.steps_per_revolution, DEFAULT_STEPS_PER_REVOLUTION);
    assert_eq!(cfg.alpha_cutoff, TRANSPARENT_ALPHA_CUTOFF);
}

/// Validates the constructor rejects invalid values.
#[test]
fn new_rejects_invalid_values() {
    assert_eq!(
        MesherConfig::new(0, 0.5),
        Err(ConfigError::InvalidStepsPerRevolution(0))
    );
    assert_eq!(
        MesherConfig::new(-3, 0.5),
        Err(ConfigError::InvalidStepsPerRevolution(-3))
    );
    assert_eq!(
        MesherConfig::new(24, 1.5),
        Err(ConfigError::InvalidAlphaCutoff(1.5))
    );
}

#[test]
fn config_error_display_names_the_field() {
    let message = ConfigError::InvalidStepsPerRevolution(-1).to_string();
    assert!(message.contains("steps_per_revolution"));
}

#[test]
fn validate_checks_fields_set_directly() {
    let cfg = MesherConfig {
        steps_per_revolution: 24,
        alpha_cutoff: -0.1,
    };
    assert_eq!(cfg.validate(), Err(ConfigError::InvalidAlphaCutoff(-0.1)));
    assert_eq!(MesherConfig::default().validate(), Ok(()));
}
