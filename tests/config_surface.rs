//! The embedder-facing configuration surface: JSON configs, variant keys,
//! and the failure mode for unknown boundaries.

use seamwave::{
    Fps, SeamwaveError, StaticMotion, WaveDividerConfig, WaveVariant, build_strip,
};

#[test]
fn minimal_json_config_builds_a_strip() {
    let config: WaveDividerConfig =
        serde_json::from_str(r##"{"fill":"#FDE8EF","variant":"events","height":64}"##).unwrap();
    assert_eq!(config.variant, WaveVariant::Events);
    assert_eq!(config.height, 64);

    let strip = build_strip(&config, 1440, Fps::new(30, 1).unwrap(), &StaticMotion(false)).unwrap();
    assert_eq!(strip.canvas.height, 64);
    assert_eq!(strip.layers.len(), 2);
}

#[test]
fn unknown_variant_in_json_is_rejected_loudly() {
    let err = serde_json::from_str::<WaveDividerConfig>(
        r##"{"fill":"#FFF0F6","variant":"nonexistent"}"##,
    )
    .unwrap_err();
    assert!(err.to_string().contains("nonexistent"));
}

#[test]
fn unknown_variant_string_is_a_config_error() {
    let err = "nonexistent".parse::<WaveVariant>().unwrap_err();
    assert!(matches!(err, SeamwaveError::Config(_)));
    let msg = err.to_string();
    assert!(msg.contains("nonexistent"));
    assert!(msg.contains("hero"));
}

#[test]
fn config_round_trips_through_json() {
    let config = WaveDividerConfig::new(WaveVariant::Gallery)
        .height(48)
        .flip_x(true);
    let json = serde_json::to_string(&config).unwrap();
    let back: WaveDividerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.variant, WaveVariant::Gallery);
    assert_eq!(back.height, 48);
    assert!(back.flip_x);
    assert_eq!(back.fill, WaveVariant::Gallery.suggested_fill());
}
