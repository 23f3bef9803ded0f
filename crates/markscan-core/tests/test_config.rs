use markscan_core::detection::{EdgeConfig, QuadConfig};
use markscan_core::error::OmrError;
use markscan_core::filters::ThresholdMethod;
use markscan_core::frame::Dimensions;
use markscan_core::grid::BlankRowPolicy;
use markscan_core::pipeline::{GradingConfig, PipelineStage};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn assert_config_error(config: &GradingConfig, needle: &str) {
    match config.validate() {
        Err(OmrError::Configuration(msg)) => {
            assert!(msg.contains(needle), "expected '{needle}' in: {msg}")
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_default_layout() {
    let c = GradingConfig::default();
    assert_eq!(c.questions, 5);
    assert_eq!(c.choices, 5);
    assert_eq!(c.answer_key, vec![1, 2, 0, 2, 4]);
    assert_eq!(c.frame_size, Dimensions::new(700, 700));
    assert_eq!(c.sheet_size, Dimensions::new(700, 700));
    assert_eq!(c.grade_box_size, Dimensions::new(325, 150));
    assert_eq!(c.blank_rows.policy, BlankRowPolicy::Unanswered);
    assert_eq!(c.blank_rows.min_fill, 0.15);
}

#[test]
fn test_default_detection_parameters() {
    let edges = EdgeConfig::default();
    assert_eq!(edges.blur_sigma, 1.0);
    assert_eq!(edges.low_threshold, 10.0);
    assert_eq!(edges.high_threshold, 70.0);
    assert_eq!(edges.dilate_iterations, 1);

    let quads = QuadConfig::default();
    assert_eq!(quads.min_area, 50.0);
    assert_eq!(quads.poly_epsilon, 0.02);

    assert_eq!(ThresholdMethod::default(), ThresholdMethod::Fixed(170.0 / 255.0));
}

#[test]
fn test_default_validates() {
    let key = GradingConfig::default().validate().unwrap();
    assert_eq!(key.answers(), &[1, 2, 0, 2, 4]);
}

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_toml_round_trip() {
    let mut config = GradingConfig::default();
    config.binarize = ThresholdMethod::Otsu;
    config.blank_rows.policy = BlankRowPolicy::FirstChoice;

    let text = toml::to_string_pretty(&config).unwrap();
    let parsed: GradingConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_default_toml_round_trip() {
    let config = GradingConfig::default();
    let text = toml::to_string(&config).unwrap();
    let parsed: GradingConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let text = r#"
        questions = 3
        choices = 4
        answer_key = [3, 0, 1]

        [edges]
        high_threshold = 90.0
    "#;
    let config: GradingConfig = toml::from_str(text).unwrap();
    assert_eq!(config.questions, 3);
    assert_eq!(config.answer_key, vec![3, 0, 1]);
    assert_eq!(config.edges.high_threshold, 90.0);
    assert_eq!(config.edges.low_threshold, 10.0);
    assert_eq!(config.sheet_size, Dimensions::new(700, 700));
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_toml_is_default() {
    let config: GradingConfig = toml::from_str("").unwrap();
    assert_eq!(config, GradingConfig::default());
}

#[test]
fn test_config_json_serializes() {
    let json = serde_json::to_value(GradingConfig::default()).unwrap();
    assert_eq!(json["questions"], 5);
    assert_eq!(json["grade_box_size"]["width"], 325);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_zero_questions_rejected() {
    let config = GradingConfig {
        questions: 0,
        answer_key: vec![],
        ..Default::default()
    };
    assert_config_error(&config, "must be positive");
}

#[test]
fn test_min_fill_out_of_range_rejected() {
    let mut config = GradingConfig::default();
    config.blank_rows.min_fill = 1.5;
    assert_config_error(&config, "blank_rows.min_fill");
}

#[test]
fn test_key_length_mismatch_rejected() {
    let config = GradingConfig {
        answer_key: vec![1, 2, 0],
        ..Default::default()
    };
    assert_config_error(&config, "answer key has 3 entries");
}

#[test]
fn test_key_entry_out_of_range_rejected() {
    let config = GradingConfig {
        answer_key: vec![1, 2, 0, 2, 5],
        ..Default::default()
    };
    assert_config_error(&config, "question 5");
}

#[test]
fn test_zero_sheet_size_rejected() {
    let config = GradingConfig {
        sheet_size: Dimensions::new(0, 700),
        ..Default::default()
    };
    assert_config_error(&config, "sheet_size");
}

#[test]
fn test_inverted_edge_thresholds_rejected() {
    let mut config = GradingConfig::default();
    config.edges.low_threshold = 80.0;
    config.edges.high_threshold = 40.0;
    assert_config_error(&config, "edge thresholds");
}

#[test]
fn test_fixed_threshold_out_of_range_rejected() {
    let config = GradingConfig {
        binarize: ThresholdMethod::Fixed(170.0),
        ..Default::default()
    };
    assert_config_error(&config, "binarization threshold");
}

#[test]
fn test_bad_poly_epsilon_rejected() {
    let mut config = GradingConfig::default();
    config.detection.poly_epsilon = 0.0;
    assert_config_error(&config, "poly_epsilon");
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[test]
fn test_threshold_method_display() {
    assert_eq!(format!("{}", ThresholdMethod::Otsu), "Otsu");
    assert_eq!(format!("{}", ThresholdMethod::Fixed(0.5)), "Fixed (0.500)");
}

#[test]
fn test_pipeline_stage_display() {
    assert_eq!(format!("{}", PipelineStage::EdgeDetection), "Detecting edges");
    assert_eq!(format!("{}", PipelineStage::Rectification), "Rectifying sheet");
    assert_eq!(format!("{}", PipelineStage::Compositing), "Compositing");
}

#[test]
fn test_dimensions_display() {
    assert_eq!(Dimensions::new(325, 150).to_string(), "325x150");
}
