use std::time::Duration;

use wrap_label::{
    CellFont, CellMeasurer, Extent, FnMeasurer, MeasureError, Strategy, WrapError, WrapOptions,
    WrapSelector, WrappedLabel,
};

const FONT: CellFont = CellFont::new(1, 1);

/// One pixel per character at size 1; any line containing "boom" or any
/// zero-sized font is rejected.
fn picky_measurer() -> FnMeasurer<impl Fn(&str, &u32) -> Result<Extent, MeasureError>, u32> {
    FnMeasurer::new(|line: &str, size: &u32| {
        if *size == 0 {
            return Err(MeasureError::new(line, "font size is zero"));
        }
        if line.contains("boom") {
            return Err(MeasureError::new(line, "glyph missing"));
        }
        Ok(Extent::new(line.chars().count() as u32 * size, 2 * size))
    })
}

#[test]
fn test_invalid_arguments_are_rejected() {
    let selector = WrapSelector::new(&CellMeasurer, WrapOptions::default());

    let cases = [
        ("aa bb", 0, 2, "max_width must be positive"),
        ("aa bb", 10, 0, "max_rows must be at least 1"),
        ("", 10, 2, "text has no words"),
        (" \t\n ", 10, 2, "text has no words"),
    ];
    for (text, max_width, max_rows, reason) in cases {
        let err = selector.select(text, max_width, &FONT, max_rows).unwrap_err();
        assert_eq!(err, WrapError::InvalidArgument(reason), "{text:?}");
    }
}

#[test]
fn test_measurement_failure_names_the_line() {
    let measurer = picky_measurer();
    let selector = WrapSelector::new(&measurer, WrapOptions::default());

    let err = selector.select("aa boom cc", 20, &1, 2).unwrap_err();
    match err {
        WrapError::Measurement(inner) => {
            assert!(inner.line.contains("boom"));
            assert_eq!(inner.reason, "glyph missing");
        }
        other => panic!("expected a measurement error, got {other:?}"),
    }
}

#[test]
fn test_measurement_failure_in_both_strategies() {
    let measurer = picky_measurer();
    for strategy in [Strategy::Exhaustive, Strategy::Dynamic] {
        let selector = WrapSelector::new(&measurer, WrapOptions::default().strategy(strategy));
        let result = selector.select("aa bb boom", 5, &1, 3);
        assert!(
            matches!(result, Err(WrapError::Measurement(_))),
            "{strategy} returned {result:?}"
        );
    }
}

#[test]
fn test_zero_timeout_cancels_both_strategies() {
    let text = "lorem ipsum dolor sit amet ".repeat(10);
    for strategy in [Strategy::Exhaustive, Strategy::Dynamic] {
        let options = WrapOptions::default()
            .strategy(strategy)
            .timeout(Duration::ZERO);
        let result = WrapSelector::new(&CellMeasurer, options).select(&text, 30, &FONT, 10);
        assert!(
            matches!(result, Err(WrapError::Cancelled { .. })),
            "{strategy} returned {result:?}"
        );
    }
}

#[test]
fn test_generous_timeout_still_selects() {
    let options = WrapOptions::default().timeout(Duration::from_secs(60));
    let layout = WrapSelector::new(&CellMeasurer, options)
        .select("aa bb cc", 5, &FONT, 2)
        .unwrap();
    assert_eq!(layout.lines(), vec!["aa bb", "cc"]);
}

#[test]
fn test_label_keeps_state_after_invalid_change() {
    let mut label = WrappedLabel::new(
        CellMeasurer,
        FONT,
        "aa bb cc",
        5,
        2,
        WrapOptions::default(),
    )
    .unwrap();
    let before = label.layout().clone();

    assert!(label.set_max_rows(0).is_err());
    assert!(label.resize(0).is_err());
    assert!(label.set_text("   ").is_err());

    assert_eq!(label.text(), "aa bb cc");
    assert_eq!(label.max_width(), 5);
    assert_eq!(label.max_rows(), 2);
    assert_eq!(label.layout(), &before);
}

#[test]
fn test_label_keeps_state_after_measurement_failure() {
    let mut label =
        WrappedLabel::new(picky_measurer(), 1, "aa bb", 10, 2, WrapOptions::default()).unwrap();

    let err = label.set_text("aa boom").unwrap_err();
    assert!(matches!(err, WrapError::Measurement(_)));
    assert_eq!(label.text(), "aa bb");

    let err = label.set_font(0).unwrap_err();
    assert!(matches!(err, WrapError::Measurement(_)));
    assert_eq!(*label.font(), 1);
    assert_eq!(label.lines(), vec!["aa bb"]);
    assert_eq!(label.extent(), Extent::new(5, 2));
}

#[test]
fn test_error_messages() {
    let err = WrapSelector::new(&CellMeasurer, WrapOptions::default())
        .select("aa", 10, &FONT, 0)
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument: max_rows must be at least 1");

    let measurer = picky_measurer();
    let err = WrapSelector::new(&measurer, WrapOptions::default())
        .select("boom", 10, &1, 1)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Measurement failed: cannot measure \"boom\": glyph missing"
    );
}
