use std::borrow::Cow;

use thyro_client::normalize::normalize_nan;

#[test]
fn bare_nan_becomes_null() {
    let text = r#"{"probability": NaN, "values": [1, NaN,NaN]}"#;
    assert_eq!(
        normalize_nan(text),
        r#"{"probability": null, "values": [1, null,null]}"#
    );
}

#[test]
fn string_literals_are_untouched() {
    let text = r#"{"message": "got NaN from \"NaN\" input", "x": NaN}"#;
    assert_eq!(
        normalize_nan(text),
        r#"{"message": "got NaN from \"NaN\" input", "x": null}"#
    );
}

#[test]
fn partial_tokens_are_untouched() {
    let text = r#"{"NaNa": 1, "y": NaNx}"#;
    assert!(matches!(normalize_nan(text), Cow::Borrowed(_)));
}

#[test]
fn clean_text_is_borrowed() {
    assert!(matches!(normalize_nan(r#"{"a": 1}"#), Cow::Borrowed(_)));
}
