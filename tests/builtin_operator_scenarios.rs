use form_validate::{FieldContext, FieldDisplayState, Page, Result};

use FieldDisplayState::{Invalid, Valid};

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Validates a single `<input id="x">` built from the given rules and value.
fn input_state(rules: &str, value: &str) -> Result<FieldDisplayState> {
    let html = format!(
        r#"<form id="f"><input id="x" data-validate="{}" value="{}"></form>"#,
        escape_attr(rules),
        escape_attr(value)
    );
    let mut page = Page::from_html(&html)?;
    page.validate("#x", None)?;
    page.display_state("#x")
}

fn assert_table(cases: &[(&str, &str, FieldDisplayState)]) -> Result<()> {
    for (rules, value, expected) in cases {
        let actual = input_state(rules, value)?;
        assert_eq!(actual, *expected, "{value:?} against {rules:?}");
    }
    Ok(())
}

fn state_of(html: &str, selector: &str) -> Result<FieldDisplayState> {
    let mut page = Page::from_html(html)?;
    page.validate(selector, None)?;
    page.display_state(selector)
}

#[test]
fn required_text() -> Result<()> {
    assert_table(&[
        ("required", "", Invalid),
        ("required", "   ", Invalid),
        ("required", "1414141414", Valid),
    ])
}

#[test]
fn required_checkbox() -> Result<()> {
    assert_eq!(
        state_of(
            r#"<input id="c" type="checkbox" data-validate="required">"#,
            "#c"
        )?,
        Invalid
    );
    assert_eq!(
        state_of(
            r#"<input id="c" type="checkbox" data-validate="required" checked="checked">"#,
            "#c"
        )?,
        Valid
    );
    Ok(())
}

#[test]
fn required_radio_group() -> Result<()> {
    let none_checked = r#"
        <input id="a" type="radio" name="g" data-validate="required">
        <input id="b" type="radio" name="g" data-validate="required">
    "#;
    assert_eq!(state_of(none_checked, "#a")?, Invalid);
    assert_eq!(state_of(none_checked, "#b")?, Invalid);

    let first_checked = r#"
        <input id="a" type="radio" name="g" data-validate="required" checked="checked">
        <input id="b" type="radio" name="g" data-validate="required">
    "#;
    assert_eq!(state_of(first_checked, "#a")?, Valid);
    assert_eq!(state_of(first_checked, "#b")?, Valid);

    let second_checked = r#"
        <input id="a" type="radio" name="g" data-validate="required">
        <input id="b" type="radio" name="g" data-validate="required" checked="checked">
    "#;
    assert_eq!(state_of(second_checked, "#a")?, Valid);
    assert_eq!(state_of(second_checked, "#b")?, Valid);
    Ok(())
}

#[test]
fn required_select() -> Result<()> {
    assert_eq!(
        state_of(r#"<select id="s" data-validate="required"></select>"#, "#s")?,
        Invalid
    );
    assert_eq!(
        state_of(
            r#"<select id="s" data-validate="required"><option value="">none</option><option value="one">one</option></select>"#,
            "#s"
        )?,
        Invalid
    );
    assert_eq!(
        state_of(
            r#"<select id="s" data-validate="required"><option value="">none</option><option value="one" selected="selected">one</option></select>"#,
            "#s"
        )?,
        Valid
    );
    Ok(())
}

#[test]
fn date_format() -> Result<()> {
    assert_table(&[
        ("date", "NotADate", Invalid),
        ("date", "2014-10-27", Valid),
        ("date", "2014-02-29", Invalid),
        ("date", "2016-02-29", Valid),
    ])
}

#[test]
fn number_formats() -> Result<()> {
    assert_table(&[
        ("number", "NotANumber", Invalid),
        ("number", "-1234", Valid),
        ("number", "1234", Valid),
        ("number", "-12.34", Valid),
        ("number", "12.34", Valid),
        ("number", "-12e34", Valid),
        ("number", "12e34", Valid),
        ("number:integer", "-1234", Valid),
        ("number:integer", "1234", Valid),
        ("number:integer", "-12.34", Invalid),
        ("number:integer", "12.34", Invalid),
        ("number:integer", "-12e34", Valid),
        ("number:integer", "12e34", Valid),
    ])
}

#[test]
fn regexp_modifiers() -> Result<()> {
    assert_table(&[
        (r"regexp:i:^a-\d-\d-\d$", "a-1-2-3", Valid),
        (r"regexp:i:^a-\d-\d-\d$", "A-1-2-3", Valid),
        (r"regexp::^a-\d-\d-\d$", "A-1-2-3", Invalid),
        (r"regexp:i:^a-\d-\d-\d$", "whatever", Invalid),
    ])
}

#[test]
fn equality() -> Result<()> {
    assert_table(&[
        ("eq:123", "123", Valid),
        ("eq:123", "1234", Invalid),
        ("eq:test", "test", Valid),
        ("eq:test", "testing", Invalid),
        ("eq:4", "test", Valid),
        ("neq:123", "123", Invalid),
        ("neq:123", "1234", Valid),
        ("neq:test", "test", Invalid),
        ("neq:test", "testing", Valid),
        ("neq:4", "test", Invalid),
        ("neq:4", "testing", Valid),
    ])
}

#[test]
fn ordering() -> Result<()> {
    assert_table(&[
        ("lt:1234", "123", Valid),
        ("lt:1234", "-12.3", Valid),
        ("lt:1234", "12345", Invalid),
        ("lt:-123", "123", Invalid),
        ("lt:5", "test", Valid),
        ("lt:3", "test", Invalid),
        ("lte:123", "123", Valid),
        ("lte:1234", "123", Valid),
        ("lte:1234", "12345", Invalid),
        ("lte:-123", "123", Invalid),
        ("lte:test", "test", Valid),
        ("lte:5", "test", Valid),
        ("lte:4", "test", Valid),
        ("lte:3", "test", Invalid),
        ("gt:12", "123", Valid),
        ("gt:-12.3", "123", Valid),
        ("gt:1234", "123", Invalid),
        ("gt:123", "-123", Invalid),
        ("gt:3", "test", Valid),
        ("gt:4", "test", Invalid),
        ("gte:123", "123", Valid),
        ("gte:12", "123", Valid),
        ("gte:1234", "123", Invalid),
        ("gte:123", "-123", Invalid),
        ("gte:test", "test", Valid),
        ("gte:4", "test", Valid),
        ("gte:3", "test", Valid),
        ("gte:5", "test", Invalid),
    ])
}

#[test]
fn comparison_with_another_input() -> Result<()> {
    let html = |rule: &str, other: &str| {
        format!(
            r#"<input id="other" value="{other}"><input id="x" value="test" data-validate="{rule}">"#
        )
    };
    assert_eq!(state_of(&html("eq:#other", "test"), "#x")?, Valid);
    assert_eq!(state_of(&html("neq:#other", "test"), "#x")?, Invalid);
    assert_eq!(state_of(&html("neq:#other", "testing"), "#x")?, Valid);
    Ok(())
}

#[test]
fn custom_operator_registered_at_runtime() -> Result<()> {
    for (value, expected) in [("whatever", Valid), ("test", Invalid)] {
        let html = format!(r#"<input id="x" data-validate="customTest1" value="{value}">"#);
        let mut page = Page::from_html(&html)?;
        page.validator_mut()
            .register_fn("customTest1", |field, state, _args| {
                state.require(field.value() == "whatever");
                Ok(())
            });
        page.validate("#x", None)?;
        assert_eq!(page.display_state("#x")?, expected, "{value:?}");
    }
    Ok(())
}
