use pretty_assertions::assert_eq;

use git_pretty::{color, error::Render, ColorPolicy, Options};

use crate::fixtures::{expand, expand_with, record};

fn with_color(policy: ColorPolicy) -> Options<'static> {
    Options {
        color: policy,
        ..Options::default()
    }
}

#[test]
fn parses_names_attributes_and_values() {
    assert_eq!(color::parse("red").unwrap(), "\x1b[31m");
    assert_eq!(color::parse("bold red").unwrap(), "\x1b[1;31m");
    assert_eq!(color::parse("red green").unwrap(), "\x1b[31;42m");
    assert_eq!(color::parse("brightcyan").unwrap(), "\x1b[96m");
    assert_eq!(color::parse("ul brightred black").unwrap(), "\x1b[4;91;40m");
    assert_eq!(color::parse("12").unwrap(), "\x1b[38;5;12m");
    assert_eq!(color::parse("#ff0000").unwrap(), "\x1b[38;2;255;0;0m");
    assert_eq!(color::parse("default").unwrap(), "\x1b[39m");
    assert_eq!(color::parse("reset").unwrap(), color::RESET);
    // "normal" selects no color at all.
    assert_eq!(color::parse("normal").unwrap(), "");
    assert_eq!(color::parse("normal blue").unwrap(), "\x1b[44m");
}

#[test]
fn rejects_unknown_words() {
    assert_eq!(color::parse("bogus"), None);
    assert_eq!(color::parse("#ff00"), None);
    assert_eq!(color::parse("red green blue"), None);
    assert_eq!(color::parse(""), None);
}

#[test]
fn parenthesized_directive_emits_escapes() {
    let out = expand_with(
        "%C(red)x%C(reset)",
        &record(),
        &with_color(ColorPolicy::Always),
    )
    .unwrap();
    assert_eq!(out, "\x1b[31mx\x1b[m");
}

#[test]
fn auto_modifier_respects_the_policy() {
    let record = record();
    assert_eq!(
        expand_with("%C(auto,red)x", &record, &with_color(ColorPolicy::Always)).unwrap(),
        "\x1b[31mx"
    );
    // Default policy on a non-tty: gated out, but still consumed.
    assert_eq!(expand("%C(auto,red)x", &record).unwrap(), "x");
}

#[test]
fn legacy_tokens_respect_the_policy() {
    let record = record();
    assert_eq!(
        expand_with("%Credx", &record, &with_color(ColorPolicy::Always)).unwrap(),
        "\x1b[31mx"
    );
    assert_eq!(
        expand_with("%Credx", &record, &with_color(ColorPolicy::Never)).unwrap(),
        "x"
    );
}

#[test]
fn auto_mode_resets_previous_color() {
    let record = record();
    let out = expand_with(
        "%CgreenA%C(auto)B",
        &record,
        &with_color(ColorPolicy::Always),
    )
    .unwrap();
    assert_eq!(out, "\x1b[32mA\x1b[mB");
    // When color is off, %C(auto) is a no-op.
    assert_eq!(expand("%CgreenA%C(auto)B", &record).unwrap(), "AB");
}

#[test]
fn auto_mode_at_start_emits_no_reset() {
    let out = expand_with("%C(auto)x", &record(), &with_color(ColorPolicy::Always)).unwrap();
    assert_eq!(out, "x");
}

#[test]
fn unterminated_directive_renders_literally() {
    assert_eq!(expand("%C(red", &record()).unwrap(), "%C(red");
}

#[test]
fn bad_color_spec_is_fatal() {
    assert_eq!(
        expand("%C(bogus)", &record()),
        Err(Render::InvalidFormatDirective("C(bogus)".to_string()))
    );
    assert_eq!(
        expand("%Cx", &record()),
        Err(Render::InvalidFormatDirective("C".to_string()))
    );
}
