use pretty_assertions::assert_eq;

use git_pretty::align::{parse, AlignmentSpec, Flush, Truncate, Width};

use crate::fixtures::{expand, record};

#[test]
fn parses_the_four_anchors() {
    let (spec, consumed) = parse("<(10)", 80).unwrap();
    assert_eq!(
        spec,
        AlignmentSpec {
            flush: Flush::Right,
            truncate: Truncate::None,
            width: Width::Chars(10),
        }
    );
    assert_eq!(consumed, 5);

    assert_eq!(parse(">(10)", 80).unwrap().0.flush, Flush::Left);
    assert_eq!(parse(">>(6)", 80).unwrap().0.flush, Flush::LeftAndSteal);
    assert_eq!(parse("><(8)", 80).unwrap().0.flush, Flush::Both);
}

#[test]
fn parses_truncation_and_consumed_counts() {
    let (spec, consumed) = parse("<(10,trunc)", 80).unwrap();
    assert_eq!(spec.truncate, Truncate::Right);
    assert_eq!(consumed, 11);

    assert_eq!(parse("<(10,ltrunc)", 80).unwrap().0.truncate, Truncate::Left);
    assert_eq!(
        parse("<(10,mtrunc)", 80).unwrap().0.truncate,
        Truncate::Middle
    );

    let (spec, consumed) = parse(">|(20)", 80).unwrap();
    assert_eq!(spec.width, Width::AtColumn(20));
    assert_eq!(consumed, 6);
}

#[test]
fn negative_column_resolves_against_the_terminal() {
    let (spec, _) = parse(">|(-70)", 80).unwrap();
    assert_eq!(spec.width, Width::AtColumn(10));
    // Still negative after adding the terminal width: rejected.
    assert_eq!(parse(">|(-100)", 80), None);
}

#[test]
fn rejects_malformed_directives() {
    assert_eq!(parse("<(10", 80), None);
    assert_eq!(parse("<(ten)", 80), None);
    assert_eq!(parse("<(10,bogus)", 80), None);
    assert_eq!(parse("<10)", 80), None);
}

#[test]
fn pads_on_the_requested_side() {
    let record = record();
    assert_eq!(expand("%<(10)%s", &record).unwrap(), "Fix loop  ");
    assert_eq!(expand("%>(10)%s", &record).unwrap(), "  Fix loop");
    assert_eq!(expand("%><(12)%s", &record).unwrap(), "  Fix loop  ");
}

#[test]
fn truncates_on_overflow() {
    let record = record();
    assert_eq!(expand("%<(6,trunc)%s", &record).unwrap(), "Fix ..");
    assert_eq!(expand("%<(6,ltrunc)%s", &record).unwrap(), "..loop");
    assert_eq!(expand("%<(6,mtrunc)%s", &record).unwrap(), "Fi..op");
    // Without a truncation policy the overflow is left alone.
    assert_eq!(expand("%<(6)%s", &record).unwrap(), "Fix loop");
}

#[test]
fn steals_trailing_spaces_on_overflow() {
    assert_eq!(expand("x %>>(6)%s", &record()).unwrap(), "xFix loop");
}

#[test]
fn column_forms_measure_from_the_line_start() {
    let record = record();
    assert_eq!(expand("ab%>|(12)%s", &record).unwrap(), "ab  Fix loop");
    // A newline resets the column origin.
    assert_eq!(
        expand("ab%n%>|(10)%s", &record).unwrap(),
        "ab\n  Fix loop"
    );
}

#[test]
fn alignment_survives_interleaved_state_directives() {
    // %C(auto) only mutates state; the pending alignment still applies
    // to the next content placeholder.
    assert_eq!(
        expand("%<(10)%C(auto)%s", &record()).unwrap(),
        "Fix loop  "
    );
}

#[test]
fn applies_to_one_placeholder_only() {
    assert_eq!(expand("%>(10)%s:%s", &record()).unwrap(), "  Fix loop:Fix loop");
}

#[test]
fn malformed_directive_renders_literally() {
    let record = record();
    assert_eq!(expand("%<(10", &record).unwrap(), "%<(10");
    assert_eq!(
        expand("%<(10,bogus)%s", &record).unwrap(),
        "%<(10,bogus)Fix loop"
    );
}
