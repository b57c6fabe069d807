use pretty_assertions::assert_eq;

use git_pretty::wrap::{parse, WrapSpec};

use crate::fixtures::{expand, record};

#[test]
fn parses_optional_fields() {
    let (spec, consumed) = parse("w(16,2,4)").unwrap();
    assert_eq!(
        spec,
        WrapSpec {
            width: 16,
            indent_first: 2,
            indent_rest: 4,
        }
    );
    assert_eq!(consumed, 9);

    let (spec, consumed) = parse("w(8)").unwrap();
    assert_eq!(spec.width, 8);
    assert_eq!(consumed, 4);

    // Empty fields default to zero.
    let (spec, _) = parse("w(,4)").unwrap();
    assert_eq!((spec.width, spec.indent_first, spec.indent_rest), (0, 4, 0));
    let (spec, _) = parse("w()").unwrap();
    assert_eq!(spec, WrapSpec::default());
}

#[test]
fn rejects_malformed_directives() {
    assert_eq!(parse("w(8"), None);
    assert_eq!(parse("w(a)"), None);
    assert_eq!(parse("w(1,2,3,4)"), None);
}

#[test]
fn wraps_the_following_output() {
    let out = expand("%w(8)alpha beta gam", &record()).unwrap();
    assert_eq!(out, "alpha\nbeta gam");
}

#[test]
fn repeating_the_same_spec_is_idempotent() {
    let record = record();
    let once = expand("%w(8)alpha beta gam", &record).unwrap();
    let twice = expand("%w(8)%w(8)alpha beta gam", &record).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn spec_change_flushes_the_pending_region() {
    // The first region wraps under the old width; text after %w(0) is
    // left alone.
    let out = expand("%w(8)alpha beta gam%w(0)next one", &record()).unwrap();
    assert_eq!(out, "alpha\nbeta gamnext one");
}

#[test]
fn indents_without_wrapping() {
    let out = expand("%w(0,4,2)one%ntwo", &record()).unwrap();
    assert_eq!(out, "    one\n  two");
}

#[test]
fn wraps_placeholder_output_too() {
    // "Fix loop" breaks after "Fix" at width 4.
    let out = expand("%w(4)%s", &record()).unwrap();
    assert_eq!(out, "Fix\nloop");
}

#[test]
fn malformed_directive_renders_literally() {
    assert_eq!(
        expand("%w(1,2,3,4)x", &record()).unwrap(),
        "%w(1,2,3,4)x"
    );
    assert_eq!(expand("%w(8", &record()).unwrap(), "%w(8");
}
