use std::cell::Cell;

use git2::Oid;
use pretty_assertions::assert_eq;

use git_pretty::{
    error::Render, Options, SignatureResult, SignatureStatus, TrustLevel, Verify,
};

use crate::fixtures::{expand, expand_with, record, reflog_only};

struct StubVerify {
    calls: Cell<usize>,
    status: Option<SignatureStatus>,
}

impl StubVerify {
    fn returning(status: Option<SignatureStatus>) -> Self {
        Self {
            calls: Cell::new(0),
            status,
        }
    }
}

impl Verify for StubVerify {
    fn verify(&self, _id: Oid, _commit: &str) -> Option<SignatureStatus> {
        self.calls.set(self.calls.get() + 1);
        self.status.clone()
    }
}

fn good_status() -> SignatureStatus {
    SignatureStatus {
        result: SignatureResult::Good,
        signer: "Ada Lovelace <ada@example.com>".to_string(),
        key: "4AEE18F83AFDEB23".to_string(),
        fingerprint: "5DE3E0509C47EA3CF04A42D34AEE18F83AFDEB23".to_string(),
        primary_fingerprint: "5DE3E0509C47EA3CF04A42D34AEE18F83AFDEB23".to_string(),
        trust: TrustLevel::Fully,
        raw: "gpg: Good signature".to_string(),
    }
}

fn with_verify(verify: &dyn Verify) -> Options<'_> {
    Options {
        verify: Some(verify),
        ..Options::default()
    }
}

#[test]
fn status_letters() {
    let stub = StubVerify::returning(Some(good_status()));
    assert_eq!(
        expand_with("%G?", &record(), &with_verify(&stub)).unwrap(),
        "G"
    );

    let stub = StubVerify::returning(Some(SignatureStatus {
        trust: TrustLevel::Undefined,
        ..good_status()
    }));
    assert_eq!(
        expand_with("%G?", &record(), &with_verify(&stub)).unwrap(),
        "U"
    );

    let stub = StubVerify::returning(Some(SignatureStatus {
        result: SignatureResult::Bad,
        ..good_status()
    }));
    assert_eq!(
        expand_with("%G?", &record(), &with_verify(&stub)).unwrap(),
        "B"
    );
}

#[test]
fn fields_come_from_the_verifier() {
    let stub = StubVerify::returning(Some(good_status()));
    let out = expand_with("%GS|%GK|%GT", &record(), &with_verify(&stub)).unwrap();
    assert_eq!(out, "Ada Lovelace <ada@example.com>|4AEE18F83AFDEB23|fully");

    let out = expand_with("%GF=%GP", &record(), &with_verify(&stub)).unwrap();
    assert_eq!(
        out,
        "5DE3E0509C47EA3CF04A42D34AEE18F83AFDEB23=5DE3E0509C47EA3CF04A42D34AEE18F83AFDEB23"
    );
}

#[test]
fn verification_runs_once_per_record() {
    let stub = StubVerify::returning(Some(good_status()));
    let out = expand_with("%G?%G?%GK", &record(), &with_verify(&stub)).unwrap();
    assert_eq!(out, "GG4AEE18F83AFDEB23");
    assert_eq!(stub.calls.get(), 1);
}

#[test]
fn unsigned_commit_renders_as_missing() {
    let stub = StubVerify::returning(None);
    let out = expand_with("%G?%GS%GK%GG", &record(), &with_verify(&stub)).unwrap();
    assert_eq!(out, "N");
    assert_eq!(stub.calls.get(), 1);
}

#[test]
fn no_verifier_renders_as_missing() {
    assert_eq!(expand("%G?", &record()).unwrap(), "N");
    assert_eq!(expand("%GS-%GK-%GF-%GP-%GG", &record()).unwrap(), "----");
    assert_eq!(expand("%GT", &record()).unwrap(), "undefined");
}

#[test]
fn reflog_only_record_is_never_verified() {
    let stub = StubVerify::returning(Some(good_status()));
    let out = expand_with("%G?", &reflog_only(), &with_verify(&stub)).unwrap();
    assert_eq!(out, "N");
    assert_eq!(stub.calls.get(), 0);
}

#[test]
fn unknown_signature_code_is_fatal() {
    assert_eq!(
        expand("%GZ", &record()),
        Err(Render::InvalidFormatDirective("GZ".to_string()))
    );
}
