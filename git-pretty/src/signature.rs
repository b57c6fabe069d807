//! GPG signature status: the verifier seam and the `%G` placeholder
//! data it produces.
//!
//! Verification is expensive, so the render context runs it at most
//! once per record and caches the [`SignatureStatus`]; every further
//! `%G*` placeholder reads the cache.

use std::fmt;

use git2::Oid;

/// The outcome of verifying one signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureResult {
    /// No signature present (or checks disabled).
    Missing,
    /// A good signature.
    Good,
    /// A bad signature.
    Bad,
    /// A good signature that has expired.
    GoodExpired,
    /// A good signature made by an expired key.
    GoodExpiredKey,
    /// A good signature made by a revoked key.
    GoodRevokedKey,
    /// The signature could not be checked (e.g. missing key).
    CannotCheck,
}

/// How much the verifier trusts the signing key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum TrustLevel {
    #[default]
    Undefined,
    Never,
    Marginal,
    Fully,
    Ultimate,
}

impl TrustLevel {
    /// The spelled-out word `%GT` renders.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Never => "never",
            Self::Marginal => "marginal",
            Self::Fully => "fully",
            Self::Ultimate => "ultimate",
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the `%G` placeholders can render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureStatus {
    /// Verification outcome.
    pub result: SignatureResult,
    /// Display name of the signer.
    pub signer: String,
    /// Key id the signature was made with.
    pub key: String,
    /// Full fingerprint of that key.
    pub fingerprint: String,
    /// Fingerprint of the primary key.
    pub primary_fingerprint: String,
    /// Trust in the signing key.
    pub trust: TrustLevel,
    /// The raw verification output (`%GG`).
    pub raw: String,
}

impl Default for SignatureStatus {
    fn default() -> Self {
        Self {
            result: SignatureResult::Missing,
            signer: String::new(),
            key: String::new(),
            fingerprint: String::new(),
            primary_fingerprint: String::new(),
            trust: TrustLevel::Undefined,
            raw: String::new(),
        }
    }
}

impl SignatureStatus {
    /// The single-character status code of `%G?`. A good signature from
    /// a key with undefined or never trust gets its own letter.
    pub fn letter(&self) -> char {
        match self.result {
            SignatureResult::Good => match self.trust {
                TrustLevel::Undefined | TrustLevel::Never => 'U',
                _ => 'G',
            },
            SignatureResult::Bad => 'B',
            SignatureResult::GoodExpired => 'X',
            SignatureResult::GoodExpiredKey => 'Y',
            SignatureResult::GoodRevokedKey => 'R',
            SignatureResult::CannotCheck => 'E',
            SignatureResult::Missing => 'N',
        }
    }
}

/// The signature-verification seam. Implementations typically shell out
/// to gpg; tests inject stubs.
pub trait Verify {
    /// Verify the signature of the raw commit object `commit`. `None`
    /// means the commit carries no signature.
    fn verify(&self, id: Oid, commit: &str) -> Option<SignatureStatus>;
}
