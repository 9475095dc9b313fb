//! Verification of single, aggregate and threshold Schnorr signatures.

use tracing::debug;

use crate::ciphersuite::CipherSuite;
use crate::encoding::{decode_point, decode_scalar, decode_tagged_point, KeyKind};
use crate::sign::{Signature, SignatureScheme};
use crate::utils::Scalar;
use crate::SchnorrResult;

/// Verify a single-signer or n-of-n aggregate signature \\( (R, s) \\), i.e. check that
/// \\( s \cdot G = R + c \cdot \tilde{X} \\) with \\( c = H(R \Vert \tilde{X} \Vert m) \\).
///
/// With `with_coefficient` set, `apk` is the aggregated key \\( \sum a\_i X\_i \\) of
/// an n-of-n signer set; otherwise it is the public key of a single signer.
#[allow(non_snake_case)]
pub fn verify_aggregate_sign<C: CipherSuite>(
    s: &Scalar<C>,
    R: &C::G,
    apk: &C::G,
    message: &[u8],
    with_coefficient: bool,
) -> SchnorrResult<()> {
    let scheme = if with_coefficient {
        SignatureScheme::Aggregate
    } else {
        SignatureScheme::Single
    };

    Signature::<C> { R: *R, s: *s }.verify(scheme, apk, message)
}

/// Verify a threshold signature \\( (V, \sigma) \\) under the group key \\( Y \\), i.e.
/// check that \\( \sigma \cdot G = V + e \cdot Y \\) with \\( e = H(V \Vert Y \Vert m) \\).
#[allow(non_snake_case)]
pub fn verify_threshold_sign<C: CipherSuite>(
    sigma: &Scalar<C>,
    Y: &C::G,
    V: &C::G,
    message: &[u8],
) -> SchnorrResult<()> {
    Signature::<C> { R: *V, s: *sigma }.verify(SignatureScheme::Threshold, Y, message)
}

/// Find which scheme, if any, an encoded signature verifies under.
///
/// `signature` is the encoded scalar \\( s \\) (or \\( \sigma \\)), `r_or_v` the
/// encoded nonce and `public_key` the encoded key, possibly tagged with its
/// [`KeyKind`]. The scheme announced by the tag is tried first, then single,
/// aggregate and threshold in this order; the first one that verifies is
/// returned.
///
/// This is a diagnostic helper. It must not be used to decide which scheme a
/// signature is expected to satisfy.
pub fn verify_auto<C: CipherSuite>(
    signature: &[u8],
    r_or_v: &[u8],
    public_key: &[u8],
    message: &[u8],
) -> Option<SignatureScheme> {
    let s = decode_scalar::<C>(signature).ok()?;
    let nonce = decode_point::<C>(r_or_v).ok()?;
    let (kind, public_key) = decode_tagged_point::<C>(public_key).ok()?;

    let hinted = match kind {
        KeyKind::Single => SignatureScheme::Single,
        KeyKind::Aggregate => SignatureScheme::Aggregate,
        KeyKind::Threshold => SignatureScheme::Threshold,
    };

    let signature = Signature::<C> { R: nonce, s };
    let scheme = [
        hinted,
        SignatureScheme::Single,
        SignatureScheme::Aggregate,
        SignatureScheme::Threshold,
    ]
    .into_iter()
    .find(|scheme| signature.verify(*scheme, &public_key, message).is_ok());

    debug!(?kind, ?scheme, "automatic verification");

    scheme
}
