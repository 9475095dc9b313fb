use core::fmt::Debug;
use core::marker::{Send, Sync};

use zeroize::Zeroize;

use ark_ec::CurveGroup;

use crate::sign::SignatureScheme;
use crate::utils::{Scalar, String, Vec};
use crate::SchnorrResult;
use digest::{Digest, DynDigest};

/// A trait defining the prime-order group of operation, the cryptographic hash function,
/// and the byte encoding of group elements of a Schnorr signing deployment.
///
/// Every random oracle of the crate is instantiated from `InnerHasher` through
/// `expand_message_xmd` hash-to-field with a 128-bit security target, and is
/// domain-separated by [`CipherSuite::context_string`] followed by a per-oracle label.
pub trait CipherSuite: Copy + Clone + PartialEq + Eq + Debug + Send + Sync + Zeroize {
    /// The prime-order group on which this [`CipherSuite`] operates.
    type G: CurveGroup;

    /// A byte array of a given length for this [`CipherSuite`]'s binary hashers.
    type HashOutput: AsRef<[u8]> + AsMut<[u8]> + Default + Clone + Debug;

    /// The underlying hasher used to construct all random oracles of this [`CipherSuite`] .
    type InnerHasher: Default + Clone + Digest + DynDigest;

    //////////////////////////////////////////////////////////////////////////////////////////////

    // Required methods

    /// A method returning this [`CipherSuite`]'s custom context string, to be used in the different
    /// random oracles of the signing schemes.
    fn context_string() -> String;

    /// Encode a group element to its fixed-length byte representation.
    ///
    /// This encoding is hashed into binding coefficients and challenges, so it must be
    /// fixed once per deployment. Encoding the identity must fail.
    fn point_to_bytes(point: &Self::G) -> SchnorrResult<Vec<u8>>;

    /// Decode a group element from its byte representation, rejecting malformed
    /// encodings, points outside the prime-order group, and the identity.
    fn point_from_bytes(bytes: &[u8]) -> SchnorrResult<Self::G>;

    ///////////////////////////////////////////////////////////////////////////////////////////////

    // Provided methods

    /// `h_coefficient` hash for this [`CipherSuite`] .
    ///
    /// The context string for `h_coefficient` is this [`CipherSuite`]'s `CONTEXT_STRING`,
    /// concatenated with "coefficient".
    ///
    /// It is used to compute the binding coefficient \\( a\_i = H(L, X\_i) \\) of each
    /// signer of an n-of-n aggregate signature.
    fn h_coefficient(m: &[u8]) -> Scalar<Self> {
        crate::utils::hash_to_field::<Self>((Self::context_string() + "coefficient").as_bytes(), m)
    }

    /// `h_challenge` hash for this [`CipherSuite`] .
    ///
    /// The context string for `h_challenge` is this [`CipherSuite`]'s `CONTEXT_STRING`,
    /// concatenated with the label of the signature `scheme`.
    ///
    /// It is used to compute the Fiat-Shamir challenge \\( c = H(R \Vert P \Vert m) \\).
    fn h_challenge(scheme: SignatureScheme, m: &[u8]) -> Scalar<Self> {
        crate::utils::hash_to_field::<Self>(
            (Self::context_string() + scheme.challenge_label()).as_bytes(),
            m,
        )
    }

    /// `h_nonce` hash for this [`CipherSuite`] .
    ///
    /// The context string for `h_nonce` is this [`CipherSuite`]'s `CONTEXT_STRING`,
    /// concatenated with "nonce".
    ///
    /// It is used to derive ephemeral keys deterministically from a long-term key.
    fn h_nonce(m: &[u8]) -> Scalar<Self> {
        crate::utils::hash_to_field::<Self>((Self::context_string() + "nonce").as_bytes(), m)
    }

    /// `h_commitment` hash for this [`CipherSuite`] .
    ///
    /// The context string for `h_commitment` is this [`CipherSuite`]'s `CONTEXT_STRING`,
    /// concatenated with "commitment".
    ///
    /// It is used to commit to a nonce or a dealer's public key before revealing it.
    fn h_commitment(m: &[u8]) -> Self::HashOutput {
        crate::utils::hash_to_array::<Self>((Self::context_string() + "commitment").as_bytes(), m)
    }
}
