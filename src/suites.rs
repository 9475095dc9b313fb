//! Concrete [`CipherSuite`] instances.

use ark_ec::CurveGroup;
use ark_secp256k1::{Config, Projective};

use sha2::Sha256;
use zeroize::Zeroize;

use crate::ciphersuite::CipherSuite;
use crate::encoding::{sec1_decode, sec1_encode};
use crate::utils::{String, ToOwned, Vec};
use crate::SchnorrResult;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Zeroize)]
/// Schnorr signatures over Secp256k1 with SHA-256 as underlying hasher.
///
/// Points are encoded in SEC1 compressed form (33 bytes), scalars as 32-byte
/// big-endian integers.
pub struct Secp256k1Sha256;

impl CipherSuite for Secp256k1Sha256 {
    type G = Projective;

    type HashOutput = [u8; 32];

    type InnerHasher = Sha256;

    fn context_string() -> String {
        "SCHNORR-MULTIPARTY_SECP256K1_SHA256".to_owned()
    }

    fn point_to_bytes(point: &Self::G) -> SchnorrResult<Vec<u8>> {
        sec1_encode::<Config>(&point.into_affine())
    }

    fn point_from_bytes(bytes: &[u8]) -> SchnorrResult<Self::G> {
        sec1_decode::<Config>(bytes).map(Into::into)
    }
}
