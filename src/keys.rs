//! Long-term and ephemeral key pairs of a single party.

use core::fmt::Debug;

use ark_ec::Group;
use ark_ff::{UniformRand, Zero};

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::ciphersuite::CipherSuite;
use crate::encoding::{decode_scalar, encode_point, encode_scalar};
use crate::error::DecodeFailure;
use crate::sign::{compute_challenge, Signature, SignatureScheme};
use crate::utils::{Scalar, Vec};
use crate::SchnorrResult;

/// Draw a scalar uniformly from \\( [1, q-1] \\).
pub(crate) fn random_nonzero_scalar<C: CipherSuite>(
    mut rng: impl RngCore + CryptoRng,
) -> Scalar<C> {
    loop {
        let scalar = Scalar::<C>::rand(&mut rng);
        if !scalar.is_zero() {
            return scalar;
        }
    }
}

/// The long-term key of a single party: a secret scalar \\( x \\) and its
/// public key \\( X = x \cdot G \\).
///
/// The secret is overwritten with zeroes when the [`KeyPair`] falls out of scope.
#[derive(Clone)]
pub struct KeyPair<C: CipherSuite> {
    pub(crate) secret: Scalar<C>,
    pub(crate) public: C::G,
}

impl<C: CipherSuite> Debug for KeyPair<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl<C: CipherSuite> Drop for KeyPair<C> {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl<C: CipherSuite> KeyPair<C> {
    /// Generate a new [`KeyPair`] from a secret drawn uniformly from \\( [1, q-1] \\).
    pub fn generate(rng: impl RngCore + CryptoRng) -> Self {
        Self::from_secret_scalar(random_nonzero_scalar::<C>(rng))
    }

    /// Reconstruct a [`KeyPair`] from an externally supplied big-endian secret.
    ///
    /// Fails if the bytes do not encode a scalar in \\( [1, q-1] \\).
    pub fn from_secret(secret_bytes: &[u8]) -> SchnorrResult<Self> {
        let secret = decode_scalar::<C>(secret_bytes)?;
        if secret.is_zero() {
            return Err(DecodeFailure::ZeroSecret.into());
        }

        Ok(Self::from_secret_scalar(secret))
    }

    pub(crate) fn from_secret_scalar(secret: Scalar<C>) -> Self {
        Self {
            secret,
            public: C::G::generator() * secret,
        }
    }

    /// The public key \\( X \\) of this [`KeyPair`].
    pub fn public_key(&self) -> &C::G {
        &self.public
    }

    /// The encoded public key of this [`KeyPair`].
    pub fn public_key_bytes(&self) -> SchnorrResult<Vec<u8>> {
        encode_point::<C>(&self.public)
    }

    /// The encoded secret of this [`KeyPair`].
    ///
    /// The caller owns the returned bytes and should zeroize them once done.
    pub fn secret_key_bytes(&self) -> SchnorrResult<Vec<u8>> {
        encode_scalar::<C>(&self.secret)
    }

    /// The Diffie-Hellman point \\( x \cdot P \\) shared with the owner of `peer_public_key`.
    ///
    /// The point must be hashed before being used as key material.
    pub fn shared_point(&self, peer_public_key: &C::G) -> SchnorrResult<C::G> {
        if peer_public_key.is_zero() {
            return Err(DecodeFailure::Identity.into());
        }

        Ok(*peer_public_key * self.secret)
    }

    /// Sign `message` alone, with a fresh ephemeral key drawn from `rng`.
    ///
    /// Returns \\( (R, s = r + c \cdot x) \\) where \\( c = H(R \Vert X \Vert m) \\).
    /// The ephemeral secret \\( r \\) is erased before returning.
    pub fn get_single_sign(
        &self,
        message: &[u8],
        rng: impl RngCore + CryptoRng,
    ) -> SchnorrResult<Signature<C>> {
        self.sign_with(EphemeralKey::generate(rng), message)
    }

    /// Sign `message` alone, with an ephemeral key derived from this key and the message.
    ///
    /// Signing the same message twice yields the same signature.
    pub fn get_deterministic_single_sign(&self, message: &[u8]) -> SchnorrResult<Signature<C>> {
        self.sign_with(EphemeralKey::from_keypair(self, message)?, message)
    }

    fn sign_with(&self, ephemeral: EphemeralKey<C>, message: &[u8]) -> SchnorrResult<Signature<C>> {
        let challenge =
            compute_challenge::<C>(SignatureScheme::Single, &ephemeral.public, &self.public, message)?;

        Ok(Signature {
            R: ephemeral.public,
            s: ephemeral.secret + challenge * self.secret,
        })
    }
}

/// A single-use signing nonce \\( r \\) and its commitment \\( R = r \cdot G \\).
///
/// Using the same [`EphemeralKey`] to sign two different messages reveals the
/// long-term secret. This type is not `Clone`, and consuming APIs
/// take it by value, but callers remain responsible for never recreating the
/// same nonce twice.
pub struct EphemeralKey<C: CipherSuite> {
    pub(crate) secret: Scalar<C>,
    pub(crate) public: C::G,
}

impl<C: CipherSuite> Debug for EphemeralKey<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EphemeralKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl<C: CipherSuite> Drop for EphemeralKey<C> {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl<C: CipherSuite> EphemeralKey<C> {
    /// Generate a fresh [`EphemeralKey`] from a secure random source.
    pub fn generate(rng: impl RngCore + CryptoRng) -> Self {
        let secret = random_nonzero_scalar::<C>(rng);

        Self {
            secret,
            public: C::G::generator() * secret,
        }
    }

    /// Derive an [`EphemeralKey`] from a parent [`KeyPair`] and the message to be signed,
    /// as \\( r = H(x \Vert m) \\).
    ///
    /// Distinct messages yield distinct nonces, so this is safe for single-signer
    /// signatures. It must not be used in multi-party sessions, where the nonce
    /// also depends on the other parties' contributions.
    pub fn from_keypair(parent: &KeyPair<C>, message: &[u8]) -> SchnorrResult<Self> {
        let mut input = encode_scalar::<C>(&parent.secret)?;
        input.extend_from_slice(message);

        let secret = C::h_nonce(&input);
        input.zeroize();

        if secret.is_zero() {
            return Err(DecodeFailure::ZeroSecret.into());
        }

        Ok(Self {
            secret,
            public: C::G::generator() * secret,
        })
    }

    /// The public commitment \\( R \\) of this [`EphemeralKey`].
    pub fn public_key(&self) -> &C::G {
        &self.public
    }

    /// Commit to the public nonce before revealing it.
    ///
    /// Returns `(commitment, blind_factor)`; the commitment is published first, and the
    /// blind factor is revealed along with \\( R \\) once every party has committed.
    pub fn commit(
        &self,
        mut rng: impl RngCore + CryptoRng,
    ) -> SchnorrResult<(C::HashOutput, [u8; 32])> {
        let mut blind_factor = [0u8; 32];
        rng.fill_bytes(&mut blind_factor);

        let commitment = point_commitment::<C>(&self.public, &blind_factor)?;

        Ok((commitment, blind_factor))
    }

    /// Check a revealed nonce against the commitment published for it.
    pub fn check_commitment(
        public_nonce: &C::G,
        blind_factor: &[u8],
        commitment: &C::HashOutput,
    ) -> bool {
        match point_commitment::<C>(public_nonce, blind_factor) {
            Ok(expected) => expected.as_ref() == commitment.as_ref(),
            Err(_) => false,
        }
    }
}

pub(crate) fn point_commitment<C: CipherSuite>(
    point: &C::G,
    blind_factor: &[u8],
) -> SchnorrResult<C::HashOutput> {
    let mut input = encode_point::<C>(point)?;
    input.extend_from_slice(blind_factor);

    Ok(C::h_commitment(&input))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::suites::Secp256k1Sha256;
    use crate::Error;

    use ark_secp256k1::{Fr, Projective};
    use rand::rngs::OsRng;

    type C = Secp256k1Sha256;

    #[test]
    fn test_single_sign_and_verify() {
        let mut rng = OsRng;

        for _ in 0..20 {
            let keypair = KeyPair::<C>::generate(&mut rng);
            let signature = keypair.get_single_sign(b"nice meet", &mut rng).unwrap();

            assert!(signature
                .verify(SignatureScheme::Single, keypair.public_key(), b"nice meet")
                .is_ok());
            assert_eq!(
                signature.verify(SignatureScheme::Single, keypair.public_key(), b"nice meat"),
                Err(Error::InvalidSignature)
            );
            assert_eq!(
                signature.verify(SignatureScheme::Aggregate, keypair.public_key(), b"nice meet"),
                Err(Error::InvalidSignature)
            );
        }
    }

    #[test]
    fn test_from_secret() {
        let secret =
            hex::decode("b7e151628aed2a6abf7158809cf4f3c762e7160f38b4da56a784d9045190cfef").unwrap();
        let keypair = KeyPair::<C>::from_secret(&secret).unwrap();

        assert_eq!(
            hex::encode(keypair.public_key_bytes().unwrap()),
            "02dff1d77f2a671c5f36183726db2341be58feae1da2deced843240f7b502ba659"
        );
        assert_eq!(keypair.secret_key_bytes().unwrap(), secret);

        assert_eq!(
            KeyPair::<C>::from_secret(&[0u8; 32]).unwrap_err(),
            Error::DecodeError(DecodeFailure::ZeroSecret)
        );
        assert!(KeyPair::<C>::from_secret(&secret[1..]).is_err());
    }

    #[test]
    fn test_deterministic_single_sign() {
        let mut rng = OsRng;
        let keypair = KeyPair::<C>::generate(&mut rng);

        let first = keypair.get_deterministic_single_sign(b"message").unwrap();
        let second = keypair.get_deterministic_single_sign(b"message").unwrap();
        let other = keypair.get_deterministic_single_sign(b"other message").unwrap();

        assert_eq!(first, second);
        assert_ne!(first.R, other.R);
        assert!(first
            .verify(SignatureScheme::Single, keypair.public_key(), b"message")
            .is_ok());
    }

    #[test]
    fn test_shared_point() {
        let mut rng = OsRng;
        let alice = KeyPair::<C>::generate(&mut rng);
        let bob = KeyPair::<C>::generate(&mut rng);

        assert_eq!(
            alice.shared_point(bob.public_key()).unwrap(),
            bob.shared_point(alice.public_key()).unwrap()
        );
        assert!(alice.shared_point(&Projective::zero()).is_err());
    }

    #[test]
    fn test_nonce_commitment() {
        let mut rng = OsRng;
        let ephemeral = EphemeralKey::<C>::generate(&mut rng);
        let other = EphemeralKey::<C>::generate(&mut rng);

        let (commitment, blind_factor) = ephemeral.commit(&mut rng).unwrap();

        assert!(EphemeralKey::<C>::check_commitment(
            ephemeral.public_key(),
            &blind_factor,
            &commitment
        ));
        assert!(!EphemeralKey::<C>::check_commitment(
            other.public_key(),
            &blind_factor,
            &commitment
        ));
        assert!(!EphemeralKey::<C>::check_commitment(
            ephemeral.public_key(),
            &[0u8; 32],
            &commitment
        ));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let keypair = KeyPair::<C>::from_secret_scalar(Fr::from(42u64));
        let output = format!("{:?}", keypair);

        assert!(output.starts_with("KeyPair"));
        assert!(!output.contains("secret"));
    }
}
