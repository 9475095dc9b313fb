// -*- mode: rust; -*-
//
// This file is part of schnorr-multiparty.
// See LICENSE for licensing information.

//! This library provides a Rust implementation of three Schnorr signing modes over
//! a prime-order group:
//!
//! * single-signer signatures,
//! * n-of-n aggregate signatures, where every signer's key is weighted by a
//!   binding coefficient \\( a\_i = H(L \Vert X\_i) \\) to prevent rogue-key attacks,
//! * t-of-n threshold signatures, where the group key and each session nonce are
//!   generated jointly with Feldman verifiable secret sharing, and any `t` of the
//!   `n` parties can sign.
//!
//! All three produce a signature \\( (R, s) \\) satisfying
//! \\( s \cdot G = R + c \cdot P \\), with a challenge \\( c = H(R \Vert P \Vert m) \\)
//! domain-separated per scheme.
//!
//! The library never talks to the network: every value a party needs from the others
//! (public keys, nonces, commitments, shares, partial signatures) is an explicit input.
//! Commitments and partial signatures need an authenticated channel, secret shares an
//! authenticated and confidential one.
//!
//! # Usage
//!
//! The group, hash function and encodings are fixed by a [`CipherSuite`]. The
//! examples below use [`Secp256k1Sha256`](crate::suites::Secp256k1Sha256), which
//! encodes points in SEC1 compressed form and scalars as 32-byte big-endian integers.
//!
//! ## Single signer
//!
//! ```rust
//! use rand::rngs::OsRng;
//! use schnorr_multiparty::keys::KeyPair;
//! use schnorr_multiparty::suites::Secp256k1Sha256;
//! use schnorr_multiparty::verify_aggregate_sign;
//!
//! # fn do_test() -> Result<(), schnorr_multiparty::Error> {
//! let keypair = KeyPair::<Secp256k1Sha256>::generate(OsRng);
//! let signature = keypair.get_single_sign(b"nice meet", OsRng)?;
//!
//! verify_aggregate_sign::<Secp256k1Sha256>(
//!     &signature.s,
//!     &signature.R,
//!     keypair.public_key(),
//!     b"nice meet",
//!     false,
//! )?;
//! # Ok(()) }
//! # fn main() { assert!(do_test().is_ok()); }
//! ```
//!
//! ## n-of-n aggregate signatures
//!
//! Alice and Bob each generate a long-term [`KeyPair`](crate::keys::KeyPair) and, for
//! every signing session, a fresh [`EphemeralKey`](crate::keys::EphemeralKey). Once they
//! have exchanged their public keys and nonces, in an order they agreed upon, each of them
//! sets up an [`Aggregator`](crate::sign::Aggregator) and computes a partial signature.
//!
//! ```rust
//! use rand::rngs::OsRng;
//! use schnorr_multiparty::keys::{EphemeralKey, KeyPair};
//! use schnorr_multiparty::sign::Aggregator;
//! use schnorr_multiparty::suites::Secp256k1Sha256;
//! use schnorr_multiparty::verify_aggregate_sign;
//!
//! type C = Secp256k1Sha256;
//!
//! # fn do_test() -> Result<(), schnorr_multiparty::Error> {
//! let alice = KeyPair::<C>::generate(OsRng);
//! let bob = KeyPair::<C>::generate(OsRng);
//! let alice_nonce = EphemeralKey::<C>::generate(OsRng);
//! let bob_nonce = EphemeralKey::<C>::generate(OsRng);
//!
//! let signers = [*alice.public_key(), *bob.public_key()];
//! let nonces = [*alice_nonce.public_key(), *bob_nonce.public_key()];
//!
//! let mut alice_session = Aggregator::generate(&signers, &nonces, &alice, alice_nonce)?;
//! let mut bob_session = Aggregator::generate(&signers, &nonces, &bob, bob_nonce)?;
//!
//! let alice_part = alice_session.get_partial_sign(b"message")?;
//! let bob_part = bob_session.get_partial_sign(b"message")?;
//!
//! let (R, s) = alice_session.add_signature_parts(&alice_part, &bob_part);
//!
//! verify_aggregate_sign::<C>(&s, &R, alice_session.apk(), b"message", true)?;
//! # Ok(()) }
//! # fn main() { assert!(do_test().is_ok()); }
//! ```
//!
//! Nonces may be committed to with [`EphemeralKey::commit`](crate::keys::EphemeralKey::commit)
//! and revealed only once every party has published its commitment.
//!
//! ## t-of-n threshold signatures
//!
//! Each of the `n` parties deals a [`ThresholdKey`](crate::vss::ThresholdKey). It first
//! publishes a hash commitment to its public key, then reveals the key once every
//! commitment is in, along with its Feldman commitment, and sends one secret share to
//! each party. Every party checks the shares it received and combines them into its
//! [`LocalShare`](crate::vss::LocalShare) of the group secret; the group key is the
//! sum of the dealers' public keys.
//!
//! ```rust
//! use rand::rngs::OsRng;
//! use schnorr_multiparty::parameters::ThresholdParameters;
//! use schnorr_multiparty::suites::Secp256k1Sha256;
//! use schnorr_multiparty::vss::{summarize_public_points, ThresholdKey};
//!
//! type C = Secp256k1Sha256;
//!
//! # fn do_test() -> Result<(), schnorr_multiparty::Error> {
//! let params = ThresholdParameters::<C>::new(3, 2)?;
//!
//! let keys = (0..3)
//!     .map(|_| ThresholdKey::<C>::generate(&params, None, OsRng))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let (key_commitments, blind_factors): (Vec<_>, Vec<_>) = keys
//!     .iter()
//!     .map(|k| k.commit(OsRng))
//!     .collect::<Result<Vec<_>, _>>()?
//!     .into_iter()
//!     .unzip();
//! let pubkeys: Vec<_> = keys.iter().map(|k| *k.public_key()).collect();
//! keys[1].check_key_commitments(&pubkeys, &blind_factors, &key_commitments)?;
//!
//! let (commitments, dealt): (Vec<_>, Vec<_>) =
//!     keys.iter().map(|k| k.get_variable_secret_sharing()).unzip();
//!
//! // Party 1 collects the share every dealer computed for it.
//! let my_shares: Vec<_> = dealt.iter().map(|shares| shares[1].clone()).collect();
//! let local_share = keys[1].keygen_t_n_parties(&pubkeys, &commitments, &my_shares)?;
//!
//! let group_key = summarize_public_points::<C>(&pubkeys)?;
//! # assert_eq!(local_share.index(), 1);
//! # let _ = group_key;
//! # Ok(()) }
//! # fn main() { assert!(do_test().is_ok()); }
//! ```
//!
//! To sign, the `m >= t` participating parties run the same procedure once more to
//! share a nonce \\( V \\), with parameters `(m, t)` and their positions as restricted
//! indices. Each then computes its local signature, and anyone can reconstruct the
//! final signature, which verifies under the group key.
//!
//! ```rust
//! use rand::rngs::OsRng;
//! use schnorr_multiparty::parameters::ThresholdParameters;
//! use schnorr_multiparty::sign::{get_local_signature, summarize_local_signature};
//! use schnorr_multiparty::suites::Secp256k1Sha256;
//! use schnorr_multiparty::verify_threshold_sign;
//! use schnorr_multiparty::vss::{summarize_public_points, LocalShare, ThresholdKey};
//! # use schnorr_multiparty::vss::VerifiableSecretSharingCommitment;
//! # use schnorr_multiparty::{CipherSuite, Error};
//!
//! type C = Secp256k1Sha256;
//!
//! # fn share(
//! #     params: &ThresholdParameters<C>,
//! #     indices: &[u32],
//! # ) -> Result<
//! #     (
//! #         <C as CipherSuite>::G,
//! #         Vec<VerifiableSecretSharingCommitment<C>>,
//! #         Vec<LocalShare<C>>,
//! #     ),
//! #     Error,
//! # > {
//! #     let keys = indices
//! #         .iter()
//! #         .map(|_| ThresholdKey::<C>::generate(params, Some(indices), OsRng))
//! #         .collect::<Result<Vec<_>, _>>()?;
//! #     let pubkeys: Vec<_> = keys.iter().map(|k| *k.public_key()).collect();
//! #     let (commitments, dealt): (Vec<_>, Vec<_>) =
//! #         keys.iter().map(|k| k.get_variable_secret_sharing()).unzip();
//! #     let mut local_shares = Vec::new();
//! #     for (position, key) in keys.iter().enumerate() {
//! #         let my_shares: Vec<_> = dealt.iter().map(|s| s[position].clone()).collect();
//! #         local_shares.push(key.keygen_t_n_parties(&pubkeys, &commitments, &my_shares)?);
//! #     }
//! #     Ok((summarize_public_points::<C>(&pubkeys)?, commitments, local_shares))
//! # }
//! # fn do_test() -> Result<(), schnorr_multiparty::Error> {
//! let params = ThresholdParameters::<C>::new(3, 2)?;
//! let message = b"threshold message";
//!
//! // Long-term sharing among parties 0, 1 and 2; parties 0 and 2 sign.
//! let (group_key, commitments, local_shares) = share(&params, &[0, 1, 2])?;
//! let signers = [0u32, 2];
//!
//! let eph_params = ThresholdParameters::<C>::new(signers.len() as u32, params.t)?;
//! let (group_nonce, eph_commitments, eph_shares) = share(&eph_params, &signers)?;
//!
//! let mut challenges = Vec::new();
//! let mut local_signatures = Vec::new();
//! for (eph_local_share, &index) in eph_shares.into_iter().zip(signers.iter()) {
//!     let local_share = &local_shares[index as usize];
//!     let (e, local_signature) =
//!         get_local_signature(local_share, eph_local_share, &group_key, &group_nonce, message)?;
//!     challenges.push(e);
//!     local_signatures.push(local_signature);
//! }
//! // Every honest party computes the same challenge.
//! assert!(challenges.iter().all(|e| *e == challenges[0]));
//!
//! let signature = summarize_local_signature(
//!     &params,
//!     &challenges[0],
//!     &local_signatures,
//!     &commitments,
//!     &eph_commitments,
//! )?;
//!
//! verify_threshold_sign::<C>(&signature.s, &group_key, &signature.R, message)?;
//! # Ok(()) }
//! # fn main() { assert!(do_test().is_ok()); }
//! ```
//!
//! # Security
//!
//! An ephemeral key must never sign two different messages. The library prevents
//! reusing an [`EphemeralKey`](crate::keys::EphemeralKey) or an ephemeral
//! [`LocalShare`](crate::vss::LocalShare) object, but cannot prevent a caller from
//! recreating the same nonce.
//!
//! Secret scalars are overwritten with zeroes when dropped. The underlying arkworks
//! arithmetic is not guaranteed to run in constant time.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(future_incompatible)]
#![allow(clippy::type_complexity)]

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

#[cfg(not(feature = "std"))]
extern crate alloc;

mod error;
pub use error::{DecodeFailure, Error, SchnorrResult};

mod ciphersuite;
pub use ciphersuite::CipherSuite;

pub(crate) mod utils;
pub use utils::Scalar;

/// A module defining the byte encodings of scalars and points.
pub mod encoding;
/// A module defining the long-term and ephemeral keys of a single party.
pub mod keys;
/// A module defining the [`ThresholdParameters`](crate::parameters::ThresholdParameters) of a t-of-n sharing.
pub mod parameters;

/// A module defining the Feldman verifiable secret sharing used to generate
/// t-of-n group keys and nonces.
pub mod vss;
/// A module defining the signatures of the three schemes and their creation.
pub mod sign;

mod verify;
pub use verify::{verify_aggregate_sign, verify_auto, verify_threshold_sign};

/// This module provides concrete [`CipherSuite`] implementations.
pub mod suites;
