//! Integration tests for single, aggregate and threshold Schnorr signatures.

use ark_ec::Group;
use rand::rngs::OsRng;
use rand::seq::index::sample;

use schnorr_multiparty::encoding::{
    decode_point, decode_scalar, encode_point, encode_scalar, encode_tagged_point, KeyKind,
};
use schnorr_multiparty::keys::{EphemeralKey, KeyPair};
use schnorr_multiparty::parameters::ThresholdParameters;
use schnorr_multiparty::sign::{
    aggregate_public_keys, get_local_signature, summarize_local_signature, Aggregator, Signature,
    SignatureScheme,
};
use schnorr_multiparty::suites::Secp256k1Sha256;
use schnorr_multiparty::vss::{
    summarize_public_points, LocalShare, SecretShare, ThresholdKey,
    VerifiableSecretSharingCommitment,
};
use schnorr_multiparty::{
    verify_aggregate_sign, verify_auto, verify_threshold_sign, CipherSuite, Error, Scalar,
};

type C = Secp256k1Sha256;
type G = <C as CipherSuite>::G;

const TEST_SECRET: &str = "b7e151628aed2a6abf7158809cf4f3c762e7160f38b4da56a784d9045190cfef";

#[test]
fn single_signer_nice_meet() {
    let keypair = KeyPair::<C>::from_secret(&hex::decode(TEST_SECRET).unwrap()).unwrap();
    let message = b"nice meet";

    let signature = keypair.get_single_sign(message, OsRng).unwrap();

    assert!(verify_aggregate_sign::<C>(
        &signature.s,
        &signature.R,
        keypair.public_key(),
        message,
        false
    )
    .is_ok());

    // A signature does not carry over to another message.
    let other = keypair.get_single_sign(b"nice meat", OsRng).unwrap();
    assert!(verify_aggregate_sign::<C>(
        &signature.s,
        &signature.R,
        keypair.public_key(),
        b"nice meat",
        false
    )
    .is_err());
    assert!(other
        .verify(SignatureScheme::Single, keypair.public_key(), b"nice meat")
        .is_ok());
}

#[test]
fn single_signer_over_bytes() {
    let keypair = KeyPair::<C>::generate(OsRng);
    let bytes = keypair
        .get_single_sign(b"message", OsRng)
        .unwrap()
        .to_bytes()
        .unwrap();

    let public_key = decode_point::<C>(&keypair.public_key_bytes().unwrap()).unwrap();
    let signature = Signature::<C>::from_bytes(&bytes).unwrap();

    assert!(signature
        .verify(SignatureScheme::Single, &public_key, b"message")
        .is_ok());
}

fn aggregate_session(
    n: usize,
    message: &[u8],
) -> (Vec<G>, Vec<Aggregator<C>>, Vec<Scalar<C>>) {
    let keypairs: Vec<KeyPair<C>> = (0..n).map(|_| KeyPair::generate(OsRng)).collect();
    let ephemerals: Vec<EphemeralKey<C>> = (0..n).map(|_| EphemeralKey::generate(OsRng)).collect();

    // Nonces are committed to before being revealed.
    let commitments: Vec<_> = ephemerals
        .iter()
        .map(|e| e.commit(OsRng).unwrap())
        .collect();
    for (ephemeral, (commitment, blind_factor)) in ephemerals.iter().zip(commitments.iter()) {
        assert!(EphemeralKey::<C>::check_commitment(
            ephemeral.public_key(),
            blind_factor,
            commitment
        ));
    }

    let signer_pubkeys: Vec<G> = keypairs.iter().map(|k| *k.public_key()).collect();
    let ephemeral_pubkeys: Vec<G> = ephemerals.iter().map(|e| *e.public_key()).collect();

    let mut aggregators: Vec<Aggregator<C>> = keypairs
        .iter()
        .zip(ephemerals)
        .map(|(keypair, ephemeral)| {
            Aggregator::generate(&signer_pubkeys, &ephemeral_pubkeys, keypair, ephemeral).unwrap()
        })
        .collect();

    let parts = aggregators
        .iter_mut()
        .map(|aggregator| aggregator.get_partial_sign(message).unwrap())
        .collect();

    (signer_pubkeys, aggregators, parts)
}

#[test]
fn aggregate_signature_single_party() {
    let (_, aggregators, parts) = aggregate_session(1, b"message");
    let signature = aggregators[0].aggregate_partial_signatures(&parts);

    assert!(verify_aggregate_sign::<C>(
        &signature.s,
        &signature.R,
        aggregators[0].apk(),
        b"message",
        true
    )
    .is_ok());
}

#[test]
#[allow(non_snake_case)]
fn aggregate_signature_three_parties() {
    let message = b"aggregate message";
    let (signer_pubkeys, aggregators, parts) = aggregate_session(3, message);

    // Verifiers derive the aggregated key from the signer set alone.
    assert_eq!(
        aggregate_public_keys::<C>(&signer_pubkeys).unwrap(),
        *aggregators[0].apk()
    );

    let (R, s) = aggregators[1].add_signature_parts(&parts[0], &parts[1]);
    let (R, s) = aggregators[2].add_signature_parts(&s, &parts[2]);

    assert!(verify_aggregate_sign::<C>(&s, &R, aggregators[0].apk(), message, true).is_ok());

    // Any order of combination gives the same signature.
    let (_, reordered) = aggregators[0].add_signature_parts(&parts[2], &parts[0]);
    let (_, reordered) = aggregators[0].add_signature_parts(&parts[1], &reordered);
    assert_eq!(s, reordered);

    for omitted in 0..3 {
        let partial: Vec<Scalar<C>> = parts
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != omitted)
            .map(|(_, part)| *part)
            .collect();
        let signature = aggregators[0].aggregate_partial_signatures(&partial);

        assert_eq!(
            verify_aggregate_sign::<C>(
                &signature.s,
                &signature.R,
                aggregators[0].apk(),
                message,
                true
            ),
            Err(Error::InvalidSignature)
        );
    }
}

#[test]
fn reused_nonce_is_not_detected() {
    let keypair = KeyPair::<C>::generate(OsRng);
    let signer_pubkeys = [*keypair.public_key()];

    // Recreating the same nonce for two messages is the caller's responsibility to avoid.
    let mut signatures = Vec::new();
    for message in [&b"first message"[..], &b"second message"[..]] {
        let ephemeral = EphemeralKey::<C>::from_keypair(&keypair, b"session").unwrap();
        let nonces = [*ephemeral.public_key()];
        let mut aggregator =
            Aggregator::generate(&signer_pubkeys, &nonces, &keypair, ephemeral).unwrap();
        let part = aggregator.get_partial_sign(message).unwrap();
        let signature = aggregator.aggregate_partial_signatures(&[part]);

        assert!(verify_aggregate_sign::<C>(
            &signature.s,
            &signature.R,
            aggregator.apk(),
            message,
            true
        )
        .is_ok());
        signatures.push(signature);
    }

    assert_eq!(signatures[0].R, signatures[1].R);
    assert_ne!(signatures[0].s, signatures[1].s);
}

#[test]
fn aggregate_signature_tampering() {
    let message = b"aggregate message";
    let (_, aggregators, parts) = aggregate_session(3, message);
    let signature = aggregators[0].aggregate_partial_signatures(&parts);
    let apk = *aggregators[0].apk();

    assert!(verify_aggregate_sign::<C>(&signature.s, &signature.R, &apk, b"aggregate messagf", true)
        .is_err());
    assert!(verify_aggregate_sign::<C>(
        &(signature.s + Scalar::<C>::from(1u64)),
        &signature.R,
        &apk,
        message,
        true
    )
    .is_err());
    assert!(verify_aggregate_sign::<C>(&signature.s, &signature.R, &(apk + apk), message, true)
        .is_err());

    // Flipping a bit of the encoded key yields another valid point, or none at all.
    let mut apk_bytes = encode_point::<C>(&apk).unwrap();
    apk_bytes[32] ^= 1;
    if let Ok(tampered) = decode_point::<C>(&apk_bytes) {
        assert!(
            verify_aggregate_sign::<C>(&signature.s, &signature.R, &tampered, message, true)
                .is_err()
        );
    }
}

struct Sharing {
    commitments: Vec<VerifiableSecretSharingCommitment<C>>,
    public_key: G,
    local_shares: Vec<LocalShare<C>>,
}

fn run_sharing(params: &ThresholdParameters<C>, indices: &[u32]) -> Sharing {
    let keys: Vec<ThresholdKey<C>> = indices
        .iter()
        .map(|_| ThresholdKey::generate(params, Some(indices), OsRng).unwrap())
        .collect();

    share_among(&keys)
}

fn share_among(keys: &[ThresholdKey<C>]) -> Sharing {
    // Dealers commit to their public keys before revealing them.
    let (key_commitments, blind_factors): (Vec<_>, Vec<_>) =
        keys.iter().map(|k| k.commit(OsRng).unwrap()).unzip();
    let pubkeys: Vec<G> = keys.iter().map(|k| *k.public_key()).collect();
    for key in keys.iter() {
        key.check_key_commitments(&pubkeys, &blind_factors, &key_commitments)
            .unwrap();
    }

    let (commitments, dealt): (Vec<_>, Vec<_>) =
        keys.iter().map(|k| k.get_variable_secret_sharing()).unzip();

    let local_shares = keys
        .iter()
        .enumerate()
        .map(|(position, key)| {
            let my_shares: Vec<SecretShare<C>> = dealt
                .iter()
                .map(|shares: &Vec<SecretShare<C>>| shares[position].clone())
                .collect();
            key.keygen_t_n_parties(&pubkeys, &commitments, &my_shares)
                .unwrap()
        })
        .collect();

    Sharing {
        commitments,
        public_key: summarize_public_points::<C>(&pubkeys).unwrap(),
        local_shares,
    }
}

fn threshold_sign(
    params: &ThresholdParameters<C>,
    long_term: &Sharing,
    signers: &[u32],
    message: &[u8],
) -> Result<Signature<C>, Error> {
    let eph_params = ThresholdParameters::<C>::new(signers.len() as u32, params.t)?;
    let ephemeral = run_sharing(&eph_params, signers);

    let mut challenges = Vec::new();
    let mut local_signatures = Vec::new();
    for (eph_share, &index) in ephemeral.local_shares.into_iter().zip(signers.iter()) {
        let (e, local_signature) = get_local_signature(
            &long_term.local_shares[index as usize],
            eph_share,
            &long_term.public_key,
            &ephemeral.public_key,
            message,
        )?;
        challenges.push(e);
        local_signatures.push(local_signature);
    }
    assert!(challenges.iter().all(|e| *e == challenges[0]));

    summarize_local_signature(
        params,
        &challenges[0],
        &local_signatures,
        &long_term.commitments,
        &ephemeral.commitments,
    )
}

#[test]
fn threshold_signature_2_out_of_5_with_4_signers() {
    let params = ThresholdParameters::<C>::new(5, 2).unwrap();
    let all: Vec<u32> = (0..5).collect();
    let long_term = run_sharing(&params, &all);

    let message = b"threshold message";
    let signature = threshold_sign(&params, &long_term, &[0, 1, 2, 3], message).unwrap();

    assert!(
        verify_threshold_sign::<C>(&signature.s, &long_term.public_key, &signature.R, message)
            .is_ok()
    );
    assert!(verify_threshold_sign::<C>(
        &signature.s,
        &long_term.public_key,
        &signature.R,
        b"threshold massage"
    )
    .is_err());
    assert!(verify_threshold_sign::<C>(
        &(signature.s + Scalar::<C>::from(1u64)),
        &long_term.public_key,
        &signature.R,
        message
    )
    .is_err());
    assert!(verify_threshold_sign::<C>(
        &signature.s,
        &(long_term.public_key + long_term.public_key),
        &signature.R,
        message
    )
    .is_err());
    assert!(verify_threshold_sign::<C>(
        &signature.s,
        &long_term.public_key,
        &(signature.R + long_term.public_key),
        message
    )
    .is_err());
}

#[test]
fn threshold_signature_random_subsets() {
    let params = ThresholdParameters::<C>::new(5, 2).unwrap();
    let all: Vec<u32> = (0..5).collect();
    let long_term = run_sharing(&params, &all);
    let mut rng = OsRng;

    for m in 2..=5 {
        let mut signers: Vec<u32> = sample(&mut rng, 5, m)
            .into_iter()
            .map(|i| i as u32)
            .collect();
        signers.sort_unstable();

        let signature = threshold_sign(&params, &long_term, &signers, b"message").unwrap();
        assert!(signature
            .verify(SignatureScheme::Threshold, &long_term.public_key, b"message")
            .is_ok());
    }
}

#[test]
fn threshold_signature_rejects_too_few_signers() {
    let params = ThresholdParameters::<C>::new(5, 3).unwrap();
    let all: Vec<u32> = (0..5).collect();
    let long_term = run_sharing(&params, &all);

    // The nonce sharing itself refuses a threshold above the signer count.
    assert_eq!(
        threshold_sign(&params, &long_term, &[1, 4], b"message").unwrap_err(),
        Error::InvalidParameters { n: 2, t: 3 }
    );
}

#[test]
fn threshold_key_from_known_secret() {
    let params = ThresholdParameters::<C>::new(3, 2).unwrap();
    let secret = hex::decode(TEST_SECRET).unwrap();

    let keys = vec![
        ThresholdKey::<C>::from_secret_key(&params, &secret, OsRng).unwrap(),
        ThresholdKey::<C>::generate(&params, None, OsRng).unwrap(),
        ThresholdKey::<C>::generate(&params, None, OsRng).unwrap(),
    ];
    assert_eq!(
        hex::encode(encode_point::<C>(keys[0].public_key()).unwrap()),
        "02dff1d77f2a671c5f36183726db2341be58feae1da2deced843240f7b502ba659"
    );

    let long_term = share_among(&keys);
    let known = *KeyPair::<C>::from_secret(&secret).unwrap().public_key();
    assert_eq!(
        long_term.public_key,
        known + keys[1].public_key() + keys[2].public_key()
    );

    for signers in [[0u32, 1], [1, 2], [0, 2]] {
        let signature = threshold_sign(&params, &long_term, &signers, b"message").unwrap();
        assert!(verify_threshold_sign::<C>(
            &signature.s,
            &long_term.public_key,
            &signature.R,
            b"message"
        )
        .is_ok());
    }
}

#[test]
fn dealer_revealing_another_key_is_rejected() {
    let params = ThresholdParameters::<C>::new(3, 2).unwrap();
    let keys: Vec<ThresholdKey<C>> = (0..3)
        .map(|_| ThresholdKey::generate(&params, None, OsRng).unwrap())
        .collect();

    let (key_commitments, blind_factors): (Vec<_>, Vec<_>) =
        keys.iter().map(|k| k.commit(OsRng).unwrap()).unzip();

    // Dealer 1 waits for the others, then reveals a key chosen to cancel theirs.
    let mut revealed: Vec<G> = keys.iter().map(|k| *k.public_key()).collect();
    revealed[1] = G::generator() - revealed[0] - revealed[2];

    for key in keys.iter() {
        assert_eq!(
            key.check_key_commitments(&revealed, &blind_factors, &key_commitments),
            Err(Error::InvalidKeyCommitment(1))
        );
    }
}

#[test]
fn cheating_dealer_is_detected_by_every_honest_party() {
    let params = ThresholdParameters::<C>::new(5, 3).unwrap();
    let keys: Vec<ThresholdKey<C>> = (0..5)
        .map(|_| ThresholdKey::generate(&params, None, OsRng).unwrap())
        .collect();
    let pubkeys: Vec<G> = keys.iter().map(|k| *k.public_key()).collect();

    let (commitments, mut dealt): (Vec<_>, Vec<Vec<SecretShare<C>>>) =
        keys.iter().map(|k| k.get_variable_secret_sharing()).unzip();

    // Dealer 3 replaces every share it sends by an arbitrary scalar.
    let cheater = 3usize;
    for (receiver, share) in dealt[cheater].iter_mut().enumerate() {
        let bogus = encode_scalar::<C>(&Scalar::<C>::from(1000u64 + receiver as u64)).unwrap();
        *share = SecretShare::from_bytes(receiver as u32, &bogus).unwrap();
    }

    for receiver in (0..5).filter(|r| *r != cheater) {
        let my_shares: Vec<SecretShare<C>> =
            dealt.iter().map(|shares| shares[receiver].clone()).collect();

        assert_eq!(
            keys[receiver]
                .keygen_t_n_parties(&pubkeys, &commitments, &my_shares)
                .unwrap_err(),
            Error::ShareVerificationError {
                accuser: receiver as u32,
                accused: vec![cheater as u32]
            }
        );
    }
}

#[test]
fn automatic_verification_finds_the_scheme() {
    let params = ThresholdParameters::<C>::new(3, 2).unwrap();
    let all: Vec<u32> = (0..3).collect();
    let long_term = run_sharing(&params, &all);
    let signature = threshold_sign(&params, &long_term, &[0, 2], b"message").unwrap();

    let s = encode_scalar::<C>(&signature.s).unwrap();
    let v = encode_point::<C>(&signature.R).unwrap();
    let plain = encode_point::<C>(&long_term.public_key).unwrap();
    let tagged = encode_tagged_point::<C>(&long_term.public_key, KeyKind::Threshold).unwrap();

    assert_eq!(
        verify_auto::<C>(&s, &v, &plain, b"message"),
        Some(SignatureScheme::Threshold)
    );
    assert_eq!(
        verify_auto::<C>(&s, &v, &tagged, b"message"),
        Some(SignatureScheme::Threshold)
    );
    assert_eq!(verify_auto::<C>(&s, &v, &tagged, b"other message"), None);

    assert_eq!(decode_scalar::<C>(&s).unwrap(), signature.s);
}
