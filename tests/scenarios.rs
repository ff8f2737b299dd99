//! Black-box tests for the testable properties listed in FIPS 203's functional-correctness
//! scenarios: implicit rejection on a tampered ciphertext, and cross-key decapsulation failure.

use fips203::traits::{Decaps, Encaps, KeyGen, SerDes};
use fips203::ml_kem_768;
use rand_chacha::rand_core::SeedableRng;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;

fn implicit_rejection_key(z: &[u8], ct: &[u8]) -> [u8; 32] {
    let mut hasher = Shake256::default();
    hasher.update(z);
    hasher.update(ct);
    let mut reader = hasher.finalize_xof();
    let mut out = [0u8; 32];
    reader.read(&mut out);
    out
}

#[test]
fn tampered_ciphertext_is_silently_rejected() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
    let (ek, dk) = ml_kem_768::KG::try_keygen_with_rng(&mut rng).unwrap();
    let (ssk, ct) = ek.try_encaps_with_rng(&mut rng).unwrap();

    let dk_bytes = dk.clone().into_bytes();
    let z = &dk_bytes[dk_bytes.len() - 32..];

    let mut tampered_ct_bytes = ct.into_bytes();
    tampered_ct_bytes[0] ^= 0x80; // flip the high bit of the first byte
    let tampered_ct = ml_kem_768::CipherText::try_from_bytes(tampered_ct_bytes).unwrap();

    let rejected_ssk = dk.try_decaps(&tampered_ct).unwrap();

    assert_ne!(rejected_ssk, ssk);
    let expected = implicit_rejection_key(z, &tampered_ct_bytes);
    assert_eq!(rejected_ssk.into_bytes(), expected);
}

#[test]
fn decaps_with_wrong_key_yields_different_secret() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
    let (ek1, _dk1) = ml_kem_768::KG::try_keygen_with_rng(&mut rng).unwrap();
    let (_ek2, dk2) = ml_kem_768::KG::try_keygen_with_rng(&mut rng).unwrap();

    let (ssk, ct) = ek1.try_encaps_with_rng(&mut rng).unwrap();
    let ssk_wrong = dk2.try_decaps(&ct).unwrap();

    assert_ne!(ssk, ssk_wrong);
}

#[test]
fn encaps_randomness_yields_distinct_ciphertexts() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(99);
    let (ek, _dk) = ml_kem_768::KG::try_keygen_with_rng(&mut rng).unwrap();

    let (_ssk1, ct1) = ek.try_encaps_with_rng(&mut rng).unwrap();
    let (_ssk2, ct2) = ek.try_encaps_with_rng(&mut rng).unwrap();

    assert_ne!(ct1.into_bytes(), ct2.into_bytes());
}
