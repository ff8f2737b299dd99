//! Known-answer test anchoring byte-exactness against a from-scratch Python re-expression of
//! `original_source/mlkem.py` + `polynomials.py` (stdlib `hashlib` in place of the original's
//! `pycryptodome`, which is bit-identical for SHA3-256/512 and SHAKE128/256). A draft-FIPS-203
//! implementation that omits the `[k]` domain-separation byte in `G(d ‖ [k])` produces a
//! different `ek`/`dk`/`ct`/shared-secret than this, so this test — unlike the round-trip
//! consistency checks elsewhere — fails on that class of bug even though the round trip itself
//! still succeeds.

use fips203::ml_kem_512;
use fips203::traits::{Decaps, Encaps, KeyGen, SerDes};
use fips203::{CryptoRng, RngCore};

/// Deterministic all-zero byte stream, matching FIPS 203 concrete scenario seeds `d = z = m =
/// 0x00×32` (spec §8, scenarios 1-2).
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 { 0 }

    fn next_u64(&mut self) -> u64 { 0 }

    fn fill_bytes(&mut self, dest: &mut [u8]) { dest.iter_mut().for_each(|b| *b = 0); }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), fips203::RngError> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for ZeroRng {}

const EK_FIRST32: [u8; 32] = [
    0x38, 0x55, 0x13, 0x18, 0x22, 0x82, 0x8b, 0x25, 0x55, 0xf2, 0xe9, 0x7e, 0x24, 0x27, 0x1f, 0x44,
    0x44, 0x26, 0x7e, 0xb9, 0x30, 0xfb, 0x15, 0x85, 0x5c, 0x51, 0xcf, 0xbd, 0xb4, 0x94, 0x7e, 0xcc,
];
const EK_LAST32: [u8; 32] = [
    0x6a, 0x0a, 0xf6, 0x4a, 0x85, 0xe9, 0x09, 0xdf, 0x8e, 0x28, 0x16, 0x60, 0x5d, 0x20, 0xb4, 0xe3,
    0x82, 0xb3, 0x0b, 0xbb, 0x61, 0xbf, 0x3a, 0x5f, 0x82, 0x1a, 0x0b, 0x5d, 0xba, 0x9a, 0xd3, 0xe7,
];
const DK_FIRST32: [u8; 32] = [
    0x87, 0xca, 0x19, 0x93, 0xb6, 0x4d, 0x89, 0x32, 0xae, 0x3b, 0x22, 0x52, 0x82, 0xa1, 0xb3, 0xc1,
    0x37, 0x65, 0xdc, 0xc1, 0x22, 0x4c, 0x43, 0x77, 0x33, 0x0a, 0x04, 0xec, 0xec, 0x0b, 0x25, 0x05,
];
const C_FIRST32: [u8; 32] = [
    0xe2, 0xdc, 0x05, 0x89, 0x75, 0xfe, 0xdc, 0xc1, 0xda, 0xb1, 0x70, 0x65, 0x56, 0xb9, 0x85, 0x73,
    0xf3, 0x26, 0x21, 0x60, 0xa3, 0x7e, 0xeb, 0xbb, 0xb9, 0x2f, 0x32, 0x13, 0xb8, 0xda, 0x38, 0x15,
];
const C_LAST32: [u8; 32] = [
    0x85, 0x25, 0xb9, 0x5b, 0xef, 0x6c, 0x2e, 0xd9, 0x2c, 0x5e, 0x02, 0x70, 0x2b, 0xde, 0xa7, 0x20,
    0x8b, 0xbc, 0x53, 0x8c, 0xc5, 0x8c, 0x01, 0x4f, 0xe3, 0xa8, 0xd2, 0xa1, 0x10, 0xac, 0x40, 0x8a,
];
const SHARED_SECRET: [u8; 32] = [
    0x21, 0x1e, 0xce, 0x79, 0x98, 0x83, 0x72, 0x7e, 0x5a, 0xd2, 0xee, 0x3d, 0xf9, 0x09, 0x90, 0xb6,
    0x19, 0x0d, 0xb4, 0xe2, 0x38, 0xb5, 0x4d, 0x67, 0x5f, 0xb1, 0x3d, 0x77, 0x39, 0xf5, 0x07, 0x7f,
];

#[test]
fn ml_kem_512_known_answer_all_zero_seeds() {
    let mut rng = ZeroRng;
    let (ek, dk) = ml_kem_512::KG::try_keygen_with_rng(&mut rng).unwrap();
    let ek_bytes = ek.clone().into_bytes();
    let dk_bytes = dk.clone().into_bytes();

    assert_eq!(&ek_bytes[..32], &EK_FIRST32[..]);
    assert_eq!(&ek_bytes[ek_bytes.len() - 32..], &EK_LAST32[..]);
    assert_eq!(&dk_bytes[..32], &DK_FIRST32[..]);
    // The last 32 bytes of dk are z, which keygen drew as an all-zero stream.
    assert_eq!(&dk_bytes[dk_bytes.len() - 32..], &[0u8; 32][..]);

    let (ssk, ct) = ek.try_encaps_with_rng(&mut rng).unwrap();
    let ct_bytes = ct.clone().into_bytes();
    assert_eq!(&ct_bytes[..32], &C_FIRST32[..]);
    assert_eq!(&ct_bytes[ct_bytes.len() - 32..], &C_LAST32[..]);
    assert_eq!(ssk.clone().into_bytes(), SHARED_SECRET);

    let ssk2 = dk.try_decaps(&ct).unwrap();
    assert_eq!(ssk, ssk2);
}
