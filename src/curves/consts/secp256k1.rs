//! secp256k1 backend constants. Generated; do not edit.

pub(crate) const FIELD_BITS: usize = 256;
pub(crate) const FIELD_P: [u64; 4] = [0xfffffffefffffc2f, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff];
pub(crate) const FIELD_N0: u64 = 0xd838091dd2253531;
pub(crate) const FIELD_R2: [u64; 4] = [0x000007a2000e90a1, 0x0000000000000001, 0x0000000000000000, 0x0000000000000000];
pub(crate) const ORDER_BITS: usize = 256;
pub(crate) const ORDER: [u64; 4] = [0xbfd25e8cd0364141, 0xbaaedce6af48a03b, 0xfffffffffffffffe, 0xffffffffffffffff];
pub(crate) const ORDER_MU: [u64; 5] = [
    0x402da1732fc9bec0, 0x4551231950b75fc4, 0x0000000000000001, 0x0000000000000000,
    0x0000000000000001,
];
pub(crate) const CURVE_A: [u64; 4] = [0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000];
pub(crate) const CURVE_B: [u64; 4] = [0x0000000000000007, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000];
pub(crate) const CURVE_GX: [u64; 4] = [0x59f2815b16f81798, 0x029bfcdb2dce28d9, 0x55a06295ce870b07, 0x79be667ef9dcbbac];
pub(crate) const CURVE_GY: [u64; 4] = [0x9c47d08ffb10d4b8, 0xfd17b448a6855419, 0x5da4fbfc0e1108a8, 0x483ada7726a3c465];
pub(crate) const MAP_Z: i64 = 1;

// GLV endomorphism: lambda splitting basis and rounded divisors.
pub(crate) const ENDO_LAMBDA: [u64; 4] = [0xdf02967c1b23bd72, 0x122e22ea20816678, 0xa5261c028812645a, 0x5363ad4cc05c30e0];
pub(crate) const ENDO_BETA: [u64; 4] = [0xc1396c28719501ee, 0x9cf0497512f58995, 0x6e64479eac3434e9, 0x7ae96a2b657c0710];
pub(crate) const ENDO_MINUS_B1: [u64; 4] = [0x6f547fa90abfe4c3, 0xe4437ed6010e8828, 0x0000000000000000, 0x0000000000000000];
pub(crate) const ENDO_MINUS_B2: [u64; 4] = [0xd765cda83db1562c, 0x8a280ac50774346d, 0xfffffffffffffffe, 0xffffffffffffffff];
pub(crate) const ENDO_G1: [u64; 4] = [0x90e49284eb153dab, 0xd221a7d46bcde86c, 0x0000000000003086, 0x0000000000000000];
pub(crate) const ENDO_G2: [u64; 4] = [0x7fa90abfe4c42212, 0x7ed6010e88286f54, 0x000000000000e443, 0x0000000000000000];
pub(crate) const ENDO_SHIFT: usize = 272;
