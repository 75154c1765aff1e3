//! curve448 / edwards448 backend constants. Generated; do not edit.

pub(crate) const FIELD_BITS: usize = 448;
pub(crate) const FIELD_P: [u64; 7] = [
    0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff, 0xfffffffeffffffff,
    0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
];
pub(crate) const FIELD_N0: u64 = 0x0000000000000001;
pub(crate) const FIELD_R2: [u64; 7] = [
    0x0000000000000002, 0x0000000000000000, 0x0000000000000000, 0x0000000300000000,
    0x0000000000000000, 0x0000000000000000, 0x0000000000000000,
];
pub(crate) const ORDER_BITS: usize = 446;
pub(crate) const ORDER: [u64; 7] = [
    0x2378c292ab5844f3, 0x216cc2728dc58f55, 0xc44edb49aed63690, 0xffffffff7cca23e9,
    0xffffffffffffffff, 0xffffffffffffffff, 0x3fffffffffffffff,
];
pub(crate) const ORDER_MU: [u64; 8] = [
    0xc873d6d54a7bb0e0, 0xe933d8d723a70aad, 0xbb124b65129c96fd, 0x00000008335dc163,
    0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000004,
];
pub(crate) const EDWARDS_D: [u64; 7] = [
    0xffffffffffff6756, 0xffffffffffffffff, 0xffffffffffffffff, 0xfffffffeffffffff,
    0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
];
pub(crate) const EDWARDS_GX: [u64; 7] = [
    0x2626a82bc70cc05e, 0x433b80e18b00938e, 0x12ae1af72ab66511, 0xea6de324a3d3a464,
    0x9e146570470f1767, 0x221d15a622bf36da, 0x4f1970c66bed0ded,
];
pub(crate) const EDWARDS_GY: [u64; 7] = [
    0x9808795bf230fa14, 0xfdbd132c4ed7c8ad, 0x3ad3ff1ce67c39c4, 0x87789c1e05a0c2d7,
    0x4bea73736ca39840, 0x8876203756c9c762, 0x693f46716eb6bc24,
];
pub(crate) const MONT_A: u64 = 156326;
pub(crate) const MONT_B: u64 = 1;
pub(crate) const MONT_GU: u64 = 5;
pub(crate) const MAP_Z: i64 = -1;
pub(crate) const COFACTOR: u32 = 4;

// edwards448 and curve448 are related by a 4-isogeny.
pub(crate) const ISOGENY_DEGREE: u32 = 4;
