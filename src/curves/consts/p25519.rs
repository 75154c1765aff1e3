//! curve25519 / edwards25519 backend constants. Generated; do not edit.

pub(crate) const FIELD_BITS: usize = 255;
pub(crate) const FIELD_P: [u64; 4] = [0xffffffffffffffed, 0xffffffffffffffff, 0xffffffffffffffff, 0x7fffffffffffffff];
pub(crate) const FIELD_N0: u64 = 0x86bca1af286bca1b;
pub(crate) const FIELD_R2: [u64; 4] = [0x00000000000005a4, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000];
pub(crate) const ORDER_BITS: usize = 253;
pub(crate) const ORDER: [u64; 4] = [0x5812631a5cf5d3ed, 0x14def9dea2f79cd6, 0x0000000000000000, 0x1000000000000000];
pub(crate) const ORDER_MU: [u64; 5] = [
    0xed9ce5a30a2c131b, 0x2106215d086329a7, 0xffffffffffffffeb, 0xffffffffffffffff,
    0x000000000000000f,
];
pub(crate) const EDWARDS_D: [u64; 4] = [0x75eb4dca135978a3, 0x00700a4d4141d8ab, 0x8cc740797779e898, 0x52036cee2b6ffe73];
pub(crate) const EDWARDS_GX: [u64; 4] = [0xc9562d608f25d51a, 0x692cc7609525a7b2, 0xc0a4e231fdd6dc5c, 0x216936d3cd6e53fe];
pub(crate) const EDWARDS_GY: [u64; 4] = [0x6666666666666658, 0x6666666666666666, 0x6666666666666666, 0x6666666666666666];
pub(crate) const MONT_A: u64 = 486662;
pub(crate) const MONT_B: u64 = 1;
pub(crate) const MONT_GU: u64 = 9;
pub(crate) const MAP_Z: i64 = 2;
pub(crate) const COFACTOR: u32 = 8;
