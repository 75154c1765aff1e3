//! P-224 backend constants. Generated; do not edit.

pub(crate) const FIELD_BITS: usize = 224;
pub(crate) const FIELD_P: [u64; 4] = [0x0000000000000001, 0xffffffff00000000, 0xffffffffffffffff, 0x00000000ffffffff];
pub(crate) const FIELD_N0: u64 = 0xffffffffffffffff;
pub(crate) const FIELD_R2: [u64; 4] = [0xffffffff00000001, 0xffffffff00000000, 0xfffffffe00000000, 0x00000000ffffffff];
pub(crate) const ORDER_BITS: usize = 224;
pub(crate) const ORDER: [u64; 4] = [0x13dd29455c5c2a3d, 0xffff16a2e0b8f03e, 0xffffffffffffffff, 0x00000000ffffffff];
pub(crate) const ORDER_MU: [u64; 5] = [
    0xd4baa4cf1822bc47, 0xec22d6baa3a3d5c3, 0x0000e95d1f470fc1, 0x0000000000000000,
    0x0000000100000000,
];
pub(crate) const CURVE_A: [u64; 4] = [0xfffffffffffffffe, 0xfffffffeffffffff, 0xffffffffffffffff, 0x00000000ffffffff];
pub(crate) const CURVE_B: [u64; 4] = [0x270b39432355ffb4, 0x5044b0b7d7bfd8ba, 0x0c04b3abf5413256, 0x00000000b4050a85];
pub(crate) const CURVE_GX: [u64; 4] = [0x343280d6115c1d21, 0x4a03c1d356c21122, 0x6bb4bf7f321390b9, 0x00000000b70e0cbd];
pub(crate) const CURVE_GY: [u64; 4] = [0x44d5819985007e34, 0xcd4375a05a074764, 0xb5f723fb4c22dfe6, 0x00000000bd376388];
pub(crate) const MAP_Z: i64 = 31;
