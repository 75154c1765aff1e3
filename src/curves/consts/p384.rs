//! P-384 backend constants. Generated; do not edit.

pub(crate) const FIELD_BITS: usize = 384;
pub(crate) const FIELD_P: [u64; 6] = [
    0x00000000ffffffff, 0xffffffff00000000, 0xfffffffffffffffe, 0xffffffffffffffff,
    0xffffffffffffffff, 0xffffffffffffffff,
];
pub(crate) const FIELD_N0: u64 = 0x0000000100000001;
pub(crate) const FIELD_R2: [u64; 6] = [
    0xfffffffe00000001, 0x0000000200000000, 0xfffffffe00000000, 0x0000000200000000,
    0x0000000000000001, 0x0000000000000000,
];
pub(crate) const ORDER_BITS: usize = 384;
pub(crate) const ORDER: [u64; 6] = [
    0xecec196accc52973, 0x581a0db248b0a77a, 0xc7634d81f4372ddf, 0xffffffffffffffff,
    0xffffffffffffffff, 0xffffffffffffffff,
];
pub(crate) const ORDER_MU: [u64; 7] = [
    0x1313e695333ad68d, 0xa7e5f24db74f5885, 0x389cb27e0bc8d220, 0x0000000000000000,
    0x0000000000000000, 0x0000000000000000, 0x0000000000000001,
];
pub(crate) const CURVE_A: [u64; 6] = [
    0x00000000fffffffc, 0xffffffff00000000, 0xfffffffffffffffe, 0xffffffffffffffff,
    0xffffffffffffffff, 0xffffffffffffffff,
];
pub(crate) const CURVE_B: [u64; 6] = [
    0x2a85c8edd3ec2aef, 0xc656398d8a2ed19d, 0x0314088f5013875a, 0x181d9c6efe814112,
    0x988e056be3f82d19, 0xb3312fa7e23ee7e4,
];
pub(crate) const CURVE_GX: [u64; 6] = [
    0x3a545e3872760ab7, 0x5502f25dbf55296c, 0x59f741e082542a38, 0x6e1d3b628ba79b98,
    0x8eb1c71ef320ad74, 0xaa87ca22be8b0537,
];
pub(crate) const CURVE_GY: [u64; 6] = [
    0x7a431d7c90ea0e5f, 0x0a60b1ce1d7e819d, 0xe9da3113b5f0b8c0, 0xf8f41dbd289a147c,
    0x5d9e98bf9292dc29, 0x3617de4a96262c6f,
];
pub(crate) const MAP_Z: i64 = -12;
