//! P-521 backend constants. Generated; do not edit.

pub(crate) const FIELD_BITS: usize = 521;
pub(crate) const FIELD_P: [u64; 9] = [
    0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
    0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
    0x00000000000001ff,
];
pub(crate) const FIELD_N0: u64 = 0x0000000000000001;
pub(crate) const FIELD_R2: [u64; 9] = [
    0x0000000000000000, 0x0000400000000000, 0x0000000000000000, 0x0000000000000000,
    0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000,
    0x0000000000000000,
];
pub(crate) const ORDER_BITS: usize = 521;
pub(crate) const ORDER: [u64; 9] = [
    0xbb6fb71e91386409, 0x3bb5c9b8899c47ae, 0x7fcc0148f709a5d0, 0x51868783bf2f966b,
    0xfffffffffffffffa, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
    0x00000000000001ff,
];
pub(crate) const ORDER_MU: [u64; 10] = [
    0xcd2dad1d7f46221c, 0xe6fdc408f501c8d1, 0xee14512412385bb1, 0x968bf1128d91dd98,
    0x1a65200cffadc23d, 0x00016b9e5e1f1034, 0x0000000000000000, 0x0000000000000000,
    0x0000000000000000, 0x0080000000000000,
];
pub(crate) const CURVE_A: [u64; 9] = [
    0xfffffffffffffffc, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
    0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
    0x00000000000001ff,
];
pub(crate) const CURVE_B: [u64; 9] = [
    0xef451fd46b503f00, 0x3573df883d2c34f1, 0x1652c0bd3bb1bf07, 0x56193951ec7e937b,
    0xb8b489918ef109e1, 0xa2da725b99b315f3, 0x929a21a0b68540ee, 0x953eb9618e1c9a1f,
    0x0000000000000051,
];
pub(crate) const CURVE_GX: [u64; 9] = [
    0xf97e7e31c2e5bd66, 0x3348b3c1856a429b, 0xfe1dc127a2ffa8de, 0xa14b5e77efe75928,
    0xf828af606b4d3dba, 0x9c648139053fb521, 0x9e3ecb662395b442, 0x858e06b70404e9cd,
    0x00000000000000c6,
];
pub(crate) const CURVE_GY: [u64; 9] = [
    0x88be94769fd16650, 0x353c7086a272c240, 0xc550b9013fad0761, 0x97ee72995ef42640,
    0x17afbd17273e662c, 0x98f54449579b4468, 0x5c8a5fb42c7d1bd9, 0x39296a789a3bc004,
    0x0000000000000118,
];
pub(crate) const MAP_Z: i64 = -4;
