//! P-192 backend constants. Generated; do not edit.

pub(crate) const FIELD_BITS: usize = 192;
pub(crate) const FIELD_P: [u64; 3] = [0xffffffffffffffff, 0xfffffffffffffffe, 0xffffffffffffffff];
pub(crate) const FIELD_N0: u64 = 0x0000000000000001;
pub(crate) const FIELD_R2: [u64; 3] = [0x0000000000000001, 0x0000000000000002, 0x0000000000000001];
pub(crate) const ORDER_BITS: usize = 192;
pub(crate) const ORDER: [u64; 3] = [0x146bc9b1b4d22831, 0xffffffff99def836, 0xffffffffffffffff];
pub(crate) const ORDER_MU: [u64; 4] = [0xeb94364e4b2dd7cf, 0x00000000662107c9, 0x0000000000000000, 0x0000000000000001];
pub(crate) const CURVE_A: [u64; 3] = [0xfffffffffffffffc, 0xfffffffffffffffe, 0xffffffffffffffff];
pub(crate) const CURVE_B: [u64; 3] = [0xfeb8deecc146b9b1, 0x0fa7e9ab72243049, 0x64210519e59c80e7];
pub(crate) const CURVE_GX: [u64; 3] = [0xf4ff0afd82ff1012, 0x7cbf20eb43a18800, 0x188da80eb03090f6];
pub(crate) const CURVE_GY: [u64; 3] = [0x73f977a11e794811, 0x631011ed6b24cdd5, 0x07192b95ffc8da78];
pub(crate) const MAP_Z: i64 = -5;
