//! The unit-of-work primitive: an opaque synchronous CPU-bound call whose
//! duration is assumed constant on a given machine. Its content is
//! otherwise unconstrained; this is a non-optimizable, constant amount of
//! integer work, kept `#[inline(never)]` so the compiler can't fold
//! repeated calls away.

const SPIN_ITERATIONS: u64 = 20_000;

#[inline(never)]
pub fn run_single_unit() {
    let mut acc: u64 = 0;
    for i in 0..SPIN_ITERATIONS {
        acc = acc.wrapping_add(i ^ (i << 1));
    }
    std::hint::black_box(acc);
}
