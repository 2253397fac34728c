//! Gate kernels on flat little-endian amplitude buffers.
//!
//! Each kernel acts on the index bit `bit` of a buffer whose length is a
//! power of two. With `conjugate` set, the complex conjugate of the gate
//! matrix is applied instead; density registers use this for the column
//! half of `U ρ U†`.

use num_complex::Complex64;

const I: Complex64 = Complex64::new(0.0, 1.0);

// =========================================================================
// Single-qubit gates
// =========================================================================

pub(crate) fn apply_x(amps: &mut [Complex64], bit: usize) {
    let mask = 1 << bit;
    for i in 0..amps.len() {
        if i & mask == 0 {
            amps.swap(i, i | mask);
        }
    }
}

pub(crate) fn apply_y(amps: &mut [Complex64], bit: usize, conjugate: bool) {
    let mask = 1 << bit;
    let i_val = if conjugate { -I } else { I };
    for i in 0..amps.len() {
        if i & mask == 0 {
            let j = i | mask;
            let tmp = amps[i];
            amps[i] = -i_val * amps[j];
            amps[j] = i_val * tmp;
        }
    }
}

pub(crate) fn apply_z(amps: &mut [Complex64], bit: usize) {
    let mask = 1 << bit;
    for (i, amp) in amps.iter_mut().enumerate() {
        if i & mask != 0 {
            *amp = -*amp;
        }
    }
}

pub(crate) fn apply_h(amps: &mut [Complex64], bit: usize) {
    let mask = 1 << bit;
    let sqrt2_inv = std::f64::consts::FRAC_1_SQRT_2;
    for i in 0..amps.len() {
        if i & mask == 0 {
            let j = i | mask;
            let a = amps[i];
            let b = amps[j];
            amps[i] = sqrt2_inv * (a + b);
            amps[j] = sqrt2_inv * (a - b);
        }
    }
}

pub(crate) fn apply_phase(amps: &mut [Complex64], bit: usize, theta: f64, conjugate: bool) {
    let mask = 1 << bit;
    let phase = Complex64::from_polar(1.0, signed(theta, conjugate));
    for (i, amp) in amps.iter_mut().enumerate() {
        if i & mask != 0 {
            *amp *= phase;
        }
    }
}

pub(crate) fn apply_rx(amps: &mut [Complex64], bit: usize, theta: f64, conjugate: bool) {
    let theta = signed(theta, conjugate);
    let mask = 1 << bit;
    let c = (theta / 2.0).cos();
    let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
    for i in 0..amps.len() {
        if i & mask == 0 {
            let j = i | mask;
            let a = amps[i];
            let b = amps[j];
            amps[i] = c * a + neg_i_s * b;
            amps[j] = neg_i_s * a + c * b;
        }
    }
}

pub(crate) fn apply_ry(amps: &mut [Complex64], bit: usize, theta: f64) {
    let mask = 1 << bit;
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    for i in 0..amps.len() {
        if i & mask == 0 {
            let j = i | mask;
            let a = amps[i];
            let b = amps[j];
            amps[i] = c * a - s * b;
            amps[j] = s * a + c * b;
        }
    }
}

pub(crate) fn apply_rz(amps: &mut [Complex64], bit: usize, theta: f64, conjugate: bool) {
    let theta = signed(theta, conjugate);
    let mask = 1 << bit;
    let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
    let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
    for (i, amp) in amps.iter_mut().enumerate() {
        if i & mask == 0 {
            *amp *= phase_0;
        } else {
            *amp *= phase_1;
        }
    }
}

// =========================================================================
// Two-qubit gates
// =========================================================================

pub(crate) fn apply_cx(amps: &mut [Complex64], control: usize, target: usize) {
    let ctrl_mask = 1 << control;
    let tgt_mask = 1 << target;
    for i in 0..amps.len() {
        if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
            amps.swap(i, i | tgt_mask);
        }
    }
}

pub(crate) fn apply_swap(amps: &mut [Complex64], b1: usize, b2: usize) {
    let mask1 = 1 << b1;
    let mask2 = 1 << b2;
    for i in 0..amps.len() {
        if (i & mask1 != 0) && (i & mask2 == 0) {
            let j = (i & !mask1) | mask2;
            amps.swap(i, j);
        }
    }
}

fn signed(theta: f64, conjugate: bool) -> f64 {
    if conjugate { -theta } else { theta }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn zero_state(len: usize) -> Vec<Complex64> {
        let mut amps = vec![Complex64::new(0.0, 0.0); len];
        amps[0] = Complex64::new(1.0, 0.0);
        amps
    }

    #[test]
    fn test_x_flips_low_bit() {
        let mut amps = zero_state(2);
        apply_x(&mut amps, 0);
        assert!(approx_eq(amps[1], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut amps = zero_state(4);
        apply_h(&mut amps, 0);
        apply_cx(&mut amps, 0, 1);

        let sqrt2_inv = std::f64::consts::FRAC_1_SQRT_2;
        assert!(approx_eq(amps[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(amps[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(amps[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(amps[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_y_and_conjugate() {
        let mut amps = zero_state(2);
        apply_y(&mut amps, 0, false);
        assert!(approx_eq(amps[1], I));

        let mut amps = zero_state(2);
        apply_y(&mut amps, 0, true);
        assert!(approx_eq(amps[1], -I));
    }

    #[test]
    fn test_swap() {
        let mut amps = zero_state(4);
        apply_x(&mut amps, 0);
        apply_swap(&mut amps, 0, 1);
        assert!(approx_eq(amps[2], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_rx_pi_is_x_up_to_phase() {
        let mut amps = zero_state(2);
        apply_rx(&mut amps, 0, std::f64::consts::PI, false);
        assert!(approx_eq(amps[1], -I));
    }
}
