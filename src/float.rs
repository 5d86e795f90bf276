#[cfg(feature = "use_f64")]
pub type Float = f64;

#[cfg(not(feature = "use_f64"))]
pub type Float = f32;

#[cfg(feature = "use_f64")]
pub type FloatAsBits = u64;
#[cfg(not(feature = "use_f64"))]
pub type FloatAsBits = u32;

pub const PI_F: Float = std::f64::consts::PI as Float;
pub const INV_PI: Float = std::f64::consts::FRAC_1_PI as Float;
pub const INV_4PI: Float = 0.079_577_471_545_947_67 as Float;

/// Bump a floating-point value down to the next smaller representable
/// floating-point value.
pub fn next_float_down(v: Float) -> Float {
    if v.is_infinite() && v < 0.0 {
        v
    } else {
        let new_v = if v == 0.0 { -0.0 } else { v };
        let mut ui: FloatAsBits = new_v.to_bits();
        if new_v > 0.0 {
            ui -= 1;
        } else {
            ui += 1;
        }
        Float::from_bits(ui)
    }
}
