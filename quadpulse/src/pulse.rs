use cgmath::Vector4;

/// Frame color for the quad: red follows sin²(t), green stays off, blue
/// and alpha stay saturated.
pub fn color(time: f32) -> Vector4<f32> {
    let red = time.sin() * time.sin();

    Vector4::new(red, 0.0, 1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn red_channel_follows_squared_sine() {
        assert_eq!(color(0.0).x, 0.0);
        assert!((color(FRAC_PI_2).x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn red_channel_stays_normalized() {
        for i in 0..2000 {
            let c = color(i as f32 * 0.05);

            assert!((0.0..=1.0).contains(&c.x));
        }
    }

    #[test]
    fn other_channels_hold_constant() {
        for i in 0..100 {
            let c = color(i as f32 * 0.3);

            assert_eq!(c.y, 0.0);
            assert_eq!(c.z, 1.0);
            assert_eq!(c.w, 1.0);
        }
    }
}
