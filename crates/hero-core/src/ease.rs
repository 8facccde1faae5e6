/// Easing curves in the power family.
///
/// `In(n)`/`Out(n)`/`InOut(n)` use exponent `n + 1`, so `Out(2)` is a cubic
/// ease-out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    In(u8),
    Out(u8),
    InOut(u8),
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Out(2)
    }
}

impl Ease {
    /// Map linear progress in `[0, 1]` to eased progress. Input is clamped.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::In(p) => t.powi(p as i32 + 1),
            Ease::Out(p) => 1.0 - (1.0 - t).powi(p as i32 + 1),
            Ease::InOut(p) => {
                let e = p as i32 + 1;
                if t < 0.5 {
                    0.5 * (2.0 * t).powi(e)
                } else {
                    1.0 - 0.5 * (2.0 * (1.0 - t)).powi(e)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_is_front_loaded() {
        assert!(Ease::Out(2).apply(0.25) > 0.25);
        assert!(Ease::In(2).apply(0.25) < 0.25);
        assert!((Ease::InOut(2).apply(0.5) - 0.5).abs() < 1e-6);
    }
}
