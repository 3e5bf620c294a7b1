use glam::Vec2;

pub const CARD_SELECTOR: &str = ".proximity-card";
pub const MAX_TILT_DEG: f32 = 10.0;

/// CSS custom properties driving a card's glow spot and 3D tilt.
#[derive(Debug, Clone, PartialEq)]
pub struct CardTilt {
    pub glow_x: String,
    pub glow_y: String,
    pub rotate_x: String,
    pub rotate_y: String,
}

impl CardTilt {
    /// `local` is the pointer relative to the card's top-left corner.
    pub fn from_pointer(local: Vec2, size: Vec2) -> Self {
        let center = size / 2.0;
        // Pointer below centre tips the card away (negative X rotation).
        let (rotate_x, rotate_y) = if center.x > 0.0 && center.y > 0.0 {
            (
                (center.y - local.y) / center.y * MAX_TILT_DEG,
                (local.x - center.x) / center.x * MAX_TILT_DEG,
            )
        } else {
            (0.0, 0.0)
        };
        Self {
            glow_x: format!("{}px", local.x),
            glow_y: format!("{}px", local.y),
            rotate_x: format!("{rotate_x}deg"),
            rotate_y: format!("{rotate_y}deg"),
        }
    }

    pub fn reset() -> Self {
        Self {
            glow_x: "-100%".into(),
            glow_y: "-100%".into(),
            rotate_x: "0deg".into(),
            rotate_y: "0deg".into(),
        }
    }

    pub fn properties(&self) -> [(&'static str, &str); 4] {
        [
            ("--x", &self.glow_x),
            ("--y", &self.glow_y),
            ("--rotateX", &self.rotate_x),
            ("--rotateY", &self.rotate_y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_is_flat() {
        let tilt = CardTilt::from_pointer(Vec2::new(100.0, 50.0), Vec2::new(200.0, 100.0));
        assert_eq!(tilt.rotate_x, "0deg");
        assert_eq!(tilt.rotate_y, "0deg");
        assert_eq!(tilt.glow_x, "100px");
    }

    #[test]
    fn corners_reach_the_limit() {
        let size = Vec2::new(200.0, 100.0);
        let bottom_right = CardTilt::from_pointer(size, size);
        assert_eq!(bottom_right.rotate_x, "-10deg");
        assert_eq!(bottom_right.rotate_y, "10deg");
        let top_left = CardTilt::from_pointer(Vec2::ZERO, size);
        assert_eq!(top_left.rotate_x, "10deg");
        assert_eq!(top_left.rotate_y, "-10deg");
    }

    #[test]
    fn degenerate_card_does_not_divide_by_zero() {
        let tilt = CardTilt::from_pointer(Vec2::new(3.0, 3.0), Vec2::ZERO);
        assert_eq!(tilt.rotate_x, "0deg");
    }

    #[test]
    fn reset_hides_the_glow() {
        let reset = CardTilt::reset();
        assert_eq!(reset.properties()[0], ("--x", "-100%"));
        assert_eq!(reset.properties()[3], ("--rotateY", "0deg"));
    }
}
