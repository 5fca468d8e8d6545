use crate::constants::SPIN_EASING_POINTS;

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 64;
const EPSILON: f64 = 1e-7;

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    cx: f64,
    bx: f64,
    ax: f64,
    cy: f64,
    by: f64,
    ay: f64,
}

pub fn spin_easing() -> CubicBezier {
    let (x1, y1, x2, y2) = SPIN_EASING_POINTS;
    CubicBezier::new(x1, y1, x2, y2)
}

impl CubicBezier {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self { cx, bx, ax, cy, by, ay }
    }

    fn sample_x(&self, s: f64) -> f64 {
        ((self.ax * s + self.bx) * s + self.cx) * s
    }

    fn sample_y(&self, s: f64) -> f64 {
        ((self.ay * s + self.by) * s + self.cy) * s
    }

    fn sample_dx(&self, s: f64) -> f64 {
        (3.0 * self.ax * s + 2.0 * self.bx) * s + self.cx
    }

    fn solve_x(&self, x: f64) -> f64 {
        let mut s = x;
        for _ in 0..NEWTON_ITERATIONS {
            let error = self.sample_x(s) - x;
            if error.abs() < EPSILON {
                return s;
            }
            let slope = self.sample_dx(s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= error / slope;
        }

        let (mut low, mut high) = (0.0, 1.0);
        s = x;
        for _ in 0..BISECTION_ITERATIONS {
            let current = self.sample_x(s);
            if (current - x).abs() < EPSILON {
                break;
            }
            if x > current {
                low = s;
            } else {
                high = s;
            }
            s = (low + high) / 2.0;
        }
        s
    }

    /// Eased progress for linear progress `t`, clamped to `[0, 1]`.
    pub fn ease(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        self.sample_y(self.solve_x(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let easing = spin_easing();
        assert_eq!(easing.ease(0.0), 0.0);
        assert_eq!(easing.ease(1.0), 1.0);
        assert_eq!(easing.ease(-3.0), 0.0);
        assert_eq!(easing.ease(2.0), 1.0);
    }

    #[test]
    fn test_linear_curve_is_identity() {
        let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert!((linear.ease(t) - t).abs() < 1e-5);
        }
    }

    #[test]
    fn test_spin_easing_is_monotonic_and_front_loaded() {
        let easing = spin_easing();
        let mut previous = 0.0;
        for i in 1..=100 {
            let value = easing.ease(i as f64 / 100.0);
            assert!(value >= previous);
            previous = value;
        }
        // Most of the rotation happens early, leaving a long slow tail.
        assert!(easing.ease(0.5) > 0.85);
        assert!(easing.ease(0.1) > 0.1);
    }

    #[test]
    fn test_matches_curve_parameterisation() {
        let easing = spin_easing();
        let s: f64 = 0.5;
        // x(0.5) and y(0.5) straight from the Bernstein form.
        let x = 3.0 * (1.0 - s).powi(2) * s * 0.2 + 3.0 * (1.0 - s) * s * s * 0.3 + s.powi(3);
        let y = 3.0 * (1.0 - s).powi(2) * s * 0.8 + 3.0 * (1.0 - s) * s * s * 1.0 + s.powi(3);
        assert!((easing.ease(x) - y).abs() < 1e-5);
    }
}
