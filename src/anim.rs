use crate::core::FrameIndex;

/// Normalized timeline progress for a frame: `frame / (duration - 1)`,
/// clamped to [0,1]. Documents with one frame or fewer are static at
/// progress 0, which also guards the division.
pub fn timeline_progress(frame: FrameIndex, duration_in_frames: i64) -> f64 {
    if duration_in_frames <= 1 {
        return 0.0;
    }
    let t = frame.as_f64() / (duration_in_frames - 1) as f64;
    t.clamp(0.0, 1.0)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// The fixed smoothing curve: cubic-bezier(0.25, 0.1, 0.25, 1.0), the CSS
/// "ease" curve. Used for camera zoom and for [`RotationMode::Easing`].
/// Exactly 0 at t <= 0 and exactly 1 at t >= 1.
pub fn ease(t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    SMOOTH.sample_y(SMOOTH.solve_t_for_x(t))
}

const SMOOTH: UnitBezier = UnitBezier::new(0.25, 0.1, 0.25, 1.0);

/// Cubic bezier with endpoints pinned to (0,0) and (1,1), in the polynomial
/// form used by browser engines: sample x and y from the curve parameter,
/// invert x numerically to evaluate y as a function of x.
#[derive(Clone, Copy, Debug)]
struct UnitBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl UnitBezier {
    const fn new(p1x: f64, p1y: f64, p2x: f64, p2y: f64) -> Self {
        let cx = 3.0 * p1x;
        let bx = 3.0 * (p2x - p1x) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * p1y;
        let by = 3.0 * (p2y - p1y) - cy;
        let ay = 1.0 - cy - by;
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    fn sample_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Newton-Raphson with a bisection fallback when the derivative
    /// degenerates. x(t) is monotonic for control x-coordinates in [0,1].
    fn solve_t_for_x(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..8 {
            let err = self.sample_x(t) - x;
            if err.abs() < 1e-7 {
                return t;
            }
            let dx = self.sample_dx(t);
            if dx.abs() < 1e-6 {
                break;
            }
            t -= err / dx;
        }

        let mut lo = 0.0_f64;
        let mut hi = 1.0_f64;
        t = x;
        while hi - lo > 1e-7 {
            t = 0.5 * (lo + hi);
            if self.sample_x(t) < x {
                lo = t;
            } else {
                hi = t;
            }
        }
        t
    }
}

const SPRING_MASS: f64 = 1.0;
const SPRING_STIFFNESS: f64 = 100.0;
const SPRING_DAMPING: f64 = 10.0;
/// Remaining amplitude treated as at rest; sets the settle window length.
const SPRING_REST_DELTA: f64 = 0.005;

/// Under-damped spring response from 0 to 1 over normalized time. The fixed
/// constants give damping ratio 0.5, so the response overshoots (about 16%
/// at the first peak) and rings down within the timeline. Exactly 1 at
/// t >= 1: the final value is pinned rather than left to the residual
/// oscillation.
pub fn spring(t: f64) -> f64 {
    if t >= 1.0 {
        return 1.0;
    }
    let t = t.max(0.0);

    let omega0 = (SPRING_STIFFNESS / SPRING_MASS).sqrt();
    let zeta = SPRING_DAMPING / (2.0 * (SPRING_STIFFNESS * SPRING_MASS).sqrt());
    let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
    let settle_secs = (1.0 / SPRING_REST_DELTA).ln() / (zeta * omega0);

    let s = t * settle_secs;
    let decay = (-zeta * omega0 * s).exp();
    1.0 - decay * ((omega_d * s).cos() + (zeta * omega0 / omega_d) * (omega_d * s).sin())
}

/// How an element interpolates `initialRotation -> finalRotation`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationMode {
    #[default]
    Easing,
    Spring,
}

impl RotationMode {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Easing => ease(t),
            Self::Spring => spring(t),
        }
    }
}
