//! One-finger drag to rotate

/// A touch contact in client (CSS pixel) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: i32,
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(id: i32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// Turns horizontal single-touch drags into yaw increments.
///
/// While more than one finger is down the tracked position is left as it
/// was and moves are ignored.
#[derive(Debug, Clone)]
pub struct GestureController {
    last_x: Option<f32>,
    sensitivity: f32,
}

impl GestureController {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            last_x: None,
            sensitivity,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.last_x.is_some()
    }

    /// `touches` is every contact currently on the surface
    pub fn touch_start(&mut self, touches: &[TouchPoint]) {
        match touches {
            [only] => self.last_x = Some(only.x),
            _ => log::debug!("{} touches down; drag suspended", touches.len()),
        }
    }

    /// Returns the yaw increment in radians, zero unless `placed`
    pub fn touch_move(&mut self, touches: &[TouchPoint], placed: bool) -> f32 {
        let [only] = touches else {
            return 0.0;
        };
        let Some(last_x) = self.last_x else {
            return 0.0;
        };

        let delta = only.x - last_x;
        self.last_x = Some(only.x);

        if placed {
            delta * self.sensitivity
        } else {
            0.0
        }
    }

    /// `remaining` is the contacts still down after the lift. Going back to
    /// a single contact resumes the drag from that contact's position.
    pub fn touch_end(&mut self, remaining: &[TouchPoint]) {
        self.last_x = match remaining {
            [only] => Some(only.x),
            _ => None,
        };
    }
}
