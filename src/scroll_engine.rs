//! Scroll physics for the project detail slider.
//!
//! The engine is a plain struct advanced once per animation frame by the
//! component that owns it. Nothing in here touches the DOM; every entry
//! point that depends on time takes `now_ms` from the caller, so the
//! whole thing runs under plain `cargo test`.

pub const SCROLL_SPEED: f64 = 0.75;
pub const LERP_FACTOR: f64 = 0.05;
pub const BUFFER_SIZE: i64 = 5;
pub const MAX_VELOCITY: f64 = 150.0;
pub const SNAP_DURATION_MS: f64 = 500.0;
pub const IDLE_THRESHOLD_MS: f64 = 100.0;
pub const DRAG_MULTIPLIER: f64 = 1.5;
pub const PARALLAX_DEPTH: f64 = 0.2;
pub const PARALLAX_LERP: f64 = 0.1;
pub const PARALLAX_EPSILON: f64 = 0.01;

// A snap only starts once the offset is further than this from a boundary.
const SNAP_TRIGGER_EPSILON: f64 = 1.0;

pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor
}

/// Maps any integer index onto `0..len`, wrapping in both directions.
/// `len` must be non-zero.
pub fn wrap_index(index: i64, len: usize) -> usize {
    debug_assert!(len > 0);
    let n = len as i64;
    (((index % n) + n) % n) as usize
}

/// 1-based, zero-padded slot label for the minimap ("00" for an empty
/// catalog).
pub fn slot_number(index: i64, len: usize) -> String {
    if len == 0 {
        return "00".to_string();
    }
    format!("{:02}", wrap_index(index, len) + 1)
}

struct Snap {
    started_ms: f64,
    from_y: f64,
    to_y: f64,
}

struct DragOrigin {
    touch_y: f64,
    target_y: f64,
}

/// Output of one frame step: the coarse state the view layer is allowed
/// to see. Fine-grained offsets go through [`ScrollEngine::offset_for`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub active_index: usize,
    pub window: (i64, i64),
}

pub struct ScrollEngine {
    current_y: f64,
    target_y: f64,
    drag: Option<DragOrigin>,
    snap: Option<Snap>,
    last_input_ms: f64,
    item_height: f64,
    item_count: usize,
}

impl ScrollEngine {
    pub fn new(item_count: usize, start_index: usize, item_height: f64, now_ms: f64) -> Self {
        let y = -(start_index as f64) * item_height;
        Self {
            current_y: y,
            target_y: y,
            drag: None,
            snap: None,
            last_input_ms: now_ms,
            item_height,
            item_count,
        }
    }

    /// Wheel input. Cancels any in-flight snap and accumulates a clamped,
    /// speed-scaled delta into the target offset.
    pub fn wheel(&mut self, delta_y: f64, now_ms: f64) {
        self.snap = None;
        self.last_input_ms = now_ms;
        let delta = (delta_y * SCROLL_SPEED).clamp(-MAX_VELOCITY, MAX_VELOCITY);
        self.target_y -= delta;
    }

    pub fn touch_start(&mut self, touch_y: f64, now_ms: f64) {
        self.snap = None;
        self.last_input_ms = now_ms;
        self.drag = Some(DragOrigin {
            touch_y,
            target_y: self.target_y,
        });
    }

    /// Direct drag tracking: the target follows the finger at 1.5x from
    /// wherever the gesture started. Ignored outside a gesture.
    pub fn touch_move(&mut self, touch_y: f64, now_ms: f64) {
        let Some(origin) = &self.drag else { return };
        self.target_y = origin.target_y + (touch_y - origin.touch_y) * DRAG_MULTIPLIER;
        self.last_input_ms = now_ms;
    }

    /// Ends a drag. No fling: easing just resumes from wherever the drag
    /// left the target.
    pub fn touch_end(&mut self) {
        self.drag = None;
    }

    /// Viewport re-measure. Takes effect on subsequent frames, no resnap.
    pub fn resize(&mut self, item_height: f64) {
        self.item_height = item_height;
    }

    /// Raw (unwrapped) index of the item nearest the target offset.
    pub fn nearest_index(&self) -> i64 {
        (-self.target_y / self.item_height).round() as i64
    }

    /// Programmatic prev/next: snaps to exactly `nearest + delta`,
    /// regardless of the current fractional offset.
    pub fn step_by(&mut self, delta: i64, now_ms: f64) {
        let to = self.nearest_index() + delta;
        self.begin_snap(to, now_ms);
    }

    fn begin_snap(&mut self, to_index: i64, now_ms: f64) {
        self.snap = Some(Snap {
            started_ms: now_ms,
            from_y: self.target_y,
            to_y: -(to_index as f64) * self.item_height,
        });
    }

    /// Advances the simulation by one animation frame.
    pub fn frame(&mut self, now_ms: f64) -> Frame {
        // Input has gone idle off a boundary: settle onto the nearest item.
        if self.snap.is_none()
            && self.drag.is_none()
            && now_ms - self.last_input_ms > IDLE_THRESHOLD_MS
        {
            let nearest = self.nearest_index();
            let snap_point = -(nearest as f64) * self.item_height;
            if (self.target_y - snap_point).abs() > SNAP_TRIGGER_EPSILON {
                self.begin_snap(nearest, now_ms);
            }
        }

        if let Some(snap) = &self.snap {
            let progress = ((now_ms - snap.started_ms) / SNAP_DURATION_MS).min(1.0);
            let eased = 1.0 - (1.0 - progress).powi(3);
            self.target_y = snap.from_y + (snap.to_y - snap.from_y) * eased;
            if progress >= 1.0 {
                self.snap = None;
            }
        }

        // Exponential smoothing is what makes ordinary scrolling feel
        // soft; it is suspended while a finger is down.
        if self.drag.is_none() {
            self.current_y = lerp(self.current_y, self.target_y, LERP_FACTOR);
        }

        let nearest = self.nearest_index();
        Frame {
            active_index: if self.item_count == 0 {
                0
            } else {
                wrap_index(nearest, self.item_count)
            },
            window: (nearest - BUFFER_SIZE, nearest + BUFFER_SIZE),
        }
    }

    /// Screen-space offset for a rendered slot.
    pub fn offset_for(&self, index: i64) -> f64 {
        index as f64 * self.item_height + self.current_y
    }

    pub fn current_y(&self) -> f64 {
        self.current_y
    }

    pub fn target_y(&self) -> f64 {
        self.target_y
    }

    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    pub fn is_snapping(&self) -> bool {
        self.snap.is_some()
    }
}

/// Per-image parallax state. The inner image drifts at 20% of its
/// container's speed; once the eased value is within epsilon of the
/// target the tracker goes quiet and the caller skips the style write.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParallaxTracker {
    current: f64,
}

impl ParallaxTracker {
    /// Returns the next offset to write, or `None` once converged. The
    /// stored value only advances when a write happens, mirroring the
    /// skip of the DOM mutation.
    pub fn advance(&mut self, target: f64) -> Option<f64> {
        let next = lerp(self.current, target, PARALLAX_LERP);
        if (next - target).abs() > PARALLAX_EPSILON {
            self.current = next;
            Some(next)
        } else {
            None
        }
    }
}

/// Parallax destination for slot `index` under scroll offset `scroll_y`.
pub fn parallax_target(scroll_y: f64, index: i64, item_height: f64) -> f64 {
    (-scroll_y - index as f64 * item_height) * PARALLAX_DEPTH
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: f64 = 800.0;

    fn engine() -> ScrollEngine {
        ScrollEngine::new(6, 0, H, 0.0)
    }

    #[test]
    fn wrap_index_is_cyclic_in_both_directions() {
        for n in 1..7usize {
            for i in -25i64..25 {
                let expected = (((i % n as i64) + n as i64) % n as i64) as usize;
                assert_eq!(wrap_index(i, n), expected, "i={i} n={n}");
            }
        }
        assert_eq!(wrap_index(-1, 5), 4);
        assert_eq!(wrap_index(5, 5), 0);
    }

    #[test]
    fn slot_numbers_are_one_based_and_padded() {
        assert_eq!(slot_number(0, 6), "01");
        assert_eq!(slot_number(-1, 6), "06");
        assert_eq!(slot_number(11, 6), "06");
        assert_eq!(slot_number(3, 0), "00");
    }

    #[test]
    fn wheel_delta_is_scaled_and_clamped() {
        let mut e = engine();
        e.wheel(100.0, 0.0);
        assert_eq!(e.target_y(), -75.0);

        let mut e = engine();
        e.wheel(10_000.0, 0.0);
        assert_eq!(e.target_y(), -MAX_VELOCITY);

        let mut e = engine();
        e.wheel(-10_000.0, 0.0);
        assert_eq!(e.target_y(), MAX_VELOCITY);
    }

    #[test]
    fn wheel_cancels_active_snap() {
        let mut e = engine();
        e.wheel(200.0, 0.0);
        e.frame(200.0);
        assert!(e.is_snapping());
        e.wheel(10.0, 210.0);
        assert!(!e.is_snapping());
    }

    #[test]
    fn idle_input_triggers_snap() {
        let mut e = engine();
        // Leave the target 150px off the boundary, then go idle.
        e.wheel(200.0, 0.0);
        let idle = IDLE_THRESHOLD_MS + 1.0;
        e.frame(idle);
        assert!(e.is_snapping());
    }

    #[test]
    fn no_snap_when_already_on_boundary() {
        let mut e = engine();
        e.frame(1_000.0);
        assert!(!e.is_snapping());
    }

    #[test]
    fn no_snap_while_dragging() {
        let mut e = engine();
        e.touch_start(300.0, 0.0);
        e.touch_move(250.0, 10.0);
        e.frame(10_000.0);
        assert!(!e.is_snapping());
    }

    #[test]
    fn snap_converges_to_item_boundary() {
        let mut e = engine();
        e.wheel(200.0, 0.0);
        // target is now -150, nearest boundary 0
        let t0 = 200.0;
        e.frame(t0); // idle check fires, snap begins
        assert!(e.is_snapping());
        e.frame(t0 + SNAP_DURATION_MS);
        assert_eq!(e.target_y(), 0.0);
        assert!(!e.is_snapping());
    }

    #[test]
    fn snap_lands_on_nearest_multiple_of_height() {
        let mut e = engine();
        // Scroll far enough that index 1 is nearest.
        for i in 0..4 {
            e.wheel(1_000.0, i as f64 * 10.0);
        }
        assert_eq!(e.target_y(), -600.0);
        e.frame(200.0);
        e.frame(200.0 + SNAP_DURATION_MS + 1.0);
        assert_eq!(e.target_y(), -H);
        assert!(!e.is_snapping());
    }

    #[test]
    fn snap_easing_is_monotonic_cubic_out() {
        let mut e = engine();
        e.wheel(200.0, 0.0);
        e.frame(200.0);
        let mut prev = e.target_y();
        for step in 1..10 {
            e.frame(200.0 + step as f64 * 50.0);
            let y = e.target_y();
            assert!(y >= prev, "snap moved backwards: {prev} -> {y}");
            prev = y;
        }
    }

    #[test]
    fn drag_tracks_finger_at_multiplier() {
        let mut e = engine();
        e.touch_start(500.0, 0.0);
        e.touch_move(440.0, 16.0);
        assert_eq!(e.target_y(), -90.0); // -60px * 1.5
        let before = e.current_y();
        e.frame(32.0);
        // easing suspended mid-drag
        assert_eq!(e.current_y(), before);
        e.touch_end();
        e.frame(48.0);
        assert!(e.current_y() < before);
    }

    #[test]
    fn touch_move_without_start_is_ignored() {
        let mut e = engine();
        e.touch_move(123.0, 0.0);
        assert_eq!(e.target_y(), 0.0);
    }

    #[test]
    fn current_eases_toward_target() {
        let mut e = engine();
        e.wheel(100.0, 0.0);
        e.frame(10.0);
        assert_eq!(e.current_y(), -75.0 * LERP_FACTOR);
    }

    #[test]
    fn step_by_moves_one_whole_item() {
        let mut e = engine();
        e.step_by(1, 0.0);
        e.frame(SNAP_DURATION_MS);
        assert_eq!(e.target_y(), -H);
        e.step_by(-1, 600.0);
        e.frame(600.0 + SNAP_DURATION_MS);
        assert_eq!(e.target_y(), 0.0);
    }

    #[test]
    fn step_by_discards_fractional_offset() {
        let mut e = engine();
        e.wheel(100.0, 0.0); // target -75, nearest still 0
        e.step_by(1, 0.0);
        e.frame(SNAP_DURATION_MS);
        assert_eq!(e.target_y(), -H);
    }

    #[test]
    fn render_window_is_bounded() {
        let mut e = ScrollEngine::new(500, 0, H, 0.0);
        for i in 0..50 {
            e.wheel(3_000.0, i as f64 * 16.0);
            let frame = e.frame(i as f64 * 16.0 + 8.0);
            let (min, max) = frame.window;
            assert_eq!(max - min + 1, 2 * BUFFER_SIZE + 1);
        }
    }

    #[test]
    fn active_index_wraps_over_catalog() {
        let mut e = ScrollEngine::new(3, 0, H, 0.0);
        // Scroll backwards past the first item.
        for i in 0..6 {
            e.wheel(-1_000.0, i as f64 * 10.0);
        }
        assert_eq!(e.target_y(), 900.0);
        let frame = e.frame(60.0);
        // nearest raw index -1 resolves to the last project
        assert_eq!(frame.active_index, 2);
    }

    #[test]
    fn resize_affects_subsequent_boundaries_only() {
        let mut e = engine();
        e.resize(1_000.0);
        assert!(!e.is_snapping());
        assert_eq!(e.item_height(), 1_000.0);
        e.step_by(1, 0.0);
        e.frame(SNAP_DURATION_MS);
        assert_eq!(e.target_y(), -1_000.0);
    }

    #[test]
    fn parallax_converges_then_goes_quiet() {
        let mut p = ParallaxTracker::default();
        let target = parallax_target(-1_234.0, 1, H);
        let mut writes = 0;
        let mut last = None;
        for _ in 0..500 {
            match p.advance(target) {
                Some(v) => {
                    writes += 1;
                    last = Some(v);
                }
                None => break,
            }
        }
        assert!(writes > 0);
        assert!((last.unwrap() - target).abs() <= PARALLAX_EPSILON + 0.1);
        // Converged: no further writes for the same target.
        for _ in 0..10 {
            assert_eq!(p.advance(target), None);
        }
    }

    #[test]
    fn parallax_moves_at_depth_factor() {
        assert_eq!(parallax_target(0.0, 0, H), 0.0);
        assert_eq!(parallax_target(-800.0, 0, H), 160.0);
        assert_eq!(parallax_target(-800.0, 1, H), 0.0);
    }

    #[test]
    fn empty_catalog_reports_slot_zero() {
        let mut e = ScrollEngine::new(0, 0, H, 0.0);
        let frame = e.frame(16.0);
        assert_eq!(frame.active_index, 0);
    }
}
