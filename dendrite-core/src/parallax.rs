use crate::config::ParallaxConfig;
use crate::types::Bounds;
use crate::visual::normalized_depth;
use glam::Vec2;

/// Component deltas below this are treated as settled; easing stops.
const SETTLE_EPSILON: f32 = 0.001;
/// Offset share applied to the farthest nodes.
const FAR_FACTOR: f32 = 0.3;
/// Extra share gained linearly toward the nearest nodes.
const NEAR_SPAN: f32 = 0.7;

/// Pointer-driven parallax state.
///
/// The mapper keeps two offsets:
///
/// - `target` — where the pointer says the scene should lean, set
///   instantly on every pointer move.
/// - `current` — the smoothed offset actually applied to rendering,
///   eased toward `target` a fraction per frame by [`Parallax::advance`].
///
/// Per node, the offset is scaled by a depth factor so near nodes sweep
/// further than far ones, which is what sells the depth illusion.
///
/// The mapper is independent of the simulation; it only needs each
/// node's depth at query time.
#[derive(Clone, Debug)]
pub struct Parallax {
    pub cfg: ParallaxConfig,
    current: Vec2,
    target: Vec2,
}

impl Parallax {
    pub fn new(cfg: ParallaxConfig) -> Self {
        Self {
            cfg,
            current: Vec2::ZERO,
            target: Vec2::ZERO,
        }
    }

    /// Retargets the offset from a pointer position inside the container.
    ///
    /// The pointer is normalized against the container center to
    /// `[-1, 1]` per axis and scaled by the configured strength. Does
    /// nothing while the mapper is disabled.
    ///
    /// ### Parameters
    /// - `pointer` - Pointer position in container coordinates.
    /// - `bounds` - Current container size.
    pub fn pointer_moved(&mut self, pointer: Vec2, bounds: Bounds) {
        if !self.cfg.enabled {
            return;
        }
        let center = bounds.center();
        // Degenerate containers normalize against 1 instead of dividing
        // by zero.
        let denom = center.max(Vec2::ONE);
        let normalized = (pointer - center) / denom;
        self.target = normalized * self.cfg.strength;
    }

    /// Recenters the target; the current offset eases back to rest.
    pub fn pointer_left(&mut self) {
        self.target = Vec2::ZERO;
    }

    /// Moves the current offset one smoothing step toward the target.
    ///
    /// ### Returns
    /// `true` if the offset moved, `false` once both component deltas are
    /// below the settle threshold. Callers use this to stop scheduling
    /// frames when the parallax is at rest.
    pub fn advance(&mut self) -> bool {
        let delta = self.target - self.current;
        if delta.x.abs() < SETTLE_EPSILON && delta.y.abs() < SETTLE_EPSILON {
            return false;
        }
        self.current += delta * self.cfg.smoothing;
        true
    }

    /// The smoothed offset, before any depth scaling.
    pub fn offset(&self) -> Vec2 {
        self.current
    }

    /// The offset to apply to a node at depth `z`, or zero when disabled.
    pub fn node_offset(&self, z: f32, min_z: f32, max_z: f32) -> Vec2 {
        if !self.cfg.enabled {
            return Vec2::ZERO;
        }
        self.current * depth_factor(z, min_z, max_z)
    }
}

/// Depth scaling for the parallax offset: far nodes move at 30% of the
/// pointer offset, near nodes at 100%, linear in between.
#[inline]
pub fn depth_factor(z: f32, min_z: f32, max_z: f32) -> f32 {
    FAR_FACTOR + normalized_depth(z, min_z, max_z) * NEAR_SPAN
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> Parallax {
        Parallax::new(ParallaxConfig::default())
    }

    #[test]
    fn pointer_at_center_yields_no_offset() {
        let mut p = mapper();
        p.pointer_moved(Vec2::new(400.0, 300.0), Bounds::new(800.0, 600.0));
        assert_eq!(p.target, Vec2::ZERO);
        // Nothing to ease toward.
        assert!(!p.advance());
        assert_eq!(p.offset(), Vec2::ZERO);
    }

    #[test]
    fn corner_pointer_targets_full_strength() {
        let mut p = mapper();
        let bounds = Bounds::new(800.0, 600.0);
        p.pointer_moved(Vec2::new(800.0, 600.0), bounds);
        assert_eq!(p.target, Vec2::new(30.0, 30.0));
        p.pointer_moved(Vec2::ZERO, bounds);
        assert_eq!(p.target, Vec2::new(-30.0, -30.0));
    }

    #[test]
    fn offset_eases_toward_target_and_settles() {
        let mut p = mapper();
        p.pointer_moved(Vec2::new(800.0, 600.0), Bounds::new(800.0, 600.0));

        let mut steps = 0;
        while p.advance() {
            steps += 1;
            assert!(steps < 150, "easing never settled");
        }
        // Geometric approach: within the settle threshold of the target.
        assert!((p.offset() - Vec2::new(30.0, 30.0)).length() < 0.02);
        // Settled means further calls are no-ops.
        let settled = p.offset();
        assert!(!p.advance());
        assert_eq!(p.offset(), settled);
    }

    #[test]
    fn pointer_leave_eases_back_to_rest() {
        let mut p = mapper();
        let bounds = Bounds::new(800.0, 600.0);
        p.pointer_moved(Vec2::new(800.0, 600.0), bounds);
        for _ in 0..10 {
            p.advance();
        }
        assert!(p.offset().length() > 1.0);

        p.pointer_left();
        while p.advance() {}
        assert!(p.offset().length() < 0.02);
    }

    #[test]
    fn disabled_mapper_ignores_the_pointer() {
        let mut p = Parallax::new(ParallaxConfig {
            enabled: false,
            ..ParallaxConfig::default()
        });
        p.pointer_moved(Vec2::new(800.0, 600.0), Bounds::new(800.0, 600.0));
        assert!(!p.advance());
        assert_eq!(p.node_offset(500.0, -500.0, 500.0), Vec2::ZERO);
    }

    #[test]
    fn disabling_mid_flight_zeroes_node_offsets() {
        let mut p = mapper();
        p.pointer_moved(Vec2::new(800.0, 600.0), Bounds::new(800.0, 600.0));
        for _ in 0..10 {
            p.advance();
        }
        assert!(p.node_offset(0.0, -500.0, 500.0).length() > 0.0);

        p.cfg.enabled = false;
        assert_eq!(p.node_offset(0.0, -500.0, 500.0), Vec2::ZERO);
    }

    #[test]
    fn depth_factor_spans_far_to_near() {
        assert_eq!(depth_factor(-500.0, -500.0, 500.0), 0.3);
        assert_eq!(depth_factor(500.0, -500.0, 500.0), 1.0);
        assert!((depth_factor(0.0, -500.0, 500.0) - 0.65).abs() < 1e-6);
        // Zero depth range degrades to the far factor instead of NaN.
        assert_eq!(depth_factor(5.0, 5.0, 5.0), 0.3);
    }

    #[test]
    fn near_nodes_sweep_further_than_far_ones() {
        let mut p = mapper();
        p.pointer_moved(Vec2::new(800.0, 600.0), Bounds::new(800.0, 600.0));
        while p.advance() {}

        let near = p.node_offset(500.0, -500.0, 500.0);
        let far = p.node_offset(-500.0, -500.0, 500.0);
        assert!(near.length() > far.length());
        assert!((far.length() / near.length() - 0.3).abs() < 1e-3);
    }
}
