use crate::node::{NodeSize, NodeStatus};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable parameters of the force simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhysicsConfig {
    pub center_force: f32,
    pub repel_force: f32,
    pub repel_radius: f32,
    pub link_force: f32,
    pub min_z: f32,
    pub max_z: f32,
    pub z_drift: f32,
    pub float_amplitude: f32,
    // Tuned for a millisecond clock; see Simulation::step.
    pub float_speed: f32,
    pub velocity_decay: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            center_force: 0.02,
            repel_force: 150.0,
            repel_radius: 150.0,
            link_force: 0.3,
            min_z: -500.0,
            max_z: 500.0,
            z_drift: 0.5,
            float_amplitude: 3.0,
            float_speed: 0.02,
            velocity_decay: 0.92,
        }
    }
}

/// Pixel diameters for the three node size categories.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeSizes {
    pub large: f32,
    pub medium: f32,
    pub small: f32,
}

impl NodeSizes {
    #[inline]
    pub fn for_size(&self, size: NodeSize) -> f32 {
        match size {
            NodeSize::Large => self.large,
            NodeSize::Medium => self.medium,
            NodeSize::Small => self.small,
        }
    }
}

impl Default for NodeSizes {
    fn default() -> Self {
        Self {
            large: 60.0,
            medium: 40.0,
            small: 24.0,
        }
    }
}

/// Default hex color per node status.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatusColors {
    pub pending: String,
    pub in_progress: String,
    pub completed: String,
    pub blocked: String,
    pub not_started: String,
}

impl StatusColors {
    #[inline]
    pub fn for_status(&self, status: NodeStatus) -> &str {
        match status {
            NodeStatus::Pending => &self.pending,
            NodeStatus::InProgress => &self.in_progress,
            NodeStatus::Completed => &self.completed,
            NodeStatus::Blocked => &self.blocked,
            NodeStatus::NotStarted => &self.not_started,
        }
    }
}

impl Default for StatusColors {
    fn default() -> Self {
        Self {
            pending: "#6B7280".to_owned(),
            in_progress: "#F59E0B".to_owned(),
            completed: "#10B981".to_owned(),
            blocked: "#EF4444".to_owned(),
            not_started: "#374151".to_owned(),
        }
    }
}

/// Appearance parameters: sizes, colors and the depth mapping extremes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VisualConfig {
    pub node_sizes: NodeSizes,
    pub status_colors: StatusColors,
    pub min_opacity: f32,
    pub max_opacity: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub link_color: String,
    pub link_opacity: f32,
    pub link_width: f32,
    pub background_color: String,
    pub glow_enabled: bool,
    pub glow_color: String,
    pub glow_radius: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            node_sizes: NodeSizes::default(),
            status_colors: StatusColors::default(),
            min_opacity: 0.4,
            max_opacity: 1.0,
            min_scale: 0.4,
            max_scale: 1.0,
            link_color: "#4B5563".to_owned(),
            link_opacity: 0.3,
            link_width: 1.0,
            background_color: "#0F172A".to_owned(),
            glow_enabled: true,
            glow_color: "#10B981".to_owned(),
            glow_radius: 20.0,
        }
    }
}

/// Pointer parallax parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParallaxConfig {
    pub strength: f32,
    pub smoothing: f32,
    pub enabled: bool,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            strength: 30.0,
            smoothing: 0.1,
            enabled: true,
        }
    }
}

/// Partial physics settings; unset fields keep their defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhysicsOverrides {
    pub center_force: Option<f32>,
    pub repel_force: Option<f32>,
    pub repel_radius: Option<f32>,
    pub link_force: Option<f32>,
    pub min_z: Option<f32>,
    pub max_z: Option<f32>,
    pub z_drift: Option<f32>,
    pub float_amplitude: Option<f32>,
    pub float_speed: Option<f32>,
    pub velocity_decay: Option<f32>,
}

impl PhysicsOverrides {
    /// Merges these overrides over the defaults.
    pub fn resolve(&self) -> PhysicsConfig {
        let d = PhysicsConfig::default();
        PhysicsConfig {
            center_force: self.center_force.unwrap_or(d.center_force),
            repel_force: self.repel_force.unwrap_or(d.repel_force),
            repel_radius: self.repel_radius.unwrap_or(d.repel_radius),
            link_force: self.link_force.unwrap_or(d.link_force),
            min_z: self.min_z.unwrap_or(d.min_z),
            max_z: self.max_z.unwrap_or(d.max_z),
            z_drift: self.z_drift.unwrap_or(d.z_drift),
            float_amplitude: self.float_amplitude.unwrap_or(d.float_amplitude),
            float_speed: self.float_speed.unwrap_or(d.float_speed),
            velocity_decay: self.velocity_decay.unwrap_or(d.velocity_decay),
        }
    }
}

/// Partial visual settings. Nested tables (`node_sizes`, `status_colors`)
/// replace their group wholesale; this is a shallow merge, not a schema.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VisualOverrides {
    pub node_sizes: Option<NodeSizes>,
    pub status_colors: Option<StatusColors>,
    pub min_opacity: Option<f32>,
    pub max_opacity: Option<f32>,
    pub min_scale: Option<f32>,
    pub max_scale: Option<f32>,
    pub link_color: Option<String>,
    pub link_opacity: Option<f32>,
    pub link_width: Option<f32>,
    pub background_color: Option<String>,
    pub glow_enabled: Option<bool>,
    pub glow_color: Option<String>,
    pub glow_radius: Option<f32>,
}

impl VisualOverrides {
    pub fn resolve(&self) -> VisualConfig {
        let d = VisualConfig::default();
        VisualConfig {
            node_sizes: self.node_sizes.unwrap_or(d.node_sizes),
            status_colors: self.status_colors.clone().unwrap_or(d.status_colors),
            min_opacity: self.min_opacity.unwrap_or(d.min_opacity),
            max_opacity: self.max_opacity.unwrap_or(d.max_opacity),
            min_scale: self.min_scale.unwrap_or(d.min_scale),
            max_scale: self.max_scale.unwrap_or(d.max_scale),
            link_color: self.link_color.clone().unwrap_or(d.link_color),
            link_opacity: self.link_opacity.unwrap_or(d.link_opacity),
            link_width: self.link_width.unwrap_or(d.link_width),
            background_color: self.background_color.clone().unwrap_or(d.background_color),
            glow_enabled: self.glow_enabled.unwrap_or(d.glow_enabled),
            glow_color: self.glow_color.clone().unwrap_or(d.glow_color),
            glow_radius: self.glow_radius.unwrap_or(d.glow_radius),
        }
    }
}

/// Partial parallax settings.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParallaxOverrides {
    pub strength: Option<f32>,
    pub smoothing: Option<f32>,
    pub enabled: Option<bool>,
}

impl ParallaxOverrides {
    pub fn resolve(&self) -> ParallaxConfig {
        let d = ParallaxConfig::default();
        ParallaxConfig {
            strength: self.strength.unwrap_or(d.strength),
            smoothing: self.smoothing.unwrap_or(d.smoothing),
            enabled: self.enabled.unwrap_or(d.enabled),
        }
    }
}

/// All override sections in one bundle, as loaded from a config file.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConfigOverrides {
    pub physics: PhysicsOverrides,
    pub visual: VisualOverrides,
    pub parallax: ParallaxOverrides,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physics_defaults_match_documented_values() {
        let p = PhysicsConfig::default();
        assert_eq!(p.center_force, 0.02);
        assert_eq!(p.repel_force, 150.0);
        assert_eq!(p.repel_radius, 150.0);
        assert_eq!(p.link_force, 0.3);
        assert_eq!(p.min_z, -500.0);
        assert_eq!(p.max_z, 500.0);
        assert_eq!(p.z_drift, 0.5);
        assert_eq!(p.float_amplitude, 3.0);
        assert_eq!(p.float_speed, 0.02);
        assert_eq!(p.velocity_decay, 0.92);
    }

    #[test]
    fn visual_defaults_match_documented_values() {
        let v = VisualConfig::default();
        assert_eq!(v.node_sizes.for_size(NodeSize::Large), 60.0);
        assert_eq!(v.node_sizes.for_size(NodeSize::Medium), 40.0);
        assert_eq!(v.node_sizes.for_size(NodeSize::Small), 24.0);
        assert_eq!(v.status_colors.for_status(NodeStatus::Pending), "#6B7280");
        assert_eq!(v.status_colors.for_status(NodeStatus::InProgress), "#F59E0B");
        assert_eq!(v.status_colors.for_status(NodeStatus::Completed), "#10B981");
        assert_eq!(v.status_colors.for_status(NodeStatus::Blocked), "#EF4444");
        assert_eq!(v.status_colors.for_status(NodeStatus::NotStarted), "#374151");
        assert_eq!(v.min_opacity, 0.4);
        assert_eq!(v.max_opacity, 1.0);
        assert_eq!(v.min_scale, 0.4);
        assert_eq!(v.max_scale, 1.0);
        assert_eq!(v.link_opacity, 0.3);
        assert_eq!(v.link_width, 1.0);
        assert!(v.glow_enabled);
        assert_eq!(v.glow_radius, 20.0);
    }

    #[test]
    fn parallax_defaults_match_documented_values() {
        let p = ParallaxConfig::default();
        assert_eq!(p.strength, 30.0);
        assert_eq!(p.smoothing, 0.1);
        assert!(p.enabled);
    }

    #[test]
    fn resolve_touches_only_set_fields() {
        let overrides = PhysicsOverrides {
            center_force: Some(0.5),
            max_z: Some(200.0),
            ..PhysicsOverrides::default()
        };
        let resolved = overrides.resolve();
        assert_eq!(resolved.center_force, 0.5);
        assert_eq!(resolved.max_z, 200.0);
        // Everything else stays at its default.
        assert_eq!(resolved.repel_force, 150.0);
        assert_eq!(resolved.link_force, 0.3);
        assert_eq!(resolved.velocity_decay, 0.92);
    }

    #[test]
    fn nested_visual_overrides_replace_whole_groups() {
        let overrides = VisualOverrides {
            node_sizes: Some(NodeSizes {
                large: 80.0,
                medium: 50.0,
                small: 30.0,
            }),
            ..VisualOverrides::default()
        };
        let resolved = overrides.resolve();
        assert_eq!(resolved.node_sizes.large, 80.0);
        // Untouched groups keep their defaults.
        assert_eq!(resolved.status_colors, StatusColors::default());
        assert_eq!(resolved.background_color, "#0F172A");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_toml_resolves_against_defaults() {
        let raw = r#"
            [physics]
            repel_force = 200.0

            [parallax]
            enabled = false
        "#;
        let overrides: ConfigOverrides = toml::from_str(raw).unwrap();
        assert_eq!(overrides.physics.repel_force, Some(200.0));
        assert_eq!(overrides.physics.center_force, None);

        let physics = overrides.physics.resolve();
        assert_eq!(physics.repel_force, 200.0);
        assert_eq!(physics.center_force, 0.02);
        assert!(!overrides.parallax.resolve().enabled);
        // A missing section is an empty override set.
        assert_eq!(overrides.visual, VisualOverrides::default());
    }
}
