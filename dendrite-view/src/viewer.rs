//! Interactive graph viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the engine state
//! (simulation, parallax mapper, interaction layer, visual config) and
//! implements [`eframe::App`] to paint the graph and route pointer
//! input back into the engine.

use dendrite_core::config::{ParallaxConfig, PhysicsConfig, VisualConfig};
use dendrite_core::interaction::{GraphEvent, Interaction};
use dendrite_core::node::{GraphData, GraphNode, NodeStatus};
use dendrite_core::parallax::Parallax;
use dendrite_core::sim::Simulation;
use dendrite_core::types::Bounds;
use dendrite_core::visual::{depth_order, node_visual, screen_position};
use eframe::App;
use glam::Vec2;
use tracing::info;

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The engine: [`Simulation`], [`Parallax`], [`Interaction`],
///   [`VisualConfig`].
/// - The source graph, kept around for resets and the stats panel.
/// - eframe/egui callbacks for painting and pointer handling.
///
/// The typical per-frame update is:
/// 1. Measure the canvas and feed pointer input into the engine.
/// 2. Ease the parallax offset; tick the simulation if it is running.
/// 3. Paint links and nodes back-to-front at their offset positions.
/// 4. Drain engine events into the hover/selection state.
pub struct Viewer {
    data: GraphData,
    sim: Simulation,
    parallax: Parallax,
    interaction: Interaction,
    visual: VisualConfig,

    rng: rand::rngs::ThreadRng,

    hovered: Option<GraphNode>,
    selected: Option<GraphNode>,

    /// Set once the first frame has measured the canvas and seeded the
    /// node positions against the real container size.
    initialized: bool,
}

impl Viewer {
    pub fn new(
        data: GraphData,
        physics: PhysicsConfig,
        visual: VisualConfig,
        parallax: ParallaxConfig,
    ) -> Self {
        Self {
            sim: Simulation::new(physics, Bounds::default()),
            parallax: Parallax::new(parallax),
            interaction: Interaction::new(),
            visual,
            data,
            rng: rand::rng(),
            hovered: None,
            selected: None,
            initialized: false,
        }
    }

    /// Re-seeds every node position and drops in-flight pointer state.
    /// The graph data, configs and run state stay as they are.
    fn reset(&mut self) {
        self.sim.initialize(&self.data, &mut self.rng);
        self.interaction = Interaction::new();
        self.hovered = None;
    }

    /// Builds the top control bar (run/pause, single step, reset).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let label = if self.sim.is_running() {
                    "⏸ Pause"
                } else {
                    "▶ Run"
                };
                if ui.button(label).clicked() {
                    if self.sim.is_running() {
                        self.sim.stop();
                    } else {
                        self.sim.start();
                    }
                }

                if ui.button("Step").clicked() {
                    let now_ms = ctx.input(|i| i.time) * 1000.0;
                    self.sim.step(now_ms);
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }
            });
        });
    }

    /// Builds the bottom status bar (counts, hover, parallax offset).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let offset = self.parallax.offset();
                ui.label(format!("parallax = ({:.1}, {:.1})", offset.x, offset.y));
                ui.separator();
                ui.label(format!("nodes = {}", self.sim.nodes().len()));
                ui.label(format!("links = {}", self.sim.links().len()));
                if let Some(h) = &self.hovered {
                    ui.separator();
                    ui.label(format!("hover: {}", h.label));
                }
            });
        });
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the right-hand panel: engine tunables, a progress summary
    /// and the selected-node details.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(230.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Physics");
                Self::labeled_drag_f32(
                    ui,
                    "center_force:",
                    &mut self.sim.physics.center_force,
                    0.0..=1.0,
                    0.005,
                );
                Self::labeled_drag_f32(
                    ui,
                    "repel_force:",
                    &mut self.sim.physics.repel_force,
                    0.0..=1000.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "repel_radius:",
                    &mut self.sim.physics.repel_radius,
                    0.0..=1000.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "link_force:",
                    &mut self.sim.physics.link_force,
                    0.0..=2.0,
                    0.01,
                );
                Self::labeled_drag_f32(
                    ui,
                    "float_amplitude:",
                    &mut self.sim.physics.float_amplitude,
                    0.0..=20.0,
                    0.1,
                );
                Self::labeled_drag_f32(
                    ui,
                    "float_speed:",
                    &mut self.sim.physics.float_speed,
                    0.0..=0.2,
                    0.001,
                );
                Self::labeled_drag_f32(
                    ui,
                    "z_drift:",
                    &mut self.sim.physics.z_drift,
                    0.0..=5.0,
                    0.05,
                );
                Self::labeled_drag_f32(
                    ui,
                    "velocity_decay:",
                    &mut self.sim.physics.velocity_decay,
                    0.0..=1.0,
                    0.005,
                );

                ui.separator();
                ui.label("Parallax");
                ui.checkbox(&mut self.parallax.cfg.enabled, "enabled");
                Self::labeled_drag_f32(
                    ui,
                    "strength:",
                    &mut self.parallax.cfg.strength,
                    0.0..=200.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "smoothing:",
                    &mut self.parallax.cfg.smoothing,
                    0.01..=1.0,
                    0.01,
                );

                ui.separator();
                ui.label("Visual");
                ui.checkbox(&mut self.visual.glow_enabled, "glow");
                Self::labeled_drag_f32(
                    ui,
                    "glow_radius:",
                    &mut self.visual.glow_radius,
                    0.0..=100.0,
                    0.5,
                );
                Self::labeled_drag_f32(
                    ui,
                    "link_opacity:",
                    &mut self.visual.link_opacity,
                    0.0..=1.0,
                    0.01,
                );
                Self::labeled_drag_f32(
                    ui,
                    "link_width:",
                    &mut self.visual.link_width,
                    0.0..=10.0,
                    0.1,
                );

                ui.separator();
                if ui.button("Reset config").clicked() {
                    self.sim.physics = PhysicsConfig::default();
                    self.visual = VisualConfig::default();
                    self.parallax.cfg = ParallaxConfig::default();
                }

                ui.separator();
                ui.label("Progress");
                ui.label(format!("average: {:.0}%", average_progress(&self.data)));
                for status in [
                    NodeStatus::Completed,
                    NodeStatus::InProgress,
                    NodeStatus::Pending,
                    NodeStatus::Blocked,
                    NodeStatus::NotStarted,
                ] {
                    ui.label(format!(
                        "{:?}: {}",
                        status,
                        count_status(&self.data, status)
                    ));
                }

                ui.separator();
                ui.label("Selected");
                if let Some(node) = self.selected.clone() {
                    ui.label(node.label.as_str());
                    ui.label(format!("status: {:?}", node.status));
                    if let Some(p) = node.progress {
                        ui.add(egui::ProgressBar::new(p / 100.0).show_percentage());
                    }
                    if ui.button("Clear selection").clicked() {
                        self.selected = None;
                    }
                } else {
                    ui.label("click a node");
                }
            });
    }

    /// Builds the central canvas: input plumbing, engine ticking and the
    /// actual graph painting.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);
            let local =
                |p: egui::Pos2| Vec2::new(p.x - rect.min.x, p.y - rect.min.y);

            // The canvas rect is the simulation container.
            let bounds = Bounds::new(rect.width(), rect.height());
            if !self.initialized {
                self.sim.set_bounds(bounds);
                self.sim.initialize(&self.data, &mut self.rng);
                self.sim.start();
                self.initialized = true;
            } else if self.sim.bounds() != bounds {
                self.sim.set_bounds(bounds);
            }

            // Parallax follows the pointer; leaving recenters it.
            let hover_local = response.hover_pos().map(local);
            match hover_local {
                Some(p) => self.parallax.pointer_moved(p, bounds),
                None => self.parallax.pointer_left(),
            }

            // Drag lifecycle, then hover (hover freezes while dragging).
            if response.drag_started()
                && let Some(p) = response.interact_pointer_pos()
            {
                self.interaction
                    .drag_started(local(p), &self.sim, &self.parallax, &self.visual);
            }
            if response.dragged()
                && let Some(p) = response.interact_pointer_pos()
            {
                self.interaction
                    .drag_moved(local(p), &mut self.sim, &self.parallax);
            }
            if response.drag_stopped() {
                self.interaction.drag_stopped(&mut self.sim);
            }
            self.interaction
                .hover(hover_local, &self.sim, &self.parallax, &self.visual);
            if response.clicked() {
                self.interaction.clicked(&self.sim);
            }

            // Advance the engine.
            let parallax_active = self.parallax.advance();
            if self.sim.is_running() {
                let now_ms = ctx.input(|i| i.time) * 1000.0;
                self.sim.step(now_ms);
            }

            self.draw_graph(&painter, rect);

            // Hand engine events to the UI state.
            for event in self.interaction.take_events() {
                match event {
                    GraphEvent::HoverChanged(node) => self.hovered = node,
                    GraphEvent::NodeClicked(node) => {
                        info!(id = %node.id, label = %node.label, "node clicked");
                        self.selected = Some(node);
                    }
                }
            }

            if self.hovered.is_some() {
                ctx.output_mut(|o| o.cursor_icon = egui::CursorIcon::PointingHand);
            }

            if self.sim.is_running() || parallax_active {
                ctx.request_repaint();
            }
        });
    }

    /// Paints the whole graph back-to-front into the canvas rect.
    fn draw_graph(&self, painter: &egui::Painter, rect: egui::Rect) {
        let background = parse_hex_color(&self.visual.background_color)
            .unwrap_or(egui::Color32::from_rgb(15, 23, 42));
        painter.rect_filled(rect, 0.0, background);

        let nodes = self.sim.nodes();
        let to_screen = |p: Vec2| egui::pos2(rect.min.x + p.x, rect.min.y + p.y);

        // Links go under the nodes.
        let link_color = parse_hex_color(&self.visual.link_color)
            .unwrap_or(egui::Color32::GRAY)
            .gamma_multiply(self.visual.link_opacity);
        let stroke = egui::Stroke::new(self.visual.link_width, link_color);
        for link in self.sim.links() {
            let a = screen_position(&nodes[link.source], &self.parallax, &self.sim.physics);
            let b = screen_position(&nodes[link.target], &self.parallax, &self.sim.physics);
            painter.line_segment([to_screen(a), to_screen(b)], stroke);
        }

        for i in depth_order(nodes) {
            let n = &nodes[i];
            let v = node_visual(n, &self.sim.physics, &self.visual);
            let center = to_screen(screen_position(n, &self.parallax, &self.sim.physics));
            let radius = v.size * 0.5;
            let fill = parse_hex_color(v.color)
                .unwrap_or(egui::Color32::GRAY)
                .gamma_multiply(v.opacity);

            if self.visual.glow_enabled && n.node.status == NodeStatus::Completed {
                self.draw_glow(painter, center, radius, v.opacity);
            }

            let border = egui::Color32::WHITE.gamma_multiply(0.3 * v.opacity);
            painter.circle(center, radius, fill, egui::Stroke::new(2.0, border));

            if let Some(icon) = &n.node.icon {
                painter.text(
                    center,
                    egui::Align2::CENTER_CENTER,
                    icon,
                    egui::FontId::proportional(v.size * 0.5),
                    egui::Color32::WHITE.gamma_multiply(v.opacity),
                );
            }
        }

        // Label above the hovered node.
        if let Some(hovered) = &self.hovered
            && let Some(i) = self.sim.node_index(&hovered.id)
        {
            let n = &nodes[i];
            let v = node_visual(n, &self.sim.physics, &self.visual);
            let center = to_screen(screen_position(n, &self.parallax, &self.sim.physics));
            painter.text(
                center - egui::vec2(0.0, v.size * 0.5 + 6.0),
                egui::Align2::CENTER_BOTTOM,
                &n.node.label,
                egui::FontId::proportional(13.0),
                egui::Color32::WHITE,
            );
        }
    }

    /// Approximates the radial glow with a few stacked translucent
    /// circles, widest first.
    fn draw_glow(&self, painter: &egui::Painter, center: egui::Pos2, radius: f32, opacity: f32) {
        let glow = parse_hex_color(&self.visual.glow_color).unwrap_or(egui::Color32::GREEN);
        let layers = 4;
        for layer in (1..=layers).rev() {
            let t = layer as f32 / layers as f32;
            painter.circle_filled(
                center,
                radius + self.visual.glow_radius * t,
                glow.gamma_multiply(0.08 * opacity),
            );
        }
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

/// Parses `#RRGGBB` or `#RRGGBBAA` into a [`egui::Color32`]. The leading
/// `#` is optional; malformed strings yield `None`.
fn parse_hex_color(hex: &str) -> Option<egui::Color32> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let channel = |from: usize| u8::from_str_radix(&hex[from..from + 2], 16).ok();
    match hex.len() {
        6 => Some(egui::Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(egui::Color32::from_rgba_unmultiplied(
            channel(0)?,
            channel(2)?,
            channel(4)?,
            channel(6)?,
        )),
        _ => None,
    }
}

/// Number of nodes currently in the given status.
fn count_status(data: &GraphData, status: NodeStatus) -> usize {
    data.nodes.iter().filter(|n| n.status == status).count()
}

/// Mean completion across the graph. Completed nodes count as 100 even
/// without an explicit progress value; other nodes without one count 0.
fn average_progress(data: &GraphData) -> f32 {
    if data.nodes.is_empty() {
        return 0.0;
    }
    let total: f32 = data
        .nodes
        .iter()
        .map(|n| match (n.progress, n.status) {
            (Some(p), _) => p,
            (None, NodeStatus::Completed) => 100.0,
            (None, _) => 0.0,
        })
        .sum();
    total / data.nodes.len() as f32
}
