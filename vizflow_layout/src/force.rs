// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Iterative force simulation for bubble and beeswarm charts.
//!
//! Nodes are relaxed toward per-node target positions by per-axis attraction
//! forces while a pairwise collision force keeps circles from overlapping.
//! The engine owns its node arena and mutates it in place; callers drive it
//! one [`Simulation::step`] at a time (the renderer's animation tick) or to
//! completion with [`Simulation::run`].

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Golden angle, in radians. Used to seed initial positions so coincident
/// targets still separate deterministically.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

const SEED_RADIUS: f64 = 10.0;

/// One circle in the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimNode {
    /// Stable identity, carried through to the rendered mark.
    pub key: String,
    /// Collision radius.
    pub radius: f64,
    /// Where the attraction forces pull this node.
    pub target: Point,
    /// Current center, updated in place each step.
    pub pos: Point,
    /// Current velocity, updated in place each step.
    pub vel: Vec2,
}

impl SimNode {
    /// Creates a node at rest. Its initial position is seeded by the
    /// simulation.
    pub fn new(key: impl Into<String>, radius: f64, target: Point) -> Self {
        Self {
            key: key.into(),
            radius,
            target,
            pos: target,
            vel: Vec2::ZERO,
        }
    }
}

/// A force contributing velocity each step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Force {
    /// Pull each node horizontally toward its target x.
    X {
        /// Fraction of the remaining distance applied per step, in `[0, 1]`.
        strength: f64,
    },
    /// Pull each node vertically toward its target y.
    Y {
        /// Fraction of the remaining distance applied per step, in `[0, 1]`.
        strength: f64,
    },
    /// Push overlapping circle pairs apart.
    Collide {
        /// Extra clearance added around every circle.
        padding: f64,
    },
}

/// Tuning knobs for the iteration loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationOptions {
    /// Velocity friction applied after force accumulation each step.
    pub decay: f64,
    /// Per-step cooling of the attraction forces.
    ///
    /// Attraction is scaled by an alpha that starts at 1 and shrinks by
    /// this fraction every step. Without cooling, attraction and collision
    /// would balance at a standing overlap instead of settling.
    pub alpha_decay: f64,
    /// The simulation converges when every node's speed drops below this.
    pub velocity_epsilon: f64,
    /// Hard cap on iterations. Hitting it is an outcome, not an error.
    pub max_iterations: usize,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            decay: 0.6,
            alpha_decay: 0.05,
            velocity_epsilon: 1e-3,
            max_iterations: 300,
        }
    }
}

/// Where the simulation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationPhase {
    /// Still relaxing.
    Iterating,
    /// Every node's speed fell below the epsilon.
    Converged,
    /// The iteration cap was hit before convergence.
    ForcedStop,
}

/// How a completed run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationOutcome {
    /// Converged after this many iterations.
    Converged {
        /// Steps taken.
        iterations: usize,
    },
    /// Stopped at the cap after this many iterations.
    ForcedStop {
        /// Steps taken.
        iterations: usize,
    },
}

/// The force layout engine.
///
/// Holding `&mut Simulation` is what serializes callers: there is no
/// busy-flag, a second driver simply cannot exist while one is stepping.
#[derive(Debug, Clone)]
pub struct Simulation {
    nodes: Vec<SimNode>,
    forces: Vec<Force>,
    bounds: Rect,
    options: SimulationOptions,
    alpha: f64,
    iterations: usize,
    phase: SimulationPhase,
}

impl Simulation {
    /// Creates a simulation over `nodes`, seeding each node's position at
    /// its target plus a deterministic golden-angle phyllotaxis offset so
    /// coincident targets separate without randomness.
    pub fn new(
        mut nodes: Vec<SimNode>,
        forces: Vec<Force>,
        bounds: Rect,
        options: SimulationOptions,
    ) -> Self {
        for (i, node) in nodes.iter_mut().enumerate() {
            let i = i as f64;
            let r = SEED_RADIUS * (0.5 + i).sqrt();
            let a = i * GOLDEN_ANGLE;
            node.pos = node.target + Vec2::new(r * a.cos(), r * a.sin());
            node.pos = clamp_to(node.pos, bounds);
            node.vel = Vec2::ZERO;
        }
        Self {
            nodes,
            forces,
            bounds,
            options,
            alpha: 1.0,
            iterations: 0,
            phase: SimulationPhase::Iterating,
        }
    }

    /// The node arena, in input order.
    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    /// Steps taken so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    /// Advances the simulation by one iteration.
    ///
    /// Each step accumulates velocity from every force (attraction scaled
    /// by the cooling alpha), applies friction decay, moves the nodes and
    /// clamps their centers to the bounds. Once the phase leaves
    /// `Iterating` further calls do nothing.
    pub fn step(&mut self) -> SimulationPhase {
        if self.phase != SimulationPhase::Iterating {
            return self.phase;
        }

        let alpha = self.alpha;
        for fi in 0..self.forces.len() {
            match self.forces[fi] {
                Force::X { strength } => {
                    for node in &mut self.nodes {
                        node.vel.x += (node.target.x - node.pos.x) * strength * alpha;
                    }
                }
                Force::Y { strength } => {
                    for node in &mut self.nodes {
                        node.vel.y += (node.target.y - node.pos.y) * strength * alpha;
                    }
                }
                Force::Collide { padding } => self.collide(padding),
            }
        }
        self.alpha *= 1.0 - self.options.alpha_decay;

        let mut max_speed = 0.0_f64;
        for node in &mut self.nodes {
            node.vel *= self.options.decay;
            node.pos += node.vel;
            node.pos = clamp_to(node.pos, self.bounds);
            max_speed = max_speed.max(node.vel.hypot());
        }

        self.iterations += 1;
        if max_speed < self.options.velocity_epsilon {
            log::debug!("force simulation converged after {} steps", self.iterations);
            self.phase = SimulationPhase::Converged;
        } else if self.iterations >= self.options.max_iterations {
            log::warn!(
                "force simulation stopped at the {}-step cap (max speed {max_speed})",
                self.options.max_iterations
            );
            self.phase = SimulationPhase::ForcedStop;
        }
        self.phase
    }

    /// Drives the simulation to completion, invoking `on_tick` with the
    /// node arena after every step.
    pub fn run(&mut self, mut on_tick: impl FnMut(&[SimNode])) -> SimulationOutcome {
        while self.step() == SimulationPhase::Iterating {
            on_tick(&self.nodes);
        }
        on_tick(&self.nodes);
        match self.phase {
            SimulationPhase::Converged => SimulationOutcome::Converged {
                iterations: self.iterations,
            },
            _ => SimulationOutcome::ForcedStop {
                iterations: self.iterations,
            },
        }
    }

    /// Symmetric unit-mass collision: each overlapping pair is pushed apart
    /// along its separation axis by half the overlap each.
    fn collide(&mut self, padding: f64) {
        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                let min_dist = self.nodes[i].radius + self.nodes[j].radius + 2.0 * padding;
                let delta = self.nodes[j].pos - self.nodes[i].pos;
                let dist = delta.hypot();
                if dist >= min_dist {
                    continue;
                }
                // Coincident centers get a deterministic separation axis.
                let dir = if dist > 0.0 {
                    delta / dist
                } else {
                    let a = (i + j) as f64 * GOLDEN_ANGLE;
                    Vec2::new(a.cos(), a.sin())
                };
                let push = dir * ((min_dist - dist) / 2.0);
                self.nodes[i].vel -= push;
                self.nodes[j].vel += push;
            }
        }
    }
}

fn clamp_to(p: Point, bounds: Rect) -> Point {
    Point::new(p.x.clamp(bounds.x0, bounds.x1), p.y.clamp(bounds.y0, bounds.y1))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 200.0)
    }

    fn attraction() -> Vec<Force> {
        vec![Force::X { strength: 1.0 }, Force::Y { strength: 1.2 }]
    }

    #[test]
    fn single_node_settles_on_its_target() {
        let nodes = vec![SimNode::new("a", 5.0, Point::new(100.0, 80.0))];
        let mut sim = Simulation::new(nodes, attraction(), bounds(), SimulationOptions::default());
        let outcome = sim.run(|_| {});
        assert!(matches!(outcome, SimulationOutcome::Converged { .. }));
        let node = &sim.nodes()[0];
        assert!((node.pos - Point::new(100.0, 80.0)).hypot() < 0.1);
    }

    #[test]
    fn overlapping_nodes_separate_to_their_radii() {
        let mut forces = attraction();
        forces.push(Force::Collide { padding: 0.0 });
        let nodes = vec![
            SimNode::new("a", 10.0, Point::new(200.0, 100.0)),
            SimNode::new("b", 10.0, Point::new(200.0, 100.0)),
            SimNode::new("c", 8.0, Point::new(205.0, 100.0)),
        ];
        let mut sim = Simulation::new(nodes, forces, bounds(), SimulationOptions::default());
        sim.run(|_| {});
        let nodes = sim.nodes();
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let dist = (nodes[j].pos - nodes[i].pos).hypot();
                let min_dist = nodes[i].radius + nodes[j].radius;
                assert!(
                    dist >= min_dist - 1e-1,
                    "nodes {i} and {j} still overlap: {dist} < {min_dist}"
                );
            }
        }
    }

    #[test]
    fn centers_never_leave_the_bounds() {
        let forces = attraction();
        // Target outside the bounds pulls hard against the clamp.
        let nodes = vec![SimNode::new("a", 5.0, Point::new(1000.0, -50.0))];
        let mut sim = Simulation::new(nodes, forces, bounds(), SimulationOptions::default());
        let mut max_seen = Point::ZERO;
        sim.run(|nodes| {
            max_seen = nodes[0].pos;
            assert!(nodes[0].pos.x <= 400.0 && nodes[0].pos.y >= 0.0);
        });
        assert!((max_seen.x - 400.0).abs() < 1e-9);
        assert!((max_seen.y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn iteration_cap_yields_forced_stop() {
        let options = SimulationOptions {
            velocity_epsilon: 0.0,
            max_iterations: 10,
            ..Default::default()
        };
        let nodes = vec![SimNode::new("a", 5.0, Point::new(100.0, 80.0))];
        let mut sim = Simulation::new(nodes, attraction(), bounds(), options);
        let outcome = sim.run(|_| {});
        assert_eq!(outcome, SimulationOutcome::ForcedStop { iterations: 10 });
        assert_eq!(sim.phase(), SimulationPhase::ForcedStop);
    }

    #[test]
    fn step_after_completion_is_a_no_op() {
        let nodes = vec![SimNode::new("a", 5.0, Point::new(100.0, 80.0))];
        let mut sim = Simulation::new(nodes, attraction(), bounds(), SimulationOptions::default());
        sim.run(|_| {});
        let iterations = sim.iterations();
        assert_eq!(sim.step(), SimulationPhase::Converged);
        assert_eq!(sim.iterations(), iterations);
    }

    #[test]
    fn seeding_is_deterministic() {
        let make = || {
            let nodes = vec![
                SimNode::new("a", 10.0, Point::new(200.0, 100.0)),
                SimNode::new("b", 10.0, Point::new(200.0, 100.0)),
            ];
            Simulation::new(nodes, attraction(), bounds(), SimulationOptions::default())
        };
        let (a, b) = (make(), make());
        assert_eq!(a.nodes()[0].pos, b.nodes()[0].pos);
        assert_eq!(a.nodes()[1].pos, b.nodes()[1].pos);
        // The two coincident targets seed at distinct positions.
        assert_ne!(a.nodes()[0].pos, a.nodes()[1].pos);
    }
}
