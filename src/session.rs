use thiserror::Error;

use voxelbox_blocks::{BlockKindId, REGISTRY};
use voxelbox_edit::{Hit, Rejected, try_place, try_remove};
use voxelbox_geom::Vec3;
use voxelbox_world::{GridPos, World, generate_seeded, generate_unseeded};

use crate::animation::{AnimOutcome, Animator};
use crate::config::{SessionConfig, is_supported_size};
use crate::event::{ArtifactRole, Event, EventEnvelope, EventQueue};
use crate::hud::HudStatus;
use crate::input::{
    InputState, Key, PointerAction, PointerButton, pointer_action, wheel_direction,
};
use crate::player::Player;
use crate::raycast::raycast_first_hit;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unsupported world size {0} (expected 10, 20, 30, 40 or 50)")]
    UnsupportedWorldSize(u32),
    #[error("unknown block kind {0}")]
    UnknownBlockKind(BlockKindId),
}

/// Upper bound on physics slices per frame.
const MAX_PHYSICS_SUBSTEPS: u32 = 64;

/// Split a frame into equal slices no longer than `max_step`.
fn physics_substeps(dt: f32, max_step: f32) -> (u32, f32) {
    if max_step.is_nan() || max_step <= 0.0 || dt <= max_step {
        return (1, dt);
    }
    // rounding slack so 0.1 / (1/60) is six slices, not seven
    let n = ((dt / max_step - 1e-3).ceil() as u32).clamp(1, MAX_PHYSICS_SUBSTEPS);
    (n, dt / n as f32)
}

/// Everything a running sandbox owns: world, player, input and the
/// outbound event stream.
pub struct Session {
    pub world: World,
    pub player: Player,
    pub input: InputState,
    pub animator: Animator,
    pub events: EventQueue,
    pub config: SessionConfig,
    pub selected: BlockKindId,
    pub touch_device: bool,
}

fn build_world(config: &SessionConfig, size: u32) -> World {
    match config.world.seed {
        Some(seed) => generate_seeded(size, &config.worldgen, seed),
        None => generate_unseeded(size, &config.worldgen),
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let size = config.world.size;
        if !is_supported_size(size) {
            return Err(SessionError::UnsupportedWorldSize(size));
        }
        let world = build_world(&config, size);
        let player = Player::new(Player::spawn_point(size, &config.physics));
        let touch_device = config.interaction.touch_device;
        let mut s = Self {
            world,
            player,
            input: InputState::default(),
            animator: Animator::new(),
            events: EventQueue::new(),
            config,
            selected: BlockKindId::DIRT,
            touch_device,
        };
        s.announce_world();
        log::info!(
            target: "session",
            "session started: {}x{} world, {} blocks",
            size,
            size,
            s.world.len()
        );
        Ok(s)
    }

    /// Tell the renderer about every block currently in the store.
    fn announce_world(&mut self) {
        for b in self.world.iter_sorted() {
            self.events.emit_now(Event::ArtifactCreated {
                artifact: b.artifact,
                pos: b.pos,
                role: ArtifactRole::Body(b.kind),
                scale: b.scale,
            });
            if let Some(outline) = b.outline {
                self.events.emit_now(Event::ArtifactCreated {
                    artifact: outline,
                    pos: b.pos,
                    role: ArtifactRole::Outline,
                    scale: 1.0,
                });
            }
        }
    }

    /// Physics and look only respond while the pointer is captured or on touch devices.
    #[inline]
    pub fn input_active(&self) -> bool {
        self.input.captured || self.touch_device
    }

    pub fn set_captured(&mut self, captured: bool) {
        self.input.captured = captured;
    }

    /// One frame: physics (when input is active), then block animations.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.interaction.max_tick_delta)
        } else {
            0.0
        };
        if self.input_active() {
            let (dx, dy) = self.input.take_look();
            let physics = &self.config.physics;
            self.player.look(dx, dy, physics);
            let (steps, step) =
                physics_substeps(dt, self.config.interaction.max_physics_step);
            for _ in 0..steps {
                self.player.update(step, &self.input, &self.world, physics);
            }
        }
        for outcome in self.animator.advance(dt, &mut self.world) {
            match outcome {
                AnimOutcome::Scaled {
                    pos,
                    artifact,
                    scale,
                } => {
                    self.events.emit_now(Event::ArtifactScaled {
                        artifact,
                        pos,
                        scale,
                    });
                }
                AnimOutcome::Finalized { .. } => {}
                AnimOutcome::Removed { artifact, .. } => {
                    self.events.emit_now(Event::ArtifactReleased { artifact });
                }
            }
        }
        self.events.advance_tick();
    }

    /// Queue look deltas for the next tick.
    pub fn look(&mut self, dx: f32, dy: f32) {
        if !self.input_active() {
            return;
        }
        self.input.look_dx += dx;
        self.input.look_dy += dy;
    }

    /// First targetable block face along the given camera ray.
    pub fn target_from(&self, origin: Vec3, forward: Vec3) -> Option<Hit> {
        let world = &self.world;
        raycast_first_hit(origin, forward, self.config.interaction.reach, |p| {
            world.is_targetable_at(p)
        })
    }

    pub fn target(&self) -> Option<Hit> {
        self.target_from(self.player.eye(), self.player.forward())
    }

    pub fn place(&mut self) -> Result<GridPos, Rejected> {
        self.place_from(self.player.eye(), self.player.forward())
    }

    pub fn remove(&mut self) -> Result<GridPos, Rejected> {
        self.remove_from(self.player.eye(), self.player.forward())
    }

    /// Place the selected kind against whatever the camera ray hits.
    pub fn place_from(&mut self, origin: Vec3, forward: Vec3) -> Result<GridPos, Rejected> {
        let Some(hit) = self.target_from(origin, forward) else {
            log::debug!(target: "session", "place: nothing in reach");
            return Err(Rejected::NoTarget);
        };
        let pos = try_place(
            &mut self.world,
            &hit,
            self.selected,
            self.player.pos,
            self.config.physics.height,
        )?;
        self.animator.track(pos);
        let kind = self.selected;
        self.events.emit_now(Event::BlockAdded { pos, kind });
        if let Some(b) = self.world.get(pos) {
            let (artifact, outline, scale) = (b.artifact, b.outline, b.scale);
            self.events.emit_now(Event::ArtifactCreated {
                artifact,
                pos,
                role: ArtifactRole::Body(kind),
                scale,
            });
            if let Some(outline) = outline {
                self.events.emit_now(Event::ArtifactCreated {
                    artifact: outline,
                    pos,
                    role: ArtifactRole::Outline,
                    scale: 1.0,
                });
            }
        }
        Ok(pos)
    }

    /// Start removing whatever the camera ray hits.
    pub fn remove_from(&mut self, origin: Vec3, forward: Vec3) -> Result<GridPos, Rejected> {
        let Some(hit) = self.target_from(origin, forward) else {
            log::debug!(target: "session", "remove: nothing in reach");
            return Err(Rejected::NoTarget);
        };
        let removal = try_remove(&mut self.world, &hit)?;
        self.animator.track(removal.pos);
        self.events.emit_now(Event::BlockRemoved {
            pos: removal.pos,
            kind: removal.kind,
        });
        if let Some(artifact) = removal.released_outline {
            self.events.emit_now(Event::ArtifactReleased { artifact });
        }
        Ok(removal.pos)
    }

    pub fn cycle_block(&mut self, direction: i32) -> BlockKindId {
        self.selected = REGISTRY.cycle(self.selected, direction);
        self.events.emit_now(Event::BlockSwitched {
            kind: self.selected,
        });
        self.selected
    }

    pub fn select_block(&mut self, kind: BlockKindId) -> Result<(), SessionError> {
        if !REGISTRY.contains(kind) {
            return Err(SessionError::UnknownBlockKind(kind));
        }
        self.selected = kind;
        self.events.emit_now(Event::BlockSwitched { kind });
        Ok(())
    }

    pub fn toggle_flying(&mut self) -> bool {
        let flying = self.player.toggle_flying();
        self.events.emit_now(Event::FlightToggled { flying });
        flying
    }

    pub fn jump_pressed(&mut self) {
        if self
            .player
            .jump_pressed(&mut self.input, &self.config.physics)
        {
            self.events.emit_now(Event::Jumped);
        }
    }

    pub fn jump_released(&mut self) {
        self.player.jump_released(&mut self.input);
    }

    pub fn crouch_pressed(&mut self) {
        self.input.down = true;
    }

    pub fn crouch_released(&mut self) {
        self.input.down = false;
    }

    pub fn key_down(&mut self, key: Key) {
        if !self.input_active() {
            return;
        }
        match key {
            Key::W => self.input.forward = true,
            Key::A => self.input.left = true,
            Key::S => self.input.backward = true,
            Key::D => self.input.right = true,
            Key::Space => self.jump_pressed(),
            Key::Shift => self.crouch_pressed(),
            Key::F => {
                self.toggle_flying();
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if !self.input_active() {
            return;
        }
        match key {
            Key::W => self.input.forward = false,
            Key::A => self.input.left = false,
            Key::S => self.input.backward = false,
            Key::D => self.input.right = false,
            Key::Space => self.jump_released(),
            Key::Shift => self.crouch_released(),
            Key::F => {}
        }
    }

    /// Mouse click at screen center. `None` when the click is ignored outright.
    pub fn pointer_down(
        &mut self,
        button: PointerButton,
        modifier: bool,
    ) -> Option<Result<GridPos, Rejected>> {
        if !self.input_active() {
            return None;
        }
        match pointer_action(button, modifier)? {
            PointerAction::Place => Some(self.place()),
            PointerAction::Remove => Some(self.remove()),
        }
    }

    pub fn wheel(&mut self, delta_y: f32) {
        if !self.input_active() {
            return;
        }
        let dir = wheel_direction(delta_y);
        if dir != 0 {
            self.cycle_block(dir);
        }
    }

    /// Throw the world away and generate a new one of `size`, putting the player
    /// back at the spawn point.
    pub fn restart(&mut self, size: u32) -> Result<(), SessionError> {
        if !is_supported_size(size) {
            return Err(SessionError::UnsupportedWorldSize(size));
        }
        for artifact in self.world.clear() {
            self.events.emit_now(Event::ArtifactReleased { artifact });
        }
        self.animator.clear();
        self.config.world.size = size;
        self.world = build_world(&self.config, size);
        self.player.respawn(size, &self.config.physics);
        self.events.emit_now(Event::WorldRestarted {
            size,
            blocks: self.world.len(),
        });
        self.announce_world();
        log::info!(target: "session", "restarted with a {}x{} world", size, size);
        Ok(())
    }

    pub fn drain_events(&mut self) -> Vec<EventEnvelope> {
        self.events.drain()
    }

    pub fn hud(&self) -> HudStatus {
        HudStatus::new(self.selected, self.player.is_flying())
    }
}
