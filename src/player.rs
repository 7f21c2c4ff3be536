use serde::Deserialize;

use voxelbox_geom::{Aabb, Vec3};
use voxelbox_world::World;

use crate::input::InputState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveMode {
    Walking,
    Flying,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PhysicsParams {
    /// Horizontal acceleration scale (units/s^2 before damping).
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_fly_speed")]
    pub fly_speed: f32,
    /// Upward velocity added by a jump.
    #[serde(default = "default_jump_impulse")]
    pub jump_impulse: f32,
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    /// Width and depth of the collision box.
    #[serde(default = "default_collision_width")]
    pub collision_width: f32,
    #[serde(default = "default_damping")]
    pub damping: f32,
    /// Falling below this height teleports the player back above the world.
    #[serde(default = "default_abyss_y")]
    pub abyss_y: f32,
    #[serde(default = "default_look_sensitivity")]
    pub look_sensitivity: f32,
}

fn default_speed() -> f32 {
    50.0
}
fn default_fly_speed() -> f32 {
    6.0
}
fn default_jump_impulse() -> f32 {
    10.0
}
fn default_gravity() -> f32 {
    30.0
}
fn default_height() -> f32 {
    2.8
}
fn default_collision_width() -> f32 {
    0.7
}
fn default_damping() -> f32 {
    10.0
}
fn default_abyss_y() -> f32 {
    -50.0
}
fn default_look_sensitivity() -> f32 {
    0.003
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            fly_speed: default_fly_speed(),
            jump_impulse: default_jump_impulse(),
            gravity: default_gravity(),
            height: default_height(),
            collision_width: default_collision_width(),
            damping: default_damping(),
            abyss_y: default_abyss_y(),
            look_sensitivity: default_look_sensitivity(),
        }
    }
}

/// Extra gap left when a flying player is pushed off a block vertically.
const FLY_SEPARATION: f32 = 0.01;

#[derive(Clone, Debug)]
pub struct Player {
    /// Eye position; the collision box is centered here.
    pub pos: Vec3,
    /// `x` is strafe (right positive), `y` vertical, `z` forward along the
    /// current yaw, so leftover horizontal momentum turns with the camera.
    pub vel: Vec3,
    /// Radians, 0 looks down -Z.
    pub yaw: f32,
    /// Radians, positive looks up.
    pub pitch: f32,
    pub mode: MoveMode,
    pub grounded: bool,
}

impl Player {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            pos: spawn,
            vel: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            mode: MoveMode::Walking,
            grounded: false,
        }
    }

    /// Where a fresh or restarted world puts the player: above the middle, a few cells back.
    pub fn spawn_point(size: u32, params: &PhysicsParams) -> Vec3 {
        let half = size as f32 / 2.0;
        Vec3::new(half, params.height + 5.0, half + 5.0)
    }

    #[inline]
    pub fn is_flying(&self) -> bool {
        self.mode == MoveMode::Flying
    }

    #[inline]
    pub fn eye(&self) -> Vec3 {
        self.pos
    }

    /// Camera look vector.
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(-sy * cp, sp, -cy * cp)
    }

    /// Forward on the ground plane; pitch never moves the player vertically.
    #[inline]
    fn flat_forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(-sy, 0.0, -cy)
    }

    #[inline]
    fn flat_right(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(cy, 0.0, -sy)
    }

    /// Horizontal velocity rotated out of the yaw frame.
    pub fn horizontal_world_velocity(&self) -> Vec3 {
        self.flat_forward() * self.vel.z + self.flat_right() * self.vel.x
    }

    /// Cancel the world x (or z) part of the horizontal velocity, keeping the rest
    /// in the yaw frame.
    fn stop_world_axis(&mut self, along_x: bool) {
        let mut w = self.horizontal_world_velocity();
        if along_x {
            w.x = 0.0;
        } else {
            w.z = 0.0;
        }
        self.vel.z = w.dot(self.flat_forward());
        self.vel.x = w.dot(self.flat_right());
    }

    pub fn aabb(&self, params: &PhysicsParams) -> Aabb {
        Aabb::from_center_size(
            self.pos,
            Vec3::new(params.collision_width, params.height, params.collision_width),
        )
    }

    pub fn look(&mut self, dx: f32, dy: f32, params: &PhysicsParams) {
        self.yaw -= dx * params.look_sensitivity;
        self.pitch += dy * params.look_sensitivity;
        self.pitch = self
            .pitch
            .clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
    }

    /// Jump/ascend press. Returns true when an actual jump happened.
    pub fn jump_pressed(&mut self, input: &mut InputState, params: &PhysicsParams) -> bool {
        match self.mode {
            MoveMode::Flying => {
                input.up = true;
                false
            }
            MoveMode::Walking if self.grounded => {
                self.vel.y += params.jump_impulse;
                self.grounded = false;
                true
            }
            MoveMode::Walking => false,
        }
    }

    pub fn jump_released(&mut self, input: &mut InputState) {
        if self.is_flying() {
            input.up = false;
        }
    }

    /// Flip between walking and flying; returns whether the player now flies.
    pub fn toggle_flying(&mut self) -> bool {
        self.mode = match self.mode {
            MoveMode::Walking => MoveMode::Flying,
            MoveMode::Flying => MoveMode::Walking,
        };
        if self.is_flying() {
            self.vel.y = 0.0;
            self.grounded = false;
        }
        self.is_flying()
    }

    /// Put the player back at the spawn point with no momentum.
    pub fn respawn(&mut self, size: u32, params: &PhysicsParams) {
        self.pos = Self::spawn_point(size, params);
        self.vel = Vec3::ZERO;
        self.grounded = false;
    }

    /// Advance one tick: damping, vertical motion, steering, then collision.
    pub fn update(&mut self, dt: f32, input: &InputState, world: &World, params: &PhysicsParams) {
        self.vel.x -= self.vel.x * params.damping * dt;
        self.vel.z -= self.vel.z * params.damping * dt;

        match self.mode {
            MoveMode::Flying => {
                self.vel.y = 0.0;
                if input.up {
                    self.pos.y += params.fly_speed * dt;
                }
                if input.down {
                    self.pos.y -= params.fly_speed * dt;
                }
                self.grounded = false;
            }
            MoveMode::Walking => {
                self.vel.y -= params.gravity * dt;
                self.pos.y += self.vel.y * dt;
            }
        }

        // local intent: z forward, x right
        let lz = (input.forward as i32 - input.backward as i32) as f32;
        let lx = (input.right as i32 - input.left as i32) as f32;
        let len = (lx * lx + lz * lz).sqrt();
        if len > 0.0 {
            let speed = if input.down && !self.is_flying() {
                params.speed * 0.5
            } else {
                params.speed
            };
            self.vel.z += lz / len * speed * dt;
            self.vel.x += lx / len * speed * dt;
        }
        let step = self.horizontal_world_velocity() * dt;
        self.pos.x += step.x;
        self.pos.z += step.z;

        let landed = self.resolve_collisions(world, params);

        if !self.is_flying() {
            if !landed && self.vel.y < 0.0 {
                self.grounded = false;
            }
            if self.pos.y < params.abyss_y {
                let half = world.size() as f32 / 2.0;
                self.pos = Vec3::new(half, params.height + 10.0, half);
                self.vel.y = 0.0;
                self.grounded = true;
                log::info!(target: "session", "fell out of the world, back to {:?}", self.pos);
            }
        }
    }

    /// Push the player out of every block it overlaps, one block at a time
    /// along its shallowest axis. Returns true if it came to rest on a block.
    fn resolve_collisions(&mut self, world: &World, params: &PhysicsParams) -> bool {
        let half_h = params.height / 2.0;
        let mut pbox = self.aabb(params);
        let mut landed = false;
        // resolutions move the box, so gather one cell of slack around it
        let reach = Aabb::new(pbox.min - Vec3::ONE, pbox.max + Vec3::ONE);
        for cell in world.blocks_in(&reach) {
            let Some(block) = world.get(cell) else {
                continue;
            };
            let bbox = block.aabb();
            let Some(depth) = pbox.overlap(&bbox) else {
                continue;
            };
            let bc = bbox.center();
            if depth.y <= depth.x && depth.y <= depth.z {
                let above = self.pos.y > bc.y;
                match self.mode {
                    MoveMode::Flying => {
                        self.pos.y = if above {
                            bbox.max.y + half_h + FLY_SEPARATION
                        } else {
                            bbox.min.y - half_h - FLY_SEPARATION
                        };
                    }
                    MoveMode::Walking => {
                        if above {
                            self.pos.y = bbox.max.y + half_h;
                            if self.vel.y <= 0.0 {
                                self.vel.y = 0.0;
                                self.grounded = true;
                                landed = true;
                            }
                        } else {
                            self.pos.y = bbox.min.y - half_h;
                            if self.vel.y > 0.0 {
                                self.vel.y = 0.0;
                            }
                        }
                    }
                }
            } else if depth.x < depth.z {
                if self.pos.x < bc.x {
                    self.pos.x -= depth.x;
                } else {
                    self.pos.x += depth.x;
                }
                self.stop_world_axis(true);
            } else {
                if self.pos.z < bc.z {
                    self.pos.z -= depth.z;
                } else {
                    self.pos.z += depth.z;
                }
                self.stop_world_axis(false);
            }
            pbox = self.aabb(params);
        }
        landed
    }
}
