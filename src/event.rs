use std::collections::VecDeque;

use voxelbox_blocks::{BlockKindId, REGISTRY};
use voxelbox_world::{ArtifactId, GridPos};

/// What a render-side artifact stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactRole {
    Body(BlockKindId),
    Outline,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    // Audio cues
    BlockAdded { pos: GridPos, kind: BlockKindId },
    BlockRemoved { pos: GridPos, kind: BlockKindId },
    Jumped,
    BlockSwitched { kind: BlockKindId },
    FlightToggled { flying: bool },

    // Renderer bookkeeping
    ArtifactCreated {
        artifact: ArtifactId,
        pos: GridPos,
        role: ArtifactRole,
        scale: f32,
    },
    ArtifactScaled { artifact: ArtifactId, pos: GridPos, scale: f32 },
    ArtifactReleased { artifact: ArtifactId },
    WorldRestarted { size: u32, blocks: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct EventEnvelope {
    pub id: u64,
    pub tick: u64,
    pub kind: Event,
}

/// FIFO of outbound events, stamped with the tick they were raised on.
#[derive(Debug)]
pub struct EventQueue {
    queue: VecDeque<EventEnvelope>,
    pub now: u64,
    next_id: u64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            now: 0,
            next_id: 1,
        }
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn emit_now(&mut self, kind: Event) -> u64 {
        let id = self.alloc_id();
        log_event(self.now, &kind);
        self.queue.push_back(EventEnvelope {
            id,
            tick: self.now,
            kind,
        });
        id
    }

    pub fn drain(&mut self) -> Vec<EventEnvelope> {
        self.queue.drain(..).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn advance_tick(&mut self) {
        self.now = self.now.wrapping_add(1);
    }
}

fn log_event(tick: u64, ev: &Event) {
    match ev {
        Event::BlockAdded { pos, kind } => {
            log::info!(
                target: "events",
                "[tick {}] BlockAdded {} kind={}",
                tick,
                pos,
                REGISTRY.name(*kind)
            );
        }
        Event::BlockRemoved { pos, kind } => {
            log::info!(
                target: "events",
                "[tick {}] BlockRemoved {} kind={}",
                tick,
                pos,
                REGISTRY.name(*kind)
            );
        }
        Event::Jumped => {
            log::debug!(target: "events", "[tick {}] Jumped", tick);
        }
        Event::BlockSwitched { kind } => {
            log::info!(target: "events", "[tick {}] BlockSwitched {}", tick, REGISTRY.name(*kind));
        }
        Event::FlightToggled { flying } => {
            log::info!(target: "events", "[tick {}] FlightToggled flying={}", tick, flying);
        }
        Event::ArtifactCreated {
            artifact,
            pos,
            role,
            scale,
        } => {
            log::trace!(target: "events", "[tick {}] ArtifactCreated #{} {} {:?} scale={:.2}",
                tick, artifact.0, pos, role, scale);
        }
        Event::ArtifactScaled {
            artifact,
            pos,
            scale,
        } => {
            log::trace!(
                target: "events",
                "[tick {}] ArtifactScaled #{} {} scale={:.2}",
                tick,
                artifact.0,
                pos,
                scale
            );
        }
        Event::ArtifactReleased { artifact } => {
            log::trace!(target: "events", "[tick {}] ArtifactReleased #{}", tick, artifact.0);
        }
        Event::WorldRestarted { size, blocks } => {
            log::info!(
                target: "events",
                "[tick {}] WorldRestarted size={} blocks={}",
                tick,
                size,
                blocks
            );
        }
    }
}
