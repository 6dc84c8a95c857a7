//! Deferred state mutations
//!
//! A tick never appends to or removes from the entity collections it is
//! iterating. Spawns, removals, and reloads are enqueued as commands instead
//! and applied by the caller after the tick's synchronous update, in enqueue
//! order. Reloads ride a wall-clock timer rather than the immediate queue.
//!
//! Every command is tagged with the state epoch at enqueue time; `apply`
//! drops commands from an older epoch, so a reload scheduled before a
//! restart can never re-arm the post-restart player.

use glam::Vec2;

use super::state::{Cannonball, Explosion, GameState, PlayerId};

/// A deferred state mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a cannonball fired by `owner`; the id is allocated at apply time
    SpawnCannonball {
        owner: PlayerId,
        pos: Vec2,
        heading: f32,
    },
    /// Add an explosion at a hit location
    SpawnExplosion { pos: Vec2 },
    /// Remove cannonballs that exploded this tick
    RemoveCannonballs { ids: Vec<u32> },
    /// Re-arm a player's cannon after the reload delay
    Reload { player: PlayerId },
}

/// A command tagged with the epoch it was enqueued in
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedCommand {
    pub epoch: u64,
    pub command: Command,
}

#[derive(Debug, Clone)]
struct TimerEntry {
    due_ms: f64,
    queued: QueuedCommand,
}

/// Queue of deferred commands: an immediate FIFO plus wall-clock timers
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: Vec<QueuedCommand>,
    timers: Vec<TimerEntry>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a command to apply after the current tick's synchronous update
    pub fn push(&mut self, epoch: u64, command: Command) {
        self.pending.push(QueuedCommand { epoch, command });
    }

    /// Schedule a command for a wall-clock deadline (milliseconds)
    pub fn schedule(&mut self, due_ms: f64, epoch: u64, command: Command) {
        self.timers.push(TimerEntry {
            due_ms,
            queued: QueuedCommand { epoch, command },
        });
    }

    /// Take everything ready at `now_ms`: immediate commands in enqueue
    /// order, then due timers in deadline order.
    pub fn drain_ready(&mut self, now_ms: f64) -> Vec<QueuedCommand> {
        let mut ready: Vec<QueuedCommand> = self.pending.drain(..).collect();

        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|t| t.due_ms <= now_ms);
        self.timers = waiting;

        let mut due = due;
        due.sort_by(|a, b| {
            a.due_ms
                .partial_cmp(&b.due_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ready.extend(due.into_iter().map(|t| t.queued));
        ready
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.timers.is_empty()
    }
}

impl GameState {
    /// Apply one drained command. Commands from a previous epoch are stale
    /// (the match restarted since they were enqueued) and are dropped.
    pub fn apply(&mut self, queued: QueuedCommand) {
        if queued.epoch != self.epoch {
            log::debug!(
                "dropping stale command from epoch {} (current {}): {:?}",
                queued.epoch,
                self.epoch,
                queued.command
            );
            return;
        }
        match queued.command {
            Command::SpawnCannonball {
                owner,
                pos,
                heading,
            } => {
                let id = self.next_cannonball_id();
                self.cannonballs.push(Cannonball {
                    id,
                    pos,
                    heading,
                    owner,
                });
            }
            Command::SpawnExplosion { pos } => {
                let id = self.next_explosion_id();
                self.explosions.push(Explosion { id, pos, frame: 0 });
            }
            Command::RemoveCannonballs { ids } => {
                self.cannonballs.retain(|ball| !ids.contains(&ball.id));
            }
            Command::Reload { player } => {
                self.player_mut(player).loaded = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::SpriteVariant;

    #[test]
    fn test_drain_order_pending_then_timers() {
        let mut queue = CommandQueue::new();
        queue.schedule(5.0, 0, Command::Reload { player: PlayerId::One });
        queue.push(0, Command::SpawnExplosion { pos: Vec2::ZERO });
        queue.push(
            0,
            Command::RemoveCannonballs { ids: vec![1] },
        );
        queue.schedule(2.0, 0, Command::Reload { player: PlayerId::Two });

        let drained = queue.drain_ready(10.0);
        assert_eq!(drained.len(), 4);
        assert!(matches!(drained[0].command, Command::SpawnExplosion { .. }));
        assert!(matches!(drained[1].command, Command::RemoveCannonballs { .. }));
        assert!(matches!(
            drained[2].command,
            Command::Reload { player: PlayerId::Two }
        ));
        assert!(matches!(
            drained[3].command,
            Command::Reload { player: PlayerId::One }
        ));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_timer_not_due_is_retained() {
        let mut queue = CommandQueue::new();
        queue.schedule(3000.0, 0, Command::Reload { player: PlayerId::One });

        assert!(queue.drain_ready(2999.0).is_empty());
        assert!(!queue.is_empty());

        let drained = queue.drain_ready(3000.0);
        assert_eq!(drained.len(), 1);
        // Fires exactly once
        assert!(queue.drain_ready(10_000.0).is_empty());
    }

    #[test]
    fn test_apply_spawns_with_fresh_ids() {
        let mut state = GameState::new(SpriteVariant::Classic);
        state.apply(QueuedCommand {
            epoch: 0,
            command: Command::SpawnCannonball {
                owner: PlayerId::One,
                pos: Vec2::new(1.0, 2.0),
                heading: 45.0,
            },
        });
        state.apply(QueuedCommand {
            epoch: 0,
            command: Command::SpawnCannonball {
                owner: PlayerId::Two,
                pos: Vec2::ZERO,
                heading: 0.0,
            },
        });
        assert_eq!(state.cannonballs.len(), 2);
        assert_ne!(state.cannonballs[0].id, state.cannonballs[1].id);
    }

    #[test]
    fn test_apply_removal() {
        let mut state = GameState::new(SpriteVariant::Classic);
        for _ in 0..3 {
            state.apply(QueuedCommand {
                epoch: 0,
                command: Command::SpawnCannonball {
                    owner: PlayerId::One,
                    pos: Vec2::ZERO,
                    heading: 0.0,
                },
            });
        }
        let doomed = state.cannonballs[1].id;
        state.apply(QueuedCommand {
            epoch: 0,
            command: Command::RemoveCannonballs { ids: vec![doomed] },
        });
        assert_eq!(state.cannonballs.len(), 2);
        assert!(state.cannonballs.iter().all(|b| b.id != doomed));
    }

    #[test]
    fn test_stale_epoch_dropped() {
        let mut state = GameState::new(SpriteVariant::Classic);
        state.player1.loaded = false;
        state.reset(); // epoch 1; fresh player is loaded
        state.player1.loaded = false; // fired again after the restart

        state.apply(QueuedCommand {
            epoch: 0,
            command: Command::Reload { player: PlayerId::One },
        });
        assert!(!state.player1.loaded, "stale reload must not re-arm");

        state.apply(QueuedCommand {
            epoch: 1,
            command: Command::Reload { player: PlayerId::One },
        });
        assert!(state.player1.loaded);
    }
}
