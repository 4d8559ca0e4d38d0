//! Mana abilities as undoable commands
//!
//! Tapping a land for mana is modeled as a composite command (tap the
//! permanent, then add one mana to a pool). Commands can be executed and
//! undone against a `CommandContext`; a `CommandLog` records executed
//! commands so a sequence of payments can be rewound to a checkpoint.

use crate::core::{Color, ManaPool};
use crate::game::Payment;
use crate::zones::Battlefield;
use serde::{Deserialize, Serialize};

/// State a command may touch
pub struct CommandContext<'a> {
    pub battlefield: &'a mut Battlefield,
    pub mana_pool: &'a mut ManaPool,
}

impl<'a> CommandContext<'a> {
    pub fn new(battlefield: &'a mut Battlefield, mana_pool: &'a mut ManaPool) -> Self {
        CommandContext {
            battlefield,
            mana_pool,
        }
    }
}

/// Atomic, reversible game mutations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Tap an untapped permanent
    Tap { permanent: usize },

    /// Add one mana of `color` to the pool
    AddMana { color: Color },

    /// Run the parts in order; undo runs them in reverse
    Multi(Vec<Command>),
}

impl Command {
    /// Apply the command
    ///
    /// # Panics
    /// Tapping a permanent that is missing or already tapped.
    pub fn execute(&self, ctx: &mut CommandContext<'_>) {
        match self {
            Command::Tap { permanent } => {
                let Some(target) = ctx.battlefield.get_mut(*permanent) else {
                    panic!("tap: no permanent at index {permanent}");
                };
                assert!(!target.tapped, "tap: {} is already tapped", target.card.name);
                target.tapped = true;
            }
            Command::AddMana { color } => ctx.mana_pool.add_color(*color),
            Command::Multi(commands) => {
                for command in commands {
                    command.execute(ctx);
                }
            }
        }
    }

    /// Revert the command
    ///
    /// # Panics
    /// Undoing a command whose effect is not present (permanent not
    /// tapped, mana not in the pool).
    pub fn undo(&self, ctx: &mut CommandContext<'_>) {
        match self {
            Command::Tap { permanent } => {
                let Some(target) = ctx.battlefield.get_mut(*permanent) else {
                    panic!("untap: no permanent at index {permanent}");
                };
                assert!(target.tapped, "untap: {} is not tapped", target.card.name);
                // Only the tap is reverted; summoning sickness is untouched
                target.tapped = false;
            }
            Command::AddMana { color } => {
                assert!(ctx.mana_pool.remove_color(*color), "undo: no {color} mana in pool");
            }
            Command::Multi(commands) => {
                for command in commands.iter().rev() {
                    command.undo(ctx);
                }
            }
        }
    }
}

/// "T: add one mana of `color`"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaAbility {
    pub color: Color,
}

impl ManaAbility {
    pub fn new(color: Color) -> Self {
        ManaAbility { color }
    }

    /// Commands that activate this ability on `permanent`
    pub fn commands(&self, permanent: usize) -> Vec<Command> {
        vec![Command::Multi(vec![
            Command::Tap { permanent },
            Command::AddMana { color: self.color },
        ])]
    }
}

/// Ability activations that realize `payment`
///
/// Assigns each chosen land one of its colors so that the totals match the
/// payment's profile. Returns `None` if the payment does not describe the
/// given battlefield.
pub fn payment_commands(payment: &Payment, battlefield: &Battlefield) -> Option<Vec<Command>> {
    let mut remaining = payment.profile.counts;
    let mut assignment = Vec::with_capacity(payment.lands.len());
    if !assign_colors(&payment.lands, battlefield, &mut remaining, &mut assignment) {
        return None;
    }

    Some(
        payment
            .lands
            .iter()
            .zip(assignment)
            .flat_map(|(&land, color)| ManaAbility::new(color).commands(land))
            .collect(),
    )
}

fn assign_colors(lands: &[usize], battlefield: &Battlefield, remaining: &mut [u8; 6], out: &mut Vec<Color>) -> bool {
    let Some((&land, rest)) = lands.split_first() else {
        return remaining.iter().all(|&c| c == 0);
    };
    let Some(permanent) = battlefield.get(land) else {
        return false;
    };

    for &color in &permanent.card.produces {
        let slot = color.slot();
        if remaining[slot] == 0 {
            continue;
        }
        remaining[slot] -= 1;
        out.push(color);
        if assign_colors(rest, battlefield, remaining, out) {
            return true;
        }
        out.pop();
        remaining[slot] += 1;
    }
    false
}

/// Executed commands with checkpoints, for rewinding
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandLog {
    /// Stack of commands (most recent at end)
    commands: Vec<Command>,

    /// Log positions to rewind to
    checkpoints: Vec<usize>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute and record a command
    pub fn execute(&mut self, command: Command, ctx: &mut CommandContext<'_>) {
        command.execute(ctx);
        self.commands.push(command);
    }

    /// Mark the current position
    pub fn checkpoint(&mut self) {
        self.checkpoints.push(self.commands.len());
    }

    /// Undo everything since the most recent checkpoint (or everything)
    ///
    /// Returns the number of commands undone.
    pub fn rewind(&mut self, ctx: &mut CommandContext<'_>) -> usize {
        let target = self.checkpoints.pop().unwrap_or(0);
        let mut undone = 0;
        while self.commands.len() > target {
            if let Some(command) = self.commands.pop() {
                command.undo(ctx);
                undone += 1;
            }
        }
        undone
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
}
