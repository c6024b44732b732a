//! Bounded turn control.

use crate::store::{FieldSet, SettingsStore};

/// A user action on the turn slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnCommand {
    /// Jump to a raw requested value; clamped before use.
    Set(i64),
    Forward,
    Back,
    First,
    Last,
}

/// Clamps turn requests into `[0, max_turn]`.
///
/// The control is disabled while `max_turn == 0`; every command is then a
/// no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnControl;

impl TurnControl {
    /// `max(0, min(requested, max_turn))`.
    pub fn clamp(requested: i64, max_turn: usize) -> usize {
        match usize::try_from(requested) {
            Ok(turn) => turn.min(max_turn),
            // Negative, or beyond usize on narrow targets
            Err(_) if requested < 0 => 0,
            Err(_) => max_turn,
        }
    }

    #[inline]
    pub fn is_enabled(max_turn: usize) -> bool {
        max_turn > 0
    }

    /// Target turn for `command` starting from `current`, before clamping.
    pub fn target(command: TurnCommand, current: usize, max_turn: usize) -> i64 {
        let current = i64::try_from(current).unwrap_or(i64::MAX);
        match command {
            TurnCommand::Set(value) => value,
            TurnCommand::Forward => current.saturating_add(1),
            TurnCommand::Back => current.saturating_sub(1),
            TurnCommand::First => 0,
            TurnCommand::Last => i64::try_from(max_turn).unwrap_or(i64::MAX),
        }
    }

    /// Apply `command` to the store. Returns the fields that changed.
    pub fn apply(store: &mut SettingsStore, command: TurnCommand) -> FieldSet {
        let max_turn = store.max_turn();
        if !Self::is_enabled(max_turn) {
            tracing::trace!(?command, "Turn control disabled");
            return FieldSet::empty();
        }
        let requested = Self::target(command, store.turn(), max_turn);
        store.set_turn(Self::clamp(requested, max_turn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Field;
    use proptest::prelude::*;

    fn store_with_bound(max_turn: usize) -> SettingsStore {
        let mut store = SettingsStore::new();
        store.set_max_turn(max_turn);
        store
    }

    #[test]
    fn test_clamp() {
        assert_eq!(TurnControl::clamp(-3, 10), 0);
        assert_eq!(TurnControl::clamp(4, 10), 4);
        assert_eq!(TurnControl::clamp(40, 10), 10);
        assert_eq!(TurnControl::clamp(i64::MAX, 10), 10);
    }

    #[test]
    fn test_disabled_when_bound_is_zero() {
        let mut store = store_with_bound(0);
        let changed = TurnControl::apply(&mut store, TurnCommand::Set(5));
        assert!(changed.is_empty());
        assert_eq!(store.turn(), 0);
    }

    #[test]
    fn test_apply_clamps_into_store() {
        let mut store = store_with_bound(10);
        assert_eq!(
            TurnControl::apply(&mut store, TurnCommand::Set(25)),
            FieldSet::of(Field::Turn)
        );
        assert_eq!(store.turn(), 10);
    }

    #[test]
    fn test_step_commands() {
        let mut store = store_with_bound(3);
        TurnControl::apply(&mut store, TurnCommand::Forward);
        TurnControl::apply(&mut store, TurnCommand::Forward);
        assert_eq!(store.turn(), 2);
        TurnControl::apply(&mut store, TurnCommand::Last);
        TurnControl::apply(&mut store, TurnCommand::Forward);
        assert_eq!(store.turn(), 3);
        TurnControl::apply(&mut store, TurnCommand::First);
        TurnControl::apply(&mut store, TurnCommand::Back);
        assert_eq!(store.turn(), 0);
    }

    proptest! {
        #[test]
        fn prop_clamp_stays_in_range(requested in any::<i64>(), max_turn in 0usize..100_000) {
            let turn = TurnControl::clamp(requested, max_turn);
            prop_assert!(turn <= max_turn);
            if requested >= 0 && (requested as u64) <= max_turn as u64 {
                prop_assert_eq!(turn as i64, requested);
            }
        }
    }
}
