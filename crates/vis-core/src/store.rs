//! Owned settings container with a field-level mutation API.
//!
//! Every setter reports the fields it actually changed as a [`FieldSet`].
//! Writing a value equal to the current one is a no-op: no version bump and an
//! empty change set. The dependency graph consumes these change sets instead
//! of inferring dependencies from reads.

use std::fmt;

use vis_model::{Problem, Settings};

/// A single settings field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Seed,
    Problem,
    Input,
    Output,
    Turn,
    MaxTurn,
}

impl Field {
    pub const ALL: [Self; 6] = [
        Self::Seed,
        Self::Problem,
        Self::Input,
        Self::Output,
        Self::Turn,
        Self::MaxTurn,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Problem => "problem",
            Self::Input => "input",
            Self::Output => "output",
            Self::Turn => "turn",
            Self::MaxTurn => "max_turn",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Small set of [`Field`]s.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FieldSet(u8);

impl FieldSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Field::ALL.into_iter().collect()
    }

    pub fn of(field: Field) -> Self {
        Self(1 << field.index())
    }

    pub fn insert(&mut self, field: Field) {
        self.0 |= 1 << field.index();
    }

    #[inline]
    pub fn contains(&self, field: Field) -> bool {
        self.0 & (1 << field.index()) != 0
    }

    /// Returns true if any of `fields` is in the set.
    pub fn intersects(&self, fields: &[Field]) -> bool {
        fields.iter().any(|field| self.contains(*field))
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub fn without(self, field: Field) -> Self {
        Self(self.0 & !(1 << field.index()))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(|field| self.contains(*field))
    }
}

impl FromIterator<Field> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut set = Self::empty();
        for field in iter {
            set.insert(field);
        }
        set
    }
}

impl fmt::Debug for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Settings plus a version counter per field.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    settings: Settings,
    versions: [u64; Field::ALL.len()],
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from explicit settings. Versions start at zero.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            versions: [0; Field::ALL.len()],
        }
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.settings.seed
    }

    pub fn problem(&self) -> Problem {
        self.settings.problem
    }

    pub fn input(&self) -> &str {
        &self.settings.input
    }

    pub fn output(&self) -> &str {
        &self.settings.output
    }

    pub fn turn(&self) -> usize {
        self.settings.turn
    }

    pub fn max_turn(&self) -> usize {
        self.settings.max_turn
    }

    /// Number of effective writes to `field` so far.
    pub fn version(&self, field: Field) -> u64 {
        self.versions[field.index()]
    }

    pub fn set_seed(&mut self, seed: u64) -> FieldSet {
        let changed = replace_if_different(&mut self.settings.seed, seed);
        self.record(Field::Seed, changed)
    }

    pub fn set_problem(&mut self, problem: Problem) -> FieldSet {
        let changed = replace_if_different(&mut self.settings.problem, problem);
        self.record(Field::Problem, changed)
    }

    pub fn set_input(&mut self, input: impl Into<String>) -> FieldSet {
        let changed = replace_if_different(&mut self.settings.input, input.into());
        self.record(Field::Input, changed)
    }

    pub fn set_output(&mut self, output: impl Into<String>) -> FieldSet {
        let changed = replace_if_different(&mut self.settings.output, output.into());
        self.record(Field::Output, changed)
    }

    /// Replace input and output together.
    pub fn set_case(&mut self, input: impl Into<String>, output: impl Into<String>) -> FieldSet {
        let changed = self.set_input(input);
        changed.union(self.set_output(output))
    }

    /// Raw turn write. Callers outside the crate go through
    /// [`crate::TurnControl`], which clamps first.
    pub(crate) fn set_turn(&mut self, turn: usize) -> FieldSet {
        let changed = replace_if_different(&mut self.settings.turn, turn);
        self.record(Field::Turn, changed)
    }

    pub(crate) fn set_max_turn(&mut self, max_turn: usize) -> FieldSet {
        let changed = replace_if_different(&mut self.settings.max_turn, max_turn);
        self.record(Field::MaxTurn, changed)
    }

    fn record(&mut self, field: Field, changed: bool) -> FieldSet {
        if changed {
            self.versions[field.index()] += 1;
            FieldSet::of(field)
        } else {
            FieldSet::empty()
        }
    }
}

fn replace_if_different<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_set_operations() {
        let mut set = FieldSet::of(Field::Seed);
        set.insert(Field::Turn);
        assert!(set.contains(Field::Seed));
        assert!(set.contains(Field::Turn));
        assert!(!set.contains(Field::Input));
        assert!(set.intersects(&[Field::Input, Field::Turn]));
        assert!(!set.intersects(&[Field::Input, Field::Output]));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Field::Seed, Field::Turn]);
        assert_eq!(set.without(Field::Seed), FieldSet::of(Field::Turn));
    }

    #[test]
    fn test_all_contains_every_field() {
        let all = FieldSet::all();
        assert!(Field::ALL.iter().all(|field| all.contains(*field)));
    }

    #[test]
    fn test_setter_reports_change_and_bumps_version() {
        let mut store = SettingsStore::new();
        let changed = store.set_input("1 2 3");
        assert_eq!(changed, FieldSet::of(Field::Input));
        assert_eq!(store.input(), "1 2 3");
        assert_eq!(store.version(Field::Input), 1);
    }

    #[test]
    fn test_equal_write_is_noop() {
        let mut store = SettingsStore::new();
        store.set_output("x");
        let changed = store.set_output("x");
        assert!(changed.is_empty());
        assert_eq!(store.version(Field::Output), 1);
    }

    #[test]
    fn test_set_case_reports_both_fields() {
        let mut store = SettingsStore::new();
        store.set_input("same");
        let changed = store.set_case("same", "new output");
        assert_eq!(changed, FieldSet::of(Field::Output));
    }

    #[test]
    fn test_debug_lists_fields() {
        let set: FieldSet = [Field::Input, Field::MaxTurn].into_iter().collect();
        assert_eq!(format!("{:?}", set), "{Input, MaxTurn}");
    }
}
