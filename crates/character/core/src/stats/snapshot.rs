//! Property snapshots and the before/after diff protocol.
//!
//! Every mutation that can shift derived values captures the full catalog
//! before and after, and reports only what changed. The snapshot walks
//! [`DerivedKind::all()`] in catalog order and fails fast on the first
//! resolution error, which is what makes mutations transactional: a failing
//! before-snapshot aborts the operation before anything is written.

use super::attribute::{AttributeValue, DerivedKind};
use super::derived::StatContext;
use crate::error::EngineError;

/// All derived values at a point in time, in catalog order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertySnapshot {
    values: Vec<(DerivedKind, AttributeValue)>,
}

impl PropertySnapshot {
    /// Evaluates the whole catalog under the given context.
    pub fn capture(ctx: &StatContext<'_>) -> Result<Self, EngineError> {
        let mut values = Vec::with_capacity(DerivedKind::COUNT);
        for kind in DerivedKind::all() {
            values.push((kind, kind.compute(ctx)?));
        }
        Ok(Self { values })
    }

    /// Value of one catalog entry.
    pub fn get(&self, kind: DerivedKind) -> Option<AttributeValue> {
        self.values
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, v)| *v)
    }

    /// All entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (DerivedKind, AttributeValue)> + '_ {
        self.values.iter().copied()
    }
}

/// One changed attribute inside a diff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeDelta {
    pub kind: DerivedKind,
    pub before: AttributeValue,
    pub after: AttributeValue,
}

/// The changed subset of two snapshots, in catalog order.
///
/// An empty diff means the mutation had no derived consequences (an idempotent
/// `set_stat`, for example).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeDiff {
    changes: Vec<AttributeDelta>,
}

impl AttributeDiff {
    /// Compares two snapshots entry by entry and keeps what differs.
    ///
    /// Both snapshots walk the same catalog, so positional comparison is
    /// exact.
    pub fn between(before: &PropertySnapshot, after: &PropertySnapshot) -> Self {
        let changes = before
            .iter()
            .zip(after.iter())
            .filter(|((_, a), (_, b))| a != b)
            .map(|((kind, a), (_, b))| AttributeDelta {
                kind,
                before: a,
                after: b,
            })
            .collect();
        Self { changes }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeDelta> {
        self.changes.iter()
    }

    /// The delta for one catalog entry, if it changed.
    pub fn get(&self, kind: DerivedKind) -> Option<&AttributeDelta> {
        self.changes.iter().find(|delta| delta.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{EffectRegistry, ResourcePool, Stat, StatTable};

    #[test]
    fn capture_covers_the_whole_catalog() {
        let table = StatTable::default();
        let effects = EffectRegistry::new();
        let resources = ResourcePool::default();
        let ctx = StatContext::new(&table, &effects, 1, &resources);

        let snapshot = PropertySnapshot::capture(&ctx).unwrap();
        assert_eq!(snapshot.iter().count(), DerivedKind::COUNT);
        assert!(snapshot.get(DerivedKind::MaxHp).is_some());
        assert!(snapshot.get(DerivedKind::WeightStatus).is_some());
    }

    #[test]
    fn identical_snapshots_diff_empty() {
        let table = StatTable::default();
        let effects = EffectRegistry::new();
        let resources = ResourcePool::default();
        let ctx = StatContext::new(&table, &effects, 1, &resources);

        let a = PropertySnapshot::capture(&ctx).unwrap();
        let b = PropertySnapshot::capture(&ctx).unwrap();
        assert!(AttributeDiff::between(&a, &b).is_empty());
    }

    #[test]
    fn diff_reports_only_the_consequences() {
        let mut table = StatTable::default();
        let effects = EffectRegistry::new();
        let resources = ResourcePool::default();

        let before = {
            let ctx = StatContext::new(&table, &effects, 1, &resources);
            PropertySnapshot::capture(&ctx).unwrap()
        };

        table.set(Stat::Strength, 20);
        let after = {
            let ctx = StatContext::new(&table, &effects, 1, &resources);
            PropertySnapshot::capture(&ctx).unwrap()
        };

        let diff = AttributeDiff::between(&before, &after);
        assert!(!diff.is_empty());

        let carry = diff.get(DerivedKind::CarryWeight).unwrap();
        assert_eq!(carry.before, AttributeValue::Int(10));
        assert_eq!(carry.after, AttributeValue::Int(20));

        assert_eq!(
            diff.get(DerivedKind::StrengthBonus).map(|d| d.after),
            Some(AttributeValue::Int(2))
        );
        // Untouched formulas stay out of the report.
        assert!(diff.get(DerivedKind::MaxHp).is_none());
        assert!(diff.get(DerivedKind::WalkSpeed).is_none());
    }
}
