//! Edge boundary conditions.
//!
//! Conditions are keyed by [`Side`], but application order never depends
//! on how they were inserted: consumers iterate [`Side::ALL`], so a corner
//! shared by two fixed sides always ends up with the later side's value.

use indexmap::IndexMap;
use std::fmt;

/// One edge of the rectangular domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// Row 0.
    Top,
    /// Row `height - 1`.
    Bottom,
    /// Column 0.
    Left,
    /// Column `width - 1`.
    Right,
}

impl Side {
    /// Fixed application order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    /// Lowercase side name as used in scenario descriptions.
    pub fn name(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Parse a side name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Side> {
        Side::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a boundary does each step.
#[derive(Clone, Debug, PartialEq)]
pub enum BoundaryKind {
    /// Clamp every edge cell to `value`.
    Fixed {
        /// Target temperature.
        value: f32,
    },
    /// Leave the edge alone; the stencil's missing neighbour gives zero flux.
    Insulated,
    /// A type name this version does not know. Applied as a no-op.
    Unrecognized {
        /// The type name as given.
        name: String,
    },
}

/// A boundary condition for one side.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryCondition {
    /// The condition's behavior.
    pub kind: BoundaryKind,
}

impl BoundaryCondition {
    /// A fixed-temperature boundary.
    pub fn fixed(value: f32) -> Self {
        Self {
            kind: BoundaryKind::Fixed { value },
        }
    }

    /// A zero-flux boundary.
    pub fn insulated() -> Self {
        Self {
            kind: BoundaryKind::Insulated,
        }
    }

    /// Build from a type name and optional value.
    ///
    /// `"fixed"` without a value clamps to `0.0`. Unknown type names are
    /// kept as [`BoundaryKind::Unrecognized`] rather than rejected.
    pub fn from_type(type_name: &str, value: Option<f32>) -> Self {
        let kind = match type_name {
            "fixed" => BoundaryKind::Fixed {
                value: value.unwrap_or(0.0),
            },
            "insulated" => BoundaryKind::Insulated,
            other => BoundaryKind::Unrecognized {
                name: other.to_string(),
            },
        };
        Self { kind }
    }

    /// The clamp value, if this is a fixed boundary.
    pub fn fixed_value(&self) -> Option<f32> {
        match self.kind {
            BoundaryKind::Fixed { value } => Some(value),
            _ => None,
        }
    }
}

/// Boundary conditions for the four sides. Absent sides are insulated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Boundaries {
    sides: IndexMap<Side, BoundaryCondition>,
}

impl Boundaries {
    /// No conditions: every side insulated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from side names such as `"top"`.
    ///
    /// Unknown side names are skipped with a warning. A repeated side
    /// keeps the last condition given.
    pub fn from_named<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, BoundaryCondition)>,
    {
        let mut out = Self::new();
        for (name, bc) in entries {
            match Side::from_name(name) {
                Some(side) => {
                    out.set(side, bc);
                }
                None => tracing::warn!(side = name, "ignoring boundary for unknown side"),
            }
        }
        out
    }

    /// Set the condition for a side, returning the previous one.
    pub fn set(&mut self, side: Side, bc: BoundaryCondition) -> Option<BoundaryCondition> {
        self.sides.insert(side, bc)
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, side: Side, bc: BoundaryCondition) -> Self {
        self.set(side, bc);
        self
    }

    /// The condition for a side, if any.
    pub fn get(&self, side: Side) -> Option<&BoundaryCondition> {
        self.sides.get(&side)
    }

    /// Conditions in application order ([`Side::ALL`]), skipping absent sides.
    pub fn ordered(&self) -> impl Iterator<Item = (Side, &BoundaryCondition)> + '_ {
        Side::ALL
            .into_iter()
            .filter_map(move |side| self.sides.get(&side).map(|bc| (side, bc)))
    }

    /// Number of sides with a condition.
    pub fn len(&self) -> usize {
        self.sides.len()
    }

    /// Whether no side has a condition.
    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_type_maps_known_and_unknown_names() {
        assert_eq!(
            BoundaryCondition::from_type("fixed", Some(3.5)).kind,
            BoundaryKind::Fixed { value: 3.5 }
        );
        assert_eq!(BoundaryCondition::from_type("fixed", None).fixed_value(), Some(0.0));
        assert_eq!(
            BoundaryCondition::from_type("insulated", Some(9.0)).kind,
            BoundaryKind::Insulated
        );
        assert_eq!(
            BoundaryCondition::from_type("convective", Some(1.0)).kind,
            BoundaryKind::Unrecognized {
                name: "convective".into()
            }
        );
    }

    #[test]
    fn ordered_ignores_insertion_order() {
        let b = Boundaries::new()
            .with(Side::Right, BoundaryCondition::fixed(4.0))
            .with(Side::Top, BoundaryCondition::fixed(1.0))
            .with(Side::Left, BoundaryCondition::fixed(3.0));
        let sides: Vec<Side> = b.ordered().map(|(s, _)| s).collect();
        assert_eq!(sides, vec![Side::Top, Side::Left, Side::Right]);
    }

    #[test]
    fn from_named_skips_unknown_sides() {
        let b = Boundaries::from_named([
            ("top", BoundaryCondition::fixed(100.0)),
            ("diagonal", BoundaryCondition::fixed(5.0)),
            ("left", BoundaryCondition::insulated()),
        ]);
        assert_eq!(b.len(), 2);
        assert_eq!(b.get(Side::Top).and_then(|bc| bc.fixed_value()), Some(100.0));
        assert_eq!(b.get(Side::Left), Some(&BoundaryCondition::insulated()));
        assert!(b.get(Side::Bottom).is_none());
    }

    #[test]
    fn side_names_round_trip() {
        for side in Side::ALL {
            assert_eq!(Side::from_name(side.name()), Some(side));
        }
        assert_eq!(Side::from_name("Top"), None);
    }

    // ── Property tests ──────────────────────────────────────────

    use proptest::prelude::*;

    fn arb_side() -> impl Strategy<Value = Side> {
        prop_oneof![
            Just(Side::Top),
            Just(Side::Bottom),
            Just(Side::Left),
            Just(Side::Right),
        ]
    }

    proptest! {
        #[test]
        fn ordered_is_always_canonical(sides in proptest::collection::vec(arb_side(), 0..8)) {
            let mut b = Boundaries::new();
            for (i, side) in sides.iter().enumerate() {
                b.set(*side, BoundaryCondition::fixed(i as f32));
            }
            let order: Vec<Side> = b.ordered().map(|(s, _)| s).collect();
            let mut sorted = order.clone();
            sorted.sort();
            prop_assert_eq!(&order, &sorted);
            sorted.dedup();
            prop_assert_eq!(order.len(), sorted.len());
        }
    }
}
