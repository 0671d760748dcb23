//! Node model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical node type. Controls only the display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Building entrance
    Entrance,
    /// Corridor segment
    Hallway,
    /// Generic room (also the kind of nodes without a type)
    Room,
    /// Elevator shaft
    Elevator,
    /// Staircase
    Stairs,
    /// Restroom
    Restroom,
    /// Outdoor waypoint
    Outdoor,
    /// Whole building
    Building,
    /// Classroom
    Classroom,
    /// A type label outside the known set
    Unknown,
}

impl NodeKind {
    /// The known kinds, in legend order
    pub const KNOWN: [Self; 9] = [
        Self::Entrance,
        Self::Hallway,
        Self::Room,
        Self::Elevator,
        Self::Stairs,
        Self::Restroom,
        Self::Outdoor,
        Self::Building,
        Self::Classroom,
    ];

    /// Resolve a raw `type` value. Absent types are rooms; matching is case-sensitive.
    #[must_use]
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Self::Room;
        };
        Self::KNOWN
            .into_iter()
            .find(|kind| kind.label() == label)
            .unwrap_or(Self::Unknown)
    }

    /// The lowercase type label used in the input
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Entrance => "entrance",
            Self::Hallway => "hallway",
            Self::Room => "room",
            Self::Elevator => "elevator",
            Self::Stairs => "stairs",
            Self::Restroom => "restroom",
            Self::Outdoor => "outdoor",
            Self::Building => "building",
            Self::Classroom => "classroom",
            Self::Unknown => "unknown",
        }
    }

    /// Capitalized name shown in legends
    #[must_use]
    pub fn display_name(self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_ascii_uppercase().to_string() + chars.as_str()
        })
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A campus location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier, also used as the drawn label (e.g., "CP30")
    pub id: String,

    /// Display category
    pub kind: NodeKind,

    /// Horizontal image coordinate
    pub x: Option<f64>,

    /// Vertical image coordinate (grows downward, as in the source image)
    pub y: Option<f64>,
}

impl Node {
    /// Create a node without coordinates
    #[must_use]
    pub const fn new(id: String, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            x: None,
            y: None,
        }
    }

    /// Attach image coordinates
    #[must_use]
    pub const fn with_coordinates(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Both coordinates, if the node has them
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.x.zip(self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_type_is_room() {
        assert_eq!(NodeKind::from_label(None), NodeKind::Room);
    }

    #[test]
    fn known_labels_resolve() {
        for kind in NodeKind::KNOWN {
            assert_eq!(NodeKind::from_label(Some(kind.label())), kind);
        }
    }

    #[test]
    fn unrecognized_labels_are_unknown() {
        assert_eq!(NodeKind::from_label(Some("parking")), NodeKind::Unknown);
        assert_eq!(NodeKind::from_label(Some("Room")), NodeKind::Unknown);
        assert_eq!(NodeKind::from_label(Some("")), NodeKind::Unknown);
    }

    #[test]
    fn display_name_is_capitalized() {
        assert_eq!(NodeKind::Entrance.display_name(), "Entrance");
        assert_eq!(NodeKind::Classroom.display_name(), "Classroom");
    }

    #[test]
    fn coordinates_need_both_axes() {
        let mut node = Node::new("A".to_string(), NodeKind::Room);
        assert_eq!(node.coordinates(), None);
        node.x = Some(1.0);
        assert_eq!(node.coordinates(), None);
        let node = node.with_coordinates(3.0, 4.0);
        assert_eq!(node.coordinates(), Some((3.0, 4.0)));
    }
}
