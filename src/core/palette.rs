//! Display colors for node kinds

use crate::core::models::NodeKind;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#RRGGBB` hex notation
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Fill color for nodes whose kind is not in the palette
pub const DEFAULT_COLOR: Rgb = Rgb(0x95, 0xE1, 0xD3);

/// Edge stroke color
pub const EDGE_COLOR: Rgb = Rgb(0x80, 0x80, 0x80);

/// Wheat backdrop of the info banner
pub const BANNER_COLOR: Rgb = Rgb(0xF5, 0xDE, 0xB3);

/// Fill color for a node kind
#[must_use]
pub const fn color_for(kind: NodeKind) -> Rgb {
    match kind {
        NodeKind::Entrance => Rgb(0xFF, 0x6B, 0x6B),
        NodeKind::Hallway => Rgb(0x4E, 0xCD, 0xC4),
        NodeKind::Room => Rgb(0x95, 0xE1, 0xD3),
        NodeKind::Elevator => Rgb(0xFF, 0xD9, 0x3D),
        NodeKind::Stairs => Rgb(0xFF, 0xA0, 0x7A),
        NodeKind::Restroom => Rgb(0xDD, 0xA0, 0xDD),
        NodeKind::Outdoor => Rgb(0x90, 0xEE, 0x90),
        NodeKind::Building => Rgb(0xFF, 0xB6, 0xC1),
        NodeKind::Classroom => Rgb(0x87, 0xCE, 0xEB),
        NodeKind::Unknown => DEFAULT_COLOR,
    }
}

/// Legend entries: every known kind with its color, in legend order
#[must_use]
pub fn legend() -> Vec<(NodeKind, Rgb)> {
    NodeKind::KNOWN
        .into_iter()
        .map(|kind| (kind, color_for(kind)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_matches_reference_hex_values() {
        let expected = [
            (NodeKind::Entrance, "#FF6B6B"),
            (NodeKind::Hallway, "#4ECDC4"),
            (NodeKind::Room, "#95E1D3"),
            (NodeKind::Elevator, "#FFD93D"),
            (NodeKind::Stairs, "#FFA07A"),
            (NodeKind::Restroom, "#DDA0DD"),
            (NodeKind::Outdoor, "#90EE90"),
            (NodeKind::Building, "#FFB6C1"),
            (NodeKind::Classroom, "#87CEEB"),
        ];
        for (kind, hex) in expected {
            assert_eq!(color_for(kind).hex(), hex, "{kind}");
        }
    }

    #[test]
    fn unknown_and_absent_types_use_default_color() {
        assert_eq!(color_for(NodeKind::from_label(Some("parking"))), DEFAULT_COLOR);
        assert_eq!(color_for(NodeKind::from_label(None)), DEFAULT_COLOR);
        assert_eq!(DEFAULT_COLOR.hex(), "#95E1D3");
    }

    #[test]
    fn legend_lists_known_kinds_in_order() {
        let legend = legend();
        assert_eq!(legend.len(), 9);
        assert_eq!(legend[0].0, NodeKind::Entrance);
        assert_eq!(legend[8].0, NodeKind::Classroom);
    }
}
