//! Built-in layout presets.
//!
//! - `minimal`: one weighted box above a one-line status bar
//! - `weights-only`: nested rows and columns sized by weight alone
//! - `constraints`: the same tree with fixed, min and max values mixed in
//! - `overview`: a sidebar capped at 30 columns next to a nested workspace

use super::types::{ContentSpec, TileSpec};
use crate::constants::tree::ROOT_NAME;
use crate::layout::{Direction, Size};

/// Names of all built-in presets.
pub const PRESET_NAMES: &[&str] = &["minimal", "weights-only", "constraints", "overview"];

/// Returns the preset with the given name.
#[must_use]
pub fn preset(name: &str) -> Option<TileSpec> {
    match name {
        "minimal" => Some(minimal()),
        "weights-only" => Some(weights_only()),
        "constraints" => Some(constraints()),
        "overview" => Some(overview()),
        _ => None,
    }
}

fn status() -> TileSpec {
    TileSpec::leaf("Status", Size::new().with_fixed_height(1)).with_content(ContentSpec::Metrics)
}

fn minimal() -> TileSpec {
    TileSpec::container(
        ROOT_NAME,
        Direction::Column,
        Size::weighted(1.0),
        vec![TileSpec::leaf("Box1", Size::weighted(1.0)), status()],
    )
}

/// Shared shape of `weights-only` and `constraints`, one size per box.
fn nested(boxes: [Size; 6]) -> TileSpec {
    let [box1, box2, box3, box4, box5, box6] = boxes;
    let inner = TileSpec::container(
        "Sub-2-Sub-1",
        Direction::Row,
        Size::weighted(0.5),
        vec![TileSpec::leaf("Box5", box5), TileSpec::leaf("Box6", box6)],
    );
    let sub2 = TileSpec::container(
        "Sub-2",
        Direction::Column,
        Size::weighted(0.6),
        vec![TileSpec::leaf("Box3", box3), TileSpec::leaf("Box4", box4), inner],
    );
    let sub1 = TileSpec::container(
        "Sub-1",
        Direction::Row,
        Size::weighted(1.0),
        vec![TileSpec::leaf("Box1", box1), TileSpec::leaf("Box2", box2), sub2],
    );
    TileSpec::container(ROOT_NAME, Direction::Column, Size::weighted(1.0), vec![sub1, status()])
}

fn weights_only() -> TileSpec {
    nested([
        Size::weighted(0.2),
        Size::weighted(0.4),
        Size::weighted(0.2),
        Size::weighted(0.3),
        Size::weighted(0.4),
        Size::weighted(0.6),
    ])
}

fn constraints() -> TileSpec {
    nested([
        Size::weighted(0.2).with_fixed_width(50).with_fixed_height(15),
        Size::weighted(0.4).with_max_width(50),
        Size::weighted(0.2).with_min_height(6).with_max_width(90),
        Size::weighted(0.3).with_max_width(50),
        Size::weighted(0.4).with_max_height(8),
        Size::weighted(0.6).with_max_width(40).with_max_height(14),
    ])
}

fn overview() -> TileSpec {
    let right_sub = TileSpec::container(
        "RightAreaSubLayout",
        Direction::Row,
        Size::weighted(0.5),
        vec![
            TileSpec::leaf("Box5", Size::weighted(0.4).with_max_height(8)),
            TileSpec::leaf("Box6", Size::weighted(0.6).with_max_width(40).with_max_height(14)),
        ],
    );
    let right = TileSpec::container(
        "RightArea",
        Direction::Column,
        Size::weighted(0.6),
        vec![
            TileSpec::leaf("Box3", Size::weighted(0.2).with_min_height(6).with_max_width(90)),
            TileSpec::leaf(
                "Box4",
                Size::weighted(0.3).with_min_width(40).with_max_width(50),
            ),
            right_sub,
        ],
    );
    let content_area = TileSpec::container(
        "ContentArea",
        Direction::Row,
        Size::weighted(1.0),
        vec![
            TileSpec::leaf("Layout overview", Size::weighted(0.3)).with_content(ContentSpec::Text {
                text: "Per-container sizes are listed by `tessel tree`.".to_string(),
            }),
            right,
        ],
    );
    let target = TileSpec::container(
        "Target",
        Direction::Column,
        Size::weighted(1.0),
        vec![content_area, status()],
    );
    let layouts = TileSpec::leaf("Layouts", Size::weighted(1.0).with_max_width(30)).with_content(
        ContentSpec::Text {
            text: PRESET_NAMES.join("\n"),
        },
    );

    TileSpec::container(ROOT_NAME, Direction::Row, Size::weighted(1.0), vec![layouts, target])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::EngineOptions;

    #[test]
    fn test_every_preset_name_resolves() {
        for name in PRESET_NAMES {
            let spec = preset(name).unwrap();
            assert!(spec.is_container(), "{name} should be a container");
            assert!(spec.build(EngineOptions::default()).is_ok());
        }
        assert!(preset("unknown").is_none());
    }

    #[test]
    fn test_minimal_layout() {
        let mut tree = preset("minimal").unwrap().build(EngineOptions::default()).unwrap();
        tree.resize(80, 24).unwrap();

        let box1 = tree.resolved(tree.find("Box1").unwrap()).unwrap();
        let status = tree.resolved(tree.find("Status").unwrap()).unwrap();
        assert_eq!((box1.width, box1.height), (80, 23));
        assert_eq!((status.width, status.height), (80, 1));
    }

    #[test]
    fn test_constraints_layout_honors_fixed_and_max() {
        let mut tree = preset("constraints").unwrap().build(EngineOptions::default()).unwrap();
        tree.resize(200, 50).unwrap();

        let size = |name: &str| tree.resolved(tree.find(name).unwrap()).unwrap();
        assert_eq!(size("Box1").width, 50);
        assert_eq!(size("Box1").height, 15);
        assert!(size("Box2").width <= 50);
        assert!(size("Box6").width <= 40);
        assert!(size("Box6").height <= 14);
        assert_eq!(size("Status").height, 1);
        assert_eq!(size("Sub-1").height, 49);
    }

    #[test]
    fn test_overview_sidebar_is_capped() {
        let mut tree = preset("overview").unwrap().build(EngineOptions::default()).unwrap();
        tree.resize(120, 40).unwrap();

        let layouts = tree.resolved(tree.find("Layouts").unwrap()).unwrap();
        let target = tree.resolved(tree.find("Target").unwrap()).unwrap();
        assert_eq!(layouts.width, 30);
        assert_eq!(target.width, 90);
    }

    #[test]
    fn test_tile_counts() {
        assert_eq!(preset("minimal").unwrap().count(), 3);
        assert_eq!(preset("weights-only").unwrap().count(), 11);
        assert_eq!(preset("constraints").unwrap().count(), 11);
        assert_eq!(preset("overview").unwrap().count(), 12);
    }
}
