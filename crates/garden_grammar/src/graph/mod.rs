//! Derivation graph: typed nodes, undirected adjacency edges and the store
//! holding them.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{Circle, Rect};

pub mod adjacency;
pub mod store;

pub use adjacency::rebuild_adjacency;
pub use store::Graph;

/// Identifier of a node. Allocated monotonically and never reused.
pub type NodeId = u64;

/// Grammar symbol of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Symbol {
    Garden,
    Area,
    PathSystem,
    FlowerArea,
    GrassRect,
    PathRect,
    TreeCircle,
    WaterCircle,
    WaterRect,
    RoseBed,
    TulipBed,
    Fountain,
}

impl Symbol {
    pub const ALL: [Symbol; 12] = [
        Symbol::Garden,
        Symbol::Area,
        Symbol::PathSystem,
        Symbol::FlowerArea,
        Symbol::GrassRect,
        Symbol::PathRect,
        Symbol::TreeCircle,
        Symbol::WaterCircle,
        Symbol::WaterRect,
        Symbol::RoseBed,
        Symbol::TulipBed,
        Symbol::Fountain,
    ];

    /// True for symbols that productions still rewrite.
    pub fn is_nonterminal(self) -> bool {
        matches!(
            self,
            Symbol::Garden | Symbol::Area | Symbol::PathSystem | Symbol::FlowerArea
        )
    }

    /// True for rectangles that represent ground at some stage of the
    /// derivation.
    pub fn is_sector(self) -> bool {
        matches!(self, Symbol::Area | Symbol::GrassRect | Symbol::FlowerArea)
    }

    /// Drawing layer, lower first: grass, beds, water, paths, trees.
    /// Nonterminals sort last.
    pub fn draw_layer(self) -> u8 {
        match self {
            Symbol::GrassRect => 0,
            Symbol::RoseBed | Symbol::TulipBed => 1,
            Symbol::WaterCircle | Symbol::WaterRect | Symbol::Fountain => 2,
            Symbol::PathRect => 3,
            Symbol::TreeCircle => 5,
            Symbol::Garden | Symbol::Area | Symbol::PathSystem | Symbol::FlowerArea => 9,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::Garden => "GARDEN",
            Symbol::Area => "AREA",
            Symbol::PathSystem => "PATH_SYSTEM",
            Symbol::FlowerArea => "FLOWER_AREA",
            Symbol::GrassRect => "GRASS_RECT",
            Symbol::PathRect => "PATH_RECT",
            Symbol::TreeCircle => "TREE_CIRCLE",
            Symbol::WaterCircle => "WATER_CIRCLE",
            Symbol::WaterRect => "WATER_RECT",
            Symbol::RoseBed => "ROSE_BED",
            Symbol::TulipBed => "TULIP_BED",
            Symbol::Fountain => "FOUNTAIN",
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Geometry of a node as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    Rect(Rect),
    Circle(Circle),
}

impl Shape {
    /// Axis-aligned bounds of the shape.
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rect(r) => *r,
            Shape::Circle(c) => c.bounds(),
        }
    }
}

/// Symbol and payload of a node.
///
/// Relabeling a node replaces its `NodeKind`, so payload that only exists for
/// one symbol (an AREA's depth, a PATH_SYSTEM's intensity) disappears with it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    Garden(Rect),
    Area { rect: Rect, depth: u32 },
    PathSystem { rect: Rect, intensity: u32 },
    FlowerArea(Rect),
    GrassRect(Rect),
    PathRect(Rect),
    TreeCircle(Circle),
    WaterCircle(Circle),
    WaterRect(Rect),
    RoseBed(Rect),
    TulipBed(Rect),
    Fountain(Circle),
}

impl NodeKind {
    pub fn symbol(&self) -> Symbol {
        match self {
            NodeKind::Garden(_) => Symbol::Garden,
            NodeKind::Area { .. } => Symbol::Area,
            NodeKind::PathSystem { .. } => Symbol::PathSystem,
            NodeKind::FlowerArea(_) => Symbol::FlowerArea,
            NodeKind::GrassRect(_) => Symbol::GrassRect,
            NodeKind::PathRect(_) => Symbol::PathRect,
            NodeKind::TreeCircle(_) => Symbol::TreeCircle,
            NodeKind::WaterCircle(_) => Symbol::WaterCircle,
            NodeKind::WaterRect(_) => Symbol::WaterRect,
            NodeKind::RoseBed(_) => Symbol::RoseBed,
            NodeKind::TulipBed(_) => Symbol::TulipBed,
            NodeKind::Fountain(_) => Symbol::Fountain,
        }
    }

    pub fn shape(&self) -> Shape {
        match *self {
            NodeKind::Garden(r)
            | NodeKind::Area { rect: r, .. }
            | NodeKind::PathSystem { rect: r, .. }
            | NodeKind::FlowerArea(r)
            | NodeKind::GrassRect(r)
            | NodeKind::PathRect(r)
            | NodeKind::WaterRect(r)
            | NodeKind::RoseBed(r)
            | NodeKind::TulipBed(r) => Shape::Rect(r),
            NodeKind::TreeCircle(c) | NodeKind::WaterCircle(c) | NodeKind::Fountain(c) => {
                Shape::Circle(c)
            }
        }
    }

    /// Rectangle of the node, if its shape is one.
    pub fn rect(&self) -> Option<Rect> {
        match self.shape() {
            Shape::Rect(r) => Some(r),
            Shape::Circle(_) => None,
        }
    }
}

/// A node of the derivation graph.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
}

impl Node {
    #[inline]
    pub fn symbol(&self) -> Symbol {
        self.kind.symbol()
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        self.kind.shape()
    }
}

/// Relation recorded by an edge. Sectors sharing a border are the only
/// relation the grammar uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeKind {
    Adjacent,
}

/// Undirected edge between two nodes, stored once per unordered pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// Smaller endpoint id.
    pub a: NodeId,
    /// Larger endpoint id.
    pub b: NodeId,
    pub kind: EdgeKind,
    /// Snapped border strip between the endpoints, when long enough to keep.
    pub border: Option<Rect>,
}

impl Edge {
    /// The endpoint opposite to `id`, if `id` is an endpoint.
    pub fn other(&self, id: NodeId) -> Option<NodeId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}
