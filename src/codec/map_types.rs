use serde::Serialize;

use super::types::{
    AoeShape, Anchor, ArcMode, ArrowStyle, Coordinates, CreatureType, DashStyle, FontSlant,
    FontWeight, JoinStyle, MoveMode,
};

/// Attributes shared by every static map feature.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MapElement {
    /// Unique (to this map) object identifier: letters, digits, `_` and `#`.
    pub id: String,
    /// The element's reference point.
    pub x: f64,
    pub y: f64,
    /// Additional vertices beyond the reference point.
    pub points: Vec<Coordinates>,
    /// Stacking order relative to other on-screen objects.
    pub z: i64,
    /// Outline color; a color name or `#rrggbb`.
    pub line: String,
    /// Fill color; empty means unfilled.
    pub fill: String,
    pub width: i64,
    pub layer: String,
    /// Dungeon level: 0 ground, positive above, negative below.
    pub level: i64,
    /// Group ID, empty when ungrouped.
    pub group: String,
    pub dash: DashStyle,
    pub hidden: bool,
    pub locked: bool,
}

impl MapElement {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            ..Default::default()
        }
    }

    pub fn reference_point(&self) -> Coordinates {
        Coordinates::new(self.x, self.y)
    }
}

/// Portion of the circle inscribed in the rectangle spanned by the
/// reference point and the single point in `points`. Angles in degrees.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ArcElement {
    pub element: MapElement,
    pub arc_mode: ArcMode,
    pub start: f64,
    pub extent: f64,
}

/// Ellipse inscribed in the rectangle spanned by the reference point and
/// the single point in `points`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CircleElement {
    pub element: MapElement,
}

/// Connected line segments from the reference point through `points`.
///
/// Lines are drawn with the fill color, not the line color.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LineElement {
    pub element: MapElement,
    pub arrow: ArrowStyle,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PolygonElement {
    pub element: MapElement,
    /// Smoothing factor for the sides; 0 means straight edges.
    pub spline: f64,
    pub join: JoinStyle,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RectangleElement {
    pub element: MapElement,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SpellAreaOfEffectElement {
    pub element: MapElement,
    pub shape: AoeShape,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TextFont {
    pub family: String,
    pub size: f64,
    pub weight: FontWeight,
    pub slant: FontSlant,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TextElement {
    pub element: MapElement,
    pub text: String,
    pub font: TextFont,
    pub anchor: Anchor,
}

/// Bitmap drawn with its upper-left corner at the reference point.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TileElement {
    pub element: MapElement,
    /// Image name as known to the mapper (see `ImageDefinition`).
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreatureHealth {
    pub max_hp: i64,
    pub lethal_damage: i64,
    pub non_lethal_damage: i64,
    /// Hit points a creature may fall below zero before dying.
    pub con: i64,
    pub is_flat_footed: bool,
    pub is_stable: bool,
    /// Overrides the client's own idea of the health condition when set.
    pub condition: String,
    /// Percentage by which hit points are blurred for players; 0 is exact.
    pub hp_blur: i64,
}

/// A spell effect radiating from a creature.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RadiusAoe {
    /// Map pixels from the token's center to the perimeter.
    pub radius: f64,
    pub color: String,
}

/// A movable token for a creature, positioned in grid units (1 grid = 5 ft).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreatureToken {
    pub id: String,
    /// Display name, unique among creatures.
    pub name: String,
    pub health: Option<CreatureHealth>,
    pub gx: f64,
    pub gy: f64,
    /// 0 for the default appearance, 1.. for alternates.
    pub skin: i64,
    /// Size code of each skin, when they differ.
    pub skin_size: Vec<String>,
    /// Elevation in feet relative to the floor.
    pub elev: i64,
    /// Threat zone color.
    pub color: String,
    pub note: String,
    /// Tactical size category (`S`, `M`, `L`, ...; lower case is "wide").
    pub size: String,
    pub area: String,
    pub status_list: Vec<String>,
    pub aoe: Option<RadiusAoe>,
    pub move_mode: MoveMode,
    pub reach: bool,
    pub killed: bool,
    /// Dimmed in combat when it is not this creature's turn.
    pub dim: bool,
    pub creature_type: CreatureType,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PlayerToken {
    pub creature: CreatureToken,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MonsterToken {
    pub creature: CreatureToken,
}

/// Anything the map tracks: a static element or a creature token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum MapObject {
    Arc(ArcElement),
    Circle(CircleElement),
    Line(LineElement),
    Polygon(PolygonElement),
    Rectangle(RectangleElement),
    SpellAreaOfEffect(SpellAreaOfEffectElement),
    Text(TextElement),
    Tile(TileElement),
    Player(PlayerToken),
    Monster(MonsterToken),
}

impl MapObject {
    pub fn id(&self) -> &str {
        match self {
            Self::Player(p) => &p.creature.id,
            Self::Monster(m) => &m.creature.id,
            other => other.element().map(|e| e.id.as_str()).unwrap_or_default(),
        }
    }

    /// The shared element attributes, or `None` for creature tokens.
    pub fn element(&self) -> Option<&MapElement> {
        match self {
            Self::Arc(o) => Some(&o.element),
            Self::Circle(o) => Some(&o.element),
            Self::Line(o) => Some(&o.element),
            Self::Polygon(o) => Some(&o.element),
            Self::Rectangle(o) => Some(&o.element),
            Self::SpellAreaOfEffect(o) => Some(&o.element),
            Self::Text(o) => Some(&o.element),
            Self::Tile(o) => Some(&o.element),
            Self::Player(_) | Self::Monster(_) => None,
        }
    }

    pub fn creature(&self) -> Option<&CreatureToken> {
        match self {
            Self::Player(p) => Some(&p.creature),
            Self::Monster(m) => Some(&m.creature),
            _ => None,
        }
    }

    /// The `TYPE` tag this object is saved under.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Arc(_) => "arc",
            Self::Circle(_) => "circ",
            Self::Line(_) => "line",
            Self::Polygon(_) => "poly",
            Self::Rectangle(_) => "rect",
            Self::SpellAreaOfEffect(_) => "aoe",
            Self::Text(_) => "text",
            Self::Tile(_) => "tile",
            Self::Player(_) => "player",
            Self::Monster(_) => "monster",
        }
    }
}

/// An image known to the mapper, keyed by `"<name>:<zoom>"`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ImageDefinition {
    pub name: String,
    /// Magnification level this bitmap represents.
    pub zoom: f64,
    pub file: String,
    /// Whether `file` is a local path rather than a server ID (`@...`).
    pub is_local_file: bool,
}

impl ImageDefinition {
    pub fn new(name: impl Into<String>, zoom: f64, file: impl Into<String>) -> Self {
        let file = file.into();
        Self {
            name: name.into(),
            zoom,
            is_local_file: is_local_file(&file),
            file,
        }
    }

    pub fn key(&self) -> String {
        image_key(&self.name, self.zoom)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FileDefinition {
    pub file: String,
    pub is_local_file: bool,
}

impl FileDefinition {
    pub fn new(file: impl Into<String>) -> Self {
        let file = file.into();
        Self {
            is_local_file: is_local_file(&file),
            file,
        }
    }
}

/// Server-side IDs are written with a leading `@`.
pub fn is_local_file(file: &str) -> bool {
    !file.starts_with('@')
}

pub fn image_key(name: &str, zoom: f64) -> String {
    format!("{name}:{}", super::writer::format_float(zoom))
}
