use serde::Serialize;

use crate::error::{Error, Result};

/// A coordinate pair in map pixel units (10 pixels = 1 inch)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A closed vocabulary mapping each file-format spelling to its variant.
#[derive(Debug)]
pub struct Choices<T: 'static> {
    pub name: &'static str,
    pub entries: &'static [(&'static str, T)],
}

impl<T: Copy + PartialEq> Choices<T> {
    pub fn lookup(&self, value: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(spelling, _)| *spelling == value)
            .map(|(_, choice)| *choice)
    }

    /// Reverse scan for the spelling of `choice`.
    pub fn encode(&self, choice: T) -> Result<&'static str> {
        self.entries
            .iter()
            .find(|(_, c)| *c == choice)
            .map(|(spelling, _)| *spelling)
            .ok_or_else(|| Error::Structural(format!("value not in list of valid {} choices", self.name)))
    }
}

/// An enumerated attribute with a static vocabulary and a byte code.
pub trait Choice: Copy + PartialEq + Default + 'static {
    fn choices() -> &'static Choices<Self>;

    fn from_u8(code: u8) -> Option<Self>;

    /// Spelling for a raw code; fails when no variant carries `code`.
    fn encode_code(code: u8) -> Result<&'static str> {
        let table = Self::choices();
        let choice = Self::from_u8(code).ok_or_else(|| {
            Error::Structural(format!("value {code} not in list of valid {} choices", table.name))
        })?;
        table.encode(choice)
    }
}

/// Line dash pattern for map elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum DashStyle {
    #[default]
    Solid = 0,
    Long = 1,
    Medium = 2,
    Short = 3,
    LongShort = 4,
    Long2Short = 5,
}

static DASH_STYLES: Choices<DashStyle> = Choices {
    name: "dash",
    entries: &[
        ("", DashStyle::Solid),
        ("-", DashStyle::Long),
        (",", DashStyle::Medium),
        (".", DashStyle::Short),
        ("-.", DashStyle::LongShort),
        ("-..", DashStyle::Long2Short),
    ],
};

impl Choice for DashStyle {
    fn choices() -> &'static Choices<Self> {
        &DASH_STYLES
    }

    fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Solid),
            1 => Some(Self::Long),
            2 => Some(Self::Medium),
            3 => Some(Self::Short),
            4 => Some(Self::LongShort),
            5 => Some(Self::Long2Short),
            _ => None,
        }
    }
}

/// Arrowheads drawn on a line's endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum ArrowStyle {
    #[default]
    None = 0,
    First = 1,
    Last = 2,
    Both = 3,
}

static ARROW_STYLES: Choices<ArrowStyle> = Choices {
    name: "arrow",
    entries: &[
        ("none", ArrowStyle::None),
        ("first", ArrowStyle::First),
        ("last", ArrowStyle::Last),
        ("both", ArrowStyle::Both),
    ],
};

impl Choice for ArrowStyle {
    fn choices() -> &'static Choices<Self> {
        &ARROW_STYLES
    }

    fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::First),
            2 => Some(Self::Last),
            3 => Some(Self::Both),
            _ => None,
        }
    }
}

/// How polygon segments are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum JoinStyle {
    #[default]
    Bevel = 0,
    Miter = 1,
    Round = 2,
}

static JOIN_STYLES: Choices<JoinStyle> = Choices {
    name: "join",
    entries: &[
        ("bevel", JoinStyle::Bevel),
        ("miter", JoinStyle::Miter),
        ("round", JoinStyle::Round),
    ],
};

impl Choice for JoinStyle {
    fn choices() -> &'static Choices<Self> {
        &JOIN_STYLES
    }

    fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Bevel),
            1 => Some(Self::Miter),
            2 => Some(Self::Round),
            _ => None,
        }
    }
}

/// How an arc's endpoints are closed off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum ArcMode {
    #[default]
    PieSlice = 0,
    Arc = 1,
    Chord = 2,
}

static ARC_MODES: Choices<ArcMode> = Choices {
    name: "arcmode",
    entries: &[
        ("pieslice", ArcMode::PieSlice),
        ("arc", ArcMode::Arc),
        ("chord", ArcMode::Chord),
    ],
};

impl Choice for ArcMode {
    fn choices() -> &'static Choices<Self> {
        &ARC_MODES
    }

    fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::PieSlice),
            1 => Some(Self::Arc),
            2 => Some(Self::Chord),
            _ => None,
        }
    }
}

/// Shape of a spell area-of-effect element
///
/// `Cone` is a 90 degree pie slice, `Radius` an ellipse, `Ray` a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum AoeShape {
    #[default]
    Cone = 0,
    Radius = 1,
    Ray = 2,
}

static AOE_SHAPES: Choices<AoeShape> = Choices {
    name: "aoeshape",
    entries: &[
        ("cone", AoeShape::Cone),
        ("radius", AoeShape::Radius),
        ("ray", AoeShape::Ray),
    ],
};

impl Choice for AoeShape {
    fn choices() -> &'static Choices<Self> {
        &AOE_SHAPES
    }

    fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Cone),
            1 => Some(Self::Radius),
            2 => Some(Self::Ray),
            _ => None,
        }
    }
}

/// Locomotion currently used by a creature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum MoveMode {
    #[default]
    Land = 0,
    Burrow = 1,
    Climb = 2,
    Fly = 3,
    Swim = 4,
}

static MOVE_MODES: Choices<MoveMode> = Choices {
    name: "movemode",
    entries: &[
        ("land", MoveMode::Land),
        ("burrow", MoveMode::Burrow),
        ("climb", MoveMode::Climb),
        ("fly", MoveMode::Fly),
        ("swim", MoveMode::Swim),
    ],
};

impl Choice for MoveMode {
    fn choices() -> &'static Choices<Self> {
        &MOVE_MODES
    }

    fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Land),
            1 => Some(Self::Burrow),
            2 => Some(Self::Climb),
            3 => Some(Self::Fly),
            4 => Some(Self::Swim),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum FontWeight {
    #[default]
    Normal = 0,
    Bold = 1,
}

static FONT_WEIGHTS: Choices<FontWeight> = Choices {
    name: "font weight",
    entries: &[("normal", FontWeight::Normal), ("bold", FontWeight::Bold)],
};

impl Choice for FontWeight {
    fn choices() -> &'static Choices<Self> {
        &FONT_WEIGHTS
    }

    fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Normal),
            1 => Some(Self::Bold),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum FontSlant {
    #[default]
    Roman = 0,
    Italic = 1,
}

static FONT_SLANTS: Choices<FontSlant> = Choices {
    name: "font slant",
    entries: &[("roman", FontSlant::Roman), ("italic", FontSlant::Italic)],
};

impl Choice for FontSlant {
    fn choices() -> &'static Choices<Self> {
        &FONT_SLANTS
    }

    fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Roman),
            1 => Some(Self::Italic),
            _ => None,
        }
    }
}

/// Where a text element's reference point sits relative to the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum Anchor {
    #[default]
    Center = 0,
    North = 1,
    South = 2,
    East = 3,
    West = 4,
    NorthEast = 5,
    NorthWest = 6,
    SouthWest = 7,
    SouthEast = 8,
}

static ANCHORS: Choices<Anchor> = Choices {
    name: "anchor",
    entries: &[
        ("center", Anchor::Center),
        ("n", Anchor::North),
        ("s", Anchor::South),
        ("e", Anchor::East),
        ("w", Anchor::West),
        ("ne", Anchor::NorthEast),
        ("se", Anchor::SouthEast),
        ("nw", Anchor::NorthWest),
        ("sw", Anchor::SouthWest),
    ],
};

impl Choice for Anchor {
    fn choices() -> &'static Choices<Self> {
        &ANCHORS
    }

    fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Center),
            1 => Some(Self::North),
            2 => Some(Self::South),
            3 => Some(Self::East),
            4 => Some(Self::West),
            5 => Some(Self::NorthEast),
            6 => Some(Self::NorthWest),
            7 => Some(Self::SouthWest),
            8 => Some(Self::SouthEast),
            _ => None,
        }
    }
}

/// Whether a creature token is a player or a monster.
///
/// `Unknown` has no spelling, so a token still carrying it cannot be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum CreatureType {
    #[default]
    Unknown = 0,
    Monster = 1,
    Player = 2,
}

static CREATURE_TYPES: Choices<CreatureType> = Choices {
    name: "creature type",
    entries: &[("monster", CreatureType::Monster), ("player", CreatureType::Player)],
};

impl Choice for CreatureType {
    fn choices() -> &'static Choices<Self> {
        &CREATURE_TYPES
    }

    fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::Monster),
            2 => Some(Self::Player),
            _ => None,
        }
    }
}
