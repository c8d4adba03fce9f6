//! GMA Mapper map-file codec
//!
//! Reads and writes the line-oriented list format the GMA mapper uses for
//! map files and for map objects sent between clients and the server.
//! Each line carries one attribute of one object (`TAG:id value`); the
//! parser regroups them per object and builds typed map elements and
//! creature tokens.

pub mod codec;
pub mod error;

pub use error::{Error, Result};
pub use codec::{
    check_build_configuration, parse_objects, save_objects,
    MapData, MapObject, SaveOptions,
    MapElement, ArcElement, CircleElement, LineElement, PolygonElement,
    RectangleElement, SpellAreaOfEffectElement, TextElement, TextFont, TileElement,
    CreatureToken, CreatureHealth, RadiusAoe, PlayerToken, MonsterToken,
    ImageDefinition, FileDefinition,
    Coordinates, CURRENT_FORMAT, MIN_SUPPORTED_FORMAT, MAX_SUPPORTED_FORMAT,
};
