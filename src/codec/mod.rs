pub mod reader;
pub mod writer;
pub mod types;
pub mod map_types;
pub mod elements;
pub mod creature;
pub mod version;
pub mod map_data;

pub use reader::ObjectAttributes;
pub use writer::{format_float, ObjectWriter, RecordWriter};
pub use types::*;
pub use map_types::{
    ArcElement, CircleElement, CreatureHealth, CreatureToken, FileDefinition, ImageDefinition,
    LineElement, MapElement, MapObject, MonsterToken, PlayerToken, PolygonElement, RadiusAoe,
    RectangleElement, SpellAreaOfEffectElement, TextElement, TextFont, TileElement,
};
pub use version::{
    check_build_configuration, is_supported_format, CURRENT_FORMAT, MAX_SUPPORTED_FORMAT,
    MIN_SUPPORTED_FORMAT,
};
pub use map_data::{parse_objects, save_objects, MapData, SaveOptions};
