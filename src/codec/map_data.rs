use indexmap::IndexMap;
use serde::Serialize;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use tracing::{debug, trace};

use super::map_types::{
    image_key, ArcElement, CircleElement, FileDefinition, ImageDefinition, LineElement,
    MapObject, MonsterToken, PlayerToken, PolygonElement, RectangleElement,
    SpellAreaOfEffectElement, TextElement, TileElement,
};
use super::reader::{parse_float, ObjectAttributes};
use super::version::{ensure_supported_format, CURRENT_FORMAT};
use super::writer::{format_float, RecordWriter};
use crate::error::{Error, Result};

const HEADER_PREFIX: &str = "__MAPPER__:";

/// Pseudo-attribute recording the `P`/`M` marker of a creature record.
const MOB_TYPE: &str = "__mob_type__";

type Constructor = fn(&str, &ObjectAttributes) -> Result<MapObject>;

static CONSTRUCTORS: [(&str, Constructor); 10] = [
    ("aoe", |id, a| SpellAreaOfEffectElement::from_attributes(id, a).map(MapObject::SpellAreaOfEffect)),
    ("arc", |id, a| ArcElement::from_attributes(id, a).map(MapObject::Arc)),
    ("circ", |id, a| CircleElement::from_attributes(id, a).map(MapObject::Circle)),
    ("line", |id, a| LineElement::from_attributes(id, a).map(MapObject::Line)),
    ("poly", |id, a| PolygonElement::from_attributes(id, a).map(MapObject::Polygon)),
    ("rect", |id, a| RectangleElement::from_attributes(id, a).map(MapObject::Rectangle)),
    ("text", |id, a| TextElement::from_attributes(id, a).map(MapObject::Text)),
    ("tile", |id, a| TileElement::from_attributes(id, a).map(MapObject::Tile)),
    ("player", |id, a| PlayerToken::from_attributes(id, a).map(MapObject::Player)),
    ("monster", |id, a| MonsterToken::from_attributes(id, a).map(MapObject::Monster)),
];

/// Everything read from one map file or data stream.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MapData {
    /// Objects in the order their IDs were first seen.
    pub objects: Vec<MapObject>,
    pub images: IndexMap<String, ImageDefinition>,
    pub files: Vec<FileDefinition>,
    /// Version from the `__MAPPER__` header, if one declared it.
    pub format: Option<i64>,
}

impl MapData {
    pub fn parse<I>(lines: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        parse_objects(lines)
    }

    pub fn save(&self, options: &SaveOptions) -> Result<Vec<String>> {
        save_objects(&self.objects, &self.images, &self.files, options)
    }
}

/// First-pass accumulator: raw attributes per object ID plus the side tables.
#[derive(Default)]
struct Demux {
    objects: IndexMap<String, ObjectAttributes>,
    images: IndexMap<String, ImageDefinition>,
    files: Vec<FileDefinition>,
    format: Option<i64>,
}

impl Demux {
    fn line(&mut self, text: &str) -> Result<()> {
        let fields = tcllist::parse_list(text)?;
        if fields.len() < 2 {
            return Err(Error::Structural(format!("not enough fields in {text:?}")));
        }

        if let Some(version) = fields[0].strip_prefix(HEADER_PREFIX) {
            return self.header(version);
        }

        match fields[0].as_str() {
            "F" => {
                let [_, file] = fields.as_slice() else {
                    return Err(Error::Structural(format!(
                        "file definition needs 2 fields, not {}",
                        fields.len()
                    )));
                };
                self.files.push(FileDefinition::new(file.as_str()));
            }
            "I" => {
                let [_, name, zoom, file] = fields.as_slice() else {
                    return Err(Error::Structural(format!(
                        "image definition needs 4 fields, not {}",
                        fields.len()
                    )));
                };
                let zoom = parse_float("zoom", zoom)?;
                self.images.insert(
                    image_key(name, zoom),
                    ImageDefinition::new(name.as_str(), zoom, file.as_str()),
                );
            }
            marker @ ("P" | "M") => {
                // only a creature line that introduces the ID marks it
                let (id, first_seen) = self.attribute(&fields[1..])?;
                if first_seen {
                    if let Some(attrs) = self.objects.get_mut(id) {
                        attrs.insert(MOB_TYPE, vec![marker.to_string()]);
                    }
                }
            }
            _ => {
                self.attribute(&fields)?;
            }
        }
        Ok(())
    }

    fn header(&mut self, version: &str) -> Result<()> {
        if version.is_empty() {
            return Ok(());
        }
        let found: i64 = version.parse().map_err(|_| Error::TypeConversion {
            attribute: "__MAPPER__".into(),
            value: version.to_string(),
            expected: "integer",
        })?;
        if let Some(previous) = self.format {
            if previous != found {
                return Err(Error::ConflictingHeader { previous, found });
            }
        }
        self.format = Some(found);
        ensure_supported_format(found)
    }

    /// Store `TAG:id value...`; returns the object ID and whether this line
    /// was the first one for it.
    fn attribute<'f>(&mut self, fields: &'f [String]) -> Result<(&'f str, bool)> {
        if fields.len() < 2 {
            return Err(Error::Structural(format!("not enough fields in {fields:?}")));
        }
        let Some((tag, id)) = fields[0].split_once(':') else {
            return Err(Error::Structural(format!(
                "not a valid attr:id value: {}",
                fields[0]
            )));
        };
        trace!(object = id, tag = tag, "Accumulated attribute");
        let first_seen = !self.objects.contains_key(id);
        self.objects
            .entry(id.to_string())
            .or_default()
            .insert(tag, fields[1..].to_vec());
        Ok((id, first_seen))
    }
}

/// Parse map file lines into objects, images and files.
///
/// An object's attributes may be spread over any number of lines in any
/// order. Any error rejects the whole input.
pub fn parse_objects<I>(lines: I) -> Result<MapData>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut demux = Demux::default();
    for (index, line) in lines.into_iter().enumerate() {
        demux.line(line.as_ref()).map_err(|e| e.at_line(index + 1))?;
    }

    let mut objects = Vec::with_capacity(demux.objects.len());
    for (id, attrs) in &demux.objects {
        objects.push(construct(id, attrs).map_err(|e| e.in_object(id))?);
    }

    debug!(
        objects = objects.len(),
        images = demux.images.len(),
        files = demux.files.len(),
        format = ?demux.format,
        "Parsed map data"
    );

    Ok(MapData {
        objects,
        images: demux.images,
        files: demux.files,
        format: demux.format,
    })
}

fn construct(id: &str, attrs: &ObjectAttributes) -> Result<MapObject> {
    let tag = match attrs.get(MOB_TYPE) {
        Some(marker) => match marker.first().map(String::as_str) {
            Some("P") => "player",
            Some("M") => "monster",
            other => {
                return Err(Error::UnknownObjectType {
                    id: id.to_string(),
                    tag: other.unwrap_or_default().to_string(),
                })
            }
        },
        None => match attrs.get("TYPE").and_then(<[String]>::first) {
            Some(tag) => tag.as_str(),
            None => return Err(Error::MissingTypeTag { id: id.to_string() }),
        },
    };
    let constructor = CONSTRUCTORS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, constructor)| *constructor)
        .ok_or_else(|| Error::UnknownObjectType {
            id: id.to_string(),
            tag: tag.to_string(),
        })?;
    constructor(id, attrs)
}

impl MapObject {
    /// Append this object's attribute lines.
    pub fn write(&self, out: &mut RecordWriter) -> Result<()> {
        match self {
            Self::Arc(o) => o.write(out),
            Self::Circle(o) => o.write(out),
            Self::Line(o) => o.write(out),
            Self::Polygon(o) => o.write(out),
            Self::Rectangle(o) => o.write(out),
            Self::SpellAreaOfEffect(o) => o.write(out),
            Self::Text(o) => o.write(out),
            Self::Tile(o) => o.write(out),
            Self::Player(o) => o.write(out),
            Self::Monster(o) => o.write(out),
        }
    }
}

/// How `save_objects` writes its output.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    pub comment: String,
    /// Date embedded in the header; the current time when unset.
    pub date: Option<OffsetDateTime>,
    pub suppress_header: bool,
}

impl SaveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_header(mut self) -> Self {
        self.suppress_header = true;
        self
    }

    pub fn with_date(mut self, date: OffsetDateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// The two fields of the `__MAPPER__` header record.
fn header_fields(options: &SaveOptions) -> Result<[String; 2]> {
    let date = options
        .date
        .unwrap_or_else(OffsetDateTime::now_utc)
        .to_offset(UtcOffset::UTC);
    let formatted = date
        .format(format_description!(
            "[weekday repr:short] [month repr:short] [day padding:space] [hour]:[minute]:[second] UTC [year]"
        ))
        .map_err(|e| Error::Structural(format!("cannot format header date: {e}")))?;

    let file_date = tcllist::to_list_string(&[date.unix_timestamp().to_string(), formatted]);
    let comment = tcllist::to_list_string(&[options.comment.as_str(), file_date.as_str()]);
    Ok([format!("{HEADER_PREFIX}{CURRENT_FORMAT}"), comment])
}

/// Serialize objects, then image and file definitions, as map file lines.
pub fn save_objects(
    objects: &[MapObject],
    images: &IndexMap<String, ImageDefinition>,
    files: &[FileDefinition],
    options: &SaveOptions,
) -> Result<Vec<String>> {
    let mut out = RecordWriter::with_capacity(objects.len() * 12 + images.len() + files.len() + 1);
    if !options.suppress_header {
        out.write_record(&header_fields(options)?);
    }

    for object in objects {
        object.write(&mut out).map_err(|e| e.in_object(object.id()))?;
    }
    for image in images.values() {
        let zoom = format_float(image.zoom);
        out.write_record(&["I", image.name.as_str(), zoom.as_str(), image.file.as_str()]);
    }
    for file in files {
        out.write_record(&["F", file.file.as_str()]);
    }

    debug!(lines = out.len(), objects = objects.len(), "Saved map data");
    Ok(out.into_lines())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::codec::map_types::{
        CreatureHealth, CreatureToken, MapElement, RadiusAoe, TextFont,
    };
    use crate::codec::types::{
        Anchor, AoeShape, ArcMode, ArrowStyle, Coordinates, CreatureType, DashStyle, FontSlant,
        FontWeight, JoinStyle, MoveMode,
    };

    fn circle_lines() -> Vec<&'static str> {
        vec![
            "X:obj1 10.0",
            "Y:obj1 20.0",
            "Z:obj1 0",
            "TYPE:obj1 circ",
            "FILL:obj1 blue",
            "LAYER:obj1 walls",
            "POINTS:obj1 {30.0 40.0}",
        ]
    }

    fn root_of(result: Result<MapData>) -> Error {
        match result {
            Ok(data) => panic!("expected an error, parsed {data:?}"),
            Err(e) => e,
        }
    }

    #[test]
    fn test_parse_circle() {
        let data = parse_objects(circle_lines()).unwrap();
        assert_eq!(data.objects.len(), 1);
        let MapObject::Circle(circle) = &data.objects[0] else {
            panic!("not a circle: {:?}", data.objects[0]);
        };
        let e = &circle.element;
        assert_eq!(e.id, "obj1");
        assert_eq!(e.reference_point(), Coordinates::new(10.0, 20.0));
        assert_eq!(e.fill, "blue");
        assert_eq!(e.layer, "walls");
        assert_eq!(e.points, vec![Coordinates::new(30.0, 40.0)]);
        assert_eq!(data.format, None);
    }

    #[test]
    fn test_header_versions() {
        for version in 13..=17 {
            let mut lines = vec![format!("__MAPPER__:{version} {{{{}} {{0 x}}}}")];
            lines.extend(circle_lines().into_iter().map(String::from));
            let result = parse_objects(&lines);
            if (14..=16).contains(&version) {
                assert_eq!(result.unwrap().format, Some(version));
            } else {
                let err = root_of(result);
                assert_eq!(err.line(), Some(1));
                assert!(matches!(
                    err.root(),
                    Error::UnsupportedFormatVersion { version: v, min: 14, max: 16 } if *v == version
                ));
            }
        }
    }

    #[test]
    fn test_header_edge_cases() {
        let data = parse_objects(["__MAPPER__: {}", "__MAPPER__:15 {}", "__MAPPER__:15 {}"]).unwrap();
        assert_eq!(data.format, Some(15));
        assert!(data.objects.is_empty());

        let err = root_of(parse_objects(["__MAPPER__:15 {}", "__MAPPER__:16 {}"]));
        assert_eq!(err.line(), Some(2));
        assert!(matches!(err.root(), Error::ConflictingHeader { previous: 15, found: 16 }));

        let err = root_of(parse_objects(["__MAPPER__:v16 {}"]));
        assert!(matches!(err.root(), Error::TypeConversion { .. }));
    }

    #[test]
    fn test_aoe_without_position() {
        let err = root_of(parse_objects(["TYPE:s1 aoe", "AOESHAPE:s1 cone"]));
        assert_eq!(err.object_id(), Some("s1"));
        assert!(matches!(
            err.root(),
            Error::MissingRequiredAttribute { attribute } if attribute == "X"
        ));
    }

    #[test]
    fn test_missing_and_unknown_type() {
        let err = root_of(parse_objects(["X:o 1", "Y:o 2"]));
        assert!(matches!(err.root(), Error::MissingTypeTag { id } if id == "o"));

        let err = root_of(parse_objects(["X:o 1", "TYPE:o hexagon"]));
        assert!(matches!(err.root(), Error::UnknownObjectType { tag, .. } if tag == "hexagon"));
    }

    #[test]
    fn test_structural_line_errors() {
        let err = root_of(parse_objects(["X:o 1", "lonely"]));
        assert_eq!(err.line(), Some(2));
        assert!(matches!(err.root(), Error::Structural(_)));

        let err = root_of(parse_objects(["NOCOLON 1"]));
        assert!(matches!(err.root(), Error::Structural(_)));

        let err = root_of(parse_objects(["P NAME:x"]));
        assert!(matches!(err.root(), Error::Structural(_)));

        let err = root_of(parse_objects(["X:o {1"]));
        assert!(matches!(err.root(), Error::MalformedList(_)));

        let err = root_of(parse_objects(["F a b"]));
        assert!(matches!(err.root(), Error::Structural(_)));

        let err = root_of(parse_objects(["I name big file"]));
        assert!(matches!(err.root(), Error::TypeConversion { .. }));
    }

    #[test]
    fn test_interleaved_objects_keep_first_seen_order() {
        let lines = [
            "TYPE:b rect",
            "X:a 1",
            "M NAME:m1 Orc",
            "X:b 5",
            "Y:a 2",
            "M GX:m1 1",
            "Y:b 6",
            "Z:a 0",
            "M GY:m1 2",
            "Z:b 0",
            "TYPE:a line",
            "M SIZE:m1 M",
            "M AREA:m1 M",
            "X:a 100",
        ];
        let data = parse_objects(lines).unwrap();
        let ids: Vec<&str> = data.objects.iter().map(MapObject::id).collect();
        assert_eq!(ids, ["b", "a", "m1"]);
        assert!(matches!(data.objects[0], MapObject::Rectangle(_)));
        // a later line replaces the earlier value
        assert_eq!(data.objects[1].element().map(|e| e.x), Some(100.0));
        let creature = data.objects[2].creature().unwrap();
        assert_eq!(creature.creature_type, CreatureType::Monster);
        assert_eq!(creature.name, "Orc");
    }

    #[test]
    fn test_creature_marker_only_on_first_sighting() {
        let lines = [
            "TYPE:c1 monster",
            "NAME:c1 Troll",
            "GX:c1 1",
            "GY:c1 1",
            "SIZE:c1 L",
            "AREA:c1 L",
            "P NOTE:c1 late",
        ];
        let data = parse_objects(lines).unwrap();
        let MapObject::Monster(monster) = &data.objects[0] else {
            panic!("expected a monster: {:?}", data.objects[0]);
        };
        assert_eq!(monster.creature.note, "late");

        // the first creature line decides, later ones do not re-mark
        let data = parse_objects(["M NAME:c2 Imp", "P GX:c2 0", "P GY:c2 0", "P SIZE:c2 T", "P AREA:c2 T"])
            .unwrap();
        assert!(matches!(data.objects[0], MapObject::Monster(_)));
    }

    #[test]
    fn test_side_tables() {
        let data = parse_objects([
            "I floor 1.0 @abc123",
            "F /tmp/x.map",
            "I floor 2 floor@2.gif",
            "F @srv",
            "I floor 1 /local/floor.gif",
        ])
        .unwrap();
        assert_eq!(data.images.keys().collect::<Vec<_>>(), ["floor:1", "floor:2"]);
        assert_eq!(data.images["floor:1"].file, "/local/floor.gif");
        assert!(data.images["floor:1"].is_local_file);
        assert_eq!(data.files.len(), 2);
        assert!(data.files[0].is_local_file);
        assert!(!data.files[1].is_local_file);
    }

    #[test]
    fn test_header_shape() {
        let date = datetime!(2006-01-02 15:04:05 UTC);
        let lines = save_objects(&[], &IndexMap::new(), &[], &SaveOptions::new().with_date(date)).unwrap();
        assert_eq!(
            lines,
            ["__MAPPER__:16 {{} {1136214245 {Mon Jan  2 15:04:05 UTC 2006}}}"]
        );

        let options = SaveOptions::new()
            .with_date(datetime!(2021-11-30 23:59:09 -5))
            .with_comment("test map");
        let lines = save_objects(&[], &IndexMap::new(), &[], &options).unwrap();
        assert_eq!(
            lines,
            ["__MAPPER__:16 {{test map} {1638334749 {Wed Dec  1 04:59:09 UTC 2021}}}"]
        );
        // the header parses back as a valid version declaration
        assert_eq!(parse_objects(&lines).unwrap().format, Some(16));

        let lines = save_objects(&[], &IndexMap::new(), &[], &SaveOptions::new().without_header()).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_saved_header_is_two_fields() {
        let rect = MapObject::Rectangle(RectangleElement {
            element: MapElement::new("r1", 5.0, 5.0),
        });
        let options = SaveOptions::new()
            .with_date(datetime!(2006-01-02 15:04:05 UTC))
            .with_comment("dungeon level 1");
        let lines = save_objects(&[rect.clone()], &IndexMap::new(), &[], &options).unwrap();

        let fields = tcllist::parse_list(&lines[0]).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], "__MAPPER__:16");
        let comment = tcllist::parse_list(&fields[1]).unwrap();
        assert_eq!(comment[0], "dungeon level 1");
        assert_eq!(
            tcllist::parse_list(&comment[1]).unwrap(),
            ["1136214245", "Mon Jan  2 15:04:05 UTC 2006"]
        );

        let data = parse_objects(&lines).unwrap();
        assert_eq!(data.format, Some(16));
        assert_eq!(data.objects, [rect]);
    }

    #[test]
    fn test_boolean_emission() {
        let rect = MapObject::Rectangle(RectangleElement {
            element: MapElement {
                hidden: true,
                locked: false,
                ..MapElement::new("r1", 0.0, 0.0)
            },
        });
        let lines = save_objects(&[rect], &IndexMap::new(), &[], &SaveOptions::new().without_header()).unwrap();
        assert!(lines.contains(&"HIDDEN:r1 1".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("LOCKED:")));
    }

    #[test]
    fn test_save_failure_names_object() {
        let token = MapObject::Player(PlayerToken {
            creature: CreatureToken {
                id: "PC9".into(),
                ..Default::default()
            },
        });
        let err = save_objects(&[token], &IndexMap::new(), &[], &SaveOptions::new()).unwrap_err();
        assert_eq!(err.object_id(), Some("PC9"));
        assert!(matches!(err.root(), Error::Structural(_)));
    }

    fn every_object() -> Vec<MapObject> {
        let element = |id: &str| MapElement {
            points: vec![Coordinates::new(1.5, 2.5), Coordinates::new(-3.0, 1e-7)],
            z: 4,
            line: "black".into(),
            fill: "#aabbcc".into(),
            width: 2,
            layer: "walls".into(),
            level: -1,
            group: "g1".into(),
            dash: DashStyle::LongShort,
            hidden: true,
            locked: true,
            ..MapElement::new(id, 120.0, 3e6)
        };
        let creature = |id: &str, creature_type| CreatureToken {
            id: id.into(),
            name: format!("{id} the {{brave}}"),
            health: Some(CreatureHealth {
                max_hp: 42,
                lethal_damage: 7,
                non_lethal_damage: 3,
                con: 12,
                is_flat_footed: true,
                is_stable: false,
                condition: "staggered".into(),
                hp_blur: 10,
            }),
            gx: 4.0,
            gy: -2.5,
            skin: 1,
            skin_size: vec!["M".into(), "L".into()],
            elev: 20,
            color: "red".into(),
            note: "watch out\nfor this one".into(),
            size: "m".into(),
            area: "M".into(),
            status_list: vec!["prone".into(), "flat footed".into()],
            aoe: Some(RadiusAoe { radius: 25.0, color: "blue".into() }),
            move_mode: MoveMode::Climb,
            reach: true,
            killed: true,
            dim: true,
            creature_type,
        };
        vec![
            MapObject::Arc(ArcElement {
                element: element("arc1"),
                arc_mode: ArcMode::Chord,
                start: 15.0,
                extent: 270.0,
            }),
            MapObject::Circle(CircleElement { element: element("circ1") }),
            MapObject::Line(LineElement {
                element: element("line1"),
                arrow: ArrowStyle::Both,
            }),
            MapObject::Polygon(PolygonElement {
                element: element("poly1"),
                spline: 0.25,
                join: JoinStyle::Round,
            }),
            MapObject::Rectangle(RectangleElement { element: element("rect1") }),
            MapObject::SpellAreaOfEffect(SpellAreaOfEffectElement {
                element: element("aoe1"),
                shape: AoeShape::Radius,
            }),
            MapObject::Text(TextElement {
                element: element("text1"),
                text: "Beware {the} \"dragon\" \\o/".into(),
                font: TextFont {
                    family: "Times New Roman".into(),
                    size: 14.0,
                    weight: FontWeight::Bold,
                    slant: FontSlant::Italic,
                },
                anchor: Anchor::NorthEast,
            }),
            MapObject::Tile(TileElement {
                element: element("tile1"),
                image: "floor#2".into(),
            }),
            MapObject::Player(PlayerToken {
                creature: creature("PC1", CreatureType::Player),
            }),
            MapObject::Monster(MonsterToken {
                creature: creature("#M1", CreatureType::Monster),
            }),
        ]
    }

    #[test]
    fn test_round_trip_every_type() {
        let mut images = IndexMap::new();
        for image in [
            ImageDefinition::new("floor", 1.0, "@srv123"),
            ImageDefinition::new("floor", 0.25, "/maps/floor small.gif"),
        ] {
            images.insert(image.key(), image);
        }
        let files = vec![FileDefinition::new("@abc"), FileDefinition::new("local.map")];
        let objects = every_object();

        let lines = save_objects(&objects, &images, &files, &SaveOptions::new().without_header()).unwrap();
        assert!(lines.iter().all(|l| !l.contains('\n')));

        let data = parse_objects(&lines).unwrap();
        assert_eq!(data.objects, objects);
        assert_eq!(data.images, images);
        assert_eq!(data.files, files);
        assert_eq!(data.format, None);

        // and again with a header through MapData itself
        let lines = data.save(&SaveOptions::new().with_comment("again")).unwrap();
        let again = MapData::parse(&lines).unwrap();
        assert_eq!(again.objects, objects);
        assert_eq!(again.format, Some(16));
    }

    #[test]
    fn test_minimal_objects_emit_only_required_tags() {
        let base = ["X:o 0", "Y:o 0", "Z:o 0"];
        let cases: &[(&str, &[&str], &[&str])] = &[
            ("arc", &["ARCMODE:o arc", "START:o 0", "EXTENT:o 0"], &["ARCMODE", "START", "EXTENT"]),
            ("circ", &[], &[]),
            ("line", &[], &[]),
            ("poly", &[], &["JOIN", "SPLINE"]),
            ("rect", &[], &[]),
            ("aoe", &["AOESHAPE:o cone"], &["AOESHAPE"]),
            ("text", &["TEXT:o hi", "FONT:o {{Arial 10}}"], &["TEXT", "FONT", "ANCHOR"]),
            ("tile", &["IMAGE:o floor"], &["IMAGE"]),
        ];
        for (type_tag, extra, extra_tags) in cases {
            let mut lines: Vec<String> = base.iter().map(|s| s.to_string()).collect();
            lines.push(format!("TYPE:o {type_tag}"));
            lines.extend(extra.iter().map(|s| s.to_string()));

            let data = parse_objects(&lines).unwrap();
            assert_eq!(data.objects[0].type_tag(), *type_tag);
            let saved = save_objects(&data.objects, &data.images, &data.files, &SaveOptions::new().without_header())
                .unwrap();
            let tags: Vec<&str> = saved.iter().filter_map(|l| l.split(':').next()).collect();
            let mut expected = vec!["X", "Y", "Z", "POINTS", "FILL", "LAYER", "TYPE"];
            expected.extend(extra_tags.iter().copied());
            assert_eq!(tags, expected, "{type_tag}");
        }

        let creature = ["P NAME:c x", "P GX:c 0", "P GY:c 0", "P SIZE:c M", "P AREA:c M"];
        let data = parse_objects(creature).unwrap();
        let saved = data.save(&SaveOptions::new().without_header()).unwrap();
        let tags: Vec<&str> = saved
            .iter()
            .filter_map(|l| l.strip_prefix("P "))
            .filter_map(|l| l.split(':').next())
            .collect();
        assert_eq!(
            tags,
            ["TYPE", "NAME", "GX", "GY", "SKIN", "ELEV", "COLOR", "SIZE", "AREA", "KILLED", "DIM"]
        );
    }

    #[test]
    fn test_zero_points_round_trip_as_present_record() {
        let data = parse_objects(circle_lines().into_iter().filter(|l| !l.starts_with("POINTS"))).unwrap();
        let saved = data.save(&SaveOptions::new().without_header()).unwrap();
        assert!(saved.contains(&"POINTS:obj1 {}".to_string()));
        assert_eq!(parse_objects(&saved).unwrap(), data);
    }

    #[test]
    fn test_concurrent_parses() {
        let objects = every_object();
        let lines = save_objects(&objects, &IndexMap::new(), &[], &SaveOptions::new()).unwrap();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| parse_objects(&lines))).collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap().unwrap().objects, objects);
            }
        });
    }
}
