use super::map_types::{CreatureHealth, CreatureToken, MonsterToken, PlayerToken, RadiusAoe};
use super::reader::{parse_bool, parse_float, parse_int, ObjectAttributes};
use super::types::CreatureType;
use super::writer::{format_bool, format_float, RecordWriter};
use crate::error::{Error, Result};

impl CreatureHealth {
    /// Decode a `HEALTH` value:
    /// `max lethal nonlethal con flatfooted stable condition ?blur?`.
    /// A blank value means no health is tracked.
    pub fn parse(value: &str) -> Result<Option<Self>> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        let fields = tcllist::parse_list(value)?;
        if fields.len() < 7 {
            return Err(Error::ArityMismatch {
                attribute: "HEALTH".into(),
                len: fields.len(),
                index: 6,
            });
        }
        if fields.len() > 8 {
            return Err(Error::Structural(format!(
                "HEALTH has {} elements, at most 8 allowed",
                fields.len()
            )));
        }
        let hp_blur = match fields.get(7).map(String::as_str) {
            None | Some("") => 0,
            Some(blur) => parse_int("HEALTH", blur)?,
        };
        Ok(Some(Self {
            max_hp: parse_int("HEALTH", &fields[0])?,
            lethal_damage: parse_int("HEALTH", &fields[1])?,
            non_lethal_damage: parse_int("HEALTH", &fields[2])?,
            con: parse_int("HEALTH", &fields[3])?,
            is_flat_footed: parse_bool("HEALTH", &fields[4])?,
            is_stable: parse_bool("HEALTH", &fields[5])?,
            condition: fields[6].clone(),
            hp_blur,
        }))
    }

    pub fn encode(&self) -> String {
        tcllist::to_list_string(&[
            self.max_hp.to_string().as_str(),
            self.lethal_damage.to_string().as_str(),
            self.non_lethal_damage.to_string().as_str(),
            self.con.to_string().as_str(),
            format_bool(self.is_flat_footed),
            format_bool(self.is_stable),
            self.condition.as_str(),
            self.hp_blur.to_string().as_str(),
        ])
    }
}

impl RadiusAoe {
    /// Decode an `AOE` value (`radius r color`). Blank means none.
    pub fn parse(value: &str) -> Result<Option<Self>> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        let fields = tcllist::parse_list(value)?;
        match fields.as_slice() {
            [shape, radius, color] if shape == "radius" => Ok(Some(Self {
                radius: parse_float("AOE", radius)?,
                color: color.clone(),
            })),
            [shape, ..] if shape == "radius" => Err(Error::Structural(format!(
                "radius area of effect needs 3 elements, not {}",
                fields.len()
            ))),
            [shape, ..] => Err(Error::Structural(format!(
                "undefined area of effect shape: {shape}"
            ))),
            [] => Ok(None),
        }
    }

    pub fn encode(&self) -> String {
        tcllist::to_list_string(&["radius", format_float(self.radius).as_str(), self.color.as_str()])
    }
}

impl CreatureToken {
    /// Build a token from its attributes, stamping `creature_type`.
    pub fn from_attributes(
        id: &str,
        attrs: &ObjectAttributes,
        creature_type: CreatureType,
    ) -> Result<Self> {
        let health = match attrs.raw(0, "HEALTH", false)? {
            Some(value) => CreatureHealth::parse(value)?,
            None => None,
        };
        let aoe = match attrs.raw(0, "AOE", false)? {
            Some(value) => RadiusAoe::parse(value)?,
            None => None,
        };
        Ok(Self {
            id: id.to_string(),
            name: attrs.string(0, "NAME", true)?,
            gx: attrs.float(0, "GX", true)?,
            gy: attrs.float(0, "GY", true)?,
            size: attrs.string(0, "SIZE", true)?,
            area: attrs.string(0, "AREA", true)?,
            health,
            elev: attrs.int(0, "ELEV", false)?,
            move_mode: attrs.choice(0, "MOVEMODE", false)?,
            color: attrs.string(0, "COLOR", false)?,
            note: attrs.string(0, "NOTE", false)?,
            skin: attrs.int(0, "SKIN", false)?,
            skin_size: attrs.strings(0, "SKINSIZE", false)?,
            status_list: attrs.strings(0, "STATUSLIST", false)?,
            aoe,
            reach: attrs.boolean(0, "REACH", false)?,
            killed: attrs.boolean(0, "KILLED", false)?,
            dim: attrs.boolean(0, "DIM", false)?,
            creature_type,
        })
    }

    /// Write the token's lines, each prefixed with `prefix` (`P` or `M`).
    pub fn write(&self, out: &mut RecordWriter, prefix: &'static str) -> Result<()> {
        let type_tag = match self.creature_type {
            CreatureType::Player => "player",
            CreatureType::Monster => "monster",
            CreatureType::Unknown => {
                return Err(Error::Structural(format!(
                    "creature token {} has unknown type",
                    self.id
                )))
            }
        };
        let aoe = self.aoe.as_ref().map(RadiusAoe::encode).unwrap_or_default();
        let health = self
            .health
            .as_ref()
            .map(CreatureHealth::encode)
            .unwrap_or_default();

        out.object(Some(prefix), &self.id)
            .string("TYPE", type_tag, true)
            .string("NAME", &self.name, true)
            .float("GX", self.gx, true)
            .float("GY", self.gy, true)
            .int("SKIN", self.skin, true)
            .list("SKINSIZE", &self.skin_size, false)
            .int("ELEV", self.elev, true)
            .string("COLOR", &self.color, true)
            .string("NOTE", &self.note, false)
            .string("SIZE", &self.size, true)
            .list("STATUSLIST", &self.status_list, false)
            .string("AOE", &aoe, false)
            .string("AREA", &self.area, true)
            .choice("MOVEMODE", self.move_mode, false)?
            .boolean("REACH", self.reach, false)
            .boolean("KILLED", self.killed, true)
            .boolean("DIM", self.dim, true)
            .string("HEALTH", &health, false);
        Ok(())
    }
}

impl PlayerToken {
    pub fn from_attributes(id: &str, attrs: &ObjectAttributes) -> Result<Self> {
        Ok(Self {
            creature: CreatureToken::from_attributes(id, attrs, CreatureType::Player)?,
        })
    }

    pub fn write(&self, out: &mut RecordWriter) -> Result<()> {
        self.creature.write(out, "P")
    }
}

impl MonsterToken {
    pub fn from_attributes(id: &str, attrs: &ObjectAttributes) -> Result<Self> {
        Ok(Self {
            creature: CreatureToken::from_attributes(id, attrs, CreatureType::Monster)?,
        })
    }

    pub fn write(&self, out: &mut RecordWriter) -> Result<()> {
        self.creature.write(out, "M")
    }
}
