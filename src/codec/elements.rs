use super::map_types::{
    ArcElement, CircleElement, LineElement, MapElement, PolygonElement, RectangleElement,
    SpellAreaOfEffectElement, TextElement, TextFont, TileElement,
};
use super::reader::{decode_choice, parse_float, ObjectAttributes};
use super::types::{Choice, FontSlant, FontWeight};
use super::writer::{format_float, ObjectWriter, RecordWriter};
use crate::error::{Error, Result};

impl MapElement {
    pub fn from_attributes(id: &str, attrs: &ObjectAttributes) -> Result<Self> {
        Ok(Self {
            id: id.to_string(),
            x: attrs.float(0, "X", true)?,
            y: attrs.float(0, "Y", true)?,
            z: attrs.int(0, "Z", true)?,
            level: attrs.int(0, "LEVEL", false)?,
            group: attrs.string(0, "GROUP", false)?,
            points: attrs.coordinates(0, "POINTS", false)?,
            fill: attrs.string(0, "FILL", false)?,
            dash: attrs.choice(0, "DASH", false)?,
            line: attrs.string(0, "LINE", false)?,
            width: attrs.int(0, "WIDTH", false)?,
            layer: attrs.string(0, "LAYER", false)?,
            hidden: attrs.boolean(0, "HIDDEN", false)?,
            locked: attrs.boolean(0, "LOCKED", false)?,
        })
    }

    /// Write the shared attributes and return the writer positioned for the
    /// type's own tags.
    pub(crate) fn write<'w>(&self, out: &'w mut RecordWriter) -> Result<ObjectWriter<'w>> {
        let mut obj = out.object(None, &self.id);
        obj.float("X", self.x, true)
            .float("Y", self.y, true)
            .int("Z", self.z, true)
            .coordinates("POINTS", &self.points, true)
            .boolean("LOCKED", self.locked, false)
            .string("FILL", &self.fill, true)
            .string("LINE", &self.line, false)
            .int("WIDTH", self.width, false)
            .string("LAYER", &self.layer, true)
            .boolean("HIDDEN", self.hidden, false)
            .int("LEVEL", self.level, false)
            .string("GROUP", &self.group, false)
            .choice("DASH", self.dash, false)?;
        Ok(obj)
    }
}

impl ArcElement {
    pub fn from_attributes(id: &str, attrs: &ObjectAttributes) -> Result<Self> {
        Ok(Self {
            element: MapElement::from_attributes(id, attrs)?,
            arc_mode: attrs.choice(0, "ARCMODE", true)?,
            start: attrs.float(0, "START", true)?,
            extent: attrs.float(0, "EXTENT", true)?,
        })
    }

    pub fn write(&self, out: &mut RecordWriter) -> Result<()> {
        self.element
            .write(out)?
            .string("TYPE", "arc", true)
            .choice("ARCMODE", self.arc_mode, true)?
            .float("START", self.start, true)
            .float("EXTENT", self.extent, true);
        Ok(())
    }
}

impl CircleElement {
    pub fn from_attributes(id: &str, attrs: &ObjectAttributes) -> Result<Self> {
        Ok(Self {
            element: MapElement::from_attributes(id, attrs)?,
        })
    }

    pub fn write(&self, out: &mut RecordWriter) -> Result<()> {
        self.element.write(out)?.string("TYPE", "circ", true);
        Ok(())
    }
}

impl LineElement {
    pub fn from_attributes(id: &str, attrs: &ObjectAttributes) -> Result<Self> {
        Ok(Self {
            element: MapElement::from_attributes(id, attrs)?,
            arrow: attrs.choice(0, "ARROW", false)?,
        })
    }

    pub fn write(&self, out: &mut RecordWriter) -> Result<()> {
        self.element
            .write(out)?
            .string("TYPE", "line", true)
            .choice("ARROW", self.arrow, false)?;
        Ok(())
    }
}

impl PolygonElement {
    pub fn from_attributes(id: &str, attrs: &ObjectAttributes) -> Result<Self> {
        Ok(Self {
            element: MapElement::from_attributes(id, attrs)?,
            join: attrs.choice(0, "JOIN", false)?,
            spline: attrs.float(0, "SPLINE", false)?,
        })
    }

    pub fn write(&self, out: &mut RecordWriter) -> Result<()> {
        self.element
            .write(out)?
            .string("TYPE", "poly", true)
            .choice("JOIN", self.join, true)?
            .float("SPLINE", self.spline, true);
        Ok(())
    }
}

impl RectangleElement {
    pub fn from_attributes(id: &str, attrs: &ObjectAttributes) -> Result<Self> {
        Ok(Self {
            element: MapElement::from_attributes(id, attrs)?,
        })
    }

    pub fn write(&self, out: &mut RecordWriter) -> Result<()> {
        self.element.write(out)?.string("TYPE", "rect", true);
        Ok(())
    }
}

impl SpellAreaOfEffectElement {
    pub fn from_attributes(id: &str, attrs: &ObjectAttributes) -> Result<Self> {
        Ok(Self {
            element: MapElement::from_attributes(id, attrs)?,
            shape: attrs.choice(0, "AOESHAPE", true)?,
        })
    }

    pub fn write(&self, out: &mut RecordWriter) -> Result<()> {
        self.element
            .write(out)?
            .string("TYPE", "aoe", true)
            .choice("AOESHAPE", self.shape, true)?;
        Ok(())
    }
}

impl TextFont {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            ..Default::default()
        }
    }

    /// Decode a `FONT` value: a one-element list wrapping
    /// `family size ?weight? ?slant?`.
    pub fn parse(value: &str) -> Result<Self> {
        let wrapper = tcllist::parse_list(value)?;
        let [inner] = wrapper.as_slice() else {
            return Err(Error::Structural(format!(
                "font value {value:?} must be a single list element"
            )));
        };
        let fields = tcllist::parse_list(inner)?;
        if !(2..=4).contains(&fields.len()) {
            return Err(Error::Structural(format!(
                "font {inner:?} must have 2-4 elements, not {}",
                fields.len()
            )));
        }
        let mut font = Self::new(fields[0].clone(), parse_float("FONT", &fields[1])?);
        if let Some(weight) = fields.get(2) {
            font.weight = decode_choice::<FontWeight>("FONT", weight, true)?;
        }
        if let Some(slant) = fields.get(3) {
            font.slant = decode_choice::<FontSlant>("FONT", slant, true)?;
        }
        Ok(font)
    }

    /// The font tuple as one list string (the `FONT` value lists it again).
    pub fn encode(&self) -> Result<String> {
        Ok(tcllist::to_list_string(&[
            self.family.as_str(),
            format_float(self.size).as_str(),
            FontWeight::choices().encode(self.weight)?,
            FontSlant::choices().encode(self.slant)?,
        ]))
    }
}

impl TextElement {
    pub fn from_attributes(id: &str, attrs: &ObjectAttributes) -> Result<Self> {
        let element = MapElement::from_attributes(id, attrs)?;
        let text = attrs.string(0, "TEXT", true)?;
        let font = match attrs.raw(0, "FONT", true)? {
            Some(value) => TextFont::parse(value)?,
            None => TextFont::default(),
        };
        Ok(Self {
            element,
            text,
            font,
            anchor: attrs.choice(0, "ANCHOR", false)?,
        })
    }

    pub fn write(&self, out: &mut RecordWriter) -> Result<()> {
        let font = self.font.encode()?;
        self.element
            .write(out)?
            .string("TYPE", "text", true)
            .string("TEXT", &self.text, true)
            .list("FONT", &[font], true)
            .choice("ANCHOR", self.anchor, true)?;
        Ok(())
    }
}

impl TileElement {
    pub fn from_attributes(id: &str, attrs: &ObjectAttributes) -> Result<Self> {
        Ok(Self {
            element: MapElement::from_attributes(id, attrs)?,
            image: attrs.string(0, "IMAGE", true)?,
        })
    }

    pub fn write(&self, out: &mut RecordWriter) -> Result<()> {
        self.element
            .write(out)?
            .string("TYPE", "tile", true)
            .string("IMAGE", &self.image, true);
        Ok(())
    }
}
