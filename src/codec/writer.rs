use super::types::{Choice, Coordinates};
use crate::error::Result;

/// Accumulates the lines of a map file as they are saved.
#[derive(Debug, Default)]
pub struct RecordWriter {
    lines: Vec<String>,
}

impl RecordWriter {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Append one record made of the given fields.
    pub fn write_record<S: AsRef<str>>(&mut self, fields: &[S]) {
        self.lines.push(tcllist::to_list_string(fields));
    }

    /// Start writing the attribute lines of one object. Creature lines carry
    /// a `P` or `M` prefix field.
    pub fn object(&mut self, prefix: Option<&'static str>, id: &str) -> ObjectWriter<'_> {
        ObjectWriter {
            writer: self,
            prefix,
            id: id.to_string(),
        }
    }
}

/// Writes `TAG:id value` lines for a single object.
///
/// An optional attribute is skipped when its value is empty, zero, false, or
/// the default choice; a required one is always written.
pub struct ObjectWriter<'w> {
    writer: &'w mut RecordWriter,
    prefix: Option<&'static str>,
    id: String,
}

impl ObjectWriter<'_> {
    pub fn value(&mut self, tag: &str, value: &str, required: bool) -> &mut Self {
        if value.is_empty() && !required {
            return self;
        }
        let key = format!("{tag}:{}", self.id);
        match self.prefix {
            Some(prefix) => self.writer.write_record(&[prefix, key.as_str(), value]),
            None => self.writer.write_record(&[key.as_str(), value]),
        }
        self
    }

    pub fn string(&mut self, tag: &str, value: &str, required: bool) -> &mut Self {
        self.value(tag, value, required)
    }

    pub fn float(&mut self, tag: &str, value: f64, required: bool) -> &mut Self {
        if value == 0.0 && !required {
            return self;
        }
        self.value(tag, &format_float(value), required)
    }

    pub fn int(&mut self, tag: &str, value: i64, required: bool) -> &mut Self {
        if value == 0 && !required {
            return self;
        }
        self.value(tag, &value.to_string(), required)
    }

    pub fn boolean(&mut self, tag: &str, value: bool, required: bool) -> &mut Self {
        if !value && !required {
            return self;
        }
        self.value(tag, format_bool(value), required)
    }

    /// A value written as a nested list of strings.
    pub fn list<S: AsRef<str>>(&mut self, tag: &str, items: &[S], required: bool) -> &mut Self {
        self.value(tag, &tcllist::to_list_string(items), required)
    }

    /// A value written as a flat `x y x y ...` list.
    pub fn coordinates(&mut self, tag: &str, points: &[Coordinates], required: bool) -> &mut Self {
        let flat: Vec<String> = points
            .iter()
            .flat_map(|p| [format_float(p.x), format_float(p.y)])
            .collect();
        self.list(tag, &flat, required)
    }

    pub fn choice<T: Choice>(&mut self, tag: &str, value: T, required: bool) -> Result<&mut Self> {
        let spelling = T::choices().encode(value)?;
        if value == T::default() && !required {
            return Ok(self);
        }
        Ok(self.value(tag, spelling, required))
    }
}

pub fn format_bool(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Shortest round-trip form, in exponent notation when the decimal exponent
/// is below -4 or at least 6 (`1e+06`, `2.5e-07`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    let sci = format!("{value:e}");
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return sci;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (-4..6).contains(&exponent) {
        return format!("{value}");
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::types::{ArrowStyle, DashStyle, JoinStyle};

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(10.0), "10");
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(-2.5), "-2.5");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(0.00001), "1e-05");
        assert_eq!(format_float(123456.0), "123456");
        assert_eq!(format_float(1234567.0), "1.234567e+06");
        assert_eq!(format_float(1e6), "1e+06");
        assert_eq!(format_float(-2.5e-7), "-2.5e-07");
        assert_eq!(format_float(1e300), "1e+300");
        assert_eq!(format_float(f64::INFINITY), "+Inf");
        assert_eq!(format_float(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_formatted_floats_parse_back() {
        for v in [0.5, 1e-9, 3.0e12, -7.25, 1.0 / 3.0, 987654.321] {
            assert_eq!(format_float(v).parse::<f64>().unwrap(), v);
        }
    }

    #[test]
    fn test_optional_values_skipped() {
        let mut writer = RecordWriter::new();
        writer
            .object(None, "a1")
            .string("LINE", "", false)
            .int("WIDTH", 0, false)
            .float("SPLINE", 0.0, false)
            .boolean("HIDDEN", false, false)
            .list::<&str>("STATUSLIST", &[], false)
            .choice("DASH", DashStyle::Solid, false)
            .unwrap()
            .choice("ARROW", ArrowStyle::None, false)
            .unwrap();
        assert!(writer.is_empty());
    }

    #[test]
    fn test_required_values_written() {
        let mut writer = RecordWriter::new();
        writer
            .object(None, "a1")
            .string("FILL", "", true)
            .int("Z", 0, true)
            .boolean("KILLED", false, true)
            .coordinates("POINTS", &[], true)
            .choice("JOIN", JoinStyle::Bevel, true)
            .unwrap();
        assert_eq!(
            writer.as_lines(),
            ["FILL:a1 {}", "Z:a1 0", "KILLED:a1 0", "POINTS:a1 {}", "JOIN:a1 bevel"]
        );
    }

    #[test]
    fn test_prefix_and_quoting() {
        let mut writer = RecordWriter::new();
        writer
            .object(Some("P"), "PC1")
            .string("NAME", "Sir Robin", true)
            .boolean("REACH", true, false)
            .coordinates("POINTS", &[Coordinates::new(1.5, -2.0)], false);
        assert_eq!(
            writer.into_lines(),
            ["P NAME:PC1 {Sir Robin}", "P REACH:PC1 1", "P POINTS:PC1 {1.5 -2}"]
        );
    }
}
