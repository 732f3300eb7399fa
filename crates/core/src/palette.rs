//! Named color palettes and their text file format.
//!
//! A palette file is plain text:
//!
//! ```text
//! #Name
//! #Description
//! 255,0,0
//! 0,128,255,200
//! ```
//!
//! The first two lines are the header. Any later line starting with `#` is a
//! comment, blank lines are skipped, and every other line is an `R,G,B` or
//! `R,G,B,A` byte tuple. Alpha defaults to 255.

use crate::color::Rgba8;
use crate::error::PickerError;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

/// A named, ordered list of colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub description: String,
    pub colors: Vec<Rgba8>,
}

const BUILTIN_NAMES: &[&str] = &["wong", "tableau10", "grayscale"];

impl Palette {
    pub fn new(name: impl Into<String>, description: impl Into<String>, colors: Vec<Rgba8>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            colors,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Parses the text format. Errors name the 1-based line that failed.
    pub fn parse(text: &str) -> Result<Self, PickerError> {
        let mut lines = text.lines().enumerate();

        let name = match lines.next() {
            Some((_, line)) => header(line, 1)?,
            None => return Err(PickerError::InvalidPalette("empty palette file".into())),
        };
        let description = match lines.next() {
            Some((_, line)) => header(line, 2)?,
            None => String::new(),
        };

        let mut colors = Vec::new();
        for (i, line) in lines {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            colors.push(parse_color(line, i + 1)?);
        }
        Ok(Self {
            name,
            description,
            colors,
        })
    }

    /// Formats the palette in the text format. Opaque colors omit alpha.
    pub fn to_text(&self) -> String {
        let mut out = format!("#{}\n#{}\n", self.name, self.description);
        for c in &self.colors {
            // Writing to a String cannot fail.
            let _ = if c.a == 255 {
                writeln!(out, "{},{},{}", c.r, c.g, c.b)
            } else {
                writeln!(out, "{},{},{},{}", c.r, c.g, c.b, c.a)
            };
        }
        out
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PickerError> {
        let path = path.as_ref();
        let palette = Self::parse(&std::fs::read_to_string(path)?)?;
        debug!(path = %path.display(), colors = palette.len(), "palette loaded");
        Ok(palette)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PickerError> {
        std::fs::write(path, self.to_text())?;
        Ok(())
    }

    // -- Built-in palettes --

    /// Looks up a built-in palette by name (case insensitive).
    pub fn from_name(name: &str) -> Result<Self, PickerError> {
        match name.to_ascii_lowercase().as_str() {
            "wong" => Ok(Self::wong()),
            "tableau10" => Ok(Self::tableau10()),
            "grayscale" => Ok(Self::grayscale()),
            _ => Err(PickerError::InvalidPalette(format!(
                "unknown palette '{name}', expected one of {}",
                BUILTIN_NAMES.join(", ")
            ))),
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        BUILTIN_NAMES
    }

    /// Bang Wong's eight colors, distinguishable under common color-vision deficiencies.
    pub fn wong() -> Self {
        Self::opaque(
            "Wong",
            "Colorblind-safe qualitative palette",
            &[
                (0, 0, 0),
                (230, 159, 0),
                (86, 180, 233),
                (0, 158, 115),
                (240, 228, 66),
                (0, 114, 178),
                (213, 94, 0),
                (204, 121, 167),
            ],
        )
    }

    pub fn tableau10() -> Self {
        Self::opaque(
            "Tableau 10",
            "Qualitative palette for categorical data",
            &[
                (78, 121, 167),
                (242, 142, 43),
                (225, 87, 89),
                (118, 183, 178),
                (89, 161, 79),
                (237, 201, 72),
                (176, 122, 161),
                (255, 157, 167),
                (156, 117, 95),
                (186, 176, 172),
            ],
        )
    }

    /// Nine evenly spaced grays from black to white.
    pub fn grayscale() -> Self {
        let colors = (0..9u16)
            .map(|i| {
                let v = (i * 32).min(255) as u8;
                Rgba8::new(v, v, v, 255)
            })
            .collect();
        Self::new("Grayscale", "Black to white", colors)
    }

    fn opaque(name: &str, description: &str, rgb: &[(u8, u8, u8)]) -> Self {
        let colors = rgb
            .iter()
            .map(|&(r, g, b)| Rgba8::new(r, g, b, 255))
            .collect();
        Self::new(name, description, colors)
    }
}

fn header(line: &str, line_no: usize) -> Result<String, PickerError> {
    line.trim_end()
        .strip_prefix('#')
        .map(|s| s.trim().to_string())
        .ok_or_else(|| {
            PickerError::InvalidPalette(format!("line {line_no}: header must start with '#'"))
        })
}

fn parse_color(line: &str, line_no: usize) -> Result<Rgba8, PickerError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if !(3..=4).contains(&fields.len()) {
        return Err(PickerError::InvalidPalette(format!(
            "line {line_no}: expected R,G,B or R,G,B,A, got '{line}'"
        )));
    }
    let mut bytes = [255u8; 4];
    for (slot, field) in bytes.iter_mut().zip(&fields) {
        *slot = field.parse().map_err(|_| {
            PickerError::InvalidPalette(format!("line {line_no}: '{field}' is not a byte"))
        })?;
    }
    Ok(Rgba8::new(bytes[0], bytes[1], bytes[2], bytes[3]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "#Sunset\n#Warm evening tones\n255,94,77\n\n# accent\n 255, 206, 0 ,128\n17,17,17\n";

    #[test]
    fn parses_header_colors_and_comments() {
        let p = Palette::parse(SAMPLE).unwrap();
        assert_eq!(p.name, "Sunset");
        assert_eq!(p.description, "Warm evening tones");
        assert_eq!(
            p.colors,
            vec![
                Rgba8::new(255, 94, 77, 255),
                Rgba8::new(255, 206, 0, 128),
                Rgba8::new(17, 17, 17, 255),
            ]
        );
    }

    #[test]
    fn header_only_file_is_an_empty_palette() {
        let p = Palette::parse("#Empty\n#Nothing yet\n").unwrap();
        assert!(p.is_empty());
        let p = Palette::parse("#Lonely").unwrap();
        assert_eq!(p.name, "Lonely");
        assert_eq!(p.description, "");
    }

    #[test]
    fn missing_header_is_rejected() {
        let err = Palette::parse("255,0,0\n").unwrap_err();
        assert!(err.to_string().contains("line 1"), "{err}");
        let err = Palette::parse("#Name\n1,2,3\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
        assert!(Palette::parse("").is_err());
    }

    #[test]
    fn bad_color_lines_name_the_line() {
        let err = Palette::parse("#A\n#B\n1,2,3\n1,2\n").unwrap_err();
        assert!(matches!(err, PickerError::InvalidPalette(_)));
        assert!(err.to_string().contains("line 4"), "{err}");

        let err = Palette::parse("#A\n#B\n1,2,300\n").unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");
        assert!(err.to_string().contains("300"), "{err}");
    }

    #[test]
    fn to_text_omits_opaque_alpha() {
        let p = Palette::new(
            "Two",
            "A pair",
            vec![Rgba8::new(1, 2, 3, 255), Rgba8::new(4, 5, 6, 7)],
        );
        assert_eq!(p.to_text(), "#Two\n#A pair\n1,2,3\n4,5,6,7\n");
    }

    #[test]
    fn text_format_survives_reparse() {
        let p = Palette::parse(SAMPLE).unwrap();
        assert_eq!(Palette::parse(&p.to_text()).unwrap(), p);
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wong.txt");
        let p = Palette::wong();
        p.save(&path).unwrap();
        assert_eq!(Palette::load(&path).unwrap(), p);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Palette::load(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, PickerError::Io(_)));
    }

    #[test]
    fn builtins_resolve_by_name() {
        for name in Palette::list_names() {
            let p = Palette::from_name(name).unwrap();
            assert!(!p.is_empty(), "{name}");
        }
        assert_eq!(Palette::from_name("WONG").unwrap().len(), 8);
        assert_eq!(Palette::tableau10().len(), 10);
        assert!(Palette::from_name("rainbow").is_err());
    }

    #[test]
    fn grayscale_runs_black_to_white() {
        let p = Palette::grayscale();
        assert_eq!(p.colors.first(), Some(&Rgba8::new(0, 0, 0, 255)));
        assert_eq!(p.colors.last(), Some(&Rgba8::new(255, 255, 255, 255)));
        assert!(p.colors.iter().all(|c| c.r == c.g && c.g == c.b));
    }
}
