use std::str::FromStr;

/// A resolved 8-bit sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color: {0:?}")]
pub struct ParseColorError(pub String);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lower-case `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(c: Rgb) -> Self {
        crossterm::style::Color::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

/// Accepts `#rgb`, `#rrggbb`, `rgb(r, g, b)` and CSS colour names.
impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let err = || ParseColorError(s.to_string());

        if input.starts_with('#') {
            let srgb = palette::Srgb::<u8>::from_str(input).map_err(|_| err())?;
            let (r, g, b) = srgb.into_components();
            return Ok(Rgb::new(r, g, b));
        }

        let lower = input.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts: Vec<u8> = args
                .split(',')
                .map(|p| p.trim().parse::<u8>())
                .collect::<Result<_, _>>()
                .map_err(|_| err())?;
            return match parts.as_slice() {
                [r, g, b] => Ok(Rgb::new(*r, *g, *b)),
                _ => Err(err()),
            };
        }

        palette::named::from_str(&lower)
            .map(|c| {
                let (r, g, b) = c.into_components();
                Rgb::new(r, g, b)
            })
            .ok_or_else(err)
    }
}
