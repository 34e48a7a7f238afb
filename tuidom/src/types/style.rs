use super::Rgb;

/// Declarations from an element's `style` attribute, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `prop:value;prop:value`. Malformed declarations are skipped.
    pub fn parse(source: &str) -> Self {
        let mut style = Self::new();
        for decl in source.split(';') {
            let Some((prop, value)) = decl.split_once(':') else {
                continue;
            };
            let (prop, value) = (prop.trim(), value.trim());
            if prop.is_empty() || value.is_empty() {
                continue;
            }
            style = style.set(prop, value);
        }
        style
    }

    /// Set a declaration, replacing an earlier one for the same property.
    pub fn set(mut self, prop: &str, value: impl Into<String>) -> Self {
        let prop = prop.to_ascii_lowercase();
        let value = value.into();
        match self.declarations.iter_mut().find(|(p, _)| *p == prop) {
            Some((_, v)) => *v = value,
            None => self.declarations.push((prop, value)),
        }
        self
    }

    pub fn get(&self, prop: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p.eq_ignore_ascii_case(prop))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn foreground(&self) -> Option<Rgb> {
        self.get("color").and_then(|v| v.parse().ok())
    }

    pub fn background(&self) -> Option<Rgb> {
        self.get("background-color").and_then(|v| v.parse().ok())
    }
}

impl std::fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (prop, value) in &self.declarations {
            write!(f, "{prop}:{value};")?;
        }
        Ok(())
    }
}
