//! Tree options from a TOML file, overridden by command-line flags.

use std::fs;
use std::path::Path;

use treeview::prelude::*;

/// Decode options from TOML text. Keys are the camelCase option names.
pub fn parse_options(text: &str) -> Result<TreeOptions> {
    let options: TreeOptions =
        toml::from_str(text).map_err(|err| TreeError::Config(err.to_string()))?;
    options.validate()?;
    Ok(options)
}

/// Read options from `path`, or from the default options file if it exists.
///
/// An explicit path must exist; a missing default file means default options.
pub fn load_options(path: Option<&Path>) -> Result<TreeOptions> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match crate::paths::options_file() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("no options file, using defaults");
                return Ok(TreeOptions::default());
            }
        },
    };
    log::info!("reading options from {}", path.display());
    let text = fs::read_to_string(&path)
        .map_err(|err| TreeError::Config(format!("{}: {err}", path.display())))?;
    parse_options(&text)
}

/// Options given on the command line. Unset flags leave the file's value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub levels: Option<usize>,
    pub multi_select: bool,
    pub show_checkbox: bool,
    pub show_tags: bool,
    pub enable_links: bool,
    pub prevent_unselect: bool,
    pub selectable: bool,
    pub context_menu: bool,
}

impl Overrides {
    pub fn apply(&self, mut options: TreeOptions) -> Result<TreeOptions> {
        if let Some(levels) = self.levels {
            options.levels = levels;
        }
        options.multi_select |= self.multi_select;
        options.show_checkbox |= self.show_checkbox;
        options.show_tags |= self.show_tags;
        options.enable_links |= self.enable_links;
        options.prevent_unselect |= self.prevent_unselect;
        options.selectable |= self.selectable;
        options.enable_context_menu |= self.context_menu;
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_toml() {
        let options = parse_options(
            r##"
levels = 1
showCheckbox = true
selectedBackColor = "#336699"
"##,
        )
        .unwrap();
        assert_eq!(options.levels, 1);
        assert!(options.show_checkbox);
        assert_eq!(options.selected_back_color.as_deref(), Some("#336699"));
        assert!(options.highlight_selected);
    }

    #[test]
    fn test_context_menu_from_toml() {
        let options = parse_options(
            r#"
enableContextmenu = true

[[contextmenu]]
label = "Open"
action = "expand"

[[contextmenu]]
label = "-"
"#,
        )
        .unwrap();
        assert!(options.enable_context_menu);
        assert_eq!(options.context_menu.len(), 2);
        assert_eq!(options.context_menu[0].action, Some(MenuAction::Expand));
        assert!(options.context_menu[1].is_divider());
    }

    #[test]
    fn test_bad_toml_is_a_config_error() {
        assert!(matches!(
            parse_options("levels = \"two\""),
            Err(TreeError::Config(_))
        ));
        assert!(matches!(
            parse_options("levels = 0"),
            Err(TreeError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_options(Some(Path::new("/nonexistent/options.toml"))).unwrap_err();
        assert!(matches!(err, TreeError::Config(_)));
    }

    #[test]
    fn test_flags_override_file() {
        let overrides = Overrides {
            levels: Some(3),
            multi_select: true,
            ..Default::default()
        };
        let options = overrides.apply(parse_options("levels = 1").unwrap()).unwrap();
        assert_eq!(options.levels, 3);
        assert!(options.multi_select);
        assert!(!options.show_checkbox);
        assert!(!options.enable_context_menu);

        let menu = Overrides {
            context_menu: true,
            ..Default::default()
        };
        assert!(menu.apply(TreeOptions::default()).unwrap().enable_context_menu);

        let zero = Overrides {
            levels: Some(0),
            ..Default::default()
        };
        assert!(zero.apply(TreeOptions::default()).is_err());
    }
}
