//! Per-glyph override table
//!
//! The table maps glyph names to partial parameter sets:
//!
//! ```json
//! {
//!   "back": { "code": "EA10", "halign": "left", "xmove": "12" },
//!   "wide-chart": { "scale": "over_em", "maxwidth": "em" }
//! }
//! ```
//!
//! Values may be strings or JSON numbers. Unknown keys are ignored. The whole
//! table is validated when it is loaded, so a bad entry aborts the run before
//! any icon is touched.

use super::params::{
    parse_codepoint, parse_offset, HAlign, ParamSet, PartialParams, ScalePolicy, VAlign,
    WidthBound, MAX_CODEPOINT,
};
use crate::core::errors::ConfigError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Where the override table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    None,
    File(PathBuf),
    Inline(String),
}

impl ConfigSource {
    /// Pick the config source; supplying both a file and inline text is an error
    pub fn from_options(
        file: Option<PathBuf>,
        text: Option<String>,
    ) -> Result<Self, ConfigError> {
        match (file, text) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingConfigSources),
            (Some(path), None) => Ok(Self::File(path)),
            (None, Some(text)) => Ok(Self::Inline(text)),
            (None, None) => Ok(Self::None),
        }
    }
}

/// A raw value as it appears in the JSON table
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(serde_json::Number),
}

impl RawValue {
    /// Text form of the value; empty text counts as unset
    fn text(&self) -> Option<String> {
        match self {
            Self::Text(text) if text.trim().is_empty() => None,
            Self::Text(text) => Some(text.clone()),
            Self::Number(number) => Some(number.to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawOverride {
    #[serde(default)]
    code: Option<RawValue>,
    #[serde(default)]
    scale: Option<RawValue>,
    #[serde(default)]
    halign: Option<RawValue>,
    #[serde(default)]
    valign: Option<RawValue>,
    #[serde(default)]
    xmove: Option<RawValue>,
    #[serde(default)]
    ymove: Option<RawValue>,
    #[serde(default)]
    minwidth: Option<RawValue>,
    #[serde(default)]
    maxwidth: Option<RawValue>,
}

impl RawOverride {
    fn validate(&self, name: &str) -> Result<PartialParams, ConfigError> {
        let text = |value: &Option<RawValue>| value.as_ref().and_then(RawValue::text);

        let code = match &self.code {
            Some(RawValue::Number(number)) => Some(
                number
                    .as_u64()
                    .filter(|value| *value <= u64::from(MAX_CODEPOINT))
                    .map(|value| value as u32)
                    .ok_or_else(|| ConfigError::InvalidCodepoint {
                        context: format!("glyph '{name}'"),
                        value: number.to_string(),
                    })?,
            ),
            other => text(other)
                .map(|value| parse_codepoint(&format!("glyph '{name}'"), &value))
                .transpose()?,
        };

        Ok(PartialParams {
            code,
            scale: text(&self.scale)
                .map(|value| value.parse::<ScalePolicy>())
                .transpose()?,
            halign: text(&self.halign)
                .map(|value| value.parse::<HAlign>())
                .transpose()?,
            valign: text(&self.valign)
                .map(|value| value.parse::<VAlign>())
                .transpose()?,
            xmove: text(&self.xmove)
                .map(|value| parse_offset("xmove", &value))
                .transpose()?,
            ymove: text(&self.ymove)
                .map(|value| parse_offset("ymove", &value))
                .transpose()?,
            minwidth: text(&self.minwidth)
                .map(|value| WidthBound::parse("minwidth", &value))
                .transpose()?,
            maxwidth: text(&self.maxwidth)
                .map(|value| WidthBound::parse("maxwidth", &value))
                .transpose()?,
        })
    }
}

/// Validated overrides keyed by glyph name
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: BTreeMap<String, PartialParams>,
}

impl OverrideTable {
    /// Load and validate the table from its source
    pub fn load(source: &ConfigSource) -> Result<Self, ConfigError> {
        match source {
            ConfigSource::None => Ok(Self::default()),
            ConfigSource::Inline(text) => Self::from_json(text),
            ConfigSource::File(path) => {
                let contents =
                    fs::read_to_string(path).map_err(|source| ConfigError::ConfigRead {
                        path: path.clone(),
                        source,
                    })?;
                debug!("Loaded glyph config from {:?}", path);
                Self::from_json(&contents)
            }
        }
    }

    /// Parse and validate a JSON override table
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, RawOverride> = serde_json::from_str(text)?;
        let entries = raw
            .iter()
            .map(|(name, entry)| Ok((name.clone(), entry.validate(name)?)))
            .collect::<Result<BTreeMap<_, _>, ConfigError>>()?;

        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<&PartialParams> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge the override for `name`, if any, onto the pipeline defaults
    pub fn resolve(&self, name: &str, defaults: &ParamSet) -> ParamSet {
        match self.get(name) {
            Some(overrides) => defaults.merged(overrides),
            None => defaults.clone(),
        }
    }

    /// Code points pinned by the given icons, checked for a pin shared by
    /// two of them. Entries naming no icon are ignored.
    pub fn pinned_codepoints<'n>(
        &self,
        icons: impl IntoIterator<Item = &'n str>,
    ) -> Result<HashSet<u32>, ConfigError> {
        let mut owners: BTreeMap<u32, &str> = BTreeMap::new();

        for name in icons {
            let Some(code) = self.entries.get(name).and_then(|params| params.code) else {
                continue;
            };
            if let Some(first) = owners.insert(code, name) {
                return Err(ConfigError::DuplicatePin {
                    codepoint: code,
                    first: first.to_string(),
                    second: name.to_string(),
                });
            }
        }

        Ok(owners.into_keys().collect())
    }
}
