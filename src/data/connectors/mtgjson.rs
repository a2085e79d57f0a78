use crate::data::card::CardRecord;
use crate::data::mechanics;
use crate::error::{MagiqueError, Result};
use crate::types::{CardType, Color, Format};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Reads card databases in the mtgjson layout
pub struct MtgJsonConnector;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<RawCard>),
    Keyed(BTreeMap<String, RawCard>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCard {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    supertypes: Vec<String>,
    #[serde(default)]
    subtypes: Vec<String>,
    #[serde(default)]
    color_identity: Vec<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    power: Option<String>,
    #[serde(default)]
    toughness: Option<String>,
    #[serde(default, alias = "manaValue", alias = "convertedManaCost")]
    cmc: f64,
    #[serde(default)]
    legalities: RawLegalities,
}

#[derive(Debug, Deserialize, Default)]
#[serde(untagged)]
enum RawLegalities {
    Map(BTreeMap<String, String>),
    List(Vec<RawLegality>),
    #[default]
    Missing,
}

#[derive(Debug, Deserialize)]
struct RawLegality {
    format: String,
    legality: String,
}

impl MtgJsonConnector {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<CardRecord>> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Accepts either an array of card objects or an object keyed by card name
    pub fn parse(json: &str) -> Result<Vec<CardRecord>> {
        let document: CatalogDocument = serde_json::from_str(json)?;

        match document {
            CatalogDocument::List(cards) => cards
                .into_iter()
                .enumerate()
                .map(|(i, raw)| {
                    let name = raw.name.clone().ok_or_else(|| {
                        MagiqueError::Parse(format!("Card at position {} has no name", i))
                    })?;
                    Ok(raw.into_record(name))
                })
                .collect(),
            CatalogDocument::Keyed(cards) => Ok(cards
                .into_iter()
                .map(|(key, raw)| {
                    let name = raw.name.clone().unwrap_or(key);
                    raw.into_record(name)
                })
                .collect()),
        }
    }
}

impl RawCard {
    fn into_record(self, name: String) -> CardRecord {
        let color_identity: BTreeSet<Color> = self
            .color_identity
            .iter()
            .filter_map(|c| {
                let color = Color::parse(c);
                if color.is_none() {
                    log::warn!("Ignoring unknown color '{}' on {}", c, name);
                }
                color
            })
            .collect();

        let types: BTreeSet<CardType> = self
            .types
            .iter()
            .filter_map(|t| CardType::from_printed(t, &self.supertypes))
            .collect();

        let text = self.text.unwrap_or_default();

        CardRecord {
            mechanics: mechanics::classify(&text),
            legalities: self.legalities.legal_formats(),
            color_identity,
            types,
            subtypes: self.subtypes,
            mana_value: self.cmc.max(0.0).round() as u32,
            text,
            power: self.power,
            toughness: self.toughness,
            name,
        }
    }
}

impl RawLegalities {
    fn legal_formats(&self) -> BTreeSet<Format> {
        let entries: Vec<(&str, &str)> = match self {
            RawLegalities::Map(map) => map.iter().map(|(f, l)| (f.as_str(), l.as_str())).collect(),
            RawLegalities::List(list) => list
                .iter()
                .map(|l| (l.format.as_str(), l.legality.as_str()))
                .collect(),
            RawLegalities::Missing => Vec::new(),
        };

        entries
            .into_iter()
            .filter(|(_, legality)| {
                legality.eq_ignore_ascii_case("legal") || legality.eq_ignore_ascii_case("restricted")
            })
            .filter_map(|(format, _)| Format::parse(format))
            .collect()
    }
}
