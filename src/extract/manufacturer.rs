// Board-partner extraction. Stores phrase their GPU titles differently, so the
// caller picks a strategy by store instead of one extractor guessing.
use crate::model::{Attr, Store};
use regex::Regex;
use std::sync::LazyLock;

static TITLE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Placa\s+de\s+V[ií]deo\s+([\w\-]+)").expect("manufacturer phrase pattern")
});

pub const DEFAULT_MANUFACTURERS: [&str; 16] = [
    "ASROCK",
    "GIGABYTE",
    "XFX",
    "MSI",
    "ZOTAC",
    "GALAX",
    "PNY",
    "EVGA",
    "POWER COLOR",
    "SAPPHIRE",
    "ASUS",
    "INNO3D",
    "COLORFUL",
    "GAINWARD",
    "AFOX",
    "PCYES",
];

#[derive(Debug, Clone, PartialEq)]
pub enum ManufacturerStrategy {
    /// Token right after "Placa de Vídeo"; works where the store leads titles with that phrase.
    TitlePhrase,
    /// First known partner name found anywhere in the upper-cased title, in list order.
    KnownPartners(Vec<String>),
}

impl ManufacturerStrategy {
    /// Strategy for a store's title grammar. Kabum does not standardize where the partner
    /// name sits, the other stores lead with the phrase.
    pub fn for_store(store: Store, partners: &[String]) -> Self {
        match store {
            Store::Kabum => ManufacturerStrategy::KnownPartners(
                partners.iter().map(|p| p.to_uppercase()).collect(),
            ),
            Store::Pichau | Store::Terabyte => ManufacturerStrategy::TitlePhrase,
        }
    }

    pub fn extract(&self, title: &str) -> Attr<String> {
        match self {
            ManufacturerStrategy::TitlePhrase => TITLE_PHRASE
                .captures(title)
                .map(|caps| caps[1].to_string())
                .into(),
            ManufacturerStrategy::KnownPartners(partners) => {
                let upper = title.to_uppercase();
                partners
                    .iter()
                    .find(|partner| upper.contains(partner.as_str()))
                    .cloned()
                    .into()
            }
        }
    }
}

pub fn default_partners() -> Vec<String> {
    DEFAULT_MANUFACTURERS.iter().map(|m| m.to_string()).collect()
}
