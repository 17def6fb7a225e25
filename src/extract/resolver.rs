// Brand-conditioned model/variant grammars, one pattern set per brand

use crate::model::{Attr, Brand};
use crate::utils::collapse_whitespace;
use regex::Regex;
use std::sync::LazyLock;

static RYZEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bRYZEN\s*(?:(\d)\s+)?(\d{3,5}[A-Z0-9]{0,3})").expect("ryzen pattern")
});
static CORE_ULTRA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bCORE\s+ULTRA\s+(\d)\s+(\d{3,5}[A-Z]{0,2})").expect("core ultra pattern")
});
static CORE_I: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bI([3579])\s?-?\s?(\d{4,5}[A-Z]{0,2})").expect("core i pattern")
});

static GPU_AMD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bRX\s?\d{3,4}(?:\s?(?:XTX|XT|GRE)\b)?").expect("radeon pattern")
});
static GPU_NVIDIA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:RTX|GTX|GT)\s?\d{3,4}(?:\s?(?:TI\s?SUPER|SUPER|TI)\b)?")
        .expect("geforce pattern")
});
static GPU_INTEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bARC\s+[A-Z]?\d{3,4}(?:\s?(?:M|PRO|OC)\b)?").expect("arc pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuModel {
    pub base_model: Attr<String>,
    pub variant: Attr<String>,
}

impl CpuModel {
    fn unresolved() -> Self {
        Self {
            base_model: Attr::Unknown,
            variant: Attr::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuModel {
    pub base_model: Attr<String>,
    pub custom_model: String,
}

pub fn resolve_cpu(title: &str, brand: Attr<Brand>) -> CpuModel {
    match brand {
        Attr::Resolved(Brand::Amd) => resolve_ryzen(title),
        Attr::Resolved(Brand::Intel) => resolve_core_ultra(title)
            .or_else(|| resolve_core_i(title))
            .unwrap_or_else(CpuModel::unresolved),
        Attr::Resolved(Brand::Nvidia) | Attr::Unknown => CpuModel::unresolved(),
    }
}

fn resolve_ryzen(title: &str) -> CpuModel {
    let Some(caps) = RYZEN.captures(title) else {
        return CpuModel::unresolved();
    };
    CpuModel {
        base_model: Attr::Resolved(caps[2].to_uppercase()),
        variant: caps
            .get(1)
            .map(|series| format!("RYZEN {}", series.as_str()))
            .into(),
    }
}

fn resolve_core_ultra(title: &str) -> Option<CpuModel> {
    let caps = CORE_ULTRA.captures(title)?;
    Some(CpuModel {
        base_model: Attr::Resolved(caps[2].to_uppercase()),
        variant: Attr::Resolved(format!("Ultra {}", &caps[1])),
    })
}

fn resolve_core_i(title: &str) -> Option<CpuModel> {
    let caps = CORE_I.captures(title)?;
    Some(CpuModel {
        base_model: Attr::Resolved(caps[2].to_uppercase()),
        variant: Attr::Resolved(format!("I{}", &caps[1])),
    })
}

pub fn resolve_gpu(title: &str, brand: Attr<Brand>) -> GpuModel {
    let original = title.trim();
    let pattern: Option<&Regex> = match brand {
        Attr::Resolved(Brand::Amd) => Some(&*GPU_AMD),
        Attr::Resolved(Brand::Nvidia) => Some(&*GPU_NVIDIA),
        Attr::Resolved(Brand::Intel) => Some(&*GPU_INTEL),
        Attr::Unknown => None,
    };

    match pattern.and_then(|re| re.find(original)) {
        Some(found) => {
            let custom_model = original[found.end()..]
                .split(',')
                .next()
                .unwrap_or_default()
                .trim_matches(|c: char| c.is_whitespace() || c == '-' || c == '–')
                .to_string();
            GpuModel {
                base_model: Attr::Resolved(collapse_whitespace(&found.as_str().to_uppercase())),
                custom_model,
            }
        }
        None => GpuModel {
            base_model: Attr::Unknown,
            custom_model: original.to_string(),
        },
    }
}
