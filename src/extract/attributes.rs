// Independent title extractors; a miss yields Attr::Unknown

use crate::model::{Attr, Brand, Category, ClockSpeeds};
use regex::Regex;
use std::sync::LazyLock;

static SOCKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(AM3|AM4|AM5|LGA\s?\d{4})\b").expect("socket pattern"));
static CORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*-\s*Core").expect("core pattern"));
static THREADS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*-\s*Threads?").expect("thread pattern"));
static CLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*GHz\s*\(\s*(\d+(?:\.\d+)?)\s*GHz\s+Turbo\s*\)")
        .expect("clock pattern")
});
static CACHE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bCache\s+(\d+)\s*MB").expect("cache pattern"));
static VRAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*GB").expect("vram pattern"));

/// Socket family token, upper-cased with inner spaces removed (`LGA 1700` -> `LGA1700`).
pub fn extract_socket(title: &str) -> Attr<String> {
    SOCKET
        .captures(title)
        .map(|caps| caps[1].to_ascii_uppercase().replace(' ', ""))
        .into()
}

/// `(cores, threads)`; each side resolves on its own.
pub fn extract_cores_threads(title: &str) -> (Attr<u32>, Attr<u32>) {
    let grab = |re: &Regex| -> Attr<u32> {
        re.captures(title)
            .and_then(|caps| caps[1].parse::<u32>().ok())
            .into()
    };
    (grab(&*CORES), grab(&*THREADS))
}

/// `3.8GHz (5.3GHz Turbo)`; no partial result when only one clock is present.
pub fn extract_clock_speeds(title: &str) -> Attr<ClockSpeeds> {
    CLOCKS
        .captures(title)
        .and_then(|caps| {
            let base_ghz = caps[1].parse::<f64>().ok()?;
            let turbo_ghz = caps[2].parse::<f64>().ok()?;
            Some(ClockSpeeds { base_ghz, turbo_ghz })
        })
        .into()
}

pub fn extract_cache(title: &str) -> Attr<String> {
    CACHE
        .captures(title)
        .map(|caps| format!("{}MB", &caps[1]))
        .into()
}

/// First `<n>GB` in the title. A bundled SSD mentioned earlier in the title wins,
/// which is a known limitation of the pattern.
pub fn extract_vram(title: &str) -> Attr<String> {
    VRAM.captures(title)
        .map(|caps| format!("{}GB", &caps[1]))
        .into()
}

/// One brand's markers: plain substrings plus regexes, both checked on the lower-cased title.
#[derive(Debug, Clone)]
pub struct BrandRule {
    pub brand: Brand,
    pub keywords: Vec<String>,
    pub patterns: Vec<Regex>,
}

impl BrandRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
            || self.patterns.iter().any(|p| p.is_match(lowered))
    }
}

/// Priority-ordered brand rules; the first matching rule wins.
#[derive(Debug, Clone)]
pub struct BrandDetector {
    rules: Vec<BrandRule>,
}

impl BrandDetector {
    pub fn new(rules: Vec<BrandRule>) -> Self {
        Self { rules }
    }

    pub fn detect(&self, title: &str) -> Attr<Brand> {
        let lowered = title.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.brand)
            .into()
    }

    /// Like `detect`, but rules for brands that do not make `category` are skipped,
    /// so a PC kit title mentioning its graphics card still resolves the CPU maker.
    pub fn detect_for(&self, title: &str, category: Category) -> Attr<Brand> {
        let lowered = title.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.brand.makes(category))
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.brand)
            .into()
    }
}

impl Default for BrandDetector {
    fn default() -> Self {
        let rule = |brand, keywords: &[&str], patterns: &[&str]| BrandRule {
            brand,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p).expect("brand pattern"))
                .collect(),
        };

        Self::new(vec![
            rule(Brand::Amd, &["ryzen", "radeon"], &[r"\brx\s?\d+"]),
            rule(Brand::Nvidia, &["geforce"], &[r"\b(gtx|rtx)\s?\d+"]),
            rule(Brand::Intel, &["intel", "core i", "arc"], &[]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_tokens() {
        assert_eq!(
            extract_socket("AMD Ryzen 7 7700X Processador AM5"),
            Attr::Resolved("AM5".to_string())
        );
        assert_eq!(
            extract_socket("Processador Intel Core i5-12400F, LGA 1700"),
            Attr::Resolved("LGA1700".to_string())
        );
        assert_eq!(
            extract_socket("socket am4 box"),
            Attr::Resolved("AM4".to_string())
        );
        // five digits is not a socket
        assert_eq!(extract_socket("LGA17000"), Attr::Unknown);
        assert_eq!(extract_socket("CAM5 mount"), Attr::Unknown);
    }

    #[test]
    fn cores_and_threads_are_independent() {
        let title = "Processador AMD Ryzen 5 5600, 6-Core, 12-Threads, 3.5GHz (4.4GHz Turbo), Cache 32MB";
        assert_eq!(
            extract_cores_threads(title),
            (Attr::Resolved(6), Attr::Resolved(12))
        );
        assert_eq!(
            extract_cores_threads("Intel Core i3 4-Core"),
            (Attr::Resolved(4), Attr::Unknown)
        );
        assert_eq!(
            extract_cores_threads("8 - Thread"),
            (Attr::Unknown, Attr::Resolved(8))
        );
    }

    #[test]
    fn clocks_need_both_values() {
        assert_eq!(
            extract_clock_speeds("6-Core, 3.5GHz (4.4GHz Turbo)"),
            Attr::Resolved(ClockSpeeds { base_ghz: 3.5, turbo_ghz: 4.4 })
        );
        assert_eq!(extract_clock_speeds("3.5GHz"), Attr::Unknown);
        assert_eq!(extract_clock_speeds("(4.4GHz Turbo)"), Attr::Unknown);
    }

    #[test]
    fn cache_and_vram() {
        assert_eq!(
            extract_cache("Ryzen 5 5600, Cache 32MB, AM4"),
            Attr::Resolved("32MB".to_string())
        );
        assert_eq!(extract_cache("Ryzen 5 5600"), Attr::Unknown);
        assert_eq!(
            extract_vram("RTX 4070 Super Windforce OC 12GB GDDR6X"),
            Attr::Resolved("12GB".to_string())
        );
        assert_eq!(
            extract_vram("Kit RX 7600 + SSD 480GB, 8GB"),
            Attr::Resolved("480GB".to_string())
        );
        assert_eq!(extract_vram("RTX 4060"), Attr::Unknown);
    }

    #[test]
    fn brand_priority() {
        let detector = BrandDetector::default();
        assert_eq!(detector.detect("AMD Ryzen 7 7700X"), Attr::Resolved(Brand::Amd));
        assert_eq!(
            detector.detect("Placa de Video PowerColor RX7600 Fighter"),
            Attr::Resolved(Brand::Amd)
        );
        assert_eq!(
            detector.detect("Placa de Video Gigabyte GeForce RTX 4060"),
            Attr::Resolved(Brand::Nvidia)
        );
        assert_eq!(detector.detect("Zotac GTX1650 OC"), Attr::Resolved(Brand::Nvidia));
        assert_eq!(
            detector.detect("Intel Core i5-13400F"),
            Attr::Resolved(Brand::Intel)
        );
        assert_eq!(
            detector.detect("Placa de Video ASRock Arc A750 Challenger"),
            Attr::Resolved(Brand::Intel)
        );
        assert_eq!(detector.detect("Water Cooler 240mm"), Attr::Unknown);
        assert_eq!(detector.detect(""), Attr::Unknown);
    }

    #[test]
    fn cpu_detection_never_yields_nvidia() {
        let detector = BrandDetector::default();
        let kit = "PC Gamer GeForce RTX 4060 Intel Core i5-12400F";
        assert_eq!(detector.detect(kit), Attr::Resolved(Brand::Nvidia));
        assert_eq!(detector.detect_for(kit, Category::Cpu), Attr::Resolved(Brand::Intel));
        assert_eq!(detector.detect_for(kit, Category::Gpu), Attr::Resolved(Brand::Nvidia));
        assert_eq!(detector.detect_for("GeForce RTX 4060", Category::Cpu), Attr::Unknown);
    }
}
