// Benchmark chart pages -> (display name, score) rows
use crate::model::{BenchmarkEntry, Category, ParserError};
use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::sync::LazyLock;

static ARIA_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*(.*?):\s*(\d+)").expect("aria label pattern"));
static CPU_POINTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Pontos:\s*(\d+)").expect("cpu points pattern"));
static GPU_AVERAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"médio:\s*(\d+)").expect("gpu average pattern"));
static ARRAY_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\s*'(.*?)',\s*(\d+),\s*'.*?'\s*,\s*'.*?'\s*\]").expect("array row pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkFormat {
    /// Interactive chart: one `path.data-point` per model, data in `aria-label`.
    Chart,
    /// Chart data inlined in the page source as `['Name', 123, '..', '..']` rows.
    ArrayLiteral,
}

pub fn parse_benchmark_page(
    html: &str,
    format: BenchmarkFormat,
    category: Category,
) -> Result<Vec<BenchmarkEntry>, ParserError> {
    let entries = match format {
        BenchmarkFormat::Chart => parse_chart(html, category)?,
        BenchmarkFormat::ArrayLiteral => parse_array_literal(html),
    };
    if entries.is_empty() {
        return Err(ParserError::MissingField("benchmark data points".into()));
    }
    Ok(entries)
}

fn parse_chart(html: &str, category: Category) -> Result<Vec<BenchmarkEntry>, ParserError> {
    let document = Html::parse_document(html);
    let points = Selector::parse("path.data-point")
        .map_err(|e| ParserError::HtmlParseError(e.to_string()))?;
    let explicit_score: &Regex = match category {
        Category::Cpu => &*CPU_POINTS,
        Category::Gpu => &*GPU_AVERAGE,
    };

    Ok(document
        .select(&points)
        .filter_map(|el| el.value().attr("aria-label"))
        .filter_map(|label| parse_aria_label(label, explicit_score))
        .collect())
}

fn parse_aria_label(label: &str, explicit_score: &Regex) -> Option<BenchmarkEntry> {
    let caps = ARIA_LABEL.captures(label)?;
    let display_name = caps[1].trim().to_string();
    let score = match explicit_score.captures(label) {
        Some(points) => points[1].parse::<u32>().ok()?,
        None => caps[2].parse::<u32>().ok()?,
    };
    Some(BenchmarkEntry { display_name, score })
}

fn parse_array_literal(html: &str) -> Vec<BenchmarkEntry> {
    ARRAY_ROW
        .captures_iter(html)
        .filter_map(|caps| {
            Some(BenchmarkEntry {
                display_name: caps[1].trim().to_string(),
                score: caps[2].parse().ok()?,
            })
        })
        .collect()
}
