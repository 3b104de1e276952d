use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use urania::aspects::{AspectCatalog, AspectKind, OverlapPolicy};
use urania::zodiac::{Element, Modality};
use urania::{ChartSettings, HouseSystem};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChartToml {
    #[serde(default)]
    house_system: Option<String>,
    #[serde(default)]
    include_minor_aspects: Option<bool>,
    #[serde(default)]
    overlap_policy: Option<OverlapPolicy>,
    #[serde(default)]
    element_priority: Option<Vec<Element>>,
    #[serde(default)]
    modality_priority: Option<Vec<Modality>>,
    #[serde(default)]
    orbs: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    chart: Option<ChartToml>,
}

/// Try the usual relative locations of `configs/chart.toml`.
pub fn read_chart_toml_text() -> anyhow::Result<String> {
    let paths = ["configs/chart.toml", "../../configs/chart.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            log::debug!("Loaded chart settings from {p}");
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load chart.toml from {:?}", paths);
}

/// Settings from an explicit file, or from the probed `configs/chart.toml`.
///
/// Without an explicit path a missing file yields the defaults.
pub fn load_chart_settings(path: Option<&Path>) -> anyhow::Result<ChartSettings> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read chart config {}", path.display()))?,
        None => match read_chart_toml_text() {
            Ok(text) => text,
            Err(e) => {
                log::info!("{e}; using default chart settings");
                return Ok(ChartSettings::default());
            }
        },
    };
    parse_chart_settings(&text)
}

/// Parse and validate the `[chart]` section of a TOML document.
pub fn parse_chart_settings(text: &str) -> anyhow::Result<ChartSettings> {
    let root: RootConfigToml = toml::from_str(text).context("Failed to parse chart.toml")?;
    let Some(cfg) = root.chart else {
        return Ok(ChartSettings::default());
    };

    let mut settings = ChartSettings::default();

    if let Some(code) = cfg.house_system {
        settings.default_house_system = HouseSystem::from_code(&code).context("chart.house_system")?;
    }
    if let Some(include) = cfg.include_minor_aspects {
        settings.include_minor_aspects = include;
    }
    if let Some(policy) = cfg.overlap_policy {
        settings.overlap_policy = policy;
    }
    if let Some(order) = cfg.element_priority {
        settings.element_priority = permutation(&order, Element::ALL, "chart.element_priority")?;
    }
    if let Some(order) = cfg.modality_priority {
        settings.modality_priority = permutation(&order, Modality::ALL, "chart.modality_priority")?;
    }

    let mut catalog = AspectCatalog::standard();
    for (name, orb) in cfg.orbs {
        let kind = AspectKind::from_id(&name)
            .ok_or_else(|| anyhow::anyhow!("chart.orbs: unknown aspect '{name}'"))?;
        if !orb.is_finite() || orb < 0.0 {
            anyhow::bail!("chart.orbs.{name} must be a finite, non-negative number of degrees (got {orb})");
        }
        catalog = catalog.with_orb(kind, orb);
    }
    settings.catalog = catalog;

    Ok(settings)
}

/// `order` must name every value of `all` exactly once.
fn permutation<T: Copy + PartialEq + std::fmt::Debug, const N: usize>(
    order: &[T],
    all: [T; N],
    key: &str,
) -> anyhow::Result<[T; N]> {
    let complete = order.len() == N && all.iter().all(|v| order.iter().filter(|o| *o == v).count() == 1);
    if !complete {
        anyhow::bail!("{key} must list each of {all:?} exactly once (got {order:?})");
    }
    let mut out = all;
    out.copy_from_slice(order);
    Ok(out)
}
