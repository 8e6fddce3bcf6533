use std::collections::HashSet;

use ranking_core::MetricRow;
use serde::{Deserialize, Serialize};

/// Sector tags the benchmark table knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    It,
    Banking,
    Pharma,
    Manufacturing,
    Telecom,
    RealEstate,
    Fmcg,
    Auto,
    Energy,
    Healthcare,
    General,
}

impl Sector {
    pub fn display_name(&self) -> &'static str {
        match self {
            Sector::It => "Information Technology",
            Sector::Banking => "Banking & Financial Services",
            Sector::Pharma => "Pharmaceuticals",
            Sector::Manufacturing => "Manufacturing",
            Sector::Telecom => "Telecommunications",
            Sector::RealEstate => "Real Estate",
            Sector::Fmcg => "Fast Moving Consumer Goods",
            Sector::Auto => "Automobile",
            Sector::Energy => "Energy & Power",
            Sector::Healthcare => "Healthcare Services",
            Sector::General => "General",
        }
    }
}

/// Explicit financial-institution mapping: exact (case-insensitive) symbol
/// and name matches override every heuristic. Built from the caller's
/// banking/NBFC mapping table; empty by default.
#[derive(Debug, Clone, Default)]
pub struct FinancialsMap {
    symbols: HashSet<String>,
    names: HashSet<String>,
}

impl FinancialsMap {
    pub fn new(
        symbols: impl IntoIterator<Item = String>,
        names: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            symbols: symbols
                .into_iter()
                .map(|s| s.trim().to_lowercase())
                .collect(),
            names: names.into_iter().map(|s| s.trim().to_lowercase()).collect(),
        }
    }

    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.symbols.contains(&symbol.trim().to_lowercase())
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(&name.trim().to_lowercase())
    }
}

const FINANCIAL_NAME_KEYWORDS: &[&str] = &[
    " bank",
    "bank ",
    "nbfc",
    "finance",
    "finserv",
    "fin. ",
    "fintech",
    "lending",
    "microfinance",
    "housing finance",
    "hfc",
    "insurance",
    "mfi",
];

/// Detect whether a company belongs to the financials sector
/// (banking / NBFC / insurance / housing finance).
///
/// Exact mapping-table matches win; otherwise the name heuristics decide.
pub fn is_financials(row: &MetricRow, map: &FinancialsMap) -> bool {
    if let Some(symbol) = &row.symbol {
        if map.contains_symbol(symbol) {
            return true;
        }
    }
    if map.contains_name(&row.name) {
        return true;
    }

    let name = row.name.to_lowercase();
    FINANCIAL_NAME_KEYWORDS.iter().any(|kw| name.contains(kw))
}

/// Map a company to a sector tag from its name.
///
/// Financial-institution mapping is checked first, then industry keyword
/// heuristics in a fixed priority order, defaulting to `General`.
pub fn classify(row: &MetricRow, map: &FinancialsMap) -> Sector {
    if is_financials(row, map) {
        return Sector::Banking;
    }

    let name = row.name.to_lowercase();
    let keyword_rules: &[(Sector, &[&str])] = &[
        (
            Sector::It,
            &["tech", "software", "infotech", "systems", "solutions", "technologies"],
        ),
        (
            Sector::Banking,
            &["bank", "finance", "nbfc", "financial", "capital", "securities"],
        ),
        (
            Sector::Pharma,
            &["pharma", "drug", "biotech", "healthcare", "medical", "lab"],
        ),
        (
            Sector::Manufacturing,
            &["industries", "manufacturing", "steel", "cement", "chemicals"],
        ),
        (
            Sector::Telecom,
            &["telecom", "communications", "wireless", "broadband"],
        ),
        (
            Sector::RealEstate,
            &["realty", "properties", "construction", "builders"],
        ),
        (Sector::Fmcg, &["consumer", "foods", "beverages", "fmcg"]),
        (Sector::Auto, &["auto", "motors", "vehicles", "automotive"]),
        (
            Sector::Energy,
            &["power", "energy", "oil", "gas", "petroleum"],
        ),
    ];

    for (sector, keywords) in keyword_rules {
        if keywords.iter().any(|kw| name.contains(kw)) {
            return *sector;
        }
    }

    Sector::General
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_table_wins_over_heuristics() {
        let map = FinancialsMap::new(
            vec!["shriramfin".to_string()],
            vec!["bajaj twins".to_string()],
        );
        let mut row = MetricRow::new("Shriram Transport");
        row.symbol = Some("SHRIRAMFIN".to_string());
        assert!(is_financials(&row, &map));

        let row = MetricRow::new("Bajaj Twins");
        assert!(is_financials(&row, &map));
    }

    #[test]
    fn name_keywords_detect_financials() {
        let map = FinancialsMap::default();
        assert!(is_financials(&MetricRow::new("HDFC Bank Ltd"), &map));
        assert!(is_financials(&MetricRow::new("Cholamandalam Finance"), &map));
        assert!(is_financials(&MetricRow::new("Star Health Insurance"), &map));
        assert!(!is_financials(&MetricRow::new("Tata Steel"), &map));
    }

    #[test]
    fn keyword_priority_order() {
        let map = FinancialsMap::default();
        assert_eq!(classify(&MetricRow::new("Infosys Technologies"), &map), Sector::It);
        assert_eq!(classify(&MetricRow::new("Sun Pharma"), &map), Sector::Pharma);
        assert_eq!(classify(&MetricRow::new("Ambuja Cements"), &map), Sector::Manufacturing);
        // "tech" substring outranks the cement keyword
        assert_eq!(classify(&MetricRow::new("UltraTech Cement"), &map), Sector::It);
        assert_eq!(classify(&MetricRow::new("Tata Motors"), &map), Sector::Auto);
        assert_eq!(classify(&MetricRow::new("Adani Power"), &map), Sector::Energy);
        assert_eq!(classify(&MetricRow::new("Page Ltd"), &map), Sector::General);
    }

    #[test]
    fn sector_tags_serialize_snake_case() {
        assert_eq!(serde_json::to_string(&Sector::It).unwrap(), "\"it\"");
        assert_eq!(
            serde_json::to_string(&Sector::RealEstate).unwrap(),
            "\"real_estate\""
        );
        assert_eq!(serde_json::to_string(&Sector::Fmcg).unwrap(), "\"fmcg\"");
    }

    #[test]
    fn financial_institutions_classify_as_banking() {
        let map = FinancialsMap::default();
        assert_eq!(classify(&MetricRow::new("ICICI Bank"), &map), Sector::Banking);
        assert_eq!(classify(&MetricRow::new("LIC Housing Finance"), &map), Sector::Banking);
    }
}
