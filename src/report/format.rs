//! Formatted terminal output for a reporter run.
//!
//! Formatting lives here so the rest of the pipeline only deals in numbers.

use std::collections::BTreeMap;

use crate::domain::{Sector, SummaryStats, Symbol};

/// Per-symbol table followed by a sector overview.
pub fn format_summary(stats: &BTreeMap<String, SummaryStats>) -> String {
    let mut out = String::new();

    out.push_str("=== ASX closing-price summary ===\n");
    out.push_str(&format!(
        "{:<8} {:<24} {:<8} {:>10} {:>9} {:>21} {:>8}\n",
        "Symbol", "Company", "Sector", "Latest", "vs Avg", "Range", "SD"
    ));

    let mut by_sector: BTreeMap<Sector, Vec<f64>> = BTreeMap::new();

    for symbol in Symbol::ALL {
        let Some(s) = stats.get(symbol.ticker()) else {
            continue;
        };
        let vs_avg = s.vs_average_pct();
        if let Some(pct) = vs_avg {
            by_sector.entry(symbol.sector()).or_default().push(pct);
        }

        let range = match (s.min, s.max) {
            (Some(lo), Some(hi)) => format!("${lo:.2} - ${hi:.2}"),
            _ => "-".to_string(),
        };
        out.push_str(&format!(
            "{:<8} {:<24} {:<8} {:>10} {:>9} {:>21} {:>8}\n",
            symbol.ticker(),
            symbol.company(),
            symbol.sector().label(),
            money(s.latest),
            vs_avg.map(signed_pct).unwrap_or_else(|| "-".to_string()),
            range,
            money(s.sd),
        ));
    }

    if !by_sector.is_empty() {
        out.push_str("\n--- Sector overview (latest vs average) ---\n");
        for (sector, pcts) in &by_sector {
            let avg = pcts.iter().sum::<f64>() / pcts.len() as f64;
            out.push_str(&format!(
                "{:<8} {:>9}  ({} symbol{})\n",
                sector.label(),
                signed_pct(avg),
                pcts.len(),
                if pcts.len() == 1 { "" } else { "s" }
            ));
        }
    }

    out
}

fn money(v: Option<f64>) -> String {
    v.map(|v| format!("${v:.2}")).unwrap_or_else(|| "-".to_string())
}

fn signed_pct(v: f64) -> String {
    format!("{v:+.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(latest: f64, mean: f64) -> SummaryStats {
        SummaryStats {
            latest: Some(latest),
            mean: Some(mean),
            min: Some(mean - 5.0),
            max: Some(mean + 5.0),
            sd: Some(2.5),
        }
    }

    #[test]
    fn rows_follow_universe_order_with_metadata() {
        let mut map = BTreeMap::new();
        map.insert("AGL.AX".to_string(), stats(20.0, 25.0));
        map.insert("CBA.AX".to_string(), stats(110.0, 100.0));

        let text = format_summary(&map);
        let cba = text.find("CBA.AX").unwrap();
        let agl = text.find("AGL.AX").unwrap();
        assert!(cba < agl);
        assert!(text.contains("Commonwealth Bank"));
        assert!(text.contains("+10.0%"));
        assert!(text.contains("-20.0%"));
        assert!(text.contains("$95.00 - $105.00"));
    }

    #[test]
    fn sector_overview_averages_members() {
        let mut map = BTreeMap::new();
        map.insert("CBA.AX".to_string(), stats(110.0, 100.0));
        map.insert("NAB.AX".to_string(), stats(90.0, 100.0));
        map.insert("BHP.AX".to_string(), stats(55.0, 50.0));

        let text = format_summary(&map);
        assert!(text.contains("Finance      +0.0%  (2 symbols)"));
        assert!(text.contains("Mining      +10.0%  (1 symbol)"));
        assert!(!text.contains("Energy   "));
    }

    #[test]
    fn empty_stats_render_placeholders() {
        let mut map = BTreeMap::new();
        map.insert("ORG.AX".to_string(), SummaryStats::default());
        let text = format_summary(&map);
        assert!(text.contains("ORG.AX"));
        assert!(!text.contains("Sector overview"));
    }
}
