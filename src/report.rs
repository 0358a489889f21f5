//! Plain-text summary for the one-shot mode.

use std::collections::HashMap;

use crate::chart::{format_ms, format_time_label};
use crate::model::{Site, SiteCheckData};
use crate::poll::FetchOutcome;
use crate::registry::SiteRegistry;

/// One line per site: name, sample count, latest status, latest response
/// time and URL.
pub fn summary_line(site: &Site, data: &SiteCheckData) -> String {
    let (status, rt, at) = match data.latest() {
        Some(c) => (
            format!("{} {}", if c.is_up() { "UP" } else { "DOWN" }, c.code),
            format_ms(c.rt),
            c.timestamp().map(format_time_label).unwrap_or_else(|| c.t.clone()),
        ),
        None => ("-".to_string(), "-".to_string(), "-".to_string()),
    };
    format!(
        "{:<24} {:>6} {:<9} {:>9} {:<14} {}",
        site.name,
        data.checks.len(),
        status,
        rt,
        at,
        site.url
    )
}

/// Summary lines for every successful outcome, in registry order.
pub fn summarize(registry: &SiteRegistry, outcomes: Vec<FetchOutcome>) -> Vec<String> {
    let mut loaded: HashMap<String, SiteCheckData> = outcomes
        .into_iter()
        .filter_map(|o| o.result.ok().map(|data| (o.site_id, data)))
        .collect();
    registry
        .iter()
        .filter_map(|site| loaded.remove(&site.id).map(|data| summary_line(site, &data)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::feed::FetchError;
    use crate::poll::testing::{doc, registry};

    fn ok(id: &str, rts: &[f64]) -> FetchOutcome {
        FetchOutcome {
            generation: 1,
            site_id: id.to_string(),
            result: Ok(doc(id, rts)),
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn test_summary_line() {
        let reg = registry(&["api"]);
        let line = summary_line(&reg.sites()[0], &doc("api", &[120.0, 340.0]));
        assert!(line.starts_with("API"));
        assert!(line.contains("UP 200"));
        assert!(line.contains("340ms"));
        assert!(line.contains("Jan 1, 00:10"));
        assert!(line.ends_with("https://api.example"));
    }

    #[test]
    fn test_summary_line_without_checks() {
        let reg = registry(&["api"]);
        let line = summary_line(&reg.sites()[0], &doc("api", &[]));
        assert!(line.contains(" 0 "));
        assert!(line.ends_with("https://api.example"));
    }

    #[test]
    fn test_summarize_registry_order_skips_failures() {
        let reg = registry(&["a", "b", "c"]);
        let outcomes = vec![
            ok("c", &[1.0]),
            FetchOutcome {
                generation: 1,
                site_id: "b".to_string(),
                result: Err(FetchError::Http {
                    url: url::Url::parse("http://mock/b.json").unwrap(),
                    status: 404,
                }),
                elapsed: Duration::ZERO,
            },
            ok("a", &[2.0]),
        ];
        let lines = summarize(&reg, outcomes);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('A'));
        assert!(lines[1].starts_with('C'));
    }
}
