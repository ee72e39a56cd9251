use anyhow::Result;

use crate::cli::OutputFormat;
use crate::AnalysisResult;

use super::super::Container;

pub struct SiteAuditController<'a> {
    container: &'a Container,
}

impl<'a> SiteAuditController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn analyze(&self, url: String, format: OutputFormat) -> Result<String> {
        if url.trim().is_empty() {
            anyhow::bail!("url must not be empty");
        }

        let use_case = self.container.site_audit_use_case();
        let result = use_case.analyze_site(&url).await;

        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&result)?),
            OutputFormat::Text => Ok(format_report(&url, &result)),
        }
    }
}

fn format_report(url: &str, result: &AnalysisResult) -> String {
    let mut output = format!(
        "Simulated accessibility audit: {url}\n\
         (heuristic estimate, the page was not fetched)\n\n\
         Score: {}/100 ({})\n",
        result.score(),
        result.verdict()
    );

    for (title, items) in [
        ("Errors", result.errors()),
        ("Warnings", result.warnings()),
        ("Passes", result.passes()),
    ] {
        output.push_str(&format!("\n{title} ({}):\n", items.len()));
        for item in items {
            output.push_str(&format!("  - {item}\n"));
        }
    }

    output.push_str(&format!("\nSummary: {}", result.summary()));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_every_section() {
        let result = AnalysisResult::new(
            58,
            vec!["Низкий контраст".to_string()],
            vec![],
            vec!["Есть skip-link".to_string()],
            "Требуется доработка",
        );
        let report = format_report("egov.kz", &result);
        assert!(report.contains("egov.kz"));
        assert!(report.contains("Score: 58/100 (Не соответствует)"));
        assert!(report.contains("Errors (1):\n  - Низкий контраст"));
        assert!(report.contains("Warnings (0):"));
        assert!(report.contains("  - Есть skip-link"));
        assert!(report.ends_with("Summary: Требуется доработка"));
    }

    #[test]
    fn report_shows_verdict_next_to_score() {
        let passing = AnalysisResult::new(95, vec![], vec![], vec![], "");
        let failing = AnalysisResult::new(40, vec![], vec![], vec![], "");
        let passing = format_report("a.kz", &passing);
        let failing = format_report("a.kz", &failing);
        assert!(passing.contains("Score: 95/100 (Соответствует)"));
        assert!(failing.contains("Score: 40/100 (Не соответствует)"));
    }
}
