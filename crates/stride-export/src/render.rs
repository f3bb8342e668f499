use std::path::Path;

use tera::{Context, Tera};

use stride_rubric::ProcessedReport;

use crate::error::ExportError;
use crate::styles::ReportStyles;

const TEMPLATE_SUFFIX: &str = ".html.tera";

const BUILTIN: &[(&str, &str)] = &[
    ("base.html", include_str!("templates/base.html.tera")),
    (
        "health-fitness.html",
        include_str!("templates/health-fitness.html.tera"),
    ),
    ("cardiac.html", include_str!("templates/cardiac.html.tera")),
];

/// Report templates keyed by the template id of an assessment configuration.
///
/// Templates are registered as `<id>.html`, so Tera autoescapes every
/// interpolated value unless a template marks it `safe`.
pub struct ReportTemplates {
    tera: Tera,
}

impl ReportTemplates {
    /// The templates compiled into the binary.
    pub fn builtin() -> Result<Self, ExportError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(BUILTIN.iter().copied())
            .map_err(|e| ExportError::TemplateParse(e.to_string()))?;
        Ok(Self { tera })
    }

    /// Built-in templates, overridden or extended by every `<id>.html.tera`
    /// file in `dir`.
    pub fn with_overrides(dir: &Path) -> Result<Self, ExportError> {
        let mut templates = Self::builtin()?;

        let entries = std::fs::read_dir(dir).map_err(|e| {
            ExportError::TemplateNotFound(format!("{}: {e}", dir.display()))
        })?;

        let mut files = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(id) = file_name.strip_suffix(TEMPLATE_SUFFIX) {
                files.push((path.clone(), Some(format!("{id}.html"))));
            }
        }

        tracing::info!(dir = %dir.display(), count = files.len(), "loading template overrides");
        templates
            .tera
            .add_template_files(files)
            .map_err(|e| ExportError::TemplateParse(e.to_string()))?;
        Ok(templates)
    }

    pub fn has_template(&self, template_id: &str) -> bool {
        let name = format!("{template_id}.html");
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Render an assembled report with the template its configuration names.
    pub fn render(
        &self,
        report: &ProcessedReport,
        styles: &ReportStyles,
    ) -> Result<String, ExportError> {
        let name = format!("{}.html", report.template);
        if !self.has_template(&report.template) {
            return Err(ExportError::TemplateNotFound(report.template.clone()));
        }

        let value = serde_json::json!({
            "report": report,
            "styles": styles,
            "generated_at_display": report
                .metadata
                .generated_at
                .strftime("%Y-%m-%d %H:%M UTC")
                .to_string(),
        });
        let context = Context::from_value(value)
            .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

        let rendered = self.tera.render(&name, &context)?;
        Ok(rendered)
    }
}
