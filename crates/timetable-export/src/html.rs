use serde::Serialize;
use tera::{Context, Tera};

use crate::error::ExportError;
use crate::render::{DivisionSection, Page};
use crate::styles::TableStyles;

const RESULTS_TEMPLATE: &str = "results.html";
const PAGE_TEMPLATE: &str = "page.html";

#[derive(Serialize)]
struct PageContext<'a> {
    divisions: &'a [DivisionSection],
    styles: &'a TableStyles,
    status: Option<&'a str>,
}

fn templates() -> Result<Tera, ExportError> {
    // Names end in `.html` so Tera autoescapes every interpolated value.
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (RESULTS_TEMPLATE, include_str!("../templates/results.html")),
        (PAGE_TEMPLATE, include_str!("../templates/page.html")),
    ])
    .map_err(|e| ExportError::TemplateParse(e.to_string()))?;
    Ok(tera)
}

fn render(name: &str, context: &PageContext<'_>) -> Result<String, ExportError> {
    let tera = templates()?;
    let context = Context::from_serialize(context)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;
    Ok(tera.render(name, &context)?)
}

/// Render the division sections that fill the results container.
pub fn render_html(page: &Page, styles: &TableStyles) -> Result<String, ExportError> {
    render(
        RESULTS_TEMPLATE,
        &PageContext {
            divisions: &page.divisions,
            styles,
            status: None,
        },
    )
}

/// Render a standalone results document.
///
/// `status` fills the loading/status element; `None` hides it.
pub fn render_document(
    page: &Page,
    status: Option<&str>,
    styles: &TableStyles,
) -> Result<String, ExportError> {
    render(
        PAGE_TEMPLATE,
        &PageContext {
            divisions: &page.divisions,
            styles,
            status,
        },
    )
}
