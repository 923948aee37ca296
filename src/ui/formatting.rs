use colored::Colorize;
use facetbrowse_core::{BlockRender, FacetQuery};

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Format a rendered block for the terminal
pub fn format_text(render: &BlockRender) -> String {
    let Some(payload) = render.payload() else {
        return format!(
            "{}",
            "Block is not fully configured; nothing to render.".yellow()
        );
    };

    let mut lines = Vec::new();

    let heading = payload.block_title.as_deref().unwrap_or(&payload.facet_field_name);
    let mut header = format!(
        "{} ({} / {})",
        heading.bold(),
        payload.search_index_id,
        payload.facet_field_name
    );
    if payload.collapsed {
        header.push_str(&format!(" {}", "[collapsed]".dimmed()));
    }
    lines.push(header);

    if payload.facets.is_empty() {
        lines.push(format!("  {}", "No facet values.".italic()));
    }
    for facet in &payload.facets {
        lines.push(format!("  • {}  {}", facet.text, facet.href.cyan()));
    }

    lines.join("\n")
}

/// Format a rendered block as an HTML fragment
/// Collapsed blocks use a closed <details> element
pub fn format_html(render: &BlockRender) -> String {
    let Some(payload) = render.payload() else {
        return String::new();
    };

    let mut html = format!(
        "<div class=\"facets-browse\" data-search-index=\"{}\" data-facet=\"{}\">\n",
        escape_html(&payload.search_index_id),
        escape_html(&payload.facet_field_name)
    );

    let title = payload.block_title.as_deref().map(escape_html);
    if payload.collapsed {
        html.push_str("  <details>\n");
        html.push_str(&format!(
            "    <summary>{}</summary>\n",
            title.as_deref().unwrap_or("Browse")
        ));
    } else if let Some(title) = &title {
        html.push_str(&format!("  <h2>{}</h2>\n", title));
    }

    html.push_str("  <ul>\n");
    for facet in &payload.facets {
        html.push_str(&format!("    <li>{}</li>\n", facet.markup));
    }
    html.push_str("  </ul>\n");

    if payload.collapsed {
        html.push_str("  </details>\n");
    }
    html.push_str("</div>");
    html
}

pub fn format_json(render: &BlockRender) -> serde_json::Result<String> {
    serde_json::to_string_pretty(render)
}

/// Format search parameters one per line, as `name=value`
pub fn format_params(query: &FacetQuery) -> String {
    query
        .to_params()
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use facetbrowse_core::{
        build_facet_query, normalize_entries, render_links, FacetBrowsePayload, RawFacetEntry,
    };

    fn render(collapsed: bool, title: Option<&str>) -> BlockRender {
        let raw = vec![RawFacetEntry::new("enso::Quartet", 5), RawFacetEntry::new("Duo", 2)];
        let facets = render_links(&normalize_entries(Some(&raw)), "/s?f=", true);
        BlockRender::Facets(FacetBrowsePayload {
            theme: "facets_browse".to_string(),
            facets_path: "/s?f=".to_string(),
            facets,
            block_title: title.map(str::to_string),
            search_index_id: "scores".to_string(),
            facet_field_name: "ensemble".to_string(),
            collapsed,
            cache_max_age: 9999,
        })
    }

    #[test]
    fn test_html_lists_markup() {
        let html = format_html(&render(false, Some("Ensembles & Sizes")));

        assert!(html.contains("<h2>Ensembles &amp; Sizes</h2>"));
        assert!(html.contains("<li><a href=\"/s?f=Duo\""));
        assert!(!html.contains("<details>"));
    }

    #[test]
    fn test_html_collapsed_uses_details() {
        let html = format_html(&render(true, None));
        assert!(html.contains("<details>"));
        assert!(html.contains("<summary>Browse</summary>"));
    }

    #[test]
    fn test_empty_render() {
        colored::control::set_override(false);
        assert_eq!(format_html(&BlockRender::Empty), "");
        assert_eq!(format_json(&BlockRender::Empty).unwrap(), "null");
        assert!(format_text(&BlockRender::Empty).contains("not fully configured"));
    }

    #[test]
    fn test_text_lists_links() {
        colored::control::set_override(false);
        let text = format_text(&render(false, None));

        assert!(text.starts_with("ensemble (scores / ensemble)"));
        assert!(text.contains("• Quartet (5)  /s?f=enso%3A%3AQuartet"));
    }

    #[test]
    fn test_params() {
        let params = format_params(&build_facet_query("scores", "genre", Some("Scores")));
        assert!(params.contains("facet.field={!key=genre}genre"));
        assert!(params.contains("fq={!tag=discoverable}is_discoverable:true"));
    }
}
