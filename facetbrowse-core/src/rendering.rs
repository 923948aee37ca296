use crate::models::{NormalizedFacetEntry, RenderedFacet};

/// Escape text placed between tags.
fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render one entry as a browse link.
///
/// The target is `facets_path` followed directly by the entry's URL value,
/// so the path must already end in whatever delimiter the value needs.
pub fn render_link(entry: &NormalizedFacetEntry, facets_path: &str, show_counts: bool) -> RenderedFacet {
    let href = format!("{}{}", facets_path, entry.url_value);
    let title = format!("browse facets for {}", entry.url_value);
    let text = if show_counts {
        format!("{} ({})", entry.display_label, entry.count)
    } else {
        entry.display_label.clone()
    };

    let markup = format!(
        "<a href=\"{}\" title=\"{}\">{}</a>",
        href,
        title,
        escape_text(&text)
    );

    RenderedFacet {
        markup,
        href,
        title,
        text,
        count: entry.count,
    }
}

/// Render all entries and order them.
///
/// The order is a plain byte-wise comparison of the rendered markup, not of
/// the label or count. Links whose targets share a path therefore sort by
/// URL value first. Visible text is compared in its escaped form, so a label
/// containing `&`, `<` or `>` sorts by `&amp;`, `&lt;` or `&gt;` when two
/// links tie up to that point.
pub fn render_links(
    entries: &[NormalizedFacetEntry],
    facets_path: &str,
    show_counts: bool,
) -> Vec<RenderedFacet> {
    let mut links: Vec<RenderedFacet> = entries
        .iter()
        .map(|entry| render_link(entry, facets_path, show_counts))
        .collect();

    links.sort_by(|a, b| a.markup.cmp(&b.markup));
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawFacetEntry;
    use crate::parsing::normalize_entry;

    fn entry(raw: &str, count: u64) -> NormalizedFacetEntry {
        normalize_entry(&RawFacetEntry::new(raw, count))
    }

    #[test]
    fn test_link_target_is_plain_concatenation() {
        let link = render_link(&entry("quartet", 1), "/s?f=", false);
        assert_eq!(link.href, "/s?f=quartet");
    }

    #[test]
    fn test_link_markup() {
        let link = render_link(&entry("quartet", 1), "/search?f[0]=collection:X&f[1]=", false);
        assert_eq!(
            link.markup,
            "<a href=\"/search?f[0]=collection:X&f[1]=quartet\" title=\"browse facets for quartet\">quartet</a>"
        );
    }

    #[test]
    fn test_counts_appended_to_text() {
        let link = render_link(&entry("enso::Quartet", 5), "/s?f=", true);

        assert_eq!(link.text, "Quartet (5)");
        assert_eq!(link.href, "/s?f=enso%3A%3AQuartet");
        assert!(link.markup.ends_with(">Quartet (5)</a>"));
    }

    #[test]
    fn test_counts_hidden() {
        let link = render_link(&entry("Orchestra", 3), "/s?f=", false);
        assert_eq!(link.text, "Orchestra");
        assert!(link.markup.ends_with(">Orchestra</a>"));
    }

    #[test]
    fn test_label_text_is_escaped() {
        let link = render_link(&entry("Strings & <Winds>", 1), "/s?f=", false);
        assert!(link.markup.ends_with(">Strings &amp; &lt;Winds&gt;</a>"));
        assert_eq!(link.text, "Strings & <Winds>");
    }

    // Documented quirk: links are ordered by their full markup, which puts
    // the URL value ahead of the label and ignores counts entirely.
    #[test]
    fn test_order_follows_markup_not_label() {
        let entries = vec![entry("a::Zebra", 1), entry("b::Aardvark", 2)];
        let links = render_links(&entries, "/s?f=", true);

        let texts: Vec<_> = links.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Zebra (1)", "Aardvark (2)"]);
    }

    #[test]
    fn test_order_ignores_counts() {
        let entries = vec![entry("Z", 1), entry("A", 2)];
        let links = render_links(&entries, "/s?f=", true);

        let markup: Vec<_> = links.iter().map(|l| l.markup.clone()).collect();
        let mut expected = markup.clone();
        expected.sort();
        assert_eq!(markup, expected);
        assert_eq!(links[0].text, "A (2)");
    }

    #[test]
    fn test_order_compares_escaped_text() {
        // Same target, so the visible text decides. Raw '<' sorts after '-',
        // but its escaped form "&lt;" sorts before it.
        let a = NormalizedFacetEntry {
            display_label: "A - B".to_string(),
            url_value: "x".to_string(),
            count: 1,
        };
        let b = NormalizedFacetEntry {
            display_label: "A < B".to_string(),
            ..a.clone()
        };
        let links = render_links(&[a, b], "/s?f=", false);

        assert_eq!(links[0].text, "A < B");
        assert_eq!(links[1].text, "A - B");
    }

    #[test]
    fn test_uppercase_sorts_before_lowercase() {
        let entries = vec![entry("apple", 1), entry("Banana", 1)];
        let links = render_links(&entries, "/s?f=", false);
        assert_eq!(links[0].text, "Banana");
        assert_eq!(links[1].text, "apple");
    }
}
