// src/core/html.rs
//! Small helpers over the `scraper` DOM. Everything here walks nodes by hand,
//! so no selector ever needs to be compiled at runtime.

use scraper::ElementRef;

use super::sanitize::normalize_ws;

/// Tag name check, ASCII case-insensitive (html5ever already lowercases).
pub fn is_tag(el: ElementRef<'_>, name: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(name)
}

/// Visible text of an element: all descendant text nodes, whitespace collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Element children only (text and comment nodes skipped).
pub fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children().filter_map(ElementRef::wrap)
}

/// Nearest enclosing `<table>`, not counting `el` itself.
pub fn owning_table<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| is_tag(*a, "table"))
}

/// True when `el` sits inside some other table (nested layout tables).
pub fn is_nested_in_table(el: ElementRef<'_>) -> bool {
    owning_table(el).is_some()
}

/// Cheap pre-check before handing a comment body to the HTML parser.
pub fn mentions_table(s: &str) -> bool {
    s.as_bytes()
        .windows(6)
        .any(|w| w.eq_ignore_ascii_case(b"<table"))
}

/// Positive integer attribute such as `colspan="3"`; junk and zero read as 1.
pub fn span_attr(el: ElementRef<'_>, name: &str) -> usize {
    el.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
        .min(1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first<'a>(doc: &'a Html, tag: &str) -> ElementRef<'a> {
        doc.tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|e| is_tag(*e, tag))
            .unwrap()
    }

    #[test]
    fn text_and_nesting() {
        let doc = Html::parse_document(
            "<table id=outer><tr><td><table id=inner><tr><td> A <b>B</b>\n</td></tr></table></td></tr></table>",
        );
        let inner = doc
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().attr("id") == Some("inner"))
            .unwrap();
        assert!(is_nested_in_table(inner));
        assert_eq!(owning_table(inner).unwrap().value().attr("id"), Some("outer"));
        assert!(!is_nested_in_table(first(&doc, "table")));
        assert_eq!(text_of(inner), "A B");
    }

    #[test]
    fn table_mention_is_case_insensitive() {
        assert!(mentions_table(" <div><TABLE class=x>"));
        assert!(!mentions_table("<div>tab le</div>"));
    }

    #[test]
    fn spans_default_to_one() {
        let doc = Html::parse_fragment(r#"<table><tr><td colspan="3" rowspan="x">a</td></tr></table>"#);
        let td = first(&doc, "td");
        assert_eq!(span_attr(td, "colspan"), 3);
        assert_eq!(span_attr(td, "rowspan"), 1);
    }
}
