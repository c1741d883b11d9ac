use scraper::{ElementRef, Html, Node, Selector};

use crate::error::ParseError;
use crate::model::RawFragment;

/// Elements whose text never shows up on the rendered page.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];
/// Elements that start a new line when rendered.
const BLOCK_TAGS: &[&str] = &["p", "div", "li", "tr", "h1", "h2", "h3", "h4", "h5", "h6"];

pub fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Visible text of an element with `<br>` and block boundaries turned into `\n`.
pub fn element_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in el.descendants() {
        match node.value() {
            Node::Text(text) => {
                let hidden = node.ancestors().any(|a| {
                    a.value()
                        .as_element()
                        .is_some_and(|e| HIDDEN_TAGS.contains(&e.name()))
                });
                if !hidden {
                    out.push_str(text);
                }
            }
            Node::Element(e) if e.name() == "br" => out.push('\n'),
            Node::Element(e) if BLOCK_TAGS.contains(&e.name()) && !out.is_empty() => {
                out.push('\n')
            }
            _ => {}
        }
    }
    out
}

/// One fragment per direct child element of `<body>`, in document order.
pub fn body_fragments(html: &str) -> Result<Vec<RawFragment>, ParseError> {
    let document = Html::parse_document(html);
    let children = selector("body > *")?;

    Ok(document
        .select(&children)
        .filter(|el| !HIDDEN_TAGS.contains(&el.value().name()))
        .map(|el| RawFragment::new(element_text(el)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn br_becomes_newline() {
        let doc = Html::parse_fragment("<div>25-Dec-2025<br>7:00 PM<br/></div>");
        let div = doc.select(&selector("div").unwrap()).next().unwrap();
        assert_eq!(element_text(div), "25-Dec-2025\n7:00 PM\n");
    }

    #[test]
    fn body_children_in_order() {
        let html = r#"<html><head><title>x</title></head><body>
            <div>25-Dec-2025 7:00 PM</div>
            <script>var a = 1;</script>
            <p>Ravi <b>Kumar</b></p>
            <span>Music Hall</span>
        </body></html>"#;
        let frags = body_fragments(html).unwrap();
        let texts: Vec<_> = frags.iter().map(|f| f.text.trim().to_string()).collect();
        assert_eq!(texts, vec!["25-Dec-2025 7:00 PM", "Ravi Kumar", "Music Hall"]);
    }

    #[test]
    fn invalid_selector_is_typed_error() {
        assert!(matches!(selector("td[["), Err(ParseError::Selector { .. })));
    }
}
