use askama::Template;
use log::debug;

use crate::{
    error::Result,
    templates::{FooterHtml, HeaderHtml, ItemRowHtml, SourceAnchor},
    tree::{Element, XmlNode},
};

const NO_DATE: &str = "No Date Available";
const NO_TITLE: &str = "No Title Available";

/// Render the whole page for one channel: header, one table row per `<item>`
/// child in document order, footer. Children of the channel that are not
/// `<item>` elements are skipped. Pure: the caller owns writing the lines.
pub fn render(channel: &Element) -> Result<Vec<String>> {
    let mut lines = render_header(channel)?;

    let mut items = 0;
    for child in &channel.children {
        if let XmlNode::Element(item) = child {
            if item.tag == "item" {
                lines.extend(render_item(item)?);
                items += 1;
            }
        }
    }
    debug!("Rendered {} item rows", items);

    lines.extend(render_footer()?);
    Ok(lines)
}

/// Opening tags up to and including the table header row. `title`, `link`
/// and `description` must be present on the channel; an empty title becomes
/// `Empty Title` in the `<title>` tag only, while the `<h1>` anchor, the
/// link and the description are emitted verbatim even when empty.
pub fn render_header(channel: &Element) -> Result<Vec<String>> {
    let header = HeaderHtml {
        title: channel.child_text("title")?,
        link: channel.child_text("link")?,
        description: channel.child_text("description")?,
    };

    Ok(to_lines(header.render()?))
}

/// One `<tr>` with the three cells: publication date, source, news anchor.
pub fn render_item(item: &Element) -> Result<Vec<String>> {
    let date = match item.child_text("pubDate")? {
        "" => NO_DATE,
        date => date,
    };

    // <source> is the one genuinely optional field; missing and
    // present-but-empty collapse to the same fallback cell
    let source = match item.find_child("source") {
        Some(index) => item.children[index]
            .as_element()
            .filter(|source| !source.text().is_empty())
            .map(|source| SourceAnchor {
                url: source.attr("url").unwrap_or_default(),
                name: source.text(),
            }),
        None => None,
    };

    let title = item.child_text("title")?;
    let link = item.child_text("link")?;

    let headline = if title.is_empty() {
        match item.child_text("description")? {
            "" => NO_TITLE,
            description => description,
        }
    } else {
        title
    };

    let row = ItemRowHtml {
        date,
        source,
        link,
        headline,
    };

    Ok(to_lines(row.render()?))
}

/// Closing table/body/html tags.
pub fn render_footer() -> Result<Vec<String>> {
    Ok(to_lines(FooterHtml.render()?))
}

fn to_lines(rendered: String) -> Vec<String> {
    rendered.lines().map(str::to_string).collect()
}
