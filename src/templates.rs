use askama::Template; // bring trait in scope

// escape = "none" throughout: feed text is embedded verbatim, exactly as the
// feed supplied it. Known limitation, kept so output stays byte-stable.

#[derive(Template)]
#[template(path = "header.html", escape = "none")]
pub struct HeaderHtml<'a> {
    pub title: &'a str,
    pub link: &'a str,
    pub description: &'a str,
}

#[derive(Template)]
#[template(path = "item_row.html", escape = "none")]
pub struct ItemRowHtml<'a> {
    pub date: &'a str,
    pub source: Option<SourceAnchor<'a>>,
    pub link: &'a str,
    pub headline: &'a str,
}

pub struct SourceAnchor<'a> {
    pub url: &'a str,
    pub name: &'a str,
}

#[derive(Template)]
#[template(path = "footer.html", escape = "none")]
pub struct FooterHtml;
