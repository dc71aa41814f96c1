use thiserror::Error;

#[derive(Error, Debug)]
pub enum RssError {
    #[error("Request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("Failed to parse xml: {0}")]
    XmlParse(#[from] libxml::parser::XmlParseError),
    #[error("Failed to render template: {0}")]
    TemplateRender(#[from] askama::Error),
    #[error("Not a valid RSS 2.0 feed: {0}")]
    InvalidFeed(String),
    #[error("Required element <{tag}> missing under <{parent}>")]
    MissingElement { parent: String, tag: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = anyhow::Result<T, RssError>;
