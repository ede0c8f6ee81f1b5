//! Site-scoped operations: lists, list items, document sets and pages.

mod document_sets;
mod lists;
mod pages;

pub use document_sets::DOCUMENT_SET_CONTENT_TYPE;
pub use pages::ARTICLE_LAYOUT_WEBPART_ID;
