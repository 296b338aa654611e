mod catalog;
mod wildcard;

pub use catalog::{Catalog, CatalogError};
pub use wildcard::WildcardPattern;
