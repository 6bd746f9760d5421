use serde::Deserialize;

/// One page of a cursor-paginated collection.
///
/// `items` may contain nulls for entries the upstream removed; `next` is the
/// absolute URL of the following page or null on the last one.
#[derive(Debug, Deserialize)]
pub struct CollectionPage<I> {
    #[serde(default = "Vec::new")]
    pub items: Vec<Option<I>>,
    #[serde(default)]
    pub next: Option<String>,
}
