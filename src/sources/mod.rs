/// Upstream API client
///
/// Token exchange, authenticated fetches and cursor pagination against the catalog API.
pub mod fetch;
pub mod pager;
pub mod playlist;
pub mod token_exchange;
