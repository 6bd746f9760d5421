pub mod common;
mod pagination_flow;
