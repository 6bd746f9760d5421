pub mod page;
pub mod playlist;
