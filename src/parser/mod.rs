pub mod playlist_id;
pub mod token_response;
