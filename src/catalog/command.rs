pub mod add_media_cmd;
pub mod get_media_cmd;
pub mod list_medias_cmd;
