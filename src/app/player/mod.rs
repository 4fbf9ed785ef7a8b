pub mod metadata;
pub mod mpris;

pub use metadata::{MetadataSource, TrackMetadata};
pub use mpris::{MprisPlayer, player_is_running};
