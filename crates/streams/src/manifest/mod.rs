pub mod model;
pub mod parser;

pub use model::{MediaKind, MediaRendition, MultivariantPlaylist, Resolution, VariantPlaylist};
pub use parser::{from_master_playlist, parse_multivariant};
