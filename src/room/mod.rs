pub mod joiner;
pub mod selector;

pub use joiner::RoomJoiner;
pub use selector::{RoomSelector, ROOM_NAME_PARAM};
