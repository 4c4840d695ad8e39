mod asset;
mod category;

pub use asset::{AssetCommands, ReassignArgs};
pub use category::CategoryCommands;
