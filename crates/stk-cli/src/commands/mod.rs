pub mod asset;
pub mod category;
pub mod dispatch;
pub mod export;
pub mod import;
pub mod schema;
pub mod serve;
pub mod shared;
pub mod stats;
