pub mod buffer;
pub mod codec;
pub mod gateway;

pub use buffer::HistoryBuffer;
pub use gateway::{HistoryGateway, HostHistory};
