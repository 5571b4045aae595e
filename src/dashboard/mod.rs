pub mod controller;
pub mod form;
pub mod poller;
pub mod render;
pub mod tabs;

pub use controller::*;
pub use poller::*;
