pub mod id;
pub mod maintenance;
pub mod master;
pub mod ranking;
pub mod user;

pub use id::*;
pub use maintenance::*;
pub use master::*;
pub use ranking::*;
pub use user::*;
