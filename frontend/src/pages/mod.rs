pub mod forgot_password;
pub mod home;
pub mod reset_password;

pub use forgot_password::*;
pub use home::*;
pub use reset_password::*;
