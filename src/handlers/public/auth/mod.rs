mod login;
mod register;
pub mod validate;

pub use login::login;
pub use register::register;
