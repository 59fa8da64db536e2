pub mod attempt;
pub mod dispatch;

pub use attempt::AttemptError;
pub use dispatch::DispatchError;
