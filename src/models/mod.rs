pub mod role;
pub mod task;
pub mod user;

pub use role::Role;
pub use task::{Task, TaskInput, TaskListQuery, TaskPatch};
pub use user::{User, UserOut, UserUpdate};
