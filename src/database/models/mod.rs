pub mod note;
pub mod task;
pub mod task_group;
pub mod user;

pub use note::{Note, NoteInput};
pub use task::{Task, TaskFilter, TaskInput, STATUS_IN_PROGRESS, STATUS_TODO};
pub use task_group::{TaskGroup, TaskGroupInput, TaskGroupPatch};
pub use user::{NewUser, User, UserProfile, DEFAULT_AVATAR};
