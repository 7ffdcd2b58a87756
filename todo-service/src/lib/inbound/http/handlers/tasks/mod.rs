pub mod create_task;
pub mod delete_task;
pub mod get_task;
pub mod list_tasks;
pub mod toggle_complete;
pub mod update_task;

pub use create_task::create_task;
pub use delete_task::delete_task;
pub use get_task::get_task;
pub use list_tasks::list_tasks;
pub use toggle_complete::toggle_complete;
pub use update_task::update_task;
