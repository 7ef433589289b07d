pub mod appointments;
pub mod messages;
pub mod teachers;
pub mod users;

pub mod sessions;
