pub mod classroom;
pub mod course;
pub mod equipment;
pub mod teacher;
pub mod time_slot;
pub mod user;
