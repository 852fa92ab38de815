pub mod admins;
pub mod applications;
pub mod auth;
pub mod categories;
pub mod contact;
pub mod courses;
pub mod dashboard;
pub mod instructors;
pub mod notifications;
pub mod search;
pub mod settings;
