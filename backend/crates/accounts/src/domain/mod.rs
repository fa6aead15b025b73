//! Accounts Domain Layer

pub mod entity {
    pub mod credential;
    pub mod profile;
    pub mod session;
    pub mod user;
}

pub mod value_object {
    pub mod email;
    pub mod user_name;
    pub mod user_password;
}

pub mod repository;
