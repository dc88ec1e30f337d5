pub mod album;
pub mod artist;
pub mod genre;
pub mod label;
pub mod producer;
pub mod user;

pub use album::Album;
pub use artist::Artist;
pub use genre::Genre;
pub use label::Label;
pub use producer::Producer;
pub use user::User;
