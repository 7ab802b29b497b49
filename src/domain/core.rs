mod availability;
mod client;
mod employee;
mod price;
mod reservation;
mod room;

pub use self::availability::*;
pub use self::client::*;
pub use self::employee::*;
pub use self::price::*;
pub use self::reservation::*;
pub use self::room::*;
