mod clients;
mod employees;
mod reservations;
mod rooms;

pub use self::clients::MySqlClientRepository;
pub use self::employees::MySqlEmployeeRepository;
pub use self::reservations::MySqlReservationRepository;
pub use self::rooms::MySqlRoomRepository;
