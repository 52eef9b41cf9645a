pub use super::city::Entity as City;
pub use super::picnic::Entity as Picnic;
pub use super::picnic_registration::Entity as PicnicRegistration;
pub use super::user::Entity as User;
