pub mod receiver_desc;

pub use receiver_desc::ReceiverDesc;
