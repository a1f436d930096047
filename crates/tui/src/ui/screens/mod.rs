pub mod amount;
pub mod detail;
pub mod home;
pub mod my_qr;
pub mod scan;
pub mod success;
