//! Domain core of the QR payment mock.
//!
//! - [`parse_payment_uri`] turns a scanned payload into a [`PayeeRecord`].
//! - [`Machine`] is the screen state machine; the terminal front-end feeds it
//!   [`Event`]s and performs the returned [`Effect`]s.
//! - [`spawn_settlement`] runs the simulated settlement timer.
//!
//! All state is in memory and lives as long as the `Machine`.

pub use error::{EngineError, Rejection, ScanFailure};
pub use machine::{
    Effect, Event, Machine, MachineBuilder, Notice, NoticeLevel, PaymentDraft, PaymentState,
    PendingSettlement, Screen,
};
pub use money::{Amount, CURRENCY_SYMBOL};
pub use payee::{PayeeRecord, UNKNOWN_MERCHANT, parse_payment_uri, payment_uri};
pub use reference::ReferenceGenerator;
pub use settlement::{DEFAULT_SETTLEMENT_DELAY, SettlementTask, spawn_settlement};
pub use transactions::{
    Direction, SenderIdentity, TransactionLog, TransactionRecord, relative_label,
};

pub mod fixtures;

mod error;
mod machine;
mod money;
mod payee;
mod reference;
mod settlement;
mod transactions;
